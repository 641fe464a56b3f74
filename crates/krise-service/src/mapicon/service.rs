//! Map icon CRUD and proximity queries.

use std::sync::Arc;

use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_core::types::{haversine_km, Coordinates};
use krise_entity::mapicon::{MapIcon, MapIconKind, NewMapIcon};
use krise_entity::stores::MapIconStore;

use crate::context::RequestContext;

/// Admin-managed points of interest with public proximity lookups.
///
/// The icon set is small, so radius and closest-point queries load all
/// icons and filter in memory instead of pushing the distance math into
/// SQL the way the user radius query does.
#[derive(Clone)]
pub struct MapIconService {
    icons: Arc<dyn MapIconStore>,
}

impl MapIconService {
    /// Creates a new map icon service.
    pub fn new(icons: Arc<dyn MapIconStore>) -> Self {
        Self { icons }
    }

    /// Creates an icon. Admin only.
    pub async fn create(&self, ctx: &RequestContext, data: NewMapIcon) -> AppResult<MapIcon> {
        self.require_admin(ctx)?;
        validate_position(data.latitude, data.longitude)?;
        self.icons.create(data).await
    }

    /// Replaces an icon's fields. Admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: NewMapIcon,
    ) -> AppResult<MapIcon> {
        self.require_admin(ctx)?;
        validate_position(data.latitude, data.longitude)?;
        self.icons.update(id, data).await
    }

    /// Deletes an icon. Admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.require_admin(ctx)?;
        self.icons.delete(id).await
    }

    /// All icons.
    pub async fn list(&self) -> AppResult<Vec<MapIcon>> {
        self.icons.find_all().await
    }

    /// Icons within `radius_km` of a point.
    pub async fn within_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> AppResult<Vec<MapIcon>> {
        if radius_km <= 0.0 {
            return Err(AppError::validation("Radius must be positive"));
        }
        let icons = self.icons.find_all().await?;
        Ok(icons
            .into_iter()
            .filter(|icon| haversine_km(center, icon.coordinates()) <= radius_km)
            .collect())
    }

    /// The closest icon of a given kind, if any exist.
    pub async fn closest(
        &self,
        center: Coordinates,
        kind: MapIconKind,
    ) -> AppResult<Option<MapIcon>> {
        let icons = self.icons.find_all().await?;
        Ok(icons
            .into_iter()
            .filter(|icon| icon.kind == kind)
            .min_by(|a, b| {
                let da = haversine_km(center, a.coordinates());
                let db = haversine_km(center, b.coordinates());
                da.total_cmp(&db)
            }))
    }

    fn require_admin(&self, ctx: &RequestContext) -> AppResult<()> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Only admins may manage map icons"));
        }
        Ok(())
    }
}

fn validate_position(latitude: f64, longitude: f64) -> AppResult<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::validation("Coordinates out of range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_ctx, user_ctx, FakeMapIconStore};

    fn icon_at(kind: MapIconKind, latitude: f64, longitude: f64) -> NewMapIcon {
        NewMapIcon {
            kind,
            latitude,
            longitude,
            address: None,
            description: None,
            opening_hours: None,
            contact_info: None,
        }
    }

    fn service() -> MapIconService {
        MapIconService::new(Arc::new(FakeMapIconStore::default()))
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let s = service();
        let err = s
            .create(&user_ctx(), icon_at(MapIconKind::Shelter, 59.91, 10.75))
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_within_radius_filters_by_distance() {
        let s = service();
        let ctx = admin_ctx();
        s.create(&ctx, icon_at(MapIconKind::Shelter, 59.91, 10.75))
            .await
            .unwrap();
        s.create(&ctx, icon_at(MapIconKind::Shelter, 63.43, 10.40))
            .await
            .unwrap();

        let near = s
            .within_radius(Coordinates::new(59.92, 10.76), 5.0)
            .await
            .unwrap();
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].latitude, 59.91);
    }

    #[tokio::test]
    async fn test_closest_picks_nearest_of_kind() {
        let s = service();
        let ctx = admin_ctx();
        s.create(&ctx, icon_at(MapIconKind::Shelter, 59.95, 10.80))
            .await
            .unwrap();
        let nearest = s
            .create(&ctx, icon_at(MapIconKind::Shelter, 59.91, 10.75))
            .await
            .unwrap();
        s.create(&ctx, icon_at(MapIconKind::Defibrillator, 59.905, 10.745))
            .await
            .unwrap();

        let found = s
            .closest(Coordinates::new(59.90, 10.74), MapIconKind::Shelter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, nearest.id);
    }

    #[tokio::test]
    async fn test_closest_returns_none_when_kind_absent() {
        let s = service();
        let found = s
            .closest(Coordinates::new(59.90, 10.74), MapIconKind::WaterStation)
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
