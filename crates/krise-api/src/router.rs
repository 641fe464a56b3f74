//! Route table.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the full application router with middleware applied.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(household_routes())
        .merge(membership_routes())
        .merge(incident_routes())
        .merge(scenario_routes())
        .merge(notification_routes())
        .merge(storage_routes())
        .merge(mapicon_routes())
        .merge(news_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api)
        .route("/ws", get(handlers::ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/confirm-email", post(handlers::auth::confirm_email))
        .route(
            "/auth/resend-confirmation",
            post(handlers::auth::resend_confirmation),
        )
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/auth/two-factor",
            post(handlers::auth::verify_two_factor).put(handlers::auth::set_two_factor),
        )
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route(
            "/auth/request-password-reset",
            post(handlers::auth::request_password_reset),
        )
        .route("/auth/reset-password", post(handlers::auth::reset_password))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users/me/position", put(handlers::user::update_position))
        .route(
            "/users/household-positions",
            get(handlers::user::household_positions),
        )
}

fn household_routes() -> Router<AppState> {
    Router::new()
        .route("/households", post(handlers::household::create))
        .route(
            "/households/mine",
            get(handlers::household::my_household)
                .put(handlers::household::update)
                .delete(handlers::household::delete),
        )
        .route("/households/mine/leave", post(handlers::household::leave))
        .route(
            "/households/mine/owner",
            put(handlers::household::change_owner),
        )
        .route(
            "/households/mine/members/{user_id}",
            delete(handlers::household::remove_member),
        )
        .route(
            "/households/mine/unregistered",
            post(handlers::household::add_unregistered),
        )
        .route(
            "/households/mine/unregistered/{member_id}",
            put(handlers::household::edit_unregistered)
                .delete(handlers::household::remove_unregistered),
        )
        .route(
            "/households/search",
            get(handlers::household::search_by_name),
        )
        .route(
            "/households/{household_id}",
            get(handlers::household::search),
        )
}

fn membership_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/memberships/invitations",
            post(handlers::membership::invite),
        )
        .route(
            "/memberships/invitations/received",
            get(handlers::membership::received_invitations),
        )
        .route(
            "/memberships/invitations/sent",
            get(handlers::membership::household_sent_invitations),
        )
        .route(
            "/memberships/invitations/{request_id}/accept",
            post(handlers::membership::accept_invitation),
        )
        .route(
            "/memberships/join-requests",
            post(handlers::membership::request_join),
        )
        .route(
            "/memberships/join-requests/pending",
            get(handlers::membership::household_join_requests),
        )
        .route(
            "/memberships/join-requests/accepted",
            get(handlers::membership::household_accepted_join_requests),
        )
        .route(
            "/memberships/join-requests/{request_id}/accept",
            post(handlers::membership::accept_join_request),
        )
        .route(
            "/memberships/{request_id}/decline",
            post(handlers::membership::decline),
        )
        .route(
            "/memberships/{request_id}/cancel",
            post(handlers::membership::cancel),
        )
}

fn incident_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/incidents",
            get(handlers::incident::list).post(handlers::incident::create),
        )
        .route(
            "/incidents/{id}",
            get(handlers::incident::get)
                .put(handlers::incident::update)
                .delete(handlers::incident::delete),
        )
}

fn scenario_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/scenarios",
            get(handlers::scenario::list).post(handlers::scenario::create),
        )
        .route(
            "/scenarios/{id}",
            get(handlers::scenario::get).put(handlers::scenario::update),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/broadcast",
            post(handlers::notification::broadcast),
        )
}

fn storage_routes() -> Router<AppState> {
    Router::new().route("/storage", get(handlers::storage::household_storage))
}

fn mapicon_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/map-icons",
            get(handlers::mapicon::list).post(handlers::mapicon::create),
        )
        .route("/map-icons/nearby", get(handlers::mapicon::nearby))
        .route("/map-icons/closest", get(handlers::mapicon::closest))
        .route(
            "/map-icons/{id}",
            put(handlers::mapicon::update).delete(handlers::mapicon::delete),
        )
}

fn news_routes() -> Router<AppState> {
    Router::new().route(
        "/news",
        get(handlers::news::list).post(handlers::news::publish),
    )
}
