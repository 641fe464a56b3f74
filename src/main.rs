//! Krisevarsel server entry point: wires configuration, database,
//! services, the background scheduler and the HTTP/WebSocket stack.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use krise_core::config::AppConfig;
use krise_core::error::AppError;
use krise_core::traits::{Clock, LogMailer, Mailer, PushChannel, SystemClock};
use krise_database::repositories::{
    HouseholdRepository, IncidentRepository, MapIconRepository, MembershipRequestRepository,
    NewsRepository, NotificationRepository, ScenarioRepository, StorageRepository, UserRepository,
};
use krise_database::{DatabasePool, migration};
use krise_realtime::{ConnectionManager, WsGateway};
use krise_service::{
    AuthService, HouseholdService, IncidentService, MapIconService, MembershipRequestService,
    NewsService, NotificationFanout, NotificationService, ScenarioService, StorageService,
    UserService,
};
use krise_worker::WorkerScheduler;

#[tokio::main]
async fn main() {
    let env = std::env::var("KRISE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Krisevarsel v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // Repositories
    let users = Arc::new(UserRepository::new(db.pool().clone()));
    let households = Arc::new(HouseholdRepository::new(db.pool().clone()));
    let requests = Arc::new(MembershipRequestRepository::new(db.pool().clone()));
    let notifications_repo = Arc::new(NotificationRepository::new(db.pool().clone()));
    let incidents = Arc::new(IncidentRepository::new(db.pool().clone()));
    let scenarios = Arc::new(ScenarioRepository::new(db.pool().clone()));
    let storage = Arc::new(StorageRepository::new(db.pool().clone()));
    let mapicons = Arc::new(MapIconRepository::new(db.pool().clone()));
    let news = Arc::new(NewsRepository::new(db.pool().clone()));

    // Real-time push
    let connections = Arc::new(ConnectionManager::new(config.realtime.clone()));
    let push: Arc<dyn PushChannel> = Arc::new(WsGateway::new(connections.clone()));

    // Services
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let notification_service =
        NotificationService::new(notifications_repo.clone(), users.clone(), push.clone());
    let fanout = NotificationFanout::new(users.clone(), notifications_repo.clone(), push.clone());

    let auth_service = Arc::new(AuthService::new(&config.auth, users.clone(), mailer));
    let user_service = UserService::new(users.clone(), push.clone());
    let household_service = HouseholdService::new(
        households.clone(),
        users.clone(),
        requests.clone(),
        notification_service.clone(),
    );
    let membership_service = MembershipRequestService::new(
        requests.clone(),
        households.clone(),
        users.clone(),
        notification_service.clone(),
    );
    let incident_service = IncidentService::new(incidents, scenarios.clone(), fanout);
    let scenario_service = ScenarioService::new(scenarios);
    let storage_service = StorageService::new(
        storage,
        users.clone(),
        clock,
        notification_service.clone(),
    );
    let mapicon_service = MapIconService::new(mapicons);
    let news_service = NewsService::new(news);

    // Background jobs
    let mut scheduler = None;
    if config.worker.enabled {
        let mut worker = WorkerScheduler::new(config.worker.clone()).await?;
        worker.register_expiry_scan(storage_service.clone()).await?;
        worker.start().await?;
        tracing::info!("Background scheduler started");
        scheduler = Some(worker);
    }

    let state = krise_api::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        jwt_decoder: Arc::new(krise_auth::JwtDecoder::new(&config.auth)),
        connections,
        auth_service,
        user_service,
        household_service,
        membership_service,
        incident_service,
        scenario_service,
        notification_service,
        storage_service,
        mapicon_service,
        news_service,
    };

    let app = krise_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(mut worker) = scheduler.take() {
        worker.shutdown().await?;
    }
    db.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
