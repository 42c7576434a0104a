use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{error, info};

use menyesha_api::{handlers, AppState};
use menyesha_core::services::{AuthService, ComplaintService, DashboardService, DirectoryService};
use menyesha_infrastructure::{
    create_pool, run_migrations, DiskFileStore, PgComplaintRepository, PgUserRepository,
};
use menyesha_security::{JwtService, PasswordService};
use menyesha_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    menyesha_shared::telemetry::init_telemetry();

    info!("Menyesha server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to database
    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    run_migrations(&pool).await?;
    info!("Database connection established.");

    // Upload store (served statically under /uploads)
    let files = Arc::new(DiskFileStore::new(config.uploads.root.clone()));
    files.ensure_dirs().await?;

    // Repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let complaint_repo = Arc::new(PgComplaintRepository::new(pool.clone()));

    // Services
    let jwt = JwtService::new(config.jwt.secret.clone(), config.jwt.token_expiry);
    let passwords = PasswordService::new(config.auth.bcrypt_cost);

    let state = AppState {
        auth: Arc::new(AuthService::new(
            user_repo.clone(),
            jwt,
            passwords.clone(),
            config.bootstrap.clone(),
        )),
        directory: Arc::new(DirectoryService::new(user_repo.clone(), passwords)),
        complaints: Arc::new(ComplaintService::new(complaint_repo.clone())),
        dashboard: Arc::new(DashboardService::new(complaint_repo, user_repo)),
        files,
    };

    // Build router
    let app = build_router(state, &config);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState, config: &AppConfig) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let complaint_routes = Router::new()
        .route(
            "/",
            post(handlers::complaints::submit).get(handlers::complaints::list),
        )
        .route("/{id}/status", put(handlers::complaints::update_status))
        .route("/{id}/priority", put(handlers::complaints::update_priority));

    let institution_routes = Router::new()
        .route("/profile", get(handlers::institution::profile))
        .route("/dashboard-stats", get(handlers::institution::dashboard_stats))
        .route("/complaints", get(handlers::institution::complaints));

    let sector_routes = Router::new()
        .route("/profile", get(handlers::sector::profile))
        .route("/dashboard-stats", get(handlers::sector::dashboard_stats))
        .route("/complaints", get(handlers::sector::complaints));

    let admin_routes = Router::new()
        .route("/create-institution", post(handlers::admin::create_institution))
        .route("/create-sector", post(handlers::admin::create_sector))
        .route("/institutions", get(handlers::admin::list_institutions))
        .route("/sectors", get(handlers::admin::list_sectors))
        .route("/users", get(handlers::admin::list_users))
        .route("/dashboard-stats", get(handlers::admin::dashboard_stats))
        .route("/all-institutions", get(handlers::admin::all_institutions))
        .route("/users/{id}/status", put(handlers::admin::set_user_status))
        .route(
            "/institutions/{id}/status",
            put(handlers::admin::set_user_status),
        )
        .route(
            "/reactivate-all-institution-admins",
            put(handlers::admin::reactivate_institution_admins),
        );

    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api/complaints", complaint_routes)
        .route("/api/dashboard/citizen", get(handlers::dashboard::citizen))
        .nest("/api/institution", institution_routes)
        .nest("/api/sector", sector_routes)
        .nest("/api/admin", admin_routes)
        // Uploaded files are served statically
        .nest_service("/uploads", ServeDir::new(config.uploads.root.clone()))
        .with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        // Body limit: up to five 5 MB evidence images plus form fields
        .layer(DefaultBodyLimit::max(30 * 1024 * 1024))
}
