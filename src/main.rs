use std::sync::Arc;

use site_monitor::config::{check_db, environment::Config, init_db};
use site_monitor::modules::monitor::{MonitoringCrud, ResultSink};
use site_monitor::modules::website::{SiteCrud, SiteRepository};
use site_monitor::services::metrics::MetricsRegistry;
use site_monitor::services::monitor::{MonitorEngine, ProbeTransport, ReqwestTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_monitor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load environment configuration");

    let db = init_db(&config.database_url)
        .await
        .expect("Failed to connect to MySQL");
    check_db(&db).await.expect("Database check failed");
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Connected to MySQL");

    let metrics = MetricsRegistry::new().expect("Failed to initialize metrics registry");

    let sites: Arc<dyn SiteRepository> = Arc::new(SiteCrud::new(db.clone()));
    let sink: Arc<dyn ResultSink> = Arc::new(MonitoringCrud::new(db.clone()));
    let transport: Arc<dyn ProbeTransport> = Arc::new(
        ReqwestTransport::new(config.monitoring.request_timeout)
            .expect("Failed to build HTTP client"),
    );

    let engine = MonitorEngine::new(&config.monitoring, transport, sink, metrics.clone());
    let scheduler = engine.scheduler();

    let initial_sites = sites.list_sites().await.expect("Failed to load websites");
    tracing::info!("Loaded {} websites", initial_sites.len());
    tokio::spawn(engine.run(initial_sites));

    let app = site_monitor::create_app(sites, scheduler, metrics);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
