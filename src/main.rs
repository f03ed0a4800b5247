use actix_web::{App, HttpServer};
use gymdesk::config::{AppConfig, Config, LogFormat, StoreBackend};
use gymdesk::middleware::{ErrorHandler, RequestId};
use gymdesk::{AppServices, EntityStore};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(app.log_filter()));
    let registry = tracing_subscriber::registry().with(filter);

    match app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env().map_err(std::io::Error::other)?;
    init_tracing(&config.app);
    config.validate().map_err(std::io::Error::other)?;

    tracing::info!("Starting gymdesk");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Local offset: {}", config.app.utc_offset);

    let (store, pool) = match (&config.app.store_backend, &config.database) {
        (StoreBackend::MySql, Some(database)) => {
            let pool = database.connect().await.map_err(std::io::Error::other)?;
            if database.run_migrations {
                database.migrate(&pool).await.map_err(std::io::Error::other)?;
            }
            (EntityStore::mysql(pool.clone()), Some(pool))
        }
        _ => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            (EntityStore::in_memory(), None)
        }
    };

    let services = AppServices::new(store, config.app.utc_offset);

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(move |cfg| services.configure(cfg))
    })
    .workers(config.server.workers)
    .shutdown_timeout(config.server.shutdown_timeout.as_secs())
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    let result = server.await;
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
    result
}
