use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use house_price_form::config::Settings;
use house_price_form::routes::{self, AppState, ModelStatus};
use house_price_form::services::ModelGateway;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        Settings::default()
    });

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }

    info!("Starting house price form...");

    // Load the model once; a failure keeps the server up but disables predictions
    let model = ModelStatus::from_load(ModelGateway::load(&settings.model.path));
    match &model {
        ModelStatus::Ready(gateway) => info!("Model ready: {}", gateway.model_name()),
        ModelStatus::Unavailable(reason) => error!("Model could not be loaded: {}", reason),
    }

    let app_state = AppState {
        model,
        ui: settings.ui.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let max_upload = settings.server.max_upload_bytes;

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::PayloadConfig::new(max_upload))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.bind((host, port))?.run().await
}
