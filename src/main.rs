use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use mentor_match::config::{DirectoryBackend, Settings};
use mentor_match::core::{MatchFinder, Matcher};
use mentor_match::routes::{self, AppState, JwtVerifier};
use mentor_match::services::{AppwriteClient, AppwriteCollections, Directory, PostgresClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path extraction errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

async fn build_directory(settings: &Settings) -> Result<Arc<dyn Directory>, String> {
    match settings.directory.backend {
        DirectoryBackend::Postgres => {
            let database = settings
                .database
                .as_ref()
                .ok_or("directory.backend is postgres but [database] is missing")?;

            let client = PostgresClient::from_settings(
                &database.url,
                database.max_connections,
                database.min_connections,
                database.acquire_timeout_secs,
                database.idle_timeout_secs,
            )
            .await
            .map_err(|e| format!("Failed to connect to PostgreSQL: {}", e))?;

            info!(
                "PostgreSQL directory initialized (max: {} connections)",
                database.max_connections.unwrap_or(10)
            );
            let directory: Arc<dyn Directory> = Arc::new(client);
            Ok(directory)
        }
        DirectoryBackend::Appwrite => {
            let appwrite = settings
                .appwrite
                .as_ref()
                .ok_or("directory.backend is appwrite but [appwrite] is missing")?;

            let collections = AppwriteCollections {
                startups: appwrite.startups_collection.clone(),
                mentors: appwrite.mentors_collection.clone(),
            };

            let client = AppwriteClient::new(
                appwrite.endpoint.clone(),
                appwrite.api_key.clone(),
                appwrite.project_id.clone(),
                appwrite.database_id.clone(),
                collections,
                Duration::from_secs(appwrite.timeout_secs.unwrap_or(30)),
                appwrite.page_size.unwrap_or(100),
            )
            .map_err(|e| format!("Failed to create Appwrite client: {}", e))?;

            info!("Appwrite directory initialized ({})", appwrite.endpoint);
            let directory: Arc<dyn Directory> = Arc::new(client);
            Ok(directory)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting mentor matchmaking service...");

    let directory = build_directory(&settings).await.map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let weights = settings.scoring_weights();
    if weights.max_total() > 100.0 {
        warn!("Scoring weights sum to {}, scores will be clamped at 100", weights.max_total());
    }

    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let verifier = match settings.auth.jwt_secret.as_deref() {
        Some(secret) if !secret.is_empty() => Some(JwtVerifier::new(secret)),
        _ => {
            warn!("No auth.jwt_secret configured, match endpoints are open");
            None
        }
    };

    // Build application state
    let app_state = AppState {
        finder: MatchFinder::new(directory, matcher),
        verifier,
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
