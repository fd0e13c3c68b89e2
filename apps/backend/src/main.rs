use actix_web::{web, App, HttpServer};
use chess_backend::config::server::ServerConfig;
use chess_backend::infra::state::build_state;
use chess_backend::middleware::cors::cors_middleware;
use chess_backend::middleware::request_trace::RequestTrace;
use chess_backend::middleware::structured_logger::StructuredLogger;
use chess_backend::middleware::trace_span::TraceSpan;
use chess_backend::routes;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Config comes first: it decides the log format. Failures go to stderr.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.detail());
            std::process::exit(1);
        }
    };
    telemetry::init_tracing(config.log_format);

    let app_state = build_state().with_security(config.security()).build();
    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    tracing::info!(
        host = %config.host,
        port = config.port,
        version = env!("CARGO_PKG_VERSION"),
        "starting chess backend"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
