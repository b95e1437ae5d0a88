//! Server mode
//!
//! Builds the actix application from the startup context and runs it until
//! Ctrl+C.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::constants::{ADMIN_PREFIX, MAX_UPLOAD_BYTES};
use crate::api::services::{AppStartTime, admin::admin_v1_routes, api_routes, health_routes, images};
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime::{self, startup::StartupContext};

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

fn announce_startup(cpu_count: usize, bind_address: &str) {
    info!("Using {} CPU cores for the server", cpu_count);
    info!("Starting server at http://{}", bind_address);
}

/// Build CORS middleware from configuration
fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // Disabled means the browser's same-origin policy
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(cors_config.max_age as usize);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Register shared state and every route on an app
///
/// Kept separate from [`run_server`] so integration tests can mount the same
/// application on top of a temporary database.
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    context: &StartupContext,
    app_start_time: &AppStartTime,
) {
    cfg.app_data(web::Data::new(context.storage.clone()))
        .app_data(web::Data::new(context.football.clone()))
        .app_data(web::Data::new(context.blob.clone()))
        .app_data(web::Data::new(context.ads.clone()))
        .app_data(web::Data::new(context.users.clone()))
        .app_data(web::Data::new(context.news.clone()))
        .app_data(web::Data::new(context.settings.clone()))
        .app_data(web::Data::new(app_start_time.clone()))
        .app_data(web::JsonConfig::default().limit(1024 * 1024))
        .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
        .service(web::scope(ADMIN_PREFIX).service(admin_v1_routes()))
        .service(health_routes())
        .service(api_routes())
        .route("/ads/{filename}", web::get().to(images::local_ad_image));
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {}", e))?;

    let config = get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let db_for_shutdown = startup.storage.get_db().clone();
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("X-Content-Type-Options", "nosniff")),
            )
            .configure(|cfg| configure_app(cfg, &startup, &app_start_time))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    announce_startup(cpu_count, &bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(db_for_shutdown) => {
            info!("Graceful shutdown complete");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Clone, Default)]
    struct Levels(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for Levels {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().push(*event.metadata().level());
        }
    }

    #[test]
    fn test_startup_messages_are_info() {
        let levels = Levels::default();
        let subscriber = tracing_subscriber::registry().with(levels.clone());
        tracing::subscriber::with_default(subscriber, || announce_startup(4, "127.0.0.1:8080"));

        let seen = levels.0.lock().clone();
        assert_eq!(seen, vec![Level::INFO, Level::INFO]);
    }

    #[test]
    fn test_empty_cors_origins_warn() {
        let levels = Levels::default();
        let subscriber = tracing_subscriber::registry().with(levels.clone());
        let cors = CorsConfig {
            enabled: true,
            allowed_origins: Vec::new(),
            ..CorsConfig::default()
        };
        tracing::subscriber::with_default(subscriber, || validate_cors_config(&cors));

        assert_eq!(levels.0.lock().clone(), vec![Level::WARN]);
    }
}
