use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use pulse_service::middleware::JwtAuthMiddleware;
use pulse_service::{handlers, Config};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "pulse-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "pulse-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting pulse-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Migration failed: {}", e)))?;

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server_config = config.clone();

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in server_config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware::new(&server_config.auth.jwt_secret))
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::posts::create_post)),
                            )
                            .route("/feed", web::get().to(handlers::posts::get_feed))
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::posts::get_post))
                                    .route(web::patch().to(handlers::posts::update_post))
                                    .route(web::delete().to(handlers::posts::delete_post)),
                            )
                            .route("/{post_id}/like", web::post().to(handlers::posts::toggle_like))
                            .route("/{post_id}/likes", web::get().to(handlers::posts::get_likes)),
                    )
                    .service(
                        web::scope("/comments")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::comments::create_comment)),
                            )
                            .route(
                                "/post/{post_id}",
                                web::get().to(handlers::comments::get_post_comments),
                            )
                            .service(
                                web::resource("/{comment_id}")
                                    .route(web::patch().to(handlers::comments::update_comment))
                                    .route(web::delete().to(handlers::comments::delete_comment)),
                            )
                            .route(
                                "/{comment_id}/like",
                                web::post().to(handlers::comments::toggle_like),
                            )
                            .route(
                                "/{comment_id}/likes",
                                web::get().to(handlers::comments::get_likes),
                            ),
                    )
                    .service(
                        web::scope("/replies")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::replies::create_reply)),
                            )
                            .route(
                                "/comment/{comment_id}",
                                web::get().to(handlers::replies::get_comment_replies),
                            )
                            .service(
                                web::resource("/{reply_id}")
                                    .route(web::patch().to(handlers::replies::update_reply))
                                    .route(web::delete().to(handlers::replies::delete_reply)),
                            )
                            .route(
                                "/{reply_id}/like",
                                web::post().to(handlers::replies::toggle_like),
                            )
                            .route(
                                "/{reply_id}/likes",
                                web::get().to(handlers::replies::get_likes),
                            ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(config.app.workers)
    .run()
    .await
}
