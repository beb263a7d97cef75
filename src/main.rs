use dotenvy::dotenv;
use order_query_service::config::AppConfig;
use order_query_service::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let pool = create_pool(&config.database_url).map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    log::info!(
        "Starting server at http://{}:{} (batch size {}, overflow {:?})",
        config.host,
        config.port,
        config.batch.size,
        config.batch.overflow
    );

    build_server(pool, &config)?.await
}
