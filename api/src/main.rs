use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use sf_api::app::{create_app, AppState};
use sf_infra::{
    create_pool, MySqlCategoryRepository, MySqlProductRepository, MySqlResetTokenRepository,
    MySqlUserRepository,
};
use sf_shared::{CacheConfig, DatabaseConfig, JwtConfig, ServerConfig};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Storefront API server");

    let server = ServerConfig::from_env();
    let database = DatabaseConfig::from_env();
    let jwt = JwtConfig::from_env();

    let cache = CacheConfig::from_env();
    if cache.use_distributed {
        log::warn!("USE_DISTRIBUTED_CACHE is set but no cache layer is configured; ignoring");
    }

    let pool = create_pool(&database)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    info!("Database pool established");

    let category_repo = Arc::new(MySqlCategoryRepository::new(pool.clone()));
    let product_repo = Arc::new(MySqlProductRepository::new(pool.clone()));
    let user_repo = Arc::new(MySqlUserRepository::new(pool.clone()));
    let reset_token_repo = Arc::new(MySqlResetTokenRepository::new(pool));

    let state = web::Data::new(AppState::new(
        category_repo,
        product_repo,
        user_repo,
        reset_token_repo,
        jwt,
    ));

    let bind_address = (server.host.clone(), server.port);
    info!("Listening on {}:{}", server.host, server.port);

    HttpServer::new(move || create_app(state.clone()))
        .bind(bind_address)?
        .run()
        .await
}
