//! Application state and factory

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use sf_core::errors::ErrorCode;
use sf_core::repositories::{
    CategoryRepository, ProductRepository, ResetTokenRepository, UserRepository,
};
use sf_core::services::auth::AuthService;
use sf_core::services::category::CategoryService;
use sf_core::services::product::ProductService;
use sf_core::services::token::TokenService;
use sf_core::services::user::UserService;
use sf_shared::{ApiResponse, JwtConfig};

use crate::middleware::auth::JwtAuth;
use crate::middleware::cors::create_cors;
use crate::routes::{auth, categories, products, users};

/// Shared services injected into every handler.
pub struct AppState<C, P, U, R>
where
    C: CategoryRepository,
    P: ProductRepository,
    U: UserRepository,
    R: ResetTokenRepository,
{
    pub categories: Arc<CategoryService<C>>,
    pub products: Arc<ProductService<P, C>>,
    pub users: Arc<UserService<U>>,
    pub auth: Arc<AuthService<U, R>>,
    pub tokens: Arc<TokenService>,
}

impl<C, P, U, R> AppState<C, P, U, R>
where
    C: CategoryRepository,
    P: ProductRepository,
    U: UserRepository,
    R: ResetTokenRepository,
{
    pub fn new(
        category_repo: Arc<C>,
        product_repo: Arc<P>,
        user_repo: Arc<U>,
        reset_token_repo: Arc<R>,
        jwt: JwtConfig,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(jwt));
        Self {
            categories: Arc::new(CategoryService::new(category_repo.clone())),
            products: Arc::new(ProductService::new(product_repo, category_repo)),
            users: Arc::new(UserService::new(user_repo.clone())),
            auth: Arc::new(AuthService::new(user_repo, reset_token_repo, tokens.clone())),
            tokens,
        }
    }
}

/// Build the application with all routes and middleware.
///
/// Category and product scopes sit behind JWT authentication as a
/// whole; permission checks happen per handler. Auth endpoints and user
/// registration are public.
pub fn create_app<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    let tokens = state.tokens.clone();

    App::new()
        .app_data(state)
        .wrap(Logger::default())
        .wrap(create_cors())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login::<C, P, U, R>))
                        .route(
                            "/forgot-password",
                            web::post().to(auth::forgot_password::<C, P, U, R>),
                        )
                        .route(
                            "/validate-reset-token",
                            web::post().to(auth::validate_reset_token::<C, P, U, R>),
                        )
                        .route(
                            "/reset-password",
                            web::post().to(auth::reset_password::<C, P, U, R>),
                        ),
                )
                .service(
                    web::scope("/categories")
                        .wrap(JwtAuth::new(tokens.clone()))
                        // literal segments before the {id} catch-all
                        .route("/tree", web::get().to(categories::get_tree::<C, P, U, R>))
                        .route(
                            "/slug/{slug}",
                            web::get().to(categories::get_by_slug::<C, P, U, R>),
                        )
                        .route("", web::get().to(categories::get_all::<C, P, U, R>))
                        .route("", web::post().to(categories::create::<C, P, U, R>))
                        .route("/{id}", web::get().to(categories::get_by_id::<C, P, U, R>))
                        .route("/{id}", web::put().to(categories::update::<C, P, U, R>))
                        .route("/{id}", web::delete().to(categories::delete::<C, P, U, R>)),
                )
                .service(
                    web::scope("/products")
                        .wrap(JwtAuth::new(tokens.clone()))
                        .route(
                            "/with-categories",
                            web::get().to(products::with_categories::<C, P, U, R>),
                        )
                        .route("/search", web::get().to(products::search::<C, P, U, R>))
                        .route(
                            "/detailed/{id}",
                            web::get().to(products::get_detailed::<C, P, U, R>),
                        )
                        .route(
                            "/category/{category_id}",
                            web::get().to(products::by_category::<C, P, U, R>),
                        )
                        .route(
                            "/slug/{slug}",
                            web::get().to(products::get_by_slug::<C, P, U, R>),
                        )
                        .route("", web::get().to(products::get_all::<C, P, U, R>))
                        .route("", web::post().to(products::create::<C, P, U, R>))
                        .route("/{id}", web::get().to(products::get_by_id::<C, P, U, R>))
                        .route("/{id}", web::put().to(products::update::<C, P, U, R>))
                        .route("/{id}", web::delete().to(products::delete::<C, P, U, R>)),
                )
                .service(
                    web::scope("/users")
                        // registration is public, everything else needs a token
                        .route("", web::post().to(users::register::<C, P, U, R>))
                        .route(
                            "",
                            web::get()
                                .to(users::list::<C, P, U, R>)
                                .wrap(JwtAuth::new(tokens.clone())),
                        )
                        .route(
                            "/{id}",
                            web::get()
                                .to(users::get_by_id::<C, P, U, R>)
                                .wrap(JwtAuth::new(tokens.clone())),
                        )
                        .route(
                            "/{id}",
                            web::put()
                                .to(users::update::<C, P, U, R>)
                                .wrap(JwtAuth::new(tokens.clone())),
                        )
                        .route(
                            "/{id}/change-password",
                            web::post()
                                .to(users::change_password::<C, P, U, R>)
                                .wrap(JwtAuth::new(tokens.clone())),
                        )
                        .route(
                            "/{id}",
                            web::delete()
                                .to(users::delete::<C, P, U, R>)
                                .wrap(JwtAuth::new(tokens)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<serde_json::Value>::failure(
        ErrorCode::EndpointNotFound.as_u16(),
        "Endpoint not found",
    ))
}
