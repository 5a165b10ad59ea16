//! Category endpoints
//!
//! Listing and the tree are open to any authenticated user; single
//! lookups need `category_view` and mutations need `category_manage`.

use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::domain::entities::permissions::{CATEGORY_MANAGE, CATEGORY_VIEW};
use sf_core::repositories::{
    CategoryRepository, ProductRepository, ResetTokenRepository, UserRepository,
};

use crate::app::AppState;
use crate::dto::category::{CategoryDto, CreateCategoryRequest, UpdateCategoryRequest};
use crate::handlers::error::{created_json, domain_error_response, ok_json, validation_failure};
use crate::middleware::auth::AuthContext;

/// GET /api/v1/categories
pub async fn get_all<C, P, U, R>(state: web::Data<AppState<C, P, U, R>>) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.categories.get_all().await {
        Ok(categories) => ok_json(
            categories
                .into_iter()
                .map(CategoryDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/categories/tree
pub async fn get_tree<C, P, U, R>(state: web::Data<AppState<C, P, U, R>>) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.categories.get_tree().await {
        Ok(tree) => ok_json(tree),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(e) = ctx.require(CATEGORY_VIEW) {
        return domain_error_response(&e);
    }

    match state.categories.get_by_id(path.into_inner()).await {
        Ok(category) => ok_json(CategoryDto::from(category)),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/categories/slug/{slug}
pub async fn get_by_slug<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    path: web::Path<String>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(e) = ctx.require(CATEGORY_VIEW) {
        return domain_error_response(&e);
    }

    match state.categories.get_by_slug(&path.into_inner()).await {
        Ok(category) => ok_json(CategoryDto::from(category)),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/v1/categories
pub async fn create<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    request: web::Json<CreateCategoryRequest>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(e) = ctx.require(CATEGORY_MANAGE) {
        return domain_error_response(&e);
    }
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    match state
        .categories
        .create(request.into_inner().into_input(), &ctx.username)
        .await
    {
        Ok(category) => created_json(CategoryDto::from(category)),
        Err(e) => domain_error_response(&e),
    }
}

/// PUT /api/v1/categories/{id}
pub async fn update<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateCategoryRequest>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(e) = ctx.require(CATEGORY_MANAGE) {
        return domain_error_response(&e);
    }
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    match state
        .categories
        .update(
            path.into_inner(),
            request.into_inner().into_input(),
            &ctx.username,
        )
        .await
    {
        Ok(category) => ok_json(CategoryDto::from(category)),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/v1/categories/{id}
pub async fn delete<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(e) = ctx.require(CATEGORY_MANAGE) {
        return domain_error_response(&e);
    }

    match state.categories.delete(path.into_inner(), &ctx.username).await {
        Ok(()) => ok_json(true),
        Err(e) => domain_error_response(&e),
    }
}
