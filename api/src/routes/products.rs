//! Product endpoints
//!
//! Plain reads are open to any authenticated user; the joined views
//! need `product_view` and mutations need `product_manage`.

use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::domain::entities::permissions::{PRODUCT_MANAGE, PRODUCT_VIEW};
use sf_core::repositories::{
    CategoryRepository, ProductRepository, ResetTokenRepository, UserRepository,
};
use sf_shared::{PaginatedApiResponse, Pagination};

use crate::app::AppState;
use crate::dto::product::{
    ProductDetailDto, ProductDto, ProductListQuery, ProductRequest, ProductSearchQuery,
};
use crate::handlers::error::{created_json, domain_error_response, ok_json, validation_failure};
use crate::middleware::auth::AuthContext;

/// GET /api/v1/products
pub async fn get_all<C, P, U, R>(state: web::Data<AppState<C, P, U, R>>) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.products.get_all().await {
        Ok(products) => ok_json(
            products
                .into_iter()
                .map(ProductDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/products/{id}
pub async fn get_by_id<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.products.get_by_id(path.into_inner()).await {
        Ok(product) => ok_json(ProductDto::from(product)),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/products/slug/{slug}
pub async fn get_by_slug<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    path: web::Path<String>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.products.get_by_slug(&path.into_inner()).await {
        Ok(product) => ok_json(ProductDto::from(product)),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/products/detailed/{id}
pub async fn get_detailed<C, P, U, R>(
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
    if let Err(e) = ctx.require(PRODUCT_VIEW) {
        return domain_error_response(&e);
    }

    match state.products.get_detailed(path.into_inner()).await {
        Ok(detail) => ok_json(ProductDetailDto::from(detail)),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/products/with-categories
///
/// Paginated joined view, optionally scoped to a category subtree and
/// filtered by a search text.
pub async fn with_categories<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    query: web::Query<ProductListQuery>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(e) = ctx.require(PRODUCT_VIEW) {
        return domain_error_response(&e);
    }

    let pagination = Pagination::new(query.page.unwrap_or(1), query.page_size.unwrap_or(10));

    match state
        .products
        .list_with_categories(&pagination, query.category_id, query.search_text.as_deref())
        .await
    {
        Ok((products, meta)) => HttpResponse::Ok().json(PaginatedApiResponse::new(
            products.into_iter().map(ProductDetailDto::from).collect(),
            meta,
        )),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/products/category/{category_id}
pub async fn by_category<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.products.by_category(path.into_inner()).await {
        Ok(products) => ok_json(
            products
                .into_iter()
                .map(ProductDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/products/search?searchTerm=...&categoryId=1
pub async fn search<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    query: web::Query<ProductSearchQuery>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state
        .products
        .search(&query.search_term, query.category_id)
        .await
    {
        Ok(products) => ok_json(
            products
                .into_iter()
                .map(ProductDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/v1/products
pub async fn create<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    request: web::Json<ProductRequest>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(e) = ctx.require(PRODUCT_MANAGE) {
        return domain_error_response(&e);
    }
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    let input = match request.into_inner().into_input() {
        Ok(input) => input,
        Err(e) => return domain_error_response(&e),
    };

    match state.products.create(input, &ctx.username).await {
        Ok(product) => created_json(ProductDto::from(product)),
        Err(e) => domain_error_response(&e),
    }
}

/// PUT /api/v1/products/{id}
pub async fn update<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    path: web::Path<i64>,
    request: web::Json<ProductRequest>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(e) = ctx.require(PRODUCT_MANAGE) {
        return domain_error_response(&e);
    }
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    let input = match request.into_inner().into_input() {
        Ok(input) => input,
        Err(e) => return domain_error_response(&e),
    };

    match state
        .products
        .update(path.into_inner(), input, &ctx.username)
        .await
    {
        Ok(product) => ok_json(ProductDto::from(product)),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/v1/products/{id}
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
    if let Err(e) = ctx.require(PRODUCT_MANAGE) {
        return domain_error_response(&e);
    }

    match state.products.delete(path.into_inner(), &ctx.username).await {
        Ok(()) => ok_json(true),
        Err(e) => domain_error_response(&e),
    }
}
