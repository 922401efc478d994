//! HTTP handlers for the Products API
//!
//! The public router serves listing and single-product reads. The
//! admin router carries the mutating operations and must be mounted
//! behind the authentication guard plus an admin role check.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    routing::post,
    Extension, Json, Router,
};
use axum_helpers::auth::Principal;
use axum_helpers::{UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, MessageResponse, Product, ProductFilter, ProductPage, SingleProductResponse,
    UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
    ),
    components(schemas(
        Product,
        CreateProduct,
        UpdateProduct,
        ProductFilter,
        ProductPage,
        SingleProductResponse,
        MessageResponse
    )),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the public products router (listing and reads)
pub fn public_router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products))
        .route("/product/{id}", get(get_product))
        .with_state(shared_service)
}

/// Create the admin products router (mutations)
///
/// The caller is responsible for layering authentication and the
/// admin-role gate around this router.
pub fn admin_router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/product/new", post(create_product))
        .route(
            "/product/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with search, filters and pagination
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "One page of matching products", body = ProductPage)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(filter).await?;
    Ok(Json(page))
}

/// Get a single product by ID
#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = SingleProductResponse),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<SingleProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(SingleProductResponse {
        success: true,
        product,
    }))
}

/// Create a new product (admin)
///
/// The owner is stamped from the authenticated principal.
#[utoipa::path(
    post,
    path = "/product/new",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = SingleProductResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    principal: Option<Extension<Principal>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let Extension(principal) = principal.ok_or(ProductError::NotAuthenticated)?;

    let product = service.create_product(input, principal.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(SingleProductResponse {
            success: true,
            product,
        }),
    ))
}

/// Update a product (admin)
#[utoipa::path(
    put,
    path = "/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = SingleProductResponse),
        (status = 404, description = "Product not found")
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<SingleProductResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(SingleProductResponse {
        success: true,
        product,
    }))
}

/// Delete a product (admin)
#[utoipa::path(
    delete,
    path = "/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found")
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Product is deleted".to_string(),
    }))
}
