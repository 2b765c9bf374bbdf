//! Product catalog routes (JSON API).
//!
//! The listing is what the storefront page script renders product cards
//! from; creation is for catalog management and requires a logged-in
//! session.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use kharido_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::product::{NewProduct, Product};
use crate::state::AppState;

/// A product as the JSON API exposes it.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub img: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price,
            img: product.img.clone(),
            category: product.category.clone(),
        }
    }
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Optional explicit id; generated when absent.
    pub id: Option<String>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Response body for a created product.
#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub message: String,
    pub product: ProductResponse,
}

/// List all products.
///
/// GET /products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = state.products().await?;
    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// Add a product to the catalog.
///
/// POST /products
///
/// Requires an authenticated session; the storefront has no separate admin
/// surface, so catalog management rides on ordinary accounts.
#[instrument(skip(state, _user, request), fields(name = %request.name))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreateProductResponse>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("product name is required".to_owned()));
    }
    if request.price < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "product price cannot be negative".to_owned(),
        ));
    }

    let new_product = NewProduct {
        id: request.id.map_or_else(ProductId::generate, |id| ProductId::new(id)),
        name: request.name,
        price: request.price,
        img: request.img,
        category: request.category,
    };

    let product = ProductRepository::new(state.pool())
        .insert(&new_product)
        .await?;
    state.invalidate_products().await;

    tracing::info!(id = %product.id, "product added");

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            message: "Product added".to_owned(),
            product: ProductResponse::from(&product),
        }),
    ))
}
