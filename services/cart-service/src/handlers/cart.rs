use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use shared::models::{CartItem, EnrichedCartItem};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{CartError, ErrorResponse};
use crate::AppState;

/// Body of `POST /cart`. `user_email` and `donation_id` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[schema(example = "user@example.com")]
    pub user_email: Option<String>,
    #[schema(example = "64a89f1234abcdef5678abcd")]
    pub donation_id: Option<String>,
    #[schema(example = "I can pick it up on weekends")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Item removed from cart")]
    pub message: String,
}

fn required(value: Option<String>) -> Result<String, CartError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CartError::MissingFields),
    }
}

/// Add a donation item to the shopping cart
#[utoipa::path(
    post,
    path = "/cart",
    tag = "Shopping Cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Item added to cart successfully", body = CartItem),
        (status = 400, description = "Missing required fields or item already in cart", body = ErrorResponse),
        (status = 404, description = "Donation not found or not available", body = ErrorResponse),
        (status = 502, description = "Donations service unreachable", body = ErrorResponse)
    )
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CartItem>), CartError> {
    let Json(request) = payload.map_err(|e| {
        debug!("Rejected add-to-cart body: {}", e);
        CartError::MissingFields
    })?;

    let user_email = required(request.user_email)?;
    let donation_id = required(request.donation_id)?;
    let notes = request.notes.unwrap_or_default();

    let item = state.cart.add_item(user_email, donation_id, notes).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get all items in a user's shopping cart
#[utoipa::path(
    get,
    path = "/cart/{user_email}",
    tag = "Shopping Cart",
    params(("user_email" = String, Path, description = "Email of the cart owner")),
    responses(
        (status = 200, description = "List of cart items", body = [EnrichedCartItem])
    )
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_email): Path<String>,
) -> Result<Json<Vec<EnrichedCartItem>>, CartError> {
    let items = state.cart.list_items(&user_email).await?;
    Ok(Json(items))
}

/// Remove an item from the shopping cart
#[utoipa::path(
    delete,
    path = "/cart/{cart_item_id}",
    tag = "Shopping Cart",
    params(("cart_item_id" = String, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Item removed successfully", body = MessageResponse),
        (status = 400, description = "Invalid cart item ID", body = ErrorResponse),
        (status = 404, description = "Item not found in cart", body = ErrorResponse)
    )
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(cart_item_id): Path<String>,
) -> Result<Json<MessageResponse>, CartError> {
    state.cart.remove_item(&cart_item_id).await?;
    Ok(Json(MessageResponse {
        message: "Item removed from cart".to_string(),
    }))
}

/// Claim a donation item (finalize the request)
#[utoipa::path(
    post,
    path = "/cart/{cart_item_id}/claim",
    tag = "Shopping Cart",
    params(("cart_item_id" = String, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Item claimed successfully", body = CartItem),
        (status = 400, description = "Item already claimed or donation no longer available", body = ErrorResponse),
        (status = 404, description = "Item not found in cart", body = ErrorResponse),
        (status = 502, description = "Donations service unreachable", body = ErrorResponse)
    )
)]
pub async fn claim_item(
    State(state): State<AppState>,
    Path(cart_item_id): Path<String>,
) -> Result<Json<CartItem>, CartError> {
    let item = state.cart.claim_item(&cart_item_id).await?;
    Ok(Json(item))
}

/// Cancel a pending cart item
#[utoipa::path(
    post,
    path = "/cart/{cart_item_id}/cancel",
    tag = "Shopping Cart",
    params(("cart_item_id" = String, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Item cancelled", body = CartItem),
        (status = 400, description = "Item already processed", body = ErrorResponse),
        (status = 404, description = "Item not found in cart", body = ErrorResponse)
    )
)]
pub async fn cancel_item(
    State(state): State<AppState>,
    Path(cart_item_id): Path<String>,
) -> Result<Json<CartItem>, CartError> {
    let item = state.cart.cancel_item(&cart_item_id).await?;
    Ok(Json(item))
}
