use axum::response::{Html, Json};
use shared::models::{CartItem, CartItemStatus, DonationDetails, EnrichedCartItem};
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::cart::{self, AddToCartRequest, MessageResponse};
use crate::handlers::health::{self, HealthResponse};

pub const OPENAPI_JSON_PATH: &str = "/apidocs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shopping Cart API",
        description = "Reserve and claim items from the donations service"
    ),
    paths(
        cart::add_to_cart,
        cart::get_cart,
        cart::remove_from_cart,
        cart::claim_item,
        cart::cancel_item,
        health::health_check,
    ),
    components(schemas(
        AddToCartRequest,
        CartItem,
        CartItemStatus,
        DonationDetails,
        EnrichedCartItem,
        ErrorResponse,
        HealthResponse,
        MessageResponse,
    )),
    tags(
        (name = "Shopping Cart", description = "Cart items and claims"),
        (name = "Health", description = "Service status")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

const SWAGGER_UI_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Shopping Cart API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "{{SPEC_URL}}", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// Interactive Swagger UI backed by the generated OpenAPI document. The UI
/// assets are fetched from unpkg by the browser.
pub async fn swagger_ui() -> Html<String> {
    Html(SWAGGER_UI_PAGE.replace("{{SPEC_URL}}", OPENAPI_JSON_PATH))
}
