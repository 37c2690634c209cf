pub mod restaurant;

pub use restaurant::router as restaurant_router;

use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use diesel_async::AsyncPgConnection;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::TokenVerifier;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub database_url: Arc<str>,
    pub token_verifier: TokenVerifier,
}

impl AppState {
    pub fn new(database_url: &str, secret_key: &str) -> Self {
        Self {
            database_url: Arc::from(database_url),
            token_verifier: TokenVerifier::new(secret_key),
        }
    }

    async fn connect(&self) -> Result<AsyncPgConnection, ApiError> {
        Ok(crate::establish_connection(&self.database_url).await?)
    }
}

impl FromRef<AppState> for TokenVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.token_verifier.clone()
    }
}

/// Every route of the service, including health and API docs.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(restaurant_router())
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::index,
        restaurant::index_owner,
        restaurant::create,
        restaurant::show,
        restaurant::update,
        restaurant::destroy,
        restaurant::ordering_by,
    ),
    components(
        schemas(
            crate::models::Restaurant,
            crate::models::PublicRestaurant,
            crate::models::RestaurantCategory,
            crate::models::RestaurantStatus,
            crate::models::Product,
            crate::models::ProductCategory,
            crate::payloads::CreateRestaurantPayload,
            crate::payloads::UpdateRestaurantPayload,
            crate::payloads::RestaurantSummary,
            crate::payloads::RestaurantDetail,
            crate::payloads::ProductDetail,
            crate::payloads::ApiErrorResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "restaurants", description = "Restaurant management endpoints")
    ),
    info(
        title = "DeliverUS Restaurant Service",
        description = "Restaurant endpoints of the DeliverUS backend",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` JWT scheme required by the owner routes: create,
/// my restaurants, update, destroy and orderingBy.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            use utoipa::openapi::security::*;
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
