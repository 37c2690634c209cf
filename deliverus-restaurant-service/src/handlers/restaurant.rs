use axum::{
    extract::State,
    response::Json,
    routing::{get, patch},
    Router,
};
use chrono::Utc;
use diesel::{dsl::not, pg::Pg, prelude::*};
use diesel_async::RunQueryDsl;
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{JsonPayload, PathParam};
use crate::models::{
    Product, ProductCategory, ProductOrdering, PublicRestaurant, Restaurant, RestaurantCategory,
};
use crate::payloads::*;
use crate::schema::{product_categories, products, restaurant_categories, restaurants};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(index).post(create))
        .route("/users/myrestaurants", get(index_owner))
        .route(
            "/restaurants/{restaurant_id}",
            get(show).put(update).delete(destroy),
        )
        .route("/restaurants/{restaurant_id}/orderingBy", patch(ordering_by))
}

pub fn deletion_message(restaurant_id: i32, deleted: usize) -> String {
    if deleted == 1 {
        format!("Successfully deleted restaurant id.{restaurant_id}")
    } else {
        "Could not delete restaurant.".to_string()
    }
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "Restaurants sorted by category name", body = [RestaurantSummary]),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let mut conn = state.connect().await?;

    let results = restaurants::table
        .inner_join(restaurant_categories::table)
        .order_by(restaurant_categories::name.asc())
        .select((PublicRestaurant::as_select(), RestaurantCategory::as_select()))
        .load::<(PublicRestaurant, RestaurantCategory)>(&mut conn)
        .await?;

    Ok(Json(results.into_iter().map(RestaurantSummary::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/myrestaurants",
    responses(
        (status = 200, description = "Restaurants owned by the caller", body = [RestaurantSummary]),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = []),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn index_owner(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let mut conn = state.connect().await?;

    let results = restaurants::table
        .inner_join(restaurant_categories::table)
        .filter(restaurants::user_id.eq(user.id))
        .select((PublicRestaurant::as_select(), RestaurantCategory::as_select()))
        .load::<(PublicRestaurant, RestaurantCategory)>(&mut conn)
        .await?;

    Ok(Json(results.into_iter().map(RestaurantSummary::from).collect()))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = CreateRestaurantPayload,
    responses(
        (status = 200, description = "Restaurant created successfully", body = Restaurant),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Database error or invalid request", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = []),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonPayload(payload): JsonPayload<CreateRestaurantPayload>,
) -> Result<Json<Restaurant>, ApiError> {
    let new_restaurant = payload.into_new_restaurant(user.id, Utc::now());

    let mut conn = state.connect().await?;
    let restaurant = diesel::insert_into(restaurants::table)
        .values(&new_restaurant)
        .returning(Restaurant::as_returning())
        .get_result(&mut conn)
        .await?;

    Ok(Json(restaurant))
}

#[utoipa::path(
    get,
    path = "/restaurants/{restaurant_id}",
    responses(
        (status = 200, description = "Restaurant with its products", body = RestaurantDetail),
        (status = 500, description = "Database error or invalid request", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    PathParam(restaurant_id): PathParam<i32>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let mut conn = state.connect().await?;

    let (restaurant, restaurant_category) = restaurants::table
        .inner_join(restaurant_categories::table)
        .filter(restaurants::id.eq(restaurant_id))
        .select((PublicRestaurant::as_select(), RestaurantCategory::as_select()))
        .first::<(PublicRestaurant, RestaurantCategory)>(&mut conn)
        .await?;

    let query = Product::belonging_to(&restaurant)
        .inner_join(product_categories::table)
        .select((Product::as_select(), ProductCategory::as_select()))
        .into_boxed::<Pg>();
    let query = match ProductOrdering::for_restaurant(restaurant.order_by_price) {
        ProductOrdering::Price => query.order_by((products::price.asc(), products::id.asc())),
        ProductOrdering::Order => query.order_by((products::order.asc(), products::id.asc())),
    };
    let products = query
        .load::<(Product, ProductCategory)>(&mut conn)
        .await?;

    Ok(Json(RestaurantDetail {
        restaurant,
        restaurant_category,
        products: products.into_iter().map(ProductDetail::from).collect(),
    }))
}

#[utoipa::path(
    put,
    path = "/restaurants/{restaurant_id}",
    request_body = UpdateRestaurantPayload,
    responses(
        (status = 200, description = "Updated restaurant, or null if the caller owns no such restaurant", body = Restaurant),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Database error or invalid request", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID")
    ),
    security(
        ("bearer" = []),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(restaurant_id): PathParam<i32>,
    JsonPayload(payload): JsonPayload<UpdateRestaurantPayload>,
) -> Result<Json<Option<Restaurant>>, ApiError> {
    let mut conn = state.connect().await?;

    let restaurant = diesel::update(
        restaurants::table
            .filter(restaurants::id.eq(restaurant_id))
            .filter(restaurants::user_id.eq(user.id)),
    )
    .set((&payload, restaurants::updated_at.eq(Utc::now())))
    .returning(Restaurant::as_returning())
    .get_result(&mut conn)
    .await
    .optional()?;

    Ok(Json(restaurant))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{restaurant_id}",
    responses(
        (status = 200, description = "Outcome message", body = String),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Database error or invalid request", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID")
    ),
    security(
        ("bearer" = []),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(restaurant_id): PathParam<i32>,
) -> Result<Json<String>, ApiError> {
    let mut conn = state.connect().await?;

    let deleted = diesel::delete(
        restaurants::table
            .filter(restaurants::id.eq(restaurant_id))
            .filter(restaurants::user_id.eq(user.id)),
    )
    .execute(&mut conn)
    .await?;

    Ok(Json(deletion_message(restaurant_id, deleted)))
}

#[utoipa::path(
    patch,
    path = "/restaurants/{restaurant_id}/orderingBy",
    responses(
        (status = 200, description = "Restaurant with `orderByPrice` flipped", body = Restaurant),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Database error or invalid request", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID")
    ),
    security(
        ("bearer" = []),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn ordering_by(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(restaurant_id): PathParam<i32>,
) -> Result<Json<Restaurant>, ApiError> {
    let mut conn = state.connect().await?;

    let restaurant = diesel::update(
        restaurants::table
            .filter(restaurants::id.eq(restaurant_id))
            .filter(restaurants::user_id.eq(user.id)),
    )
    .set((
        restaurants::order_by_price.eq(not(restaurants::order_by_price)),
        restaurants::updated_at.eq(Utc::now()),
    ))
    .returning(Restaurant::as_returning())
    .get_result(&mut conn)
    .await?;

    Ok(Json(restaurant))
}
