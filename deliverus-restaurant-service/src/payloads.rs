use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::AsChangeset;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    NewRestaurant, Product, ProductCategory, PublicRestaurant, RestaurantCategory,
    RestaurantStatus,
};
use crate::schema::restaurants;

/// Body of `POST /restaurants`. The owner always comes from the bearer token,
/// so a `userId` sent here is dropped on deserialization.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantPayload {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub postal_code: String,
    pub url: Option<String>,
    #[schema(value_type = String)]
    pub shipping_costs: BigDecimal,
    pub average_service_minutes: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo: Option<String>,
    pub hero_image: Option<String>,
    #[serde(default)]
    pub status: RestaurantStatus,
    #[serde(default)]
    pub order_by_price: bool,
    pub restaurant_category_id: i32,
}

impl CreateRestaurantPayload {
    pub fn into_new_restaurant(self, owner_id: i32, now: DateTime<Utc>) -> NewRestaurant {
        NewRestaurant {
            name: self.name,
            description: self.description,
            address: self.address,
            postal_code: self.postal_code,
            url: self.url,
            shipping_costs: self.shipping_costs,
            average_service_minutes: self.average_service_minutes,
            email: self.email,
            phone: self.phone,
            logo: self.logo,
            hero_image: self.hero_image,
            status: self.status,
            order_by_price: self.order_by_price,
            restaurant_category_id: self.restaurant_category_id,
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `PUT /restaurants/{restaurantId}`. Absent fields are left untouched;
/// an explicit `null` clears a nullable column.
#[derive(Debug, Deserialize, AsChangeset, ToSchema)]
#[diesel(table_name = restaurants)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantPayload {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "serde_with::rust::double_option::deserialize")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "serde_with::rust::double_option::deserialize")]
    #[schema(value_type = Option<String>)]
    pub url: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    pub shipping_costs: Option<BigDecimal>,
    #[serde(default, deserialize_with = "serde_with::rust::double_option::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub average_service_minutes: Option<Option<f64>>,
    #[serde(default, deserialize_with = "serde_with::rust::double_option::deserialize")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "serde_with::rust::double_option::deserialize")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "serde_with::rust::double_option::deserialize")]
    #[schema(value_type = Option<String>)]
    pub logo: Option<Option<String>>,
    #[serde(default, deserialize_with = "serde_with::rust::double_option::deserialize")]
    #[schema(value_type = Option<String>)]
    pub hero_image: Option<Option<String>>,
    pub status: Option<RestaurantStatus>,
    pub order_by_price: Option<bool>,
    pub restaurant_category_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    #[serde(flatten)]
    pub restaurant: PublicRestaurant,
    pub restaurant_category: RestaurantCategory,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub product_category: ProductCategory,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: PublicRestaurant,
    pub restaurant_category: RestaurantCategory,
    pub products: Vec<ProductDetail>,
}

impl From<(PublicRestaurant, RestaurantCategory)> for RestaurantSummary {
    fn from((restaurant, restaurant_category): (PublicRestaurant, RestaurantCategory)) -> Self {
        Self {
            restaurant,
            restaurant_category,
        }
    }
}

impl From<(Product, ProductCategory)> for ProductDetail {
    fn from((product, product_category): (Product, ProductCategory)) -> Self {
        Self {
            product,
            product_category,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn public_restaurant() -> PublicRestaurant {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        PublicRestaurant {
            id: 3,
            name: "Casa Félix".to_string(),
            description: None,
            address: "Avda. Reina Mercedes s/n".to_string(),
            postal_code: "41012".to_string(),
            url: None,
            shipping_costs: BigDecimal::from_str("1.50").unwrap(),
            average_service_minutes: Some(20.0),
            email: None,
            phone: None,
            logo: None,
            hero_image: None,
            status: RestaurantStatus::Online,
            order_by_price: false,
            restaurant_category_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_payload_ignores_body_owner() {
        let payload: CreateRestaurantPayload = serde_json::from_value(json!({
            "name": "Casa Félix",
            "address": "Avda. Reina Mercedes s/n",
            "postalCode": "41012",
            "shippingCosts": "1.50",
            "restaurantCategoryId": 1,
            "userId": 99
        }))
        .unwrap();

        let now = Utc::now();
        let new_restaurant = payload.into_new_restaurant(7, now);

        assert_eq!(new_restaurant.user_id, 7);
        assert_eq!(new_restaurant.status, RestaurantStatus::Offline);
        assert!(!new_restaurant.order_by_price);
        assert_eq!(new_restaurant.created_at, now);
        assert_eq!(new_restaurant.updated_at, now);
    }

    #[test]
    fn test_update_payload_leaves_missing_fields_unset() {
        let payload: UpdateRestaurantPayload = serde_json::from_value(json!({
            "name": "Casa Félix 2",
            "orderByPrice": true,
            "userId": 99
        }))
        .unwrap();

        assert_eq!(payload.name.as_deref(), Some("Casa Félix 2"));
        assert_eq!(payload.order_by_price, Some(true));
        assert!(payload.address.is_none());
        assert!(payload.restaurant_category_id.is_none());
        assert!(payload.description.is_none());
    }

    #[test]
    fn test_update_payload_null_clears_column() {
        use diesel::debug_query;
        use diesel::pg::Pg;
        use diesel::prelude::*;

        let payload: UpdateRestaurantPayload = serde_json::from_value(json!({
            "description": null,
            "email": null
        }))
        .unwrap();

        assert_eq!(payload.description, Some(None));
        assert_eq!(payload.email, Some(None));
        assert!(payload.phone.is_none());

        let query = diesel::update(restaurants::table.filter(restaurants::id.eq(1))).set(&payload);
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(r#"SET "description" = $1, "email" = $2"#), "{sql}");
        assert!(sql.ends_with("binds: [None, None, 1]"), "{sql}");
    }

    #[test]
    fn test_summary_has_no_owner() {
        let summary = RestaurantSummary::from((
            public_restaurant(),
            RestaurantCategory {
                id: 1,
                name: "Spanish".to_string(),
            },
        ));
        let value = serde_json::to_value(&summary).unwrap();

        assert!(value.get("userId").is_none());
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["postalCode"], json!("41012"));
        assert_eq!(value["restaurantCategory"]["name"], json!("Spanish"));
    }

    #[test]
    fn test_detail_nests_products_with_category() {
        let detail = RestaurantDetail {
            restaurant: public_restaurant(),
            restaurant_category: RestaurantCategory {
                id: 1,
                name: "Spanish".to_string(),
            },
            products: vec![ProductDetail::from((
                Product {
                    id: 10,
                    name: "Gazpacho".to_string(),
                    description: None,
                    price: BigDecimal::from_str("4.00").unwrap(),
                    image: None,
                    order: 1,
                    availability: true,
                    restaurant_id: 3,
                    product_category_id: 2,
                },
                ProductCategory {
                    id: 2,
                    name: "Starters".to_string(),
                },
            ))],
        };
        let value = serde_json::to_value(&detail).unwrap();

        assert!(value.get("userId").is_none());
        assert_eq!(value["products"][0]["name"], json!("Gazpacho"));
        assert_eq!(value["products"][0]["order"], json!(1));
        assert_eq!(value["products"][0]["productCategory"]["name"], json!("Starters"));
    }
}
