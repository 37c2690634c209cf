use std::io::Write;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::{Pg, PgValue},
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::{product_categories, products, restaurant_categories, restaurants};

#[derive(
    FromSqlRow, AsExpression, Serialize, Deserialize, ToSchema, PartialEq, Eq, Copy, Clone, Debug,
    Default,
)]
#[diesel(sql_type = crate::schema::sql_types::RestaurantStatus)]
#[serde(rename_all = "lowercase")]
pub enum RestaurantStatus {
    Online,
    #[default]
    Offline,
    Closed,
    #[serde(rename = "temporarily closed")]
    TemporarilyClosed,
}

impl ToSql<crate::schema::sql_types::RestaurantStatus, Pg> for RestaurantStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            RestaurantStatus::Online => out.write_all(b"online")?,
            RestaurantStatus::Offline => out.write_all(b"offline")?,
            RestaurantStatus::Closed => out.write_all(b"closed")?,
            RestaurantStatus::TemporarilyClosed => out.write_all(b"temporarily closed")?,
        }
        Ok(IsNull::No)
    }
}

impl FromSql<crate::schema::sql_types::RestaurantStatus, Pg> for RestaurantStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"online" => Ok(RestaurantStatus::Online),
            b"offline" => Ok(RestaurantStatus::Offline),
            b"closed" => Ok(RestaurantStatus::Closed),
            b"temporarily closed" => Ok(RestaurantStatus::TemporarilyClosed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Serialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurant_categories)]
pub struct RestaurantCategory {
    pub id: i32,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = product_categories)]
pub struct ProductCategory {
    pub id: i32,
    pub name: String,
}

/// Full restaurant row, owner included. Only returned to the owner.
#[derive(Queryable, Selectable, Identifiable, Serialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i32,
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
    pub status: RestaurantStatus,
    pub order_by_price: bool,
    pub restaurant_category_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Restaurant row as seen by anyone. `user_id` is never selected.
#[derive(Queryable, Selectable, Identifiable, Serialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[serde(rename_all = "camelCase")]
pub struct PublicRestaurant {
    pub id: i32,
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
    pub status: RestaurantStatus,
    pub order_by_price: bool,
    pub restaurant_category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub postal_code: String,
    pub url: Option<String>,
    pub shipping_costs: BigDecimal,
    pub average_service_minutes: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo: Option<String>,
    pub hero_image: Option<String>,
    pub status: RestaurantStatus,
    pub order_by_price: bool,
    pub restaurant_category_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Queryable, Selectable, Identifiable, Associations, Serialize, ToSchema, Debug, Clone, PartialEq,
)]
#[diesel(belongs_to(PublicRestaurant, foreign_key = restaurant_id))]
#[diesel(table_name = products)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    pub image: Option<String>,
    pub order: i32,
    pub availability: bool,
    pub restaurant_id: i32,
    pub product_category_id: i32,
}

/// Sort applied to a restaurant's products, picked by `order_by_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrdering {
    Order,
    Price,
}

impl ProductOrdering {
    pub fn for_restaurant(order_by_price: bool) -> Self {
        if order_by_price {
            ProductOrdering::Price
        } else {
            ProductOrdering::Order
        }
    }
}
