use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub is_available: bool,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Units that can still be put in a cart. Unavailable products sell nothing.
    pub fn sellable_stock(&self) -> i32 {
        if self.is_available { self.stock.max(0) } else { 0 }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,
    pub image_url: Option<String>,
}

impl ProductResponse {
    pub fn new(product: Product, media_url: &str) -> Self {
        let image_url = product
            .image
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(|key| format!("{}/{}", media_url, key.trim_start_matches('/')));

        Self { product, image_url }
    }

    pub fn from_list(products: Vec<Product>, media_url: &str) -> Vec<Self> {
        products
            .into_iter()
            .map(|p| Self::new(p, media_url))
            .collect()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    pub category_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub image: Option<String>,
    pub is_available: Option<bool>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    /// Missing keeps the current image, `null` clears it.
    #[serde(default, deserialize_with = "present_or_null")]
    pub image: Option<Option<String>>,
    pub is_available: Option<bool>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
}

fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Fits NUMERIC(10, 2) and is not negative.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let max = Decimal::new(99_999_999_99, 2);

    if price.is_sign_negative() || *price > max || price.scale() > 2 {
        return Err(ValidationError::new("price"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(image: Option<&str>) -> Product {
        Product {
            id: 1,
            category_id: 1,
            name: "Silver Ring".to_string(),
            description: String::new(),
            price: Decimal::new(1000, 2),
            image: image.map(str::to_string),
            is_available: true,
            stock: 2,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn image_url_joins_media_prefix_and_key() {
        let response = ProductResponse::new(product(Some("accessories/ring.jpg")), "/media");
        assert_eq!(
            response.image_url.as_deref(),
            Some("/media/accessories/ring.jpg")
        );
    }

    #[test]
    fn missing_image_has_no_url() {
        assert!(ProductResponse::new(product(None), "/media").image_url.is_none());
        assert!(ProductResponse::new(product(Some("")), "/media").image_url.is_none());
    }

    #[test]
    fn unavailable_products_have_no_sellable_stock() {
        let mut p = product(None);
        assert_eq!(p.sellable_stock(), 2);
        p.is_available = false;
        assert_eq!(p.sellable_stock(), 0);
    }

    #[test]
    fn update_distinguishes_missing_and_null_image() {
        let keep: UpdateProductRequest = serde_json::from_str(r#"{"stock": 3}"#).unwrap();
        assert_eq!(keep.image, None);

        let clear: UpdateProductRequest = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert_eq!(clear.image, Some(None));

        let set: UpdateProductRequest =
            serde_json::from_str(r#"{"image": "accessories/new.jpg"}"#).unwrap();
        assert_eq!(set.image, Some(Some("accessories/new.jpg".to_string())));
    }

    #[test]
    fn price_must_fit_the_column() {
        assert!(validate_price(&Decimal::new(1999, 2)).is_ok());
        assert!(validate_price(&Decimal::new(-1, 0)).is_err());
        assert!(validate_price(&Decimal::new(1005, 3)).is_err());
    }
}
