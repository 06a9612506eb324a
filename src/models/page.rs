use serde::{Deserialize, Serialize};

use crate::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}

/// A rendered page: pending flash messages, the category menu, then the page body.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub messages: Vec<FlashMessage>,
    pub menu_categories: Vec<Category>,
    #[serde(flatten)]
    pub content: T,
}

#[derive(Debug, Serialize)]
pub struct StorePage {
    pub title: String,
    pub store_name: String,
    pub phone: String,
    pub email: String,
    pub whatsapp_number: String,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub products: Vec<crate::models::ProductResponse>,
}

#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub product: crate::models::ProductResponse,
}

#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub products: Vec<crate::models::ProductResponse>,
}

#[derive(Debug, Serialize)]
pub struct ReviewsPage {
    pub reviews: Vec<crate::models::Review>,
    pub star_choices: Vec<crate::models::StarChoice>,
}
