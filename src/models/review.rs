use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i32,
    pub name: String,
    pub text: String,
    pub stars: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1, max = 5))]
    pub stars: i32,
}

impl ReviewForm {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            text: self.text.trim().to_string(),
            stars: self.stars,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StarChoice {
    pub value: i32,
    pub label: String,
}

/// Star options offered by the review form, best first.
pub fn star_choices() -> Vec<StarChoice> {
    (1..=5)
        .rev()
        .map(|value| StarChoice {
            value,
            label: format!("{} Stars", value),
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewQuery {
    pub stars: Option<i32>,
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReviewSearchResponse {
    pub reviews: Vec<Review>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
