use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Review, ReviewForm},
};

/// All reviews, newest first
pub async fn list_all(pool: &PgPool) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

pub async fn create_review(pool: &PgPool, form: &ReviewForm) -> Result<Review> {
    let review = sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (name, text, stars) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&form.name)
    .bind(&form.text)
    .bind(form.stars)
    .fetch_one(pool)
    .await?;

    Ok(review)
}
