use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Category, CreateCategoryRequest, UpdateCategoryRequest},
};

/// Find category by ID
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Find category by slug
pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Get all categories, ordered by name
pub async fn get_all(pool: &PgPool) -> Result<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC, id ASC")
            .fetch_all(pool)
            .await?;

    Ok(categories)
}

pub async fn create_category(pool: &PgPool, req: &CreateCategoryRequest) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.slug)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

pub async fn update_category(
    pool: &PgPool,
    id: i32,
    req: &UpdateCategoryRequest,
) -> Result<Option<Category>> {
    let mut query_builder = sqlx::QueryBuilder::<sqlx::Postgres>::new("UPDATE categories SET ");
    let mut separated = query_builder.separated(", ");
    let mut has_fields = false;

    if let Some(ref name) = req.name {
        separated.push("name = ");
        separated.push_bind_unseparated(name);
        has_fields = true;
    }

    if let Some(ref slug) = req.slug {
        separated.push("slug = ");
        separated.push_bind_unseparated(slug);
        has_fields = true;
    }

    if !has_fields {
        return find_by_id(pool, id).await;
    }

    query_builder.push(" WHERE id = ");
    query_builder.push_bind(id);
    query_builder.push(" RETURNING *");

    let category = query_builder
        .build_query_as::<Category>()
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Delete a category along with its products
pub async fn delete_category(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
