use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{
        CreateProductRequest, Product, Review, ReviewQuery, ReviewSearchResponse,
        UpdateProductRequest,
    },
};

/// Every product, including unavailable ones
pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>> {
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC, id DESC")
            .fetch_all(pool)
            .await?;

    Ok(products)
}

pub async fn create_product(pool: &PgPool, req: &CreateProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            category_id, name, description, price, image, is_available, stock
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(req.category_id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(&req.image)
    .bind(req.is_available.unwrap_or(true))
    .bind(req.stock.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn update_product(
    pool: &PgPool,
    id: i32,
    req: &UpdateProductRequest,
) -> Result<Option<Product>> {
    // image: absent keeps the current key, an explicit null clears it
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            category_id = COALESCE($1, category_id),
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            price = COALESCE($4, price),
            image = CASE WHEN $5 THEN $6 ELSE image END,
            is_available = COALESCE($7, is_available),
            stock = COALESCE($8, stock)
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(req.category_id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(req.image.is_some())
    .bind(req.image.clone().flatten())
    .bind(req.is_available)
    .bind(req.stock)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// `%` and `_` in user input match literally; pair with `ESCAPE '\'`.
fn like_pattern(q: &str) -> String {
    let mut escaped = String::with_capacity(q.len() + 2);
    escaped.push('%');
    for c in q.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_review_filters(query_builder: &mut QueryBuilder<'_, Postgres>, params: &ReviewQuery) {
    if let Some(stars) = params.stars {
        query_builder.push(" AND stars = ");
        query_builder.push_bind(stars);
    }

    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = like_pattern(q);
        query_builder.push(" AND (name ILIKE ");
        query_builder.push_bind(pattern.clone());
        query_builder.push(" ESCAPE '\\' OR text ILIKE ");
        query_builder.push_bind(pattern);
        query_builder.push(" ESCAPE '\\')");
    }
}

pub async fn search_reviews(pool: &PgPool, params: ReviewQuery) -> Result<ReviewSearchResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut count_builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM reviews WHERE 1=1");
    push_review_filters(&mut count_builder, &params);

    let total = count_builder
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await?;

    let mut query_builder = QueryBuilder::<Postgres>::new("SELECT * FROM reviews WHERE 1=1");
    push_review_filters(&mut query_builder, &params);

    query_builder.push(" ORDER BY created_at DESC, id DESC");
    query_builder.push(" LIMIT ");
    query_builder.push_bind(limit);
    query_builder.push(" OFFSET ");
    query_builder.push_bind(offset);

    let reviews = query_builder
        .build_query_as::<Review>()
        .fetch_all(pool)
        .await?;

    Ok(ReviewSearchResponse {
        reviews,
        total,
        limit,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
        assert_eq!(like_pattern("ring"), "%ring%");
    }
}
