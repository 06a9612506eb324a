use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CartLine, Product},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

/// Fetch every product referenced by a cart in one round trip
pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> Result<Vec<Product>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE id = ANY($1) ORDER BY id ASC",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Available products, newest first
pub async fn list_available(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE is_available = true ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn list_available_by_category(pool: &PgPool, category_id: i32) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products
         WHERE category_id = $1 AND is_available = true
         ORDER BY created_at DESC, id DESC",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Deducts the sold quantity of every line in one transaction.
/// Returns the id of the first product that could not cover its line; nothing is
/// deducted in that case.
pub async fn deduct_stock(pool: &PgPool, lines: &[CartLine]) -> Result<Option<i32>> {
    let mut tx = pool.begin().await?;

    for line in lines {
        let result = sqlx::query(
            "UPDATE products
             SET stock = stock - $1
             WHERE id = $2 AND is_available = true AND stock >= $1",
        )
        .bind(line.quantity)
        .bind(line.product.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(Some(line.product.id));
        }
    }

    tx.commit().await?;
    Ok(None)
}
