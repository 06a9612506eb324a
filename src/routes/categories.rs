use axum::{
    Json,
    extract::{Path, State},
};
use tower_sessions::Session;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CategoryPage, Page, ProductResponse},
    queries::{category_queries, product_queries},
    routes::pages::render,
};

pub async fn category_list(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Json<Page<CategoryPage>>> {
    let category = category_queries::find_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

    let products = product_queries::list_available_by_category(&state.db, category.id).await?;

    let content = CategoryPage {
        category,
        products: ProductResponse::from_list(products, &state.store.media_url),
    };

    render(&state, &session, content).await
}
