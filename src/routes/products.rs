use axum::{
    Json,
    extract::{Path, State},
};
use tower_sessions::Session;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{HomePage, Page, ProductPage, ProductResponse},
    queries::product_queries,
    routes::pages::render,
};

pub async fn home(State(state): State<AppState>, session: Session) -> Result<Json<Page<HomePage>>> {
    let products = product_queries::list_available(&state.db).await?;

    let content = HomePage {
        products: ProductResponse::from_list(products, &state.store.media_url),
    };

    render(&state, &session, content).await
}

pub async fn product_detail(
    State(state): State<AppState>,
    session: Session,
    Path(pk): Path<i32>,
) -> Result<Json<Page<ProductPage>>> {
    let product = product_queries::find_by_id(&state.db, pk)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", pk)))?;

    let content = ProductPage {
        product: ProductResponse::new(product, &state.store.media_url),
    };

    render(&state, &session, content).await
}
