use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use tower_sessions::Session;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CartLineResponse, CartResponse, CartSummary, FlashMessage, Page, ProductResponse},
    queries::product_queries,
    routes::pages::render,
    utils::{order::share_url, session},
};

pub const NOT_ENOUGH_STOCK: &str = "Sorry, we don't have enough stock!";
pub const ADDED_TO_CART: &str = "Item added to cart!";

/// Prices the session cart against the current catalog.
pub async fn load_summary(state: &AppState, session: &Session) -> Result<CartSummary> {
    let cart = session::load_cart(session).await?;
    let products = product_queries::find_by_ids(&state.db, &cart.product_ids()).await?;

    Ok(CartSummary::build(&cart, products))
}

pub fn line_responses(summary: &CartSummary, media_url: &str) -> Vec<CartLineResponse> {
    summary
        .lines
        .iter()
        .map(|line| CartLineResponse {
            product: ProductResponse::new(line.product.clone(), media_url),
            quantity: line.quantity,
            subtotal: line.subtotal,
        })
        .collect()
}

pub async fn cart_view(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Page<CartResponse>>> {
    let summary = load_summary(&state, &session).await?;

    let content = CartResponse {
        items: line_responses(&summary, &state.store.media_url),
        total_price: summary.total,
        share_url: share_url(&state.store.whatsapp_number, &summary.share_message()),
    };

    render(&state, &session, content).await
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    Path(pk): Path<i32>,
) -> Result<Redirect> {
    let product = product_queries::find_by_id(&state.db, pk)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", pk)))?;

    let mut cart = session::load_cart(&session).await?;

    if !cart.add_one(product.id, product.sellable_stock()) {
        tracing::debug!(product_id = product.id, "Add to cart rejected for stock");
        session::flash(&session, FlashMessage::error(NOT_ENOUGH_STOCK)).await?;
        return Ok(Redirect::to(&format!("/product/{}", product.id)));
    }

    session::save_cart(&session, &cart).await?;
    session::flash(&session, FlashMessage::success(ADDED_TO_CART)).await?;

    Ok(Redirect::to("/cart"))
}

pub async fn remove_from_cart(session: Session, Path(pk): Path<i32>) -> Result<Redirect> {
    let mut cart = session::load_cart(&session).await?;

    if cart.quantity_of(pk) > 0 {
        cart.remove(pk);
        session::save_cart(&session, &cart).await?;
    }

    Ok(Redirect::to("/cart"))
}
