use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use validator::Validate;

use crate::{
    AppState,
    error::Result,
    models::{
        CartSummary, CheckoutResponse, DeliveryRegion, FlashMessage, OrderSuccessResponse,
        ShippingForm, region_options,
    },
    queries::product_queries,
    routes::{
        cart::{line_responses, load_summary},
        pages::render,
    },
    services::order_service::{self, OrderOutcome},
    utils::session,
};

const MISSING_DETAILS: &str = "Please fill in all delivery details.";
const INVALID_REGION: &str = "Please choose a valid delivery region.";

fn shortage_message(name: &str, left: i32) -> String {
    format!(
        "Sorry, only {} left of '{}'. Please update your cart.",
        left, name
    )
}

/// Redirect target when the cart cannot be checked out as-is.
async fn check_cart(session: &Session, summary: &CartSummary) -> Result<Option<Redirect>> {
    if summary.is_empty() {
        return Ok(Some(Redirect::to("/")));
    }

    if let Some(line) = summary.find_shortage() {
        let message = shortage_message(&line.product.name, line.product.sellable_stock());
        session::flash(session, FlashMessage::error(message)).await?;
        return Ok(Some(Redirect::to("/cart")));
    }

    Ok(None)
}

pub async fn checkout_form(State(state): State<AppState>, session: Session) -> Result<Response> {
    let summary = load_summary(&state, &session).await?;

    if let Some(redirect) = check_cart(&session, &summary).await? {
        return Ok(redirect.into_response());
    }

    let content = CheckoutResponse {
        items: line_responses(&summary, &state.store.media_url),
        total_price: summary.total,
        regions: region_options(),
    };

    Ok(render(&state, &session, content).await?.into_response())
}

pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ShippingForm>,
) -> Result<Redirect> {
    let summary = load_summary(&state, &session).await?;

    if let Some(redirect) = check_cart(&session, &summary).await? {
        return Ok(redirect);
    }

    let form = form.trimmed();
    if form.validate().is_err() {
        session::flash(&session, FlashMessage::error(MISSING_DETAILS)).await?;
        return Ok(Redirect::to("/checkout"));
    }

    let region = match form.region.parse::<DeliveryRegion>() {
        Ok(region) => region,
        Err(e) => {
            tracing::debug!("Checkout rejected: {}", e);
            session::flash(&session, FlashMessage::error(INVALID_REGION)).await?;
            return Ok(Redirect::to("/checkout"));
        }
    };

    let placed = match order_service::place_order(&state, &summary, &form, region).await? {
        OrderOutcome::Placed(placed) => placed,
        OrderOutcome::OutOfStock { product_id } => {
            let (name, left) = match product_queries::find_by_id(&state.db, product_id).await? {
                Some(product) => {
                    let left = product.sellable_stock();
                    (product.name, left)
                }
                None => ("this item".to_string(), 0),
            };

            session::flash(&session, FlashMessage::error(shortage_message(&name, left))).await?;
            return Ok(Redirect::to("/cart"));
        }
    };

    let mut cart = session::load_cart(&session).await?;
    cart.clear();
    session::save_cart(&session, &cart).await?;
    session::store_placed_order(&session, &placed).await?;

    Ok(Redirect::to("/order-success"))
}

/// Shows the last placed order once; later visits go home.
pub async fn order_success(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some(placed) = session::take_placed_order(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let content = OrderSuccessResponse {
        invoice: placed.invoice,
        notification_sent: placed.notification_sent,
    };

    Ok(render(&state, &session, content).await?.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortage_message_names_product_and_count() {
        assert_eq!(
            shortage_message("Gold Hoops", 1),
            "Sorry, only 1 left of 'Gold Hoops'. Please update your cart."
        );
    }
}
