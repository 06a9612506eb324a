use tower_sessions::Session;

use crate::{
    error::Result,
    models::{Cart, FlashMessage, PlacedOrder},
};

const CART_KEY: &str = "cart";
const MESSAGES_KEY: &str = "_messages";
const INVOICE_KEY: &str = "invoice_data";

pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(CART_KEY).await?.unwrap_or_default())
}

pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(CART_KEY, cart).await?;
    Ok(())
}

pub async fn flash(session: &Session, message: FlashMessage) -> Result<()> {
    let mut messages = session
        .get::<Vec<FlashMessage>>(MESSAGES_KEY)
        .await?
        .unwrap_or_default();

    messages.push(message);
    session.insert(MESSAGES_KEY, messages).await?;
    Ok(())
}

/// Pending flash messages, removed from the session once read.
pub async fn take_flashes(session: &Session) -> Result<Vec<FlashMessage>> {
    Ok(session
        .remove::<Vec<FlashMessage>>(MESSAGES_KEY)
        .await?
        .unwrap_or_default())
}

pub async fn store_placed_order(session: &Session, order: &PlacedOrder) -> Result<()> {
    session.insert(INVOICE_KEY, order).await?;
    Ok(())
}

pub async fn take_placed_order(session: &Session) -> Result<Option<PlacedOrder>> {
    Ok(session.remove::<PlacedOrder>(INVOICE_KEY).await?)
}
