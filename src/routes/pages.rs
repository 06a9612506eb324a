use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;

use crate::{
    AppState,
    error::Result,
    models::{Page, StorePage},
    queries::category_queries,
    utils::session,
};

/// Wraps page content with the category menu and any pending flash messages.
pub async fn render<T: Serialize>(
    state: &AppState,
    session: &Session,
    content: T,
) -> Result<Json<Page<T>>> {
    let menu_categories = category_queries::get_all(&state.db).await?;
    let messages = session::take_flashes(session).await?;

    Ok(Json(Page {
        messages,
        menu_categories,
        content,
    }))
}

fn store_page(state: &AppState, title: &str) -> StorePage {
    StorePage {
        title: title.to_string(),
        store_name: state.store.name.clone(),
        phone: state.store.phone.clone(),
        email: state.store.email.clone(),
        whatsapp_number: state.store.whatsapp_number.clone(),
    }
}

pub async fn about(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Page<StorePage>>> {
    render(&state, &session, store_page(&state, "About")).await
}

pub async fn contact(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Page<StorePage>>> {
    render(&state, &session, store_page(&state, "Contact")).await
}
