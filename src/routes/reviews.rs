use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use tower_sessions::Session;
use validator::Validate;

use crate::{
    AppState,
    error::Result,
    models::{FlashMessage, Page, ReviewForm, ReviewsPage, star_choices},
    queries::review_queries,
    routes::pages::render,
    utils::session,
};

pub async fn reviews_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Page<ReviewsPage>>> {
    let reviews = review_queries::list_all(&state.db).await?;

    let content = ReviewsPage {
        reviews,
        star_choices: star_choices(),
    };

    render(&state, &session, content).await
}

pub async fn submit_review(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ReviewForm>,
) -> Result<Redirect> {
    let form = form.trimmed();
    form.validate()?;

    let review = review_queries::create_review(&state.db, &form).await?;
    tracing::info!(review_id = review.id, stars = review.stars, "Review posted");

    session::flash(&session, FlashMessage::success("Thank you for your review!")).await?;

    Ok(Redirect::to("/reviews"))
}
