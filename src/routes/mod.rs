mod admin;
mod cart;
mod categories;
mod checkout;
mod health;
mod pages;
mod products;
mod reviews;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::{AppState, middleware::admin_middleware};

pub fn create_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route(
            "/categories",
            get(admin::list_categories).post(admin::create_category),
        )
        .route(
            "/categories/{id}",
            patch(admin::update_category).delete(admin::delete_category),
        )
        .route(
            "/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/products/{id}",
            patch(admin::update_product).delete(admin::delete_product),
        )
        .route("/reviews", get(admin::list_reviews))
        .layer(middleware::from_fn_with_state(state, admin_middleware));

    Router::new()
        .route("/", get(products::home))
        .route("/product/{pk}", get(products::product_detail))
        .route("/category/{slug}", get(categories::category_list))
        .route("/cart", get(cart::cart_view))
        .route("/add-to-cart/{pk}", post(cart::add_to_cart))
        .route("/remove-from-cart/{pk}", post(cart::remove_from_cart))
        .route(
            "/checkout",
            get(checkout::checkout_form).post(checkout::place_order),
        )
        .route("/order-success", get(checkout::order_success))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route(
            "/reviews",
            get(reviews::reviews_page).post(reviews::submit_review),
        )
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/admin", admin_routes)
}
