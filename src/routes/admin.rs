use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use validator::Validate;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        Category, CreateCategoryRequest, CreateProductRequest, ProductResponse, ReviewQuery,
        ReviewSearchResponse, UpdateCategoryRequest, UpdateProductRequest,
    },
    queries::{admin_queries, category_queries},
};

//CATEGORY ROUTES
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = category_queries::get_all(&state.db).await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    payload.validate()?;

    if category_queries::find_by_slug(&state.db, &payload.slug)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Category with slug '{}' already exists",
            payload.slug
        )));
    }

    let category = category_queries::create_category(&state.db, &payload).await?;
    tracing::info!(category_id = category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    payload.validate()?;

    if let Some(ref slug) = payload.slug {
        if let Some(existing) = category_queries::find_by_slug(&state.db, slug).await? {
            if existing.id != id {
                return Err(AppError::Conflict(format!(
                    "Category with slug '{}' already exists",
                    slug
                )));
            }
        }
    }

    let category = category_queries::update_category(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if !category_queries::delete_category(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Category with id {} not found", id)));
    }

    tracing::info!(category_id = id, "Category deleted with its products");
    Ok(StatusCode::NO_CONTENT)
}

//PRODUCT ROUTES
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = admin_queries::list_products(&state.db).await?;
    Ok(Json(ProductResponse::from_list(products, &state.store.media_url)))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    payload.validate()?;

    if category_queries::find_by_id(&state.db, payload.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(format!(
            "Category with id {} does not exist",
            payload.category_id
        )));
    }

    let product = admin_queries::create_product(&state.db, &payload).await?;
    tracing::info!(product_id = product.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::new(product, &state.store.media_url)),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>> {
    payload.validate()?;

    if let Some(category_id) = payload.category_id {
        if category_queries::find_by_id(&state.db, category_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Category with id {} does not exist",
                category_id
            )));
        }
    }

    let product = admin_queries::update_product(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

    Ok(Json(ProductResponse::new(product, &state.store.media_url)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if admin_queries::delete_product(&state.db, id).await? == 0 {
        return Err(AppError::NotFound(format!("Product with id {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

//REVIEW ROUTES
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewQuery>,
) -> Result<Json<ReviewSearchResponse>> {
    let reviews = admin_queries::search_reviews(&state.db, params).await?;
    Ok(Json(reviews))
}
