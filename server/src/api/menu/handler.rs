//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::{CurrentUser, ensure_admin};
use crate::core::ServerState;
use crate::db::models::{MenuFilter, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_URL_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::MenuCategory;
use shared::response::{ApiResponse, ListResponse};

/// Query filters for GET /menu
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub available: Option<bool>,
    pub popular: Option<bool>,
}

impl MenuQuery {
    fn into_filter(self) -> AppResult<MenuFilter> {
        let category = match self.category {
            Some(raw) => Some(MenuCategory::parse(&raw).ok_or_else(|| {
                AppError::Validation(format!("unknown category '{raw}'"))
            })?),
            None => None,
        };
        Ok(MenuFilter {
            category,
            available: self.available,
            popular: self.popular,
        })
    }
}

/// Field checks shared by create and import
fn validate_create(payload: &MenuItemCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if payload.description.len() > MAX_DESCRIPTION_LEN {
        return Err(AppError::Validation("description is too long".to_string()));
    }
    if let Some(ref image) = payload.image
        && image.len() > MAX_URL_LEN
    {
        return Err(AppError::Validation("image reference is too long".to_string()));
    }
    if payload.price < 0 {
        return Err(AppError::Validation("price must be >= 0".to_string()));
    }
    match (payload.has_half_option, payload.half_price) {
        (false, Some(_)) => {
            return Err(AppError::Validation(
                "half_price requires has_half_option".to_string(),
            ));
        }
        (true, Some(half)) if half < 0 => {
            return Err(AppError::Validation("half_price must be >= 0".to_string()));
        }
        _ => {}
    }
    Ok(())
}

/// GET /menu - public catalog listing with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ListResponse<MenuItem>>> {
    let filter = query.into_filter()?;
    let repo = MenuItemRepository::new(state.get_db());
    let items = repo.find(&filter).await?;
    Ok(Json(ListResponse::new(items)))
}

/// POST /menu - create menu item (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<MenuItem>>)> {
    ensure_admin(&state, &user).await?;
    validate_create(&payload)?;

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(payload).await?;

    tracing::info!(name = %item.name, "Menu item created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(item))))
}

/// PUT /menu/{id} - update menu item (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    ensure_admin(&state, &user).await?;

    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price
        && price < 0
    {
        return Err(AppError::Validation("price must be >= 0".to_string()));
    }
    if let Some(Some(half)) = payload.half_price
        && half < 0
    {
        return Err(AppError::Validation("half_price must be >= 0".to_string()));
    }

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.update(&full_id(&id), payload).await?;

    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /menu/{id} - delete menu item (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    ensure_admin(&state, &user).await?;

    let repo = MenuItemRepository::new(state.get_db());
    repo.delete(&full_id(&id)).await?;

    Ok(Json(ApiResponse::ok(true)))
}

/// POST /menu/import - bulk catalog ingestion (admin)
///
/// The seed path: menu data arrives as records through this endpoint
/// instead of living in the codebase as constants.
pub async fn import(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(records): Json<Vec<MenuItemCreate>>,
) -> AppResult<(StatusCode, Json<ListResponse<MenuItem>>)> {
    ensure_admin(&state, &user).await?;

    for record in &records {
        validate_create(record)?;
    }

    let repo = MenuItemRepository::new(state.get_db());
    let created = repo.import(records).await?;

    tracing::info!(count = created.len(), "Menu items imported");
    Ok((StatusCode::CREATED, Json(ListResponse::new(created))))
}

/// Accept path ids with or without the table prefix
fn full_id(id: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("menu_item:{id}")
    }
}
