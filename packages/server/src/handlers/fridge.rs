use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{fridge, ingredient};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::fridge::{AddToFridgeRequest, FridgeItemResponse, validate_add_to_fridge};
use crate::state::AppState;
use crate::utils::catalog;

#[utoipa::path(
    post,
    path = "/",
    tag = "Fridge",
    operation_id = "addToFridge",
    summary = "Add an ingredient to the caller's fridge",
    description = "Resolves the ingredient by name (creating it in the catalog if \
        unknown) and records ownership. Idempotent: adding an ingredient already in \
        the fridge returns 200 with the existing entry.",
    request_body = AddToFridgeRequest,
    responses(
        (status = 201, description = "Ingredient added", body = FridgeItemResponse),
        (status = 200, description = "Ingredient was already in the fridge", body = FridgeItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, ingredient = %payload.ingredient))]
pub async fn add_to_fridge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddToFridgeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_add_to_fridge(&payload)?;

    let txn = state.db.begin().await?;
    let resolved = catalog::resolve_ingredient(&txn, &payload.ingredient).await?;

    if let Some(existing) = fridge::Entity::find_by_id((auth_user.user_id, resolved.id))
        .one(&txn)
        .await?
    {
        txn.commit().await?;
        return Ok((
            StatusCode::OK,
            Json(fridge_item_response(existing, resolved.name)),
        ));
    }

    let new_item = fridge::ActiveModel {
        user_id: Set(auth_user.user_id),
        ingredient_id: Set(resolved.id),
        created_at: Set(chrono::Utc::now()),
    };

    let model = match new_item.insert(&txn).await {
        Ok(model) => model,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            // Concurrent add of the same ingredient; the row exists now.
            fridge::Entity::find_by_id((auth_user.user_id, resolved.id))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    AppError::Internal("Fridge row vanished after conflicting insert".into())
                })?
        }
        Err(e) => return Err(e.into()),
    };

    txn.commit().await?;
    Ok((
        StatusCode::CREATED,
        Json(fridge_item_response(model, resolved.name)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Fridge",
    operation_id = "listFridge",
    summary = "List the caller's fridge",
    description = "Returns the caller's owned ingredients in the order they were added.",
    responses(
        (status = 200, description = "Fridge contents", body = Vec<FridgeItemResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_fridge(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<FridgeItemResponse>>, AppError> {
    let rows = fridge::Entity::find()
        .filter(fridge::Column::UserId.eq(auth_user.user_id))
        .find_also_related(ingredient::Entity)
        .order_by_asc(fridge::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(|(item, ing)| {
            let name = ing.map(|i| i.name).unwrap_or_default();
            fridge_item_response(item, name)
        })
        .collect();

    Ok(Json(items))
}

#[utoipa::path(
    delete,
    path = "/{ingredient_id}",
    tag = "Fridge",
    operation_id = "removeFromFridge",
    summary = "Remove an ingredient from the caller's fridge",
    description = "Deletes the ownership row only; the catalog ingredient survives.",
    params(("ingredient_id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 204, description = "Ingredient removed from fridge"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Ingredient not in fridge (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, ingredient_id))]
pub async fn remove_from_fridge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(ingredient_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = fridge::Entity::find_by_id((auth_user.user_id, ingredient_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient not in fridge".into()))?;

    let active: fridge::ActiveModel = existing.into();
    active.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn fridge_item_response(item: fridge::Model, ingredient_name: String) -> FridgeItemResponse {
    FridgeItemResponse {
        ingredient_id: item.ingredient_id,
        ingredient_name,
        added_at: item.created_at,
    }
}
