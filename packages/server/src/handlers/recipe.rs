use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{ingredient, recipe_ingredient};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::recipe::{
    AddRecipeIngredientRequest, RecipeIngredientResponse, UpdateRecipeIngredientRequest,
    validate_add_recipe_ingredient, validate_update_recipe_ingredient,
};
use crate::state::AppState;
use crate::utils::{authz, catalog};

use super::article::{find_article, find_article_for_update};

#[utoipa::path(
    post,
    path = "/{id}/ingredients",
    tag = "Recipe Ingredients",
    operation_id = "addRecipeIngredient",
    summary = "Add an ingredient to an article's recipe",
    description = "Resolves the ingredient by name (creating it in the catalog if \
        unknown) and links it to the article with an optional quantity and unit. \
        The same ingredient may be linked more than once. Author only.",
    params(("id" = i32, Path, description = "Article ID")),
    request_body = AddRecipeIngredientRequest,
    responses(
        (status = 201, description = "Ingredient linked", body = RecipeIngredientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(article_id, ingredient = %payload.ingredient))]
pub async fn add_recipe_ingredient(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<i32>,
    AppJson(payload): AppJson<AddRecipeIngredientRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_add_recipe_ingredient(&payload)?;

    let txn = state.db.begin().await?;
    let article = find_article_for_update(&txn, article_id).await?;
    authz::require_author(&auth_user, article.user_id)?;

    let resolved = catalog::resolve_ingredient(&txn, &payload.ingredient).await?;

    let new_link = recipe_ingredient::ActiveModel {
        article_id: Set(article_id),
        ingredient_id: Set(resolved.id),
        quantity: Set(payload.quantity),
        unit: Set(payload.unit),
        ..Default::default()
    };

    let model = new_link.insert(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(recipe_ingredient_response(model, resolved.name)),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}/ingredients",
    tag = "Recipe Ingredients",
    operation_id = "listRecipeIngredients",
    summary = "List an article's recipe ingredients",
    description = "Returns all ingredient links for the article in creation order.",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Recipe ingredients", body = Vec<RecipeIngredientResponse>),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(article_id))]
pub async fn list_recipe_ingredients(
    State(state): State<AppState>,
    Path(article_id): Path<i32>,
) -> Result<Json<Vec<RecipeIngredientResponse>>, AppError> {
    find_article(&state.db, article_id).await?;

    let rows = recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::ArticleId.eq(article_id))
        .find_also_related(ingredient::Entity)
        .order_by_asc(recipe_ingredient::Column::Id)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(|(link, ing)| {
            let name = ing.map(|i| i.name).unwrap_or_default();
            recipe_ingredient_response(link, name)
        })
        .collect();

    Ok(Json(items))
}

#[utoipa::path(
    patch,
    path = "/{id}/ingredients/{link_id}",
    tag = "Recipe Ingredients",
    operation_id = "updateRecipeIngredient",
    summary = "Update a recipe-ingredient link",
    description = "Partially updates the link. A changed ingredient name is re-resolved \
        against the catalog. `quantity: null` / `unit: null` reset the field to \
        unspecified. Author only.",
    params(
        ("id" = i32, Path, description = "Article ID"),
        ("link_id" = i32, Path, description = "Recipe-ingredient link ID"),
    ),
    request_body = UpdateRecipeIngredientRequest,
    responses(
        (status = 200, description = "Link updated", body = RecipeIngredientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Link not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(article_id, link_id))]
pub async fn update_recipe_ingredient(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((article_id, link_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<UpdateRecipeIngredientRequest>,
) -> Result<Json<RecipeIngredientResponse>, AppError> {
    validate_update_recipe_ingredient(&payload)?;

    let txn = state.db.begin().await?;
    let article = find_article_for_update(&txn, article_id).await?;
    authz::require_author(&auth_user, article.user_id)?;
    let existing = find_link(&txn, article_id, link_id).await?;

    let ingredient_id = match payload.ingredient {
        Some(ref name) => catalog::resolve_ingredient(&txn, name).await?.id,
        None => existing.ingredient_id,
    };

    let mut active: recipe_ingredient::ActiveModel = existing.into();
    active.ingredient_id = Set(ingredient_id);
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(unit) = payload.unit {
        active.unit = Set(unit);
    }

    let model = active.update(&txn).await?;

    let name = ingredient::Entity::find_by_id(model.ingredient_id)
        .one(&txn)
        .await?
        .map(|i| i.name)
        .unwrap_or_default();
    txn.commit().await?;

    Ok(Json(recipe_ingredient_response(model, name)))
}

#[utoipa::path(
    delete,
    path = "/{id}/ingredients/{link_id}",
    tag = "Recipe Ingredients",
    operation_id = "removeRecipeIngredient",
    summary = "Remove an ingredient from an article's recipe",
    description = "Deletes the association row only; the catalog ingredient survives \
        even if nothing references it anymore. Author only.",
    params(
        ("id" = i32, Path, description = "Article ID"),
        ("link_id" = i32, Path, description = "Recipe-ingredient link ID"),
    ),
    responses(
        (status = 204, description = "Link removed"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Link not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(article_id, link_id))]
pub async fn remove_recipe_ingredient(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((article_id, link_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let article = find_article_for_update(&txn, article_id).await?;
    authz::require_author(&auth_user, article.user_id)?;
    let existing = find_link(&txn, article_id, link_id).await?;

    let active: recipe_ingredient::ActiveModel = existing.into();
    active.delete(&txn).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_link<C: ConnectionTrait>(
    db: &C,
    article_id: i32,
    link_id: i32,
) -> Result<recipe_ingredient::Model, AppError> {
    recipe_ingredient::Entity::find_by_id(link_id)
        .filter(recipe_ingredient::Column::ArticleId.eq(article_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe ingredient not found".into()))
}

fn recipe_ingredient_response(
    link: recipe_ingredient::Model,
    ingredient_name: String,
) -> RecipeIngredientResponse {
    RecipeIngredientResponse {
        id: link.id,
        article_id: link.article_id,
        ingredient_id: link.ingredient_id,
        ingredient_name,
        quantity: link.quantity,
        unit: link.unit,
    }
}
