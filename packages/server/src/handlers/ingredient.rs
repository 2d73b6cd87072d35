use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{fridge, ingredient, ingredient_link, recipe_ingredient};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::ingredient::*;
use crate::models::shared::{Pagination, escape_like};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Ingredients",
    operation_id = "createIngredient",
    summary = "Create an ingredient in the catalog",
    description = "Get-or-create on the ingredient name: if the name is already \
        registered the existing entry is returned with 200 and its stored info is \
        left untouched.",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 200, description = "Ingredient already existed", body = IngredientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(name = %payload.name))]
pub async fn create_ingredient(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateIngredientRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_ingredient(&payload)?;

    let name = payload.name.trim().to_string();

    let new_ingredient = ingredient::ActiveModel {
        name: Set(name.clone()),
        info: Set(payload.info),
        ..Default::default()
    };

    match new_ingredient.insert(&state.db).await {
        Ok(model) => Ok((StatusCode::CREATED, Json(IngredientResponse::from(model)))),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            let existing = ingredient::Entity::find()
                .filter(ingredient::Column::Name.eq(&name))
                .one(&state.db)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "Ingredient '{name}' caused UniqueConstraintViolation but not found"
                    ))
                })?;
            Ok((StatusCode::OK, Json(IngredientResponse::from(existing))))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Ingredients",
    operation_id = "listIngredients",
    summary = "List catalog ingredients",
    description = "Returns a paginated catalog listing with optional case-insensitive \
        name search, ordered by name.",
    params(IngredientListQuery),
    responses(
        (status = 200, description = "List of ingredients", body = IngredientListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientListQuery>,
) -> Result<Json<IngredientListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);

    let mut select = ingredient::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(ingredient::Column::Name)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let data = select
        .order_by_asc(ingredient::Column::Name)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(IngredientResponse::from)
        .collect();

    Ok(Json(IngredientListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Ingredients",
    operation_id = "getIngredient",
    summary = "Get an ingredient with its purchase links",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient details", body = IngredientDetailResponse),
        (status = 404, description = "Ingredient not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientDetailResponse>, AppError> {
    let model = find_ingredient(&state.db, id).await?;

    let links = ingredient_link::Entity::find()
        .filter(ingredient_link::Column::IngredientId.eq(id))
        .order_by_asc(ingredient_link::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(IngredientLinkResponse::from)
        .collect();

    Ok(Json(IngredientDetailResponse {
        id: model.id,
        name: model.name,
        info: model.info,
        links,
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Ingredients",
    operation_id = "deleteIngredient",
    summary = "Delete an ingredient from the catalog",
    description = "Permanently deletes an ingredient and cascade-deletes its recipe \
        links, purchase links, and fridge rows. The ingredient has no owner, so any \
        authenticated user may delete it.",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Ingredient not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn delete_ingredient(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    find_ingredient(&txn, id).await?;

    recipe_ingredient::Entity::delete_many()
        .filter(recipe_ingredient::Column::IngredientId.eq(id))
        .exec(&txn)
        .await?;
    ingredient_link::Entity::delete_many()
        .filter(ingredient_link::Column::IngredientId.eq(id))
        .exec(&txn)
        .await?;
    fridge::Entity::delete_many()
        .filter(fridge::Column::IngredientId.eq(id))
        .exec(&txn)
        .await?;
    ingredient::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/links",
    tag = "Ingredients",
    operation_id = "addIngredientLink",
    summary = "Attach a purchase/reference link to an ingredient",
    params(("id" = i32, Path, description = "Ingredient ID")),
    request_body = AddIngredientLinkRequest,
    responses(
        (status = 201, description = "Link attached", body = IngredientLinkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Ingredient not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(ingredient_id))]
pub async fn add_ingredient_link(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(ingredient_id): Path<i32>,
    AppJson(payload): AppJson<AddIngredientLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_add_ingredient_link(&payload)?;
    find_ingredient(&state.db, ingredient_id).await?;

    let new_link = ingredient_link::ActiveModel {
        ingredient_id: Set(ingredient_id),
        link: Set(payload.link),
        link_img: Set(payload.link_img),
        ..Default::default()
    };

    let model = new_link.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(IngredientLinkResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/{id}/links/{link_id}",
    tag = "Ingredients",
    operation_id = "removeIngredientLink",
    summary = "Remove a purchase/reference link from an ingredient",
    params(
        ("id" = i32, Path, description = "Ingredient ID"),
        ("link_id" = i32, Path, description = "Link ID"),
    ),
    responses(
        (status = 204, description = "Link removed"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Link not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(ingredient_id, link_id))]
pub async fn remove_ingredient_link(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path((ingredient_id, link_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let existing = ingredient_link::Entity::find_by_id(link_id)
        .filter(ingredient_link::Column::IngredientId.eq(ingredient_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient link not found".into()))?;

    let active: ingredient_link::ActiveModel = existing.into();
    active.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_ingredient<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<ingredient::Model, AppError> {
    ingredient::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient not found".into()))
}
