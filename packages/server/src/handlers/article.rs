use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{
    article, article_bookmark, article_like, category, comment, ingredient, recipe_ingredient,
    user,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::article::*;
use crate::models::recipe::RecipeIngredientResponse;
use crate::models::shared::Pagination;
use crate::state::AppState;
use crate::utils::authz;

#[utoipa::path(
    post,
    path = "/",
    tag = "Articles",
    operation_id = "createArticle",
    summary = "Publish a new article",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_article(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_article(&payload)?;

    if let Some(category_id) = payload.category {
        find_category(&state.db, category_id).await?;
    }

    let now = chrono::Utc::now();
    let new_article = article::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        content: Set(payload.content),
        recipe: Set(payload.recipe),
        image: Set(payload.image),
        category_id: Set(payload.category),
        user_id: Set(auth_user.user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_article.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ArticleResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Articles",
    operation_id = "listArticles",
    summary = "List articles with pagination",
    description = "Returns all articles ordered by ascending creation time.",
    params(ArticleListQuery),
    responses(
        (status = 200, description = "List of articles", body = ArticleListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Json<ArticleListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);

    let select = article::Entity::find();

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let articles = select
        .order_by_asc(article::Column::CreatedAt)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let data = with_like_counts(&state.db, articles).await?;

    Ok(Json(ArticleListResponse {
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
    path = "/trending",
    tag = "Articles",
    operation_id = "trendingArticles",
    summary = "List recently created articles ranked by like count",
    description = "Returns articles created within the trailing window (default 3 days), \
        ordered by ascending like count and then ascending creation time.",
    params(TrendingQuery),
    responses(
        (status = 200, description = "Trending articles", body = Vec<ArticleListItem>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn trending_articles(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<Vec<ArticleListItem>>, AppError> {
    let days = query.days.unwrap_or(3).clamp(1, 30);
    let cutoff = chrono::Utc::now() - chrono::Duration::days(days);

    let articles = article::Entity::find()
        .filter(article::Column::CreatedAt.gte(cutoff))
        .order_by_asc(article::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let mut items = with_like_counts(&state.db, articles).await?;
    // Stable sort keeps the created_at ordering within equal like counts.
    items.sort_by_key(|item| item.like_count);

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/bookmarked",
    tag = "Articles",
    operation_id = "bookmarkedArticles",
    summary = "List the caller's bookmarked articles",
    description = "Returns the authenticated user's bookmarks in the order they were added.",
    responses(
        (status = 200, description = "Bookmarked articles", body = Vec<ArticleListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn bookmarked_articles(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleListItem>>, AppError> {
    let rows = article_bookmark::Entity::find()
        .filter(article_bookmark::Column::UserId.eq(auth_user.user_id))
        .find_also_related(article::Entity)
        .order_by_asc(article_bookmark::Column::CreatedAt)
        .order_by_asc(article::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let articles: Vec<article::Model> = rows.into_iter().filter_map(|(_, a)| a).collect();
    let items = with_like_counts(&state.db, articles).await?;

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Articles",
    operation_id = "getArticle",
    summary = "Get an article by ID",
    description = "Returns the full article with author, category, engagement counts, \
        and its recipe-ingredient list.",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article details", body = ArticleDetailResponse),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArticleDetailResponse>, AppError> {
    let (model, author) = article::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))?;
    let author = author
        .ok_or_else(|| AppError::Internal(format!("Article {id} has no author row")))?;

    let category = match model.category_id {
        Some(category_id) => category::Entity::find_by_id(category_id)
            .one(&state.db)
            .await?
            .map(CategoryResponse::from),
        None => None,
    };

    let like_count = article_like::Entity::find()
        .filter(article_like::Column::ArticleId.eq(id))
        .count(&state.db)
        .await?;
    let bookmark_count = article_bookmark::Entity::find()
        .filter(article_bookmark::Column::ArticleId.eq(id))
        .count(&state.db)
        .await?;

    let ingredients = recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::ArticleId.eq(id))
        .find_also_related(ingredient::Entity)
        .order_by_asc(recipe_ingredient::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|(link, ing)| RecipeIngredientResponse {
            id: link.id,
            article_id: link.article_id,
            ingredient_id: link.ingredient_id,
            ingredient_name: ing.map(|i| i.name).unwrap_or_default(),
            quantity: link.quantity,
            unit: link.unit,
        })
        .collect();

    Ok(Json(ArticleDetailResponse {
        id: model.id,
        title: model.title,
        content: model.content,
        recipe: model.recipe,
        image: model.image,
        author: ArticleAuthor {
            id: author.id,
            username: author.username,
        },
        category,
        like_count: like_count as i64,
        bookmark_count: bookmark_count as i64,
        ingredients,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Articles",
    operation_id = "updateArticle",
    summary = "Update an article",
    description = "Partially updates an article using PATCH semantics. Author only. \
        Sending `image: null` clears the stored image; `category: null` uncategorizes.",
    params(("id" = i32, Path, description = "Article ID")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated", body = ArticleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Article or category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_article(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateArticleRequest>,
) -> Result<Json<ArticleResponse>, AppError> {
    validate_update_article(&payload)?;

    let txn = state.db.begin().await?;
    let existing = find_article_for_update(&txn, id).await?;
    authz::require_author(&auth_user, existing.user_id)?;

    if payload == UpdateArticleRequest::default() {
        return Ok(Json(existing.into()));
    }

    if let Some(Some(category_id)) = payload.category {
        find_category(&txn, category_id).await?;
    }

    let mut active: article::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    if let Some(recipe) = payload.recipe {
        active.recipe = Set(recipe);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(category_id) = payload.category {
        active.category_id = Set(category_id);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Articles",
    operation_id = "deleteArticle",
    summary = "Delete an article",
    description = "Permanently deletes an article and cascade-deletes its comments, \
        recipe-ingredient links, likes, and bookmarks. Referenced ingredients are left \
        intact. Author only.",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_article(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_article_for_update(&txn, id).await?;
    authz::require_author(&auth_user, existing.user_id)?;

    comment::Entity::delete_many()
        .filter(comment::Column::ArticleId.eq(id))
        .exec(&txn)
        .await?;
    recipe_ingredient::Entity::delete_many()
        .filter(recipe_ingredient::Column::ArticleId.eq(id))
        .exec(&txn)
        .await?;
    article_like::Entity::delete_many()
        .filter(article_like::Column::ArticleId.eq(id))
        .exec(&txn)
        .await?;
    article_bookmark::Entity::delete_many()
        .filter(article_bookmark::Column::ArticleId.eq(id))
        .exec(&txn)
        .await?;
    article::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}/articles",
    tag = "Categories",
    operation_id = "listCategoryArticles",
    summary = "List articles in a category",
    description = "Returns the category's articles ordered by ascending creation time.",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Articles in the category", body = Vec<ArticleListItem>),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(category_id))]
pub async fn list_category_articles(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<ArticleListItem>>, AppError> {
    find_category(&state.db, category_id).await?;

    let articles = article::Entity::find()
        .filter(article::Column::CategoryId.eq(category_id))
        .order_by_asc(article::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let items = with_like_counts(&state.db, articles).await?;
    Ok(Json(items))
}

pub(crate) async fn find_article<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<article::Model, AppError> {
    article::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))
}

pub(crate) async fn find_article_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<article::Model, AppError> {
    use sea_orm::sea_query::LockType;
    article::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))
}

async fn find_category<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<category::Model, AppError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
}

/// Attach read-time like counts to a page of articles, preserving order.
async fn with_like_counts<C: ConnectionTrait>(
    db: &C,
    articles: Vec<article::Model>,
) -> Result<Vec<ArticleListItem>, AppError> {
    let ids: Vec<i32> = articles.iter().map(|a| a.id).collect();

    let counts: HashMap<i32, i64> = if ids.is_empty() {
        HashMap::new()
    } else {
        article_like::Entity::find()
            .filter(article_like::Column::ArticleId.is_in(ids))
            .select_only()
            .column(article_like::Column::ArticleId)
            .column_as(article_like::Column::UserId.count(), "like_count")
            .group_by(article_like::Column::ArticleId)
            .into_tuple::<(i32, i64)>()
            .all(db)
            .await?
            .into_iter()
            .collect()
    };

    Ok(articles
        .into_iter()
        .map(|a| ArticleListItem {
            like_count: counts.get(&a.id).copied().unwrap_or(0),
            id: a.id,
            title: a.title,
            image: a.image,
            category_id: a.category_id,
            user_id: a.user_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
        })
        .collect())
}
