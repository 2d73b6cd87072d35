use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{article_bookmark, article_like};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::engagement::{BookmarkToggleResponse, LikeToggleResponse};
use crate::state::AppState;

use super::article::{find_article, find_article_for_update};

#[utoipa::path(
    post,
    path = "/{id}/like",
    tag = "Engagement",
    operation_id = "toggleLike",
    summary = "Toggle a like on an article",
    description = "Adds the caller to the article's like set if absent, removes them \
        if present. Returns the resulting membership state.",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Toggle applied", body = LikeToggleResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(article_id, user_id = auth_user.user_id))]
pub async fn toggle_like(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<i32>,
) -> Result<Json<LikeToggleResponse>, AppError> {
    let txn = state.db.begin().await?;
    find_article_for_update(&txn, article_id).await?;

    let existing = article_like::Entity::find_by_id((article_id, auth_user.user_id))
        .one(&txn)
        .await?;

    let liked = match existing {
        Some(row) => {
            let active: article_like::ActiveModel = row.into();
            active.delete(&txn).await?;
            false
        }
        None => {
            let new_like = article_like::ActiveModel {
                article_id: Set(article_id),
                user_id: Set(auth_user.user_id),
                created_at: Set(chrono::Utc::now()),
            };
            insert_membership(new_like.insert(&txn).await)?
        }
    };

    txn.commit().await?;
    Ok(Json(LikeToggleResponse { liked }))
}

#[utoipa::path(
    post,
    path = "/{id}/bookmark",
    tag = "Engagement",
    operation_id = "toggleBookmark",
    summary = "Toggle a bookmark on an article",
    description = "Adds the article to the caller's bookmarks if absent, removes it \
        if present. Returns the resulting membership state.",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Toggle applied", body = BookmarkToggleResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(article_id, user_id = auth_user.user_id))]
pub async fn toggle_bookmark(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<i32>,
) -> Result<Json<BookmarkToggleResponse>, AppError> {
    let txn = state.db.begin().await?;
    find_article_for_update(&txn, article_id).await?;

    let existing = article_bookmark::Entity::find_by_id((article_id, auth_user.user_id))
        .one(&txn)
        .await?;

    let bookmarked = match existing {
        Some(row) => {
            let active: article_bookmark::ActiveModel = row.into();
            active.delete(&txn).await?;
            false
        }
        None => {
            let new_bookmark = article_bookmark::ActiveModel {
                article_id: Set(article_id),
                user_id: Set(auth_user.user_id),
                created_at: Set(chrono::Utc::now()),
            };
            insert_membership(new_bookmark.insert(&txn).await)?
        }
    };

    txn.commit().await?;
    Ok(Json(BookmarkToggleResponse { bookmarked }))
}

/// A concurrent toggle may have inserted the row first; membership stands
/// either way.
fn insert_membership<T>(result: Result<T, DbErr>) -> Result<bool, AppError> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(true),
        Err(e) => Err(e.into()),
    }
}
