use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recipe::RecipeIngredientResponse;
use super::shared::{Pagination, double_option, validate_text, validate_url};
use crate::error::AppError;

pub const TITLE_MAX: usize = 30;
pub const CONTENT_MAX: usize = 500;
pub const RECIPE_MAX: usize = 500;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateArticleRequest {
    /// Article title (1-30 characters).
    #[schema(example = "Kimchi Stew")]
    pub title: String,
    /// Article body (1-500 characters).
    pub content: String,
    /// Free-text cooking instructions (1-500 characters).
    pub recipe: String,
    /// Optional image URL, typically obtained from the upload endpoint.
    pub image: Option<String>,
    /// Optional category ID.
    pub category: Option<i32>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub recipe: Option<String>,
    /// PATCH semantics: absent = keep, null = clear, value = replace.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    /// PATCH semantics: absent = keep, null = uncategorize, value = replace.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub category: Option<Option<i32>>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendingQuery {
    /// Trailing window in days (default 3).
    pub days: Option<i64>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleAuthor {
    pub id: i32,
    pub username: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub recipe: String,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::article::Model> for ArticleResponse {
    fn from(m: crate::entity::article::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            recipe: m.recipe,
            image: m.image,
            category_id: m.category_id,
            user_id: m.user_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// List entry with the like count computed at read time.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleListItem {
    pub id: i32,
    pub title: String,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub user_id: i32,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleListResponse {
    pub data: Vec<ArticleListItem>,
    pub pagination: Pagination,
}

/// Full detail view: author, category, counts, and the ingredient list.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleDetailResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub recipe: String,
    pub image: Option<String>,
    pub author: ArticleAuthor,
    pub category: Option<CategoryResponse>,
    pub like_count: i64,
    pub bookmark_count: i64,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub info: String,
}

impl From<crate::entity::category::Model> for CategoryResponse {
    fn from(m: crate::entity::category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            info: m.info,
        }
    }
}

pub fn validate_create_article(req: &CreateArticleRequest) -> Result<(), AppError> {
    validate_text(&req.title, "title", TITLE_MAX)?;
    validate_text(&req.content, "content", CONTENT_MAX)?;
    validate_text(&req.recipe, "recipe", RECIPE_MAX)?;
    if let Some(ref image) = req.image {
        validate_url(image, "image")?;
    }
    Ok(())
}

pub fn validate_update_article(req: &UpdateArticleRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_text(title, "title", TITLE_MAX)?;
    }
    if let Some(ref content) = req.content {
        validate_text(content, "content", CONTENT_MAX)?;
    }
    if let Some(ref recipe) = req.recipe {
        validate_text(recipe, "recipe", RECIPE_MAX)?;
    }
    if let Some(Some(ref image)) = req.image {
        validate_url(image, "image")?;
    }
    Ok(())
}
