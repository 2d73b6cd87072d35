use serde::{Deserialize, Serialize};

use super::recipe::INGREDIENT_NAME_MAX;
use super::shared::{Pagination, validate_text, validate_url};
use crate::error::AppError;

pub const INGREDIENT_INFO_MAX: usize = 100;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateIngredientRequest {
    /// Ingredient name (catalog natural key).
    #[schema(example = "Kimchi")]
    pub name: String,
    /// Optional free-text description.
    pub info: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Case-insensitive name search.
    pub search: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddIngredientLinkRequest {
    /// Purchase/reference URL.
    pub link: Option<String>,
    /// Image URL for the link.
    pub link_img: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub info: Option<String>,
}

impl From<crate::entity::ingredient::Model> for IngredientResponse {
    fn from(m: crate::entity::ingredient::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            info: m.info,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct IngredientListResponse {
    pub data: Vec<IngredientResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct IngredientLinkResponse {
    pub id: i32,
    pub ingredient_id: i32,
    pub link: Option<String>,
    pub link_img: Option<String>,
}

impl From<crate::entity::ingredient_link::Model> for IngredientLinkResponse {
    fn from(m: crate::entity::ingredient_link::Model) -> Self {
        Self {
            id: m.id,
            ingredient_id: m.ingredient_id,
            link: m.link,
            link_img: m.link_img,
        }
    }
}

/// Ingredient with its purchase links.
#[derive(Serialize, utoipa::ToSchema)]
pub struct IngredientDetailResponse {
    pub id: i32,
    pub name: String,
    pub info: Option<String>,
    pub links: Vec<IngredientLinkResponse>,
}

pub fn validate_create_ingredient(req: &CreateIngredientRequest) -> Result<(), AppError> {
    validate_text(&req.name, "name", INGREDIENT_NAME_MAX)?;
    if let Some(ref info) = req.info {
        validate_text(info, "info", INGREDIENT_INFO_MAX)?;
    }
    Ok(())
}

pub fn validate_add_ingredient_link(req: &AddIngredientLinkRequest) -> Result<(), AppError> {
    if req.link.is_none() && req.link_img.is_none() {
        return Err(AppError::Validation(
            "At least one of link or link_img is required".into(),
        ));
    }
    if let Some(ref link) = req.link {
        validate_url(link, "link")?;
    }
    if let Some(ref link_img) = req.link_img {
        validate_url(link_img, "link_img")?;
    }
    Ok(())
}
