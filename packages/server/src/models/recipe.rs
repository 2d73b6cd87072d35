use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_text};
use crate::error::AppError;

pub const INGREDIENT_NAME_MAX: usize = 100;
pub const UNIT_MAX: usize = 100;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddRecipeIngredientRequest {
    /// Ingredient name, resolved against the catalog (created if unknown).
    #[schema(example = "Kimchi")]
    pub ingredient: String,
    /// Amount of the ingredient; omit to leave unspecified.
    #[schema(example = 200)]
    pub quantity: Option<i32>,
    /// Unit of the quantity; omit to leave unspecified.
    #[schema(example = "g")]
    pub unit: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateRecipeIngredientRequest {
    /// New ingredient name; re-resolved against the catalog when present.
    pub ingredient: Option<String>,
    /// PATCH semantics: absent = keep, null = unspecified, value = replace.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub quantity: Option<Option<i32>>,
    /// PATCH semantics: absent = keep, null = unspecified, value = replace.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub unit: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub article_id: i32,
    pub ingredient_id: i32,
    pub ingredient_name: String,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
}

pub fn validate_add_recipe_ingredient(req: &AddRecipeIngredientRequest) -> Result<(), AppError> {
    validate_text(&req.ingredient, "ingredient", INGREDIENT_NAME_MAX)?;
    validate_quantity(req.quantity)?;
    if let Some(ref unit) = req.unit {
        validate_text(unit, "unit", UNIT_MAX)?;
    }
    Ok(())
}

pub fn validate_update_recipe_ingredient(
    req: &UpdateRecipeIngredientRequest,
) -> Result<(), AppError> {
    if let Some(ref ingredient) = req.ingredient {
        validate_text(ingredient, "ingredient", INGREDIENT_NAME_MAX)?;
    }
    if let Some(quantity) = req.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(Some(ref unit)) = req.unit {
        validate_text(unit, "unit", UNIT_MAX)?;
    }
    Ok(())
}

fn validate_quantity(quantity: Option<i32>) -> Result<(), AppError> {
    if let Some(quantity) = quantity
        && quantity <= 0
    {
        return Err(AppError::FieldValidation {
            field: "quantity",
            message: "quantity must be a positive integer".into(),
        });
    }
    Ok(())
}
