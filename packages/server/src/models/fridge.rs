use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recipe::INGREDIENT_NAME_MAX;
use super::shared::validate_text;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddToFridgeRequest {
    /// Ingredient name, resolved against the catalog (created if unknown).
    #[schema(example = "Salt")]
    pub ingredient: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FridgeItemResponse {
    pub ingredient_id: i32,
    pub ingredient_name: String,
    pub added_at: DateTime<Utc>,
}

pub fn validate_add_to_fridge(req: &AddToFridgeRequest) -> Result<(), AppError> {
    validate_text(&req.ingredient, "ingredient", INGREDIENT_NAME_MAX)
}
