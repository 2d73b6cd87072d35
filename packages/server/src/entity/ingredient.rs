use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Natural key. The catalog resolves by exact name and relies on the
    /// unique constraint to arbitrate concurrent creation.
    #[sea_orm(unique)]
    pub name: String,
    pub info: Option<String>,

    #[sea_orm(has_many)]
    pub recipe_ingredients: HasMany<super::recipe_ingredient::Entity>,

    #[sea_orm(has_many)]
    pub links: HasMany<super::ingredient_link::Entity>,

    #[sea_orm(has_many)]
    pub fridge_items: HasMany<super::fridge::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
