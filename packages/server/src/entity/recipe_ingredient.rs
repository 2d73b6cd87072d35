use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One ingredient's quantity/unit within one article's recipe.
///
/// The same (article, ingredient) pair may appear more than once; no
/// uniqueness constraint is placed on the pair.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub article_id: i32,
    #[sea_orm(belongs_to, from = "article_id", to = "id")]
    pub article: HasOne<super::article::Entity>,

    pub ingredient_id: i32,
    #[sea_orm(belongs_to, from = "ingredient_id", to = "id")]
    pub ingredient: HasOne<super::ingredient::Entity>,

    /// NULL means the quantity was left unspecified by the author.
    pub quantity: Option<i32>,
    /// NULL means the unit was left unspecified by the author.
    pub unit: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
