use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase/reference link attached to an ingredient.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient_link")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub ingredient_id: i32,
    #[sea_orm(belongs_to, from = "ingredient_id", to = "id")]
    pub ingredient: HasOne<super::ingredient::Entity>,

    pub link: Option<String>,
    pub link_img: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
