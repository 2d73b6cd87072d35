use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::entity::ingredient;
use crate::error::AppError;

/// Resolve an ingredient by exact name, creating it if absent.
///
/// The unique constraint on `ingredient.name` arbitrates concurrent
/// resolution of the same name. The insert uses ON CONFLICT DO NOTHING so
/// the losing writer's transaction stays usable, and the final lookup turns
/// the lost race into a plain read; callers never observe the conflict.
pub async fn resolve_ingredient<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<ingredient::Model, AppError> {
    let name = name.trim();

    if let Some(existing) = find_by_name(db, name).await? {
        return Ok(existing);
    }

    let new_ingredient = ingredient::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };

    let insert = ingredient::Entity::insert(new_ingredient)
        .on_conflict(
            OnConflict::column(ingredient::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match insert {
        Ok(_) => {}
        Err(DbErr::RecordNotInserted) => {
            tracing::debug!("Ingredient resolve race: insert lost, retrying as lookup");
        }
        Err(e) => return Err(e.into()),
    }

    find_by_name(db, name).await?.ok_or_else(|| {
        AppError::Internal(format!("Ingredient '{name}' not found after resolve insert"))
    })
}

async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<ingredient::Model>, AppError> {
    Ok(ingredient::Entity::find()
        .filter(ingredient::Column::Name.eq(name))
        .one(db)
        .await?)
}
