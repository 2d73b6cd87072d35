use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{article, category, comment};

/// Default categories seeded on startup.
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Korean", "Korean home cooking"),
    ("Western", "Western dishes"),
    ("Dessert", "Sweets and baking"),
    ("Vegan", "Plant-based recipes"),
];

/// Seed the `category` table with defaults.
pub async fn seed_categories(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = category::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(());
    }

    let mut inserted = 0u32;
    for &(name, info) in DEFAULT_CATEGORIES {
        let model = category::ActiveModel {
            name: Set(name.to_string()),
            info: Set(info.to_string()),
            ..Default::default()
        };

        category::Entity::insert(model)
            .exec_without_returning(db)
            .await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!("Seeded {} default categories", inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for comment listing:
    // SELECT * FROM comment WHERE article_id = ? ORDER BY created_at
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_comment_article_created")
        .table(comment::Entity)
        .col(comment::Column::ArticleId)
        .col(comment::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_comment_article_created exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_comment_article_created: {}", e);
        }
    }

    // Composite index for category listing and the trending window scan:
    // filter by category / created_at, order by created_at
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_article_category_created")
        .table(article::Entity)
        .col(article::Column::CategoryId)
        .col(article::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_article_category_created exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_article_category_created: {}", e);
        }
    }

    Ok(())
}
