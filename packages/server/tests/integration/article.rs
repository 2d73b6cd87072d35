use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;

use server::entity::{article, comment, ingredient, recipe_ingredient};

use crate::common::{TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn author_can_publish_an_article() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;

        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "title": "Kimchi Stew",
                    "content": "Sour kimchi works best.",
                    "recipe": "Boil, then simmer for 20 minutes.",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["title"], "Kimchi Stew");
        assert!(res.body["id"].is_number());
        assert!(res.body["image"].is_null());
    }

    #[tokio::test]
    async fn anonymous_write_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::ARTICLES,
                &json!({
                    "title": "Kimchi Stew",
                    "content": "Sour kimchi works best.",
                    "recipe": "Boil, then simmer.",
                }),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn title_longer_than_thirty_characters_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;

        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "title": "a".repeat(31),
                    "content": "Sour kimchi works best.",
                    "recipe": "Boil, then simmer.",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["fields"]["title"].is_string());
    }

    #[tokio::test]
    async fn unknown_category_returns_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;

        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "title": "Kimchi Stew",
                    "content": "Sour kimchi works best.",
                    "recipe": "Boil, then simmer.",
                    "category": 9999,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod detail {
    use super::*;

    #[tokio::test]
    async fn detail_includes_author_counts_and_ingredients() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        let article_id = app.create_article(&token, "Kimchi Stew").await;
        app.add_recipe_ingredient(article_id, &token, "Kimchi", 200, "g")
            .await;

        let liker = app.create_authenticated_user("fan").await;
        let res = app
            .post_with_token(&routes::article_like(article_id), &json!({}), &liker)
            .await;
        assert_eq!(res.status, 200);

        let res = app.get_without_token(&routes::article(article_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["author"]["username"], "chef");
        assert_eq!(res.body["like_count"], 1);
        assert_eq!(res.body["bookmark_count"], 0);
        assert_eq!(res.body["ingredients"][0]["ingredient_name"], "Kimchi");
    }

    #[tokio::test]
    async fn missing_article_returns_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::article(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn author_can_patch_a_single_field() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        let article_id = app.create_article(&token, "Kimchi Stew").await;

        let res = app
            .patch_with_token(
                &routes::article(article_id),
                &json!({"title": "Kimchi Jjigae"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Kimchi Jjigae");
        // Untouched fields survive the patch.
        assert_eq!(res.body["content"], "A weeknight staple.");
    }

    #[tokio::test]
    async fn patching_image_to_null_clears_it() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        let article_id = app.create_article(&token, "Kimchi Stew").await;

        let res = app
            .patch_with_token(
                &routes::article(article_id),
                &json!({"image": "https://images.example.com/stew.jpg"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["image"], "https://images.example.com/stew.jpg");

        let res = app
            .patch_with_token(&routes::article(article_id), &json!({"image": null}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["image"].is_null());
    }

    #[tokio::test]
    async fn non_author_cannot_update() {
        let app = TestApp::spawn().await;
        let author = app.create_authenticated_user("chef").await;
        let other = app.create_authenticated_user("intruder").await;
        let article_id = app.create_article(&author, "Kimchi Stew").await;

        let res = app
            .patch_with_token(&routes::article(article_id), &json!({"title": "x"}), &other)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn delete_cascades_to_comments_and_recipe_links_but_not_ingredients() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        let article_id = app.create_article(&token, "Kimchi Stew").await;
        app.add_recipe_ingredient(article_id, &token, "Kimchi", 200, "g")
            .await;

        let res = app
            .post_with_token(
                &routes::article_comments(article_id),
                &json!({"content": "Looks great"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 201);

        let res = app
            .delete_with_token(&routes::article(article_id), &token)
            .await;
        assert_eq!(res.status, 204);

        let comments = comment::Entity::find()
            .filter(comment::Column::ArticleId.eq(article_id))
            .all(&app.db)
            .await
            .unwrap();
        assert!(comments.is_empty());

        let links = recipe_ingredient::Entity::find()
            .filter(recipe_ingredient::Column::ArticleId.eq(article_id))
            .all(&app.db)
            .await
            .unwrap();
        assert!(links.is_empty());

        // The shared catalog ingredient survives the cascade.
        let kimchi = ingredient::Entity::find()
            .filter(ingredient::Column::Name.eq("Kimchi"))
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(kimchi.len(), 1);
    }

    #[tokio::test]
    async fn non_author_cannot_delete() {
        let app = TestApp::spawn().await;
        let author = app.create_authenticated_user("chef").await;
        let other = app.create_authenticated_user("intruder").await;
        let article_id = app.create_article(&author, "Kimchi Stew").await;

        let res = app
            .delete_with_token(&routes::article(article_id), &other)
            .await;

        assert_eq!(res.status, 403);

        let res = app.get_without_token(&routes::article(article_id)).await;
        assert_eq!(res.status, 200);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn articles_are_listed_in_ascending_creation_order() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        app.create_article(&token, "First").await;
        app.create_article(&token, "Second").await;
        app.create_article(&token, "Third").await;

        let res = app.get_without_token(routes::ARTICLES).await;

        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert_eq!(res.body["pagination"]["total"], 3);
    }

    #[tokio::test]
    async fn pagination_splits_pages() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        for i in 0..5 {
            app.create_article(&token, &format!("Dish {i}")).await;
        }

        let res = app
            .get_without_token(&format!("{}?page=2&per_page=2", routes::ARTICLES))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["pagination"]["total_pages"], 3);
        assert_eq!(res.body["data"][0]["title"], "Dish 2");
    }
}

mod categories {
    use super::*;

    #[tokio::test]
    async fn default_categories_are_seeded() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::CATEGORIES).await;

        assert_eq!(res.status, 200);
        assert!(!res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_view_returns_only_its_articles_in_creation_order() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;

        let categories = app.get_without_token(routes::CATEGORIES).await;
        let category_id = categories.body[0]["id"].as_i64().unwrap() as i32;

        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "title": "Categorized",
                    "content": "In a category.",
                    "recipe": "Steps.",
                    "category": category_id,
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201);
        app.create_article(&token, "Uncategorized").await;

        let res = app
            .get_without_token(&routes::category_articles(category_id))
            .await;

        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res.body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Categorized"]);
    }
}

mod trending {
    use super::*;

    /// Push an article's creation time into the past, bypassing the API.
    async fn backdate_article(app: &TestApp, article_id: i32, days: i64) {
        let model = article::Entity::find_by_id(article_id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: article::ActiveModel = model.into();
        active.created_at = Set(Utc::now() - Duration::days(days));
        active.update(&app.db).await.unwrap();
    }

    #[tokio::test]
    async fn excludes_articles_older_than_the_window() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        let stale = app.create_article(&token, "Stale").await;
        app.create_article(&token, "Fresh").await;

        backdate_article(&app, stale, 4).await;

        let res = app.get_without_token(routes::ARTICLES_TRENDING).await;

        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res.body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Fresh"]);
    }

    #[tokio::test]
    async fn window_boundary_keeps_articles_inside_the_window() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        let near_edge = app.create_article(&token, "Near the edge").await;
        let past_edge = app.create_article(&token, "Past the edge").await;

        backdate_article(&app, near_edge, 2).await;
        backdate_article(&app, past_edge, 3).await;

        let res = app.get_without_token(routes::ARTICLES_TRENDING).await;

        let titles: Vec<&str> = res.body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Near the edge"]);
    }

    #[tokio::test]
    async fn orders_by_ascending_like_count_then_creation_time() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("chef").await;
        let first = app.create_article(&token, "Older, most liked").await;
        app.create_article(&token, "Middle, unliked").await;
        let third = app.create_article(&token, "Newest, one like").await;

        let fan_a = app.create_authenticated_user("fan_a").await;
        let fan_b = app.create_authenticated_user("fan_b").await;
        for fan in [&fan_a, &fan_b] {
            let res = app
                .post_with_token(&routes::article_like(first), &json!({}), fan)
                .await;
            assert_eq!(res.status, 200);
        }
        let res = app
            .post_with_token(&routes::article_like(third), &json!({}), &fan_a)
            .await;
        assert_eq!(res.status, 200);

        let res = app.get_without_token(routes::ARTICLES_TRENDING).await;

        // The legacy ordering ranks the least-liked first.
        let titles: Vec<&str> = res.body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(
            titles,
            vec!["Middle, unliked", "Newest, one like", "Older, most liked"]
        );
    }
}
