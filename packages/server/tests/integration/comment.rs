use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn authenticated_user_can_comment_on_an_article() {
    let app = TestApp::spawn().await;
    let author = app.create_authenticated_user("chef").await;
    let reader = app.create_authenticated_user("reader").await;
    let article_id = app.create_article(&author, "Kimchi Stew").await;

    let res = app
        .post_with_token(
            &routes::article_comments(article_id),
            &json!({"content": "Made this twice already."}),
            &reader,
        )
        .await;

    assert_eq!(res.status, 201);
    assert_eq!(res.body["content"], "Made this twice already.");
    assert_eq!(res.body["article_id"], article_id);
}

#[tokio::test]
async fn comment_longer_than_three_hundred_characters_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("chef").await;
    let article_id = app.create_article(&token, "Kimchi Stew").await;

    let res = app
        .post_with_token(
            &routes::article_comments(article_id),
            &json!({"content": "a".repeat(301)}),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn comments_are_listed_oldest_first_with_pagination() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("chef").await;
    let article_id = app.create_article(&token, "Kimchi Stew").await;

    for i in 0..3 {
        let res = app
            .post_with_token(
                &routes::article_comments(article_id),
                &json!({"content": format!("Comment {i}")}),
                &token,
            )
            .await;
        assert_eq!(res.status, 201);
    }

    let res = app
        .get_without_token(&routes::article_comments(article_id))
        .await;

    assert_eq!(res.status, 200);
    let contents: Vec<&str> = res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["Comment 0", "Comment 1", "Comment 2"]);
    assert_eq!(res.body["pagination"]["total"], 3);
}

#[tokio::test]
async fn author_can_edit_their_comment() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("reader").await;
    let article_id = app.create_article(&token, "Kimchi Stew").await;

    let created = app
        .post_with_token(
            &routes::article_comments(article_id),
            &json!({"content": "First draft"}),
            &token,
        )
        .await;
    let comment_id = created.id();

    let res = app
        .patch_with_token(
            &routes::article_comment(article_id, comment_id),
            &json!({"content": "Second thoughts"}),
            &token,
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["content"], "Second thoughts");
}

#[tokio::test]
async fn non_author_cannot_edit_a_comment() {
    let app = TestApp::spawn().await;
    let author = app.create_authenticated_user("reader").await;
    let other = app.create_authenticated_user("intruder").await;
    let article_id = app.create_article(&author, "Kimchi Stew").await;

    let created = app
        .post_with_token(
            &routes::article_comments(article_id),
            &json!({"content": "Mine"}),
            &author,
        )
        .await;
    let comment_id = created.id();

    let res = app
        .patch_with_token(
            &routes::article_comment(article_id, comment_id),
            &json!({"content": "Hijacked"}),
            &other,
        )
        .await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn author_can_delete_their_comment() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("reader").await;
    let article_id = app.create_article(&token, "Kimchi Stew").await;

    let created = app
        .post_with_token(
            &routes::article_comments(article_id),
            &json!({"content": "Delete me"}),
            &token,
        )
        .await;
    let comment_id = created.id();

    let res = app
        .delete_with_token(&routes::article_comment(article_id, comment_id), &token)
        .await;
    assert_eq!(res.status, 204);

    let res = app
        .get_without_token(&routes::article_comments(article_id))
        .await;
    assert!(res.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn comment_ids_are_scoped_to_their_article() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("reader").await;
    let stew = app.create_article(&token, "Kimchi Stew").await;
    let pancake = app.create_article(&token, "Kimchi Pancake").await;

    let created = app
        .post_with_token(
            &routes::article_comments(stew),
            &json!({"content": "On the stew"}),
            &token,
        )
        .await;
    let comment_id = created.id();

    let res = app
        .delete_with_token(&routes::article_comment(pancake, comment_id), &token)
        .await;

    assert_eq!(res.status, 404);
}
