use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{article, auth, comment, engagement, fridge, ingredient, recipe, upload};
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/articles", article_routes())
        .nest("/categories", category_routes())
        .nest("/ingredients", ingredient_routes())
        .nest("/fridge", fridge_routes())
        .nest("/uploads", upload_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::me))
}

fn article_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(article::list_articles, article::create_article))
        .routes(routes!(article::trending_articles))
        .routes(routes!(article::bookmarked_articles))
        .routes(routes!(
            article::get_article,
            article::update_article,
            article::delete_article
        ))
        .routes(routes!(engagement::toggle_like))
        .routes(routes!(engagement::toggle_bookmark))
        .routes(routes!(comment::list_comments, comment::create_comment))
        .routes(routes!(comment::update_comment, comment::delete_comment))
        .routes(routes!(
            recipe::list_recipe_ingredients,
            recipe::add_recipe_ingredient
        ))
        .routes(routes!(
            recipe::update_recipe_ingredient,
            recipe::remove_recipe_ingredient
        ))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(article::list_categories))
        .routes(routes!(article::list_category_articles))
}

fn ingredient_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            ingredient::list_ingredients,
            ingredient::create_ingredient
        ))
        .routes(routes!(
            ingredient::get_ingredient,
            ingredient::delete_ingredient
        ))
        .routes(routes!(ingredient::add_ingredient_link))
        .routes(routes!(ingredient::remove_ingredient_link))
}

fn fridge_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(fridge::list_fridge, fridge::add_to_fridge))
        .routes(routes!(fridge::remove_from_fridge))
}

fn upload_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(upload::request_upload_url))
}
