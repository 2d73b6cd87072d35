pub mod article;
pub mod auth;
pub mod comment;
pub mod engagement;
pub mod fridge;
pub mod ingredient;
pub mod recipe;
pub mod shared;
