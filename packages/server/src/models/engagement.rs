use serde::Serialize;

/// Result of a like toggle: the caller's resulting membership in the like set.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LikeToggleResponse {
    pub liked: bool,
}

/// Result of a bookmark toggle.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BookmarkToggleResponse {
    pub bookmarked: bool,
}
