//! Feed posts.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError, endpoints};
use crate::auth::types::AuthUser;
use crate::retry::{RetryPolicy, with_retry};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: Option<AuthUser>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// `GET /posts`, retried once on transient failure.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn list_posts(client: &ApiClient) -> Result<Vec<Post>, ApiError> {
    with_retry(RetryPolicy::QUERY, move || client.get(endpoints::POSTS)).await
}

/// `GET /posts/{id}`.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn get_post(client: &ApiClient, id: u64) -> Result<Post, ApiError> {
    let path = endpoints::post(id);
    let path = path.as_str();
    with_retry(RetryPolicy::QUERY, move || client.get(path)).await
}

/// `POST /posts`. Never retried.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn create_post(client: &ApiClient, post: &NewPost) -> Result<Post, ApiError> {
    client.post(endpoints::POSTS, post).await
}

#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;
