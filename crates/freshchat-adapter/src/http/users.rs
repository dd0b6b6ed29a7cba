/*
[INPUT]:  User models and user ids
[OUTPUT]: Created or fetched User records
[POS]:    HTTP layer - user endpoints
[UPDATE]: When adding new user endpoints or changing user payloads
*/

use reqwest::Method;

use crate::http::{FreshchatClient, FreshchatError, Result};
use crate::types::User;
use crate::types::models::user_endpoint;

impl FreshchatClient {
    /// Create a user
    ///
    /// POST /users
    pub async fn create_user(&self, user: &User) -> Result<User> {
        let body = serde_json::to_value(user)?;
        self.send_json(Method::POST, User::ENDPOINT, None, Some(&body))
            .await
    }

    /// Fetch an existing user
    ///
    /// GET /users/{user_id}
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let user_id = path_id("user_id", user_id)?;
        self.send_json(Method::GET, &user_endpoint(user_id), None, None)
            .await
    }
}

/// Reject ids that would change the resource path
pub(crate) fn path_id<'a>(name: &str, id: &'a str) -> Result<&'a str> {
    let trimmed = id.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '?', '#']) {
        return Err(FreshchatError::InvalidRequest(format!(
            "{name} {id:?} is not a valid resource id"
        )));
    }
    Ok(trimmed)
}
