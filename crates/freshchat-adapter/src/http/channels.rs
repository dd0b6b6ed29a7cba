/*
[INPUT]:  Authenticated client
[OUTPUT]: Channel list of the account
[POS]:    HTTP layer - channel endpoints
[UPDATE]: When adding channel endpoints or paging support
*/

use reqwest::Method;

use crate::http::{FreshchatClient, Result};
use crate::types::{Channel, Channels};

impl FreshchatClient {
    /// List channels
    ///
    /// GET /channels
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        let channels: Channels = self
            .send_json(Method::GET, Channels::ENDPOINT, None, None)
            .await?;
        Ok(channels.channels)
    }
}
