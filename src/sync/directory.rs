use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::calendar::User;
use crate::sync::event_api::{read_json, ApiError};

#[derive(Debug, Deserialize)]
struct UserListResponse {
    #[serde(default)]
    users: Vec<User>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_users(&self, limit: u32) -> Result<Vec<User>, ApiError>;
}

pub struct HttpDirectoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDirectoryClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryClient {
    async fn list_users(&self, limit: u32) -> Result<Vec<User>, ApiError> {
        let url = format!("{}/users", self.base_url);
        tracing::info!("Fetching up to {} directory users", limit);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        let list: UserListResponse = read_json(response, &url).await?;
        tracing::info!("Fetched {} directory users", list.users.len());
        Ok(list.users)
    }
}
