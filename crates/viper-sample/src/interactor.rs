//! # Users Interactor
//!
//! The screen's only door to the outside world: one GET against a JSON
//! endpoint, decoded into the entity list. Everything else in the screen
//! is transport-agnostic; swap this type for a fixture-backed source and
//! nothing upstream changes.
//!
//! Failure classification follows the two classes the presenter knows how
//! to display: anything that prevents a usable payload (connect errors,
//! error statuses, an empty body) is transport, a payload that does not
//! parse into `Vec<User>` is decode.

use crate::model::User;
use async_trait::async_trait;
use tracing::debug;
use url::Url;
use viper_framework::{FetchError, FetchResult, Interactor};

/// Remote-backed data source for the users screen.
///
/// Holds one shared `reqwest::Client`; concurrent fetches reuse its
/// connection pool.
pub struct UsersInteractor {
    http: reqwest::Client,
    endpoint: Url,
}

impl UsersInteractor {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Interactor for UsersInteractor {
    type Entity = User;

    #[tracing::instrument(skip(self))]
    async fn fetch_all(&self) -> FetchResult<User> {
        debug!(url = %self.endpoint, "Requesting user directory");

        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(FetchError::transport)?
            .error_for_status()
            .map_err(FetchError::transport)?;

        let body = response.bytes().await.map_err(FetchError::transport)?;
        if body.is_empty() {
            // An empty 200 is a failed fetch, not a decode problem.
            return Err(FetchError::transport("empty response body"));
        }

        let users: Vec<User> = serde_json::from_slice(&body).map_err(FetchError::decode)?;
        debug!(count = users.len(), "Decoded user directory");
        Ok(users)
    }
}
