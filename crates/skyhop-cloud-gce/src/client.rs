//! compute/v1 REST client
//!
//! Thin HTTP layer: URL building, bearer auth, 404-to-`None` mapping
//! and error-body parsing. Request bodies are composed in
//! [`crate::provider`].

use serde::de::DeserializeOwned;

use crate::error::{GceError, Result};
use crate::models::{WireErrorBody, WireOperation};

const COMPUTE_API_BASE: &str = "https://compute.googleapis.com/compute/v1";

/// Authenticated client for one project.
///
/// The access token is acquired externally (e.g.
/// `gcloud auth print-access-token` or the instance metadata service
/// when running inside a relayed VM); this client only attaches it.
pub struct GceClient {
    http: reqwest::Client,
    base_url: String,
    project: String,
    token: String,
}

impl GceClient {
    pub fn new(project: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: COMPUTE_API_BASE.to_string(),
            project: project.into(),
            token: access_token.into(),
        }
    }

    /// Point the client at a different API root (stub servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// URL under this client's own project.
    pub(crate) fn project_url(&self, path: &str) -> String {
        format!("{}/projects/{}/{}", self.base_url, self.project, path)
    }

    /// URL under an arbitrary project (public image projects).
    pub(crate) fn foreign_project_url(&self, project: &str, path: &str) -> String {
        format!("{}/projects/{}/{}", self.base_url, project, path)
    }

    /// GET returning `None` on a not-found answer. Any other
    /// non-success status is an error.
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        Ok(Some(response.json::<T>().await?))
    }

    /// GET where absence is a provider failure, not reconcilable state.
    pub(crate) async fn get_required<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        match self.get_optional(url).await? {
            Some(value) => Ok(value),
            None => Err(GceError::Api {
                status: 404,
                message: format!("not found: {url}"),
            }),
        }
    }

    /// POST a mutating call; every such endpoint answers with an
    /// operation to poll.
    pub(crate) async fn post_operation(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<WireOperation> {
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Turn a non-success response into [`GceError::Api`], pulling the
/// message out of the standard error envelope when it parses.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<WireErrorBody>(&text)
        .ok()
        .and_then(|body| body.error)
        .map(|detail| detail.message)
        .filter(|message| !message.is_empty())
        .unwrap_or(text);

    Err(GceError::Api {
        status: code,
        message,
    })
}
