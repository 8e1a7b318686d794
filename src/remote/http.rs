/// Blocking HTTP implementation of the service client

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{EditError, Result};
use crate::remote::wire::{
    GenerateRequest, GenerateResponse, LevelsResponse, ProjectRecord, RankingsResponse,
};
use crate::remote::GanServer;

/// JSON-over-HTTP client for a netdissect generation server.
pub struct HttpGanServer {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpGanServer {
    /// Create a client for the server at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Server root, e.g. `http://127.0.0.1:5001`
    /// * `timeout` - Per-request timeout; `None` waits indefinitely
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EditError::RemoteService(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpGanServer {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a JSON endpoint with query parameters.
    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| EditError::RemoteService(format!("GET {path} failed: {e}")))?
            .error_for_status()
            .map_err(|e| EditError::RemoteService(format!("GET {path} failed: {e}")))?;

        response
            .json()
            .map_err(|e| EditError::RemoteService(format!("GET {path} returned bad JSON: {e}")))
    }
}

impl GanServer for HttpGanServer {
    fn all_projects(&self) -> Result<Vec<ProjectRecord>> {
        self.get_json("/api/all_projects", &[])
    }

    fn rankings(&self, project: &str, layer: &str) -> Result<RankingsResponse> {
        self.get_json(
            "/api/rankings",
            &[("project", project.to_string()), ("layer", layer.to_string())],
        )
    }

    fn levels(&self, project: &str, layer: &str, quantile: f64) -> Result<LevelsResponse> {
        self.get_json(
            "/api/levels",
            &[
                ("project", project.to_string()),
                ("layer", layer.to_string()),
                ("quantiles", quantile.to_string()),
            ],
        )
    }

    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let path = "/api/generate";
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| EditError::RemoteService(format!("POST {path} failed: {e}")))?
            .error_for_status()
            .map_err(|e| EditError::RemoteService(format!("POST {path} failed: {e}")))?;

        response
            .json()
            .map_err(|e| EditError::RemoteService(format!("POST {path} returned bad JSON: {e}")))
    }
}
