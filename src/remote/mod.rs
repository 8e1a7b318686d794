/// The remote generation service boundary
///
/// The orchestrator talks to the service through the [`GanServer`] trait
/// so tests can substitute an in-memory implementation for the HTTP one.

mod http;
pub mod wire;

pub use http::HttpGanServer;

use crate::error::Result;
use wire::{GenerateRequest, GenerateResponse, LevelsResponse, ProjectRecord, RankingsResponse};

/// Client interface to the generation service's four endpoints.
///
/// All calls are synchronous and blocking; failures propagate immediately
/// with no retries.
pub trait GanServer {
    /// List all projects hosted by the service.
    fn all_projects(&self) -> Result<Vec<ProjectRecord>>;

    /// Fetch per-unit ranking series for a project layer.
    fn rankings(&self, project: &str, layer: &str) -> Result<RankingsResponse>;

    /// Fetch per-unit activation levels at a quantile for a project layer.
    fn levels(&self, project: &str, layer: &str, quantile: f64) -> Result<LevelsResponse>;

    /// Regenerate images with the given interventions applied.
    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
}

impl<S: GanServer + ?Sized> GanServer for &S {
    fn all_projects(&self) -> Result<Vec<ProjectRecord>> {
        (**self).all_projects()
    }

    fn rankings(&self, project: &str, layer: &str) -> Result<RankingsResponse> {
        (**self).rankings(project, layer)
    }

    fn levels(&self, project: &str, layer: &str, quantile: f64) -> Result<LevelsResponse> {
        (**self).levels(project, layer, quantile)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        (**self).generate(request)
    }
}
