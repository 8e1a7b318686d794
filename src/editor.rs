/// Edit orchestration against the remote generation service
///
/// Sequences the four service calls for a single edit: project/layer
/// discovery, feature rankings, quantile levels, then generation with
/// the assembled interventions.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{EditError, Result};
use crate::intervention::build_ablations;
use crate::mask::{decode_result_payload, encode_mask_png, SelectionMask};
use crate::ranking::{select_top_k, UnitLevelTable, UnitScoreTable};
use crate::remote::wire::{GenerateRequest, Intervention, MaskPayload, RankingsResponse};
use crate::remote::GanServer;

/// Metric whose score series carry feature relevance
const RELEVANCE_METRIC: &str = "iou";

/// Suffix of feature score series names under the relevance metric
const RELEVANCE_SERIES_SUFFIX: &str = "-iou";

/// Settings for the edit pipeline.
///
/// Defaults reproduce the deployed setup: the churchoutdoor LSUN project,
/// the model's second layer, 0.99 quantile levels, and ten ablated units.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Root URL of the generation server
    pub base_url: String,
    /// Project whose images are edited
    pub project: String,
    /// Which of the project's declared layers to ablate
    pub layer_index: usize,
    /// Quantile at which ablation levels are queried
    pub quantile: f64,
    /// How many units to ablate per edit
    pub unit_count: usize,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            base_url: "http://34.74.168.113:5001".to_string(),
            project: "churchoutdoor_lsun".to_string(),
            layer_index: 1,
            quantile: 0.99,
            unit_count: 10,
            timeout: None,
        }
    }
}

/// Applies feature edits to generated images through an injected
/// service client.
pub struct Editor<S: GanServer> {
    server: S,
    config: EditorConfig,
}

impl<S: GanServer> Editor<S> {
    /// Create an editor over a service client and configuration.
    pub fn new(server: S, config: EditorConfig) -> Self {
        Editor { server, config }
    }

    /// Remove or attenuate a feature inside the masked region of an
    /// image, saving the regenerated result.
    ///
    /// # Arguments
    /// * `image_id` - Model image id (see the image catalog)
    /// * `feature` - Semantic feature to suppress, e.g. "grass"
    /// * `mask` - Region the edit applies to
    /// * `output_path` - Where the regenerated JPEG is written; must be
    ///   unique per request
    ///
    /// # Returns
    /// * `Ok(path)` - The saved file path
    /// * `Err(_)` - The first failing step's error, unretried
    pub fn apply(
        &self,
        image_id: usize,
        feature: &str,
        mask: &SelectionMask,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let layer = self.resolve_layer()?;

        let rankings = self.server.rankings(&self.config.project, &layer)?;
        let scores = feature_scores(&rankings, feature)?;

        let levels_response = self
            .server
            .levels(&self.config.project, &layer, self.config.quantile)?;
        let levels = UnitLevelTable::from_positional(&levels_response.res)?;

        let selected = select_top_k(&scores, self.config.unit_count);
        let ablations = build_ablations(&selected, &levels, &layer)?;

        println!(
            "🎯 Ablating {} units in {} to suppress {:?}",
            ablations.len(),
            layer,
            feature
        );

        let encoded_mask = encode_mask_png(mask)?;
        let request = GenerateRequest {
            ids: vec![image_id],
            interventions: vec![Intervention {
                ablations,
                mask: MaskPayload::from_base64_png(&encoded_mask),
            }],
            project: self.config.project.clone(),
            return_urls: 0,
        };

        let response = self.server.generate(&request)?;
        let payload = response
            .res
            .first()
            .map(|result| result.d.as_str())
            .ok_or_else(|| {
                EditError::RemoteService("generate response contained no results".to_string())
            })?;

        let image_bytes = decode_result_payload(payload)?;
        fs::write(output_path, &image_bytes).map_err(|source| EditError::WriteImage {
            path: output_path.to_path_buf(),
            source,
        })?;

        Ok(output_path.to_path_buf())
    }

    /// Resolve the configured layer of the service's first project.
    fn resolve_layer(&self) -> Result<String> {
        let projects = self.server.all_projects()?;

        let project = projects.first().ok_or_else(|| {
            EditError::RemoteService("service reported no projects".to_string())
        })?;

        project
            .info
            .layers
            .get(self.config.layer_index)
            .cloned()
            .ok_or_else(|| {
                EditError::RemoteService(format!(
                    "project declares {} layers, cannot use layer index {}",
                    project.info.layers.len(),
                    self.config.layer_index
                ))
            })
    }
}

/// Find the feature's relevance score series in a rankings response.
///
/// The series must carry the relevance metric and be named
/// `"<feature>-iou"`; a response without one is a [`EditError::FeatureNotFound`].
fn feature_scores(rankings: &RankingsResponse, feature: &str) -> Result<UnitScoreTable> {
    let series_name = format!("{feature}{RELEVANCE_SERIES_SUFFIX}");

    rankings
        .res
        .iter()
        .find(|series| series.metric == RELEVANCE_METRIC && series.name == series_name)
        .map(|series| UnitScoreTable::from_positional(series.scores.clone()))
        .ok_or_else(|| EditError::FeatureNotFound(feature.to_string()))
}
