/// Wire types for the generation service's JSON API

use serde::{Deserialize, Serialize};

use crate::intervention::Ablation;
use crate::mask::PNG_DATA_URI_PREFIX;

// ========== Responses ==========

/// One project entry from `GET /api/all_projects`.
///
/// The service reports more metadata per project; only the layer list is
/// consumed here.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    /// Project metadata
    pub info: ProjectInfo,
}

/// Metadata block of a project record.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    /// Layer identifiers declared by the project, in model order
    pub layers: Vec<String>,
}

/// Response body of `GET /api/rankings`.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingsResponse {
    /// All ranking series for the requested layer
    pub res: Vec<RankingSeries>,
}

/// One score series within a rankings response.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingSeries {
    /// Metric the series was computed with (e.g. "iou")
    pub metric: String,
    /// Series name, `"<feature>-iou"` for feature relevance series
    pub name: String,
    /// Per-unit scores, positional by unit index
    #[serde(default)]
    pub scores: Vec<f64>,
}

/// Response body of `GET /api/levels`: one row per unit, one column per
/// requested quantile.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelsResponse {
    /// Per-unit quantile levels, positional by unit index
    pub res: Vec<Vec<f64>>,
}

/// Response body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// One entry per requested image id
    pub res: Vec<GeneratedImage>,
}

/// A single generated image result.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedImage {
    /// The image as a base64 data URI
    pub d: String,
}

// ========== Requests ==========

/// Request body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model image ids to regenerate
    pub ids: Vec<usize>,
    /// Interventions applied during regeneration
    pub interventions: Vec<Intervention>,
    /// Project the ids belong to
    pub project: String,
    /// 0 = return images inline as data URIs rather than URLs
    pub return_urls: u8,
}

/// One intervention: a set of unit ablations restricted to a mask region.
#[derive(Debug, Clone, Serialize)]
pub struct Intervention {
    /// Unit ablations describing which units to force and to what value
    pub ablations: Vec<Ablation>,
    /// The region the user selected for the edit
    pub mask: MaskPayload,
}

/// The mask as the service expects it: a PNG data URI with unused
/// bounds/shape fields left empty.
#[derive(Debug, Clone, Serialize)]
pub struct MaskPayload {
    /// Unused by this client, sent empty
    pub bitbounds: Vec<u32>,
    /// `data:image/png;base64,<encoded mask>`
    pub bitstring: String,
    /// Unused by this client, sent empty
    pub shape: Vec<u32>,
}

impl MaskPayload {
    /// Wrap an already base64-encoded mask PNG into a payload.
    pub fn from_base64_png(encoded: &str) -> Self {
        MaskPayload {
            bitbounds: Vec::new(),
            bitstring: format!("{PNG_DATA_URI_PREFIX}{encoded}"),
            shape: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_project_list() {
        let body = json!([
            {
                "info": { "layers": ["layer2", "layer4"], "dataset": "lsun" },
                "dir": "churchoutdoor"
            }
        ]);

        let projects: Vec<ProjectRecord> = serde_json::from_value(body).unwrap();
        assert_eq!(projects[0].info.layers, vec!["layer2", "layer4"]);
    }

    #[test]
    fn test_deserialize_rankings() {
        let body = json!({
            "res": [
                { "metric": "iou", "name": "grass-iou", "scores": [-0.5, -0.25] },
                { "metric": "error", "name": "miou", "scores": [] },
            ]
        });

        let rankings: RankingsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(rankings.res.len(), 2);
        assert_eq!(rankings.res[0].scores, vec![-0.5, -0.25]);
    }

    #[test]
    fn test_deserialize_rankings_without_scores() {
        let body = json!({
            "res": [{ "metric": "iou", "name": "sky-iou" }]
        });

        let rankings: RankingsResponse = serde_json::from_value(body).unwrap();
        assert!(rankings.res[0].scores.is_empty());
    }

    #[test]
    fn test_serialize_generate_request() {
        let request = GenerateRequest {
            ids: vec![104],
            interventions: vec![Intervention {
                ablations: vec![Ablation {
                    alpha: 1,
                    layer: "layer4".to_string(),
                    unit: 7,
                    value: 2.5,
                }],
                mask: MaskPayload::from_base64_png("AAAA"),
            }],
            project: "churchoutdoor_lsun".to_string(),
            return_urls: 0,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "ids": [104],
                "interventions": [{
                    "ablations": [{ "alpha": 1, "layer": "layer4", "unit": 7, "value": 2.5 }],
                    "mask": {
                        "bitbounds": [],
                        "bitstring": "data:image/png;base64,AAAA",
                        "shape": [],
                    },
                }],
                "project": "churchoutdoor_lsun",
                "return_urls": 0,
            })
        );
    }
}
