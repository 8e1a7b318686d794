/// Ablation directives sent to the generation service
///
/// Each selected unit becomes one directive forcing that unit's
/// activation to its quantile level inside the masked region.

use serde::Serialize;

use crate::error::{EditError, Result};
use crate::ranking::{UnitId, UnitLevelTable};

/// Blend weight applied to every ablation (the service expects full strength)
const ABLATION_ALPHA: u32 = 1;

/// A single unit ablation, serialized verbatim into the generate request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ablation {
    /// Blend weight, always 1
    pub alpha: u32,
    /// Layer the unit belongs to
    pub layer: String,
    /// Unit index within the layer
    pub unit: UnitId,
    /// Activation value the unit is forced to
    pub value: f64,
}

/// Build one ablation directive per selected unit, in selection order.
///
/// Magnitudes are looked up by unit index in the level table, so the
/// score and level tables cannot silently disagree on unit ordering.
///
/// # Returns
/// * `Err(EditError::RemoteService)` - The level table does not cover a selected unit
pub fn build_ablations(
    selected: &[UnitId],
    levels: &UnitLevelTable,
    layer: &str,
) -> Result<Vec<Ablation>> {
    selected
        .iter()
        .map(|&unit| {
            let value = levels.get(unit).ok_or_else(|| {
                EditError::RemoteService(format!("levels response has no entry for unit {unit}"))
            })?;

            Ok(Ablation {
                alpha: ABLATION_ALPHA,
                layer: layer.to_string(),
                unit,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_levels() -> UnitLevelTable {
        UnitLevelTable::from_positional(&[vec![0.1], vec![1.1], vec![2.1], vec![3.1]]).unwrap()
    }

    #[test]
    fn test_one_directive_per_unit_in_selection_order() {
        let ablations = build_ablations(&[2, 0, 3], &sample_levels(), "layer4").unwrap();

        assert_eq!(ablations.len(), 3);
        assert_eq!(
            ablations.iter().map(|a| a.unit).collect::<Vec<_>>(),
            vec![2, 0, 3]
        );
        assert_eq!(
            ablations.iter().map(|a| a.value).collect::<Vec<_>>(),
            vec![2.1, 0.1, 3.1]
        );
        assert!(ablations.iter().all(|a| a.alpha == 1));
        assert!(ablations.iter().all(|a| a.layer == "layer4"));
    }

    #[test]
    fn test_missing_level_is_an_error() {
        let result = build_ablations(&[0, 9], &sample_levels(), "layer4");
        assert!(matches!(result, Err(EditError::RemoteService(_))));
    }

    #[test]
    fn test_wire_format() {
        let ablations = build_ablations(&[1], &sample_levels(), "layer4").unwrap();

        let json = serde_json::to_value(&ablations[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "alpha": 1,
                "layer": "layer4",
                "unit": 1,
                "value": 1.1,
            })
        );
    }
}
