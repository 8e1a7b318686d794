/// Per-unit relevance scores and ablation levels
///
/// The remote service reports both tables as positional arrays indexed by
/// unit. They are re-keyed by unit index here so that selection and level
/// lookup can never drift apart on ordering.

use std::collections::BTreeMap;

use crate::error::{EditError, Result};

/// Index of an ablatable unit within the chosen model layer
pub type UnitId = usize;

/// Relevance scores for every unit of a layer, keyed by unit index.
///
/// Scores follow the service's inverted convention: more negative means
/// more relevant to the feature being suppressed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitScoreTable {
    entries: Vec<(UnitId, f64)>,
}

impl UnitScoreTable {
    /// Build a score table from the service's positional score array,
    /// where array position is the unit index.
    pub fn from_positional(scores: Vec<f64>) -> Self {
        UnitScoreTable {
            entries: scores.into_iter().enumerate().collect(),
        }
    }

    /// Iterate over (unit, score) pairs in ascending unit order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of units in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ablation magnitudes at the requested quantile, keyed by unit index.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitLevelTable {
    levels: BTreeMap<UnitId, f64>,
}

impl UnitLevelTable {
    /// Build a level table from the service's positional response, one
    /// row per unit with the requested quantile in the first column.
    ///
    /// # Returns
    /// * `Err(EditError::RemoteService)` - A unit's row had no columns
    pub fn from_positional(rows: &[Vec<f64>]) -> Result<Self> {
        let mut levels = BTreeMap::new();

        for (unit, row) in rows.iter().enumerate() {
            let level = row.first().copied().ok_or_else(|| {
                EditError::RemoteService(format!("levels response row for unit {unit} is empty"))
            })?;
            levels.insert(unit, level);
        }

        Ok(UnitLevelTable { levels })
    }

    /// Ablation magnitude for a unit, if the table covers it.
    pub fn get(&self, unit: UnitId) -> Option<f64> {
        self.levels.get(&unit).copied()
    }

    /// Number of units in the table.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Select the k lowest-scoring units from a score table.
///
/// Maintains a bounded working set rather than sorting the whole table:
/// every candidate is accepted until the set holds k members; after that
/// a candidate replaces the current maximum member only when its score is
/// strictly smaller. Ties at the boundary never displace an existing
/// member, and the replaced slot is the first occurrence of the maximum.
///
/// The returned units are in insertion order of the final working set,
/// not sorted by score. A table with fewer than k entries yields all of
/// its units.
pub fn select_top_k(scores: &UnitScoreTable, k: usize) -> Vec<UnitId> {
    if k == 0 {
        return Vec::new();
    }

    let mut kept_scores: Vec<f64> = Vec::with_capacity(k);
    let mut kept_units: Vec<UnitId> = Vec::with_capacity(k);

    for (unit, score) in scores.iter() {
        if kept_units.len() < k {
            kept_scores.push(score);
            kept_units.push(unit);
            continue;
        }

        // First occurrence of the current maximum
        let mut max_index = 0;
        for i in 1..kept_scores.len() {
            if kept_scores[i] > kept_scores[max_index] {
                max_index = i;
            }
        }

        if score < kept_scores[max_index] {
            kept_scores[max_index] = score;
            kept_units[max_index] = unit;
        }
    }

    kept_units
}
