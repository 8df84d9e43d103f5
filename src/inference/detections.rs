//! Raw detector output and best-candidate selection.

use crate::constants::detection::{CLASS_OFFSET, CONFIDENCE_OFFSET, ROW_LEN};
use crate::error::{Error, Result};

/// Class index tracked before any candidate has been accepted.
pub const NO_CLASS: i64 = -1;

/// Detector output, shape `[1, N, 6]`.
///
/// Each row holds four geometry values, a confidence score and a class index.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSet {
    data: Vec<f32>,
}

/// One candidate row of a [`DetectionSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Box geometry as emitted by the model. Not interpreted here.
    pub geometry: [f32; 4],
    /// Confidence score.
    pub confidence: f32,
    /// Class index, truncated toward zero.
    pub class_id: i64,
}

/// Winning candidate after a full scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestDetection {
    /// Highest confidence seen, `0.0` if nothing scored above zero.
    pub confidence: f32,
    /// Class index of that candidate, [`NO_CLASS`] if none.
    pub class_id: i64,
    /// Row the candidate came from.
    pub row: Option<usize>,
}

impl DetectionSet {
    /// Build from a runtime output tensor, validating the `[1, N, 6]` shape.
    pub fn from_raw(shape: &[i64], data: Vec<f32>) -> Result<Self> {
        let valid_shape = matches!(shape, [1, n, 6] if *n >= 0);
        if !valid_shape {
            return Err(Error::Inference {
                reason: format!("unexpected output shape {shape:?}, expected [1, N, {ROW_LEN}]"),
            });
        }

        let expected: i64 = shape.iter().product();
        if usize::try_from(expected).ok() != Some(data.len()) {
            return Err(Error::Inference {
                reason: format!(
                    "output holds {} values but shape {shape:?} needs {expected}",
                    data.len()
                ),
            });
        }

        Ok(Self { data })
    }

    /// Build from explicit rows.
    pub fn from_rows(rows: &[[f32; ROW_LEN]]) -> Self {
        Self {
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// A set of `rows` candidates with every value zero.
    pub fn zeros(rows: usize) -> Self {
        Self {
            data: vec![0.0; rows * ROW_LEN],
        }
    }

    /// Overwrite the confidence and class index of one row.
    ///
    /// Out-of-range rows are ignored.
    pub fn set(&mut self, row: usize, confidence: f32, class_id: f32) {
        if let Some(values) = self.data.chunks_exact_mut(ROW_LEN).nth(row) {
            values[CONFIDENCE_OFFSET] = confidence;
            values[CLASS_OFFSET] = class_id;
        }
    }

    /// Number of candidate rows.
    pub fn len(&self) -> usize {
        self.data.len() / ROW_LEN
    }

    /// Whether the set has no candidates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over candidate rows in model order.
    pub fn iter(&self) -> impl Iterator<Item = Detection> + '_ {
        self.data.chunks_exact(ROW_LEN).map(|row| Detection {
            geometry: [row[0], row[1], row[2], row[3]],
            confidence: row[CONFIDENCE_OFFSET],
            #[allow(clippy::cast_possible_truncation)]
            class_id: row[CLASS_OFFSET] as i64,
        })
    }

    /// Select the highest-confidence candidate.
    ///
    /// Only a strictly greater confidence replaces the current best, so the
    /// first row wins a tie. Rows at or below `0.0` never win.
    pub fn best(&self) -> BestDetection {
        let mut best = BestDetection {
            confidence: 0.0,
            class_id: NO_CLASS,
            row: None,
        };

        for (row, detection) in self.iter().enumerate() {
            if detection.confidence > best.confidence {
                best = BestDetection {
                    confidence: detection.confidence,
                    class_id: detection.class_id,
                    row: Some(row),
                };
            }
        }

        best
    }
}
