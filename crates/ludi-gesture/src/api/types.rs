use serde::Serialize;

/// Best template match for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Label of the closest template.
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f32,
    /// Mean matched point distance, in reference-box units.
    pub distance: f32,
    /// Position of the winning template in the store.
    pub template_index: usize,
}

/// What a capture session reports back to the game after classifying.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recognition {
    /// Recognized label; for split-zone input, the left and right labels joined.
    pub label: String,
    /// `label` parsed as an integer, if it is one.
    pub number: Option<i64>,
    /// Confidence in `[0, 1]`. The weakest zone for split-zone input.
    pub score: f32,
    /// Whether the number matched the expected answer (or, with no answer
    /// set, whether a number was recognized at all).
    pub succeeded: bool,
    /// Per-zone classifications, left to right. One entry for single-zone input.
    pub parts: Vec<Classification>,
}

impl Recognition {
    pub(crate) fn from_parts(parts: Vec<Classification>, expected: Option<i64>) -> Self {
        let label: String = parts.iter().map(|c| c.label.as_str()).collect();
        let score = parts
            .iter()
            .map(|c| c.score)
            .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |a| a.min(s))))
            .unwrap_or(0.0);
        let number = label.trim().parse::<i64>().ok();
        let succeeded = match (number, expected) {
            (Some(n), Some(answer)) => n == answer,
            (Some(_), None) => true,
            (None, _) => false,
        };
        Self {
            label,
            number,
            score,
            succeeded,
            parts,
        }
    }

    /// A recognition that could not be carried out (e.g. no templates).
    pub(crate) fn failed() -> Self {
        Self {
            label: String::new(),
            number: None,
            score: 0.0,
            succeeded: false,
            parts: Vec::new(),
        }
    }
}
