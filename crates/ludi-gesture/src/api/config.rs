use serde::{Deserialize, Serialize};

/// How candidate points are paired with template points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matching {
    /// Each candidate point takes the closest template point not yet used.
    #[default]
    Greedy,
    /// Point `i` is paired with template point `i`. Cheaper, order-sensitive.
    Indexed,
}

/// Bounds for the golden-section search over candidate rotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSearch {
    /// Search covers `[-max_angle_deg, +max_angle_deg]`.
    pub max_angle_deg: f32,
    /// Stop once the bracket is narrower than this.
    pub threshold_deg: f32,
}

impl Default for RotationSearch {
    fn default() -> Self {
        Self {
            max_angle_deg: 45.0,
            threshold_deg: 2.0,
        }
    }
}

/// Normalization and matching parameters shared by templates and candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Points per gesture after resampling (default: 32).
    pub resample_points: usize,
    /// Side of the square reference box gestures are scaled into (default: 1.0).
    pub reference_size: f32,
    /// Candidates with fewer samples are never classified (default: 10).
    pub min_points: usize,
    /// Point pairing strategy (default: greedy).
    pub matching: Matching,
    /// Rotation alignment; `None` compares at angle 0 only.
    pub rotation: Option<RotationSearch>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            resample_points: 32,
            reference_size: 1.0,
            min_points: 10,
            matching: Matching::Greedy,
            rotation: Some(RotationSearch::default()),
        }
    }
}

impl ClassifierConfig {
    /// Half the diagonal of the reference box; the distance at which the
    /// confidence score reaches zero.
    pub fn half_diagonal(&self) -> f32 {
        0.5 * (2.0 * self.reference_size * self.reference_size).sqrt()
    }

    /// Replace values that would make every score meaningless with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.resample_points < 2 {
            log::warn!(
                "resample_points {} is too small, using {}",
                self.resample_points,
                defaults.resample_points
            );
            self.resample_points = defaults.resample_points;
        }
        if !(self.reference_size.is_finite() && self.reference_size > 0.0) {
            log::warn!(
                "reference_size {} is not positive, using {}",
                self.reference_size,
                defaults.reference_size
            );
            self.reference_size = defaults.reference_size;
        }
        self
    }
}

/// Timing and filtering for a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds of inactivity before buffered strokes are classified.
    pub recognition_delay: f32,
    /// Split-zone strokes shorter than this are dropped as taps (default: 3).
    pub min_stroke_points: usize,
    /// Lockout after a successful recognition (default: 0, i.e. next update).
    pub success_cleanup_delay: f32,
    /// Lockout after a failed recognition, so feedback stays visible.
    pub failure_cleanup_delay: f32,
    /// Input stays ignored this long after a suspension ends (default: 0.2).
    pub resume_cooldown: f32,
}

impl SessionConfig {
    pub fn single_zone() -> Self {
        Self {
            recognition_delay: 3.0,
            min_stroke_points: 3,
            success_cleanup_delay: 0.0,
            failure_cleanup_delay: 1.0,
            resume_cooldown: 0.2,
        }
    }

    pub fn split_zone() -> Self {
        Self {
            recognition_delay: 2.0,
            failure_cleanup_delay: 2.5,
            ..Self::single_zone()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::single_zone()
    }
}

fn default_split() -> SessionConfig {
    SessionConfig::split_zone()
}

/// Complete engine configuration, usually loaded from a JSON file.
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub simple: SessionConfig,
    #[serde(default = "default_split")]
    pub split: SessionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            simple: SessionConfig::single_zone(),
            split: SessionConfig::split_zone(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
