pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod assets;
pub mod recognizer;
pub mod session;

// Re-export key types at crate root for convenience
pub use api::config::{ClassifierConfig, EngineConfig, Matching, RotationSearch, SessionConfig};
pub use api::types::{Classification, Recognition};
pub use assets::templates::{TemplateFile, TemplateStore};
pub use core::point::{Gesture, Point, Stroke};
pub use core::time::{Countdown, Stopwatch};
pub use error::{RecognizeError, TemplateError};
pub use input::queue::{InputEvent, InputQueue};
pub use recognizer::{Classifier, PointCloud};
pub use session::{CaptureSession, SessionState, SimpleSession, SplitSession, Zone, ZoneColor};
