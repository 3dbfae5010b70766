// recognizer/mod.rs
//
// $P-style point-cloud recognition: normalization, cloud matching,
// and the template classifier built on top of them.

pub mod classifier;
pub mod cloud;
pub mod normalize;

pub use classifier::Classifier;
pub use cloud::PointCloud;
