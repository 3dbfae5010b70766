use std::path::PathBuf;

/// Why the classifier refused a candidate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognizeError {
    #[error("candidate has {found} points, at least {required} are needed")]
    TooFewPoints { found: usize, required: usize },
    #[error("no templates loaded")]
    NoTemplates,
}

/// A template resource that could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template {name} is not valid gesture JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("template {name} contains no points")]
    Empty { name: String },
}
