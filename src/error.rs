use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("vocabulary must contain at least one entry")]
    EmptyVocabulary,

    #[error("template `{template}` references unknown placeholder `{{{placeholder}}}`")]
    UnknownPlaceholder {
        template: &'static str,
        placeholder: String,
    },

    #[error("template `{template}` must reference `{{{placeholder}}}`")]
    MissingPlaceholder {
        template: &'static str,
        placeholder: &'static str,
    },

    #[error("vocabulary `{vocabulary}` entry {entry:?} contains the motion separator")]
    SeparatorInEntry {
        vocabulary: &'static str,
        entry: String,
    },

    #[error("Failed to read content pack {}: {source}", .path.display())]
    PackRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse content pack: {0}")]
    PackParse(#[from] toml::de::Error),

    #[error("Failed to serialize content pack: {0}")]
    PackSerialize(#[from] toml::ser::Error),

    #[error("Failed to encode content pack: {0}")]
    PackEncode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
