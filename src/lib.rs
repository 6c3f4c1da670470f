pub mod config;
pub mod error;
pub mod generator;
pub mod showcase;
pub mod storyboard;
pub mod table;
pub mod templates;
pub mod vocabulary;

pub use config::{AppConfig, ProductionConfig};
pub use error::{GeneratorError, Result};
pub use generator::{ContentGenerator, ImagePrompt};
pub use storyboard::{ShotRecord, Storyboard};
pub use table::GridTable;
pub use vocabulary::{ContentPack, Vocabulary};
