use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub production: ProductionConfig,
    pub generation: GenerationConfig,
}

/// Fixed facts about the production, substituted into every template.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductionConfig {
    pub world_view: String,
    pub main_conflict: String,
    pub main_character: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub scene_count: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    /// TOML content pack replacing the built-in vocabulary and templates.
    /// A relative path given in an explicit config file is resolved against
    /// that file's directory, otherwise against the working directory.
    #[serde(default)]
    pub content_pack: Option<PathBuf>,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            world_view: "赛博修真+量子江湖".to_string(),
            main_conflict: "传统异人界与AI觉醒者的终极对决".to_string(),
            main_character: "冯宝宝(纳米机甲版)".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            production: ProductionConfig::default(),
            generation: GenerationConfig {
                scene_count: crate::generator::DEFAULT_SCENE_COUNT,
                seed: None,
                content_pack: None,
            },
        }
    }
}

impl AppConfig {
    /// Layer defaults, a config file and `STORYBOARD_*` environment variables.
    ///
    /// Without an explicit `path`, `storyboard.{toml,json,yaml,...}` in the
    /// working directory is used when present.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let defaults = ProductionConfig::default();
        let mut builder = config::Config::builder()
            .set_default("production.world_view", defaults.world_view)?
            .set_default("production.main_conflict", defaults.main_conflict)?
            .set_default("production.main_character", defaults.main_character)?
            .set_default(
                "generation.scene_count",
                crate::generator::DEFAULT_SCENE_COUNT as i64,
            )?;

        builder = match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                builder.add_source(config::File::from(path).required(true))
            }
            None => builder.add_source(config::File::with_name("storyboard").required(false)),
        };

        // e.g. STORYBOARD_PRODUCTION__MAIN_CHARACTER=张楚岚
        let builder = builder.add_source(
            config::Environment::with_prefix("STORYBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;

        if let (Some(path), Some(pack)) = (path, config.generation.content_pack.as_mut()) {
            if pack.is_relative() {
                if let Some(dir) = path.parent() {
                    *pack = dir.join(&*pack);
                }
            }
        }

        Ok(config)
    }
}
