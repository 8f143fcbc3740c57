//! Scorer configuration and confidence source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::report::DEFAULT_MODEL_VERSION;
use crate::traits::{ConfidenceSource, MidpointConfidence, RandomConfidence};

/// How the confidence level is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceMode {
    /// Uniform jitter inside the risk level's band.
    #[default]
    Random,
    /// Fixed band midpoint.
    Midpoint,
}

/// Top-level cogrisk configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Confidence source.
    #[serde(default)]
    pub confidence: ConfidenceMode,
    /// Seed for random confidence (None = OS entropy).
    #[serde(default)]
    pub seed: Option<u64>,
    /// Version recorded in reports.
    #[serde(default = "default_model_version")]
    pub model_version: String,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_model_version() -> String {
    DEFAULT_MODEL_VERSION.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./cogrisk-reports")
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            confidence: ConfidenceMode::default(),
            seed: None,
            model_version: default_model_version(),
            output_dir: default_output_dir(),
        }
    }
}

/// Expand `${VAR_NAME}` references from the environment. Unset variables
/// expand to nothing. Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut resolved = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find("${") {
        let Some(len) = rest[open + 2..].find('}') else {
            break;
        };
        let name = &rest[open + 2..open + 2 + len];
        resolved.push_str(&rest[..open]);
        resolved.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[open + 3 + len..];
    }
    resolved.push_str(rest);
    resolved
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `cogrisk.toml` in the current directory
/// 2. `~/.config/cogrisk/config.toml`
///
/// Environment variable override: `COGRISK_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<ScorerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cogrisk.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ScorerConfig::default(),
    };

    if let Ok(seed) = std::env::var("COGRISK_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("COGRISK_SEED must be an unsigned integer, got '{seed}'"))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

/// Parse a config document and expand `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<ScorerConfig> {
    let mut config: ScorerConfig = toml::from_str(content)?;
    config.model_version = resolve_env_vars(&config.model_version);
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cogrisk"))
}

/// Create the confidence source a configuration asks for.
pub fn create_confidence_source(config: &ScorerConfig) -> Box<dyn ConfidenceSource> {
    match (config.confidence, config.seed) {
        (ConfidenceMode::Midpoint, _) => Box::new(MidpointConfidence),
        (ConfidenceMode::Random, Some(seed)) => {
            tracing::debug!(seed, "using seeded confidence jitter");
            Box::new(RandomConfidence::seeded(seed))
        }
        (ConfidenceMode::Random, None) => Box::new(RandomConfidence::from_entropy()),
    }
}
