// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const PROD: &str = "prod";
#[allow(dead_code)]
pub const DEV: &str = "dev";
#[allow(dead_code)]
pub const DEBUG: &str = "debug";
#[allow(dead_code)]
pub const TEST: &str = "test";

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "sketch")]
    pub sketch: SketchBox,
}

impl Clone for Settings {
    fn clone(&self) -> Self {
        // The admission flag is re-created so clones toggle independently.
        let mut sketch = self.sketch.clone();
        if let Some(ref mut admission) = sketch.admission {
            admission.is_enabled =
                Arc::new(AtomicBool::new(admission.is_enabled.load(Ordering::Relaxed)));
        }
        Self { sketch }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SketchBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub admission: Option<Admission>,
    pub stats: Option<Stats>,
    pub trace: Option<Trace>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Admission {
    pub enabled: bool,
    #[serde(skip)]
    pub is_enabled: Arc<AtomicBool>,
    #[serde(rename = "maximum_size")]
    pub maximum_size: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Stats {
    pub enabled: bool,
}

/// Synthetic workload replayed by the binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Trace {
    pub keys: Option<usize>,
    pub accesses: Option<usize>,
    pub skew: Option<f64>,
    pub seed: Option<u64>,
}

/// ConfigTrait defines the interface for configuration access.
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    fn is_debug(&self) -> bool;
    fn is_dev(&self) -> bool;
    fn admission(&self) -> Option<&Admission>;
    fn stats(&self) -> Option<&Stats>;
    fn trace(&self) -> Option<&Trace>;
}

// Config type alias for convenience
pub type Config = Settings;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.sketch.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.sketch.env == PROD
    }

    fn is_debug(&self) -> bool {
        self.sketch.env == DEBUG
    }

    fn is_dev(&self) -> bool {
        self.sketch.env == DEV
    }

    fn admission(&self) -> Option<&Admission> {
        self.sketch.admission.as_ref()
    }

    fn stats(&self) -> Option<&Stats> {
        self.sketch.stats.as_ref()
    }

    fn trace(&self) -> Option<&Trace> {
        self.sketch.trace.as_ref()
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        // Read file
        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::from_yaml(&data).with_context(|| format!("unmarshal yaml from {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(data: &str) -> Result<Self> {
        let mut cfg: Settings = serde_yaml::from_str(data).context("parse config yaml")?;

        // Initialize atomic fields
        if let Some(ref mut admission) = cfg.sketch.admission {
            admission.is_enabled = Arc::new(AtomicBool::new(admission.enabled));
        }

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if let Some(size) = self.admission().and_then(|a| a.maximum_size) {
            if size < 0 {
                anyhow::bail!("invalid admission.maximum_size {size}: must be non-negative");
            }
        }
        if let Some(skew) = self.trace().and_then(|t| t.skew) {
            if !(skew > 0.0 && skew <= 10.0) {
                anyhow::bail!("invalid trace.skew {skew}: must be in (0, 10]");
            }
        }
        Ok(())
    }
}

// Test config is always available for integration tests
mod test_config;
#[allow(dead_code)]
pub use test_config::new_test_config;
