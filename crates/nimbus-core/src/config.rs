//! Configuration for the demo pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use nimbus_inference::{ExecutionProvider, OptimizationLevel, SessionOptions};

/// Main configuration for the nimbus demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Path to the ONNX model file.
    pub model_path: PathBuf,

    /// Path to the surface-variables NPY file.
    pub surface_path: PathBuf,

    /// Path to the upper-air-variables NPY file.
    pub upper_path: PathBuf,

    /// Session creation settings.
    pub session: SessionSettings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/weather.onnx"),
            surface_path: PathBuf::from("data/input_surface.npy"),
            upper_path: PathBuf::from("data/input_upper.npy"),
            session: SessionSettings::default(),
        }
    }
}

/// Serializable session settings, converted to [`SessionOptions`] at session
/// creation time. There is no ambient global equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Execution provider name.
    pub execution_provider: ProviderSetting,

    /// Intra-op worker parallelism hint.
    pub intra_threads: usize,

    /// Graph optimization level, 0 (disabled) through 3 (full).
    pub optimization_level: u8,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            execution_provider: ProviderSetting::Cpu,
            intra_threads: 4,
            optimization_level: 3,
        }
    }
}

/// Recognized execution providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSetting {
    Cpu,
    Xnnpack,
}

impl SessionSettings {
    /// Convert to the inference layer's options. Levels above 3 are treated
    /// as full optimization.
    pub fn to_options(&self) -> SessionOptions {
        SessionOptions {
            execution_provider: match self.execution_provider {
                ProviderSetting::Cpu => ExecutionProvider::Cpu,
                ProviderSetting::Xnnpack => ExecutionProvider::Xnnpack,
            },
            intra_threads: self.intra_threads,
            optimization_level: match self.optimization_level {
                0 => OptimizationLevel::Disabled,
                1 => OptimizationLevel::Basic,
                2 => OptimizationLevel::Extended,
                _ => OptimizationLevel::Full,
            },
        }
    }
}

impl DemoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DemoConfig::default();
        config.session.execution_provider = ProviderSetting::Xnnpack;
        config.session.intra_threads = 2;
        config.save(&path).unwrap();

        let loaded = DemoConfig::from_file(&path).unwrap();
        assert_eq!(loaded.session, config.session);
        assert_eq!(loaded.model_path, config.model_path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: DemoConfig =
            serde_json::from_str(r#"{"model_path": "custom.onnx"}"#).unwrap();
        assert_eq!(parsed.model_path, PathBuf::from("custom.onnx"));
        assert_eq!(parsed.session, SessionSettings::default());
    }

    #[test]
    fn test_to_options_levels() {
        let mut settings = SessionSettings::default();
        assert_eq!(
            settings.to_options().optimization_level,
            OptimizationLevel::Full
        );
        settings.optimization_level = 0;
        assert_eq!(
            settings.to_options().optimization_level,
            OptimizationLevel::Disabled
        );
        settings.optimization_level = 9;
        assert_eq!(
            settings.to_options().optimization_level,
            OptimizationLevel::Full
        );
    }
}
