use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::pipeline::services::image::ClassifierThresholds;

pub const DEFAULT_CONFIG_FILE: &str = "facade-style";
pub const ENV_PREFIX: &str = "FACADE_STYLE";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub blend_alpha: f32,
    pub seed: Option<u64>,
    pub log_level: String,
    pub parallel_classification: bool,
    pub classifier: ClassifierThresholds,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            blend_alpha: 0.5,
            seed: None,
            log_level: "info".to_string(),
            parallel_classification: true,
            classifier: ClassifierThresholds::default(),
        }
    }
}

impl Configuration {
    /// Defaults, then the config file, then `FACADE_STYLE_*` environment variables.
    ///
    /// Without an explicit path, `facade-style.toml` in the working directory is
    /// used when present. Nested keys use `__`, e.g. `FACADE_STYLE_CLASSIFIER__ROOF_MIN_ASPECT`.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_layered(path, environment())
    }

    fn load_layered(path: Option<&Path>, env: Environment) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_defaults() {
        let configuration = Configuration::default();
        assert_eq!(configuration.blend_alpha, 0.5);
        assert_eq!(configuration.seed, None);
        assert!(configuration.parallel_classification);
        assert_eq!(configuration.classifier, ClassifierThresholds::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("facade-{}.toml", Uuid::new_v4()));
        std::fs::write(
            &path,
            "blend_alpha = 0.25\nseed = 9\n\n[classifier]\nroof_min_aspect = 3.0\n",
        )
        .unwrap();

        let configuration = Configuration::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        let configuration = configuration.unwrap();

        assert_eq!(configuration.blend_alpha, 0.25);
        assert_eq!(configuration.seed, Some(9));
        assert_eq!(configuration.log_level, "info");
        assert_eq!(configuration.classifier.roof_min_aspect, 3.0);
        assert_eq!(configuration.classifier.roof_max_height, 0.15);
    }

    #[test]
    fn test_environment_overrides_file() {
        let path = std::env::temp_dir().join(format!("facade-{}.toml", Uuid::new_v4()));
        std::fs::write(
            &path,
            "blend_alpha = 0.25\nseed = 9\n\n[classifier]\nroof_min_aspect = 3.0\n",
        )
        .unwrap();

        let vars = [
            ("FACADE_STYLE_BLEND_ALPHA", "0.9"),
            ("FACADE_STYLE_CLASSIFIER__ROOF_MIN_ASPECT", "4.5"),
            ("OTHER_APP_BLEND_ALPHA", "0.1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let configuration = Configuration::load_layered(Some(&path), environment().source(Some(vars)));
        std::fs::remove_file(&path).unwrap();
        let configuration = configuration.unwrap();

        assert_eq!(configuration.blend_alpha, 0.9);
        assert_eq!(configuration.classifier.roof_min_aspect, 4.5);
        assert_eq!(configuration.seed, Some(9));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("absent-{}.toml", Uuid::new_v4()));
        assert!(Configuration::load(Some(&path)).is_err());
    }
}
