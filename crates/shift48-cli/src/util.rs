use std::{fs::File, io, path::Path};

use anyhow::Context;
use log::warn;
use shift48_engine::GameConfig;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Loads the game configuration, falling back to the built-in defaults when
/// no path is given or the file cannot be read. Unspecified fields inherit
/// their defaults during deserialization.
pub fn load_config(path: Option<&Path>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    match read_json_file("config", path) {
        Ok(config) => config,
        Err(err) => {
            warn!("using default configuration: {err:#}");
            GameConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shift48-config-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn no_config_path_yields_defaults() {
        assert_eq!(load_config(None), GameConfig::default());
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        assert_eq!(load_config(Some(&path)), GameConfig::default());
    }

    #[test]
    fn corrupt_config_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        assert_eq!(load_config(Some(&path)), GameConfig::default());
    }

    #[test]
    fn valid_config_file_overrides_defaults() {
        let path = temp_path("valid");
        fs::write(&path, r#"{ "undo_budget": 9 }"#).unwrap();

        let config = load_config(Some(&path));
        assert_eq!(config.undo_budget, 9);
        assert_eq!(config.easy, GameConfig::default().easy);
    }
}
