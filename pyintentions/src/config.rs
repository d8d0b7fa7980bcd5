use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, DEFAULT_TYPING_MODULES, PYPROJECT_FILENAME};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[pyintentions]` section.
    pub pyintentions: PyIntentionsConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

/// Quote character for string literals the engine writes from scratch.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

impl QuoteStyle {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for pyintentions.
pub struct PyIntentionsConfig {
    /// Quotes for new `__all__` entries when no existing entry shows a style.
    pub quote_style: Option<QuoteStyle>,
    /// Modules whose `Optional` and `Union` are recognized.
    pub typing_modules: Option<Vec<String>>,
    /// Treat an unbound `Optional`/`Union` name as the typing symbol.
    pub assume_unbound_typing: Option<bool>,
}

/// Resolved options handed to the rewriting core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Quotes for `__all__` entries written from scratch.
    pub quote_style: QuoteStyle,
    /// Modules whose `Optional` and `Union` count as the typing symbols.
    pub typing_modules: Vec<String>,
    /// An unbound `Optional`/`Union` is taken to be the typing symbol.
    pub assume_unbound_typing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quote_style: QuoteStyle::default(),
            typing_modules: DEFAULT_TYPING_MODULES
                .iter()
                .map(|module| (*module).to_owned())
                .collect(),
            assume_unbound_typing: true,
        }
    }
}

impl Settings {
    /// Whether `module` provides the typing symbols.
    #[must_use]
    pub fn is_typing_module(&self, module: &str) -> bool {
        self.typing_modules.iter().any(|candidate| candidate == module)
    }
}

#[derive(Debug, Deserialize, Clone)]
struct PyProject {
    tool: ToolConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct ToolConfig {
    pyintentions: PyIntentionsConfig,
}

impl Config {
    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let own_toml = current.join(CONFIG_FILENAME);
            if own_toml.exists() {
                if let Ok(content) = fs::read_to_string(&own_toml) {
                    match toml::from_str::<Config>(&content) {
                        Ok(mut config) => {
                            config.config_file_path = Some(own_toml);
                            return config;
                        }
                        Err(err) => {
                            tracing::warn!(path = %own_toml.display(), "ignoring invalid config: {err}");
                        }
                    }
                }
            }

            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if pyproject_toml.exists() {
                if let Ok(content) = fs::read_to_string(&pyproject_toml) {
                    if let Ok(pyproject) = toml::from_str::<PyProject>(&content) {
                        return Config {
                            pyintentions: pyproject.tool.pyintentions,
                            config_file_path: Some(pyproject_toml),
                        };
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// Folds the loaded options over the defaults.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        let options = &self.pyintentions;
        Settings {
            quote_style: options.quote_style.unwrap_or(defaults.quote_style),
            typing_modules: options
                .typing_modules
                .clone()
                .unwrap_or(defaults.typing_modules),
            assume_unbound_typing: options
                .assume_unbound_typing
                .unwrap_or(defaults.assume_unbound_typing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.config_file_path.is_none());
        assert_eq!(config.settings(), Settings::default());
    }

    #[test]
    fn test_load_from_path_own_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(".pyintentions.toml")).unwrap();
        writeln!(
            file,
            r#"[pyintentions]
quote_style = "single"
assume_unbound_typing = false
"#
        )
        .unwrap();

        let settings = Config::load_from_path(dir.path()).settings();
        assert_eq!(settings.quote_style, QuoteStyle::Single);
        assert!(!settings.assume_unbound_typing);
        assert!(settings.is_typing_module("typing_extensions"));
    }

    #[test]
    fn test_load_from_path_pyproject_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("pyproject.toml")).unwrap();
        writeln!(
            file,
            r#"[tool.pyintentions]
typing_modules = ["typing", "mytyping"]
"#
        )
        .unwrap();

        let settings = Config::load_from_path(dir.path()).settings();
        assert!(settings.is_typing_module("mytyping"));
        assert!(!settings.is_typing_module("typing_extensions"));
    }

    #[test]
    fn test_pyproject_without_section_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "[project]\nname = \"x\"\n").unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_load_from_path_traverses_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("pkg");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(".pyintentions.toml"),
            "[pyintentions]\nquote_style = \"single\"\n",
        )
        .unwrap();

        let py_file = nested.join("mod.py");
        std::fs::write(&py_file, "x = 1").unwrap();

        let config = Config::load_from_path(&py_file);
        assert_eq!(config.settings().quote_style, QuoteStyle::Single);
    }
}
