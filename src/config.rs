use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".relangrc.json";

/// Suffix of WinForms designer files, which never trigger the diagnostic.
pub const DESIGNER_FILE_SUFFIX: &str = ".Designer.cs";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignore_file_suffixes")]
    pub ignore_file_suffixes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Conditional compilation symbols used to pick `#if` branches.
    #[serde(default)]
    pub preprocessor_symbols: Vec<String>,
}

fn default_ignores() -> Vec<String> {
    ["**/bin/**", "**/obj/**"].map(String::from).to_vec()
}

fn default_ignore_file_suffixes() -> Vec<String> {
    vec![DESIGNER_FILE_SUFFIX.to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            includes: Vec::new(),
            ignore_file_suffixes: default_ignore_file_suffixes(),
            source_root: default_source_root(),
            preprocessor_symbols: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are invalid,
    /// or if `ignoreFileSuffixes` contains an empty entry (which would ignore every file).
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.ignore_file_suffixes.iter().any(|s| s.is_empty()) {
            anyhow::bail!("Empty entry in 'ignoreFileSuffixes'");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
