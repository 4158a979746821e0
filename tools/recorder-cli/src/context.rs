//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::config::{RecorderConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: RecorderConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_path(&cwd, path);
                (RecorderConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (RecorderConfig::load(&path)?, Some(path)),
                None => (RecorderConfig::default(), None),
            },
        };

        match &config_path {
            Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
            None => tracing::debug!("no config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_path(&self.cwd, path)
    }
}

/// Find a config file in `start` or any parent directory.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("recorder.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join("recorder.toml")));
    }

    #[test]
    fn test_find_config_prefers_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("recorder.json"), "{}").unwrap();
        std::fs::write(dir.path().join("recorder.toml"), "").unwrap();

        assert_eq!(find_config(dir.path()), Some(dir.path().join("recorder.toml")));
    }

    #[test]
    fn test_resolve_path() {
        let cwd = PathBuf::from("/work");

        assert_eq!(resolve_path(&cwd, "out.html"), PathBuf::from("/work/out.html"));
        assert_eq!(resolve_path(&cwd, "/tmp/out.html"), PathBuf::from("/tmp/out.html"));
    }
}
