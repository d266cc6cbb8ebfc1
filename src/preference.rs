//! Remembered theme choice

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use particle_field::{ParseThemeError, Theme};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("theme preference at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("theme preference is corrupt: {0}")]
    Parse(#[from] ParseThemeError),
}

/// One-word file holding `light` or `dark`
#[derive(Debug, Clone)]
pub struct ThemePreference {
    path: Option<PathBuf>,
}

impl ThemePreference {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// `portfolio-backdrop/theme` under the platform config directory.
    /// Without one nothing is persisted.
    pub fn default_location() -> Self {
        Self {
            path: dirs::config_dir().map(|dir| dir.join("portfolio-backdrop").join("theme")),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The saved theme, or `None` if nothing has been saved
    pub fn load(&self) -> Result<Option<Theme>, PreferenceError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents.parse()?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PreferenceError::Io {
                path: path.clone(),
                source,
            }),
        }
    }

    pub fn save(&self, theme: Theme) -> Result<(), PreferenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| PreferenceError::Io {
            path: path.clone(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(path, theme.as_str()).map_err(io_err)?;
        log::debug!("Saved theme preference to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_no_preference() {
        let dir = TempDir::new().unwrap();
        let pref = ThemePreference::at(dir.path().join("theme"));
        assert!(pref.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let pref = ThemePreference::at(dir.path().join("nested").join("theme"));

        pref.save(Theme::Light).unwrap();
        assert_eq!(pref.load().unwrap(), Some(Theme::Light));

        pref.save(Theme::Dark).unwrap();
        assert_eq!(pref.load().unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme");
        fs::write(&path, "sepia").unwrap();

        let err = ThemePreference::at(&path).load().unwrap_err();
        assert!(matches!(err, PreferenceError::Parse(_)));
    }

    #[test]
    fn test_default_location_is_under_platform_config_dir() {
        let pref = ThemePreference::default_location();
        match dirs::config_dir() {
            Some(config) => {
                let path = pref.path().unwrap();
                assert!(path.starts_with(&config));
                assert!(path.ends_with(Path::new("portfolio-backdrop").join("theme")));
            }
            None => assert!(pref.path().is_none()),
        }
    }

    #[test]
    fn test_unset_location_is_inert() {
        let pref = ThemePreference { path: None };
        assert!(pref.save(Theme::Dark).is_ok());
        assert!(pref.load().unwrap().is_none());
    }
}
