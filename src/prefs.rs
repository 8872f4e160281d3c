//! Sled-based preference store.
//!
//! One persisted key-value pair: the UI theme. Read at startup, written on
//! every toggle.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("database error: {0}")]
    DbError(#[from] sled::Error),
}

const THEME_KEY: &[u8] = b"theme";

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Stable on-disk and on-screen name
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_bytes(bytes: &[u8]) -> Option<Theme> {
        match bytes {
            b"light" => Some(Theme::Light),
            b"dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other} (expected light or dark)")),
        }
    }
}

/// Preference store backed by sled.
pub struct Prefs {
    db: sled::Db,
}

impl Prefs {
    /// Open or create the preference store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PrefsError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Read the persisted theme; unrecognized or missing values fall back to dark
    pub fn theme(&self) -> Result<Theme, PrefsError> {
        let theme = self
            .db
            .get(THEME_KEY)?
            .and_then(|bytes| Theme::from_bytes(&bytes))
            .unwrap_or(Theme::Dark);
        Ok(theme)
    }

    /// Persist the theme
    pub fn set_theme(&self, theme: Theme) -> Result<(), PrefsError> {
        self.db.insert(THEME_KEY, theme.as_str().as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    /// Flip the persisted theme and return the new value
    pub fn toggle_theme(&self) -> Result<Theme, PrefsError> {
        let next = self.theme()?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
