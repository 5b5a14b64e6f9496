//! The wish jar: visitor wishes with JSON file persistence.
//!
//! The jar is loaded once at startup and rewritten after every added wish,
//! so wishes survive restarts. A missing or empty file is an empty jar.
//! Sending wishes anywhere beyond the local file is out of scope.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::WishError;

/// One collected wish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wish {
    pub name: String,
    pub text: String,
    /// Formatted timestamp captured when the wish was added.
    pub date: String,
}

/// Wish collection persisted as a JSON array.
pub struct WishJar {
    path: PathBuf,
    wishes: Vec<Wish>,
}

impl WishJar {
    /// Load the jar from `path`, or start empty if the file doesn't exist.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, WishError> {
        let path = path.into();
        let wishes = match fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => serde_json::from_str(&contents)?,
            Ok(_) => Vec::new(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, wishes })
    }

    /// Add a wish and persist the jar.
    ///
    /// Empty wish text is ignored (returns `Ok(false)`); an empty name
    /// becomes "Anonymous". Returns `Ok(true)` when a wish was stored so
    /// the caller can fire the celebration volley.
    pub fn add(&mut self, name: &str, text: &str) -> Result<bool, WishError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        let name = name.trim();
        let name = if name.is_empty() { "Anonymous" } else { name };

        self.wishes.push(Wish {
            name: name.to_string(),
            text: text.to_string(),
            date: timestamp(),
        });
        self.save()?;
        info!(name, "wish added");
        Ok(true)
    }

    /// Write the jar back to its file.
    pub fn save(&self) -> Result<(), WishError> {
        let json = serde_json::to_string_pretty(&self.wishes)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn wishes(&self) -> &[Wish] {
        &self.wishes
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn timestamp() -> String {
    // Seconds since the epoch; enough for display ordering without pulling
    // in a date-formatting dependency.
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{secs}")
}
