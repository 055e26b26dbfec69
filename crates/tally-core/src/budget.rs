//! Budget limits persistence
//!
//! Limits are a JSON object of category → ceiling. The store is loaded once
//! per session and the resulting map is passed into each analysis call.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{validate_amount, BudgetLimits};

/// Limits used when no budget file exists yet
pub fn default_limits() -> BudgetLimits {
    BudgetLimits::from([
        ("Alimentação".to_string(), 500.0),
        ("Moradia".to_string(), 1500.0),
        ("Transporte".to_string(), 300.0),
    ])
}

/// JSON-file backed budget limits
#[derive(Debug, Clone)]
pub struct BudgetStore {
    path: PathBuf,
}

impl BudgetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load limits, falling back to the default seed when the file is absent
    pub fn load_limits(&self) -> Result<BudgetLimits> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No budget file, using defaults");
            return Ok(default_limits());
        }

        let content = fs::read_to_string(&self.path)?;
        let limits: BudgetLimits = serde_json::from_str(&content)?;

        for (category, limit) in &limits {
            validate_amount(*limit).map_err(|_| {
                Error::InvalidData(format!(
                    "Budget limit for {:?} must be a non-negative number, got {}",
                    category, limit
                ))
            })?;
        }

        Ok(limits)
    }

    /// Persist limits, replacing the file atomically
    pub fn save_limits(&self, limits: &BudgetLimits) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut temp, limits)?;
        temp.write_all(b"\n")?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        info!(path = %self.path.display(), categories = limits.len(), "Budget limits saved");
        Ok(())
    }

    /// Set one category's limit and persist, returning the updated map
    pub fn set_limit(&self, category: &str, limit: f64) -> Result<BudgetLimits> {
        let category = category.trim();
        if category.is_empty() {
            return Err(Error::InvalidInput("Category cannot be empty".into()));
        }
        validate_amount(limit)?;

        let mut limits = self.load_limits()?;
        limits.insert(category.to_string(), limit);
        self.save_limits(&limits)?;
        Ok(limits)
    }

    /// Drop a category's limit. Returns false if it had none.
    pub fn remove_limit(&self, category: &str) -> Result<bool> {
        let mut limits = self.load_limits()?;
        let removed = limits.remove(category.trim()).is_some();
        if removed {
            self.save_limits(&limits)?;
        }
        Ok(removed)
    }
}
