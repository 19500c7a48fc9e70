use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::MonthlyAssignment;

/// Durable store for the month's day → puzzle assignment.
///
/// `load` returns the empty assignment when nothing has been persisted yet;
/// `save` replaces the stored value wholesale.
pub trait AssignmentStore: Send + Sync {
    fn load(&self) -> Result<MonthlyAssignment>;
    fn save(&self, assignment: &MonthlyAssignment) -> Result<()>;
}

/// JSON-file-backed store. Writes land in a temporary sibling first and are
/// renamed into place, so a reader never observes a half-written file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AssignmentStore for JsonFileStore {
    fn load(&self) -> Result<MonthlyAssignment> {
        if !self.path.exists() {
            return Ok(MonthlyAssignment::empty());
        }

        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, assignment: &MonthlyAssignment) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string(assignment)?)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}
