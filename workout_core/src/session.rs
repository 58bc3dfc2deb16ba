//! Execution session state updates and resume persistence.
//!
//! All outcome changes funnel through [`ExecutionSession::update_set`] so
//! the per-set invariant (never completed and skipped at once) holds no
//! matter who asks for the change. Sessions can be saved mid-run and
//! loaded later to resume.

use crate::types::{ExecutionSession, SetPatch};
use crate::{Error, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl ExecutionSession {
    /// Apply a partial update to one timeline set.
    ///
    /// Rejects out-of-range indices and any patch that would leave the
    /// set both completed and skipped; on rejection the session is
    /// unchanged.
    pub fn update_set(&mut self, index: usize, patch: SetPatch) -> Result<()> {
        let set = self
            .timeline
            .get_mut(index)
            .ok_or_else(|| Error::Session(format!("set index {} out of range", index)))?;

        let mut updated = set.clone();
        if let Some(value) = patch.actual_value {
            updated.actual_value = value;
        }
        if let Some(completed) = patch.is_completed {
            updated.is_completed = completed;
        }
        if let Some(skipped) = patch.is_skipped {
            updated.is_skipped = skipped;
        }
        if updated.is_completed && updated.is_skipped {
            return Err(Error::Session(format!(
                "set {} cannot be completed and skipped at once",
                index
            )));
        }

        *set = updated;
        Ok(())
    }

    /// Count of sets with an outcome.
    pub fn recorded_count(&self) -> usize {
        self.timeline.iter().filter(|s| s.is_recorded()).count()
    }

    /// Verify that every timeline set addresses a resolved exercise.
    ///
    /// Sessions from [`build_session`](crate::builder::build_session) hold
    /// this by construction; a hand-edited or damaged resume file may not.
    pub fn check_exercise_indices(&self) -> Result<()> {
        for (index, set) in self.timeline.iter().enumerate() {
            if set.exercise_index >= self.exercises.len() {
                return Err(Error::Session(format!(
                    "set {} references exercise {} but only {} are resolved",
                    index,
                    set.exercise_index,
                    self.exercises.len()
                )));
            }
        }
        Ok(())
    }

    /// Save the session for later resume.
    ///
    /// Writes to a temp file in the target directory and renames it into
    /// place, under an exclusive lock, so a crash never leaves a torn
    /// file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(dir)?;
        {
            let file = temp.as_file();
            file.lock_exclusive()?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.flush()?;
            file.sync_all()?;
            file.unlock()?;
        }
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved session '{}' to {:?}", self.program_id, path);
        Ok(())
    }

    /// Load a previously saved session.
    ///
    /// A missing or unreadable file is an error here: silently starting
    /// over would throw away a half-done workout.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        file.lock_shared()?;
        let mut contents = String::new();
        BufReader::new(&file).read_to_string(&mut contents)?;
        file.unlock()?;

        let session: ExecutionSession = serde_json::from_str(&contents)?;
        session.check_exercise_indices()?;
        tracing::debug!(
            "Loaded session '{}' ({}/{} sets recorded)",
            session.program_id,
            session.recorded_count(),
            session.timeline.len()
        );
        Ok(session)
    }
}
