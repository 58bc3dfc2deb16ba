//! Finished-session records and their append-only log.
//!
//! A finished session flattens into a [`RecordedSession`] and goes out
//! through a [`SessionSink`]. The bundled [`JsonlSink`] appends one JSON
//! line per session under an exclusive lock; the log is the training
//! history.

use crate::types::{ExecutionSession, RoundInfo, Side};
use crate::Result;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One set as it went into the history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedSet {
    pub exercise_id: String,
    pub exercise_name: String,
    pub set_number: u32,
    pub side: Side,
    pub target_value: u32,
    pub actual_value: u32,
    pub is_completed: bool,
    pub is_skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundInfo>,
}

/// A finished session, flattened for the history log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedSession {
    pub id: Uuid,
    pub program_id: String,
    pub program_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(default)]
    pub comment: String,
    pub sets: Vec<RecordedSet>,
}

impl RecordedSession {
    /// Flatten a finished session into its history form.
    pub fn from_session(session: &ExecutionSession, finished_at: DateTime<Utc>) -> Self {
        let sets = session
            .timeline
            .iter()
            .map(|set| {
                let exercise = &session.exercises[set.exercise_index].exercise;
                RecordedSet {
                    exercise_id: exercise.id.clone(),
                    exercise_name: exercise.name.clone(),
                    set_number: set.set_number,
                    side: set.side,
                    target_value: set.target_value,
                    actual_value: set.actual_value,
                    is_completed: set.is_completed,
                    is_skipped: set.is_skipped,
                    round: set.round,
                }
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            program_id: session.program_id.clone(),
            program_name: session.program_name.clone(),
            started_at: session.started_at,
            finished_at,
            comment: session.comment.clone(),
            sets,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.sets.iter().filter(|s| s.is_completed).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.sets.iter().filter(|s| s.is_skipped).count()
    }
}

/// Destination for finished sessions.
pub trait SessionSink {
    fn record_session(&mut self, record: &RecordedSession) -> Result<()>;
}

/// Appends one JSON line per session to a log file.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionSink for JsonlSink {
    fn record_session(&mut self, record: &RecordedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.lock_exclusive()?;

        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        file.sync_all()?;
        file.unlock()?;

        tracing::info!(
            "Recorded session '{}' ({} sets) to {:?}",
            record.program_id,
            record.sets.len(),
            self.path
        );
        Ok(())
    }
}

/// Read every session from a log file, oldest first.
///
/// A missing file is an empty history. Unparseable lines are logged and
/// skipped so one torn write cannot hide the rest of the log.
pub fn read_recorded_sessions(path: &Path) -> Result<Vec<RecordedSession>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;
    let reader = BufReader::new(&file);

    let mut sessions = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<RecordedSession>(&line) {
            Ok(session) => sessions.push(session),
            Err(e) => {
                tracing::warn!("Skipping bad record on line {}: {}", number + 1, e);
            }
        }
    }
    file.unlock()?;
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExecutionSet, Exercise, ExerciseKind, Laterality, ProgramExercise,
        ResolvedExercise, SetPatch};

    fn test_session() -> ExecutionSession {
        let exercise = Exercise {
            id: "pushup".to_string(),
            name: "Push-up".to_string(),
            kind: ExerciseKind::Dynamic,
            laterality: Laterality::Bilateral,
            rep_duration: Some(2),
            default_target: None,
            default_sets: None,
            default_interval: None,
        };
        let plan = ProgramExercise {
            exercise_id: "pushup".to_string(),
            sets: 2,
            target_value: 10,
            interval_seconds: 30,
        };
        let set = |n: u32| ExecutionSet {
            exercise_index: 0,
            set_number: n,
            side: Side::None,
            target_value: 10,
            interval_seconds: 30,
            round: None,
            actual_value: 10,
            is_completed: false,
            is_skipped: false,
        };
        ExecutionSession {
            program_id: "test".to_string(),
            program_name: "Test".to_string(),
            started_at: Utc::now(),
            exercises: vec![ResolvedExercise { plan, exercise }],
            timeline: vec![set(1), set(2)],
            comment: "felt strong".to_string(),
        }
    }

    #[test]
    fn test_from_session_flattens_sets() {
        let mut session = test_session();
        session.update_set(0, SetPatch::completed(12)).unwrap();
        session.update_set(1, SetPatch::skipped(4)).unwrap();

        let record = RecordedSession::from_session(&session, Utc::now());
        assert_eq!(record.program_id, "test");
        assert_eq!(record.comment, "felt strong");
        assert_eq!(record.sets.len(), 2);
        assert_eq!(record.sets[0].exercise_name, "Push-up");
        assert_eq!(record.sets[0].actual_value, 12);
        assert!(record.sets[0].is_completed);
        assert!(record.sets[1].is_skipped);
        assert_eq!(record.completed_count(), 1);
        assert_eq!(record.skipped_count(), 1);
    }

    #[test]
    fn test_sink_appends_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history").join("sessions.jsonl");
        let mut sink = JsonlSink::new(&path);

        let first = RecordedSession::from_session(&test_session(), Utc::now());
        let second = RecordedSession::from_session(&test_session(), Utc::now());
        sink.record_session(&first).unwrap();
        sink.record_session(&second).unwrap();

        let sessions = read_recorded_sessions(&path).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, first.id);
        assert_eq!(sessions[1].id, second.id);
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = read_recorded_sessions(&dir.path().join("none.jsonl")).unwrap();
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_read_skips_corrupt_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.jsonl");
        let mut sink = JsonlSink::new(&path);

        let record = RecordedSession::from_session(&test_session(), Utc::now());
        sink.record_session(&record).unwrap();

        // simulate a torn write in the middle of the log
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "{{ torn json").unwrap();
        }
        sink.record_session(&record).unwrap();

        let sessions = read_recorded_sessions(&path).unwrap();
        assert_eq!(sessions.len(), 2);
    }
}
