//! Core types for the training domain.
//!
//! Programs describe what a user intends to train; execution sessions
//! describe one concrete run through a program, expanded into an ordered
//! timeline of sets. Program definitions never change during execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Seconds one repetition is assumed to take when an exercise does not
/// declare its own pace.
pub const DEFAULT_REP_DURATION: u32 = 5;

// ============================================================================
// Exercise Types
// ============================================================================

/// How an exercise is measured.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Held for a duration, measured in seconds
    Isometric,
    /// Performed as repetitions, measured in reps
    Dynamic,
}

/// Whether an exercise trains each side of the body separately.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Laterality {
    /// Both sides at once, one set per set number
    Bilateral,
    /// One side at a time, expanded into a Right set then a Left set
    Unilateral,
}

impl Laterality {
    /// Number of timeline sets one planned set expands into.
    pub fn expansion_factor(&self) -> u32 {
        match self {
            Laterality::Bilateral => 1,
            Laterality::Unilateral => 2,
        }
    }
}

/// Which side of the body a timeline set trains.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Bilateral set, no side distinction
    None,
    Right,
    Left,
}

impl Side {
    /// Short label for display ("R", "L", or empty).
    pub fn label(&self) -> &'static str {
        match self {
            Side::None => "",
            Side::Right => "R",
            Side::Left => "L",
        }
    }
}

/// A catalog exercise definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable identifier, referenced by programs
    pub id: String,
    /// Display name
    pub name: String,
    /// Measurement model
    pub kind: ExerciseKind,
    /// Side handling
    pub laterality: Laterality,
    /// Seconds per repetition for dynamic exercises
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rep_duration: Option<u32>,
    /// Suggested target (seconds or reps) when a program does not override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<u32>,
    /// Suggested set count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sets: Option<u32>,
    /// Suggested rest interval in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_interval: Option<u32>,
}

impl Exercise {
    /// Per-repetition pace in seconds, falling back to the global default.
    pub fn rep_duration_or_default(&self) -> u32 {
        self.rep_duration.unwrap_or(DEFAULT_REP_DURATION)
    }
}

// ============================================================================
// Program Types
// ============================================================================

/// One exercise occurrence inside a program, with its prescription.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramExercise {
    /// Catalog exercise id
    pub exercise_id: String,
    /// Number of planned sets (1 or more)
    pub sets: u32,
    /// Target seconds (isometric) or reps (dynamic) per set
    pub target_value: u32,
    /// Rest after each set, in seconds
    pub interval_seconds: u32,
}

/// A repeating group of exercises inside a program.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramLoop {
    /// Identifier unique within the program
    pub id: u32,
    /// How many rounds the group repeats (1 or more)
    pub rounds: u32,
    /// Rest between rounds, in seconds; replaces the last set's own
    /// rest on every round except the final one
    pub rest_between_rounds: u32,
    /// Exercises performed each round, in order
    pub exercises: Vec<ProgramExercise>,
}

/// An ordered program element.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgramItem {
    Exercise(ProgramExercise),
    Loop(ProgramLoop),
}

/// A training program: an ordered list of exercises and loops.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Program {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Ordered items; execution order is exactly this order
    pub items: Vec<ProgramItem>,
}

// ============================================================================
// Execution Types
// ============================================================================

/// Loop provenance of a timeline set.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundInfo {
    /// Which loop produced this set
    pub loop_id: u32,
    /// 1-based round number
    pub round: u32,
    /// Total rounds of that loop
    pub total_rounds: u32,
}

/// One concrete set in an execution timeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionSet {
    /// Index into the session's resolved exercise list
    pub exercise_index: usize,
    /// 1-based set number within its exercise occurrence; a Right/Left
    /// pair shares one set number
    pub set_number: u32,
    /// Side trained by this set
    pub side: Side,
    /// Target seconds or reps
    pub target_value: u32,
    /// Rest after this set, in seconds
    pub interval_seconds: u32,
    /// Present when the set came from a loop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundInfo>,
    /// Recorded seconds or reps; initialized to the target
    pub actual_value: u32,
    pub is_completed: bool,
    pub is_skipped: bool,
}

impl ExecutionSet {
    /// True once the set has an outcome, either completed or skipped.
    pub fn is_recorded(&self) -> bool {
        self.is_completed || self.is_skipped
    }

    /// True while the set still awaits execution.
    pub fn is_pending(&self) -> bool {
        !self.is_recorded()
    }
}

/// Partial update applied to one timeline set.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_skipped: Option<bool>,
}

impl SetPatch {
    /// Patch recording a completed set with the given value.
    pub fn completed(actual_value: u32) -> Self {
        Self {
            actual_value: Some(actual_value),
            is_completed: Some(true),
            is_skipped: Some(false),
        }
    }

    /// Patch recording a skipped set, keeping whatever was accumulated.
    pub fn skipped(actual_value: u32) -> Self {
        Self {
            actual_value: Some(actual_value),
            is_completed: Some(false),
            is_skipped: Some(true),
        }
    }

    /// Patch returning a set to its pending state with a fresh value.
    pub fn cleared(target_value: u32) -> Self {
        Self {
            actual_value: Some(target_value),
            is_completed: Some(false),
            is_skipped: Some(false),
        }
    }
}

/// One exercise occurrence resolved against the catalog at build time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolvedExercise {
    /// The prescription from the program
    pub plan: ProgramExercise,
    /// Snapshot of the catalog exercise it referenced
    pub exercise: Exercise,
}

/// One run through a program: resolved exercises plus the set timeline.
///
/// The timeline's length and order never change after construction; only
/// the per-set outcome fields are mutated during execution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionSession {
    pub program_id: String,
    pub program_name: String,
    pub started_at: DateTime<Utc>,
    /// Resolved exercise occurrences, indexed by `ExecutionSet::exercise_index`
    pub exercises: Vec<ResolvedExercise>,
    /// Ordered sets to perform
    pub timeline: Vec<ExecutionSet>,
    /// Free-form note attached when the session is finished
    #[serde(default)]
    pub comment: String,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// Exercise and program definitions available to the builder.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Exercises keyed by id
    pub exercises: HashMap<String, Exercise>,
    /// Programs keyed by id
    pub programs: HashMap<String, Program>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_factor() {
        assert_eq!(Laterality::Bilateral.expansion_factor(), 1);
        assert_eq!(Laterality::Unilateral.expansion_factor(), 2);
    }

    #[test]
    fn test_rep_duration_default() {
        let mut ex = Exercise {
            id: "pushup".to_string(),
            name: "Push-up".to_string(),
            kind: ExerciseKind::Dynamic,
            laterality: Laterality::Bilateral,
            rep_duration: None,
            default_target: None,
            default_sets: None,
            default_interval: None,
        };
        assert_eq!(ex.rep_duration_or_default(), DEFAULT_REP_DURATION);
        ex.rep_duration = Some(2);
        assert_eq!(ex.rep_duration_or_default(), 2);
    }

    #[test]
    fn test_set_patch_constructors() {
        let p = SetPatch::completed(12);
        assert_eq!(p.actual_value, Some(12));
        assert_eq!(p.is_completed, Some(true));
        assert_eq!(p.is_skipped, Some(false));

        let p = SetPatch::skipped(3);
        assert_eq!(p.is_completed, Some(false));
        assert_eq!(p.is_skipped, Some(true));

        let p = SetPatch::cleared(10);
        assert_eq!(p.actual_value, Some(10));
        assert_eq!(p.is_completed, Some(false));
        assert_eq!(p.is_skipped, Some(false));
    }

    #[test]
    fn test_program_item_serde_tagged() {
        let item = ProgramItem::Loop(ProgramLoop {
            id: 1,
            rounds: 3,
            rest_between_rounds: 90,
            exercises: vec![ProgramExercise {
                exercise_id: "pushup".to_string(),
                sets: 1,
                target_value: 10,
                interval_seconds: 30,
            }],
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"loop\""));

        let back: ProgramItem = serde_json::from_str(&json).unwrap();
        match back {
            ProgramItem::Loop(lp) => {
                assert_eq!(lp.rounds, 3);
                assert_eq!(lp.exercises.len(), 1);
            }
            _ => panic!("expected loop item"),
        }
    }

    #[test]
    fn test_execution_set_recorded_state() {
        let mut set = ExecutionSet {
            exercise_index: 0,
            set_number: 1,
            side: Side::None,
            target_value: 10,
            interval_seconds: 60,
            round: None,
            actual_value: 10,
            is_completed: false,
            is_skipped: false,
        };
        assert!(set.is_pending());
        set.is_skipped = true;
        assert!(set.is_recorded());
    }
}
