//! Pure summary derivations over a session.
//!
//! Nothing here mutates or performs I/O; hosts call these to render
//! plans, progress bars, and the end-of-session screen.

use crate::types::{ExecutionSession, ExecutionSet, ExerciseKind, Side};

/// Snapshot of how far through a session the user is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub completed: usize,
    pub skipped: usize,
    pub pending: usize,
}

impl SessionProgress {
    /// Fraction of sets completed, between 0.0 and 1.0. Skipped sets do
    /// not count toward this.
    pub fn completed_fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f32 / self.total as f32
    }

    /// Fraction of sets with an outcome, completed or skipped.
    pub fn recorded_fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed + self.skipped) as f32 / self.total as f32
    }
}

/// Count set outcomes across the timeline.
pub fn session_progress(session: &ExecutionSession) -> SessionProgress {
    let total = session.timeline.len();
    let completed = session.timeline.iter().filter(|s| s.is_completed).count();
    let skipped = session.timeline.iter().filter(|s| s.is_skipped).count();
    SessionProgress {
        total,
        completed,
        skipped,
        pending: total - completed - skipped,
    }
}

/// Planned duration of the whole timeline, in seconds.
///
/// Each set contributes its work time (held seconds, or reps times the
/// per-rep pace) plus its rest interval. This is a planning figure: it
/// ignores the countdown, pauses, and the skipped rest after the final
/// set.
pub fn estimated_seconds(session: &ExecutionSession) -> u32 {
    session
        .timeline
        .iter()
        .map(|set| set_work_seconds(session, set) + set.interval_seconds)
        .sum()
}

/// Planned duration rounded to the nearest minute, never below one.
pub fn estimated_minutes(session: &ExecutionSession) -> u32 {
    let minutes = (estimated_seconds(session) + 30) / 60;
    minutes.max(1)
}

fn set_work_seconds(session: &ExecutionSession, set: &ExecutionSet) -> u32 {
    let exercise = &session.exercises[set.exercise_index].exercise;
    match exercise.kind {
        ExerciseKind::Isometric => set.target_value,
        ExerciseKind::Dynamic => set.target_value * exercise.rep_duration_or_default(),
    }
}

/// Whether any set (or Right/Left pair) recorded nothing but zeros.
///
/// A pair counts as one unit: a zero on one side with a real value on
/// the other is not flagged. Pending sets never trigger the warning.
pub fn zero_value_warning(session: &ExecutionSession) -> bool {
    let timeline = &session.timeline;
    let mut i = 0;
    while i < timeline.len() {
        let group_len = if is_pair(timeline, i) { 2 } else { 1 };
        let group = &timeline[i..i + group_len];

        let recorded: Vec<&ExecutionSet> = group.iter().filter(|s| s.is_recorded()).collect();
        if !recorded.is_empty() && recorded.iter().all(|s| s.actual_value == 0) {
            return true;
        }
        i += group_len;
    }
    false
}

/// A Right set immediately followed by its Left twin forms a pair.
fn is_pair(timeline: &[ExecutionSet], i: usize) -> bool {
    let a = &timeline[i];
    match timeline.get(i + 1) {
        Some(b) => {
            a.side == Side::Right
                && b.side == Side::Left
                && a.exercise_index == b.exercise_index
                && a.set_number == b.set_number
                && a.round == b.round
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_session;
    use crate::types::{
        Catalog, Exercise, Laterality, Program, ProgramExercise, ProgramItem, SetPatch,
    };
    use std::collections::HashMap;

    fn catalog() -> Catalog {
        let ex = |id: &str, kind, laterality, rep: Option<u32>| Exercise {
            id: id.to_string(),
            name: id.to_string(),
            kind,
            laterality,
            rep_duration: rep,
            default_target: None,
            default_sets: None,
            default_interval: None,
        };
        let mut exercises = HashMap::new();
        for e in [
            ex(
                "press",
                ExerciseKind::Dynamic,
                Laterality::Bilateral,
                Some(5),
            ),
            ex("hold", ExerciseKind::Isometric, Laterality::Bilateral, None),
            ex(
                "side_hold",
                ExerciseKind::Isometric,
                Laterality::Unilateral,
                None,
            ),
        ] {
            exercises.insert(e.id.clone(), e);
        }
        Catalog {
            exercises,
            programs: HashMap::new(),
        }
    }

    fn session_of(items: Vec<ProgramItem>) -> ExecutionSession {
        let program = Program {
            id: "test".to_string(),
            name: "Test".to_string(),
            items,
        };
        build_session(&program, &catalog()).unwrap()
    }

    fn plan(exercise_id: &str, sets: u32, target: u32, interval: u32) -> ProgramItem {
        ProgramItem::Exercise(ProgramExercise {
            exercise_id: exercise_id.to_string(),
            sets,
            target_value: target,
            interval_seconds: interval,
        })
    }

    #[test]
    fn test_estimated_duration_counts_work_and_rest() {
        // 3 sets of 10 reps at 5s per rep with 30s rest: 240 seconds
        let session = session_of(vec![plan("press", 3, 10, 30)]);
        assert_eq!(estimated_seconds(&session), 240);
        assert_eq!(estimated_minutes(&session), 4);
    }

    #[test]
    fn test_isometric_estimate_uses_held_seconds() {
        let session = session_of(vec![plan("hold", 2, 45, 15)]);
        assert_eq!(estimated_seconds(&session), 120);
        assert_eq!(estimated_minutes(&session), 2);
    }

    #[test]
    fn test_estimate_rounds_to_nearest_minute() {
        // 150s rounds up to 3 minutes
        let session = session_of(vec![plan("hold", 1, 90, 60)]);
        assert_eq!(estimated_minutes(&session), 3);

        // 149s rounds down to 2
        let session = session_of(vec![plan("hold", 1, 89, 60)]);
        assert_eq!(estimated_minutes(&session), 2);
    }

    #[test]
    fn test_estimate_never_below_one_minute() {
        let session = session_of(vec![plan("hold", 1, 10, 0)]);
        assert_eq!(estimated_minutes(&session), 1);
    }

    #[test]
    fn test_unilateral_estimate_counts_both_sides() {
        // 1 planned set expands to Right + Left: 2 x (20 + 10)
        let session = session_of(vec![plan("side_hold", 1, 20, 10)]);
        assert_eq!(estimated_seconds(&session), 60);
    }

    #[test]
    fn test_progress_counts() {
        let mut session = session_of(vec![plan("hold", 4, 10, 0)]);
        session.update_set(0, SetPatch::completed(10)).unwrap();
        session.update_set(1, SetPatch::skipped(4)).unwrap();

        let progress = session_progress(&session);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.skipped, 1);
        assert_eq!(progress.pending, 2);
        assert!((progress.completed_fraction() - 0.25).abs() < f32::EPSILON);
        assert!((progress.recorded_fraction() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_warning_on_zero_recorded_set() {
        let mut session = session_of(vec![plan("hold", 2, 10, 0)]);
        assert!(!zero_value_warning(&session));

        session.update_set(0, SetPatch::completed(0)).unwrap();
        assert!(zero_value_warning(&session));
    }

    #[test]
    fn test_zero_warning_ignores_pending_sets() {
        let mut session = session_of(vec![plan("hold", 2, 10, 0)]);
        // pending sets keep their target as actual_value; force one to 0
        session
            .update_set(
                0,
                SetPatch {
                    actual_value: Some(0),
                    is_completed: None,
                    is_skipped: None,
                },
            )
            .unwrap();
        assert!(!zero_value_warning(&session));
    }

    #[test]
    fn test_zero_warning_pair_needs_both_sides_zero() {
        let mut session = session_of(vec![plan("side_hold", 1, 20, 10)]);

        // right side zero, left side real: the pair is fine
        session.update_set(0, SetPatch::completed(0)).unwrap();
        session.update_set(1, SetPatch::completed(15)).unwrap();
        assert!(!zero_value_warning(&session));

        // both sides zero trips the warning
        session.update_set(1, SetPatch::completed(0)).unwrap();
        assert!(zero_value_warning(&session));
    }

    #[test]
    fn test_zero_warning_pair_single_recorded_zero() {
        let mut session = session_of(vec![plan("side_hold", 1, 20, 10)]);
        // only the right side recorded so far, at zero
        session.update_set(0, SetPatch::skipped(0)).unwrap();
        assert!(zero_value_warning(&session));
    }
}
