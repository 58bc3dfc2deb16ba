//! Exercise and program catalog.
//!
//! Provides the built-in exercises and starter programs, validation of
//! catalog consistency, and loading of user-defined programs from the
//! data directory.

use crate::types::{
    Catalog, Exercise, ExerciseKind, Laterality, Program, ProgramExercise, ProgramItem,
    ProgramLoop,
};
use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;

/// The default catalog, built once
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

// ============================================================================
// Built-in Exercises
// ============================================================================

fn exercise(
    id: &str,
    name: &str,
    kind: ExerciseKind,
    laterality: Laterality,
    rep_duration: Option<u32>,
    default_target: u32,
    default_sets: u32,
    default_interval: u32,
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        laterality,
        rep_duration,
        default_target: Some(default_target),
        default_sets: Some(default_sets),
        default_interval: Some(default_interval),
    }
}

fn builtin_exercises() -> Vec<Exercise> {
    use ExerciseKind::{Dynamic, Isometric};
    use Laterality::{Bilateral, Unilateral};

    vec![
        exercise("pushup", "Push-up", Dynamic, Bilateral, Some(2), 12, 3, 60),
        exercise("pullup", "Pull-up", Dynamic, Bilateral, Some(3), 6, 3, 90),
        exercise("air_squat", "Air Squat", Dynamic, Bilateral, Some(3), 15, 3, 60),
        exercise(
            "pistol_squat",
            "Pistol Squat",
            Dynamic,
            Unilateral,
            Some(4),
            5,
            3,
            90,
        ),
        exercise("plank", "Plank Hold", Isometric, Bilateral, None, 45, 3, 60),
        exercise(
            "side_plank",
            "Side Plank",
            Isometric,
            Unilateral,
            None,
            30,
            3,
            30,
        ),
        exercise(
            "hollow_hold",
            "Hollow Body Hold",
            Isometric,
            Bilateral,
            None,
            30,
            3,
            45,
        ),
        exercise("dead_hang", "Dead Hang", Isometric, Bilateral, None, 40, 2, 60),
    ]
}

// ============================================================================
// Built-in Programs
// ============================================================================

fn plan(exercise_id: &str, sets: u32, target_value: u32, interval_seconds: u32) -> ProgramExercise {
    ProgramExercise {
        exercise_id: exercise_id.to_string(),
        sets,
        target_value,
        interval_seconds,
    }
}

fn builtin_programs() -> Vec<Program> {
    vec![
        Program {
            id: "foundation".to_string(),
            name: "Foundation Strength".to_string(),
            items: vec![
                ProgramItem::Exercise(plan("pushup", 3, 10, 60)),
                ProgramItem::Exercise(plan("air_squat", 3, 12, 60)),
                ProgramItem::Exercise(plan("plank", 3, 30, 60)),
            ],
        },
        Program {
            id: "circuit".to_string(),
            name: "Unilateral Circuit".to_string(),
            items: vec![
                ProgramItem::Exercise(plan("air_squat", 1, 10, 30)),
                ProgramItem::Loop(ProgramLoop {
                    id: 1,
                    rounds: 3,
                    rest_between_rounds: 90,
                    exercises: vec![
                        plan("pushup", 1, 10, 30),
                        plan("pistol_squat", 1, 5, 45),
                        plan("side_plank", 1, 20, 30),
                    ],
                }),
                ProgramItem::Exercise(plan("dead_hang", 1, 30, 60)),
            ],
        },
    ]
}

/// Build the default catalog of exercises and starter programs.
pub fn build_default_catalog() -> Catalog {
    let mut exercises = HashMap::new();
    for ex in builtin_exercises() {
        exercises.insert(ex.id.clone(), ex);
    }

    let mut programs = HashMap::new();
    for program in builtin_programs() {
        programs.insert(program.id.clone(), program);
    }

    Catalog {
        exercises,
        programs,
    }
}

// ============================================================================
// User Programs
// ============================================================================

/// Load user-defined programs from a JSON file.
///
/// A missing file yields an empty list. A malformed file is logged and
/// ignored so a bad edit never blocks training.
pub fn load_user_programs(path: &Path) -> Result<Vec<Program>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Vec<Program>>(&content) {
        Ok(programs) => {
            tracing::debug!("Loaded {} user programs from {:?}", programs.len(), path);
            Ok(programs)
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed program file {:?}: {}", path, e);
            Ok(Vec::new())
        }
    }
}

impl Catalog {
    /// Merge programs into the catalog. A user program with a built-in id
    /// replaces the built-in definition.
    pub fn merge_programs(&mut self, programs: Vec<Program>) {
        for program in programs {
            if self.programs.contains_key(&program.id) {
                tracing::debug!("User program '{}' overrides built-in", program.id);
            }
            self.programs.insert(program.id.clone(), program);
        }
    }

    /// Validate catalog consistency, returning a list of problems.
    ///
    /// An empty vec means the catalog is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, ex) in &self.exercises {
            if key != &ex.id {
                errors.push(format!("Exercise key '{}' does not match id '{}'", key, ex.id));
            }
            if ex.id.is_empty() {
                errors.push("Exercise with empty id".to_string());
            }
            if ex.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", ex.id));
            }
            match ex.kind {
                ExerciseKind::Isometric => {
                    if ex.rep_duration.is_some() {
                        errors.push(format!(
                            "Isometric exercise '{}' declares a rep duration",
                            ex.id
                        ));
                    }
                }
                ExerciseKind::Dynamic => {
                    if ex.rep_duration == Some(0) {
                        errors.push(format!("Exercise '{}' has zero rep duration", ex.id));
                    }
                }
            }
        }

        for (key, program) in &self.programs {
            if key != &program.id {
                errors.push(format!(
                    "Program key '{}' does not match id '{}'",
                    key, program.id
                ));
            }
            if program.name.is_empty() {
                errors.push(format!("Program '{}' has empty name", program.id));
            }
            if program.items.is_empty() {
                errors.push(format!("Program '{}' has no items", program.id));
            }

            let mut loop_ids = HashSet::new();
            for item in &program.items {
                match item {
                    ProgramItem::Exercise(plan) => {
                        self.validate_plan(&mut errors, &program.id, plan);
                    }
                    ProgramItem::Loop(lp) => {
                        if !loop_ids.insert(lp.id) {
                            errors.push(format!(
                                "Program '{}' has duplicate loop id {}",
                                program.id, lp.id
                            ));
                        }
                        if lp.rounds < 1 {
                            errors.push(format!(
                                "Program '{}' loop {} has zero rounds",
                                program.id, lp.id
                            ));
                        }
                        if lp.exercises.is_empty() {
                            errors.push(format!(
                                "Program '{}' loop {} has no exercises",
                                program.id, lp.id
                            ));
                        }
                        for plan in &lp.exercises {
                            self.validate_plan(&mut errors, &program.id, plan);
                        }
                    }
                }
            }
        }

        errors
    }

    fn validate_plan(&self, errors: &mut Vec<String>, program_id: &str, plan: &ProgramExercise) {
        if !self.exercises.contains_key(&plan.exercise_id) {
            errors.push(format!(
                "Program '{}' references unknown exercise '{}'",
                program_id, plan.exercise_id
            ));
        }
        if plan.sets < 1 {
            errors.push(format!(
                "Program '{}' prescribes zero sets of '{}'",
                program_id, plan.exercise_id
            ));
        }
    }
}
