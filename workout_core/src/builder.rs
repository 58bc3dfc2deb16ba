//! Session construction.
//!
//! Expands a program definition into an [`ExecutionSession`]: every loop
//! is unrolled into rounds, every unilateral set into a Right set followed
//! by a Left set. The resulting timeline is the complete, ordered list of
//! sets the user will perform; execution never changes its length or order.

use crate::types::{
    Catalog, ExecutionSession, ExecutionSet, Exercise, Laterality, Program, ProgramExercise,
    ProgramItem, ResolvedExercise, RoundInfo, Side,
};
use crate::{Error, Result};
use chrono::Utc;

/// Expand a program into an executable session.
///
/// Fails when the program has no items, prescribes zero sets or rounds,
/// contains an empty loop, or references an exercise the catalog does not
/// know. The expansion is deterministic: the same program and catalog
/// always produce the same timeline.
pub fn build_session(program: &Program, catalog: &Catalog) -> Result<ExecutionSession> {
    if program.items.is_empty() {
        return Err(Error::EmptyProgram(program.id.clone()));
    }

    let mut exercises: Vec<ResolvedExercise> = Vec::new();
    let mut timeline: Vec<ExecutionSet> = Vec::new();

    for item in &program.items {
        match item {
            ProgramItem::Exercise(plan) => {
                let index = resolve(&mut exercises, plan, program, catalog)?;
                expand_sets(&mut timeline, index, plan, &exercises[index].exercise, None);
            }
            ProgramItem::Loop(lp) => {
                if lp.rounds < 1 {
                    return Err(Error::InvalidDefinition(format!(
                        "loop {} in program '{}' has zero rounds",
                        lp.id, program.id
                    )));
                }
                if lp.exercises.is_empty() {
                    return Err(Error::InvalidDefinition(format!(
                        "loop {} in program '{}' has no exercises",
                        lp.id, program.id
                    )));
                }

                // Each loop exercise resolves once; every round reuses the
                // same exercise indices.
                let mut children = Vec::with_capacity(lp.exercises.len());
                for plan in &lp.exercises {
                    children.push(resolve(&mut exercises, plan, program, catalog)?);
                }

                for round in 1..=lp.rounds {
                    let round_info = RoundInfo {
                        loop_id: lp.id,
                        round,
                        total_rounds: lp.rounds,
                    };
                    for (plan, &index) in lp.exercises.iter().zip(&children) {
                        expand_sets(
                            &mut timeline,
                            index,
                            plan,
                            &exercises[index].exercise,
                            Some(round_info),
                        );
                    }
                    // The round's last set rests for the between-rounds
                    // interval instead of its own; the final round keeps
                    // the set's own interval.
                    if round < lp.rounds {
                        if let Some(last) = timeline.last_mut() {
                            last.interval_seconds = lp.rest_between_rounds;
                        }
                    }
                }
            }
        }
    }

    tracing::debug!(
        "Built session for '{}': {} sets across {} exercise occurrences",
        program.id,
        timeline.len(),
        exercises.len()
    );

    Ok(ExecutionSession {
        program_id: program.id.clone(),
        program_name: program.name.clone(),
        started_at: Utc::now(),
        exercises,
        timeline,
        comment: String::new(),
    })
}

/// Resolve one prescription against the catalog, returning its index in
/// the session's exercise list.
fn resolve(
    resolved: &mut Vec<ResolvedExercise>,
    plan: &ProgramExercise,
    program: &Program,
    catalog: &Catalog,
) -> Result<usize> {
    if plan.sets < 1 {
        return Err(Error::InvalidDefinition(format!(
            "exercise '{}' in program '{}' has zero sets",
            plan.exercise_id, program.id
        )));
    }
    let exercise = catalog
        .exercises
        .get(&plan.exercise_id)
        .ok_or_else(|| Error::UnknownExercise(plan.exercise_id.clone()))?;

    resolved.push(ResolvedExercise {
        plan: plan.clone(),
        exercise: exercise.clone(),
    });
    Ok(resolved.len() - 1)
}

fn expand_sets(
    timeline: &mut Vec<ExecutionSet>,
    exercise_index: usize,
    plan: &ProgramExercise,
    exercise: &Exercise,
    round: Option<RoundInfo>,
) {
    for set_number in 1..=plan.sets {
        match exercise.laterality {
            Laterality::Bilateral => {
                timeline.push(make_set(exercise_index, set_number, Side::None, plan, round));
            }
            Laterality::Unilateral => {
                timeline.push(make_set(exercise_index, set_number, Side::Right, plan, round));
                timeline.push(make_set(exercise_index, set_number, Side::Left, plan, round));
            }
        }
    }
}

fn make_set(
    exercise_index: usize,
    set_number: u32,
    side: Side,
    plan: &ProgramExercise,
    round: Option<RoundInfo>,
) -> ExecutionSet {
    ExecutionSet {
        exercise_index,
        set_number,
        side,
        target_value: plan.target_value,
        interval_seconds: plan.interval_seconds,
        round,
        actual_value: plan.target_value,
        is_completed: false,
        is_skipped: false,
    }
}
