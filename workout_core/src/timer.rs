//! Per-set timer state machine.
//!
//! The timer owns no clock and spawns no threads. The host delivers one
//! `tick()` per elapsed second and the machine answers with cue requests
//! and at most one state event. Commands (pause, complete, abort, retry,
//! adjust) are plain method calls between ticks.
//!
//! A set activation moves through up to four phases:
//! Countdown -> Executing -> Interval -> Done. The countdown only exists
//! before the session's first set; the interval only when rest is due.

use crate::ports::{AudioCue, CueRequest, VisualCue};
use crate::types::{ExecutionSet, Exercise, ExerciseKind, SetPatch};

/// How a set concludes once its target is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceMode {
    /// The timer records the set the moment the target is reached
    Auto,
    /// The user confirms; counting continues past the target
    Manual,
}

/// Behavioral variant of the executing phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerVariant {
    pub kind: ExerciseKind,
    pub mode: AdvanceMode,
}

/// Phase of one set activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPhase {
    /// Pre-session countdown, seconds remaining
    Countdown { remaining: u32 },
    /// Working through the set
    Executing,
    /// Resting after the set was recorded, seconds remaining
    Interval { remaining: u32 },
    /// Nothing left for this activation
    Done,
}

/// Cue behavior knobs, sourced from [`Config`](crate::Config).
#[derive(Clone, Copy, Debug)]
pub struct TimerOptions {
    /// Countdown length before the first set; 0 disables it
    pub countdown_seconds: u32,
    /// Short beep on each counted rep below the target
    pub sub_target_rep_cues: bool,
    /// Reminder beeps at the rest-interval cadence during holds
    pub hold_reminder_cues: bool,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            countdown_seconds: 5,
            sub_target_rep_cues: true,
            hold_reminder_cues: true,
        }
    }
}

/// State transition reported by a tick or command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown hit zero; the set is now executing
    CountdownFinished { set_index: usize },
    /// The set produced its outcome
    SetRecorded { set_index: usize, patch: SetPatch },
    /// The rest interval elapsed
    IntervalFinished { set_index: usize },
}

/// Everything one tick or command produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Cues to emit, before master switches are applied
    pub cues: Vec<CueRequest>,
    /// At most one state event per call
    pub event: Option<TimerEvent>,
}

/// Timer for one set activation.
///
/// Jumping to or redoing a set creates a fresh `SetTimer`; accumulated
/// counters never survive across activations.
#[derive(Clone, Debug)]
pub struct SetTimer {
    set_index: usize,
    variant: TimerVariant,
    target_value: u32,
    /// Seconds per counted repetition, at least 1
    rep_duration: u32,
    /// Rest scheduled after this set records; 0 skips the interval phase
    interval_after: u32,
    /// Cadence of hold reminder beeps, from the set's own rest interval
    reminder_every: u32,
    options: TimerOptions,
    phase: TimerPhase,
    paused: bool,
    /// Seconds spent executing this activation
    elapsed: u32,
    /// Repetitions counted so far
    reps: u32,
    /// Manual correction merged into the recorded value
    adjustment: i32,
    /// Set once the activation has produced its SetRecorded event
    recorded: bool,
}

impl SetTimer {
    /// Start a fresh activation for one timeline set.
    ///
    /// `interval_after` is the effective rest once the set records; the
    /// caller passes 0 for the session's last set. `with_countdown` is
    /// only honored when the options carry a non-zero countdown.
    pub fn activate(
        set_index: usize,
        set: &ExecutionSet,
        exercise: &Exercise,
        mode: AdvanceMode,
        interval_after: u32,
        with_countdown: bool,
        options: TimerOptions,
    ) -> Self {
        let phase = if with_countdown && options.countdown_seconds > 0 {
            TimerPhase::Countdown {
                remaining: options.countdown_seconds,
            }
        } else {
            TimerPhase::Executing
        };

        Self {
            set_index,
            variant: TimerVariant {
                kind: exercise.kind,
                mode,
            },
            target_value: set.target_value,
            rep_duration: exercise.rep_duration_or_default().max(1),
            interval_after,
            reminder_every: set.interval_seconds,
            options,
            phase,
            paused: false,
            elapsed: 0,
            reps: 0,
            adjustment: 0,
            recorded: false,
        }
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advance the machine by one second.
    ///
    /// Paused timers ignore ticks entirely. After the activation has
    /// recorded and rested out, further ticks are no-ops.
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            return TickOutcome::default();
        }
        match self.phase {
            TimerPhase::Countdown { remaining } => self.countdown_tick(remaining),
            TimerPhase::Executing => match self.variant.kind {
                ExerciseKind::Isometric => self.isometric_tick(),
                ExerciseKind::Dynamic => self.dynamic_tick(),
            },
            TimerPhase::Interval { remaining } => self.interval_tick(remaining),
            TimerPhase::Done => TickOutcome::default(),
        }
    }

    fn countdown_tick(&mut self, remaining: u32) -> TickOutcome {
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.phase = TimerPhase::Executing;
            return TickOutcome {
                cues: vec![
                    CueRequest::Audio(AudioCue::Short),
                    CueRequest::Visual(VisualCue::Flash),
                ],
                event: Some(TimerEvent::CountdownFinished {
                    set_index: self.set_index,
                }),
            };
        }

        self.phase = TimerPhase::Countdown { remaining };
        let mut outcome = TickOutcome::default();
        if remaining <= 3 {
            outcome.cues.push(CueRequest::Audio(AudioCue::Short));
        }
        outcome
    }

    fn isometric_tick(&mut self) -> TickOutcome {
        self.elapsed += 1;

        if self.variant.mode == AdvanceMode::Auto && self.elapsed >= self.target_value {
            return self.record_completion();
        }

        let mut outcome = TickOutcome::default();
        // Reminder beeps pace the hold below the target; past it the user
        // already knows they are done.
        if self.options.hold_reminder_cues
            && self.reminder_every > 0
            && self.elapsed % self.reminder_every == 0
            && self.elapsed < self.target_value
        {
            outcome.cues.push(CueRequest::Audio(AudioCue::Short));
        }
        outcome
    }

    fn dynamic_tick(&mut self) -> TickOutcome {
        self.elapsed += 1;

        let mut outcome = TickOutcome::default();
        if self.elapsed % self.rep_duration == 0 {
            self.reps += 1;

            if self.variant.mode == AdvanceMode::Auto && self.reps >= self.target_value {
                return self.record_completion();
            }
            if self.options.sub_target_rep_cues && self.reps < self.target_value {
                outcome.cues.push(CueRequest::Audio(AudioCue::Short));
            }
        }
        outcome
    }

    fn interval_tick(&mut self, remaining: u32) -> TickOutcome {
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.phase = TimerPhase::Done;
            return TickOutcome {
                cues: vec![
                    CueRequest::Audio(AudioCue::Short),
                    CueRequest::Visual(VisualCue::Flash),
                ],
                event: Some(TimerEvent::IntervalFinished {
                    set_index: self.set_index,
                }),
            };
        }
        self.phase = TimerPhase::Interval { remaining };
        TickOutcome::default()
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Record the set as completed now. Legal in every variant while
    /// executing; ignored in any other phase.
    pub fn complete(&mut self) -> TickOutcome {
        if self.phase != TimerPhase::Executing {
            return TickOutcome::default();
        }
        self.record_completion()
    }

    /// Abort the set, recording whatever was accumulated as a skip.
    ///
    /// Legal during the countdown or while executing. An aborted set
    /// takes no rest interval.
    pub fn abort(&mut self) -> TickOutcome {
        match self.phase {
            TimerPhase::Countdown { .. } | TimerPhase::Executing => {
                self.recorded = true;
                let patch = SetPatch::skipped(self.recorded_value());
                self.phase = TimerPhase::Done;
                TickOutcome {
                    cues: Vec::new(),
                    event: Some(TimerEvent::SetRecorded {
                        set_index: self.set_index,
                        patch,
                    }),
                }
            }
            _ => TickOutcome::default(),
        }
    }

    /// Restart the activation from zero.
    ///
    /// Discards elapsed time, reps, and any adjustment; no other set is
    /// affected. Ignored once the set has recorded.
    pub fn retry(&mut self) {
        match self.phase {
            TimerPhase::Countdown { .. } => {
                self.reset_counters();
                self.phase = TimerPhase::Countdown {
                    remaining: self.options.countdown_seconds,
                };
            }
            TimerPhase::Executing => {
                self.reset_counters();
            }
            _ => {}
        }
    }

    /// Apply a manual correction to the value being accumulated.
    ///
    /// Only meaningful while executing; the recorded value is clamped at
    /// zero no matter how negative the adjustment goes.
    pub fn adjust(&mut self, delta: i32) {
        if self.phase == TimerPhase::Executing {
            self.adjustment = self.adjustment.saturating_add(delta);
        }
    }

    /// Cut the rest interval short. Ignored outside the interval phase.
    pub fn skip_interval(&mut self) -> TickOutcome {
        match self.phase {
            TimerPhase::Interval { .. } => {
                self.phase = TimerPhase::Done;
                TickOutcome {
                    cues: Vec::new(),
                    event: Some(TimerEvent::IntervalFinished {
                        set_index: self.set_index,
                    }),
                }
            }
            _ => TickOutcome::default(),
        }
    }

    fn reset_counters(&mut self) {
        self.elapsed = 0;
        self.reps = 0;
        self.adjustment = 0;
    }

    fn record_completion(&mut self) -> TickOutcome {
        if self.recorded {
            return TickOutcome::default();
        }
        self.recorded = true;
        let patch = SetPatch::completed(self.recorded_value());
        self.phase = if self.interval_after > 0 {
            TimerPhase::Interval {
                remaining: self.interval_after,
            }
        } else {
            TimerPhase::Done
        };
        TickOutcome {
            cues: vec![
                CueRequest::Audio(AudioCue::Completion),
                CueRequest::Visual(VisualCue::Completion),
            ],
            event: Some(TimerEvent::SetRecorded {
                set_index: self.set_index,
                patch,
            }),
        }
    }

    fn recorded_value(&self) -> u32 {
        let accumulated = match self.variant.kind {
            ExerciseKind::Isometric => self.elapsed,
            ExerciseKind::Dynamic => self.reps,
        };
        let value = i64::from(accumulated) + i64::from(self.adjustment);
        value.clamp(0, i64::from(u32::MAX)) as u32
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn set_index(&self) -> usize {
        self.set_index
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn variant(&self) -> TimerVariant {
        self.variant
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn adjustment(&self) -> i32 {
        self.adjustment
    }

    /// The value currently accumulating: held seconds or counted reps.
    pub fn display_value(&self) -> u32 {
        match self.variant.kind {
            ExerciseKind::Isometric => self.elapsed,
            ExerciseKind::Dynamic => self.reps,
        }
    }

    /// Whether the accumulated value has reached the target. In manual
    /// mode this drives the "done, awaiting confirmation" display state.
    pub fn target_reached(&self) -> bool {
        self.display_value() >= self.target_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Laterality, Side};

    fn test_set(target: u32, interval: u32) -> ExecutionSet {
        ExecutionSet {
            exercise_index: 0,
            set_number: 1,
            side: Side::None,
            target_value: target,
            interval_seconds: interval,
            round: None,
            actual_value: target,
            is_completed: false,
            is_skipped: false,
        }
    }

    fn test_exercise(kind: ExerciseKind, rep_duration: Option<u32>) -> Exercise {
        Exercise {
            id: "x".to_string(),
            name: "X".to_string(),
            kind,
            laterality: Laterality::Bilateral,
            rep_duration,
            default_target: None,
            default_sets: None,
            default_interval: None,
        }
    }

    fn no_countdown() -> TimerOptions {
        TimerOptions {
            countdown_seconds: 0,
            ..TimerOptions::default()
        }
    }

    fn recorded_patch(outcome: &TickOutcome) -> Option<SetPatch> {
        match outcome.event {
            Some(TimerEvent::SetRecorded { patch, .. }) => Some(patch),
            _ => None,
        }
    }

    #[test]
    fn test_isometric_auto_completes_at_target() {
        let set = test_set(3, 30);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 30, false, no_countdown());

        assert_eq!(timer.phase(), TimerPhase::Executing);
        assert!(timer.tick().event.is_none());
        assert!(timer.tick().event.is_none());

        let outcome = timer.tick();
        let patch = recorded_patch(&outcome).expect("completion on third tick");
        assert_eq!(patch, SetPatch::completed(3));
        assert!(outcome
            .cues
            .contains(&CueRequest::Audio(AudioCue::Completion)));
        assert_eq!(timer.phase(), TimerPhase::Interval { remaining: 30 });
    }

    #[test]
    fn test_no_interval_goes_straight_to_done() {
        let set = test_set(2, 30);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 0, false, no_countdown());

        timer.tick();
        timer.tick();
        assert_eq!(timer.phase(), TimerPhase::Done);
    }

    #[test]
    fn test_isometric_manual_counts_past_target() {
        let set = test_set(2, 30);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Manual, 30, false, no_countdown());

        for _ in 0..5 {
            assert!(timer.tick().event.is_none());
        }
        assert_eq!(timer.display_value(), 5);
        assert!(timer.target_reached());
        assert_eq!(timer.phase(), TimerPhase::Executing);

        let outcome = timer.complete();
        assert_eq!(recorded_patch(&outcome), Some(SetPatch::completed(5)));
    }

    #[test]
    fn test_dynamic_auto_counts_reps_and_completes() {
        let set = test_set(3, 60);
        let ex = test_exercise(ExerciseKind::Dynamic, Some(2));
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 60, false, no_countdown());

        // rep boundary every 2 seconds
        assert!(timer.tick().cues.is_empty());
        let rep1 = timer.tick();
        assert_eq!(timer.display_value(), 1);
        assert!(rep1.cues.contains(&CueRequest::Audio(AudioCue::Short)));

        timer.tick();
        timer.tick();
        assert_eq!(timer.display_value(), 2);

        timer.tick();
        let outcome = timer.tick();
        assert_eq!(recorded_patch(&outcome), Some(SetPatch::completed(3)));
    }

    #[test]
    fn test_dynamic_manual_with_adjustment() {
        let set = test_set(2, 60);
        let ex = test_exercise(ExerciseKind::Dynamic, Some(1));
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Manual, 60, false, no_countdown());

        for _ in 0..4 {
            timer.tick();
        }
        assert_eq!(timer.display_value(), 4);
        assert!(timer.target_reached());

        timer.adjust(-1);
        let outcome = timer.complete();
        assert_eq!(recorded_patch(&outcome), Some(SetPatch::completed(3)));
    }

    #[test]
    fn test_adjustment_clamps_at_zero() {
        let set = test_set(10, 60);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Manual, 60, false, no_countdown());

        timer.tick();
        timer.tick();
        timer.adjust(-100);
        let outcome = timer.complete();
        assert_eq!(recorded_patch(&outcome), Some(SetPatch::completed(0)));
    }

    #[test]
    fn test_pause_freezes_counters() {
        let set = test_set(10, 60);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 60, false, no_countdown());

        timer.tick();
        timer.tick();
        timer.pause();
        for _ in 0..5 {
            assert_eq!(timer.tick(), TickOutcome::default());
        }
        assert_eq!(timer.display_value(), 2);

        timer.resume();
        timer.tick();
        assert_eq!(timer.display_value(), 3);
    }

    #[test]
    fn test_retry_resets_counters_in_place() {
        let set = test_set(10, 60);
        let ex = test_exercise(ExerciseKind::Dynamic, Some(1));
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 60, false, no_countdown());

        for _ in 0..4 {
            timer.tick();
        }
        timer.adjust(2);
        assert_eq!(timer.display_value(), 4);

        timer.retry();
        assert_eq!(timer.display_value(), 0);
        assert_eq!(timer.adjustment(), 0);
        assert_eq!(timer.phase(), TimerPhase::Executing);
    }

    #[test]
    fn test_abort_records_skip_without_rest() {
        let set = test_set(10, 60);
        let ex = test_exercise(ExerciseKind::Dynamic, Some(1));
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 60, false, no_countdown());

        timer.tick();
        timer.tick();
        let outcome = timer.abort();
        assert_eq!(recorded_patch(&outcome), Some(SetPatch::skipped(2)));
        assert_eq!(timer.phase(), TimerPhase::Done);
    }

    #[test]
    fn test_abort_during_countdown_records_zero() {
        let set = test_set(10, 60);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer = SetTimer::activate(
            0,
            &set,
            &ex,
            AdvanceMode::Auto,
            60,
            true,
            TimerOptions::default(),
        );

        assert!(matches!(timer.phase(), TimerPhase::Countdown { .. }));
        let outcome = timer.abort();
        assert_eq!(recorded_patch(&outcome), Some(SetPatch::skipped(0)));
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let set = test_set(1, 10);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 10, false, no_countdown());

        let mut recorded = 0;
        for _ in 0..20 {
            if recorded_patch(&timer.tick()).is_some() {
                recorded += 1;
            }
            // poking completion after the fact must not record again
            assert!(timer.complete().event.is_none());
        }
        assert_eq!(recorded, 1);
    }

    #[test]
    fn test_interval_counts_down_and_finishes() {
        let set = test_set(1, 3);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 3, false, no_countdown());

        timer.tick(); // completes, enters 3s interval
        assert_eq!(timer.phase(), TimerPhase::Interval { remaining: 3 });

        assert!(timer.tick().event.is_none());
        assert!(timer.tick().event.is_none());
        let outcome = timer.tick();
        assert_eq!(
            outcome.event,
            Some(TimerEvent::IntervalFinished { set_index: 0 })
        );
        assert_eq!(timer.phase(), TimerPhase::Done);
    }

    #[test]
    fn test_countdown_beeps_then_starts() {
        let set = test_set(5, 30);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let options = TimerOptions {
            countdown_seconds: 4,
            ..TimerOptions::default()
        };
        let mut timer = SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 30, true, options);

        assert_eq!(timer.phase(), TimerPhase::Countdown { remaining: 4 });
        let t1 = timer.tick(); // 3 left
        assert!(t1.cues.contains(&CueRequest::Audio(AudioCue::Short)));
        timer.tick(); // 2 left
        timer.tick(); // 1 left
        let last = timer.tick();
        assert_eq!(
            last.event,
            Some(TimerEvent::CountdownFinished { set_index: 0 })
        );
        assert_eq!(timer.phase(), TimerPhase::Executing);
        // counting starts after the countdown, not during it
        assert_eq!(timer.display_value(), 0);
    }

    #[test]
    fn test_retry_during_countdown_restarts_it() {
        let set = test_set(5, 30);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let options = TimerOptions {
            countdown_seconds: 5,
            ..TimerOptions::default()
        };
        let mut timer = SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 30, true, options);

        timer.tick();
        timer.tick();
        assert_eq!(timer.phase(), TimerPhase::Countdown { remaining: 3 });
        timer.retry();
        assert_eq!(timer.phase(), TimerPhase::Countdown { remaining: 5 });
    }

    #[test]
    fn test_hold_reminder_cadence() {
        let set = test_set(10, 3);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Manual, 3, false, no_countdown());

        let mut beeps = Vec::new();
        for second in 1..=12 {
            let outcome = timer.tick();
            if outcome.cues.contains(&CueRequest::Audio(AudioCue::Short)) {
                beeps.push(second);
            }
        }
        // every 3 seconds below the 10s target, silent past it
        assert_eq!(beeps, vec![3, 6, 9]);
    }

    #[test]
    fn test_hold_reminders_can_be_disabled() {
        let set = test_set(10, 3);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let options = TimerOptions {
            countdown_seconds: 0,
            hold_reminder_cues: false,
            ..TimerOptions::default()
        };
        let mut timer = SetTimer::activate(0, &set, &ex, AdvanceMode::Manual, 3, false, options);

        for _ in 0..9 {
            assert!(timer.tick().cues.is_empty());
        }
    }

    #[test]
    fn test_sub_target_rep_cues_can_be_disabled() {
        let set = test_set(5, 60);
        let ex = test_exercise(ExerciseKind::Dynamic, Some(1));
        let options = TimerOptions {
            countdown_seconds: 0,
            sub_target_rep_cues: false,
            ..TimerOptions::default()
        };
        let mut timer = SetTimer::activate(0, &set, &ex, AdvanceMode::Manual, 60, false, options);

        for _ in 0..4 {
            assert!(timer.tick().cues.is_empty());
        }
        assert_eq!(timer.display_value(), 4);
    }

    #[test]
    fn test_skip_interval_cuts_rest() {
        let set = test_set(1, 30);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 30, false, no_countdown());

        // ignored while still executing
        assert_eq!(timer.skip_interval(), TickOutcome::default());

        timer.tick(); // records, rest begins
        let outcome = timer.skip_interval();
        assert_eq!(
            outcome.event,
            Some(TimerEvent::IntervalFinished { set_index: 0 })
        );
        assert_eq!(timer.phase(), TimerPhase::Done);
    }

    #[test]
    fn test_adjust_ignored_outside_executing() {
        let set = test_set(1, 5);
        let ex = test_exercise(ExerciseKind::Isometric, None);
        let mut timer =
            SetTimer::activate(0, &set, &ex, AdvanceMode::Auto, 5, false, no_countdown());

        timer.tick(); // recorded, resting
        timer.adjust(5);
        assert_eq!(timer.adjustment(), 0);
    }
}
