//! Session navigation and tick routing.
//!
//! One [`SessionNavigator`] owns a running session: the cursor into the
//! timeline, the [`SetTimer`](crate::timer::SetTimer) for the active set,
//! and the pause/overlay flags. The host drives it with one tick per
//! second and a handful of commands; advancing to the next set happens
//! inside the navigator when a set records and its rest elapses.
//!
//! Tick delivery is keyed. Every command that restructures timing changes
//! the [`TickerKey`]; a tick delivered under an outdated key is dropped
//! silently, so a tick that raced a jump can never mutate the wrong set.

use crate::ports::{CuePort, CueRequest, KeepAlivePort};
use crate::timer::{AdvanceMode, SetTimer, TickOutcome, TimerEvent, TimerOptions, TimerPhase};
use crate::types::{ExecutionSession, ExecutionSet, SetPatch};
use crate::{Error, Result};
use std::path::Path;

/// Per-session behavior switches.
#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    pub advance_mode: AdvanceMode,
    pub timer: TimerOptions,
    /// Master switch for audio cues
    pub audio_cues: bool,
    /// Master switch for visual cues
    pub visual_cues: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            advance_mode: AdvanceMode::Auto,
            timer: TimerOptions::default(),
            audio_cues: true,
            visual_cues: true,
        }
    }
}

/// Identity of the tick stream the host must currently deliver under.
///
/// Re-read it after every command; [`SessionNavigator::deliver_tick`]
/// drops anything carrying a stale key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickerKey {
    pub set_index: usize,
    pub paused: bool,
    pub overlay_open: bool,
    pub epoch: u64,
}

/// Session-level happenings the host may want to surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A set activation began executing
    SetStarted { index: usize },
    /// A set got its outcome
    SetRecorded {
        index: usize,
        completed: bool,
        actual_value: u32,
    },
    /// Rest began after a recorded set
    RestStarted { index: usize, seconds: u32 },
    /// Every timeline set has an outcome
    SessionComplete,
}

/// Drives one execution session from start to finish.
pub struct SessionNavigator {
    session: ExecutionSession,
    timer: SetTimer,
    cursor: usize,
    options: SessionOptions,
    overlay_open: bool,
    user_paused: bool,
    /// Bumped whenever timing restructures outside the other key fields
    epoch: u64,
    /// Once true, later activations skip the countdown
    first_set_started: bool,
    complete: bool,
    cues: Box<dyn CuePort>,
    keepalive: Box<dyn KeepAlivePort>,
    keepalive_active: bool,
}

impl std::fmt::Debug for SessionNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionNavigator")
            .field("cursor", &self.cursor)
            .field("overlay_open", &self.overlay_open)
            .field("user_paused", &self.user_paused)
            .field("epoch", &self.epoch)
            .field("first_set_started", &self.first_set_started)
            .field("complete", &self.complete)
            .field("keepalive_active", &self.keepalive_active)
            .finish_non_exhaustive()
    }
}

impl SessionNavigator {
    /// Take over a session and activate its first pending set.
    ///
    /// A freshly built session starts at set 0 with the countdown (when
    /// configured); a resumed session starts at its first pending set
    /// with no countdown.
    pub fn new(
        session: ExecutionSession,
        options: SessionOptions,
        cues: Box<dyn CuePort>,
        mut keepalive: Box<dyn KeepAlivePort>,
    ) -> Result<Self> {
        if session.timeline.is_empty() {
            return Err(Error::Session(
                "cannot run a session with an empty timeline".to_string(),
            ));
        }
        // A built session holds this by construction; one from a damaged
        // resume file may not, and activation indexes into the exercises.
        session.check_exercise_indices()?;

        let first_pending = session.timeline.iter().position(|s| s.is_pending());
        let cursor = first_pending.unwrap_or(0);
        let complete = first_pending.is_none();
        let first_set_started = session.timeline.iter().any(|s| s.is_recorded());

        keepalive.start();

        let timer = Self::activation(&session, cursor, !first_set_started, &options);
        let mut nav = Self {
            session,
            timer,
            cursor,
            options,
            overlay_open: false,
            user_paused: false,
            epoch: 0,
            first_set_started,
            complete,
            cues,
            keepalive,
            keepalive_active: true,
        };
        if nav.timer.phase() == TimerPhase::Executing {
            nav.first_set_started = true;
        }
        Ok(nav)
    }

    fn activation(
        session: &ExecutionSession,
        cursor: usize,
        with_countdown: bool,
        options: &SessionOptions,
    ) -> SetTimer {
        let set = &session.timeline[cursor];
        let exercise = &session.exercises[set.exercise_index].exercise;
        // the session's last set takes no rest
        let interval_after = if cursor + 1 < session.timeline.len() {
            set.interval_seconds
        } else {
            0
        };
        SetTimer::activate(
            cursor,
            set,
            exercise,
            options.advance_mode,
            interval_after,
            with_countdown,
            options.timer,
        )
    }

    /// Replace the timer with a fresh activation of the cursor's set.
    fn activate_current(&mut self) {
        self.timer = Self::activation(
            &self.session,
            self.cursor,
            !self.first_set_started,
            &self.options,
        );
        if self.timer.phase() == TimerPhase::Executing {
            self.first_set_started = true;
        }
        self.epoch += 1;
        self.sync_pause();
    }

    fn effective_paused(&self) -> bool {
        self.user_paused || self.overlay_open
    }

    fn sync_pause(&mut self) {
        let paused = self.effective_paused();
        self.timer.set_paused(paused);
    }

    // ------------------------------------------------------------------
    // Ticks
    // ------------------------------------------------------------------

    /// The key ticks must currently carry.
    pub fn ticker_key(&self) -> TickerKey {
        TickerKey {
            set_index: self.cursor,
            paused: self.effective_paused(),
            overlay_open: self.overlay_open,
            epoch: self.epoch,
        }
    }

    /// Deliver one elapsed second.
    ///
    /// A tick scheduled before the last command carries an old key and is
    /// dropped without touching any state.
    pub fn deliver_tick(&mut self, key: TickerKey) -> Result<Vec<SessionEvent>> {
        if key != self.ticker_key() {
            tracing::debug!(
                "Dropping stale tick for set {} (epoch {})",
                key.set_index,
                key.epoch
            );
            return Ok(Vec::new());
        }
        if self.complete {
            return Ok(Vec::new());
        }

        let outcome = self.timer.tick();
        self.apply_outcome(outcome)
    }

    fn apply_outcome(&mut self, outcome: TickOutcome) -> Result<Vec<SessionEvent>> {
        self.dispatch_cues(&outcome.cues);

        let mut events = Vec::new();
        match outcome.event {
            None => {}
            Some(TimerEvent::CountdownFinished { set_index }) => {
                self.first_set_started = true;
                events.push(SessionEvent::SetStarted { index: set_index });
            }
            Some(TimerEvent::SetRecorded { set_index, patch }) => {
                self.session.update_set(set_index, patch)?;
                let set = &self.session.timeline[set_index];
                events.push(SessionEvent::SetRecorded {
                    index: set_index,
                    completed: set.is_completed,
                    actual_value: set.actual_value,
                });
                match self.timer.phase() {
                    TimerPhase::Interval { remaining } => {
                        events.push(SessionEvent::RestStarted {
                            index: set_index,
                            seconds: remaining,
                        });
                    }
                    TimerPhase::Done => events.extend(self.advance()),
                    _ => {}
                }
            }
            Some(TimerEvent::IntervalFinished { .. }) => {
                events.extend(self.advance());
            }
        }
        Ok(events)
    }

    /// Move to the next pending set past the cursor, or close out the
    /// session when none remains.
    ///
    /// Sets that already have an outcome are stepped over; re-running
    /// them automatically would overwrite results the user kept.
    fn advance(&mut self) -> Vec<SessionEvent> {
        let next = self.session.timeline[self.cursor + 1..]
            .iter()
            .position(|s| s.is_pending())
            .map(|offset| self.cursor + 1 + offset);

        match next {
            Some(index) => {
                self.cursor = index;
                self.user_paused = false;
                self.activate_current();
                vec![SessionEvent::SetStarted { index }]
            }
            None => {
                self.complete = true;
                tracing::info!(
                    "Session '{}' complete: {}/{} sets recorded",
                    self.session.program_id,
                    self.session.recorded_count(),
                    self.session.timeline.len()
                );
                vec![SessionEvent::SessionComplete]
            }
        }
    }

    fn dispatch_cues(&mut self, cues: &[CueRequest]) {
        for cue in cues {
            match *cue {
                CueRequest::Audio(a) if self.options.audio_cues => self.cues.emit_audio_cue(a),
                CueRequest::Visual(v) if self.options.visual_cues => self.cues.emit_visual_cue(v),
                _ => {}
            }
        }
    }

    // ------------------------------------------------------------------
    // Set commands
    // ------------------------------------------------------------------

    pub fn pause(&mut self) {
        self.user_paused = true;
        self.sync_pause();
    }

    pub fn resume(&mut self) {
        self.user_paused = false;
        self.sync_pause();
    }

    /// Record the active set as completed now.
    pub fn complete_current(&mut self) -> Result<Vec<SessionEvent>> {
        if self.complete {
            return Ok(Vec::new());
        }
        let outcome = self.timer.complete();
        self.apply_outcome(outcome)
    }

    /// Abort the active set, recording accumulated progress as a skip.
    pub fn abort_current(&mut self) -> Result<Vec<SessionEvent>> {
        if self.complete {
            return Ok(Vec::new());
        }
        let outcome = self.timer.abort();
        self.apply_outcome(outcome)
    }

    /// Restart the active set's activation from zero.
    pub fn retry_current(&mut self) {
        self.timer.retry();
        // in-flight ticks from before the restart must not count
        self.epoch += 1;
    }

    /// Apply a manual correction to the accumulating value.
    pub fn adjust_current(&mut self, delta: i32) {
        self.timer.adjust(delta);
    }

    /// Cut the current rest short and move on.
    pub fn skip_rest(&mut self) -> Result<Vec<SessionEvent>> {
        if self.complete {
            return Ok(Vec::new());
        }
        let outcome = self.timer.skip_interval();
        self.apply_outcome(outcome)
    }

    // ------------------------------------------------------------------
    // Overview overlay
    // ------------------------------------------------------------------

    /// Open the session overview. The active timer pauses while it is up.
    pub fn open_overview(&mut self) {
        if !self.overlay_open {
            self.overlay_open = true;
            self.sync_pause();
        }
    }

    /// Close the overview. Counting resumes unless the user had paused
    /// explicitly before opening it.
    pub fn close_overview(&mut self) {
        if self.overlay_open {
            self.overlay_open = false;
            self.sync_pause();
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Jump to a pending or skipped set and activate it fresh.
    ///
    /// Completed sets are not valid targets; redo exists for those. On
    /// rejection nothing changes.
    pub fn jump_to_set(&mut self, target: usize) -> Result<Vec<SessionEvent>> {
        let set = self.target_set(target)?;
        if set.is_completed {
            return Err(Error::IllegalNavigation(format!(
                "set {} is already completed; redo it instead",
                target
            )));
        }

        self.cursor = target;
        self.complete = false;
        self.user_paused = false;
        self.activate_current();
        tracing::debug!("Jumped to set {}", target);
        Ok(vec![SessionEvent::SetStarted { index: target }])
    }

    /// Clear a completed set back to pending and activate it fresh.
    ///
    /// Only completed sets can be redone. Later sets keep their outcomes;
    /// a redo never cascades.
    pub fn redo_set(&mut self, target: usize) -> Result<Vec<SessionEvent>> {
        let set = self.target_set(target)?;
        if !set.is_completed {
            return Err(Error::IllegalNavigation(format!(
                "set {} has not been completed; nothing to redo",
                target
            )));
        }

        let target_value = set.target_value;
        self.session
            .update_set(target, SetPatch::cleared(target_value))?;
        self.cursor = target;
        self.complete = false;
        self.user_paused = false;
        self.activate_current();
        tracing::debug!("Redoing set {}", target);
        Ok(vec![SessionEvent::SetStarted { index: target }])
    }

    fn target_set(&self, target: usize) -> Result<&ExecutionSet> {
        self.session.timeline.get(target).ok_or_else(|| {
            Error::IllegalNavigation(format!("set index {} is out of range", target))
        })
    }

    // ------------------------------------------------------------------
    // Session end
    // ------------------------------------------------------------------

    /// Attach a comment to the session.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.session.comment = comment.into();
    }

    /// End the session, keeping every outcome as it stands. Pending sets
    /// stay pending in the returned snapshot.
    pub fn finish(mut self) -> ExecutionSession {
        self.stop_keepalive();
        tracing::info!(
            "Session '{}' finished: {}/{} sets recorded",
            self.session.program_id,
            self.session.recorded_count(),
            self.session.timeline.len()
        );
        self.session
    }

    /// Throw the session away.
    pub fn discard(mut self) {
        self.stop_keepalive();
        tracing::info!("Session '{}' discarded", self.session.program_id);
    }

    /// Save the session for later resume and end this run.
    pub fn save_and_exit(mut self, path: &Path) -> Result<()> {
        self.stop_keepalive();
        self.session.save(path)
    }

    fn stop_keepalive(&mut self) {
        if self.keepalive_active {
            self.keepalive.stop();
            self.keepalive_active = false;
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn session(&self) -> &ExecutionSession {
        &self.session
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_set(&self) -> &ExecutionSet {
        &self.session.timeline[self.cursor]
    }

    pub fn phase(&self) -> TimerPhase {
        self.timer.phase()
    }

    pub fn display_value(&self) -> u32 {
        self.timer.display_value()
    }

    pub fn adjustment(&self) -> i32 {
        self.timer.adjustment()
    }

    pub fn target_reached(&self) -> bool {
        self.timer.target_reached()
    }

    pub fn is_paused(&self) -> bool {
        self.user_paused
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
