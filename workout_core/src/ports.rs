//! Host-facing collaborator interfaces.
//!
//! The engine never touches audio hardware, screens, or the platform's
//! idle inhibitor itself. It asks for cues and keep-alive through these
//! traits and the embedding host decides what they mean.

/// Audible cue kinds the engine can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    /// Single short beep (countdown steps, rep counts, reminders)
    Short,
    /// Completion signal, distinct from the short beep
    Completion,
}

/// Visual cue kinds the engine can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualCue {
    /// Brief flash marking a phase boundary
    Flash,
    /// Completion flash
    Completion,
}

/// A cue requested by the timer, before master switches are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueRequest {
    Audio(AudioCue),
    Visual(VisualCue),
}

/// Sink for cues. Implementations must be fire-and-forget; the engine
/// never waits on cue delivery.
pub trait CuePort {
    fn emit_audio_cue(&mut self, cue: AudioCue);
    fn emit_visual_cue(&mut self, cue: VisualCue);
}

/// Keeps the host device awake while a session is active.
pub trait KeepAlivePort {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Cue sink that discards everything.
pub struct NullCues;

impl CuePort for NullCues {
    fn emit_audio_cue(&mut self, _cue: AudioCue) {}
    fn emit_visual_cue(&mut self, _cue: VisualCue) {}
}

/// Keep-alive that does nothing, for hosts without an idle inhibitor.
pub struct NullKeepAlive;

impl KeepAlivePort for NullKeepAlive {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}
