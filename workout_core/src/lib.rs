#![forbid(unsafe_code)]

//! Core domain model and execution engine for calisthenics training
//!
//! This crate provides:
//! - Domain types (exercises, programs, loops, execution sessions)
//! - The exercise and program catalog with validation
//! - Session building (program expansion into a set timeline)
//! - The tick-driven per-set timer and session navigator
//! - Summary derivations (duration estimates, progress, warnings)
//! - Finished-session records with an append-only JSONL history

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod ports;
pub mod builder;
pub mod timer;
pub mod session;
pub mod navigator;
pub mod summary;
pub mod records;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, load_user_programs};
pub use config::Config;
pub use builder::build_session;
pub use timer::{AdvanceMode, SetTimer, TimerEvent, TimerOptions, TimerPhase, TimerVariant};
pub use navigator::{SessionEvent, SessionNavigator, SessionOptions, TickerKey};
pub use ports::{
    AudioCue, CuePort, CueRequest, KeepAlivePort, NullCues, NullKeepAlive, VisualCue,
};
pub use summary::{
    estimated_minutes, estimated_seconds, session_progress, zero_value_warning, SessionProgress,
};
pub use records::{
    read_recorded_sessions, JsonlSink, RecordedSession, RecordedSet, SessionSink,
};
