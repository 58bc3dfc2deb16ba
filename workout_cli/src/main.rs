//! Command-line interface for running training programs.
//!
//! `reps run` drives a session interactively: a background ticker and the
//! stdin reader feed one channel, and the main thread applies ticks and
//! commands to the session navigator. `--simulate` drives the same
//! navigator with synthetic ticks and no waiting.

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use workout_core::*;

#[derive(Parser)]
#[command(name = "reps")]
#[command(about = "Calisthenics program runner and training log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a training program (the default command)
    Run {
        /// Program to run
        #[arg(long, default_value = "foundation")]
        program: String,
        /// Confirm each set manually instead of auto-advancing
        #[arg(long)]
        manual: bool,
        /// Skip the pre-session countdown
        #[arg(long)]
        no_countdown: bool,
        /// Comment stored with the session record
        #[arg(long)]
        comment: Option<String>,
        /// Drive the session with synthetic ticks, without waiting
        #[arg(long)]
        simulate: bool,
    },
    /// Show a program's expanded timeline and estimated duration
    Plan {
        #[arg(long, default_value = "foundation")]
        program: String,
    },
    /// List available programs
    Programs,
    /// List recorded sessions
    Log {
        /// How many days back to include
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
    /// Resume a saved session
    Resume {
        /// Confirm each set manually instead of auto-advancing
        #[arg(long)]
        manual: bool,
        /// Comment stored with the session record
        #[arg(long)]
        comment: Option<String>,
        /// Drive the session with synthetic ticks, without waiting
        #[arg(long)]
        simulate: bool,
    },
}

fn main() {
    workout_core::logging::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Some(Commands::Run {
            program,
            manual,
            no_countdown,
            comment,
            simulate,
        }) => cmd_run(
            &config, &data_dir, &program, manual, no_countdown, comment, simulate,
        ),
        Some(Commands::Plan { program }) => cmd_plan(&data_dir, &program),
        Some(Commands::Programs) => cmd_programs(&data_dir),
        Some(Commands::Log { days }) => cmd_log(&data_dir, days),
        Some(Commands::Resume {
            manual,
            comment,
            simulate,
        }) => cmd_resume(&config, &data_dir, manual, comment, simulate),
        None => cmd_run(&config, &data_dir, "foundation", false, false, None, false),
    }
}

// ============================================================================
// Paths and catalog
// ============================================================================

fn sessions_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("sessions.jsonl")
}

fn resume_path(data_dir: &Path) -> PathBuf {
    data_dir.join("active_session.json")
}

fn user_programs_path(data_dir: &Path) -> PathBuf {
    data_dir.join("programs.json")
}

fn load_catalog(data_dir: &Path) -> Result<Catalog> {
    let mut catalog = build_default_catalog();
    catalog.merge_programs(load_user_programs(&user_programs_path(data_dir))?);

    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation failed:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation(format!(
            "{} problem(s) found",
            errors.len()
        )));
    }
    Ok(catalog)
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_run(
    config: &Config,
    data_dir: &Path,
    program_id: &str,
    manual: bool,
    no_countdown: bool,
    comment: Option<String>,
    simulate: bool,
) -> Result<()> {
    let catalog = load_catalog(data_dir)?;
    let program = catalog
        .programs
        .get(program_id)
        .ok_or_else(|| Error::UnknownProgram(program_id.to_string()))?;

    if resume_path(data_dir).exists() {
        println!("Note: a saved session exists; `reps resume` continues it.");
    }

    let session = build_session(program, &catalog)?;
    println!(
        "{}: {} sets, estimated {} min",
        session.program_name,
        session.timeline.len(),
        estimated_minutes(&session)
    );

    let options = session_options(config, manual, no_countdown);
    let mut navigator = SessionNavigator::new(
        session,
        options,
        cue_port(simulate),
        Box::new(NullKeepAlive),
    )?;
    if let Some(text) = comment {
        navigator.set_comment(text);
    }

    drive_session(navigator, data_dir, simulate, false)
}

fn cmd_plan(data_dir: &Path, program_id: &str) -> Result<()> {
    let catalog = load_catalog(data_dir)?;
    let program = catalog
        .programs
        .get(program_id)
        .ok_or_else(|| Error::UnknownProgram(program_id.to_string()))?;
    let session = build_session(program, &catalog)?;

    println!("{} ({})", session.program_name, session.program_id);
    for (i, set) in session.timeline.iter().enumerate() {
        println!(
            "  {:>3}. {:<44} {:>10}  rest {}s",
            i + 1,
            describe_set(&session, i),
            describe_target(&session, i),
            set.interval_seconds
        );
    }
    println!(
        "{} sets, estimated {} min",
        session.timeline.len(),
        estimated_minutes(&session)
    );
    Ok(())
}

fn cmd_programs(data_dir: &Path) -> Result<()> {
    let catalog = load_catalog(data_dir)?;
    let mut programs: Vec<_> = catalog.programs.values().collect();
    programs.sort_by(|a, b| a.id.cmp(&b.id));

    println!("Available programs:");
    for program in programs {
        let session = build_session(program, &catalog)?;
        println!(
            "  {:<14} {:<24} {} sets, ~{} min",
            program.id,
            program.name,
            session.timeline.len(),
            estimated_minutes(&session)
        );
    }
    Ok(())
}

fn cmd_log(data_dir: &Path, days: i64) -> Result<()> {
    let sessions = read_recorded_sessions(&sessions_log_path(data_dir))?;
    let cutoff = Utc::now() - chrono::Duration::days(days);
    let recent: Vec<_> = sessions.iter().filter(|s| s.finished_at >= cutoff).collect();

    if recent.is_empty() {
        println!("No sessions recorded in the last {} days.", days);
        return Ok(());
    }

    println!("Sessions from the last {} days:", days);
    for session in recent {
        let skipped = if session.skipped_count() > 0 {
            format!(", {} skipped", session.skipped_count())
        } else {
            String::new()
        };
        let comment = if session.comment.is_empty() {
            String::new()
        } else {
            format!("  ({})", session.comment)
        };
        println!(
            "  {}  {:<24} {:>2}/{} completed{}{}",
            session.finished_at.format("%Y-%m-%d %H:%M"),
            session.program_name,
            session.completed_count(),
            session.sets.len(),
            skipped,
            comment
        );
    }
    Ok(())
}

fn cmd_resume(
    config: &Config,
    data_dir: &Path,
    manual: bool,
    comment: Option<String>,
    simulate: bool,
) -> Result<()> {
    let path = resume_path(data_dir);
    if !path.exists() {
        return Err(Error::Session("no saved session to resume".to_string()));
    }

    let session = ExecutionSession::load(&path)?;
    println!(
        "Resuming {}: {}/{} sets recorded",
        session.program_name,
        session.recorded_count(),
        session.timeline.len()
    );

    let options = session_options(config, manual, false);
    let mut navigator = SessionNavigator::new(
        session,
        options,
        cue_port(simulate),
        Box::new(NullKeepAlive),
    )?;
    if let Some(text) = comment {
        navigator.set_comment(text);
    }

    drive_session(navigator, data_dir, simulate, true)
}

fn session_options(config: &Config, manual: bool, no_countdown: bool) -> SessionOptions {
    let mut options = config.session_options();
    if manual {
        options.advance_mode = AdvanceMode::Manual;
    }
    if no_countdown {
        options.timer.countdown_seconds = 0;
    }
    options
}

fn cue_port(simulate: bool) -> Box<dyn CuePort> {
    if simulate {
        Box::new(NullCues)
    } else {
        Box::new(TerminalCues)
    }
}

/// Cues rendered with what a terminal has: the bell for audio. Visual
/// cues are covered by the printed status updates.
struct TerminalCues;

impl CuePort for TerminalCues {
    fn emit_audio_cue(&mut self, _cue: AudioCue) {
        print!("\x07");
        let _ = io::stdout().flush();
    }

    fn emit_visual_cue(&mut self, _cue: VisualCue) {}
}

// ============================================================================
// Session driving
// ============================================================================

fn drive_session(
    navigator: SessionNavigator,
    data_dir: &Path,
    simulate: bool,
    clear_resume: bool,
) -> Result<()> {
    if simulate {
        drive_simulated(navigator, data_dir, clear_resume)
    } else {
        drive_interactive(navigator, data_dir, clear_resume)
    }
}

/// Run the whole session on synthetic ticks, confirming manual sets the
/// moment they reach their target.
fn drive_simulated(
    mut navigator: SessionNavigator,
    data_dir: &Path,
    clear_resume: bool,
) -> Result<()> {
    let manual = navigator.options().advance_mode == AdvanceMode::Manual;
    let max_ticks = 24 * 60 * 60;

    for _ in 0..max_ticks {
        if navigator.is_complete() {
            break;
        }
        let events = if manual
            && navigator.phase() == TimerPhase::Executing
            && navigator.target_reached()
        {
            navigator.complete_current()?
        } else {
            let key = navigator.ticker_key();
            navigator.deliver_tick(key)?
        };
        print_events(navigator.session(), &events);
    }

    if !navigator.is_complete() {
        return Err(Error::Session(
            "simulated session did not finish".to_string(),
        ));
    }
    finish_session(navigator, data_dir, clear_resume)
}

enum HostEvent {
    Tick,
    Line(String),
    Eof,
}

enum Disposition {
    Continue,
    Finish,
    SaveExit,
    Discard,
}

fn drive_interactive(
    mut navigator: SessionNavigator,
    data_dir: &Path,
    clear_resume: bool,
) -> Result<()> {
    println!(
        "Commands: Enter=done  p=pause  r=resume  t=retry  s=skip  n=skip rest  \
         +N/-N=adjust  o=overview  f=finish  x=save and exit  q=discard"
    );

    let (tx, rx) = mpsc::channel();

    let tick_tx = tx.clone();
    thread::spawn(move || loop {
        thread::sleep(Duration::from_secs(1));
        if tick_tx.send(HostEvent::Tick).is_err() {
            break;
        }
    });

    thread::spawn(move || {
        let stdin = io::stdin();
        loop {
            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    let _ = tx.send(HostEvent::Eof);
                    break;
                }
                Ok(_) => {
                    if tx.send(HostEvent::Line(line.trim().to_string())).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut in_overview = false;
    render_status(&navigator);

    loop {
        let event = rx
            .recv()
            .map_err(|_| Error::Session("input channel closed".to_string()))?;

        match event {
            HostEvent::Tick => {
                let key = navigator.ticker_key();
                let events = navigator.deliver_tick(key)?;
                print_events(navigator.session(), &events);
                if navigator.is_complete() {
                    return finish_session(navigator, data_dir, clear_resume);
                }
                if !in_overview {
                    render_status(&navigator);
                }
            }
            HostEvent::Line(line) => {
                let disposition = if in_overview {
                    handle_overview_command(&mut navigator, &line, &mut in_overview)?
                } else {
                    handle_command(&mut navigator, &line, &mut in_overview)?
                };
                match disposition {
                    Disposition::Continue => {
                        if navigator.is_complete() {
                            return finish_session(navigator, data_dir, clear_resume);
                        }
                        if !in_overview {
                            render_status(&navigator);
                        }
                    }
                    Disposition::Finish => {
                        return finish_session(navigator, data_dir, clear_resume)
                    }
                    Disposition::SaveExit => {
                        let path = resume_path(data_dir);
                        navigator.save_and_exit(&path)?;
                        println!("Saved; `reps resume` continues where you left off.");
                        return Ok(());
                    }
                    Disposition::Discard => {
                        navigator.discard();
                        println!("Session discarded.");
                        return Ok(());
                    }
                }
            }
            HostEvent::Eof => {
                let path = resume_path(data_dir);
                navigator.save_and_exit(&path)?;
                println!();
                println!("Saved; `reps resume` continues where you left off.");
                return Ok(());
            }
        }
    }
}

fn handle_command(
    navigator: &mut SessionNavigator,
    line: &str,
    in_overview: &mut bool,
) -> Result<Disposition> {
    match line {
        "" => {
            // Enter confirms the active set; harmless when nothing is executing
            let events = navigator.complete_current()?;
            print_events(navigator.session(), &events);
        }
        "p" => {
            navigator.pause();
            println!("  paused");
        }
        "r" => navigator.resume(),
        "t" => {
            navigator.retry_current();
            println!("  set restarted");
        }
        "s" => {
            let events = navigator.abort_current()?;
            print_events(navigator.session(), &events);
        }
        "n" => {
            let events = navigator.skip_rest()?;
            print_events(navigator.session(), &events);
        }
        "o" => {
            navigator.open_overview();
            print_overview(navigator.session(), navigator.cursor());
            *in_overview = true;
        }
        "f" => return Ok(Disposition::Finish),
        "x" => return Ok(Disposition::SaveExit),
        "q" => return Ok(Disposition::Discard),
        other => {
            if let Ok(delta) = other.parse::<i32>() {
                navigator.adjust_current(delta);
                println!("  adjustment {:+}", navigator.adjustment());
            } else {
                println!("  unknown command '{}'", other);
            }
        }
    }
    Ok(Disposition::Continue)
}

fn handle_overview_command(
    navigator: &mut SessionNavigator,
    line: &str,
    in_overview: &mut bool,
) -> Result<Disposition> {
    if line.is_empty() || line == "c" {
        navigator.close_overview();
        *in_overview = false;
        return Ok(Disposition::Continue);
    }

    let (action, arg) = match (line.strip_prefix("j "), line.strip_prefix("d ")) {
        (Some(arg), _) => ("j", arg),
        (_, Some(arg)) => ("d", arg),
        _ => {
            println!("  overview: j <n> jump, d <n> redo, c close");
            return Ok(Disposition::Continue);
        }
    };

    let number: usize = match arg.trim().parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            println!("  usage: {} <set number>", action);
            return Ok(Disposition::Continue);
        }
    };

    let result = if action == "j" {
        navigator.jump_to_set(number - 1)
    } else {
        navigator.redo_set(number - 1)
    };
    match result {
        Ok(events) => {
            navigator.close_overview();
            *in_overview = false;
            print_events(navigator.session(), &events);
        }
        Err(e) => println!("  {}", e),
    }
    Ok(Disposition::Continue)
}

fn finish_session(
    navigator: SessionNavigator,
    data_dir: &Path,
    clear_resume: bool,
) -> Result<()> {
    let session = navigator.finish();

    if zero_value_warning(&session) {
        println!("Warning: a set recorded an all-zero value.");
    }
    let progress = session_progress(&session);
    println!(
        "Session complete: {} done, {} skipped, {} pending.",
        progress.completed, progress.skipped, progress.pending
    );

    let record = RecordedSession::from_session(&session, Utc::now());
    let mut sink = JsonlSink::new(sessions_log_path(data_dir));
    sink.record_session(&record)?;
    println!("Logged to {:?}", sink.path());

    if clear_resume {
        let resume = resume_path(data_dir);
        if resume.exists() {
            std::fs::remove_file(&resume)?;
        }
    }
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

fn describe_set(session: &ExecutionSession, index: usize) -> String {
    let set = &session.timeline[index];
    let resolved = &session.exercises[set.exercise_index];

    let mut out = format!(
        "{} set {}/{}",
        resolved.exercise.name, set.set_number, resolved.plan.sets
    );
    if set.side != Side::None {
        out.push_str(&format!(" [{}]", set.side.label()));
    }
    if let Some(round) = set.round {
        out.push_str(&format!(" (round {}/{})", round.round, round.total_rounds));
    }
    out
}

fn describe_target(session: &ExecutionSession, index: usize) -> String {
    let set = &session.timeline[index];
    match session.exercises[set.exercise_index].exercise.kind {
        ExerciseKind::Isometric => format!("{}s hold", set.target_value),
        ExerciseKind::Dynamic => format!("{} reps", set.target_value),
    }
}

fn event_line(text: &str) {
    println!("\r{:<72}", text);
}

fn print_events(session: &ExecutionSession, events: &[SessionEvent]) {
    for event in events {
        match event {
            SessionEvent::SetStarted { index } => {
                event_line(&format!(
                    "> {} [{}]",
                    describe_set(session, *index),
                    describe_target(session, *index)
                ));
            }
            SessionEvent::SetRecorded {
                index,
                completed,
                actual_value,
            } => {
                let outcome = if *completed { "done" } else { "skipped" };
                event_line(&format!(
                    "  {} at {}: {}",
                    outcome, actual_value, describe_set(session, *index)
                ));
            }
            SessionEvent::RestStarted { seconds, .. } => {
                event_line(&format!("  rest {}s", seconds));
            }
            SessionEvent::SessionComplete => {
                event_line("All sets done.");
            }
        }
    }
}

fn print_overview(session: &ExecutionSession, cursor: usize) {
    println!("  overview ({} sets):", session.timeline.len());
    for (index, set) in session.timeline.iter().enumerate() {
        let marker = if index == cursor { ">" } else { " " };
        let status = if set.is_completed {
            format!("done at {}", set.actual_value)
        } else if set.is_skipped {
            format!("skipped at {}", set.actual_value)
        } else {
            "pending".to_string()
        };
        println!(
            "  {} {:>3}. {} [{}] - {}",
            marker,
            index + 1,
            describe_set(session, index),
            describe_target(session, index),
            status
        );
    }
    println!("  overview: j <n> jump, d <n> redo, c close");
}

fn render_status(navigator: &SessionNavigator) {
    let session = navigator.session();
    let index = navigator.cursor();

    let line = match navigator.phase() {
        TimerPhase::Countdown { remaining } => format!("starting in {}s", remaining),
        TimerPhase::Executing => {
            let set = navigator.current_set();
            let unit = match session.exercises[set.exercise_index].exercise.kind {
                ExerciseKind::Isometric => "s",
                ExerciseKind::Dynamic => "",
            };
            let reached = if navigator.target_reached() {
                " (target reached)"
            } else {
                ""
            };
            let paused = if navigator.is_paused() { " [paused]" } else { "" };
            format!(
                "{}: {}{} / {}{}{}{}",
                describe_set(session, index),
                navigator.display_value(),
                unit,
                set.target_value,
                unit,
                reached,
                paused
            )
        }
        TimerPhase::Interval { remaining } => format!("rest {}s", remaining),
        TimerPhase::Done => String::new(),
    };

    if !line.is_empty() {
        print!("\r  {:<70}", line);
        let _ = io::stdout().flush();
    }
}
