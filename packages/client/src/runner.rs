//! Interactive client loop.
//!
//! One cooperative task owns all state: a `select!` over the 1-second
//! countdown tick, the 2-second status poll, and the command channel fed by
//! a blocking rustyline thread. The tick and the poll may land in the same
//! loop turn; correctness relies on the drift-tolerance rule, not on
//! locking. Leaving the loop drops the intervals and the audio backend,
//! which releases the output device.

use std::sync::Arc;
use std::time::Duration;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use zazen_shared::time::{Clock, SystemClock};

use crate::api::{HttpSessionApi, SessionApi};
use crate::audio::{NoisePlayer, RodioBackend};
use crate::controller::{FocusController, Phase, SessionNotice, StopOutcome};
use crate::formatter::StatusFormatter;
use crate::noise::NoiseColor;
use crate::sync;

/// Client configuration from the command line
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Base URL of the focus backend
    pub base_url: String,
    /// Configured session length in seconds
    pub duration_secs: u32,
}

/// Run the interactive focus client until `quit` or end of input.
pub async fn run_client(config: RunnerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api: Arc<dyn SessionApi> = Arc::new(HttpSessionApi::new(&config.base_url));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut controller = FocusController::new(api.clone(), clock, config.duration_secs);
    let mut player = NoisePlayer::new(RodioBackend::new());

    println!("zazen — focus timer. Type 'help' for commands.");

    // Adopt a session already open elsewhere before accepting commands.
    if let Some(notice) = sync::poll_once(api.as_ref(), &mut controller).await {
        println!("{}", StatusFormatter::format_notice(&notice));
    }
    show_stats(api.as_ref()).await;

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Blocking thread for rustyline (synchronous readline).
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline("zazen> ") {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str()).ok();
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    let mut tick = tokio::time::interval(Duration::from_secs(1));
    let mut poll = tokio::time::interval(sync::POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if let Some(outcome) = controller.tick().await {
                    report_stop(&outcome);
                    show_stats(api.as_ref()).await;
                }
            }
            _ = poll.tick() => {
                if let Some(notice) = sync::poll_once(api.as_ref(), &mut controller).await {
                    println!("{}", StatusFormatter::format_notice(&notice));
                    if notice == SessionNotice::EndedElsewhere {
                        show_stats(api.as_ref()).await;
                    }
                }
            }
            line = input_rx.recv() => {
                let Some(line) = line else { break };
                if !handle_command(&line, &mut controller, &mut player, api.as_ref()).await {
                    break;
                }
            }
        }
    }

    // Teardown: release the audio device before the intervals drop.
    player.stop();
    tracing::info!("client loop ended");
    Ok(())
}

/// Dispatch one command line. Returns `false` to leave the loop.
async fn handle_command(
    line: &str,
    controller: &mut FocusController,
    player: &mut NoisePlayer<RodioBackend>,
    api: &dyn SessionApi,
) -> bool {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();

    match command {
        "start" => {
            let mut rest = parts.peekable();
            if controller.phase() == Phase::Idle {
                // optional leading minutes, remainder is the goal
                if let Some(minutes) = rest.peek().and_then(|w| w.parse::<u32>().ok()) {
                    controller.set_duration(minutes * 60);
                    rest.next();
                }
            }
            let goal = rest.collect::<Vec<_>>().join(" ");
            let goals = if goal.is_empty() { vec![] } else { vec![goal] };
            match controller.start(goals).await {
                Ok(Some(notice)) => println!("{}", StatusFormatter::format_notice(&notice)),
                Ok(None) => println!(
                    "{}",
                    StatusFormatter::format_status(controller.phase(), controller.timer())
                ),
                Err(e) => println!("Failed to start session: {}", e),
            }
        }
        "pause" => {
            if controller.pause() {
                println!("Paused. Other clients still see this session as active.");
            } else {
                println!("Nothing to pause.");
            }
        }
        "resume" => {
            if controller.resume() {
                println!(
                    "{}",
                    StatusFormatter::format_status(controller.phase(), controller.timer())
                );
            } else {
                println!("Nothing to resume.");
            }
        }
        "stop" => match controller.stop().await {
            Some(outcome) => {
                report_stop(&outcome);
                show_stats(api).await;
            }
            None => println!("No session to stop."),
        },
        "status" => println!(
            "{}",
            StatusFormatter::format_status(controller.phase(), controller.timer())
        ),
        "stats" => show_stats(api).await,
        "sound" => match parts.next().map(str::parse::<NoiseColor>) {
            Some(Ok(color)) => match player.toggle(color) {
                Ok(Some(active)) => println!("Playing {} noise.", active.label()),
                Ok(None) => println!("Sound off."),
                Err(e) => println!("Could not play sound: {}", e),
            },
            Some(Err(e)) => println!("{}", e),
            None => println!("Usage: sound <white|pink|brown>"),
        },
        "volume" => match parts.next().and_then(|w| w.parse::<f32>().ok()) {
            Some(volume) => {
                player.set_volume(volume);
                println!("Volume {:.2}", player.volume());
            }
            None => println!("Usage: volume <0..1>"),
        },
        "mute" => {
            player.stop();
            println!("Sound off.");
        }
        "help" => print_help(),
        "quit" | "exit" => return false,
        other => println!("Unknown command '{}'. Type 'help'.", other),
    }

    true
}

fn report_stop(outcome: &StopOutcome) {
    println!("{}", StatusFormatter::format_notice(&outcome.notice));
    if let Some(e) = &outcome.error {
        println!("Warning: could not record the end remotely: {}", e);
    }
}

async fn show_stats(api: &dyn SessionApi) {
    match api.stats().await {
        Ok(stats) => println!("{}", StatusFormatter::format_stats(&stats)),
        Err(e) => tracing::warn!("failed to fetch stats: {}", e),
    }
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 start [minutes] [goal]  begin a focus session (resumes when paused)\n\
         \x20 pause                   freeze the countdown locally\n\
         \x20 resume                  continue a paused countdown\n\
         \x20 stop                    end the session\n\
         \x20 status                  show phase and remaining time\n\
         \x20 stats                   show focus statistics\n\
         \x20 sound <color>           toggle white/pink/brown noise\n\
         \x20 volume <0..1>           set noise volume\n\
         \x20 mute                    stop the noise\n\
         \x20 quit                    leave"
    );
}
