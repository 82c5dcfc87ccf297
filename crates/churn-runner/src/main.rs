//! Terminal driver for the binding churn harness
//!
//! This binary:
//! 1. Builds a churn controller for the configured tile variant
//! 2. Attaches every tile to a simulated binding registry
//! 3. Ticks every 250 ms while started, logging cycle, tile count and memory
//!
//! Commands:
//! - `s` or `start` - Start churning
//! - `x` or `stop` - Stop churning
//! - `g` or `gc` - Force a reclamation pass
//! - `q` or `quit` - Quit
//! - `help` - Show help
//!
//! Environment: `CHURN_VARIANT`, `CHURN_MAX_CYCLES`, `CHURN_HEADLESS`, `CHURN_OUTPUT`.

mod command;
mod config;
mod driver;
mod prompt;

use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use churn_core::ChurnController;
use churn_registry::SimulatedBindingRegistry;
use churn_sampler::ProcessSampler;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use tracing::info;

use crate::command::{Command, parse_command};
use crate::config::RunnerConfig;
use crate::driver::Driver;
use crate::prompt::{clear_line, print_prompt};

fn main() -> eyre::Result<()> {
    // Initialize logging; stdout is reserved for status output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("churn_runner=info".parse()?)
                .add_directive("churn_core=info".parse()?),
        )
        .init();

    let config = RunnerConfig::from_env()?;
    info!(
        variant = %config.variant,
        max_cycles = ?config.max_cycles,
        headless = config.headless,
        "Starting binding churn harness"
    );

    let controller = ChurnController::new(
        config.variant,
        ProcessSampler::new(),
        SimulatedBindingRegistry::new(),
    );
    let driver = Driver::new(controller, config.output, config.max_cycles);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

    if config.headless {
        drop(cmd_tx);
        let mut driver = driver;
        driver.autostart();
        return driver.run(&cmd_rx);
    }
    let mut driver = driver.with_prompt();

    thread::spawn(move || {
        input_thread(cmd_tx);
    });

    // Enable raw mode for keyboard input
    terminal::enable_raw_mode().ok();
    info!("Type 'help' for commands, 's' to start");
    print_prompt();

    let result = driver.run(&cmd_rx);

    // Cleanup
    terminal::disable_raw_mode().ok();
    result
}

#[allow(clippy::print_stdout)]
fn input_thread(tx: mpsc::Sender<Command>) {
    let mut input_buffer = String::new();

    loop {
        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
            if let Ok(Event::Key(key_event)) = event::read() {
                if key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && key_event.code == KeyCode::Char('c')
                {
                    let _ = tx.send(Command::Quit);
                    break;
                }

                match key_event.code {
                    KeyCode::Enter => {
                        let cmd = parse_command(&input_buffer);
                        let is_quit = matches!(cmd, Command::Quit);
                        if tx.send(cmd).is_err() || is_quit {
                            break;
                        }
                        input_buffer.clear();
                    }
                    KeyCode::Char(c) => {
                        input_buffer.push(c);
                        print!("{c}");
                        io::stdout().flush().ok();
                    }
                    KeyCode::Backspace => {
                        if input_buffer.pop().is_some() {
                            print!("\x08 \x08");
                            io::stdout().flush().ok();
                        }
                    }
                    KeyCode::Esc => {
                        input_buffer.clear();
                        clear_line();
                        print_prompt();
                    }
                    _ => {}
                }
            }
        }
    }
}
