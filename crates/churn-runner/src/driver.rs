//! Periodic driver: feeds commands and ticks into the controller.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Instant;

use churn_core::{ChurnController, PHASE_INTERVAL, StatusSnapshot};
use churn_registry::ObserverRegistry;
use churn_sampler::MemorySampler;
use tracing::info;

use crate::command::Command;
use crate::config::OutputFormat;
use crate::prompt::{clear_line, print_prompt};

/// Whether the loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Driver<S, R> {
    controller: ChurnController<S, R>,
    output: OutputFormat,
    max_cycles: Option<u64>,
    prompt: bool,
}

impl<S: MemorySampler, R: ObserverRegistry> Driver<S, R> {
    pub fn new(
        controller: ChurnController<S, R>,
        output: OutputFormat,
        max_cycles: Option<u64>,
    ) -> Self {
        Self {
            controller,
            output,
            max_cycles,
            prompt: false,
        }
    }

    /// Keep an interactive `> ` prompt below everything the driver logs.
    #[must_use]
    pub fn with_prompt(mut self) -> Self {
        self.prompt = true;
        self
    }

    pub const fn prompts(&self) -> bool {
        self.prompt
    }

    pub fn controller(&self) -> &ChurnController<S, R> {
        &self.controller
    }

    /// Start churning without waiting for a command.
    pub fn autostart(&mut self) {
        self.controller.start();
    }

    /// Apply one user command.
    pub fn handle(&mut self, command: Command) -> eyre::Result<Flow> {
        match command {
            Command::Start => self.controller.start(),
            Command::Stop => self.controller.stop(),
            Command::Gc => {
                info!("Manual reclamation requested");
                let status = self.controller.force_gc_now();
                self.report(&status)?;
            }
            Command::Quit => {
                info!("Shutting down...");
                return Ok(Flow::Quit);
            }
            Command::Help => print_help(),
            Command::Unknown(s) => {
                if !s.is_empty() {
                    info!("Unknown command: '{}'. Type 'help' for commands.", s);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Called once per interval; ticks only while the controller runs.
    pub fn on_interval(&mut self) -> eyre::Result<Flow> {
        if !self.controller.is_running() {
            return Ok(Flow::Continue);
        }

        let status = self.controller.tick();
        self.clear_prompt();
        self.report(&status)?;

        if self
            .max_cycles
            .is_some_and(|max| status.cycle_count >= max)
        {
            info!(cycles = status.cycle_count, "cycle limit reached");
            self.controller.stop();
            return Ok(Flow::Quit);
        }
        self.restore_prompt();
        Ok(Flow::Continue)
    }

    /// Run until quit, ticking every [`PHASE_INTERVAL`].
    pub fn run(&mut self, commands: &Receiver<Command>) -> eyre::Result<()> {
        let mut next_tick = Instant::now() + PHASE_INTERVAL;

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match commands.recv_timeout(timeout) {
                Ok(command) => {
                    self.clear_prompt();
                    if self.handle(command)? == Flow::Quit {
                        return Ok(());
                    }
                    self.restore_prompt();
                    continue;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => std::thread::sleep(timeout),
            }

            next_tick += PHASE_INTERVAL;
            let now = Instant::now();
            if next_tick < now {
                next_tick = now + PHASE_INTERVAL;
            }

            if self.on_interval()? == Flow::Quit {
                return Ok(());
            }
        }
    }

    #[allow(clippy::print_stdout)]
    fn report(&self, status: &StatusSnapshot) -> eyre::Result<()> {
        match self.output {
            OutputFormat::Text => info!("{}", status),
            OutputFormat::Json => println!("{}", serde_json::to_string(status)?),
        }
        Ok(())
    }

    fn clear_prompt(&self) {
        if self.prompt {
            clear_line();
        }
    }

    fn restore_prompt(&self) {
        if self.prompt {
            print_prompt();
        }
    }
}

fn print_help() {
    info!("\r\nCommands:");
    info!("  s, start  - Start churning tiles");
    info!("  x, stop   - Stop churning (tiles and counters are kept)");
    info!("  g, gc     - Force a reclamation pass and refresh memory");
    info!("  q, quit   - Quit");
    info!("  help      - Show this help");
}
