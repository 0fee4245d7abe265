#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Wormhole Snake levels in a terminal.

mod input;
mod level_file;
mod render;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use wormhole_snake_core::{BlockedPushRule, LevelData, LevelStatus, RainbowMode};
use wormhole_snake_system_session::Session;

use crate::input::{parse_inputs, Input};

/// Command-line arguments for the Wormhole Snake player.
#[derive(Debug, Parser)]
#[command(name = "wormhole-snake", about = "Push-block snake puzzles in the terminal")]
struct Args {
    /// Level files to play in order. The next level starts after a win.
    #[arg(required = true)]
    levels: Vec<PathBuf>,

    /// Scripted input (U/D/L/R moves, Z undo, X restart). Reads stdin when absent.
    #[arg(long)]
    moves: Option<String>,

    /// Resolve rainbow pushes one visible step at a time.
    #[arg(long)]
    stepped: bool,

    /// Refuse blocked pushes instead of eating the front item.
    #[arg(long)]
    refuse_blocked: bool,

    /// Overrides the log filter from `RUST_LOG`.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LevelFilter>,
}

/// Levels queued for play together with the session running the current one.
struct Campaign {
    levels: Vec<LevelData>,
    current: usize,
    session: Session,
}

impl Campaign {
    fn new(levels: Vec<LevelData>) -> Result<Self> {
        let first = levels.first().cloned().context("no levels were provided")?;
        let session = Session::with_level(first).context("first level is invalid")?;
        Ok(Self {
            levels,
            current: 0,
            session,
        })
    }

    fn is_finished(&self) -> bool {
        self.current >= self.levels.len()
    }

    /// Starts the next level after a win. Returns `false` once every level is
    /// cleared.
    fn advance(&mut self) -> Result<bool> {
        self.current += 1;
        let Some(next) = self.levels.get(self.current).cloned() else {
            return Ok(false);
        };
        let name = next.name.clone();
        self.session
            .initialize_level(next)
            .with_context(|| format!("level '{name}' is invalid"))?;
        info!("advanced to level '{name}'");
        Ok(true)
    }

    fn play(&mut self, inputs: &[Input], out: &mut impl Write) -> Result<()> {
        for &input in inputs {
            if self.is_finished() {
                break;
            }
            match input {
                Input::Move(direction) => {
                    let outcome = self.session.attempt_move(direction);
                    writeln!(out, "{direction:?}: {}", render::describe(&outcome))?;
                    if outcome.rainbow_pending {
                        self.drain_rainbow(out)?;
                    }
                }
                Input::Undo => {
                    let undone = self.session.undo();
                    writeln!(out, "undo: {}", if undone { "applied" } else { "nothing to undo" })?;
                }
                Input::Restart => {
                    let restarted = self.session.restart();
                    writeln!(
                        out,
                        "restart: {}",
                        if restarted { "applied" } else { "level unchanged" }
                    )?;
                }
            }
            write!(out, "{}", render::render(&self.session))?;

            if self.session.status() == LevelStatus::Won {
                if self.advance()? {
                    writeln!(out, "next level: {}", self.session.level_name().unwrap_or("?"))?;
                    write!(out, "{}", render::render(&self.session))?;
                } else {
                    writeln!(out, "all levels cleared")?;
                }
            }
        }
        Ok(())
    }

    fn drain_rainbow(&mut self, out: &mut impl Write) -> Result<()> {
        let steps: Vec<_> = self.session.rainbow_steps().collect();
        for (index, step) in steps.iter().enumerate() {
            writeln!(out, "rainbow step {}: {}", index + 1, render::describe(step))?;
        }
        Ok(())
    }
}

fn init_logging(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("warn"));
    if let Some(level) = level {
        let _ = builder.filter_level(level);
    }
    builder.init();
}

fn apply_overrides(level: &mut LevelData, args: &Args) {
    if args.stepped {
        level.rules.rainbow = RainbowMode::Stepped;
    }
    if args.refuse_blocked {
        level.rules.blocked_push = BlockedPushRule::Refuse;
    }
}

/// Entry point for the Wormhole Snake command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    let mut levels = Vec::with_capacity(args.levels.len());
    for path in &args.levels {
        let mut level = level_file::load_level(path)?;
        apply_overrides(&mut level, &args);
        levels.push(level);
    }

    let mut campaign = Campaign::new(levels)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "level: {}", campaign.session.level_name().unwrap_or("?"))?;
    write!(out, "{}", render::render(&campaign.session))?;

    if let Some(script) = &args.moves {
        campaign.play(&parse_inputs(script), &mut out)?;
    } else {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read input from stdin")?;
            campaign.play(&parse_inputs(&line), &mut out)?;
            if campaign.is_finished() {
                break;
            }
        }
    }
    out.flush()?;
    Ok(())
}
