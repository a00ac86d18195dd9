use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use term8_core::{Chip8, Config, CLOCK_SPEED};

mod input;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(name = "term8")]
#[command(about = "Run a CHIP-8 program in the terminal", long_about = None)]
struct Args {
    /// Path to the program image
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    clock_speed: u32,

    /// Instructions executed per timer decrement
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    timer_divider: u32,

    /// Seed for the random number opcode (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file; without it only errors reach stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logger(log_file: Option<&Path>) -> Result<()> {
    // The terminal doubles as the display, so only errors go to stderr by default
    let default_filter = if log_file.is_some() { "debug" } else { "error" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("unable to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_file.as_deref())?;

    let mut chip8 = Chip8::with_config(Config {
        cycles_per_timer_tick: args.timer_divider,
        seed: args.seed,
    });

    // Load ROM
    let loaded = chip8
        .load_file(&args.rom)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    info!("loaded {} bytes from {}", loaded, args.rom.display());

    run::run(chip8, args.clock_speed)
}
