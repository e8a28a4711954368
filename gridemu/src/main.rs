use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use libgridemu::{loader, scheduler::Scheduler, Emulator};
use libgridisa::{
    address::Address,
    assembler::{Assembler, Strictness},
    GRID_SIZE,
};
use log::info;
use session::Session;

mod command;
mod session;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Assembly source to compile and load.
    #[arg(short, long)]
    program: Option<PathBuf>,

    /// Memory image made of hex digit pairs, loaded from the first cell on.
    #[arg(long, conflicts_with = "text")]
    hex: Option<PathBuf>,

    /// Memory image loaded one character per cell.
    #[arg(long)]
    text: Option<PathBuf>,

    /// Let unknown mnemonics and malformed operands through instead of failing.
    #[arg(long)]
    permissive: bool,

    /// Milliseconds between two cycles while running.
    #[arg(short, long, default_value_t = 1)]
    interval_ms: u64,

    /// Seed for the rng instruction.
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many cycles, print the machine state and exit instead of prompting for commands.
    #[arg(short, long)]
    cycles: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut emulator = match args.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };

    if let Some(path) = &args.hex {
        let image = read(path)?;
        loader::load_hex(&mut emulator.memory, &image)
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }

    if let Some(path) = &args.text {
        let image = read(path)?;
        loader::load_text(&mut emulator.memory, &image)
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }

    if let Some(path) = &args.program {
        let strictness = if args.permissive {
            Strictness::Permissive
        } else {
            Strictness::Strict
        };

        let program = Assembler::new(strictness)
            .assemble(&read(path)?)
            .with_context(|| format!("Failed to assemble {}", path.display()))?;

        info!("Assembled {} operations from {}", program.len(), path.display());
        emulator.load_program(program);
    }

    let scheduler = Scheduler::new(Duration::from_millis(args.interval_ms));

    match args.cycles {
        Some(cycles) => {
            run_batch(&mut emulator, scheduler, cycles);
            Ok(())
        }
        None => Session::new(emulator, scheduler).run(),
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn run_batch(emulator: &mut Emulator, mut scheduler: Scheduler, cycles: u64) {
    if cycles != 0 {
        scheduler.run_until(emulator, |_, emulator| emulator.cycles() >= cycles);
    }

    println!("PC: {}, cycles: {}", emulator.pc(), emulator.cycles());

    // Only rows holding something other than zeros.
    for y in 0..GRID_SIZE {
        let row: Vec<u8> = (0..GRID_SIZE)
            .map(|x| emulator.memory.read(Address::new(x as u8, y as u8)))
            .collect();

        if row.iter().any(|byte| *byte != 0) {
            let hex: Vec<String> = row.iter().map(|byte| format!("{:02x}", byte)).collect();
            println!("{:03o}: {}", y, hex.join(" "));
        }
    }
}
