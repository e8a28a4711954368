use libgridisa::program::Program;
use log::debug;
use memory::Memory;

pub mod codec;
pub mod execute;
pub mod loader;
pub mod memory;
pub mod scheduler;

pub use execute::CycleOutcome;

pub struct Emulator {
    pub memory: Memory,
    program: Program,
    rng: fastrand::Rng,
    cycles: u64,
}

impl Emulator {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Emulator whose `rng` instruction produces a reproducible sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            memory: Memory::new(),
            program: Program::default(),
            rng,
            cycles: 0,
        }
    }

    /// Replaces the program and rewinds the PC to its first operation. The rest of memory is kept.
    pub fn load_program(&mut self, program: Program) {
        debug!("Loading program of {} operations", program.len());

        self.program = program;
        self.memory.set_pc(0);
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn pc(&self) -> libgridisa::Word {
        self.memory.pc()
    }

    /// Cycles run so far, idle ones included.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Blanks memory and rewinds the PC, keeping the program.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.cycles = 0;
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
