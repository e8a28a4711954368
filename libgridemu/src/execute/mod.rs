use libgridisa::Word;
use log::{debug, trace};

use crate::Emulator;

mod operation;


use operation::OperationExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The operation at `pc` ran and the PC moved on to `next_pc`.
    Executed { pc: Word, next_pc: Word, jumped: bool },

    /// No operation at `pc`. Nothing was touched.
    Idle { pc: Word },
}

impl Emulator {
    /// Runs one fetch, execute and advance pass.
    pub fn cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;

        let pc = self.memory.pc();

        let Some(operation) = self.program.operation(pc) else {
            trace!("Idle at PC {}", pc);
            return CycleOutcome::Idle { pc };
        };

        trace!("PC {}: {}", pc, operation);

        let mut executor = OperationExecutor::new(&mut self.memory, &mut self.rng);
        executor.execute(operation);

        if executor.jumped {
            // The jump already wrote the PC cells, whatever sits in them now is where we go.
            let next_pc = self.memory.pc();
            debug!("Jumped from {} to {}", pc, next_pc);

            return CycleOutcome::Executed {
                pc,
                next_pc,
                jumped: true,
            };
        }

        let next_pc = pc.wrapping_add(1);
        self.memory.set_pc(next_pc);

        CycleOutcome::Executed {
            pc,
            next_pc,
            jumped: false,
        }
    }

    pub fn run_cycles(&mut self, count: u64) {
        for _ in 0..count {
            self.cycle();
        }
    }

    /// Runs until the PC about to be fetched equals `pc`, giving up after `limit` cycles.
    /// Returns the number of cycles run, or `None` if the limit was hit first.
    pub fn run_until_pc(&mut self, pc: Word, limit: u64) -> Option<u64> {
        let mut executed = 0;

        while self.memory.pc() != pc {
            if executed >= limit {
                return None;
            }

            self.cycle();
            executed += 1;
        }

        Some(executed)
    }
}
