use libgridisa::{
    address::{Address, Pointer},
    instruction::{kind::InstructionKind, Operand, Operation},
    Word,
};
use log::debug;

use crate::memory::Memory;

/// Carries out a single operation against memory.
pub(super) struct OperationExecutor<'a> {
    memory: &'a mut Memory,
    rng: &'a mut fastrand::Rng,
    pub jumped: bool,
}

impl<'a> OperationExecutor<'a> {
    pub fn new(memory: &'a mut Memory, rng: &'a mut fastrand::Rng) -> Self {
        Self {
            memory,
            rng,
            jumped: false,
        }
    }

    pub fn execute(&mut self, operation: &Operation) {
        let Some(kind) = operation.kind else {
            debug!(
                "Unknown mnemonic \"{}\" on line {}, skipping",
                operation.mnemonic, operation.line
            );
            return;
        };

        if operation.operands.len() < kind.operand_count() {
            debug!(
                "{} on line {} is missing operands, skipping",
                kind, operation.line
            );
            return;
        }

        let operands = &operation.operands;

        match kind {
            InstructionKind::Cpy => {
                let src = self.value(&operands[1]);
                self.store(&operands[0], src);
            }

            InstructionKind::Add => {
                let (a, b) = self.byte_pair(&operands[1], &operands[2]);
                self.store(&operands[0], a.wrapping_add(b) as Word);
            }

            InstructionKind::Sub => {
                let (a, b) = self.byte_pair(&operands[1], &operands[2]);
                self.store(&operands[0], a.wrapping_sub(b) as Word);
            }

            InstructionKind::Mul => {
                let (a, b) = self.byte_pair(&operands[1], &operands[2]);
                self.store(&operands[0], a.wrapping_mul(b) as Word);
            }

            InstructionKind::Rng => {
                let value = self.rng.u8(..);
                self.store(&operands[0], value as Word);
            }

            InstructionKind::Jmp => {
                let target = self.value(&operands[0]);

                self.memory.set_pc(target);
                self.jumped = true;
            }
        }
    }

    /// The cell an operand refers to, following pointers. `None` for literals and labels.
    fn resolve(&self, operand: &Operand) -> Option<Address> {
        match operand {
            Operand::Direct(addr) => Some(*addr),
            Operand::Pointer(ptr) => Some(Pointer::target(
                self.memory.read(ptr.x_cell),
                self.memory.read(ptr.y_cell),
            )),
            Operand::Literal(_) | Operand::Label { .. } => None,
        }
    }

    fn value(&self, operand: &Operand) -> Word {
        match operand {
            Operand::Literal(value) => *value,
            Operand::Label { index, .. } => *index,
            Operand::Direct(_) | Operand::Pointer(_) => self
                .resolve(operand)
                .map_or(0, |addr| self.memory.read(addr) as Word),
        }
    }

    fn byte_pair(&self, a: &Operand, b: &Operand) -> (u8, u8) {
        (self.value(a) as u8, self.value(b) as u8)
    }

    /// Writes the low byte of `value` to the operand's cell.
    fn store(&mut self, operand: &Operand, value: Word) {
        match self.resolve(operand) {
            Some(addr) => self.memory.write(addr, value as u8),
            None => debug!("Can't write to {}, skipping", operand),
        }
    }
}
