use std::fmt::Display;

use bimap::BiMap;
use lazy_static::lazy_static;

lazy_static! {
    static ref KIND_MNEMONIC_BIMAP: BiMap<InstructionKind, &'static str> = BiMap::from_iter([
        (InstructionKind::Cpy, "cpy"),
        (InstructionKind::Add, "add"),
        (InstructionKind::Sub, "sub"),
        (InstructionKind::Mul, "mul"),
        (InstructionKind::Rng, "rng"),
        (InstructionKind::Jmp, "jmp"),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Cpy,

    Add,
    Sub,
    Mul,

    Rng,

    Jmp,
}

impl InstructionKind {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        KIND_MNEMONIC_BIMAP.get_by_right(mnemonic).copied()
    }

    pub fn mnemonic(&self) -> &'static str {
        KIND_MNEMONIC_BIMAP
            .get_by_left(self)
            .copied()
            .unwrap_or("???")
    }

    pub fn operand_count(&self) -> usize {
        match self {
            Self::Cpy => 2,
            Self::Add | Self::Sub | Self::Mul => 3,
            Self::Rng | Self::Jmp => 1,
        }
    }

    /// Whether the first operand is written to rather than read.
    pub fn has_destination(&self) -> bool {
        !matches!(self, Self::Jmp)
    }
}

impl Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
