use std::fmt::Display;

use kind::InstructionKind;

use crate::{
    address::{Address, Pointer},
    Word,
};

pub mod kind;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Literal(Word),
    Direct(Address),
    Pointer(Pointer),
    Label { name: String, index: Word },
}

impl Operand {
    /// Whether the operand names a cell that can be written to.
    pub fn is_addressable(&self) -> bool {
        matches!(self, Self::Direct(_) | Self::Pointer(_))
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Direct(addr) => write!(f, "${}", addr),
            Self::Pointer(ptr) => write!(f, "{}", ptr),
            Self::Label { name, .. } => write!(f, ":{}", name),
        }
    }
}

/// One compiled line of source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    /// `None` when the mnemonic isn't part of the instruction set, which only the permissive
    /// assembler lets through. Such operations do nothing when executed.
    pub kind: Option<InstructionKind>,
    pub mnemonic: String,
    pub operands: Vec<Operand>,
    /// 1-based source line the operation was compiled from.
    pub line: usize,
}

impl Operation {
    pub fn new(kind: InstructionKind) -> Self {
        Self {
            kind: Some(kind),
            mnemonic: kind.mnemonic().to_string(),
            operands: Vec::new(),
            line: 0,
        }
    }

    pub fn unknown(mnemonic: impl Into<String>) -> Self {
        Self {
            kind: None,
            mnemonic: mnemonic.into(),
            operands: Vec::new(),
            line: 0,
        }
    }

    pub fn with_operand(mut self, operand: Operand) -> Self {
        self.operands.push(operand);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn operand(&self, index: usize) -> Option<&Operand> {
        self.operands.get(index)
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.mnemonic)?;

        for (i, operand) in self.operands.iter().enumerate() {
            let separator = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", separator, operand)?;
        }

        Ok(())
    }
}
