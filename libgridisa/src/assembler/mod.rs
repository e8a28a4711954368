use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    instruction::{kind::InstructionKind, Operand, Operation},
    program::Program,
    Word,
};

mod token;

#[cfg(test)]
mod tests;

const LABEL_SUFFIX: char = ':';

/// The largest number of operations a program may hold so every index fits the 16-bit PC.
pub const MAX_OPERATIONS: usize = Word::MAX as usize;

/// How forgiving the assembler is with input it can't make sense of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Reject unknown mnemonics, malformed or out of range tokens and misshapen operand lists.
    #[default]
    Strict,

    /// Accept anything short of an undefined or duplicate label. Unknown mnemonics compile to
    /// operations that do nothing, unparseable numbers become 0 and coordinates get masked.
    Permissive,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Line {line}: {kind}")]
pub struct AssemblyError {
    /// 1-based source line.
    pub line: usize,
    pub kind: AssemblyErrorKind,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyErrorKind {
    #[error("Undefined label \"{0}\"")]
    UndefinedLabel(String),

    #[error("Label \"{0}\" is already defined")]
    DuplicateLabel(String),

    #[error("Invalid label name \"{0}\"")]
    InvalidLabel(String),

    #[error("Unknown mnemonic \"{0}\"")]
    UnknownMnemonic(String),

    #[error("Malformed address \"{0}\"")]
    MalformedAddress(String),

    #[error("Address \"{0}\" lies outside the grid")]
    AddressOutOfRange(String),

    #[error("Malformed literal \"{0}\"")]
    MalformedLiteral(String),

    #[error("{kind} takes {expected} operands, got {actual}")]
    OperandCount {
        kind: InstructionKind,
        expected: usize,
        actual: usize,
    },

    #[error("Destination \"{0}\" is neither an address nor a pointer")]
    NotAddressable(String),

    #[error("Label \"{0}\" can only be used as a jump target")]
    MisplacedLabel(String),

    #[error("Program holds more than {} operations", MAX_OPERATIONS)]
    ProgramTooLarge,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    pub strictness: Strictness,
}

/// Assembles with the default, strict settings.
pub fn assemble(source: &str) -> Result<Program, AssemblyError> {
    Assembler::default().assemble(source)
}

impl Assembler {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    pub fn assemble(&self, source: &str) -> Result<Program, AssemblyError> {
        // Permissive assembly keeps blank lines as operations that do nothing, so they take up an
        // index just like any other unknown mnemonic.
        let keep_blank = self.strictness == Strictness::Permissive;

        let lines: Vec<_> = source
            .lines()
            .enumerate()
            .map(|(index, text)| (index + 1, text.trim()))
            .filter(|(_, text)| keep_blank || !text.is_empty())
            .collect();

        let labels = self.collect_labels(&lines)?;

        let operations = lines
            .iter()
            .filter(|(_, text)| !is_label_line(text))
            .map(|&(line, text)| {
                self.parse_operation(text, &labels)
                    .map(|operation| operation.with_line(line))
                    .map_err(|kind| AssemblyError { line, kind })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Program::new(operations, labels))
    }

    /// First pass. Binds every label to the index of the operation following it.
    fn collect_labels(&self, lines: &[(usize, &str)]) -> Result<BTreeMap<String, Word>, AssemblyError> {
        let mut labels = BTreeMap::new();
        let mut operation_count = 0usize;

        for &(line, text) in lines {
            let Some(name) = text.strip_suffix(LABEL_SUFFIX) else {
                operation_count += 1;

                if operation_count > MAX_OPERATIONS {
                    return Err(AssemblyError {
                        line,
                        kind: AssemblyErrorKind::ProgramTooLarge,
                    });
                }

                continue;
            };

            let name = name.trim_end();

            if self.strictness == Strictness::Strict && !is_identifier(name) {
                return Err(AssemblyError {
                    line,
                    kind: AssemblyErrorKind::InvalidLabel(name.to_string()),
                });
            }

            // Bounded by the operation count check above.
            let index = operation_count as Word;

            if labels.insert(name.to_string(), index).is_some() {
                return Err(AssemblyError {
                    line,
                    kind: AssemblyErrorKind::DuplicateLabel(name.to_string()),
                });
            }
        }

        Ok(labels)
    }

    /// Second pass, applied to every non-label line.
    fn parse_operation(
        &self,
        text: &str,
        labels: &BTreeMap<String, Word>,
    ) -> Result<Operation, AssemblyErrorKind> {
        let mut tokens = text
            .split_whitespace()
            .map(|token| token.trim_matches(','))
            .filter(|token| !token.is_empty());

        // Blank and comma-only lines come up empty, which only permissive assembly lets through.
        let mnemonic = tokens.next().unwrap_or_default();

        let operands = tokens
            .map(|token| token::parse_operand(token, self.strictness, labels))
            .collect::<Result<Vec<_>, _>>()?;

        let mut operation = match InstructionKind::from_mnemonic(mnemonic) {
            Some(kind) => Operation::new(kind),
            None if self.strictness == Strictness::Permissive => Operation::unknown(mnemonic),
            None => return Err(AssemblyErrorKind::UnknownMnemonic(mnemonic.to_string())),
        };
        operation.operands = operands;

        if let (Strictness::Strict, Some(kind)) = (self.strictness, operation.kind) {
            check_operands(kind, &operation.operands)?;
        }

        Ok(operation)
    }
}

fn check_operands(kind: InstructionKind, operands: &[Operand]) -> Result<(), AssemblyErrorKind> {
    if operands.len() != kind.operand_count() {
        return Err(AssemblyErrorKind::OperandCount {
            kind,
            expected: kind.operand_count(),
            actual: operands.len(),
        });
    }

    if kind.has_destination() && !operands[0].is_addressable() {
        return Err(AssemblyErrorKind::NotAddressable(operands[0].to_string()));
    }

    if kind != InstructionKind::Jmp {
        if let Some(Operand::Label { name, .. }) = operands
            .iter()
            .find(|operand| matches!(operand, Operand::Label { .. }))
        {
            return Err(AssemblyErrorKind::MisplacedLabel(name.clone()));
        }
    }

    Ok(())
}

fn is_label_line(text: &str) -> bool {
    text.ends_with(LABEL_SUFFIX)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
