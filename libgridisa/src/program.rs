use std::{collections::BTreeMap, fmt::Display};

use crate::{instruction::Operation, Word};

/// A compiled, immutable operation list along with the labels that were defined in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    operations: Vec<Operation>,
    labels: BTreeMap<String, Word>,
}

impl Program {
    pub fn new(operations: Vec<Operation>, labels: BTreeMap<String, Word>) -> Self {
        Self { operations, labels }
    }

    pub fn from_operations<I>(operations: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        Self::new(operations.into_iter().collect(), BTreeMap::new())
    }

    pub fn operation(&self, pc: Word) -> Option<&Operation> {
        self.operations.get(pc as usize)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn label(&self, name: &str) -> Option<Word> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Listing with labels placed above the operation they point to.
impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, operation) in self.operations.iter().enumerate() {
            for (name, _) in self
                .labels
                .iter()
                .filter(|(_, label_index)| **label_index as usize == index)
            {
                writeln!(f, "{}:", name)?;
            }

            writeln!(f, "{:>5}  {}", index, operation)?;
        }

        for (name, _) in self
            .labels
            .iter()
            .filter(|(_, label_index)| **label_index as usize >= self.operations.len())
        {
            writeln!(f, "{}:", name)?;
        }

        Ok(())
    }
}
