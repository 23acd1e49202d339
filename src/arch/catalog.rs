//! Name-indexed table of instruction descriptors.
//!
//! [`Catalog::standard`] exposes the process-wide instruction set, built once from
//! the rows in [`Opcode`] before the first lookup and never mutated afterwards.

use std::sync::LazyLock;

use ahash::AHashMap;

use crate::arch::error::CatalogError;
use crate::arch::instruction::InstructionDesc;
use crate::arch::opcode::Opcode;

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| match Catalog::build_standard() {
    Ok(catalog) => catalog,
    Err(err) => {
        tracing::error!(%err, "malformed instruction catalog");
        panic!("malformed instruction catalog: {err}");
    }
});

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<InstructionDesc>,
    index: AHashMap<String, usize>,
}

impl Catalog {
    /// The fixed virtual instruction set.
    ///
    /// Panics on first use if any standard row is malformed.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    fn build_standard() -> Result<Self, CatalogError> {
        let entries = Opcode::ALL
            .iter()
            .map(|opcode| opcode.table_entry())
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_descriptors(entries)
    }

    /// Indexes `descriptors` by name, keeping their order.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = InstructionDesc>,
    {
        let entries: Vec<InstructionDesc> = descriptors.into_iter().collect();
        let mut index = AHashMap::with_capacity(entries.len());
        for (position, desc) in entries.iter().enumerate() {
            if index.insert(desc.name().to_string(), position).is_some() {
                return Err(CatalogError::DuplicateName(desc.name().to_string()));
            }
            tracing::trace!(
                name = desc.name(),
                operands = desc.operand_count(),
                "registered instruction"
            );
        }
        tracing::debug!(entries = entries.len(), "instruction catalog built");
        Ok(Self { entries, index })
    }

    pub fn get(&self, name: &str) -> Option<&InstructionDesc> {
        self.position(name).map(|position| &self.entries[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Table position of the entry called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn entries(&self) -> &[InstructionDesc] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionDesc> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a InstructionDesc;
    type IntoIter = std::slice::Iter<'a, InstructionDesc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
