//! Per-opcode metadata of the virtual instruction set.

use std::fmt;

use smallvec::SmallVec;

use crate::arch::builder::InstructionDescBuilder;
use crate::arch::error::DescriptorError;
use crate::arch::operand::OperandAccess;
use crate::math::OperatorId;

/// Largest number of operand slots any instruction may declare.
pub const MAX_OPERAND_COUNT: usize = 4;

pub(crate) type OperandList = SmallVec<[OperandAccess; MAX_OPERAND_COUNT]>;
pub(crate) type TargetList = SmallVec<[usize; 2]>;

/// Where control goes when an instruction branches through an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BranchTarget {
    /// The operand is the next position within the virtual control flow.
    Virtual(usize),
    /// The operand is a native address; virtual execution ends there.
    Native(usize),
}

impl BranchTarget {
    /// Decodes the table notation: `+n` continues virtual execution at operand `n`,
    /// `-n` exits to native code through operand `n`. Indices are 1-based.
    pub fn from_signed(value: i32) -> Option<Self> {
        let index = value.unsigned_abs() as usize;
        match value.signum() {
            1 => Some(BranchTarget::Virtual(index - 1)),
            -1 => Some(BranchTarget::Native(index - 1)),
            _ => None,
        }
    }

    pub fn operand(self) -> usize {
        match self {
            BranchTarget::Virtual(index) | BranchTarget::Native(index) => index,
        }
    }
}

/// Single memory access performed by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemoryAccess {
    /// Zero-based operand holding the base address.
    pub operand: usize,
    pub write: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstructionDesc {
    name: String,
    operands: OperandList,
    size_operand: Option<usize>,
    volatile: bool,
    operator: Option<OperatorId>,
    virtual_targets: TargetList,
    native_targets: TargetList,
    memory: Option<MemoryAccess>,
}

impl InstructionDesc {
    pub fn builder(name: impl Into<String>) -> InstructionDescBuilder {
        InstructionDescBuilder::new(name)
    }

    /// Builds a descriptor from the dense table notation.
    ///
    /// `size_operand` and `memory.0` are 1-based with 0 meaning "none"; each entry of
    /// `branches` is a signed 1-based operand index as understood by
    /// [`BranchTarget::from_signed`].
    pub fn from_table(
        name: &str,
        operands: &[OperandAccess],
        size_operand: usize,
        volatile: bool,
        operator: Option<OperatorId>,
        branches: &[i32],
        memory: (usize, bool),
    ) -> Result<Self, DescriptorError> {
        let mut builder = InstructionDescBuilder::new(name).operands(operands.iter().copied());
        if let Some(index) = size_operand.checked_sub(1) {
            builder = builder.size_operand(index);
        }
        if volatile {
            builder = builder.volatile();
        }
        if let Some(operator) = operator {
            builder = builder.operator(operator);
        }
        for &branch in branches {
            match BranchTarget::from_signed(branch) {
                Some(target) => builder = builder.branch(target),
                None => {
                    return Err(DescriptorError::ZeroBranchTarget {
                        name: name.to_string(),
                    });
                }
            }
        }
        if let Some(index) = memory.0.checked_sub(1) {
            builder = builder.memory(index, memory.1);
        }
        builder.build()
    }

    /// Validates the normalized fields and assembles the descriptor.
    pub(crate) fn from_parts(
        name: String,
        operands: OperandList,
        size_operand: Option<usize>,
        volatile: bool,
        operator: Option<OperatorId>,
        branches: &[BranchTarget],
        memory: Option<MemoryAccess>,
    ) -> Result<Self, DescriptorError> {
        let count = operands.len();
        if count > MAX_OPERAND_COUNT {
            return Err(DescriptorError::TooManyOperands {
                name,
                count,
                max: MAX_OPERAND_COUNT,
            });
        }
        if let Some(index) = size_operand
            && index >= count
        {
            return Err(DescriptorError::SizeOperandOutOfRange { name, index, count });
        }
        if let Some(access) = memory
            && access.operand >= count
        {
            return Err(DescriptorError::MemoryOperandOutOfRange {
                name,
                index: access.operand,
                count,
            });
        }

        let mut virtual_targets = TargetList::new();
        let mut native_targets = TargetList::new();
        for target in branches {
            let index = target.operand();
            if index >= count {
                return Err(DescriptorError::BranchTargetOutOfRange { name, index, count });
            }
            if virtual_targets.contains(&index) || native_targets.contains(&index) {
                return Err(DescriptorError::DuplicateBranchTarget { name, index });
            }
            match target {
                BranchTarget::Virtual(_) => virtual_targets.push(index),
                BranchTarget::Native(_) => native_targets.push(index),
            }
        }

        Ok(Self {
            name,
            operands,
            size_operand,
            volatile,
            operator,
            virtual_targets,
            native_targets,
            memory,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operands(&self) -> &[OperandAccess] {
        &self.operands
    }

    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    /// Zero-based operand whose width sets the instruction's working size.
    pub fn size_operand(&self) -> Option<usize> {
        self.size_operand
    }

    pub fn has_dynamic_size(&self) -> bool {
        self.size_operand.is_some()
    }

    /// Volatile instructions have effects beyond their declared writes and must not
    /// be eliminated or reordered.
    pub fn is_volatile(&self) -> bool {
        self.volatile
    }

    pub fn operator(&self) -> Option<OperatorId> {
        self.operator
    }

    pub fn has_operator(&self) -> bool {
        self.operator.is_some()
    }

    /// Operands that continue virtual execution, in table order.
    pub fn virtual_targets(&self) -> &[usize] {
        &self.virtual_targets
    }

    /// Operands that leave the virtual machine, in table order.
    pub fn native_targets(&self) -> &[usize] {
        &self.native_targets
    }

    pub fn branch_target(&self, operand: usize) -> Option<BranchTarget> {
        if self.virtual_targets.contains(&operand) {
            Some(BranchTarget::Virtual(operand))
        } else if self.native_targets.contains(&operand) {
            Some(BranchTarget::Native(operand))
        } else {
            None
        }
    }

    pub fn is_branching_virt(&self) -> bool {
        !self.virtual_targets.is_empty()
    }

    pub fn is_branching_real(&self) -> bool {
        !self.native_targets.is_empty()
    }

    pub fn is_branching(&self) -> bool {
        self.is_branching_virt() || self.is_branching_real()
    }

    pub fn memory(&self) -> Option<MemoryAccess> {
        self.memory
    }

    pub fn accesses_memory(&self) -> bool {
        self.memory.is_some()
    }

    pub fn reads_memory(&self) -> bool {
        matches!(self.memory, Some(MemoryAccess { write: false, .. }))
    }

    pub fn writes_memory(&self) -> bool {
        matches!(self.memory, Some(MemoryAccess { write: true, .. }))
    }
}

impl fmt::Display for InstructionDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (idx, access) in self.operands.iter().enumerate() {
            let sep = if idx == 0 { " " } else { ", " };
            write!(f, "{sep}{access}")?;
        }
        Ok(())
    }
}
