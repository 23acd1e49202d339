//! Explicit, zero-based construction of instruction descriptors.
//!
//! The dense table form lives in [`InstructionDesc::from_table`]; this builder is for
//! descriptors assembled in code, where named setters read better than sentinels.

use smallvec::SmallVec;

use crate::arch::error::DescriptorError;
use crate::arch::instruction::{
    BranchTarget, InstructionDesc, MAX_OPERAND_COUNT, MemoryAccess, OperandList,
};
use crate::arch::operand::OperandAccess;
use crate::math::OperatorId;

#[derive(Debug, Clone)]
pub struct InstructionDescBuilder {
    name: String,
    operands: OperandList,
    size_operand: Option<usize>,
    volatile: bool,
    operator: Option<OperatorId>,
    branches: SmallVec<[BranchTarget; MAX_OPERAND_COUNT]>,
    memory: Option<MemoryAccess>,
}

impl InstructionDescBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operands: OperandList::new(),
            size_operand: None,
            volatile: false,
            operator: None,
            branches: SmallVec::new(),
            memory: None,
        }
    }

    /// Replaces the operand list.
    pub fn operands<I>(mut self, operands: I) -> Self
    where
        I: IntoIterator<Item = OperandAccess>,
    {
        self.operands = operands.into_iter().collect();
        self
    }

    /// Appends a single operand slot.
    pub fn operand(mut self, access: OperandAccess) -> Self {
        self.operands.push(access);
        self
    }

    pub fn size_operand(mut self, index: usize) -> Self {
        self.size_operand = Some(index);
        self
    }

    pub fn volatile(mut self) -> Self {
        self.volatile = true;
        self
    }

    pub fn operator(mut self, operator: OperatorId) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn branch(mut self, target: BranchTarget) -> Self {
        self.branches.push(target);
        self
    }

    pub fn continues_virtual(self, index: usize) -> Self {
        self.branch(BranchTarget::Virtual(index))
    }

    pub fn exits_to_native(self, index: usize) -> Self {
        self.branch(BranchTarget::Native(index))
    }

    pub fn memory(mut self, index: usize, write: bool) -> Self {
        self.memory = Some(MemoryAccess {
            operand: index,
            write,
        });
        self
    }

    /// Validates every index against the operand list and produces the descriptor.
    pub fn build(self) -> Result<InstructionDesc, DescriptorError> {
        InstructionDesc::from_parts(
            self.name,
            self.operands,
            self.size_operand,
            self.volatile,
            self.operator,
            &self.branches,
            self.memory,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OperandAccess::*;

    #[test]
    fn builds_conditional_exit() {
        let desc = InstructionDesc::builder("jexit")
            .operands([ReadReg, ReadAny, ReadAny])
            .size_operand(1)
            .volatile()
            .continues_virtual(1)
            .exits_to_native(2)
            .build()
            .expect("builder descriptor should validate");
        assert_eq!(desc.name(), "jexit");
        assert_eq!(desc.virtual_targets(), &[1]);
        assert_eq!(desc.native_targets(), &[2]);
        assert!(desc.is_volatile());
    }

    #[test]
    fn matches_table_notation() {
        let built = InstructionDescBuilder::new("ldd")
            .operand(Write)
            .operand(ReadReg)
            .operand(ReadImm)
            .size_operand(0)
            .memory(1, false)
            .build()
            .expect("ldd via builder");
        let table = InstructionDesc::from_table(
            "ldd",
            &[Write, ReadReg, ReadImm],
            1,
            false,
            None,
            &[],
            (2, false),
        )
        .expect("ldd via table");
        assert_eq!(built, table);
    }

    #[test]
    fn build_reports_out_of_range_indices() {
        let err = InstructionDescBuilder::new("bad")
            .operand(ReadAny)
            .continues_virtual(1)
            .build()
            .expect_err("target past the operand list");
        assert!(matches!(err, DescriptorError::BranchTargetOutOfRange { .. }));
    }
}
