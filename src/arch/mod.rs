//! Descriptors of the virtual instruction set: operand roles, registers,
//! per-opcode metadata and the fixed catalog that ties them together.

pub mod builder;
pub mod catalog;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod register;

pub use builder::InstructionDescBuilder;
pub use catalog::Catalog;
pub use error::{CatalogError, DescriptorError, RegisterError, UnknownOpcode};
pub use instruction::{BranchTarget, InstructionDesc, MAX_OPERAND_COUNT, MemoryAccess};
pub use opcode::Opcode;
pub use operand::OperandAccess;
pub use register::{
    DefaultNamer, REG_FLAGS, REG_SP, RegisterClass, RegisterDesc, RegisterFlags, RegisterNamer,
    TableNamer,
};
