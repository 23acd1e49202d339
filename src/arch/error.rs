//! Errors raised while constructing register and instruction descriptors.
//!
//! Every variant describes an authoring defect in a static table. The standard
//! catalog treats any of them as fatal; the fallible constructors exist so tables
//! assembled elsewhere can report the defect instead.

use thiserror::Error;

use crate::math::BitCount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("register must span at least one bit")]
    ZeroWidth,

    #[error("register range {bit_offset}+{bit_count} exceeds 64 bits")]
    OutOfRange {
        bit_count: BitCount,
        bit_offset: BitCount,
    },

    #[error("flags and stack pointer registers must be physical, writable and non-volatile")]
    InvalidSpecialRegister,

    #[error("physical registers cannot be block-local")]
    PhysicalLocal,
}

impl RegisterError {
    /// Static message usable from `const` contexts, where formatting is unavailable.
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            RegisterError::ZeroWidth => "register must span at least one bit",
            RegisterError::OutOfRange { .. } => "register range exceeds 64 bits",
            RegisterError::InvalidSpecialRegister => {
                "flags and stack pointer registers must be physical, writable and non-volatile"
            }
            RegisterError::PhysicalLocal => "physical registers cannot be block-local",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("'{name}' declares {count} operands, at most {max} are allowed")]
    TooManyOperands {
        name: String,
        count: usize,
        max: usize,
    },

    #[error("'{name}' sizes itself by operand {index} but has {count} operand(s)")]
    SizeOperandOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },

    #[error("'{name}' accesses memory through operand {index} but has {count} operand(s)")]
    MemoryOperandOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },

    #[error("'{name}' lists branch target 0; branch targets are 1-based")]
    ZeroBranchTarget { name: String },

    #[error("'{name}' branches through operand {index} but has {count} operand(s)")]
    BranchTargetOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },

    #[error("'{name}' lists operand {index} as a branch target more than once")]
    DuplicateBranchTarget { name: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("instruction '{0}' registered more than once")]
    DuplicateName(String),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instruction '{0}'")]
pub struct UnknownOpcode(pub String);
