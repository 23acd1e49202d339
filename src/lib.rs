//! Static data model of the virtual instruction set used by the lifting pipeline.
//!
//! [`arch`] holds the register and instruction descriptors together with the fixed
//! instruction catalog; [`math`] carries the small set of bit helpers and the
//! symbolic operator tokens the descriptors forward to the evaluation engine.

pub mod arch;
pub mod math;

pub use arch::{
    Catalog, InstructionDesc, InstructionDescBuilder, Opcode, OperandAccess, RegisterDesc,
    RegisterFlags,
};
