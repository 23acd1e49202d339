use std::fmt;

/// Role an operand slot plays in an instruction.
///
/// Binding rules enforced by the operand validator: written slots need a register,
/// `ReadImm` needs a constant and `ReadAny` takes either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperandAccess {
    Write,
    ReadReg,
    ReadImm,
    ReadAny,
    #[cfg_attr(feature = "serde", serde(rename = "readwrite"))]
    ReadWrite,
}

impl OperandAccess {
    pub const fn is_read(self) -> bool {
        !matches!(self, OperandAccess::Write)
    }

    pub const fn is_write(self) -> bool {
        matches!(self, OperandAccess::Write | OperandAccess::ReadWrite)
    }

    /// Whether a register may be bound to this slot.
    pub const fn accepts_register(self) -> bool {
        !matches!(self, OperandAccess::ReadImm)
    }

    /// Whether an immediate may be bound to this slot.
    pub const fn accepts_immediate(self) -> bool {
        matches!(self, OperandAccess::ReadImm | OperandAccess::ReadAny)
    }

    pub const fn requires_register(self) -> bool {
        !self.accepts_immediate()
    }

    pub const fn name(self) -> &'static str {
        match self {
            OperandAccess::Write => "write",
            OperandAccess::ReadReg => "read_reg",
            OperandAccess::ReadImm => "read_imm",
            OperandAccess::ReadAny => "read_any",
            OperandAccess::ReadWrite => "readwrite",
        }
    }
}

impl fmt::Display for OperandAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_slots_require_registers() {
        for access in [OperandAccess::Write, OperandAccess::ReadWrite] {
            assert!(access.is_write());
            assert!(access.requires_register(), "{access} must bind a register");
            assert!(!access.accepts_immediate());
        }
    }

    #[test]
    fn read_kinds_split_by_operand_type() {
        assert!(OperandAccess::ReadImm.accepts_immediate());
        assert!(!OperandAccess::ReadImm.accepts_register());
        assert!(OperandAccess::ReadReg.requires_register());
        assert!(OperandAccess::ReadAny.accepts_register());
        assert!(OperandAccess::ReadAny.accepts_immediate());
        assert!(!OperandAccess::Write.is_read());
        assert!(OperandAccess::ReadWrite.is_read());
    }
}
