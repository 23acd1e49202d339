//! The fixed instruction set, one [`Opcode`] per catalog entry.
//!
//! Rows are written in the dense table notation accepted by
//! [`InstructionDesc::from_table`]:
//!
//! ```text
//! name, operands, size operand (1-based, 0 = fixed), volatile, operator,
//! branch operands (+n virtual, -n native), memory operand (1-based, 0 = none) + write
//! ```

use std::fmt;
use std::str::FromStr;

use crate::arch::catalog::Catalog;
use crate::arch::error::{DescriptorError, UnknownOpcode};
use crate::arch::instruction::InstructionDesc;
use crate::arch::operand::OperandAccess;
use crate::math::OperatorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Opcode {
    // Data and memory
    Mov,
    Movr,
    Str,
    Ldd,
    // Arithmetic
    Neg,
    Add,
    Sub,
    Mul,
    Imul,
    Mulhi,
    Imulhi,
    Div,
    Idiv,
    Rem,
    Irem,
    // Bitwise
    Not,
    Shr,
    Shl,
    Xor,
    Or,
    And,
    Ror,
    Rol,
    Upflg,
    // Control flow
    Js,
    Jmp,
    Vexit,
    Vxcall,
    // Special
    Nop,
    Vsetcc,
    Vemit,
    Vpinr,
    Vpinw,
    Vpinrm,
    Vpinwm,
}

impl Opcode {
    /// Every opcode in catalog order.
    pub const ALL: [Opcode; 35] = [
        Opcode::Mov,
        Opcode::Movr,
        Opcode::Str,
        Opcode::Ldd,
        Opcode::Neg,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Imul,
        Opcode::Mulhi,
        Opcode::Imulhi,
        Opcode::Div,
        Opcode::Idiv,
        Opcode::Rem,
        Opcode::Irem,
        Opcode::Not,
        Opcode::Shr,
        Opcode::Shl,
        Opcode::Xor,
        Opcode::Or,
        Opcode::And,
        Opcode::Ror,
        Opcode::Rol,
        Opcode::Upflg,
        Opcode::Js,
        Opcode::Jmp,
        Opcode::Vexit,
        Opcode::Vxcall,
        Opcode::Nop,
        Opcode::Vsetcc,
        Opcode::Vemit,
        Opcode::Vpinr,
        Opcode::Vpinw,
        Opcode::Vpinrm,
        Opcode::Vpinwm,
    ];

    /// Descriptor of this opcode in the standard catalog.
    pub fn desc(self) -> &'static InstructionDesc {
        &Catalog::standard().entries()[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.desc().name()
    }

    /// Authoring row for this opcode.
    #[rustfmt::skip]
    pub(crate) fn table_entry(self) -> Result<InstructionDesc, DescriptorError> {
        use OperandAccess::{
            ReadAny as RANY, ReadImm as RIMM, ReadReg as RREG, ReadWrite as RW, Write as W,
        };
        use OperatorId as Op;

        const NONE: (usize, bool) = (0, false);
        let row = InstructionDesc::from_table;

        match self {
            // MOV    Reg, Reg/Imm           OP1 = OP2
            // MOVR   Reg, Imm               OP1 = Relocate(OP2)
            // STR    Reg, Imm, Reg/Imm      [OP1+OP2] <= OP3
            // LDD    Reg, Reg, Imm          OP1 <= [OP2+OP3]
            Opcode::Mov => row("mov", &[W, RANY], 2, false, None, &[], NONE),
            Opcode::Movr => row("movr", &[W, RIMM], 2, false, None, &[], NONE),
            Opcode::Str => row("str", &[RREG, RIMM, RANY], 3, false, None, &[], (1, true)),
            Opcode::Ldd => row("ldd", &[W, RREG, RIMM], 1, false, None, &[], (2, false)),

            // DIV/IDIV/REM/IREM take the dividend as [OP2:OP1] and divide by OP3.
            // MULHI/IMULHI keep the upper half of the double-width product.
            Opcode::Neg => row("neg", &[RW], 1, false, Some(Op::Negate), &[], NONE),
            Opcode::Add => row("add", &[RW, RANY], 1, false, Some(Op::Add), &[], NONE),
            Opcode::Sub => row("sub", &[RW, RANY], 1, false, Some(Op::Subtract), &[], NONE),
            Opcode::Mul => row("mul", &[RW, RANY], 1, false, Some(Op::UMultiply), &[], NONE),
            Opcode::Imul => row("imul", &[RW, RANY], 1, false, Some(Op::Multiply), &[], NONE),
            Opcode::Mulhi => row("mulhi", &[RW, RANY], 1, false, Some(Op::UMultiplyHigh), &[], NONE),
            Opcode::Imulhi => row("imulhi", &[RW, RANY], 1, false, Some(Op::MultiplyHigh), &[], NONE),
            Opcode::Div => row("div", &[RW, RANY, RANY], 1, false, Some(Op::UDivide), &[], NONE),
            Opcode::Idiv => row("idiv", &[RW, RANY, RANY], 1, false, Some(Op::Divide), &[], NONE),
            Opcode::Rem => row("rem", &[RW, RANY, RANY], 1, false, Some(Op::URemainder), &[], NONE),
            Opcode::Irem => row("irem", &[RW, RANY, RANY], 1, false, Some(Op::Remainder), &[], NONE),

            Opcode::Not => row("not", &[RW], 1, false, Some(Op::BitwiseNot), &[], NONE),
            Opcode::Shr => row("shr", &[RW, RANY], 1, false, Some(Op::ShiftRight), &[], NONE),
            Opcode::Shl => row("shl", &[RW, RANY], 1, false, Some(Op::ShiftLeft), &[], NONE),
            Opcode::Xor => row("xor", &[RW, RANY], 1, false, Some(Op::BitwiseXor), &[], NONE),
            Opcode::Or => row("or", &[RW, RANY], 1, false, Some(Op::BitwiseOr), &[], NONE),
            Opcode::And => row("and", &[RW, RANY], 1, false, Some(Op::BitwiseAnd), &[], NONE),
            Opcode::Ror => row("ror", &[RW, RANY], 1, false, Some(Op::RotateRight), &[], NONE),
            Opcode::Rol => row("rol", &[RW, RANY], 1, false, Some(Op::RotateLeft), &[], NONE),
            // Flags of the previous instruction were computed into OP1.
            Opcode::Upflg => row("upflg", &[RW], 1, false, None, &[], NONE),

            // JS     Reg, Reg/Imm, Reg/Imm  conditional, stays virtual; targets are listed
            //                               as operands 1 and 2
            // JMP    Reg/Imm                OP1; stays virtual
            // VEXIT  Reg/Imm                OP1; resumes native execution
            // VXCALL Reg/Imm                calls OP1, virtual execution resumes on return
            Opcode::Js => row("js", &[RREG, RANY, RANY], 2, true, None, &[1, 2], NONE),
            Opcode::Jmp => row("jmp", &[RANY], 1, true, None, &[1], NONE),
            Opcode::Vexit => row("vexit", &[RANY], 1, true, None, &[-1], NONE),
            Opcode::Vxcall => row("vxcall", &[RANY], 1, true, None, &[], NONE),

            // VSETCC emits SETcc on OP1 from the [OP2]th flags bit, VEMIT emits OP1 as raw
            // bytes, VPIN* pin a register or the qword at [OP1+OP2] for read or write.
            Opcode::Nop => row("nop", &[], 0, false, None, &[], NONE),
            Opcode::Vsetcc => row("vsetcc", &[W, RIMM], 1, false, None, &[], NONE),
            Opcode::Vemit => row("vemit", &[RIMM], 1, true, None, &[], NONE),
            Opcode::Vpinr => row("vpinr", &[RREG], 1, true, None, &[], NONE),
            Opcode::Vpinw => row("vpinw", &[W], 1, true, None, &[], NONE),
            Opcode::Vpinrm => row("vpinrm", &[RREG, RIMM], 1, true, None, &[], (1, false)),
            Opcode::Vpinwm => row("vpinwm", &[RREG, RIMM], 1, true, None, &[], (1, true)),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Catalog::standard()
            .position(name)
            .map(|index| Opcode::ALL[index])
            .ok_or_else(|| UnknownOpcode(name.to_string()))
    }
}
