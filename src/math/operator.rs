use std::fmt;

/// Symbolic operation an instruction lowers to in the evaluation engine.
///
/// The descriptor layer only stores and forwards these tokens; their semantics are
/// defined by whichever engine consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperatorId {
    Negate,
    Add,
    Subtract,
    Multiply,
    MultiplyHigh,
    UMultiply,
    UMultiplyHigh,
    Divide,
    UDivide,
    Remainder,
    URemainder,
    BitwiseNot,
    BitwiseXor,
    BitwiseOr,
    BitwiseAnd,
    ShiftLeft,
    ShiftRight,
    RotateLeft,
    RotateRight,
}

impl OperatorId {
    pub const fn name(self) -> &'static str {
        match self {
            OperatorId::Negate => "negate",
            OperatorId::Add => "add",
            OperatorId::Subtract => "subtract",
            OperatorId::Multiply => "multiply",
            OperatorId::MultiplyHigh => "multiply_high",
            OperatorId::UMultiply => "umultiply",
            OperatorId::UMultiplyHigh => "umultiply_high",
            OperatorId::Divide => "divide",
            OperatorId::UDivide => "udivide",
            OperatorId::Remainder => "remainder",
            OperatorId::URemainder => "uremainder",
            OperatorId::BitwiseNot => "bitwise_not",
            OperatorId::BitwiseXor => "bitwise_xor",
            OperatorId::BitwiseOr => "bitwise_or",
            OperatorId::BitwiseAnd => "bitwise_and",
            OperatorId::ShiftLeft => "shift_left",
            OperatorId::ShiftRight => "shift_right",
            OperatorId::RotateLeft => "rotate_left",
            OperatorId::RotateRight => "rotate_right",
        }
    }

    /// Infix or prefix symbol used when printing expressions.
    pub const fn symbol(self) -> &'static str {
        match self {
            OperatorId::Negate => "-",
            OperatorId::Add => "+",
            OperatorId::Subtract => "-",
            OperatorId::Multiply | OperatorId::UMultiply => "*",
            OperatorId::MultiplyHigh | OperatorId::UMultiplyHigh => "h*",
            OperatorId::Divide | OperatorId::UDivide => "/",
            OperatorId::Remainder | OperatorId::URemainder => "%",
            OperatorId::BitwiseNot => "~",
            OperatorId::BitwiseXor => "^",
            OperatorId::BitwiseOr => "|",
            OperatorId::BitwiseAnd => "&",
            OperatorId::ShiftLeft => "<<",
            OperatorId::ShiftRight => ">>",
            OperatorId::RotateLeft => "rotl",
            OperatorId::RotateRight => "rotr",
        }
    }

    /// Whether the operation treats its inputs as signed values.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            OperatorId::Multiply
                | OperatorId::MultiplyHigh
                | OperatorId::Divide
                | OperatorId::Remainder
        )
    }

    pub const fn is_unary(self) -> bool {
        matches!(self, OperatorId::Negate | OperatorId::BitwiseNot)
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signedness_follows_the_unsigned_prefix() {
        assert!(OperatorId::Divide.is_signed());
        assert!(!OperatorId::UDivide.is_signed());
        assert!(OperatorId::MultiplyHigh.is_signed());
        assert!(!OperatorId::UMultiplyHigh.is_signed());
    }

    #[test]
    fn display_uses_snake_case_name() {
        assert_eq!(OperatorId::UMultiplyHigh.to_string(), "umultiply_high");
        assert_eq!(OperatorId::BitwiseOr.symbol(), "|");
    }
}
