//! Binary operator tiers and the `>` recombination table.

use rsecma_ast::{AssignmentOperator, BinaryOperator, TokenKind};

/// Binary precedence tiers, lowest first. `??` shares the `LogicalOr` tier
/// but takes its operands from `BitwiseOr`. `Exponent` is a sentinel: no
/// binary operator binds at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponent,
}

impl Tier {
    /// The tier operands of this tier are parsed at.
    pub fn next(self) -> Tier {
        match self {
            Tier::LogicalOr => Tier::LogicalAnd,
            Tier::LogicalAnd => Tier::BitwiseOr,
            Tier::BitwiseOr => Tier::BitwiseXor,
            Tier::BitwiseXor => Tier::BitwiseAnd,
            Tier::BitwiseAnd => Tier::Equality,
            Tier::Equality => Tier::Relational,
            Tier::Relational => Tier::Shift,
            Tier::Shift => Tier::Additive,
            Tier::Additive => Tier::Multiplicative,
            Tier::Multiplicative | Tier::Exponent => Tier::Exponent,
        }
    }
}

/// Binary operators spelled by a single token, with their tier. `in` is
/// reported unconditionally; callers check the `[In]` parameter.
pub fn binary_operator(kind: TokenKind) -> Option<(BinaryOperator, Tier)> {
    use BinaryOperator as B;
    let entry = match kind {
        TokenKind::QuestionQuestionToken => (B::Coalesce, Tier::LogicalOr),
        TokenKind::BarBarToken => (B::LogicalOr, Tier::LogicalOr),
        TokenKind::AmpersandAmpersandToken => (B::LogicalAnd, Tier::LogicalAnd),
        TokenKind::BarToken => (B::BitwiseOr, Tier::BitwiseOr),
        TokenKind::CaretToken => (B::BitwiseXor, Tier::BitwiseXor),
        TokenKind::AmpersandToken => (B::BitwiseAnd, Tier::BitwiseAnd),
        TokenKind::EqualsEqualsToken => (B::Equality, Tier::Equality),
        TokenKind::ExclamationEqualsToken => (B::Inequality, Tier::Equality),
        TokenKind::EqualsEqualsEqualsToken => (B::StrictEquality, Tier::Equality),
        TokenKind::ExclamationEqualsEqualsToken => (B::StrictInequality, Tier::Equality),
        TokenKind::LessThanToken => (B::LessThan, Tier::Relational),
        TokenKind::LessThanEqualsToken => (B::LessEqualThan, Tier::Relational),
        TokenKind::InstanceOfKeyword => (B::InstanceOf, Tier::Relational),
        TokenKind::InKeyword => (B::In, Tier::Relational),
        TokenKind::LessThanLessThanToken => (B::ShiftLeft, Tier::Shift),
        TokenKind::PlusToken => (B::Addition, Tier::Additive),
        TokenKind::MinusToken => (B::Subtraction, Tier::Additive),
        TokenKind::AsteriskToken => (B::Multiplication, Tier::Multiplicative),
        TokenKind::SlashToken => (B::Division, Tier::Multiplicative),
        TokenKind::PercentToken => (B::Remainder, Tier::Multiplicative),
        _ => return None,
    };
    Some(entry)
}

/// Assignment operators spelled by a single token.
pub fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
    use AssignmentOperator as A;
    let op = match kind {
        TokenKind::EqualsToken => A::Assign,
        TokenKind::PlusEqualsToken => A::Addition,
        TokenKind::MinusEqualsToken => A::Subtraction,
        TokenKind::AsteriskEqualsToken => A::Multiplication,
        TokenKind::AsteriskAsteriskEqualsToken => A::Exponential,
        TokenKind::SlashEqualsToken => A::Division,
        TokenKind::PercentEqualsToken => A::Remainder,
        TokenKind::LessThanLessThanEqualsToken => A::ShiftLeft,
        TokenKind::AmpersandEqualsToken => A::BitwiseAnd,
        TokenKind::BarEqualsToken => A::BitwiseOr,
        TokenKind::CaretEqualsToken => A::BitwiseXor,
        TokenKind::BarBarEqualsToken => A::LogicalOr,
        TokenKind::AmpersandAmpersandEqualsToken => A::LogicalAnd,
        TokenKind::QuestionQuestionEqualsToken => A::Coalesce,
        _ => return None,
    };
    Some(op)
}

/// An operator spelled with one or more adjacent `>` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GtOperator {
    GreaterThan,
    GreaterThanEquals,
    ShiftRight,
    ShiftRightAssign,
    UnsignedShiftRight,
    UnsignedShiftRightAssign,
}

impl GtOperator {
    /// `count` adjacent `>` tokens (1 to 3), optionally followed by `=`.
    pub fn from_parts(count: u32, assign: bool) -> Self {
        match (count, assign) {
            (1, false) => GtOperator::GreaterThan,
            (1, true) => GtOperator::GreaterThanEquals,
            (2, false) => GtOperator::ShiftRight,
            (2, true) => GtOperator::ShiftRightAssign,
            (_, false) => GtOperator::UnsignedShiftRight,
            (_, true) => GtOperator::UnsignedShiftRightAssign,
        }
    }

    /// Number of tokens the operator is spelled with.
    pub fn token_count(self) -> u32 {
        match self {
            GtOperator::GreaterThan => 1,
            GtOperator::GreaterThanEquals | GtOperator::ShiftRight => 2,
            GtOperator::ShiftRightAssign | GtOperator::UnsignedShiftRight => 3,
            GtOperator::UnsignedShiftRightAssign => 4,
        }
    }

    pub fn binary(self) -> Option<(BinaryOperator, Tier)> {
        match self {
            GtOperator::GreaterThan => Some((BinaryOperator::GreaterThan, Tier::Relational)),
            GtOperator::GreaterThanEquals => {
                Some((BinaryOperator::GreaterEqualThan, Tier::Relational))
            }
            GtOperator::ShiftRight => Some((BinaryOperator::ShiftRight, Tier::Shift)),
            GtOperator::UnsignedShiftRight => {
                Some((BinaryOperator::ShiftRightZeroFill, Tier::Shift))
            }
            _ => None,
        }
    }

    pub fn assignment(self) -> Option<AssignmentOperator> {
        match self {
            GtOperator::ShiftRightAssign => Some(AssignmentOperator::ShiftRight),
            GtOperator::UnsignedShiftRightAssign => Some(AssignmentOperator::ShiftRightZeroFill),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_ascend() {
        let mut tier = Tier::LogicalOr;
        let mut seen = 1;
        while tier != Tier::Exponent {
            assert!(tier.next() > tier);
            tier = tier.next();
            seen += 1;
        }
        assert_eq!(seen, 11);
    }

    #[test]
    fn test_gt_operators() {
        assert_eq!(GtOperator::from_parts(3, true).token_count(), 4);
        assert_eq!(
            GtOperator::from_parts(2, false).binary(),
            Some((BinaryOperator::ShiftRight, Tier::Shift))
        );
        assert_eq!(
            GtOperator::from_parts(3, true).assignment(),
            Some(AssignmentOperator::ShiftRightZeroFill)
        );
        assert_eq!(GtOperator::GreaterThanEquals.assignment(), None);
    }

    #[test]
    fn test_operator_tables() {
        assert_eq!(
            binary_operator(TokenKind::QuestionQuestionToken),
            Some((BinaryOperator::Coalesce, Tier::LogicalOr))
        );
        assert_eq!(binary_operator(TokenKind::EqualsToken), None);
        assert_eq!(
            assignment_operator(TokenKind::QuestionQuestionEqualsToken),
            Some(AssignmentOperator::Coalesce)
        );
    }
}
