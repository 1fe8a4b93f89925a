//! Operator binding strength.
//!
//! The parser climbs this table for binary operators; the printer uses it
//! to decide where parentheses are needed.

use crate::ast::{AssignOp, BinaryOp};
use crate::token::TokenKind;

/// Binding strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Precedence {
    Lowest = 0,
    Comma,
    /// `=`, `+=`, arrows, `yield`
    Assignment,
    /// `?:`
    Conditional,
    /// `??`
    Coalesce,
    /// `||`
    LogicalOr,
    /// `&&`
    LogicalAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `&`
    BitwiseAnd,
    /// `==` `!=` `===` `!==`
    Equality,
    /// `<` `>` `<=` `>=` `in` `instanceof`
    Relational,
    /// `<<` `>>` `>>>`
    Shift,
    /// `+` `-`
    Additive,
    /// `*` `/` `%`
    Multiplicative,
    /// `**`
    Exponentiation,
    /// `!x`, `-x`, `typeof x`, `await x`
    Unary,
    /// `++x`, `x--`
    Update,
    /// Calls, member access, `new`
    LeftHandSide,
    /// Literals, identifiers, parenthesized expressions
    Primary,
}

impl Precedence {
    /// The next stronger level, saturating at `Primary`.
    pub fn next(self) -> Self {
        match self {
            Precedence::Lowest => Precedence::Comma,
            Precedence::Comma => Precedence::Assignment,
            Precedence::Assignment => Precedence::Conditional,
            Precedence::Conditional => Precedence::Coalesce,
            Precedence::Coalesce => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseXor,
            Precedence::BitwiseXor => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Exponentiation,
            Precedence::Exponentiation => Precedence::Unary,
            Precedence::Unary => Precedence::Update,
            Precedence::Update => Precedence::LeftHandSide,
            Precedence::LeftHandSide | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

impl BinaryOp {
    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::NullishCoalesce => Precedence::Coalesce,
            BinaryOp::Or => Precedence::LogicalOr,
            BinaryOp::And => Precedence::LogicalAnd,
            BinaryOp::BitOr => Precedence::BitwiseOr,
            BinaryOp::BitXor => Precedence::BitwiseXor,
            BinaryOp::BitAnd => Precedence::BitwiseAnd,
            BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::StrictEq | BinaryOp::StrictNotEq => {
                Precedence::Equality
            }
            BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::In
            | BinaryOp::Instanceof => Precedence::Relational,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => Precedence::Shift,
            BinaryOp::Add | BinaryOp::Sub => Precedence::Additive,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => Precedence::Multiplicative,
            BinaryOp::Pow => Precedence::Exponentiation,
        }
    }

    pub fn assoc(self) -> Assoc {
        if self == BinaryOp::Pow {
            Assoc::Right
        } else {
            Assoc::Left
        }
    }
}

/// Look up the binary operator a token denotes.
///
/// `in` is only an operator when `in_allowed` is set, so that the head of a
/// `for (x in y)` loop is not swallowed by the initializer expression.
pub fn binary_operator(kind: &TokenKind, in_allowed: bool) -> Option<(BinaryOp, Precedence, Assoc)> {
    let op = match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::StarStar => BinaryOp::Pow,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::NotEq,
        TokenKind::EqEqEq => BinaryOp::StrictEq,
        TokenKind::BangEqEq => BinaryOp::StrictNotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::LtLt => BinaryOp::Shl,
        TokenKind::GtGt => BinaryOp::Shr,
        TokenKind::GtGtGt => BinaryOp::UShr,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        TokenKind::QuestionQuestion => BinaryOp::NullishCoalesce,
        TokenKind::In if in_allowed => BinaryOp::In,
        TokenKind::Instanceof => BinaryOp::Instanceof,
        _ => return None,
    };
    Some((op, op.precedence(), op.assoc()))
}

/// Look up the assignment operator a token denotes.
pub fn assignment_operator(kind: &TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Eq => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        TokenKind::PercentEq => AssignOp::ModAssign,
        TokenKind::StarStarEq => AssignOp::PowAssign,
        TokenKind::LtLtEq => AssignOp::ShlAssign,
        TokenKind::GtGtEq => AssignOp::ShrAssign,
        TokenKind::GtGtGtEq => AssignOp::UShrAssign,
        TokenKind::PipeEq => AssignOp::BitOrAssign,
        TokenKind::CaretEq => AssignOp::BitXorAssign,
        TokenKind::AmpEq => AssignOp::BitAndAssign,
        TokenKind::AmpAmpEq => AssignOp::AndAssign,
        TokenKind::PipePipeEq => AssignOp::OrAssign,
        TokenKind::QuestionQuestionEq => AssignOp::NullishAssign,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Precedence::Multiplicative > Precedence::Additive);
        assert!(Precedence::Coalesce < Precedence::LogicalOr);
        assert!(Precedence::Exponentiation > Precedence::Multiplicative);
        assert_eq!(Precedence::Additive.next(), Precedence::Multiplicative);
        assert_eq!(Precedence::Primary.next(), Precedence::Primary);
    }

    #[test]
    fn test_in_gated() {
        assert!(binary_operator(&TokenKind::In, true).is_some());
        assert!(binary_operator(&TokenKind::In, false).is_none());
        assert!(binary_operator(&TokenKind::Instanceof, false).is_some());
    }

    #[test]
    fn test_pow_is_right_assoc() {
        let (op, prec, assoc) = binary_operator(&TokenKind::StarStar, true).unwrap();
        assert_eq!(op, BinaryOp::Pow);
        assert_eq!(prec, Precedence::Exponentiation);
        assert_eq!(assoc, Assoc::Right);
        assert_eq!(BinaryOp::Sub.assoc(), Assoc::Left);
    }

    #[test]
    fn test_assignment_lookup() {
        assert_eq!(assignment_operator(&TokenKind::QuestionQuestionEq), Some(AssignOp::NullishAssign));
        assert_eq!(assignment_operator(&TokenKind::EqEq), None);
    }
}
