
//! Expression trees produced by the Pratt parser.

pub mod operator;

use operator::{BinaryOperator, Rounding};
use crate::parsing::token::{Token, TokenKind};

use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// A node in an expression tree. Each node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  Unary {
    operator: Token,
    operand: Box<Expr>,
  },
  Binary {
    left: Box<Expr>,
    operator: Token,
    right: Box<Expr>,
  },
}

/// A tree contained an operator with no evaluation rule. The parser
/// never builds such trees, so this indicates a bug in the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
  #[error("Unary operator {0} not recognized")]
  UnsupportedUnary(TokenKind),
  #[error("Binary operator {0} not recognized")]
  UnsupportedBinary(TokenKind),
}

impl Expr {
  pub fn unary(operator: Token, operand: Expr) -> Self {
    Expr::Unary { operator, operand: Box::new(operand) }
  }

  pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
    Expr::Binary { left: Box::new(left), operator, right: Box::new(right) }
  }

  /// Evaluates with the default rounding of ten decimal places.
  pub fn eval(&self) -> Result<f64, EvalError> {
    self.eval_with(Rounding::default())
  }

  pub fn eval_with(&self, rounding: Rounding) -> Result<f64, EvalError> {
    match self {
      Expr::Number(value) => Ok(*value),
      Expr::Unary { operator, operand } => {
        match operator.kind() {
          TokenKind::Dash => Ok(-operand.eval_with(rounding)?),
          kind => Err(EvalError::UnsupportedUnary(kind)),
        }
      }
      Expr::Binary { left, operator, right } => {
        let a = left.eval_with(rounding)?;
        let b = right.eval_with(rounding)?;
        let op = BinaryOperator::from_token_kind(operator.kind())
          .ok_or(EvalError::UnsupportedBinary(operator.kind()))?;
        Ok(op.apply(a, b, rounding))
      }
    }
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Number(value) => write!(f, "{value}"),
      Expr::Unary { operator, operand } => write!(f, "({}{})", operator.value(), operand),
      Expr::Binary { left, operator, right } => write!(f, "({} {} {})", left, operator.value(), right),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::source::Span;

  fn op(kind: TokenKind, value: &str) -> Token {
    Token::new(kind, value, Span::default())
  }

  #[test]
  fn test_eval_number() {
    assert_eq!(Expr::Number(4.5).eval(), Ok(4.5));
  }

  #[test]
  fn test_eval_unary_minus() {
    let expr = Expr::unary(op(TokenKind::Dash, "-"), Expr::Number(2.0));
    assert_eq!(expr.eval(), Ok(-2.0));
  }

  #[test]
  fn test_eval_binary() {
    let expr = Expr::binary(
      Expr::binary(Expr::Number(2.0), op(TokenKind::Plus, "+"), Expr::Number(3.0)),
      op(TokenKind::Star, "*"),
      Expr::Number(4.0),
    );
    assert_eq!(expr.eval(), Ok(20.0));
  }

  #[test]
  fn test_unsupported_operators() {
    let expr = Expr::unary(op(TokenKind::Plus, "+"), Expr::Number(2.0));
    assert_eq!(expr.eval(), Err(EvalError::UnsupportedUnary(TokenKind::Plus)));

    let expr = Expr::binary(Expr::Number(1.0), op(TokenKind::OpenParen, "("), Expr::Number(2.0));
    assert_eq!(expr.eval(), Err(EvalError::UnsupportedBinary(TokenKind::OpenParen)));
  }

  #[test]
  fn test_display() {
    let expr = Expr::binary(
      Expr::unary(op(TokenKind::Dash, "-"), Expr::Number(2.5)),
      op(TokenKind::Hat, "^"),
      Expr::Number(2.0),
    );
    assert_eq!(expr.to_string(), "((-2.5) ^ 2)");
  }
}
