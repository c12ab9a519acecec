
//! Pre-flight structural check over a token sequence.
//!
//! The validator only confirms the shape of an equation: operands and
//! operators alternate, and parentheses balance. It builds nothing.

use super::source::SourceOffset;
use super::token::{Token, TokenKind};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
  #[error("Empty equation")]
  Empty,
  #[error("Equation cannot begin with operator '{0}'")]
  LeadingOperator(String),
  #[error("Operator '{operator}' at {position} must follow an operand")]
  ConsecutiveOperators { operator: String, position: SourceOffset },
  #[error("Equation cannot end with an operator")]
  TrailingOperator,
  #[error("Unbalanced ')' at {0}")]
  UnbalancedClose(SourceOffset),
  #[error("{0} unclosed '('")]
  UnclosedParen(usize),
}

pub fn is_valid(tokens: &[Token]) -> bool {
  check(tokens).is_ok()
}

/// Like [`is_valid`], but reports the first violation found.
pub fn check(tokens: &[Token]) -> Result<(), ValidationError> {
  let mut depth: usize = 0;
  let mut operand_seen = false;
  for (i, token) in tokens.iter().enumerate() {
    match token.kind() {
      TokenKind::OpenParen => depth += 1,
      TokenKind::CloseParen => {
        depth = depth.checked_sub(1).ok_or(ValidationError::UnbalancedClose(token.span().start))?;
      }
      _ => {}
    }

    if token.kind().is_operand_like() {
      operand_seen = true;
      continue;
    }
    if !operand_seen {
      return Err(operator_error(i, token));
    }
    operand_seen = false;
  }

  if depth == 0 {
    Ok(())
  } else {
    Err(ValidationError::UnclosedParen(depth))
  }
}

fn operator_error(index: usize, token: &Token) -> ValidationError {
  match (index, token.kind()) {
    (0, TokenKind::End) => ValidationError::Empty,
    (0, _) => ValidationError::LeadingOperator(token.value().to_owned()),
    (_, TokenKind::End) => ValidationError::TrailingOperator,
    (_, _) => ValidationError::ConsecutiveOperators {
      operator: token.value().to_owned(),
      position: token.span().start,
    },
  }
}
