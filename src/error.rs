
use crate::expr::EvalError;
use crate::parsing::lexer::TokenizerError;
use crate::parsing::pratt::ParseError;
use crate::parsing::validator::ValidationError;
use crate::staged::StagedError;

use thiserror::Error;

/// Any failure to turn an equation into a number.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  Parse(#[from] ParseError),
  #[error("{0}")]
  Validation(#[from] ValidationError),
  #[error("{0}")]
  Eval(#[from] EvalError),
  #[error("{0}")]
  Staged(#[from] StagedError),
  #[error("Evaluators disagree: tree gave {pratt}, staged gave {staged}")]
  EnginesDisagree { pratt: f64, staged: f64 },
}

impl From<TokenizerError> for Error {
  fn from(err: TokenizerError) -> Self {
    Self::Parse(err.into())
  }
}
