
//! The single table of binary operator semantics, shared by the tree
//! evaluator and the staged evaluator.

use crate::parsing::token::TokenKind;
use crate::util::{ieee_remainder, round_to_places};

use phf::phf_map;

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
  Add,
  Subtract,
  Multiply,
  Divide,
  Remainder,
  /// `a r b` is the `b`-th root of `a`.
  Root,
  Power,
  /// `a l b` is the logarithm of `a` in base `b`.
  Log,
}

/// Precedence tier of a binary operator. Operators in the same tier
/// are applied left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
  Additive,
  Multiplicative,
  Exponential,
}

/// Rounding applied to the results of rounded operators (see
/// [`BinaryOperator::is_rounded`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rounding {
  decimal_places: u32,
}

static SYMBOLS: phf::Map<&'static str, BinaryOperator> = phf_map! {
  "+" => BinaryOperator::Add,
  "-" => BinaryOperator::Subtract,
  "*" => BinaryOperator::Multiply,
  "/" => BinaryOperator::Divide,
  "%" => BinaryOperator::Remainder,
  "r" => BinaryOperator::Root,
  "^" => BinaryOperator::Power,
  "l" => BinaryOperator::Log,
};

impl BinaryOperator {
  pub const ALL: [BinaryOperator; 8] = [
    BinaryOperator::Add,
    BinaryOperator::Subtract,
    BinaryOperator::Multiply,
    BinaryOperator::Divide,
    BinaryOperator::Remainder,
    BinaryOperator::Root,
    BinaryOperator::Power,
    BinaryOperator::Log,
  ];

  pub fn from_symbol(symbol: &str) -> Option<BinaryOperator> {
    SYMBOLS.get(symbol).copied()
  }

  pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
      TokenKind::Plus => Some(BinaryOperator::Add),
      TokenKind::Dash => Some(BinaryOperator::Subtract),
      TokenKind::Star => Some(BinaryOperator::Multiply),
      TokenKind::Slash => Some(BinaryOperator::Divide),
      TokenKind::Percent => Some(BinaryOperator::Remainder),
      TokenKind::Root => Some(BinaryOperator::Root),
      TokenKind::Hat => Some(BinaryOperator::Power),
      TokenKind::Log => Some(BinaryOperator::Log),
      TokenKind::End | TokenKind::Number | TokenKind::OpenParen | TokenKind::CloseParen => None,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOperator::Add => "+",
      BinaryOperator::Subtract => "-",
      BinaryOperator::Multiply => "*",
      BinaryOperator::Divide => "/",
      BinaryOperator::Remainder => "%",
      BinaryOperator::Root => "r",
      BinaryOperator::Power => "^",
      BinaryOperator::Log => "l",
    }
  }

  pub fn token_kind(self) -> TokenKind {
    match self {
      BinaryOperator::Add => TokenKind::Plus,
      BinaryOperator::Subtract => TokenKind::Dash,
      BinaryOperator::Multiply => TokenKind::Star,
      BinaryOperator::Divide => TokenKind::Slash,
      BinaryOperator::Remainder => TokenKind::Percent,
      BinaryOperator::Root => TokenKind::Root,
      BinaryOperator::Power => TokenKind::Hat,
      BinaryOperator::Log => TokenKind::Log,
    }
  }

  pub fn tier(self) -> Tier {
    match self {
      BinaryOperator::Add | BinaryOperator::Subtract => Tier::Additive,
      BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Remainder => Tier::Multiplicative,
      BinaryOperator::Root | BinaryOperator::Power | BinaryOperator::Log => Tier::Exponential,
    }
  }

  /// Whether results pass through [`Rounding`]. Addition,
  /// subtraction, and remainder are exact enough to be left alone.
  pub fn is_rounded(self) -> bool {
    !matches!(self, BinaryOperator::Add | BinaryOperator::Subtract | BinaryOperator::Remainder)
  }

  /// Applies the operator. Never fails: division by zero and the
  /// like produce infinities or NaN.
  pub fn apply(self, a: f64, b: f64, rounding: Rounding) -> f64 {
    let value = match self {
      BinaryOperator::Add => a + b,
      BinaryOperator::Subtract => a - b,
      BinaryOperator::Multiply => a * b,
      BinaryOperator::Divide => a / b,
      BinaryOperator::Remainder => ieee_remainder(a, b),
      BinaryOperator::Root => a.powf(1.0 / b),
      BinaryOperator::Power => a.powf(b),
      BinaryOperator::Log => a.ln() / b.ln(),
    };
    if self.is_rounded() {
      rounding.apply(value)
    } else {
      value
    }
  }
}

impl Rounding {
  pub const DEFAULT_DECIMAL_PLACES: u32 = 10;

  pub fn new(decimal_places: u32) -> Self {
    Self { decimal_places }
  }

  pub fn decimal_places(self) -> u32 {
    self.decimal_places
  }

  pub fn apply(self, value: f64) -> f64 {
    round_to_places(value, self.decimal_places)
  }
}

impl Default for Rounding {
  fn default() -> Self {
    Self::new(Self::DEFAULT_DECIMAL_PLACES)
  }
}

impl Display for BinaryOperator {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.symbol())
  }
}
