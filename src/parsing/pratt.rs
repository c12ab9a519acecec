
//! Pratt (top-down operator precedence) parser.
//!
//! Each token kind may have a prefix handler, used when the token
//! starts a subexpression, and an infix handler, used when it
//! continues one. Both tables, along with the binding power of each
//! kind, are immutable statics indexed by [`TokenKind`].

use super::binding_power::BindingPower;
use super::lexer::{tokenize, TokenizerError};
use super::source::SourceOffset;
use super::token::{Token, TokenKind, TokenSequence};
use crate::expr::Expr;

use thiserror::Error;
use log::debug;

/// Maximum nesting of subexpressions before parsing gives up.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
  #[error("{0}")]
  Tokenizer(#[from] TokenizerError),
  #[error("No prefix handler for token {token} at {position}")]
  NoPrefixHandler { token: Token, position: SourceOffset },
  #[error("No infix handler for token {token} at {position}")]
  NoInfixHandler { token: Token, position: SourceOffset },
  #[error("Expected {expected} but received {found} at {position}")]
  UnexpectedToken { expected: TokenKind, found: Token, position: SourceOffset },
  #[error("Unexpected {token} at {position} after end of expression")]
  TrailingInput { token: Token, position: SourceOffset },
  #[error("Invalid number literal '{literal}' at {position}")]
  InvalidNumber { literal: String, position: SourceOffset },
  #[error("Expression nested more than {limit} levels deep at {position}")]
  TooDeeplyNested { limit: usize, position: SourceOffset },
}

type PrefixHandler = fn(&mut Parser<'_>) -> Result<Expr, ParseError>;
type InfixHandler = fn(&mut Parser<'_>, Expr) -> Result<Expr, ParseError>;

#[derive(Clone, Copy)]
struct PrefixRule {
  binding_power: BindingPower,
  handler: PrefixHandler,
}

#[derive(Clone, Copy)]
struct InfixRule {
  binding_power: BindingPower,
  handler: InfixHandler,
}

static PREFIX_RULES: [Option<PrefixRule>; TokenKind::COUNT] = prefix_rules();
static INFIX_RULES: [Option<InfixRule>; TokenKind::COUNT] = infix_rules();
static BINDING_POWERS: [BindingPower; TokenKind::COUNT] = binding_powers();

const fn prefix_rules() -> [Option<PrefixRule>; TokenKind::COUNT] {
  let mut rules: [Option<PrefixRule>; TokenKind::COUNT] = [None; TokenKind::COUNT];
  rules[TokenKind::Number.index()] =
    Some(PrefixRule { binding_power: BindingPower::Primary, handler: parse_number });
  rules[TokenKind::Dash.index()] =
    Some(PrefixRule { binding_power: BindingPower::Additive, handler: parse_unary });
  rules[TokenKind::OpenParen.index()] =
    Some(PrefixRule { binding_power: BindingPower::Default, handler: parse_grouping });
  rules
}

const fn infix_rules() -> [Option<InfixRule>; TokenKind::COUNT] {
  let mut rules: [Option<InfixRule>; TokenKind::COUNT] = [None; TokenKind::COUNT];
  rules[TokenKind::Plus.index()] = Some(binary_rule(BindingPower::Additive));
  rules[TokenKind::Dash.index()] = Some(binary_rule(BindingPower::Additive));
  rules[TokenKind::Slash.index()] = Some(binary_rule(BindingPower::Multiplicative));
  rules[TokenKind::Star.index()] = Some(binary_rule(BindingPower::Multiplicative));
  rules[TokenKind::Percent.index()] = Some(binary_rule(BindingPower::Multiplicative));
  rules[TokenKind::Root.index()] = Some(binary_rule(BindingPower::Exponential));
  rules[TokenKind::Hat.index()] = Some(binary_rule(BindingPower::Exponential));
  rules[TokenKind::Log.index()] = Some(binary_rule(BindingPower::Exponential));
  rules
}

const fn binary_rule(binding_power: BindingPower) -> InfixRule {
  InfixRule { binding_power, handler: parse_binary }
}

/// The binding power each token kind presents to the parse loop. An
/// infix rule's power wins over a prefix rule's for the same kind.
const fn binding_powers() -> [BindingPower; TokenKind::COUNT] {
  let prefix = prefix_rules();
  let infix = infix_rules();
  let mut powers = [BindingPower::Default; TokenKind::COUNT];
  let mut i = 0;
  while i < TokenKind::COUNT {
    if let Some(rule) = infix[i] {
      powers[i] = rule.binding_power;
    } else if let Some(rule) = prefix[i] {
      powers[i] = rule.binding_power;
    }
    i += 1;
  }
  powers
}

pub fn binding_power(kind: TokenKind) -> BindingPower {
  BINDING_POWERS[kind.index()]
}

pub fn has_prefix_handler(kind: TokenKind) -> bool {
  PREFIX_RULES[kind.index()].is_some()
}

pub fn has_infix_handler(kind: TokenKind) -> bool {
  INFIX_RULES[kind.index()].is_some()
}

/// Parser state: a token slice and a forward-only cursor. The cursor
/// never moves past the terminating `End` token.
///
/// `max_depth` bounds both the nesting of subexpressions and the
/// height of the tree built, so a long flat chain like `1+1+...+1`
/// fails the same way deep parentheses do.
#[derive(Debug, Clone)]
pub struct Parser<'t> {
  tokens: &'t [Token],
  pos: usize,
  depth: usize,
  max_depth: usize,
  /// Height of the expression most recently returned by a handler.
  height: usize,
}

impl<'t> Parser<'t> {
  pub fn new(tokens: &'t TokenSequence) -> Self {
    Self { tokens: tokens.as_slice(), pos: 0, depth: 0, max_depth: DEFAULT_MAX_DEPTH, height: 0 }
  }

  pub fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }

  pub fn current(&self) -> &'t Token {
    &self.tokens[self.pos]
  }

  fn advance(&mut self) -> &'t Token {
    let token = self.current();
    if token.kind() != TokenKind::End {
      self.pos += 1;
    }
    token
  }

  fn expect(&mut self, expected: TokenKind) -> Result<&'t Token, ParseError> {
    let token = self.current();
    if token.kind() != expected {
      return Err(ParseError::UnexpectedToken {
        expected,
        found: token.clone(),
        position: token.span().start,
      });
    }
    Ok(self.advance())
  }

  /// Parses one complete expression, which must span every token up
  /// to `End`.
  pub fn parse_complete(&mut self) -> Result<Expr, ParseError> {
    let expr = self.parse_expr(BindingPower::MIN)?;
    self.expect(TokenKind::End).map_err(|err| match err {
      ParseError::UnexpectedToken { found, position, .. } => ParseError::TrailingInput { token: found, position },
      err => err,
    })?;
    Ok(expr)
  }

  /// Parses an expression, consuming infix operators for as long as
  /// they bind more tightly than `floor`.
  pub fn parse_expr(&mut self, floor: BindingPower) -> Result<Expr, ParseError> {
    if self.depth >= self.max_depth {
      return Err(ParseError::TooDeeplyNested {
        limit: self.max_depth,
        position: self.current().span().start,
      });
    }
    self.depth += 1;
    let result = self.parse_expr_at_depth(floor);
    self.depth -= 1;
    result
  }

  fn parse_expr_at_depth(&mut self, floor: BindingPower) -> Result<Expr, ParseError> {
    let token = self.current();
    let prefix = PREFIX_RULES[token.kind().index()].ok_or_else(|| ParseError::NoPrefixHandler {
      token: token.clone(),
      position: token.span().start,
    })?;
    let mut left = (prefix.handler)(self)?;
    let mut height = self.height;

    while binding_power(self.current().kind()) > floor {
      let token = self.current();
      let infix = INFIX_RULES[token.kind().index()].ok_or_else(|| ParseError::NoInfixHandler {
        token: token.clone(),
        position: token.span().start,
      })?;
      left = (infix.handler)(self, left)?;
      height = height.max(self.height) + 1;
      self.check_height(height, token)?;
    }
    self.height = height;
    Ok(left)
  }

  fn check_height(&self, height: usize, token: &Token) -> Result<(), ParseError> {
    if height > self.max_depth {
      return Err(ParseError::TooDeeplyNested {
        limit: self.max_depth,
        position: token.span().start,
      });
    }
    Ok(())
  }
}

fn parse_number(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
  let token = parser.expect(TokenKind::Number)?;
  let value = token.value().parse::<f64>().map_err(|_| ParseError::InvalidNumber {
    literal: token.value().to_owned(),
    position: token.span().start,
  })?;
  parser.height = 1;
  Ok(Expr::Number(value))
}

fn parse_unary(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
  let operator = parser.advance().clone();
  let operand = parser.parse_expr(BindingPower::Unary)?;
  parser.height += 1;
  parser.check_height(parser.height, &operator)?;
  Ok(Expr::unary(operator, operand))
}

fn parse_grouping(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
  parser.expect(TokenKind::OpenParen)?;
  let expr = parser.parse_expr(BindingPower::Default)?;
  parser.expect(TokenKind::CloseParen)?;
  Ok(expr)
}

/// Right-hand sides are parsed at the operator's own binding power,
/// which makes operators of the same tier left-associative.
fn parse_binary(parser: &mut Parser<'_>, left: Expr) -> Result<Expr, ParseError> {
  let operator = parser.advance().clone();
  let right = parser.parse_expr(binding_power(operator.kind()))?;
  Ok(Expr::binary(left, operator, right))
}

/// Tokenizes and parses an equation.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
  parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<Expr, ParseError> {
  let tokens = tokenize(source)?;
  let result = Parser::new(&tokens).with_max_depth(max_depth).parse_complete();
  match &result {
    Ok(expr) => debug!("parsed '{source}' as {expr}"),
    Err(err) => debug!("failed to parse '{source}': {err}"),
  }
  result
}
