
use super::source::Span;

use itertools::Itertools;

use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// The lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
  End,
  Number,
  OpenParen,
  CloseParen,
  Plus,
  Dash,
  Slash,
  Star,
  Percent,
  Root,
  Hat,
  Log,
}

/// A single token. Tokens are immutable once produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  kind: TokenKind,
  value: String,
  span: Span,
}

/// The output of the lexer. A token sequence always ends in exactly
/// one [`TokenKind::End`] token, and contains no other `End` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSequence {
  tokens: Vec<Token>,
}

impl TokenKind {
  /// Number of token kinds, for tables indexed by kind.
  pub const COUNT: usize = 12;

  pub const ALL: [TokenKind; TokenKind::COUNT] = [
    TokenKind::End,
    TokenKind::Number,
    TokenKind::OpenParen,
    TokenKind::CloseParen,
    TokenKind::Plus,
    TokenKind::Dash,
    TokenKind::Slash,
    TokenKind::Star,
    TokenKind::Percent,
    TokenKind::Root,
    TokenKind::Hat,
    TokenKind::Log,
  ];

  pub const fn index(self) -> usize {
    self as usize
  }

  pub fn name(self) -> &'static str {
    match self {
      TokenKind::End => "END",
      TokenKind::Number => "NUMBER",
      TokenKind::OpenParen => "OPEN_PAREN",
      TokenKind::CloseParen => "CLOSE_PAREN",
      TokenKind::Plus => "PLUS",
      TokenKind::Dash => "DASH",
      TokenKind::Slash => "SLASH",
      TokenKind::Star => "STAR",
      TokenKind::Percent => "PERCENT",
      TokenKind::Root => "ROOT",
      TokenKind::Hat => "HAT",
      TokenKind::Log => "LOG",
    }
  }

  /// Numbers and parentheses. Every other kind, including `End`,
  /// must follow one of these in a well-formed equation.
  pub fn is_operand_like(self) -> bool {
    matches!(self, TokenKind::Number | TokenKind::OpenParen | TokenKind::CloseParen)
  }
}

impl Token {
  pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
    Self { kind, value: value.into(), span }
  }

  pub fn kind(&self) -> TokenKind {
    self.kind
  }

  /// The literal text this token was produced from.
  pub fn value(&self) -> &str {
    &self.value
  }

  pub fn span(&self) -> Span {
    self.span
  }
}

impl TokenSequence {
  pub(super) fn new(mut tokens: Vec<Token>, end: Token) -> Self {
    debug_assert_eq!(end.kind(), TokenKind::End);
    tokens.retain(|t| t.kind() != TokenKind::End);
    tokens.push(end);
    Self { tokens }
  }

  pub fn as_slice(&self) -> &[Token] {
    &self.tokens
  }
}

impl Deref for TokenSequence {
  type Target = [Token];

  fn deref(&self) -> &[Token] {
    &self.tokens
  }
}

impl Display for TokenKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl Display for Token {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} \"{}\"", self.kind, self.value)
  }
}

impl Display for TokenSequence {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.tokens.iter().join("\n"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::source::SourceOffset;

  #[test]
  fn test_kind_table_is_in_index_order() {
    for (i, kind) in TokenKind::ALL.iter().enumerate() {
      assert_eq!(kind.index(), i);
    }
  }

  #[test]
  fn test_token_display() {
    let token = Token::new(TokenKind::Number, "45.2", Span::new(SourceOffset(0), SourceOffset(4)));
    assert_eq!(token.to_string(), "NUMBER \"45.2\"");
    let token = Token::new(TokenKind::OpenParen, "(", Span::new(SourceOffset(0), SourceOffset(1)));
    assert_eq!(token.to_string(), "OPEN_PAREN \"(\"");
  }

  #[test]
  fn test_sequence_has_single_trailing_end() {
    let end = Token::new(TokenKind::End, ";", Span::empty_at(SourceOffset(1)));
    let tokens = vec![
      Token::new(TokenKind::Number, "1", Span::new(SourceOffset(0), SourceOffset(1))),
      end.clone(),
    ];
    let seq = TokenSequence::new(tokens, end);
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.iter().filter(|t| t.kind() == TokenKind::End).count(), 1);
    assert_eq!(seq.last().map(Token::kind), Some(TokenKind::End));
  }

  #[test]
  fn test_operand_like() {
    assert!(TokenKind::Number.is_operand_like());
    assert!(TokenKind::CloseParen.is_operand_like());
    assert!(!TokenKind::End.is_operand_like());
    assert!(!TokenKind::Dash.is_operand_like());
  }
}
