
//! Regex-driven lexer for calculator equations.

use super::source::{SourceOffset, Span};
use super::token::{Token, TokenKind, TokenSequence};
use super::tokenizer::TokenizerState;

use regex::Regex;
use once_cell::sync::Lazy;
use thiserror::Error;
use log::trace;

/// One lexical rule: a pattern and the kind of token it produces.
#[derive(Debug)]
struct LexRule {
  regex: Regex,
  kind: TokenKind,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TokenizerError {
  #[error("Unrecognized token near '{remainder}' at {position}")]
  UnrecognizedInput { remainder: String, position: SourceOffset },
}

/// Rules in priority order. The first rule matching at the current
/// position wins.
static RULES: Lazy<Vec<LexRule>> = Lazy::new(|| {
  vec![
    LexRule::new(r"[0-9]+(\.[0-9]+)?", TokenKind::Number),
    LexRule::new(r"\(", TokenKind::OpenParen),
    LexRule::new(r"\)", TokenKind::CloseParen),
    LexRule::new(r"\+", TokenKind::Plus),
    LexRule::new(r"-", TokenKind::Dash),
    LexRule::new(r"/", TokenKind::Slash),
    LexRule::new(r"\*", TokenKind::Star),
    LexRule::new(r"%", TokenKind::Percent),
    LexRule::new(r"\^", TokenKind::Hat),
    LexRule::new(r"r", TokenKind::Root),
    LexRule::new(r"l", TokenKind::Log),
  ]
});

impl LexRule {
  fn new(pattern: &str, kind: TokenKind) -> Self {
    let regex = Regex::new(&format!("^(?:{pattern})")).unwrap();
    Self { regex, kind }
  }
}

/// Value of the synthetic token terminating every sequence.
pub const END_TOKEN_VALUE: &str = ";";

/// Removes all whitespace from an equation. Token spans refer to
/// offsets in the resulting string.
pub fn strip_whitespace(source: &str) -> String {
  source.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Converts an equation into tokens. Whitespace is removed before
/// scanning, so `"4 5"` is the single number `45`.
pub fn tokenize(source: &str) -> Result<TokenSequence, TokenizerError> {
  let stripped = strip_whitespace(source);
  let mut state = TokenizerState::new(&stripped);
  let mut tokens = Vec::new();
  while !state.is_eof() {
    let token = read_one_token(&mut state)?;
    trace!("lexed {token} at {}", token.span());
    tokens.push(token);
  }
  let end = Token::new(TokenKind::End, END_TOKEN_VALUE, Span::empty_at(state.current_pos()));
  Ok(TokenSequence::new(tokens, end))
}

fn read_one_token(state: &mut TokenizerState<'_>) -> Result<Token, TokenizerError> {
  for rule in RULES.iter() {
    if let Some(m) = state.read_regex(&rule.regex) {
      return Ok(Token::new(rule.kind, m.as_str(), m.span()));
    }
  }
  Err(TokenizerError::UnrecognizedInput {
    remainder: state.remainder().to_owned(),
    position: state.current_pos(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().iter().map(Token::kind).collect()
  }

  fn span(start: usize, end: usize) -> Span {
    Span::new(SourceOffset(start), SourceOffset(end))
  }

  #[test]
  fn test_tokenize_simple_sum() {
    let tokens = tokenize("45.2+81").unwrap();
    assert_eq!(tokens.as_slice(), &[
      Token::new(TokenKind::Number, "45.2", span(0, 4)),
      Token::new(TokenKind::Plus, "+", span(4, 5)),
      Token::new(TokenKind::Number, "81", span(5, 7)),
      Token::new(TokenKind::End, ";", span(7, 7)),
    ]);
  }

  #[test]
  fn test_token_counts() {
    let cases = [
      ("-2", 3),
      ("-2+2", 5),
      ("2-2", 4),
      ("2+2", 4),
      ("5*2", 4),
      ("3*2+3", 6),
      ("(2/6)*5", 8),
      ("4r7-2^5", 8),
      ("45.2+81", 4),
      ("42^(3+2)", 8),
    ];
    for (source, count) in cases {
      assert_eq!(tokenize(source).unwrap().len(), count, "in equation {source}");
    }
  }

  #[test]
  fn test_every_operator_kind() {
    assert_eq!(kinds("(1)+2-3/4*5%6^7r8l9"), vec![
      TokenKind::OpenParen, TokenKind::Number, TokenKind::CloseParen,
      TokenKind::Plus, TokenKind::Number,
      TokenKind::Dash, TokenKind::Number,
      TokenKind::Slash, TokenKind::Number,
      TokenKind::Star, TokenKind::Number,
      TokenKind::Percent, TokenKind::Number,
      TokenKind::Hat, TokenKind::Number,
      TokenKind::Root, TokenKind::Number,
      TokenKind::Log, TokenKind::Number,
      TokenKind::End,
    ]);
  }

  #[test]
  fn test_whitespace_is_removed_first() {
    assert_eq!(kinds(" 9 r2 "), vec![TokenKind::Number, TokenKind::Root, TokenKind::Number, TokenKind::End]);
    let tokens = tokenize("4 5\t+\n1").unwrap();
    assert_eq!(tokens[0].value(), "45");
  }

  #[test]
  fn test_empty_input_is_only_end() {
    assert_eq!(kinds(""), vec![TokenKind::End]);
    assert_eq!(kinds("   "), vec![TokenKind::End]);
  }

  #[test]
  fn test_unrecognized_input() {
    let err = tokenize("2 + x1").unwrap_err();
    assert_eq!(err, TokenizerError::UnrecognizedInput {
      remainder: "x1".to_owned(),
      position: SourceOffset(2),
    });
  }

  #[test]
  fn test_trailing_dot_is_unrecognized() {
    let err = tokenize("45.").unwrap_err();
    assert!(matches!(err, TokenizerError::UnrecognizedInput { position: SourceOffset(2), .. }));
  }

  #[test]
  fn test_malformed_equations_still_tokenize() {
    for source in ["45.2++81", "45.2+-81", "+45.2+81", "45.2+81+", "(45.2+81))", ")45.2+81("] {
      assert!(tokenize(source).is_ok(), "in equation {source}");
    }
  }
}
