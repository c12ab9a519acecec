
use super::source::{SourceOffset, Span};

use regex::Regex;

/// A cursor over the input of the lexer. The cursor only ever moves
/// forward.
#[derive(Debug, Clone)]
pub struct TokenizerState<'a> {
  input: &'a str,
  position: SourceOffset,
}

/// A substring consumed from a [`TokenizerState`], together with its
/// location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerMatch<'a> {
  matched_str: &'a str,
  span: Span,
}

impl<'a> TokenizerState<'a> {
  pub fn new(input: &'a str) -> Self {
    Self { input, position: SourceOffset(0) }
  }

  pub fn is_eof(&self) -> bool {
    self.input.is_empty()
  }

  pub fn current_pos(&self) -> SourceOffset {
    self.position
  }

  /// The unconsumed portion of the input.
  pub fn remainder(&self) -> &'a str {
    self.input
  }

  /// Advances the position of `self` by `amount` bytes, never beyond
  /// the end of the input, and returns the skipped portion.
  pub fn advance(&mut self, amount: usize) -> TokenizerMatch<'a> {
    let amount = amount.min(self.input.len());
    let start = self.position;
    let (prefix, suffix) = self.input.split_at(amount);
    self.position = start + amount;
    self.input = suffix;
    TokenizerMatch {
      matched_str: prefix,
      span: Span::new(start, self.position),
    }
  }

  /// If the regex matches at the current position, consumes the
  /// match. Matches which begin later in the input are ignored, so
  /// the regex need not be anchored.
  pub fn read_regex(&mut self, regex: &Regex) -> Option<TokenizerMatch<'a>> {
    let m = regex.find(self.input)?;
    if m.start() != 0 || m.is_empty() {
      return None;
    }
    Some(self.advance(m.end()))
  }
}

impl<'a> TokenizerMatch<'a> {
  pub fn as_str(&self) -> &'a str {
    self.matched_str
  }

  pub fn span(&self) -> Span {
    self.span
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_advance() {
    let mut state = TokenizerState::new("abcdefg");
    let m = state.advance(3);
    assert_eq!(m.as_str(), "abc");
    assert_eq!(m.span(), Span::new(SourceOffset(0), SourceOffset(3)));
    assert_eq!(state.remainder(), "defg");

    let m = state.advance(99);
    assert_eq!(m.as_str(), "defg");
    assert_eq!(m.span(), Span::new(SourceOffset(3), SourceOffset(7)));
    assert!(state.is_eof());

    let m = state.advance(1);
    assert_eq!(m.as_str(), "");
    assert_eq!(state.current_pos(), SourceOffset(7));
  }

  #[test]
  fn test_read_regex_at_start() {
    let re = Regex::new(r"[0-9]+").unwrap();
    let mut state = TokenizerState::new("12+3");
    let m = state.read_regex(&re).unwrap();
    assert_eq!(m.as_str(), "12");
    assert_eq!(state.current_pos(), SourceOffset(2));
  }

  #[test]
  fn test_read_regex_later_match_ignored() {
    let re = Regex::new(r"[0-9]+").unwrap();
    let mut state = TokenizerState::new("+3");
    assert!(state.read_regex(&re).is_none());
    assert_eq!(state.current_pos(), SourceOffset(0));
  }
}
