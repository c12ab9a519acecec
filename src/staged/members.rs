
//! Splitting of equation text into a flat member list.

use std::mem;

/// Characters which always form a member of their own.
pub const SPLIT_CHARS: &str = "+-*/%^rl()";

pub const OPEN_PAREN: &str = "(";
pub const CLOSE_PAREN: &str = ")";

/// Splits `text` into members, skipping every character in `ignore`.
/// Each operator or parenthesis becomes its own member, and runs of
/// any other characters are collected into one (possibly
/// non-numeric) member.
///
/// ```text
/// parse_equation("12+3|4", "|") == ["12", "+", "34"]
/// ```
pub fn parse_equation(text: &str, ignore: &str) -> Vec<String> {
  let mut members = Vec::with_capacity(text.len());
  let mut member = String::new();
  for c in text.chars() {
    if ignore.contains(c) {
      continue;
    }
    if SPLIT_CHARS.contains(c) {
      if !member.is_empty() {
        members.push(mem::take(&mut member));
      }
      members.push(c.to_string());
    } else {
      member.push(c);
    }
  }
  if !member.is_empty() {
    members.push(member);
  }
  members
}

pub fn is_paren(member: &str) -> bool {
  member == OPEN_PAREN || member == CLOSE_PAREN
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_equation() {
    assert_eq!(parse_equation("45.2+81", ""), vec!["45.2", "+", "81"]);
    assert_eq!(parse_equation("(2/6)*5", ""), vec!["(", "2", "/", "6", ")", "*", "5"]);
    assert_eq!(parse_equation("4r7-2^5%3l2", ""), vec!["4", "r", "7", "-", "2", "^", "5", "%", "3", "l", "2"]);
  }

  #[test]
  fn test_parse_equation_skips_ignored() {
    assert_eq!(parse_equation("1|2+3", "|"), vec!["12", "+", "3"]);
    assert_eq!(parse_equation("|", "|"), Vec::<String>::new());
    assert_eq!(parse_equation("1 + 2", " "), vec!["1", "+", "2"]);
  }

  #[test]
  fn test_parse_equation_keeps_garbage_together() {
    assert_eq!(parse_equation("2x+y3", ""), vec!["2x", "+", "y3"]);
    assert_eq!(parse_equation("1 + 2", ""), vec!["1 ", "+", " 2"]);
  }
}
