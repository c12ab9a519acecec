
use std::fmt::{self, Display, Formatter};

/// Equation text being edited, with a cursor marker character
/// embedded exactly once at the cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
  text: String,
  marker: char,
}

impl Equation {
  /// An empty equation, holding only the cursor.
  pub fn new(marker: char) -> Self {
    Self { text: marker.to_string(), marker }
  }

  /// The text including the cursor marker.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// The text with the cursor marker removed.
  pub fn without_marker(&self) -> String {
    self.text.chars().filter(|&c| c != self.marker).collect()
  }

  pub fn is_blank(&self) -> bool {
    self.text.chars().all(|c| c == self.marker)
  }

  /// Inserts `s` before the cursor. Marker characters inside `s` are
  /// dropped.
  pub fn insert(&mut self, s: &str) {
    let (before, after) = self.split();
    let inserted: String = s.chars().filter(|&c| c != self.marker).collect();
    self.text = self.join(&format!("{before}{inserted}"), after);
  }

  /// Deletes the character before the cursor, if any.
  pub fn delete(&mut self) {
    let (before, after) = self.split();
    let mut before = before.to_owned();
    before.pop();
    self.text = self.join(&before, after);
  }

  pub fn move_left(&mut self) {
    let (before, after) = self.split();
    let mut before = before.to_owned();
    let Some(c) = before.pop() else {
      return;
    };
    self.text = self.join(&before, &format!("{c}{after}"));
  }

  pub fn move_right(&mut self) {
    let (before, after) = self.split();
    let mut rest = after.chars();
    let Some(c) = rest.next() else {
      return;
    };
    self.text = self.join(&format!("{before}{c}"), rest.as_str());
  }

  pub fn clear(&mut self) {
    self.text = self.marker.to_string();
  }

  fn split(&self) -> (&str, &str) {
    self.text.split_once(self.marker).unwrap_or((&self.text, ""))
  }

  fn join(&self, before: &str, after: &str) -> String {
    format!("{before}{}{after}", self.marker)
  }
}

impl Display for Equation {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_is_blank() {
    let equation = Equation::new('|');
    assert_eq!(equation.text(), "|");
    assert_eq!(equation.without_marker(), "");
    assert!(equation.is_blank());
  }

  #[test]
  fn test_insert_at_cursor() {
    let mut equation = Equation::new('|');
    equation.insert("12");
    equation.insert("+3");
    assert_eq!(equation.text(), "12+3|");
    equation.move_left();
    equation.move_left();
    equation.insert("4");
    assert_eq!(equation.text(), "12+4|3");
    assert_eq!(equation.without_marker(), "12+43");
  }

  #[test]
  fn test_insert_drops_marker() {
    let mut equation = Equation::new('|');
    equation.insert("1|2");
    assert_eq!(equation.text(), "12|");
  }

  #[test]
  fn test_delete() {
    let mut equation = Equation::new('|');
    equation.insert("123");
    equation.move_left();
    equation.delete();
    assert_eq!(equation.text(), "1|3");
    equation.delete();
    equation.delete();
    assert_eq!(equation.text(), "|3");
  }

  #[test]
  fn test_moves_stop_at_ends() {
    let mut equation = Equation::new('|');
    equation.insert("ab");
    equation.move_right();
    assert_eq!(equation.text(), "ab|");
    equation.move_left();
    equation.move_left();
    equation.move_left();
    assert_eq!(equation.text(), "|ab");
    equation.move_right();
    assert_eq!(equation.text(), "a|b");
  }

  #[test]
  fn test_clear() {
    let mut equation = Equation::new('#');
    equation.insert("2+2");
    equation.clear();
    assert_eq!(equation.text(), "#");
    assert_eq!(equation.to_string(), "#");
  }
}
