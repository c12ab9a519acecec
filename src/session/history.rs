
use super::equation::Equation;

/// Previously calculated equations, navigable backward and forward.
///
/// The history keeps a current position. Before anything has been
/// recalled, or after stepping back past the oldest entry, the
/// position is "before the start" and no entry is current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
  entries: Vec<Equation>,
  index: Option<usize>,
}

impl History {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records `equation` just after the current position, discarding
  /// any entries beyond it, and makes it current.
  pub fn push(&mut self, equation: Equation) {
    let next = self.next_index();
    self.entries.truncate(next);
    self.entries.push(equation);
    self.index = Some(next);
  }

  /// Steps back one entry and returns the entry now current.
  ///
  /// Returns `None` if the history was already before the start, or
  /// if this step moved it there from the oldest entry.
  pub fn back(&mut self) -> Option<&Equation> {
    let index = self.index?;
    if index == 0 {
      self.index = None;
      return None;
    }
    self.index = Some(index - 1);
    self.entries.get(index - 1)
  }

  /// Steps forward one entry and returns it. Returns `None`, without
  /// moving, if the newest entry is already current.
  pub fn forward(&mut self) -> Option<&Equation> {
    let next = self.next_index();
    let equation = self.entries.get(next)?;
    self.index = Some(next);
    Some(equation)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  fn next_index(&self) -> usize {
    self.index.map_or(0, |i| i + 1)
  }
}
