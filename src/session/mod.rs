
//! Interactive calculator state: the equation being edited, its
//! history, and what is currently shown.

pub mod equation;
pub mod history;

pub use equation::Equation;
pub use history::History;

use crate::engine::{self, ERROR_INDICATOR};
use crate::error::Error;
use crate::settings::EngineSettings;

use log::info;

#[derive(Debug, Clone)]
pub struct Calculator {
  settings: EngineSettings,
  equation: Equation,
  history: History,
  display: String,
}

impl Calculator {
  pub fn new(settings: EngineSettings) -> Self {
    let equation = Equation::new(settings.cursor_marker);
    let display = equation.text().to_owned();
    Self { settings, equation, history: History::new(), display }
  }

  pub fn settings(&self) -> &EngineSettings {
    &self.settings
  }

  pub fn equation(&self) -> &Equation {
    &self.equation
  }

  pub fn history(&self) -> &History {
    &self.history
  }

  /// The text to show: the equation while editing, or the last
  /// result (or [`ERROR_INDICATOR`]) right after a calculation.
  pub fn display(&self) -> &str {
    &self.display
  }

  pub fn insert(&mut self, s: &str) {
    self.equation.insert(s);
    self.show_equation();
  }

  pub fn delete(&mut self) {
    self.equation.delete();
    self.show_equation();
  }

  pub fn move_left(&mut self) {
    self.equation.move_left();
    self.show_equation();
  }

  pub fn move_right(&mut self) {
    self.equation.move_right();
    self.show_equation();
  }

  pub fn clear(&mut self) {
    self.equation.clear();
    self.show_equation();
  }

  /// Recalls the previous history entry, or clears the equation once
  /// the history runs out.
  pub fn back(&mut self) {
    match self.history.back() {
      Some(equation) => self.equation = equation.clone(),
      None => self.equation.clear(),
    }
    self.show_equation();
  }

  /// Recalls the next history entry. Does nothing at the newest one.
  pub fn forward(&mut self) {
    if let Some(equation) = self.history.forward() {
      self.equation = equation.clone();
      self.show_equation();
    }
  }

  /// Evaluates the current equation, records it in the history, and
  /// starts a fresh one. The display shows the result, or the error
  /// indicator on failure.
  pub fn calculate(&mut self) -> Result<f64, Error> {
    let text = self.equation.without_marker();
    let result = engine::evaluate_text(&text, &self.settings);
    self.history.push(self.equation.clone());
    self.equation.clear();
    self.display = match &result {
      Ok(value) => engine::format_result(*value),
      Err(_) => ERROR_INDICATOR.to_owned(),
    };
    info!("calculated '{text}' -> {}", self.display);
    result
  }

  fn show_equation(&mut self) {
    self.display = self.equation.text().to_owned();
  }
}

impl Default for Calculator {
  fn default() -> Self {
    Self::new(EngineSettings::default())
  }
}
