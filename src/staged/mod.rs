
//! Staged evaluator working directly on a flat member list.
//!
//! Evaluation proceeds in passes: parentheses are resolved first (by
//! recursion), then the exponential tier, then the multiplicative
//! tier, and finally addition and subtraction. Each pass reduces
//! left to right, splicing each result back into the list as a
//! numeric member.

pub mod members;

pub use members::parse_equation;

use members::{is_paren, CLOSE_PAREN, OPEN_PAREN};
use crate::expr::operator::{BinaryOperator, Rounding, Tier};
use crate::parsing::pratt::DEFAULT_MAX_DEPTH;

use itertools::Itertools;
use thiserror::Error;
use log::{debug, trace};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum StagedError {
  #[error("Equation format error in '{0}'")]
  Format(String),
  #[error("Number not readable: '{0}'")]
  NumberParse(String),
  #[error("Parentheses nested more than {0} levels deep")]
  TooDeeplyNested(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedEvaluator {
  rounding: Rounding,
  max_depth: usize,
}

impl StagedEvaluator {
  pub fn new(rounding: Rounding, max_depth: usize) -> Self {
    Self { rounding, max_depth }
  }

  pub fn evaluate<S: AsRef<str>>(&self, members: &[S]) -> Result<f64, StagedError> {
    let members: Vec<String> = members.iter().map(|m| m.as_ref().to_owned()).collect();
    let result = self.evaluate_at_depth(&members, 0);
    match &result {
      Ok(value) => debug!("staged evaluation of '{}' = {value}", members.concat()),
      Err(err) => debug!("staged evaluation of '{}' failed: {err}", members.concat()),
    }
    result
  }

  fn evaluate_at_depth(&self, members: &[String], depth: usize) -> Result<f64, StagedError> {
    if depth >= self.max_depth {
      return Err(StagedError::TooDeeplyNested(self.max_depth));
    }
    if !check_equation(members) {
      return Err(format_error(members));
    }
    let members = self.resolve_parentheses(members, depth)?;
    let members = self.resolve_tier(&members, Tier::Exponential)?;
    let members = self.resolve_tier(&members, Tier::Multiplicative)?;
    self.fold_additive(&members)
  }

  /// Replaces every top-level parenthesized group with its value,
  /// scanning from the end.
  fn resolve_parentheses(&self, members: &[String], depth: usize) -> Result<Vec<String>, StagedError> {
    let mut reversed = Vec::with_capacity(members.len());
    let mut i = members.len();
    while i > 0 {
      i -= 1;
      if members[i] != CLOSE_PAREN {
        reversed.push(members[i].clone());
        continue;
      }
      let open = matching_open_paren(members, i).ok_or_else(|| format_error(members))?;
      let value = self.evaluate_at_depth(&members[open + 1..i], depth + 1)?;
      trace!("resolved group '{}' = {value}", members[open..=i].concat());
      reversed.push(format_member(value));
      i = open;
    }
    reversed.reverse();
    Ok(reversed)
  }

  /// Applies every operator of `tier`, left to right, to the operand
  /// accumulated so far and the operand after it.
  fn resolve_tier(&self, members: &[String], tier: Tier) -> Result<Vec<String>, StagedError> {
    let mut reduced: Vec<String> = Vec::with_capacity(members.len());
    let mut i = 0;
    while i < members.len() {
      let op = BinaryOperator::from_symbol(&members[i]).filter(|op| op.tier() == tier);
      let Some(op) = op else {
        reduced.push(members[i].clone());
        i += 1;
        continue;
      };
      let left = reduced.pop().ok_or_else(|| format_error(members))?;
      let right = members.get(i + 1).ok_or_else(|| format_error(members))?;
      let value = op.apply(parse_number(&left)?, parse_number(right)?, self.rounding);
      trace!("{left} {op} {right} = {value}");
      reduced.push(format_member(value));
      i += 2;
    }
    Ok(reduced)
  }

  fn fold_additive(&self, members: &[String]) -> Result<f64, StagedError> {
    let (first, rest) = members.split_first().ok_or_else(|| format_error(members))?;
    let mut sum = parse_number(first)?;
    for pair in rest.chunks(2) {
      let [operator, operand] = pair else {
        return Err(format_error(members));
      };
      let op = BinaryOperator::from_symbol(operator)
        .filter(|op| op.tier() == Tier::Additive)
        .ok_or_else(|| format_error(members))?;
      sum = op.apply(sum, parse_number(operand)?, self.rounding);
    }
    Ok(sum)
  }
}

impl Default for StagedEvaluator {
  fn default() -> Self {
    Self::new(Rounding::default(), DEFAULT_MAX_DEPTH)
  }
}

/// Evaluates a member list with default settings.
pub fn evaluate<S: AsRef<str>>(members: &[S]) -> Result<f64, StagedError> {
  StagedEvaluator::default().evaluate(members)
}

/// Checks that operators are surrounded by numbers or parentheses,
/// and that parentheses balance. An empty list is not an equation.
pub fn check_equation<S: AsRef<str>>(members: &[S]) -> bool {
  if members.is_empty() {
    return false;
  }
  let mut depth: usize = 0;
  for (i, member) in members.iter().enumerate() {
    let member = member.as_ref();
    if BinaryOperator::from_symbol(member).is_some() {
      if i == 0 || i == members.len() - 1 {
        return false;
      }
      if !is_operand_neighbor(members[i - 1].as_ref()) || !is_operand_neighbor(members[i + 1].as_ref()) {
        return false;
      }
    } else if member == OPEN_PAREN {
      depth += 1;
    } else if member == CLOSE_PAREN {
      let Some(d) = depth.checked_sub(1) else {
        return false;
      };
      depth = d;
    }
  }
  depth == 0
}

fn is_operand_neighbor(member: &str) -> bool {
  is_paren(member) || member.parse::<f64>().is_ok()
}

fn matching_open_paren(members: &[String], close: usize) -> Option<usize> {
  let mut nested = 0usize;
  for j in (0..close).rev() {
    if members[j] == CLOSE_PAREN {
      nested += 1;
    } else if members[j] == OPEN_PAREN {
      if nested == 0 {
        return Some(j);
      }
      nested -= 1;
    }
  }
  None
}

fn parse_number(member: &str) -> Result<f64, StagedError> {
  member.parse::<f64>().map_err(|_| StagedError::NumberParse(member.to_owned()))
}

/// Shortest representation which parses back to exactly `value`.
fn format_member(value: f64) -> String {
  value.to_string()
}

fn format_error(members: &[String]) -> StagedError {
  StagedError::Format(members.iter().join(""))
}
