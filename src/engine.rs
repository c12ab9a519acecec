
//! Entry points tying the lexer, parser, and both evaluators
//! together.

use crate::error::Error;
use crate::expr::Expr;
use crate::parsing::lexer::{strip_whitespace, tokenize};
use crate::parsing::{pratt, validator};
use crate::settings::{Engine, EngineSettings};
use crate::staged::{self, parse_equation};

use log::{debug, warn};

/// Shown in place of a result when evaluation fails.
pub const ERROR_INDICATOR: &str = "F!!!";

/// Parses equation text into an expression tree.
pub fn parse(text: &str) -> Result<Expr, Error> {
  Ok(pratt::parse(text)?)
}

/// Evaluates an already-split member list with the staged evaluator
/// and default settings.
pub fn evaluate<S: AsRef<str>>(members: &[S]) -> Result<f64, Error> {
  Ok(staged::evaluate(members)?)
}

/// Tokenizes `text` and runs the pre-flight validator over it.
pub fn validate(text: &str) -> Result<(), Error> {
  let tokens = tokenize(text)?;
  validator::check(&tokens)?;
  Ok(())
}

/// Evaluates equation text with whichever engine `settings` selects.
pub fn evaluate_text(text: &str, settings: &EngineSettings) -> Result<f64, Error> {
  match settings.engine {
    Engine::Pratt => evaluate_tree(text, settings),
    Engine::Staged => evaluate_staged(text, settings),
    Engine::CrossChecked => evaluate_cross_checked(text, settings),
  }
}

pub fn evaluate_tree(text: &str, settings: &EngineSettings) -> Result<f64, Error> {
  if let Err(err) = validate(text) {
    debug!("validator rejects '{text}' ({err}), parsing anyway");
  }
  let expr = pratt::parse_with_max_depth(text, settings.max_depth)?;
  Ok(expr.eval_with(settings.rounding())?)
}

pub fn evaluate_staged(text: &str, settings: &EngineSettings) -> Result<f64, Error> {
  let members = parse_equation(&strip_whitespace(text), "");
  Ok(settings.staged_evaluator().evaluate(&members)?)
}

/// The tree result is canonical. The staged result only overrides it
/// by disagreeing; equations the staged evaluator cannot read (such
/// as unary minus) fall back to the tree result.
fn evaluate_cross_checked(text: &str, settings: &EngineSettings) -> Result<f64, Error> {
  let pratt = evaluate_tree(text, settings)?;
  match evaluate_staged(text, settings) {
    Ok(staged) if agree(pratt, staged, settings.cross_check_tolerance) => Ok(pratt),
    Ok(staged) => {
      warn!("evaluators disagree on '{text}': tree gave {pratt}, staged gave {staged}");
      Err(Error::EnginesDisagree { pratt, staged })
    }
    Err(err) => {
      debug!("staged evaluator cannot check '{text}': {err}");
      Ok(pratt)
    }
  }
}

fn agree(a: f64, b: f64, tolerance: f64) -> bool {
  a == b || (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
}

/// Formats a result for display: the shortest exact decimal form,
/// switching to exponent form for very large or very small
/// magnitudes. The exponent is signed and at least two digits, as in
/// `1e+21` and `1.5e-07`.
pub fn format_result(value: f64) -> String {
  if value == 0.0 {
    return "0".to_owned();
  }
  if value.is_finite() {
    let magnitude = value.abs();
    if !(1e-4..1e21).contains(&magnitude) {
      return exponent_form(value);
    }
  }
  value.to_string()
}

fn exponent_form(value: f64) -> String {
  let formatted = format!("{value:e}");
  let Some((mantissa, exponent)) = formatted.split_once('e') else {
    return formatted;
  };
  match exponent.parse::<i32>() {
    Ok(exponent) => {
      let sign = if exponent < 0 { '-' } else { '+' };
      format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
    Err(_) => formatted,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::pratt::ParseError;
  use crate::parsing::validator::ValidationError;
  use crate::staged::StagedError;

  fn settings(engine: Engine) -> EngineSettings {
    EngineSettings { engine, ..EngineSettings::default() }
  }

  #[test]
  fn test_engines_agree() {
    let equations = [
      "1+1",
      "2+3*4",
      "(2 + 3) * 4",
      "2*(3+4)-5/(2+3)",
      "2^3^2",
      "9r2",
      "100l10",
      "7%3",
      "8-3-2",
      "64/4/2",
      "((1+2)*(3+(4-1)))",
      "1/3",
      "5/0",
    ];
    for text in equations {
      let tree = evaluate_text(text, &settings(Engine::Pratt)).unwrap();
      let staged = evaluate_text(text, &settings(Engine::Staged)).unwrap();
      assert_eq!(tree, staged, "in equation {text}");
      assert_eq!(evaluate_text(text, &settings(Engine::CrossChecked)), Ok(tree), "in equation {text}");
    }
  }

  #[test]
  fn test_parenthesized_product() {
    for engine in [Engine::Pratt, Engine::Staged, Engine::CrossChecked] {
      assert_eq!(evaluate_text("(2 + 3) * 4", &settings(engine)), Ok(20.0));
    }
  }

  #[test]
  fn test_unary_minus_only_on_tree() {
    assert_eq!(evaluate_text("-2+5", &settings(Engine::Pratt)), Ok(3.0));
    assert!(matches!(
      evaluate_text("-2+5", &settings(Engine::Staged)),
      Err(Error::Staged(StagedError::Format(_))),
    ));
    assert_eq!(evaluate_text("-2+5", &settings(Engine::CrossChecked)), Ok(3.0));
  }

  #[test]
  fn test_cross_check_propagates_tree_errors() {
    assert!(matches!(
      evaluate_text("2+", &settings(Engine::CrossChecked)),
      Err(Error::Parse(_)),
    ));
  }

  #[test]
  fn test_agree() {
    assert!(agree(1.0, 1.0, 0.0));
    assert!(agree(1.0, 1.0 + 1e-12, 1e-9));
    assert!(!agree(1.0, 2.0, 1e-9));
    assert!(agree(f64::NAN, f64::NAN, 1e-9));
    assert!(agree(f64::INFINITY, f64::INFINITY, 1e-9));
    assert!(!agree(f64::INFINITY, f64::NEG_INFINITY, 1e-9));
  }

  #[test]
  fn test_evaluate_members() {
    assert_eq!(evaluate(&["(", "2", "+", "3", ")", "*", "4"]), Ok(20.0));
    assert!(evaluate::<&str>(&[]).is_err());
  }

  #[test]
  fn test_parse() {
    assert_eq!(parse("1+2*3").unwrap().to_string(), "(1 + (2 * 3))");
    assert!(matches!(parse("1 + x"), Err(Error::Parse(_))));
  }

  #[test]
  fn test_validate() {
    assert_eq!(validate("(1+2)*3"), Ok(()));
    assert_eq!(validate(""), Err(Error::Validation(ValidationError::Empty)));
    assert!(matches!(validate("1+*2"), Err(Error::Validation(ValidationError::ConsecutiveOperators { .. }))));
    assert!(matches!(validate("1 $ 2"), Err(Error::Parse(_))));
  }

  #[test]
  fn test_precision_setting() {
    let coarse = EngineSettings { precision: 2, ..settings(Engine::Pratt) };
    assert_eq!(evaluate_text("1/3", &coarse), Ok(0.33));
    let coarse = EngineSettings { precision: 2, ..settings(Engine::Staged) };
    assert_eq!(evaluate_text("1/3", &coarse), Ok(0.33));
  }

  #[test]
  fn test_depth_setting() {
    let text = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    let shallow = EngineSettings { max_depth: 8, ..settings(Engine::Pratt) };
    assert!(evaluate_text(&text, &shallow).is_err());
    let shallow = EngineSettings { max_depth: 8, ..settings(Engine::Staged) };
    assert!(evaluate_text(&text, &shallow).is_err());
    assert_eq!(evaluate_text(&text, &settings(Engine::CrossChecked)), Ok(1.0));
  }

  #[test]
  fn test_long_flat_chain() {
    let chain = vec!["1"; 100_000].join("+");
    for engine in [Engine::Pratt, Engine::CrossChecked] {
      assert!(
        matches!(
          evaluate_text(&chain, &settings(engine)),
          Err(Error::Parse(ParseError::TooDeeplyNested { limit: 256, .. })),
        ),
        "with engine {engine:?}",
      );
    }
    assert_eq!(evaluate_text(&chain, &settings(Engine::Staged)), Ok(100_000.0));
  }

  #[test]
  fn test_format_result() {
    assert_eq!(format_result(20.0), "20");
    assert_eq!(format_result(11.5), "11.5");
    assert_eq!(format_result(-2.5), "-2.5");
    assert_eq!(format_result(0.0), "0");
    assert_eq!(format_result(-0.0), "0");
    assert_eq!(format_result(0.3333333333), "0.3333333333");
    assert_eq!(format_result(1e21), "1e+21");
    assert_eq!(format_result(-2.5e22), "-2.5e+22");
    assert_eq!(format_result(1e100), "1e+100");
    assert_eq!(format_result(0.00001), "1e-05");
    assert_eq!(format_result(1.5e-7), "1.5e-07");
    assert_eq!(format_result(1e-300), "1e-300");
    assert_eq!(format_result(0.0001), "0.0001");
    assert_eq!(format_result(1e20), "100000000000000000000");
    assert_eq!(format_result(f64::INFINITY), "inf");
    assert_eq!(format_result(f64::NEG_INFINITY), "-inf");
    assert_eq!(format_result(f64::NAN), "NaN");
  }
}
