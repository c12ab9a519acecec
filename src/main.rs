
use calculator::engine::{evaluate_text, format_result, parse, ERROR_INDICATOR};
use calculator::parsing::lexer::tokenize;
use calculator::settings::{Engine, EngineSettings};
use calculator::logging;

use anyhow::Context;
use clap::Parser;

use std::io::{self, BufRead};
use std::path::PathBuf;

/// Evaluates infix arithmetic equations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Equations to evaluate. One equation per line is read from stdin
  /// when none are given.
  equations: Vec<String>,

  /// Evaluator to use, overriding the settings file.
  #[arg(short, long, value_enum)]
  engine: Option<Engine>,

  /// JSON settings file.
  #[arg(short, long)]
  settings: Option<PathBuf>,

  /// Print the parsed expression tree.
  #[arg(long)]
  tree: bool,

  /// Print the token sequence.
  #[arg(long)]
  tokens: bool,

  /// Increase log verbosity. May be repeated.
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();
  logging::init(args.verbose)?;

  let mut settings = match &args.settings {
    Some(path) => EngineSettings::from_json_file(path)?,
    None => EngineSettings::default(),
  };
  if let Some(engine) = args.engine {
    settings.engine = engine;
  }

  if args.equations.is_empty() {
    for line in io::stdin().lock().lines() {
      let line = line.context("failed to read equation from stdin")?;
      if !line.trim().is_empty() {
        run(&line, &args, &settings);
      }
    }
  } else {
    for equation in &args.equations {
      run(equation, &args, &settings);
    }
  }
  Ok(())
}

fn run(text: &str, args: &Args, settings: &EngineSettings) {
  if args.tokens {
    match tokenize(text) {
      Ok(tokens) => println!("{tokens}"),
      Err(err) => eprintln!("{err}"),
    }
  }
  if args.tree {
    match parse(text) {
      Ok(expr) => println!("{expr}"),
      Err(err) => eprintln!("{err}"),
    }
  }
  match evaluate_text(text, settings) {
    Ok(value) => println!("{}", format_result(value)),
    Err(err) => {
      println!("{ERROR_INDICATOR}");
      eprintln!("{err}");
    }
  }
}
