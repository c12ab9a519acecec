
//! Arithmetic equation engine.
//!
//! Equations are evaluated either by tokenizing them and building a
//! tree with a Pratt parser ([`parsing`], [`expr`]), or by the older
//! staged evaluator which reduces a flat member list ([`staged`]).
//! [`engine`] ties both together, and [`session`] drives them from
//! an interactive editing model.

pub mod engine;
pub mod error;
pub mod expr;
pub mod logging;
pub mod parsing;
pub mod session;
pub mod settings;
pub mod staged;
pub mod util;

pub use engine::{evaluate, evaluate_text, format_result, parse, validate, ERROR_INDICATOR};
pub use error::Error;
pub use settings::{Engine, EngineSettings};
