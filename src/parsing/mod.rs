
//! Lexing, validation, and Pratt parsing of equations.

pub mod binding_power;
pub mod lexer;
pub mod pratt;
pub mod source;
pub mod token;
pub mod tokenizer;
pub mod validator;
