//! the lo language: lexer -> parser -> tree-walking evaluator

pub mod ast;
pub mod builtin;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parse;
pub mod scope;
pub mod span;
pub mod token;
pub mod value;
