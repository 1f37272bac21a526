use std::{error, fmt};

use crate::utils::{format_arg_range, Dual};

use super::span::LoSpan;
use super::value::LoType;

/// a parse-time problem, collected rather than raised
#[derive(Debug, Clone, PartialEq)]
pub struct LoDiagnostic {
	pub message: String,
	pub span: LoSpan,
}

impl LoDiagnostic {
	pub fn line(&self) -> usize {
		self.span.line()
	}
	pub fn column(&self) -> usize {
		self.span.col()
	}
}

impl fmt::Display for LoDiagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.span, self.message)
	}
}

impl error::Error for LoDiagnostic {}

#[derive(Debug, Clone, PartialEq)]
pub enum LoErrorType {
	EmptyList,
	NotDefined(String),
	NotAFunction,
	// form or function name, got, expected
	Arity(String, usize, usize),
	MalformedForm(&'static str),
	// callee name, accepted range, got
	ArgMismatch(String, Dual, usize),
	TypeMismatch(&'static str, LoType),
	DivisionByZero,
	Overflow(&'static str),
	RecursionLimit(usize),
	ScopeGone(String),
	Output(String),
}

/// an evaluation failure; becomes an `Error` value at the top level
#[derive(Debug, Clone, PartialEq)]
pub struct LoError(pub LoErrorType, pub Option<LoSpan>);

impl LoError {
	pub fn new(kind: LoErrorType) -> Self {
		LoError(kind, None)
	}
	pub fn at(kind: LoErrorType, span: &LoSpan) -> Self {
		LoError(kind, Some(span.clone()))
	}
	/// keeps an existing span, otherwise points at `span`
	pub fn or_at(self, span: &LoSpan) -> Self {
		match self.1 {
			Some(_) => self,
			None => LoError(self.0, Some(span.clone())),
		}
	}
	pub fn kind(&self) -> &LoErrorType {
		&self.0
	}
}

impl fmt::Display for LoError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&match &self.0 {
			LoErrorType::EmptyList => "empty list".to_string(),
			LoErrorType::NotDefined(name) => format!("identifier not found: {}", name),
			LoErrorType::NotAFunction => "first element is not a function".to_string(),
			LoErrorType::Arity(name, got, expected) => format!("wrong number of arguments to {}, got {}, expected {}", name, got, expected),
			LoErrorType::MalformedForm(text) => text.to_string(),
			LoErrorType::ArgMismatch(name, range, got) => format!("wrong number of arguments to {}: expected {}, got {}", name, format_arg_range(*range), got),
			LoErrorType::TypeMismatch(op, got) => format!("type mismatch in {}: expected {} or {}, got {}", op, LoType::Integer, LoType::Float, got),
			LoErrorType::DivisionByZero => "division by zero".to_string(),
			LoErrorType::Overflow(op) => format!("integer overflow in {}", op),
			LoErrorType::RecursionLimit(max) => format!("maximum recursion depth of {} exceeded", max),
			LoErrorType::ScopeGone(name) => format!("{} outlived the scope it was defined in", name),
			LoErrorType::Output(text) => format!("output failed: {}", text),
		})
	}
}

impl error::Error for LoError {}

pub type LoResult<T> = Result<T, LoError>;
