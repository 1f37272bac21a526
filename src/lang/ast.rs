use std::fmt;

use crate::strmap::MappedStr;

use super::span::LoSpan;
use super::token::LoToken;

/// what a node is, without where it came from
#[derive(Debug, Clone, PartialEq)]
pub enum LoExprValue {
	Ident(MappedStr),
	Int(i64),
	Float(f64),
	String(MappedStr),
	/// `[...]`, evaluates to a list value
	ListLiteral(Vec<LoExpr>),
	/// `(...)`, a special form or an application
	List(Vec<LoExpr>),
}

/// an expression and the token it starts at
#[derive(Debug, Clone, PartialEq)]
pub struct LoExpr(pub LoExprValue, pub LoToken);

impl LoExpr {
	pub fn token_literal(&self) -> &str {
		self.1.literal.get_ref()
	}
	pub fn span(&self) -> &LoSpan {
		&self.1.span
	}
	pub fn as_ident(&self) -> Option<&MappedStr> {
		match &self.0 {
			LoExprValue::Ident(name) => Some(name),
			_ => None,
		}
	}
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[LoExpr], close: &str) -> fmt::Result {
	f.write_str(open)?;
	for (i, item) in items.iter().enumerate() {
		if i > 0 { f.write_str(" ")?; }
		write!(f, "{}", item)?;
	}
	f.write_str(close)
}

impl fmt::Display for LoExpr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.0 {
			LoExprValue::Ident(v) => write!(f, "{}", v),
			LoExprValue::Int(v) => write!(f, "{}", v),
			LoExprValue::Float(v) => write!(f, "{:?}", v),
			LoExprValue::String(v) => write!(f, "{:?}", v.get_ref()),
			LoExprValue::ListLiteral(v) => write_seq(f, "[", v, "]"),
			LoExprValue::List(v) => write_seq(f, "(", v, ")"),
		}
	}
}

/// parse root, top-level expressions in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoProgram {
	pub expressions: Vec<LoExpr>,
}

impl LoProgram {
	pub fn token_literal(&self) -> &str {
		self.expressions.first().map_or("", |v| v.token_literal())
	}
}

impl fmt::Display for LoProgram {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, expr) in self.expressions.iter().enumerate() {
			if i > 0 { f.write_str("\n")?; }
			write!(f, "{}", expr)?;
		}
		Ok(())
	}
}
