use std::mem;

use crate::strmap::StrMap;

use super::ast::{LoExpr, LoExprValue, LoProgram};
use super::error::LoDiagnostic;
use super::lexer::LoLexer;
use super::scope::DEFAULT_MAX_DEPTH;
use super::token::{LoToken, LoTokenKind};

/// a best-effort parse: whatever could be built, plus what went wrong
#[derive(Debug, Clone, Default)]
pub struct LoParse {
	pub program: LoProgram,
	pub diagnostics: Vec<LoDiagnostic>,
}

impl LoParse {
	pub fn is_ok(&self) -> bool {
		self.diagnostics.is_empty()
	}
}

/// recursive descent with one token of lookahead
pub struct LoParser<'a> {
	lexer: LoLexer<'a>,
	cur: LoToken,
	peek: LoToken,
	diagnostics: Vec<LoDiagnostic>,
	depth: usize,
	max_depth: usize,
}

impl<'a> LoParser<'a> {
	pub fn new(mut lexer: LoLexer<'a>) -> Self {
		let cur = lexer.next_token();
		let peek = lexer.next_token();
		Self { lexer, cur, peek, diagnostics: vec![], depth: 0, max_depth: DEFAULT_MAX_DEPTH }
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	fn next_token(&mut self) {
		let next = self.lexer.next_token();
		self.cur = mem::replace(&mut self.peek, next);
	}

	fn error(&mut self, message: String, tok: &LoToken) {
		log::debug!("parse error at {}: {}", tok.span, message);
		self.diagnostics.push(LoDiagnostic { message, span: tok.span.clone() });
	}

	pub fn parse(mut self) -> LoParse {
		let mut program = LoProgram::default();
		while !self.cur.is(&LoTokenKind::Eof) {
			if let Some(expr) = self.parse_expression() {
				program.expressions.push(expr);
			}
			self.next_token();
		}
		LoParse { program, diagnostics: self.diagnostics }
	}

	fn parse_expression(&mut self) -> Option<LoExpr> {
		let tok = self.cur.clone();
		match tok.kind.clone() {
			LoTokenKind::Ident => Some(LoExpr(LoExprValue::Ident(tok.literal.clone()), tok)),
			LoTokenKind::Number => self.parse_number(tok),
			LoTokenKind::String => Some(LoExpr(LoExprValue::String(tok.literal.clone()), tok)),
			LoTokenKind::OpenParen | LoTokenKind::OpenBracket if self.depth >= self.max_depth => {
				self.error(format!("nesting too deep, limit is {}", self.max_depth), &tok);
				self.skip_nested();
				None
			},
			LoTokenKind::OpenParen => Some(self.parse_list(tok)),
			LoTokenKind::OpenBracket => Some(self.parse_list_literal(tok)),
			LoTokenKind::CloseParen | LoTokenKind::CloseBracket => {
				self.error(format!("unexpected {}", tok.literal), &tok);
				None
			},
			LoTokenKind::Illegal(reason) => {
				self.error(reason.to_string(), &tok);
				None
			},
			LoTokenKind::Eof => None,
		}
	}

	/// moves to the closer matching the current opener, or to the last token
	fn skip_nested(&mut self) {
		let mut open = 1usize;
		while open > 0 && !self.peek.is(&LoTokenKind::Eof) {
			self.next_token();
			match self.cur.kind {
				LoTokenKind::OpenParen | LoTokenKind::OpenBracket => open += 1,
				LoTokenKind::CloseParen | LoTokenKind::CloseBracket => open -= 1,
				_ => {},
			}
		}
	}

	fn parse_number(&mut self, tok: LoToken) -> Option<LoExpr> {
		let literal = tok.literal.get_ref();
		// `_` is only a digit separator
		let text: String = literal.chars().filter(|c| *c != '_').collect();
		let value = if literal.contains('.') {
			match text.parse::<f64>() {
				Ok(v) => LoExprValue::Float(v),
				Err(_) => {
					self.error(format!("could not parse float `{}`", literal), &tok);
					return None;
				},
			}
		} else {
			match text.parse::<i64>() {
				Ok(v) => LoExprValue::Int(v),
				Err(_) => {
					self.error(format!("could not parse int `{}`", literal), &tok);
					return None;
				},
			}
		};
		Some(LoExpr(value, tok))
	}

	fn parse_list(&mut self, open: LoToken) -> LoExpr {
		let mut items = vec![];
		self.depth += 1;
		while !self.peek.is(&LoTokenKind::CloseParen) && !self.peek.is(&LoTokenKind::Eof) {
			self.next_token();
			if let Some(expr) = self.parse_expression() {
				items.push(expr);
			}
		}
		self.next_token();
		if self.cur.is(&LoTokenKind::Eof) {
			self.error("unterminated list, expected )".to_string(), &open);
		}
		self.depth -= 1;
		LoExpr(LoExprValue::List(items), open)
	}

	fn parse_list_literal(&mut self, open: LoToken) -> LoExpr {
		let mut items = vec![];
		self.depth += 1;
		// skip '['
		self.next_token();
		while !self.cur.is(&LoTokenKind::CloseBracket) && !self.cur.is(&LoTokenKind::Eof) {
			if let Some(expr) = self.parse_expression() {
				items.push(expr);
			}
			self.next_token();
		}
		if self.cur.is(&LoTokenKind::Eof) {
			self.error("unterminated list literal, expected ]".to_string(), &open);
		}
		self.depth -= 1;
		LoExpr(LoExprValue::ListLiteral(items), open)
	}
}

pub fn parse_all(source: &str, name: &str, map: &mut StrMap) -> LoParse {
	parse_nested(source, name, map, DEFAULT_MAX_DEPTH)
}

/// `parse_all` with lists allowed to nest `max_depth` levels deep
pub fn parse_nested(source: &str, name: &str, map: &mut StrMap, max_depth: usize) -> LoParse {
	let name = map.add(name);
	LoParser::new(LoLexer::new(source, name, map)).with_max_depth(max_depth).parse()
}
