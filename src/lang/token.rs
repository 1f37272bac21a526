use std::fmt;

use crate::strmap::MappedStr;

use super::span::LoSpan;

/// why the lexer gave up on a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoIllegal {
	UnterminatedString,
	InvalidEscape(String),
}

impl fmt::Display for LoIllegal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&match self {
			LoIllegal::UnterminatedString => "unterminated string literal".to_string(),
			LoIllegal::InvalidEscape(text) => format!("invalid escape sequence `{}`", text),
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoTokenKind {
	OpenParen,
	CloseParen,
	OpenBracket,
	CloseBracket,
	Ident,
	Number,
	String,
	Illegal(LoIllegal),
	Eof,
}

impl fmt::Display for LoTokenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			LoTokenKind::OpenParen    => "LPAREN",
			LoTokenKind::CloseParen   => "RPAREN",
			LoTokenKind::OpenBracket  => "LBRACKET",
			LoTokenKind::CloseBracket => "RBRACKET",
			LoTokenKind::Ident        => "IDENT",
			LoTokenKind::Number       => "NUMBER",
			LoTokenKind::String       => "STRING",
			LoTokenKind::Illegal(_)   => "ILLEGAL",
			LoTokenKind::Eof          => "EOF",
		})
	}
}

/// a token and where it starts; string literals hold their decoded text
#[derive(Debug, Clone, PartialEq)]
pub struct LoToken {
	pub kind: LoTokenKind,
	pub literal: MappedStr,
	pub span: LoSpan,
}

impl LoToken {
	pub fn is(&self, kind: &LoTokenKind) -> bool {
		&self.kind == kind
	}
}
