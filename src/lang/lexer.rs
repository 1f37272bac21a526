use std::str::Chars;

use crate::strmap::{MappedStr, StrMap};

use super::span::LoSpan;
use super::token::{LoIllegal, LoToken, LoTokenKind};

enum CharType {
	Quote,         // "
	Whitespace,    // ' ' \t \r \n
	Paren(bool),   // true: (  false: )
	Bracket(bool), // true: [  false: ]
	Comment,       // ;
	Other(char),
}

fn char_type(c: char) -> CharType {
	match c {
		'"' => CharType::Quote,
		' '|'\t'|'\r'|'\n' => CharType::Whitespace,
		'(' => CharType::Paren(true),
		')' => CharType::Paren(false),
		'[' => CharType::Bracket(true),
		']' => CharType::Bracket(false),
		';' => CharType::Comment,
		c => CharType::Other(c),
	}
}

/// ends an identifier or number run
fn is_delimiter(c: char) -> bool {
	matches!(char_type(c), CharType::Whitespace | CharType::Paren(_) | CharType::Bracket(_))
}

fn is_digit(c: char) -> bool {
	c.is_ascii_digit() || c == '_' || c == '.'
}

fn is_number_start(c: char, next: Option<char>) -> bool {
	c.is_ascii_digit() || (c == '-' && next.map_or(false, is_digit))
}

/// lazy tokenizer, one token per call
///
/// once the input runs out every call yields an `Eof` token
pub struct LoLexer<'a> {
	rest: Chars<'a>,
	line: usize,
	col: usize,
	name: MappedStr,
	map: &'a mut StrMap,
	done: bool,
}

impl<'a> LoLexer<'a> {
	pub fn new(source: &'a str, name: MappedStr, map: &'a mut StrMap) -> Self {
		Self {
			rest: source.chars(),
			line: 1,
			col: 1,
			name,
			map,
			done: false,
		}
	}

	fn peek(&self) -> Option<char> {
		self.rest.clone().next()
	}

	fn bump(&mut self) -> Option<char> {
		let ch = self.rest.next()?;
		match ch {
			'\n' => { self.line += 1; self.col = 1; },
			_ => { self.col += 1; },
		}
		Some(ch)
	}

	fn span(&self) -> LoSpan {
		LoSpan(self.line, self.col, self.name.clone())
	}

	fn token(&mut self, kind: LoTokenKind, literal: &str, span: LoSpan) -> LoToken {
		LoToken { kind, literal: self.map.add(literal), span }
	}

	fn skip_trivia(&mut self) {
		while let Some(ch) = self.peek() {
			match char_type(ch) {
				CharType::Whitespace => { self.bump(); },
				CharType::Comment => {
					// discard until eol or eof
					while let Some(ch) = self.bump() {
						if ch == '\n' { break }
					}
				},
				_ => break,
			}
		}
	}

	fn read_run(&mut self, first: char, keep: fn(char) -> bool) -> String {
		let mut res = String::from(first);
		while let Some(ch) = self.peek() {
			if !keep(ch) { break }
			res.push(ch);
			self.bump();
		}
		res
	}

	fn read_escape(&mut self) -> Result<char, LoIllegal> {
		// shorthands: \n \t \r \0
		// codes:      \xHH \{code}
		// literals:   \# (anything else stands for itself)
		Ok(match self.bump() {
			None => return Err(LoIllegal::UnterminatedString),
			Some('n') => '\n',
			Some('t') => '\t',
			Some('r') => '\r',
			Some('0') => '\0',
			Some('x') => {
				let mut t = String::new();
				for _ in 0..2 {
					match self.peek() {
						Some('"') | None => break,
						Some(ch) => { t.push(ch); self.bump(); },
					}
				}
				let mut buf = [0u8; 1];
				hex::decode_to_slice(&t, &mut buf).map_err(|_| LoIllegal::InvalidEscape(format!("\\x{}", t)))?;
				char::from(buf[0])
			},
			Some('{') => {
				let mut esc = String::new();
				loop {
					match self.peek() {
						Some('}') => { self.bump(); break },
						// the quote still closes the string
						Some('"') | None => return Err(LoIllegal::InvalidEscape(format!("\\{{{}", esc))),
						Some(ch) => { esc.push(ch); self.bump(); },
					}
				}
				let invalid = || LoIllegal::InvalidEscape(format!("\\{{{}}}", esc));
				if esc.is_empty() || esc.len() > 8 {
					return Err(invalid());
				}
				// pad to 8 digits so it decodes into a u32
				let padded = format!("{:0>8}", esc);
				let mut buf = [0u8; 4];
				hex::decode_to_slice(&padded, &mut buf).map_err(|_| invalid())?;
				char::from_u32(u32::from_be_bytes(buf)).ok_or_else(invalid)?
			},
			Some(ch) => ch,
		})
	}

	fn read_string(&mut self, span: LoSpan) -> LoToken {
		// opening quote
		self.bump();
		let mut res = String::new();
		let mut bad = None;
		loop {
			match self.bump() {
				None => {
					return self.token(LoTokenKind::Illegal(LoIllegal::UnterminatedString), &res, span);
				},
				Some('"') => break,
				Some('\\') => match self.read_escape() {
					Ok(ch) => res.push(ch),
					Err(LoIllegal::UnterminatedString) => {
						return self.token(LoTokenKind::Illegal(LoIllegal::UnterminatedString), &res, span);
					},
					// keep scanning so the closing quote doesn't start a new string
					Err(err) => { bad.get_or_insert(err); },
				},
				Some(ch) => res.push(ch),
			}
		}
		match bad {
			Some(err) => self.token(LoTokenKind::Illegal(err), &res, span),
			None => self.token(LoTokenKind::String, &res, span),
		}
	}

	pub fn next_token(&mut self) -> LoToken {
		self.skip_trivia();
		let span = self.span();
		let ch = match self.peek() {
			Some(ch) => ch,
			None => return self.token(LoTokenKind::Eof, "", span),
		};
		let (kind, literal) = match char_type(ch) {
			CharType::Paren(true)    => (LoTokenKind::OpenParen, "("),
			CharType::Paren(false)   => (LoTokenKind::CloseParen, ")"),
			CharType::Bracket(true)  => (LoTokenKind::OpenBracket, "["),
			CharType::Bracket(false) => (LoTokenKind::CloseBracket, "]"),
			CharType::Quote => return self.read_string(span),
			CharType::Other(ch) => {
				self.bump();
				return if is_number_start(ch, self.peek()) {
					let text = self.read_run(ch, is_digit);
					self.token(LoTokenKind::Number, &text, span)
				} else {
					let text = self.read_run(ch, |c| !is_delimiter(c));
					self.token(LoTokenKind::Ident, &text, span)
				};
			},
			// skip_trivia leaves neither of these in front
			CharType::Whitespace | CharType::Comment => unreachable!(),
		};
		self.bump();
		self.token(kind, literal, span)
	}
}

impl<'a> Iterator for LoLexer<'a> {
	type Item = LoToken;

	/// yields the `Eof` token once, then stops
	fn next(&mut self) -> Option<LoToken> {
		if self.done {
			return None;
		}
		let tok = self.next_token();
		if tok.is(&LoTokenKind::Eof) {
			self.done = true;
		}
		Some(tok)
	}
}

/// lexes the whole input, `Eof` included
pub fn tokenize(source: &str, name: &str, map: &mut StrMap) -> Vec<LoToken> {
	let name = map.add(name);
	LoLexer::new(source, name, map).collect()
}
