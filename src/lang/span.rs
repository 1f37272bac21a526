use std::fmt;

use crate::strmap::MappedStr;

// line, col, source name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoSpan(pub usize, pub usize, pub MappedStr);

impl LoSpan {
	pub fn line(&self) -> usize {
		self.0
	}
	pub fn col(&self) -> usize {
		self.1
	}
	pub fn name(&self) -> &MappedStr {
		&self.2
	}
}

impl fmt::Display for LoSpan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.2, self.0, self.1)
	}
}
