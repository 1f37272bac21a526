//! string interning map

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// an interned string, cheap to clone and compare
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MappedStr(Rc<str>);

impl MappedStr {
	pub fn get_ref(&self) -> &str {
		&self.0
	}
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl Borrow<str> for MappedStr {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for MappedStr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}", &*self.0)
	}
}

impl fmt::Display for MappedStr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Default)]
pub struct StrMap {
	data: HashMap<Box<str>, Weak<str>>,
}

impl fmt::Debug for StrMap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut tuple = f.debug_tuple("StrMap");
		for k in self.data.keys() {
			tuple.field(k);
		}
		tuple.finish()
	}
}

impl StrMap {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn add<T: AsRef<str>>(&mut self, v: T) -> MappedStr {
		let v = v.as_ref();
		if let Some(r) = self.data.get(v).and_then(|r| r.upgrade()) {
			return MappedStr(r);
		}
		let res: Rc<str> = Rc::from(v);
		self.data.insert(Box::from(v), Rc::downgrade(&res));
		MappedStr(res)
	}
	pub fn len(&self) -> usize {
		self.data.len()
	}
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
	/// drops every entry nothing references anymore, returns how many went
	pub fn gc(&mut self) -> usize {
		let before = self.data.len();
		self.data.retain(|_, v| v.strong_count() > 0);
		let saved = before - self.data.len();
		log::debug!("StrMap gc() removed {} string(s)", saved);
		saved
	}
}
