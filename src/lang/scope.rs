use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use crate::strmap::{MappedStr, StrMap};

use super::value::LoValue;

pub type LoScopeRef = Rc<RefCell<LoScope>>;

/// how deep lists may nest, both in source and while evaluating
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// one frame of bindings, linked to the frame it was created in
///
/// lookups walk outward to the root, writes only ever touch this frame
#[derive(Default)]
pub struct LoScope {
	data: HashMap<MappedStr, LoValue>,
	parent: Option<LoScopeRef>,
}

impl LoScope {
	pub fn root() -> LoScopeRef {
		Rc::new(RefCell::new(LoScope::default()))
	}
	pub fn enclosed(parent: &LoScopeRef) -> LoScopeRef {
		Rc::new(RefCell::new(LoScope { data: HashMap::new(), parent: Some(parent.clone()) }))
	}
	pub fn get(&self, name: &str) -> Option<LoValue> {
		match self.data.get(name) {
			Some(v) => Some(v.loaded()),
			None => self.parent.as_ref().and_then(|p| p.borrow().get(name)),
		}
	}
	pub fn set(&mut self, name: MappedStr, value: LoValue) {
		self.data.insert(name, value);
	}
	/// `set` on a shared frame, for values that may have captured it
	pub fn define(scope: &LoScopeRef, name: MappedStr, value: &LoValue) {
		let value = value.stored_in(scope);
		scope.borrow_mut().set(name, value);
	}
	pub fn has_own(&self, name: &str) -> bool {
		self.data.contains_key(name)
	}
	/// drops every binding, breaking function <-> scope cycles
	pub fn clear(&mut self) {
		self.data.clear();
	}
}

impl fmt::Debug for LoScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<_> = self.data.keys().collect();
		names.sort();
		f.debug_struct("LoScope")
			.field("names", &names)
			.field("has_parent", &self.parent.is_some())
			.finish()
	}
}

/// evaluation state shared by every scope: interned names, output, depth budget
pub struct LoEnv {
	pub map: StrMap,
	pub out: Box<dyn Write>,
	pub depth: usize,
	pub max_depth: usize,
}

impl LoEnv {
	pub fn new(max_depth: usize) -> Self {
		Self::with_output(max_depth, Box::new(io::stdout()))
	}
	pub fn with_output(max_depth: usize, out: Box<dyn Write>) -> Self {
		Self { map: StrMap::new(), out, depth: 0, max_depth }
	}
}

impl fmt::Debug for LoEnv {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoEnv")
			.field("map", &self.map)
			.field("depth", &self.depth)
			.field("max_depth", &self.max_depth)
			.finish()
	}
}
