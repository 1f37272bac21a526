use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::strmap::MappedStr;

use super::ast::LoExpr;
use super::error::LoResult;
use super::scope::{LoEnv, LoScope, LoScopeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoType {
	Integer, Float, Boolean, String, List, Function, Builtin, Error
}

impl fmt::Display for LoType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			LoType::Integer  => "INTEGER",
			LoType::Float    => "FLOAT",
			LoType::Boolean  => "BOOLEAN",
			LoType::String   => "STRING",
			LoType::List     => "LIST",
			LoType::Function => "FUNCTION",
			LoType::Builtin  => "BUILTIN",
			LoType::Error    => "ERROR",
		})
	}
}

/// how a function holds on to the scope it was defined in
#[derive(Clone)]
pub enum LoCapture {
	Strong(LoScopeRef),
	/// only inside the frame it points at, so that frame can still be freed
	Weak(Weak<RefCell<LoScope>>),
}

impl LoCapture {
	pub fn upgrade(&self) -> Option<LoScopeRef> {
		match self {
			LoCapture::Strong(scope) => Some(scope.clone()),
			LoCapture::Weak(scope) => scope.upgrade(),
		}
	}
	pub fn points_at(&self, scope: &LoScopeRef) -> bool {
		match self {
			LoCapture::Strong(s) => Rc::ptr_eq(s, scope),
			LoCapture::Weak(s) => std::ptr::eq(s.as_ptr(), Rc::as_ptr(scope)),
		}
	}
	fn same(&self, other: &LoCapture) -> bool {
		let ptr = |c: &LoCapture| match c {
			LoCapture::Strong(s) => Rc::as_ptr(s),
			LoCapture::Weak(s) => s.as_ptr(),
		};
		std::ptr::eq(ptr(self), ptr(other))
	}
}

/// user-defined function data
pub struct LoFunction {
	pub name: MappedStr,
	pub params: Rc<[MappedStr]>,
	pub body: Rc<LoExpr>,
	/// the scope active where the function was defined, shared not copied
	pub scope: LoCapture,
}

impl LoFunction {
	fn with_capture(&self, scope: LoCapture) -> LoValue {
		LoValue::Function(Rc::new(LoFunction {
			name: self.name.clone(),
			params: self.params.clone(),
			body: self.body.clone(),
			scope,
		}))
	}
}

impl fmt::Debug for LoFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// the captured scope can hold this very function
		f.debug_struct("LoFunction")
			.field("name", &self.name)
			.field("params", &self.params)
			.field("body", &self.body.to_string())
			.finish()
	}
}

pub type LoNativeFn = fn(&[LoValue], &mut LoEnv) -> LoResult<LoValue>;

#[derive(Clone, Copy)]
pub struct LoBuiltin {
	pub name: &'static str,
	pub func: LoNativeFn,
}

impl fmt::Debug for LoBuiltin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("LoBuiltin").field(&self.name).finish()
	}
}

#[derive(Debug, Clone)]
pub enum LoValue {
	Int(i64),
	Float(f64),
	Bool(bool),
	String(String),
	List(Vec<LoValue>),
	Function(Rc<LoFunction>),
	Builtin(LoBuiltin),
	Error(String),
}

impl LoValue {
	pub fn get_type(&self) -> LoType {
		match self {
			LoValue::Int(_)      => LoType::Integer,
			LoValue::Float(_)    => LoType::Float,
			LoValue::Bool(_)     => LoType::Boolean,
			LoValue::String(_)   => LoType::String,
			LoValue::List(_)     => LoType::List,
			LoValue::Function(_) => LoType::Function,
			LoValue::Builtin(_)  => LoType::Builtin,
			LoValue::Error(_)    => LoType::Error,
		}
	}
	pub fn is_callable(&self) -> bool {
		matches!(self, LoValue::Function(_) | LoValue::Builtin(_))
	}
	/// what print/println hand back
	pub fn nothing() -> Self {
		LoValue::List(vec![])
	}
	/// the form to store in `frame`: a function that captured `frame` itself
	/// would otherwise keep it alive forever
	pub fn stored_in(&self, frame: &LoScopeRef) -> LoValue {
		match self {
			LoValue::Function(f) if matches!(f.scope, LoCapture::Strong(_)) && f.scope.points_at(frame) => {
				f.with_capture(LoCapture::Weak(Rc::downgrade(frame)))
			},
			_ => self.clone(),
		}
	}
	/// the form to hand out of a scope, holding its captured scope again
	pub fn loaded(&self) -> LoValue {
		match self {
			LoValue::Function(f) => match &f.scope {
				LoCapture::Weak(scope) => match scope.upgrade() {
					Some(scope) => f.with_capture(LoCapture::Strong(scope)),
					None => self.clone(),
				},
				LoCapture::Strong(_) => self.clone(),
			},
			_ => self.clone(),
		}
	}
}

impl PartialEq for LoValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(LoValue::Int(a), LoValue::Int(b)) => a == b,
			(LoValue::Float(a), LoValue::Float(b)) => a == b,
			(LoValue::Bool(a), LoValue::Bool(b)) => a == b,
			(LoValue::String(a), LoValue::String(b)) => a == b,
			(LoValue::List(a), LoValue::List(b)) => a == b,
			// one definition evaluated once, however it was stored
			(LoValue::Function(a), LoValue::Function(b)) => Rc::ptr_eq(&a.body, &b.body) && a.scope.same(&b.scope),
			(LoValue::Builtin(a), LoValue::Builtin(b)) => a.name == b.name,
			(LoValue::Error(a), LoValue::Error(b)) => a == b,
			_ => false,
		}
	}
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
	let text = v.to_string();
	if v.is_finite() && !text.contains('.') {
		write!(f, "{}.0", text)
	} else {
		f.write_str(&text)
	}
}

impl fmt::Display for LoValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LoValue::Int(v) => write!(f, "{}", v),
			LoValue::Float(v) => write_float(f, *v),
			LoValue::Bool(v) => write!(f, "{}", v),
			LoValue::String(v) => f.write_str(v),
			LoValue::List(v) => {
				f.write_str("[")?;
				for (i, item) in v.iter().enumerate() {
					if i > 0 { f.write_str(" ")?; }
					write!(f, "{}", item)?;
				}
				f.write_str("]")
			},
			LoValue::Function(data) => write!(f, "(fn {})", data.name),
			LoValue::Builtin(data) => write!(f, "builtin function {}", data.name),
			LoValue::Error(msg) => write!(f, "ERROR: {}", msg),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rendering() {
		assert_eq!(LoValue::Int(-3).to_string(), "-3");
		assert_eq!(LoValue::Float(1.5).to_string(), "1.5");
		assert_eq!(LoValue::Float(2.0).to_string(), "2.0");
		assert_eq!(LoValue::Float(f64::INFINITY).to_string(), "inf");
		assert_eq!(LoValue::Bool(true).to_string(), "true");
		assert_eq!(LoValue::String("hi".to_string()).to_string(), "hi");
		assert_eq!(
			LoValue::List(vec![LoValue::Int(1), LoValue::List(vec![]), LoValue::String("a".to_string())]).to_string(),
			"[1 [] a]",
		);
		assert_eq!(LoValue::Error("empty list".to_string()).to_string(), "ERROR: empty list");
	}

	#[test]
	fn type_tags() {
		assert_eq!(LoValue::Int(1).get_type().to_string(), "INTEGER");
		assert_eq!(LoValue::nothing().get_type(), LoType::List);
		assert!(!LoValue::Error(String::new()).is_callable());
	}
}
