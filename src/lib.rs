//! lo :)
//!
//! a small s-expression language: `def`, `defn`, lambdas (`\` or `fn`),
//! closures, list literals and a handful of numeric/string builtins

use std::io::Write;

pub mod config;
pub mod lang;
pub mod strmap;
pub mod utils;

pub use config::LoConfig;
pub use lang::error::{LoDiagnostic, LoError, LoErrorType, LoResult};
pub use lang::parse::LoParse;
pub use lang::scope::{LoEnv, LoScope, LoScopeRef};
pub use lang::value::{LoType, LoValue};

use lang::ast::LoProgram;
use lang::{eval, parse};

/// owns the root scope and evaluation state, so bindings survive between runs
pub struct Interpreter {
	scope: LoScopeRef,
	env: LoEnv,
}

impl Interpreter {
	pub fn new(config: &LoConfig) -> Self {
		Self::with_env(LoEnv::new(config.max_depth))
	}

	pub fn with_output(config: &LoConfig, out: Box<dyn Write>) -> Self {
		Self::with_env(LoEnv::with_output(config.max_depth, out))
	}

	fn with_env(mut env: LoEnv) -> Self {
		let scope = LoScope::root();
		{
			let mut lock = scope.borrow_mut();
			lock.set(env.map.add("true"), LoValue::Bool(true));
			lock.set(env.map.add("false"), LoValue::Bool(false));
		}
		Self { scope, env }
	}

	pub fn scope(&self) -> &LoScopeRef {
		&self.scope
	}

	pub fn parse(&mut self, source: &str, name: &str) -> LoParse {
		parse::parse_nested(source, name, &mut self.env.map, self.env.max_depth)
	}

	pub fn eval(&mut self, program: &LoProgram) -> Option<LoValue> {
		eval::eval_program(program, &self.scope, &mut self.env)
	}

	/// parses and, if that went cleanly, evaluates; `None` for a program with no forms
	pub fn run(&mut self, source: &str, name: &str) -> Result<Option<LoValue>, Vec<LoDiagnostic>> {
		let res = self.parse(source, name);
		if !res.is_ok() {
			return Err(res.diagnostics);
		}
		Ok(self.eval(&res.program))
	}

	/// forgets interned names nothing uses anymore
	pub fn gc(&mut self) -> usize {
		self.env.map.gc()
	}
}

impl Drop for Interpreter {
	fn drop(&mut self) {
		// closures bound at the top level can reach the root through their own frame
		self.scope.borrow_mut().clear();
	}
}
