use std::rc::Rc;

use crate::strmap::MappedStr;

use super::ast::{LoExpr, LoExprValue, LoProgram};
use super::builtin;
use super::error::{LoError, LoErrorType, LoResult};
use super::scope::{LoEnv, LoScope, LoScopeRef};
use super::span::LoSpan;
use super::value::{LoCapture, LoFunction, LoValue};

const LAMBDA_NAME: &str = "lambda";

/// evaluates every top-level form against one scope, keeping the last value
///
/// a failing form turns into an `Error` value and evaluation carries on with
/// the next form
pub fn eval_program(program: &LoProgram, scope: &LoScopeRef, env: &mut LoEnv) -> Option<LoValue> {
	let mut result = None;
	for expr in &program.expressions {
		result = Some(match eval(expr, scope, env) {
			Ok(v) => v,
			Err(err) => {
				match &err.1 {
					Some(span) => log::warn!("{}: {}", span, err),
					None => log::warn!("{}", err),
				}
				LoValue::Error(err.to_string())
			},
		});
	}
	result
}

pub fn eval(exp: &LoExpr, scope: &LoScopeRef, env: &mut LoEnv) -> LoResult<LoValue> {
	log::trace!("eval {} {}", env.depth, exp);
	let res = match &exp.0 {
		LoExprValue::Int(v) => Ok(LoValue::Int(*v)),
		LoExprValue::Float(v) => Ok(LoValue::Float(*v)),
		LoExprValue::String(v) => Ok(LoValue::String(v.to_string())),
		LoExprValue::Ident(name) => lookup_var(name.get_ref(), exp.span(), scope),
		LoExprValue::ListLiteral(items) => nested(exp, env, |env| eval_args(items, scope, env).map(LoValue::List)),
		LoExprValue::List(items) => nested(exp, env, |env| eval_list(exp, items, scope, env)),
	};
	log::trace!("eval result: {:?}", res);
	res
}

/// runs `f` one level deeper, failing instead once the budget is spent
fn nested<F>(exp: &LoExpr, env: &mut LoEnv, f: F) -> LoResult<LoValue>
where
	F: FnOnce(&mut LoEnv) -> LoResult<LoValue>,
{
	if env.depth >= env.max_depth {
		return Err(LoError::at(LoErrorType::RecursionLimit(env.max_depth), exp.span()));
	}
	env.depth += 1;
	let res = f(env);
	env.depth -= 1;
	res
}

fn lookup_var(name: &str, span: &LoSpan, scope: &LoScopeRef) -> LoResult<LoValue> {
	if let Some(b) = builtin::lookup(name) {
		return Ok(LoValue::Builtin(b));
	}
	scope.borrow().get(name).ok_or_else(|| LoError::at(LoErrorType::NotDefined(name.to_string()), span))
}

/// left to right, stopping at the first failure
fn eval_args(args: &[LoExpr], scope: &LoScopeRef, env: &mut LoEnv) -> LoResult<Vec<LoValue>> {
	let mut res = Vec::with_capacity(args.len());
	for x in args {
		res.push(eval(x, scope, env)?);
	}
	Ok(res)
}

fn eval_list(exp: &LoExpr, items: &[LoExpr], scope: &LoScopeRef, env: &mut LoEnv) -> LoResult<LoValue> {
	let (first, args) = items.split_first().ok_or_else(|| LoError::at(LoErrorType::EmptyList, exp.span()))?;
	// special forms go by spelling, so these names can't be rebound as functions
	if let Some(name) = first.as_ident() {
		match name.get_ref() {
			"def" => return eval_def(exp, items, scope, env),
			"defn" => return eval_defn(exp, items, scope, env),
			"\\" | "fn" => return eval_lambda(exp, items, scope, env),
			_ => {},
		}
	}
	let callee = eval(first, scope, env)?;
	if !callee.is_callable() {
		return Err(LoError::at(LoErrorType::NotAFunction, first.span()));
	}
	let args = eval_args(args, scope, env)?;
	apply(&callee, &args, exp.span(), env)
}

/// calls a function or builtin with already evaluated arguments
pub fn apply(callee: &LoValue, args: &[LoValue], span: &LoSpan, env: &mut LoEnv) -> LoResult<LoValue> {
	match callee {
		LoValue::Builtin(b) => (b.func)(args, env).map_err(|e| e.or_at(span)),
		LoValue::Function(f) => {
			if args.len() != f.params.len() {
				return Err(LoError::at(LoErrorType::Arity(f.name.to_string(), args.len(), f.params.len()), span));
			}
			log::debug!("apply {} with {} argument(s)", f.name, args.len());
			// parented to the captured scope, not the caller's
			let parent = f.scope.upgrade().ok_or_else(|| LoError::at(LoErrorType::ScopeGone(f.name.to_string()), span))?;
			let frame = LoScope::enclosed(&parent);
			{
				let mut lock = frame.borrow_mut();
				for (k, v) in f.params.iter().zip(args.iter()) {
					lock.set(k.clone(), v.clone());
				}
			}
			eval(&f.body, &frame, env)
		},
		_ => Err(LoError::at(LoErrorType::NotAFunction, span)),
	}
}

fn eval_def(exp: &LoExpr, items: &[LoExpr], scope: &LoScopeRef, env: &mut LoEnv) -> LoResult<LoValue> {
	if items.len() != 3 {
		return Err(LoError::at(LoErrorType::Arity("def".to_string(), items.len() - 1, 2), exp.span()));
	}
	let name = items[1].as_ident().ok_or_else(|| {
		LoError::at(LoErrorType::MalformedForm("first argument to def must be an identifier"), items[1].span())
	})?;
	let value = eval(&items[2], scope, env)?;
	log::debug!("def {}", name);
	LoScope::define(scope, name.clone(), &value);
	Ok(value)
}

fn read_params(exp: &LoExpr, not_a_list: &'static str, not_an_ident: &'static str) -> LoResult<Vec<MappedStr>> {
	let list = match &exp.0 {
		LoExprValue::ListLiteral(list) => list,
		_ => return Err(LoError::at(LoErrorType::MalformedForm(not_a_list), exp.span())),
	};
	list.iter()
		.map(|p| p.as_ident().cloned().ok_or_else(|| LoError::at(LoErrorType::MalformedForm(not_an_ident), p.span())))
		.collect()
}

fn eval_defn(exp: &LoExpr, items: &[LoExpr], scope: &LoScopeRef, env: &mut LoEnv) -> LoResult<LoValue> {
	if items.len() < 4 {
		return Err(LoError::at(LoErrorType::Arity("defn".to_string(), items.len() - 1, 3), exp.span()));
	}
	let name = items[1].as_ident().ok_or_else(|| {
		LoError::at(LoErrorType::MalformedForm("first argument to defn must be an identifier"), items[1].span())
	})?;
	let params = read_params(
		&items[2],
		"second argument to defn must be a list of identifiers",
		"parameters to defn must be identifiers",
	)?;
	let func = LoValue::Function(Rc::new(LoFunction {
		name: name.clone(),
		params: params.into(),
		body: Rc::new(items[3].clone()),
		scope: LoCapture::Strong(scope.clone()),
	}));
	log::debug!("defn {} (depth {})", name, env.depth);
	// bound before returning, so the body can call itself by name
	LoScope::define(scope, name.clone(), &func);
	Ok(func)
}

fn eval_lambda(exp: &LoExpr, items: &[LoExpr], scope: &LoScopeRef, env: &mut LoEnv) -> LoResult<LoValue> {
	if items.len() < 3 {
		return Err(LoError::at(LoErrorType::Arity(LAMBDA_NAME.to_string(), items.len() - 1, 2), exp.span()));
	}
	let params = read_params(
		&items[1],
		"first argument to lambda must be a list of identifiers",
		"parameters to lambda must be identifiers",
	)?;
	Ok(LoValue::Function(Rc::new(LoFunction {
		name: env.map.add(LAMBDA_NAME),
		params: params.into(),
		body: Rc::new(items[2].clone()),
		scope: LoCapture::Strong(scope.clone()),
	})))
}
