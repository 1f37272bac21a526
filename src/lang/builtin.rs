use std::io::Write;

use super::error::{LoError, LoErrorType, LoResult};
use super::scope::LoEnv;
use super::value::{LoBuiltin, LoValue};

const BUILTINS: &[LoBuiltin] = &[
	LoBuiltin { name: "+", func: add },
	LoBuiltin { name: "-", func: subtract },
	LoBuiltin { name: "*", func: multiply },
	LoBuiltin { name: "/", func: divide },
	LoBuiltin { name: "str", func: concat },
	LoBuiltin { name: "print", func: print },
	LoBuiltin { name: "println", func: println },
];

/// the fixed builtin table, consulted before any scope
pub fn lookup(name: &str) -> Option<LoBuiltin> {
	BUILTINS.iter().find(|b| b.name == name).copied()
}

pub fn names() -> impl Iterator<Item = &'static str> {
	BUILTINS.iter().map(|b| b.name)
}

/// the arguments, all as ints unless any of them is a float
#[derive(Debug)]
enum UniformNumberList {
	Float(Vec<f64>),
	Int(Vec<i64>),
}

fn to_uniform_number_list(op: &'static str, list: &[LoValue]) -> LoResult<UniformNumberList> {
	let mut any_float = false;
	for i in list {
		match i {
			LoValue::Int(_) => {},
			LoValue::Float(_) => any_float = true,
			other => return Err(LoError::new(LoErrorType::TypeMismatch(op, other.get_type()))),
		}
	}
	Ok(if any_float {
		UniformNumberList::Float(list.iter().map(|i| match i {
			LoValue::Int(v) => *v as f64,
			LoValue::Float(v) => *v,
			_ => 0.0,
		}).collect())
	} else {
		UniformNumberList::Int(list.iter().map(|i| match i {
			LoValue::Int(v) => *v,
			_ => 0,
		}).collect())
	})
}

fn at_least_one(op: &'static str, args: &[LoValue]) -> LoResult<()> {
	if args.is_empty() {
		return Err(LoError::new(LoErrorType::ArgMismatch(op.to_string(), (Some(1), None), 0)));
	}
	Ok(())
}

fn checked(op: &'static str, v: Option<i64>) -> LoResult<i64> {
	v.ok_or_else(|| LoError::new(LoErrorType::Overflow(op)))
}

fn add(args: &[LoValue], _: &mut LoEnv) -> LoResult<LoValue> {
	Ok(match to_uniform_number_list("+", args)? {
		UniformNumberList::Float(v) => LoValue::Float(v.iter().fold(0.0, |a, b| a + b)),
		UniformNumberList::Int(v) => LoValue::Int(v.iter().try_fold(0i64, |a, b| checked("+", a.checked_add(*b)))?),
	})
}

fn multiply(args: &[LoValue], _: &mut LoEnv) -> LoResult<LoValue> {
	Ok(match to_uniform_number_list("*", args)? {
		UniformNumberList::Float(v) => LoValue::Float(v.iter().fold(1.0, |a, b| a * b)),
		UniformNumberList::Int(v) => LoValue::Int(v.iter().try_fold(1i64, |a, b| checked("*", a.checked_mul(*b)))?),
	})
}

fn subtract(args: &[LoValue], _: &mut LoEnv) -> LoResult<LoValue> {
	at_least_one("-", args)?;
	Ok(match to_uniform_number_list("-", args)? {
		UniformNumberList::Float(v) => LoValue::Float(v[1..].iter().fold(v[0], |a, b| a - b)),
		UniformNumberList::Int(v) => LoValue::Int(v[1..].iter().try_fold(v[0], |a, b| checked("-", a.checked_sub(*b)))?),
	})
}

fn divide(args: &[LoValue], _: &mut LoEnv) -> LoResult<LoValue> {
	at_least_one("/", args)?;
	Ok(match to_uniform_number_list("/", args)? {
		UniformNumberList::Float(v) => LoValue::Float(v[1..].iter().fold(v[0], |a, b| a / b)),
		UniformNumberList::Int(v) => LoValue::Int(v[1..].iter().try_fold(v[0], |a, b| {
			if *b == 0 {
				return Err(LoError::new(LoErrorType::DivisionByZero));
			}
			checked("/", a.checked_div(*b))
		})?),
	})
}

fn concat(args: &[LoValue], _: &mut LoEnv) -> LoResult<LoValue> {
	Ok(LoValue::String(args.iter().map(|v| v.to_string()).collect()))
}

fn write_all(args: &[LoValue], env: &mut LoEnv, newline: bool) -> LoResult<LoValue> {
	let output = |err: std::io::Error| LoError::new(LoErrorType::Output(err.to_string()));
	for arg in args {
		write!(env.out, "{}", arg).map_err(output)?;
	}
	if newline {
		writeln!(env.out).map_err(output)?;
	}
	env.out.flush().map_err(output)?;
	Ok(LoValue::nothing())
}

fn print(args: &[LoValue], env: &mut LoEnv) -> LoResult<LoValue> {
	write_all(args, env, false)
}

fn println(args: &[LoValue], env: &mut LoEnv) -> LoResult<LoValue> {
	write_all(args, env, true)
}
