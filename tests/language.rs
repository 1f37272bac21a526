use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use lo::lang::lexer::tokenize;
use lo::lang::token::LoTokenKind;
use lo::strmap::StrMap;
use lo::{Interpreter, LoConfig, LoType, LoValue};

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl io::Write for SharedBuf {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.borrow_mut().extend_from_slice(buf);
		Ok(buf.len())
	}
	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl SharedBuf {
	fn text(&self) -> String {
		String::from_utf8_lossy(&self.0.borrow()).into_owned()
	}
}

fn interpreter() -> (Interpreter, SharedBuf) {
	let buf = SharedBuf::default();
	let interpreter = Interpreter::with_output(&LoConfig::default(), Box::new(buf.clone()));
	(interpreter, buf)
}

fn eval(src: &str) -> LoValue {
	let (mut interpreter, _) = interpreter();
	match interpreter.run(src, "test") {
		Ok(Some(v)) => v,
		Ok(None) => panic!("{:?} produced no value", src),
		Err(diagnostics) => panic!("{:?} failed to parse: {:?}", src, diagnostics),
	}
}

#[test]
fn token_stream_with_positions() {
	let mut map = StrMap::new();
	let tokens = tokenize("(+ 1 2)\n(+ (+ 1 2) 3)\n[1 2]", "test", &mut map);
	let got: Vec<_> = tokens
		.iter()
		.map(|t| (t.kind.to_string(), t.literal.to_string(), t.span.line(), t.span.col()))
		.collect();
	let expected: Vec<(String, String, usize, usize)> = [
		("LPAREN", "(", 1, 1), ("IDENT", "+", 1, 2), ("NUMBER", "1", 1, 4), ("NUMBER", "2", 1, 6),
		("RPAREN", ")", 1, 7), ("LPAREN", "(", 2, 1), ("IDENT", "+", 2, 2), ("LPAREN", "(", 2, 4),
		("IDENT", "+", 2, 5), ("NUMBER", "1", 2, 7), ("NUMBER", "2", 2, 9), ("RPAREN", ")", 2, 10),
		("NUMBER", "3", 2, 12), ("RPAREN", ")", 2, 13), ("LBRACKET", "[", 3, 1), ("NUMBER", "1", 3, 2),
		("NUMBER", "2", 3, 4), ("RBRACKET", "]", 3, 5), ("EOF", "", 3, 6),
	]
	.iter()
	.map(|(k, l, line, col)| (k.to_string(), l.to_string(), *line, *col))
	.collect();
	assert_eq!(got, expected);
	assert_eq!(tokens.last().map(|t| &t.kind), Some(&LoTokenKind::Eof));
}

#[test]
fn folds() {
	assert_eq!(eval("(+ 1 2 3 4)"), LoValue::Int(10));
	assert_eq!(eval("(- 1 2 3 4)"), LoValue::Int(-8));
	assert_eq!(eval("(* 1 2 3 4)"), LoValue::Int(24));
}

#[test]
fn bindings_persist_across_forms() {
	assert_eq!(eval("(def x 5) (+ x 1)"), LoValue::Int(6));
}

#[test]
fn bindings_persist_across_runs() {
	let (mut interpreter, _) = interpreter();
	assert_eq!(interpreter.run("(defn add [a b] (+ a b))", "one").map(|v| v.is_some()), Ok(true));
	assert_eq!(interpreter.run("(add 2 3)", "two"), Ok(Some(LoValue::Int(5))));
	assert!(interpreter.scope().borrow().has_own("add"));
}

#[test]
fn named_functions() {
	assert_eq!(eval("(defn add [a b] (+ a b)) (add 2 3)"), LoValue::Int(5));
}

#[test]
fn nested_closures() {
	assert_eq!(eval("(def adder (\\ [x] (\\ [y] (+ x y)))) ((adder 3) 4)"), LoValue::Int(7));
}

#[test]
fn list_literal() {
	let expected = LoValue::List(vec![LoValue::Int(1), LoValue::Int(2), LoValue::Int(3), LoValue::Int(4)]);
	assert_eq!(eval("[1 2 3 4]"), expected);
}

#[test]
fn addition_commutes() {
	let samples = ["0", "3", "-3", "1_000", "9223372036854775806", "-9223372036854775807"];
	for a in samples {
		for b in samples {
			let ab = eval(&format!("(+ {} {})", a, b));
			let ba = eval(&format!("(+ {} {})", b, a));
			assert_eq!(ab, ba, "{} + {}", a, b);
		}
	}
}

#[test]
fn redefinition_and_shadowing() {
	for n in 1..5 {
		let src: String = (0..=n).map(|i| format!("(def v {}) ", i)).collect::<String>() + "v";
		assert_eq!(eval(&src), LoValue::Int(n));
	}
	assert_eq!(eval("(def v 1) (defn f [] (def v 2)) (f) v"), LoValue::Int(1));
	assert_eq!(eval("(def v 1) (defn f [v] (def v 3)) (f 2) v"), LoValue::Int(1));
}

#[test]
fn floats_and_separators() {
	assert_eq!(eval("(+ 1.5 1)"), LoValue::Float(2.5));
	assert_eq!(eval("(* 1_000 2)"), LoValue::Int(2000));
	assert_eq!(eval("(/ 1.0 4)").to_string(), "0.25");
	assert_eq!(eval("(+ 0.5 0.5)").to_string(), "1.0");
}

#[test]
fn booleans_are_preset() {
	assert_eq!(eval("true"), LoValue::Bool(true));
	assert_eq!(eval("[true false]").to_string(), "[true false]");
	assert_eq!(eval("(def true 0) true"), LoValue::Int(0));
}

#[test]
fn strings() {
	assert_eq!(eval("(str \"x = \" (+ 1 2))"), LoValue::String("x = 3".to_string()));
	assert_eq!(eval("\"tab\\there\""), LoValue::String("tab\there".to_string()));
}

#[test]
fn print_goes_to_the_sink() {
	let (mut interpreter, buf) = interpreter();
	let res = interpreter.run("(print \"a\" 1) (println [1 2]) (println)", "test");
	assert_eq!(res, Ok(Some(LoValue::List(vec![]))));
	assert_eq!(buf.text(), "a1[1 2]\n\n");
}

#[test]
fn diagnostics_gate_evaluation() {
	let (mut interpreter, buf) = interpreter();
	let res = interpreter.run("(println 1) (+ 1 2.3.4)", "script.lo");
	let diagnostics = res.expect_err("parse should fail");
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].to_string(), "script.lo:1:18: could not parse float `2.3.4`");
	assert_eq!(buf.text(), "");
}

#[test]
fn runtime_errors_are_values() {
	let v = eval("(+ 1 \"a\")");
	assert_eq!(v.get_type(), LoType::Error);
	assert_eq!(v.to_string(), "ERROR: type mismatch in +: expected INTEGER or FLOAT, got STRING");
	assert_eq!(eval("(defn f [x] x) (f)").to_string(), "ERROR: wrong number of arguments to f, got 0, expected 1");
}

#[test]
fn runaway_recursion_is_an_error() {
	let config = LoConfig { max_depth: 100, ..LoConfig::default() };
	let mut interpreter = Interpreter::with_output(&config, Box::new(io::sink()));
	let res = interpreter.run("(defn f [x] (f (+ x 1))) (f 0)", "test");
	assert_eq!(res, Ok(Some(LoValue::Error("maximum recursion depth of 100 exceeded".to_string()))));
}

#[test]
fn nested_literals_share_the_budget() {
	let config = LoConfig { max_depth: 5, ..LoConfig::default() };
	let mut interpreter = Interpreter::with_output(&config, Box::new(io::sink()));
	interpreter.run("(defn f [] [[[[1]]]])", "test").expect("parses");
	assert_eq!(interpreter.run("(f)", "test"), Ok(Some(LoValue::List(vec![eval("[[[1]]]")]))));
	assert_eq!(interpreter.run("(str (f))", "test"), Ok(Some(LoValue::Error("maximum recursion depth of 5 exceeded".to_string()))));
}

#[test]
fn deep_source_is_a_diagnostic() {
	let (mut interpreter, _) = interpreter();
	for src in ["(+ ".repeat(100_000), format!("{}{}", "[".repeat(5000), "]".repeat(5000))] {
		let diagnostics = interpreter.run(&src, "deep.lo").expect_err("too deep to parse");
		assert_eq!(diagnostics[0].message, "nesting too deep, limit is 256");
	}
	let config = LoConfig { max_depth: 3, ..LoConfig::default() };
	let mut interpreter = Interpreter::with_output(&config, Box::new(io::sink()));
	let diagnostics = interpreter.run("[[[[1]]]]", "deep.lo").expect_err("too deep to parse");
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].to_string(), "deep.lo:1:4: nesting too deep, limit is 3");
	assert_eq!(interpreter.run("[[[1]]]", "deep.lo").map(|v| v.is_some()), Ok(true));
}

#[test]
fn empty_program_has_no_value() {
	let (mut interpreter, _) = interpreter();
	assert_eq!(interpreter.run("  ; nothing here\n", "test"), Ok(None));
}

#[test]
fn gc_keeps_live_names() {
	let (mut interpreter, _) = interpreter();
	interpreter.run("(def keep 1)", "test").expect("parses");
	interpreter.gc();
	assert_eq!(interpreter.run("keep", "test"), Ok(Some(LoValue::Int(1))));
}
