use std::io::{self, BufRead, Write};
use std::{env, fs, process};

use log::{debug, error, warn};

use lo::{Interpreter, LoConfig, LoDiagnostic};

const CONFIG_PATH: &str = ".lo.toml";

fn load_config() -> (LoConfig, Option<String>) {
	match fs::read_to_string(CONFIG_PATH) {
		Ok(text) => match LoConfig::from_toml(&text) {
			Ok(config) => (config, None),
			Err(err) => (LoConfig::default(), Some(format!("{}: {}", CONFIG_PATH, err))),
		},
		Err(_) => (LoConfig::default(), None),
	}
}

fn print_diagnostics(diagnostics: &[LoDiagnostic]) {
	for d in diagnostics {
		eprintln!("\t{}", d);
	}
}

fn run_files(interpreter: &mut Interpreter, paths: &[String]) {
	let mut last = None;
	for path in paths {
		let text = match fs::read_to_string(path) {
			Ok(text) => text,
			Err(err) => {
				error!("could not read {}: {}", path, err);
				process::exit(1);
			},
		};
		match interpreter.run(&text, path) {
			Ok(v) => last = v.or(last),
			Err(diagnostics) => {
				print_diagnostics(&diagnostics);
				process::exit(1);
			},
		}
	}
	if let Some(v) = last {
		println!("{}", v);
	}
}

fn run_repl(interpreter: &mut Interpreter, prompt: &str) {
	println!("lo v{}", env!("CARGO_PKG_VERSION"));
	println!("builtins: {}", lo::lang::builtin::names().collect::<Vec<_>>().join(" "));
	println!("type '.exit' to exit");
	println!();
	let stdin = io::stdin();
	let mut lines = stdin.lock().lines();
	loop {
		print!("{}", prompt);
		if let Err(err) = io::stdout().flush() {
			warn!("stdout: {}", err);
		}
		let line = match lines.next() {
			Some(Ok(line)) => line,
			Some(Err(err)) => {
				error!("stdin: {}", err);
				break
			},
			None => break,
		};
		if line.trim() == ".exit" {
			break
		}
		match interpreter.run(&line, "repl") {
			Ok(Some(v)) => println!("{}", v),
			Ok(None) => {},
			Err(diagnostics) => print_diagnostics(&diagnostics),
		}
		debug!("gc freed {} name(s)", interpreter.gc());
	}
}

fn main() {
	let (config, config_err) = load_config();
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Warn)
		.filter_module("lo", config.log_filter())
		.parse_default_env()
		.init();
	if let Some(err) = config_err {
		warn!("bad config, using defaults: {}", err);
	}
	let mut interpreter = Interpreter::new(&config);
	let paths: Vec<String> = env::args().skip(1).collect();
	if paths.is_empty() {
		run_repl(&mut interpreter, &config.prompt);
	} else {
		run_files(&mut interpreter, &paths);
	}
}
