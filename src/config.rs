use log::LevelFilter;
use serde::Deserialize;

use crate::lang::scope::DEFAULT_MAX_DEPTH;

/// interpreter and front end settings, read from `.lo.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoConfig {
	/// how deep lists may nest, in source and while evaluating
	pub max_depth: usize,
	pub prompt: String,
	pub log_level: String,
}

impl Default for LoConfig {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			prompt: ">> ".to_string(),
			log_level: "warn".to_string(),
		}
	}
}

impl LoConfig {
	pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}
	/// unknown level names fall back to warn
	pub fn log_filter(&self) -> LevelFilter {
		self.log_level.parse().unwrap_or(LevelFilter::Warn)
	}
}
