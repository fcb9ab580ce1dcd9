use std::env;
use std::path::PathBuf;

use log::warn;
use rs_markov_core::io::normalize_folder;

pub const HOST_VAR: &str = "RS_MARKOV_HOST";
pub const PORT_VAR: &str = "RS_MARKOV_PORT";
pub const DATA_VAR: &str = "RS_MARKOV_DATA";

/// Server settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
	/// Address to bind.
	pub host: String,

	/// Port to bind.
	pub port: u16,

	/// Folder holding the `*.txt` corpora.
	pub data_folder: PathBuf,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			data_folder: PathBuf::from("./data"),
		}
	}
}

impl ServerConfig {
	/// Builds the configuration from the environment, falling back to the
	/// defaults for unset or invalid values.
	pub fn from_env() -> Self {
		Self::from_lookup(|name| env::var(name).ok())
	}

	fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
		let mut config = Self::default();

		if let Some(host) = lookup(HOST_VAR) {
			config.host = host;
		}
		if let Some(port) = lookup(PORT_VAR) {
			match port.parse() {
				Ok(port) => config.port = port,
				Err(_) => warn!("Invalid {} '{}', using {}", PORT_VAR, port, config.port),
			}
		}
		if let Some(folder) = lookup(DATA_VAR) {
			config.data_folder = normalize_folder(&folder);
		}

		config
	}
}
