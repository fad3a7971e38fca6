//! CLI definitions for the sensornet host binary.

use clap::{Parser, ValueEnum};

/// Deployment role selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Role {
    /// Sensor-node client defaults
    Client,
    /// Host server defaults (default)
    #[default]
    Host,
}

impl Role {
    /// The config file conventionally used for this role.
    pub fn default_config_path(self) -> &'static str {
        match self {
            Role::Client => "config/client_config.yaml",
            Role::Host => "config/host_config.yaml",
        }
    }
}

/// IoT sensor network host server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to the role's conventional path)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to a dotenv-style file supplying environment variables
    #[arg(short, long, default_value = "config/.env")]
    pub env_file: String,

    /// Deployment role whose default profile fills unset keys
    #[arg(short, long, value_enum, default_value = "host")]
    pub role: Role,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: String,
}

impl Cli {
    /// The effective config path: `--config` if given, otherwise the path
    /// conventional for the selected role.
    pub fn config_path(&self) -> String {
        self.config
            .clone()
            .unwrap_or_else(|| self.role.default_config_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_follows_role() {
        let cli = Cli::parse_from(["sensornet-host"]);
        assert_eq!(cli.config_path(), "config/host_config.yaml");

        let cli = Cli::parse_from(["sensornet-host", "--role", "client"]);
        assert_eq!(cli.config_path(), "config/client_config.yaml");
    }

    #[test]
    fn test_explicit_config_wins_over_role() {
        let cli = Cli::parse_from([
            "sensornet-host",
            "--role",
            "client",
            "--config",
            "custom.yaml",
        ]);
        assert_eq!(cli.config_path(), "custom.yaml");
    }
}
