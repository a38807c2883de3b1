use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::connector::adapter::firestore::{DEFAULT_BASE_URL, DEFAULT_DATABASE};
use crate::domain::DEFAULT_RECOGNITION_THRESHOLD;
use crate::{ContainerConfig, FirestoreConfig};

#[derive(Parser)]
#[command(name = "facematch")]
#[command(author, version, about = "Face embedding registration and recognition API", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep users and embeddings in process memory instead of Firestore
    #[arg(long, global = true)]
    pub memory_storage: bool,

    /// Minimum cosine similarity for a face to be recognized
    #[arg(long, global = true, env = "FACEMATCH_THRESHOLD",
          default_value_t = DEFAULT_RECOGNITION_THRESHOLD, value_parser = parse_threshold)]
    pub threshold: f64,

    /// Firestore project; defaults to the one in the service account key
    #[arg(long, global = true, env = "FIRESTORE_PROJECT_ID")]
    pub project_id: Option<String>,

    #[arg(long, global = true, env = "FIRESTORE_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Service account key file, used when no inline credentials are given
    #[arg(long, global = true, env = "FIREBASE_CREDS_PATH", default_value = "serviceAccountKey.json")]
    pub credentials: PathBuf,

    /// Service account key as a JSON string
    #[arg(long, global = true, env = "FIREBASE_CREDS_JSON", hide_env_values = true)]
    pub credentials_json: Option<String>,

    /// Pre-minted OAuth access token (requires --project-id)
    #[arg(long, global = true, env = "FIRESTORE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// host:port of a Firestore emulator
    #[arg(long, global = true, env = "FIRESTORE_EMULATOR_HOST")]
    pub emulator_host: Option<String>,

    #[arg(long, global = true, env = "FIRESTORE_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub firestore_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        #[arg(long, env = "FACEMATCH_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        #[arg(short, long, env = "PORT", default_value_t = 8000)]
        port: u16,
    },

    /// Count registered users and embeddings
    Stats,
}

impl Cli {
    /// `RUST_LOG` when set, otherwise INFO (DEBUG with `--verbose`).
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_log_level()))
    }

    fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    pub fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            memory_storage: self.memory_storage,
            threshold: self.threshold,
            firestore: FirestoreConfig {
                project_id: self.project_id.clone(),
                database: self.database.clone(),
                base_url: self.firestore_url.clone(),
                credentials_json: self.credentials_json.clone(),
                credentials_path: self.credentials.clone(),
                access_token: self.access_token.clone(),
                emulator_host: self.emulator_host.clone(),
            },
        }
    }
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("threshold must be between 0 and 1, got {}", value));
    }
    Ok(value)
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn serve_accepts_host_and_port() {
        let cli = Cli::try_parse_from([
            "facematch",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.to_string(), "127.0.0.1");
                assert_eq!(port, 9090);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "facematch",
            "stats",
            "--memory-storage",
            "--threshold",
            "0.65",
        ])
        .unwrap();
        assert!(cli.memory_storage);
        assert_eq!(cli.threshold, 0.65);

        let config = cli.container_config();
        assert!(config.memory_storage);
        assert_eq!(config.threshold, 0.65);
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["facematch", "--threshold", "1.5", "stats"]).is_err());
        assert!(Cli::try_parse_from(["facematch", "--threshold", "abc", "stats"]).is_err());
    }

    #[test]
    fn verbose_raises_default_log_level() {
        let cli = Cli::try_parse_from(["facematch", "stats"]).unwrap();
        assert_eq!(cli.default_log_level(), "info");

        let cli = Cli::try_parse_from(["facematch", "-v", "stats"]).unwrap();
        assert_eq!(cli.default_log_level(), "debug");
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["facematch"]).is_err());
    }
}
