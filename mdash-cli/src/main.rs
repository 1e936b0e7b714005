//! mdash CLI - command line access to the macro-indicator dashboard backend.

use clap::Parser;
use log::debug;
use mdash_client::ClientConfig;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "mdash-cli",
    version,
    about = "Macro-indicator dashboard toolkit"
)]
struct Cli {
    /// Backend origin
    #[arg(long, global = true, default_value = "http://localhost:5000")]
    api_base: String,

    /// Per-request timeout in seconds; 0 disables it
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: mdash_cmd::Command,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let timeout = match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        ClientConfig::new(self.api_base.clone())
            .with_timeout(timeout)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.client_config();
    debug!("using backend {}", config.base_url);
    mdash_cmd::run(config, cli.command).await
}
