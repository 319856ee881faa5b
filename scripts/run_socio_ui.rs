//! Runs the SocioAI relay: Langflow upstream, chart projection, web UI.

use clap::Parser;
use socio_adaptor_web::{WebUiConfig, WebUiServer};
use socio_core::utils::logger::init_logging;
use socio_core::{load_env, load_env_from_path, ChartConfig};
use socio_provider_langflow::LangflowClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "run-socio-ui", about = "SocioAI chat relay and web UI")]
struct Cli {
    /// Log filter, e.g. `info` or `socio_core=debug`
    #[arg(long)]
    log_level: Option<String>,

    /// Bind host (overrides SOCIO_UI_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides SOCIO_UI_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Load environment from this file instead of `.env`
    #[arg(long)]
    env_file: Option<PathBuf>,
}

fn main() -> socio_core::Result<()> {
    let cli = Cli::parse();

    let env_result = match &cli.env_file {
        Some(path) => load_env_from_path(path),
        None => load_env(),
    };
    if let Some(level) = &cli.log_level {
        std::env::set_var("RUST_LOG", level);
        std::env::set_var("SOCIO_LOG_LEVEL", level);
    }
    init_logging();
    env_result?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        let flow = LangflowClient::from_env()?;
        info!(
            "Using Langflow flow {} endpoint {}",
            flow.config().flow_id,
            flow.config().endpoint
        );

        let chart_config = ChartConfig::from_env();
        chart_config.validate()?;

        let mut ui_config = WebUiConfig::from_env();
        if let Some(host) = cli.host {
            ui_config.host = host;
        }
        if let Some(port) = cli.port {
            ui_config.port = port;
        }

        WebUiServer::new(ui_config, Arc::new(flow), chart_config)
            .run_until_ctrl_c()
            .await
    })
}
