use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cosmwasm_boundary::{BoundaryConfig, Env, FixedGas, HostBoundary, Trusted};

#[derive(Parser)]
#[command(name = "boundary")]
#[command(about = "Inspect payloads crossing the CosmWasm host/guest boundary")]
#[command(version)]
pub struct Cli {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate an environment JSON file and print its canonical encoding
    EncodeEnv {
        /// Environment JSON file
        file: PathBuf,
    },
    /// Decode and verify a guest response to init/handle
    DecodeResponse {
        /// Guest response JSON file
        file: PathBuf,
        /// Environment the call ran with
        #[arg(long)]
        env: PathBuf,
        /// Gas reported by the host's meter
        #[arg(long, default_value_t = 0)]
        gas_used: u64,
    },
    /// Decode a guest response to a query
    DecodeQuery {
        /// Guest query response JSON file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("cosmwasm_boundary={},boundary={}", cli.log_level, cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => {
            let config = BoundaryConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => BoundaryConfig::default(),
    };
    let boundary = HostBoundary::from_config(config)?;

    match cli.command {
        Commands::EncodeEnv { file } => {
            let env = load_env(&boundary, &file)?;
            let bytes = boundary.encode_env(&env)?;
            println!("{}", String::from_utf8(bytes)?);
        }
        Commands::DecodeResponse { file, env, gas_used } => {
            let env = load_env(&boundary, &env)?;
            let bytes = read(&file)?;
            let verified = boundary.decode_execute(&env, bytes, &FixedGas(gas_used))?;
            println!("{}", serde_json::to_string_pretty(&*verified)?);
        }
        Commands::DecodeQuery { file } => {
            let data = boundary.decode_query(read(&file)?)?;
            println!("{}", data.to_base64());
        }
    }

    Ok(())
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn load_env(boundary: &HostBoundary, path: &Path) -> anyhow::Result<Trusted<Env>> {
    let env = Env::decode(&read(path)?)?;
    info!("Loaded env for {} at height {}", env.block.chain_id, env.block.height);
    let env = boundary.assemble_env(env.block, env.message, env.contract, env.key)?;
    Ok(env)
}
