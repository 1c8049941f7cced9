use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lrl",
    about = "Land Registry Ledger — property registry and transfer audit service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the LRL HTTP server
    Serve(ServeArgs),
    /// Run a scripted register → verify → transfer walkthrough
    Demo(DemoArgs),
    /// Cross-check a ledger journal against its log and indexes
    Audit(AuditArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Bind address (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Admin address, 0x-prefixed hex (overrides the config file)
    #[arg(long)]
    pub admin: Option<String>,

    /// Ledger journal path; omit for in-memory state
    #[arg(long)]
    pub journal: Option<PathBuf>,

    /// Require a stored sender KYC profile for transfers
    #[arg(long)]
    pub require_kyc: bool,
}

#[derive(Args)]
pub struct DemoArgs {}

#[derive(Args)]
pub struct AuditArgs {
    /// Ledger journal path
    #[arg(long)]
    pub journal: PathBuf,
}
