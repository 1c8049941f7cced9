use std::sync::Arc;

use colored::Colorize;

use lrl_advisory::{HeuristicSummarizer, HistorySummarizer};
use lrl_ledger::{InMemoryLedger, JournalLedger, LedgerAuditor, SyncMode};
use lrl_registry::{Registry, RegistryConfig};
use lrl_server::{LrlServer, ServerConfig};
use lrl_types::Address;

use crate::cli::{AuditArgs, Cli, Command, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Demo(_) => cmd_demo(),
        Command::Audit(args) => cmd_audit(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(admin) = &args.admin {
        config.admin = Address::from_hex(admin)?;
    }
    if let Some(journal) = args.journal {
        config.journal_path = Some(journal);
    }
    if args.require_kyc {
        config.require_kyc = true;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(LrlServer::new(config).serve())?;
    Ok(())
}

fn cmd_demo() -> anyhow::Result<()> {
    let admin = Address::ephemeral();
    let alice = Address::ephemeral();
    let bob = Address::ephemeral();
    let registry = Registry::new(
        Arc::new(InMemoryLedger::new()),
        RegistryConfig::new(admin),
    );

    println!("{}", "LRL demo — register, verify, transfer".bold());
    println!("  admin: {}", admin.to_hex().cyan());
    println!("  alice: {}", alice.to_hex().cyan());
    println!("  bob:   {}", bob.to_hex().cyan());

    let property =
        registry.register_property(alice, "PN-100", "12 Harbor Lane", "doc:demo")?;
    println!(
        "{} property {} registered to {}",
        "✓".green().bold(),
        property.id.to_string().yellow(),
        alice.short()
    );

    match registry.transfer_ownership(alice, property.id, bob) {
        Err(e) => println!("{} transfer refused: {}", "✗".red().bold(), e),
        Ok(_) => println!("{} unexpected transfer of unverified property", "✗".red()),
    }

    registry.verify_property(admin, property.id)?;
    println!("{} property {} verified by admin", "✓".green().bold(), property.id);

    let outbound = registry.transfer_ownership(alice, property.id, bob)?;
    println!(
        "{} transferred to {} ({})",
        "✓".green().bold(),
        bob.short(),
        outbound.tx_ref.short().cyan()
    );

    let inbound = registry.transfer_ownership(bob, property.id, alice)?;
    println!(
        "{} transferred back to {} ({})",
        "✓".green().bold(),
        alice.short(),
        inbound.tx_ref.short().cyan()
    );

    let history = registry.transaction_history_for(property.id)?;
    println!("\nHistory for property {}:", property.id.to_string().yellow());
    for (position, record) in history.iter().enumerate() {
        println!(
            "  {position}. {} → {}  {}",
            record.sender.short(),
            record.receiver.short(),
            record.tx_ref.short().cyan()
        );
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let narrative = runtime.block_on(HeuristicSummarizer.summarize(property.id, &history))?;
    println!("\n{} {}", "advisory:".bold(), narrative);

    Ok(())
}

fn cmd_audit(args: AuditArgs) -> anyhow::Result<()> {
    let ledger = JournalLedger::open(&args.journal, SyncMode::EveryWrite)?;
    let report = LedgerAuditor::audit(&ledger)?;

    println!(
        "Audited {} properties, {} transfer records.",
        report.properties.to_string().bold(),
        report.records.to_string().bold()
    );
    if report.is_valid() {
        println!("{} ledger is consistent", "✓".green().bold());
        return Ok(());
    }
    for violation in &report.violations {
        match violation.position {
            Some(position) => {
                println!("{} [log {position}] {}", "✗".red().bold(), violation.description)
            }
            None => println!("{} {}", "✗".red().bold(), violation.description),
        }
    }
    anyhow::bail!("{} violation(s) found", report.violations.len())
}
