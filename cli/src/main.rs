//! CLI entrypoint for mafia-modtool
//!
//! This is the main binary that wires together all layers: config,
//! page source selection, the scan use case, and the console reporter.

use anyhow::Result;
use clap::Parser;
use modtool_application::{ScanGame, ScanOptions};
use modtool_domain::render;
use modtool_infrastructure::{ConfigLoader, FilePageSource, ForumClient};
use modtool_presentation::{
    Cli, ConsoleReporter, Theme, deadline_hint, disable_color, format_count,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // Logs go to stderr; stdout carries only the scan output, so the
    // final vote count stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if cli.no_color || !config.display.color {
        disable_color();
    }

    let mod_name = cli.modname.clone().or_else(|| config.game.mod_name.clone());
    if cli.votecount && mod_name.is_none() && !cli.quiet {
        println!(
            "NOTE: votecount was requested, but modname was unspecified. \
             Moderator will be inferred from the initial vote count post."
        );
    }

    let options = ScanOptions {
        start_post: cli.start,
        end_post: cli.end,
        page_size: config.forum.page_size,
        count_votes: cli.votecount,
        mod_name,
        deadline: cli.deadline.clone().or_else(|| config.game.deadline.clone()),
        rules: config.rules,
    };

    let reporter = ConsoleReporter::new(Theme::from_name(&config.display.theme), cli.quiet);

    info!(game = %cli.game, "starting scan");
    let outcome = if cli.game.starts_with("http://") || cli.game.starts_with("https://") {
        let source = ForumClient::from_url(
            &cli.game,
            config.forum.page_size,
            &config.forum.user_agent,
        )?;
        ScanGame::new(Arc::new(source), options.clone())
            .execute(&reporter)
            .await?
    } else {
        let source = FilePageSource::new(&cli.game);
        ScanGame::new(Arc::new(source), options.clone())
            .execute(&reporter)
            .await?
    };
    reporter.finish();

    if cli.votecount && !outcome.ledger.is_empty() {
        let count = render(
            &outcome.ledger,
            outcome.day,
            outcome.round,
            options.deadline.as_deref(),
        );
        println!("{}", "=".repeat(50));
        println!();
        let backlink = cli.backlink.then_some(outcome.seeded_from).flatten();
        println!("{}", format_count(&count, cli.output, backlink));
        if let Some(hint) = options.deadline.as_deref().and_then(deadline_hint) {
            println!();
            println!("{}", hint);
        }
    }

    Ok(())
}
