use super::print::write_result;
use super::setup::{Cli, Commands};
use super::shell;
use clap::Parser;
use digicol::api::{CmdResult, ConfigAction};
use digicol::error::Result;
use digicol::init::{initialize, FileApi};
use digicol::validate::{RawRecord, RawStats};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: FileApi,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        None | Some(Commands::Menu) => handle_menu(&mut ctx),
        Some(Commands::Add {
            name,
            category,
            year,
            creator,
            rating,
            power,
            popularity,
            views,
            rarity,
        }) => {
            let raw_record = RawRecord {
                name,
                category,
                year,
                creator,
                rating,
            };
            let raw_stats = RawStats {
                power,
                popularity,
                views,
                rarity,
            };
            handle_add(&mut ctx, &raw_record, &raw_stats)
        }
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Search { term }) => handle_search(&ctx, &term),
        Some(Commands::Stats { id, name }) => handle_stats(&ctx, id, name),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        // Stores are created during context setup; nothing left to do.
        Some(Commands::Init) => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.data_dir.as_deref(), cli.global)?;
    let mut api = ctx.api;

    // Fatal when the store files cannot be created.
    let created = api.init()?;
    emit(&created)?;

    if ctx.config.seed_examples {
        match api.seed(ctx.config.seed_threshold) {
            Ok(seeded) => emit(&seeded)?,
            Err(e) => tracing::warn!(error = %e, "seeding skipped"),
        }
    }

    Ok(AppContext { api })
}

fn emit(result: &CmdResult) -> Result<()> {
    write_result(&mut io::stdout().lock(), result)?;
    Ok(())
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    shell::exit_on_interrupt();
    let stdin = io::stdin();
    shell::run(&mut ctx.api, stdin.lock(), io::stdout())?;
    Ok(())
}

fn handle_add(ctx: &mut AppContext, raw_record: &RawRecord, raw_stats: &RawStats) -> Result<()> {
    let result = ctx.api.add_item(raw_record, raw_stats)?;
    emit(&result)
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_records()?;
    emit(&result)
}

fn handle_search(ctx: &AppContext, term: &str) -> Result<()> {
    let result = ctx.api.search_records(term)?;
    emit(&result)
}

fn handle_stats(ctx: &AppContext, id: Option<String>, name: Option<String>) -> Result<()> {
    let result = match (id, name) {
        (Some(id), _) => ctx.api.stats_by_id(&id)?,
        (None, Some(name)) => ctx.api.stats_by_name(&name)?,
        // clap requires one of the two
        (None, None) => CmdResult::default(),
    };
    emit(&result)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config(action)?;
    emit(&result)
}
