//! `leadbox` - CLI for the local lead store
//!
//! `submit` records an application the way the landing-page form would; the
//! other commands form the admin console.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;

use leadbox::cli::{
    ClearCommand, Cli, Command, ConfigCommand, ExportCommand, ListCommand, OutputFormat,
    StatsCommand,
};
use leadbox::{
    init_logging, AdminConsole, Config, DisplayZone, LeadStore, Notice, RecordStore,
    SqliteBackend, SubmissionForm,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;
    let zone = config.display_zone();

    match cli.command {
        Command::Submit(submit_cmd) => {
            let store = open_store(&config)?;
            match SubmissionForm::new(&store).submit(submit_cmd.into()) {
                Ok((lead, notice)) => {
                    print_notice(&notice);
                    println!("id: {}", lead.id);
                }
                Err(e) if e.is_user_error() => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::List(list_cmd) => {
            let store = open_store(&config)?;
            handle_list(&AdminConsole::new(&store, zone), &list_cmd)?;
        }
        Command::Delete(delete_cmd) => {
            let store = open_store(&config)?;
            print_notice(&AdminConsole::new(&store, zone).delete(delete_cmd.id)?);
        }
        Command::Clear(clear_cmd) => {
            let store = open_store(&config)?;
            handle_clear(&AdminConsole::new(&store, zone), &clear_cmd)?;
        }
        Command::Export(export_cmd) => {
            let store = open_store(&config)?;
            handle_export(&AdminConsole::new(&store, zone), &config, export_cmd)?;
        }
        Command::Stats(stats_cmd) => {
            let store = open_store(&config)?;
            handle_stats(&store, zone, &stats_cmd)?;
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd)?,
    }
    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<LeadStore<SqliteBackend>> {
    let path = config.database_path();
    let backend = SqliteBackend::open(&path)
        .with_context(|| format!("opening lead database {}", path.display()))?;
    Ok(LeadStore::with_key(backend, config.storage.key.clone()))
}

fn print_notice(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{notice}");
    } else {
        println!("{notice}");
    }
}

fn handle_list<S: RecordStore>(console: &AdminConsole<S>, cmd: &ListCommand) -> anyhow::Result<()> {
    let leads = console.applications();
    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&leads)?),
        OutputFormat::Table => println!("{}", console.render_table(&leads).trim_end()),
        OutputFormat::Plain => println!("{}", console.render_plain(&leads).trim_end()),
    }
    Ok(())
}

/// Ask on stdin; anything but an explicit yes declines.
fn prompt_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "д" | "да"
    )
}

fn handle_clear<S: RecordStore>(console: &AdminConsole<S>, cmd: &ClearCommand) -> anyhow::Result<()> {
    let outcome = if cmd.yes {
        console.clear_all(&mut |_: &str| true)?
    } else {
        console.clear_all(&mut prompt_stdin)?
    };
    match outcome {
        Some(notice) => print_notice(&notice),
        None => println!("Cancelled."),
    }
    Ok(())
}

fn handle_export<S: RecordStore>(
    console: &AdminConsole<S>,
    config: &Config,
    cmd: ExportCommand,
) -> anyhow::Result<()> {
    let dir = cmd.output.unwrap_or_else(|| config.output_dir());
    let outcome = console.export_csv(&dir, Utc::now())?;
    print_notice(&outcome.notice());
    if let Some(path) = outcome.path() {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_stats(
    store: &LeadStore<SqliteBackend>,
    zone: DisplayZone,
    cmd: &StatsCommand,
) -> anyhow::Result<()> {
    let console = AdminConsole::new(store, zone);
    let summary = console.summary(Utc::now());
    let storage = store.backend().stats()?;

    if cmd.json {
        let status = serde_json::json!({
            "total": summary.total,
            "today": summary.today,
            "database_path": store.backend().path(),
            "storage_key": store.key(),
            "stored_keys": storage.total_keys,
            "value_bytes": storage.value_bytes,
            "database_bytes": storage.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Всего заявок:  {}", summary.total);
        println!("Сегодня:       {}", summary.today);
        println!();
        println!("Database:      {}", store.backend().path().display());
        println!("Storage key:   {}", store.key());
        println!("Stored keys:   {}", storage.total_keys);
        println!("Value size:    {} bytes", storage.value_bytes);
        println!("File size:     {} bytes", storage.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Key:                {}", config.storage.key);
                println!();
                println!("[Export]");
                println!("  Output directory:   {}", config.output_dir().display());
                match config.export.utc_offset_minutes {
                    Some(minutes) => println!("  UTC offset (min):   {minutes}"),
                    None => println!("  UTC offset (min):   local"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
