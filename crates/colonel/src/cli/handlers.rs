//! CLI command handlers that bridge between `clap` and the registry

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::ArgMatches;
use colonel::{resolve_color, AnsiRenderer, App};
use colonel_core::{
    config::load_config, ArgumentBounds, ColorMode, Config, Error, LocalSender, RoutingTable,
    SenderKind,
};
use colored::Colorize;
use is_terminal::IsTerminal;
use serde::Serialize;
use tracing::debug;

use crate::cli::commands::build_cli;

/// Format an error for user display (no stack traces)
pub fn format_error(err: &anyhow::Error) -> String {
    let msg = err.to_string();
    if let Some(source) = err.source() {
        let source_msg = source.to_string();
        if !msg.contains(&source_msg) && !source_msg.is_empty() {
            return format!("{msg}\nCause: {source_msg}");
        }
    }
    msg
}

pub fn run_cli() -> Result<()> {
    let matches = build_cli().get_matches();
    let (name, sub_m) = matches
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("No subcommand given"))?;

    init_tracing(sub_m.get_flag("verbose"));

    let config = load(sub_m)?;
    let colorize = resolve_color(config.color);
    colored::control::set_override(colorize);

    let app = App::build(config, AnsiRenderer::new(colorize))?;

    match name {
        "run" => handle_run(sub_m, &app),
        "shell" => handle_shell(&app),
        "list" => handle_list(sub_m, &app),
        "check" => handle_check(&app),
        other => anyhow::bail!("Unknown subcommand: {other}"),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

/// Load configuration and apply the sender and color flags on top.
fn load(sub_m: &ArgMatches) -> Result<Config> {
    let explicit = sub_m.get_one::<String>("config").map(PathBuf::from);
    let mut config = load_config(explicit.as_deref())?;

    if let Some(kind) = sub_m.get_one::<String>("as") {
        config.sender.kind = SenderKind::parse(kind)?;
    }
    if let Some(name) = sub_m.get_one::<String>("sender") {
        config.sender.name.clone_from(name);
    }
    if let Some(permissions) = sub_m.get_many::<String>("permission") {
        config.sender.permissions.extend(permissions.cloned());
    }
    if sub_m.get_flag("op") {
        config.sender.op = true;
    }
    if let Some(mode) = sub_m.get_one::<String>("color") {
        config.color = mode.parse::<ColorMode>()?;
    }

    debug!(
        namespace = %config.namespace,
        sender = %config.sender.name,
        kind = %config.sender.kind,
        commands = config.commands.len(),
        "Configuration loaded"
    );
    Ok(config)
}

fn print_messages(sender: &LocalSender) {
    for message in sender.take_messages() {
        println!("{message}");
    }
}

pub fn handle_run(sub_m: &ArgMatches, app: &App) -> Result<()> {
    let line: Vec<String> = sub_m
        .get_many::<String>("line")
        .map(|parts| parts.cloned().collect())
        .unwrap_or_default();
    let (label, arguments) = line
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("A command line is required"))?;

    let sender = app.config.sender.to_sender();
    let outcome = app.host.dispatch_args(&sender, label, arguments)?;
    debug!(?outcome, "Dispatched command line");
    print_messages(&sender);
    Ok(())
}

pub fn handle_shell(app: &App) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let sender = app.config.sender.to_sender();

    prompt(interactive)?;
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if !line.trim().is_empty() {
            match app.host.dispatch(&sender, &line) {
                Ok(outcome) => debug!(?outcome, "Dispatched command line"),
                Err(Error::NotFound(label)) => println!("Unknown command: {label}"),
                Err(e) => return Err(e.into()),
            }
            print_messages(&sender);
        }
        prompt(interactive)?;
    }
    Ok(())
}

fn prompt(interactive: bool) -> Result<()> {
    if interactive {
        print!("{} ", ">".bold());
        io::stdout().flush().context("Failed to flush stdout")?;
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// LIST
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct CommandSummary {
    name: String,
    aliases: Vec<String>,
    description: String,
    usage: String,
    permission: String,
    executors: Vec<ExecutorSummary>,
    default_executor: Option<DefaultSummary>,
}

#[derive(Debug, Serialize)]
struct ExecutorSummary {
    name: String,
    aliases: Vec<String>,
    permission: String,
    min_arguments: Option<usize>,
    max_arguments: Option<usize>,
}

#[derive(Debug, Serialize)]
struct DefaultSummary {
    method: String,
    executable_by: String,
    min_arguments: Option<usize>,
    max_arguments: Option<usize>,
}

impl CommandSummary {
    fn from_table(table: &RoutingTable) -> Self {
        let header = table.header();
        Self {
            name: header.name.clone(),
            aliases: header.aliases.clone(),
            description: header.description.clone(),
            usage: header.usage.clone(),
            permission: header.permission.clone(),
            executors: table
                .executors()
                .iter()
                .map(|rule| ExecutorSummary {
                    name: rule.meta().name.clone(),
                    aliases: rule.meta().aliases.clone(),
                    permission: rule.meta().permission.clone(),
                    min_arguments: rule.meta().bounds.min,
                    max_arguments: rule.meta().bounds.max,
                })
                .collect(),
            default_executor: table.default_executor().map(|rule| DefaultSummary {
                method: rule.method().to_string(),
                executable_by: rule.meta().executable_by.to_string(),
                min_arguments: rule.meta().bounds.min,
                max_arguments: rule.meta().bounds.max,
            }),
        }
    }
}

fn bounds_text(bounds: ArgumentBounds) -> String {
    let side = |bound: Option<usize>| bound.map_or_else(|| "*".to_string(), |n| n.to_string());
    format!("{}..{} args", side(bounds.min), side(bounds.max))
}

pub fn handle_list(sub_m: &ArgMatches, app: &App) -> Result<()> {
    let tables: Vec<_> = app
        .registry
        .commands()
        .iter()
        .filter_map(|name| app.registry.table(name))
        .collect();

    if sub_m.get_flag("json") {
        let summaries: Vec<CommandSummary> = tables
            .iter()
            .map(|table| CommandSummary::from_table(table))
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if tables.is_empty() {
        println!("No commands declared.");
        return Ok(());
    }

    for table in &tables {
        let header = table.header();
        let aliases = if header.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", header.aliases.join(", "))
        };
        let description = if header.description.is_empty() {
            String::new()
        } else {
            format!(" - {}", header.description)
        };
        println!("{}{aliases}{description}", header.name.bold());

        for rule in table.executors() {
            let meta = rule.meta();
            let aliases = if meta.aliases.is_empty() {
                String::new()
            } else {
                format!(" [{}]", meta.aliases.join(", "))
            };
            println!("  {}{aliases}  {}", meta.name, bounds_text(meta.bounds).dimmed());
        }
        if let Some(rule) = table.default_executor() {
            println!(
                "  {} {} ({})  {}",
                "default:".dimmed(),
                rule.method(),
                rule.meta().executable_by,
                bounds_text(rule.meta().bounds).dimmed()
            );
        }
    }
    Ok(())
}

pub fn handle_check(app: &App) -> Result<()> {
    let count = app.registry.commands().len();
    println!(
        "{} {count} command(s) discovered in namespace '{}'",
        "✓".green(),
        app.registry.namespace()
    );
    Ok(())
}
