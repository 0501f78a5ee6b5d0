mod cli;

use tagscan::{
    config,
    scanner::{sanitize_field_for_sorting, IgnoredArticles, Scanner},
};
use tagscan_common::InMemoryGenreRepository;
use tagscan_db::{pool::init_pool, SqliteGenreRepository};
use tagscan_ffmeta::{check_tool, parse_report, Prober, ProbedInput, DEFAULT_PROGRAM};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::io::Read;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise choose by verbosity
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tagscan=debug,tagscan_ffmeta=debug,tagscan_db=debug,tagscan_common=debug".to_string()
        } else {
            "info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Probe { files, json } => probe_files(&files, json, cli.config.as_deref()),
        Commands::Parse { report } => parse_captured(&report),
        Commands::Scan { files, dry_run } => scan_files(&files, dry_run, cli.config.as_deref()),
        Commands::SortKey { text } => sort_key(&text, cli.config.as_deref()),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("tagscan {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn prober(config: &config::Config) -> Result<Prober> {
    Prober::from_config(config.tools.ffmpeg_path.as_deref())
        .context("ffmpeg is required; install it or set tools.ffmpeg_path")
}

fn probe_files(files: &[PathBuf], json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let inputs = prober(&config)?.probe(files)?;
    print_inputs(&inputs, json)
}

fn parse_captured(report: &str) -> Result<()> {
    let text = if report == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read report from stdin")?;
        text
    } else {
        std::fs::read_to_string(report)
            .with_context(|| format!("Failed to read report file: {:?}", report))?
    };

    print_inputs(&parse_report(&text), true)
}

fn print_inputs(inputs: &[ProbedInput], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(inputs)?);
        return Ok(());
    }

    for input in inputs {
        println!("File: {}", input.path);
        println!("Format: {}", input.format);
        for (key, values) in input.metadata.iter() {
            for value in values {
                println!("  {}: {}", key, value.replace('\n', "\n    "));
            }
        }
        println!();
    }

    Ok(())
}

fn scan_files(files: &[PathBuf], dry_run: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let articles = IgnoredArticles::parse(&config.scanner.ignored_articles);
    let prober = prober(&config)?;

    let media_files = if dry_run {
        Scanner::new(prober, articles, InMemoryGenreRepository::new()).scan(files)?
    } else {
        tracing::info!("Using genre database at {}", config.database.path.display());
        let pool = init_pool(&config.database.path)?;
        Scanner::new(prober, articles, SqliteGenreRepository::new(pool)).scan(files)?
    };

    println!("{}", serde_json::to_string_pretty(&media_files)?);
    Ok(())
}

fn sort_key(text: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let articles = IgnoredArticles::parse(&config.scanner.ignored_articles);
    println!("{}", sanitize_field_for_sorting(text, &articles));
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let name = config
        .tools
        .ffmpeg_path
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    let tool = check_tool(&name);

    let status = if tool.available { "✓" } else { "✗" };
    print!("{} {}", status, tool.name);
    if let Some(ref version) = tool.version {
        print!(" ({})", version);
    }
    if let Some(ref path) = tool.path {
        print!(" - {}", path.display());
    }
    println!("\n");

    if tool.available {
        println!("All required tools are available!");
    } else {
        println!("ffmpeg is missing. Install it to probe files.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Ignored articles: {}", config.scanner.ignored_articles);
    println!("  Database: {}", config.database.path.display());
    match config.tools.ffmpeg_path {
        Some(ref p) => println!("  ffmpeg: {}", p.display()),
        None => println!("  ffmpeg: from PATH"),
    }

    Ok(())
}
