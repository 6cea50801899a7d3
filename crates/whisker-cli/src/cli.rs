//! CLI definition and command dispatch for Whisker.
//!
//! This module defines the command-line interface using `clap` and provides
//! the `run()` function that dispatches commands to the engine.
//!
//! ## Configuration Precedence
//!
//! 1. CLI flags (e.g., `--config`, `--data-dir`)
//! 2. Environment variables (`WHISKER_CONFIG`, `WHISKER_DATA_DIR`, ...)
//! 3. Config file (`~/.whisker/config.yaml` or path from `--config`)
//! 4. Built-in defaults

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::ui::{color, format, table, ColorMode, MessageType, Spinner, Style};

use whisker_core::{
    category_description, facts_by_category, seed_categories, GeneratedFact, WhiskerEngine,
    WhiskerError,
};

// ============================================================================
// CLI Definition
// ============================================================================

/// Whisker – searchable cat fact store with TF-IDF similarity search
#[derive(Parser, Debug)]
#[command(name = "whisker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, env = "WHISKER_VERBOSE")]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true, env = "WHISKER_QUIET")]
    pub quiet: bool,

    /// Path to configuration file (default: ~/.whisker/config.yaml)
    #[arg(long, global = true, env = "WHISKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the fact index (default: ~/.whisker/data)
    #[arg(long, global = true, env = "WHISKER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Color output mode
    #[arg(long, global = true, env = "WHISKER_COLOR", value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a fact
    #[command(after_help = r#"EXAMPLES:
    whisker add "Cats sleep 12 to 16 hours a day"
    whisker add "Cats have 32 ear muscles" --meta category=anatomy --meta source=vet
"#)]
    Add {
        /// Fact text
        text: String,

        /// Metadata entry as KEY=VALUE (repeatable)
        #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        meta: Vec<(String, String)>,
    },

    /// Find facts similar to a query
    #[command(after_help = r#"EXAMPLES:
    whisker search "why do cats purr"
    whisker search "hunting at night" --limit 3 --json
"#)]
    Search {
        /// Search query
        query: String,

        /// Maximum number of results (default: search.defaultLimit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List stored facts in insertion order
    List {
        /// Maximum number of facts (default: search.listLimit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the number of stored facts
    Count,

    /// Show index statistics
    Stats {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Import the built-in educational facts
    #[command(after_help = r#"EXAMPLES:
    # Import every seed fact (already stored facts are skipped)
    whisker seed

    # Import one category
    whisker seed --category breeds

    # Show available categories
    whisker seed --categories
"#)]
    Seed {
        /// Only import facts from this category
        #[arg(long, conflicts_with = "categories")]
        category: Option<String>,

        /// List seed categories instead of importing
        #[arg(long)]
        categories: bool,
    },

    /// Generate a fact with the language model and store it
    #[command(after_help = r#"EXAMPLES:
    export ANTHROPIC_API_KEY=...
    whisker generate --topic hunting
"#)]
    Generate {
        /// Topic for the fact (default: general)
        #[arg(long)]
        topic: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate one fact per demo topic
    Demo {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Re-fit the search model over all stored facts
    Reindex,

    /// Delete every stored fact
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{}`", raw)),
    }
}

// ============================================================================
// Run function
// ============================================================================

/// Run the CLI application.
///
/// Returns `ExitCode::SUCCESS` on success, or `ExitCode::FAILURE` on error.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Warnings always; debug only with --verbose
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = format!(
        "whisker_core={0},whisker_db={0},whisker_model={0},whisker_cli={0}",
        log_level
    );

    tracing_subscriber::fmt()
        .with_env_filter(&filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let style = Style::new(cli.color).with_quiet(cli.quiet);

    let engine = match &cli.config {
        Some(config_path) => WhiskerEngine::with_config(config_path),
        None => WhiskerEngine::with_defaults(),
    };

    let mut engine = match engine {
        Ok(engine) => engine,
        Err(e) => {
            let hint = match &cli.config {
                Some(path) => format!("Check your config at {}", path.display()),
                None => "Check your config at ~/.whisker/config.yaml".to_string(),
            };
            eprintln!(
                "{}",
                style.error_with_context(
                    "Failed to initialize Whisker engine",
                    Some(&format!("{:#}", e)),
                    Some(&hint),
                )
            );
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = cli.data_dir {
        engine.set_data_dir(dir);
    }

    let result = match cli.command {
        Command::Add { text, meta } => handle_add(&style, &engine, text, meta),
        Command::Search { query, limit, json } => handle_search(&style, &engine, query, limit, json),
        Command::List { limit, json } => handle_list(&style, &engine, limit, json),
        Command::Count => handle_count(&engine),
        Command::Stats { json } => handle_stats(&style, &engine, json),
        Command::Seed {
            category,
            categories,
        } => {
            if categories {
                handle_seed_categories(&style)
            } else {
                handle_seed(&style, &engine, category)
            }
        }
        Command::Generate { topic, json } => handle_generate(&style, &engine, topic, json),
        Command::Demo { json } => handle_demo(&style, &engine, json),
        Command::Reindex => handle_reindex(&style, &engine),
        Command::Reset { yes } => handle_reset(&style, &engine, yes),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style.message(MessageType::Err, &e.to_string()));
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), WhiskerError> {
    let output = serde_json::to_string_pretty(value).map_err(WhiskerError::Json)?;
    println!("{}", output);
    Ok(())
}

fn handle_add(
    style: &Style,
    engine: &WhiskerEngine,
    text: String,
    meta: Vec<(String, String)>,
) -> Result<(), WhiskerError> {
    let metadata: BTreeMap<String, String> = meta.into_iter().collect();
    let id = engine.add_fact(&text, metadata.clone())?;

    if style.is_quiet() {
        println!("{}", id);
    } else {
        println!("{}", style.message(MessageType::Ok, "Stored fact"));
        println!("{}", style.message_detail("Id", &id));
        if !metadata.is_empty() {
            println!("{}", style.message_detail("Metadata", &format::format_metadata(&metadata)));
        }
    }
    Ok(())
}

fn handle_search(
    style: &Style,
    engine: &WhiskerEngine,
    query: String,
    limit: Option<usize>,
    json: bool,
) -> Result<(), WhiskerError> {
    let hits = engine.search(&query, limit)?;

    if json {
        return print_json(&hits);
    }

    if hits.is_empty() {
        style.info(MessageType::Info, "No similar facts found.");
        if engine.count()? == 0 {
            style.info(
                MessageType::Hint,
                "The store is empty. Run `whisker seed` to import the built-in facts.",
            );
        }
        return Ok(());
    }

    println!("{}", table::render_hits_table(&hits, color::terminal_width()));
    Ok(())
}

fn handle_list(
    style: &Style,
    engine: &WhiskerEngine,
    limit: Option<usize>,
    json: bool,
) -> Result<(), WhiskerError> {
    let items = engine.list(limit)?;

    if json {
        return print_json(&items);
    }

    if items.is_empty() {
        style.info(MessageType::Info, "No facts stored.");
        return Ok(());
    }

    println!("{}", table::render_items_table(&items, color::terminal_width()));
    let total = engine.count()?;
    if total > items.len() {
        style.info(
            MessageType::Info,
            &format!("Showing {} of {} facts. Use --limit to see more.", items.len(), total),
        );
    }
    Ok(())
}

fn handle_count(engine: &WhiskerEngine) -> Result<(), WhiskerError> {
    println!("{}", engine.count()?);
    Ok(())
}

fn handle_stats(style: &Style, engine: &WhiskerEngine, json: bool) -> Result<(), WhiskerError> {
    let stats = engine.stats()?;

    if json {
        return print_json(&stats);
    }

    let data_dir = stats
        .data_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string());
    let generator = if stats.generator_available {
        stats.generation_model.clone()
    } else {
        format!("{} (unavailable)", stats.generation_model)
    };

    println!("{}", style.section("INDEX"));
    println!();
    println!("  {}", style.key_value("Backend", &stats.backend));
    println!("  {}", style.key_value("Data dir", &data_dir));
    println!("  {}", style.key_value("Facts", &stats.total_facts.to_string()));
    let vocabulary = format!("{} / {} terms", stats.vocabulary_size, stats.max_features);
    println!("  {}", style.key_value("Vocabulary", &vocabulary));
    let fitted = if stats.model_fitted { "yes" } else { "no" };
    println!("  {}", style.key_value("Model fitted", fitted));
    println!("  {}", style.key_value("Min similarity", &stats.min_similarity.to_string()));
    println!();
    println!("{}", style.section("GENERATION"));
    println!();
    println!("  {}", style.key_value("Model", &generator));
    Ok(())
}

fn handle_seed_categories(style: &Style) -> Result<(), WhiskerError> {
    let rows: Vec<table::CategoryRow> = seed_categories()
        .into_iter()
        .map(|name| table::CategoryRow {
            name: name.to_string(),
            facts: facts_by_category(name).len(),
            description: category_description(name).unwrap_or_default().to_string(),
        })
        .collect();

    println!("{}", style.section("SEED CATEGORIES"));
    println!();
    println!("{}", table::render_categories_table(&rows));
    Ok(())
}

fn handle_seed(
    style: &Style,
    engine: &WhiskerEngine,
    category: Option<String>,
) -> Result<(), WhiskerError> {
    let result = engine.seed(category.as_deref())?;
    let scope = result.category.as_deref().unwrap_or("all categories");

    if result.added.is_empty() {
        style.info(
            MessageType::Skip,
            &format!("All {} seed facts from {} are already stored", result.skipped, scope),
        );
    } else {
        style.info(
            MessageType::Ok,
            &format!("Imported {} seed facts from {}", result.added.len(), scope),
        );
        if result.skipped > 0 {
            style.info(
                MessageType::Skip,
                &format!("{} already stored", result.skipped),
            );
        }
    }
    Ok(())
}

fn print_generated(style: &Style, fact: &GeneratedFact) {
    let topic = fact.topic.as_deref().unwrap_or("general");
    println!(
        "{}",
        style.message(
            MessageType::Ok,
            &format!("[{}] {} {}", style.fact_id(&fact.id), topic, fact.text)
        )
    );
}

fn handle_generate(
    style: &Style,
    engine: &WhiskerEngine,
    topic: Option<String>,
    json: bool,
) -> Result<(), WhiskerError> {
    let spinner = Spinner::start("Generating fact...", !json && !style.is_quiet());
    let result = engine.generate_fact(topic.as_deref());
    spinner.finish();
    let fact = result?;

    if json {
        return print_json(&fact);
    }

    if style.is_quiet() {
        println!("{}", fact.text);
    } else {
        print_generated(style, &fact);
        println!(
            "{}",
            style.message_detail(
                "Tokens",
                &format!("{} in, {} out", fact.input_tokens, fact.output_tokens)
            )
        );
    }
    Ok(())
}

fn handle_demo(style: &Style, engine: &WhiskerEngine, json: bool) -> Result<(), WhiskerError> {
    let topics = &engine.global_config().generation.demo_topics;
    let spinner = Spinner::start(
        &format!("Generating {} facts...", topics.len()),
        !json && !style.is_quiet(),
    );
    let result = engine.demo();
    spinner.finish();
    let facts = result?;

    if json {
        return print_json(&facts);
    }

    for fact in &facts {
        print_generated(style, fact);
    }
    if facts.len() < topics.len() {
        println!(
            "{}",
            style.message(
                MessageType::Warn,
                &format!("{} of {} topics failed", topics.len() - facts.len(), topics.len())
            )
        );
    }
    Ok(())
}

fn handle_reindex(style: &Style, engine: &WhiskerEngine) -> Result<(), WhiskerError> {
    engine.reindex()?;
    let count = engine.count()?;
    style.info(MessageType::Ok, &format!("Reindexed {} facts", count));
    Ok(())
}

fn handle_reset(style: &Style, engine: &WhiskerEngine, yes: bool) -> Result<(), WhiskerError> {
    if !yes {
        return Err(WhiskerError::InvalidArgument(
            "refusing to delete every fact without --yes".to_string(),
        ));
    }

    let count = engine.count()?;
    engine.reset()?;
    style.info(MessageType::Ok, &format!("Deleted {} facts", count));
    Ok(())
}
