use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use exif_codec::{config, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "exif-codec",
    version,
    about = "Inspect EXIF blocks in JPEG files and raw .exif dumps, and rewrite their user comments"
)]
struct Cli {
    /// Files or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Render values in brief form
    #[arg(long)]
    brief: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Check that each block re-serializes to identical bytes
    #[arg(long)]
    verify: bool,

    /// Replace the UserComment of each file with this text
    #[arg(long = "set-comment", value_name = "TEXT")]
    set_comment: Option<String>,

    /// Character-code label stored with --set-comment
    #[arg(long, value_name = "LABEL", default_value = "ASCII")]
    encoding: String,

    /// Preview changes without writing to files
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    // Load config, then let flags override it
    let mut config = config::Config::load(cli.config.as_deref())?;
    config.output.brief |= cli.brief;
    config.output.json |= cli.json;
    config.output.verify_round_trip |= cli.verify;
    config.output.dry_run |= cli.dry_run;

    let files = pipeline::collect_files(&cli.paths);
    if files.is_empty() {
        anyhow::bail!("No supported files found in the specified paths.");
    }
    log::info!("Found {} file(s) to process", files.len());

    if let Some(ref comment) = cli.set_comment {
        return rewrite_comments(&files, comment, &cli.encoding, &config);
    }

    let mut results = Vec::new();
    for path in &files {
        let result = pipeline::inspect_file(path, &config);
        if !config.output.json {
            print_result(&result);
        }
        results.push(result);
    }

    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let mismatched = results
        .iter()
        .filter(|r| r.round_trip_ok == Some(false))
        .count();
    log::info!(
        "Done: {} succeeded, {failed} failed out of {} files",
        results.len() - failed,
        results.len()
    );
    if mismatched > 0 {
        anyhow::bail!("{mismatched} file(s) did not round-trip");
    }

    Ok(())
}

fn rewrite_comments(
    files: &[PathBuf],
    comment: &str,
    encoding: &str,
    config: &config::Config,
) -> Result<()> {
    if config.output.dry_run {
        log::info!("DRY RUN: no files will be modified");
    }

    let total = files.len();
    let mut failed = 0;
    for (i, path) in files.iter().enumerate() {
        log::info!("[{}/{}] Processing: {}", i + 1, total, path.display());
        match pipeline::set_user_comment(path, comment, encoding, config) {
            Ok(result) => {
                if let Some(ref previous) = result.previous {
                    log::info!("  Replaced: {previous}");
                }
                if result.written {
                    log::info!("  Wrote {} bytes of EXIF data", result.size);
                } else {
                    log::info!("  Would write {} bytes of EXIF data", result.size);
                }
            }
            Err(e) => {
                log::error!("  Error: {e:#}");
                failed += 1;
            }
        }
    }

    log::info!("Done: {} succeeded, {failed} failed out of {total} files", total - failed);
    if failed > 0 {
        anyhow::bail!("{failed} file(s) could not be rewritten");
    }
    Ok(())
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Max width for the value column before wrapping.
const VAL_WIDTH: usize = 46;
/// Indent for continuation lines (tag column width + " : " = 25 chars + 2 leading spaces).
const INDENT: &str = "                           ";

/// Print one inspection result, entries grouped by IFD.
fn print_result(result: &pipeline::InspectResult) {
    println!();
    println!("{BOLD}File:{RESET} {}", result.path.display());
    println!("{DIM}{}{RESET}", "═".repeat(72));

    if let Some(ref err) = result.error {
        println!("  {RED}{err}{RESET}");
        println!();
        return;
    }

    if let (Some(size), Some(order)) = (result.size, result.byte_order) {
        println!("  {DIM}{size} bytes, {order:?} endian{RESET}");
    }

    let mut current = None;
    for entry in &result.entries {
        if current != Some(entry.ifd) {
            current = Some(entry.ifd);
            println!("  {BOLD}{}{RESET}", entry.ifd);
            println!("  {DIM}{}{RESET}", "─".repeat(70));
        }
        let label = match entry.name {
            Some(name) => name.to_string(),
            None => format!("0x{:04X}", entry.tag),
        };
        print_row(&label, &entry.text);
    }

    if result.entries.is_empty() {
        println!("  {DIM}(no entries){RESET}");
    }
    match result.round_trip_ok {
        Some(true) => println!("  {DIM}round trip: identical{RESET}"),
        Some(false) => println!("  {RED}round trip: bytes differ{RESET}"),
        None => {}
    }
    println!();
}

/// Print a single row in the entry table.
fn print_row(tag: &str, val: &str) {
    let tag_col = format!("{:<22}", tag);
    let lines = wrap_text(val, VAL_WIDTH);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            println!("  {tag_col} : {line}");
        } else {
            println!("  {INDENT}{line}");
        }
    }
}

/// Wrap text at word boundaries to fit within max_width.
fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in s.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(s.to_string());
    }

    lines
}
