//! CLI tool for formatting text files for printing.

use anyhow::{bail, Context, Result};
use clap::Parser;
use printfmt_core::{label_from_path, LayoutConfig, Paginator};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default output directory, relative to the working directory.
const DEFAULT_OUTPUT_DIR: &str = "printed_format";

/// Suffix added to the stem of every formatted file.
const OUTPUT_SUFFIX: &str = "_formatted";

/// Format text files with margins, page breaks, headers and footers.
#[derive(Parser, Debug)]
#[command(name = "printfmt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input text file(s)
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    input: Vec<PathBuf>,

    /// Format every .txt file in the source directory
    #[arg(long)]
    all: bool,

    /// Source directory scanned by --all (default: current directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Output directory (default: printed_format/)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exact output file (single input only)
    #[arg(long, conflicts_with_all = ["all", "output", "print"])]
    output_file: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Header label (default: input file name without extension)
    #[arg(long)]
    label: Option<String>,

    /// JSON layout file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Characters per line
    #[arg(long)]
    page_width: Option<usize>,

    /// Left margin in characters
    #[arg(long)]
    margin_left: Option<usize>,

    /// Right margin in characters
    #[arg(long)]
    margin_right: Option<usize>,

    /// Content lines per page
    #[arg(short = 'l', long)]
    lines_per_page: Option<usize>,

    /// Omit page headers
    #[arg(long)]
    no_header: bool,

    /// Omit page footers
    #[arg(long)]
    no_footer: bool,

    /// Omit page numbers from headers and footers
    #[arg(long)]
    no_page_numbers: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = build_config(&args)?;
    let paginator = Paginator::new(config).context("Invalid page layout")?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let inputs = if args.all {
        let source_dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let files = find_text_files(&source_dir, &output_dir)?;
        if files.is_empty() {
            println!("No text files found in {}", source_dir.display());
            return Ok(());
        }
        if !args.print {
            println!("Found {} text file(s). Formatting for print...\n", files.len());
        }
        files
    } else {
        args.input.clone()
    };

    if args.label.is_some() && inputs.len() > 1 {
        bail!("--label can only be used with a single input file");
    }
    if args.output_file.is_some() && inputs.len() > 1 {
        bail!("--output-file can only be used with a single input file");
    }

    let mut success_count = 0;
    for input_path in &inputs {
        log::info!("Processing: {}", input_path.display());

        let label = args
            .label
            .clone()
            .unwrap_or_else(|| label_from_path(input_path));

        let result = process_file(input_path, &label, &paginator).and_then(|output| {
            if args.print {
                print!("{}", output);
                return Ok(());
            }
            let output_path = match &args.output_file {
                Some(file) => prepare_output_file(file)?,
                None => get_output_path(input_path, &output_dir)?,
            };
            write_output(&output_path, &output)?;
            println!(
                "✓ Formatted: {} -> {}",
                input_path.display(),
                output_path.display()
            );
            Ok(())
        });

        match result {
            Ok(()) => success_count += 1,
            Err(e) => eprintln!("Error formatting {}: {:#}", input_path.display(), e),
        }
    }

    if args.all && !args.print {
        println!(
            "\n✓ Successfully formatted {}/{} file(s)",
            success_count,
            inputs.len()
        );
        println!("  Output folder: {}", output_dir.display());
    }

    if success_count < inputs.len() {
        bail!("{} file(s) failed", inputs.len() - success_count);
    }

    Ok(())
}

/// Build the layout from an optional JSON file and command-line overrides.
fn build_config(args: &Args) -> Result<LayoutConfig> {
    let mut config = match &args.config {
        Some(path) => LayoutConfig::from_json_file(path)
            .with_context(|| format!("Failed to load layout from {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    if let Some(width) = args.page_width {
        config.page_width = width;
    }
    if let Some(left) = args.margin_left {
        config.margin_left = left;
    }
    if let Some(right) = args.margin_right {
        config.margin_right = right;
    }
    if let Some(lines) = args.lines_per_page {
        config = config.with_lines_per_page(lines);
    }
    if args.no_header {
        config.include_header = false;
    }
    if args.no_footer {
        config.include_footer = false;
    }
    if args.no_page_numbers {
        config.include_page_numbers = false;
    }

    Ok(config)
}

/// List `.txt` files in `dir`, skipping earlier output.
fn find_text_files(dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let output_dir = output_dir.canonicalize().ok();
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let already_formatted = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with(OUTPUT_SUFFIX));
        let in_output_dir = match (&output_dir, path.parent().map(Path::canonicalize)) {
            (Some(out), Some(Ok(parent))) => parent == *out,
            _ => false,
        };
        if already_formatted || in_output_dir {
            log::debug!("Skipping {}", path.display());
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Read and format a single text file.
fn process_file(input_path: &Path, label: &str, paginator: &Paginator) -> Result<String> {
    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    log::debug!("  Read {} lines", content.lines().count());

    Ok(paginator.format_with_newline(&content, label))
}

/// Determine the output path for a formatted file, creating its directory.
fn get_output_path(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    Ok(output_dir.join(format!("{}{}.txt", stem, OUTPUT_SUFFIX)))
}

/// Use an explicit output file, creating its parent directory.
fn prepare_output_file(path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create output directory: {}", parent.display())
        })?;
    }
    Ok(path.to_path_buf())
}

/// Write output atomically: a temporary file in the target directory is
/// renamed over the destination once fully written.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    file.persist(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    Ok(())
}
