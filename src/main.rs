//! cdoc: generate documentation from C source files without parsing C.
//!
//! Two modes:
//!
//! - stdout mode: `cdoc file.c`, `cdoc -f json src/*.c`
//! - bulk mode: `cdoc -R src -o docs` walks a tree and writes a
//!   text/json/html triple per file plus an index page.

mod bulk;
mod model;
mod render;
mod scanner;

use anyhow::{bail, Context, Result};
use clap::Parser;
use render::RenderConfig;
use scanner::ScanOptions;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "cdoc",
    version,
    about = "Generate documentation from C source files"
)]
struct Cli {
    /// Input files (glob patterns supported)
    files: Vec<String>,

    /// Output format: text, json, or html
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Disable ANSI colors in text output
    #[arg(long)]
    no_color: bool,

    /// Recursively document every .c file under the given directory
    #[arg(short = 'R', long, value_name = "DIR")]
    recursive: Option<PathBuf>,

    /// Output directory for bulk mode
    #[arg(short = 'o', long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Per-file entity cap
    #[arg(long, default_value_t = scanner::MAX_ENTITIES)]
    max_entities: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = ScanOptions {
        max_entities: cli.max_entities,
    };

    if let Some(ref root) = cli.recursive {
        let out_dir = cli
            .output
            .as_deref()
            .context("--output is required with --recursive")?;
        bulk::process_directory(root, out_dir, &options)?;
        return Ok(());
    }

    if cli.files.is_empty() {
        bail!("no input files (try --help)");
    }

    let config = RenderConfig {
        color: color_enabled(&cli),
    };
    let renderer = render::create_renderer(&cli.format, &config)?;

    for path in expand_globs(&cli.files)? {
        let doc = scanner::scan_file(&path, &options)?;
        print!("{}", renderer.render(&doc));
    }
    Ok(())
}

/// Colors are on unless disabled by flag or the NO_COLOR environment
/// variable.
fn color_enabled(cli: &Cli) -> bool {
    if cli.no_color {
        return false;
    }
    std::env::var_os("NO_COLOR").is_none()
}

/// Expand glob patterns into a list of real file paths.
/// Bare directories are scanned (non-recursively) for .c files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("c") {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["cdoc", "f.c"]);
        assert_eq!(cli.format, "text");
        assert_eq!(cli.max_entities, scanner::MAX_ENTITIES);
        assert!(!cli.no_color);
        assert!(cli.recursive.is_none());
    }

    #[test]
    fn no_color_flag_wins() {
        let cli = Cli::parse_from(["cdoc", "--no-color", "f.c"]);
        assert!(!color_enabled(&cli));
    }

    #[test]
    fn recursive_takes_a_directory() {
        let cli = Cli::parse_from(["cdoc", "-R", "src", "-o", "docs"]);
        assert_eq!(cli.recursive.as_deref(), Some(Path::new("src")));
        assert_eq!(cli.output.as_deref(), Some(Path::new("docs")));
    }
}
