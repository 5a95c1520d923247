//! Bulk mode: walk a directory tree and write a text/json/html triple for
//! every C file, plus an index page linking them all.

use crate::model::Document;
use crate::render::html::html_escape;
use crate::render::{self, RenderConfig};
use crate::scanner::{self, ScanOptions};
use anyhow::{ensure, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Document every `.c` file under `root` into `out_dir`. A file that
/// fails to scan is reported and skipped; the batch keeps going. Returns
/// the number of files documented.
pub fn process_directory(root: &Path, out_dir: &Path, options: &ScanOptions) -> Result<usize> {
    ensure!(root.is_dir(), "'{}' is not a directory", root.display());

    for sub in ["txt", "json", "html"] {
        let dir = out_dir.join(sub);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut sources = Vec::new();
    collect_sources(root, &mut sources);
    sources.sort();

    let mut rows = Vec::new();
    for path in &sources {
        let rel = relative_name(root, path);
        let base = output_base(&rel);
        match document_file(path, out_dir, &base, options) {
            Ok(()) => rows.push((rel, base)),
            Err(err) => eprintln!("warning: skipping {}: {:#}", path.display(), err),
        }
    }

    let index_path = out_dir.join("index.html");
    fs::write(&index_path, index_page(root, &rows))
        .with_context(|| format!("failed to write {}", index_path.display()))?;
    Ok(rows.len())
}

fn collect_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("warning: cannot read directory {}: {}", dir.display(), err);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_sources(&path, out);
        } else if path.extension().and_then(|e| e.to_str()) == Some("c") {
            out.push(path);
        }
    }
}

fn document_file(path: &Path, out_dir: &Path, base: &str, options: &ScanOptions) -> Result<()> {
    let doc = scanner::scan_file(path, options)?;
    write_outputs(&doc, out_dir, base)
}

/// Bulk files are written without color regardless of the terminal.
fn write_outputs(doc: &Document, out_dir: &Path, base: &str) -> Result<()> {
    let config = RenderConfig { color: false };
    for format in ["text", "json", "html"] {
        let renderer = render::create_renderer(format, &config)?;
        let ext = renderer.file_extension();
        let out_path = out_dir.join(ext).join(format!("{}.{}", base, ext));
        fs::write(&out_path, renderer.render(doc))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }
    Ok(())
}

/// Path relative to the walk root, for display in the index.
fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Flatten a relative path into one file name: separators become `__`,
/// spaces `_`, and the extension is dropped.
fn output_base(rel: &str) -> String {
    let mut base = String::new();
    for c in rel.chars() {
        match c {
            '/' | '\\' => base.push_str("__"),
            ' ' => base.push('_'),
            _ => base.push(c),
        }
    }
    if base.is_empty() {
        base.push_str("file");
    }
    match base.rfind('.') {
        Some(pos) => base[..pos].to_string(),
        None => base,
    }
}

fn index_page(root: &Path, rows: &[(String, String)]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Documentation index</title>\n");
    out.push_str("<style>\n");
    out.push_str(
        "body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n",
    );
    out.push_str("table { border-collapse: collapse; }\n");
    out.push_str("td, th { border: 1px solid #ccc; padding: 0.3em 0.8em; text-align: left; }\n");
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str("<h1>Documentation index</h1>\n");
    out.push_str(&format!(
        "<p>Root: <code>{}</code></p>\n",
        html_escape(&root.display().to_string())
    ));
    out.push_str("<table>\n<tr><th>Source</th><th>HTML</th><th>Text</th><th>JSON</th></tr>\n");
    for (rel, base) in rows {
        out.push_str(&format!(
            "<tr><td>{}</td>\
             <td><a href=\"html/{base}.html\">HTML</a></td>\
             <td><a href=\"txt/{base}.txt\">Text</a></td>\
             <td><a href=\"json/{base}.json\">JSON</a></td></tr>\n",
            html_escape(rel),
            base = html_escape(base)
        ));
    }
    out.push_str("</table>\n");
    out.push_str(&format!("<p>Total files: {}</p>\n", rows.len()));
    out.push_str("</body>\n</html>\n");
    out
}
