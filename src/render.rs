use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::IdaruError;
use crate::sitemap::Sitemap;

/// How the sitemap is printed at the end of a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Lines,
    Tree,
}

/// One `scheme://domain/path?query` line per stored query, empty queries included.
pub fn write_lines<W: Write>(sitemap: &Sitemap, out: &mut W) -> io::Result<()> {
    for entry in sitemap.entries() {
        for query in &entry.node.queries {
            writeln!(
                out,
                "{}://{}{}?{}",
                entry.scheme, entry.domain, entry.path, query
            )?;
        }
    }
    Ok(())
}

pub fn write_tree<W: Write>(sitemap: &Sitemap, out: &mut W) -> io::Result<()> {
    for (scheme, scheme_node) in sitemap.schemes() {
        writeln!(out, "Scheme: {scheme}")?;
        for (domain, domain_node) in scheme_node.domains() {
            writeln!(out, "  Domain: {domain}")?;
            for (path, path_node) in domain_node.paths() {
                writeln!(out, "    Path: {path}")?;
                writeln!(out, "      Queries: {}", path_node.queries.join(", "))?;
            }
        }
    }
    Ok(())
}

/// Pretty JSON (two-space indent, trailing newline) of the whole sitemap.
pub fn to_json(sitemap: &Sitemap) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(sitemap)?;
    json.push('\n');
    Ok(json)
}

/// Writes the sitemap as JSON to `path`, replacing any existing file.
pub fn save_json(sitemap: &Sitemap, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| IdaruError::SaveJson {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let json = to_json(sitemap).context("Failed to encode sitemap as JSON")?;
    writer
        .write_all(json.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|source| IdaruError::SaveJson {
            path: path.to_path_buf(),
            source,
        })?;

    info!("sitemap saved to {}", path.display());
    Ok(())
}

impl Sitemap {
    pub fn show(&self) -> io::Result<()> {
        write_lines(self, &mut io::stdout().lock())
    }

    pub fn show_tree(&self) -> io::Result<()> {
        write_tree(self, &mut io::stdout().lock())
    }

    pub fn save_to_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }
}
