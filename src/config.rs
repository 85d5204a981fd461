use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::cli::Cli;

pub const DEFAULT_OUTPUT_FILE: &str = "sitemap.json";
pub const OUTPUT_ENV: &str = "IDARU_OUTPUT";
pub const SPOOL_DIR_ENV: &str = "IDARU_SPOOL_DIR";
pub const DEFAULT_LOG_FILTER: &str = "idaru=info";

/// `--output`, then `$IDARU_OUTPUT`, then `sitemap.json` in the working directory.
pub fn resolve_output_path(cli: &Cli) -> PathBuf {
    output_path_from(cli.output.clone(), env::var_os(OUTPUT_ENV).map(PathBuf::from))
}

/// `$IDARU_SPOOL_DIR`, then the working directory.
pub fn resolve_spool_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(SPOOL_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    env::current_dir().context("Failed to resolve the working directory")
}

fn output_path_from(flag: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
    flag.or(from_env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
}
