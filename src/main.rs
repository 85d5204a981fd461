use anyhow::Result;
use clap::Parser;
use idaru::cli::{Cli, banner, rewrite_legacy_flags};
use idaru::config::{resolve_output_path, resolve_spool_dir};
use idaru::input::{Spool, resolve_sources, stdin_is_piped};
use idaru::logging::init_logging;
use idaru::query::ParamEdit;
use idaru::render::OutputFormat;
use idaru::sitemap::Sitemap;
use tracing::{debug, info, warn};

fn main() {
    let cli = Cli::parse_from(rewrite_legacy_flags(std::env::args().collect()));

    if cli.version {
        println!("{}", banner());
        return;
    }

    let _log_guard = init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("idaru error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let sources = resolve_sources(&cli.input_file, stdin_is_piped())?;

    let urls = {
        let mut spool = Spool::create(&resolve_spool_dir()?)?;
        debug!("spooling URLs to {}", spool.path().display());
        for source in &sources {
            let stats = spool.ingest(source, cli.filter_param)?;
            debug!(
                source = %source.label(),
                valid = stats.valid,
                invalid = stats.invalid,
                skipped = stats.skipped,
                "source ingested"
            );
        }
        spool.read_back()?
    };

    let mut sitemap = Sitemap::new();
    let summary = sitemap.add(&urls);
    info!(
        "{} URLs added to the sitemap ({} rejected)",
        summary.accepted, summary.rejected
    );

    if cli.merge {
        sitemap.merge_keys_param();
    }
    for edit in ParamEdit::parse_all(&cli.set) {
        sitemap.apply_set(&edit);
    }
    for edit in ParamEdit::parse_all(&cli.add) {
        sitemap.apply_add(&edit);
    }

    let saved = if cli.output_json {
        let path = resolve_output_path(cli);
        let result = sitemap.save_to_json(&path);
        if let Err(err) = &result {
            warn!("{err:#}");
        }
        result
    } else {
        Ok(())
    };

    match cli.output_format() {
        OutputFormat::Lines => sitemap.show()?,
        OutputFormat::Tree => sitemap.show_tree()?,
    }
    saved
}
