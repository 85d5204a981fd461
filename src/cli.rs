use clap::Parser;
use std::path::PathBuf;

use crate::render::OutputFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "idaru")]
#[command(about = "Group URLs into a scheme/domain/path sitemap and rewrite their query parameters")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Display the banner and version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Log info and warnings to stderr
    #[arg(long, alias = "vb")]
    pub verbose: bool,

    /// Merge all keys of a path into one query
    #[arg(short = 'm', long)]
    pub merge: bool,

    /// Only keep URLs that carry at least one ?key=
    #[arg(long, aliases = ["filterParam", "fP"])]
    pub filter_param: bool,

    /// Show the sitemap as a tree
    #[arg(long, alias = "sh")]
    pub show: bool,

    /// Save the sitemap to a JSON file
    #[arg(long, aliases = ["outputJson", "oJ"])]
    pub output_json: bool,

    /// JSON file written by --output-json
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Input file with one URL per line (repeatable)
    #[arg(short = 'i', long, value_name = "FILE", aliases = ["inputFile", "iF"])]
    pub input_file: Vec<PathBuf>,

    /// key=value to add to matching parameters; '*' matches every key (repeatable)
    #[arg(short = 'a', long, value_name = "KEY=VALUE")]
    pub add: Vec<String>,

    /// key=value to set on matching parameters; '*' matches every key (repeatable)
    #[arg(short = 's', long, value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.show {
            OutputFormat::Tree
        } else {
            OutputFormat::Lines
        }
    }
}

const LEGACY_FLAGS: &[&str] = &[
    "version",
    "verbose",
    "vb",
    "merge",
    "filterParam",
    "fP",
    "show",
    "sh",
    "outputJson",
    "oJ",
    "inputFile",
    "iF",
    "add",
    "set",
];

/// Turns single-dash long flags (`-inputFile x`, `-fP`, `-set=a=b`) into their
/// double-dash spelling so clap can parse them. Stops at `--`.
pub fn rewrite_legacy_flags(mut args: Vec<String>) -> Vec<String> {
    for arg in args.iter_mut().skip(1) {
        if arg == "--" {
            break;
        }
        let Some(rest) = arg.strip_prefix('-') else {
            continue;
        };
        if rest.starts_with('-') {
            continue;
        }
        let name = rest.split_once('=').map_or(rest, |(name, _)| name);
        if LEGACY_FLAGS.contains(&name) {
            *arg = format!("-{arg}");
        }
    }
    args
}

pub fn banner() -> String {
    format!(
        r"
.___    .___
|   | __| _/____ _______ __ __
|   |/ __ |\__  \\_  __ \  |  \
|   / /_/ | / __ \|  | \/  |  /
|___\____ |(____  /__|  |____/
         \/     \/

[+] Version is v{}
",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrite_legacy_flags_doubles_known_single_dash_flags() {
        let rewritten = rewrite_legacy_flags(args(&[
            "idaru",
            "-inputFile",
            "urls.txt",
            "-fP",
            "-set=id=9",
            "-m",
            "--show",
            "-a",
            "x=1",
        ]));
        assert_eq!(
            rewritten,
            args(&[
                "idaru",
                "--inputFile",
                "urls.txt",
                "--fP",
                "--set=id=9",
                "-m",
                "--show",
                "-a",
                "x=1",
            ])
        );
    }

    #[test]
    fn rewrite_legacy_flags_stops_at_double_dash() {
        let rewritten = rewrite_legacy_flags(args(&["idaru", "--", "-merge"]));
        assert_eq!(rewritten[2], "-merge");
    }

    #[test]
    fn legacy_and_modern_spellings_parse_the_same() {
        let legacy = Cli::parse_from(rewrite_legacy_flags(args(&[
            "idaru", "-iF", "a.txt", "-inputFile", "b.txt", "-oJ", "-sh", "-vb", "-add", "k=v",
        ])));
        let modern = Cli::parse_from(args(&[
            "idaru",
            "-i",
            "a.txt",
            "--input-file",
            "b.txt",
            "--output-json",
            "--show",
            "--verbose",
            "--add",
            "k=v",
        ]));

        assert_eq!(legacy.input_file, modern.input_file);
        assert_eq!(legacy.input_file, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert!(legacy.output_json && modern.output_json);
        assert!(legacy.verbose && modern.verbose);
        assert_eq!(legacy.add, modern.add);
        assert_eq!(legacy.output_format(), OutputFormat::Tree);
    }

    #[test]
    fn default_output_is_flat_lines() {
        let cli = Cli::parse_from(["idaru"]);
        assert_eq!(cli.output_format(), OutputFormat::Lines);
        assert!(cli.set.is_empty() && cli.add.is_empty());
    }

    #[test]
    fn banner_mentions_version() {
        assert!(banner().contains(env!("CARGO_PKG_VERSION")));
    }
}
