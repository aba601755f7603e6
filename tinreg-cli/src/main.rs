mod logger;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tinreg_codegen::{GeneratorConfig, RegistrationGenerator};

#[derive(Parser, Debug)]
#[command(
    name = "genregclasses",
    about = "Generate templated registration classes and macros",
    disable_help_flag = true,
    args_override_self = true
)]
struct Cli {
    /// Print usage and exit
    #[arg(long)]
    help: bool,
    /// Maximum number of parameters
    #[arg(long = "maxparam", value_name = "COUNT")]
    max_param: Option<u32>,
    /// Templated classes output file
    #[arg(long = "outputclasses", value_name = "FILENAME")]
    output_classes: Option<PathBuf>,
    /// Macros output file
    #[arg(long = "outputmacros", value_name = "FILENAME")]
    output_macros: Option<PathBuf>,
    /// JSON config file; individual flags override it
    #[arg(long, value_name = "FILENAME")]
    config: Option<PathBuf>,
    /// Namespace qualifying the classes used by the macros
    #[arg(long, value_name = "NAME")]
    namespace: Option<String>,
    /// Log every arity and file written
    #[arg(long)]
    verbose: bool,
}

/// Accepted single-dash spellings and the long option each one stands for.
const FLAG_SPELLINGS: &[(&str, &str)] = &[
    ("-h", "--help"),
    ("-help", "--help"),
    ("-?", "--help"),
    ("-maxparam", "--maxparam"),
    ("-oc", "--outputclasses"),
    ("-outputclasses", "--outputclasses"),
    ("-om", "--outputmacros"),
    ("-outputmacros", "--outputmacros"),
    ("-config", "--config"),
    ("-namespace", "--namespace"),
    ("-verbose", "--verbose"),
];

/// Long options whose next argument is a value and must pass through as-is.
const VALUE_FLAGS: &[&str] = &[
    "--maxparam",
    "--outputclasses",
    "--outputmacros",
    "--config",
    "--namespace",
];

const HELP_WIDTH: usize = 36;

#[derive(Debug)]
enum Invocation {
    Help { reason: Option<String> },
    Generate { config: GeneratorConfig, verbose: bool },
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    print_banner("Generate registration classes");

    match run(args, Path::new(".")) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

/// Show usage or generate into `base_dir`. Only I/O failures are errors.
fn run(args: Vec<String>, base_dir: &Path) -> Result<()> {
    match parse_invocation(args) {
        Invocation::Help { reason } => {
            if let Some(reason) = reason {
                eprintln!("{} {}", "note:".yellow().bold(), reason);
            }
            print!("{}", usage());
        }
        Invocation::Generate { config, verbose } => {
            logger::init(verbose);
            cmd_generate(&config, base_dir)?;
            print_banner("Finished generating classes.");
        }
    }
    Ok(())
}

/// Rewrite single-dash spellings to the long options clap understands.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let flag = FLAG_SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == arg)
            .map(|(_, long)| long.to_string())
            .unwrap_or(arg);
        let takes_value = VALUE_FLAGS.contains(&flag.as_str());
        out.push(flag);
        if takes_value {
            if let Some(value) = iter.next() {
                out.push(value);
            }
        }
    }
    out
}

/// Decide between the help path and a generation run. Nothing here touches
/// the output files.
fn parse_invocation(args: Vec<String>) -> Invocation {
    if args.is_empty() {
        return Invocation::Help { reason: None };
    }

    let argv = std::iter::once("genregclasses".to_string()).chain(normalize_args(args));
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) => {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            return Invocation::Help {
                reason: Some(first.trim_start_matches("error: ").to_string()),
            };
        }
    };

    if cli.help {
        return Invocation::Help { reason: None };
    }

    match resolve_config(&cli) {
        Ok(config) => Invocation::Generate {
            config,
            verbose: cli.verbose,
        },
        Err(e) => Invocation::Help {
            reason: Some(format!("{e:#}")),
        },
    }
}

/// Defaults, then the config file, then individual flags.
fn resolve_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(max_param) = cli.max_param {
        config.max_param = max_param;
    }
    if let Some(path) = &cli.output_classes {
        config.output_classes = path.clone();
    }
    if let Some(path) = &cli.output_macros {
        config.output_macros = path.clone();
    }
    if let Some(namespace) = &cli.namespace {
        config.namespace = namespace.clone();
    }
    Ok(config)
}

fn cmd_generate(config: &GeneratorConfig, base_dir: &Path) -> Result<()> {
    println!("Max param count: {}", config.max_param);
    println!("Output: {}", config.output_classes.display());
    println!("Output: {}", config.output_macros.display());

    let generated = RegistrationGenerator::new(config.clone()).generate();
    generated
        .write_to_disk(base_dir)
        .with_context(|| format!("Failed to write to '{}'", base_dir.display()))?;

    for (path, content) in generated.files() {
        println!(
            "{} {} {}",
            "✓".green().bold(),
            path.display(),
            format!("({} lines)", content.lines().count()).dimmed()
        );
    }
    Ok(())
}

fn usage() -> String {
    let rows = [
        ("-h | -help", "This help menu."),
        ("-maxparam <count>", "maximum number of parameters"),
        ("-oc | -outputclasses <filename>", "templated classes output file."),
        ("-om | -outputmacros <filename>", "macros output file."),
        ("-config <filename>", "JSON config file."),
        ("-namespace <name>", "namespace of the classes in the macros."),
        ("-verbose", "log every arity and file written."),
    ];
    let mut out = String::from("Usage:  genregclasses [option]\n");
    for (flag, description) in rows {
        out.push_str(&format!("{:>width$} :  {}\n", flag, description, width = HELP_WIDTH));
    }
    out
}

fn print_banner(title: &str) {
    let rule = "*".repeat(title.len() + 6);
    println!();
    println!("{}", rule.dimmed());
    println!("{}  {}  {}", "*".dimmed(), title.bold(), "*".dimmed());
    println!("{}", rule.dimmed());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn expect_config(list: &[&str]) -> GeneratorConfig {
        match parse_invocation(args(list)) {
            Invocation::Generate { config, .. } => config,
            other => panic!("Expected Generate, got: {:?}", other),
        }
    }

    fn is_help(list: &[&str]) -> bool {
        matches!(parse_invocation(args(list)), Invocation::Help { .. })
    }

    #[test]
    fn no_arguments_shows_help() {
        assert!(is_help(&[]));
    }

    #[test]
    fn help_spellings() {
        for flag in ["-h", "-help", "-?", "--help"] {
            assert!(is_help(&[flag]), "{} should show help", flag);
        }
        assert!(is_help(&["-maxparam", "3", "-h"]));
    }

    #[test]
    fn bad_arguments_fall_back_to_help() {
        assert!(is_help(&["-maxparam", "abc"]));
        assert!(is_help(&["-maxparam", "-1"]));
        assert!(is_help(&["-maxparam"]));
        assert!(is_help(&["-oc"]));
        assert!(is_help(&["-bogus"]));
        assert!(is_help(&["-config", "/nonexistent/genreg.json"]));
    }

    #[test]
    fn help_reason_mentions_bad_value() {
        match parse_invocation(args(&["-maxparam", "abc"])) {
            Invocation::Help { reason: Some(reason) } => assert!(reason.contains("abc")),
            other => panic!("Expected Help with reason, got: {:?}", other),
        }
    }

    #[test]
    fn legacy_flags_resolve() {
        let config = expect_config(&["-maxparam", "2", "-oc", "out_c.h", "-om", "out_m.h"]);
        assert_eq!(config.max_param, 2);
        assert_eq!(config.output_classes, PathBuf::from("out_c.h"));
        assert_eq!(config.output_macros, PathBuf::from("out_m.h"));

        let config = expect_config(&["-outputclasses", "a.h", "-outputmacros", "b.h"]);
        assert_eq!(config.max_param, 8);
        assert_eq!(config.output_classes, PathBuf::from("a.h"));
        assert_eq!(config.output_macros, PathBuf::from("b.h"));
    }

    #[test]
    fn repeated_flags_keep_last_value() {
        let config = expect_config(&["-maxparam", "2", "-maxparam", "3"]);
        assert_eq!(config.max_param, 3);

        let config = expect_config(&["-oc", "a.h", "-outputclasses", "b.h", "-om", "m.h", "-om", "n.h"]);
        assert_eq!(config.output_classes, PathBuf::from("b.h"));
        assert_eq!(config.output_macros, PathBuf::from("n.h"));
    }

    #[test]
    fn flag_values_are_not_rewritten() {
        let normalized = normalize_args(args(&["-oc", "-h", "-om", "m.h"]));
        assert_eq!(normalized, args(&["--outputclasses", "-h", "--outputmacros", "m.h"]));
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("genreg.json");
        std::fs::write(&path, r#"{ "maxParam": 4, "namespace": "Script" }"#).unwrap();

        let config = expect_config(&["-config", path.to_str().unwrap(), "-maxparam", "1"]);
        assert_eq!(config.max_param, 1);
        assert_eq!(config.namespace, "Script");
    }

    #[test]
    fn generate_writes_both_files() {
        let tmp = TempDir::new().unwrap();
        let config = expect_config(&["-maxparam", "2", "-oc", "out_c.h", "-om", "out_m.h"]);
        cmd_generate(&config, tmp.path()).unwrap();

        let classes = std::fs::read_to_string(tmp.path().join("out_c.h")).unwrap();
        let macros = std::fs::read_to_string(tmp.path().join("out_m.h")).unwrap();
        assert_eq!(classes.matches("\nclass CReg").count(), 12);
        assert_eq!(macros.matches("#define REGISTER_").count(), 6);
        assert!(classes.contains("CRegMethodP2<C, void, T1, T2>"));
    }

    #[test]
    fn rerun_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let config = expect_config(&["-maxparam", "3"]);
        cmd_generate(&config, tmp.path()).unwrap();
        let first = std::fs::read(tmp.path().join("registrationclasses.h")).unwrap();
        cmd_generate(&config, tmp.path()).unwrap();
        let second = std::fs::read(tmp.path().join("registrationclasses.h")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn help_path_leaves_existing_files_untouched() {
        let tmp = TempDir::new().unwrap();
        let existing = tmp.path().join("out_c.h");
        std::fs::write(&existing, "keep me").unwrap();

        let invocation =
            parse_invocation(args(&["-oc", existing.to_str().unwrap(), "-maxparam", "abc"]));
        assert!(matches!(invocation, Invocation::Help { .. }));
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");
    }

    #[test]
    fn help_runs_write_nothing() {
        for list in [&[][..], &["-maxparam", "abc"][..], &["-h"][..]] {
            let tmp = TempDir::new().unwrap();
            run(args(list), tmp.path()).unwrap();
            assert_eq!(
                std::fs::read_dir(tmp.path()).unwrap().count(),
                0,
                "{:?} should not write files",
                list
            );
        }
    }

    #[test]
    fn generate_run_writes_default_files() {
        let tmp = TempDir::new().unwrap();
        run(args(&["-maxparam", "1"]), tmp.path()).unwrap();
        assert!(tmp.path().join("registrationclasses.h").exists());
        assert!(tmp.path().join("registrationmacros.h").exists());
    }

    #[test]
    fn write_failure_is_an_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("registrationclasses.h")).unwrap();
        let config = expect_config(&["-maxparam", "0"]);
        assert!(cmd_generate(&config, tmp.path()).is_err());
    }

    #[test]
    fn usage_lists_every_flag() {
        let text = usage();
        assert!(text.starts_with("Usage:"));
        for flag in ["-help", "-maxparam", "-outputclasses", "-outputmacros", "-config"] {
            assert!(text.contains(flag), "usage should mention {}", flag);
        }
        assert!(text.contains(&format!("{:>36} :  This help menu.", "-h | -help")));
    }
}
