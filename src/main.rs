// Thu Oct 15 2026 - Alex

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use vanadium::{
    config::{EngineConfig, RulesFile},
    report::ValidationReport,
    tree::Document,
    utils::logging,
    Engine,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Rule-driven validation for element trees", long_about = None)]
struct Args {
    /// Element tree as a JSON array of elements
    #[arg(short, long)]
    document: PathBuf,

    /// Rule file (`{ "rules": [...] }`)
    #[arg(short, long)]
    rules: PathBuf,

    /// Engine settings (fallback message, path cache)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only run rules that trigger on this event
    #[arg(short, long)]
    event: Option<String>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log through env_logger and RUST_LOG instead
    #[arg(long)]
    env_log: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.env_log {
        logging::init_from_env();
    } else {
        logging::init_logger(args.verbose);
    }

    let result = run(&args);
    if let Err(e) = &result {
        eprintln!("{} {:#}", "[!]".red(), e);
    }
    ExitCode::from(exit_code(&result))
}

/// 0 when every rule passed, 1 on validation errors, 2 when setup failed.
fn exit_code(result: &Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn run(args: &Args) -> Result<bool> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let document = Document::load(&args.document)
        .with_context(|| format!("loading document {}", args.document.display()))?;
    let rules = RulesFile::load(&args.rules)
        .and_then(|file| file.to_rules())
        .with_context(|| format!("loading rules {}", args.rules.display()))?;

    log::info!("{} element(s), {} rule(s)", document.len(), rules.len());

    let engine = Engine::with_config(config);
    let rule_ids = engine.bind_rules(&document, rules);
    log::info!("{} of {} rule(s) bound", rule_ids.len(), engine.rule_count());

    let mut report = ValidationReport::new();
    for id in rule_ids {
        let rule = match engine.rule(id) {
            Some(rule) => rule,
            None => continue,
        };
        if let Some(event) = &args.event {
            if &rule.trigger_event != event {
                log::debug!("Skipping {} (triggers on '{}')", id, rule.trigger_event);
                continue;
            }
        }

        for (node, outcome) in engine.validate_rule(&document, id)? {
            report.add(id, node, rule.combination, outcome);
        }
    }

    match args.format {
        OutputFormat::Text => print!("{}", report.format_report()),
        OutputFormat::Json => println!("{}", report.to_json()),
    }

    Ok(report.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const DOCUMENT: &str = r#"[
        {"tag": "form", "children": [
            {"tag": "input", "id": "age", "value": "42"}
        ]}
    ]"#;

    fn rules(max: u32) -> String {
        format!(
            r##"{{ "rules": [{{
                "selector": "#age",
                "validateOn": "input",
                "validators": [{{ "validator": "number", "options": {{ "max": {} }} }}]
            }}] }}"##,
            max
        )
    }

    fn args(dir: &Path, max: u32, extra: &[&str]) -> Args {
        let document = dir.join("document.json");
        let rule_file = dir.join(format!("rules-{}.json", max));
        fs::write(&document, DOCUMENT).unwrap();
        fs::write(&rule_file, rules(max)).unwrap();

        let mut argv = vec![
            "vanadium".to_string(),
            "--document".to_string(),
            document.display().to_string(),
            "--rules".to_string(),
            rule_file.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_exit_status_follows_validation() {
        let dir = tempfile::tempdir().unwrap();

        let failing = run(&args(dir.path(), 30, &[]));
        assert!(matches!(failing, Ok(false)));
        assert_eq!(exit_code(&failing), 1);

        let passing = run(&args(dir.path(), 100, &["--format", "json"]));
        assert!(matches!(passing, Ok(true)));
        assert_eq!(exit_code(&passing), 0);
    }

    #[test]
    fn test_setup_failure_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let mut broken = args(dir.path(), 30, &[]);
        broken.document = dir.path().join("missing.json");

        let result = run(&broken);
        assert!(result.is_err());
        assert_eq!(exit_code(&result), 2);

        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        broken.document = dir.path().join("document.json");
        broken.rules = dir.path().join("bad.json");
        assert_eq!(exit_code(&run(&broken)), 2);
    }

    #[test]
    fn test_event_filter_skips_other_triggers() {
        let dir = tempfile::tempdir().unwrap();

        let other = run(&args(dir.path(), 30, &["--event", "change"]));
        assert!(matches!(other, Ok(true)));
        assert_eq!(exit_code(&other), 0);

        let matching = run(&args(dir.path(), 30, &["--event", "input"]));
        assert!(matches!(matching, Ok(false)));
        assert_eq!(exit_code(&matching), 1);
    }
}
