//! Legend CLI
//!
//! Operator commands over a persisted threshold file. Each command renders
//! its output to a `String` so the binary stays a thin dispatcher.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use legend_threshold::{
    bounds, classify_or, from_threshold, legend_entries, resolve_threshold, validate_entry,
    LegendConfig, ScaleThreshold,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Build the command-line interface
#[must_use]
pub fn cli() -> Command {
    let threshold_arg = Arg::new("threshold")
        .long("threshold")
        .short('t')
        .value_parser(value_parser!(PathBuf))
        .help("Threshold JSON file ({\"domain\": [...], \"range\": [...]})");
    let json_arg = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON");

    Command::new("legend")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and check percentage threshold legends")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Legend config file (TOML, or JSON by extension)"),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify values into buckets")
                .arg(threshold_arg.clone().help(
                    "Threshold JSON file; the configured default is used when omitted",
                ))
                .arg(
                    Arg::new("value")
                        .required(true)
                        .num_args(1..)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Values to classify"),
                )
                .arg(json_arg.clone()),
        )
        .subcommand(
            Command::new("labels")
                .about("Print legend rows, lowest bucket first")
                .arg(threshold_arg.clone().help(
                    "Threshold JSON file; the configured default is used when omitted",
                ))
                .arg(json_arg),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a threshold file")
                .arg(threshold_arg.clone().required(true)),
        )
        .subcommand(
            Command::new("boundaries")
                .about("Show the editing view of a threshold")
                .arg(threshold_arg),
        )
}

/// Outcome of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text to print on stdout
    pub output: String,
    /// Process exit code
    pub exit_code: i32,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            exit_code: 0,
        }
    }
}

/// Dispatch parsed arguments
///
/// # Errors
/// Fails when the config or threshold file cannot be loaded, or output
/// cannot be rendered
pub fn run(matches: &ArgMatches) -> Result<Outcome> {
    let Some((name, args)) = matches.subcommand() else {
        anyhow::bail!("no command given");
    };

    let config_path = args
        .get_one::<PathBuf>("config")
        .or_else(|| matches.get_one::<PathBuf>("config"));
    let config = match config_path {
        Some(path) => LegendConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LegendConfig::default(),
    };

    match name {
        "classify" => {
            let stored = load_optional(args)?;
            let values: Vec<f64> = args
                .get_many::<f64>("value")
                .map(|v| v.copied().collect())
                .unwrap_or_default();
            run_classify(stored.as_ref(), &values, &config, args.get_flag("json"))
        }
        "labels" => {
            let stored = load_optional(args)?;
            run_labels(stored.as_ref(), &config, args.get_flag("json"))
        }
        "check" => {
            let stored = load_optional(args)?.context("--threshold is required")?;
            Ok(run_check(&stored))
        }
        "boundaries" => {
            let stored = load_optional(args)?;
            run_boundaries(stored.as_ref(), &config)
        }
        other => anyhow::bail!("unknown command: {other}"),
    }
}

/// Read a threshold file
///
/// # Errors
/// Fails when the file cannot be read or does not hold a threshold object
pub fn load_threshold(path: &Path) -> Result<ScaleThreshold> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading threshold {}", path.display()))?;
    let threshold = ScaleThreshold::from_json(&contents)
        .with_context(|| format!("parsing threshold {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        breakpoints = threshold.domain.len(),
        "loaded threshold"
    );
    Ok(threshold)
}

fn load_optional(args: &ArgMatches) -> Result<Option<ScaleThreshold>> {
    args.get_one::<PathBuf>("threshold")
        .map(|path| load_threshold(path))
        .transpose()
}

/// Classify each value against the stored (or default) threshold
///
/// # Errors
/// Fails if the output cannot be rendered
pub fn run_classify(
    stored: Option<&ScaleThreshold>,
    values: &[f64],
    config: &LegendConfig,
    json: bool,
) -> Result<Outcome> {
    let threshold = resolve_threshold(stored, config);
    let results: Vec<_> = values
        .iter()
        .map(|v| (*v, classify_or(threshold, *v, &config.fallback_color)))
        .collect();

    if json {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|(value, c)| {
                serde_json::json!({
                    "value": value,
                    "bucket_index": c.bucket_index,
                    "color": c.color,
                })
            })
            .collect();
        return Ok(Outcome::ok(serde_json::to_string_pretty(&rows)?));
    }

    let mut out = String::new();
    for (value, c) in &results {
        writeln!(out, "{value}\t{}\t{}", c.bucket_index, c.color)?;
    }
    Ok(Outcome::ok(out))
}

/// Legend rows for the stored (or default) threshold
///
/// # Errors
/// Fails if the output cannot be rendered
pub fn run_labels(
    stored: Option<&ScaleThreshold>,
    config: &LegendConfig,
    json: bool,
) -> Result<Outcome> {
    let threshold = resolve_threshold(stored, config);
    let entries = legend_entries(threshold, config);

    if json {
        return Ok(Outcome::ok(serde_json::to_string_pretty(&entries)?));
    }

    let mut out = String::new();
    for entry in &entries {
        writeln!(out, "{}\t{}", entry.color, entry.label)?;
    }
    Ok(Outcome::ok(out))
}

/// Validate a stored threshold, exiting non-zero when it is malformed
#[must_use]
pub fn run_check(stored: &ScaleThreshold) -> Outcome {
    match stored.validate() {
        Ok(()) => Outcome::ok(format!("ok: {} buckets\n", stored.bucket_count())),
        Err(err) => {
            tracing::warn!(error = %err, "threshold failed validation");
            Outcome {
                output: format!("invalid: {err}\n"),
                exit_code: 1,
            }
        }
    }
}

/// The editing view: one row per boundary with its allowed window
///
/// # Errors
/// Fails if the output cannot be rendered
pub fn run_boundaries(stored: Option<&ScaleThreshold>, config: &LegendConfig) -> Result<Outcome> {
    let list = from_threshold(stored, config);
    let mut out = String::new();
    let mut exit_code = 0;

    for (index, entry) in list.iter().enumerate() {
        let window = match (index, bounds(&list, index)) {
            (0, _) => "fixed".to_string(),
            (_, Some(b)) => format!("{}..={}", b.min, b.max),
            (_, None) => "-".to_string(),
        };
        let status = match validate_entry(&list, index) {
            Ok(()) => "ok".to_string(),
            Err(err) => {
                exit_code = 1;
                err.to_string()
            }
        };
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            entry.id, entry.upper_bound, entry.color, window, status
        )?;
    }

    Ok(Outcome {
        output: out,
        exit_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ScaleThreshold {
        ScaleThreshold::new(
            vec![40.0, 70.0],
            vec!["#000".into(), "#aaa".into(), "#fff".into()],
        )
    }

    #[test]
    fn classify_text_output() {
        let out = run_classify(Some(&sample()), &[30.0, 40.0], &LegendConfig::default(), false)
            .unwrap();
        assert_eq!(out.output, "30\t0\t#000\n40\t1\t#aaa\n");
        assert_eq!(out.exit_code, 0);
    }

    #[test]
    fn classify_uses_default_threshold() {
        let out = run_classify(None, &[10.0], &LegendConfig::default(), false).unwrap();
        assert_eq!(out.output, "10\t0\t#e53935\n");
    }

    #[test]
    fn classify_json_output() {
        let out = run_classify(Some(&sample()), &[80.0], &LegendConfig::default(), true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out.output).unwrap();
        assert_eq!(parsed[0]["bucket_index"], 2);
        assert_eq!(parsed[0]["color"], "#fff");
    }

    #[test]
    fn labels_text_output() {
        let out = run_labels(Some(&sample()), &LegendConfig::default(), false).unwrap();
        assert_eq!(out.output, "#000\t< 40%\n#aaa\t40% - 70%\n#fff\t> 70%\n");
    }

    #[test]
    fn check_reports_malformed() {
        let bad = ScaleThreshold::new(
            vec![70.0, 40.0],
            vec!["#a".into(), "#b".into(), "#c".into()],
        );
        let out = run_check(&bad);
        assert_eq!(out.exit_code, 1);
        assert!(out.output.starts_with("invalid:"));

        assert_eq!(run_check(&sample()).output, "ok: 3 buckets\n");
    }

    #[test]
    fn boundaries_view() {
        let out = run_boundaries(Some(&sample()), &LegendConfig::default()).unwrap();
        assert_eq!(
            out.output,
            "range-1\t100\t#fff\tfixed\tok\n\
             range-2\t70\t#aaa\t40..=99\tok\n\
             range-3\t40\t#000\t0..=69\tok\n"
        );
        assert_eq!(out.exit_code, 0);
    }

    #[test]
    fn cli_parses_negative_values() {
        let matches = cli()
            .try_get_matches_from(["legend", "classify", "-5", "50"])
            .unwrap();
        let out = run(&matches).unwrap();
        assert_eq!(out.output, "-5\t0\t#e53935\n50\t1\t#43a047\n");
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(cli().try_get_matches_from(["legend"]).is_err());
    }
}
