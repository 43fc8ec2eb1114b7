use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::path::PathBuf;

use housing_finance_core::amortization::{self, LoanTerms};
use housing_finance_core::FinanceConfig;

use crate::input;
use crate::input::lenient::{Amount, YearCount};
use crate::output::export;

/// Arguments for the amortization schedule
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct ScheduleArgs {
    /// Loan principal
    #[arg(long)]
    pub loan: Option<Amount>,

    /// Annual interest rate in percent (e.g. 4.5)
    #[arg(long)]
    pub rate: Option<Amount>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<YearCount>,

    /// Show every payment instead of the first rows only
    #[arg(long)]
    pub all: bool,

    /// Write the full schedule as CSV into this directory (default: current)
    #[arg(long, num_args = 0..=1, default_missing_value = ".")]
    pub export: Option<PathBuf>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_schedule(
    args: ScheduleArgs,
    config: &FinanceConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = match input::read_input(args.input.as_deref())? {
        Some(value) => value,
        None => LoanTerms {
            principal: args
                .loan
                .map(|a| a.resolve("loan"))
                .ok_or("--loan is required (or provide --input)")?,
            annual_rate_pct: args
                .rate
                .map(|a| a.resolve("rate"))
                .unwrap_or(config.default_annual_rate_pct),
            term_years: args
                .years
                .map(|y| y.resolve("years"))
                .unwrap_or(config.default_term_years),
        },
    };

    let mut output = amortization::build_schedule(&terms);

    // Export always carries the complete schedule
    let export_path = match args.export {
        Some(dir) => {
            let path = export::export_schedule(&output.result.schedule, &dir)?;
            tracing::info!(path = %path.display(), rows = output.result.schedule.len(), "schedule exported");
            eprintln!("{} {}", "saved".green().bold(), path.display());
            Some(path)
        }
        None => None,
    };

    let total = output.result.schedule.len();
    let limit = config.display_payments_limit;
    if !args.all && total > limit {
        output.result.schedule.truncate(limit);
        output.warnings.push(format!(
            "Showing first {limit} of {total} payments (use --all or --export for the rest)"
        ));
    }

    let mut value = serde_json::to_value(output)?;
    if let (Some(path), Value::Object(map)) = (export_path, &mut value) {
        map.insert(
            "export_path".into(),
            Value::String(path.display().to_string()),
        );
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hfin-schedule-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Arguments reading a 240k / 4.5% / 30 year loan from a JSON file in `dir`.
    fn args_in(dir: &Path, all: bool, export: Option<PathBuf>) -> ScheduleArgs {
        let input = dir.join("loan.json");
        fs::write(
            &input,
            r#"{"principal": 240000, "annual_rate_pct": 4.5, "term_years": 30}"#,
        )
        .unwrap();
        ScheduleArgs {
            loan: None,
            rate: None,
            years: None,
            all,
            export,
            input: Some(input.to_str().unwrap().to_string()),
        }
    }

    fn shown_rows(value: &Value) -> usize {
        value["result"]["schedule"].as_array().unwrap().len()
    }

    fn has_truncation_warning(value: &Value) -> bool {
        value["warnings"]
            .as_array()
            .unwrap()
            .iter()
            .any(|w| w.as_str().unwrap().starts_with("Showing first"))
    }

    #[test]
    fn test_display_truncated_to_limit() {
        let dir = scratch_dir("truncate");
        let config = FinanceConfig::default();
        let value = run_schedule(args_in(&dir, false, None), &config).unwrap();

        assert_eq!(shown_rows(&value), 24);
        assert!(has_truncation_warning(&value));
        assert_eq!(value["result"]["summary"]["number_of_payments"], 360);
        assert!(value.get("export_path").is_none());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_all_lifts_limit() {
        let dir = scratch_dir("all");
        let config = FinanceConfig::default();
        let value = run_schedule(args_in(&dir, true, None), &config).unwrap();

        assert_eq!(shown_rows(&value), 360);
        assert!(!has_truncation_warning(&value));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_configured_limit_applies() {
        let dir = scratch_dir("limit");
        let config = FinanceConfig {
            display_payments_limit: 12,
            ..FinanceConfig::default()
        };
        let value = run_schedule(args_in(&dir, false, None), &config).unwrap();
        assert_eq!(shown_rows(&value), 12);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_keeps_full_schedule_when_display_truncated() {
        let dir = scratch_dir("export");
        let config = FinanceConfig::default();
        let value = run_schedule(args_in(&dir, false, Some(dir.clone())), &config).unwrap();

        assert_eq!(shown_rows(&value), 24);
        let path = PathBuf::from(value["export_path"].as_str().unwrap());
        assert!(path.starts_with(&dir));

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(rdr.records().count(), 360);
        fs::remove_dir_all(&dir).unwrap();
    }
}
