use chrono::{Local, NaiveDateTime};
use housing_finance_core::amortization::PaymentRecord;
use std::path::{Path, PathBuf};

const HEADERS: [&str; 5] = ["#", "Payment", "Principal", "Interest", "Balance"];

/// Write the schedule to `amort_<timestamp>.csv` inside `dir`.
pub fn export_schedule(
    schedule: &[PaymentRecord],
    dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    export_schedule_at(schedule, dir, Local::now().naive_local())
}

/// As [`export_schedule`], with the timestamp supplied by the caller.
pub fn export_schedule_at(
    schedule: &[PaymentRecord],
    dir: &Path,
    at: NaiveDateTime,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if schedule.is_empty() {
        return Err("Generate a schedule first: nothing to export".into());
    }

    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()).into());
    }

    let path = dir.join(format!("amort_{}.csv", at.format("%Y%m%d_%H%M%S")));
    let mut wtr = csv::Writer::from_path(&path)
        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;

    wtr.write_record(HEADERS)?;
    for record in schedule {
        wtr.write_record([
            record.payment_number.to_string(),
            format!("{:.2}", record.payment_amount.round_dp(2)),
            format!("{:.2}", record.principal_portion.round_dp(2)),
            format!("{:.2}", record.interest_portion.round_dp(2)),
            format!("{:.2}", record.remaining_balance.round_dp(2)),
        ])?;
    }
    wtr.flush()?;

    Ok(path)
}
