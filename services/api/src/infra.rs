use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use polls::error::AppError;
use polls::polls::{PollSeeder, QuestionStore};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads a CSV fixture into `store`, logging what was inserted.
pub(crate) fn seed_store<S>(store: &S, path: &Path, now: DateTime<Utc>) -> Result<(), AppError>
where
    S: QuestionStore + ?Sized,
{
    let summary = PollSeeder::from_path(store, path, now)?;
    info!(
        path = %path.display(),
        questions = summary.questions,
        choices = summary.choices,
        votes = summary.votes,
        "seeded poll store"
    );
    Ok(())
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    polls::polls::form::parse_pub_date(raw).ok_or_else(|| {
        format!("failed to parse '{raw}' as an RFC 3339 timestamp or YYYY-MM-DD[ HH:MM] date")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_instant_accepts_dates_and_reports_bad_input() {
        assert_eq!(
            parse_instant("2025-10-01"),
            Ok(Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap())
        );
        let err = parse_instant("tomorrow").expect_err("rejects words");
        assert!(err.contains("'tomorrow'"));
    }
}
