use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{self, ClientStats, RevenueSummary, ServiceStats};
use super::queries;
use crate::error::{AppError, Result};
use crate::AppState;

const DEFAULT_REPORT_DAYS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ReportQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    client: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReportResponse {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    client: Option<String>,
    revenue: RevenueSummary,
    services: BTreeMap<String, ServiceStats>,
    clients: BTreeMap<String, ClientStats>,
}

fn parse_report_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{field} must be a YYYY-MM-DD date")))
}

/// Resolve the report range. Omitted bounds default to the trailing 30
/// days ending today; malformed input and inverted ranges are rejected
/// rather than producing an empty report.
fn resolve_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let end = match end_date {
        Some(raw) => parse_report_date("end_date", raw)?,
        None => today,
    };
    let start = match start_date {
        Some(raw) => parse_report_date("start_date", raw)?,
        None => end
            .checked_sub_days(Days::new(DEFAULT_REPORT_DAYS))
            .unwrap_or(end),
    };
    if start > end {
        return Err(AppError::Validation(
            "start_date must be on or before end_date".into(),
        ));
    }
    Ok((start, end))
}

async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>> {
    let today = Utc::now().date_naive();
    let (start, end) = resolve_range(query.start_date.as_deref(), query.end_date.as_deref(), today)?;
    let client = query
        .client
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let bookings = queries::bookings_for_report(&state.db, start, end, client).await?;
    let invoices = queries::invoices_for_report(&state.db, start, end, client).await?;

    let response = ReportResponse {
        start_date: start,
        end_date: end,
        client: client.map(str::to_owned),
        revenue: aggregate::revenue_summary(&invoices, today)?,
        services: aggregate::service_stats(&bookings),
        clients: aggregate::client_stats(&bookings),
    };
    Ok(Json(response))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/reports", get(get_report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn omitted_dates_default_to_trailing_month() {
        let today = date(2026, 9, 15);
        let (start, end) = resolve_range(None, None, today).unwrap();
        assert_eq!(end, today);
        assert_eq!(start, date(2026, 8, 16));
    }

    #[test]
    fn explicit_dates_are_honored() {
        let today = date(2026, 9, 15);
        let (start, end) = resolve_range(Some("2026-07-01"), Some("2026-07-31"), today).unwrap();
        assert_eq!(start, date(2026, 7, 1));
        assert_eq!(end, date(2026, 7, 31));
    }

    #[test]
    fn malformed_dates_are_rejected_not_emptied() {
        let today = date(2026, 9, 15);
        let err = resolve_range(Some("07/01/2026"), None, today).unwrap_err();
        assert_eq!(err.error_type(), "validation");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let today = date(2026, 9, 15);
        let err = resolve_range(Some("2026-08-01"), Some("2026-07-01"), today).unwrap_err();
        assert_eq!(err.error_type(), "validation");
    }
}
