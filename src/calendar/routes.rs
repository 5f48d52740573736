use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use super::responses::{
    AvailableSlotsResponse, CalendarEventResponse, CalendarEventsResponse, DayViewResponse,
    PeriodStatsResponse,
};
use super::services::{self, Period};
use crate::error::Result;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct EventsQuery {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    period: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlotsQuery {
    date: NaiveDate,
}

async fn calendar_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<CalendarEventsResponse>> {
    let events = services::events(&state.db, query.start, query.end).await?;
    Ok(Json(CalendarEventsResponse {
        events: events.into_iter().map(CalendarEventResponse::from).collect(),
    }))
}

async fn calendar_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DayViewResponse>> {
    let (events, stats) = services::day(&state.db, date).await?;
    Ok(Json(DayViewResponse {
        date,
        events: events.into_iter().map(CalendarEventResponse::from).collect(),
        stats: stats.into(),
    }))
}

/// Public hourly availability for the booking form
async fn available_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>> {
    let slots = services::slots(&state.db, query.date).await?;
    Ok(Json(AvailableSlotsResponse {
        date: query.date,
        slots: slots.into_iter().map(Into::into).collect(),
    }))
}

async fn calendar_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<PeriodStatsResponse>> {
    let period = match query.period.as_deref() {
        Some(p) => Period::parse(p)?,
        None => Period::Month,
    };
    let stats = services::stats(&state.db, period).await?;
    Ok(Json(stats.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/available-slots", get(available_slots))
        .route("/admin/calendar/events", get(calendar_events))
        .route("/admin/calendar/day/:date", get(calendar_day))
        .route("/admin/calendar/stats", get(calendar_stats))
}
