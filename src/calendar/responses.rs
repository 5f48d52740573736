use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::services::{AvailableSlot, CalendarEvent, DayStats, PeriodStats};

#[derive(Debug, Serialize)]
pub struct CalendarEventResponse {
    pub booking_id: i64,
    pub title: String,
    pub customer_name: String,
    pub service_name: String,
    pub status: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub address: String,
}

impl From<CalendarEvent> for CalendarEventResponse {
    fn from(event: CalendarEvent) -> Self {
        let b = event.booking;
        Self {
            booking_id: b.id,
            title: format!("{} - {}", b.service_name, b.customer_name),
            customer_name: b.customer_name,
            service_name: b.service_name,
            status: b.status,
            start: event.start,
            end: event.end,
            color: event.color,
            total_price: b.total_price,
            address: b.address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarEventsResponse {
    pub events: Vec<CalendarEventResponse>,
}

#[derive(Debug, Serialize)]
pub struct DayStatsResponse {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_duration_hours: Decimal,
}

impl From<DayStats> for DayStatsResponse {
    fn from(stats: DayStats) -> Self {
        Self {
            count: stats.count,
            revenue: stats.revenue,
            average_duration_hours: stats.average_duration_hours,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DayViewResponse {
    pub date: NaiveDate,
    pub events: Vec<CalendarEventResponse>,
    pub stats: DayStatsResponse,
}

/// Slot times go out as wall-clock `HH:MM` strings.
#[derive(Debug, Serialize)]
pub struct AvailableSlotResponse {
    pub time: String,
    pub available: bool,
    pub duration_minutes: u32,
}

impl From<AvailableSlot> for AvailableSlotResponse {
    fn from(slot: AvailableSlot) -> Self {
        Self {
            time: slot.start.format("%H:%M").to_string(),
            available: slot.available,
            duration_minutes: slot.duration_minutes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvailableSlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<AvailableSlotResponse>,
}

#[derive(Debug, Serialize)]
pub struct PeriodStatsResponse {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_bookings: usize,
    pub status_counts: BTreeMap<String, usize>,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_booking_value: Decimal,
}

impl From<PeriodStats> for PeriodStatsResponse {
    fn from(stats: PeriodStats) -> Self {
        Self {
            period_start: stats.period_start,
            period_end: stats.period_end,
            total_bookings: stats.total_bookings,
            status_counts: stats.status_counts,
            revenue: stats.revenue,
            average_booking_value: stats.average_booking_value,
        }
    }
}
