use std::collections::BTreeMap;

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::PgPool;

use super::models::CalendarBooking;
use super::queries;
use crate::booking::BookingStatus;
use crate::error::{AppError, Result};
use crate::pricing::round_money;

const MINUTES_PER_HOUR: Decimal = dec!(60);

// Bookable business hours, local to the service area.
const BUSINESS_START_HOUR: u32 = 9;
const BUSINESS_END_HOUR: u32 = 18;
const SLOT_MINUTES: u32 = 60;

/// Recent window for `GET /admin/calendar/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(AppError::Validation(format!(
                "unknown period '{other}', expected week, month or year"
            ))),
        }
    }

    pub fn days(&self) -> u64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
        }
    }

    pub fn window_from(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = today
            .checked_sub_days(Days::new(self.days()))
            .unwrap_or(today);
        (start, today)
    }
}

/// A booking rendered as a calendar event with a synthesized time window.
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub booking: CalendarBooking,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStats {
    pub count: usize,
    pub revenue: Decimal,
    pub average_duration_hours: Decimal,
}

/// One bookable hour within business hours, flagged if an existing
/// booking overlaps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableSlot {
    pub start: chrono::NaiveTime,
    pub available: bool,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct PeriodStats {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_bookings: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub revenue: Decimal,
    pub average_booking_value: Decimal,
}

/// Start and end instants for a booking. The end is the start plus the
/// service duration, clamped to whole minutes.
pub fn event_window(booking: &CalendarBooking) -> (NaiveDateTime, NaiveDateTime) {
    let start = booking.scheduled_date.and_time(booking.scheduled_time);
    let minutes = (booking.duration_hours * MINUTES_PER_HOUR)
        .to_i64()
        .unwrap_or(0)
        .max(0);
    let end = start + Duration::minutes(minutes);
    (start, end)
}

pub fn status_color(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "#f59e0b",
        BookingStatus::Confirmed => "#3b82f6",
        BookingStatus::InProgress => "#8b5cf6",
        BookingStatus::Completed => "#10b981",
        BookingStatus::Cancelled => "#ef4444",
    }
}

pub fn to_event(booking: CalendarBooking) -> Result<CalendarEvent> {
    let status = BookingStatus::parse(&booking.status)?;
    let (start, end) = event_window(&booking);
    Ok(CalendarEvent {
        color: status_color(status),
        start,
        end,
        booking,
    })
}

/// Hourly availability for one day against the events already booked on
/// it. A slot is taken when its hour overlaps any active event's window;
/// cancelled bookings free their slot.
pub fn available_slots(date: NaiveDate, events: &[CalendarEvent]) -> Vec<AvailableSlot> {
    (BUSINESS_START_HOUR..BUSINESS_END_HOUR)
        .map(|hour| {
            let start = chrono::NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
            let slot_start = date.and_time(start);
            let slot_end = slot_start + Duration::minutes(i64::from(SLOT_MINUTES));
            let available = !events.iter().any(|event| {
                event.booking.status != BookingStatus::Cancelled.as_str()
                    && slot_start < event.end
                    && slot_end > event.start
            });
            AvailableSlot {
                start,
                available,
                duration_minutes: SLOT_MINUTES,
            }
        })
        .collect()
}

/// Per-day aggregation. Averages are rounded to two places; an empty day
/// reports zeros rather than failing.
pub fn day_stats(bookings: &[CalendarBooking]) -> DayStats {
    let count = bookings.len();
    let revenue: Decimal = bookings.iter().map(|b| b.total_price).sum();
    let average_duration_hours = if count == 0 {
        Decimal::ZERO
    } else {
        let total: Decimal = bookings.iter().map(|b| b.duration_hours).sum();
        round_money(total / Decimal::from(count), 2)
    };
    DayStats {
        count,
        revenue,
        average_duration_hours,
    }
}

/// Aggregation over a recent window. Revenue counts completed bookings
/// only; the average is revenue over completed count.
pub fn period_stats(
    bookings: &[CalendarBooking],
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodStats {
    let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut revenue = Decimal::ZERO;
    let mut completed = 0usize;
    for booking in bookings {
        *status_counts.entry(booking.status.clone()).or_insert(0) += 1;
        if booking.status == BookingStatus::Completed.as_str() {
            revenue += booking.total_price;
            completed += 1;
        }
    }
    let average_booking_value = if completed == 0 {
        Decimal::ZERO
    } else {
        round_money(revenue / Decimal::from(completed), 2)
    };
    PeriodStats {
        period_start: start,
        period_end: end,
        total_bookings: bookings.len(),
        status_counts,
        revenue,
        average_booking_value,
    }
}

pub async fn events(pool: &PgPool, start: NaiveDate, end: NaiveDate) -> Result<Vec<CalendarEvent>> {
    if start > end {
        return Err(AppError::Validation(
            "start must be on or before end".into(),
        ));
    }
    queries::bookings_in_range(pool, start, end)
        .await?
        .into_iter()
        .map(to_event)
        .collect()
}

pub async fn day(pool: &PgPool, date: NaiveDate) -> Result<(Vec<CalendarEvent>, DayStats)> {
    let bookings = queries::bookings_in_range(pool, date, date).await?;
    let stats = day_stats(&bookings);
    let events = bookings.into_iter().map(to_event).collect::<Result<_>>()?;
    Ok((events, stats))
}

pub async fn slots(pool: &PgPool, date: NaiveDate) -> Result<Vec<AvailableSlot>> {
    let bookings = queries::bookings_in_range(pool, date, date).await?;
    let events = bookings
        .into_iter()
        .map(to_event)
        .collect::<Result<Vec<_>>>()?;
    Ok(available_slots(date, &events))
}

pub async fn stats(pool: &PgPool, period: Period) -> Result<PeriodStats> {
    let today = Utc::now().date_naive();
    let (start, end) = period.window_from(today);
    let bookings = queries::bookings_in_range(pool, start, end).await?;
    Ok(period_stats(&bookings, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(
        id: i64,
        status: &str,
        day: NaiveDate,
        time: (u32, u32),
        duration: Decimal,
        price: Decimal,
    ) -> CalendarBooking {
        CalendarBooking {
            id,
            customer_name: "Ana Cliente".into(),
            service_name: "Deep Clean".into(),
            status: status.into(),
            scheduled_date: day,
            scheduled_time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            duration_hours: duration,
            total_price: price,
            address: "12 Palm Ave".into(),
        }
    }

    #[test]
    fn event_window_spans_service_duration() {
        let b = booking(
            1,
            "confirmed",
            date(2026, 9, 3),
            (9, 30),
            dec!(2.5),
            dec!(150.00),
        );
        let (start, end) = event_window(&b);
        assert_eq!(start, date(2026, 9, 3).and_hms_opt(9, 30, 0).unwrap());
        assert_eq!(end, date(2026, 9, 3).and_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn late_evening_booking_stays_on_its_date() {
        let b = booking(
            2,
            "pending",
            date(2026, 9, 3),
            (23, 0),
            dec!(2),
            dec!(100.00),
        );
        let (start, end) = event_window(&b);
        assert_eq!(start.date(), date(2026, 9, 3));
        // The window may run past midnight but the event is bucketed by
        // its scheduled date.
        assert_eq!(end, date(2026, 9, 4).and_hms_opt(1, 0, 0).unwrap());
        assert_eq!(b.scheduled_date, date(2026, 9, 3));
    }

    #[test]
    fn day_stats_on_empty_day_are_zero() {
        let stats = day_stats(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.revenue, Decimal::ZERO);
        assert_eq!(stats.average_duration_hours, Decimal::ZERO);
    }

    #[test]
    fn day_stats_sum_and_average() {
        let d = date(2026, 9, 3);
        let bookings = vec![
            booking(1, "confirmed", d, (9, 0), dec!(2), dec!(150.00)),
            booking(2, "pending", d, (13, 0), dec!(3), dec!(225.50)),
        ];
        let stats = day_stats(&bookings);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.revenue, dec!(375.50));
        assert_eq!(stats.average_duration_hours, dec!(2.50));
    }

    #[test]
    fn period_revenue_counts_completed_only() {
        let d = date(2026, 9, 3);
        let bookings = vec![
            booking(1, "completed", d, (9, 0), dec!(2), dec!(150.00)),
            booking(2, "completed", d, (12, 0), dec!(2), dec!(250.00)),
            booking(3, "cancelled", d, (15, 0), dec!(2), dec!(999.00)),
            booking(4, "pending", d, (17, 0), dec!(2), dec!(80.00)),
        ];
        let stats = period_stats(&bookings, d, d);
        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.revenue, dec!(400.00));
        assert_eq!(stats.average_booking_value, dec!(200.00));
        assert_eq!(stats.status_counts.get("completed"), Some(&2));
        assert_eq!(stats.status_counts.get("cancelled"), Some(&1));
    }

    #[test]
    fn empty_day_has_all_business_hours_open() {
        let slots = available_slots(date(2026, 9, 3), &[]);
        assert_eq!(slots.len(), 9);
        assert!(slots.iter().all(|s| s.available));
        assert_eq!(slots[0].start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(slots[8].start, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn booked_hours_are_unavailable() {
        let d = date(2026, 9, 3);
        let event = to_event(booking(
            1,
            "confirmed",
            d,
            (10, 0),
            dec!(2),
            dec!(150.00),
        ))
        .unwrap();
        let slots = available_slots(d, &[event]);
        // 10:00 and 11:00 are covered by the two-hour job
        assert!(slots[0].available);
        assert!(!slots[1].available);
        assert!(!slots[2].available);
        assert!(slots[3].available);
    }

    #[test]
    fn partial_hour_overlap_blocks_the_slot() {
        let d = date(2026, 9, 3);
        let event = to_event(booking(
            1,
            "confirmed",
            d,
            (9, 30),
            dec!(2),
            dec!(150.00),
        ))
        .unwrap();
        let slots = available_slots(d, &[event]);
        // The 09:30-11:30 job clips the 9, 10 and 11 o'clock slots
        assert!(!slots[0].available);
        assert!(!slots[1].available);
        assert!(!slots[2].available);
        assert!(slots[3].available);
    }

    #[test]
    fn cancelled_bookings_free_their_slot() {
        let d = date(2026, 9, 3);
        let event = to_event(booking(
            1,
            "cancelled",
            d,
            (10, 0),
            dec!(2),
            dec!(150.00),
        ))
        .unwrap();
        let slots = available_slots(d, &[event]);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn period_parse_accepts_known_windows() {
        assert_eq!(Period::parse("week").unwrap(), Period::Week);
        assert_eq!(Period::parse("month").unwrap(), Period::Month);
        assert_eq!(Period::parse("year").unwrap(), Period::Year);
        assert!(Period::parse("quarter").is_err());
    }

    #[test]
    fn period_window_is_inclusive_of_today() {
        let today = date(2026, 9, 10);
        let (start, end) = Period::Week.window_from(today);
        assert_eq!(start, date(2026, 9, 3));
        assert_eq!(end, today);
    }
}
