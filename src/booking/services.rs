//! Booking operations with database access.
//!
//! Validation and pricing are pure; persistence goes through `queries`.

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::cache::AppCache;
use crate::error::{AppError, Result};
use crate::pricing;

use super::models::{Booking, BookingFilter};
use super::queries::{self, InsertBooking};
use super::status::BookingStatus;

/// Who is paying for a booking: a registered member (with a contact snapshot)
/// or a guest. Exactly one of the two forms exists by construction.
#[derive(Debug, Clone)]
pub enum Payer {
    Member {
        customer_ref: i64,
        name: String,
        email: String,
        phone: Option<String>,
    },
    Guest {
        name: String,
        email: String,
        phone: String,
        billing_address: String,
    },
}

/// Validated input for booking creation, before pricing
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub service_id: i64,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    pub square_meters: Decimal,
    pub special_instructions: Option<String>,
    pub payer: Payer,
}

/// Validate creation input against `today` (pure, so the cutoff is testable)
pub fn validate_new_booking(input: &NewBooking, today: NaiveDate) -> Result<()> {
    if input.scheduled_date < today {
        return Err(AppError::Validation(
            "scheduled_date must not be in the past".to_string(),
        ));
    }
    if input.square_meters <= Decimal::ZERO {
        return Err(AppError::Validation(
            "square_meters must be greater than zero".to_string(),
        ));
    }
    if input.address.trim().is_empty() {
        return Err(AppError::Validation("address is required".to_string()));
    }

    match &input.payer {
        Payer::Member {
            customer_ref,
            name,
            email,
            ..
        } => {
            if *customer_ref <= 0 {
                return Err(AppError::Validation(
                    "customer_ref must be a valid account id".to_string(),
                ));
            }
            if name.trim().is_empty() || email.trim().is_empty() {
                return Err(AppError::Validation(
                    "customer name and email are required".to_string(),
                ));
            }
        }
        Payer::Guest {
            name,
            email,
            phone,
            billing_address,
        } => {
            if name.trim().is_empty() || email.trim().is_empty() || phone.trim().is_empty() {
                return Err(AppError::Validation(
                    "guest name, email, and phone are required".to_string(),
                ));
            }
            if billing_address.trim().is_empty() {
                return Err(AppError::Validation(
                    "billing address is required for guest bookings".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Create a booking with status `pending`.
///
/// The total price is computed here, once, from the service's base price and
/// the requested area; every later consumer (invoice, reports) reads the
/// stored figure.
pub async fn create_booking(
    pool: &PgPool,
    cache: &AppCache,
    input: NewBooking,
) -> Result<Booking> {
    validate_new_booking(&input, Utc::now().date_naive())?;

    // Unknown service id is a validation failure on this path, not a 404
    let service = cache
        .service(pool, input.service_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound => AppError::Validation("service not found".to_string()),
            other => other,
        })?;

    let total_price = pricing::booking_total(service.base_price, input.square_meters);

    let (customer_ref, customer_name, customer_email, customer_phone, is_guest, billing_address) =
        match &input.payer {
            Payer::Member {
                customer_ref,
                name,
                email,
                phone,
            } => (
                Some(*customer_ref),
                name.as_str(),
                email.as_str(),
                phone.as_deref(),
                false,
                None,
            ),
            Payer::Guest {
                name,
                email,
                phone,
                billing_address,
            } => (
                None,
                name.as_str(),
                email.as_str(),
                Some(phone.as_str()),
                true,
                Some(billing_address.as_str()),
            ),
        };

    let id = queries::insert_booking(
        pool,
        &InsertBooking {
            service_id: input.service_id,
            scheduled_date: input.scheduled_date,
            scheduled_time: input.scheduled_time,
            address: &input.address,
            square_meters: input.square_meters,
            special_instructions: input.special_instructions.as_deref(),
            total_price,
            customer_ref,
            customer_name,
            customer_email,
            customer_phone,
            is_guest,
            billing_address,
        },
    )
    .await?;

    info!(
        booking_id = id,
        service = %service.name,
        total_price = %total_price,
        "Booking created"
    );

    queries::get_booking(pool, id).await
}

/// Apply a status transition through the state machine.
///
/// On an illegal move the booking is left untouched and the caller receives
/// `InvalidTransition`; a concurrent transition that wins the race surfaces
/// as `Conflict`.
pub async fn update_status(pool: &PgPool, id: i64, new_status: BookingStatus) -> Result<Booking> {
    let booking = queries::get_booking(pool, id).await?;
    let current = booking.status()?;

    current.check_transition(new_status)?;

    let changed = queries::update_status_guarded(pool, id, current, new_status).await?;
    if changed == 0 {
        return Err(AppError::Conflict(format!(
            "booking {} was updated concurrently",
            id
        )));
    }

    info!(
        booking_id = id,
        from = current.as_str(),
        to = new_status.as_str(),
        "Booking status updated"
    );

    queries::get_booking(pool, id).await
}

/// List bookings with the explicit filter
pub async fn list_bookings(pool: &PgPool, filter: BookingFilter) -> Result<Vec<Booking>> {
    queries::list_bookings(pool, filter).await
}

/// Pure pricing preview; persists nothing
pub async fn quote_estimate(
    pool: &PgPool,
    cache: &AppCache,
    service_id: i64,
    square_meters: Decimal,
) -> Result<(String, Decimal)> {
    if square_meters <= Decimal::ZERO {
        return Err(AppError::Validation(
            "square_meters must be greater than zero".to_string(),
        ));
    }

    let service = cache.service(pool, service_id).await?;
    let estimate = pricing::booking_total(service.base_price, square_meters);
    Ok((service.name, estimate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn member_input() -> NewBooking {
        NewBooking {
            service_id: 1,
            scheduled_date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            scheduled_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            address: "12 Ocean Dr, Miami, FL 33101".to_string(),
            square_meters: dec!(80),
            special_instructions: None,
            payer: Payer::Member {
                customer_ref: 7,
                name: "Alex Kim".to_string(),
                email: "alex@example.com".to_string(),
                phone: None,
            },
        }
    }

    const TODAY: fn() -> NaiveDate = || NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    #[test]
    fn test_validate_accepts_future_and_same_day() {
        let mut input = member_input();
        assert!(validate_new_booking(&input, TODAY()).is_ok());

        input.scheduled_date = TODAY();
        assert!(validate_new_booking(&input, TODAY()).is_ok());
    }

    #[test]
    fn test_validate_rejects_past_date() {
        let mut input = member_input();
        input.scheduled_date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        let err = validate_new_booking(&input, TODAY()).unwrap_err();
        assert_eq!(err.error_type(), "validation");
    }

    #[test]
    fn test_validate_rejects_non_positive_area() {
        let mut input = member_input();
        input.square_meters = dec!(0);
        assert!(validate_new_booking(&input, TODAY()).is_err());

        input.square_meters = dec!(-5);
        assert!(validate_new_booking(&input, TODAY()).is_err());
    }

    #[test]
    fn test_validate_requires_member_identity() {
        let mut input = member_input();
        input.payer = Payer::Member {
            customer_ref: 0,
            name: "Alex Kim".to_string(),
            email: "alex@example.com".to_string(),
            phone: None,
        };
        assert!(validate_new_booking(&input, TODAY()).is_err());
    }

    #[test]
    fn test_validate_requires_guest_contact_and_billing() {
        let mut input = member_input();
        input.payer = Payer::Guest {
            name: "Dana Reyes".to_string(),
            email: "dana@example.com".to_string(),
            phone: String::new(),
            billing_address: "500 Brickell Ave, Miami, FL 33131".to_string(),
        };
        assert!(validate_new_booking(&input, TODAY()).is_err());

        input.payer = Payer::Guest {
            name: "Dana Reyes".to_string(),
            email: "dana@example.com".to_string(),
            phone: "305-555-0101".to_string(),
            billing_address: "  ".to_string(),
        };
        assert!(validate_new_booking(&input, TODAY()).is_err());
    }
}
