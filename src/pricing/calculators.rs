//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Area covered by a service's base price, in square meters.
const BASE_PRICE_AREA_SQM: Decimal = dec!(50);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use primeclean_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Compute the total price of a booking from the service's base price and the
/// area to clean.
///
/// The base price covers up to 50 square meters; larger areas scale the price
/// proportionally. Smaller areas never drop below the base price. The same
/// function backs booking creation and the quote estimate endpoint, so a quote
/// is always the price the booking will carry.
pub fn booking_total(base_price: Decimal, square_meters: Decimal) -> Decimal {
    let mut multiplier = square_meters / BASE_PRICE_AREA_SQM;
    if multiplier < Decimal::ONE {
        multiplier = Decimal::ONE;
    }
    round_money(base_price * multiplier, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        // Banker's rounding: 0.5 rounds to nearest even
        assert_eq!(round_money(dec!(2.5), 0), dec!(2)); // rounds down to even
        assert_eq!(round_money(dec!(3.5), 0), dec!(4)); // rounds up to even
        assert_eq!(round_money(dec!(4.5), 0), dec!(4)); // rounds down to even
        assert_eq!(round_money(dec!(5.5), 0), dec!(6)); // rounds up to even
    }

    #[test]
    fn test_round_money_bankers_rounding_decimal_places() {
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2)); // rounds to even
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4)); // rounds to even
        assert_eq!(round_money(dec!(2.45), 1), dec!(2.4)); // rounds to even
        assert_eq!(round_money(dec!(2.55), 1), dec!(2.6)); // rounds to even
    }

    #[test]
    fn test_round_money_normal_rounding() {
        // Non-halfway values round normally
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(1.2349), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.2351), 2), dec!(1.24));
    }

    #[test]
    fn test_round_money_zero() {
        assert_eq!(round_money(dec!(0), 2), dec!(0));
        assert_eq!(round_money(dec!(0.00), 2), dec!(0.00));
    }

    #[test]
    fn test_round_money_large_values() {
        assert_eq!(round_money(dec!(123456.789), 2), dec!(123456.79));
        assert_eq!(round_money(dec!(999999.995), 2), dec!(1000000.00));
    }

    // ==================== booking_total tests ====================

    #[test]
    fn test_booking_total_scales_with_area() {
        // 100 sqm = 2x the base area
        assert_eq!(booking_total(dec!(150), dec!(100)), dec!(300.00));
        // 75 sqm = 1.5x
        assert_eq!(booking_total(dec!(150), dec!(75)), dec!(225.00));
        // 200 sqm = 4x
        assert_eq!(booking_total(dec!(80), dec!(200)), dec!(320.00));
    }

    #[test]
    fn test_booking_total_floors_at_base_price() {
        // Areas at or below 50 sqm charge the full base price
        assert_eq!(booking_total(dec!(150), dec!(50)), dec!(150.00));
        assert_eq!(booking_total(dec!(150), dec!(30)), dec!(150.00));
        assert_eq!(booking_total(dec!(150), dec!(1)), dec!(150.00));
    }

    #[test]
    fn test_booking_total_rounds_to_cents() {
        // 55 sqm => multiplier 1.1, 99.99 * 1.1 = 109.989 -> 109.99
        assert_eq!(booking_total(dec!(99.99), dec!(55)), dec!(109.99));
        // 33 / 50 floors to 1
        assert_eq!(booking_total(dec!(119.95), dec!(33)), dec!(119.95));
    }

    #[test]
    fn test_booking_total_matches_quote_estimate() {
        // Same inputs must always produce the same figure; the quote endpoint
        // and booking creation both call this function.
        let quoted = booking_total(dec!(150), dec!(120));
        let booked = booking_total(dec!(150), dec!(120));
        assert_eq!(quoted, booked);
        assert_eq!(quoted, dec!(360.00));
    }
}
