//! Reservation pricing.
//!
//! A quote is a pure function of the car's daily rate, the optional pack's
//! daily rate, the selected option lines, and the rental date range. It is
//! recomputed inside every booking transaction from the just-written row
//! state; nothing here is cached.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

/// Minimum billable duration. A same-day pickup and return is one rental day.
pub const MIN_RENTAL_DAYS: i64 = 1;

/// Whole-day length of a rental. Dates are date-only, so this is the
/// calendar-day difference `date_to - date_from`, floored at
/// [`MIN_RENTAL_DAYS`]. The floor also absorbs an inverted range, which the
/// request validators reject before pricing ever runs.
pub fn rental_days(date_from: NaiveDate, date_to: NaiveDate) -> i64 {
    date_to
        .signed_duration_since(date_from)
        .num_days()
        .max(MIN_RENTAL_DAYS)
}

/// One priced option line: `quantity` units at `price_per_day` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionLine {
    pub quantity: i32,
    pub price_per_day: Decimal,
}

/// Price breakdown for a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Quote {
    pub duration_days: i64,
    pub base_price: Decimal,
    pub pack_price: Decimal,
    pub options_price: Decimal,
    pub total_price: Decimal,
}

fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the full price breakdown for a reservation.
///
/// `base = car_rate * days`, `pack = pack_rate * days` (zero when no pack is
/// attached), and each option line contributes
/// `price_per_day * quantity * days`. Every component scales by the full
/// rental duration; option lines are not independently date-ranged. All
/// amounts are rounded to 2 decimal places of currency precision.
pub fn quote(
    car_price_per_day: Decimal,
    pack_price_per_day: Option<Decimal>,
    options: &[OptionLine],
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Quote {
    let duration_days = rental_days(date_from, date_to);
    let days = Decimal::from(duration_days);

    let base_price = round_currency(car_price_per_day * days);
    let pack_price = round_currency(pack_price_per_day.unwrap_or(Decimal::ZERO) * days);
    let options_price = round_currency(
        options
            .iter()
            .map(|line| line.price_per_day * Decimal::from(line.quantity) * days)
            .sum::<Decimal>(),
    );

    Quote {
        duration_days,
        base_price,
        pack_price,
        options_price,
        total_price: round_currency(base_price + pack_price + options_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case(date(2025, 6, 1), date(2025, 6, 4), 3; "three full days")]
    #[test_case(date(2025, 6, 1), date(2025, 6, 2), 1; "single day")]
    #[test_case(date(2025, 6, 1), date(2025, 6, 1), 1; "same day floors to one")]
    #[test_case(date(2025, 6, 30), date(2025, 7, 2), 2; "spans month boundary")]
    #[test_case(date(2024, 2, 28), date(2024, 3, 1), 2; "leap day counted")]
    fn rental_days_counts_calendar_days(from: NaiveDate, to: NaiveDate, expected: i64) {
        assert_eq!(rental_days(from, to), expected);
    }

    #[test]
    fn quote_matches_worked_example() {
        // 300.00/day car, 3 days, no pack, 2x GPS at 50.00/day.
        let q = quote(
            dec!(300.00),
            None,
            &[OptionLine {
                quantity: 2,
                price_per_day: dec!(50.00),
            }],
            date(2025, 6, 1),
            date(2025, 6, 4),
        );
        assert_eq!(q.duration_days, 3);
        assert_eq!(q.base_price, dec!(900.00));
        assert_eq!(q.pack_price, dec!(0.00));
        assert_eq!(q.options_price, dec!(300.00));
        assert_eq!(q.total_price, dec!(1200.00));
    }

    #[test]
    fn absent_pack_prices_like_a_zero_priced_pack() {
        let lines = [
            OptionLine {
                quantity: 1,
                price_per_day: dec!(12.50),
            },
            OptionLine {
                quantity: 3,
                price_per_day: dec!(4.25),
            },
        ];
        let without = quote(
            dec!(89.90),
            None,
            &lines,
            date(2025, 3, 10),
            date(2025, 3, 15),
        );
        let with_zero = quote(
            dec!(89.90),
            Some(dec!(0.00)),
            &lines,
            date(2025, 3, 10),
            date(2025, 3, 15),
        );
        assert_eq!(without.total_price, with_zero.total_price);
    }

    #[test]
    fn pack_scales_by_duration() {
        let q = quote(
            dec!(100.00),
            Some(dec!(25.00)),
            &[],
            date(2025, 1, 1),
            date(2025, 1, 5),
        );
        assert_eq!(q.pack_price, dec!(100.00));
        assert_eq!(q.total_price, dec!(500.00));
    }

    #[test]
    fn no_options_contributes_zero() {
        let q = quote(dec!(55.00), None, &[], date(2025, 8, 1), date(2025, 8, 3));
        assert_eq!(q.options_price, dec!(0.00));
        assert_eq!(q.total_price, dec!(110.00));
    }

    #[test]
    fn total_rounds_to_two_decimals() {
        // 33.333/day over 3 days = 99.999, which rounds up at 2 dp.
        let q = quote(dec!(33.333), None, &[], date(2025, 5, 1), date(2025, 5, 4));
        assert_eq!(q.total_price, dec!(100.00));
    }

    #[test]
    fn quote_is_idempotent_for_unchanged_inputs() {
        let lines = [OptionLine {
            quantity: 2,
            price_per_day: dec!(7.77),
        }];
        let first = quote(
            dec!(64.00),
            Some(dec!(15.00)),
            &lines,
            date(2025, 9, 5),
            date(2025, 9, 12),
        );
        let second = quote(
            dec!(64.00),
            Some(dec!(15.00)),
            &lines,
            date(2025, 9, 5),
            date(2025, 9, 12),
        );
        assert_eq!(first, second);
    }
}
