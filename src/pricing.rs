//! Time-based pricing adjustments for reservations
//!
//! Pure functions: the adjustment depends only on the check-in and
//! check-out times of day.

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Fee applied when checking in before 15:00
pub const EARLY_CHECKIN_FEE: i64 = 500;
/// Discount applied when checking out before 11:00
pub const EARLY_CHECKOUT_DISCOUNT: i64 = -200;
/// Fee applied when checking out after 12:00
pub const LATE_CHECKOUT_FEE: i64 = 300;

/// Breakdown of time-based pricing adjustments for a booking
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PricingAdjustments {
    /// Check-in adjustment (zero or the early check-in fee)
    pub checkin_adjustment: Decimal,
    /// Check-out adjustment (early discount, late fee, or zero)
    pub checkout_adjustment: Decimal,
    /// Human-readable description of each applied adjustment
    pub breakdown: Vec<String>,
    /// Sum of both adjustments
    pub total_adjustment: Decimal,
}

/// Compute the time-based pricing adjustments for a stay.
///
/// Check-in before 15:00 adds an early check-in fee. Check-out before
/// 11:00 grants an early check-out discount, after 12:00 adds a late
/// check-out fee, and between 11:00 and 12:59 is the standard window.
pub fn calculate_time_pricing_adjustments(
    checkin_time: NaiveTime,
    checkout_time: NaiveTime,
) -> PricingAdjustments {
    let mut breakdown = Vec::new();

    let checkin_adjustment = if checkin_time.hour() < 15 {
        breakdown.push(format!(
            "Early check-in fee ({}): +{}",
            checkin_time.format("%H:%M"),
            EARLY_CHECKIN_FEE
        ));
        Decimal::from(EARLY_CHECKIN_FEE)
    } else {
        Decimal::ZERO
    };

    let checkout_hour = checkout_time.hour();
    let checkout_adjustment = if checkout_hour < 11 {
        breakdown.push(format!(
            "Early check-out discount ({}): {}",
            checkout_time.format("%H:%M"),
            EARLY_CHECKOUT_DISCOUNT
        ));
        Decimal::from(EARLY_CHECKOUT_DISCOUNT)
    } else if checkout_hour > 12 {
        breakdown.push(format!(
            "Late check-out fee ({}): +{}",
            checkout_time.format("%H:%M"),
            LATE_CHECKOUT_FEE
        ));
        Decimal::from(LATE_CHECKOUT_FEE)
    } else {
        Decimal::ZERO
    };

    PricingAdjustments {
        checkin_adjustment,
        checkout_adjustment,
        total_adjustment: checkin_adjustment + checkout_adjustment,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    #[test]
    fn standard_times_have_no_adjustment() {
        let adj = calculate_time_pricing_adjustments(t("15:00:00"), t("12:00:00"));
        assert_eq!(adj.total_adjustment, Decimal::ZERO);
        assert!(adj.breakdown.is_empty());
    }

    #[test]
    fn early_checkin_adds_fee() {
        let adj = calculate_time_pricing_adjustments(t("10:00:00"), t("12:00:00"));
        assert_eq!(adj.checkin_adjustment, Decimal::from(500));
        assert_eq!(adj.total_adjustment, Decimal::from(500));
        assert_eq!(adj.breakdown.len(), 1);
    }

    #[test]
    fn early_checkout_grants_discount() {
        let adj = calculate_time_pricing_adjustments(t("15:00:00"), t("09:00:00"));
        assert_eq!(adj.checkout_adjustment, Decimal::from(-200));
        assert_eq!(adj.total_adjustment, Decimal::from(-200));
    }

    #[test]
    fn late_checkout_adds_fee() {
        let adj = calculate_time_pricing_adjustments(t("15:00:00"), t("14:00:00"));
        assert_eq!(adj.checkout_adjustment, Decimal::from(300));
        assert_eq!(adj.total_adjustment, Decimal::from(300));
    }

    #[test]
    fn checkout_in_grace_window_has_no_adjustment() {
        for time in ["11:00:00", "11:59:00", "12:00:00", "12:59:00"] {
            let adj = calculate_time_pricing_adjustments(t("15:00:00"), t(time));
            assert_eq!(adj.checkout_adjustment, Decimal::ZERO, "time {}", time);
        }
    }

    #[test]
    fn adjustments_combine() {
        let adj = calculate_time_pricing_adjustments(t("09:30:00"), t("16:00:00"));
        assert_eq!(adj.total_adjustment, Decimal::from(800));
        assert_eq!(adj.breakdown.len(), 2);
    }

    #[test]
    fn boundary_hours() {
        // 14:59 is still early, 15:00 is not
        assert_eq!(
            calculate_time_pricing_adjustments(t("14:59:00"), t("12:00:00")).checkin_adjustment,
            Decimal::from(500)
        );
        assert_eq!(
            calculate_time_pricing_adjustments(t("15:00:00"), t("12:00:00")).checkin_adjustment,
            Decimal::ZERO
        );
        // 10:59 early discount, 13:00 late fee
        assert_eq!(
            calculate_time_pricing_adjustments(t("15:00:00"), t("10:59:00")).checkout_adjustment,
            Decimal::from(-200)
        );
        assert_eq!(
            calculate_time_pricing_adjustments(t("15:00:00"), t("13:00:00")).checkout_adjustment,
            Decimal::from(300)
        );
    }
}
