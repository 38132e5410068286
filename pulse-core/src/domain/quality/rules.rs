// pulse-core/src/domain/quality/rules.rs
//
// Field-level predicates. Every rule is pure: raw value(s) in, verdict out.
// Coercion failures are verdicts, never errors.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

use super::value::RawValue;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const PRICE_MIN: f64 = 0.0;
pub const PRICE_MAX: f64 = 10_000.0;
pub const QUANTITY_MIN: f64 = 1.0;
pub const QUANTITY_MAX: f64 = 100.0;

pub const VALID_CITIES: [&str; 3] = ["Dubai", "Abu Dhabi", "Sharjah"];
pub const VALID_CHANNELS: [&str; 3] = ["App", "Web", "Marketplace"];
pub const VALID_PAYMENT_STATUSES: [&str; 3] = ["Paid", "Failed", "Refunded"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(String),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(msg) => Some(msg),
        }
    }
}

fn timestamp_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

pub fn validate_timestamp(value: &RawValue) -> Verdict {
    if value.is_blank() {
        return Verdict::Invalid("Missing timestamp".to_string());
    }
    let text = value.to_string();
    if !timestamp_pattern().is_match(&text) {
        return Verdict::Invalid(format!("Invalid format: {}", text));
    }
    match NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT) {
        Ok(_) => Verdict::Valid,
        Err(_) => Verdict::Invalid(format!("Unparsable: {}", text)),
    }
}

/// An empty cell coerces to NaN, which sits outside no bound: it passes.
pub fn validate_price(value: &RawValue) -> Verdict {
    let Some(price) = value.as_float() else {
        return Verdict::Invalid(format!("Not numeric: {}", value));
    };
    if !price.is_nan() && !(PRICE_MIN..=PRICE_MAX).contains(&price) {
        return Verdict::Invalid(format!(
            "Outside range [{}, {}]: {}",
            PRICE_MIN, PRICE_MAX, price
        ));
    }
    Verdict::Valid
}

/// Fractional quantities are truncated toward zero before the range check (2.9 -> 2).
/// Unlike price, an empty cell has no integer value and fails.
pub fn validate_quantity(value: &RawValue) -> Verdict {
    let Some(qty) = value.as_float().filter(|n| n.is_finite()) else {
        return Verdict::Invalid(format!("Not numeric: {}", value));
    };
    // `+ 0.0` folds -0 into 0.
    let qty = qty.trunc() + 0.0;
    if !(QUANTITY_MIN..=QUANTITY_MAX).contains(&qty) {
        return Verdict::Invalid(format!(
            "Outside range [{}, {}]: {}",
            QUANTITY_MIN, QUANTITY_MAX, qty
        ));
    }
    Verdict::Valid
}

fn validate_membership(
    value: &RawValue,
    allowed: &[&str],
    missing_label: &str,
    invalid_label: &str,
) -> Verdict {
    if value.is_blank() {
        return Verdict::Invalid(format!("Missing {}", missing_label));
    }
    let text = value.to_string();
    let trimmed = text.trim();
    if allowed.contains(&trimmed) {
        Verdict::Valid
    } else {
        Verdict::Invalid(format!("Invalid {}: {}", invalid_label, trimmed))
    }
}

pub fn validate_city(value: &RawValue) -> Verdict {
    validate_membership(value, &VALID_CITIES, "city", "city")
}

pub fn validate_channel(value: &RawValue) -> Verdict {
    validate_membership(value, &VALID_CHANNELS, "channel", "channel")
}

pub fn validate_payment_status(value: &RawValue) -> Verdict {
    validate_membership(value, &VALID_PAYMENT_STATUSES, "payment_status", "status")
}

/// `unit_cost <= base_price`. Non-numeric input on either side passes: the rule only judges
/// pairs it can actually compare.
pub fn validate_cost_constraint(cost: &RawValue, price: &RawValue) -> Verdict {
    match (cost.as_number(), price.as_number()) {
        (Some(c), Some(p)) if c > p => Verdict::Invalid(format!("Cost {} > Price {}", c, p)),
        _ => Verdict::Valid,
    }
}

/// An empty cell coerces to NaN, which is never negative: it passes.
pub fn validate_stock(value: &RawValue) -> Verdict {
    match value.as_float() {
        None => Verdict::Invalid(format!("Not numeric: {}", value)),
        Some(s) if s < 0.0 => Verdict::Invalid(format!("Negative stock: {}", s)),
        Some(_) => Verdict::Valid,
    }
}

/// Presence check: an absent column and an explicit null are both missing.
pub fn validate_present(value: Option<&RawValue>, field: &str) -> Verdict {
    match value {
        None | Some(RawValue::Null) => Verdict::Invalid(format!("Missing {}", field)),
        Some(_) => Verdict::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> RawValue {
        RawValue::Number(v)
    }

    fn t(s: &str) -> RawValue {
        RawValue::text(s)
    }

    #[test]
    fn test_timestamp_valid() {
        assert!(validate_timestamp(&t("2024-09-01 13:45:00")).is_valid());
    }

    #[test]
    fn test_timestamp_missing_and_malformed() {
        assert_eq!(
            validate_timestamp(&RawValue::Null).diagnostic(),
            Some("Missing timestamp")
        );
        assert_eq!(validate_timestamp(&t("")).diagnostic(), Some("Missing timestamp"));
        assert_eq!(
            validate_timestamp(&t("2024/09/01 13:45")).diagnostic(),
            Some("Invalid format: 2024/09/01 13:45")
        );
        assert_eq!(
            validate_timestamp(&n(20240901.0)).diagnostic(),
            Some("Invalid format: 20240901")
        );
    }

    #[test]
    fn test_timestamp_matches_pattern_but_not_calendar() {
        assert_eq!(
            validate_timestamp(&t("2024-13-40 99:99:99")).diagnostic(),
            Some("Unparsable: 2024-13-40 99:99:99")
        );
        assert!(!validate_timestamp(&t("2023-02-29 10:00:00")).is_valid());
        assert!(validate_timestamp(&t("2024-02-29 10:00:00")).is_valid());
    }

    #[test]
    fn test_price_range_inclusive() {
        for p in [0.0, 0.01, 49.5, 9999.99, 10000.0] {
            assert!(validate_price(&n(p)).is_valid(), "price {} should pass", p);
        }
        assert_eq!(
            validate_price(&n(10000.01)).diagnostic(),
            Some("Outside range [0, 10000]: 10000.01")
        );
        assert_eq!(
            validate_price(&n(-0.5)).diagnostic(),
            Some("Outside range [0, 10000]: -0.5")
        );
    }

    #[test]
    fn test_price_text_coercion() {
        assert!(validate_price(&t("120.50")).is_valid());
        assert_eq!(validate_price(&t("free")).diagnostic(), Some("Not numeric: free"));
    }

    #[test]
    fn test_empty_numeric_cells() {
        assert!(validate_price(&RawValue::Null).is_valid());
        assert!(validate_price(&n(f64::NAN)).is_valid());
        assert!(validate_stock(&RawValue::Null).is_valid());
        assert!(validate_stock(&n(f64::NAN)).is_valid());
        assert_eq!(validate_quantity(&RawValue::Null).diagnostic(), Some("Not numeric: null"));
        assert_eq!(validate_quantity(&n(f64::NAN)).diagnostic(), Some("Not numeric: NaN"));
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(&n(1.0)).is_valid());
        assert!(validate_quantity(&n(100.0)).is_valid());
        assert_eq!(
            validate_quantity(&n(0.0)).diagnostic(),
            Some("Outside range [1, 100]: 0")
        );
        assert_eq!(
            validate_quantity(&n(101.0)).diagnostic(),
            Some("Outside range [1, 100]: 101")
        );
    }

    #[test]
    fn test_quantity_truncates_fraction() {
        assert!(validate_quantity(&t("100.9")).is_valid());
        assert!(!validate_quantity(&n(0.99)).is_valid());
        assert_eq!(
            validate_quantity(&t("many")).diagnostic(),
            Some("Not numeric: many")
        );
        assert!(!validate_quantity(&n(f64::INFINITY)).is_valid());
        assert_eq!(
            validate_quantity(&n(-0.5)).diagnostic(),
            Some("Outside range [1, 100]: 0")
        );
    }

    #[test]
    fn test_quantity_huge_value_reported_as_is() {
        assert_eq!(
            validate_quantity(&n(1e30)).diagnostic(),
            Some("Outside range [1, 100]: 1000000000000000000000000000000")
        );
        assert_eq!(
            validate_quantity(&t("250.7")).diagnostic(),
            Some("Outside range [1, 100]: 250")
        );
    }

    #[test]
    fn test_city_membership() {
        assert!(validate_city(&t("Dubai")).is_valid());
        assert!(validate_city(&t("  Abu Dhabi ")).is_valid());
        assert_eq!(validate_city(&t("Dubayy")).diagnostic(), Some("Invalid city: Dubayy"));
        assert_eq!(validate_city(&RawValue::Null).diagnostic(), Some("Missing city"));
        assert_eq!(validate_city(&t("dubai")).diagnostic(), Some("Invalid city: dubai"));
    }

    #[test]
    fn test_channel_and_status_membership() {
        assert!(validate_channel(&t("Marketplace")).is_valid());
        assert_eq!(
            validate_channel(&t("Phone")).diagnostic(),
            Some("Invalid channel: Phone")
        );
        assert_eq!(validate_channel(&t("")).diagnostic(), Some("Missing channel"));

        for status in ["Paid", "Failed", "Refunded"] {
            assert!(validate_payment_status(&t(status)).is_valid());
        }
        assert_eq!(
            validate_payment_status(&t("Pending")).diagnostic(),
            Some("Invalid status: Pending")
        );
        assert_eq!(
            validate_payment_status(&RawValue::Null).diagnostic(),
            Some("Missing payment_status")
        );
    }

    #[test]
    fn test_cost_constraint() {
        assert_eq!(
            validate_cost_constraint(&n(60.0), &n(50.0)),
            Verdict::Invalid("Cost 60 > Price 50".to_string())
        );
        assert!(validate_cost_constraint(&n(40.0), &n(50.0)).is_valid());
        assert!(validate_cost_constraint(&n(50.0), &n(50.0)).is_valid());
        assert!(validate_cost_constraint(&RawValue::Null, &n(50.0)).is_valid());
        assert!(validate_cost_constraint(&n(60.0), &t("n/a")).is_valid());
    }

    #[test]
    fn test_stock() {
        assert!(validate_stock(&n(0.0)).is_valid());
        assert!(validate_stock(&n(120.0)).is_valid());
        assert_eq!(validate_stock(&n(-50.0)).diagnostic(), Some("Negative stock: -50"));
        assert_eq!(validate_stock(&t("lots")).diagnostic(), Some("Not numeric: lots"));
    }

    #[test]
    fn test_presence() {
        assert!(validate_present(Some(&n(0.0)), "discount_pct").is_valid());
        assert_eq!(
            validate_present(None, "discount_pct").diagnostic(),
            Some("Missing discount_pct")
        );
        assert!(!validate_present(Some(&RawValue::Null), "discount_pct").is_valid());
    }
}
