// pulse-core/src/domain/quality/record_validator.rs

use super::issue::{Finding, IssueType};
use super::record::{InventoryRecord, ProductRecord, Record, SalesRecord, fields};
use super::rules::{self, Verdict};

/// One entry of a kind's ordered rule list. `run` returns `None` when the governing
/// field is absent from the record, in which case the check is skipped.
pub struct Check<R> {
    pub name: &'static str,
    pub issue_type: IssueType,
    pub run: fn(&R) -> Option<Verdict>,
}

impl<R> Check<R> {
    fn apply(&self, record: &R) -> Option<Finding> {
        match (self.run)(record)? {
            Verdict::Valid => None,
            Verdict::Invalid(detail) => Some(Finding::new(self.issue_type, detail)),
        }
    }
}

// --- SALES ---

fn sales_timestamp(r: &SalesRecord) -> Option<Verdict> {
    r.order_time.as_ref().map(rules::validate_timestamp)
}

fn sales_price(r: &SalesRecord) -> Option<Verdict> {
    r.selling_price_aed.as_ref().map(rules::validate_price)
}

fn sales_quantity(r: &SalesRecord) -> Option<Verdict> {
    r.qty.as_ref().map(rules::validate_quantity)
}

fn sales_city(r: &SalesRecord) -> Option<Verdict> {
    r.city.as_ref().map(rules::validate_city)
}

fn sales_channel(r: &SalesRecord) -> Option<Verdict> {
    r.channel.as_ref().map(rules::validate_channel)
}

fn sales_payment_status(r: &SalesRecord) -> Option<Verdict> {
    r.payment_status.as_ref().map(rules::validate_payment_status)
}

fn sales_cost(r: &SalesRecord) -> Option<Verdict> {
    match (&r.unit_cost_aed, &r.base_price_aed) {
        (Some(cost), Some(price)) => Some(rules::validate_cost_constraint(cost, price)),
        _ => None,
    }
}

// Always runs: a missing column is itself the defect.
fn sales_discount(r: &SalesRecord) -> Option<Verdict> {
    Some(rules::validate_present(
        r.discount_pct.as_ref(),
        fields::DISCOUNT_PCT,
    ))
}

pub const SALES_CHECKS: &[Check<SalesRecord>] = &[
    Check {
        name: "timestamp",
        issue_type: IssueType::InvalidTimestamp,
        run: sales_timestamp,
    },
    Check {
        name: "price",
        issue_type: IssueType::OutlierValue,
        run: sales_price,
    },
    Check {
        name: "quantity",
        issue_type: IssueType::OutlierValue,
        run: sales_quantity,
    },
    Check {
        name: "city",
        issue_type: IssueType::InvalidCity,
        run: sales_city,
    },
    Check {
        name: "channel",
        issue_type: IssueType::InvalidChannel,
        run: sales_channel,
    },
    Check {
        name: "payment_status",
        issue_type: IssueType::InvalidValue,
        run: sales_payment_status,
    },
    Check {
        name: "cost_constraint",
        issue_type: IssueType::ConstraintViolation,
        run: sales_cost,
    },
    Check {
        name: "discount_present",
        issue_type: IssueType::MissingValue,
        run: sales_discount,
    },
];

// --- INVENTORY ---

fn inventory_stock(r: &InventoryRecord) -> Option<Verdict> {
    r.stock_on_hand.as_ref().map(rules::validate_stock)
}

pub const INVENTORY_CHECKS: &[Check<InventoryRecord>] = &[Check {
    name: "stock",
    issue_type: IssueType::ImpossibleValue,
    run: inventory_stock,
}];

// --- PRODUCTS ---

fn product_cost_present(r: &ProductRecord) -> Option<Verdict> {
    Some(rules::validate_present(
        r.unit_cost_aed.as_ref(),
        fields::UNIT_COST,
    ))
}

fn product_cost(r: &ProductRecord) -> Option<Verdict> {
    match (&r.unit_cost_aed, &r.base_price_aed) {
        (Some(cost), Some(price)) => Some(rules::validate_cost_constraint(cost, price)),
        _ => None,
    }
}

pub const PRODUCT_CHECKS: &[Check<ProductRecord>] = &[
    Check {
        name: "unit_cost_present",
        issue_type: IssueType::MissingValue,
        run: product_cost_present,
    },
    Check {
        name: "cost_constraint",
        issue_type: IssueType::ConstraintViolation,
        run: product_cost,
    },
];

/// Applies the rule list of the record's kind, in list order.
pub struct RecordValidator;

impl RecordValidator {
    pub fn validate(record: &Record) -> Vec<Finding> {
        match record {
            Record::Sales(r) => Self::run_checks(SALES_CHECKS, r),
            Record::Inventory(r) => Self::run_checks(INVENTORY_CHECKS, r),
            Record::Products(r) => Self::run_checks(PRODUCT_CHECKS, r),
        }
    }

    fn run_checks<R>(checks: &[Check<R>], record: &R) -> Vec<Finding> {
        checks.iter().filter_map(|c| c.apply(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quality::record::DatasetKind;
    use crate::domain::quality::value::{RawRecord, RawValue};

    fn sales(raw: RawRecord) -> Record {
        Record::from_raw(DatasetKind::Sales, &raw)
    }

    fn types(findings: &[Finding]) -> Vec<IssueType> {
        findings.iter().map(|f| f.issue_type).collect()
    }

    #[test]
    fn test_corrupted_timestamp_only() {
        let record = sales(
            RawRecord::new()
                .with("order_time", "2024-13-40 99:99:99")
                .with("selling_price_aed", 50.0)
                .with("qty", 2.0)
                .with("city", "Dubai")
                .with("channel", "App")
                .with("payment_status", "Paid")
                .with("discount_pct", 10.0),
        );
        let findings = RecordValidator::validate(&record);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].issue_type, IssueType::InvalidTimestamp);
        assert_eq!(
            findings[0].issue_type.recommended_action(),
            crate::domain::quality::issue::Action::Drop
        );
    }

    #[test]
    fn test_outlier_price_and_bad_city_skip_absent_fields() {
        let record = sales(
            RawRecord::new()
                .with("selling_price_aed", 15000.0)
                .with("qty", 3.0)
                .with("city", "Dubayy")
                .with("discount_pct", 0.0),
        );
        let findings = RecordValidator::validate(&record);
        assert_eq!(
            types(&findings),
            vec![IssueType::OutlierValue, IssueType::InvalidCity]
        );
        assert_eq!(findings[0].detail, "Outside range [0, 10000]: 15000");
        assert_eq!(findings[1].detail, "Invalid city: Dubayy");
    }

    #[test]
    fn test_missing_discount_is_always_checked() {
        let absent = sales(RawRecord::new().with("city", "Dubai"));
        assert_eq!(
            RecordValidator::validate(&absent),
            vec![Finding::new(IssueType::MissingValue, "Missing discount_pct")]
        );

        let null = sales(RawRecord::new().with("discount_pct", RawValue::Null));
        assert_eq!(types(&RecordValidator::validate(&null)), vec![IssueType::MissingValue]);
    }

    #[test]
    fn test_sales_rule_order_is_fixed() {
        let record = sales(
            RawRecord::new()
                .with("discount_pct", RawValue::Null)
                .with("base_price_aed", 50.0)
                .with("unit_cost_aed", 60.0)
                .with("payment_status", "Pending")
                .with("channel", "Fax")
                .with("city", "")
                .with("qty", 0.0)
                .with("selling_price_aed", "abc")
                .with("order_time", RawValue::Null),
        );
        assert_eq!(
            types(&RecordValidator::validate(&record)),
            vec![
                IssueType::InvalidTimestamp,
                IssueType::OutlierValue,
                IssueType::OutlierValue,
                IssueType::InvalidCity,
                IssueType::InvalidChannel,
                IssueType::InvalidValue,
                IssueType::ConstraintViolation,
                IssueType::MissingValue,
            ]
        );
    }

    #[test]
    fn test_empty_price_and_stock_pass_empty_qty_fails() {
        let blank_price = sales(
            RawRecord::new()
                .with("selling_price_aed", RawValue::Null)
                .with("qty", 2.0)
                .with("discount_pct", 0.0),
        );
        assert!(RecordValidator::validate(&blank_price).is_empty());

        let blank_qty = sales(
            RawRecord::new()
                .with("qty", RawValue::Null)
                .with("discount_pct", 0.0),
        );
        assert_eq!(
            RecordValidator::validate(&blank_qty),
            vec![Finding::new(IssueType::OutlierValue, "Not numeric: null")]
        );

        let blank_stock = Record::from_raw(
            DatasetKind::Inventory,
            &RawRecord::new().with("stock_on_hand", RawValue::Null),
        );
        assert!(RecordValidator::validate(&blank_stock).is_empty());
    }

    #[test]
    fn test_cost_constraint_needs_both_columns() {
        let only_cost = sales(
            RawRecord::new()
                .with("unit_cost_aed", 60.0)
                .with("discount_pct", 5.0),
        );
        assert!(RecordValidator::validate(&only_cost).is_empty());
    }

    #[test]
    fn test_inventory_stock() {
        let negative = Record::from_raw(
            DatasetKind::Inventory,
            &RawRecord::new().with("stock_on_hand", -50.0),
        );
        let findings = RecordValidator::validate(&negative);
        assert_eq!(types(&findings), vec![IssueType::ImpossibleValue]);
        assert_eq!(findings[0].detail, "Negative stock: -50");

        let fine = Record::from_raw(
            DatasetKind::Inventory,
            &RawRecord::new().with("stock_on_hand", 120.0),
        );
        assert!(RecordValidator::validate(&fine).is_empty());

        let no_column = Record::from_raw(
            DatasetKind::Inventory,
            &RawRecord::new().with("product_id", "P0001"),
        );
        assert!(RecordValidator::validate(&no_column).is_empty());
    }

    #[test]
    fn test_products_missing_cost_then_constraint() {
        let missing = Record::from_raw(
            DatasetKind::Products,
            &RawRecord::new()
                .with("product_id", "P0001")
                .with("base_price_aed", 80.0),
        );
        assert_eq!(
            RecordValidator::validate(&missing),
            vec![Finding::new(IssueType::MissingValue, "Missing unit_cost_aed")]
        );

        // Null cost: flagged missing, and the constraint stays silent on it.
        let null_cost = Record::from_raw(
            DatasetKind::Products,
            &RawRecord::new()
                .with("unit_cost_aed", RawValue::Null)
                .with("base_price_aed", 80.0),
        );
        assert_eq!(types(&RecordValidator::validate(&null_cost)), vec![IssueType::MissingValue]);

        let too_expensive = Record::from_raw(
            DatasetKind::Products,
            &RawRecord::new()
                .with("unit_cost_aed", 60.0)
                .with("base_price_aed", 50.0),
        );
        assert_eq!(
            RecordValidator::validate(&too_expensive),
            vec![Finding::new(IssueType::ConstraintViolation, "Cost 60 > Price 50")]
        );
    }

    #[test]
    fn test_check_tables_are_named() {
        let names: Vec<&str> = SALES_CHECKS.iter().map(|c| c.name).collect();
        assert_eq!(names.first(), Some(&"timestamp"));
        assert_eq!(names.last(), Some(&"discount_present"));
        assert_eq!(INVENTORY_CHECKS.len(), 1);
        assert_eq!(PRODUCT_CHECKS.len(), 2);
    }
}
