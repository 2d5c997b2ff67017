//! Form schema and the typed churn record
//!
//! The web form submits 18 named fields. The raw submission is first
//! projected onto the recognized field names without any type checking, then
//! parsed into a [`ChurnRecord`] whose construction fails with a validation
//! error naming the offending field. A record projects itself into the
//! single-row DataFrame shape the prediction pipeline consumes.

use crate::error::{ChurnError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric feature columns, in model input order
pub const NUMERIC_FIELDS: [&str; 13] = [
    "Tenure",
    "CityTier",
    "WarehouseToHome",
    "HourSpendOnApp",
    "NumberOfDeviceRegistered",
    "SatisfactionScore",
    "NumberOfAddress",
    "Complain",
    "OrderAmountHikeFromlastYear",
    "CouponUsed",
    "OrderCount",
    "DaySinceLastOrder",
    "CashbackAmount",
];

/// Categorical feature columns, in model input order
pub const CATEGORICAL_FIELDS: [&str; 5] = [
    "Gender",
    "PreferedOrderCat",
    "MaritalStatus",
    "PreferredLoginDevice",
    "PreferredPaymentMode",
];

/// All recognized form fields: 13 numeric followed by 5 categorical
pub const FORM_FIELDS: [&str; 18] = [
    "Tenure",
    "CityTier",
    "WarehouseToHome",
    "HourSpendOnApp",
    "NumberOfDeviceRegistered",
    "SatisfactionScore",
    "NumberOfAddress",
    "Complain",
    "OrderAmountHikeFromlastYear",
    "CouponUsed",
    "OrderCount",
    "DaySinceLastOrder",
    "CashbackAmount",
    "Gender",
    "PreferedOrderCat",
    "MaritalStatus",
    "PreferredLoginDevice",
    "PreferredPaymentMode",
];

/// Name of the label column in the training dataset
pub const TARGET_COLUMN: &str = "Churn";

/// Raw form submission projected onto the recognized field names.
///
/// Holds unvalidated strings; fields the client did not submit are simply
/// absent.
#[derive(Debug, Clone, Default)]
pub struct RawForm {
    values: HashMap<String, String>,
}

impl RawForm {
    pub fn new(submitted: HashMap<String, String>) -> Self {
        let values = submitted
            .into_iter()
            .filter(|(key, _)| FORM_FIELDS.contains(&key.as_str()))
            .collect();
        Self { values }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Validated, strongly typed representation of one form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnRecord {
    pub tenure: f64,
    pub city_tier: i64,
    pub warehouse_to_home: f64,
    pub hour_spend_on_app: f64,
    pub number_of_device_registered: i64,
    pub satisfaction_score: i64,
    pub number_of_address: i64,
    pub complain: i64,
    pub order_amount_hike_from_last_year: f64,
    pub coupon_used: f64,
    pub order_count: f64,
    pub day_since_last_order: f64,
    pub cashback_amount: f64,
    pub gender: String,
    pub prefered_order_cat: String,
    pub marital_status: String,
    pub preferred_login_device: String,
    pub preferred_payment_mode: String,
}

fn require<'a>(form: &'a RawForm, name: &str) -> Result<&'a str> {
    form.field(name)
        .ok_or_else(|| ChurnError::Validation(format!("missing field {name}")))
}

fn parse_float(form: &RawForm, name: &str) -> Result<f64> {
    let raw = require(form, name)?;
    raw.trim().parse().map_err(|_| {
        ChurnError::Validation(format!("invalid value for {name}: {raw:?} (expected a number)"))
    })
}

fn parse_int(form: &RawForm, name: &str) -> Result<i64> {
    let raw = require(form, name)?;
    raw.trim().parse().map_err(|_| {
        ChurnError::Validation(format!("invalid value for {name}: {raw:?} (expected an integer)"))
    })
}

fn parse_text(form: &RawForm, name: &str) -> Result<String> {
    Ok(require(form, name)?.trim().to_string())
}

impl ChurnRecord {
    /// Build a record from a raw submission.
    ///
    /// Fails on the first absent or unparseable field; the error message
    /// names the field so it can be surfaced to the user verbatim.
    pub fn from_form(form: &RawForm) -> Result<Self> {
        Ok(Self {
            tenure: parse_float(form, "Tenure")?,
            city_tier: parse_int(form, "CityTier")?,
            warehouse_to_home: parse_float(form, "WarehouseToHome")?,
            hour_spend_on_app: parse_float(form, "HourSpendOnApp")?,
            number_of_device_registered: parse_int(form, "NumberOfDeviceRegistered")?,
            satisfaction_score: parse_int(form, "SatisfactionScore")?,
            number_of_address: parse_int(form, "NumberOfAddress")?,
            complain: parse_int(form, "Complain")?,
            order_amount_hike_from_last_year: parse_float(form, "OrderAmountHikeFromlastYear")?,
            coupon_used: parse_float(form, "CouponUsed")?,
            order_count: parse_float(form, "OrderCount")?,
            day_since_last_order: parse_float(form, "DaySinceLastOrder")?,
            cashback_amount: parse_float(form, "CashbackAmount")?,
            gender: parse_text(form, "Gender")?,
            prefered_order_cat: parse_text(form, "PreferedOrderCat")?,
            marital_status: parse_text(form, "MaritalStatus")?,
            preferred_login_device: parse_text(form, "PreferredLoginDevice")?,
            preferred_payment_mode: parse_text(form, "PreferredPaymentMode")?,
        })
    }

    /// Project the record into the single-row columnar shape consumed by the
    /// prediction pipeline. Column names match [`FORM_FIELDS`].
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns = vec![
            Series::new("Tenure".into(), &[self.tenure]).into(),
            Series::new("CityTier".into(), &[self.city_tier]).into(),
            Series::new("WarehouseToHome".into(), &[self.warehouse_to_home]).into(),
            Series::new("HourSpendOnApp".into(), &[self.hour_spend_on_app]).into(),
            Series::new(
                "NumberOfDeviceRegistered".into(),
                &[self.number_of_device_registered],
            )
            .into(),
            Series::new("SatisfactionScore".into(), &[self.satisfaction_score]).into(),
            Series::new("NumberOfAddress".into(), &[self.number_of_address]).into(),
            Series::new("Complain".into(), &[self.complain]).into(),
            Series::new(
                "OrderAmountHikeFromlastYear".into(),
                &[self.order_amount_hike_from_last_year],
            )
            .into(),
            Series::new("CouponUsed".into(), &[self.coupon_used]).into(),
            Series::new("OrderCount".into(), &[self.order_count]).into(),
            Series::new("DaySinceLastOrder".into(), &[self.day_since_last_order]).into(),
            Series::new("CashbackAmount".into(), &[self.cashback_amount]).into(),
            Series::new("Gender".into(), &[self.gender.as_str()]).into(),
            Series::new("PreferedOrderCat".into(), &[self.prefered_order_cat.as_str()]).into(),
            Series::new("MaritalStatus".into(), &[self.marital_status.as_str()]).into(),
            Series::new(
                "PreferredLoginDevice".into(),
                &[self.preferred_login_device.as_str()],
            )
            .into(),
            Series::new(
                "PreferredPaymentMode".into(),
                &[self.preferred_payment_mode.as_str()],
            )
            .into(),
        ];
        DataFrame::new(columns).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> HashMap<String, String> {
        let values = [
            ("Tenure", "12.5"),
            ("CityTier", "2"),
            ("WarehouseToHome", "14.0"),
            ("HourSpendOnApp", "3.5"),
            ("NumberOfDeviceRegistered", "4"),
            ("SatisfactionScore", "3"),
            ("NumberOfAddress", "2"),
            ("Complain", "0"),
            ("OrderAmountHikeFromlastYear", "15.0"),
            ("CouponUsed", "1.0"),
            ("OrderCount", "6.0"),
            ("DaySinceLastOrder", "4.0"),
            ("CashbackAmount", "150.75"),
            ("Gender", "Female"),
            ("PreferedOrderCat", "Fashion"),
            ("MaritalStatus", "Single"),
            ("PreferredLoginDevice", "Computer"),
            ("PreferredPaymentMode", "UPI"),
        ];
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_form_parses() {
        let record = ChurnRecord::from_form(&RawForm::new(valid_form())).unwrap();
        assert_eq!(record.tenure, 12.5);
        assert_eq!(record.city_tier, 2);
        assert_eq!(record.gender, "Female");
        assert_eq!(record.cashback_amount, 150.75);
    }

    #[test]
    fn test_missing_field_fails() {
        let mut form = valid_form();
        form.remove("Tenure");
        let err = ChurnRecord::from_form(&RawForm::new(form)).unwrap_err();
        assert!(err.to_string().contains("missing field Tenure"));
    }

    #[test]
    fn test_non_numeric_value_fails() {
        let mut form = valid_form();
        form.insert("CityTier".to_string(), "abc".to_string());
        let err = ChurnRecord::from_form(&RawForm::new(form)).unwrap_err();
        assert!(err.to_string().contains("invalid value for CityTier"));
    }

    #[test]
    fn test_unrecognized_fields_are_dropped() {
        let mut form = valid_form();
        form.insert("Bogus".to_string(), "1".to_string());
        let raw = RawForm::new(form);
        assert!(raw.field("Bogus").is_none());
        assert!(raw.field("Tenure").is_some());
    }

    #[test]
    fn test_to_dataframe_shape() {
        let record = ChurnRecord::from_form(&RawForm::new(valid_form())).unwrap();
        let df = record.to_dataframe().unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), FORM_FIELDS.len());
        for name in FORM_FIELDS {
            assert!(df.column(name).is_ok(), "missing column {name}");
        }
    }
}
