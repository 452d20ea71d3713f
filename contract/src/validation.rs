use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::PredictionRequest;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Temperature,
    Humidity,
    Tds,
    Ph,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Temperature, Field::Humidity, Field::Tds, Field::Ph];

    /// Name used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::Tds => "tds",
            Field::Ph => "ph",
        }
    }

    /// Name shown to people.
    pub fn label(self) -> &'static str {
        match self {
            Field::Temperature => "Temperature",
            Field::Humidity => "Humidity",
            Field::Tds => "TDS",
            Field::Ph => "pH",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::Temperature => "°C",
            Field::Humidity => "%",
            Field::Tds => " ppm",
            Field::Ph => "",
        }
    }

    pub fn value_in(self, request: &PredictionRequest) -> f64 {
        match self {
            Field::Temperature => request.temperature,
            Field::Humidity => request.humidity,
            Field::Tds => request.tds,
            Field::Ph => request.ph,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One rejected field, as reported to the caller.
#[derive(Debug, Error, Deserialize, Serialize, Clone, PartialEq)]
#[error("{message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field: field.key().to_string(),
            message: message.into(),
        }
    }

    pub fn is_for(&self, field: Field) -> bool {
        self.field == field.key()
    }
}

/// Closed interval `[min, max]` accepted for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: Field,
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const fn new(field: Field, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    /// NaN never falls in range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn check(&self, value: f64) -> Result<(), FieldError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(FieldError::new(self.field, self.describe_violation(value)))
        }
    }

    pub fn describe(&self) -> String {
        let unit = self.field.unit();
        format!(
            "{} must be between {:.1}{} and {:.1}{}",
            self.field.label(),
            self.min,
            unit,
            self.max,
            unit
        )
    }

    fn describe_violation(&self, value: f64) -> String {
        format!("{} (value: {})", self.describe(), value)
    }
}

/// Authoritative range table. Both client and service check against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRanges {
    pub temperature: FieldRange,
    pub humidity: FieldRange,
    pub tds: FieldRange,
    pub ph: FieldRange,
}

impl Default for ValidationRanges {
    fn default() -> Self {
        Self {
            temperature: FieldRange::new(Field::Temperature, 18.0, 35.0),
            humidity: FieldRange::new(Field::Humidity, 50.0, 80.0),
            tds: FieldRange::new(Field::Tds, 400.0, 800.0),
            ph: FieldRange::new(Field::Ph, 6.0, 7.0),
        }
    }
}

impl ValidationRanges {
    pub fn get(&self, field: Field) -> &FieldRange {
        match field {
            Field::Temperature => &self.temperature,
            Field::Humidity => &self.humidity,
            Field::Tds => &self.tds,
            Field::Ph => &self.ph,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRange> {
        Field::ALL.into_iter().map(move |field| self.get(field))
    }

    /// Reports every offending field, not just the first one.
    pub fn validate(&self, request: &PredictionRequest) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .iter()
            .filter_map(|range| range.check(range.field.value_in(request)).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn valid_request() -> PredictionRequest {
        PredictionRequest::new(22.5, 70.0, 600.0, 6.4)
    }

    fn with_value(field: Field, value: f64) -> PredictionRequest {
        let mut request = valid_request();
        match field {
            Field::Temperature => request.temperature = value,
            Field::Humidity => request.humidity = value,
            Field::Tds => request.tds = value,
            Field::Ph => request.ph = value,
        }
        request
    }

    #[test]
    fn bounds_are_inclusive_for_every_field() {
        let ranges = ValidationRanges::default();
        for range in ranges.iter() {
            assert!(ranges.validate(&with_value(range.field, range.min)).is_ok());
            assert!(ranges.validate(&with_value(range.field, range.max)).is_ok());
        }
    }

    #[test]
    fn values_just_outside_bounds_are_rejected() {
        let ranges = ValidationRanges::default();
        for range in ranges.iter() {
            for value in [range.min - EPSILON, range.max + EPSILON] {
                let errors = ranges.validate(&with_value(range.field, value)).unwrap_err();
                assert_eq!(errors.len(), 1);
                assert!(errors[0].is_for(range.field));
            }
        }
    }

    #[test]
    fn out_of_range_temperature_names_the_field() {
        let ranges = ValidationRanges::default();
        let errors = ranges
            .validate(&PredictionRequest::new(40.0, 70.0, 600.0, 6.4))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "temperature");
        assert_eq!(
            errors[0].message,
            "Temperature must be between 18.0°C and 35.0°C (value: 40)"
        );
    }

    #[test]
    fn every_offending_field_is_reported() {
        let ranges = ValidationRanges::default();
        let errors = ranges
            .validate(&PredictionRequest::new(10.0, 90.0, 600.0, 8.0))
            .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["temperature", "humidity", "ph"]);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let range = ValidationRanges::default().ph;
        assert!(range.check(f64::NAN).is_err());
        assert!(range.check(f64::INFINITY).is_err());
        assert!(range.check(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn ph_has_no_unit_suffix() {
        let range = ValidationRanges::default().ph;
        assert_eq!(range.describe(), "pH must be between 6.0 and 7.0");
    }
}
