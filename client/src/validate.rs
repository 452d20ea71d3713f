use moss_contract::{FieldRange, PredictionRequest, ValidationRanges};

use crate::error::ClientValidationError;

/// Checks one raw form value against its range.
pub fn validate(field_value: &str, range: &FieldRange) -> Option<ClientValidationError> {
    parse_field(field_value, range).err()
}

fn parse_field(field_value: &str, range: &FieldRange) -> Result<f64, ClientValidationError> {
    let trimmed = field_value.trim();
    if trimmed.is_empty() {
        return Err(ClientValidationError::Empty(range.field));
    }

    // "NaN" and "inf" parse as f64 but are not readings.
    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or(ClientValidationError::NotNumeric(range.field))?;

    if !range.contains(value) {
        return Err(ClientValidationError::OutOfRange {
            range: *range,
            value,
        });
    }
    Ok(value)
}

/// The four text inputs as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub temperature: String,
    pub humidity: String,
    pub tds: String,
    pub ph: String,
}

impl FormInput {
    pub fn new(
        temperature: impl Into<String>,
        humidity: impl Into<String>,
        tds: impl Into<String>,
        ph: impl Into<String>,
    ) -> Self {
        Self {
            temperature: temperature.into(),
            humidity: humidity.into(),
            tds: tds.into(),
            ph: ph.into(),
        }
    }

    /// Collects the errors of every field so the form can flag them together.
    pub fn parse(&self, ranges: &ValidationRanges) -> Result<PredictionRequest, Vec<ClientValidationError>> {
        let mut errors = Vec::new();
        let mut take = |raw: &str, range: &FieldRange| match parse_field(raw, range) {
            Ok(value) => value,
            Err(e) => {
                errors.push(e);
                f64::NAN
            }
        };

        let request = PredictionRequest {
            temperature: take(&self.temperature, &ranges.temperature),
            humidity: take(&self.humidity, &ranges.humidity),
            tds: take(&self.tds, &ranges.tds),
            ph: take(&self.ph, &ranges.ph),
        };

        if errors.is_empty() {
            Ok(request)
        } else {
            Err(errors)
        }
    }
}
