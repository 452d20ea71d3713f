use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("Interpretation table needs at least one band")]
    Empty,

    #[error("Band upper bounds must be strictly increasing (got {previous} then {next})")]
    NotAscending { previous: f64, next: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub upper_bound: f64,
    pub label: String,
}

/// Ordered `(upper_bound, label)` lookup for predicted growth days.
///
/// The first band whose bound is strictly greater than the value wins; the
/// last band catches everything else, NaN included.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretationTable {
    bands: Vec<Band>,
}

impl Default for InterpretationTable {
    fn default() -> Self {
        Self {
            bands: vec![
                band(15.0, "Very fast growth - Excellent conditions"),
                band(25.0, "Fast growth - Good conditions"),
                band(35.0, "Moderate growth - Acceptable conditions"),
                band(f64::INFINITY, "Slow growth - Suboptimal conditions"),
            ],
        }
    }
}

fn band(upper_bound: f64, label: &str) -> Band {
    Band {
        upper_bound,
        label: label.to_string(),
    }
}

impl InterpretationTable {
    pub fn new(bands: Vec<Band>) -> Result<Self, TableError> {
        if bands.is_empty() {
            return Err(TableError::Empty);
        }
        for pair in bands.windows(2) {
            if !(pair[0].upper_bound < pair[1].upper_bound) {
                return Err(TableError::NotAscending {
                    previous: pair[0].upper_bound,
                    next: pair[1].upper_bound,
                });
            }
        }
        Ok(Self { bands })
    }

    pub fn interpret(&self, days: f64) -> &str {
        self.bands
            .iter()
            .find(|band| days < band.upper_bound)
            .or_else(|| self.bands.last())
            .map(|band| band.label.as_str())
            .unwrap_or_default()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bands.iter().map(|band| band.label.as_str())
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.labels().any(|known| known == label)
    }
}
