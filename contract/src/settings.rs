use crate::interpretation::InterpretationTable;
use crate::validation::ValidationRanges;

/// Prediction rules handed explicitly to both the service and the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionSettings {
    pub ranges: ValidationRanges,
    pub interpretation: InterpretationTable,
}

impl PredictionSettings {
    pub fn new(ranges: ValidationRanges, interpretation: InterpretationTable) -> Self {
        Self {
            ranges,
            interpretation,
        }
    }
}
