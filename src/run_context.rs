// src/run_context.rs

use chrono::NaiveDate;

use crate::constants::DEFAULT_MODEL_LABEL;

/// Parameters of the crop-model run that the nitrogen and growth charts annotate:
/// the N fixation fraction shown in the title and the sowing date marker.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRunContext {
    /// Fraction of crop N demand met by fixation (0..=1)
    pub nfix_fr: f64,

    /// Drawn as a vertical marker on time-series charts
    pub sowing_date: NaiveDate,

    /// Model configuration shown in chart titles
    pub model_label: String,
}

impl CropRunContext {
    pub fn new(nfix_fr: f64, sowing_date: NaiveDate) -> Self {
        Self {
            nfix_fr,
            sowing_date,
            model_label: DEFAULT_MODEL_LABEL.to_string(),
        }
    }

    pub fn with_model_label(mut self, label: impl Into<String>) -> Self {
        self.model_label = label.into();
        self
    }

    /// Chart title, e.g. "Wofost81_NWLP_MLWB_SNOMIN NFIX_FR 0.5".
    pub fn chart_title(&self) -> String {
        format!("{} NFIX_FR {}", self.model_label, self.nfix_fr)
    }
}
