//! The schedule book: quarterly worship schedules loaded from a static JSON
//! file. Strictly read-only; there is no mutation path back to the data.

use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::AppError;
use crate::models::{QuarterSchedule, ScheduleView, ServiceDay};

#[derive(Debug, Default)]
pub struct ScheduleBook {
    quarters: BTreeMap<String, QuarterSchedule>,
}

impl ScheduleBook {
    /// Load the book from a JSON file mapping quarter ids to quarter data.
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let quarters: BTreeMap<String, QuarterSchedule> = serde_json::from_str(&raw)?;
        Ok(Self { quarters })
    }

    /// Quarter ids in the book, e.g. `Q3-2025`.
    pub fn quarter_ids(&self) -> Vec<String> {
        self.quarters.keys().cloned().collect()
    }

    pub fn quarter(&self, id: &str) -> Option<&QuarterSchedule> {
        self.quarters.get(id)
    }

    /// The slice the viewer renders for a quarter/month pick. The month
    /// defaults to the quarter's first; a month with no services renders an
    /// empty table rather than an error.
    pub fn view(&self, quarter_id: &str, month: Option<&str>) -> Option<ScheduleView> {
        let quarter = self.quarter(quarter_id)?;
        let month = month
            .map(str::to_string)
            .or_else(|| quarter.months.first().cloned())
            .unwrap_or_default();
        let services: Vec<ServiceDay> = quarter.schedule.get(&month).cloned().unwrap_or_default();

        Some(ScheduleView {
            quarter: quarter.quarter.clone(),
            months: quarter.months.clone(),
            month,
            services,
        })
    }
}
