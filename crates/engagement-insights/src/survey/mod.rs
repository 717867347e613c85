mod loader;
mod record;

pub use loader::{DataLoadError, SurveyLoader, SURVEY_HEADERS};
pub use record::{EmployeeRecord, EngagementLevel, SurveyDataset};
