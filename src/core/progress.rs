use std::path::PathBuf;
use serde::Serialize;

/// Progress message type
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressType {
    Start,
    Progress,
    Complete,
    Error,
}

/// Progress of a batch run, reported to the caller's callback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Progress type (start, progress, complete, error)
    pub progress_type: ProgressType,
    /// Number of files with an outcome so far
    pub completed_tasks: usize,
    /// Total number of files in the batch
    pub total_tasks: usize,
    /// Progress percentage (0-100)
    pub progress_percentage: usize,
    /// Current status message
    pub status: String,
    /// File this message is about, if any
    pub file: Option<PathBuf>,
    /// Error message for failed files
    pub error: Option<String>,
}

impl Progress {
    /// Create a new Progress instance with basic information
    pub fn new(
        progress_type: ProgressType,
        completed_tasks: usize,
        total_tasks: usize,
        status: &str,
    ) -> Self {
        let progress_percentage = if total_tasks > 0 {
            (completed_tasks * 100) / total_tasks
        } else {
            0
        };

        Self {
            progress_type,
            completed_tasks,
            total_tasks,
            progress_percentage,
            status: status.to_string(),
            file: None,
            error: None,
        }
    }

    pub fn for_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_floored_and_safe_for_empty_batches() {
        assert_eq!(Progress::new(ProgressType::Progress, 1, 3, "processing").progress_percentage, 33);
        assert_eq!(Progress::new(ProgressType::Complete, 0, 0, "complete").progress_percentage, 0);
    }

    #[test]
    fn serializes_camel_case_with_null_file_and_error() {
        let json = serde_json::to_value(Progress::new(ProgressType::Start, 0, 4, "started")).unwrap();
        assert_eq!(json["progressType"], "start");
        assert_eq!(json["totalTasks"], 4);
        assert!(json["file"].is_null());
        assert!(json["error"].is_null());
    }
}
