//! Distributed job records as returned by `/api/distributed_jobs`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend-assigned job identifier.
///
/// The backend issues UUID strings, but numeric ids are accepted too and
/// kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => JobId(text),
            Raw::Number(number) => JobId(number.to_string()),
        })
    }
}

/// One row of the job list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobSummary {
    pub id: JobId,
    pub agent_id: String,
    pub status: String,
    /// Percentage as reported by the backend; not clamped.
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobDetail {
    pub id: JobId,
    pub agent_id: String,
    pub status: String,
    pub progress: f64,
    #[serde(default)]
    pub log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateJobRequest {
    pub agent_id: String,
    pub config: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateJobResponse {
    pub job_id: JobId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_accepts_number_and_string() {
        let numeric: CreateJobResponse = serde_json::from_str(r#"{"job_id": 7}"#).unwrap();
        assert_eq!(numeric.job_id, JobId::new("7"));

        let text: CreateJobResponse =
            serde_json::from_str(r#"{"job_id": "5f2c-11"}"#).unwrap();
        assert_eq!(text.job_id.as_str(), "5f2c-11");
    }

    #[test]
    fn test_progress_is_not_clamped() {
        let job: JobSummary = serde_json::from_str(
            r#"{"id": 1, "agent_id": "a1", "status": "running", "progress": 140}"#,
        )
        .unwrap();
        assert_eq!(job.progress, 140.0);
    }

    #[test]
    fn test_detail_log_defaults_to_empty() {
        let detail: JobDetail = serde_json::from_str(
            r#"{"id": "x", "agent_id": "a1", "status": "pending", "progress": 0}"#,
        )
        .unwrap();
        assert!(detail.log.is_empty());
    }
}
