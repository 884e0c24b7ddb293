//! Job status model and generation results.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{JobMode, LtxModel, Resolution};

/// Server-reported job status.
///
/// Statuses this client does not recognize deserialize to [`Unknown`] and
/// are treated as still running; the poll deadline bounds them.
///
/// [`Unknown`]: JobStatus::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// The job is queued or rendering.
    Processing,
    /// The job finished and a result URL is available.
    Completed,
    /// The job failed; an error message may be attached.
    Failed,
    /// Alternate failure spelling some endpoints use.
    Error,
    /// Any status string this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Returns true when polling should stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Error)
    }

    /// Returns true when the job ended in failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Error => "error",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

fn default_status() -> JobStatus {
    JobStatus::Processing
}

/// An asynchronous generation job as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Server-issued job identifier. Empty when the submit response was
    /// already terminal and carried no id.
    #[serde(default)]
    pub id: String,
    /// Current status. Missing in a submit response means `processing`.
    #[serde(default = "default_status")]
    pub status: JobStatus,
    /// Result URL, present only once the job completed.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Server-provided error message, present only on failure.
    #[serde(default)]
    pub error: Option<String>,
    /// Billed cost in USD, when the server reports it.
    #[serde(default)]
    pub cost: Option<f64>,
}

/// Outcome of submitting a generation request.
///
/// The API answers in one of two shapes: the response body is the video
/// itself, or it is JSON describing a job to poll. Callers match on this
/// instead of knowing which transport variant the service used.
#[derive(Debug)]
pub enum Submission {
    /// The response body was the finished artifact.
    Video(GeneratedVideo),
    /// The response described a job; poll it to completion.
    Job(Job),
}

/// Metadata about a completed generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Job mode that produced the video.
    pub mode: Option<JobMode>,
    /// Model used for generation.
    pub model: Option<LtxModel>,
    /// Output resolution.
    pub resolution: Option<Resolution>,
    /// Wall-clock generation time in milliseconds.
    pub duration_ms: Option<u64>,
    /// Requested clip length in seconds.
    pub video_duration_secs: Option<u32>,
    /// Billed cost in USD, when the server reported one.
    pub cost_usd: Option<f64>,
}

/// A generated video with its data and metadata.
#[derive(Debug, Clone)]
pub struct GeneratedVideo {
    /// Raw video bytes.
    pub data: Vec<u8>,
    /// MIME type (e.g., "video/mp4").
    pub mime_type: String,
    /// Generation metadata.
    pub metadata: VideoMetadata,
}

impl GeneratedVideo {
    /// Creates a new generated video.
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, metadata: VideoMetadata) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            metadata,
        }
    }

    /// Returns the size of the video data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Saves the video to the specified path.
    ///
    /// The write is atomic: bytes go to a temporary file in the destination
    /// directory which is then renamed into place, so a crash mid-write
    /// never leaves a truncated artifact at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string());
        let tmp = path.with_file_name(format!(".{file_name}.part"));

        std::fs::write(&tmp, &self.data)?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Error.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(!JobStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_status_failure() {
        assert!(JobStatus::Failed.is_failure());
        assert!(JobStatus::Error.is_failure());
        assert!(!JobStatus::Completed.is_failure());
        assert!(!JobStatus::Processing.is_failure());
    }

    #[test]
    fn test_status_unknown_string() {
        let status: JobStatus = serde_json::from_str(r#""rendering""#).unwrap();
        assert_eq!(status, JobStatus::Unknown);
    }

    #[test]
    fn test_job_deserialization_processing() {
        let json = r#"{"id": "gen-123", "status": "processing"}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, "gen-123");
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.video_url.is_none());
        assert!(job.error.is_none());
    }

    #[test]
    fn test_job_deserialization_completed() {
        let json = r#"{
            "id": "gen-123",
            "status": "completed",
            "video_url": "https://cdn.ltx.video/gen-123.mp4",
            "cost": 0.12
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(
            job.video_url.as_deref(),
            Some("https://cdn.ltx.video/gen-123.mp4")
        );
        assert_eq!(job.cost, Some(0.12));
    }

    #[test]
    fn test_job_deserialization_failed() {
        let json = r#"{"id": "gen-9", "status": "failed", "error": "prompt rejected"}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert!(job.status.is_failure());
        assert_eq!(job.error.as_deref(), Some("prompt rejected"));
    }

    #[test]
    fn test_job_status_defaults_to_processing() {
        let json = r#"{"id": "gen-1"}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, JobStatus::Processing);
    }

    #[test]
    fn test_save_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");

        let video = GeneratedVideo::new(vec![0x00, 0x01, 0x02], "video/mp4", Default::default());
        video.save(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![0x00, 0x01, 0x02]);
        // No temp file left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"old").unwrap();

        let video = GeneratedVideo::new(b"new".to_vec(), "video/mp4", Default::default());
        video.save(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }
}
