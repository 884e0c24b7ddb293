#![warn(missing_docs)]
//! CineClaw - LTX-2 video generation client.
//!
//! This crate talks to the LTX-2 API for text-to-video, image-to-video, and
//! audio-to-video generation: it submits a job, polls for asynchronous
//! completion when the API answers with a job id, and downloads the
//! resulting file. A static rate table supports cost estimation without
//! touching the network.
//!
//! # Quick Start
//!
//! ```no_run
//! use cineclaw::{LtxClient, VideoRequest};
//!
//! #[tokio::main]
//! async fn main() -> cineclaw::Result<()> {
//!     let client = LtxClient::builder().build()?; // reads LTX_API_KEY
//!     let request = VideoRequest::text_to_video("A calm lake at sunrise")
//!         .with_duration(6);
//!     let video = client.generate(&request).await?;
//!     video.save("lake.mp4")?;
//!     Ok(())
//! }
//! ```
//!
//! # Cost estimation
//!
//! ```
//! use cineclaw::{CostEstimate, LtxModel, Resolution};
//!
//! let est = CostEstimate::new(LtxModel::Pro, Resolution::Uhd2160, 10);
//! assert_eq!(est.total, 2.0);
//! ```

mod client;
mod error;
mod job;
mod output;
mod pricing;
mod types;

pub use client::{LtxClient, LtxClientBuilder};
pub use error::{CineClawError, Result};
pub use job::{GeneratedVideo, Job, JobStatus, Submission, VideoMetadata};
pub use output::{default_output_dir, generated_file_name, resolve_output_path};
pub use pricing::{rate_per_second, CostEstimate, ASSUMED_A2V_DURATION_SECS};
pub use types::{
    CameraMotion, JobMode, LtxModel, MediaSource, Resolution, VideoRequest,
    DEFAULT_DURATION_SECS, DEFAULT_FPS,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::{LtxClient, LtxClientBuilder};
    pub use crate::error::{CineClawError, Result};
    pub use crate::job::{GeneratedVideo, JobStatus, Submission};
    pub use crate::pricing::CostEstimate;
    pub use crate::types::{JobMode, LtxModel, MediaSource, Resolution, VideoRequest};
}
