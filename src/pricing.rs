//! Cost estimation from the static LTX-2 rate table.

use serde::{Deserialize, Serialize};

use crate::types::{JobMode, LtxModel, Resolution, VideoRequest};

/// Assumed clip length for audio-to-video estimates, where the real length
/// is driven by the source audio and unknown until submission.
pub const ASSUMED_A2V_DURATION_SECS: u32 = 10;

/// Cost per second of video in USD, keyed by (model, resolution).
pub fn rate_per_second(model: LtxModel, resolution: Resolution) -> f64 {
    match (model, resolution) {
        (LtxModel::Fast, Resolution::Hd1080) => 0.02,
        (LtxModel::Fast, Resolution::Qhd1440) => 0.04,
        (LtxModel::Fast, Resolution::Uhd2160) => 0.08,
        (LtxModel::Pro, Resolution::Hd1080) => 0.05,
        (LtxModel::Pro, Resolution::Qhd1440) => 0.10,
        (LtxModel::Pro, Resolution::Uhd2160) => 0.20,
    }
}

/// A cost estimate for one generation. Pure arithmetic; never touches the
/// network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Model the estimate is for.
    pub model: LtxModel,
    /// Resolution the estimate is for.
    pub resolution: Resolution,
    /// Clip length in seconds.
    pub duration_secs: u32,
    /// Per-second rate from the table, USD.
    pub rate_per_second: f64,
    /// `rate_per_second * duration_secs`, USD.
    pub total: f64,
}

impl CostEstimate {
    /// Estimates the cost of `duration_secs` seconds of video.
    pub fn new(model: LtxModel, resolution: Resolution, duration_secs: u32) -> Self {
        let rate = rate_per_second(model, resolution);
        Self {
            model,
            resolution,
            duration_secs,
            rate_per_second: rate,
            total: rate * f64::from(duration_secs),
        }
    }

    /// Estimates the cost of a request, applying the same model/resolution
    /// overrides the submission path applies.
    pub fn for_request(request: &VideoRequest) -> Self {
        let duration = match request.mode {
            JobMode::AudioToVideo => ASSUMED_A2V_DURATION_SECS,
            _ => request.duration_secs,
        };
        Self::new(
            request.effective_model(),
            request.effective_resolution(),
            duration,
        )
    }
}

impl std::fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== COST ESTIMATE ===")?;
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Resolution: {}", self.resolution)?;
        writeln!(f, "Duration: {}s", self.duration_secs)?;
        writeln!(f, "Cost/second: ${:.2}", self.rate_per_second)?;
        writeln!(f, "Estimated TOTAL: ${:.2}", self.total)?;
        write!(f, "=====================")
    }
}
