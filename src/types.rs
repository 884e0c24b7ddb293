//! Core request types for video generation.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CineClawError;

/// Default clip length in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 6;
/// Default frame rate.
pub const DEFAULT_FPS: u32 = 25;

/// Video generation job kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobMode {
    /// Text-to-video: prompt only.
    #[serde(rename = "t2v")]
    TextToVideo,
    /// Image-to-video: prompt plus a source image.
    #[serde(rename = "i2v")]
    ImageToVideo,
    /// Audio-to-video: prompt plus a source audio track.
    #[serde(rename = "a2v")]
    AudioToVideo,
}

impl JobMode {
    /// Returns the short mode tag used in filenames and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextToVideo => "t2v",
            Self::ImageToVideo => "i2v",
            Self::AudioToVideo => "a2v",
        }
    }

    /// Returns the API endpoint path for this mode.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::TextToVideo => "/generations/text-to-video",
            Self::ImageToVideo => "/generations/image-to-video",
            Self::AudioToVideo => "/generations/audio-to-video",
        }
    }
}

impl std::fmt::Display for JobMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LTX-2 model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LtxModel {
    /// LTX-2 Fast - lower cost, quicker turnaround (default).
    #[default]
    #[serde(rename = "ltx-2-fast")]
    Fast,
    /// LTX-2 Pro - higher quality, required for audio-to-video.
    #[serde(rename = "ltx-2-pro")]
    Pro,
}

impl LtxModel {
    /// Returns the API model identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "ltx-2-fast",
            Self::Pro => "ltx-2-pro",
        }
    }
}

impl std::fmt::Display for LtxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LtxModel {
    type Err = CineClawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ltx-2-fast" | "fast" => Ok(Self::Fast),
            "ltx-2-pro" | "pro" => Ok(Self::Pro),
            other => Err(CineClawError::InvalidRequest(format!(
                "unknown model '{other}'. Valid options: ltx-2-fast, ltx-2-pro"
            ))),
        }
    }
}

/// Output resolution.
///
/// The wire format is always raw pixel dimensions; named presets like
/// "1080p" or "4k" are accepted as input aliases and normalized at parse
/// time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// 1920x1080 (default).
    #[default]
    #[serde(rename = "1920x1080")]
    Hd1080,
    /// 2560x1440.
    #[serde(rename = "2560x1440")]
    Qhd1440,
    /// 3840x2160.
    #[serde(rename = "3840x2160")]
    Uhd2160,
}

impl Resolution {
    /// Returns the canonical pixel-dimension string sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hd1080 => "1920x1080",
            Self::Qhd1440 => "2560x1440",
            Self::Uhd2160 => "3840x2160",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = CineClawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1080p" | "1080" | "1920x1080" => Ok(Self::Hd1080),
            "1440p" | "1440" | "2560x1440" | "2k" => Ok(Self::Qhd1440),
            "4k" | "2160p" | "3840x2160" | "uhd" => Ok(Self::Uhd2160),
            other => Err(CineClawError::InvalidRequest(format!(
                "unknown resolution '{other}'. Valid options: 1080p, 1440p, 4k \
                 (or full format like 1920x1080)"
            ))),
        }
    }
}

/// Camera motion presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum CameraMotion {
    DollyIn,
    DollyOut,
    PanLeft,
    PanRight,
    CraneUp,
    CraneDown,
    Static,
    Handheld,
}

impl CameraMotion {
    /// All presets, in the order the API documents them.
    pub const ALL: [CameraMotion; 8] = [
        Self::DollyIn,
        Self::DollyOut,
        Self::PanLeft,
        Self::PanRight,
        Self::CraneUp,
        Self::CraneDown,
        Self::Static,
        Self::Handheld,
    ];

    /// Returns the API identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DollyIn => "dolly_in",
            Self::DollyOut => "dolly_out",
            Self::PanLeft => "pan_left",
            Self::PanRight => "pan_right",
            Self::CraneUp => "crane_up",
            Self::CraneDown => "crane_down",
            Self::Static => "static",
            Self::Handheld => "handheld",
        }
    }
}

impl std::fmt::Display for CameraMotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CameraMotion {
    type Err = CineClawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                CineClawError::InvalidRequest(format!(
                    "unknown camera motion '{s}'. Valid options: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Source media for image-to-video and audio-to-video jobs.
///
/// A URL is passed to the API by reference; a local file is uploaded as a
/// multipart attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Public HTTPS URL the API fetches itself.
    Url(String),
    /// Local file uploaded with the request.
    File(PathBuf),
}

impl MediaSource {
    /// Creates a URL source.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Creates a local-file source.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Classifies a CLI argument: `http(s)://` inputs are URLs, everything
    /// else is a local path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Self::Url(arg.to_string())
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    pub(crate) fn as_file(&self) -> Option<&PathBuf> {
        match self {
            Self::File(path) => Some(path),
            Self::Url(_) => None,
        }
    }
}

/// A request to generate a video.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    /// The text prompt describing the desired video (or motion for i2v,
    /// visuals for a2v).
    pub prompt: String,
    /// Job kind.
    pub mode: JobMode,
    /// Model variant. Audio-to-video always resolves to [`LtxModel::Pro`].
    pub model: LtxModel,
    /// Output resolution. Audio-to-video always resolves to 1920x1080.
    pub resolution: Resolution,
    /// Clip length in seconds. Ignored for audio-to-video (the source audio
    /// drives the length).
    pub duration_secs: u32,
    /// Frame rate. Ignored for audio-to-video.
    pub fps: u32,
    /// Whether the API should generate an audio track. Ignored for
    /// audio-to-video.
    pub generate_audio: bool,
    /// Seed for reproducible generation.
    pub seed: Option<u64>,
    /// Camera motion preset.
    pub camera_motion: Option<CameraMotion>,
    /// Source image (image-to-video only).
    pub image: Option<MediaSource>,
    /// Source audio (audio-to-video only).
    pub audio: Option<MediaSource>,
}

impl VideoRequest {
    fn new(prompt: impl Into<String>, mode: JobMode) -> Self {
        Self {
            prompt: prompt.into(),
            mode,
            model: LtxModel::default(),
            resolution: Resolution::default(),
            duration_secs: DEFAULT_DURATION_SECS,
            fps: DEFAULT_FPS,
            generate_audio: true,
            seed: None,
            camera_motion: None,
            image: None,
            audio: None,
        }
    }

    /// Creates a text-to-video request.
    pub fn text_to_video(prompt: impl Into<String>) -> Self {
        Self::new(prompt, JobMode::TextToVideo)
    }

    /// Creates an image-to-video request from the given source image.
    pub fn image_to_video(prompt: impl Into<String>, image: MediaSource) -> Self {
        let mut req = Self::new(prompt, JobMode::ImageToVideo);
        req.image = Some(image);
        req
    }

    /// Creates an audio-to-video request from the given source audio.
    pub fn audio_to_video(prompt: impl Into<String>, audio: MediaSource) -> Self {
        let mut req = Self::new(prompt, JobMode::AudioToVideo);
        req.audio = Some(audio);
        req
    }

    /// Sets the model variant.
    pub fn with_model(mut self, model: LtxModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the output resolution.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the clip length in seconds.
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Sets the frame rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Sets the generation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets a camera motion preset.
    pub fn with_camera_motion(mut self, motion: CameraMotion) -> Self {
        self.camera_motion = Some(motion);
        self
    }

    /// Disables audio generation.
    pub fn without_audio(mut self) -> Self {
        self.generate_audio = false;
        self
    }

    /// The model actually submitted: audio-to-video requires the pro tier
    /// and overrides any caller-supplied model.
    pub fn effective_model(&self) -> LtxModel {
        match self.mode {
            JobMode::AudioToVideo => LtxModel::Pro,
            _ => self.model,
        }
    }

    /// The resolution actually submitted: audio-to-video is fixed at
    /// 1920x1080.
    pub fn effective_resolution(&self) -> Resolution {
        match self.mode {
            JobMode::AudioToVideo => Resolution::Hd1080,
            _ => self.resolution,
        }
    }

    /// Validates kind-specific requirements before any network call.
    pub fn validate(&self) -> crate::error::Result<()> {
        match self.mode {
            JobMode::ImageToVideo if self.image.is_none() => {
                return Err(CineClawError::InvalidRequest(
                    "image-to-video requires a source image".into(),
                ));
            }
            JobMode::AudioToVideo if self.audio.is_none() => {
                return Err(CineClawError::InvalidRequest(
                    "audio-to-video requires a source audio track".into(),
                ));
            }
            _ => {}
        }

        for source in [&self.image, &self.audio].into_iter().flatten() {
            if let Some(path) = source.as_file() {
                if !path.exists() {
                    return Err(CineClawError::InvalidRequest(format!(
                        "media file not found: {}",
                        path.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_as_str() {
        assert_eq!(JobMode::TextToVideo.as_str(), "t2v");
        assert_eq!(JobMode::ImageToVideo.as_str(), "i2v");
        assert_eq!(JobMode::AudioToVideo.as_str(), "a2v");
    }

    #[test]
    fn test_mode_endpoint_path() {
        assert_eq!(
            JobMode::TextToVideo.endpoint_path(),
            "/generations/text-to-video"
        );
        assert_eq!(
            JobMode::AudioToVideo.endpoint_path(),
            "/generations/audio-to-video"
        );
    }

    #[test]
    fn test_model_as_str() {
        assert_eq!(LtxModel::Fast.as_str(), "ltx-2-fast");
        assert_eq!(LtxModel::Pro.as_str(), "ltx-2-pro");
    }

    #[test]
    fn test_model_default() {
        assert_eq!(LtxModel::default(), LtxModel::Fast);
    }

    #[test]
    fn test_model_parse() {
        assert_eq!("ltx-2-pro".parse::<LtxModel>().unwrap(), LtxModel::Pro);
        assert_eq!("fast".parse::<LtxModel>().unwrap(), LtxModel::Fast);
        assert!("ltx-3".parse::<LtxModel>().is_err());
    }

    #[test]
    fn test_resolution_aliases() {
        for alias in ["1080p", "1080", "1920x1080"] {
            assert_eq!(alias.parse::<Resolution>().unwrap(), Resolution::Hd1080);
        }
        for alias in ["1440p", "2k", "2560x1440"] {
            assert_eq!(alias.parse::<Resolution>().unwrap(), Resolution::Qhd1440);
        }
        for alias in ["4k", "2160p", "uhd", "3840x2160", "4K", "UHD"] {
            assert_eq!(alias.parse::<Resolution>().unwrap(), Resolution::Uhd2160);
        }
    }

    #[test]
    fn test_resolution_unknown() {
        let err = "720p".parse::<Resolution>().unwrap_err();
        assert!(matches!(err, CineClawError::InvalidRequest(_)));
    }

    #[test]
    fn test_resolution_wire_format_is_pixels() {
        assert_eq!(Resolution::Hd1080.as_str(), "1920x1080");
        assert_eq!(Resolution::Qhd1440.as_str(), "2560x1440");
        assert_eq!(Resolution::Uhd2160.as_str(), "3840x2160");
    }

    #[test]
    fn test_camera_motion_parse() {
        assert_eq!(
            "dolly_in".parse::<CameraMotion>().unwrap(),
            CameraMotion::DollyIn
        );
        assert_eq!(
            "handheld".parse::<CameraMotion>().unwrap(),
            CameraMotion::Handheld
        );
        assert!("zoom_in".parse::<CameraMotion>().is_err());
    }

    #[test]
    fn test_media_source_from_arg() {
        assert_eq!(
            MediaSource::from_arg("https://example.com/a.jpg"),
            MediaSource::Url("https://example.com/a.jpg".into())
        );
        assert_eq!(
            MediaSource::from_arg("./photo.jpg"),
            MediaSource::File(PathBuf::from("./photo.jpg"))
        );
    }

    #[test]
    fn test_request_defaults() {
        let req = VideoRequest::text_to_video("A calm lake at sunrise");
        assert_eq!(req.mode, JobMode::TextToVideo);
        assert_eq!(req.model, LtxModel::Fast);
        assert_eq!(req.resolution, Resolution::Hd1080);
        assert_eq!(req.duration_secs, DEFAULT_DURATION_SECS);
        assert_eq!(req.fps, DEFAULT_FPS);
        assert!(req.generate_audio);
        assert!(req.seed.is_none());
    }

    #[test]
    fn test_a2v_forces_pro_model_and_1080p() {
        let req = VideoRequest::audio_to_video("Scene", MediaSource::url("https://a/b.mp3"))
            .with_model(LtxModel::Fast)
            .with_resolution(Resolution::Uhd2160);
        assert_eq!(req.effective_model(), LtxModel::Pro);
        assert_eq!(req.effective_resolution(), Resolution::Hd1080);
    }

    #[test]
    fn test_t2v_keeps_caller_model() {
        let req = VideoRequest::text_to_video("Scene")
            .with_model(LtxModel::Pro)
            .with_resolution(Resolution::Qhd1440);
        assert_eq!(req.effective_model(), LtxModel::Pro);
        assert_eq!(req.effective_resolution(), Resolution::Qhd1440);
    }

    #[test]
    fn test_validate_i2v_requires_image() {
        let mut req = VideoRequest::text_to_video("Scene");
        req.mode = JobMode::ImageToVideo;
        let err = req.validate().unwrap_err();
        assert!(matches!(err, CineClawError::InvalidRequest(_)));
    }

    #[test]
    fn test_validate_a2v_requires_audio() {
        let mut req = VideoRequest::text_to_video("Scene");
        req.mode = JobMode::AudioToVideo;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_missing_local_file() {
        let req = VideoRequest::image_to_video(
            "Animate this",
            MediaSource::file("/nonexistent/photo.jpg"),
        );
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_validate_existing_local_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let req = VideoRequest::image_to_video("Animate this", MediaSource::file(tmp.path()));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_url_source_skips_fs_check() {
        let req = VideoRequest::audio_to_video("Scene", MediaSource::url("https://a/b.mp3"));
        assert!(req.validate().is_ok());
    }
}
