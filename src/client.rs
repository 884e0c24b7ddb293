//! HTTP client for the LTX-2 video generation API.
//!
//! One client covers both response shapes the API uses: endpoints that
//! answer with the video bytes directly, and endpoints that answer with a
//! job to poll. [`LtxClient::submit`] hides the difference behind
//! [`Submission`]; [`LtxClient::generate`] runs the whole
//! submit → poll → download flow.

use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{parse_retry_after, sanitize_error_message, CineClawError, Result};
use crate::job::{GeneratedVideo, Job, JobStatus, Submission, VideoMetadata};
use crate::types::{JobMode, MediaSource, VideoRequest};

const DEFAULT_BASE_URL: &str = "https://api.ltx.video/v1";
const USER_AGENT: &str = "CineClaw/1.0";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(300);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Builder for [`LtxClient`].
#[derive(Debug, Clone)]
pub struct LtxClientBuilder {
    api_key: Option<String>,
    base_url: String,
    poll_interval: Duration,
    poll_timeout: Duration,
    request_timeout: Duration,
}

impl Default for LtxClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl LtxClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to the `LTX_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the base URL (defaults to `https://api.ltx.video/v1`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the interval between job status polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the overall wall-clock deadline for polling.
    pub fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Sets the per-request HTTP timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the client, resolving the credential.
    pub fn build(self) -> Result<LtxClient> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("LTX_API_KEY").ok())
            .ok_or_else(|| {
                CineClawError::Auth(
                    "LTX_API_KEY not set and no API key provided. \
                     Get your key at https://console.ltx.video"
                        .into(),
                )
            })?;

        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(LtxClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key,
            poll_interval: self.poll_interval,
            poll_timeout: self.poll_timeout,
        })
    }
}

/// LTX-2 video generation client.
pub struct LtxClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl LtxClient {
    /// Creates a new [`LtxClientBuilder`].
    pub fn builder() -> LtxClientBuilder {
        LtxClientBuilder::new()
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Submits a generation request.
    ///
    /// Validates the request locally, then POSTs JSON (no local media) or
    /// multipart/form-data (local media attached). The response is either
    /// the video bytes themselves or a JSON job description; content-type
    /// decides which.
    pub async fn submit(&self, request: &VideoRequest) -> Result<Submission> {
        request.validate()?;

        let url = format!("{}{}", self.base_url, request.mode.endpoint_path());
        let builder = self.http.post(&url).header(AUTHORIZATION, self.auth_header());

        let response = if has_local_media(request) {
            let form = build_form(request).await?;
            builder.multipart(form).send().await?
        } else {
            builder
                .header(CONTENT_TYPE, "application/json")
                .json(&json_payload(request))
                .send()
                .await?
        };

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_api_error(status.as_u16(), &text, &headers));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if is_binary_video(&content_type) {
            let data = response.bytes().await?.to_vec();
            let mime = content_type
                .split(';')
                .next()
                .filter(|m| m.starts_with("video/"))
                .unwrap_or("video/mp4")
                .to_string();
            return Ok(Submission::Video(GeneratedVideo::new(
                data,
                mime,
                request_metadata(request),
            )));
        }

        let job: Job = response.json().await?;
        Ok(Submission::Job(job))
    }

    /// Fetches the current state of a job.
    pub async fn job_status(&self, job_id: &str) -> Result<Job> {
        let url = format!("{}/generations/{}", self.base_url, job_id);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_api_error(status.as_u16(), &text, &headers));
        }

        Ok(response.json().await?)
    }

    /// Polls a job at a fixed interval until it reaches a terminal state or
    /// the wall-clock deadline elapses.
    ///
    /// Returns the completed job (result URL attached) on success, a
    /// [`CineClawError::Generation`] carrying the server message on
    /// failure, and [`CineClawError::Timeout`] past the deadline. No
    /// backoff, no jitter; the interval and deadline come from the builder.
    pub async fn wait_for_completion(&self, job_id: &str) -> Result<Job> {
        let start = Instant::now();

        loop {
            if start.elapsed() > self.poll_timeout {
                return Err(CineClawError::Timeout(self.poll_timeout));
            }

            let job = self.job_status(job_id).await?;

            match job.status {
                JobStatus::Completed => return Ok(job),
                status if status.is_failure() => {
                    let message = job
                        .error
                        .unwrap_or_else(|| "generation failed with no error message".into());
                    return Err(CineClawError::Generation(message));
                }
                status => {
                    tracing::debug!(
                        job_id = %job_id,
                        status = %status,
                        elapsed_secs = start.elapsed().as_secs(),
                        "polling video generation"
                    );
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// Downloads the artifact at `url`.
    ///
    /// Result URLs are pre-authorized; no Authorization header is sent.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(CineClawError::Api {
                status: response.status().as_u16(),
                message: "failed to download video".into(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Runs the full generation flow: submit, poll if asynchronous,
    /// download.
    pub async fn generate(&self, request: &VideoRequest) -> Result<GeneratedVideo> {
        let start = Instant::now();

        let job = match self.submit(request).await? {
            Submission::Video(mut video) => {
                video.metadata.duration_ms = Some(start.elapsed().as_millis() as u64);
                tracing::debug!(bytes = video.size(), "received video in submit response");
                return Ok(video);
            }
            Submission::Job(job) => job,
        };

        let done = match job.status {
            JobStatus::Completed => job,
            status if status.is_failure() => {
                let message = job
                    .error
                    .unwrap_or_else(|| "generation failed with no error message".into());
                return Err(CineClawError::Generation(message));
            }
            _ if job.id.is_empty() => {
                return Err(CineClawError::UnexpectedResponse(
                    "no job id in submit response".into(),
                ));
            }
            _ => {
                tracing::debug!(job_id = %job.id, "submitted video generation job");
                self.wait_for_completion(&job.id).await?
            }
        };

        let video_url = done.video_url.ok_or_else(|| {
            CineClawError::UnexpectedResponse("job completed without a video URL".into())
        })?;

        let data = self.download(&video_url).await?;
        tracing::debug!(bytes = data.len(), "video downloaded");

        let mut metadata = request_metadata(request);
        metadata.duration_ms = Some(start.elapsed().as_millis() as u64);
        metadata.cost_usd = done.cost;

        Ok(GeneratedVideo::new(data, "video/mp4", metadata))
    }

    /// Checks that the API is reachable with the configured credential.
    ///
    /// 2xx means healthy. 422 and 429 also count as reachable: the server
    /// answered, it just rejected or throttled us. Both are fatal in the
    /// generation flow.
    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let status = response.status().as_u16();
        if response.status().is_success() || status == 422 || status == 429 {
            return Ok(());
        }

        let headers = response.headers().clone();
        let text = response.text().await.unwrap_or_default();
        Err(parse_api_error(status, &text, &headers))
    }
}

fn has_local_media(request: &VideoRequest) -> bool {
    [&request.image, &request.audio]
        .into_iter()
        .flatten()
        .any(|source| source.as_file().is_some())
}

fn is_binary_video(content_type: &str) -> bool {
    content_type.starts_with("video/") || content_type.starts_with("application/octet-stream")
}

fn request_metadata(request: &VideoRequest) -> VideoMetadata {
    VideoMetadata {
        mode: Some(request.mode),
        model: Some(request.effective_model()),
        resolution: Some(request.effective_resolution()),
        duration_ms: None,
        video_duration_secs: match request.mode {
            JobMode::AudioToVideo => None,
            _ => Some(request.duration_secs),
        },
        cost_usd: None,
    }
}

/// Builds the JSON payload for a request with no local media.
///
/// Audio-to-video never carries duration/fps/generate_audio; the source
/// audio drives the clip length.
fn json_payload(request: &VideoRequest) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert("prompt".into(), request.prompt.clone().into());
    map.insert(
        "model".into(),
        request.effective_model().as_str().into(),
    );
    map.insert(
        "resolution".into(),
        request.effective_resolution().as_str().into(),
    );

    if request.mode != JobMode::AudioToVideo {
        map.insert("duration".into(), request.duration_secs.into());
        map.insert("fps".into(), request.fps.into());
        map.insert("generate_audio".into(), request.generate_audio.into());
    }
    if let Some(seed) = request.seed {
        map.insert("seed".into(), seed.into());
    }
    if let Some(motion) = request.camera_motion {
        map.insert("camera_motion".into(), motion.as_str().into());
    }
    if let Some(MediaSource::Url(url)) = &request.image {
        map.insert("image_url".into(), url.clone().into());
    }
    if let Some(MediaSource::Url(url)) = &request.audio {
        map.insert("audio_url".into(), url.clone().into());
    }

    serde_json::Value::Object(map)
}

/// Builds the multipart form for a request with local media attachments.
async fn build_form(request: &VideoRequest) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new()
        .text("prompt", request.prompt.clone())
        .text("model", request.effective_model().as_str())
        .text("resolution", request.effective_resolution().as_str());

    if request.mode != JobMode::AudioToVideo {
        form = form
            .text("duration", request.duration_secs.to_string())
            .text("fps", request.fps.to_string())
            .text("generate_audio", request.generate_audio.to_string());
    }
    if let Some(seed) = request.seed {
        form = form.text("seed", seed.to_string());
    }
    if let Some(motion) = request.camera_motion {
        form = form.text("camera_motion", motion.as_str());
    }

    match &request.image {
        Some(MediaSource::File(path)) => form = form.part("image", file_part(path).await?),
        Some(MediaSource::Url(url)) => form = form.text("image_url", url.clone()),
        None => {}
    }
    match &request.audio {
        Some(MediaSource::File(path)) => form = form.part("audio", file_part(path).await?),
        Some(MediaSource::Url(url)) => form = form.text("audio_url", url.clone()),
        None => {}
    }

    Ok(form)
}

async fn file_part(path: &Path) -> Result<reqwest::multipart::Part> {
    let data = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "media".to_string());

    reqwest::multipart::Part::bytes(data)
        .file_name(filename)
        .mime_str("application/octet-stream")
        .map_err(|e| CineClawError::InvalidRequest(e.to_string()))
}

/// Classifies a non-2xx response.
fn parse_api_error(status: u16, text: &str, headers: &HeaderMap) -> CineClawError {
    let message = extract_message(text);
    match status {
        401 => CineClawError::Auth(if message.is_empty() {
            "API key invalid or expired. Get a new key at console.ltx.video".into()
        } else {
            message
        }),
        402 | 403 => CineClawError::Billing(
            "Insufficient credits. Add credits at console.ltx.video".into(),
        ),
        422 => CineClawError::InvalidRequest(if message.is_empty() {
            "invalid parameter combination. Check model/resolution/duration".into()
        } else {
            message
        }),
        429 => CineClawError::RateLimited {
            retry_after: parse_retry_after(headers).map(Duration::from_secs),
        },
        _ => CineClawError::Api { status, message },
    }
}

/// Pulls a human-readable message out of an error body.
///
/// The API wraps messages as `{"error": {"message": ...}}`, sometimes as a
/// bare `{"error": ...}` or `{"message": ...}` string; anything else is
/// reported raw.
fn extract_message(text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        let nested = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .or_else(|| value.get("error").and_then(|e| e.as_str()))
            .or_else(|| value.get("message").and_then(|m| m.as_str()));
        if let Some(message) = nested {
            return sanitize_error_message(message);
        }
    }
    sanitize_error_message(text)
}
