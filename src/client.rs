//! Blocking HTTP client for the transcription backend.
//!
//! The wire contract is small: one multipart POST carrying the audio file,
//! answered with a JSON transcript, plus two read-only endpoints for
//! identity and health. Progress reporting covers the upload transfer only;
//! backend processing time is opaque to us, so callers treat the whole wait
//! as a single pending state.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::transcript::{HealthStatus, ServiceInfo, TranscriptResult, parse_transcript_response};
use crate::validate::guess_media_type;

/// How much of an error body we keep for diagnostics.
const ERROR_BODY_SNIPPET_LEN: usize = 200;

/// Timeout for the small read-only endpoints. The transcription request
/// itself runs without one: processing time is unbounded by contract.
const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the transcription backend connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://127.0.0.1:8000`. Endpoint paths are
    /// appended here.
    pub base_url: String,

    /// Optional overall timeout for the transcription request. `None` waits
    /// indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Client for one transcription backend.
///
/// At most one upload may be in flight per client. The guard is explicit
/// (an atomic slot) rather than an assumption about how hosts wire their
/// submit buttons.
pub struct UploadClient {
    config: ClientConfig,
    http: reqwest::blocking::Client,
    in_flight: AtomicBool,
}

impl UploadClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("echoscribe-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|err| Error::msg(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            config,
            http,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Upload an audio file and wait for its transcript.
    ///
    /// `on_progress` receives percentages (0..=100) of the upload transfer,
    /// zero or more times, strictly before this call returns. It may be
    /// invoked from another thread, hence the `Send` bound; hosts that need
    /// the updates on their own thread forward them through a channel.
    ///
    /// The file is expected to have passed [`crate::validate_audio_file`];
    /// no re-validation happens here. No retry is attempted: a failed call
    /// must be explicitly re-initiated.
    pub fn submit(
        &self,
        audio_path: &Path,
        on_progress: impl FnMut(u8) + Send + 'static,
    ) -> Result<TranscriptResult> {
        let _slot = self.acquire_flight_slot()?;
        let request_id = Uuid::new_v4();

        let file = File::open(audio_path)?;
        let total_bytes = file.metadata()?.len();
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();
        let media_type = guess_media_type(&file_name).unwrap_or("application/octet-stream");

        let reader = ProgressReader::new(file, total_bytes, on_progress);
        let part = Part::reader_with_length(reader, total_bytes)
            .file_name(file_name.clone())
            .mime_str(media_type)
            .map_err(|err| Error::msg(format!("invalid media type `{media_type}`: {err}")))?;
        let form = Form::new().part("file", part);

        info!(
            %request_id,
            file = %file_name,
            size_bytes = total_bytes,
            "submitting audio for transcription"
        );

        let response = self
            .http
            .post(self.config.endpoint("transcribe"))
            .multipart(form)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            warn!(%request_id, status = status.as_u16(), "backend rejected upload");
            return Err(Error::Status {
                status: status.as_u16(),
                detail: snippet(&body),
            });
        }

        let result = parse_transcript_response(&body)?;
        info!(
            %request_id,
            segments = result.speaker_transcript.len(),
            "transcript received"
        );

        Ok(result)
    }

    /// Identity payload of the backend's root endpoint.
    pub fn service_info(&self) -> Result<ServiceInfo> {
        self.get_json("")
    }

    /// Backend health, including whether its models finished loading.
    pub fn health(&self) -> Result<HealthStatus> {
        self.get_json("health")
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.config.endpoint(path))
            .timeout(PREFLIGHT_TIMEOUT)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                detail: snippet(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| Error::malformed(err.to_string()))
    }

    fn acquire_flight_slot(&self) -> Result<FlightSlot<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::UploadInFlight);
        }
        Ok(FlightSlot {
            flag: &self.in_flight,
        })
    }
}

/// RAII release of the single upload slot, so the slot frees on every exit
/// path including `?`.
#[derive(Debug)]
struct FlightSlot<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FlightSlot<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A `Read` wrapper that reports transfer progress as whole percentages.
///
/// The HTTP client pulls the request body through this reader, so each read
/// corresponds to bytes handed to the transfer. We emit only when the
/// percentage changes, and never above 100 even if the source yields more
/// bytes than the declared total.
struct ProgressReader<R, F> {
    inner: R,
    sent: u64,
    total: u64,
    last_emitted: Option<u8>,
    on_progress: F,
}

impl<R: Read, F: FnMut(u8)> ProgressReader<R, F> {
    fn new(inner: R, total: u64, on_progress: F) -> Self {
        Self {
            inner,
            sent: 0,
            total,
            last_emitted: None,
            on_progress,
        }
    }

    fn emit_if_changed(&mut self) {
        if self.total == 0 {
            return;
        }
        let percent = ((self.sent * 100) / self.total).min(100) as u8;
        if self.last_emitted != Some(percent) {
            self.last_emitted = Some(percent);
            (self.on_progress)(percent);
        }
    }
}

impl<R: Read, F: FnMut(u8)> Read for ProgressReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.sent += n as u64;
            self.emit_if_changed();
        }
        Ok(n)
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= ERROR_BODY_SNIPPET_LEN {
        return trimmed.to_string();
    }
    let mut end = ERROR_BODY_SNIPPET_LEN;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &trimmed[..end])
}
