//! The upload flow, end to end.
//!
//! `UploadSession` owns the controller and wires the validator, the client,
//! and the notifier together the way the product's shell does: select a
//! file, submit it, stream progress into the view state, and land in either
//! `Succeeded` or a clean `Idle`.

use std::path::Path;
use std::sync::mpsc;

use tracing::debug;

use crate::client::UploadClient;
use crate::error::{Error, Result};
use crate::notify::{Notice, Notifier};
use crate::state::ViewController;
use crate::transcript::TranscriptResult;
use crate::validate::{FileMetadata, validate_audio_file};

/// Slot id for the long-running upload notice, so success and failure
/// upgrade it in place instead of stacking.
const UPLOAD_NOTICE_SLOT: &str = "upload-toast";

pub struct UploadSession<'a, N: Notifier> {
    client: &'a UploadClient,
    notifier: &'a N,
    controller: ViewController,
}

impl<'a, N: Notifier> UploadSession<'a, N> {
    pub fn new(client: &'a UploadClient, notifier: &'a N) -> Self {
        Self {
            client,
            notifier,
            controller: ViewController::new(),
        }
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ViewController {
        &mut self.controller
    }

    /// Validate and stage a selected file.
    ///
    /// Rejection leaves the prior state untouched; the user keeps whatever
    /// was on screen and only sees the rejection notice.
    pub fn select_file(&mut self, file: FileMetadata) -> Result<()> {
        if let Err(err) = validate_audio_file(&file) {
            self.notifier.notify(Notice::error(
                "Format File Tidak Valid",
                err.to_string(),
            ));
            return Err(err);
        }

        self.notifier.notify(Notice::success(
            "File Terpilih",
            format!("{} siap diproses", file.name),
        ));
        self.controller.stage_file(file);
        Ok(())
    }

    /// Submit the staged file and wait for its transcript.
    ///
    /// Progress callbacks are drained into the controller before the final
    /// transition, so the view passes through the same percentages the
    /// transfer reported. On failure the controller clears to a clean
    /// `Idle`; re-initiating is the caller's explicit decision.
    pub fn upload(&mut self, audio_path: &Path) -> Result<TranscriptResult> {
        self.upload_with_progress(audio_path, |_| {})
    }

    /// Like [`upload`](Self::upload), additionally forwarding each progress
    /// percentage to `on_progress` as it happens (for live progress bars;
    /// the callback runs on the transfer thread).
    pub fn upload_with_progress(
        &mut self,
        audio_path: &Path,
        mut on_progress: impl FnMut(u8) + Send + 'static,
    ) -> Result<TranscriptResult> {
        if self.controller.staged_file().is_none() {
            let err = Error::msg("no file is staged for upload");
            self.notifier.notify(Notice::error(
                "Tidak Ada File",
                "Mohon pilih file audio terlebih dahulu",
            ));
            return Err(err);
        }

        self.controller.begin_upload()?;
        self.notifier.notify(
            Notice::loading(
                "Memproses Audio",
                "Sedang melakukan transkripsi dan diarisasi speaker...",
            )
            .in_slot(UPLOAD_NOTICE_SLOT),
        );

        // The transfer reports progress from the client's worker thread; we
        // collect here and replay into the single-threaded controller.
        let (tx, rx) = mpsc::channel::<u8>();
        let outcome = self.client.submit(audio_path, move |percent| {
            let _ = tx.send(percent);
            on_progress(percent);
        });

        for percent in rx.try_iter() {
            self.controller.set_progress(percent);
        }

        match outcome {
            Ok(result) => {
                debug!(segments = result.speaker_transcript.len(), "upload succeeded");
                self.controller.succeed(result.clone());
                self.notifier.notify(
                    Notice::success(
                        "Berhasil!",
                        "Transkripsi dan ringkasan AI telah selesai dibuat",
                    )
                    .in_slot(UPLOAD_NOTICE_SLOT),
                );
                Ok(result)
            }
            Err(err) => {
                debug!(error = %err, "upload failed");
                self.controller.fail();
                self.notifier.notify(
                    Notice::error(
                        "Gagal",
                        "Terjadi kesalahan saat memproses audio. Silakan coba lagi.",
                    )
                    .in_slot(UPLOAD_NOTICE_SLOT),
                );
                Err(err)
            }
        }
    }

    /// Manual clear back to the empty idle view.
    pub fn reset(&mut self) {
        self.controller.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::notify::{MemoryNotifier, NoticeKind};

    fn client() -> UploadClient {
        // Nothing listens on this port; only the pre-network paths run here.
        UploadClient::new(ClientConfig::new("http://127.0.0.1:9")).expect("client")
    }

    #[test]
    fn rejected_file_is_not_staged_and_notifies() {
        let client = client();
        let notifier = MemoryNotifier::new();
        let mut session = UploadSession::new(&client, &notifier);

        let err = session
            .select_file(FileMetadata::new("notes.txt", 10, "text/plain"))
            .unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
        assert!(session.controller().staged_file().is_none());
        assert_eq!(notifier.last().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn accepted_file_is_staged_with_a_success_notice() {
        let client = client();
        let notifier = MemoryNotifier::new();
        let mut session = UploadSession::new(&client, &notifier);

        session
            .select_file(FileMetadata::new("meeting.mp3", 1024, "audio/mpeg"))
            .unwrap();

        assert_eq!(
            session.controller().staged_file().map(|f| f.name.as_str()),
            Some("meeting.mp3")
        );
        let last = notifier.last().expect("expected a notice");
        assert_eq!(last.kind, NoticeKind::Success);
        assert!(last.detail.contains("meeting.mp3"));
    }

    #[test]
    fn upload_without_staged_file_is_rejected() {
        let client = client();
        let notifier = MemoryNotifier::new();
        let mut session = UploadSession::new(&client, &notifier);

        let err = session.upload(Path::new("missing.mp3")).unwrap_err();
        assert!(err.to_string().contains("no file is staged"));
        assert_eq!(notifier.last().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn transport_failure_clears_to_clean_idle() {
        let client = client();
        let notifier = MemoryNotifier::new();
        let mut session = UploadSession::new(&client, &notifier);

        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("meeting.mp3");
        std::fs::write(&audio, vec![0u8; 512]).unwrap();

        session
            .select_file(FileMetadata::new("meeting.mp3", 512, "audio/mpeg"))
            .unwrap();
        let err = session.upload(&audio).unwrap_err();

        assert!(err.is_upload_failure());
        assert!(session.controller().result().is_none());
        assert!(session.controller().staged_file().is_none());
        assert!(!session.controller().is_uploading());

        let last = notifier.last().expect("expected a notice");
        assert_eq!(last.kind, NoticeKind::Error);
        assert_eq!(last.replaces, Some("upload-toast"));
    }
}
