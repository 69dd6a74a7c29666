// Command-line host for the EchoScribe client engine: validate an audio
// file, upload it for transcription, and render/save the result.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use echoscribe::{
    ClientConfig, DirectoryFileSaver, ExportKind, FileMetadata, SummaryBlock, TracingNotifier,
    UploadClient, UploadSession, copy_text, download_export, render_summary, render_transcript,
};

#[derive(Parser, Debug)]
#[command(name = "echoscribe-cli")]
#[command(about = "Upload an audio recording to EchoScribe and render the transcript")]
struct Args {
    /// Base URL of the transcription backend.
    #[arg(short = 's', long = "server", default_value = "http://127.0.0.1:8000")]
    server: String,

    /// Audio file to transcribe (WAV, MP3, M4A, or OGG, up to 100 MB).
    #[arg(short = 'a', long = "audio")]
    audio: PathBuf,

    /// Directory the markdown exports are written into.
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Skip the backend identity/health preflight.
    #[arg(long = "skip-health")]
    skip_health: bool,

    /// Copy the AI summary to the system clipboard after a successful run.
    #[arg(long = "copy-summary")]
    copy_summary: bool,

    /// Print the result without writing the markdown exports.
    #[arg(long = "no-save")]
    no_save: bool,
}

/// `arboard`-backed clipboard capability.
///
/// A fresh handle per write keeps the type `Sync`-free state out of the
/// capability object; clipboard writes are rare enough that the setup cost
/// does not matter.
struct SystemClipboard;

impl echoscribe::Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> echoscribe::Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .map_err(|err| echoscribe::Error::Clipboard {
                detail: err.to_string(),
            })
    }
}

fn main() -> Result<()> {
    echoscribe::init_logging();
    let args = Args::parse();

    let client = UploadClient::new(ClientConfig::new(&args.server))?;

    if !args.skip_health {
        preflight(&client)?;
    }

    let file = FileMetadata::from_path(&args.audio)
        .with_context(|| format!("cannot stage {}", args.audio.display()))?;

    let notifier = TracingNotifier;
    let mut session = UploadSession::new(&client, &notifier);

    session
        .select_file(file.clone())
        .context("file was rejected before upload")?;
    println!(
        "📎 {} ({:.2} MB • {})",
        file.name,
        file.size_mb(),
        if file.media_type.is_empty() {
            "unknown type"
        } else {
            &file.media_type
        }
    );

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} mengupload {bar:40.cyan/blue} {pos}%")
            .unwrap()
            .progress_chars("#>-"),
    );

    let pb_updates = pb.clone();
    let outcome =
        session.upload_with_progress(&args.audio, move |percent| {
            pb_updates.set_position(percent as u64)
        });
    pb.finish_and_clear();

    let result = outcome.context("transcription failed")?;

    let summary_blocks = render_summary(&result);
    let transcript = render_transcript(&result);

    println!("\nRingkasan AI");
    println!("────────────");
    print_summary_blocks(&summary_blocks);

    println!("\nTranskrip ({} segmen)", transcript.segment_count());
    println!("────────────");
    for segment in &transcript.segments {
        println!(
            "[{}] {}: {}",
            segment.time_range, segment.speaker_label, segment.text
        );
    }
    println!("\nTotal karakter: {}", transcript.character_count);

    if !args.no_save {
        let saver = DirectoryFileSaver::new(&args.out_dir);
        let transcript_file =
            download_export(&saver, &notifier, &result, ExportKind::Transcript)?;
        let summary_file = download_export(&saver, &notifier, &result, ExportKind::Summary)?;
        println!(
            "\n💾 {}\n💾 {}",
            saver.path_for(&transcript_file).display(),
            saver.path_for(&summary_file).display()
        );
    }

    if args.copy_summary {
        // Best-effort: a missing clipboard should not fail the whole run.
        match copy_text(&SystemClipboard, &notifier, &result.summary, ExportKind::Summary) {
            Ok(()) => println!("📋 ringkasan disalin ke clipboard"),
            Err(err) => eprintln!("clipboard unavailable: {err}"),
        }
    }

    Ok(())
}

fn preflight(client: &UploadClient) -> Result<()> {
    let info = client
        .service_info()
        .context("backend is unreachable (use --skip-health to bypass the preflight)")?;
    let health = client.health().context("backend health check failed")?;

    println!(
        "🔌 {} v{} — {} ({})",
        info.project, info.version, health.status, health.device
    );

    if !health.models_loaded {
        bail!("backend reports its models are not loaded yet; try again shortly");
    }

    Ok(())
}

fn print_summary_blocks(blocks: &[SummaryBlock]) {
    let mut ordinal = 0usize;
    for block in blocks {
        match block {
            SummaryBlock::Heading { .. } => {
                ordinal = 0;
                println!("\n{}", block.plain_text().to_uppercase());
            }
            SummaryBlock::ListItem { ordered: false, .. } => {
                println!("  • {}", block.plain_text());
            }
            SummaryBlock::ListItem { ordered: true, .. } => {
                ordinal += 1;
                println!("  {ordinal}. {}", block.plain_text());
            }
            SummaryBlock::Paragraph { .. } => {
                ordinal = 0;
                println!("{}", block.plain_text());
            }
        }
    }
}
