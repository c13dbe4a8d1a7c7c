use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta};
use tempfile::NamedTempFile;

use crate::core::{HandlerError, HandlerResult, SystemError};
use crate::dispatch::{CommandContext, CommandHandler};
use crate::system::{CapturedImage, Displays};
use crate::transport::{Attachment, Reply};

const CAPTION_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Resolution of [`CAPTION_FORMAT`].
fn caption_step() -> TimeDelta {
    TimeDelta::milliseconds(1)
}

/// Capture time for a caption, at least one caption step after `previous`
/// so consecutive displays never share a timestamp.
fn caption_time(now: DateTime<Local>, previous: Option<DateTime<Local>>) -> DateTime<Local> {
    match previous {
        Some(previous) if now < previous + caption_step() => previous + caption_step(),
        _ => now,
    }
}

/// Captures every active display and sends one photo per display.
///
/// Displays are captured in index order. The first failing display ends the
/// invocation; photos already sent for earlier displays stay sent.
pub struct ScreenshotCommand {
    displays: Arc<dyn Displays>,
    scratch_dir: PathBuf,
}

impl ScreenshotCommand {
    pub fn new(displays: Arc<dyn Displays>, scratch_dir: PathBuf) -> Self {
        Self { displays, scratch_dir }
    }
}

/// Writes the capture to a temporary file that is removed when dropped.
async fn stage_capture(scratch_dir: &Path, index: usize, image: CapturedImage) -> Result<NamedTempFile, SystemError> {
    let dir = scratch_dir.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<NamedTempFile, SystemError> {
        std::fs::create_dir_all(&dir)?;
        let mut file = tempfile::Builder::new()
            .prefix(&format!("{}_{}x{}_", index, image.width, image.height))
            .suffix(".png")
            .tempfile_in(&dir)?;
        file.write_all(&image.png)?;
        file.flush()?;
        Ok(file)
    })
    .await?
}

fn capture_failed(e: SystemError) -> HandlerError {
    HandlerError::collaborator("Failed to capture screenshot", e)
}

#[async_trait]
impl CommandHandler for ScreenshotCommand {
    fn description(&self) -> &'static str {
        "capture every active display"
    }

    async fn handle(&self, ctx: CommandContext<'_>) -> HandlerResult {
        let count = self.displays.count_active_displays().await.map_err(capture_failed)?;
        if count == 0 {
            return Err(capture_failed(SystemError::Capture("no active displays".to_string())));
        }

        let mut previous = None;
        for index in 0..count {
            let image = self.displays.capture_display(index).await.map_err(capture_failed)?;
            let captured_at = caption_time(Local::now(), previous);
            previous = Some(captured_at);
            let (width, height) = (image.width, image.height);

            let staged = stage_capture(&self.scratch_dir, index, image)
                .await
                .map_err(|e| HandlerError::collaborator("Failed to create temporary file", e))?;
            log::info!(
                "Display #{} : {}x{} \"{}\"",
                index,
                width,
                height,
                staged.path().display()
            );

            let sent = ctx
                .reply(Reply::Photo {
                    file: Attachment::Path(staged.path().to_path_buf()),
                    caption: format!("{} (display {})", captured_at.format(CAPTION_FORMAT), index),
                })
                .await;
            // Scratch file goes away whether or not the upload worked
            drop(staged);
            sent?;
        }

        Ok(())
    }
}
