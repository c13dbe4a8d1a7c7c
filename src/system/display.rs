use std::io::Cursor;

use async_trait::async_trait;
use screenshots::image::ImageFormat;
use screenshots::Screen;
use tokio::task::spawn_blocking;

use super::{CapturedImage, Displays};
use crate::core::SystemError;

/// Native screen capture via the `screenshots` crate.
///
/// The capture APIs block, so every call runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDisplays;

fn all_screens() -> Result<Vec<Screen>, SystemError> {
    Screen::all().map_err(|e| SystemError::Capture(format!("Failed to enumerate screens: {e}")))
}

fn capture_blocking(index: usize) -> Result<CapturedImage, SystemError> {
    let screens = all_screens()?;
    let screen = screens
        .get(index)
        .ok_or_else(|| SystemError::Capture(format!("display #{index} is not active")))?;

    let image = screen
        .capture()
        .map_err(|e| SystemError::Capture(format!("display #{index}: {e}")))?;
    let (width, height) = image.dimensions();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| SystemError::Capture(format!("display #{index}: PNG encoding failed: {e}")))?;

    log::debug!("Captured display #{} ({}x{}, {} bytes)", index, width, height, png.len());
    Ok(CapturedImage { width, height, png })
}

#[async_trait]
impl Displays for OsDisplays {
    async fn count_active_displays(&self) -> Result<usize, SystemError> {
        spawn_blocking(|| all_screens().map(|screens| screens.len())).await?
    }

    async fn capture_display(&self, index: usize) -> Result<CapturedImage, SystemError> {
        spawn_blocking(move || capture_blocking(index)).await?
    }
}
