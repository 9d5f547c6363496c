//! Screenshot encoding and file name helpers.

use crate::error::{FeedbackClientError, FeedbackClientResult};
use image::{ImageFormat, RgbaImage};
use std::{
    io::Cursor,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Encodes an in-memory bitmap to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> FeedbackClientResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(FeedbackClientError::PngEncode)?;
    Ok(buf.into_inner())
}

/// Formats a timestamp-based screenshot file name, e.g. `Feedback-1700000000.png`.
pub fn new_screenshot_file_name(at: SystemTime) -> FeedbackClientResult<String> {
    let secs = at.duration_since(SystemTime::UNIX_EPOCH)?.as_secs();
    Ok(format!("Feedback-{secs}.png"))
}

/// Formats the full storage location for a new screenshot under the given root directory.
pub fn screenshot_file_location(root: &Path, at: SystemTime) -> FeedbackClientResult<PathBuf> {
    Ok(root.join(new_screenshot_file_name(at)?))
}
