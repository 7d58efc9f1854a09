use anyhow::{bail, Context, Result};
use tokio::process::Command;

use crate::config::config::OcrConfig;

/// Runs Tesseract on a PNG image and returns the recognised text.
/// The image goes through a temporary file that is removed on return.
pub async fn recognize_text(ocr: &OcrConfig, image: &[u8]) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("search-page-")
        .suffix(".png")
        .tempfile()
        .context("Failed to create temporary screenshot file")?;
    tokio::fs::write(file.path(), image)
        .await
        .context("Failed to write screenshot")?;

    let output = Command::new(&ocr.tesseract_path)
        .arg(file.path())
        .arg("stdout")
        .arg("-l")
        .arg(&ocr.language)
        .output()
        .await
        .with_context(|| format!("Failed to run {}", ocr.tesseract_path))?;

    if !output.status.success() {
        bail!(
            "OCR exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
