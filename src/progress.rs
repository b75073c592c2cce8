use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// `title [████░░░░] 40%`, redrawn in place until finished.
pub(crate) fn bar(len: u64, title: &str) -> Result<ProgressBar> {
    let style = ProgressStyle::with_template("{msg} [{bar:20}] {percent}%")?.progress_chars("█░");
    Ok(ProgressBar::new(len)
        .with_style(style)
        .with_message(title.to_string()))
}
