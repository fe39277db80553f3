//! Event descriptions arrive as HTML from WordPress; they are only ever shown
//! after conversion to plain text.

use crate::error::{EvCopyError, EvCopyResult};

/// Render description HTML as wrapped plain text. Markup never reaches the terminal.
pub fn to_plain_text(html: &str, width: usize) -> EvCopyResult<String> {
    let text = html2text::from_read(html.as_bytes(), width.max(20))
        .map_err(|e| EvCopyError::Schema(format!("Unreadable event description: {e}")))?;

    Ok(text.trim_end().to_string())
}
