use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfTextError {
    #[error("could not read PDF: {0}")]
    Unreadable(String),

    #[error("the PDF contains no extractable text")]
    Empty,
}

/// Extracts plain text from PDF bytes. CPU-bound; call from a blocking thread.
///
/// Whitespace runs are collapsed per line and blank-line runs are squeezed,
/// which keeps the prompt small without losing the line structure.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfTextError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfTextError::Unreadable(e.to_string()))?;
    let text = normalize(&raw);
    if text.is_empty() {
        return Err(PdfTextError::Empty);
    }
    Ok(text)
}

fn normalize(raw: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in raw.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
