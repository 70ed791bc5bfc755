//! Text extraction chain for uploaded CVs.
//!
//! Strategies run in order and the first one producing enough text wins.
//! The chain itself never fails: when every strategy is exhausted it falls
//! back to a placeholder built from the filename.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, info, warn};

pub mod handlers;
pub mod strategies;

use strategies::{ContentStreamStrategy, LopdfStrategy, PdfExtractStrategy};

/// Minimum characters a strategy must produce to be accepted.
pub const MIN_ACCEPTED_CHARS: usize = 100;
/// Below this, the final text is replaced by a placeholder.
pub const MIN_FINAL_CHARS: usize = 50;
/// Uploads larger than this are treated as PDFs whatever their name.
const PDF_SIZE_THRESHOLD: usize = 1000;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF too small or corrupted ({0} bytes)")]
    TooSmall(usize),

    #[error("file does not start with the PDF header")]
    NotPdf,

    #[error("PDF parse error: {0}")]
    Parse(String),

    #[error("PDF contains no pages")]
    NoPages,

    #[error("extracted content too small ({0} characters)")]
    InsufficientText(usize),

    #[error("strategy panicked: {0}")]
    Panicked(String),
}

/// A single way of turning PDF bytes into text.
pub trait TextStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, data: &[u8]) -> Result<String, ExtractError>;
}

pub struct ExtractionChain {
    strategies: Vec<Box<dyn TextStrategy>>,
}

impl Default for ExtractionChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(PdfExtractStrategy),
            Box::new(LopdfStrategy),
            Box::new(ContentStreamStrategy),
        ])
    }
}

impl ExtractionChain {
    pub fn new(strategies: Vec<Box<dyn TextStrategy>>) -> Self {
        Self { strategies }
    }

    /// Produces best-effort text for an upload. Always returns non-empty text.
    pub fn extract(&self, data: &[u8], filename: &str) -> String {
        let stem = filename_stem(filename);

        let text = if looks_like_pdf(data, filename) {
            debug!(filename, bytes = data.len(), "PDF detected, running extraction chain");
            self.extract_pdf(data).unwrap_or_else(|| {
                warn!(filename, "All PDF strategies failed, using filename placeholder");
                format!("CV de {stem} - Erreur extraction PDF")
            })
        } else {
            debug!(filename, bytes = data.len(), "Plain text upload, skipping PDF chain");
            String::from_utf8_lossy(data).into_owned()
        };

        if char_count(&text) < MIN_FINAL_CHARS {
            debug!(filename, "Extracted content too small, using placeholder");
            return format!("CV de {stem} - Contenu à extraire");
        }

        text
    }

    fn extract_pdf(&self, data: &[u8]) -> Option<String> {
        for strategy in &self.strategies {
            match run_isolated(strategy.as_ref(), data) {
                Ok(text) if char_count(&text) >= MIN_ACCEPTED_CHARS => {
                    info!(
                        strategy = strategy.name(),
                        chars = char_count(&text),
                        "PDF extraction accepted"
                    );
                    return Some(text);
                }
                Ok(text) => debug!(
                    strategy = strategy.name(),
                    chars = char_count(&text),
                    "PDF extraction rejected: content too small"
                ),
                Err(e) => debug!(
                    strategy = strategy.name(),
                    error = %e,
                    "PDF extraction rejected"
                ),
            }
        }
        None
    }
}

/// Runs a strategy behind a panic boundary so a misbehaving parser only
/// fails its own stage.
fn run_isolated(strategy: &dyn TextStrategy, data: &[u8]) -> Result<String, ExtractError> {
    panic::catch_unwind(AssertUnwindSafe(|| strategy.extract(data))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        warn!(strategy = strategy.name(), %message, "PDF strategy panicked");
        Err(ExtractError::Panicked(message))
    })
}

fn looks_like_pdf(data: &[u8], filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf") || data.len() > PDF_SIZE_THRESHOLD
}

/// Filename with a trailing `.pdf` removed, case-insensitively.
pub fn filename_stem(filename: &str) -> &str {
    match filename
        .len()
        .checked_sub(4)
        .and_then(|i| filename.get(i..).map(|ext| (i, ext)))
    {
        Some((i, ext)) if ext.eq_ignore_ascii_case(".pdf") => &filename[..i],
        _ => filename,
    }
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}
