use lopdf::content::Content;
use lopdf::{Document, Object};
use tracing::warn;

use super::{ExtractError, TextStrategy};

const PDF_MAGIC: &[u8] = b"%PDF";
const MIN_PDF_BYTES: usize = 100;
const MIN_CONTENT_STREAM_CHARS: usize = 10;
/// `TJ` offsets below this (thousandths of an em) are rendered as a space.
const TJ_WORD_GAP: f32 = -200.0;

/// Full-featured extraction through `pdf-extract` (font decoding, layout).
pub struct PdfExtractStrategy;

impl TextStrategy for PdfExtractStrategy {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::Parse(e.to_string()))
    }
}

/// Page-by-page extraction through `lopdf`. Pages that fail are skipped.
pub struct LopdfStrategy;

impl TextStrategy for LopdfStrategy {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        let doc = Document::load_mem(data).map_err(|e| ExtractError::Parse(e.to_string()))?;

        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        if pages.is_empty() {
            return Err(ExtractError::NoPages);
        }

        let mut text = String::new();
        for page in pages {
            match doc.extract_text(&[page]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(e) => warn!(page, error = %e, "lopdf page extraction failed"),
            }
        }
        Ok(text)
    }
}

/// Last-resort scan of raw content streams: collects the string operands of
/// text-showing operators without any font decoding.
pub struct ContentStreamStrategy;

impl TextStrategy for ContentStreamStrategy {
    fn name(&self) -> &'static str {
        "content-stream"
    }

    fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        if data.len() < MIN_PDF_BYTES {
            return Err(ExtractError::TooSmall(data.len()));
        }
        if !data.starts_with(PDF_MAGIC) {
            return Err(ExtractError::NotPdf);
        }

        let doc = Document::load_mem(data).map_err(|e| ExtractError::Parse(e.to_string()))?;
        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(ExtractError::NoPages);
        }

        let mut text = String::new();
        for (page, page_id) in pages {
            let raw = match doc.get_page_content(page_id) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(page, error = %e, "Page has no readable content stream");
                    continue;
                }
            };
            let content = match Content::decode(&raw) {
                Ok(content) => content,
                Err(e) => {
                    warn!(page, error = %e, "Content stream could not be decoded");
                    continue;
                }
            };

            for op in &content.operations {
                match op.operator.as_str() {
                    "Tj" | "'" | "\"" => {
                        if let Some(Object::String(bytes, _)) = op.operands.last() {
                            text.push_str(&String::from_utf8_lossy(bytes));
                        }
                    }
                    "TJ" => {
                        if let Some(Object::Array(items)) = op.operands.first() {
                            push_tj_array(&mut text, items);
                        }
                    }
                    "T*" | "Td" | "TD" | "ET" => text.push(' '),
                    _ => {}
                }
            }
            text.push('\n');
        }

        let chars = text.trim().chars().count();
        if chars < MIN_CONTENT_STREAM_CHARS {
            return Err(ExtractError::InsufficientText(chars));
        }
        Ok(text)
    }
}

fn push_tj_array(text: &mut String, items: &[Object]) {
    for item in items {
        match item {
            Object::String(bytes, _) => text.push_str(&String::from_utf8_lossy(bytes)),
            Object::Integer(offset) if (*offset as f32) < TJ_WORD_GAP => text.push(' '),
            Object::Real(offset) if (*offset as f32) < TJ_WORD_GAP => text.push(' '),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    /// Builds a one-page PDF whose content stream shows each line with `Tj`.
    fn build_pdf(lines: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.new_object_id();
        let resources_id = doc.new_object_id();
        let content_id = doc.new_object_id();
        let page_id = doc.new_object_id();

        doc.objects.insert(
            font_id,
            Object::Dictionary(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Courier",
            }),
        );
        doc.objects.insert(
            resources_id,
            Object::Dictionary(dictionary! {
                "Font" => dictionary! {
                    "F1" => font_id,
                },
            }),
        );

        let mut content = String::from("BT /F1 12 Tf 50 700 Td ");
        for line in lines {
            content.push_str(&format!("({line}) Tj 0 -14 Td "));
        }
        content.push_str("ET");
        doc.objects.insert(
            content_id,
            Object::Stream(Stream::new(dictionary! {}, content.into_bytes())),
        );

        doc.objects.insert(
            page_id,
            Object::Dictionary(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => resources_id,
                "Contents" => content_id,
            }),
        );
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    const CV_LINES: &[&str] = &[
        "Camille Martin - Data Engineer",
        "Experience: 6 years building Rust and Python pipelines",
        "Skills: Rust, PostgreSQL, Kafka, Airflow",
        "Education: Master in Computer Science",
    ];

    #[test]
    fn test_content_stream_rejects_small_input() {
        let err = ContentStreamStrategy.extract(b"%PDF-1.4").unwrap_err();
        assert!(matches!(err, ExtractError::TooSmall(8)));
    }

    #[test]
    fn test_content_stream_rejects_missing_magic() {
        let data = vec![b'x'; 200];
        let err = ContentStreamStrategy.extract(&data).unwrap_err();
        assert!(matches!(err, ExtractError::NotPdf));
    }

    #[test]
    fn test_content_stream_collects_shown_strings() {
        let pdf = build_pdf(CV_LINES);
        let text = ContentStreamStrategy.extract(&pdf).unwrap();
        assert!(text.contains("Camille Martin - Data Engineer"));
        assert!(text.contains("Skills: Rust, PostgreSQL, Kafka, Airflow"));
    }

    #[test]
    fn test_content_stream_rejects_pdf_without_text() {
        let pdf = build_pdf(&[]);
        let err = ContentStreamStrategy.extract(&pdf).unwrap_err();
        assert!(matches!(err, ExtractError::InsufficientText(_)));
    }

    #[test]
    fn test_lopdf_rejects_garbage() {
        let err = LopdfStrategy.extract(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn test_tj_array_inserts_word_gaps() {
        let mut text = String::new();
        push_tj_array(
            &mut text,
            &[
                Object::string_literal("Data"),
                Object::Integer(-250),
                Object::string_literal("Engineer"),
                Object::Integer(-20),
                Object::string_literal("!"),
            ],
        );
        assert_eq!(text, "Data Engineer!");
    }

    #[test]
    fn test_default_chain_extracts_generated_pdf() {
        let pdf = build_pdf(CV_LINES);
        let text = crate::extraction::ExtractionChain::default().extract(&pdf, "camille.pdf");
        assert!(text.contains("Camille"));
        assert!(text.contains("PostgreSQL"));
    }
}
