use async_trait::async_trait;
use std::io::{Cursor, Read};
use thiserror::Error;
use tracing::{debug, instrument};

/// Media types the parse endpoint accepts
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const ODT_MEDIA_TYPE: &str = "application/vnd.oasis.opendocument.text";

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Unsupported media type: {content_type}")]
    UnsupportedMediaType { content_type: String },

    #[error("Failed to extract text: {message}")]
    Extraction { message: String },
}

/// Text extraction capability injected into the parse handler. The extraction
/// itself is delegated entirely to third-party parsing libraries; this service
/// has no document-format logic of its own.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract plain text from a document payload of the given media type.
    async fn extract(&self, content_type: &str, payload: &[u8]) -> Result<String, ExtractorError>;
}

/// Default extractor: pdf-extract for PDF payloads, the ODF zip container's
/// `content.xml` text nodes for OpenDocument text.
#[derive(Debug, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pdf(payload: &[u8]) -> Result<String, ExtractorError> {
        pdf_extract::extract_text_from_mem(payload).map_err(|e| ExtractorError::Extraction {
            message: e.to_string(),
        })
    }

    fn extract_odt(payload: &[u8]) -> Result<String, ExtractorError> {
        let extraction_error = |e: &dyn std::fmt::Display| ExtractorError::Extraction {
            message: e.to_string(),
        };

        let mut archive =
            zip::ZipArchive::new(Cursor::new(payload)).map_err(|e| extraction_error(&e))?;
        let mut content = String::new();
        archive
            .by_name("content.xml")
            .map_err(|e| extraction_error(&e))?
            .read_to_string(&mut content)
            .map_err(|e| extraction_error(&e))?;

        let mut reader = quick_xml::Reader::from_reader(content.as_bytes());
        let mut buf = Vec::new();
        let mut text = String::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Text(t)) => {
                    let chunk = t.unescape().map_err(|e| extraction_error(&e))?;
                    text.push_str(&chunk);
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(extraction_error(&e)),
            }
            buf.clear();
        }
        Ok(text)
    }
}

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    async fn extract(&self, content_type: &str, payload: &[u8]) -> Result<String, ExtractorError> {
        debug!("Extracting text from document");

        // Parsing is CPU-bound; keep it off the async worker threads.
        let content_type = content_type.to_string();
        let payload = payload.to_vec();
        let result = tokio::task::spawn_blocking(move || match content_type.as_str() {
            PDF_MEDIA_TYPE => Self::extract_pdf(&payload),
            ODT_MEDIA_TYPE => Self::extract_odt(&payload),
            other => Err(ExtractorError::UnsupportedMediaType {
                content_type: other.to_string(),
            }),
        })
        .await;

        match result {
            Ok(extracted) => extracted,
            Err(e) => Err(ExtractorError::Extraction {
                message: format!("extraction task failed: {}", e),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_media_type_is_rejected() {
        let extractor = DocumentTextExtractor::new();
        let result = extractor.extract("text/csv", b"a,b,c").await;
        match result {
            Err(ExtractorError::UnsupportedMediaType { content_type }) => {
                assert_eq!(content_type, "text/csv");
            }
            other => panic!("Expected UnsupportedMediaType, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_garbage_pdf_payload_fails_cleanly() {
        let extractor = DocumentTextExtractor::new();
        let result = extractor.extract(PDF_MEDIA_TYPE, b"not a pdf at all").await;
        assert!(matches!(result, Err(ExtractorError::Extraction { .. })));
    }

    #[tokio::test]
    async fn test_garbage_odt_payload_fails_cleanly() {
        let extractor = DocumentTextExtractor::new();
        let result = extractor.extract(ODT_MEDIA_TYPE, b"not a zip").await;
        assert!(matches!(result, Err(ExtractorError::Extraction { .. })));
    }

    #[tokio::test]
    async fn test_odt_content_text_is_extracted() {
        // Minimal ODF container: a zip holding only content.xml
        use std::io::Write;

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("content.xml", zip::write::FileOptions::default())
                .unwrap();
            writer
                .write_all(
                    br#"<?xml version="1.0"?><office:document-content xmlns:office="x"><office:body><text:p xmlns:text="t">Hello ODT</text:p></office:body></office:document-content>"#,
                )
                .unwrap();
            writer.finish().unwrap();
        }

        let extractor = DocumentTextExtractor::new();
        let text = extractor
            .extract(ODT_MEDIA_TYPE, cursor.get_ref())
            .await
            .unwrap();
        assert!(text.contains("Hello ODT"));
    }
}
