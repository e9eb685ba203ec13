//! Input collection
//!
//! Gathers the credential, model identifier and uploaded document, and
//! checks presence only. Nothing here talks to the network.

use crate::pipeline::PipelineError;
use std::path::Path;

/// Uploaded document: display name plus raw bytes as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a document from disk, named after its file name
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// True when the name carries a `.tex` extension (case-insensitive)
    pub fn has_tex_extension(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("tex"))
            .unwrap_or(false)
    }
}

/// Raw user inputs for one generation attempt
#[derive(Debug, Clone, Default)]
pub struct GenerationInputs {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub document: Option<Document>,
}

/// Inputs that passed the presence checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectedInputs<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    /// Decoded document text, guaranteed non-blank
    pub text: &'a str,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl GenerationInputs {
    pub fn new(api_key: Option<String>, model: Option<String>, document: Option<Document>) -> Self {
        Self {
            api_key,
            model,
            document,
        }
    }

    /// Check presence, decode the document and reject blank text.
    ///
    /// Checks run in order: API key, model, document presence, UTF-8
    /// decoding, emptiness.
    pub fn collect(&self) -> Result<CollectedInputs<'_>, PipelineError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(PipelineError::MissingApiKey)?;
        let model = present(&self.model).ok_or(PipelineError::MissingModel)?;
        let document = self.document.as_ref().ok_or(PipelineError::MissingDocument)?;

        let text = std::str::from_utf8(&document.bytes).map_err(PipelineError::Decode)?;
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyDocument);
        }

        Ok(CollectedInputs {
            api_key,
            model,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(key: Option<&str>, model: Option<&str>, doc: Option<&[u8]>) -> GenerationInputs {
        GenerationInputs::new(
            key.map(str::to_string),
            model.map(str::to_string),
            doc.map(|b| Document::new("paper.tex", b)),
        )
    }

    #[test]
    fn collects_valid_inputs() {
        let raw = inputs(Some("k"), Some(" gemini-2.0-flash "), Some(b"\\begin{lemma}x\\end{lemma}"));
        let collected = raw.collect().unwrap();
        assert_eq!(collected.api_key, "k");
        assert_eq!(collected.model, "gemini-2.0-flash");
        assert_eq!(collected.text, "\\begin{lemma}x\\end{lemma}");
    }

    #[test]
    fn missing_key_checked_first() {
        let err = inputs(None, None, None).collect().unwrap_err();
        assert!(matches!(err, PipelineError::MissingApiKey));
        let err = inputs(Some("   "), Some("m"), Some(b"x")).collect().unwrap_err();
        assert!(matches!(err, PipelineError::MissingApiKey));
    }

    #[test]
    fn missing_model() {
        let err = inputs(Some("k"), Some(""), Some(b"x")).collect().unwrap_err();
        assert!(matches!(err, PipelineError::MissingModel));
    }

    #[test]
    fn missing_document() {
        let err = inputs(Some("k"), Some("m"), None).collect().unwrap_err();
        assert!(matches!(err, PipelineError::MissingDocument));
    }

    #[test]
    fn undecodable_document() {
        let err = inputs(Some("k"), Some("m"), Some(&[0xff, 0xfe, 0x00])).collect().unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn blank_document() {
        for doc in [&b""[..], b"   ", b"\n\t\r\n"] {
            let err = inputs(Some("k"), Some("m"), Some(doc)).collect().unwrap_err();
            assert!(matches!(err, PipelineError::EmptyDocument));
        }
    }

    #[test]
    fn tex_extension_detection() {
        assert!(Document::new("paper.tex", "").has_tex_extension());
        assert!(Document::new("PAPER.TEX", "").has_tex_extension());
        assert!(!Document::new("paper.txt", "").has_tex_extension());
        assert!(!Document::new("paper", "").has_tex_extension());
    }
}
