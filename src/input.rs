use std::path::Path;

/// Largest file the service accepts for upload.
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Declared type of an attached transcript file, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    PlainText,
    Docx,
    Pdf,
}

impl MediaType {
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// MIME string sent with the multipart upload.
    pub fn essence(self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pdf => "application/pdf",
        }
    }
}

/// Why a picked file was refused before ever reaching the service.
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error("unsupported file type: {0} (use .txt, .docx or .pdf)")]
    UnsupportedType(String),
    #[error("file is too large: {size} bytes (limit {MAX_FILE_BYTES})")]
    TooLarge { size: usize },
}

/// An uploaded file held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub name: String,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

impl AttachedFile {
    /// Validate name and size the way the upload widget advertises them.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AttachError> {
        let name = name.into();
        let media_type = MediaType::from_name(&name)
            .ok_or_else(|| AttachError::UnsupportedType(name.clone()))?;
        if bytes.len() > MAX_FILE_BYTES {
            return Err(AttachError::TooLarge { size: bytes.len() });
        }
        Ok(Self {
            name,
            media_type,
            bytes,
        })
    }

    /// Best-effort text of a plain-text file; opaque types yield `None`
    /// and are left for server-side extraction.
    pub fn text_preview(&self) -> Option<String> {
        match self.media_type {
            MediaType::PlainText => Some(String::from_utf8_lossy(&self.bytes).into_owned()),
            MediaType::Docx | MediaType::Pdf => None,
        }
    }
}

/// The user's working transcript: pasted text and/or one attached file.
/// Plain data, no validation; eligibility is the controller's call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptInput {
    pub text: String,
    pub file: Option<AttachedFile>,
}

impl TranscriptInput {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replaces any previous file; the text field is untouched.
    pub fn attach(&mut self, file: AttachedFile) {
        self.file = Some(file);
    }

    /// Drop the attached file, keeping any typed text.
    pub fn detach(&mut self) {
        self.file = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.file = None;
    }

    /// Anything to submit? Non-empty trimmed text or a present file.
    pub fn is_submittable(&self) -> bool {
        !self.text.trim().is_empty() || self.file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_follows_extension_case_insensitively() {
        assert_eq!(MediaType::from_name("notes.txt"), Some(MediaType::PlainText));
        assert_eq!(MediaType::from_name("MINUTES.TXT"), Some(MediaType::PlainText));
        assert_eq!(MediaType::from_name("report.Docx"), Some(MediaType::Docx));
        assert_eq!(MediaType::from_name("scan.pdf"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_name("archive.zip"), None);
        assert_eq!(MediaType::from_name("no_extension"), None);
    }

    #[test]
    fn oversized_files_are_refused() {
        let at_limit = AttachedFile::from_bytes("big.txt", vec![b'a'; MAX_FILE_BYTES]);
        assert!(at_limit.is_ok());

        let over = AttachedFile::from_bytes("bigger.txt", vec![b'a'; MAX_FILE_BYTES + 1]);
        assert!(matches!(over, Err(AttachError::TooLarge { .. })));
    }

    #[test]
    fn unsupported_extension_is_refused() {
        let err = AttachedFile::from_bytes("slides.pptx", vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, AttachError::UnsupportedType(_)));
    }

    #[test]
    fn text_preview_only_for_plain_text() {
        let txt = AttachedFile::from_bytes("a.txt", b"hello world".to_vec()).unwrap();
        assert_eq!(txt.text_preview().as_deref(), Some("hello world"));

        let pdf = AttachedFile::from_bytes("a.pdf", b"%PDF-1.7".to_vec()).unwrap();
        assert_eq!(pdf.text_preview(), None);
    }

    #[test]
    fn text_preview_is_lossy_on_invalid_utf8() {
        let txt = AttachedFile::from_bytes("a.txt", vec![0x68, 0x69, 0xFF]).unwrap();
        let preview = txt.text_preview().unwrap();
        assert!(preview.starts_with("hi"));
        assert!(preview.contains('\u{FFFD}'));
    }

    #[test]
    fn submit_eligibility() {
        let mut input = TranscriptInput::default();
        assert!(!input.is_submittable());

        input.set_text("   \n\t  ");
        assert!(!input.is_submittable(), "whitespace-only text is not submittable");

        input.set_text("hello");
        assert!(input.is_submittable());

        input.clear();
        input.attach(AttachedFile::from_bytes("a.pdf", vec![1]).unwrap());
        assert!(input.is_submittable(), "a file alone is submittable");
    }

    #[test]
    fn attach_replaces_file_and_keeps_text() {
        let mut input = TranscriptInput::default();
        input.set_text("typed notes");
        input.attach(AttachedFile::from_bytes("one.txt", b"1".to_vec()).unwrap());
        input.attach(AttachedFile::from_bytes("two.pdf", b"2".to_vec()).unwrap());

        assert_eq!(input.file.as_ref().unwrap().name, "two.pdf");
        assert_eq!(input.text, "typed notes");

        input.detach();
        assert!(input.file.is_none());
        assert_eq!(input.text, "typed notes");

        input.clear();
        assert_eq!(input.text, "");
        assert!(input.file.is_none());
    }
}
