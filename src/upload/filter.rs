use std::path::Path;

/// File types accepted for blog uploads. Matched against both the filename
/// extension and the declared MIME type.
pub const ALLOWED_TYPES: &[&str] = &[
    "jpeg", "jpg", "png", "gif", "pdf", "mp4", "avi", "mov", "mkv", "webm",
];

/// Reason an upload was rejected before any bytes were written.
#[derive(Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Filename has no extension at all.
    MissingExtension,
    /// Extension is outside the allow-set.
    Extension(String),
    /// Declared MIME type contains none of the allowed tokens.
    MimeType(String),
}

impl RejectReason {
    pub fn message(&self) -> String {
        match self {
            Self::MissingExtension => "Filename has no extension".into(),
            Self::Extension(ext) => format!("File extension '.{ext}' is not allowed"),
            Self::MimeType(mime) => format!("MIME type '{mime}' is not allowed"),
        }
    }
}

/// Decides accept/reject for an upload from its declared filename and MIME
/// type. Both checks must pass: the extension (case-insensitive) must be in
/// the allow-set, and the MIME string must contain one of the allowed
/// tokens as a substring.
///
/// This is a shallow declared-type check, not magic-byte sniffing. On
/// acceptance the extension is returned with its input casing preserved,
/// for use in the stored filename.
pub fn check_upload<'a>(filename: &'a str, mime_type: &str) -> Result<&'a str, RejectReason> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .ok_or(RejectReason::MissingExtension)?;

    let ext_lower = ext.to_ascii_lowercase();
    if !ALLOWED_TYPES.contains(&ext_lower.as_str()) {
        return Err(RejectReason::Extension(ext_lower));
    }

    if !ALLOWED_TYPES.iter().any(|t| mime_type.contains(t)) {
        return Err(RejectReason::MimeType(mime_type.to_string()));
    }

    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_extension_and_mime() {
        assert_eq!(check_upload("photo.png", "image/png"), Ok("png"));
        assert_eq!(check_upload("doc.pdf", "application/pdf"), Ok("pdf"));
        assert_eq!(check_upload("clip.webm", "video/webm"), Ok("webm"));
    }

    #[test]
    fn extension_check_is_case_insensitive_but_preserves_case() {
        assert_eq!(check_upload("photo.PNG", "image/png"), Ok("PNG"));
        assert_eq!(check_upload("photo.JpG", "image/jpg"), Ok("JpG"));
    }

    #[test]
    fn rejects_missing_extension() {
        assert_eq!(
            check_upload("noext", "image/png"),
            Err(RejectReason::MissingExtension)
        );
    }

    #[test]
    fn rejects_disallowed_extension() {
        assert_eq!(
            check_upload("script.exe", "image/png"),
            Err(RejectReason::Extension("exe".into()))
        );
        assert_eq!(
            check_upload("page.html", "text/html"),
            Err(RejectReason::Extension("html".into()))
        );
    }

    #[test]
    fn mime_match_is_substring_based() {
        // "jpeg" appears inside "image/jpeg"; a bare token also passes.
        assert!(check_upload("a.jpeg", "image/jpeg").is_ok());
        assert!(check_upload("a.jpeg", "jpeg").is_ok());
    }

    #[test]
    fn rejects_mime_without_allowed_token() {
        // Correct MIME for .mov is video/quicktime, which contains no
        // allowed token. The shallow check rejects it by design.
        assert_eq!(
            check_upload("clip.mov", "video/quicktime"),
            Err(RejectReason::MimeType("video/quicktime".into()))
        );
        assert_eq!(
            check_upload("a.png", "text/plain"),
            Err(RejectReason::MimeType("text/plain".into()))
        );
    }

    #[test]
    fn both_checks_must_pass() {
        // Good extension, bad MIME.
        assert!(check_upload("a.png", "application/octet-stream").is_err());
        // Bad extension, MIME containing an allowed token.
        assert!(check_upload("a.exe", "image/png").is_err());
    }
}
