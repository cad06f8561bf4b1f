//! Upload verification
//!
//! Validates uploaded files against a small allow-list of supported kinds.
//! A file is accepted only if its extension, declared MIME type, size, and
//! leading magic bytes all match the expected kind.

use stratum_common::StratumError;

/// Default upload size cap: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Supported upload kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Png,
    Xlsx,
}

struct FileSignature {
    signature: &'static [u8],
    extensions: &'static [&'static str],
    mime_types: &'static [&'static str],
    title: &'static str,
}

impl FileKind {
    fn descriptor(self) -> &'static FileSignature {
        match self {
            FileKind::Png => &FileSignature {
                signature: b"\x89PNG\r\n\x1a\n",
                extensions: &[".png"],
                mime_types: &["image/png"],
                title: "PNG image",
            },
            FileKind::Xlsx => &FileSignature {
                signature: b"PK\x03\x04",
                extensions: &[".xlsx"],
                mime_types: &[
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                ],
                title: "Microsoft Excel file",
            },
        }
    }
}

/// Verify an uploaded file against the expected kind.
///
/// Checks, in order: file extension, declared MIME type, size cap, and the
/// magic-byte prefix of the content. Returns the content bytes on success.
pub fn verify_upload(
    kind: FileKind,
    file_name: &str,
    content_type: &str,
    data: Vec<u8>,
    max_bytes: usize,
) -> Result<Vec<u8>, StratumError> {
    let descriptor = kind.descriptor();
    let message = format!("Invalid file type. Only {}s are accepted.", descriptor.title);

    let extension = file_name
        .rfind('.')
        .map(|idx| &file_name[idx..])
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !descriptor.extensions.contains(&extension.as_str())
        || !descriptor.mime_types.contains(&content_type)
    {
        return Err(StratumError::InvalidData(message));
    }
    if data.len() > max_bytes {
        return Err(StratumError::InvalidData(
            "File size exceeds the limit.".to_string(),
        ));
    }
    if !data.starts_with(descriptor.signature) {
        return Err(StratumError::InvalidData(message));
    }
    Ok(data)
}

/// Verify that the uploaded file is a valid PNG image.
pub fn verify_png_upload(
    file_name: &str,
    content_type: &str,
    data: Vec<u8>,
) -> Result<Vec<u8>, StratumError> {
    verify_upload(
        FileKind::Png,
        file_name,
        content_type,
        data,
        DEFAULT_MAX_UPLOAD_BYTES,
    )
}

/// Verify that the uploaded file is a valid XLSX spreadsheet.
pub fn verify_xlsx_upload(
    file_name: &str,
    content_type: &str,
    data: Vec<u8>,
) -> Result<Vec<u8>, StratumError> {
    verify_upload(
        FileKind::Xlsx,
        file_name,
        content_type,
        data,
        DEFAULT_MAX_UPLOAD_BYTES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        data.extend_from_slice(&[0u8; 16]);
        data
    }

    #[test]
    fn test_valid_png() {
        let data = png_bytes();
        let result = verify_png_upload("avatar.png", "image/png", data.clone());
        assert_eq!(result.unwrap(), data);
    }

    #[test]
    fn test_wrong_extension() {
        assert!(verify_png_upload("avatar.jpg", "image/png", png_bytes()).is_err());
    }

    #[test]
    fn test_wrong_mime_type() {
        assert!(verify_png_upload("avatar.png", "image/jpeg", png_bytes()).is_err());
    }

    #[test]
    fn test_wrong_signature() {
        let data = b"GIF89a".to_vec();
        assert!(verify_png_upload("avatar.png", "image/png", data).is_err());
    }

    #[test]
    fn test_size_cap() {
        let data = png_bytes();
        let err = verify_upload(FileKind::Png, "avatar.png", "image/png", data, 4).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_xlsx_signature() {
        let mut data = b"PK\x03\x04".to_vec();
        data.extend_from_slice(&[0u8; 8]);
        assert!(
            verify_xlsx_upload(
                "report.xlsx",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                data
            )
            .is_ok()
        );
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert!(verify_png_upload("AVATAR.PNG", "image/png", png_bytes()).is_ok());
    }
}
