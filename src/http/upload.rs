//! Uploaded file descriptors.
//!
//! Only the descriptor and its error code are interpreted here. Checking the
//! temporary file on disk and moving it into place belongs to the caller.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{HttpioError, HttpioResult};

static MIME_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[a-z]+/[0-7a-z+.-]+").expect("mime type regex is valid"));

/// Upload failure reasons reported by the request-binding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorCode {
    Ok,
    IniSize,
    FormSize,
    Partial,
    NoFile,
    NoTmpDir,
    CantWrite,
    Extension,
    Unknown(i32),
}

impl UploadErrorCode {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => UploadErrorCode::Ok,
            1 => UploadErrorCode::IniSize,
            2 => UploadErrorCode::FormSize,
            3 => UploadErrorCode::Partial,
            4 => UploadErrorCode::NoFile,
            6 => UploadErrorCode::NoTmpDir,
            7 => UploadErrorCode::CantWrite,
            8 => UploadErrorCode::Extension,
            n => UploadErrorCode::Unknown(n),
        }
    }

    pub fn message(self) -> String {
        match self {
            UploadErrorCode::Ok => "The file was uploaded successfully.".to_string(),
            UploadErrorCode::IniSize => {
                "Uploaded file exceeds the server upload size limit.".to_string()
            }
            UploadErrorCode::FormSize => {
                "Uploaded file exceeds the size limit given by the form.".to_string()
            }
            UploadErrorCode::Partial => "The uploaded file was only partially uploaded.".to_string(),
            UploadErrorCode::NoFile => "No file was uploaded.".to_string(),
            UploadErrorCode::NoTmpDir => "Missing a temporary folder.".to_string(),
            UploadErrorCode::CantWrite => "Failed to write file to disk.".to_string(),
            UploadErrorCode::Extension => "A server extension stopped the file upload.".to_string(),
            UploadErrorCode::Unknown(n) => format!("Unknown upload error code {n}."),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadDescriptor {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub temporary_path: String,
    pub error_code: i32,
}

impl UploadDescriptor {
    pub fn error(&self) -> UploadErrorCode {
        UploadErrorCode::from_code(self.error_code)
    }

    /// Checks the reported error code and the declared MIME type.
    pub fn validate(&self) -> HttpioResult<()> {
        let code = self.error();
        if code != UploadErrorCode::Ok {
            return Err(HttpioError::FileUpload(code.message()));
        }

        if !MIME_TYPE.is_match(&self.mime_type) {
            return Err(HttpioError::FileUpload(format!(
                "Invalid type '{}' for file '{}'",
                self.mime_type, self.temporary_path
            )));
        }

        Ok(())
    }
}
