use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FileExtensionError {
    #[error("Failed to get file extension for: {0}")]
    MissingFileExtension(String),
    #[error("Unsupported file extension for file: {0}")]
    UnsupportedFileExtension(String),
}

pub type FileFormatResult<T> = Result<T, FileExtensionError>;

pub fn get_file_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|os_str| os_str.to_str())
}

/// Text formats accepted for settings and notch exchange files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerdeFormat {
    Json,
    Toml,
}

impl SerdeFormat {
    pub fn from_path(path: &Path) -> FileFormatResult<Self> {
        let ext = get_file_extension(path)
            .ok_or_else(|| FileExtensionError::MissingFileExtension(path.display().to_string()))?;

        if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Ok(Self::Toml)
        } else {
            Err(FileExtensionError::UnsupportedFileExtension(
                path.display().to_string(),
            ))
        }
    }
}
