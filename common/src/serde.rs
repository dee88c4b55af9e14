use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::file_format::SerdeFormat;
use crate::normalize_string::NormalizeString;

pub type Result<T> = anyhow::Result<T>;

pub fn serialize<T: Serialize>(value: &T, format: SerdeFormat) -> Result<String> {
    let text = match format {
        SerdeFormat::Json => serde_json::to_string_pretty(value)?,
        SerdeFormat::Toml => toml::to_string(value)?,
    };

    Ok(text.normalize())
}

pub fn deserialize<T: DeserializeOwned>(serialized: &str, format: SerdeFormat) -> Result<T> {
    match format {
        SerdeFormat::Json => Ok(serde_json::from_str(serialized)?),
        SerdeFormat::Toml => Ok(toml::from_str(serialized)?),
    }
}

/// Reads `path` and deserializes it using the format implied by its extension.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = SerdeFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    deserialize(&text, format)
}

pub fn save_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let format = SerdeFormat::from_path(path)?;
    std::fs::write(path, serialize(value, format)?)?;
    Ok(())
}
