pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Structured input from `--input <file>` or piped stdin, in that order.
/// `None` means the command should fall back to its flags.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        let text = file::read_to_string(path)?;
        let value = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse '{path}': {e}"))?;
        return Ok(Some(value));
    }
    match stdin::read_piped()? {
        Some(text) => {
            let value = serde_json::from_str(&text)
                .map_err(|e| format!("Failed to parse stdin: {e}"))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
