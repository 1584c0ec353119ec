use std::fs::{create_dir_all, File};
use std::io::{Error as IOError, Write};
use std::path::Path;

/// Writes the built-in settings to `path` unless a file already exists there.
/// Returns whether a file was written.
pub fn write_default_settings<P: AsRef<Path>>(path: P) -> Result<bool, IOError> {
  let path = path.as_ref();
  if !path.exists() {
    if let Some(p) = path.parent() {
      if !p.as_os_str().is_empty() && !p.exists() {
        create_dir_all(p)?;
      }
    }
    File::create(path)?.write_all(DEFAULT_SETTINGS_JSON.as_bytes())?;
    Ok(true)
  } else {
    Ok(false)
  }
}

pub const DEFAULT_SETTINGS_JSON: &str = r#"
{
  "conversions" : [
    { "input" : "wordnets/en_wordnet_lmf_2024.xml",
      "output" : "src-tauri/resources/en_wordnet_lmf_2024.json",
      "idPrefix" : "oewn-" },
    { "input" : "wordnets/lv_wordnet_lmf_2025.xml",
      "output" : "src-tauri/resources/lv_wordnet_lmf_2025.json",
      "idPrefix" : "wordnet_lv-tezaurs_2025_2-" }
  ]
}
"#;

#[cfg(test)]
mod tests {
  use super::*;
  use std::env::temp_dir;
  use std::fs::{read_to_string, remove_dir_all};

  #[test]
  fn test_write_default_settings() {
    let dir = temp_dir().join("wnconv_resources");
    if dir.exists() {
      remove_dir_all(&dir).unwrap();
    }
    let path = dir.join("nested/wnconv.json");
    assert!(write_default_settings(&path).unwrap());
    assert_eq!(DEFAULT_SETTINGS_JSON, read_to_string(&path).unwrap());
    assert!(!write_default_settings(&path).unwrap());
    remove_dir_all(&dir).unwrap();
  }
}
