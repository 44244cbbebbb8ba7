//! JSON manifest patching
//!
//! Two-tier strategy: a strict `serde_json` parse first, then a regex
//! fallback for hand-maintained files that are JSON-ish but not strictly
//! parseable (trailing commas, comments). The fallback refuses to patch a
//! file with more than one top-level array rather than guess which bracket
//! closes the module list.

use crate::error::{Error, Result};
use crate::types::PREBID_MODULES_FILE;
use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs;
use std::path::Path;

/// Idempotently append `value` to the JSON array stored at `path`.
///
/// Returns whether the file content changed.
pub fn ensure_manifest_member(path: &Path, value: &str) -> Result<bool> {
    let text = fs::read_to_string(path)?;

    if let Ok(Value::Array(mut items)) = serde_json::from_str::<Value>(&text) {
        if items.iter().any(|item| item.as_str() == Some(value)) {
            return Ok(false);
        }
        items.push(Value::String(value.to_string()));
        fs::write(path, render_manifest(&items)?)?;
        return Ok(true);
    }

    ensure_member_fallback(path, &text, value)
}

/// Register `<bidder>BidAdapter` entries in the prebid repo's `modules.json`.
pub fn update_prebid_modules(prebid_repo: &Path, bidders: &[String]) -> Result<bool> {
    let manifest = prebid_repo.join(PREBID_MODULES_FILE);
    if !manifest.exists() {
        return Err(Error::MissingFile(manifest));
    }
    let mut changed = false;
    for bidder in bidders {
        changed |= ensure_manifest_member(&manifest, &format!("{bidder}BidAdapter"))?;
    }
    Ok(changed)
}

/// Serialize with 4-space indentation and a trailing newline, matching the
/// hand-maintained formatting of the upstream manifest.
fn render_manifest(items: &[Value]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    items.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Text-surgery tier for manifests the strict parser rejects.
///
/// Best-effort: the inserted line carries no separating comma, consistent
/// with a file that was already outside strict JSON.
fn ensure_member_fallback(path: &Path, text: &str, value: &str) -> Result<bool> {
    let present = Regex::new(&format!(r#""{}"\s*\]"#, regex::escape(value)))?;
    if present.is_match(text) {
        return Ok(false);
    }

    let closer = Regex::new(r"(?m)^\]\s*$")?;
    let closers: Vec<_> = closer.find_iter(text).collect();
    let tail = match closers.as_slice() {
        [] => {
            return Err(Error::PatternNotFound {
                file: path.to_path_buf(),
                what: "closing bracket of the module array".to_string(),
            });
        }
        [only] => only,
        _ => return Err(Error::AmbiguousManifest(path.to_path_buf())),
    };

    let mut patched = String::with_capacity(text.len() + value.len() + 16);
    patched.push_str(&text[..tail.start()]);
    patched.push_str("    \"");
    patched.push_str(value);
    patched.push_str("\"\n]");
    patched.push_str(&text[tail.end()..]);
    fs::write(path, patched)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn manifest_in(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join(PREBID_MODULES_FILE);
        fs::write(&path, content).expect("write fixture");
        path
    }

    #[test]
    fn test_strict_append_and_idempotence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = manifest_in(dir.path(), "[\n    \"fooBidAdapter\"\n]\n");

        assert!(ensure_manifest_member(&path, "kargoBidAdapter").expect("first"));
        let text = fs::read_to_string(&path).expect("read");
        assert_eq!(
            text,
            "[\n    \"fooBidAdapter\",\n    \"kargoBidAdapter\"\n]\n"
        );

        assert!(!ensure_manifest_member(&path, "kargoBidAdapter").expect("second"));
        assert_eq!(fs::read_to_string(&path).expect("read"), text);
    }

    #[test]
    fn test_fallback_on_trailing_comma_dialect() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = manifest_in(dir.path(), "[\n    \"fooBidAdapter\",\n]\n");

        assert!(ensure_manifest_member(&path, "kargoBidAdapter").expect("first"));
        let text = fs::read_to_string(&path).expect("read");
        assert!(text.contains("    \"kargoBidAdapter\"\n]"));
        assert!(text.contains("fooBidAdapter"));

        assert!(!ensure_manifest_member(&path, "kargoBidAdapter").expect("second"));
    }

    #[test]
    fn test_fallback_rejects_multiple_arrays() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = manifest_in(dir.path(), "[\n    \"a\",\n]\n[\n    \"b\",\n]\n");

        let err = ensure_manifest_member(&path, "c").expect_err("should reject");
        assert!(matches!(err, Error::AmbiguousManifest(_)));
    }

    #[test]
    fn test_update_prebid_modules_maps_slugs_to_adapters() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = manifest_in(dir.path(), "[\n    \"fooBidAdapter\"\n]\n");

        let bidders = vec!["kargo".to_string(), "teads".to_string()];
        assert!(update_prebid_modules(dir.path(), &bidders).expect("update"));

        let parsed: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(
            parsed,
            vec!["fooBidAdapter", "kargoBidAdapter", "teadsBidAdapter"]
        );

        // second run is a no-op
        assert!(!update_prebid_modules(dir.path(), &bidders).expect("rerun"));
    }

    #[test]
    fn test_update_prebid_modules_missing_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = update_prebid_modules(dir.path(), &["kargo".to_string()])
            .expect_err("should fail");
        assert!(matches!(err, Error::MissingFile(_)));
    }
}
