//! Generated-array patching for the AMS helper
//!
//! Targets one specific generated-code convention:
//! `static final String[] NAME = new String[]{ "a", "b", ... };`.
//! The rebuilt body mirrors the upstream formatter (three-tab indent,
//! 100-column greedy packing) so the diff stays consistent with
//! hand-formatted code, and every byte outside the array body is
//! preserved verbatim.

use crate::error::{Error, Result};
use crate::types::{AMS_HELPER_ARRAY, AMS_HELPER_FILE};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Indent for packed lines, matching the generated file.
const LINE_INDENT: &str = "\t\t\t";

/// Soft line-width limit. A single token longer than this still gets its
/// own line.
const LINE_WIDTH: usize = 100;

/// Idempotently append `values` to the named array literal in `path`.
///
/// Returns whether the file content changed; an empty set of new values is
/// a no-op so re-runs never produce an empty commit.
pub fn ensure_source_array_members(
    path: &Path,
    array_name: &str,
    values: &[String],
) -> Result<bool> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;

    let start_pattern = Regex::new(&format!(
        r"static final String\[\] {} = new String\[\]\{{",
        regex::escape(array_name)
    ))?;
    let Some(start) = start_pattern.find(&text) else {
        return Err(Error::PatternNotFound {
            file: path.to_path_buf(),
            what: format!("{array_name} declaration"),
        });
    };
    let body_start = start.end();
    let tail = &text[body_start..];
    let Some(body_len) = tail.find("};") else {
        return Err(Error::PatternNotFound {
            file: path.to_path_buf(),
            what: format!("end of {array_name}"),
        });
    };

    let literal = Regex::new(r#""([^"]+)""#)?;
    let existing: Vec<&str> = literal
        .captures_iter(&tail[..body_len])
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect();
    let existing_set: HashSet<&str> = existing.iter().copied().collect();

    let new_items: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|value| !existing_set.contains(value))
        .collect();
    if new_items.is_empty() {
        return Ok(false);
    }

    let combined: Vec<&str> = existing.iter().copied().chain(new_items).collect();
    let mut patched = String::with_capacity(text.len() + 64);
    patched.push_str(&text[..body_start]);
    patched.push_str(&pack_elements(&combined));
    patched.push_str(&text[body_start + body_len..]);
    fs::write(path, patched)?;
    Ok(true)
}

/// Register bidder slugs in the AMS helper's generated array.
pub fn update_ams_helper(ams_repo: &Path, bidders: &[String]) -> Result<bool> {
    let helper = ams_repo.join(AMS_HELPER_FILE);
    ensure_source_array_members(&helper, AMS_HELPER_ARRAY, bidders)
}

/// Greedily pack quoted tokens into indented lines under the width limit.
fn pack_elements(items: &[&str]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::from(LINE_INDENT);
    for (index, item) in items.iter().enumerate() {
        let mut token = format!("\"{item}\"");
        if index < items.len() - 1 {
            token.push(',');
        }
        if current.len() + token.len() > LINE_WIDTH {
            lines.push(current.trim_end().to_string());
            current = format!("{LINE_INDENT}{token} ");
        } else {
            current.push_str(&token);
            current.push(' ');
        }
    }
    if !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }
    format!("\n{}\n\t\t", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const ARRAY: &str = "NETWORK_SLUGS_WITH_BID_ADAPTERS";

    fn helper_fixture(dir: &Path, elements: &str) -> PathBuf {
        let path = dir.join("PrebidModulesHelper.java");
        let text = format!(
            "package io.freestar.admanagement.deployments.utils;\n\n\
             public final class PrebidModulesHelper {{\n\
             \tstatic final String[] {ARRAY} = new String[]{{\n\
             \t\t\t{elements}\n\
             \t\t}};\n\
             }}\n"
        );
        fs::write(&path, text).expect("write fixture");
        path
    }

    fn read_elements(path: &Path) -> Vec<String> {
        let text = fs::read_to_string(path).expect("read");
        let literal = Regex::new(r#""([^"]+)""#).expect("regex");
        literal
            .captures_iter(&text)
            .map(|cap| cap[1].to_string())
            .collect()
    }

    #[test]
    fn test_appends_missing_values_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = helper_fixture(dir.path(), "\"alpha\"");

        let values = vec!["alpha".to_string(), "beta".to_string()];
        assert!(ensure_source_array_members(&path, ARRAY, &values).expect("patch"));

        let elements = read_elements(&path);
        assert_eq!(elements, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_noop_leaves_bytes_unchanged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = helper_fixture(dir.path(), "\"alpha\", \"bravo\"");
        let before = fs::read_to_string(&path).expect("read");

        let values = vec!["alpha".to_string()];
        assert!(!ensure_source_array_members(&path, ARRAY, &values).expect("patch"));
        assert_eq!(fs::read_to_string(&path).expect("read"), before);
    }

    #[test]
    fn test_preserves_surrounding_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = helper_fixture(dir.path(), "\"alpha\"");

        let values = vec!["beta".to_string()];
        assert!(ensure_source_array_members(&path, ARRAY, &values).expect("patch"));

        let text = fs::read_to_string(&path).expect("read");
        assert!(text.starts_with("package io.freestar.admanagement.deployments.utils;"));
        assert!(text.ends_with("\t\t};\n}\n"));
        assert!(text.contains(&format!("static final String[] {ARRAY} = new String[]{{")));
    }

    #[test]
    fn test_line_packing_respects_width() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = helper_fixture(dir.path(), "\"seed\"");

        let values: Vec<String> = (0..40).map(|i| format!("bidderSlug{i:02}")).collect();
        assert!(ensure_source_array_members(&path, ARRAY, &values).expect("patch"));

        let text = fs::read_to_string(&path).expect("read");
        for line in text.lines().filter(|line| line.starts_with("\t\t\t")) {
            assert!(
                line.len() <= LINE_WIDTH,
                "line too long ({}): {line:?}",
                line.len()
            );
        }
        assert_eq!(read_elements(&path).len(), 41);
    }

    #[test]
    fn test_missing_declaration_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Other.java");
        fs::write(&path, "public final class Other {}\n").expect("write");

        let values = vec!["kargo".to_string()];
        let err = ensure_source_array_members(&path, ARRAY, &values).expect_err("should fail");
        assert!(matches!(err, Error::PatternNotFound { .. }));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = update_ams_helper(dir.path(), &["kargo".to_string()]).expect_err("should fail");
        assert!(matches!(err, Error::MissingFile(_)));
    }
}
