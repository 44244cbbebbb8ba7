//! Bidder list parsing and branch naming

use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Parse a raw bidder list into an ordered sequence of slugs.
///
/// Accepts either a comma-separated string (`"kargo, teads"`) or a JSON
/// array (`'["kargo","teads"]'`). Input order and duplicates are preserved;
/// each patcher does its own membership check.
pub fn parse_bidders(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        let items: Vec<String> =
            serde_json::from_str(trimmed).map_err(Error::MalformedBidderList)?;
        // quote characters stripped defensively; shell quoting sometimes
        // leaves them on the elements
        return Ok(items
            .iter()
            .map(|item| item.trim().trim_matches(['"', '\'']).to_string())
            .collect());
    }
    Ok(trimmed
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Derive the feature branch name shared by all three repositories.
///
/// Bidders are deduplicated and sorted so the same set always maps to the
/// same branch, keeping re-runs resumable and the three PRs correlated.
pub fn branch_name(bidders: &[String]) -> String {
    let unique: BTreeSet<&str> = bidders.iter().map(String::as_str).collect();
    let suffix = unique.into_iter().collect::<Vec<_>>().join("-");
    format!("chore/add-bidders-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        let bidders = parse_bidders("kargo, teads").expect("parse");
        assert_eq!(bidders, vec!["kargo", "teads"]);
    }

    #[test]
    fn test_parse_json_array() {
        let bidders = parse_bidders(r#"["kargo","teads"]"#).expect("parse");
        assert_eq!(bidders, vec!["kargo", "teads"]);
    }

    #[test]
    fn test_parse_json_array_strips_stray_quotes() {
        let bidders = parse_bidders(r#"[" 'kargo' "]"#).expect("parse");
        assert_eq!(bidders, vec!["kargo"]);
    }

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert!(parse_bidders("").expect("parse").is_empty());
        assert!(parse_bidders("   ").expect("parse").is_empty());
    }

    #[test]
    fn test_parse_drops_empty_pieces() {
        let bidders = parse_bidders("kargo,, teads,").expect("parse");
        assert_eq!(bidders, vec!["kargo", "teads"]);
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let bidders = parse_bidders("teads, kargo, kargo").expect("parse");
        assert_eq!(bidders, vec!["teads", "kargo", "kargo"]);
    }

    #[test]
    fn test_parse_malformed_json_fails() {
        let err = parse_bidders(r#"["kargo""#).expect_err("should fail");
        assert!(matches!(err, Error::MalformedBidderList(_)));
    }

    #[test]
    fn test_branch_name_dedups_and_sorts() {
        let bidders = vec![
            "teads".to_string(),
            "kargo".to_string(),
            "kargo".to_string(),
        ];
        assert_eq!(branch_name(&bidders), "chore/add-bidders-kargo-teads");
    }
}
