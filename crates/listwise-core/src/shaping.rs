//! Response shaping for the listing optimizer.
//!
//! The backend is asked for four parts separated by blank lines. Parsing is
//! positional: block 0 is the improved description, blocks 1-3 are the SEO
//! suggestions, missing features and engagement tips, one item per line.
//!
//! Known limitation: the backend is only instructed, never guaranteed, to follow
//! that layout. A response with a stray blank line shifts every later section.
//! Fixing that means changing the outbound contract (field-tagged output), not
//! smarter splitting here.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Two or more consecutive newlines separate blocks.
static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid block separator regex"));

/// Structured result of the listing optimizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub improved_description: String,
    pub seo_suggestions: Vec<String>,
    pub missing_features: Vec<String>,
    pub engagement_tips: Vec<String>,
}

impl OptimizationResult {
    /// Result shown in place of a failed optimization.
    pub fn error_fallback() -> Self {
        Self {
            improved_description: crate::adapter::Feature::Optimization
                .fallback_message()
                .to_string(),
            ..Self::default()
        }
    }
}

/// Splits raw backend text into the four optimization sections.
///
/// Missing trailing sections are empty; blocks after the fourth are ignored.
pub fn shape_optimization(raw: &str) -> OptimizationResult {
    let normalized = raw.replace("\r\n", "\n");
    let mut blocks = BLOCK_SEPARATOR.split(&normalized);

    let improved_description = blocks.next().unwrap_or_default().to_string();
    let seo_suggestions = list_items(blocks.next());
    let missing_features = list_items(blocks.next());
    let engagement_tips = list_items(blocks.next());

    OptimizationResult {
        improved_description,
        seo_suggestions,
        missing_features,
        engagement_tips,
    }
}

fn list_items(block: Option<&str>) -> Vec<String> {
    block
        .unwrap_or_default()
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_four_blocks() {
        let raw = "Better cozy home.\n\nUse 'cozy'\nAdd photos\n\nMissing: yard size\n\nAsk agent for tour";
        let result = shape_optimization(raw);
        assert_eq!(result.improved_description, "Better cozy home.");
        assert_eq!(result.seo_suggestions, vec!["Use 'cozy'", "Add photos"]);
        assert_eq!(result.missing_features, vec!["Missing: yard size"]);
        assert_eq!(result.engagement_tips, vec!["Ask agent for tour"]);
    }

    #[test]
    fn test_single_block_has_empty_lists() {
        let result = shape_optimization("Just one paragraph\nspanning two lines.");
        assert_eq!(
            result.improved_description,
            "Just one paragraph\nspanning two lines."
        );
        assert!(result.seo_suggestions.is_empty());
        assert!(result.missing_features.is_empty());
        assert!(result.engagement_tips.is_empty());
    }

    #[test]
    fn test_list_sizes_match_line_counts() {
        for n in 1..=5 {
            let section = |name: &str| {
                (0..n)
                    .map(|i| format!("{name} {i}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            let raw = format!(
                "Description\n\n{}\n\n{}\n\n{}",
                section("seo"),
                section("feature"),
                section("tip")
            );
            let result = shape_optimization(&raw);
            assert_eq!(result.seo_suggestions.len(), n);
            assert_eq!(result.missing_features.len(), n);
            assert_eq!(result.engagement_tips.len(), n);
            assert_eq!(result.seo_suggestions[0], "seo 0");
            assert_eq!(result.engagement_tips[n - 1], format!("tip {}", n - 1));
        }
    }

    #[test]
    fn test_long_newline_runs_are_one_separator() {
        let raw = "Desc\n\n\n\nseo a\n\n\nfeature a";
        let result = shape_optimization(raw);
        assert_eq!(result.improved_description, "Desc");
        assert_eq!(result.seo_suggestions, vec!["seo a"]);
        assert_eq!(result.missing_features, vec!["feature a"]);
        assert!(result.engagement_tips.is_empty());
    }

    #[test]
    fn test_extra_blocks_ignored() {
        let raw = "d\n\ns\n\nf\n\nt\n\nextra";
        let result = shape_optimization(raw);
        assert_eq!(result.engagement_tips, vec!["t"]);
    }

    #[test]
    fn test_crlf_input() {
        let raw = "Desc\r\n\r\nseo a\r\nseo b";
        let result = shape_optimization(raw);
        assert_eq!(result.improved_description, "Desc");
        assert_eq!(result.seo_suggestions, vec!["seo a", "seo b"]);
    }

    #[test]
    fn test_lines_kept_verbatim() {
        let raw = "Desc\n\n- bullet one\n  2. numbered";
        let result = shape_optimization(raw);
        assert_eq!(result.seo_suggestions, vec!["- bullet one", "  2. numbered"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(shape_optimization(""), OptimizationResult::default());
    }

    #[test]
    fn test_error_fallback() {
        let result = OptimizationResult::error_fallback();
        assert_eq!(
            result.improved_description,
            "Error optimizing listing. Please try again."
        );
        assert!(result.seo_suggestions.is_empty());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(shape_optimization("d\n\ns")).unwrap();
        assert_eq!(json["improvedDescription"], "d");
        assert_eq!(json["seoSuggestions"][0], "s");
    }
}
