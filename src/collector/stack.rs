//! Tech-Stack Selector
//!
//! Maps the operator's comma-separated numeric choice list onto named
//! stack options. Unknown tokens are reported back for warning, never
//! aborting the run.

use crate::types::TechStack;

/// Result of parsing the tech-stack choice list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackSelection {
    /// Recognized stacks, first-occurrence order, deduplicated
    pub stacks: Vec<TechStack>,
    /// Tokens that matched no known stack code, in input order
    pub unknown: Vec<String>,
}

/// Parse a comma-separated choice list (`1`=CommonJS, `2`=React,
/// `3`=Next.js). Whitespace around tokens is ignored, empty tokens are
/// skipped, duplicate codes collapse. Never fails: an all-unknown input
/// yields an empty stack set plus one unknown entry per token.
pub fn parse_stack(input: &str) -> StackSelection {
    let mut selection = StackSelection::default();

    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match TechStack::from_code(token) {
            Some(stack) => {
                if !selection.stacks.contains(&stack) {
                    selection.stacks.push(stack);
                }
            }
            None => selection.unknown.push(token.to_string()),
        }
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mixed_known_and_unknown() {
        let selection = parse_stack("2, 4, 1");
        assert_eq!(selection.stacks, vec![TechStack::React, TechStack::CommonJs]);
        assert_eq!(selection.unknown, vec!["4".to_string()]);
    }

    #[test]
    fn test_duplicates_collapse_keeping_first_occurrence() {
        let selection = parse_stack("3,1,3,1,2");
        assert_eq!(
            selection.stacks,
            vec![TechStack::NextJs, TechStack::CommonJs, TechStack::React]
        );
        assert!(selection.unknown.is_empty());
    }

    #[test]
    fn test_whitespace_and_empty_tokens_ignored() {
        let selection = parse_stack("  1 , ,2,   ");
        assert_eq!(selection.stacks, vec![TechStack::CommonJs, TechStack::React]);
        assert!(selection.unknown.is_empty());
    }

    #[test]
    fn test_all_unknown_yields_empty_set_with_one_entry_per_token() {
        let selection = parse_stack("9, x, 42");
        assert!(selection.stacks.is_empty());
        assert_eq!(
            selection.unknown,
            vec!["9".to_string(), "x".to_string(), "42".to_string()]
        );
    }

    #[test]
    fn test_empty_input() {
        let selection = parse_stack("");
        assert!(selection.stacks.is_empty());
        assert!(selection.unknown.is_empty());
    }

    proptest! {
        /// Any mix of recognized codes with whitespace and duplicates yields
        /// only recognized stacks, deduplicated, never an unknown token.
        #[test]
        fn prop_recognized_codes_never_warn(
            codes in proptest::collection::vec(prop_oneof!["1", "2", "3"], 0..12),
            pad in "[ \t]{0,3}",
        ) {
            let input = codes
                .iter()
                .map(|c| format!("{pad}{c}{pad}"))
                .collect::<Vec<_>>()
                .join(",");
            let selection = parse_stack(&input);

            prop_assert!(selection.unknown.is_empty());
            prop_assert!(selection.stacks.len() <= 3);

            // Dedup: no stack appears twice
            let mut seen = selection.stacks.clone();
            seen.dedup();
            prop_assert_eq!(seen.len(), selection.stacks.len());

            // First-occurrence order matches the input order of first sightings
            let mut expected = Vec::new();
            for code in &codes {
                if let Some(stack) = TechStack::from_code(code)
                    && !expected.contains(&stack)
                {
                    expected.push(stack);
                }
            }
            prop_assert_eq!(selection.stacks, expected);
        }
    }
}
