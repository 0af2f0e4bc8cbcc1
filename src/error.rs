//! Error types for butterfly-indoor
//!
//! Every failure the routing core can report is a [`RouteError`]. None of them
//! are fatal: callers show a message and retry with different input.

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

use crate::node::NodeId;

/// Main error type for butterfly-indoor operations
#[derive(Debug, Error)]
pub enum RouteError {
    /// Start or end node is not a key of the (possibly filtered) graph
    #[error("Node '{node}' is not in the routing graph{}", did_you_mean(.suggestion))]
    NodeNotInGraph {
        node: NodeId,
        suggestion: Option<NodeId>,
    },

    /// Both endpoints exist but no path connects them
    #[error("No route found from '{from}' to '{to}'")]
    Unreachable { from: NodeId, to: NodeId },

    /// Malformed node or edge records
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// GeoJSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn did_you_mean(suggestion: &Option<NodeId>) -> String {
    match suggestion {
        Some(id) => format!(" (did you mean '{id}'?)"),
        None => String::new(),
    }
}

/// Convenience result type for butterfly-indoor operations
pub type Result<T> = std::result::Result<T, RouteError>;

/// Find the closest known node id to a misspelled one.
///
/// Scoring blends Jaro-Winkler (good at transpositions and shared prefixes,
/// which dominate in ids like `NODE_015`) with normalized Levenshtein (good at
/// dropped or doubled characters). A trailing-digits bonus favours candidates
/// whose numeric suffix matches, since users usually get the prefix wrong and
/// the number right.
///
/// Minimum threshold: 0.75 combined score.
pub fn suggest_node<'a, I>(input: &str, candidates: I) -> Option<NodeId>
where
    I: IntoIterator<Item = &'a NodeId>,
{
    let input_lower = input.to_lowercase();
    let input_digits = trailing_digits(&input_lower);
    let min_threshold = 0.75;

    let mut best_match: Option<&NodeId> = None;
    let mut best_score = 0.0f64;

    for candidate in candidates {
        let candidate_lower = candidate.as_str().to_lowercase();
        if candidate_lower == input_lower {
            // Exact case-insensitive match is the answer
            return Some(candidate.clone());
        }

        let jw_score = jaro_winkler(&input_lower, &candidate_lower);
        let lev_score = normalized_levenshtein(&input_lower, &candidate_lower);
        let mut score = (jw_score * 0.7) + (lev_score * 0.3);

        if !input_digits.is_empty() && trailing_digits(&candidate_lower) == input_digits {
            score += 0.1;
        }

        // Ties keep the lexicographically smaller id
        let better = score > best_score
            || (score == best_score && best_match.is_some_and(|b| candidate < b));
        if score >= min_threshold && better {
            best_score = score;
            best_match = Some(candidate);
        }
    }

    best_match.cloned()
}

fn trailing_digits(s: &str) -> &str {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[start..]
}
