use std::collections::HashMap;

use crate::text::tokenize;

/// Tuning knobs of the version ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Multiplier applied to the strong-match part of the score
    pub exact_match_weight: f64,
    /// Word similarity above which a pair counts as a strong match
    pub exact_match_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_match_weight: 10.0,
            exact_match_threshold: 0.9,
        }
    }
}

/// Scores how well a version label matches a file name.
///
/// Every word of the file name is compared with every word of the version
/// using Jaro-Winkler. The average similarity is added to a boost that grows
/// with the square of the strong matches, so a version sharing three tags
/// with the file name beats one sharing two.
pub fn score(query: &str, version: &str, weights: &ScoringWeights) -> f64 {
    let query_words = tokenize(query);
    let version_words = tokenize(version);
    if query_words.is_empty() || version_words.is_empty() {
        return 0.0;
    }

    let mut similarity_sum = 0.0;
    let mut exact_match_sum = 0.0;
    for query_word in &query_words {
        let query_word = query_word.to_lowercase();
        for version_word in &version_words {
            let distance = strsim::jaro_winkler(&version_word.to_lowercase(), &query_word);
            if distance > weights.exact_match_threshold {
                exact_match_sum += distance;
            }
            similarity_sum += distance;
            tracing::trace!(version, %version_word, %query_word, distance, "word comparison");
        }
    }

    let cardinality = (query_words.len() * version_words.len()) as f64;
    let normalized_similarity = similarity_sum / cardinality;
    let exact_match_proportion = exact_match_sum / version_words.len() as f64;
    let exact_match_score = exact_match_proportion * exact_match_sum * weights.exact_match_weight;

    tracing::debug!(
        version,
        cardinality,
        normalized_similarity,
        exact_match_proportion,
        exact_match_score,
        "scored version"
    );
    normalized_similarity + exact_match_score
}

/// Builds the score map for a set of version labels.
pub fn score_versions<'a, I>(query: &str, versions: I, weights: &ScoringWeights) -> HashMap<String, f64>
where
    I: IntoIterator<Item = &'a String>,
{
    versions
        .into_iter()
        .map(|version| (version.clone(), score(query, version, weights)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = "The.Show.S01E02.720p.HDTV.x264-DIMENSION.mkv";

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let weights = ScoringWeights::default();
        assert_eq!(score("", "DIMENSION", &weights), 0.0);
        assert_eq!(score(FILE, "", &weights), 0.0);
        assert_eq!(score("...", "--", &weights), 0.0);
    }

    #[test]
    fn test_score_is_non_negative() {
        let weights = ScoringWeights::default();
        for version in ["LOL", "DIMENSION", "x", "WEB DL", "ÀÉÎ", "12345"] {
            assert!(score(FILE, version, &weights) >= 0.0);
        }
    }

    #[test]
    fn test_identical_word_gets_full_similarity() {
        let weights = ScoringWeights::default();
        // distance 1: normalized 1 + proportion 1 * sum 1 * weight 10
        assert!(approx(score("DIMENSION", "dimension", &weights), 11.0));
    }

    #[test]
    fn test_known_jaro_winkler_pair() {
        let weights = ScoringWeights::default();
        let jw = strsim::jaro_winkler("martha", "marhta");
        assert!((jw - 0.9611).abs() < 1e-4);
        let expected = jw + jw * jw * 10.0;
        assert!(approx(score("MARTHA", "MARHTA", &weights), expected));
    }

    #[test]
    fn test_permuting_words_does_not_change_score() {
        let weights = ScoringWeights::default();
        let a = score("Show S01E02 720p DIMENSION", "WEB DL DIMENSION", &weights);
        let b = score("DIMENSION 720p S01E02 Show", "DIMENSION DL WEB", &weights);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_release_group_beats_unrelated_version() {
        let weights = ScoringWeights::default();
        let dimension = score(FILE, "DIMENSION", &weights);
        let lol = score(FILE, "LOL", &weights);
        assert!(dimension > lol, "{dimension} <= {lol}");
        assert!(dimension > 10.0);
        assert!(lol < 1.0);
    }

    #[test]
    fn test_weights_are_configurable() {
        let no_boost = ScoringWeights {
            exact_match_weight: 0.0,
            ..ScoringWeights::default()
        };
        assert!(approx(score("DIMENSION", "DIMENSION", &no_boost), 1.0));

        let unreachable = ScoringWeights {
            exact_match_threshold: 1.0,
            ..ScoringWeights::default()
        };
        assert!(approx(score("DIMENSION", "DIMENSION", &unreachable), 1.0));
    }

    #[test]
    fn test_score_versions_covers_every_version() {
        let versions = vec!["LOL".to_string(), "DIMENSION".to_string()];
        let scores = score_versions(FILE, &versions, &ScoringWeights::default());
        assert_eq!(scores.len(), 2);
        assert!(scores["DIMENSION"] > scores["LOL"]);
    }
}
