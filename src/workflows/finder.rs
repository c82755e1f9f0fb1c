use crate::domain::error::{FinderError, Result};
use crate::domain::models::{with_language, BestMatch, Show};
use crate::infra::addic7ed::PageSource;
use crate::infra::extract::extract_subtitles;

use super::resolver::resolve;
use super::scoring::{score_versions, ScoringWeights};
use super::selector::select_best;

pub struct Finder<S> {
    source: S,
    weights: ScoringWeights,
}

impl<S: PageSource> Finder<S> {
    pub fn new(source: S, weights: ScoringWeights) -> Self {
        Self { source, weights }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every subtitle of the episode matching `file_name`.
    ///
    /// `file_name` is usually the name of the video file, but any query the
    /// site search understands works.
    pub fn search_all(&self, file_name: &str) -> Result<Show> {
        let page = resolve(&self.source, file_name)?;
        let subtitles = extract_subtitles(&page.document, self.source.site());
        tracing::debug!(show = %page.name, count = subtitles.len(), "extracted subtitles");
        Ok(Show {
            name: page.name,
            subtitles,
        })
    }

    /// The subtitle in `language` whose version best matches `file_name`.
    pub fn search_best(&self, file_name: &str, language: &str) -> Result<BestMatch> {
        let show = self.search_all(file_name)?;
        let candidates = show.subtitles.filter(with_language(language));
        let no_match = || FinderError::NoMatch {
            show: show.name.clone(),
            language: language.to_string(),
        };

        if candidates.len() == 1 {
            let subtitle = candidates.first().cloned().ok_or_else(no_match)?;
            tracing::debug!(%subtitle, "only one subtitle found for language {language}");
            return Ok(BestMatch {
                show: show.name,
                subtitle,
                score: 0.0,
            });
        }

        let by_version = candidates.group_by_version();
        tracing::debug!(
            versions = by_version.len(),
            "scoring versions to find the best one"
        );
        let scores = score_versions(file_name, by_version.keys(), &self.weights);
        for (version, score) in &scores {
            tracing::debug!(%version, score, "version score");
        }

        let (subtitle, score) =
            select_best(&scores, &by_version, &candidates.versions()).ok_or_else(no_match)?;
        tracing::debug!(version = %subtitle.version, link = %subtitle.link, score, "best subtitle");
        Ok(BestMatch {
            show: show.name,
            subtitle,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::extract::fixtures::{RESULTS_PAGE, SHOW_PAGE};
    use crate::workflows::resolver::testing::FakeSite;

    const FILE: &str = "The.Show.S01E02.720p.HDTV.x264-DIMENSION.mkv";

    fn finder(site: FakeSite) -> Finder<FakeSite> {
        Finder::new(site, ScoringWeights::default())
    }

    #[test]
    fn test_search_all_returns_every_row_with_absolute_links() {
        let finder = finder(FakeSite::new().with_search(FILE, SHOW_PAGE));
        let show = finder.search_all(FILE).unwrap();
        assert_eq!(show.name, "The Show - 01x02 - Pilot Part 2");
        assert_eq!(show.subtitles.len(), 4);
        assert!(show
            .subtitles
            .iter()
            .all(|s| s.link.starts_with("https://www.addic7ed.com/")));
    }

    #[test]
    fn test_search_all_through_results_page() {
        let finder = finder(
            FakeSite::new()
                .with_search(FILE, RESULTS_PAGE)
                .with_page("serie/The_Show/1/2/Pilot_Part_2", SHOW_PAGE),
        );
        let show = finder.search_all(FILE).unwrap();
        assert_eq!(show.subtitles.len(), 4);
        assert!(!finder
            .source()
            .requested
            .borrow()
            .iter()
            .any(|url| url.contains("The_Show_UK")));
    }

    #[test]
    fn test_search_best_picks_matching_release_group() {
        let finder = finder(FakeSite::new().with_search(FILE, SHOW_PAGE));
        let best = finder.search_best(FILE, "English").unwrap();
        assert_eq!(best.show, "The Show - 01x02 - Pilot Part 2");
        assert_eq!(best.subtitle.version, "DIMENSION");
        assert_eq!(best.subtitle.link, "https://www.addic7ed.com/original/100/1");
        assert!(best.score > 10.0);
    }

    #[test]
    fn test_search_best_prefers_updated_release() {
        let file = "The.Show.S01E02.HDTV.x264-LOL.mp4";
        let finder = finder(FakeSite::new().with_search(file, SHOW_PAGE));
        let best = finder.search_best(file, "english").unwrap();
        assert_eq!(best.subtitle.version, "LOL");
        assert!(best.subtitle.is_updated());
    }

    #[test]
    fn test_single_candidate_is_not_scored() {
        let finder = finder(FakeSite::new().with_search(FILE, SHOW_PAGE));
        let best = finder.search_best(FILE, "French").unwrap();
        assert_eq!(best.subtitle.link, "https://www.addic7ed.com/original/100/8");
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_missing_language_is_no_match() {
        let finder = finder(FakeSite::new().with_search(FILE, SHOW_PAGE));
        match finder.search_best(FILE, "Klingon") {
            Err(FinderError::NoMatch { show, language }) => {
                assert_eq!(show, "The Show - 01x02 - Pilot Part 2");
                assert_eq!(language, "Klingon");
            }
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }
}
