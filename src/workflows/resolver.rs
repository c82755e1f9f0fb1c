use scraper::Html;

use crate::domain::error::{FinderError, Result};
use crate::infra::addic7ed::{join, PageSource};
use crate::infra::extract::{find_results, find_show_name, parse_document};

/// A show page reached from a file name.
pub struct ResolvedPage {
    pub name: String,
    pub document: Html,
}

/// What a fetched page turned out to be.
enum PageKind {
    Show(String),
    Results(Vec<String>),
    Unknown,
}

fn classify(document: &Html) -> PageKind {
    if let Some(name) = find_show_name(document) {
        return PageKind::Show(name);
    }
    let results = find_results(document);
    if results.is_empty() {
        PageKind::Unknown
    } else {
        PageKind::Results(results)
    }
}

fn fetch_document<S: PageSource>(source: &S, url: &url::Url) -> Result<Html> {
    let body = source.fetch(url)?;
    Ok(parse_document(&body))
}

/// Finds the show page of a file name using the site search.
///
/// The search either lands directly on the show page, or on a list of
/// matching shows. In the latter case the first result is taken as the
/// answer; no further disambiguation is attempted.
pub fn resolve<S: PageSource>(source: &S, file_name: &str) -> Result<ResolvedPage> {
    let not_found = || FinderError::NotFound {
        query: file_name.to_string(),
    };

    tracing::debug!(file_name, "searching show using the site search page");
    let document = fetch_document(source, &source.search_url(file_name)?)?;

    let first_result = match classify(&document) {
        PageKind::Show(name) => {
            tracing::debug!(%name, "search landed on a show page");
            return Ok(ResolvedPage { name, document });
        }
        PageKind::Unknown => {
            tracing::debug!("search page is neither a show page nor a results page");
            return Err(not_found());
        }
        PageKind::Results(results) => {
            tracing::debug!(
                count = results.len(),
                "search landed on a results page, following the first result"
            );
            results.into_iter().next().ok_or_else(not_found)?
        }
    };

    let document = fetch_document(source, &join(source.site(), &first_result)?)?;
    match find_show_name(&document) {
        Some(name) => {
            tracing::debug!(%name, "first result is a show page");
            Ok(ResolvedPage { name, document })
        }
        None => {
            tracing::debug!(link = %first_result, "first result is not a show page");
            Err(not_found())
        }
    }
}
