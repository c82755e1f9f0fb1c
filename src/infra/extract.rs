//! Reads Addic7ed pages.
//!
//! All knowledge of the site's markup lives here:
//! - show pages carry the episode title in `.titulo`, followed by a `<small>` qualifier
//! - search result pages list shows as links inside `.tabel`
//! - each subtitle version is a centered `.tabel95` table with a `.NewsTitle`
//!   label and one `.language` cell per language, next to `.buttonDownload` links

use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::domain::models::{Subtitle, Subtitles};
use crate::text::clean_title;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".titulo"));
static RESULT_TABLE: LazyLock<Selector> = LazyLock::new(|| selector(".tabel"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static VERSION_TABLE: LazyLock<Selector> = LazyLock::new(|| selector(".tabel95"));
static VERSION_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".NewsTitle"));
static LANGUAGE: LazyLock<Selector> = LazyLock::new(|| selector(".language"));
static DOWNLOAD: LazyLock<Selector> = LazyLock::new(|| selector(".buttonDownload"));

/// Parses a response body. Bytes that are not UTF-8 become replacement characters.
pub fn parse_document(body: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(body))
}

/// Title of a show page, without its `<small>` qualifier.
pub fn find_show_name(document: &Html) -> Option<String> {
    for title in document.select(&TITLE) {
        for child in title.children() {
            let text = match child.value() {
                Node::Text(text) => text.trim().to_string(),
                Node::Element(element) if element.name() == "small" => continue,
                Node::Element(_) => ElementRef::wrap(child)
                    .map(|e| e.text().collect::<String>().trim().to_string())
                    .unwrap_or_default(),
                _ => continue,
            };
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Links of a search results page, in page order.
pub fn find_results(document: &Html) -> Vec<String> {
    document
        .select(&RESULT_TABLE)
        .flat_map(|table| table.select(&LINK))
        .filter_map(|link| link.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Every downloadable subtitle of a show page. Rows without a download link are skipped.
pub fn extract_subtitles(document: &Html, site: &Url) -> Subtitles {
    let mut subtitles = Vec::new();

    for table in document.select(&VERSION_TABLE) {
        if table.value().attr("align") != Some("center") {
            continue;
        }
        let title: String = table
            .select(&VERSION_TITLE)
            .flat_map(|e| e.text())
            .collect();
        let version = clean_title(title.trim());

        for language_cell in table.select(&LANGUAGE) {
            let language = language_cell.text().collect::<String>().trim().to_string();
            let Some(row) = language_cell.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            for button in row.select(&DOWNLOAD) {
                let Some(href) = button.value().attr("href") else {
                    tracing::debug!(%version, %language, "download button without link");
                    continue;
                };
                match site.join(href.trim()) {
                    Ok(link) => subtitles.push(Subtitle {
                        language: language.clone(),
                        version: version.clone(),
                        link: link.to_string(),
                    }),
                    Err(e) => tracing::debug!(%version, href, error = %e, "unusable download link"),
                }
            }
        }
    }

    Subtitles::new(subtitles)
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const SHOW_PAGE: &str = r#"<html><body>
<div id="container">
  <span class="titulo">
    The Show - 01x02 - Pilot Part 2 <small>Subtitle</small>
  </span>
  <table class="tabel95" align="center">
    <tr><td class="NewsTitle">Version DIMENSION, 0.00 MBs</td></tr>
    <tr>
      <td class="language">English</td>
      <td><a class="buttonDownload" href="/original/100/1">Download</a></td>
    </tr>
    <tr>
      <td class="language">
        French
      </td>
      <td><a class="buttonDownload" href="/original/100/8">Download</a></td>
    </tr>
  </table>
  <table class="tabel95" align="center">
    <tr><td class="NewsTitle">Version LOL, 0.00 MBs</td></tr>
    <tr>
      <td class="language">English</td>
      <td><a class="buttonDownload" href="/original/101/1">Download</a></td>
      <td><a class="buttonDownload" href="/updated/1/101/1">most updated</a></td>
    </tr>
    <tr>
      <td class="language">Spanish</td>
      <td><a class="buttonDownload">Download</a></td>
    </tr>
  </table>
  <table class="tabel95">
    <tr><td class="NewsTitle">Version NOT_A_VERSION, 0.00 MBs</td></tr>
    <tr>
      <td class="language">English</td>
      <td><a class="buttonDownload" href="/original/999/1">Download</a></td>
    </tr>
  </table>
</div>
</body></html>"#;

    pub const RESULTS_PAGE: &str = r#"<html><body>
<table class="tabel">
  <tr><td><a href="serie/The_Show/1/2/Pilot_Part_2">The Show - 01x02</a></td></tr>
  <tr><td><a href="serie/The_Show_UK/1/2/Pilot">The Show (UK) - 01x02</a></td></tr>
  <tr><td><a>no link</a></td></tr>
</table>
</body></html>"#;

    pub const EMPTY_PAGE: &str = "<html><body><p>Nothing found</p></body></html>";
}
