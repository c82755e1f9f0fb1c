use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{CACHE_CONTROL, REFERER, USER_AGENT};
use std::io::{self, Read};
use std::path::Path;
use tempfile::NamedTempFile;
use url::Url;

use crate::domain::error::{FinderError, Result};
use crate::domain::models::Subtitle;

pub const DEFAULT_BASE_URL: &str = "https://www.addic7ed.com";

/// The site changes its markup depending on the client, so we always pose as the same desktop browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:12.0) Gecko/20100101 Firefox/12.0";

/// Where pages come from. Implemented over HTTP by [`SiteClient`].
pub trait PageSource {
    /// Base URL that relative links of the site resolve against.
    fn site(&self) -> &Url;

    /// Fetches the body of a page.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>>;

    fn search_url(&self, query: &str) -> Result<Url> {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let raw = format!("srch.php?search={encoded}&Submit=Search");
        join(self.site(), &raw)
    }
}

/// Resolves a site-relative link.
pub fn join(site: &Url, link: &str) -> Result<Url> {
    site.join(link).map_err(|source| FinderError::InvalidUrl {
        url: link.to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct SiteClient {
    client: Client,
    site: Url,
    user_agent: String,
}

impl SiteClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let mut site = Url::parse(base_url).map_err(|source| FinderError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        // Relative links resolve under the base path only when it ends with a slash
        if !site.path().ends_with('/') {
            let path = format!("{}/", site.path());
            site.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            site,
            user_agent: user_agent.to_string(),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        // Avoid getting cached pages
        self.client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(USER_AGENT, &self.user_agent)
    }

    fn page_request(&self, url: &Url) -> RequestBuilder {
        self.get(url.as_str())
    }

    fn download_request(&self, subtitle: &Subtitle) -> RequestBuilder {
        // Without a referer the server redirects to the web page instead of serving the file
        self.get(&subtitle.link).header(REFERER, &subtitle.link)
    }

    /// Opens the subtitle file as a byte stream.
    pub fn download(&self, subtitle: &Subtitle) -> Result<Response> {
        tracing::debug!(link = %subtitle.link, "downloading subtitle");
        let response = self.download_request(subtitle).send()?.error_for_status()?;
        Ok(response)
    }

    /// Downloads the subtitle into `path`, returning the number of bytes written.
    pub fn download_to(&self, subtitle: &Subtitle, path: &Path) -> Result<u64> {
        let mut response = self.download(subtitle)?;
        write_atomically(&mut response, path)
    }
}

/// Copies `reader` into a temporary file next to `path`, then moves it into place.
/// An interrupted copy leaves any existing file at `path` as it was.
fn write_atomically<R: Read>(reader: &mut R, path: &Path) -> Result<u64> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory)?;
    let written = io::copy(reader, &mut file)?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(written)
}

impl PageSource for SiteClient {
    fn site(&self) -> &Url {
        &self.site
    }

    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        tracing::debug!(%url, "fetching page");
        let response = self.page_request(url).send()?.error_for_status()?;
        let body = response.bytes().map_err(FinderError::Parse)?;
        Ok(body.to_vec())
    }
}
