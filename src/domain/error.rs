use thiserror::Error;

/// Everything that can go wrong between a file name and a subtitle on disk.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The request could not be sent, or the server answered with an error status.
    #[error("unable to reach addic7ed server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The response body could not be read.
    #[error("unable to construct document from server response: {0}")]
    Parse(#[source] reqwest::Error),

    #[error("show not found for file name {query:?}")]
    NotFound { query: String },

    #[error("unable to find any subtitles for show {show:?} in {language:?}, check the languages available on the site and retry")]
    NoMatch { show: String, language: String },

    #[error("unable to write subtitle: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FinderError>;
