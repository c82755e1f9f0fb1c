use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A subtitle file offered by the site for one version of an episode.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Subtitle {
    /// Language as displayed on the site, e.g. "English"
    pub language: String,
    /// Release group the subtitle was synced against, e.g. "DIMENSION"
    pub version: String,
    /// Absolute download URL
    pub link: String,
}

impl Subtitle {
    /// The site re-uploads corrected subtitles under an "updated" download path.
    pub fn is_updated(&self) -> bool {
        self.link.contains("updated")
    }

    pub fn is_original(&self) -> bool {
        !self.is_updated()
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link: {}, Version: {}, Language: {}",
            self.link, self.version, self.language
        )
    }
}

/// Subtitles in the order they appear on the show page.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Subtitles(Vec<Subtitle>);

impl Subtitles {
    pub fn new(subtitles: Vec<Subtitle>) -> Self {
        Self(subtitles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Subtitle> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subtitle> {
        self.0.iter()
    }

    pub fn filter<P>(&self, predicate: P) -> Subtitles
    where
        P: Fn(&Subtitle) -> bool,
    {
        self.0.iter().filter(|&s| predicate(s)).cloned().collect()
    }

    /// Groups subtitles by key. Each group keeps the relative order of the collection.
    pub fn group_by<K, F>(&self, key_fn: F) -> BTreeMap<K, Subtitles>
    where
        K: Ord,
        F: Fn(&Subtitle) -> K,
    {
        let mut groups: BTreeMap<K, Subtitles> = BTreeMap::new();
        for subtitle in &self.0 {
            groups
                .entry(key_fn(subtitle))
                .or_default()
                .0
                .push(subtitle.clone());
        }
        groups
    }

    pub fn group_by_version(&self) -> BTreeMap<String, Subtitles> {
        self.group_by(|s| s.version.clone())
    }

    pub fn group_by_language(&self) -> BTreeMap<String, Subtitles> {
        self.group_by(|s| s.language.clone())
    }

    /// Distinct version labels, in order of first appearance.
    pub fn versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = Vec::new();
        for subtitle in &self.0 {
            if !versions.contains(&subtitle.version) {
                versions.push(subtitle.version.clone());
            }
        }
        versions
    }
}

/// Predicate matching subtitles of the given language, ignoring case.
pub fn with_language(language: &str) -> impl Fn(&Subtitle) -> bool {
    let wanted = language.trim().to_lowercase();
    move |s: &Subtitle| s.language.trim().to_lowercase() == wanted
}

impl FromIterator<Subtitle> for Subtitles {
    fn from_iter<I: IntoIterator<Item = Subtitle>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Subtitles {
    type Item = Subtitle;
    type IntoIter = std::vec::IntoIter<Subtitle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Subtitles {
    type Item = &'a Subtitle;
    type IntoIter = std::slice::Iter<'a, Subtitle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A resolved show page and everything it offers.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Show {
    /// Show and episode title as rendered on the page
    pub name: String,
    pub subtitles: Subtitles,
}

/// Outcome of a best-match search.
#[derive(Debug, Serialize, Clone)]
pub struct BestMatch {
    pub show: String,
    pub subtitle: Subtitle,
    pub score: f64,
}
