use std::collections::{BTreeMap, HashMap};

use crate::domain::models::{Subtitle, Subtitles};

/// Picks the subtitle to download from scored versions.
///
/// `versions` lists the version labels in page order. The highest score wins
/// and ties go to the version listed first. Without any positive score the
/// first version is used. Inside the winning version an updated subtitle is
/// preferred over the original upload.
pub fn select_best(
    scores: &HashMap<String, f64>,
    by_version: &BTreeMap<String, Subtitles>,
    versions: &[String],
) -> Option<(Subtitle, f64)> {
    let mut best: Option<(&String, f64)> = None;
    for version in versions {
        let Some(&score) = scores.get(version) else {
            continue;
        };
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((version, score));
        }
    }

    let (version, score) = match best {
        Some(winner) => winner,
        None => (
            versions
                .iter()
                .find(|v| by_version.contains_key(*v))
                .or_else(|| by_version.keys().next())?,
            0.0,
        ),
    };

    let subtitles = by_version.get(version)?;
    let subtitle = subtitles
        .iter()
        .find(|s| s.is_updated())
        .or_else(|| subtitles.first())?;
    Some((subtitle.clone(), score))
}
