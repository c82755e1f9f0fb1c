use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};

use crate::domain::models::Subtitle;
use crate::infra::addic7ed::SiteClient;

/// Path of the subtitle file for a video, next to it.
///
/// `show.s01e02.mkv` gives `show.s01e02.srt`, or `show.s01e02.English.srt`
/// when the language is part of the name.
pub fn subtitle_path(video: &Path, language: Option<&str>) -> PathBuf {
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "subtitle".to_string());
    let file_name = match language {
        Some(language) => format!("{stem}.{}.srt", sanitize_filename(language)),
        None => format!("{stem}.srt"),
    };
    match video.parent() {
        Some(directory) => directory.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '-',
            c => c,
        })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

pub fn confirm_overwrite(path: &Path) -> bool {
    println!("Overwrite \"{}\"? [y/N] ", path.display());

    let Ok(mut rl) = DefaultEditor::new() else {
        return false;
    };
    loop {
        let input = rl.readline("").unwrap_or_default();
        let input = input.trim().to_lowercase();

        if input == "y" || input == "yes" {
            return true;
        } else if input == "n" || input == "no" || input.is_empty() {
            return false;
        } else {
            println!("Please enter 'y' or 'n'.");
        }
    }
}

/// Downloads `subtitle` into `path`. Returns false when the user kept an existing file.
pub fn write_subtitle(
    client: &SiteClient,
    subtitle: &Subtitle,
    path: &Path,
    skip_confirm: bool,
) -> Result<bool> {
    if path.exists() && !skip_confirm && !confirm_overwrite(path) {
        println!("Skipped.");
        return Ok(false);
    }

    let written = client
        .download_to(subtitle, path)
        .with_context(|| format!("Failed to download {} to {}", subtitle.link, path.display()))?;
    tracing::info!(path = %path.display(), bytes = written, "subtitle saved");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::addic7ed::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_subtitle_path_next_to_video() {
        assert_eq!(
            subtitle_path(Path::new("/videos/The.Show.S01E02.720p-DIMENSION.mkv"), None),
            PathBuf::from("/videos/The.Show.S01E02.720p-DIMENSION.srt")
        );
        assert_eq!(
            subtitle_path(Path::new("episode.mp4"), Some("English")),
            PathBuf::from("episode.English.srt")
        );
    }

    #[test]
    fn test_subtitle_path_sanitizes_language() {
        assert_eq!(
            subtitle_path(Path::new("/v/ep.mkv"), Some("Portuguese (Brazilian)")),
            PathBuf::from("/v/ep.Portuguese-(Brazilian).srt")
        );
        assert_eq!(sanitize_filename("Serbian/Latin"), "Serbian-Latin");
    }

    #[test]
    fn test_failed_download_leaves_existing_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("episode.srt");
        fs::write(&path, "1\n00:00:01,000 --> 00:00:02,000\nHello\n").unwrap();

        let client = SiteClient::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT).unwrap();
        let subtitle = Subtitle {
            language: "English".to_string(),
            version: "LOL".to_string(),
            link: "http://127.0.0.1:9/original/1/1".to_string(),
        };
        assert!(write_subtitle(&client, &subtitle, &path, true).is_err());
        assert!(fs::read_to_string(&path).unwrap().contains("Hello"));
    }
}
