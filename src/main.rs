mod cli;
mod config;
mod domain;
mod infra;
mod logging;
mod text;
mod workflows;

use anyhow::{bail, Result};
use clap::Parser;
use std::path::Path;

use cli::{Cli, Mode};
use config::Settings;
use domain::models::Show;
use infra::addic7ed::SiteClient;
use workflows::finder::Finder;
use workflows::writer;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init_tracing(cli.verbose)?;

    let settings = Settings::load()?;
    let language = cli
        .language
        .clone()
        .unwrap_or_else(|| settings.language.clone());
    tracing::debug!(?settings, %language, "loaded settings");

    let client = SiteClient::new(&settings.base_url, &settings.user_agent)?;
    let finder = Finder::new(client, settings.weights);

    let mut failures = 0;
    for input in &cli.inputs {
        if let Err(e) = process_input(&finder, &cli, input, &language) {
            eprintln!("Error processing {input:?}: {e:#}");
            failures += 1;
            // Continue processing other inputs
        }
    }

    if failures > 0 {
        bail!("{failures} of {} input(s) failed", cli.inputs.len());
    }
    Ok(())
}

/// The search query for an input: its file name, or the raw argument when it has none.
fn query_for(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string_lossy().into_owned())
}

fn process_input(
    finder: &Finder<SiteClient>,
    cli: &Cli,
    input: &Path,
    language: &str,
) -> Result<()> {
    let query = query_for(input);
    tracing::info!(%query, "searching subtitles");

    match cli.mode {
        Mode::All => {
            let show = finder.search_all(&query)?;
            print_show(&show, cli.json)?;
        }
        Mode::Best => {
            let best = finder.search_best(&query, language)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&best)?);
            } else {
                println!(
                    "Found subtitle for {}: version {} ({}), score {:.3}",
                    best.show, best.subtitle.version, best.subtitle.language, best.score
                );
            }

            if cli.dry_run {
                return Ok(());
            }

            let suffix = cli
                .language_suffix
                .then_some(best.subtitle.language.as_str());
            let path = writer::subtitle_path(input, suffix);
            writer::write_subtitle(finder.source(), &best.subtitle, &path, cli.no_confirm)?;
        }
    }

    Ok(())
}

fn print_show(show: &Show, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(show)?);
        return Ok(());
    }

    println!("{}", show.name);
    if show.subtitles.is_empty() {
        println!("  (no subtitles)");
        return Ok(());
    }
    let languages: Vec<String> = show
        .subtitles
        .group_by_language()
        .iter()
        .map(|(language, subtitles)| format!("{language} ({})", subtitles.len()))
        .collect();
    println!("  Languages: {}", languages.join(", "));
    for (version, subtitles) in show.subtitles.group_by_version() {
        println!("  Version {version}");
        for subtitle in &subtitles {
            let marker = if subtitle.is_original() { "" } else { " (updated)" };
            println!("    {}{marker}: {}", subtitle.language, subtitle.link);
        }
    }
    Ok(())
}
