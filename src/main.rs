mod cli;

use gear5tv::{
    config,
    playback::PlaybackRequest,
    resume,
    state::AppState,
};
use gear5tv_catalog::queries::{filter, lists, search};
use gear5tv_catalog::{CatalogLookup, CatalogTitle};
use gear5tv_common::{AiringStatus, ContentKind};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "gear5tv=trace,gear5tv_catalog=debug,gear5tv_common=debug".to_string()
        } else {
            "gear5tv=warn,gear5tv_catalog=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("gear5tv {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Init { path } => {
            let mut config = if path.exists() {
                config::load_config(&path)?
            } else {
                config::load_config_or_default(cli.config.as_deref())?
            };
            if let Some(data_dir) = cli.data_dir {
                config.storage.data_dir = data_dir;
            }
            config::persist::save_config(&path, &config)?;
            println!("✓ Wrote configuration to {}", path.display());
            Ok(())
        }
        command => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;
            if let Some(data_dir) = cli.data_dir {
                config.storage.data_dir = data_dir;
            }
            let state = AppState::new(config)?;
            run(&state, command)
        }
    }
}

fn run(state: &Arc<AppState>, command: Commands) -> Result<()> {
    match command {
        Commands::List {
            genre,
            season,
            studio,
            status,
            kind,
            order,
            long,
        } => {
            let filters = filter::FilterState {
                genre: genre.as_deref().and_then(filter::choice),
                airing_season: season.as_deref().and_then(filter::choice),
                studio: studio.as_deref().and_then(filter::choice),
                status: parse_choice::<AiringStatus>(status.as_deref())?,
                kind: parse_choice::<ContentKind>(kind.as_deref())?,
                order_by: order.parse().map_err(anyhow::Error::msg)?,
            };
            for title in filter::apply_filters(state.catalog(), &filters)
                .into_iter()
                .filter(|t| !long || t.is_long_series())
            {
                print_title_line(title);
            }
            Ok(())
        }
        Commands::Home { limit } => {
            let catalog = state.catalog();
            print_row("Spotlight", lists::spotlight(catalog));
            print_row("Popular", lists::popular(catalog, limit));
            print_row("Latest Trailers", lists::latest_trailers(catalog, limit));

            let long = lists::long_series(catalog);
            if !long.is_empty() {
                println!("Long Series");
                for title in long.into_iter().take(limit) {
                    println!(
                        "  {} ({}) {} episodes",
                        title.title,
                        title.id,
                        title.episode_count.unwrap_or_default()
                    );
                }
            }
            Ok(())
        }
        Commands::Search { query } => {
            let hits = search::search(state.catalog(), &query);
            if hits.is_empty() {
                println!("No results for \"{}\"", query.trim());
            }
            for title in hits {
                print_title_line(title);
            }
            Ok(())
        }
        Commands::Show { id } => show_title(state, &id),
        Commands::Play {
            id,
            season,
            episode,
            trailer,
            position,
            duration,
        } => {
            let request = PlaybackRequest {
                content_id: id.into(),
                season,
                episode,
                trailer,
            };
            play(state, &request, position.zip(duration))
        }
        Commands::Progress { id } => {
            match state.tracker().get_progress(&id) {
                Some(entry) => {
                    println!("{}", entry.content_id);
                    println!("  Season {} Episode {}", entry.season_index, entry.episode_index);
                    println!(
                        "  {} / {} ({}%)",
                        resume::format_time(entry.position_seconds),
                        resume::format_time(entry.duration_seconds),
                        resume::compute_resume_percent(entry.position_seconds, entry.duration_seconds)
                    );
                }
                None => println!("No progress for {}", id),
            }
            Ok(())
        }
        Commands::Forget { id } => {
            if state.continue_watching().remove(&id) {
                println!("Removed progress for {}", id);
            } else {
                println!("No progress for {}", id);
            }
            Ok(())
        }
        Commands::Continue { json } => {
            let section = state.continue_watching().section();
            if json {
                let items = section.unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if let Some(items) = section {
                println!("Continue Watching");
                for item in items {
                    println!(
                        "  {} [{}] {}% {} left  {}",
                        item.title,
                        item.episode_label(),
                        item.percent,
                        item.remaining,
                        item.link
                    );
                }
            }
            Ok(())
        }
        Commands::Validate { .. } | Commands::Version | Commands::Init { .. } => Ok(()),
    }
}

fn parse_choice<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    match value.and_then(filter::choice) {
        Some(v) => v.parse::<T>().map(Some).map_err(anyhow::Error::msg),
        None => Ok(None),
    }
}

fn print_title_line(title: &CatalogTitle) {
    println!(
        "{}\t{}\t{}\t{}\t{:.1}",
        title.id,
        title.title,
        title.kind.label(),
        title.year,
        title.rating
    );
}

fn print_row(heading: &str, titles: Vec<&CatalogTitle>) {
    if titles.is_empty() {
        return;
    }
    println!("{}", heading);
    for title in titles {
        println!("  {} ({})", title.title, title.id);
    }
}

fn show_title(state: &Arc<AppState>, id: &str) -> Result<()> {
    let title = state
        .catalog()
        .find_by_id(id)
        .with_context(|| format!("Unknown title: {}", id))?;

    println!("{} ({})", title.title, title.year);
    println!("Type: {}", title.kind.label());
    println!("Status: {}", title.status);
    println!("Rating: {:.1}", title.rating);
    if let Some(ref studio) = title.studio {
        println!("Studio: {}", studio);
    }
    if !title.genres.is_empty() {
        println!("Genres: {}", title.genres.join(", "));
    }
    if title.trailer_url.is_some() {
        println!("Trailer: available");
    }
    if !title.description.is_empty() {
        println!("\n{}", title.description);
    }

    for season in &title.seasons {
        println!("\nSeason {}: {}", season.season_number, season.title);
        for episode in &season.episodes {
            print!("  E{} {}", episode.episode_number, episode.title);
            if let Some(ref duration) = episode.duration {
                print!(" ({})", duration);
            }
            println!();
        }
    }
    if title.seasons.is_empty() && title.is_series() {
        println!("\nEpisodes: {}", title.total_episodes());
    } else if let Some(count) = title.episode_count {
        println!("\nEpisodes: {} aired", count);
    }

    if let Some(entry) = state.tracker().get_progress(id) {
        println!(
            "\nResume: S{} E{} at {}",
            entry.season_index,
            entry.episode_index,
            resume::format_time(entry.position_seconds)
        );
    }

    let related = lists::related(state.catalog(), id, 5);
    if !related.is_empty() {
        println!("\nRelated:");
        for other in related {
            println!("  {} ({})", other.title, other.id);
        }
    }

    Ok(())
}

fn play(state: &Arc<AppState>, request: &PlaybackRequest, update: Option<(f64, f64)>) -> Result<()> {
    let mut session = state.open_playback(request)?;

    println!("Title: {}", session.title());
    if session.is_trailer() {
        println!("Playing: trailer");
    } else {
        print!("Playing: S{} E{}", session.season_index(), session.episode_index());
        if let Some(name) = session.episode_title() {
            print!(" {}", name);
        }
        println!();
    }
    println!("Source: {}", session.source().label());
    match session.source().url() {
        Some(url) => println!("URL: {}", url),
        None => println!("No video available"),
    }

    let resume_at = session.resume_position();
    if resume_at > 0.0 {
        println!("Resume at: {}", resume::format_time(resume_at));
    }

    if let Some((position, duration)) = update {
        if !session.tracks_progress() {
            println!("Progress is not tracked for this source");
        } else if session.on_time_update(position, duration) || session.flush() {
            if let Some(entry) = state.tracker().get_progress(session.content_id().as_str()) {
                println!(
                    "Saved progress: {} / {}",
                    resume::format_time(entry.position_seconds),
                    resume::format_time(entry.duration_seconds)
                );
            }
        } else {
            println!("Progress not saved");
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config_summary(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            print_config_summary(&config);
        }
    }

    Ok(())
}

fn print_config_summary(config: &config::Config) {
    println!("  Data dir: {}", config.storage.data_dir.display());
    println!("  Progress key: {}", config.storage.progress_key);
    println!("  Tracker cap: {}", config.tracker.max_entries);
    println!("  Continue-watching cap: {}", config.resume.max_items);
    println!(
        "  Direct extensions: {}",
        config.player.direct_extensions.join(", ")
    );
    println!("  Save interval: {}s", config.player.save_interval_secs);
    match &config.catalog.path {
        Some(path) => println!("  Catalog: {}", path.display()),
        None => println!("  Catalog: built-in"),
    }
}
