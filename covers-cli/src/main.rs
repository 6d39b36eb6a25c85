use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use covers_lib::{default_queries, CoverClient, MovieQuery};

/// Fetch movie posters from the iTunes Search API into a covers directory.
#[derive(Parser, Debug)]
#[command(name = "fetch-covers", version)]
struct Cli {
    /// Items like "Title:Year" or just "Title". A built-in list is used when empty.
    items: Vec<String>,

    /// Destination covers directory.
    #[arg(long, default_value = "covers")]
    covers_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let queries: Vec<MovieQuery> = if cli.items.is_empty() {
        default_queries()
    } else {
        cli.items.iter().map(|item| MovieQuery::parse(item)).collect()
    };

    let client = match CoverClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Could not start HTTP client: {e}");
            return ExitCode::from(2);
        }
    };

    log::debug!("Saving {} covers into {}", queries.len(), cli.covers_dir.display());
    let mut saved = 0usize;
    for query in &queries {
        match client.fetch_cover(query, &cli.covers_dir).await {
            Ok(Some(filename)) => {
                println!("Saved: {filename}");
                saved += 1;
            }
            Ok(None) => {
                let year = query.year.map_or_else(|| "?".to_string(), |y| y.to_string());
                eprintln!("No artwork found for: {} ({year})", query.title);
            }
            Err(e) => eprintln!("Error fetching {}: {e}", query.title),
        }
    }

    if saved > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
