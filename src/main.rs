use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use review_summary::autocomplete::{Autocomplete, SearchDirective};
use review_summary::config::Config;
use review_summary::debounce::Debouncer;
use review_summary::models::Professor;
use review_summary::storage::{self, FileStore};
use review_summary::summary::SummaryStatus;
use review_summary::ReviewSummaryService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing to stderr so stdout stays clean for the page
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    let mut service = ReviewSummaryService::new(&config);

    let store = FileStore::new(config.storage.path.clone());
    let api_key_entry = config.storage.api_key_entry.clone();
    // Credential is read once at startup and written on each change.
    let mut api_key = storage::read_or_default(&store, &api_key_entry, "");

    let mut autocomplete = Autocomplete::new();
    let (mut debouncer, mut debounced_rx) = Debouncer::new(config.debounce_delay());

    let mut professor: Option<Professor> = None;
    let mut extra_arguments = String::new();

    println!("UFABC Review Summary");
    println!("Type a professor name to search. Commands:");
    println!("  /key <gemini api key>   set the Gemini credential");
    println!("  /args <text>            extra instructions for the AI (optional)");
    println!("  <number>                select a search result");
    println!("  /quit                   exit");
    if api_key.is_empty() {
        println!("No Gemini API key stored yet - generate one at https://aistudio.google.com/app/apikey");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();

                if input == "/quit" {
                    break;
                } else if let Some(value) = input.strip_prefix("/key ") {
                    api_key = value.trim().to_string();
                    storage::write_logged(&store, &api_key_entry, &api_key);
                    render_summary(&mut service, professor.as_ref(), &api_key, &extra_arguments)
                        .await;
                } else if let Some(value) = input.strip_prefix("/args ") {
                    extra_arguments = value.trim().to_string();
                    render_summary(&mut service, professor.as_ref(), &api_key, &extra_arguments)
                        .await;
                } else if let Some(index) = selection_index(input, &autocomplete) {
                    if let Some(chosen) = autocomplete.select(index - 1) {
                        println!("{}", header(&chosen, &extra_arguments));
                        professor = Some(chosen);
                        render_summary(
                            &mut service,
                            professor.as_ref(),
                            &api_key,
                            &extra_arguments,
                        )
                        .await;
                    } else {
                        println!("No result #{index}");
                    }
                } else {
                    autocomplete.input_changed(input);
                    debouncer.observe(input);
                }
            }
            Some(value) = debounced_rx.recv() => {
                if let SearchDirective::Issue { query, version } =
                    autocomplete.debounce_settled(&value)
                {
                    match service.search_professors(&query).await {
                        Ok(results) => autocomplete.search_resolved(version, results),
                        Err(e) => {
                            // Presented exactly like a search with no matches.
                            tracing::warn!("Professor search failed: {}", e);
                            autocomplete.search_failed(version);
                        }
                    }
                    if autocomplete.results().is_empty() {
                        println!("No matches for \"{value}\"");
                    } else if autocomplete.is_open() {
                        for (i, p) in autocomplete.results().iter().enumerate() {
                            println!("  {}. {}", i + 1, p.name);
                        }
                        println!("Select a result by number.");
                    }
                }
            }
        }
    }

    Ok(())
}

/// A numeric line while the list is open is a selection; anything else is
/// more search input.
fn selection_index(input: &str, autocomplete: &Autocomplete) -> Option<usize> {
    if !autocomplete.is_open() {
        return None;
    }
    match input.parse::<usize>() {
        Ok(index) if index >= 1 => Some(index),
        _ => None,
    }
}

fn header(professor: &Professor, extra_arguments: &str) -> String {
    if extra_arguments.is_empty() {
        professor.name.clone()
    } else {
        format!("{}, {}", professor.name, extra_arguments)
    }
}

async fn render_summary(
    service: &mut ReviewSummaryService,
    professor: Option<&Professor>,
    api_key: &str,
    extra_arguments: &str,
) {
    if professor.is_some() && api_key.is_empty() {
        println!("Set a Gemini API key with /key to generate a summary.");
        return;
    }

    match service
        .refetch_summary(professor, api_key, extra_arguments)
        .await
    {
        SummaryStatus::Idle | SummaryStatus::Loading => {}
        SummaryStatus::Succeeded(text) => {
            println!();
            println!("{text}");
            println!();
        }
        SummaryStatus::Failed(error) => {
            println!("Summary generation failed: {error}");
        }
    }
}
