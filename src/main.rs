use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use movie_finder::{
    app::{debounce, SearchPhase, SearchSession, SearchState, SessionOptions},
    config::Config,
    services::{MovieCatalog, TmdbProvider},
    ui,
};

const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movie_finder=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbProvider::from_config(&config)?);
    tracing::info!(
        provider = catalog.name(),
        api_url = %config.api_url,
        region = %config.watch_region,
        enrich_providers = config.enrich_providers,
        "Movie finder started"
    );

    let session = Arc::new(SearchSession::new(catalog, SessionOptions::from(&config)));
    let (input, debounced) = debounce::<String>(config.debounce_delay());

    let renderer = tokio::spawn(render_loop(session.store().subscribe()));
    let worker = tokio::spawn(session.clone().run(debounced));

    // Each line replaces the contents of the search box.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        session.set_raw_query(&line);
        input.push(line)?;
    }

    drop(input);
    worker.await?;

    // The renderer exits once the last store handle is gone.
    drop(session);
    renderer.await?;

    Ok(())
}

/// Redraws on every state change and animates the spinner while loading
async fn render_loop(mut rx: watch::Receiver<SearchState>) {
    let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
    let mut tick = 0usize;
    let mut drawn: Option<(SearchPhase, String)> = None;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                // Typing alone does not change the result area.
                let key = (state.phase.clone(), state.debounced_query.clone());
                if drawn.as_ref() != Some(&key) {
                    draw(&state, tick);
                    drawn = Some(key);
                }
            }
            _ = ticker.tick() => {
                let loading = rx.borrow().is_loading();
                if loading {
                    tick = tick.wrapping_add(1);
                    print_frame(&format!("\r\x1b[2K{}", ui::render_spinner(tick)));
                }
            }
        }
    }
}

fn draw(state: &SearchState, tick: usize) {
    let frame = ui::render(state, tick);
    if state.is_loading() {
        print_frame(&format!("\r\x1b[2K{}", frame));
    } else {
        print_frame(&format!("\r\x1b[2K{}\n\n> ", frame));
    }
}

fn print_frame(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
        tracing::warn!(error = %e, "Failed to write to stdout");
    }
}
