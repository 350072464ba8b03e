//! Plain-text rendering of the search screen.
//!
//! Everything here is a pure function of [`SearchState`]; the binary decides when to draw.

use std::fmt::Write;

use crate::{
    app::state::{SearchPhase, SearchState},
    models::Movie,
};

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Loading line for the given animation tick
pub fn render_spinner(tick: usize) -> String {
    format!("{} Loading movies...", spinner_frame(tick))
}

/// Title line above the result area
pub fn render_heading(state: &SearchState) -> String {
    if state.debounced_query.is_empty() {
        "Popular movies".to_string()
    } else {
        format!("Search results for \"{}\"", state.debounced_query)
    }
}

/// Renders the whole result area
pub fn render(state: &SearchState, tick: usize) -> String {
    match &state.phase {
        SearchPhase::Idle => "Type a title and press Enter to search.".to_string(),
        SearchPhase::Loading => render_spinner(tick),
        SearchPhase::Failed(message) => format!("Error: {}", message),
        SearchPhase::Loaded(movies) => {
            let mut out = render_heading(state);
            out.push('\n');
            if movies.is_empty() {
                out.push_str("No movies found.");
                return out;
            }
            for movie in movies {
                out.push('\n');
                out.push_str(&render_card(movie));
            }
            out
        }
    }
}

pub fn poster_url(movie: &Movie) -> Option<String> {
    movie
        .poster_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", POSTER_BASE_URL, p))
}

/// One movie card, prefixed with its identifier
pub fn render_card(movie: &Movie) -> String {
    let year = movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let rating = if movie.vote_average > 0.0 {
        format!("{:.1}", movie.vote_average)
    } else {
        "N/A".to_string()
    };
    let language = if movie.original_language.is_empty() {
        "N/A".to_string()
    } else {
        movie.original_language.to_uppercase()
    };

    let mut card = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(card, "[{}] {}", movie.id, movie.title);
    let _ = write!(card, "      ★ {} • {} • {}", rating, language, year);
    let _ = write!(
        card,
        "\n      {}",
        poster_url(movie).unwrap_or_else(|| "no poster".to_string())
    );
    if let Some(stream) = &movie.stream_info {
        let _ = write!(card, "\n      Streaming: {}", stream);
    }
    card
}
