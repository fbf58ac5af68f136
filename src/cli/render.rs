//! Plain-text rendering of lifecycle states, listings and detail pages.

use std::fmt::Write;

use crate::controller::FetchState;
use crate::domain::{Movie, MovieSummary, Profile};

pub const LOADING: &str = "Loading...";
const NOT_AVAILABLE: &str = "N/A";

/// Render whatever a controller currently shows. `Idle` renders as nothing.
pub fn render_state<T, F>(state: &FetchState<T>, render_data: F) -> String
where
    F: FnOnce(&T) -> String,
{
    match state {
        FetchState::Idle => String::new(),
        FetchState::Loading => LOADING.to_string(),
        FetchState::Success(data) => render_data(data),
        FetchState::Failure(error) => format!("Error: {}", error.message),
    }
}

pub fn render_results(movies: &[MovieSummary]) -> String {
    if movies.is_empty() {
        return "No movies found".to_string();
    }

    let mut out = String::new();
    for (index, movie) in movies.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} ({})  ★ {:.1}  #{}",
            index + 1,
            movie.title,
            movie.release_year().unwrap_or("----"),
            movie.vote_average,
            movie.id
        );
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_movie(movie: &Movie, image_base: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", movie.title);
    let _ = writeln!(
        out,
        "{} • {}",
        movie.release_year().unwrap_or(NOT_AVAILABLE),
        movie
            .runtime
            .map(|r| format!("{}m", r))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    );
    let _ = writeln!(
        out,
        "★ {} ({} votes)",
        movie.rating_label(),
        movie.vote_count
    );

    info(&mut out, "Overview", movie.overview.as_deref());
    info(&mut out, "Genres", movie.genre_names().as_deref());
    info(&mut out, "Budget", Some(&format_usd(movie.budget)));
    info(&mut out, "Revenue", Some(&format_usd(movie.revenue)));
    info(
        &mut out,
        "Production Companies",
        movie.company_names().as_deref(),
    );
    info(
        &mut out,
        "Spoken Languages",
        movie.language_names().as_deref(),
    );
    info(
        &mut out,
        "Production Countries",
        movie.country_names().as_deref(),
    );
    info(&mut out, "Status", movie.status.as_deref());
    info(&mut out, "Tagline", movie.tagline.as_deref());
    info(&mut out, "IMDb", movie.imdb_url().as_deref());
    info(&mut out, "Poster", Some(&movie.poster_url(image_base)));

    out.truncate(out.trim_end().len());
    out
}

pub fn render_profile(profile: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", profile.display_name());
    info(&mut out, "Username", Some(&profile.username));
    info(&mut out, "Bio", Some(&profile.bio));
    info(&mut out, "Email", Some(&profile.email));
    info(&mut out, "Picture", Some(&profile.profile_pic));
    out.truncate(out.trim_end().len());
    out
}

fn info(out: &mut String, label: &str, value: Option<&str>) {
    let value = value.filter(|v| !v.trim().is_empty()).unwrap_or(NOT_AVAILABLE);
    let _ = write!(out, "\n{}\n  {}\n", label, value);
}

/// `63000000` -> `$63,000,000 USD`
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${} USD", grouped)
}
