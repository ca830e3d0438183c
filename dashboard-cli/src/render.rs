//! Plain-text card rendering. Presentation only; consumes the request
//! state, the favorites list, and the derived band, nothing else.

use dashboard_core::{PresentationBand, RequestState, classify};

fn band_glyph(band: PresentationBand) -> &'static str {
    match band {
        PresentationBand::Cold => "❄",
        PresentationBand::Moderate => "⛅",
        PresentationBand::Hot => "☀",
    }
}

pub fn card(state: &RequestState, is_favorite: bool) {
    match state {
        RequestState::Idle => println!("No search yet."),
        RequestState::Loading => println!("Loading..."),
        RequestState::Failure(reason) => println!("Could not fetch weather: {reason}"),
        RequestState::Success(snapshot) => {
            let band = classify(snapshot.temperature_c);
            let star = if is_favorite { " ★" } else { "" };

            println!();
            println!("  {} {}{star}", band_glyph(band), snapshot.city);
            println!("  {:.1} °C ({band})", snapshot.temperature_c);
            println!("  Humidity: {}%", snapshot.humidity_pct);
            println!("  {}", snapshot.description);
            println!("  As of {}", snapshot.fetched_at.format("%Y-%m-%d %H:%M UTC"));
            println!();
        }
    }
}

pub fn favorites(cities: &[String]) {
    if cities.is_empty() {
        println!("No favorite cities yet.");
        return;
    }

    println!("Favorites: {}", cities.join(", "));
}
