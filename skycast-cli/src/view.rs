use chrono::Local;
use skycast_core::ScreenState;

/// Print the screen state as a small text card.
///
/// An error, if present, is printed alongside whatever (possibly stale)
/// weather data is still in the state.
pub fn render(state: &ScreenState) {
    if let Some(city) = &state.selected_city {
        println!("{}, {}", city.name, city.country);

        if let Some(temp) = state.temperature_c {
            let category =
                state.generalized.map(|c| c.to_string()).unwrap_or_default();
            println!("{temp}\u{b0} {category}");

            if let (Some(max), Some(min)) = (state.max_temperature_c, state.min_temperature_c) {
                println!("{} {max}\u{b0}/{min}\u{b0}", Local::now().format("%a"));
            }

            let bg = state.background;
            println!("\x1b[48;2;{};{};{}m  \x1b[0m {bg}", bg.r, bg.g, bg.b);
        }
    }

    if let Some(err) = &state.error_message {
        eprintln!("error: {err}");
    }
}
