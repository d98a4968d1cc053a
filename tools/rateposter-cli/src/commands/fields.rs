//! Show every field with its derived default text, position, and size.

use chrono::Timelike;
use rateposter_common::AppConfig;
use rateposter_model::locale::DayPeriod;
use rateposter_model::{Poster, Style};

pub fn run(config: &AppConfig, at: Option<String>) -> anyhow::Result<()> {
    let now = super::resolve_now(at.as_deref())?;
    let style = Style::new(
        config.style.text_color.clone(),
        config.style.font_family.clone(),
    );
    let poster = Poster::with_style(now, style);

    let period = DayPeriod::from_hour(now.hour());
    println!(
        "Derived at: {} ({} / {})",
        now.format("%Y-%m-%d %H:%M"),
        period.english_label(),
        period.khmer_label()
    );
    println!(
        "Style: {} / {}",
        poster.style.font_family,
        poster.style.text_color()
    );
    println!();

    for (id, state) in poster.iter() {
        let range = id.size_range();
        println!(
            "  {:<13} {:<22} at ({:>6.2}%, {:>6.2}%)  {}px [{}-{}]",
            id.key(),
            format!("\"{}\"", poster.display_text(id)),
            state.position.x(),
            state.position.y(),
            state.size(),
            range.min,
            range.max
        );
    }
    Ok(())
}
