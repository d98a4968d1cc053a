//! Check which of the selectable fonts resolve on this system.

use rateposter_common::AppConfig;
use rateposter_model::FONT_CHOICES;
use rateposter_render::FontBook;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let mut book = FontBook::from_config(&config.fonts);
    println!("Font faces found: {}", book.face_count());
    println!();

    for family in FONT_CHOICES {
        if book.has_family(family) {
            println!("  ✓ {family}");
        } else {
            match book.resolve(family) {
                Some(font) => println!("  ~ {family} (falls back to {})", font.family()),
                None => println!("  ✗ {family} (text will not be drawn)"),
            }
        }
    }

    if book.face_count() == 0 {
        println!();
        println!("No fonts installed. Add a directory under \"fonts.extra_dirs\" in:");
        println!("  {}", rateposter_common::config_file_path().display());
    }
    Ok(())
}
