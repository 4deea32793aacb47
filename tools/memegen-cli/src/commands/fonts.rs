//! List font presets and the font each one resolves to.

use memegen_common::config::AppConfig;
use memegen_meme_model::FONT_STYLES;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let book = super::font_book(config);

    println!("Font presets");
    println!("{}", "=".repeat(50));
    for family in FONT_STYLES {
        let resolved = book.resolve(family);
        let marker = if resolved.name().eq_ignore_ascii_case(family) {
            "[OK]  "
        } else {
            "[SUBS]"
        };
        println!("{marker} {family:<18} -> {}", resolved.name());
    }
    if let Some(path) = &config.render.fallback_font {
        println!();
        println!("Fallback font file: {}", path.display());
    }
    Ok(())
}
