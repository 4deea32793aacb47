use memegen_meme_model::style::{clamp_font_size, Color, MAX_FONT_SIZE, MIN_FONT_SIZE};
use memegen_meme_model::{default_positions, Overlays};
use proptest::prelude::*;

proptest! {
    #[test]
    fn hex_colours_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let colour = Color::rgb(r, g, b);
        prop_assert_eq!(Color::parse_hex(&colour.to_string()).unwrap(), colour);
    }

    #[test]
    fn colour_parsing_never_panics(input in ".{0,12}") {
        let _ = Color::parse_hex(&input);
    }

    #[test]
    fn font_size_always_lands_in_range(size in any::<u32>()) {
        let clamped = clamp_font_size(size);
        prop_assert!((MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&clamped));
    }

    #[test]
    fn default_positions_are_horizontally_centred(w in 1u32..10_000, h in 1u32..10_000) {
        let (top, bottom) = default_positions(w, h, 40);
        prop_assert_eq!(top.x, bottom.x);
        prop_assert_eq!(top.x, (w / 2) as i32);
        prop_assert_eq!(bottom.y, h as i32 - 40);
    }
}

#[test]
fn recentering_large_canvas_keeps_margins() {
    let mut overlays = Overlays::default();
    overlays.recenter(1920, 1080, 40);
    assert_eq!(overlays.top.position.y, 40);
    assert_eq!(overlays.bottom.position.y, 1040);
}
