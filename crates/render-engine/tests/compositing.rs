use chrono::Utc;
use image::{Rgba, RgbaImage};
use proptest::prelude::*;

use memegen_meme_model::{Color, Overlays, Position, SignedUrl, TextOverlay, TextStyle};
use memegen_render_engine::{CanvasSurface, Compositor, FontBook, MockImageSource};

const BACKGROUND: Rgba<u8> = Rgba([90, 90, 90, 255]);

fn url() -> SignedUrl {
    SignedUrl::new("https://gw.mock/files/abc123?X-Expires=300", Utc::now(), 300)
}

fn compositor() -> Compositor {
    Compositor::new(FontBook::block_only())
}

#[tokio::test]
async fn test_render_matches_image_size() {
    let source = MockImageSource::new(RgbaImage::from_pixel(500, 500, BACKGROUND));
    let surface = compositor()
        .render(&source, &url(), &Overlays::default(), &TextStyle::default())
        .await
        .unwrap();
    assert_eq!(surface.dimensions(), (500, 500));
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn test_repeated_renders_are_pixel_identical() {
    let source = MockImageSource::new(RgbaImage::from_pixel(300, 200, BACKGROUND));
    let mut overlays = Overlays::for_canvas(300, 200, 40);
    overlays.top.text = "ONE DOES NOT".into();
    overlays.bottom.text = "SIMPLY".into();
    let style = TextStyle::new(42, "Impact", Color::rgb(255, 200, 0));
    let compositor = compositor();

    let first = compositor.render(&source, &url(), &overlays, &style).await.unwrap();
    let second = compositor.render(&source, &url(), &overlays, &style).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_text_is_centred_on_its_anchor() {
    let source = MockImageSource::new(RgbaImage::from_pixel(500, 500, BACKGROUND));
    let mut overlays = Overlays::default();
    overlays.top.text = "WOW".into();
    let surface = compositor()
        .render(&source, &url(), &overlays, &TextStyle::default())
        .await
        .unwrap();

    let touched: Vec<u32> = (0..500)
        .filter(|&x| *surface.pixels().get_pixel(x, 30) != BACKGROUND)
        .collect();
    let min = *touched.first().unwrap();
    let end = *touched.last().unwrap() + 1;
    assert_eq!(250 - min, end - 250);

    let colors: Vec<Rgba<u8>> = touched.iter().map(|&x| *surface.pixels().get_pixel(x, 30)).collect();
    assert!(colors.contains(&Rgba([255, 255, 255, 255])));
    assert!(colors.contains(&Rgba([0, 0, 0, 255])));
    // The stroke is drawn last, so the outermost pixels are black.
    assert_eq!(colors[0], Rgba([0, 0, 0, 255]));
    assert_eq!(*colors.last().unwrap(), Rgba([0, 0, 0, 255]));
}

#[tokio::test]
async fn test_text_sits_on_the_baseline() {
    let source = MockImageSource::new(RgbaImage::from_pixel(500, 500, BACKGROUND));
    let mut overlays = Overlays::default();
    overlays.bottom.text = "LOW".into();
    let surface = compositor()
        .render(&source, &url(), &overlays, &TextStyle::default())
        .await
        .unwrap();
    // Block glyphs stand on the baseline; the stroke reaches one row below it.
    assert_eq!(*surface.pixels().get_pixel(250, 460), Rgba([0, 0, 0, 255]));
    assert_eq!(*surface.pixels().get_pixel(250, 461), BACKGROUND);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_surface() {
    let source = MockImageSource::new(RgbaImage::from_pixel(64, 48, BACKGROUND));
    let compositor = compositor();
    let mut surface = CanvasSurface::default();
    compositor
        .render_into(&source, &url(), &Overlays::default(), &TextStyle::default(), &mut surface)
        .await
        .unwrap();
    let before = surface.clone();

    source.set_fail(true);
    let mut overlays = Overlays::default();
    overlays.top.text = "changed".into();
    let result = compositor
        .render_into(&source, &url(), &overlays, &TextStyle::default(), &mut surface)
        .await;
    assert!(result.is_err());
    assert_eq!(surface, before);
}

proptest! {
    #[test]
    fn prop_any_text_and_position_renders(
        top in ".{0,40}",
        bottom in "\\PC{0,20}",
        x in any::<i32>(),
        y in -1000i32..1000,
        size in 0u32..200,
    ) {
        let image = RgbaImage::from_pixel(120, 80, BACKGROUND);
        let overlays = Overlays {
            top: TextOverlay::new(top, Position::new(x, y)),
            bottom: TextOverlay::new(bottom, Position::new(60, 70)),
        };
        let style = TextStyle::new(size, "Impact", Color::WHITE);
        let mut surface = CanvasSurface::default();
        compositor().compose(&mut surface, &image, &overlays, &style);
        prop_assert_eq!(surface.dimensions(), (120, 80));
    }
}
