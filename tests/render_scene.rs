use breville::color::{RING_RED, WHITE};
use breville::io::{SaveFormat, encode_and_write};
use breville::ops::raster::{Zone, classify_pixel, render};
use breville::{NoiseTable, SceneConfig, render_scene, render_stages};

fn fixture_noise(size: usize) -> NoiseTable {
    // Fixed, non-random sequence covering [0, 1).
    let values = (0..size).map(|i| ((i * 37) % 101) as f64 / 101.0).collect();
    NoiseTable::from_values(values).unwrap()
}

#[test]
fn reference_probe_pixels() {
    let config = SceneConfig::new(1100, 1400);
    assert_eq!((config.button_x, config.button_y), (550, 700));
    assert_eq!((config.button_radius, config.light_radius), (385, 440));

    let centre = classify_pixel(&config, 550, 700);
    assert_eq!(centre.zone, Zone::Inner);
    assert_eq!(centre.base, WHITE);

    let ring = classify_pixel(&config, 960, 700);
    assert_eq!(ring.zone, Zone::Ring);
    assert_eq!(ring.base, RING_RED);

    let top = classify_pixel(&config, 550, 0);
    assert_eq!(top.zone, Zone::Background);
    assert_eq!(top.ridge, (0.0, 1.0));
    assert_eq!(top.line, 0);
}

#[test]
fn ring_pixel_lands_in_both_buffers() {
    let config = SceneConfig::new(1100, 1400);
    let noise = fixture_noise(config.noise_size);
    let out = render(&config, &noise).unwrap();

    let main = out.image.get_pixel(960, 700);
    assert_eq!(out.glow.get_pixel(960, 700), main);
    assert!(main[0] > main[1] && main[1] == main[2]);
    assert_eq!(out.glow.get_pixel(550, 700)[3], 0);
    assert_eq!(out.glow.get_pixel(550, 0)[3], 0);

    // Shaded white stays within the [0.63, 1.0] light band.
    for (x, y) in [(550, 700), (550, 0)] {
        let p = out.image.get_pixel(x, y);
        assert!(p[0] >= 160 && p[0] == p[1] && p[1] == p[2], "{:?} at ({x}, {y})", p);
    }
}

#[test]
fn injected_noise_renders_byte_for_byte() {
    let config = SceneConfig::new(200, 260);
    let a = render_scene(&config, &fixture_noise(config.noise_size)).unwrap();
    let b = render_scene(&config, &fixture_noise(config.noise_size)).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());

    let seeded_a = render_scene(&config, &NoiseTable::seeded(config.noise_size, 3)).unwrap();
    let seeded_b = render_scene(&config, &NoiseTable::seeded(config.noise_size, 3)).unwrap();
    assert_eq!(seeded_a, seeded_b);
}

#[test]
fn halo_reddens_page_just_outside_the_ring() {
    let config = SceneConfig::new(200, 260);
    let noise = fixture_noise(config.noise_size);
    let stages = render_stages(&config, &noise).unwrap();
    let raw = render(&config, &noise).unwrap().image;

    assert_eq!(stages.image.dimensions(), (200, 260));
    assert!(stages.image.pixels().all(|p| p[3] == 255));

    // Two pixels past the light radius, to the right of centre.
    let x = (config.button_x + config.light_radius as i64 + 2) as u32;
    let y = config.button_y as u32;
    assert_eq!(classify_pixel(&config, x, y).zone, Zone::Background);
    let before = raw.get_pixel(x, y);
    let after = stages.image.get_pixel(x, y);
    assert!(after[1] < before[1], "green {} -> {}", before[1], after[1]);
    assert!(stages.glow.get_pixel(x, y)[3] > 0);
    assert_eq!(stages.glow_source.get_pixel(x, y)[3], 0);

    // Far corner is untouched by the halo.
    assert_eq!(stages.image.get_pixel(0, 0), raw.get_pixel(0, 0));
}

#[test]
fn saves_opaque_png() {
    let config = SceneConfig::new(60, 80);
    let page = render_scene(&config, &fixture_noise(config.noise_size)).unwrap();
    let path = std::env::temp_dir().join(format!("breville-it-{}.png", std::process::id()));
    encode_and_write(&page, &path, SaveFormat::Png, 90, config.dpi).unwrap();

    let back = image::open(&path).unwrap();
    assert_eq!((back.width(), back.height()), (60, 80));
    assert_eq!(back.to_rgba8(), page);
    let _ = std::fs::remove_file(&path);
}
