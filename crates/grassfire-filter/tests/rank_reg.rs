//! Rank filter regression test

use grassfire_core::{ImageFormat, Pix};
use grassfire_filter::{max_filter, median_filter, min_filter, rank_filter};
use grassfire_test::{RegParams, synth};

#[test]
fn rank_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("rank");

    // --- Test 1: median removes isolated noise ---
    eprintln!("=== Salt noise ===");
    let mut pm = synth::blank(30, 20, 90).expect("blank").to_mut();
    for (x, y) in [(3, 3), (10, 7), (25, 15), (0, 0), (29, 19)] {
        pm.set_pixel(x, y, 255).expect("set");
    }
    let noisy: Pix = pm.into();
    let clean = median_filter(&noisy, 3).expect("median");
    rp.compare_values(600.0, clean.count_pixels_with_value(90) as f64, 0.0);
    rp.write_pix_and_check(&clean, ImageFormat::Bmp)
        .expect("write median");

    // --- Test 2: min and max grow and shrink a square ---
    eprintln!("=== Min / max ===");
    let field = synth::blank(20, 20, 0).expect("blank");
    let square = synth::fill_rect(&field, 6, 6, 8, 8, 255);
    let grown = max_filter(&square, 3).expect("max");
    rp.compare_values(100.0, grown.count_pixels_with_value(255) as f64, 0.0);
    let shrunk = min_filter(&square, 5).expect("min");
    rp.compare_values(16.0, shrunk.count_pixels_with_value(255) as f64, 0.0);

    // --- Test 3: rank extremes agree with min/max ---
    eprintln!("=== Rank extremes ===");
    let gray = synth::random_gray(16, 16, 3).expect("random");
    rp.compare_pix(
        &rank_filter(&gray, 3, 0.0).expect("rank 0"),
        &min_filter(&gray, 3).expect("min"),
    );
    rp.compare_pix(
        &rank_filter(&gray, 3, 1.0).expect("rank 1"),
        &max_filter(&gray, 3).expect("max"),
    );

    // --- Test 4: even window rejected ---
    eprintln!("=== Invalid window ===");
    rp.compare_true(median_filter(&gray, 2).is_err(), "even window rejected");

    assert!(rp.cleanup(), "rank regression test failed");
}
