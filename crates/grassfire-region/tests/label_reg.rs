//! Labeling regression test
//!
//! Region discovery and rendering on small hand-built binary images.

use grassfire_core::ImageFormat;
use grassfire_region::{
    LabelingMode, LabelingOptions, RegionError, RegionExtractor, label, label_pix,
    label_with_options,
};
use grassfire_test::{RegParams, synth};

const MODES: [LabelingMode; 3] = [
    LabelingMode::LargestOnly,
    LabelingMode::AreaThreshold,
    LabelingMode::GrayCoded,
];

#[test]
fn label_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("label");

    // --- Test 1: all background ---
    eprintln!("=== All background ===");
    let mut ex = RegionExtractor::default();
    let n = ex.extract(&[0; 25], 5, 5).expect("extract background");
    rp.compare_values(0.0, n as f64, 0.0);
    rp.compare_values(0.0, ex.store().areas().len() as f64, 0.0);
    for mode in MODES {
        let out = label(&[0; 25], 5, 5, mode).expect("label background");
        rp.compare_true(out.iter().all(|&v| v == 255), "background renders blank");
    }

    // --- Test 2: single 3x3 square in a 7x7 field ---
    eprintln!("=== Single square ===");
    let field = synth::blank(7, 7, 0).expect("blank");
    let square = synth::fill_rect(&field, 2, 2, 3, 3, 255);
    let n = ex.extract(square.data(), 7, 7).expect("extract square");
    rp.compare_values(1.0, n as f64, 0.0);
    rp.compare_values(9.0, ex.store().area_of(1) as f64, 0.0);
    let out = label_pix(&square, LabelingMode::LargestOnly, &LabelingOptions::default())
        .expect("label square");
    // object pixels come out as 0, exactly where the input was set
    rp.compare_pix(&out, &square.invert());
    rp.write_pix_and_check(&out, ImageFormat::Bmp)
        .expect("write square");

    // --- Test 3: blobs of area 9 and 4 ---
    eprintln!("=== Two blobs ===");
    let blobs = synth::from_ascii(&[
        "..........",
        ".###......",
        ".###...##.",
        ".###...##.",
        "..........",
    ])
    .expect("blobs");
    let (w, h) = (blobs.width(), blobs.height());
    let n = ex.extract(blobs.data(), w, h).expect("extract blobs");
    rp.compare_values(2.0, n as f64, 0.0);
    rp.compare_values(9.0, ex.store().area_of(1) as f64, 0.0);
    rp.compare_values(4.0, ex.store().area_of(2) as f64, 0.0);

    let area = label(blobs.data(), w, h, LabelingMode::AreaThreshold).expect("area mode");
    rp.compare_true(area.iter().all(|&v| v == 255), "no blob above 500 pixels");

    let largest = label(blobs.data(), w, h, LabelingMode::LargestOnly).expect("largest mode");
    let marked = largest.iter().filter(|&&v| v == 0).count();
    rp.compare_values(9.0, marked as f64, 0.0);
    rp.compare_values(0.0, largest[w as usize + 1] as f64, 0.0);
    rp.compare_values(255.0, largest[2 * w as usize + 7] as f64, 0.0);

    let opts = LabelingOptions::new().with_area_threshold(5);
    let area = label_with_options(blobs.data(), w, h, LabelingMode::AreaThreshold, &opts)
        .expect("area mode, low threshold");
    rp.compare_true(area == largest, "threshold 5 keeps only the 9-pixel blob");

    // --- Test 4: diagonal-only adjacency ---
    eprintln!("=== Diagonal adjacency ===");
    let diag = synth::from_ascii(&["#...", ".#..", "..#.", "...#"]).expect("diag");
    let n = ex.extract(diag.data(), 4, 4).expect("extract diagonal");
    rp.compare_values(1.0, n as f64, 0.0);
    rp.compare_values(4.0, ex.store().area_of(1) as f64, 0.0);
    let pair = synth::from_ascii(&["#.", ".#"]).expect("pair");
    let n = ex.extract(pair.data(), 2, 2).expect("extract pair");
    rp.compare_values(1.0, n as f64, 0.0);

    // --- Test 5: capacity exceeded ---
    eprintln!("=== Capacity exceeded ===");
    let mut dots = synth::blank(100, 100, 0).expect("blank").to_mut();
    for y in (0..100).step_by(2) {
        for x in (0..100).step_by(2) {
            dots.set_pixel(x, y, 255).expect("dot");
        }
    }
    let dots: grassfire_core::Pix = dots.into();
    let err = ex.extract(dots.data(), 100, 100);
    rp.compare_true(
        matches!(err, Err(RegionError::LabelCapacityExceeded { capacity: 999 })),
        "2500 isolated dots exceed the default capacity",
    );
    rp.compare_values(999.0, ex.store().label_count() as f64, 0.0);
    rp.compare_true(
        ex.store().areas().iter().all(|&a| a == 1),
        "completed regions stay queryable",
    );
    let result = label(dots.data(), 100, 100, LabelingMode::GrayCoded);
    rp.compare_true(result.is_err(), "public entry point returns no output");

    let roomy = LabelingOptions::new().with_capacity(5000);
    let out = label_with_options(dots.data(), 100, 100, LabelingMode::GrayCoded, &roomy)
        .expect("label with raised capacity");
    rp.compare_values(255.0, out[98 * 100 + 98] as f64, 0.0);
    rp.compare_values(0.0, out[1] as f64, 0.0);
    rp.compare_values(0.0, out[0] as f64, 0.0); // label 1 of 2500 rounds to 0

    // --- Test 6: invalid input ---
    eprintln!("=== Invalid input ===");
    rp.compare_true(
        matches!(
            label(&[255; 10], 3, 3, LabelingMode::LargestOnly),
            Err(RegionError::DimensionMismatch { .. })
        ),
        "length mismatch rejected",
    );
    rp.compare_true(
        matches!(
            "7".parse::<LabelingMode>(),
            Err(RegionError::InvalidLabelingMode(_))
        ),
        "unknown mode code rejected",
    );

    assert!(rp.cleanup(), "label regression test failed");
}

#[test]
fn label_large_region_reg() {
    let mut rp = RegParams::new("label_large");

    // One region covering the whole image: the traversal stack reaches
    // the pixel count without recursion.
    let (w, h) = (400u32, 300u32);
    let full = vec![255u8; (w * h) as usize];
    let mut ex = RegionExtractor::default();
    let n = ex.extract(&full, w, h).expect("extract full image");
    rp.compare_values(1.0, n as f64, 0.0);
    rp.compare_values((w * h) as f64, ex.store().area_of(1) as f64, 0.0);

    // Serpentine: one long 1-pixel-wide path folded across the image
    let mut snake = synth::blank(61, 61, 0).expect("blank").to_mut();
    for y in (0..61).step_by(2) {
        for x in 0..61 {
            snake.set_pixel(x, y, 255).expect("row");
        }
        if y + 1 < 61 {
            let x = if (y / 2) % 2 == 0 { 60 } else { 0 };
            snake.set_pixel(x, y + 1, 255).expect("link");
        }
    }
    let snake: grassfire_core::Pix = snake.into();
    let fg = snake.count_pixels_with_value(255);
    let n = ex.extract(snake.data(), 61, 61).expect("extract snake");
    rp.compare_values(1.0, n as f64, 0.0);
    rp.compare_values(fg as f64, ex.store().area_of(1) as f64, 0.0);

    assert!(rp.cleanup(), "label_large regression test failed");
}
