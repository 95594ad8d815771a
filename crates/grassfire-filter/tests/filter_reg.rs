//! Filter regression test
//!
//! Convolution, edge detection, enhancement and binarization on synthetic
//! images with known responses.

use grassfire_core::{ImageFormat, Pix};
use grassfire_filter::{
    EdgeOrientation, Kernel, ThresholdOptions, binarize, binarize_auto, convolve_gray, equalize,
    gaussian_blur, laplacian_edge, prewitt_edge, sharpen, sobel_edge, stretch_contrast,
};
use grassfire_test::{RegParams, synth};

#[test]
fn convolve_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("convolve");

    // --- Test 1: smoothing keeps a flat field ---
    eprintln!("=== Flat field ===");
    let flat = synth::blank(20, 12, 128).expect("blank");
    for name in ["average", "gaussian"] {
        let k = Kernel::by_name(name).expect("preset");
        let out = convolve_gray(&flat, &k).expect("convolve");
        rp.compare_pix(&out, &flat);
    }

    // --- Test 2: a linear ramp is a fixed point of symmetric smoothing ---
    eprintln!("=== Ramp ===");
    let ramp = synth::gradient(256, 8).expect("gradient");
    let blurred = gaussian_blur(&ramp).expect("blur");
    let interior_same = (1..255).all(|x| blurred.get_pixel(x, 4) == ramp.get_pixel(x, 4));
    rp.compare_true(interior_same, "gaussian keeps ramp interior");
    rp.write_pix_and_check(&blurred, ImageFormat::Bmp)
        .expect("write blurred");

    // --- Test 3: sharpening a flat field is the identity ---
    eprintln!("=== Sharpen ===");
    let out = sharpen(&flat).expect("sharpen");
    rp.compare_pix(&out, &flat);

    assert!(rp.cleanup(), "convolve regression test failed");
}

#[test]
fn edge_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("edge");

    // --- Test 1: ramp of slope 1 ---
    eprintln!("=== Ramp gradients ===");
    let ramp = synth::gradient(256, 8).expect("gradient");
    let sobel_v = sobel_edge(&ramp, EdgeOrientation::Vertical).expect("sobel");
    rp.compare_values(2.0, sobel_v.get_pixel(100, 4).unwrap_or(0) as f64, 0.0);
    rp.compare_values(1.0, sobel_v.get_pixel(0, 4).unwrap_or(0) as f64, 0.0);
    let sobel_h = sobel_edge(&ramp, EdgeOrientation::Horizontal).expect("sobel");
    rp.compare_values(2048.0, sobel_h.count_pixels_with_value(0) as f64, 0.0);
    let prewitt = prewitt_edge(&ramp, EdgeOrientation::All).expect("prewitt");
    rp.compare_values(2.0, prewitt.get_pixel(50, 2).unwrap_or(0) as f64, 0.0);
    let lap = laplacian_edge(&ramp).expect("laplacian");
    rp.compare_values(2048.0, lap.count_pixels_with_value(0) as f64, 0.0);

    // --- Test 2: outline of a bright square ---
    eprintln!("=== Square outline ===");
    let field = synth::blank(16, 16, 0).expect("blank");
    let square = synth::fill_rect(&field, 4, 4, 8, 8, 255);
    let edges = sobel_edge(&square, EdgeOrientation::All).expect("sobel");
    // the square's center and the far corner see no change
    rp.compare_values(0.0, edges.get_pixel(8, 8).unwrap_or(255) as f64, 0.0);
    rp.compare_values(0.0, edges.get_pixel(0, 0).unwrap_or(255) as f64, 0.0);
    // straight side, away from the corners: full response
    rp.compare_values(255.0, edges.get_pixel(3, 8).unwrap_or(0) as f64, 0.0);
    rp.compare_values(255.0, edges.get_pixel(8, 4).unwrap_or(0) as f64, 0.0);
    rp.write_pix_and_check(&edges, ImageFormat::Bmp)
        .expect("write edges");

    assert!(rp.cleanup(), "edge regression test failed");
}

#[test]
fn enhance_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("enhance");

    // --- Test 1: stretch a narrow band to full range ---
    eprintln!("=== Stretch ===");
    let data: Vec<u8> = (0..64u32).map(|i| 100 + (i % 51) as u8).collect();
    let narrow = Pix::from_vec(8, 8, data).expect("narrow");
    let stretched = stretch_contrast(&narrow).expect("stretch");
    rp.compare_true(stretched.data().contains(&0), "stretch reaches 0");
    rp.compare_true(stretched.data().contains(&255), "stretch reaches 255");
    let ramp = synth::gradient(256, 2).expect("gradient");
    rp.compare_pix(&stretch_contrast(&ramp).expect("stretch"), &ramp);

    // --- Test 2: equalization is monotone and reaches 255 ---
    eprintln!("=== Equalize ===");
    let gray = synth::random_gray(32, 32, 7).expect("random");
    let eq = equalize(&gray).expect("equalize");
    let mut pairs: Vec<(u8, u8)> = gray
        .data()
        .iter()
        .copied()
        .zip(eq.data().iter().copied())
        .collect();
    pairs.sort_unstable();
    rp.compare_true(
        pairs.windows(2).all(|w| w[0].1 <= w[1].1),
        "equalize is monotone",
    );
    rp.compare_values(255.0, eq.data().iter().copied().max().unwrap_or(0) as f64, 0.0);

    // --- Test 3: automatic binarization of a two-level image ---
    eprintln!("=== Binarize ===");
    let dark = synth::blank(20, 20, 30).expect("blank");
    let two_level = synth::fill_rect(&dark, 5, 5, 10, 10, 200);
    let (bin, t) = binarize_auto(&two_level, &ThresholdOptions::default()).expect("auto");
    rp.compare_values(115.0, t as f64, 0.0);
    let mask = synth::fill_rect(&synth::blank(20, 20, 0).expect("blank"), 5, 5, 10, 10, 255);
    rp.compare_pix(&bin, &mask);
    rp.compare_pix(&binarize(&two_level, t).expect("binarize"), &mask);
    rp.write_pix_and_check(&bin, ImageFormat::Bmp)
        .expect("write binary");

    assert!(rp.cleanup(), "enhance regression test failed");
}
