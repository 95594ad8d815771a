//! Binary morphology regression test
//!
//! Checks the duality and ordering properties of erosion and dilation, and
//! the shape of boundaries and skeletons on synthetic images.

use grassfire_core::{ImageFormat, binary};
use grassfire_morph::{
    Sel, close, dilate, erode, extract_boundary, open, thin_zhang_suen, transition_count,
};
use grassfire_test::{RegParams, synth};

#[test]
fn binmorph_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("binmorph");
    let sels = [
        Sel::cross(),
        Sel::brick(3, 3).expect("brick"),
        Sel::brick(5, 1).expect("brick"),
    ];

    // --- Test 1: erosion <= original <= dilation ---
    eprintln!("=== Ordering ===");
    let pix = synth::random_binary(40, 30, 0.6, 11).expect("random");
    for sel in &sels {
        let e = erode(&pix, sel).expect("erode");
        let d = dilate(&pix, sel).expect("dilate");
        let ordered = e
            .data()
            .iter()
            .zip(pix.data())
            .zip(d.data())
            .all(|((&e, &p), &d)| e <= p && p <= d);
        rp.compare_true(ordered, "erode <= pix <= dilate");
        rp.compare_true(binary::is_binary(e.data()), "erosion is binary");
    }

    // --- Test 2: open and close are idempotent ---
    eprintln!("=== Idempotence ===");
    let sel = Sel::brick(3, 3).expect("brick");
    let opened = open(&pix, &sel).expect("open");
    rp.compare_pix(&open(&opened, &sel).expect("open"), &opened);
    let closed = close(&pix, &sel).expect("close");
    rp.compare_pix(&close(&closed, &sel).expect("close"), &closed);
    rp.write_pix_and_check(&opened, ImageFormat::Bmp)
        .expect("write opened");

    // --- Test 3: boundary of a filled rectangle ---
    eprintln!("=== Boundary ===");
    let field = synth::blank(30, 20, 0).expect("blank");
    let rect = synth::fill_rect(&field, 5, 4, 12, 8, 255);
    let edge = extract_boundary(&rect, 255).expect("boundary");
    let perimeter = 2.0 * (12.0 + 8.0) - 4.0;
    rp.compare_values(perimeter, edge.count_pixels_with_value(255) as f64, 0.0);
    let inner = erode(&rect, &Sel::cross()).expect("erode");
    // boundary = object minus its cross erosion
    let diff_ok = rect
        .data()
        .iter()
        .zip(inner.data())
        .zip(edge.data())
        .all(|((&r, &i), &b)| (r == 255 && i == 0) == (b == 255));
    rp.compare_true(diff_ok, "boundary equals object minus erosion");

    // --- Test 4: skeleton of a thick rectangle ---
    eprintln!("=== Thinning ===");
    let skel = thin_zhang_suen(&rect, 255).expect("thin");
    let skel_count = skel.count_pixels_with_value(255);
    rp.compare_true(skel_count > 0, "skeleton not empty");
    rp.compare_true(skel_count < 96, "skeleton thinner than rectangle");
    let subset = skel
        .data()
        .iter()
        .zip(rect.data())
        .all(|(&s, &r)| s == 0 || r == 255);
    rp.compare_true(subset, "skeleton inside object");
    // no skeleton pixel is interior to a 3x3 block of skeleton
    let mut thick = false;
    for y in 0..skel.height() {
        for x in 0..skel.width() {
            if skel.get_pixel(x, y) == Some(255) && transition_count(&skel, x, y, 255) == 0 {
                let (xi, yi) = (x as i64, y as i64);
                let all_set = (-1i64..=1)
                    .all(|dy| (-1i64..=1).all(|dx| skel.get_pixel_clamped(xi + dx, yi + dy) == 255));
                thick |= all_set;
            }
        }
    }
    rp.compare_true(!thick, "skeleton has no solid 3x3 block");
    rp.write_pix_and_check(&skel, ImageFormat::Bmp)
        .expect("write skeleton");

    assert!(rp.cleanup(), "binmorph regression test failed");
}
