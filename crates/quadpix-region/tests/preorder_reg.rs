//! Preorder text regression test
//!
//! Dumps quadtrees as preorder text, reads them back and checks that the
//! node sequence, the slot layout (masked form) and the rendered pixels
//! all survive. Also covers the lenient plain-form reader and the errors
//! raised for damaged input.

use quadpix_core::RasterImage;
use quadpix_region::{
    PreorderFormat, QuadTree, QuadtreeOptions, RegionError, SplitPolicy, build_quadtree,
    build_quadtree_with_options, dump_preorder, flatten_to_ppm, load_preorder,
};
use quadpix_test::{RegParams, load_test_image};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// (tag, intensity, row, height, col, width) for each node in preorder
fn node_sequence(tree: &QuadTree) -> Vec<(bool, u8, u32, u32, u32, u32)> {
    tree.preorder()
        .map(|n| (n.is_leaf(), n.intensity(), n.row(), n.height(), n.col(), n.width()))
        .collect()
}

fn flag(ok: bool) -> f64 {
    if ok { 1.0 } else { 0.0 }
}

#[test]
fn preorder_reg() {
    let mut rp = RegParams::new("preorder");

    // --- Golden text for the two-tone image ---
    let halves = load_test_image("halves4.ppm").expect("load halves4.ppm");
    let tree = build_quadtree(&halves, 10.0).unwrap();
    let masked = tree.write_preorder_to_bytes(PreorderFormat::Masked).unwrap();
    let plain = tree.write_preorder_to_bytes(PreorderFormat::Plain).unwrap();
    rp.write_data_and_check(&masked, "qt").unwrap();
    rp.write_data_and_check(&plain, "qt").unwrap();

    // Both forms read back into the same tree here: every slot is filled
    let from_masked = QuadTree::read_preorder_from_bytes(&masked).unwrap();
    let from_plain = QuadTree::read_preorder_from_bytes(&plain).unwrap();
    rp.compare_values(1.0, flag(from_masked == tree), 0.0);
    rp.compare_values(1.0, flag(from_plain == tree), 0.0);

    // --- Round trips over the test images ---
    for name in ["gradient.ppm", "blocks.ppm", "cover.ppm"] {
        let image = load_test_image(name).unwrap();
        for max_rmse in [0.0, 12.5, 30.0] {
            let tree = build_quadtree(&image, max_rmse).unwrap();
            for format in [PreorderFormat::Masked, PreorderFormat::Plain] {
                let text = tree.write_preorder_to_bytes(format).unwrap();
                let loaded = QuadTree::read_preorder_from_bytes(&text).unwrap();
                rp.compare_values(
                    1.0,
                    flag(node_sequence(&loaded) == node_sequence(&tree)),
                    0.0,
                );
                rp.compare_image(&loaded.render().unwrap(), &tree.render().unwrap());
                // Re-dumping is stable
                let again = loaded.write_preorder_to_bytes(format).unwrap();
                rp.compare_strings(&text, &again);
            }
        }
    }

    assert!(rp.cleanup(), "preorder regression test failed");
}

#[test]
fn preorder_slots_reg() {
    let mut rp = RegParams::new("preorder_slots");
    let mut rng = StdRng::seed_from_u64(0x5eed_0002);

    // Thin and odd-sized images exercise the partial child layouts
    for _ in 0..10 {
        let width = rng.random_range(1..=9);
        let height = rng.random_range(1..=9);
        let data: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let image = RasterImage::from_data(width, height, data).unwrap();

        for split in [SplitPolicy::Quadrants, SplitPolicy::LinearPairs] {
            let options = QuadtreeOptions::new(0.0).with_split(split);
            let tree = build_quadtree_with_options(&image, &options).unwrap();

            // Masked form keeps every slot
            let text = tree.write_preorder_to_bytes(PreorderFormat::Masked).unwrap();
            let loaded = QuadTree::read_preorder_from_bytes(&text).unwrap();
            rp.compare_values(1.0, flag(loaded == tree), 0.0);

            // Plain form keeps the sequence and the pixels
            let text = tree.write_preorder_to_bytes(PreorderFormat::Plain).unwrap();
            let loaded = QuadTree::read_preorder_from_bytes(&text).unwrap();
            rp.compare_values(
                1.0,
                flag(node_sequence(&loaded) == node_sequence(&tree)),
                0.0,
            );
            rp.compare_image(&loaded.render().unwrap(), &image);

            // With the default policy slots follow geometry, so the plain
            // reader recovers them too
            if split == SplitPolicy::Quadrants {
                rp.compare_values(1.0, flag(loaded == tree), 0.0);
            }
        }
    }

    assert!(rp.cleanup(), "preorder slots regression test failed");
}

#[test]
fn preorder_errors_reg() {
    let mut rp = RegParams::new("preorder_errors");

    let halves = load_test_image("halves4.ppm").unwrap();
    let tree = build_quadtree(&halves, 10.0).unwrap();
    let masked = tree.write_preorder_to_bytes(PreorderFormat::Masked).unwrap();

    // Dropping the last line of masked text is detected
    let text = String::from_utf8(masked).unwrap();
    let truncated: String = text.lines().take(4).map(|l| format!("{l}\n")).collect();
    let result = QuadTree::read_preorder_from_bytes(truncated.as_bytes());
    rp.compare_values(
        1.0,
        flag(matches!(result, Err(RegionError::Format { .. }))),
        0.0,
    );

    // The plain reader keeps what it has
    let plain = tree.write_preorder_to_bytes(PreorderFormat::Plain).unwrap();
    let text = String::from_utf8(plain).unwrap();
    let truncated: String = text.lines().take(4).map(|l| format!("{l}\n")).collect();
    let loaded = QuadTree::read_preorder_from_bytes(truncated.as_bytes()).unwrap();
    rp.compare_values(3.0, loaded.root().child_count() as f64, 0.0);

    // Malformed lines report their line number
    let damaged = "N 127 0 4 0 4 1111\nL 0 0 2 0 2\nL 999 0 2 2 2\n";
    match QuadTree::read_preorder_from_bytes(damaged.as_bytes()) {
        Err(RegionError::Format { line, .. }) => rp.compare_values(3.0, line as f64, 0.0),
        other => {
            eprintln!("unexpected result: {other:?}");
            rp.compare_values(1.0, 0.0, 0.0)
        }
    };

    // Missing files are I/O errors
    let result = load_preorder("/nonexistent/quadpix/missing.qt");
    rp.compare_values(1.0, flag(matches!(result, Err(RegionError::Io(_)))), 0.0);

    assert!(rp.cleanup(), "preorder errors regression test failed");
}

#[test]
fn preorder_files_reg() {
    let mut rp = RegParams::new("preorder_files");
    let dir = tempfile::tempdir().unwrap();

    let image = load_test_image("blocks.ppm").unwrap();
    let tree = build_quadtree(&image, 25.0).unwrap();

    let qt_path = dir.path().join("blocks.qt");
    dump_preorder(&tree, &qt_path).unwrap();
    let loaded = load_preorder(&qt_path).unwrap();
    rp.compare_values(1.0, flag(loaded == tree), 0.0);

    let ppm_path = dir.path().join("blocks.ppm");
    flatten_to_ppm(&loaded, &ppm_path).unwrap();
    let rendered = quadpix_io::read_image(&ppm_path).unwrap();
    rp.compare_image(&rendered, &tree.render().unwrap());

    assert!(rp.cleanup(), "preorder files regression test failed");
}
