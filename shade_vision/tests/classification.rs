use shade_vision::{
    ClassifierConfig, DarknessClassifier, Frame, ParallelClassifier, Pixel, Verdict, is_dark,
};

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Builds a buffer with `dark` black pixels and the rest white, placed by `order`.
fn arranged(order: &[usize], dark: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; order.len() * 4];
    for (rank, &slot) in order.iter().enumerate() {
        let pixel = if rank < dark { BLACK } else { WHITE };
        bytes[slot * 4..slot * 4 + 4].copy_from_slice(&pixel);
    }
    bytes
}

/// Deterministic permutation of `0..len` (Fisher-Yates over a fixed LCG).
fn permutation(len: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    let mut order: Vec<usize> = (0..len).collect();
    for i in (1..len).rev() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let j = (state >> 33) as usize % (i + 1);
        order.swap(i, j);
    }
    order
}

#[test_log::test]
fn ten_by_ten_scenario() {
    let identity: Vec<usize> = (0..100).collect();
    assert!(is_dark(&arranged(&identity, 46), 10, 10));
    assert!(!is_dark(&arranged(&identity, 45), 10, 10));
}

#[test_log::test]
fn solid_frames() {
    let white = WHITE.repeat(64 * 64);
    let black = BLACK.repeat(64 * 64);
    assert!(!is_dark(&white, 64, 64));
    assert!(is_dark(&black, 64, 64));
}

#[test_log::test]
fn verdict_depends_only_on_dark_count() {
    let classifier = DarknessClassifier::default();
    let threshold = classifier.config().dark_pixel_threshold(12 * 7);

    for seed in 1..=20 {
        let order = permutation(12 * 7, seed);
        assert!(!classifier.is_dark(&arranged(&order, threshold), 12, 7), "seed {seed}");
        assert!(classifier.is_dark(&arranged(&order, threshold + 1), 12, 7), "seed {seed}");
    }
}

#[test_log::test]
fn short_circuit_agrees_with_full_count() {
    let classifier = DarknessClassifier::default();
    let parallel = ParallelClassifier::default()
        .with_workers(3)
        .with_min_pixels_per_worker(1);

    for (seed, (width, height)) in [(1u32, 1u32), (2, 1), (3, 3), (10, 10), (17, 5), (31, 29)]
        .into_iter()
        .enumerate()
    {
        let total = (width * height) as usize;
        let order = permutation(total, seed as u64 + 7);
        for dark in 0..=total {
            let bytes = arranged(&order, dark);
            let frame = Frame::new(&bytes, width, height).unwrap();
            let reference =
                classifier.count_dark_pixels(&frame) > classifier.config().dark_pixel_threshold(total);

            assert_eq!(classifier.classify_frame(&frame).is_dark(), reference);
            assert_eq!(parallel.is_dark_frame(&frame), reference);
        }
    }
}

#[test_log::test]
fn mixed_luminance_counts_by_cutoff() {
    // Saturated blue (~29.1) and saturated green (~149.7) fall under the cutoff; yellow does not.
    let pixels = [
        Pixel::new(0, 0, 255, 255),
        Pixel::new(0, 255, 0, 255),
        Pixel::new(255, 255, 0, 255),
        Pixel::new(0, 0, 255, 255),
    ];
    let bytes: Vec<u8> = pixels.iter().flat_map(|p| p.to_bytes()).collect();
    let classifier = DarknessClassifier::default();
    let frame = Frame::new(&bytes, 2, 2).unwrap();

    assert_eq!(classifier.count_dark_pixels(&frame), 3);
    // floor(4 * 0.45) == 1, so the scan stops at the second dark pixel.
    assert_eq!(
        classifier.classify(&bytes, 2, 2),
        Verdict::Dark {
            dark_pixels: 2,
            scanned_pixels: 2
        }
    );
}

#[test_log::test]
fn fail_soft_on_bad_input() {
    let black = BLACK.repeat(6);
    assert!(!is_dark(&[], 0, 0));
    assert!(!is_dark(&[], 3, 2));
    assert!(!is_dark(&black, 2, 2));
    assert!(!is_dark(&black[..23], 3, 2));
    assert!(!is_dark(&black, u32::MAX, u32::MAX));
    assert!(is_dark(&black, 3, 2));
}

#[test_log::test]
fn tuned_policy() {
    let gray = Pixel::gray(180).to_bytes().repeat(9);
    assert!(!is_dark(&gray, 3, 3));

    let config = ClassifierConfig::default().with_luminance_cutoff(200.0).unwrap();
    let classifier = DarknessClassifier::new(config).unwrap();
    assert!(classifier.is_dark(&gray, 3, 3));
}

#[cfg(feature = "serde")]
#[test]
fn config_from_json() {
    let config: ClassifierConfig = serde_json::from_str(r#"{ "luminance_cutoff": 128.0 }"#).unwrap();
    assert_eq!(config.luminance_cutoff, 128.0);
    assert_eq!(config.dark_pixel_budget, shade_vision::DEFAULT_DARK_PIXEL_BUDGET);
    assert!(config.validate().is_ok());
}
