//! Shared fixtures for the idnakit benchmarks

use std::path::PathBuf;

use idnakit::{IdnaConfig, IdnaContext};
use idnakit_core::CodePointRange;

/// The sample UCD shipped under `data/ucd-sample`.
pub fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/ucd-sample")
}

pub fn sample_context() -> IdnaContext {
    let config = IdnaConfig::default().with_data_dir(sample_data_dir());
    match IdnaContext::build(&config) {
        Ok(ctx) => ctx,
        Err(e) => panic!("cannot build benchmark context: {e}"),
    }
}

/// Labels of increasing length, with and without contextual code points.
pub fn sample_labels() -> Vec<(&'static str, Vec<u32>)> {
    [
        ("ascii", "example"),
        ("latin", "\u{e9}t\u{e9}-caf\u{e9}"),
        ("middle-dot", "paral\u{b7}lel"),
        ("katakana", "\u{30a2}\u{30fb}\u{30a2}"),
        ("zwnj", "\u{628}\u{64b}\u{200c}\u{627}"),
        ("han", "\u{4e2d}\u{6587}\u{7f51}\u{7edc}"),
    ]
    .into_iter()
    .map(|(name, label)| (name, label.chars().map(u32::from).collect()))
    .collect()
}

/// `count` disjoint ranges spread evenly over the BMP.
pub fn spread_ranges(count: u32) -> Vec<CodePointRange> {
    let stride = 0x1_0000 / count.max(1);
    (0..count)
        .map(|i| {
            let first = i * stride;
            CodePointRange::new(first, first + stride / 2)
        })
        .collect()
}
