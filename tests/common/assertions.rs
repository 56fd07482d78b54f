//! Assertion helpers for tests.

use mapfill::models::ColorKey;
use pretty_assertions::assert_eq;
use quad_paint::{verify, ColorGrid, Marker};

/// Parse `/fill` lines back into markers.
///
/// Panics on any line that is not a well-formed command for `key`.
pub fn parse_fill_commands(text: &str, key: &ColorKey, namespace: &str) -> Vec<Marker> {
    text.lines()
        .map(|line| {
            let parts: Vec<&str> = line.split(' ').collect();
            assert_eq!(parts.len(), 8, "malformed command: {line}");
            assert_eq!(parts[0], "/fill");

            let coord = |s: &str| -> i64 {
                s.strip_prefix('~')
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(|| panic!("bad coordinate {s:?} in {line}"))
            };
            assert_eq!(coord(parts[2]), coord(parts[5]), "y differs in {line}");

            let block = parts[7]
                .strip_prefix(&format!("{namespace}:"))
                .unwrap_or_else(|| panic!("wrong namespace in {line}"));
            let color = key
                .entries()
                .iter()
                .position(|e| e.name == block)
                .unwrap_or_else(|| panic!("unknown block {block}"));

            Marker::new(
                coord(parts[3]) as usize,
                coord(parts[1]) as usize,
                coord(parts[6]) as usize,
                coord(parts[4]) as usize,
                color as u16,
            )
        })
        .collect()
}

/// Assert that replaying the commands reproduces `grid`
pub fn assert_commands_reproduce(text: &str, key: &ColorKey, namespace: &str, grid: &ColorGrid) {
    let markers = parse_fill_commands(text, key, namespace);
    let result = verify(grid, &markers);
    assert!(
        result.is_pass(),
        "Replay of {} commands differs at {} cell(s), first {:?}",
        markers.len(),
        result.mismatches().len(),
        result.first()
    );
}

/// Assert bytes are a PNG image
pub fn assert_png(bytes: &[u8]) {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    assert!(
        bytes.starts_with(&SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}
