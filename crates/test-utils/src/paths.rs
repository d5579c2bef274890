//! Locating optional test assets.
//!
//! Fonts, logos and the map are deployment assets and are not checked in.

use std::path::{Path, PathBuf};

/// System font directories searched last, so DejaVu or Noto installed by the
/// distribution can stand in for the Hebrew fonts.
const SYSTEM_FONT_DIRS: [&str; 2] = [
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/truetype/noto",
];

/// The workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .nth(2)
        .unwrap_or(manifest)
        .to_path_buf()
}

/// Directories searched by [`find_test_file`], in order.
///
/// `TEST_DATA_DIR` comes first when set, then `testdata/`, `fonts/` and
/// `assets/` under the workspace root, then the system font directories.
pub fn search_dirs() -> Vec<PathBuf> {
    let root = workspace_root();
    std::env::var_os("TEST_DATA_DIR")
        .map(PathBuf::from)
        .into_iter()
        .chain(["testdata", "fonts", "assets"].map(|d| root.join(d)))
        .chain(SYSTEM_FONT_DIRS.map(PathBuf::from))
        .collect()
}

/// First existing `dir/name` over [`search_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    search_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// Fresh temporary directory, removed on drop.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("forecast_story_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}
