//! Where the story's images and fonts live on disk.
//!
//! ```text
//! assets/
//!   map/israel_map.png | israel_map.svg
//!   logos/ims_logo.png, mot_logo.png
//!   weather_icons_v2/<icon>.png
//! fonts/
//!   NotoSansHebrew-*.ttf, OpenSans-Variable.ttf
//! ```

use std::path::{Path, PathBuf};

/// Heavy face, most complete first. The static Black subset has no digits,
/// so it only comes after both complete files.
const HEAVY_FONTS: [&str; 4] = [
    "NotoSansHebrew-Black-Complete.ttf",
    "NotoSansHebrew-Variable-Complete.ttf",
    "NotoSansHebrew-Black.ttf",
    "OpenSans-Variable.ttf",
];

/// Temperatures are mostly digits, so the complete files lead here too.
const SEMIBOLD_FONTS: [&str; 3] = [
    "NotoSansHebrew-Variable-Complete.ttf",
    "NotoSansHebrew-SemiBold.ttf",
    "OpenSans-Variable.ttf",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AssetPaths {
    pub map_png: PathBuf,
    pub map_svg: PathBuf,
    pub icons_dir: PathBuf,
    /// Drawn left to right in this order.
    pub logos: Vec<PathBuf>,
    pub heavy_fonts: Vec<PathBuf>,
    pub semibold_fonts: Vec<PathBuf>,
}

impl AssetPaths {
    pub fn from_root(assets_dir: &Path, fonts_dir: &Path) -> Self {
        let map_dir = assets_dir.join("map");
        let logos_dir = assets_dir.join("logos");
        let fonts = |names: &[&str]| names.iter().map(|n| fonts_dir.join(n)).collect();

        Self {
            map_png: map_dir.join("israel_map.png"),
            map_svg: map_dir.join("israel_map.svg"),
            icons_dir: assets_dir.join("weather_icons_v2"),
            logos: vec![logos_dir.join("ims_logo.png"), logos_dir.join("mot_logo.png")],
            heavy_fonts: fonts(&HEAVY_FONTS),
            semibold_fonts: fonts(&SEMIBOLD_FONTS),
        }
    }

    /// The PNG map if present, else the SVG one.
    pub fn map_path(&self) -> Option<&Path> {
        [&self.map_png, &self.map_svg]
            .into_iter()
            .find(|p| p.is_file())
            .map(PathBuf::as_path)
    }

    pub fn icon_path(&self, file_name: &str) -> PathBuf {
        self.icons_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{solid_image, write_png_asset};

    #[test]
    fn test_layout_under_root() {
        let assets = AssetPaths::from_root(Path::new("/p/assets"), Path::new("/p/fonts"));
        assert_eq!(assets.map_png, PathBuf::from("/p/assets/map/israel_map.png"));
        assert_eq!(
            assets.icon_path("clear.png"),
            PathBuf::from("/p/assets/weather_icons_v2/clear.png")
        );
        assert_eq!(
            assets.heavy_fonts[0],
            PathBuf::from("/p/fonts/NotoSansHebrew-Black-Complete.ttf")
        );
        assert_eq!(assets.logos.len(), 2);
    }

    #[test]
    fn test_map_prefers_png_then_svg() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetPaths::from_root(dir.path(), dir.path());
        assert_eq!(assets.map_path(), None);

        std::fs::create_dir_all(dir.path().join("map")).unwrap();
        std::fs::write(&assets.map_svg, test_utils::simple_svg(10, 20, "#000000")).unwrap();
        assert_eq!(assets.map_path(), Some(assets.map_svg.as_path()));

        write_png_asset(dir.path(), "map/israel_map.png", &solid_image(2, 2, [0, 0, 0, 255]));
        assert_eq!(assets.map_path(), Some(assets.map_png.as_path()));
    }
}
