//! Test support shared by every crate in the forecast story workspace.
//!
//! - [`fixtures`]: small IMS cities and country feeds
//! - [`generators`]: synthetic maps, logos and icons
//! - [`paths`]: lookup of optional assets such as fonts
//!
//! Fonts and artwork are not part of the repository, so tests that need them
//! call [`require_test_file!`] and return early when the file is absent.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve an optional test file or return from the calling test.
///
/// ```ignore
/// let font = test_utils::require_test_file!("DejaVuSans.ttf");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: '{}' not available (searched TEST_DATA_DIR, testdata/, fonts/, assets/ and system fonts)",
                    $name
                );
                return;
            }
        }
    }};
}

/// Assert two numbers differ by at most `epsilon`, compared as `f64`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        if (left - right).abs() > epsilon {
            panic!(
                "assertion failed: {} is not within {} of {} (diff {})",
                left,
                epsilon,
                right,
                (left - right).abs()
            );
        }
    }};
}
