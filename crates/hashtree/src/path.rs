//! Human-readable rendering of lookup paths
//!
//! Used only for diagnostics; lookups never compare rendered paths.

use hashtree_types::Label;
use std::fmt::Write;

/// Render a path as `/label/label/...`
///
/// Each label is written as text when it is printable ASCII and as lowercase
/// hex otherwise. The empty path renders as the empty string.
pub fn render_path(path: &[Label]) -> String {
    let mut rendered = String::new();
    for label in path {
        // writing into a String cannot fail
        let _ = write!(rendered, "/{}", label);
    }
    rendered
}
