//! JSON renderer over the document tree.

use super::assemble::ReportTree;

/// Renders the document tree as pretty-printed JSON.
///
/// Field order follows the struct declarations and grouping follows the
/// tree, so identical trees render to identical bytes.
#[must_use]
pub fn render(tree: &ReportTree) -> String {
    // ReportTree contains no map types, so serialization cannot fail.
    serde_json::to_string_pretty(tree).unwrap_or_default()
}
