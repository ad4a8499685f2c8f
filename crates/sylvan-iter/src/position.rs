//! Position conversion helpers.
//!
//! Tree-sitter points are zero-based; everything this crate reports to people
//! is one-based.

/// Converts a zero-based Tree-sitter point to one-based `(line, column)`.
#[must_use]
pub fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}
