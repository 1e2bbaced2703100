//! Terminal rendering of projected frames.

use comfy_table::{
  Attribute, Cell, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
  presets::UTF8_FULL_CONDENSED,
};
use mapgrid_grid::Frame;

/// Lay a frame out as a table. Empty cells render as a dim `·` so sparse
/// grids stay readable.
pub fn frame_table(frame: &Frame) -> Table {
  let mut table = Table::new();
  table
    .load_preset(UTF8_FULL_CONDENSED)
    .apply_modifier(UTF8_ROUND_CORNERS)
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_header(
      frame
        .columns
        .iter()
        .map(|c| Cell::new(&c.header).add_attribute(Attribute::Bold)),
    );

  for row in 0..frame.row_count() {
    table.add_row((0..frame.column_count()).map(|col| {
      match frame.cell(row, col) {
        "" => Cell::new("·").add_attribute(Attribute::Dim),
        text => Cell::new(text),
      }
    }));
  }
  table
}

/// One key per line, reserved keys first.
pub fn value_keys(keys: &[String]) -> String { keys.join("\n") }
