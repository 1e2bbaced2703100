//! Tests for range fill, grid projection, edit translation and the keymap.

use std::cell::RefCell;
use std::rc::Rc;

use mapgrid_core::{
  Catalog, Session,
  entity::{Study, Variable, VariableKind},
  mapping::{NORMALIZED, RAW},
};
use proptest::prelude::*;

use crate::{
  Assignment, CellEdit, CellRange, Command, DroppedFile, Error, FileDrop, Focus,
  GridAdapter, GridColumn, GridRow, KeyCombo, Keymap, LABEL_PROP, LiveFrame,
  Orientation, apply_files_to_range,
};

fn rows(ids: &[&str]) -> Vec<GridRow> {
  ids
    .iter()
    .map(|id| GridRow {
      id:    (*id).into(),
      label: (*id).into(),
    })
    .collect()
}

fn columns(props: &[&str]) -> Vec<GridColumn> {
  props
    .iter()
    .map(|p| GridColumn {
      prop:       (*p).into(),
      header:     (*p).into(),
      structural: false,
    })
    .collect()
}

fn files(names: &[&str]) -> Vec<DroppedFile> {
  names.iter().map(|n| DroppedFile::named(*n)).collect()
}

fn session() -> Session {
  let mut c = Catalog::new();
  c.entities.add_study(Study::with_id("s1", "Bearing wear")).unwrap();
  c.entities.add_study(Study::with_id("s2", "Gear pitting")).unwrap();
  c.entities
    .add_variable(Variable::with_id("v1", "Load", VariableKind::OperationalCondition))
    .unwrap();
  c.entities
    .add_variable(Variable::with_id("v2", "Speed", VariableKind::OperationalCondition))
    .unwrap();
  Session::new(c)
}

fn edit(row_index: usize, column_id: &str, new_value: &str) -> CellEdit {
  CellEdit {
    row_index,
    column_id: column_id.into(),
    new_value: new_value.into(),
    old_value: String::new(),
  }
}

// ─── Range fill ──────────────────────────────────────────────────────────────

#[test]
fn fill_walks_row_major_and_stops_when_items_run_out() {
  let out = apply_files_to_range(
    Some(&CellRange::span(0, 0, 1, 1)),
    Some(rows(&["r1", "r2", "r3"]).as_slice()),
    Some(columns(&["c1", "c2", "c3"]).as_slice()),
    Some(files(&["a.txt", "b.txt", "c.txt"]).as_slice()),
  );
  assert_eq!(
    out,
    vec![
      Assignment::new("r1", "c1", "a.txt"),
      Assignment::new("r1", "c2", "b.txt"),
      Assignment::new("r2", "c1", "c.txt"),
    ],
  );
}

#[test]
fn fill_prefers_relative_path_over_name() {
  let out = apply_files_to_range(
    Some(&CellRange::cell(0, 0)),
    Some(rows(&["r1"]).as_slice()),
    Some(columns(&["c1"]).as_slice()),
    Some(vec![DroppedFile::at_path("a.txt", "dir/sub/a.txt")].as_slice()),
  );
  assert_eq!(out, vec![Assignment::new("r1", "c1", "dir/sub/a.txt")]);
}

#[test]
fn fill_falls_back_to_name_for_empty_relative_path() {
  let out = apply_files_to_range(
    Some(&CellRange::cell(0, 0)),
    Some(rows(&["r1"]).as_slice()),
    Some(columns(&["c1"]).as_slice()),
    Some(vec![DroppedFile::at_path("a.txt", "")].as_slice()),
  );
  assert_eq!(out[0].value, "a.txt");
}

#[test]
fn fill_with_any_missing_input_is_empty() {
  let range = CellRange::span(0, 0, 1, 1);
  let r = rows(&["r1", "r2"]);
  let c = columns(&["c1", "c2"]);
  let f = files(&["a", "b"]);

  let (r, c, f) = (Some(r.as_slice()), Some(c.as_slice()), Some(f.as_slice()));

  assert!(apply_files_to_range(None, r, c, f).is_empty());
  assert!(apply_files_to_range(Some(&range), None, c, f).is_empty());
  assert!(apply_files_to_range(Some(&range), r, None, f).is_empty());
  assert!(apply_files_to_range(Some(&range), r, c, None).is_empty());
}

#[test]
fn fill_normalizes_reversed_corners() {
  let out = apply_files_to_range(
    Some(&CellRange::span(1, 1, 0, 0)),
    Some(rows(&["r1", "r2"]).as_slice()),
    Some(columns(&["c1", "c2"]).as_slice()),
    Some(files(&["a", "b", "c", "d"]).as_slice()),
  );
  let cells: Vec<_> = out.iter().map(|a| (a.row_id.as_str(), a.column_id.as_str())).collect();
  assert_eq!(cells, vec![("r1", "c1"), ("r1", "c2"), ("r2", "c1"), ("r2", "c2")]);
}

#[test]
fn fill_leaves_extra_cells_unassigned_and_ignores_extra_items() {
  let r = rows(&["r1", "r2"]);
  let c = columns(&["c1", "c2"]);

  let short = apply_files_to_range(
    Some(&CellRange::span(0, 0, 1, 1)),
    Some(r.as_slice()),
    Some(c.as_slice()),
    Some(files(&["only"]).as_slice()),
  );
  assert_eq!(short, vec![Assignment::new("r1", "c1", "only")]);

  let long = apply_files_to_range(
    Some(&CellRange::cell(1, 1)),
    Some(r.as_slice()),
    Some(c.as_slice()),
    Some(files(&["x", "y", "z"]).as_slice()),
  );
  assert_eq!(long, vec![Assignment::new("r2", "c2", "x")]);
}

#[test]
fn fill_clips_cells_outside_the_grid() {
  let out = apply_files_to_range(
    Some(&CellRange::span(-1, -1, 5, 0)),
    Some(rows(&["r1"]).as_slice()),
    Some(columns(&["c1", "c2"]).as_slice()),
    Some(files(&["a", "b", "c"]).as_slice()),
  );
  assert_eq!(
    out,
    vec![Assignment::new("r1", "c1", "a"), Assignment::new("r1", "c2", "b")],
  );

  let off_grid = apply_files_to_range(
    Some(&CellRange::cell(7, 7)),
    Some(rows(&["r1"]).as_slice()),
    Some(columns(&["c1"]).as_slice()),
    Some(files(&["a"]).as_slice()),
  );
  assert!(off_grid.is_empty());
}

#[test]
fn drop_event_deserializes_browser_shape() {
  let raw = r#"{
    "range": { "x": 1, "y": 0 },
    "files": [{ "name": "a.txt", "relativePath": "run1/a.txt" }, { "name": "b.txt" }]
  }"#;
  let drop: FileDrop = serde_json::from_str(raw).unwrap();
  assert_eq!(drop.range, CellRange::cell(1, 0));
  assert_eq!(drop.files[0].value(), "run1/a.txt");
  assert_eq!(drop.files[1].value(), "b.txt");

  let edit: CellEdit =
    serde_json::from_str(r#"{ "rowIndex": 2, "prop": "v1", "newValue": "3" }"#).unwrap();
  assert_eq!(edit.row_index, 2);
  assert_eq!(edit.column_id, "v1");
  assert_eq!(edit.old_value, "");
}

// ─── Projection ──────────────────────────────────────────────────────────────

#[test]
fn project_studies_as_rows() {
  let mut s = session();
  s.mutate("seed", |c| {
    c.mappings.upsert_value("s1", "v2", RAW, "1200");
    c.mappings.upsert_value("s2", "v1", NORMALIZED, "0.5");
  });

  let frame = GridAdapter::new(Orientation::StudiesAsRows, RAW).project(s.catalog());
  assert_eq!(frame.row_count(), 2);
  assert_eq!(frame.column_count(), 3);
  assert_eq!(frame.columns[0].prop, LABEL_PROP);
  assert!(frame.columns[0].structural);
  assert_eq!(frame.cell(0, 0), "Bearing wear");
  assert_eq!(frame.cell(0, 2), "1200");
  assert_eq!(frame.cell(1, 1), "");
  assert_eq!(frame.cell(9, 9), "");

  let normalized =
    GridAdapter::new(Orientation::StudiesAsRows, NORMALIZED).project(s.catalog());
  assert_eq!(normalized.cell(1, 1), "0.5");
}

#[test]
fn project_variables_as_rows_transposes() {
  let mut s = session();
  s.mutate("seed", |c| c.mappings.upsert_value("s1", "v2", RAW, "1200"));

  let frame = GridAdapter::new(Orientation::VariablesAsRows, RAW).project(s.catalog());
  assert_eq!(frame.rows[1].id, "v2");
  assert_eq!(frame.columns[1].prop, "s1");
  assert_eq!(frame.columns[0].header, "Variable");
  assert_eq!(frame.cell(1, 1), "1200");
}

// ─── Edits ───────────────────────────────────────────────────────────────────

#[test]
fn single_edit_writes_value_key_and_is_undoable() {
  let mut s = session();
  let adapter = GridAdapter::new(Orientation::StudiesAsRows, NORMALIZED);

  assert!(adapter.apply_edit(&mut s, &edit(1, "v2", "0.02")));
  assert_eq!(s.catalog().mappings.get_value("s2", "v2", NORMALIZED), "0.02");
  assert_eq!(s.catalog().mappings.raw("s2", "v2"), "");
  assert_eq!(s.history().undo_depth(), 1);

  assert!(s.undo());
  assert!(s.catalog().mappings.find("s2", "v2").is_none());
}

#[test]
fn edit_in_transposed_grid_targets_the_right_pair() {
  let mut s = session();
  let adapter = GridAdapter::new(Orientation::VariablesAsRows, RAW);
  assert!(adapter.apply_edit(&mut s, &edit(0, "s2", "7")));
  assert_eq!(s.catalog().mappings.raw("s2", "v1"), "7");
}

#[test]
fn structural_and_unresolvable_edits_are_skipped_without_history() {
  let mut s = session();
  let adapter = GridAdapter::default();

  assert!(!adapter.apply_edit(&mut s, &edit(0, LABEL_PROP, "renamed")));
  assert!(!adapter.apply_edit(&mut s, &edit(5, "v1", "x")));
  assert!(!adapter.apply_edit(&mut s, &edit(0, "v404", "x")));
  assert!(!adapter.apply_edit(&mut s, &edit(0, "s1", "x")));

  assert!(!s.history().can_undo());
  assert!(s.catalog().mappings.is_empty());
}

#[test]
fn batch_is_one_undo_step() {
  let mut s = session();
  let adapter = GridAdapter::default();
  let batch = vec![
    edit(0, "v1", "1"),
    edit(0, LABEL_PROP, "ignored"),
    edit(1, "v2", "2"),
  ];

  assert_eq!(adapter.apply_batch(&mut s, &batch), 2);
  assert_eq!(s.history().undo_depth(), 1);
  assert_eq!(s.catalog().mappings.raw("s1", "v1"), "1");
  assert_eq!(s.catalog().mappings.raw("s2", "v2"), "2");

  s.undo();
  assert!(s.catalog().mappings.is_empty());
  assert!(!s.history().can_undo());
}

#[test]
fn empty_batch_records_nothing() {
  let mut s = session();
  let adapter = GridAdapter::default();
  assert_eq!(adapter.apply_batch(&mut s, &[]), 0);
  assert_eq!(adapter.apply_batch(&mut s, &[edit(0, LABEL_PROP, "x")]), 0);
  assert!(!s.history().can_undo());
}

#[test]
fn batch_edit_preserves_other_value_keys() {
  let mut s = session();
  s.mutate("seed", |c| c.mappings.upsert_value("s1", "v1", NORMALIZED, "0.02"));

  GridAdapter::default().apply_batch(&mut s, &[edit(0, "v1", "2")]);
  assert_eq!(s.catalog().mappings.raw("s1", "v1"), "2");
  assert_eq!(s.catalog().mappings.get_value("s1", "v1", NORMALIZED), "0.02");
}

#[test]
fn drop_fills_range_skipping_label_column() {
  let mut s = session();
  let adapter = GridAdapter::default();
  // Columns: [label, v1, v2]; the range starts on the label column.
  let drop = FileDrop {
    range: CellRange::span(0, 0, 2, 1),
    files: files(&["label.txt", "a.txt", "b.txt", "skip.txt", "c.txt"]),
  };

  assert_eq!(adapter.apply_drop(&mut s, &drop), 3);
  let m = &s.catalog().mappings;
  assert_eq!(m.raw("s1", "v1"), "a.txt");
  assert_eq!(m.raw("s1", "v2"), "b.txt");
  assert_eq!(m.raw("s2", "v1"), "c.txt");
  assert_eq!(m.raw("s2", "v2"), "");
  assert_eq!(s.history().undo_depth(), 1);
}

#[test]
fn live_frame_tracks_commits() {
  let mut s = session();
  let frame = LiveFrame::attach(&mut s, GridAdapter::default());
  assert_eq!(frame.borrow().cell(0, 1), "");

  GridAdapter::default().apply_edit(&mut s, &edit(0, "v1", "42"));
  assert_eq!(frame.borrow().cell(0, 1), "42");

  s.undo();
  assert_eq!(frame.borrow().cell(0, 1), "");

  s.mutate("delete", |c| c.delete_study("s1"));
  assert_eq!(frame.borrow().row_count(), 1);
  assert_eq!(frame.borrow().cell(0, 0), "Gear pitting");
}

#[test]
fn observer_closure_sees_committed_state() {
  let mut s = session();
  let seen: Rc<RefCell<Vec<String>>> = Rc::default();
  let sink = Rc::clone(&seen);
  s.subscribe(move |c: &Catalog, _: &mapgrid_core::Commit| {
    sink.borrow_mut().push(c.mappings.raw("s2", "v1").to_owned());
  });

  GridAdapter::default().apply_edit(&mut s, &edit(1, "v1", "x"));
  assert_eq!(*seen.borrow(), vec!["x".to_owned()]);
}

// ─── Keymap ──────────────────────────────────────────────────────────────────

#[test]
fn key_combos_parse_case_insensitively() {
  let combo: KeyCombo = "Ctrl+Shift+Z".parse().unwrap();
  assert!(combo.ctrl && combo.shift && !combo.alt);
  assert_eq!(combo.key, "z");
  assert_eq!(combo.to_string(), "ctrl+shift+z");

  assert!(matches!("ctrl+".parse::<KeyCombo>(), Err(Error::InvalidKeyCombo(_))));
  assert!(matches!("hyper+z".parse::<KeyCombo>(), Err(Error::InvalidKeyCombo(_))));
}

#[test]
fn default_keymap_and_focus_suppression() {
  let keymap = Keymap::default();
  let undo: KeyCombo = "ctrl+z".parse().unwrap();
  let redo: KeyCombo = "ctrl+y".parse().unwrap();

  assert_eq!(keymap.dispatch(&undo, Focus::Grid), Some(Command::Undo));
  assert_eq!(keymap.dispatch(&redo, Focus::Grid), Some(Command::Redo));
  assert_eq!(keymap.dispatch(&undo, Focus::TextInput), None);
  assert_eq!(keymap.dispatch(&"z".parse().unwrap(), Focus::Grid), None);
}

#[test]
fn keymap_overrides() {
  let keymap = Keymap::with_overrides([("ctrl+shift+z", "redo")]).unwrap();
  assert_eq!(
    keymap.dispatch(&"ctrl+shift+z".parse().unwrap(), Focus::Grid),
    Some(Command::Redo),
  );
  assert_eq!(
    keymap.dispatch(&"ctrl+z".parse().unwrap(), Focus::Grid),
    Some(Command::Undo),
  );

  assert!(matches!(
    Keymap::with_overrides([("ctrl+q", "quit")]),
    Err(Error::UnknownCommand(_))
  ));
}

#[test]
fn commands_drive_session_history() {
  let mut s = session();
  assert!(!Command::Undo.apply(&mut s));

  GridAdapter::default().apply_edit(&mut s, &edit(0, "v1", "1"));
  assert!(Command::Undo.apply(&mut s));
  assert!(Command::Redo.apply(&mut s));
  assert_eq!(s.catalog().mappings.raw("s1", "v1"), "1");
}

// ─── Properties ──────────────────────────────────────────────────────────────

proptest! {
  #[test]
  fn full_range_with_matching_items_is_row_major(
    width in 1usize..6,
    height in 1usize..6,
    x in 0usize..4,
    y in 0usize..4,
  ) {
    let row_ids: Vec<String> = (0..y + height).map(|i| format!("r{i}")).collect();
    let col_ids: Vec<String> = (0..x + width).map(|i| format!("c{i}")).collect();
    let r = rows(&row_ids.iter().map(String::as_str).collect::<Vec<_>>());
    let c = columns(&col_ids.iter().map(String::as_str).collect::<Vec<_>>());
    let n = width * height;
    let items: Vec<DroppedFile> = (0..n).map(|i| DroppedFile::named(i.to_string())).collect();

    let range = CellRange::span(
      x as i64,
      y as i64,
      (x + width - 1) as i64,
      (y + height - 1) as i64,
    );
    let out = apply_files_to_range(Some(&range), Some(r.as_slice()), Some(c.as_slice()), Some(items.as_slice()));

    prop_assert_eq!(out.len(), n);
    for (i, a) in out.iter().enumerate() {
      prop_assert_eq!(&a.row_id, &format!("r{}", y + i / width));
      prop_assert_eq!(&a.column_id, &format!("c{}", x + i % width));
      prop_assert_eq!(&a.value, &i.to_string());
    }
  }
}
