mod common;

use common::{TestWorkspace, table};
use csvop::{
    AddColumnRequest, add_column,
    columns::ColumnSelector,
    confirm::OverwritePolicy,
    data::Cell,
    drop_column,
    error::OpError,
    io_utils::FileOutput,
    merge,
    operation::Calc,
    position_column, rename_column, select_columns,
    writer::{WriteOutcome, WriteReport},
};

const ABC: &str = "a,b,c\n0,0,0\n1,2,3\n";

fn sum() -> Calc {
    Calc::new("sum", |row| {
        let mut total = 0i64;
        for cell in row {
            match cell {
                Cell::Integer(i) => total += i,
                other => return Err(format!("not a number: {other}")),
            }
        }
        Ok(Cell::Integer(total))
    })
}

fn written(rows_written: usize, columns: usize) -> WriteOutcome {
    WriteOutcome::Written(WriteReport {
        rows_written,
        columns,
    })
}

#[test]
fn add_column_at_index_inserts_empty_default() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    let outcome = add_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        AddColumnRequest {
            index: Some(1),
            name: Some("x".into()),
            ..Default::default()
        },
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("add column");

    assert_eq!(outcome, written(3, 4));
    assert_eq!(
        ws.read_table("out.csv"),
        table(&[&["a", "x", "b", "c"], &["0", "", "0", "0"], &["1", "", "2", "3"]])
    );
}

#[test]
fn add_column_appends_default_value() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    add_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        AddColumnRequest {
            name: Some("foo".into()),
            default_value: Some("asdf".into()),
            ..Default::default()
        },
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("add column");

    assert_eq!(
        ws.read_table("out.csv"),
        table(&[
            &["a", "b", "c", "foo"],
            &["0", "0", "0", "asdf"],
            &["1", "2", "3", "asdf"]
        ])
    );
}

#[test]
fn add_calculated_column_sums_coerced_row() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    add_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        AddColumnRequest {
            name: Some("sum".into()),
            calc: Some(sum()),
            ..Default::default()
        },
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("add calculated column");

    assert_eq!(ws.read("out.csv"), "a,b,c,sum\n0,0,0,0\n1,2,3,6\n");
}

#[test]
fn add_column_without_name_uses_default_for_header() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    add_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        AddColumnRequest {
            index: Some(0),
            default_value: Some("z".into()),
            ..Default::default()
        },
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("add column");

    assert_eq!(ws.read("out.csv"), "z,a,b,c\nz,0,0,0\nz,1,2,3\n");
}

#[test]
fn add_column_past_header_end_is_rejected_before_writing() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    let err = add_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        AddColumnRequest {
            index: Some(4),
            ..Default::default()
        },
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .unwrap_err();

    assert!(matches!(err, OpError::InvalidArgument(_)));
    assert!(!ws.file("out.csv").exists());
}

#[test]
fn drop_column_by_index_and_by_name() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", "a,b,c\n");

    drop_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("by_index.csv")),
        &ColumnSelector::Index(1),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("drop by index");
    assert_eq!(ws.read("by_index.csv"), "a,c\n");

    drop_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("by_name.csv")),
        &ColumnSelector::Name("c".into()),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("drop by name");
    assert_eq!(ws.read("by_name.csv"), "a,b\n");
}

#[test]
fn drop_unknown_column_is_lookup_failure() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    let err = drop_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        &ColumnSelector::Name("missing".into()),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, OpError::ColumnNotFound { ref name } if name == "missing"));
    assert!(!ws.file("out.csv").exists());
}

#[test]
fn drop_index_out_of_bounds_is_invalid() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    let err = drop_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        &ColumnSelector::Index(3),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, OpError::InvalidArgument(_)));
}

#[test]
fn rename_by_index_and_name() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);

    rename_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("by_index.csv")),
        "foo",
        &ColumnSelector::Index(1),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("rename by index");
    assert_eq!(ws.read("by_index.csv"), "a,foo,c\n0,0,0\n1,2,3\n");

    rename_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("by_name.csv")),
        "foo",
        &ColumnSelector::Name("a".into()),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("rename by name");
    assert_eq!(ws.read("by_name.csv"), "foo,b,c\n0,0,0\n1,2,3\n");
}

#[test]
fn rename_twice_matches_rename_once() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    let mut policy = OverwritePolicy::AlwaysConfirm;

    rename_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("once.csv")),
        "renamed",
        &ColumnSelector::Index(2),
        &mut policy,
    )
    .expect("first rename");
    rename_column(
        ws.source("once.csv"),
        &FileOutput::new(ws.file("twice.csv")),
        "renamed",
        &ColumnSelector::Index(2),
        &mut policy,
    )
    .expect("second rename");

    assert_eq!(ws.read("once.csv"), ws.read("twice.csv"));
}

#[test]
fn position_moves_columns_both_ways() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", "a,b,c\n");

    position_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("left.csv")),
        0,
        &ColumnSelector::Index(2),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("move left");
    assert_eq!(ws.read("left.csv"), "c,a,b\n");

    position_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("right.csv")),
        1,
        &ColumnSelector::Name("a".into()),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("move right");
    assert_eq!(ws.read("right.csv"), "b,a,c\n");
}

#[test]
fn position_target_out_of_bounds_is_invalid() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", "a,b,c\n");
    let err = position_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        3,
        &ColumnSelector::Index(0),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, OpError::InvalidArgument(_)));
}

fn merge_fixture(ws: &TestWorkspace) {
    ws.write("left.csv", "a,b,c\n0,0,0\n1,1,1\n");
    ws.write("right.csv", "x,y\n0,0\n1,1\n2,2\n");
}

#[test]
fn merge_longest_pads_with_nothing() {
    let ws = TestWorkspace::new();
    merge_fixture(&ws);
    let outcome = merge(
        ws.source("left.csv"),
        ws.source("right.csv"),
        &FileOutput::new(ws.file("out.csv")),
        false,
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("merge");

    assert_eq!(outcome, written(4, 5));
    let rows = ws.read_table("out.csv");
    assert_eq!(rows[0], ["a", "b", "c", "x", "y"]);
    assert_eq!(rows.len(), 4);
    // The left table ran out: only the right table's cells remain.
    assert_eq!(rows[3], ["2", "2"]);
}

#[test]
fn merge_longest_keeps_left_tail_alone() {
    let ws = TestWorkspace::new();
    ws.write("left.csv", "a,b,c\n0,0,0\n1,1,1\n2,2,2\n3,3,3\n");
    ws.write("right.csv", "x,y\n0,0\n");
    let outcome = merge(
        ws.source("left.csv"),
        ws.source("right.csv"),
        &FileOutput::new(ws.file("out.csv")),
        false,
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("merge");

    assert_eq!(outcome, written(5, 5));
    assert_eq!(
        ws.read_table("out.csv"),
        vec![
            vec!["a", "b", "c", "x", "y"],
            vec!["0", "0", "0", "0", "0"],
            vec!["1", "1", "1"],
            vec!["2", "2", "2"],
            vec!["3", "3", "3"],
        ]
    );
}

#[test]
fn merge_stop_shorter_truncates() {
    let ws = TestWorkspace::new();
    merge_fixture(&ws);
    let outcome = merge(
        ws.source("left.csv"),
        ws.source("right.csv"),
        &FileOutput::new(ws.file("out.csv")),
        true,
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("merge");

    assert_eq!(outcome, written(3, 5));
    assert_eq!(
        ws.read("out.csv"),
        "a,b,c,x,y\n0,0,0,0,0\n1,1,1,1,1\n"
    );
}

#[test]
fn select_ranges() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", "a,b,c\n1,2,3\n");

    select_columns(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("both.csv")),
        Some(1),
        Some(3),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("select both ends");
    assert_eq!(ws.read("both.csv"), "b,c\n2,3\n");

    select_columns(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("from.csv")),
        Some(1),
        None,
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("select from");
    assert_eq!(ws.read("from.csv"), "b,c\n2,3\n");

    select_columns(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("to.csv")),
        None,
        Some(2),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .expect("select to");
    assert_eq!(ws.read("to.csv"), "a,b\n1,2\n");
}

#[test]
fn select_inverted_range_is_invalid() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", "a,b,c\n");
    let err = select_columns(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        Some(2),
        Some(1),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, OpError::InvalidArgument(_)));
}

#[test]
fn select_empty_range_is_invalid() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", "a,b,c\n1,2,3\n");
    let err = select_columns(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        Some(1),
        Some(1),
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, OpError::InvalidArgument(_)));
    assert!(!ws.file("out.csv").exists());
}

#[test]
fn declined_overwrite_leaves_existing_output() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", ABC);
    ws.write("out.csv", "precious\n");

    let outcome = drop_column(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        &ColumnSelector::Index(0),
        &mut OverwritePolicy::NeverPrompt,
    )
    .expect("skipped write is not an error");

    assert!(outcome.is_skipped());
    assert_eq!(ws.read("out.csv"), "precious\n");
}

#[test]
fn empty_input_has_no_header() {
    let ws = TestWorkspace::new();
    ws.write("in.csv", "");
    let err = select_columns(
        ws.source("in.csv"),
        &FileOutput::new(ws.file("out.csv")),
        None,
        None,
        &mut OverwritePolicy::AlwaysConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, OpError::EmptyTable { .. }));
}
