//! Property tests for parsing and structural edits.
//!
//! 1. Writing parsed constraints and parsing them again is stable.
//! 2. `normalize_spanning` is idempotent.
//! 3. `delete_*` undoes `insert_*` for single-cell placements.
//! 4. Every edit keeps the grid covering its placements.

use migrid::{CellConstraints, CellRect, GridModel, LayoutConfig, parse_layout_with};
use proptest::prelude::*;

// Helpers

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        (0_usize..6, 0_usize..6).prop_map(|(x, y)| format!("cell {x} {y}")),
        (0_usize..6, 0_usize..6, 1_usize..4, 1_usize..4)
            .prop_map(|(x, y, width, height)| format!("cell {x} {y} {width} {height}")),
        prop::sample::select(vec!["north", "south", "east", "west"]).prop_map(|side| format!("dock {side}")),
        Just("flowx".to_owned()),
        Just("flowy".to_owned()),
        (1_u32..4).prop_map(|count| format!("split {count}")),
        (2_usize..4).prop_map(|count| format!("spanx {count}")),
        prop::sample::select(vec!["left", "center", "right", "leading", "trailing"])
            .prop_map(|value| format!("alignx {value}")),
        prop::sample::select(vec!["top", "center", "bottom", "baseline"]).prop_map(|value| format!("aligny {value}")),
        Just("growx".to_owned()),
        (0_u32..300).prop_map(|weight| format!("growy {weight}")),
        prop::sample::select(vec!["gap", "gapleft", "gapright", "gaptop", "gapbottom"])
            .prop_map(|keyword| format!("{keyword} 5px")),
        (0_u8..4).prop_map(|mode| format!("hidemode {mode}")),
        Just("wrap".to_owned()),
        Just("newline".to_owned()),
        (1_usize..3).prop_map(|count| format!("skip {count}")),
        Just("sizegroup a".to_owned()),
    ]
}

fn constraint_string() -> impl Strategy<Value = String> {
    proptest::collection::vec(token(), 0..6).prop_map(|tokens| tokens.join(", "))
}

fn explicit_cells(max_cells: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    proptest::collection::vec((0_usize..6, 0_usize..6), 1..=max_cells)
}

fn spanning_cells(max_cells: usize) -> impl Strategy<Value = Vec<CellRect>> {
    proptest::collection::vec(
        (0_usize..5, 0_usize..5, 1_usize..3, 1_usize..3)
            .prop_map(|(x, y, width, height)| CellRect::new(x, y, width, height)),
        1..=max_cells,
    )
}

fn grid_with(cells: &[CellRect]) -> GridModel<usize> {
    let mut model = parse_layout_with("[]", "[]", LayoutConfig::default()).unwrap_or_default();
    for (id, rect) in cells.iter().enumerate() {
        let text = format!("cell {} {} {} {}", rect.x, rect.y, rect.width, rect.height);
        assert!(model.parse_and_attach(id, &text).is_ok(), "`{text}` must parse");
    }
    model
}

fn placements(model: &GridModel<usize>) -> Vec<String> {
    model
        .components()
        .map(|id| model.cell_string(id).unwrap_or_default())
        .collect()
}

fn covers_placements(model: &GridModel<usize>) -> bool {
    model.components().all(|id| {
        model.constraints(id).is_none_or(|constraints| {
            constraints.is_docked()
                || (constraints.cell_rect().right() <= model.column_count()
                    && constraints.cell_rect().bottom() <= model.row_count())
        })
    }) && model.column_count() >= 1
        && model.row_count() >= 1
}

// 1. Round trip

proptest! {
    #[test]
    fn written_constraints_parse_to_the_same_model(text in constraint_string()) {
        let Ok((first, _)) = CellConstraints::parse(&text) else {
            return Err(TestCaseError::fail(format!("generated `{text}` failed to parse")));
        };
        let written = first.to_string();
        let reparsed = CellConstraints::parse(&written).map(|(constraints, _)| constraints);
        prop_assert_eq!(reparsed.as_ref().map(ToString::to_string), Ok(written.clone()));
        prop_assert_eq!(reparsed.ok(), Some(first), "rewritten as `{}`", written);
    }
}

// 2. Normalize idempotence

proptest! {
    #[test]
    fn normalize_is_idempotent(cells in spanning_cells(6), extra_columns in 0_usize..4) {
        let mut model = grid_with(&cells);
        for _ in 0..extra_columns {
            prop_assert!(model.insert_column(model.column_count()).is_ok());
        }
        model.normalize_spanning();
        let once = (model.serialize(), placements(&model));
        model.normalize_spanning();
        prop_assert_eq!((model.serialize(), placements(&model)), once);
        prop_assert!(covers_placements(&model));
    }
}

// 3. Insert / delete inverse

proptest! {
    #[test]
    fn delete_undoes_insert(cells in explicit_cells(6), column in 0_usize..7, row in 0_usize..7) {
        let rects: Vec<CellRect> = cells.iter().map(|(x, y)| CellRect::cell(*x, *y)).collect();
        let mut model = grid_with(&rects);
        let before = placements(&model);

        let column = column.min(model.column_count());
        prop_assert!(model.insert_column(column).is_ok());
        prop_assert!(model.delete_column(column).is_ok());
        prop_assert_eq!(&placements(&model), &before);

        let row = row.min(model.row_count());
        prop_assert!(model.insert_row(row).is_ok());
        prop_assert!(model.delete_row(row).is_ok());
        prop_assert_eq!(placements(&model), before);
        prop_assert!(model.take_orphans().is_empty());
    }
}

// 4. Bounds

proptest! {
    #[test]
    fn edits_keep_grid_covering_placements(
        cells in spanning_cells(6),
        edits in proptest::collection::vec((0_u8..5, 0_usize..8, 0_usize..8), 0..10),
    ) {
        let mut model = grid_with(&cells);
        for (kind, first, second) in edits {
            let result = match kind {
                0 => model.insert_column(first),
                1 => model.delete_row(first),
                2 => model.split_column(first),
                3 => model.move_row(first, second),
                _ => model.move_column(first, second),
            };
            if result.is_err() {
                continue;
            }
            prop_assert!(covers_placements(&model), "after edit {} on {:?}", kind, placements(&model));
        }
    }
}
