//! Field tests - grid access, bounds and line removal

use tui_blocks::core::Field;
use tui_blocks::types::{Cell, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};

fn fill_row_except(field: &mut Field, y: i32, gaps: &[i32], color_id: u8) {
    for x in 0..i32::from(field.width()) {
        if !gaps.contains(&x) {
            field.set_cell(x, y, color_id);
        }
    }
}

#[test]
fn test_field_new_empty() {
    let field = Field::default();
    assert_eq!(field.width(), DEFAULT_FIELD_WIDTH);
    assert_eq!(field.height(), DEFAULT_FIELD_HEIGHT);

    for y in 0..DEFAULT_FIELD_HEIGHT as i32 {
        for x in 0..DEFAULT_FIELD_WIDTH as i32 {
            assert!(field.is_cell_empty(x, y), "Cell ({}, {}) should be empty", x, y);
            assert_eq!(field.get(x, y), Some(Cell::EMPTY));
        }
    }
}

#[test]
fn test_out_of_bounds_reads_are_blocked() {
    let field = Field::new(10, 20);

    assert!(!field.is_cell_empty(-1, 0));
    assert!(!field.is_cell_empty(0, -1));
    assert!(!field.is_cell_empty(10, 0));
    assert!(!field.is_cell_empty(0, 20));
    assert_eq!(field.get(-1, 5), None);
    assert_eq!(field.color_at(99, 99), 0);
}

#[test]
fn test_out_of_bounds_writes_are_ignored() {
    let mut field = Field::new(10, 20);

    assert!(!field.set_cell(-1, 0, 3));
    assert!(!field.set_cell(10, 0, 3));
    assert!(!field.set_cell(0, 20, 3));
    assert!(!field.clear_cell(0, -1));
    assert_eq!(field.occupied_count(), 0);
}

#[test]
fn test_occupancy_and_color_agree() {
    let mut field = Field::new(10, 20);

    assert!(field.set_cell(5, 10, 3));
    assert!(!field.is_cell_empty(5, 10));
    assert_eq!(field.color_at(5, 10), 3);

    assert!(field.clear_cell(5, 10));
    assert!(field.is_cell_empty(5, 10));
    assert_eq!(field.color_at(5, 10), 0);
}

#[test]
fn test_find_complete_lines() {
    let mut field = Field::new(10, 20);
    fill_row_except(&mut field, 19, &[], 1);
    fill_row_except(&mut field, 18, &[4], 1);
    fill_row_except(&mut field, 17, &[], 2);

    assert!(field.is_line_complete(19));
    assert!(!field.is_line_complete(18));
    assert_eq!(field.find_complete_lines(), vec![17, 19]);
    assert!(!field.is_line_complete(20));
}

#[test]
fn test_remove_non_adjacent_lines() {
    let mut field = Field::new(10, 20);
    fill_row_except(&mut field, 19, &[], 1);
    fill_row_except(&mut field, 18, &[4], 2);
    fill_row_except(&mut field, 17, &[], 3);
    field.set_cell(0, 16, 7);

    let removed = field.remove_all_complete_lines();

    assert_eq!(removed, 2);
    // Partial row 18 lands on the floor, the lone cell above it follows.
    assert!(field.is_cell_empty(4, 19));
    assert_eq!(field.color_at(0, 19), 2);
    assert_eq!(field.color_at(0, 18), 7);
    assert_eq!(field.occupied_count(), 10);
    assert!(field.find_complete_lines().is_empty());
}

#[test]
fn test_remove_lines_in_any_order() {
    let mut a = Field::new(6, 8);
    let mut b = Field::new(6, 8);
    for field in [&mut a, &mut b] {
        fill_row_except(field, 7, &[], 1);
        fill_row_except(field, 5, &[], 1);
        field.set_cell(2, 6, 4);
        field.set_cell(3, 4, 5);
    }

    assert_eq!(a.remove_lines(&[5, 7]), 2);
    assert_eq!(b.remove_lines(&[7, 5]), 2);
    assert_eq!(a, b);
    assert_eq!(a.color_at(2, 7), 4);
    assert_eq!(a.color_at(3, 6), 5);
}

#[test]
fn test_remove_line_empties_top_row() {
    let mut field = Field::new(4, 4);
    fill_row_except(&mut field, 0, &[1], 6);
    fill_row_except(&mut field, 3, &[], 6);

    assert!(field.remove_line(3));

    assert!(field.row(0).unwrap().iter().all(|c| !c.occupied));
    assert_eq!(field.color_at(0, 1), 6);
}

#[test]
fn test_clear_resets_every_cell() {
    let mut field = Field::new(10, 20);
    fill_row_except(&mut field, 19, &[], 1);
    field.clear();
    assert_eq!(field.occupied_count(), 0);
}
