//! Fixed-width text rendering of merged sections.

use crate::merge::orchestrator::{Cell, MergedSection};
use crate::pitch::Tuning;

/// Marker written for a note with no playable position.
pub const UNPLAYABLE_MARKER: char = 'X';

fn cell_text(cell: Cell) -> String {
    match cell {
        Cell::Fret(fret) => fret.to_string(),
        Cell::Unplayable => UNPLAYABLE_MARKER.to_string(),
    }
}

/// Render merged sections as aligned tab lines, one blank line between
/// sections.
pub fn render_sections(sections: &[MergedSection], target: &Tuning) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.extend(render_section(section, target));
    }
    lines
}

/// Render one section, highest string on top.
///
/// Every column is as wide as its widest cell so multi-digit frets never
/// break the vertical alignment; unoccupied cells are dash filled.
pub fn render_section(section: &MergedSection, target: &Tuning) -> Vec<String> {
    let mut widths = vec![1usize; section.max_column + 1];
    for (&(_, column), &cell) in &section.cells {
        let width = cell_text(cell).len();
        if width > widths[column] {
            widths[column] = width;
        }
    }

    let mut lines = Vec::with_capacity(target.string_count());
    for string in (0..target.string_count()).rev() {
        let mut body = String::new();
        for (column, &width) in widths.iter().enumerate() {
            if let Some(&cell) = section.cells.get(&(string, column)) {
                let text = cell_text(cell);
                body.push_str(&text);
                for _ in text.len()..width {
                    body.push('-');
                }
            } else {
                for _ in 0..width {
                    body.push('-');
                }
            }
        }
        lines.push(format!("{}|{body}", target.open(string).label()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn two_string_target() -> Tuning {
        Tuning::parse(&["E1", "E4"]).unwrap()
    }

    fn section(cells: &[(usize, usize, Cell)], max_column: usize) -> MergedSection {
        let mut section = MergedSection {
            cells: BTreeMap::new(),
            max_column,
        };
        for &(string, column, cell) in cells {
            section.cells.insert((string, column), cell);
        }
        section
    }

    #[test]
    fn multi_digit_frets_widen_their_column_for_every_string() {
        let section = section(
            &[(0, 0, Cell::Fret(12)), (1, 1, Cell::Fret(3))],
            2,
        );
        let lines = render_section(&section, &two_string_target());
        assert_eq!(lines, vec!["E4|--3-".to_string(), "E1|12--".to_string()]);
    }

    #[test]
    fn unplayable_cells_render_as_x() {
        let section = section(&[(1, 0, Cell::Unplayable)], 1);
        let lines = render_section(&section, &two_string_target());
        assert_eq!(lines, vec!["E4|X-".to_string(), "E1|--".to_string()]);
    }

    #[test]
    fn empty_columns_pad_to_the_section_width() {
        let section = section(&[(0, 0, Cell::Fret(5))], 4);
        let lines = render_section(&section, &two_string_target());
        assert_eq!(lines, vec!["E4|-----".to_string(), "E1|5----".to_string()]);
    }

    #[test]
    fn sections_are_separated_by_one_blank_line() {
        let first = section(&[(0, 0, Cell::Fret(1))], 1);
        let second = section(&[(1, 0, Cell::Fret(2))], 1);
        let lines = render_sections(&[first, second], &two_string_target());
        assert_eq!(
            lines,
            vec![
                "E4|--".to_string(),
                "E1|1-".to_string(),
                String::new(),
                "E4|2-".to_string(),
                "E1|--".to_string(),
            ]
        );
    }
}
