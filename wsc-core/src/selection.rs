use crate::error::{ConsoleError, Result};
use crate::rows::Row;

/// Which rows a selection gesture applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    Row(usize),
    All,
}

impl SelectionTarget {
    /// Table widgets report the header checkbox as row `-1`.
    pub fn from_row_id(row_id: isize) -> Option<Self> {
        match row_id {
            -1 => Some(SelectionTarget::All),
            i if i >= 0 => Some(SelectionTarget::Row(i as usize)),
            _ => None,
        }
    }
}

/// Returns a new row vector with the selection applied; `rows` is untouched.
pub fn set_selection(rows: &[Row], target: SelectionTarget, selected: bool) -> Result<Vec<Row>> {
    match target {
        SelectionTarget::All => Ok(rows
            .iter()
            .map(|row| Row {
                selected,
                ..row.clone()
            })
            .collect()),
        SelectionTarget::Row(index) => {
            if index >= rows.len() {
                return Err(ConsoleError::RowOutOfRange {
                    index,
                    len: rows.len(),
                });
            }
            let mut next = rows.to_vec();
            next[index].selected = selected;
            Ok(next)
        }
    }
}

pub fn any_selected(rows: &[Row]) -> bool {
    rows.iter().any(|row| row.selected)
}

/// Ids of the selected rows, in row order.
pub fn selected_ids(rows: &[Row]) -> Vec<&str> {
    rows.iter()
        .filter(|row| row.selected)
        .map(|row| row.id.as_str())
        .collect()
}
