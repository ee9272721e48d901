use super::cell::Cell;

static EMPTY: Cell = Cell::Empty;

/// The first worksheet of an input file, held whole in memory.
///
/// Row and column indices are absolute: with no header, `(0, 0)` is sheet
/// cell A1. With a header, the first sheet row becomes the column names and
/// data row `0` is the sheet row after it.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    name: String,
    headers: Option<Vec<String>>,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            headers: None,
            rows,
        }
    }

    pub fn with_header(name: impl Into<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let headers = if rows.is_empty() {
            Vec::new()
        } else {
            rows.remove(0).iter().map(|cell| cell.to_string()).collect()
        };
        Self {
            name: name.into(),
            headers: Some(headers),
            rows,
        }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>, has_header: bool) -> Self {
        if has_header {
            Self::with_header(name, rows)
        } else {
            Self::new(name, rows)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        let data_width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let header_width = self.headers.as_ref().map_or(0, Vec::len);
        data_width.max(header_width)
    }

    /// Cells past the end of a short row read as [`Cell::Empty`].
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&EMPTY)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.headers
            .as_ref()?
            .iter()
            .position(|header| header.trim() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::text(s)
    }

    #[test]
    fn header_row_is_split_off() {
        let grid = Grid::with_header(
            "lights.csv",
            vec![
                vec![text("Název"), text(" Zeměpisná šířka ")],
                vec![text("A1"), Cell::Float(49.74)],
            ],
        );
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.column_index("Zeměpisná šířka"), Some(1));
        assert_eq!(grid.column_index("Zeměpisná délka"), None);
        assert_eq!(grid.cell(0, 1), &Cell::Float(49.74));
    }

    #[test]
    fn out_of_bounds_cells_are_empty() {
        let grid = Grid::new("g", vec![vec![Cell::Int(1)], vec![Cell::Int(2), Cell::Int(3)]]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.cell(0, 1), &Cell::Empty);
        assert_eq!(grid.cell(5, 0), &Cell::Empty);
        assert_eq!(grid.column_index("anything"), None);
    }
}
