//! Fixed-width column layouts shared by the console report and the results file.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Column {
    pub width: usize,
    pub align: Align,
}

impl Column {
    pub const fn left(width: usize) -> Self {
        Self {
            width,
            align: Align::Left,
        }
    }

    pub const fn right(width: usize) -> Self {
        Self {
            width,
            align: Align::Right,
        }
    }

    /// Pad `value` to the column width. Longer values are never truncated.
    pub fn pad(&self, value: &str) -> String {
        let width = self.width;
        match self.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Layout {
    columns: &'static [Column],
    separator: &'static str,
}

impl Layout {
    pub const fn new(columns: &'static [Column], separator: &'static str) -> Self {
        Self { columns, separator }
    }

    /// Render one line (without the trailing newline).
    pub fn render(&self, cells: &[&str]) -> String {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| column.pad(cell))
            .collect::<Vec<_>>()
            .join(self.separator)
    }
}

const DETAIL_COLUMNS: [Column; 3] = [Column::left(28), Column::left(20), Column::left(28)];

const TITLE_COLUMNS: [Column; 2] = [Column::left(20), Column::left(10)];

const HEADER_COLUMNS: [Column; 6] = [
    Column::right(30),
    Column::right(10),
    Column::right(10),
    Column::right(10),
    Column::right(10),
    Column::right(8),
];

const ROW_COLUMNS: [Column; 7] = [
    Column::left(18),
    Column::right(12),
    Column::right(10),
    Column::right(10),
    Column::right(10),
    Column::right(10),
    Column::right(8),
];

/// Filename / pet label / classifier label rows in the console report.
pub const DETAIL_LAYOUT: Layout = Layout::new(&DETAIL_COLUMNS, " ");

/// Classifier labels longer than this are cut in the detail rows.
pub const CLASSIFIER_LABEL_LIMIT: usize = 30;

/// Label / value pairs at the top of a results file.
pub const TITLE_LAYOUT: Layout = Layout::new(&TITLE_COLUMNS, "");

/// Two-line column header of a results file.
pub const HEADER_LAYOUT: Layout = Layout::new(&HEADER_COLUMNS, "");

/// One run row in a results file.
pub const ROW_LAYOUT: Layout = Layout::new(&ROW_COLUMNS, "");

/// Percentage column of the console summary block.
pub const SUMMARY_PERCENT: Column = Column::right(6);
pub const SUMMARY_PRECISION: usize = 2;
pub const ROW_PRECISION: usize = 1;

pub fn fixed(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Format a count with `,` between groups of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Keep at most `limit` characters of `value`.
pub fn truncate_chars(value: &str, limit: usize) -> &str {
    match value.char_indices().nth(limit) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
