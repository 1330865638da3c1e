use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: &str = "  ";

/// Fixed-width plain text table.
#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Header, dashed rule, then one line per row. Cells beyond the header
    /// count are dropped.
    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(text_width(cell));
            }
        }

        let mut table = String::with_capacity(64 * (self.rows.len() + 2));
        self.write_line(&mut table, self.headers, &col_widths);

        let rule: Vec<Cow<'_, str>> = col_widths
            .iter()
            .map(|width| Cow::Owned("-".repeat(*width)))
            .collect();
        write_cells(&mut table, &rule, &col_widths, &[]);

        for row in &self.rows {
            self.write_line(&mut table, row.as_ref(), &col_widths);
        }

        table.truncate(table.trim_end().len());
        table
    }

    fn write_line(&self, table: &mut String, cells: &[Cow<'_, str>], col_widths: &[usize]) {
        write_cells(table, cells, col_widths, &self.alignments);
    }
}

fn write_cells(
    table: &mut String,
    cells: &[Cow<'_, str>],
    col_widths: &[usize],
    alignments: &[Alignment],
) {
    let mut line = String::new();
    for (i, &width) in col_widths.iter().enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let cell = cells.get(i).map_or("", |cell| cell.as_ref());
        let alignment = alignments.get(i).copied().unwrap_or_default();
        let _ = match alignment {
            Alignment::Left => write!(&mut line, "{cell:<width$}"),
            Alignment::Center => write!(&mut line, "{cell:^width$}"),
            Alignment::Right => write!(&mut line, "{cell:>width$}"),
        };
    }
    let _ = writeln!(table, "{}", line.trim_end());
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_simple_table() {
        let table = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed("Name"), Cow::Borrowed("Balance")])
            .row([Cow::Borrowed("Alice"), Cow::Borrowed("+₹100.00")])
            .row([Cow::Borrowed("Bob"), Cow::Borrowed("-₹100.00")])
            .build();

        assert_eq!(
            table,
            "Name    Balance\n\
             -----  --------\n\
             Alice  +₹100.00\n\
             Bob    -₹100.00"
        );
    }

    #[rstest]
    fn test_default_alignment_and_extra_cells() {
        let table = TextTableBuilder::new()
            .headers(&[Cow::Borrowed("A"), Cow::Borrowed("B")])
            .rows([vec![Cow::Borrowed("x"), Cow::Borrowed("yy"), Cow::Borrowed("dropped")]])
            .build();

        assert_eq!(table, "A  B\n-  --\nx  yy");
    }

    #[rstest]
    fn test_center_alignment() {
        let table = TextTableBuilder::new()
            .alignments(&[Alignment::Center])
            .headers(&[Cow::Borrowed("Total")])
            .row([Cow::Borrowed("7")])
            .build();

        assert_eq!(table, "Total\n-----\n  7");
    }

    #[rstest]
    fn test_empty_headers() {
        let table = TextTableBuilder::<[Cow<'static, str>; 0]>::new().build();
        assert!(table.is_empty());
    }
}
