use std::{borrow::Cow, fmt::Write};

const COLUMN_SEPARATOR: &str = " | ";
const RULE_JUNCTION: &str = "-+-";

#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
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

    /// Renders a header line, a rule, and one line per row. Cells beyond the
    /// header count are dropped.
    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in col_widths.iter_mut().zip(row.as_ref()) {
                *width = (*width).max(display_width(cell));
            }
        }

        let mut out = String::with_capacity(256);
        self.write_line(&mut out, self.headers, &col_widths);

        let rule: Vec<String> = col_widths.iter().map(|width| "-".repeat(*width)).collect();
        out.push_str(&rule.join(RULE_JUNCTION));
        out.push('\n');

        for row in &self.rows {
            self.write_line(&mut out, row.as_ref(), &col_widths);
        }
        out
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'_, str>], col_widths: &[usize]) {
        let mut line = String::new();
        for (idx, width) in col_widths.iter().enumerate() {
            if idx > 0 {
                line.push_str(COLUMN_SEPARATOR);
            }
            let cell = cells.get(idx).map(|cell| cell.as_ref()).unwrap_or("");
            let padding = width.saturating_sub(display_width(cell));
            match self.alignments.get(idx).copied().unwrap_or_default() {
                Alignment::Left => {
                    let _ = write!(&mut line, "{cell}{:padding$}", "");
                }
                Alignment::Right => {
                    let _ = write!(&mut line, "{:padding$}{cell}", "");
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

/// Terminal columns taken by `text`; non-ASCII is assumed to be full width.
fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_padded_to_widest_cell() {
        let headers = [Cow::Borrowed("Member"), Cow::Borrowed("Balance")];
        let table = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&headers)
            .row([Cow::Borrowed("Aki"), Cow::Borrowed("+500")])
            .row([Cow::Borrowed("Benjamin"), Cow::Borrowed("-500")])
            .build();

        assert_eq!(
            table,
            "Member   | Balance\n\
             ---------+--------\n\
             Aki      |    +500\n\
             Benjamin |    -500\n"
        );
    }

    #[test]
    fn wide_characters_count_double() {
        let headers = [Cow::Borrowed("名前"), Cow::Borrowed("x")];
        let table = TextTableBuilder::new()
            .headers(&headers)
            .rows([[Cow::Borrowed("あ"), Cow::Borrowed("1")]])
            .build();

        assert_eq!(table, "名前 | x\n-----+--\nあ   | 1\n");
    }

    #[test]
    fn no_headers_renders_nothing() {
        let table: String = TextTableBuilder::<[Cow<'_, str>; 0]>::new().build();
        assert!(table.is_empty());
    }
}
