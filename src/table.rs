use unicode_segmentation::UnicodeSegmentation;

/// Extra width every column gets beyond its header.
const MIN_HEADER_PADDING: usize = 2;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A bordered grid table in the style of tabulate's `grid` format.
///
/// ```text
/// +--------+--------+
/// |   场号 | SHOT   |
/// +========+========+
/// |      1 | 全景   |
/// +--------+--------+
/// ```
///
/// Columns whose cells are all integers are right-aligned, the rest are
/// left-aligned. A column is at least two cells wider than its header.
/// Widths are measured in terminal cells so CJK text lines up.
#[derive(Debug, Clone, Default)]
pub struct GridTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl GridTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells, extra cells dropped.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn alignments(&self) -> Vec<Align> {
        (0..self.headers.len())
            .map(|col| {
                let numeric = !self.rows.is_empty()
                    && self
                        .rows
                        .iter()
                        .all(|row| row[col].trim().parse::<i64>().is_ok());
                if numeric {
                    Align::Right
                } else {
                    Align::Left
                }
            })
            .collect()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .map(|row| display_width(&row[col]))
                    .chain(std::iter::once(display_width(header) + MIN_HEADER_PADDING))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let alignments = self.alignments();

        let rule = |fill: char| {
            let mut buf = String::from("+");
            for width in &widths {
                buf.extend(std::iter::repeat(fill).take(width + 2));
                buf.push('+');
            }
            buf
        };
        let line = |cells: &[String]| {
            let mut buf = String::from("|");
            for ((cell, width), align) in cells.iter().zip(&widths).zip(&alignments) {
                buf.push(' ');
                buf.push_str(&pad(cell, *width, *align));
                buf.push_str(" |");
            }
            buf
        };

        let mut out = vec![rule('-'), line(&self.headers), rule('=')];
        for row in &self.rows {
            out.push(line(row));
            out.push(rule('-'));
        }
        out.join("\n")
    }
}

impl std::fmt::Display for GridTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(text)));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

/// Number of terminal cells `text` occupies.
pub fn display_width(text: &str) -> usize {
    text.graphemes(true)
        .map(|grapheme| match grapheme.chars().next() {
            Some(c) if is_wide(c) => 2,
            Some(c) if c.is_control() => 0,
            _ => 1,
        })
        .sum()
}

fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1F64F
            | 0x1F900..=0x1F9FF
            | 0x20000..=0x3FFFD
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("SHOT"), 4);
        assert_eq!(display_width("场号"), 4);
        assert_eq!(display_width("时长(s)"), 7);
        assert_eq!(display_width("咯老子今天要打十个！"), 20);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_render_grid() {
        let mut table = GridTable::new(["场号", "SHOT"]);
        table.push_row(vec!["1".into(), "全景/俯拍".into()]);
        table.push_row(vec!["12".into(), "特写".into()]);

        let expected = "\
+--------+-----------+
|   场号 | SHOT      |
+========+===========+
|      1 | 全景/俯拍 |
+--------+-----------+
|     12 | 特写      |
+--------+-----------+";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_headers_only_when_empty() {
        let table = GridTable::new(["a", "bb"]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.render(), "+-----+------+\n| a   | bb   |\n+=====+======+");
    }

    #[test]
    fn test_lines_have_equal_width_with_cjk() {
        let mut table = GridTable::new(["对白", "n"]);
        table.push_row(vec!["莫挨老子，WiFi信号都被你切断了！".into(), "3".into()]);
        table.push_row(vec!["你的异能...是复制粘贴噻？".into(), "8".into()]);

        let rendered = table.render();
        let widths: Vec<usize> = rendered.lines().map(display_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{:?}", widths);
    }

    #[test]
    fn test_narrow_column_wider_than_header() {
        let mut table = GridTable::new(["item", "qty"]);
        table.push_row(vec!["a".into(), "1".into()]);
        let rendered = table.render();
        assert!(rendered.contains("| item   |   qty |"), "{}", rendered);
        assert!(rendered.contains("| a      |     1 |"), "{}", rendered);
    }

    #[test]
    fn test_short_row_padded() {
        let mut table = GridTable::new(["a", "b"]);
        table.push_row(vec!["x".into()]);
        assert!(table.render().contains("| x   |     |"));
    }
}
