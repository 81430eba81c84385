// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::marker::PhantomData;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A column of a plain-text table over rows of type `T`.
pub trait Column<T> {
    fn format(&self, data: &T) -> String;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

pub struct Table<'a, T, C: Column<T>> {
    pub columns: Vec<C>,
    pub separator: String,
    pub padding: bool,
    pub data: &'a [T],
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let stylizers = self.compute_stylizers(&table);

        for (cells, row) in table.into_iter().zip(self.data) {
            for (j, (stylizer, cell)) in stylizers.iter().zip(cells.into_iter()).enumerate() {
                write!(f, "{}", stylizer.stylize_cell(row, cell))?;

                if j < stylizers.len() - 1 {
                    write!(f, "{}", self.separator)?;
                } else {
                    writeln!(f)?;
                }
            }
        }

        Ok(())
    }
}

impl<T, C: Column<T>> Table<'_, T, C> {
    fn compute_stylizers(&self, table: &[Vec<String>]) -> Vec<ColumnStylizer<'_, T, C>> {
        let max_widths = (self.padding && !table.is_empty()).then(|| column_max_widths(table));

        let mut stylizers = Vec::with_capacity(self.columns.len());
        for (i, col) in self.columns.iter().enumerate() {
            let direction = col.padding_direction();

            // the last column needs no trailing padding when left-aligned
            let padding = match &max_widths {
                Some(widths)
                    if i < self.columns.len() - 1 || direction == PaddingDirection::Right =>
                {
                    Some((widths[i], direction))
                }
                _ => None,
            };

            stylizers.push(ColumnStylizer {
                config: col,
                padding,
                _marker: PhantomData,
            });
        }
        stylizers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

struct ColumnStylizer<'a, T, C: Column<T>> {
    config: &'a C,
    /// padding width and direction
    padding: Option<(usize, PaddingDirection)>,
    _marker: PhantomData<T>,
}

impl<T, C: Column<T>> ColumnStylizer<'_, T, C> {
    fn stylize_cell(&self, data: &T, cell: String) -> String {
        let cell = match self.padding {
            Some((width, PaddingDirection::Left)) => {
                let pad = width.saturating_sub(cell.width());
                format!("{}{}", cell, " ".repeat(pad))
            }
            Some((width, PaddingDirection::Right)) => {
                let pad = width.saturating_sub(cell.width());
                format!("{}{}", " ".repeat(pad), cell)
            }
            None => cell,
        };

        match self.config.get_color(data) {
            Some(color) => cell.color(color).to_string(),
            None => cell,
        }
    }
}

fn column_max_widths(table: &[Vec<String>]) -> Vec<usize> {
    let mut max_width = vec![0; table[0].len()];
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.width();
            if width > max_width[i] {
                max_width[i] = width;
            }
        }
    }
    max_width
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, &'static str);

    enum PairColumn {
        First,
        Second,
    }

    impl Column<Pair> for PairColumn {
        fn format(&self, data: &Pair) -> String {
            match self {
                PairColumn::First => data.0.to_string(),
                PairColumn::Second => data.1.to_string(),
            }
        }
    }

    #[test]
    fn test_table_pads_columns() {
        colored::control::set_override(false);
        let data = vec![Pair("a", "one"), Pair("bb", "two")];
        let table = Table {
            columns: vec![PairColumn::First, PairColumn::Second],
            separator: "  ".to_string(),
            padding: true,
            data: &data,
        };
        assert_eq!(table.to_string(), "a   one\nbb  two\n");
    }

    #[test]
    fn test_table_empty_data() {
        let data: Vec<Pair> = vec![];
        let table = Table {
            columns: vec![PairColumn::First, PairColumn::Second],
            separator: "  ".to_string(),
            padding: true,
            data: &data,
        };
        assert_eq!(table.to_string(), "");
    }
}
