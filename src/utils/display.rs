//! Terminal formatting for grid snapshots

use crate::game_of_life::Grid;
use anyhow::Result;

/// Renders grid snapshots for console output
pub struct GridFormatter;

impl GridFormatter {
    /// One character per cell, one line per row.
    pub fn format_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                output.push(if grid.get(row as i64, col as i64) {
                    '█'
                } else {
                    '·'
                });
            }
            output.push('\n');
        }
        output
    }

    /// Compact form with row and column indices for interactive editing.
    pub fn format_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.width() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.height() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.width() {
                output.push_str(if grid.get(row as i64, col as i64) {
                    "██"
                } else {
                    "··"
                });
            }
            output.push('\n');
        }

        output
    }

    /// Age view: living cells show their age capped at 9, dead cells a dot.
    pub fn format_with_ages(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let cell = grid.cell(row as i64, col as i64);
                if cell.is_alive() {
                    let digit = cell.age().min(9);
                    output.push(char::from(b'0' + digit as u8));
                } else {
                    output.push('·');
                }
            }
            output.push('\n');
        }
        output
    }

    /// Serialize a snapshot as pretty JSON.
    pub fn to_json(grid: &Grid) -> Result<String> {
        Ok(serde_json::to_string_pretty(grid)?)
    }
}

/// Terminal colors for status lines
#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Red,
    Yellow,
    Cyan,
}

impl Color {
    fn code(&self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Red => 31,
            Color::Yellow => 33,
            Color::Cyan => 36,
        }
    }
}

/// ANSI coloring that backs off when the terminal can't take it
pub struct ColorOutput;

impl ColorOutput {
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Cyan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::RuleSet;

    fn glider() -> Grid {
        Grid::from_rows(&[
            vec![false, true, false],
            vec![false, false, true],
            vec![true, true, true],
        ])
        .unwrap()
    }

    #[test]
    fn test_format_compact() {
        let text = GridFormatter::format_compact(&glider());
        assert_eq!(text, "·█·\n··█\n███\n");
    }

    #[test]
    fn test_format_with_coords_has_headers() {
        let text = GridFormatter::format_with_coords(&glider());
        assert!(text.starts_with("   "));
        assert!(text.contains(" 0 "));
        assert!(text.contains("██"));
    }

    #[test]
    fn test_format_with_ages() {
        let rules = RuleSet::default();
        let block = Grid::from_rows(&[
            vec![false, false, false, false],
            vec![false, true, true, false],
            vec![false, true, true, false],
            vec![false, false, false, false],
        ])
        .unwrap();
        let aged = rules.next_state(&rules.next_state(&block));
        let text = GridFormatter::format_with_ages(&aged);
        assert!(text.contains('2'), "block survivors have aged twice");
        assert!(text.contains('·'));
    }

    #[test]
    fn test_json_round_trip() {
        let json = GridFormatter::to_json(&glider()).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, glider());
    }

    #[test]
    fn test_color_output_keeps_text() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
