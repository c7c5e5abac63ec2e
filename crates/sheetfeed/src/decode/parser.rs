use core::iter::Peekable;
use core::str::Chars;

use crate::options::{Options, TrimPolicy};
use crate::table::{Row, Table};

const BOM: char = '\u{FEFF}';
const QUOTE: char = '"';

/// Single-pass scanner. Total: malformed quoting never fails, an unterminated
/// quoted field swallows the rest of the input into its cell.
pub struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    delimiter: char,
    trim: TrimPolicy,
    skip_blank_rows: bool,
    in_quotes: bool,
    // current cell contained a quote, so `""` at EOF still counts as a cell
    quoted: bool,
    cell: String,
    row: Vec<String>,
    rows: Vec<Row>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &Options) -> Self {
        let input = input.strip_prefix(BOM).unwrap_or(input);
        Self {
            chars: input.chars().peekable(),
            delimiter: options.delimiter.as_char(),
            trim: options.trim,
            skip_blank_rows: options.skip_blank_rows,
            in_quotes: false,
            quoted: false,
            cell: String::new(),
            row: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Table {
        while let Some(ch) = self.chars.next() {
            match ch {
                QUOTE => {
                    if self.in_quotes && self.chars.peek() == Some(&QUOTE) {
                        self.chars.next();
                        self.cell.push(QUOTE);
                    } else {
                        self.in_quotes = !self.in_quotes;
                    }
                    self.quoted = true;
                }
                '\r' | '\n' => {
                    if ch == '\r' && self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    if self.in_quotes {
                        self.cell.push('\n');
                    } else {
                        self.end_row();
                    }
                }
                c if c == self.delimiter && !self.in_quotes => self.end_cell(),
                c => self.cell.push(c),
            }
        }

        if self.in_quotes {
            tracing::debug!(
                row = self.rows.len() + 1,
                "unterminated quoted field absorbed the rest of the input"
            );
        }
        if !self.cell.is_empty() || !self.row.is_empty() || self.quoted {
            self.end_row();
        }
        Table::new(self.rows)
    }

    fn end_cell(&mut self) {
        let cell = core::mem::take(&mut self.cell);
        let cell = match self.trim {
            TrimPolicy::Cells => {
                let trimmed = cell.trim();
                if trimmed.len() == cell.len() {
                    cell
                } else {
                    trimmed.to_string()
                }
            }
            TrimPolicy::None => cell,
        };
        self.row.push(cell);
        self.quoted = false;
    }

    fn end_row(&mut self) {
        self.end_cell();
        let row = Row::new(core::mem::take(&mut self.row));
        if self.skip_blank_rows && row.is_blank() {
            tracing::trace!(row = self.rows.len() + 1, "skipping blank row");
            return;
        }
        self.rows.push(row);
    }
}

pub fn parse_table(input: &str, options: &Options) -> Table {
    Parser::new(input, options).parse()
}
