use crate::options::Delimiter;

const QUOTE: char = '"';

/// Line-oriented CSV writer; every row ends with `\n`
pub struct CsvWriter {
    out: String,
    delimiter: char,
}

impl CsvWriter {
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            out: String::new(),
            delimiter: delimiter.as_char(),
        }
    }

    pub fn row<S: AsRef<str>>(&mut self, cells: &[S]) {
        // a lone empty cell would otherwise read back as a blank line
        if let [only] = cells {
            if only.as_ref().is_empty() {
                self.out.push_str("\"\"\n");
                return;
            }
        }
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                self.out.push(self.delimiter);
            }
            self.field(cell.as_ref());
        }
        self.out.push('\n');
    }

    fn field(&mut self, value: &str) {
        // a leading BOM on the very first field is stripped by the reader
        let bom_first = self.out.is_empty() && value.starts_with('\u{FEFF}');
        if !bom_first && !needs_quotes(value, self.delimiter) {
            self.out.push_str(value);
            return;
        }
        self.out.push(QUOTE);
        for ch in value.chars() {
            if ch == QUOTE {
                self.out.push(QUOTE);
            }
            self.out.push(ch);
        }
        self.out.push(QUOTE);
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

pub fn needs_quotes(value: &str, delimiter: char) -> bool {
    value
        .chars()
        .any(|c| c == delimiter || c == QUOTE || c == '\n' || c == '\r')
}
