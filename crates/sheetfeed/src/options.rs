#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
            Delimiter::Pipe => '|',
        }
    }
}

/// What happens to surrounding whitespace once a cell is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimPolicy {
    /// Keep cells exactly as unquoted
    None,
    /// Trim each cell after unquoting (what every feed consumer expects)
    #[default]
    Cells,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub delimiter: Delimiter,
    pub trim: TrimPolicy,
    /// Drop rows whose cells are all empty (off keeps one row per input line)
    pub skip_blank_rows: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            trim: TrimPolicy::default(),
            skip_blank_rows: false,
        }
    }
}

impl Options {
    pub fn raw() -> Self {
        Self {
            trim: TrimPolicy::None,
            ..Self::default()
        }
    }
}
