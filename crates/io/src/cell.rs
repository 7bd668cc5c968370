// Typed cell values as read from a worksheet

use calamine::Data;

/// One decoded cell.
///
/// Integers, floats and date serials all land in `Number`; ISO date and
/// duration strings land in `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Error(String),
}

impl Cell {
    /// True for cells that count as "no value": empty, empty string, `FALSE`, or zero.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(n) => *n == 0.0,
            Cell::Bool(b) => !b,
            Cell::Error(_) => false,
        }
    }

    /// Text rendering used for record fields and identity lookups.
    ///
    /// No trimming. Integral numbers print without a fraction so `91.0` reads `91`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            Cell::Error(e) => e.clone(),
        }
    }

    /// `Some(text)` unless the cell is blank.
    pub fn value(&self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.to_text())
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(n) => Cell::Number(*n),
            Data::Int(n) => Cell::Number(*n as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::Error(e) => Cell::Error(e.to_string()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) => Cell::Text(s.clone()),
            Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(91.0).to_text(), "91");
        assert_eq!(Cell::Number(8412345678901.0).to_text(), "8412345678901");
        assert_eq!(Cell::Number(-3.0).to_text(), "-3");
        assert_eq!(Cell::Number(9.5).to_text(), "9.5");
        assert_eq!(Cell::Number(1e16).to_text(), "10000000000000000");
    }

    #[test]
    fn blank_cells() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text(String::new()).is_blank());
        assert!(Cell::Bool(false).is_blank());
        assert!(Cell::Number(0.0).is_blank());

        assert!(!Cell::Text(" ".into()).is_blank());
        assert!(!Cell::Bool(true).is_blank());
        assert!(!Cell::Number(0.5).is_blank());
        assert!(!Cell::Error("#N/A".into()).is_blank());
    }

    #[test]
    fn value_keeps_whitespace() {
        assert_eq!(Cell::from(" V ").value().as_deref(), Some(" V "));
        assert_eq!(Cell::Bool(true).value().as_deref(), Some("TRUE"));
        assert_eq!(Cell::Empty.value(), None);
    }

    #[test]
    fn converts_calamine_data() {
        assert_eq!(Cell::from(&Data::Int(205)), Cell::Number(205.0));
        assert_eq!(Cell::from(&Data::String("V".into())), Cell::Text("V".into()));
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
        assert_eq!(
            Cell::from(&Data::DateTimeIso("2024-01-02".into())),
            Cell::Text("2024-01-02".into())
        );
    }
}
