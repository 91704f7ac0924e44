use std::{borrow::Cow, fmt};

/// One value of a row.
///
/// Cells read from a table are always [`Cell::Text`]. Numeric cells only appear
/// after [`coerce_row`] has run on calculation inputs, or when a calculation
/// produces a number.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
}

pub type Row = Vec<Cell>;

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Renders the cell the way it is written to the output sink.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(s) => Cow::Borrowed(s),
            Cell::Integer(i) => Cow::Owned(i.to_string()),
            Cell::Float(f) => Cow::Owned(f.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

pub fn text_row<I, S>(values: I) -> Row
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(|v| Cell::Text(v.into())).collect()
}

/// Converts a text cell into an integer or float when the text is a plain
/// decimal literal. Anything else, including numeric cells, is returned as is.
pub fn coerce_cell(cell: Cell) -> Cell {
    match cell {
        Cell::Text(s) => match parse_number(&s) {
            Some(number) => number,
            None => Cell::Text(s),
        },
        other => other,
    }
}

pub fn coerce_row(row: &[Cell]) -> Row {
    row.iter().cloned().map(coerce_cell).collect()
}

fn parse_number(value: &str) -> Option<Cell> {
    if is_integer_literal(value) {
        if let Ok(parsed) = value.parse::<i64>() {
            return Some(Cell::Integer(parsed));
        }
    }
    if is_float_literal(value) {
        // Literal shape is already checked; `inf` and `NaN` never reach here.
        return value.parse::<f64>().ok().map(Cell::Float);
    }
    None
}

fn strip_sign(value: &str) -> &str {
    value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value)
}

fn is_integer_literal(value: &str) -> bool {
    let digits = strip_sign(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_float_literal(value: &str) -> bool {
    let body = strip_sign(value);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(whole) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => is_integer_literal(exp),
    }
}
