//! Values and number formatting.
//!
//! [`FormatSpec`] understands the usual format-spec mini language:
//!
//! ```text
//! [[fill]align][sign][#][0][width][grouping][.precision][type]
//! ```
//!
//! so values can be rendered as `.2f`, `,d`, `+.3e`, `.1%` and friends.

use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// A value that can be bound to a TeX constant.
#[derive(Debug, Clone, PartialEq)]
pub enum TexValue {
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// Pre-rendered text (inserted verbatim).
    Text(String),
}

impl TexValue {
    /// Returns the value type as a static string.
    pub fn type_name(&self) -> &'static str {
        match self {
            TexValue::Int(_) => "int",
            TexValue::Float(_) => "float",
            TexValue::Text(_) => "text",
        }
    }

    /// Render this value with the given format spec.
    pub fn format(&self, spec: &FormatSpec) -> String {
        spec.apply(self)
    }

    /// Convert a TOML scalar into a value.
    pub fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Integer(i) => Some(TexValue::Int(*i)),
            toml::Value::Float(f) => Some(TexValue::Float(*f)),
            toml::Value::String(s) => Some(TexValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for TexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&FormatSpec::default().apply(self))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TexValue {
                fn from(value: $ty) -> Self {
                    TexValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for TexValue {
    fn from(value: f32) -> Self {
        TexValue::Float(f64::from(value))
    }
}

impl From<f64> for TexValue {
    fn from(value: f64) -> Self {
        TexValue::Float(value)
    }
}

impl From<&str> for TexValue {
    fn from(value: &str) -> Self {
        TexValue::Text(value.to_string())
    }
}

impl From<String> for TexValue {
    fn from(value: String) -> Self {
        TexValue::Text(value)
    }
}

/// Alignment within the field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `^`
    Center,
    /// `=`: padding goes between the sign and the digits.
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        }
    }

    fn as_char(&self) -> char {
        match self {
            Align::Left => '<',
            Align::Right => '>',
            Align::Center => '^',
            Align::AfterSign => '=',
        }
    }
}

/// Sign handling for numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sign {
    /// Only negative numbers get a sign.
    #[default]
    Minus,
    /// Always print a sign.
    Plus,
    /// A space for positive numbers, `-` for negative ones.
    Space,
}

/// Thousands separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Comma,
    Underscore,
}

impl Grouping {
    fn as_char(&self) -> char {
        match self {
            Grouping::Comma => ',',
            Grouping::Underscore => '_',
        }
    }
}

/// Presentation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// `d`
    Decimal,
    /// `f` / `F`
    Fixed { upper: bool },
    /// `e` / `E`
    Exponent { upper: bool },
    /// `g` / `G`
    General { upper: bool },
    /// `%`
    Percent,
    /// `s`
    Str,
}

impl FormatType {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(FormatType::Decimal),
            'f' => Some(FormatType::Fixed { upper: false }),
            'F' => Some(FormatType::Fixed { upper: true }),
            'e' => Some(FormatType::Exponent { upper: false }),
            'E' => Some(FormatType::Exponent { upper: true }),
            'g' => Some(FormatType::General { upper: false }),
            'G' => Some(FormatType::General { upper: true }),
            '%' => Some(FormatType::Percent),
            's' => Some(FormatType::Str),
            _ => None,
        }
    }

    fn as_char(&self) -> char {
        match self {
            FormatType::Decimal => 'd',
            FormatType::Fixed { upper: false } => 'f',
            FormatType::Fixed { upper: true } => 'F',
            FormatType::Exponent { upper: false } => 'e',
            FormatType::Exponent { upper: true } => 'E',
            FormatType::General { upper: false } => 'g',
            FormatType::General { upper: true } => 'G',
            FormatType::Percent => '%',
            FormatType::Str => 's',
        }
    }

    fn is_upper(&self) -> bool {
        matches!(
            self,
            FormatType::Fixed { upper: true }
                | FormatType::Exponent { upper: true }
                | FormatType::General { upper: true }
        )
    }
}

/// A parsed format spec.
///
/// The empty spec renders integers as decimals, floats in their shortest
/// round-trip form and text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub sign: Sign,
    pub alternate: bool,
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub grouping: Option<Grouping>,
    pub precision: Option<usize>,
    pub ty: Option<FormatType>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            sign: Sign::Minus,
            alternate: false,
            zero_pad: false,
            width: None,
            grouping: None,
            precision: None,
            ty: None,
        }
    }
}

impl FormatSpec {
    /// Parse a format spec.
    pub fn parse(spec: &str) -> Result<Self> {
        spec.parse()
    }

    /// Fixed-point spec with the given number of decimals (`.{n}f`).
    pub fn fixed(precision: usize) -> Self {
        Self {
            precision: Some(precision),
            ty: Some(FormatType::Fixed { upper: false }),
            ..Self::default()
        }
    }

    /// Check if this is the empty spec.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Render a value.
    pub fn apply(&self, value: &TexValue) -> String {
        match value {
            TexValue::Text(text) => {
                let body = match (self.ty, self.precision) {
                    (None | Some(FormatType::Str), Some(p)) => text.chars().take(p).collect(),
                    _ => text.clone(),
                };
                self.pad("", &body, Align::Left)
            }
            TexValue::Int(i) => match self.ty {
                None | Some(FormatType::Decimal) | Some(FormatType::Str) => {
                    let sign = self.sign_str(*i < 0);
                    let body = self.group(&i.unsigned_abs().to_string(), sign);
                    self.pad(sign, &body, Align::Right)
                }
                Some(_) => self.apply_float(*i as f64),
            },
            TexValue::Float(f) => self.apply_float(*f),
        }
    }

    fn apply_float(&self, value: f64) -> String {
        let negative = value.is_sign_negative() && !value.is_nan();
        let abs = value.abs();
        let upper = self.ty.is_some_and(|t| t.is_upper());

        if !abs.is_finite() {
            let mut body = if abs.is_nan() { "nan" } else { "inf" }.to_string();
            if upper {
                body = body.to_uppercase();
            }
            if self.ty == Some(FormatType::Percent) {
                body.push('%');
            }
            return self.pad(self.sign_str(negative), &body, Align::Right);
        }

        let body = match self.ty {
            None | Some(FormatType::Str) => match self.precision {
                Some(p) => {
                    // like `g`, but fixed notation keeps a fractional digit
                    let mut s = general(abs, p, self.alternate, false);
                    if !s.contains(['.', 'e']) {
                        s.push_str(".0");
                    }
                    s
                }
                None => repr(abs),
            },
            Some(FormatType::Decimal) => format!("{:.0}", abs),
            Some(FormatType::Fixed { .. }) => {
                let p = self.precision.unwrap_or(6);
                let mut s = format!("{:.*}", p, abs);
                if p == 0 && self.alternate {
                    s.push('.');
                }
                s
            }
            Some(FormatType::Exponent { upper }) => {
                let p = self.precision.unwrap_or(6);
                let mut s = exponent(abs, p, upper);
                if p == 0 && self.alternate {
                    s.insert(1, '.');
                }
                s
            }
            Some(FormatType::General { upper }) => {
                general(abs, self.precision.unwrap_or(6), self.alternate, upper)
            }
            Some(FormatType::Percent) => {
                format!("{:.*}%", self.precision.unwrap_or(6), abs * 100.0)
            }
        };

        // -0.4 rounded to "0" has no meaningful sign
        let negative = negative && body.bytes().any(|b| (b'1'..=b'9').contains(&b));
        let sign = self.sign_str(negative);
        let body = self.group(&body, sign);
        self.pad(sign, &body, Align::Right)
    }

    fn sign_str(&self, negative: bool) -> &'static str {
        match (negative, self.sign) {
            (true, _) => "-",
            (false, Sign::Plus) => "+",
            (false, Sign::Space) => " ",
            (false, Sign::Minus) => "",
        }
    }

    /// Insert the thousands separator into the leading run of digits.
    ///
    /// With the `0` flag the digits are zero-filled before grouping, so the
    /// fill is grouped too (`08,d` on 1234 gives `0,001,234`).
    fn group(&self, body: &str, sign: &str) -> String {
        let Some(grouping) = self.grouping else {
            return body.to_string();
        };
        let split = body
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(body.len());
        let (digits, rest) = body.split_at(split);

        let separator = grouping.as_char();
        let mut digits = digits.to_string();
        let mut grouped = insert_separators(&digits, separator);
        if self.align.is_none() && self.zero_pad {
            let min = self
                .width
                .unwrap_or(0)
                .saturating_sub(sign.chars().count() + rest.chars().count());
            while grouped.chars().count() < min {
                digits.insert(0, '0');
                grouped = insert_separators(&digits, separator);
            }
        }
        grouped.push_str(rest);
        grouped
    }

    fn pad(&self, sign: &str, body: &str, default_align: Align) -> String {
        let len = sign.chars().count() + body.chars().count();
        let width = self.width.unwrap_or(0);
        if len >= width {
            return format!("{}{}", sign, body);
        }

        let (fill, align) = match (self.align, self.zero_pad) {
            (Some(align), _) => (self.fill, align),
            (None, true) => ('0', Align::AfterSign),
            (None, false) => (self.fill, default_align),
        };
        let n = width - len;
        let filler = |count: usize| fill.to_string().repeat(count);

        match align {
            Align::Left => format!("{}{}{}", sign, body, filler(n)),
            Align::Right => format!("{}{}{}", filler(n), sign, body),
            Align::Center => format!("{}{}{}{}", filler(n / 2), sign, body, filler(n - n / 2)),
            Align::AfterSign => format!("{}{}{}", sign, filler(n), body),
        }
    }
}

fn insert_separators(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Shortest round-trip representation, always with a fractional part or an
/// exponent (`1.0`, `0.25`, `1e+20`).
fn repr(value: f64) -> String {
    if value != 0.0 && !(1e-4..1e16).contains(&value) {
        let s = format!("{:e}", value);
        return normalize_exponent(&s, false);
    }
    let s = format!("{}", value);
    if s.contains('.') { s } else { format!("{}.0", s) }
}

/// Scientific notation with a signed, at least two digit exponent.
fn exponent(value: f64, precision: usize, upper: bool) -> String {
    normalize_exponent(&format!("{:.*e}", precision, value), upper)
}

/// Turn Rust's `1.5e3` into `1.5e+03`.
fn normalize_exponent(s: &str, upper: bool) -> String {
    let (mantissa, exp) = s.split_once('e').unwrap_or((s, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}{}{:02}", mantissa, marker, sign, exp.abs())
}

/// General format: fixed or scientific depending on the magnitude, trailing
/// zeros removed unless `alternate` is set.
fn general(value: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let p = precision.max(1);
    let exp = if value == 0.0 {
        0
    } else {
        let s = format!("{:.*e}", p - 1, value);
        s.split_once('e')
            .and_then(|(_, e)| e.parse::<i32>().ok())
            .unwrap_or(0)
    };

    let body = if (-4..p as i32).contains(&exp) {
        format!("{:.*}", (p as i32 - 1 - exp) as usize, value)
    } else {
        exponent(value, p - 1, upper)
    };

    if alternate {
        return body;
    }
    match body.find(['e', 'E']) {
        Some(idx) => {
            let (mantissa, exp) = body.split_at(idx);
            format!("{}{}", strip_zeros(mantissa), exp)
        }
        None => strip_zeros(&body).to_string(),
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl FromStr for FormatSpec {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut out = FormatSpec::default();
        let mut i = 0;

        if let Some(align) = chars.get(1).and_then(|c| Align::from_char(*c)) {
            out.fill = chars[0];
            out.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().and_then(|c| Align::from_char(*c)) {
            out.align = Some(align);
            i = 1;
        }

        match chars.get(i) {
            Some('+') => {
                out.sign = Sign::Plus;
                i += 1;
            }
            Some('-') => i += 1,
            Some(' ') => {
                out.sign = Sign::Space;
                i += 1;
            }
            _ => {}
        }

        if chars.get(i) == Some(&'#') {
            out.alternate = true;
            i += 1;
        }
        if chars.get(i) == Some(&'0') {
            out.zero_pad = true;
            i += 1;
        }

        let (width, next) = parse_number(&chars, i);
        out.width = width;
        i = next;

        match chars.get(i) {
            Some(',') => {
                out.grouping = Some(Grouping::Comma);
                i += 1;
            }
            Some('_') => {
                out.grouping = Some(Grouping::Underscore);
                i += 1;
            }
            _ => {}
        }

        if chars.get(i) == Some(&'.') {
            let (precision, next) = parse_number(&chars, i + 1);
            if precision.is_none() {
                return Err(Error::invalid_format(spec, "missing precision after '.'"));
            }
            out.precision = precision;
            i = next;
        }

        if let Some(c) = chars.get(i) {
            match FormatType::from_char(*c) {
                Some(ty) => {
                    out.ty = Some(ty);
                    i += 1;
                }
                None => {
                    return Err(Error::invalid_format(
                        spec,
                        format!("unknown format code '{}'", c),
                    ));
                }
            }
        }

        if i != chars.len() {
            return Err(Error::invalid_format(spec, "unexpected trailing characters"));
        }

        match out.ty {
            Some(FormatType::Decimal) if out.precision.is_some() => Err(Error::invalid_format(
                spec,
                "precision is not allowed with 'd'",
            )),
            Some(FormatType::Str) if out.grouping.is_some() => Err(Error::invalid_format(
                spec,
                "grouping is not allowed with 's'",
            )),
            Some(FormatType::Str) if out.sign != Sign::Minus => Err(Error::invalid_format(
                spec,
                "a sign is not allowed with 's'",
            )),
            _ => Ok(out),
        }
    }
}

fn parse_number(chars: &[char], start: usize) -> (Option<usize>, usize) {
    let end = chars[start.min(chars.len())..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(chars.len(), |p| start + p);
    if end == start {
        return (None, start);
    }
    let digits: String = chars[start..end].iter().collect();
    (digits.parse().ok(), end)
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(align) = self.align {
            if self.fill != ' ' {
                write!(f, "{}", self.fill)?;
            }
            write!(f, "{}", align.as_char())?;
        }
        match self.sign {
            Sign::Minus => {}
            Sign::Plus => f.write_str("+")?,
            Sign::Space => f.write_str(" ")?,
        }
        if self.alternate {
            f.write_str("#")?;
        }
        if self.zero_pad {
            f.write_str("0")?;
        }
        if let Some(width) = self.width {
            write!(f, "{}", width)?;
        }
        if let Some(grouping) = self.grouping {
            write!(f, "{}", grouping.as_char())?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{}", precision)?;
        }
        if let Some(ty) = self.ty {
            write!(f, "{}", ty.as_char())?;
        }
        Ok(())
    }
}
