//! Printf-style positional formatting.
//!
//! [`DynString::format`](crate::DynString::format) substitutes positional
//! arguments into a template using a subset of the classic `printf` syntax:
//! the conversions `%b %c %d %e %E %f %F %o %s %u %x %X %%`, the flags
//! `- + 0 space`, a decimal width and a `.`-precision. Supplying fewer
//! arguments than the template consumes is an error; extra arguments are
//! ignored.

use crate::error::FormatError;
use crate::string::DynString;

/// A positional argument for template formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// A signed integer argument.
    Int(i64),
    /// An unsigned integer argument.
    Uint(u64),
    /// A floating-point argument.
    Float(f64),
    /// A text argument.
    Str(String),
    /// A single-character argument.
    Char(char),
}

macro_rules! impl_from_primitive {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for FormatArg {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

impl_from_primitive!(Int: i8, i16, i32, i64);
impl_from_primitive!(Uint: u8, u16, u32, u64);
impl_from_primitive!(Float: f32, f64);

impl From<isize> for FormatArg {
    #[inline]
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for FormatArg {
    #[inline]
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<&str> for FormatArg {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FormatArg {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<char> for FormatArg {
    #[inline]
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&DynString> for FormatArg {
    #[inline]
    fn from(value: &DynString) -> Self {
        Self::Str(value.to_text())
    }
}

impl FormatArg {
    fn as_i64(&self) -> i64 {
        match self {
            Self::Int(v) => *v,
            Self::Uint(v) => *v as i64,
            Self::Float(v) => *v as i64,
            Self::Char(c) => *c as i64,
            Self::Str(s) => leading_i64(s),
        }
    }

    fn as_u64(&self) -> u64 {
        match self {
            Self::Int(v) => *v as u64,
            Self::Uint(v) => *v,
            Self::Float(v) => *v as i64 as u64,
            Self::Char(c) => *c as u64,
            Self::Str(s) => leading_i64(s) as u64,
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Uint(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Char(c) => *c as u32 as f64,
            Self::Str(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    fn as_display(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Uint(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Char(c) => c.to_string(),
            Self::Str(s) => s.clone(),
        }
    }

    fn as_char(&self) -> char {
        match self {
            Self::Char(c) => *c,
            Self::Int(v) => char::from_u32(*v as u32).unwrap_or('?'),
            Self::Uint(v) => char::from_u32(*v as u32).unwrap_or('?'),
            Self::Float(_) => '?',
            Self::Str(s) => s.chars().next().unwrap_or('?'),
        }
    }
}

/// Parses an optional sign plus leading decimal digits, ignoring the rest.
fn leading_i64(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(d as i64);
    }
    if negative { -value } else { value }
}

#[derive(Debug, Clone, Copy)]
struct Placeholder {
    left_align: bool,
    plus: bool,
    space: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

enum Segment {
    Literal(String),
    Arg(Placeholder),
}

fn parse(template: &str) -> Result<Vec<Segment>, FormatError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut iter = template.char_indices().peekable();

    while let Some((position, c)) = iter.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let mut left_align = false;
        let mut plus = false;
        let mut space = false;
        let mut zero_pad = false;
        while let Some(&(_, flag)) = iter.peek() {
            match flag {
                '-' => left_align = true,
                '+' => plus = true,
                ' ' => space = true,
                '0' => zero_pad = true,
                _ => break,
            }
            iter.next();
        }

        let mut width = 0usize;
        while let Some(&(_, digit)) = iter.peek() {
            let Some(d) = digit.to_digit(10) else { break };
            width = width * 10 + d as usize;
            iter.next();
        }

        let mut precision = None;
        if matches!(iter.peek(), Some(&(_, '.'))) {
            iter.next();
            let mut value = 0usize;
            while let Some(&(_, digit)) = iter.peek() {
                let Some(d) = digit.to_digit(10) else { break };
                value = value * 10 + d as usize;
                iter.next();
            }
            precision = Some(value);
        }

        match iter.next() {
            None => return Err(FormatError::TruncatedPlaceholder { position }),
            Some((_, '%')) => literal.push('%'),
            Some((_, conversion @ ('b' | 'c' | 'd' | 'e' | 'E' | 'f' | 'F' | 'o' | 's' | 'u' | 'x' | 'X'))) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Arg(Placeholder {
                    left_align,
                    plus,
                    space,
                    zero_pad,
                    width,
                    precision,
                    conversion,
                }));
            }
            Some((_, conversion)) => {
                return Err(FormatError::UnknownConversion {
                    conversion,
                    position,
                });
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Renders a template against positional arguments.
pub(crate) fn vformat(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let segments = parse(template)?;
    let required = segments
        .iter()
        .filter(|segment| matches!(segment, Segment::Arg(_)))
        .count();
    if required > args.len() {
        return Err(FormatError::MissingArguments {
            required,
            provided: args.len(),
        });
    }

    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Arg(ph) => {
                render_into(&mut out, &ph, &args[next]);
                next += 1;
            }
        }
    }
    Ok(out)
}

fn sign_prefix(negative: bool, ph: &Placeholder) -> &'static str {
    if negative {
        "-"
    } else if ph.plus {
        "+"
    } else if ph.space {
        " "
    } else {
        ""
    }
}

fn render_into(out: &mut String, ph: &Placeholder, arg: &FormatArg) {
    let rendered = match ph.conversion {
        's' => {
            let mut text = arg.as_display();
            if let Some(precision) = ph.precision {
                text = text.chars().take(precision).collect();
            }
            text
        }
        'd' => {
            let value = arg.as_i64();
            format!("{}{}", sign_prefix(value < 0, ph), value.unsigned_abs())
        }
        'u' => arg.as_u64().to_string(),
        'x' => format!("{:x}", arg.as_u64()),
        'X' => format!("{:X}", arg.as_u64()),
        'o' => format!("{:o}", arg.as_u64()),
        'b' => format!("{:b}", arg.as_u64()),
        'c' => arg.as_char().to_string(),
        'f' | 'F' => {
            let value = arg.as_f64();
            let precision = ph.precision.unwrap_or(6);
            format!(
                "{}{:.*}",
                sign_prefix(value.is_sign_negative(), ph),
                precision,
                value.abs()
            )
        }
        'e' | 'E' => {
            let value = arg.as_f64();
            let precision = ph.precision.unwrap_or(6);
            let mut text = format!(
                "{}{:.*e}",
                sign_prefix(value.is_sign_negative(), ph),
                precision,
                value.abs()
            );
            if ph.conversion == 'E' {
                text.make_ascii_uppercase();
            }
            text
        }
        // parse() only admits the conversions above
        _ => String::new(),
    };

    pad_into(out, &rendered, ph);
}

fn is_numeric(conversion: char) -> bool {
    matches!(conversion, 'b' | 'd' | 'e' | 'E' | 'f' | 'F' | 'o' | 'u' | 'x' | 'X')
}

fn pad_into(out: &mut String, rendered: &str, ph: &Placeholder) {
    let len = rendered.chars().count();
    if ph.width <= len {
        out.push_str(rendered);
        return;
    }
    let pad = ph.width - len;

    if ph.left_align {
        out.push_str(rendered);
        out.extend(std::iter::repeat(' ').take(pad));
    } else if ph.zero_pad && is_numeric(ph.conversion) {
        // Zeros are inserted after any sign.
        let (sign, digits) = match rendered.strip_prefix(['-', '+', ' ']) {
            Some(rest) => (&rendered[..1], rest),
            None => ("", rendered),
        };
        out.push_str(sign);
        out.extend(std::iter::repeat('0').take(pad));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat(' ').take(pad));
        out.push_str(rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positionally() {
        let args = [FormatArg::from("world"), FormatArg::from(3_i32)];
        assert_eq!(vformat("hello %s, take %d", &args).unwrap(), "hello world, take 3");
    }

    #[test]
    fn literal_percent_consumes_no_argument() {
        assert_eq!(vformat("100%%", &[]).unwrap(), "100%");
    }

    #[test]
    fn width_and_zero_padding() {
        let args = [FormatArg::from(-42_i32)];
        assert_eq!(vformat("%05d", &args).unwrap(), "-0042");
        let args = [FormatArg::from(7_i32)];
        assert_eq!(vformat("%-4d|", &args).unwrap(), "7   |");
    }

    #[test]
    fn float_precision() {
        let args = [FormatArg::from(1.5_f64)];
        assert_eq!(vformat("%.2f", &args).unwrap(), "1.50");
    }

    #[test]
    fn hex_of_negative_uses_twos_complement() {
        let args = [FormatArg::from(-1_i64)];
        assert_eq!(vformat("%X", &args).unwrap(), "FFFFFFFFFFFFFFFF");
    }

    #[test]
    fn too_few_arguments_is_an_error() {
        let args = [FormatArg::from("only one")];
        assert_eq!(
            vformat("%s and %s", &args),
            Err(FormatError::MissingArguments {
                required: 2,
                provided: 1
            })
        );
    }

    #[test]
    fn unknown_conversion_is_an_error() {
        assert!(matches!(
            vformat("%q", &[]),
            Err(FormatError::UnknownConversion { conversion: 'q', .. })
        ));
    }

    #[test]
    fn truncated_placeholder_is_an_error() {
        assert!(matches!(
            vformat("broken %", &[]),
            Err(FormatError::TruncatedPlaceholder { .. })
        ));
    }
}
