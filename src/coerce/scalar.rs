//! String to typed-value conversions with no knowledge of trees.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::format::{self, ParseErrorKind, Parsed, StrftimeItems};
use chrono::{NaiveDateTime, NaiveTime};
use url::Url;

use super::style::{Color, Font};
use super::{CoercionError, PathNormalizer};

/// Date, time with fractional seconds and meridiem: `2005-10-06 2:22:55.1 PM`.
pub const DATE_MILLISECONDS_FORMAT: &str = "%Y-%m-%d %I:%M:%S%.f %p";
/// Date, time and meridiem: `2005-10-06 2:22:55PM`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %I:%M:%S%p";
/// Date only, read as midnight: `2005-10-06`.
pub const ONLY_DATE: &str = "%Y-%m-%d";

/// Formats tried by [`parse_date`], in order.
pub const DEFAULT_DATE_FORMATS: [&str; 3] = [DATE_MILLISECONDS_FORMAT, DATE_FORMAT, ONLY_DATE];

/// Schemes accepted by [`parse_url`].
pub const KNOWN_URL_SCHEMES: [&str; 6] = ["http", "https", "ftp", "file", "jar", "mailto"];

pub fn parse_int(raw: &str) -> Result<i32, CoercionError> {
    parse_integer(raw)
}

pub fn parse_long(raw: &str) -> Result<i64, CoercionError> {
    parse_integer(raw)
}

pub fn parse_float(raw: &str) -> Result<f32, CoercionError> {
    parse_floating(raw)
}

pub fn parse_double(raw: &str) -> Result<f64, CoercionError> {
    parse_floating(raw)
}

fn parse_integer<N>(raw: &str) -> Result<N, CoercionError>
where
    N: FromStr<Err = std::num::ParseIntError>,
{
    raw.parse().map_err(|source| CoercionError::Integer {
        input: raw.to_string(),
        source,
    })
}

fn parse_floating<N>(raw: &str) -> Result<N, CoercionError>
where
    N: FromStr<Err = std::num::ParseFloatError>,
{
    raw.parse().map_err(|source| CoercionError::Float {
        input: raw.to_string(),
        source,
    })
}

/// `true` for any casing of "true", `false` for everything else.
pub fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Parses `raw` against [`DEFAULT_DATE_FORMATS`].
pub fn parse_date(raw: &str) -> Result<NaiveDateTime, CoercionError> {
    parse_date_with(&DEFAULT_DATE_FORMATS, raw)
}

/// Tries each `strftime`-style format in order and returns the first match.
///
/// Formats without time fields yield midnight. When nothing matches, the error
/// carries the last format tried.
pub fn parse_date_with<S: AsRef<str>>(
    formats: &[S],
    raw: &str,
) -> Result<NaiveDateTime, CoercionError> {
    let mut last_failure = None;

    for format in formats {
        let format = format.as_ref();
        match parse_with_format(raw, format) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => last_failure = Some((format, e)),
        }
    }

    Err(match last_failure {
        Some((format, source)) => CoercionError::Date {
            input: raw.to_string(),
            format: format.to_string(),
            source,
        },
        None => CoercionError::NoDateFormats {
            input: raw.to_string(),
        },
    })
}

fn parse_with_format(raw: &str, format: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match NaiveDateTime::parse_from_str(raw, format) {
        Err(e) if e.kind() == ParseErrorKind::NotEnough => parse_partial_time(raw, format),
        other => other,
    }
}

/// Reads a format whose time fields are incomplete. Missing minutes and
/// seconds are zero, a 12-hour clock without a meridiem is AM, and a format
/// with no hour at all yields midnight.
fn parse_partial_time(raw: &str, format: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, raw, StrftimeItems::new(format))?;
    let date = parsed.to_naive_date()?;

    // setters refuse to overwrite parsed fields, so only the gaps are filled
    let _ = parsed.set_ampm(false);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);

    let time = match parsed.to_naive_time() {
        Ok(time) => time,
        Err(e) if e.kind() == ParseErrorKind::NotEnough => NaiveTime::MIN,
        Err(e) => return Err(e),
    };
    Ok(date.and_time(time))
}

/// Normalizes separators through `normalizer`. The path is not checked.
pub fn parse_file(raw: &str, normalizer: &dyn PathNormalizer) -> PathBuf {
    PathBuf::from(normalizer.normalize(raw))
}

/// Parses an absolute URL whose scheme is in [`KNOWN_URL_SCHEMES`].
pub fn parse_url(raw: &str) -> Result<Url, CoercionError> {
    let url = Url::parse(raw).map_err(|source| CoercionError::Url {
        input: raw.to_string(),
        source,
    })?;

    if !KNOWN_URL_SCHEMES.contains(&url.scheme()) {
        return Err(CoercionError::UnknownScheme {
            input: raw.to_string(),
            scheme: url.scheme().to_string(),
        });
    }

    Ok(url)
}

/// Splits on commas. Tokens are not trimmed.
pub fn parse_array(raw: &str) -> Box<[String]> {
    parse_list(raw).into_boxed_slice()
}

/// Splits on commas. Tokens are not trimmed.
pub fn parse_list(raw: &str) -> Vec<String> {
    split_tokens(raw, |c| c == ',')
}

/// Parses `key=value,key=value`. Tokens split on both `,` and `=` are paired
/// up in order; an unpaired trailing token is dropped.
pub fn parse_map(raw: &str) -> HashMap<String, String> {
    let mut tokens = split_tokens(raw, |c| c == ',' || c == '=').into_iter();
    let mut map = HashMap::new();

    while let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
        map.insert(key, value);
    }

    map
}

pub fn parse_color(raw: &str) -> Result<Color, CoercionError> {
    Color::decode(raw).map_err(|source| CoercionError::Color {
        input: raw.to_string(),
        source,
    })
}

pub fn parse_font(raw: &str) -> Font {
    Font::decode(raw)
}

/// Splits `raw` at every delimiter, dropping trailing empty tokens. Input
/// without any delimiter comes back as a single token, even when empty.
fn split_tokens(raw: &str, is_delim: impl Fn(char) -> bool) -> Vec<String> {
    let mut tokens: Vec<&str> = raw.split(is_delim).collect();
    if tokens.len() > 1 {
        while tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }
    }
    tokens.into_iter().map(String::from).collect()
}
