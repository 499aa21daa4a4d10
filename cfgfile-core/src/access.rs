//! Typed getters and setters over a parsed document.
//!
//! Lookups address a key by section name and key name. When a section
//! name repeats, the sections are searched in file order and the first
//! matching key wins.
//!
//! The `get_*` family returns a caller-supplied default when the key is
//! missing or its value does not convert. The `try_*` family returns an
//! `Option` instead, which keeps "absent or unparsable" apart from a value
//! that really is zero.
//!
//! Setters replace the stored value in place. They never create sections
//! or keys.

use crate::charclass::{is_blank, is_value_char};
use crate::document::{Document, KeyValue};
use crate::error::{Error, Result};

const TRUE_STRING: &str = "TRUE";
const FALSE_STRING: &str = "FALSE";

impl Document {
    /// The first pair for `key` among the sections named `section`.
    pub fn lookup(&self, section: &str, key: &str) -> Option<&KeyValue> {
        self.find(section, key).and_then(|id| self.get_keyvalue(id))
    }

    /// `TRUE`/`FALSE` in any case.
    pub fn try_bool(&self, section: &str, key: &str) -> Option<bool> {
        let value = self.lookup(section, key)?.value();
        if value.eq_ignore_ascii_case(TRUE_STRING) {
            Some(true)
        } else if value.eq_ignore_ascii_case(FALSE_STRING) {
            Some(false)
        } else {
            None
        }
    }

    /// Leading integer of the value, like C `atoi`: `8080ms` reads as
    /// 8080. `None` when no digits lead or the number overflows.
    pub fn try_int(&self, section: &str, key: &str) -> Option<i64> {
        leading_int(self.lookup(section, key)?.value())
    }

    /// Finite floating point values only.
    pub fn try_double(&self, section: &str, key: &str) -> Option<f64> {
        self.lookup(section, key)?
            .value()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.try_bool(section, key).unwrap_or(default)
    }

    /// Integer value, or `default` when the key is missing, unparsable, or
    /// parses as zero. A stored zero is indistinguishable from a failed
    /// conversion here; use [`Document::try_int`] to tell them apart.
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        match self.try_int(section, key) {
            Some(0) | None => default,
            Some(v) => v,
        }
    }

    pub fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.try_double(section, key).unwrap_or(default)
    }

    pub fn get_string<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.lookup(section, key).map_or(default, KeyValue::value)
    }

    pub fn set_bool(&mut self, section: &str, key: &str, value: bool) -> Result<()> {
        let text = if value { TRUE_STRING } else { FALSE_STRING };
        self.replace_value(section, key, text.to_string())
    }

    pub fn set_int(&mut self, section: &str, key: &str, value: i64) -> Result<()> {
        self.replace_value(section, key, value.to_string())
    }

    pub fn set_double(&mut self, section: &str, key: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::NonFinite(value));
        }
        self.replace_value(section, key, format_double(value))
    }

    /// Replace a value with arbitrary text. The text must read back as the
    /// same value: value characters and interior blanks only.
    pub fn set_string(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        validate_value(value)?;
        self.replace_value(section, key, value.to_string())
    }

    fn replace_value(&mut self, section: &str, key: &str, value: String) -> Result<()> {
        let id = self.find(section, key).ok_or_else(|| Error::KeyNotFound {
            section: section.to_string(),
            key: key.to_string(),
        })?;
        tracing::trace!(section, key, value = %value, "set value");
        self.keyvalue_mut(id).set_value(value);
        Ok(())
    }
}

/// Optional blanks, optional sign, then decimal digits. Trailing text is
/// ignored.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start_matches([' ', '\t']);
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn validate_value(value: &str) -> Result<()> {
    // The scanner drops blanks around a value, so they cannot be stored.
    let edge = |c: Option<char>| c.filter(|&c| c == ' ' || c == '\t');
    if let Some(found) = edge(value.chars().next()).or_else(|| edge(value.chars().last())) {
        return Err(Error::InvalidValue {
            value: value.to_string(),
            found,
        });
    }
    let bad = value.chars().find(|&c| match u8::try_from(c) {
        Ok(b'#') => true,
        Ok(b) => !(is_value_char(b) || is_blank(b)),
        Err(_) => true,
    });
    match bad {
        Some(found) => Err(Error::InvalidValue {
            value: value.to_string(),
            found,
        }),
        None => Ok(()),
    }
}

/// Shortest decimal that reads back as `value`, in exponent form for very
/// large or very small magnitudes (like C's `%g`).
fn format_double(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}
