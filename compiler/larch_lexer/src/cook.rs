//! Literal cooking: escape processing and radix-aware number parsing.

/// Outcome of unescaping a string literal body.
pub struct CookedString {
    pub value: String,
    /// Escape characters that were not recognized, in source order.
    pub bad_escapes: Vec<char>,
}

/// Apply escape sequences to the body of a string literal (quotes already
/// stripped). Recognized escapes: `\n`, `\t`, `\\`, `\"`, `\0`. An
/// unrecognized escape contributes `'0'` and is reported.
pub fn unescape(body: &str) -> CookedString {
    let mut value = String::with_capacity(body.len());
    let mut bad_escapes = Vec::new();
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('\\') => value.push('\\'),
            Some('"') => value.push('"'),
            Some('0') => value.push('\0'),
            Some(other) => {
                bad_escapes.push(other);
                value.push('0');
            }
            // A trailing backslash cannot appear in a matched literal.
            None => bad_escapes.push('\\'),
        }
    }
    CookedString { value, bad_escapes }
}

/// Parse a numeral with an optional fractional part in the given base.
/// `text` holds digits and at most one `'.'`, as guaranteed by the token
/// patterns.
pub fn parse_radix(base: u32, text: &str) -> f64 {
    let mut value = 0.0;
    let mut fraction_scale = f64::from(base);
    let mut after_point = false;
    for c in text.chars() {
        if c == '.' {
            after_point = true;
            continue;
        }
        let digit = f64::from(c.to_digit(base).unwrap_or(0));
        if after_point {
            value += digit / fraction_scale;
            fraction_scale *= f64::from(base);
        } else {
            value = value * f64::from(base) + digit;
        }
    }
    value
}

#[cfg(test)]
mod tests;
