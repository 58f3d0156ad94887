//! Display formatting for numbers, percentages and plurals.

/// Split `n` into sign, whole-part digits and hundredths after rounding to
/// cents. The whole part stays in `f64` so huge values print exactly.
fn to_cents(n: f64) -> (bool, String, u8) {
    let abs = n.abs();
    let mut whole = abs.trunc();
    let mut cents = ((abs - whole) * 100.0).round();
    if cents >= 100.0 {
        whole += 1.0;
        cents = 0.0;
    }
    let negative = n < 0.0 && (whole > 0.0 || cents > 0.0);
    (negative, format!("{whole:.0}"), cents as u8)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn render(n: f64, grouped: bool) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let (negative, whole, frac) = to_cents(n);
    let sign = if negative { "-" } else { "" };
    let whole = if grouped {
        group_thousands(&whole)
    } else {
        whole
    };
    if frac == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac:02}")
    }
}

/// Format for reading: `1234567.891` becomes `1,234,567.89`.
///
/// Whole numbers have no fractional part.
pub fn format_number(n: f64) -> String {
    render(n, true)
}

/// Format for an input field: like [`format_number`] without grouping.
pub fn format_input_number(n: f64) -> String {
    render(n, false)
}

/// `0.456` becomes `46%`.
pub fn format_percentage(n: f64) -> String {
    format!("{}%", (100.0 * n).round() as i64)
}

/// Pick `singular` when `n == 1`, otherwise `plural`.
pub fn plural<'a>(n: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if n == 1 {
        singular
    } else {
        plural
    }
}

/// The common case: no suffix for one, `s` for the rest.
pub fn plural_s(n: usize) -> &'static str {
    plural(n, "", "s")
}
