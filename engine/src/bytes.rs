//! Byte units, in-memory MD5 and human-readable byte counts.
//!
//! Units are binary (1 ko = 1024 octets) and labelled the French way:
//! `o`, `ko`, `Mo`, `Go`, `To`.

/// Bits in an octet.
pub const OCTET: i64 = 8;
pub const KILOOCTET: i64 = 1024;
pub const MEGAOCTET: i64 = 1024 * KILOOCTET;
pub const GIGAOCTET: i64 = 1024 * MEGAOCTET;
pub const TERAOCTET: i64 = 1024 * GIGAOCTET;
pub const PETAOCTET: i64 = 1024 * TERAOCTET;

/// MD5 digest of `data` as lowercase hex.
pub fn data_md5(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// Pick the display unit for `octets` and its divisor.
fn unit_for(octets: i64) -> (&'static str, f64) {
    if octets < KILOOCTET {
        ("o", 1.0)
    } else if octets < MEGAOCTET {
        ("ko", KILOOCTET as f64)
    } else if octets < GIGAOCTET {
        ("Mo", MEGAOCTET as f64)
    } else if octets < TERAOCTET {
        ("Go", GIGAOCTET as f64)
    } else {
        ("To", TERAOCTET as f64)
    }
}

/// Format a byte count with four significant digits, e.g. `1.5 ko`.
pub fn format_octets(octets: i64) -> String {
    let (unit, divisor) = unit_for(octets);
    format!("{} {}", format_significant(octets as f64 / divisor, 4), unit)
}

/// Format progress as `done / total unit`, one decimal each.
///
/// The unit is chosen from `done`, so both values read on the same scale.
pub fn format_octets_pair(done: i64, total: i64) -> String {
    let (unit, divisor) = unit_for(done);
    format!(
        "{:.1} / {:.1} {}",
        done as f64 / divisor,
        total as f64 / divisor,
        unit
    )
}

/// `%g`-style formatting: `precision` significant digits, trailing zeros
/// dropped, scientific notation for very large or small exponents.
fn format_significant(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
