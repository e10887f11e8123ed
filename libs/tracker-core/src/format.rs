//! Display formatting for addresses, token amounts and fiat values.
//!
//! These are the same rules the dashboard renders with, so API consumers and
//! log lines show identical strings.

/// Characters kept on each side of a truncated address
pub const DEFAULT_ADDRESS_CHARS: usize = 4;
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;
pub const DEFAULT_DISPLAY_DECIMALS: usize = 4;

/// Percentage rendered with an explicit sign plus trend flags
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedPercentage {
    pub formatted: String,
    pub is_positive: bool,
    pub is_negative: bool,
}

/// Truncate an address to `0x1234...abcd`, keeping the `0x` prefix plus `chars`
/// characters in front and `chars` characters at the end.
pub fn format_address(address: &str, chars: usize) -> String {
    let len = address.chars().count();
    if len <= chars * 2 + 2 {
        return address.to_string();
    }

    let head: String = address.chars().take(chars + 2).collect();
    let tail: String = address.chars().skip(len - chars).collect();
    format!("{head}...{tail}")
}

/// Convert a raw amount in smallest units (wei-like) into whole tokens.
///
/// Returns `None` when the input is not a finite number.
pub fn to_token_units(amount: &str, decimals: u32) -> Option<f64> {
    let raw = amount.trim().parse::<f64>().ok()?;
    if !raw.is_finite() {
        return None;
    }

    let scaled = raw / 10f64.powi(decimals as i32);
    scaled.is_finite().then_some(scaled)
}

/// Human readable token amount with thousands separators and at most
/// `display_decimals` fraction digits. Unparsable input renders as `"0"`.
pub fn format_crypto_amount(amount: &str, decimals: u32, display_decimals: usize) -> String {
    match to_token_units(amount, decimals) {
        Some(units) => group_number(units, display_decimals, true),
        None => "0".to_string(),
    }
}

/// US dollar amount, e.g. `$1,234.56` or `-$0.50`.
pub fn format_usd(amount: f64) -> String {
    let body = group_number(amount.abs(), 2, false);
    // the sign survives rounding: -0.001 is `-$0.00`
    if amount < 0.0 {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Signed percentage with two decimals; zero renders as `+0.00%`.
pub fn format_percentage(percentage: f64) -> FormattedPercentage {
    // fold -0.0 into 0.0 so it gets the positive sign
    let value = if percentage == 0.0 { 0.0 } else { percentage };
    let sign = if value >= 0.0 { "+" } else { "" };

    FormattedPercentage {
        formatted: format!("{sign}{value:.2}%"),
        is_positive: value > 0.0,
        is_negative: value < 0.0,
    }
}

fn group_number(value: f64, fraction_digits: usize, trim_zeros: bool) -> String {
    let fixed = format!("{:.*}", fraction_digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let frac = if trim_zeros {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = grouped.chars().all(|c| matches!(c, '0' | ',' | '.'));
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}
