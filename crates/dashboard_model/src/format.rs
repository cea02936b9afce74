use chrono::{DateTime, NaiveDate, Utc};

/// Compact amount with a currency suffix: `1.5B USD`, `2.3M KES`, `12.0K UGX`,
/// and grouped digits below one thousand.
#[must_use]
pub fn compact_currency(amount: f64, currency: &str) -> String {
    let magnitude = amount.abs();
    let compact = if magnitude >= 1_000_000_000.0 {
        format!("{:.1}B", amount / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}K", amount / 1_000.0)
    } else {
        group_thousands(amount)
    };
    if currency.is_empty() {
        compact
    } else {
        format!("{compact} {currency}")
    }
}

/// Thousands separators with at most two decimals, trailing zeros dropped.
#[must_use]
pub fn group_thousands(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if negative && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// `$12,500` style amount used by ledger totals.
#[must_use]
pub fn dollars(amount: f64) -> String {
    let grouped = group_thousands(amount);
    grouped
        .strip_prefix('-')
        .map_or_else(|| format!("${grouped}"), |rest| format!("-${rest}"))
}

/// `2025-03-15` or an RFC 3339 timestamp → `Mar 15, 2025`. Anything
/// unparseable is returned unchanged.
#[must_use]
pub fn short_date(iso: &str) -> String {
    parse_date(iso).map_or_else(|| iso.to_string(), |date| date.format("%b %-d, %Y").to_string())
}

/// Calendar date at the start of `iso`, as written.
#[must_use]
pub fn parse_date(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso.trim().get(..10)?, "%Y-%m-%d").ok()
}

/// Whole days from `today` until `target` (negative once past).
#[must_use]
pub fn days_until(target_iso: &str, today_iso: &str) -> Option<i64> {
    Some((parse_date(target_iso)? - parse_date(today_iso)?).num_days())
}

/// Instant of an RFC 3339 timestamp, honouring its offset. A bare
/// `YYYY-MM-DD` is midnight UTC.
#[must_use]
pub fn timestamp(iso: &str) -> Option<DateTime<Utc>> {
    let iso = iso.trim();
    DateTime::parse_from_rfc3339(iso)
        .map(|instant| instant.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()?;
            Some(date.and_hms_opt(0, 0, 0)?.and_utc())
        })
}

/// `just now`, `5 minutes ago`, `3 hours ago`, `2 days ago`, then the short
/// date. Timestamps more than a minute in the future also get the date.
#[must_use]
pub fn time_ago(iso: &str, now: DateTime<Utc>) -> String {
    let Some(then) = timestamp(iso) else {
        return iso.to_string();
    };
    let elapsed = (now - then).num_seconds();
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };
    match elapsed {
        -59..=59 => "just now".to_string(),
        60..=3_599 => plural(elapsed / 60, "minute"),
        3_600..=86_399 => plural(elapsed / 3_600, "hour"),
        86_400..=604_799 => plural(elapsed / 86_400, "day"),
        _ => short_date(iso),
    }
}
