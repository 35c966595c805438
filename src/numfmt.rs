//! Number formatting.
//!
//! Formats cached cell values through their style's number format: builtin
//! ids (ECMA-376 18.8.30), custom `formatCode`s, and the date/time subset.
//! The goal is a faithful display string, not a reimplementation of every
//! Excel formatting corner.

/// Built-in number format ids. 0-49 are predefined by Excel.
pub const fn get_builtin_format(id: u32) -> Option<&'static str> {
    match id {
        0 => Some("General"),
        1 => Some("0"),
        2 => Some("0.00"),
        3 => Some("#,##0"),
        4 => Some("#,##0.00"),
        5 => Some("$#,##0_);($#,##0)"),
        6 => Some("$#,##0_);[Red]($#,##0)"),
        7 => Some("$#,##0.00_);($#,##0.00)"),
        8 => Some("$#,##0.00_);[Red]($#,##0.00)"),
        9 => Some("0%"),
        10 => Some("0.00%"),
        11 => Some("0.00E+00"),
        12 => Some("# ?/?"),
        13 => Some("# ??/??"),
        14 => Some("mm-dd-yy"),
        15 => Some("d-mmm-yy"),
        16 => Some("d-mmm"),
        17 => Some("mmm-yy"),
        18 => Some("h:mm AM/PM"),
        19 => Some("h:mm:ss AM/PM"),
        20 => Some("h:mm"),
        21 => Some("h:mm:ss"),
        22 => Some("m/d/yy h:mm"),
        37 => Some("#,##0 ;(#,##0)"),
        38 => Some("#,##0 ;[Red](#,##0)"),
        39 => Some("#,##0.00;(#,##0.00)"),
        40 => Some("#,##0.00;[Red](#,##0.00)"),
        41 => Some("_(* #,##0_);_(* (#,##0);_(* \"-\"_);_(@_)"),
        42 => Some("_($* #,##0_);_($* (#,##0);_($* \"-\"_);_(@_)"),
        43 => Some("_(* #,##0.00_);_(* (#,##0.00);_(* \"-\"??_);_(@_)"),
        44 => Some("_($* #,##0.00_);_($* (#,##0.00);_($* \"-\"??_);_(@_)"),
        45 => Some("mm:ss"),
        46 => Some("[h]:mm:ss"),
        47 => Some("mmss.0"),
        48 => Some("##0.0E+0"),
        49 => Some("@"),
        _ => None,
    }
}

/// Check whether a format code is a date/time format.
pub fn is_date_format(format_code: &str) -> bool {
    let lower = format_code.to_lowercase();

    // Quoted literals and [..] sections never decide the classification.
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut cleaned = String::new();
    for c in lower.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' => in_brackets = true,
            ']' => in_brackets = false,
            _ if !in_quotes && !in_brackets => cleaned.push(c),
            _ => {}
        }
    }

    cleaned.contains('y')
        || cleaned.contains('m') && !cleaned.contains('#')
        || cleaned.contains('d')
        || cleaned.contains('h')
        || cleaned.contains('s') && cleaned.contains(':')
}

fn is_scientific_format(format_code: &str) -> bool {
    let upper = format_code.to_uppercase();
    upper.contains("E+") || upper.contains("E-")
}

/// Format a numeric value using a format code.
pub fn format_number(value: f64, format_code: &str, date1904: bool) -> String {
    let code = format_code.trim();

    if code.eq_ignore_ascii_case("General") || code == "@" {
        return format_general(value);
    }
    if is_scientific_format(code) {
        return format_scientific(value, code);
    }
    if is_date_format(code) {
        return format_date(value, code, date1904);
    }
    format_numeric(value, code)
}

/// General format: integers stay integers, decimals drop trailing zeros.
#[allow(clippy::float_cmp)]
#[allow(clippy::cast_possible_truncation)]
pub fn format_general(value: f64) -> String {
    if value == value.floor() && value.abs() < 1e11 {
        format!("{}", value as i64)
    } else if value.abs() >= 1e11 || (value.abs() < 1e-4 && value != 0.0) {
        format!("{value:.5E}")
    } else {
        let s = format!("{value:.10}");
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
}

fn format_scientific(value: f64, format_code: &str) -> String {
    let mantissa_decimals = format_code
        .find('.')
        .and_then(|pos| format_code.get(pos..))
        .map_or(0, |tail| {
            tail.chars()
                .take_while(|c| *c != 'E' && *c != 'e')
                .filter(|c| *c == '0')
                .count()
        });
    let formatted = format!("{:.prec$E}", value, prec = mantissa_decimals.min(10));
    // Rust prints "2.5E3"; Excel prints "2.50E+03".
    match formatted.split_once('E') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exp),
            };
            let exp_num: u32 = digits.parse().unwrap_or(0);
            format!("{mantissa}E{sign}{exp_num:02}")
        }
        None => formatted,
    }
}

fn format_numeric(value: f64, format_code: &str) -> String {
    if format_code.contains('%') {
        let pct = value * 100.0;
        let decimals = format_code.matches('0').count().saturating_sub(1);
        return format!("{:.prec$}%", pct, prec = decimals.min(10));
    }

    let has_thousands = format_code.contains(',');
    let decimals = format_code
        .find('.')
        .and_then(|pos| format_code.get(pos..))
        .map_or(0, |tail| tail.matches('0').count());

    let formatted = if has_thousands {
        format_with_thousands(value, decimals)
    } else {
        format!("{:.prec$}", value, prec = decimals.min(10))
    };

    let mut result = formatted;
    for symbol in ['$', '€', '£'] {
        if format_code.contains(symbol) {
            result.insert(0, symbol);
            break;
        }
    }
    result
}

fn format_with_thousands(value: f64, decimals: usize) -> String {
    let is_negative = value < 0.0;
    let abs_value = value.abs();

    let formatted = format!("{:.prec$}", abs_value, prec = decimals.min(10));
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next();

    let mut with_sep = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_sep.push(',');
        }
        with_sep.push(c);
    }
    let int_with_sep: String = with_sep.chars().rev().collect();

    let result = match dec_part {
        Some(dec) => format!("{int_with_sep}.{dec}"),
        None => int_with_sep,
    };

    if is_negative {
        format!("-{result}")
    } else {
        result
    }
}

#[derive(Debug, Clone)]
enum DateToken {
    Year4,
    Year2,
    Month1,
    Month2,
    Month3,
    Month4,
    Month5,
    Day1,
    Day2,
    Day3,
    Day4,
    Hour1,
    Hour2,
    Minute1,
    Minute2,
    Second1,
    Second2,
    AmPm,
    AP,
    Literal(String),
    ElapsedHours,
    ElapsedMinutes,
    ElapsedSeconds,
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
fn format_date(value: f64, format_code: &str, date1904: bool) -> String {
    let (year, month, day, hour, minute, second) = excel_date_to_components(value, date1904);

    // Serial day 1 (Jan 1, 1900) was a Monday.
    let days = value.floor() as i32;
    let day_of_week = ((days + 6) % 7) as u32;

    let code_lower = format_code.to_lowercase();
    let has_ampm = code_lower.contains("am/pm") || code_lower.contains("a/p");

    let display_hour = if has_ampm {
        match hour {
            0 => 12,
            1..=12 => hour,
            _ => hour - 12,
        }
    } else {
        hour
    };
    let ampm_str = if hour >= 12 { "PM" } else { "AM" };
    let ap_str = if hour >= 12 { "P" } else { "A" };

    let mut result = String::new();
    for token in parse_date_format_tokens(format_code) {
        match token {
            DateToken::Year4 => result.push_str(&format!("{year:04}")),
            DateToken::Year2 => result.push_str(&format!("{:02}", year % 100)),
            DateToken::Month1 => result.push_str(&format!("{month}")),
            DateToken::Month2 => result.push_str(&format!("{month:02}")),
            DateToken::Month3 => result.push_str(month_abbrev(month)),
            DateToken::Month4 => result.push_str(month_full(month)),
            DateToken::Month5 => result.push_str(month_letter(month)),
            DateToken::Day1 => result.push_str(&format!("{day}")),
            DateToken::Day2 => result.push_str(&format!("{day:02}")),
            DateToken::Day3 => result.push_str(day_abbrev(day_of_week)),
            DateToken::Day4 => result.push_str(day_full(day_of_week)),
            DateToken::Hour1 => {
                result.push_str(&format!("{}", if has_ampm { display_hour } else { hour }));
            }
            DateToken::Hour2 => result.push_str(&format!(
                "{:02}",
                if has_ampm { display_hour } else { hour }
            )),
            DateToken::Minute1 => result.push_str(&format!("{minute}")),
            DateToken::Minute2 => result.push_str(&format!("{minute:02}")),
            DateToken::Second1 => result.push_str(&format!("{second}")),
            DateToken::Second2 => result.push_str(&format!("{second:02}")),
            DateToken::AmPm => result.push_str(ampm_str),
            DateToken::AP => result.push_str(ap_str),
            DateToken::Literal(s) => result.push_str(&s),
            DateToken::ElapsedHours => {
                let total_hours = (value * 24.0).floor() as u32;
                result.push_str(&format!("{total_hours}"));
            }
            DateToken::ElapsedMinutes => {
                let total_minutes = (value * 24.0 * 60.0).floor() as u32;
                result.push_str(&format!("{total_minutes}"));
            }
            DateToken::ElapsedSeconds => {
                let total_seconds = (value * 86400.0).floor() as u32;
                result.push_str(&format!("{total_seconds}"));
            }
        }
    }

    if result.is_empty() {
        format!("{year:04}-{month:02}-{day:02}")
    } else {
        result
    }
}

/// Parse a date format code into tokens.
///
/// # Indexing safety
/// Manual bounds checks (`i + n < chars.len()`) guard every index below.
#[allow(clippy::indexing_slicing)]
fn parse_date_format_tokens(format_code: &str) -> Vec<DateToken> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = format_code.chars().collect();
    let mut i = 0;
    // m is minutes once an h has been seen and no s has closed the run.
    let mut in_time_context = false;

    while i < chars.len() {
        let c = chars[i];
        let c_lower = c.to_ascii_lowercase();

        if c == '"' {
            let mut literal = String::new();
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                literal.push(chars[i]);
                i += 1;
            }
            i += 1;
            tokens.push(DateToken::Literal(literal));
            continue;
        }

        if c == '\\' && i + 1 < chars.len() {
            tokens.push(DateToken::Literal(chars[i + 1].to_string()));
            i += 2;
            continue;
        }

        if c == '[' {
            if i + 2 < chars.len() && chars[i + 2] == ']' {
                match chars[i + 1].to_ascii_lowercase() {
                    'h' => {
                        tokens.push(DateToken::ElapsedHours);
                        i += 3;
                        in_time_context = true;
                        continue;
                    }
                    'm' => {
                        tokens.push(DateToken::ElapsedMinutes);
                        i += 3;
                        continue;
                    }
                    's' => {
                        tokens.push(DateToken::ElapsedSeconds);
                        i += 3;
                        in_time_context = false;
                        continue;
                    }
                    _ => {}
                }
            }
            // Color codes and conditions like [Red] or [>100] drop out.
            let mut j = i + 1;
            while j < chars.len() && chars[j] != ']' {
                j += 1;
            }
            i = j + 1;
            continue;
        }

        if c_lower == 'a' {
            if i + 4 < chars.len()
                && chars[i + 1].eq_ignore_ascii_case(&'m')
                && chars[i + 2] == '/'
                && chars[i + 3].eq_ignore_ascii_case(&'p')
                && chars[i + 4].eq_ignore_ascii_case(&'m')
            {
                tokens.push(DateToken::AmPm);
                i += 5;
                continue;
            }
            if i + 2 < chars.len()
                && chars[i + 1] == '/'
                && chars[i + 2].eq_ignore_ascii_case(&'p')
            {
                tokens.push(DateToken::AP);
                i += 3;
                continue;
            }
            tokens.push(DateToken::Literal(c.to_string()));
            i += 1;
            continue;
        }

        let mut count = 1;
        while i + count < chars.len() && chars[i + count].to_ascii_lowercase() == c_lower {
            count += 1;
        }

        match c_lower {
            'y' => {
                if count >= 4 {
                    tokens.push(DateToken::Year4);
                } else {
                    tokens.push(DateToken::Year2);
                }
                i += count;
            }
            'm' => {
                let is_minute = in_time_context || is_followed_by_seconds(&chars, i + count);
                if is_minute {
                    if count >= 2 {
                        tokens.push(DateToken::Minute2);
                    } else {
                        tokens.push(DateToken::Minute1);
                    }
                } else {
                    match count {
                        1 => tokens.push(DateToken::Month1),
                        2 => tokens.push(DateToken::Month2),
                        3 => tokens.push(DateToken::Month3),
                        4 => tokens.push(DateToken::Month4),
                        _ => tokens.push(DateToken::Month5),
                    }
                }
                i += count;
            }
            'd' => {
                match count {
                    1 => tokens.push(DateToken::Day1),
                    2 => tokens.push(DateToken::Day2),
                    3 => tokens.push(DateToken::Day3),
                    _ => tokens.push(DateToken::Day4),
                }
                i += count;
            }
            'h' => {
                in_time_context = true;
                if count >= 2 {
                    tokens.push(DateToken::Hour2);
                } else {
                    tokens.push(DateToken::Hour1);
                }
                i += count;
            }
            's' => {
                in_time_context = false;
                if count >= 2 {
                    tokens.push(DateToken::Second2);
                } else {
                    tokens.push(DateToken::Second1);
                }
                i += count;
            }
            '_' | '*' => {
                // _ skips the width of the next char, * repeats it; neither prints.
                if i + 1 < chars.len() {
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => {
                tokens.push(DateToken::Literal(c.to_string()));
                i += 1;
            }
        }
    }

    tokens
}

fn is_followed_by_seconds(chars: &[char], start: usize) -> bool {
    let mut i = start;
    while let Some(&ch) = chars.get(i) {
        match ch.to_ascii_lowercase() {
            's' => return true,
            'h' | 'y' | 'd' | 'm' => return false,
            _ => i += 1,
        }
    }
    false
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

fn month_full(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "???",
    }
}

fn month_letter(month: u32) -> &'static str {
    match month {
        1 | 6 | 7 => "J",
        2 => "F",
        3 | 5 => "M",
        4 | 8 => "A",
        9 => "S",
        10 => "O",
        11 => "N",
        12 => "D",
        _ => "?",
    }
}

fn day_abbrev(day_of_week: u32) -> &'static str {
    match day_of_week {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "???",
    }
}

fn day_full(day_of_week: u32) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "???",
    }
}

/// Convert an Excel serial date to (year, month, day, hour, minute, second).
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn excel_date_to_components(serial: f64, date1904: bool) -> (i32, u32, u32, u32, u32, u32) {
    let days = serial.floor() as i32;
    let time_frac = serial.fract().abs();

    // 1900 system: serial 1 = Jan 1, 1900 = JDN 2415021, with the phantom
    // Feb 29, 1900 at serial 60. 1904 system: serial 0 = Jan 1, 1904.
    let jdn = if date1904 {
        days + 2_416_481
    } else if days <= 60 {
        days + 2_415_020
    } else {
        days + 2_415_019
    };

    let (year, month, day_of_month) = jdn_to_ymd(jdn);

    let total_seconds = (time_frac * 86400.0).round() as u32;
    let hour = total_seconds / 3600;
    let minute = (total_seconds % 3600) / 60;
    let second = total_seconds % 60;

    (year, month, day_of_month, hour, minute, second)
}

/// Julian Day Number to proleptic Gregorian (year, month, day).
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn jdn_to_ymd(jdn: i32) -> (i32, u32, u32) {
    let (y, j, m, n, r, p) = (4716i64, 1401i64, 2i64, 12i64, 4i64, 1461i64);
    let (v, u, s, w, b, c) = (3i64, 5i64, 153i64, 2i64, 274_277i64, -38i64);

    let jdn_i64 = i64::from(jdn);

    let f = jdn_i64 + j + (((4 * jdn_i64 + b) / 146_097) * 3) / 4 + c;
    let e = r * f + v;
    let g = (e % p) / r;
    let h = u * g + w;

    let day = (h % s) / u + 1;
    let month = ((h / s + m) % n) + 1;
    let year = (e / p) - y + (n + m - month) / n;

    (year as i32, month as u32, day as u32)
}
