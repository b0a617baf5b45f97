//! Display formatting for document fields.
//!
//! Layout code never formats money or dates itself; schema adapters call a
//! [`Formatters`] implementation supplied by the caller. [`LocaleFormatter`]
//! is the default implementation, driven by plain settings (currency symbol,
//! separators, date order, UTC offset).
//!
//! The free functions normalize nullable record fields into display text.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder for a missing value.
pub const MISSING: &str = "-";

/// Locale-dependent formatting used by schema adapters.
pub trait Formatters: Send + Sync {
    /// Format an amount of money. `None` or non-finite values give `-`.
    fn format_currency(&self, value: Option<f64>) -> String;

    /// Format a date in the numeric house style (e.g. `01/31/2025`).
    fn format_date(&self, date: Option<&str>) -> String;

    /// Format a date with an abbreviated month (e.g. `Jan 31, 2025`).
    fn format_short_date(&self, date: Option<&str>) -> String;
}

/// Order and separators of numeric dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    /// 01/31/2025
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    /// 31/01/2025
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    /// 2025-01-31
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
    /// 31-01-2025
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYearDash,
    /// 31.01.2025
    #[serde(rename = "DD.MM.YYYY")]
    DayMonthYearDot,
}

impl DateFormat {
    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::DayMonthYearDash => "%d-%m-%Y",
            DateFormat::DayMonthYearDot => "%d.%m.%Y",
        }
    }

    fn short_pattern(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%b %-d, %Y",
            _ => "%-d %b %Y",
        }
    }
}

/// Where the currency symbol goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPosition {
    /// `$1.00`
    #[default]
    Before,
    /// `1,00 €`
    After,
}

/// Settings-driven [`Formatters`] implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleFormatter {
    /// Currency symbol
    pub currency_symbol: String,
    /// Symbol placement
    pub symbol_position: SymbolPosition,
    /// Text between symbol and amount
    pub symbol_separator: String,
    /// Digits after the decimal separator
    pub decimal_places: usize,
    /// Digit group separator
    pub thousands_separator: String,
    /// Decimal separator
    pub decimal_separator: String,
    /// Numeric date style
    pub date_format: DateFormat,
    /// Offset applied to timestamps that carry a timezone
    pub utc_offset_minutes: i32,
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::en_us()
    }
}

impl LocaleFormatter {
    /// `$1,234.56`, `01/31/2025`, `Jan 31, 2025`.
    pub fn en_us() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            symbol_position: SymbolPosition::Before,
            symbol_separator: String::new(),
            decimal_places: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            date_format: DateFormat::MonthDayYear,
            utc_offset_minutes: 0,
        }
    }

    /// `£1,234.56`, `31/01/2025`, `31 Jan 2025`.
    pub fn en_gb() -> Self {
        Self {
            currency_symbol: "£".to_string(),
            date_format: DateFormat::DayMonthYear,
            ..Self::en_us()
        }
    }

    /// `1.234,56 €`, `31.01.2025`, `31 Jan 2025`.
    pub fn de_de() -> Self {
        Self {
            currency_symbol: "€".to_string(),
            symbol_position: SymbolPosition::After,
            symbol_separator: " ".to_string(),
            decimal_places: 2,
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            date_format: DateFormat::DayMonthYearDot,
            utc_offset_minutes: 60,
        }
    }

    /// Set the currency symbol.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Set the date style.
    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    /// Set the UTC offset in minutes.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Calendar date of a timestamp or date string, in this formatter's offset.
    ///
    /// Accepts RFC 3339 (`2025-01-31T10:00:00Z`), Postgres-style
    /// (`2025-01-31 10:00:00+00`), naive date-times and plain dates.
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(self.localize(dt));
        }
        if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
            return Some(self.localize(dt));
        }
        for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
                return Some(dt.date());
            }
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    }

    fn localize(&self, dt: DateTime<FixedOffset>) -> NaiveDate {
        match FixedOffset::east_opt(self.utc_offset_minutes * 60) {
            Some(offset) => dt.with_timezone(&offset).date_naive(),
            None => dt.naive_utc().date(),
        }
    }

    fn format_with(&self, date: Option<&str>, pattern: &str) -> String {
        match date.and_then(|d| self.parse_date(d)) {
            Some(parsed) => parsed.format(pattern).to_string(),
            None => MISSING.to_string(),
        }
    }

    fn group_digits(&self, digits: &str) -> String {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}

impl Formatters for LocaleFormatter {
    fn format_currency(&self, value: Option<f64>) -> String {
        let value = match value {
            Some(v) if v.is_finite() => v,
            _ => return MISSING.to_string(),
        };

        let fixed = format!("{:.*}", self.decimal_places, value.abs());
        let (whole, fraction) = match fixed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (fixed.as_str(), None),
        };
        let mut amount = self.group_digits(whole);
        if let Some(fraction) = fraction {
            amount.push_str(&self.decimal_separator);
            amount.push_str(fraction);
        }

        let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };
        match self.symbol_position {
            SymbolPosition::Before => {
                format!("{}{}{}{}", sign, self.currency_symbol, self.symbol_separator, amount)
            },
            SymbolPosition::After => {
                format!("{}{}{}{}", sign, amount, self.symbol_separator, self.currency_symbol)
            },
        }
    }

    fn format_date(&self, date: Option<&str>) -> String {
        self.format_with(date, self.date_format.pattern())
    }

    fn format_short_date(&self, date: Option<&str>) -> String {
        self.format_with(date, self.date_format.short_pattern())
    }
}

/// The trimmed value, or `None` when missing or blank.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed text, or `-` when missing or blank.
pub fn safe_text(value: Option<&str>) -> String {
    non_empty(value).unwrap_or_else(|| MISSING.to_string())
}

/// `partially_picked` becomes `Partially Picked`; missing gives `-`.
pub fn format_status(value: Option<&str>) -> String {
    let Some(value) = non_empty(value) else {
        return MISSING.to_string();
    };
    value
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `City, ST 12345`, omitting whatever is missing. `None` when all are missing.
pub fn combine_city_state_postal(
    city: Option<&str>,
    state: Option<&str>,
    postal: Option<&str>,
) -> Option<String> {
    let city_state = [non_empty(city), non_empty(state)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    match (city_state.is_empty(), non_empty(postal)) {
        (false, Some(postal)) => Some(format!("{} {}", city_state, postal)),
        (false, None) => Some(city_state),
        (true, postal) => postal,
    }
}

/// Discrete address fields of one party.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressParts<'a> {
    /// Recipient name
    pub name: Option<&'a str>,
    /// Street line 1
    pub address1: Option<&'a str>,
    /// Street line 2
    pub address2: Option<&'a str>,
    /// City
    pub city: Option<&'a str>,
    /// State or region
    pub state: Option<&'a str>,
    /// Postal code
    pub postal: Option<&'a str>,
    /// Country
    pub country: Option<&'a str>,
    /// Phone number
    pub phone: Option<&'a str>,
}

impl AddressParts<'_> {
    /// True when every field is missing or blank.
    pub fn is_empty(&self) -> bool {
        [
            self.name,
            self.address1,
            self.address2,
            self.city,
            self.state,
            self.postal,
            self.country,
            self.phone,
        ]
        .iter()
        .all(|part| non_empty(*part).is_none())
    }
}

/// Address lines with missing parts omitted; `["-"]` when nothing is left.
pub fn format_address_lines(parts: &AddressParts<'_>) -> Vec<String> {
    let lines: Vec<String> = [
        non_empty(parts.name),
        non_empty(parts.address1),
        non_empty(parts.address2),
        combine_city_state_postal(parts.city, parts.state, parts.postal),
        non_empty(parts.country),
        non_empty(parts.phone).map(|phone| format!("Phone: {}", phone)),
    ]
    .into_iter()
    .flatten()
    .collect();

    or_placeholder(lines)
}

/// `lines`, or a single `-` when empty.
pub fn or_placeholder(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        vec![MISSING.to_string()]
    } else {
        lines
    }
}

/// Whole quantities without decimals (`2`), others in shortest form (`2.5`).
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_en_us() {
        let f = LocaleFormatter::en_us();
        assert_eq!(f.format_currency(Some(74.5)), "$74.50");
        assert_eq!(f.format_currency(Some(1234567.891)), "$1,234,567.89");
        assert_eq!(f.format_currency(Some(-5.0)), "-$5.00");
        assert_eq!(f.format_currency(Some(0.0)), "$0.00");
    }

    #[test]
    fn test_currency_missing_or_non_finite() {
        let f = LocaleFormatter::en_us();
        assert_eq!(f.format_currency(None), "-");
        assert_eq!(f.format_currency(Some(f64::NAN)), "-");
        assert_eq!(f.format_currency(Some(f64::INFINITY)), "-");
    }

    #[test]
    fn test_currency_de_de() {
        let f = LocaleFormatter::de_de();
        assert_eq!(f.format_currency(Some(1234.5)), "1.234,50 €");
    }

    #[test]
    fn test_negative_rounding_to_zero_has_no_sign() {
        let f = LocaleFormatter::en_us();
        assert_eq!(f.format_currency(Some(-0.001)), "$0.00");
    }

    #[test]
    fn test_date_formats() {
        let date = Some("2025-01-31T10:00:00Z");
        assert_eq!(LocaleFormatter::en_us().format_date(date), "01/31/2025");
        assert_eq!(LocaleFormatter::en_gb().format_date(date), "31/01/2025");
        assert_eq!(LocaleFormatter::de_de().format_date(date), "31.01.2025");
        let iso = LocaleFormatter::en_us().with_date_format(DateFormat::Iso);
        assert_eq!(iso.format_date(date), "2025-01-31");
        let dash = LocaleFormatter::en_us().with_date_format(DateFormat::DayMonthYearDash);
        assert_eq!(dash.format_date(date), "31-01-2025");
    }

    #[test]
    fn test_short_dates() {
        assert_eq!(LocaleFormatter::en_us().format_short_date(Some("2025-01-31")), "Jan 31, 2025");
        assert_eq!(LocaleFormatter::en_gb().format_short_date(Some("2025-01-05")), "5 Jan 2025");
    }

    #[test]
    fn test_timestamp_shifted_into_offset() {
        let late = Some("2025-01-31T23:30:00+00:00");
        assert_eq!(LocaleFormatter::en_us().format_date(late), "01/31/2025");
        assert_eq!(LocaleFormatter::de_de().format_date(late), "01.02.2025");
    }

    #[test]
    fn test_postgres_timestamp() {
        let f = LocaleFormatter::en_us();
        assert_eq!(f.format_date(Some("2025-03-04 08:15:00.123+00")), "03/04/2025");
    }

    #[test]
    fn test_bad_dates() {
        let f = LocaleFormatter::en_us();
        assert_eq!(f.format_date(None), "-");
        assert_eq!(f.format_date(Some("")), "-");
        assert_eq!(f.format_short_date(Some("not a date")), "-");
    }

    #[test]
    fn test_safe_text() {
        assert_eq!(safe_text(Some("  Dock 4 ")), "Dock 4");
        assert_eq!(safe_text(Some("   ")), "-");
        assert_eq!(safe_text(None), "-");
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(Some("partially_received")), "Partially Received");
        assert_eq!(format_status(Some("draft")), "Draft");
        assert_eq!(format_status(None), "-");
    }

    #[test]
    fn test_city_state_postal() {
        let combine = combine_city_state_postal;
        assert_eq!(combine(Some("Austin"), Some("TX"), Some("78701")).unwrap(), "Austin, TX 78701");
        assert_eq!(combine(None, Some("CA"), Some("94107")).unwrap(), "CA 94107");
        assert_eq!(combine(Some("Austin"), None, None).unwrap(), "Austin");
        assert_eq!(combine(None, None, Some("94107")).unwrap(), "94107");
        assert_eq!(combine(Some(" "), None, None), None);
    }

    #[test]
    fn test_address_lines() {
        let lines = format_address_lines(&AddressParts {
            name: Some("Dock 4"),
            city: Some("Reno"),
            state: Some("NV"),
            phone: Some("555-0100"),
            ..Default::default()
        });
        assert_eq!(lines, vec!["Dock 4", "Reno, NV", "Phone: 555-0100"]);
        assert_eq!(format_address_lines(&AddressParts::default()), vec!["-"]);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(-3.0), "-3");
    }

    #[test]
    fn test_locale_formatter_from_json() {
        let f: LocaleFormatter =
            serde_json::from_str(r#"{"currency_symbol": "CHF ", "date_format": "YYYY-MM-DD"}"#)
                .unwrap();
        assert_eq!(f.format_currency(Some(10.0)), "CHF 10.00");
        assert_eq!(f.format_date(Some("2025-06-01")), "2025-06-01");
    }
}
