//! Display formatting for snapshot values.
//!
//! Domestic-market symbols use the configured domestic currency symbol and
//! Indian digit grouping (`12,34,567.89`); everything else uses the symbol
//! for its currency code and Western grouping (`1,234,567.89`). Percentages
//! are signed (`+1.23%`), volume ratios carry an `x` suffix.

use crate::config::DisplayConfig;

/// Thousands grouping convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// 3 digits, then groups of 2 (lakh / crore).
    Indian,
    /// Groups of 3.
    Western,
}

impl Grouping {
    /// Insert separators into a run of ASCII digits.
    pub fn group(self, digits: &str) -> String {
        if digits.len() <= 3 {
            return digits.to_string();
        }
        let (head, tail) = digits.split_at(digits.len() - 3);
        let step = match self {
            Grouping::Indian => 2,
            Grouping::Western => 3,
        };

        let mut parts = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(step);
            parts.push(&head[start..end]);
            end = start;
        }
        parts.reverse();
        parts.push(tail);
        parts.join(",")
    }
}

/// Symbol for an ISO currency code; unknown codes render as `"CODE "`.
pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "INR" => "₹".into(),
        other => format!("{other} "),
    }
}

#[derive(Debug, Clone)]
pub struct DisplayFormatter {
    symbol: String,
    grouping: Grouping,
    decimals: usize,
}

impl DisplayFormatter {
    pub fn new(display: &DisplayConfig, is_domestic_market: bool, currency: &str) -> Self {
        if is_domestic_market {
            Self {
                symbol: display.domestic_symbol.clone(),
                grouping: Grouping::Indian,
                decimals: display.decimals,
            }
        } else {
            Self {
                symbol: currency_symbol(currency),
                grouping: Grouping::Western,
                decimals: display.decimals,
            }
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Currency amount: `₹1,23,456.78`, `-$12.50`.
    pub fn price(&self, value: f64) -> String {
        let value = self.tidy(value, self.decimals);
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}{}", self.symbol, self.grouped(value.abs(), self.decimals))
    }

    /// Plain number with the configured decimals (RSI, MACD, %K...).
    pub fn number(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, self.tidy(value, self.decimals))
    }

    /// Signed percentage: `+1.23%`, `-0.50%`, `0.00%`.
    pub fn percent(&self, value: f64) -> String {
        let value = self.tidy(value, self.decimals);
        if value == 0.0 {
            return format!("{:.*}%", self.decimals, 0.0);
        }
        format!("{:+.*}%", self.decimals, value)
    }

    /// Relative volume: `1.25x`.
    pub fn ratio(&self, value: f64) -> String {
        format!("{:.2}x", self.tidy(value, 2))
    }

    /// Whole-share volume with digit grouping.
    pub fn volume(&self, value: f64) -> String {
        let value = self.tidy(value, 0);
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}", self.grouped(value.abs(), 0))
    }

    fn grouped(&self, value: f64, decimals: usize) -> String {
        let text = format!("{value:.decimals$}");
        match text.split_once('.') {
            Some((int, frac)) => format!("{}.{frac}", self.grouping.group(int)),
            None => self.grouping.group(&text),
        }
    }

    /// Collapse values that round to zero (including -0.0) to +0.0.
    fn tidy(&self, value: f64, decimals: usize) -> f64 {
        let scale = 10f64.powi(decimals as i32);
        if (value * scale).round() == 0.0 {
            0.0
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domestic() -> DisplayFormatter {
        DisplayFormatter::new(&DisplayConfig::default(), true, "INR")
    }

    fn us() -> DisplayFormatter {
        DisplayFormatter::new(&DisplayConfig::default(), false, "USD")
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(Grouping::Indian.group("123"), "123");
        assert_eq!(Grouping::Indian.group("1234"), "1,234");
        assert_eq!(Grouping::Indian.group("123456"), "1,23,456");
        assert_eq!(Grouping::Indian.group("12345678"), "1,23,45,678");
    }

    #[test]
    fn western_grouping() {
        assert_eq!(Grouping::Western.group("999"), "999");
        assert_eq!(Grouping::Western.group("1234567"), "1,234,567");
        assert_eq!(Grouping::Western.group("123456"), "123,456");
    }

    #[test]
    fn domestic_price() {
        assert_eq!(domestic().price(123456.789), "₹1,23,456.79");
        assert_eq!(domestic().price(-1500.0), "-₹1,500.00");
    }

    #[test]
    fn international_price() {
        assert_eq!(us().price(1234567.5), "$1,234,567.50");
        let eur = DisplayFormatter::new(&DisplayConfig::default(), false, "eur");
        assert_eq!(eur.price(10.0), "€10.00");
        let chf = DisplayFormatter::new(&DisplayConfig::default(), false, "CHF");
        assert_eq!(chf.price(10.0), "CHF 10.00");
    }

    #[test]
    fn domestic_flag_overrides_currency_code() {
        let f = DisplayFormatter::new(&DisplayConfig::default(), true, "USD");
        assert_eq!(f.symbol(), "₹");
        assert_eq!(f.grouping(), Grouping::Indian);
    }

    #[test]
    fn percent_is_signed() {
        assert_eq!(us().percent(1.234), "+1.23%");
        assert_eq!(us().percent(-0.5), "-0.50%");
        assert_eq!(us().percent(0.0), "0.00%");
        assert_eq!(us().percent(-0.001), "0.00%");
    }

    #[test]
    fn ratio_and_volume() {
        assert_eq!(us().ratio(1.25), "1.25x");
        assert_eq!(us().volume(1234567.0), "1,234,567");
        assert_eq!(domestic().volume(1234567.0), "12,34,567");
    }

    #[test]
    fn number_uses_configured_decimals() {
        let config = DisplayConfig {
            decimals: 3,
            ..DisplayConfig::default()
        };
        let f = DisplayFormatter::new(&config, false, "USD");
        assert_eq!(f.number(70.12345), "70.123");
        assert_eq!(f.number(-0.0001), "0.000");
    }
}
