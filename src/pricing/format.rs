use serde::{Deserialize, Serialize};

/// Renders a fare for display. Presentation only; never parsed back.
pub trait CurrencyFormatter: Send + Sync {
    fn format(&self, amount: i64) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Numerals {
    #[default]
    Latin,
    /// Eastern Arabic digits with the Arabic thousands separator
    Arabic,
}

impl Numerals {
    fn digit(self, d: char) -> char {
        match self {
            Numerals::Latin => d,
            Numerals::Arabic => d
                .to_digit(10)
                .and_then(|v| char::from_u32(0x0660 + v))
                .unwrap_or(d),
        }
    }

    fn group_separator(self) -> char {
        match self {
            Numerals::Latin => ',',
            Numerals::Arabic => '\u{066C}',
        }
    }
}

/// Groups thousands and appends a currency label, e.g. `4,500 IQD`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedFormatter {
    pub numerals: Numerals,
    pub label: String,
}

impl Default for GroupedFormatter {
    fn default() -> Self {
        Self {
            numerals: Numerals::Latin,
            label: "IQD".to_string(),
        }
    }
}

impl CurrencyFormatter for GroupedFormatter {
    fn format(&self, amount: i64) -> String {
        let digits = amount.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() * 2 + self.label.len() + 2);

        if amount < 0 {
            out.push('-');
        }
        for (i, d) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.numerals.group_separator());
            }
            out.push(self.numerals.digit(d));
        }
        if !self.label.is_empty() {
            out.push(' ');
            out.push_str(&self.label);
        }
        out
    }
}

/// Format with the default grouping and label
pub fn format_price(amount: i64) -> String {
    GroupedFormatter::default().format(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(4500), "4,500 IQD");
        assert_eq!(format_price(4500), format_price(4500));
    }

    #[test]
    fn test_grouping() {
        let f = GroupedFormatter {
            numerals: Numerals::Latin,
            label: String::new(),
        };
        assert_eq!(f.format(0), "0");
        assert_eq!(f.format(250), "250");
        assert_eq!(f.format(1000), "1,000");
        assert_eq!(f.format(123456), "123,456");
        assert_eq!(f.format(1234567), "1,234,567");
        assert_eq!(f.format(-3000), "-3,000");
    }

    #[test]
    fn test_arabic_numerals() {
        let f = GroupedFormatter {
            numerals: Numerals::Arabic,
            label: "د.ع".to_string(),
        };
        assert_eq!(f.format(4500), "٤٬٥٠٠ د.ع");
    }

    #[test]
    fn test_formatter_as_trait_object() {
        let f: Box<dyn CurrencyFormatter> = Box::new(GroupedFormatter {
            numerals: Numerals::Latin,
            label: "USD".to_string(),
        });
        assert_eq!(f.format(12000), "12,000 USD");
    }
}
