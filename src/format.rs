//! Display formatting for BS dates, kept apart from conversion.
//!
//! Digit glyphs and month-name script are chosen independently so a screen can
//! show, say, Latin digits with Devanagari month names.

use serde::{Deserialize, Serialize};

use crate::BsDate;
use crate::consts::{DEVANAGARI_DIGITS, DISPLAY_SEPARATOR};

/// Glyph set used to render digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitSet {
    /// ०१२३४५६७८९
    #[default]
    Devanagari,
    /// 0123456789
    Latin,
}

/// Script used for month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthNames {
    #[default]
    Devanagari,
    Latin,
}

/// Display preferences for BS dates, loadable from an application's config.
///
/// Missing fields fall back to Devanagari.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub digits:      DigitSet,
    pub month_names: MonthNames,
}

impl FormatOptions {
    pub const fn new(digits: DigitSet, month_names: MonthNames) -> Self {
        Self { digits, month_names }
    }
}

/// Rewrites every ASCII digit in `s` using the chosen glyph set. Other
/// characters pass through untouched.
pub fn localize_digits(s: &str, digits: DigitSet) -> String {
    match digits {
        DigitSet::Latin => s.to_owned(),
        DigitSet::Devanagari => s
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .and_then(|d| DEVANAGARI_DIGITS.get(d as usize).copied())
                    .unwrap_or(c)
            })
            .collect(),
    }
}

/// Numeric value of a Latin or Devanagari digit.
pub fn digit_value(c: char) -> Option<u8> {
    if c.is_ascii_digit() {
        return u8::try_from(c.to_digit(10)?).ok();
    }
    DEVANAGARI_DIGITS
        .iter()
        .position(|&d| d == c)
        .and_then(|index| u8::try_from(index).ok())
}

/// Parses a non-empty run of Latin and/or Devanagari digits.
pub(crate) fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    s.chars().try_fold(0u32, |acc, c| {
        acc.checked_mul(10)?.checked_add(u32::from(digit_value(c)?))
    })
}

/// Formats `date` as `"<yyyy>/<mm>/<dd> <month name>"` with the month name in
/// Devanagari, e.g. `२०८०/०१/०१ बैशाख`.
pub fn format_bs_date(date: &BsDate, digits: DigitSet) -> String {
    date.format(&FormatOptions::new(digits, MonthNames::Devanagari))
}

impl BsDate {
    /// Formats this date with the given display preferences.
    pub fn format(&self, options: &FormatOptions) -> String {
        let numeric = format!(
            "{:04}{sep}{:02}{sep}{:02}",
            self.year(),
            self.month(),
            self.day(),
            sep = DISPLAY_SEPARATOR
        );
        let name = match options.month_names {
            MonthNames::Devanagari => self.month_typed().name(),
            MonthNames::Latin => self.month_typed().latin_name(),
        };
        format!("{} {name}", localize_digits(&numeric, options.digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::bs;

    #[test]
    fn test_format_new_year_devanagari() {
        assert_eq!(format_bs_date(&bs(2080, 1, 1), DigitSet::Devanagari), "२०८०/०१/०१ बैशाख");
        // pure: same input, same output
        assert_eq!(
            format_bs_date(&bs(2080, 1, 1), DigitSet::Devanagari),
            format_bs_date(&bs(2080, 1, 1), DigitSet::default())
        );
    }

    #[test]
    fn test_format_latin_digits() {
        assert_eq!(format_bs_date(&bs(2072, 6, 3), DigitSet::Latin), "2072/06/03 असोज");
    }

    #[test]
    fn test_format_with_options() {
        let date = bs(2081, 12, 30);
        let cases = [
            (FormatOptions::new(DigitSet::Devanagari, MonthNames::Devanagari), "२०८१/१२/३० चैत"),
            (FormatOptions::new(DigitSet::Devanagari, MonthNames::Latin), "२०८१/१२/३० Chaitra"),
            (FormatOptions::new(DigitSet::Latin, MonthNames::Devanagari), "2081/12/30 चैत"),
            (FormatOptions::new(DigitSet::Latin, MonthNames::Latin), "2081/12/30 Chaitra"),
        ];
        for (options, expected) in cases {
            assert_eq!(date.format(&options), expected, "{options:?}");
        }
    }

    #[test]
    fn test_formatted_output_parses_back() {
        let date = bs(2065, 2, 15);
        for options in [
            FormatOptions::default(),
            FormatOptions::new(DigitSet::Latin, MonthNames::Latin),
        ] {
            let text = date.format(&options);
            assert_eq!(text.parse::<BsDate>().unwrap(), date, "{text}");
        }
    }

    #[test]
    fn test_localize_digits() {
        assert_eq!(localize_digits("0123456789", DigitSet::Devanagari), "०१२३४५६७८९");
        assert_eq!(localize_digits("ID-42", DigitSet::Devanagari), "ID-४२");
        assert_eq!(localize_digits("ID-42", DigitSet::Latin), "ID-42");
    }

    #[test]
    fn test_digit_value() {
        for (latin, devanagari) in ('0'..='9').zip(DEVANAGARI_DIGITS) {
            assert_eq!(digit_value(latin), digit_value(devanagari));
            assert!(digit_value(latin).is_some());
        }
        assert_eq!(digit_value('७'), Some(7));
        assert_eq!(digit_value('a'), None);
        assert_eq!(digit_value('٣'), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("2080"), Some(2080));
        assert_eq!(parse_number("२०८०"), Some(2080));
        assert_eq!(parse_number("2०8०"), Some(2080));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-1"), None);
        assert_eq!(parse_number("99999999999"), None);
    }

    #[test]
    fn test_options_from_config() {
        let options: FormatOptions = serde_json::from_str(r#"{"digits":"latin"}"#).unwrap();
        assert_eq!(options, FormatOptions::new(DigitSet::Latin, MonthNames::Devanagari));

        let options: FormatOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, FormatOptions::default());

        assert!(serde_json::from_str::<FormatOptions>(r#"{"digits":"roman"}"#).is_err());
        assert_eq!(serde_json::to_string(&DigitSet::Devanagari).unwrap(), "\"devanagari\"");
    }
}
