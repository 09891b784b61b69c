/// Earliest supported Bikram Sambat year (inclusive)
pub const MIN_YEAR: u16 = 1970;
/// Latest supported Bikram Sambat year (inclusive)
pub const MAX_YEAR: u16 = 2090;

/// Months in a Bikram Sambat year
pub const MONTHS_PER_YEAR: u8 = 12;
/// Maximum valid month (Chaitra)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;
/// Shortest month length that occurs in the calendar
pub const MIN_DAYS_IN_MONTH: u8 = 29;
/// Longest month length that occurs in the calendar
pub const MAX_DAYS_IN_MONTH: u8 = 32;

/// Month number for Baisakh, the first month of the year
pub const BAISAKH: u8 = 1;
/// Month number for Chaitra, the last month of the year
pub const CHAITRA: u8 = 12;

/// Date component separator for the canonical (ISO-like) form
pub const DATE_SEPARATOR: char = '-';
/// Date component separator used in Nepali display form
pub const DISPLAY_SEPARATOR: char = '/';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';

/// Devanagari numerals, indexed by the ASCII digit they replace
pub const DEVANAGARI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

/// Month names in Devanagari, index 0 is Baisakh
pub const MONTH_NAMES: [&str; 12] = [
    "बैशाख",
    "जेठ",
    "असार",
    "साउन",
    "भदौ",
    "असोज",
    "कात्तिक",
    "मंसिर",
    "पुस",
    "माघ",
    "फागुन",
    "चैत",
];

/// Month names transliterated to Latin script, same order as [`MONTH_NAMES`]
pub const MONTH_NAMES_LATIN: [&str; 12] = [
    "Baisakh", "Jestha", "Asar", "Shrawan", "Bhadra", "Ashwin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// Weekday names in Devanagari, index 0 is Sunday (आइतबार)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "आइतबार",
    "सोमबार",
    "मंगलबार",
    "बुधबार",
    "बिहीबार",
    "शुक्रबार",
    "शनिबार",
];
