//! IMM futures contract codes.

use chrono::Weekday;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Returns the IMM date (third Wednesday of the month) for a contract code.
///
/// Codes take the form `<month letter><two digit year>`, e.g. `H19` for
/// March 2019. Month letters follow the futures convention
/// `F G H J K M N Q U V X Z`.
///
/// # Example
///
/// ```rust
/// use parcurve_core::types::{imm_date, Date};
///
/// assert_eq!(imm_date("H19").unwrap(), Date::from_ymd(2019, 3, 20).unwrap());
/// ```
pub fn imm_date(code: &str) -> CoreResult<Date> {
    let invalid = || CoreError::InvalidImmCode {
        code: code.to_string(),
    };

    let code_trimmed = code.trim();
    let mut chars = code_trimmed.chars();
    let letter = chars.next().ok_or_else(invalid)?;
    let month = month_from_letter(letter.to_ascii_uppercase()).ok_or_else(invalid)?;

    let year_digits = chars.as_str();
    if year_digits.len() != 2 || !year_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let year: i32 = year_digits.parse().map_err(|_| invalid())?;

    third_wednesday(2000 + year, month)
}

/// Returns the third Wednesday of the given month.
pub fn third_wednesday(year: i32, month: u32) -> CoreResult<Date> {
    let first = Date::from_ymd(year, month, 1)?;
    let offset =
        (Weekday::Wed.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
    Ok(first.add_days(i64::from(offset) + 14))
}

fn month_from_letter(letter: char) -> Option<u32> {
    let month = match letter {
        'F' => 1,
        'G' => 2,
        'H' => 3,
        'J' => 4,
        'K' => 5,
        'M' => 6,
        'N' => 7,
        'Q' => 8,
        'U' => 9,
        'V' => 10,
        'X' => 11,
        'Z' => 12,
        _ => return None,
    };
    Some(month)
}
