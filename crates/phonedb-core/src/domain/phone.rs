use crate::domain::ids::PhoneId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const MAX_PHONE_NUMBER_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub id: PhoneId,
    pub number: String,
}

/// Canonical form of a phone number: its ASCII digits, in order.
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_canonical(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii_digit())
}

pub fn validate_phone_number(value: &str) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > MAX_PHONE_NUMBER_LEN {
        return Err(CoreError::NumberTooLong {
            len,
            max: MAX_PHONE_NUMBER_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_canonical, normalize_phone, validate_phone_number, MAX_PHONE_NUMBER_LEN};
    use crate::error::CoreError;

    #[test]
    fn normalize_phone_strips_formatting() {
        assert_eq!(normalize_phone("(123) 456-7893"), "1234567893");
        assert_eq!(normalize_phone("123 456 7891"), "1234567891");
        assert_eq!(normalize_phone("(123)456-7892"), "1234567892");
    }

    #[test]
    fn normalize_phone_keeps_canonical_values() {
        assert_eq!(normalize_phone("1234567890"), "1234567890");
        assert!(is_canonical("1234567890"));
    }

    #[test]
    fn normalize_phone_handles_empty_and_digitless_input() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("call me, maybe"), "");
        assert!(is_canonical(""));
    }

    #[test]
    fn normalize_phone_drops_letters_and_non_ascii_digits() {
        assert_eq!(normalize_phone("+1 (415) 555-CALL x12"), "141555512");
        assert_eq!(normalize_phone("١٢٣ 456"), "456");
    }

    #[test]
    fn normalize_phone_is_idempotent() {
        let inputs = [
            "",
            "1234567890",
            "123-456-7894",
            " (123) 456 7892 ",
            "ext. 55",
            "٣٤٥-12",
        ];
        for input in inputs {
            let once = normalize_phone(input);
            assert_eq!(normalize_phone(&once), once, "input {:?}", input);
            assert!(is_canonical(&once));
        }
    }

    #[test]
    fn normalize_phone_keeps_every_digit_in_order() {
        let input = "9a8b7 c6-5(4)3_2.1 0";
        let expected: String = input.chars().filter(|ch| ch.is_ascii_digit()).collect();
        assert_eq!(normalize_phone(input), expected);
        assert_eq!(normalize_phone(input), "9876543210");
    }

    #[test]
    fn is_canonical_rejects_formatting() {
        assert!(!is_canonical("123-456-7890"));
        assert!(!is_canonical(" 1234567890"));
    }

    #[test]
    fn validate_phone_number_enforces_length() {
        let max = "1".repeat(MAX_PHONE_NUMBER_LEN);
        assert!(validate_phone_number(&max).is_ok());

        let too_long = "1".repeat(MAX_PHONE_NUMBER_LEN + 1);
        assert_eq!(
            validate_phone_number(&too_long),
            Err(CoreError::NumberTooLong {
                len: MAX_PHONE_NUMBER_LEN + 1,
                max: MAX_PHONE_NUMBER_LEN,
            })
        );
    }
}
