//! Check-digit validators: Luhn, TCKN, VKN and IBAN mod-97

use crate::card::is_amex;
use crate::filter::digits;

/// Parse a fixed-width, digits-only string into digit values
fn fixed_digits(value: &str, len: usize) -> Option<Vec<u32>> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(value.bytes().map(|b| u32::from(b - b'0')).collect())
}

/// Turkish national identity number (TCKN): 11 digits, first nonzero, two
/// trailing check digits.
pub fn national_id(value: &str) -> bool {
    let Some(d) = fixed_digits(value, 11) else {
        return false;
    };
    if d[0] == 0 {
        return false;
    }

    let sum_odd = (d[0] + d[2] + d[4] + d[6] + d[8]) as i32;
    let sum_even = (d[1] + d[3] + d[5] + d[7]) as i32;
    let tenth = (sum_odd * 7 - sum_even).rem_euclid(10) as u32;
    let eleventh = d[..10].iter().sum::<u32>() % 10;

    d[9] == tenth && d[10] == eleventh
}

/// Luhn check for card numbers. Separators are ignored; Amex numbers must be
/// 15 digits long, everything else 16.
pub fn luhn(value: &str) -> bool {
    let number = digits(value);
    let required = if is_amex(&number) { 15 } else { 16 };
    if number.len() != required {
        return false;
    }

    let sum: u32 = number
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Turkish tax identification number (VKN): 10 digits, the last one a check
/// digit over weighted powers of two.
pub fn tax_id(value: &str) -> bool {
    let Some(d) = fixed_digits(value, 10) else {
        return false;
    };

    let sum: u32 = (0..9u32)
        .map(|i| {
            let n1 = (d[i as usize] + (9 - i)) % 10;
            let n2 = (n1 * 2u32.pow(9 - i)) % 9;
            if n1 != 0 && n2 == 0 {
                9
            } else {
                n2
            }
        })
        .sum();

    d[9] == (10 - sum % 10) % 10
}

/// Turkish IBAN: `TR` followed by 24 digits. The `TR` prefix and any
/// separators in `value` are ignored, so both the stored 24-digit body and a
/// full printed IBAN are accepted.
pub fn iban(value: &str) -> bool {
    let body = digits(value);
    if body.len() != 24 {
        return false;
    }

    let full = format!("TR{}", body);
    let rearranged = format!("{}{}", &full[4..], &full[..4]);
    mod97(&rearranged) == Some(1)
}

/// ISO 7064 mod-97 over an alphanumeric string, letters mapped to `A=10 .. Z=35`
fn mod97(value: &str) -> Option<u32> {
    value.chars().try_fold(0u32, |remainder, c| {
        let n = if c.is_ascii_uppercase() {
            c as u32 - 55
        } else {
            c.to_digit(10)?
        };
        let shift = if n >= 10 { 100 } else { 10 };
        Some((remainder * shift + n) % 97)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_id_valid() {
        assert!(national_id("12345678950"));
        assert!(national_id("10000000146"));
    }

    #[test]
    fn test_national_id_invalid() {
        assert!(!national_id("12345678951"));
        assert!(!national_id("123"));
        assert!(!national_id("123a5678901"));
        assert!(!national_id("02345678950"));
        assert!(!national_id(""));
    }

    #[test]
    fn test_luhn() {
        assert!(luhn("4539148803436467"));
        assert!(!luhn("4539148803436468"));
        assert!(luhn("4539 1488 0343 6467"));
        assert!(luhn("5555555555554444"));
    }

    #[test]
    fn test_luhn_amex_length() {
        assert!(luhn("378282246310005"));
        assert!(luhn("3782 822463 10005"));
        // Amex prefix with 16 digits is rejected before the checksum
        assert!(!luhn("3782822463100050"));
    }

    #[test]
    fn test_luhn_wrong_length() {
        assert!(!luhn("411111111111111"));
        assert!(!luhn(""));
    }

    #[test]
    fn test_tax_id() {
        assert!(tax_id("1234567890"));
        assert!(tax_id("9876543217"));
        assert!(tax_id("0000000001"));
        assert!(!tax_id("1234567891"));
        assert!(!tax_id("123456789"));
        assert!(!tax_id("12345678a0"));
    }

    #[test]
    fn test_iban() {
        assert!(iban("330006100519786457841326"));
        assert!(iban("TR33 0006 1005 1978 6457 8413 26"));
        assert!(!iban("330006100519786457841327"));
        assert!(!iban("33000610051978645784132"));
        assert!(!iban(""));
    }

    #[test]
    fn test_iban_single_digit_flip_fails() {
        let valid = "330006100519786457841326";
        for (i, c) in valid.char_indices() {
            let flipped = if c == '9' { '0' } else { char::from(c as u8 + 1) };
            let mut candidate = valid.to_string();
            candidate.replace_range(i..i + 1, &flipped.to_string());
            assert!(!iban(&candidate), "flip at {} should fail", i);
        }
    }

    #[test]
    fn test_mod97_letters() {
        // GB82 WEST 1234 5698 7654 32 rearranged
        assert_eq!(mod97("WEST12345698765432GB82"), Some(1));
        assert_eq!(mod97("12!"), None);
    }
}
