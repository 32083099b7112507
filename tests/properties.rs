//! Property tests for the formatting laws and checksum arithmetic

use field_mask::config::{masks, Preset};
use field_mask::currency::{format_currency, unformat_currency, CurrencyConfig};
use field_mask::mask::{apply_mask, capacity, strip_mask};
use field_mask::processor::process_input;
use field_mask::validators::checksum;
use proptest::prelude::*;

// -- Strategy helpers --

fn arb_preset() -> impl Strategy<Value = Preset> {
    prop::sample::select(Preset::ALL.to_vec())
}

fn arb_digit_mask() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        masks::CARD,
        masks::AMEX,
        masks::EXPIRY,
        masks::PHONE,
        masks::IBAN,
        masks::DATE,
        masks::TCKN,
    ])
}

/// Nine leading digits of a national ID, the first nonzero
fn arb_national_id_body() -> impl Strategy<Value = Vec<u32>> {
    (1u32..=9, prop::collection::vec(0u32..=9, 8)).prop_map(|(first, rest)| {
        let mut digits = vec![first];
        digits.extend(rest);
        digits
    })
}

fn luhn_check_digit(payload: &[u32]) -> u32 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
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
    (10 - sum % 10) % 10
}

fn to_string(digits: &[u32]) -> String {
    digits.iter().map(|d| d.to_string()).collect()
}

proptest! {
    #[test]
    fn mask_round_trip(mask in arb_digit_mask(), raw in "[0-9]{0,30}") {
        let raw: String = raw.chars().take(capacity(mask)).collect();
        let masked = apply_mask(&raw, mask);
        prop_assert!(masked.chars().count() <= mask.chars().count());
        prop_assert_eq!(strip_mask(&masked, mask), raw);
    }

    #[test]
    fn currency_unformat_inverts_format(minor in 0u64..1_000_000_000_000) {
        let config = CurrencyConfig::default();
        let formatted = format_currency(&minor.to_string(), &config);
        let expected = format!("{}.{:02}", minor / 100, minor % 100);
        prop_assert_eq!(unformat_currency(&formatted, &config), expected);
    }

    #[test]
    fn currency_leading_zeros_are_normalised(zeros in 0usize..5, minor in 0u64..1_000_000) {
        let config = CurrencyConfig::default();
        let padded = format!("{}{}", "0".repeat(zeros), minor);
        prop_assert_eq!(
            format_currency(&padded, &config),
            format_currency(&minor.to_string(), &config)
        );
    }

    #[test]
    fn caret_stays_inside_display(
        preset in arb_preset(),
        text in "\\PC{0,24}",
        caret in prop::option::of(0usize..30),
        previous in "\\PC{0,24}",
    ) {
        let config = preset.config();
        let result = process_input(&text, &config, caret, &previous).unwrap();
        prop_assert!(result.caret <= result.display.chars().count());
        if let Some(mask) = &config.mask {
            prop_assert!(result.value.chars().count() <= capacity(mask));
        }
    }

    #[test]
    fn processing_is_idempotent_on_display(preset in arb_preset(), text in "[0-9a-zA-Z ]{0,20}") {
        let config = preset.config();
        let first = process_input(&text, &config, None, "").unwrap();
        let second = process_input(&first.display, &config, None, "").unwrap();
        prop_assert_eq!(&second.display, &first.display);
        prop_assert_eq!(&second.value, &first.value);
    }

    #[test]
    fn generated_national_ids_validate(body in arb_national_id_body()) {
        let d = &body;
        let odd = d[0] + d[2] + d[4] + d[6] + d[8];
        let even = d[1] + d[3] + d[5] + d[7];
        let tenth = ((odd * 7) as i64 - even as i64).rem_euclid(10) as u32;
        let eleventh = (d.iter().sum::<u32>() + tenth) % 10;

        let mut digits = body.clone();
        digits.push(tenth);
        digits.push(eleventh);
        prop_assert!(checksum::national_id(&to_string(&digits)));

        digits[10] = (eleventh + 1) % 10;
        prop_assert!(!checksum::national_id(&to_string(&digits)));
    }

    #[test]
    fn generated_visa_numbers_pass_luhn(rest in prop::collection::vec(0u32..=9, 14)) {
        let mut payload = vec![4];
        payload.extend(rest);
        let check = luhn_check_digit(&payload);
        payload.push(check);
        let number = to_string(&payload);
        prop_assert!(checksum::luhn(&number));

        payload[15] = (check + 1) % 10;
        prop_assert!(!checksum::luhn(&to_string(&payload)));
    }
}
