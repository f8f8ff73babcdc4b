//! Montant en lettres: French number-to-words conversion
//!
//! Deterministic, single-language (French) conversion of monetary amounts
//! into their written-out form, as printed in the summary block of the
//! reports ("Arrete le present etat a la somme de ...").
//!
//! Policy decisions:
//! - negative amounts render with a "moins " prefix;
//! - the supported range ends at 999 999 999 999 francs (milliards);
//!   anything beyond is a [`CaisseError::AmountRange`], never a truncation.

use crate::error::{CaisseError, CaisseResult};
use crate::models::Money;

/// Largest value the number-naming scheme supports (just under a billion
/// of thousands: everything expressible with "milliard")
pub const MAX_SUPPORTED: u64 = 999_999_999_999;

const UNITS: [&str; 17] = [
    "zéro", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix",
    "onze", "douze", "treize", "quatorze", "quinze", "seize",
];

const TENS: [&str; 7] = [
    "", "dix", "vingt", "trente", "quarante", "cinquante", "soixante",
];

/// Convert a non-negative integer to French words.
///
/// `0` yields `"zéro"`. Values above [`MAX_SUPPORTED`] are an error.
pub fn number_to_words(n: u64) -> CaisseResult<String> {
    if n > MAX_SUPPORTED {
        return Err(CaisseError::AmountRange(n as i64));
    }
    if n == 0 {
        return Ok(UNITS[0].to_string());
    }

    let mut parts: Vec<String> = Vec::new();

    let milliards = n / 1_000_000_000;
    let millions = (n / 1_000_000) % 1000;
    let milliers = (n / 1000) % 1000;
    let reste = n % 1000;

    if milliards > 0 {
        let word = if milliards == 1 { "milliard" } else { "milliards" };
        parts.push(format!("{} {}", under_1000(milliards, false), word));
    }

    if millions > 0 {
        let word = if millions == 1 { "million" } else { "millions" };
        parts.push(format!("{} {}", under_1000(millions, false), word));
    }

    if milliers > 0 {
        // "mille" is invariant and "un mille" is never written
        if milliers == 1 {
            parts.push("mille".to_string());
        } else {
            parts.push(format!("{} mille", under_1000(milliers, false)));
        }
    }

    if reste > 0 {
        parts.push(under_1000(reste, true));
    }

    Ok(parts.join(" "))
}

/// Convert a monetary amount to its full written form, currency included:
/// "mille sept cents francs congolais", "deux francs congolais et
/// cinquante centimes", "moins ..." for negative amounts.
pub fn amount_to_words(amount: Money) -> CaisseResult<String> {
    let francs = amount.francs().unsigned_abs();
    if francs > MAX_SUPPORTED {
        return Err(CaisseError::AmountRange(amount.centimes()));
    }

    let mut words = String::new();
    if amount.is_negative() {
        words.push_str("moins ");
    }

    words.push_str(&number_to_words(francs)?);
    words.push_str(if francs == 1 {
        " franc congolais"
    } else {
        " francs congolais"
    });

    let centimes = amount.centime_part() as u64;
    if centimes > 0 {
        words.push_str(" et ");
        words.push_str(&number_to_words(centimes)?);
        words.push_str(if centimes == 1 { " centime" } else { " centimes" });
    }

    Ok(words)
}

/// 1..=999 in words. `terminal` is true when nothing follows in the whole
/// number, which is when "cents" and "quatre-vingts" keep their final s.
fn under_1000(n: u64, terminal: bool) -> String {
    debug_assert!(n >= 1 && n <= 999);

    let hundreds = n / 100;
    let rest = n % 100;

    let mut out = String::new();

    if hundreds > 0 {
        if hundreds == 1 {
            out.push_str("cent");
        } else {
            out.push_str(&under_1000(hundreds, false));
            out.push_str(" cent");
        }
        if rest == 0 {
            if hundreds > 1 && terminal {
                out.push('s');
            }
            return out;
        }
        out.push(' ');
    }

    out.push_str(&under_100(rest, terminal));
    out
}

/// 1..=99 in words
fn under_100(n: u64, terminal: bool) -> String {
    debug_assert!(n >= 1 && n <= 99);

    if n <= 16 {
        return UNITS[n as usize].to_string();
    }
    if n < 20 {
        // dix-sept, dix-huit, dix-neuf
        return format!("dix-{}", UNITS[(n - 10) as usize]);
    }

    match n {
        20..=69 => {
            let tens = n / 10;
            let unit = n % 10;
            match unit {
                0 => TENS[tens as usize].to_string(),
                1 => format!("{} et un", TENS[tens as usize]),
                _ => format!("{}-{}", TENS[tens as usize], UNITS[unit as usize]),
            }
        }
        // 70-79 build on soixante + the teens
        70 => "soixante-dix".to_string(),
        71 => "soixante et onze".to_string(),
        72..=79 => format!("soixante-{}", under_100(n - 60, true)),
        80 => {
            if terminal {
                "quatre-vingts".to_string()
            } else {
                "quatre-vingt".to_string()
            }
        }
        // 81-99 build on quatre-vingt, without "et"
        _ => format!("quatre-vingt-{}", under_100(n - 80, true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(number_to_words(0).unwrap(), "zéro");
    }

    #[test]
    fn test_units_and_teens() {
        assert_eq!(number_to_words(1).unwrap(), "un");
        assert_eq!(number_to_words(16).unwrap(), "seize");
        assert_eq!(number_to_words(17).unwrap(), "dix-sept");
        assert_eq!(number_to_words(19).unwrap(), "dix-neuf");
    }

    #[test]
    fn test_two_digit_values() {
        assert_eq!(number_to_words(21).unwrap(), "vingt et un");
        assert_eq!(number_to_words(42).unwrap(), "quarante-deux");
        assert_eq!(number_to_words(70).unwrap(), "soixante-dix");
        assert_eq!(number_to_words(71).unwrap(), "soixante et onze");
        assert_eq!(number_to_words(77).unwrap(), "soixante-dix-sept");
        assert_eq!(number_to_words(80).unwrap(), "quatre-vingts");
        assert_eq!(number_to_words(81).unwrap(), "quatre-vingt-un");
        assert_eq!(number_to_words(91).unwrap(), "quatre-vingt-onze");
        assert_eq!(number_to_words(99).unwrap(), "quatre-vingt-dix-neuf");
    }

    #[test]
    fn test_hundreds_agreement() {
        assert_eq!(number_to_words(100).unwrap(), "cent");
        assert_eq!(number_to_words(200).unwrap(), "deux cents");
        assert_eq!(number_to_words(203).unwrap(), "deux cent trois");
        assert_eq!(number_to_words(180).unwrap(), "cent quatre-vingts");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(number_to_words(1000).unwrap(), "mille");
        assert_eq!(number_to_words(1700).unwrap(), "mille sept cents");
        assert_eq!(
            number_to_words(1999).unwrap(),
            "mille neuf cent quatre-vingt-dix-neuf"
        );
        assert_eq!(number_to_words(80_000).unwrap(), "quatre-vingt mille");
        assert_eq!(number_to_words(200_000).unwrap(), "deux cent mille");
    }

    #[test]
    fn test_six_digit_value() {
        assert_eq!(
            number_to_words(123_456).unwrap(),
            "cent vingt-trois mille quatre cent cinquante-six"
        );
    }

    #[test]
    fn test_millions_and_milliards() {
        assert_eq!(number_to_words(1_000_000).unwrap(), "un million");
        assert_eq!(
            number_to_words(2_500_000).unwrap(),
            "deux millions cinq cent mille"
        );
        assert_eq!(number_to_words(1_000_000_000).unwrap(), "un milliard");
    }

    #[test]
    fn test_maximum_supported_value() {
        let words = number_to_words(MAX_SUPPORTED).unwrap();
        assert_eq!(
            words,
            "neuf cent quatre-vingt-dix-neuf milliards \
             neuf cent quatre-vingt-dix-neuf millions \
             neuf cent quatre-vingt-dix-neuf mille \
             neuf cent quatre-vingt-dix-neuf"
        );
    }

    #[test]
    fn test_beyond_maximum_is_an_error() {
        let err = number_to_words(MAX_SUPPORTED + 1).unwrap_err();
        assert!(matches!(err, CaisseError::AmountRange(_)));
    }

    #[test]
    fn test_deterministic() {
        let a = number_to_words(123_456).unwrap();
        let b = number_to_words(123_456).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_amount_with_centimes() {
        let words = amount_to_words(Money::from_centimes(1_234_56)).unwrap();
        assert_eq!(
            words,
            "mille deux cent trente-quatre francs congolais et cinquante-six centimes"
        );
    }

    #[test]
    fn test_amount_singular_franc() {
        let words = amount_to_words(Money::from_francs(1)).unwrap();
        assert_eq!(words, "un franc congolais");
    }

    #[test]
    fn test_negative_amount_uses_moins_prefix() {
        let words = amount_to_words(Money::from_francs(-250)).unwrap();
        assert_eq!(words, "moins deux cent cinquante francs congolais");
    }

    #[test]
    fn test_amount_beyond_range_is_an_error() {
        let too_big = Money::from_francs((MAX_SUPPORTED + 1) as i64);
        assert!(matches!(
            amount_to_words(too_big),
            Err(CaisseError::AmountRange(_))
        ));
    }
}
