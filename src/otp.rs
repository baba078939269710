use rand::Rng;

pub const OTP_LENGTH: usize = 6;

/// A fresh 6-digit numeric code, left-padded with zeros.
#[must_use]
pub fn generate() -> String {
    let code = rand::thread_rng().gen_range(0..1_000_000_u32);
    format!("{code:06}")
}

/// Whether a submitted code even has the right shape.
#[must_use]
pub fn is_well_formed(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate();
            assert_eq!(code.len(), OTP_LENGTH);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn shape_check_rejects_bad_input() {
        assert!(is_well_formed("012345"));
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("1234567"));
        assert!(!is_well_formed("12a456"));
        assert!(!is_well_formed(""));
    }
}
