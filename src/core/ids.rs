//! Reference number generators for mock receipts
//!
//! Every identifier is drawn independently per call. Nothing checks for
//! collisions beyond the randomness of the generator itself.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const PAYMENT_PREFIX: &str = "ZMTAX-";
pub const REGISTRATION_PREFIX: &str = "PACRA-";
pub const ID_APPLICATION_PREFIX: &str = "IDAPP-";
pub const REPORT_PREFIX: &str = "CASE-";

fn random_upper(len: usize) -> String {
    let mut rng = rand::thread_rng();
    let pick = Uniform::from(0..UPPER_ALPHANUMERIC.len());
    (0..len)
        .map(|_| char::from(UPPER_ALPHANUMERIC[pick.sample(&mut rng)]))
        .collect()
}

/// `ZMTAX-` followed by 8 uppercase alphanumerics
pub fn payment_ref() -> String {
    format!("{}{}", PAYMENT_PREFIX, random_upper(8))
}

/// `PACRA-` followed by a five digit number
pub fn registration_number() -> String {
    let n: u32 = rand::thread_rng().gen_range(10_000..100_000);
    format!("{}{}", REGISTRATION_PREFIX, n)
}

/// `IDAPP-` followed by the current Unix time in milliseconds
pub fn id_application_id() -> String {
    format!("{}{}", ID_APPLICATION_PREFIX, chrono::Utc::now().timestamp_millis())
}

/// `CASE-` followed by 7 uppercase alphanumerics
pub fn case_id() -> String {
    format!("{}{}", REPORT_PREFIX, random_upper(7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_payment_ref_shape() {
        let re = Regex::new(r"^ZMTAX-[A-Z0-9]{8}$").unwrap();
        for _ in 0..200 {
            let reference = payment_ref();
            assert!(re.is_match(&reference), "bad ref {}", reference);
        }
    }

    #[test]
    fn test_registration_number_is_five_digits() {
        let re = Regex::new(r"^PACRA-[1-9][0-9]{4}$").unwrap();
        for _ in 0..200 {
            let reg_no = registration_number();
            assert!(re.is_match(&reg_no), "bad regNo {}", reg_no);
        }
    }

    #[test]
    fn test_id_application_uses_timestamp() {
        let before = chrono::Utc::now().timestamp_millis();
        let app_id = id_application_id();
        let after = chrono::Utc::now().timestamp_millis();

        let millis: i64 = app_id
            .strip_prefix(ID_APPLICATION_PREFIX)
            .unwrap()
            .parse()
            .unwrap();
        assert!(millis >= before && millis <= after);
    }

    #[test]
    fn test_case_id_shape() {
        let re = Regex::new(r"^CASE-[A-Z0-9]{7}$").unwrap();
        for _ in 0..200 {
            let case = case_id();
            assert!(re.is_match(&case), "bad caseId {}", case);
        }
    }
}
