//! Receipt issuing.
//!
//! A receipt is the first [`RECEIPT_LEN`] hex characters of
//! `sha256(type prefix ‖ 16 random bytes ‖ value)`. The random bytes are not
//! kept, so a receipt alone reveals nothing about the value it was issued
//! for; only a verification table can map it back.

use anyhow::{bail, Context, Result};
use rand::Rng;
use sha2::{Digest, Sha256};
use time::macros::format_description;
use time::{Duration, OffsetDateTime, Time, UtcOffset};

use crate::model::{IssuedReceipt, ReceiptType};

/// Number of distinct salts used when deriving verification codes.
pub const SALT_SIZE: u32 = 10001;
/// Random bytes mixed into every receipt.
pub const BYTE_LEN_RAND: usize = 16;
/// Hex characters kept from the digest.
pub const RECEIPT_LEN: usize = 16;

/// Encode bytes as lowercase hexadecimal
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash input for an hour: the UTC hour (`HH`) followed by `DD/MM/YYYY`.
pub fn hour_hash_input(hour: OffsetDateTime) -> String {
    let utc = hour.to_offset(UtcOffset::UTC);
    format!(
        "{:02}{:02}/{:02}/{:04}",
        utc.hour(),
        utc.day(),
        u8::from(utc.month()),
        utc.year()
    )
}

/// Canonical table value for an hour, `YYYY-MM-DDTHH:MM:SSZ`.
pub fn hour_value(hour: OffsetDateTime) -> Result<String> {
    hour.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
        ))
        .with_context(|| format!("cannot format hour {}", hour))
}

/// Truncate to the start of the UTC hour.
pub fn top_of_hour(dt: OffsetDateTime) -> OffsetDateTime {
    let utc = dt.to_offset(UtcOffset::UTC);
    utc.replace_time(Time::MIDNIGHT) + Duration::hours(i64::from(utc.hour()))
}

/// Digest a receipt from its parts. Exposed separately from the random
/// draw so the construction is reproducible.
pub fn digest_receipt(kind: ReceiptType, random: &[u8], value: &str) -> String {
    let mut sha = Sha256::new();
    sha.update(kind.prefix());
    sha.update(random);
    sha.update(value.as_bytes());
    let mut code = hex_encode(&sha.finalize());
    code.truncate(RECEIPT_LEN);
    code
}

fn random_bytes<R: Rng + ?Sized>(rng: &mut R) -> [u8; BYTE_LEN_RAND] {
    let mut r = [0u8; BYTE_LEN_RAND];
    rng.fill_bytes(&mut r);
    r
}

pub fn hour_receipt<R: Rng + ?Sized>(rng: &mut R, hour: OffsetDateTime) -> String {
    digest_receipt(ReceiptType::Hour, &random_bytes(rng), &hour_hash_input(hour))
}

pub fn zipcode_receipt<R: Rng + ?Sized>(rng: &mut R, zipcode: &str) -> String {
    digest_receipt(ReceiptType::Zipcode, &random_bytes(rng), zipcode)
}

/// One receipt per hour for `num_days` days, starting at the hour containing `start`.
///
/// Fails when the last hour lies outside the representable date range.
pub fn generate_hour_receipts<R: Rng + ?Sized>(
    rng: &mut R,
    start: OffsetDateTime,
    num_days: u32,
) -> Result<Vec<IssuedReceipt>> {
    let first = top_of_hour(start);
    (0..i64::from(num_days) * 24)
        .map(|k| {
            let Some(hour) = first.checked_add(Duration::hours(k)) else {
                bail!(
                    "{} days of receipts from {} run past the last supported date",
                    num_days,
                    first
                );
            };
            Ok(IssuedReceipt {
                value: hour_value(hour)?,
                receipt: hour_receipt(rng, hour),
            })
        })
        .collect()
}

pub fn generate_zipcode_receipts<R: Rng + ?Sized>(
    rng: &mut R,
    zipcodes: &[String],
) -> Vec<IssuedReceipt> {
    zipcodes
        .iter()
        .map(|z| IssuedReceipt {
            value: z.clone(),
            receipt: zipcode_receipt(rng, z),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::helpers::seeded_rng;
    use time::macros::datetime;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn hour_input_is_hour_then_date() {
        let dt = datetime!(2021-03-01 09:42:00 UTC);
        assert_eq!(hour_hash_input(dt), "0901/03/2021");
    }

    #[test]
    fn hour_input_uses_utc() {
        let dt = datetime!(2021-03-01 01:00:00 +03:00);
        assert_eq!(hour_hash_input(dt), "2228/02/2021");
    }

    #[test]
    fn top_of_hour_truncates() {
        let dt = datetime!(2021-03-01 09:42:17.5 +01:00);
        assert_eq!(top_of_hour(dt), datetime!(2021-03-01 08:00:00 UTC));
    }

    #[test]
    fn digest_is_truncated_hex() {
        let code = digest_receipt(ReceiptType::Hour, &[0u8; 16], "0901/03/2021");
        assert_eq!(code.len(), RECEIPT_LEN);
        assert!(is_lower_hex(&code));
    }

    #[test]
    fn digest_is_deterministic_and_type_separated() {
        let r = [3u8; 16];
        let a = digest_receipt(ReceiptType::Zipcode, &r, "02139");
        let b = digest_receipt(ReceiptType::Zipcode, &r, "02139");
        let c = digest_receipt(ReceiptType::Hour, &r, "02139");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn digest_of_empty_sha_input_prefix() {
        // sha256("1") = 6b86b273ff34fce1...
        assert_eq!(digest_receipt(ReceiptType::Zipcode, &[], ""), "6b86b273ff34fce1");
        // sha256("0") = 5feceb66ffc86f38...
        assert_eq!(digest_receipt(ReceiptType::Hour, &[], ""), "5feceb66ffc86f38");
    }

    #[test]
    fn randomness_changes_the_receipt() {
        let mut rng = seeded_rng();
        let hour = datetime!(2021-03-01 09:00:00 UTC);
        assert_ne!(hour_receipt(&mut rng, hour), hour_receipt(&mut rng, hour));
    }

    #[test]
    fn generates_one_receipt_per_hour() {
        let mut rng = seeded_rng();
        let receipts =
            generate_hour_receipts(&mut rng, datetime!(2021-03-01 09:42:00 UTC), 2).unwrap();
        assert_eq!(receipts.len(), 48);
        assert_eq!(receipts[0].value, "2021-03-01T09:00:00Z");
        assert_eq!(receipts[1].value, "2021-03-01T10:00:00Z");
        assert_eq!(receipts[47].value, "2021-03-03T08:00:00Z");
        assert!(receipts.iter().all(|r| r.receipt.len() == RECEIPT_LEN));
    }

    #[test]
    fn hour_value_is_canonical_utc() {
        let hour = datetime!(2021-03-01 09:00:00 -05:00);
        assert_eq!(hour_value(hour).unwrap(), "2021-03-01T14:00:00Z");
    }

    #[test]
    fn hours_past_the_supported_range_are_an_error() {
        let mut rng = seeded_rng();
        let err = generate_hour_receipts(&mut rng, datetime!(9999-12-31 23:30:00 UTC), 1)
            .unwrap_err();
        assert!(err.to_string().contains("last supported date"));
    }

    #[test]
    fn last_supported_hour_still_generates() {
        let mut rng = seeded_rng();
        let receipts =
            generate_hour_receipts(&mut rng, datetime!(9999-12-30 23:00:00 UTC), 1).unwrap();
        assert_eq!(receipts.len(), 24);
        assert_eq!(receipts[23].value, "9999-12-31T22:00:00Z");
    }

    #[test]
    fn zipcode_receipts_keep_values() {
        let mut rng = seeded_rng();
        let zips = vec!["02139".to_string(), "10001".to_string()];
        let receipts = generate_zipcode_receipts(&mut rng, &zips);
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[1].value, "10001");
    }
}
