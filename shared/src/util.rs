/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a snowflake-style i64 for use as a booking reference.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at booking scale)
pub fn booking_ref() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Human-facing tracking number stamped onto submitted orders
pub fn tracking_number() -> String {
    format!("TRK-{}", booking_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_ref_is_positive_and_monotonic_scale() {
        let a = booking_ref();
        let b = booking_ref();
        assert!(a > 0);
        assert!(b > 0);
        // Both stamped in the same era: high bits agree to within the random tail
        assert!((a >> 12) <= (b >> 12) + 1);
    }

    #[test]
    fn test_tracking_number_format() {
        let tn = tracking_number();
        assert!(tn.starts_with("TRK-"));
        assert!(tn[4..].parse::<i64>().is_ok());
    }
}
