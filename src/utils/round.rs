// src/utils/round.rs

/// Round to `places` decimal places. Used only at the presentation boundary;
/// intermediate sums are never rounded.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(33.333333, 2), 33.33);
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(66.665, 2), 66.67);
    }
}
