pub mod grid;
pub mod reconcile;
pub mod report;

/// Percentages throughout the system are rounded to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round1;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(50.0), 50.0);
        assert_eq!(round1(3.449), 3.4);
    }
}
