//! Running-sum reconstruction of delta-coded fields.
use crate::error::Violation;

/// Accumulator for one delta-coded field.
///
/// Its lifetime defines the scope of the running sum: dense node arrays keep
/// one accumulator per field for the whole run, ways and relations start a
/// fresh one for every record.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunningSum {
    field: &'static str,
    total: i64,
}

impl RunningSum {
    pub(crate) const fn new(field: &'static str) -> Self {
        Self { field, total: 0 }
    }

    /// Add the next delta and return the decoded value.
    pub(crate) fn advance(&mut self, delta: i64) -> Result<i64, Violation> {
        self.total = self
            .total
            .checked_add(delta)
            .ok_or(Violation::DeltaOverflow { field: self.field })?;
        Ok(self.total)
    }

    /// Decode a whole delta-coded list with a fresh accumulator.
    pub(crate) fn decode_all(field: &'static str, deltas: &[i64]) -> Result<Vec<i64>, Violation> {
        let mut sum = Self::new(field);
        deltas.iter().map(|&delta| sum.advance(delta)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], &[])]
    #[case(&[5], &[5])]
    #[case(&[10, 1, 1, -3], &[10, 11, 12, 9])]
    #[case(&[-7, -7, 14], &[-7, -14, 0])]
    fn decodes_prefix_sums(#[case] deltas: &[i64], #[case] expected: &[i64]) {
        assert_eq!(
            RunningSum::decode_all("refs", deltas),
            Ok(expected.to_vec())
        );
    }

    #[rstest]
    fn keeps_running_total_across_calls() {
        let mut sum = RunningSum::new("id");
        assert_eq!(sum.advance(100), Ok(100));
        assert_eq!(sum.advance(-1), Ok(99));
    }

    #[rstest]
    fn reports_overflow() {
        let err = RunningSum::decode_all("memids", &[i64::MAX, 1]).expect_err("overflow");
        assert_eq!(err, Violation::DeltaOverflow { field: "memids" });
    }
}
