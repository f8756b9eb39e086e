//! 互換性違反の集計

use std::collections::BTreeMap;

use crate::errors::CompatViolation;

/// 原因ごとの互換性違反の件数
///
/// 各符号化呼び出しが返し、呼び出し側で [`Incompats::merge`] によって合算します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Incompats {
    counts: BTreeMap<CompatViolation, usize>,
}

impl Incompats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 違反を1件数えます。
    pub fn record(&mut self, violation: CompatViolation) {
        *self.counts.entry(violation).or_default() += 1;
    }

    pub fn merge(&mut self, other: Incompats) {
        for (violation, count) in other.counts {
            *self.counts.entry(violation).or_default() += count;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 違反の値 (`is_entailed_by` など) ごとの件数
    pub fn count(&self, value: &str) -> usize {
        self.counts
            .iter()
            .filter(|(violation, _)| violation.value() == value)
            .map(|(_, &count)| count)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompatViolation, usize)> {
        self.counts.iter().map(|(violation, &count)| (violation, count))
    }

    /// 集計結果を警告として出力し、カウンタを空にします。
    pub fn report(&mut self, scope: &str) {
        for (violation, count) in std::mem::take(&mut self.counts) {
            log::warn!(
                "Incompatibilities in {scope} '{}': {count}",
                violation.value()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_counts_per_cause() {
        let mut a = Incompats::new();
        a.record(CompatViolation::new("pointer", "is_caused_by"));
        let mut b = Incompats::new();
        b.record(CompatViolation::new("pointer", "is_caused_by"));
        b.record(CompatViolation::new("verb frame", "via-at"));
        a.merge(b);

        assert_eq!(a.count("is_caused_by"), 2);
        assert_eq!(a.count("via-at"), 1);
        assert_eq!(a.total(), 3);

        a.report("data.verb");
        assert!(a.is_empty());
    }
}
