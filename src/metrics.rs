//! Running metrics accumulator.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Named numeric metrics, keyed by metric name.
///
/// A post-processor returns one of these per frame; the pipeline folds them
/// into a running accumulator with [`Metrics::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<String, f64>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Overwrite every key present in `update`; other keys keep their value.
    pub fn merge(&mut self, update: Metrics) {
        self.0.extend(update.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value:.0}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_last_value_wins() {
        let mut acc = Metrics::new();
        acc.merge([("count", 1.0), ("speed", 4.0)].into_iter().collect());
        acc.merge([("count", 3.0)].into_iter().collect());

        assert_eq!(acc.get("count"), Some(3.0));
        assert_eq!(acc.get("speed"), Some(4.0));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn test_display() {
        let metrics: Metrics = [("count", 2.0), ("avg", 1.6)].into_iter().collect();
        assert_eq!(metrics.to_string(), "avg: 2, count: 2");
    }

    #[test]
    fn test_serialize_as_map() {
        let metrics: Metrics = [("count", 2.0)].into_iter().collect();
        assert_eq!(serde_json::to_string(&metrics).unwrap(), r#"{"count":2.0}"#);
    }
}
