use std::collections::BTreeMap;

use super::extremum::{ExtremumRecord, Position};

/// Which extremum a count refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtremumKind {
    Min,
    Max,
}

impl std::fmt::Display for ExtremumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Min => write!(f, "min"),
            Self::Max => write!(f, "max"),
        }
    }
}

/// Number of blocks whose minimum (or maximum) fell at `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AggregatedCount {
    pub row: usize,
    pub col: usize,
    pub count: usize,
    pub kind: ExtremumKind,
}

/// Tallies extremum positions in a single pass over the block records.
#[derive(Clone, Debug, Default)]
pub struct PositionAggregator {
    counts: BTreeMap<(ExtremumKind, Position), usize>,
    blocks: usize,
}

impl PositionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: &ExtremumRecord) {
        *self.counts.entry((ExtremumKind::Min, record.min)).or_insert(0) += 1;
        *self.counts.entry((ExtremumKind::Max, record.max)).or_insert(0) += 1;
        self.blocks += 1;
    }

    /// Number of records seen so far.
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// Min rows first, then max rows, each ordered by `(row, col)`.
    pub fn into_counts(self) -> Vec<AggregatedCount> {
        self.counts
            .into_iter()
            .map(|((kind, pos), count)| AggregatedCount {
                row: pos.row,
                col: pos.col,
                count,
                kind,
            })
            .collect()
    }
}

impl Extend<ExtremumRecord> for PositionAggregator {
    fn extend<I: IntoIterator<Item = ExtremumRecord>>(&mut self, iter: I) {
        for record in iter {
            self.record(&record);
        }
    }
}

/// Aggregate a full sequence of block records into position counts.
pub fn aggregate_positions<I>(records: I) -> Vec<AggregatedCount>
where
    I: IntoIterator<Item = ExtremumRecord>,
{
    let mut aggregator = PositionAggregator::new();
    aggregator.extend(records);
    aggregator.into_counts()
}

/// Sum of the counts of one kind. Equals the block count for a full run.
pub fn kind_total(counts: &[AggregatedCount], kind: ExtremumKind) -> usize {
    counts
        .iter()
        .filter(|c| c.kind == kind)
        .map(|c| c.count)
        .sum()
}
