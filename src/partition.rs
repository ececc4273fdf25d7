use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use crate::cluster::SizeFrequency;
use crate::error::{PlanarCodeError, Result};
use crate::{PARTITION_COUNT, PARTITION_TOTAL};

/// One partition of 12, given by how many parts of each size it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartitionOfTwelve {
    pub ordinal: usize,
    pub frequencies: SizeFrequency,
}

impl PartitionOfTwelve {
    /// Parts in descending order.
    pub fn parts(&self) -> Vec<usize> {
        self.frequencies.parts().collect()
    }
}

impl fmt::Display for PartitionOfTwelve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.frequencies, f)
    }
}

/// Every partition of 12 with a dense numbering and the reverse lookup.
#[derive(Debug)]
pub struct PartitionTable {
    partitions: Vec<PartitionOfTwelve>,
    index: HashMap<SizeFrequency, usize>,
}

static TABLE: OnceLock<PartitionTable> = OnceLock::new();

impl PartitionTable {
    /// Enumerate all partitions, preferring larger parts first.
    ///
    /// Ordinal 0 is `12`, ordinal 1 is `11 1`, the last one is twelve `1`s.
    pub fn build() -> Self {
        let mut table = Self {
            partitions: Vec::with_capacity(PARTITION_COUNT),
            index: HashMap::with_capacity(PARTITION_COUNT),
        };
        let mut current = SizeFrequency::new();
        table.build_recursive(&mut current, PARTITION_TOTAL);
        table
    }

    /// The process-wide table, built on first use.
    pub fn global() -> &'static Self {
        TABLE.get_or_init(Self::build)
    }

    fn build_recursive(&mut self, current: &mut SizeFrequency, size: usize) {
        let weight = current.weight();
        if weight == PARTITION_TOTAL {
            let ordinal = self.partitions.len();
            self.partitions.push(PartitionOfTwelve {
                ordinal,
                frequencies: *current,
            });
            self.index.insert(*current, ordinal);
            return;
        }
        if weight + size <= PARTITION_TOTAL {
            current.add(size);
            self.build_recursive(current, size);
            current.remove(size);
        }
        if size > 1 {
            self.build_recursive(current, size - 1);
        }
    }

    pub fn partitions(&self) -> &[PartitionOfTwelve] {
        &self.partitions
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Result<&PartitionOfTwelve> {
        self.partitions
            .get(ordinal)
            .ok_or(PlanarCodeError::PartitionOrdinalOutOfRange {
                ordinal,
                count: self.partitions.len(),
            })
    }

    /// Ordinal of the partition with the given frequencies.
    pub fn classify(&self, sizes: &SizeFrequency) -> Result<usize> {
        self.index
            .get(sizes)
            .copied()
            .ok_or(PlanarCodeError::UnknownPartition {
                frequencies: *sizes.counts(),
            })
    }
}

/// Whether a cluster of `size` pentagons whose members have the given
/// degrees can occur.
///
/// Clusters of one or two pentagons always can; three must form a triangle;
/// four and five need the exact degree profiles `2 2 3 3` and `2 2 3 3 4`.
/// Larger clusters are never accepted.
pub fn is_cluster_valid(size: usize, degrees: &[usize]) -> bool {
    if size < 3 {
        return true;
    }
    if size > 5 {
        return false;
    }

    let mut frequency = [0usize; 5];
    for &d in degrees {
        if let Some(slot) = frequency.get_mut(d) {
            *slot += 1;
        }
    }

    match size {
        3 => frequency[2] == 3,
        4 => frequency[2] == 2 && frequency[3] == 2,
        5 => frequency[2] == 2 && frequency[3] == 2 && frequency[4] == 1,
        _ => false,
    }
}
