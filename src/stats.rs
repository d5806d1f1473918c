//! Low-level statistics about slot usage and probe lengths.
//!
//! Available with the `stats` feature. Printing requires `std` as well.

use alloc::vec::Vec;

/// Number of histogram bins. The last bin collects every entry that sits this
/// many or more positions past its home slot.
pub const PROBE_BINS: usize = 16;

/// Histogram of probe lengths over the occupied slots of a map.
///
/// `bins()[n]` counts entries that are found `n` positions into their probe
/// sequence, where 0 is the home slot. The final bin is open-ended.
///
/// # Examples
///
/// ```rust
/// use long_map::LongMap;
///
/// let mut map = LongMap::new();
/// map.insert(0, "a");
/// map.insert(16, "b");
///
/// let histogram = map.probe_histogram();
/// assert_eq!(histogram.bins()[0], 1);
/// assert_eq!(histogram.bins()[1], 1);
/// assert_eq!(histogram.total(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeHistogram {
    bins: Vec<usize>,
}

impl ProbeHistogram {
    pub(crate) fn new(bins: Vec<usize>) -> Self {
        debug_assert_eq!(bins.len(), PROBE_BINS);
        Self { bins }
    }

    /// Returns the per-length entry counts.
    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    /// Returns the number of entries counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Mean probe length, counting the open-ended bin at its lower bound.
    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }

        let weighted: usize = self
            .bins
            .iter()
            .enumerate()
            .map(|(length, count)| length * count)
            .sum();
        weighted as f64 / total as f64
    }

    /// Pretty-prints the histogram horizontally using stdout.
    ///
    /// Each row is a probe length; the last row (`>>`) holds longer probes.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                0 => None,
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                _ => Some('▉'),
            };
            if let Some(ch) = partial {
                bar.push(ch);
            }
            bar
        };

        for (length, &count) in self.bins.iter().enumerate() {
            let label = if length + 1 == PROBE_BINS {
                alloc::string::String::from(">>")
            } else {
                alloc::format!("{:>2}", length)
            };
            println!("{} | {} ({})", label, make_bar(count), count);
        }
    }
}

/// Population and memory statistics for a map.
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the map
    pub populated: usize,
    /// Number of slots holding a removed-entry marker
    pub tombstones: usize,
    /// Total number of slots allocated
    pub total_slots: usize,
    /// Population at which the next new key triggers growth
    pub max_pop: usize,
    /// Longest probe length of any stored entry
    pub max_probe: usize,
    /// Number of times the slot array was rebuilt by growth or tombstone
    /// purge since the map was created
    pub rebuilds: usize,
    /// Load factor (populated / total_slots)
    pub load_factor: f64,
    /// Slot utilization ((populated + tombstones) / total_slots)
    pub slot_utilization: f64,
    /// Total memory in bytes used by the slot array
    pub total_bytes: usize,
    /// Memory in bytes held by slots without an entry
    pub wasted_bytes: usize,
}

impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Long Map Debug Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% load factor, grows past {})",
            self.populated,
            self.total_slots,
            self.load_factor * 100.0,
            self.max_pop
        );
        println!(
            "Slot Usage: {} tombstones ({:.2}% utilization)",
            self.tombstones,
            self.slot_utilization * 100.0
        );
        println!("Longest probe: {}", self.max_probe);
        println!("Rebuilds: {}", self.rebuilds);
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn mean_weights_by_length() {
        let mut bins = vec![0; PROBE_BINS];
        bins[0] = 2;
        bins[3] = 2;
        let histogram = ProbeHistogram::new(bins);
        assert_eq!(histogram.total(), 4);
        assert_eq!(histogram.mean(), 1.5);
    }

    #[test]
    fn empty_histogram() {
        let histogram = ProbeHistogram::new(vec![0; PROBE_BINS]);
        assert_eq!(histogram.total(), 0);
        assert_eq!(histogram.mean(), 0.0);
    }

    #[test]
    #[cfg(feature = "std")]
    fn print_does_not_panic() {
        let mut bins = vec![0; PROBE_BINS];
        bins[0] = 100;
        bins[1] = 37;
        bins[PROBE_BINS - 1] = 1;
        ProbeHistogram::new(bins).print();
    }
}
