use alloc::vec::Vec;
use core::alloc::Layout;
use core::fmt::Debug;
use core::mem;

use crate::Config;
use crate::Error;

/// Home slot of `key` in a table of `capacity` slots.
///
/// This is the absolute value of the truncating remainder, so `-18` and `18`
/// share a home in a 16-slot table and `i64::MIN` lands on slot 0.
#[inline(always)]
pub(crate) fn home_index(key: i64, capacity: usize) -> usize {
    debug_assert!(capacity > 0 && i64::try_from(capacity).is_ok());
    (key % capacity as i64).unsigned_abs() as usize
}

/// The sequence of slots visited when looking for `key`.
///
/// The first `capacity` positions follow a triangular walk from the home slot:
/// each step advances by one more than the previous step, and running off the
/// end of the array restarts the walk at slot 0 with a zero step. After a wrap
/// the walk only visits triangular offsets from 0, so it is followed by a
/// linear sweep of the whole array. Every slot is therefore visited and the
/// sequence ends after `2 * capacity` positions.
#[derive(Clone, Debug)]
pub(crate) struct ProbeSeq {
    index: usize,
    stride: usize,
    capacity: usize,
    walked: usize,
}

impl ProbeSeq {
    #[inline]
    pub(crate) fn new(key: i64, capacity: usize) -> Self {
        ProbeSeq {
            index: home_index(key, capacity),
            stride: 0,
            capacity,
            walked: 0,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.walked < self.capacity {
            let index = self.index;
            self.walked += 1;
            self.stride += 1;
            self.index += self.stride;
            if self.index >= self.capacity {
                self.index = 0;
                self.stride = 0;
            }
            return Some(index);
        }

        let swept = self.walked - self.capacity;
        if swept < self.capacity {
            self.walked += 1;
            return Some(swept);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.capacity - self.walked.min(self.capacity))
            + (self.capacity - self.walked.saturating_sub(self.capacity));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

/// A single position in the slot array.
///
/// `Tombstone` marks a slot whose entry was removed. Searches walk past it,
/// which keeps keys placed further along the same probe sequence reachable,
/// and inserts of new keys may reuse it.
#[derive(Clone, Debug)]
pub(crate) enum Slot<V> {
    Empty,
    Tombstone,
    Occupied(i64, V),
}

/// Outcome of walking a key's probe sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Search {
    /// The key is stored at this index.
    Found(usize),
    /// The key is absent; this is where it would be placed (the first
    /// tombstone on its sequence, otherwise the first empty slot).
    Vacant(usize),
}

/// The open-addressing storage behind [`LongMap`](crate::LongMap).
///
/// Owns the slot array and the counters that decide growth. Occupied and
/// tombstone slots are counted incrementally; slots only become `Empty`
/// again when the whole array is rebuilt.
#[derive(Clone)]
pub(crate) struct SlotTable<V> {
    slots: Vec<Slot<V>>,

    populated: usize,
    tombstones: usize,
    max_pop: usize,
    #[cfg(any(test, feature = "stats"))]
    rebuilds: usize,

    config: Config,
}

impl<V> Debug for SlotTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;

        f.debug_struct("SlotTable")
            .field(
                "slots",
                &self
                    .slots
                    .chunks(16)
                    .map(|row| {
                        row.iter()
                            .map(|slot| match slot {
                                Slot::Empty => String::from(".."),
                                Slot::Tombstone => String::from("xx"),
                                Slot::Occupied(key, _) => format!("{key}"),
                            })
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("tombstones", &self.tombstones)
            .field("capacity", &self.slots.len())
            .field("max_pop", &self.max_pop)
            .finish()
    }
}

impl<V> SlotTable<V> {
    /// Creates an empty table at the configured initial capacity.
    ///
    /// The config must already be validated.
    pub(crate) fn with_config(config: Config) -> Self {
        let capacity = config.get_initial_capacity();
        Self {
            slots: Self::empty_slots(capacity),
            populated: 0,
            tombstones: 0,
            max_pop: config.max_pop(capacity),
            #[cfg(any(test, feature = "stats"))]
            rebuilds: 0,
            config,
        }
    }

    fn empty_slots(capacity: usize) -> Vec<Slot<V>> {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        slots
    }

    fn try_empty_slots(capacity: usize) -> Result<Vec<Slot<V>>, Error> {
        let layout = Layout::array::<Slot<V>>(capacity).map_err(|_| Error::CapacityOverflow)?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::AllocError { layout })?;
        slots.resize_with(capacity, || Slot::Empty);
        Ok(slots)
    }

    #[inline]
    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.populated
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Slot<V>] {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<V>] {
        &mut self.slots
    }

    /// Walks the probe sequence of `key`, stopping at the first empty slot.
    pub(crate) fn search(&self, key: i64) -> Search {
        let mut vacant = None;
        for index in ProbeSeq::new(key, self.capacity()) {
            match &self.slots[index] {
                Slot::Empty => return Search::Vacant(vacant.unwrap_or(index)),
                Slot::Tombstone => {
                    vacant.get_or_insert(index);
                }
                Slot::Occupied(k, _) if *k == key => return Search::Found(index),
                Slot::Occupied(..) => {}
            }
        }

        match vacant {
            Some(index) => Search::Vacant(index),
            // populated <= max_pop < capacity, and the sweep visits every slot.
            None => unreachable!("no free slot in a table below its load factor"),
        }
    }

    #[inline]
    pub(crate) fn find(&self, key: i64) -> Option<usize> {
        match self.search(key) {
            Search::Found(index) => Some(index),
            Search::Vacant(_) => None,
        }
    }

    /// Returns the value stored at an occupied `index`.
    pub(crate) fn value_at(&self, index: usize) -> &V {
        match &self.slots[index] {
            Slot::Occupied(_, value) => value,
            _ => unreachable!("slot {index} is not occupied"),
        }
    }

    /// Returns the value stored at an occupied `index`.
    pub(crate) fn value_at_mut(&mut self, index: usize) -> &mut V {
        match &mut self.slots[index] {
            Slot::Occupied(_, value) => value,
            _ => unreachable!("slot {index} is not occupied"),
        }
    }

    /// Removes the entry at an occupied `index`, leaving a tombstone.
    pub(crate) fn take(&mut self, index: usize) -> (i64, V) {
        debug_assert!(matches!(self.slots[index], Slot::Occupied(..)));
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(key, value) => {
                self.populated -= 1;
                self.tombstones += 1;
                (key, value)
            }
            _ => unreachable!("slot {index} is not occupied"),
        }
    }

    /// Places a new `key` at `index`, which must come from
    /// [`Search::Vacant`] for that key, and returns the index it ends up at.
    ///
    /// If the insert pushes the population over the load factor, the table
    /// grows. If only the tombstones push it over, the table is rebuilt: at
    /// the same capacity when at most half of `max_pop` is populated, grown
    /// otherwise. Either rebuild leaves at least `max_pop / 2` inserts before
    /// the next one, so churn at full load stays amortized O(1). The
    /// replacement array is allocated before anything is written, so an
    /// error leaves the table untouched.
    pub(crate) fn try_insert_vacant(
        &mut self,
        index: usize,
        key: i64,
        value: V,
    ) -> Result<usize, Error> {
        let reused = matches!(self.slots[index], Slot::Tombstone);
        debug_assert!(reused || matches!(self.slots[index], Slot::Empty));

        let populated = self.populated + 1;
        let tombstones = self.tombstones - usize::from(reused);

        let rebuild = if populated > self.max_pop {
            let capacity = self.next_capacity()?;
            log::debug!(
                "growing long map from {} to {} slots with {} entries",
                self.capacity(),
                capacity,
                populated
            );
            Some(Self::try_empty_slots(capacity)?)
        } else if populated + tombstones <= self.max_pop {
            None
        } else if populated > self.max_pop / 2 {
            let capacity = self.next_capacity()?;
            log::debug!(
                "growing long map from {} to {} slots with {} entries and {} tombstones",
                self.capacity(),
                capacity,
                populated,
                tombstones
            );
            Some(Self::try_empty_slots(capacity)?)
        } else {
            log::debug!(
                "purging {} tombstones at capacity {}",
                tombstones,
                self.capacity()
            );
            Some(Self::try_empty_slots(self.capacity())?)
        };

        self.slots[index] = Slot::Occupied(key, value);
        self.populated = populated;
        self.tombstones = tombstones;

        match rebuild {
            Some(slots) => Ok(self.rehash_into(slots, key)),
            None => Ok(index),
        }
    }

    fn next_capacity(&self) -> Result<usize, Error> {
        let capacity = self
            .capacity()
            .checked_mul(self.config.get_growth_factor())
            .ok_or(Error::CapacityOverflow)?;
        i64::try_from(capacity).map_err(|_| Error::CapacityOverflow)?;
        Ok(capacity)
    }

    /// Moves every entry into `slots`, visiting the old array in physical
    /// order and placing each key on the first empty slot of its sequence.
    ///
    /// Returns the new index of `tracked`, which must be present.
    fn rehash_into(&mut self, slots: Vec<Slot<V>>, tracked: i64) -> usize {
        let capacity = slots.len();
        let old = mem::replace(&mut self.slots, slots);
        self.max_pop = self.config.max_pop(capacity);
        self.tombstones = 0;
        #[cfg(any(test, feature = "stats"))]
        {
            self.rebuilds += 1;
        }

        let mut tracked_index = 0;
        for slot in old {
            if let Slot::Occupied(key, value) = slot {
                let index = self.first_empty(key);
                if key == tracked {
                    tracked_index = index;
                }
                self.slots[index] = Slot::Occupied(key, value);
            }
        }

        debug_assert!(self.populated <= self.max_pop);
        tracked_index
    }

    fn first_empty(&self, key: i64) -> usize {
        let empty = ProbeSeq::new(key, self.capacity())
            .find(|&index| matches!(self.slots[index], Slot::Empty));
        let Some(index) = empty else {
            unreachable!("rebuilt table has no empty slot");
        };
        index
    }

    /// Drops every entry and shrinks back to the initial capacity.
    pub(crate) fn clear(&mut self) {
        let capacity = self.config.get_initial_capacity();
        if self.slots.len() == capacity {
            self.slots.fill_with(|| Slot::Empty);
        } else {
            log::trace!(
                "resetting long map from {} to {} slots",
                self.slots.len(),
                capacity
            );
            self.slots = Self::empty_slots(capacity);
        }

        self.populated = 0;
        self.tombstones = 0;
        self.max_pop = self.config.max_pop(capacity);
    }

    /// Empties the table as [`clear`](Self::clear) does and hands back the
    /// old slot array with its population.
    pub(crate) fn take_slots(&mut self) -> (Vec<Slot<V>>, usize) {
        let capacity = self.config.get_initial_capacity();
        let slots = mem::replace(&mut self.slots, Self::empty_slots(capacity));
        let populated = mem::take(&mut self.populated);
        self.tombstones = 0;
        self.max_pop = self.config.max_pop(capacity);
        (slots, populated)
    }

    pub(crate) fn into_slots(self) -> (Vec<Slot<V>>, usize) {
        (self.slots, self.populated)
    }

    #[cfg(test)]
    pub(crate) fn set_growth_factor(&mut self, growth_factor: usize) {
        self.config = self.config.growth_factor(growth_factor);
    }

    /// Number of positions `key` sits past the start of its probe sequence.
    #[cfg(any(test, feature = "stats"))]
    fn probe_length(&self, key: i64, index: usize) -> usize {
        ProbeSeq::new(key, self.capacity())
            .position(|i| i == index)
            .unwrap_or(2 * self.capacity())
    }

    /// Computes a histogram of probe lengths for the current table state.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        let mut bins = alloc::vec![0usize; crate::stats::PROBE_BINS];
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(key, _) = slot {
                let length = self.probe_length(*key, index);
                bins[length.min(crate::stats::PROBE_BINS - 1)] += 1;
            }
        }

        crate::stats::ProbeHistogram::new(bins)
    }

    /// Returns population and memory statistics for the current table state.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn debug_stats(&self) -> crate::stats::DebugStats {
        let total_slots = self.capacity();
        let slot_bytes = mem::size_of::<Slot<V>>();
        let max_probe = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied(key, _) => Some(self.probe_length(*key, index)),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        crate::stats::DebugStats {
            populated: self.populated,
            tombstones: self.tombstones,
            total_slots,
            max_pop: self.max_pop,
            max_probe,
            rebuilds: self.rebuilds,
            load_factor: self.populated as f64 / total_slots as f64,
            slot_utilization: (self.populated + self.tombstones) as f64 / total_slots as f64,
            total_bytes: total_slots * slot_bytes,
            wasted_bytes: (total_slots - self.populated) * slot_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn table<V>() -> SlotTable<V> {
        SlotTable::with_config(Config::new())
    }

    fn insert<V>(table: &mut SlotTable<V>, key: i64, value: V) -> usize {
        match table.search(key) {
            Search::Vacant(index) => table.try_insert_vacant(index, key, value).unwrap(),
            Search::Found(index) => panic!("{} already at {} in {:#?}", key, index, table),
        }
    }

    fn occupied_keys<V>(table: &SlotTable<V>) -> Vec<i64> {
        table
            .slots()
            .iter()
            .filter_map(|slot| match slot {
                Slot::Occupied(key, _) => Some(*key),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn home_index_truncates_then_takes_absolute_value() {
        assert_eq!(home_index(0, 16), 0);
        assert_eq!(home_index(1, 16), 1);
        assert_eq!(home_index(17, 16), 1);
        assert_eq!(home_index(-18, 16), 2);
        assert_eq!(home_index(-5, 16), 5);
        assert_eq!(home_index(-648568, 16), 8);
        assert_eq!(home_index(i64::MAX, 16), 15);
        assert_eq!(home_index(i64::MIN, 16), 0);
        assert_eq!(home_index(i64::MIN, 7), 1);
        assert_eq!(home_index(i64::MIN + 1, 32), 31);
        assert_eq!(home_index(-1, 1), 0);
    }

    #[test]
    fn probe_seq_walks_triangular_steps_and_resets_on_wrap() {
        let walk: Vec<usize> = ProbeSeq::new(3, 16).take(16).collect();
        assert_eq!(
            walk,
            vec![3, 4, 6, 9, 13, 0, 1, 3, 6, 10, 15, 0, 1, 3, 6, 10]
        );
    }

    #[test]
    fn probe_seq_sweeps_after_walk() {
        let seq = ProbeSeq::new(5, 8);
        assert_eq!(seq.len(), 16);

        let all: Vec<usize> = seq.collect();
        assert_eq!(&all[..8], &[5, 6, 0, 1, 3, 6, 0, 1]);
        assert_eq!(&all[8..], &[0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn probe_seq_covers_every_slot() {
        for capacity in [1usize, 2, 3, 7, 16, 33, 64] {
            for key in [-100i64, -1, 0, 1, 5, 99, i64::MAX, i64::MIN] {
                let mut seen = vec![false; capacity];
                for index in ProbeSeq::new(key, capacity) {
                    seen[index] = true;
                }
                assert!(seen.iter().all(|&s| s), "{key} in {capacity}");
            }
        }
    }

    #[test]
    fn collisions_follow_triangular_steps() {
        let mut table = table();
        assert_eq!(insert(&mut table, 0, 'a'), 0);
        assert_eq!(insert(&mut table, 16, 'b'), 1);
        assert_eq!(insert(&mut table, 32, 'c'), 3);
        assert_eq!(insert(&mut table, -48, 'd'), 6);
        assert_eq!(occupied_keys(&table), vec![0, 16, 32, -48]);
    }

    #[test]
    fn tombstone_keeps_later_keys_reachable() {
        let mut table = table();
        insert(&mut table, 0, 'a');
        insert(&mut table, 16, 'b');
        insert(&mut table, 32, 'c');

        let index = table.find(16).unwrap();
        assert_eq!(table.take(index), (16, 'b'));
        assert!(matches!(table.slots()[1], Slot::Tombstone));

        assert_eq!(table.find(32), Some(3), "{:#?}", table);
        assert_eq!(table.find(16), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_reuses_first_tombstone() {
        let mut table = table();
        insert(&mut table, 0, 'a');
        insert(&mut table, 16, 'b');
        insert(&mut table, 32, 'c');
        let index = table.find(16).unwrap();
        table.take(index);

        assert_eq!(table.search(48), Search::Vacant(1));
        assert_eq!(insert(&mut table, 48, 'd'), 1);
        assert_eq!(table.tombstones, 0);
        assert_eq!(occupied_keys(&table), vec![0, 48, 32]);
    }

    #[test]
    fn present_key_is_found_past_tombstone() {
        let mut table = table();
        insert(&mut table, 0, 'a');
        insert(&mut table, 16, 'b');
        insert(&mut table, 32, 'c');
        let index = table.find(16).unwrap();
        table.take(index);

        // 32 sits past the tombstone, so it must be found, not shadowed.
        assert_eq!(table.search(32), Search::Found(3));
    }

    #[test]
    fn grows_on_crossing_insert_only() {
        let mut table = table();
        for key in 0..12 {
            insert(&mut table, key, key);
            assert_eq!(table.capacity(), 16);
        }
        insert(&mut table, 12, 12);
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.max_pop, 24);
        assert_eq!(table.len(), 13);

        for key in 0..13 {
            assert_eq!(table.value_at(table.find(key).unwrap()), &key);
        }
    }

    #[test]
    fn tombstones_are_purged_at_same_capacity() {
        let mut table = table();
        for key in 0..12 {
            insert(&mut table, key, key);
        }
        for key in 0..12 {
            let index = table.find(key).unwrap();
            table.take(index);
        }
        assert_eq!(table.len(), 0);
        assert_eq!(table.tombstones, 12);

        // 13 homes on an empty slot, so no tombstone is reused and the
        // population plus tombstones crosses the threshold.
        let rebuilds = table.rebuilds;
        insert(&mut table, 13, 13);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.rebuilds, rebuilds + 1);
        assert_eq!(table.tombstones, 0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(13), Some(13));
        assert!(
            table
                .slots()
                .iter()
                .all(|slot| !matches!(slot, Slot::Tombstone))
        );
    }

    #[test]
    fn rehash_reports_moved_index() {
        let mut table = table();
        for key in 0..12 {
            insert(&mut table, key * 16, key);
        }
        let index = insert(&mut table, 12 * 16, 12);
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.find(12 * 16), Some(index));
        assert_eq!(table.value_at(index), &12);
    }

    #[test]
    fn grow_overflow_leaves_table_untouched() {
        let mut table: SlotTable<u8> =
            SlotTable::with_config(Config::new().initial_capacity(2).load_factor(0.5));
        assert_eq!(table.max_pop, 1);
        insert(&mut table, 0, 0);

        for growth_factor in [usize::MAX, i64::MAX as usize] {
            table.config = table.config.growth_factor(growth_factor);
            assert_eq!(table.next_capacity(), Err(Error::CapacityOverflow));

            match table.search(7) {
                Search::Vacant(index) => {
                    assert_eq!(
                        table.try_insert_vacant(index, 7, 1),
                        Err(Error::CapacityOverflow)
                    );
                }
                Search::Found(_) => unreachable!(),
            }
            assert_eq!(table.len(), 1);
            assert_eq!(table.capacity(), 2);
            assert_eq!(occupied_keys(&table), vec![0]);
            assert!(matches!(table.slots()[1], Slot::Empty));
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[cfg_attr(miri, ignore)]
    fn alloc_failure_leaves_table_untouched() {
        let mut table: SlotTable<u8> =
            SlotTable::with_config(Config::new().initial_capacity(4).load_factor(0.5));
        insert(&mut table, 0, 0);
        insert(&mut table, 1, 1);

        // A valid layout of roughly isize::MAX bytes, which no allocator can
        // satisfy.
        let growth_factor = isize::MAX as usize / mem::size_of::<Slot<u8>>() / 4;
        table.config = table.config.growth_factor(growth_factor);
        let layout = Layout::array::<Slot<u8>>(4 * growth_factor).unwrap();

        match table.search(2) {
            Search::Vacant(index) => {
                assert_eq!(
                    table.try_insert_vacant(index, 2, 2),
                    Err(Error::AllocError { layout })
                );
            }
            Search::Found(_) => unreachable!(),
        }
        assert_eq!(table.len(), 2);
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.rebuilds, 0);
        assert_eq!(occupied_keys(&table), vec![0, 1]);
        assert!(matches!(table.slots()[2], Slot::Empty));
    }

    #[test]
    fn smallest_valid_table_keeps_room_after_growth() {
        for config in [
            Config::new().initial_capacity(2).load_factor(0.5),
            Config::new().initial_capacity(3).load_factor(0.34),
            Config::new().initial_capacity(16).load_factor(0.0625),
        ] {
            assert_eq!(config.validate(), Ok(()));
            let mut table = SlotTable::with_config(config);
            for key in 0..200 {
                insert(&mut table, key, key);
                assert!(
                    table.len() <= table.max_pop,
                    "{} entries over max_pop {} with {:?}",
                    table.len(),
                    table.max_pop,
                    config
                );
            }
        }
    }

    #[test]
    fn tombstone_pressure_at_high_population_grows() {
        let mut table = table();
        for key in 0..12 {
            insert(&mut table, key, key);
        }
        let index = table.find(0).unwrap();
        table.take(index);

        // 20 walks 4, 5, 7, 10, 14 and never meets the tombstone in slot 0.
        assert_eq!(table.search(20), Search::Vacant(14));
        insert(&mut table, 20, 20);
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.tombstones, 0);
        assert_eq!(table.len(), 12);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn full_load_churn_rebuilds_rarely() {
        let mut table = table();
        // Exactly max_pop entries at capacity 1024.
        for key in 0..768 {
            insert(&mut table, key, key);
        }
        assert_eq!(table.capacity(), 1024);
        assert_eq!(table.len(), table.max_pop);

        let rebuilds = table.rebuilds;
        for key in 0..10_000 {
            let index = table.find(key).unwrap();
            table.take(index);
            insert(&mut table, key + 768, key);
            assert_eq!(table.len(), 768);
        }

        // One growth out of full load, then in-place purges at most every
        // 769 inserts.
        assert_eq!(table.capacity(), 2048);
        assert!(
            table.rebuilds - rebuilds <= 20,
            "{} rebuilds",
            table.rebuilds - rebuilds
        );
    }

    #[test]
    fn clear_shrinks_back_to_initial_capacity() {
        let mut table = table();
        for key in 0..100 {
            insert(&mut table, key, key.to_string());
        }
        assert_eq!(table.capacity(), 256);

        table.clear();
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.len(), 0);
        assert_eq!(table.max_pop, 12);
        assert_eq!(table.find(5), None);

        insert(&mut table, 5, String::from("five"));
        assert_eq!(table.value_at(5), "five");
    }

    #[test]
    fn take_slots_resets_table() {
        let mut table = table();
        for key in 0..40 {
            insert(&mut table, -key, key);
        }
        let (slots, populated) = table.take_slots();
        assert_eq!(populated, 40);
        assert_eq!(slots.len(), 64);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn histogram_counts_every_entry() {
        let mut table = table();
        for key in 0..12 {
            insert(&mut table, key * 16, key);
        }
        let histogram = table.probe_histogram();
        assert_eq!(histogram.bins().iter().sum::<usize>(), 12);
        assert_eq!(histogram.bins()[0], 1);

        let stats = table.debug_stats();
        assert_eq!(stats.populated, 12);
        assert_eq!(stats.total_slots, 16);
        assert_eq!(stats.rebuilds, 0);
        assert!(stats.max_probe >= 1);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn random_churn_keeps_counters_consistent() {
        let mut rng = SmallRng::seed_from_u64(OsRng.try_next_u64().unwrap());
        let mut table = table();

        for _ in 0..20_000 {
            let key = rng.random_range(-500i64..500);
            match table.search(key) {
                Search::Found(index) => {
                    if rng.random_bool(0.5) {
                        table.take(index);
                    }
                }
                Search::Vacant(index) => {
                    table.try_insert_vacant(index, key, key).unwrap();
                }
            }

            let occupied = table
                .slots()
                .iter()
                .filter(|slot| matches!(slot, Slot::Occupied(..)))
                .count();
            let tombstones = table
                .slots()
                .iter()
                .filter(|slot| matches!(slot, Slot::Tombstone))
                .count();
            assert_eq!(occupied, table.len());
            assert_eq!(tombstones, table.tombstones);
            assert!(table.len() + table.tombstones <= table.max_pop);
        }

        for key in occupied_keys(&table) {
            assert!(table.find(key).is_some(), "{key} unreachable in {:#?}", table);
        }
    }
}
