use alloc::alloc::handle_alloc_error;
use alloc::vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::Config;
use crate::Error;
use crate::slot_table::Search;
use crate::slot_table::Slot;
use crate::slot_table::SlotTable;

#[cold]
#[inline(never)]
fn infallible(error: Error) -> ! {
    match error {
        Error::AllocError { layout } => handle_alloc_error(layout),
        error => panic!("{error}"),
    }
}

/// A map from `i64` keys to values of type `V`, stored in a single
/// open-addressing slot array.
///
/// A key's home slot is `|key % capacity|` (truncating remainder). Collisions
/// are resolved with triangular linear probing, removed entries leave
/// tombstones, and the array grows by the configured factor once the number
/// of entries exceeds `capacity * load_factor`.
///
/// # Performance Characteristics
///
/// - **Lookup/insert/remove**: O(1) expected, O(capacity) worst case.
/// - **Growth**: an O(capacity) rebuild inside the insert that crosses the
///   load factor.
/// - **Memory**: each slot is the size of `(i64, V)` plus a discriminant,
///   with no per-entry heap allocation.
///
/// # Examples
///
/// ```rust
/// use long_map::LongMap;
///
/// let mut map = LongMap::new();
/// assert_eq!(map.insert(7, "seven"), None);
/// assert_eq!(map.insert(-7, "minus seven"), None);
/// assert_eq!(map.insert(7, "SEVEN"), Some("seven"));
///
/// assert_eq!(map.get(7), Some(&"SEVEN"));
/// assert_eq!(map.remove(-7), Some("minus seven"));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Clone)]
pub struct LongMap<V> {
    table: SlotTable<V>,
}

impl<V> Debug for LongMap<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> LongMap<V> {
    /// Creates an empty map with the default [`Config`]: 16 slots, a load
    /// factor of 0.75 and a growth factor of 2.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let map: LongMap<String> = LongMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self {
            table: SlotTable::with_config(Config::new()),
        }
    }

    /// Creates an empty map with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if [`Config::validate`] rejects `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::Config;
    /// use long_map::LongMap;
    ///
    /// let map: LongMap<u8> = LongMap::with_config(Config::new().initial_capacity(100));
    /// assert_eq!(map.capacity(), 100);
    /// ```
    pub fn with_config(config: Config) -> Self {
        match Self::try_with_config(config) {
            Ok(map) => map,
            Err(error) => infallible(error),
        }
    }

    /// Creates an empty map with the given configuration, or reports why the
    /// configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::Config;
    /// use long_map::Error;
    /// use long_map::LongMap;
    ///
    /// let result = LongMap::<u8>::try_with_config(Config::new().growth_factor(1));
    /// assert!(matches!(result, Err(Error::InvalidConfig(_))));
    /// ```
    pub fn try_with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            table: SlotTable::with_config(config),
        })
    }

    /// Returns the configuration this map was built with.
    pub fn config(&self) -> &Config {
        self.table.config()
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Returns the number of slots in the underlying array.
    ///
    /// This is the full slot count, not the number of entries the map can
    /// hold before growing (that is `capacity * load_factor`, rounded down).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// for key in 0..12 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.capacity(), 16);
    ///
    /// map.insert(12, ());
    /// assert_eq!(map.capacity(), 32);
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all entries and shrinks the slot array back to the initial
    /// capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<i64> = (0..100).map(|k| (k, k)).collect();
    /// assert!(map.capacity() > 16);
    ///
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and the map
    /// may grow. If the map did have this key present, the value is updated and
    /// the old value is returned; the map never grows in that case.
    ///
    /// # Panics
    ///
    /// Panics if the grown capacity overflows, and aborts through
    /// [`handle_alloc_error`] if the new slot array cannot be allocated. Use
    /// [`try_insert`](Self::try_insert) to handle these as errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: i64, value: V) -> Option<V> {
        match self.try_insert(key, value) {
            Ok(previous) => previous,
            Err(error) => infallible(error),
        }
    }

    /// Inserts a key-value pair, reporting failure to grow the slot array
    /// instead of aborting.
    ///
    /// On error the map is left exactly as it was and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// assert_eq!(map.try_insert(1, 'x'), Ok(None));
    /// assert_eq!(map.try_insert(1, 'y'), Ok(Some('x')));
    /// ```
    pub fn try_insert(&mut self, key: i64, value: V) -> Result<Option<V>, Error> {
        match self.table.search(key) {
            Search::Found(index) => Ok(Some(core::mem::replace(
                self.table.value_at_mut(index),
                value,
            ))),
            Search::Vacant(index) => {
                self.table.try_insert_vacant(index, key, value)?;
                Ok(None)
            }
        }
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// map.insert(i64::MIN, "min");
    /// assert_eq!(map.get(i64::MIN), Some(&"min"));
    /// assert_eq!(map.get(0), None);
    /// ```
    pub fn get(&self, key: i64) -> Option<&V> {
        self.table.find(key).map(|index| self.table.value_at(index))
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// map.insert(1, 10);
    /// if let Some(value) = map.get_mut(1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(map.get(1), Some(&15));
    /// ```
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let index = self.table.find(key)?;
        Some(self.table.value_at_mut(index))
    }

    /// Returns `true` if the map contains a value for `key`.
    pub fn contains_key(&self, key: i64) -> bool {
        self.table.find(key).is_some()
    }

    /// Returns `true` if any entry holds a value equal to `value`.
    ///
    /// This is a linear scan over the slot array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// map.insert(3, "c");
    /// assert!(map.contains_value(&"c"));
    /// assert!(!map.contains_value(&"d"));
    /// ```
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// The slot is marked as a tombstone, so keys that probed past it while
    /// being inserted stay reachable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// map.insert(0, "a");
    /// map.insert(16, "b"); // same home slot as 0
    /// map.insert(32, "c"); // probes past both
    ///
    /// assert_eq!(map.remove(16), Some("b"));
    /// assert_eq!(map.get(32), Some(&"c"));
    /// assert_eq!(map.remove(16), None);
    /// ```
    pub fn remove(&mut self, key: i64) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the map, returning the stored key and value if it was
    /// present.
    pub fn remove_entry(&mut self, key: i64) -> Option<(i64, V)> {
        let index = self.table.find(key)?;
        Some(self.table.take(index))
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut counts = LongMap::new();
    /// for key in [3, -1, 3, 3, -1] {
    ///     *counts.entry(key).or_insert(0) += 1;
    /// }
    /// assert_eq!(counts.get(3), Some(&3));
    /// assert_eq!(counts.get(-1), Some(&2));
    /// ```
    pub fn entry(&mut self, key: i64) -> Entry<'_, V> {
        match self.table.search(key) {
            Search::Found(index) => Entry::Occupied(OccupiedEntry {
                table: &mut self.table,
                index,
            }),
            Search::Vacant(index) => Entry::Vacant(VacantEntry {
                table: &mut self.table,
                index,
                key,
            }),
        }
    }

    /// Returns an iterator over the entries in physical slot order.
    ///
    /// The order depends on capacity and on insertion and removal history. It
    /// is neither sorted nor insertion order, but [`keys`](Self::keys),
    /// [`values`](Self::values) and this iterator always agree with each other
    /// for the same map state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// map.insert(300, "c");
    /// map.insert(-5, "b");
    /// map.insert(1, "a");
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, vec![(1, &"a"), (-5, &"b"), (300, &"c")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.table.slots().iter(),
            remaining: self.table.len(),
        }
    }

    /// Returns an iterator over the entries in physical slot order with
    /// mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        let remaining = self.table.len();
        IterMut {
            slots: self.table.slots_mut().iter_mut(),
            remaining,
        }
    }

    /// Returns an iterator over the keys in physical slot order.
    ///
    /// An empty map yields nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// assert_eq!(map.keys().next(), None);
    ///
    /// map.insert(1, "a");
    /// map.insert(-5, "b");
    /// map.insert(300, "c");
    /// assert_eq!(map.keys().collect::<Vec<_>>(), vec![1, -5, 300]);
    /// ```
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, positionally aligned with
    /// [`keys`](Self::keys).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// map.insert(1, "a");
    /// map.insert(-5, "b");
    /// map.insert(300, "c");
    /// assert_eq!(map.values().collect::<Vec<_>>(), vec![&"a", &"b", &"c"]);
    /// ```
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes every entry, returning them as an iterator in physical slot
    /// order.
    ///
    /// The map is left as after [`clear`](Self::clear), even if the iterator is
    /// dropped early.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::LongMap;
    ///
    /// let mut map = LongMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let drained: Vec<_> = map.drain().collect();
    /// assert_eq!(drained, vec![(1, "a"), (2, "b")]);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        let (slots, remaining) = self.table.take_slots();
        Drain {
            inner: IntoIter {
                slots: slots.into_iter(),
                remaining,
            },
            _marker: PhantomData,
        }
    }

    /// Returns a histogram of how far each entry sits from its home slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Returns population, tombstone and memory statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        self.table.debug_stats()
    }
}

impl<V> Default for LongMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PartialEq for LongMap<V>
where
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V> Eq for LongMap<V> where V: Eq {}

impl<V> Extend<(i64, V)> for LongMap<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> FromIterator<(i64, V)> for LongMap<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V> IntoIterator for LongMap<V> {
    type IntoIter = IntoIter<V>;
    type Item = (i64, V);

    fn into_iter(self) -> Self::IntoIter {
        let (slots, remaining) = self.table.into_slots();
        IntoIter {
            slots: slots.into_iter(),
            remaining,
        }
    }
}

impl<'a, V> IntoIterator for &'a LongMap<V> {
    type IntoIter = Iter<'a, V>;
    type Item = (i64, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut LongMap<V> {
    type IntoIter = IterMut<'a, V>;
    type Item = (i64, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`LongMap`].
///
/// [`entry`]: LongMap::entry
pub enum Entry<'a, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns this entry's key.
    pub fn key(&self) -> i64 {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, V> Entry<'a, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, V> {
    table: &'a mut SlotTable<V>,
    index: usize,
    key: i64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Returns the key that would be used when inserting a value.
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    ///
    /// # Panics
    ///
    /// Fails the same way as [`LongMap::insert`] if the map cannot grow.
    pub fn insert(self, value: V) -> &'a mut V {
        match self.try_insert(value) {
            Ok(value) => value,
            Err(error) => infallible(error),
        }
    }

    /// Inserts the value into the map, reporting failure to grow the slot
    /// array instead of aborting.
    pub fn try_insert(self, value: V) -> Result<&'a mut V, Error> {
        let table = self.table;
        let index = table.try_insert_vacant(self.index, self.key, value)?;
        Ok(table.value_at_mut(index))
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, V> {
    table: &'a mut SlotTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Returns the key in the entry.
    pub fn key(&self) -> i64 {
        match &self.table.slots()[self.index] {
            Slot::Occupied(key, _) => *key,
            _ => unreachable!("occupied entry points at a free slot"),
        }
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        self.table.value_at(self.index)
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        self.table.value_at_mut(self.index)
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        let table = self.table;
        table.value_at_mut(self.index)
    }

    /// Inserts a value into the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.table.take(self.index).1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (i64, V) {
        self.table.take(self.index)
    }
}

/// An iterator over the entries of a [`LongMap`] in physical slot order.
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in &mut self.slots {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((*key, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the entries of a [`LongMap`] in physical slot
/// order.
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (i64, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in &mut self.slots {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((*key, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

/// An iterator over the keys of a [`LongMap`].
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Iterator for Keys<'_, V> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}
impl<V> FusedIterator for Keys<'_, V> {}

/// An iterator over the values of a [`LongMap`].
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}
impl<V> FusedIterator for Values<'_, V> {}

/// A mutable iterator over the values of a [`LongMap`].
pub struct ValuesMut<'a, V> {
    inner: IterMut<'a, V>,
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}
impl<V> FusedIterator for ValuesMut<'_, V> {}

/// An owning iterator over the entries of a [`LongMap`].
pub struct IntoIter<V> {
    slots: vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (i64, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in &mut self.slots {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}

/// A draining iterator over the entries of a [`LongMap`].
///
/// The map is already empty while this iterator exists; entries not consumed
/// are dropped with it.
pub struct Drain<'a, V> {
    inner: IntoIter<V>,
    _marker: PhantomData<&'a mut LongMap<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = (i64, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}
impl<V> FusedIterator for Drain<'_, V> {}
