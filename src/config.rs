use crate::Error;

/// Construction parameters for a [`LongMap`](crate::LongMap).
///
/// The defaults are a starting capacity of 16 slots, a maximum load factor of
/// 0.75 and a growth factor of 2. With these, the 13th distinct key inserted
/// into a fresh map doubles its capacity to 32.
///
/// # Examples
///
/// ```rust
/// use long_map::Config;
/// use long_map::LongMap;
///
/// let config = Config::new().initial_capacity(64).load_factor(0.5);
/// let mut map: LongMap<&str> = LongMap::with_config(config);
/// assert_eq!(map.capacity(), 64);
///
/// for key in 0..33 {
///     map.insert(key, "x");
/// }
/// assert_eq!(map.capacity(), 128);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    initial_capacity: usize,
    load_factor: f64,
    growth_factor: usize,
}

impl Config {
    /// Number of slots a new or cleared map starts with.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
    /// Fraction of slots that may be occupied before the map grows.
    pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
    /// Multiplier applied to the capacity on growth.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            load_factor: Self::DEFAULT_LOAD_FACTOR,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Sets the number of slots a new or cleared map starts with.
    ///
    /// Any value in `1..=i64::MAX` is accepted; capacities need not be powers
    /// of two since placement uses a remainder rather than a mask.
    pub const fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the maximum load factor. Must lie strictly between 0 and 1.
    pub const fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Sets the growth multiplier. Must be at least 2.
    pub const fn growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Returns the configured initial capacity.
    pub const fn get_initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the configured load factor.
    pub const fn get_load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the configured growth factor.
    pub const fn get_growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Checks that the parameters describe a table that can always place a new
    /// key and never needs to grow twice for one insert.
    ///
    /// Besides the per-field ranges, the initial table must be able to hold
    /// at least one entry (`initial_capacity * load_factor >= 1`). Growing
    /// by a factor of 2 or more from there always leaves room for the entry
    /// that triggered it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use long_map::Config;
    /// use long_map::Error;
    ///
    /// assert!(Config::new().validate().is_ok());
    /// assert!(matches!(
    ///     Config::new().load_factor(1.0).validate(),
    ///     Err(Error::InvalidConfig(_))
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), Error> {
        if self.initial_capacity == 0 {
            return Err(Error::InvalidConfig("initial capacity must be non-zero"));
        }
        if i64::try_from(self.initial_capacity).is_err() {
            return Err(Error::InvalidConfig("initial capacity must fit in an i64"));
        }
        // NaN fails both comparisons.
        if !(self.load_factor > 0.0 && self.load_factor < 1.0) {
            return Err(Error::InvalidConfig("load factor must lie in (0, 1)"));
        }
        if self.growth_factor < 2 {
            return Err(Error::InvalidConfig("growth factor must be at least 2"));
        }
        if self.max_pop(self.initial_capacity) == 0 {
            return Err(Error::InvalidConfig(
                "initial capacity times load factor must be at least 1",
            ));
        }
        Ok(())
    }

    /// Largest population a table of `capacity` slots may hold, i.e.
    /// `floor(capacity * load_factor)`.
    #[inline]
    pub(crate) fn max_pop(&self, capacity: usize) -> usize {
        (capacity as f64 * self.load_factor) as usize
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
