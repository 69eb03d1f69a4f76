#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of live entities. Clamped to the id width of the
    /// endpoint encoding (15 bits).
    pub max_entities: usize,
    /// Maximum number of simultaneously overlapping pairs.
    pub max_overlaps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_entities: 10_000,
            max_overlaps: 100_000,
        }
    }
}
