use core_types::StockEntry;
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::trace;

/// Symbol-keyed storage for stock entries.
///
/// The number of buckets is set once by `new` and never changes. Each bucket is a
/// chain of entries, and a symbol appears in at most one chain position across the
/// whole table.
#[derive(Debug, Clone)]
pub struct StockTable {
    buckets: Vec<Vec<StockEntry>>,
    len: usize,
}

impl StockTable {
    /// Creates an empty table with `capacity` buckets (at least one).
    pub fn new(capacity: usize) -> Self {
        let bucket_count = capacity.max(1);
        Self {
            buckets: (0..bucket_count).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    /// Inserts `entry`, replacing any existing entry with the same symbol.
    ///
    /// Returns the replaced entry, if there was one.
    pub fn insert_or_update(&mut self, entry: StockEntry) -> Option<StockEntry> {
        let index = self.bucket_index(entry.symbol());
        let chain = &mut self.buckets[index];

        if let Some(existing) = chain.iter_mut().find(|e| e.symbol() == entry.symbol()) {
            trace!(symbol = entry.symbol(), "Overwriting stock entry");
            return Some(std::mem::replace(existing, entry));
        }

        chain.push(entry);
        self.len += 1;
        None
    }

    pub fn lookup(&self, symbol: &str) -> Option<&StockEntry> {
        self.buckets[self.bucket_index(symbol)]
            .iter()
            .find(|e| e.symbol() == symbol)
    }

    /// Mutable access to an entry. The symbol itself stays read-only, which keeps the
    /// entry in the bucket its key hashes to.
    pub fn lookup_mut(&mut self, symbol: &str) -> Option<&mut StockEntry> {
        let index = self.bucket_index(symbol);
        self.buckets[index].iter_mut().find(|e| e.symbol() == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Calls `visitor` once per entry, in bucket order.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&StockEntry),
    {
        for entry in self.iter() {
            visitor(entry);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockEntry> {
        self.buckets.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    // DefaultHasher::new() uses fixed keys, so a symbol lands in the same bucket on every run.
    fn bucket_index(&self, symbol: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        symbol.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }
}

impl Default for StockTable {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl Extend<StockEntry> for StockTable {
    fn extend<I: IntoIterator<Item = StockEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert_or_update(entry);
        }
    }
}
