use crate::search::eval::Score;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    pub depth: u32,
    pub score: Score,
    pub best: Option<usize>,
    pub bound: Bound,
    pub gen: u32,
}

const DEFAULT_WAYS: usize = 4;
pub const DEFAULT_CAPACITY: usize = 1 << 20;

#[derive(Default, Clone, Copy)]
struct Bucket {
    slots: [Option<Entry>; DEFAULT_WAYS],
}

/// Bucketed transposition table keyed by board signature.
///
/// Not thread-safe: one table belongs to one engine and one search at a time.
#[derive(Default)]
pub struct Tt {
    buckets: Vec<Bucket>,
    gen: u32,
}

impl Tt {
    pub fn new() -> Self { Self { buckets: Vec::new(), gen: 0 } }

    pub fn with_capacity(entries: usize) -> Self {
        let mut t = Self::new();
        t.set_capacity_entries(entries);
        t
    }

    pub fn clear(&mut self) {
        for b in &mut self.buckets { *b = Bucket::default(); }
        self.gen = 0;
    }

    fn bucket_index(&self, key: u64) -> usize {
        let mixed = key ^ (key >> 32);
        (mixed as usize) % self.buckets.len().max(1)
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        if self.buckets.is_empty() { return None; }
        let b = &self.buckets[self.bucket_index(key)];
        b.slots.iter().flatten().find(|e| e.key == key).copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.iter().filter(|s| s.is_some()).count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        let entries = cap.max(DEFAULT_WAYS);
        let buckets = (entries + DEFAULT_WAYS - 1) / DEFAULT_WAYS;
        self.buckets.clear();
        self.buckets.resize_with(buckets, Bucket::default);
    }

    pub fn set_capacity_mb(&mut self, mb: usize) {
        let entries = (mb.saturating_mul(1024 * 1024) / std::mem::size_of::<Option<Entry>>()).max(DEFAULT_WAYS);
        self.set_capacity_entries(entries);
    }

    pub fn put(&mut self, e: Entry) {
        if self.buckets.is_empty() { return; }
        let idx = self.bucket_index(e.key);
        let e = Entry { gen: self.gen, ..e };
        let bucket = &mut self.buckets[idx];
        // Same key: replace only when at least as deep
        for slot in &mut bucket.slots {
            if let Some(cur) = *slot {
                if cur.key == e.key {
                    if e.depth >= cur.depth { *slot = Some(e); }
                    return;
                }
            }
        }
        if let Some(slot) = bucket.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(e);
            return;
        }
        // Evict lowest depth, then oldest generation
        let victim = bucket
            .slots
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| s.map_or((0, 0), |cur| (cur.depth, cur.gen)))
            .map_or(0, |(i, _)| i);
        bucket.slots[victim] = Some(e);
    }

    pub fn bump_generation(&mut self) { self.gen = self.gen.wrapping_add(1); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u64, depth: u32, score: Score) -> Entry {
        Entry { key, depth, score, best: None, bound: Bound::Exact, gen: 0 }
    }

    #[test]
    fn same_key_keeps_deeper_entry() {
        let mut tt = Tt::with_capacity(16);
        tt.put(entry(7, 5, 10));
        tt.put(entry(7, 2, -3));
        let e = tt.get(7).unwrap();
        assert_eq!((e.depth, e.score), (5, 10));
        tt.put(entry(7, 5, 4));
        assert_eq!(tt.get(7).unwrap().score, 4);
    }

    #[test]
    fn empty_table_misses() {
        let mut tt = Tt::new();
        tt.put(entry(1, 1, 1));
        assert!(tt.get(1).is_none());
        assert!(tt.is_empty());
    }
}
