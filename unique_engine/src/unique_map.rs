//! Indexes over parsed uniques.
//!
//! Neither map owns its uniques: both borrow from whatever store the uniques were
//! built into (usually the `Vec<Unique>` produced by the content loader), so the
//! same unique can sit in several indexes at once. Buckets are created on first
//! insert and keep insertion order, and buckets themselves are ordered by creation.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::Copied;
use std::slice::Iter;

use crate::unique::Unique;
use crate::unique_type::UniqueType;

/// Lazily produced sequence over one bucket. Clone it, or call the getter again, for another pass.
pub type UniqueIter<'m, 'a> = Copied<Iter<'m, &'a Unique>>;

#[derive(Debug, Clone)]
struct OrderedBuckets<'a, K> {
    index: HashMap<K, usize>,
    buckets: Vec<Vec<&'a Unique>>,
}

impl<K> Default for OrderedBuckets<'_, K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            buckets: Vec::new(),
        }
    }
}

impl<'a, K: Eq + Hash> OrderedBuckets<'a, K> {
    fn push(&mut self, key: K, unique: &'a Unique) {
        let next = self.buckets.len();
        let slot = *self.index.entry(key).or_insert(next);
        if slot == next {
            self.buckets.push(Vec::new());
        }
        self.buckets[slot].push(unique);
    }

    fn get<Q>(&self, key: &Q) -> UniqueIter<'_, 'a>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let bucket: &[&'a Unique] = match self.index.get(key) {
            Some(slot) => &self.buckets[*slot],
            None => &[],
        };
        bucket.iter().copied()
    }

    fn all(&self) -> impl Iterator<Item = &'a Unique> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.iter().copied())
    }

    fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Uniques grouped by placeholder pattern; holds recognized and unrecognized uniques alike.
#[derive(Debug, Clone, Default)]
pub struct UniqueMap<'a> {
    buckets: OrderedBuckets<'a, String>,
}

impl<'a> UniqueMap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unique(&mut self, unique: &'a Unique) {
        self.buckets.push(unique.placeholder_text().to_string(), unique);
    }

    /// Uniques whose placeholder pattern is exactly `placeholder_text`, in insertion order.
    pub fn get_uniques(&self, placeholder_text: &str) -> UniqueIter<'_, 'a> {
        self.buckets.get(placeholder_text)
    }

    /// Uniques whose pattern is the canonical pattern of `unique_type`.
    pub fn get_uniques_of_type(&self, unique_type: UniqueType) -> UniqueIter<'_, 'a> {
        self.buckets.get(unique_type.placeholder_text().as_str())
    }

    pub fn get_all_uniques(&self) -> impl Iterator<Item = &'a Unique> + '_ {
        self.buckets.all()
    }

    /// Number of distinct placeholder patterns indexed.
    pub fn pattern_count(&self) -> usize {
        self.buckets.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.buckets.is_empty()
    }
}

impl<'a> Extend<&'a Unique> for UniqueMap<'a> {
    fn extend<T: IntoIterator<Item = &'a Unique>>(&mut self, iter: T) {
        for unique in iter {
            self.add_unique(unique);
        }
    }
}

impl<'a> FromIterator<&'a Unique> for UniqueMap<'a> {
    fn from_iter<T: IntoIterator<Item = &'a Unique>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Uniques grouped by matched type. Unrecognized uniques are not indexed.
#[derive(Debug, Clone, Default)]
pub struct UniqueMapTyped<'a> {
    buckets: OrderedBuckets<'a, UniqueType>,
}

impl<'a> UniqueMapTyped<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `unique` under its type; a unique with no type is skipped.
    pub fn add_unique(&mut self, unique: &'a Unique) {
        if let Some(unique_type) = unique.unique_type() {
            self.buckets.push(unique_type, unique);
        }
    }

    pub fn get_uniques(&self, unique_type: UniqueType) -> UniqueIter<'_, 'a> {
        self.buckets.get(&unique_type)
    }

    pub fn get_all_uniques(&self) -> impl Iterator<Item = &'a Unique> + '_ {
        self.buckets.all()
    }

    /// Indexed types with how many uniques each holds, in first-seen order.
    pub fn type_counts(&self) -> Vec<(UniqueType, usize)> {
        self.buckets
            .all()
            .filter_map(Unique::unique_type)
            .fold(Vec::new(), |mut counts: Vec<(UniqueType, usize)>, unique_type| {
                match counts.iter_mut().find(|(t, _)| *t == unique_type) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((unique_type, 1)),
                }
                counts
            })
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.buckets.is_empty()
    }
}

impl<'a> Extend<&'a Unique> for UniqueMapTyped<'a> {
    fn extend<T: IntoIterator<Item = &'a Unique>>(&mut self, iter: T) {
        for unique in iter {
            self.add_unique(unique);
        }
    }
}

impl<'a> FromIterator<&'a Unique> for UniqueMapTyped<'a> {
    fn from_iter<T: IntoIterator<Item = &'a Unique>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_keep_insertion_order() {
        let a = Unique::new("[+1 Gold]");
        let b = Unique::new("[+2 Food]");
        let c = Unique::new("[+3 Culture] <when at war>");
        let mut map = UniqueMap::new();
        map.add_unique(&a);
        map.add_unique(&b);
        map.add_unique(&c);

        let found: Vec<&Unique> = map.get_uniques("[]").collect();
        assert_eq!(found.len(), 3);
        assert!(std::ptr::eq(found[0], &a));
        assert!(std::ptr::eq(found[1], &b));
        assert!(std::ptr::eq(found[2], &c));
    }

    #[test]
    fn missing_key_is_empty_and_reads_are_repeatable() {
        let a = Unique::new("[+1 Gold]");
        let map: UniqueMap = [&a].into_iter().collect();
        assert_eq!(map.get_uniques("nope").count(), 0);
        let first = map.get_uniques("[]");
        assert_eq!(first.clone().count(), 1);
        assert_eq!(first.count(), 1);
        assert_eq!(map.get_uniques("[]").count(), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn all_uniques_flatten_bucket_then_element_order() {
        let uniques = [
            Unique::new("[+1 Gold]"),
            Unique::new("[+10]% Strength"),
            Unique::new("Some untyped text"),
            Unique::new("[+2 Food]"),
        ];
        let map: UniqueMap = uniques.iter().collect();
        let texts: Vec<&str> = map.get_all_uniques().map(Unique::text).collect();
        assert_eq!(texts, ["[+1 Gold]", "[+2 Food]", "[+10]% Strength", "Some untyped text"]);
        assert_eq!(map.get_uniques_of_type(UniqueType::Strength).count(), 1);
    }

    #[test]
    fn typed_map_skips_unrecognized() {
        let uniques = [
            Unique::new("[+1 Gold]"),
            Unique::new("Some untyped text"),
            Unique::new("[+2 Food] [in this city]"),
            Unique::new("[+1 Science]"),
        ];
        let map: UniqueMapTyped = uniques.iter().collect();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get_uniques(UniqueType::Stats).count(), 2);
        assert_eq!(map.get_uniques(UniqueType::StatsPerCity).count(), 1);
        assert_eq!(map.get_uniques(UniqueType::Strength).count(), 0);
        assert_eq!(
            map.type_counts(),
            vec![(UniqueType::Stats, 2), (UniqueType::StatsPerCity, 1)]
        );
    }
}
