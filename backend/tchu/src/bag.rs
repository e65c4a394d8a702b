use std::collections::BTreeMap;
use std::iter::{repeat, FromIterator};

/// An immutable multiset, iterated in the canonical order of its elements.
///
/// Two bags are equal iff they hold the same elements with the same multiplicities,
/// no matter in which order they were built.
///
/// # Example
/// ```
/// use tchu::bag::Bag;
/// use tchu::card::Card;
///
/// let bag: Bag<Card> = vec![Card::Locomotive, Card::Blue, Card::Locomotive].into_iter().collect();
///
/// assert_eq!(bag.size(), 3);
/// assert_eq!(bag.count_of(&Card::Locomotive), 2);
/// assert_eq!(bag.to_list(), vec![Card::Blue, Card::Locomotive, Card::Locomotive]);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Bag<T> {
    /// Never holds a zero count.
    counts: BTreeMap<T, usize>,
}

impl<T: Ord> Default for Bag<T> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<T: Ord + Clone> Bag<T> {
    /// The empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bag holding `count` copies of `element`.
    pub fn of(count: usize, element: T) -> Self {
        let mut builder = BagBuilder::new();
        builder.add_count(count, element);
        builder.build()
    }

    pub fn builder() -> BagBuilder<T> {
        BagBuilder::new()
    }

    /// Total number of elements, counting multiplicities.
    pub fn size(&self) -> usize {
        self.counts.values().sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// How many copies of `element` this bag holds.
    pub fn count_of(&self, element: &T) -> usize {
        self.counts.get(element).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains_element(&self, element: &T) -> bool {
        self.counts.contains_key(element)
    }

    /// Whether `other` is a sub-multiset of this bag.
    pub fn contains(&self, other: &Bag<T>) -> bool {
        other
            .counts
            .iter()
            .all(|(element, count)| self.count_of(element) >= *count)
    }

    /// The multiset sum of both bags.
    pub fn union(&self, other: &Bag<T>) -> Bag<T> {
        let mut builder = BagBuilder::from(self);
        builder.add_all(other);
        builder.build()
    }

    /// This bag with the elements of `other` removed, as many times as they appear in `other`.
    ///
    /// Elements of `other` missing from this bag are ignored.
    pub fn difference(&self, other: &Bag<T>) -> Bag<T> {
        let counts = self
            .counts
            .iter()
            .filter_map(|(element, count)| {
                let remaining = count.saturating_sub(other.count_of(element));
                (remaining > 0).then(|| (element.clone(), remaining))
            })
            .collect();

        Self { counts }
    }

    /// Iterates over every element, repeated as many times as it is held, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.counts
            .iter()
            .flat_map(|(element, count)| repeat(element).take(*count))
    }

    /// Iterates over the distinct elements, in canonical order.
    pub fn distinct(&self) -> impl Iterator<Item = &T> + '_ {
        self.counts.keys()
    }

    /// The element at `index` in the canonical order, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// A fresh list of all elements, in canonical order.
    pub fn to_list(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// All distinct sub-bags holding exactly `size` elements.
    ///
    /// Sub-bags are listed by decreasing multiplicity of the smallest elements, so that
    /// the sub-bag made of the largest elements comes last.
    pub fn subsets_of_size(&self, size: usize) -> Vec<Bag<T>> {
        let distinct: Vec<(&T, usize)> = self
            .counts
            .iter()
            .map(|(element, count)| (element, *count))
            .collect();
        let mut subsets = Vec::new();
        let mut current = BagBuilder::new();

        Self::collect_subsets(&distinct, size, &mut current, &mut subsets);
        subsets
    }

    fn collect_subsets(
        distinct: &[(&T, usize)],
        remaining: usize,
        current: &mut BagBuilder<T>,
        subsets: &mut Vec<Bag<T>>,
    ) {
        if remaining == 0 {
            subsets.push(current.build());
            return;
        }

        let Some(((element, count), rest)) = distinct.split_first() else {
            return;
        };

        for taken in (0..=remaining.min(*count)).rev() {
            let mut next = current.clone();
            next.add_count(taken, (*element).clone());
            Self::collect_subsets(rest, remaining - taken, &mut next, subsets);
        }
    }
}

impl<T: Ord + Clone> FromIterator<T> for Bag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = BagBuilder::new();
        for element in iter {
            builder.add(element);
        }
        builder.build()
    }
}

impl<T: Ord + Clone> From<Vec<T>> for Bag<T> {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

/// Incremental construction of a [`Bag`].
#[derive(Clone, Debug)]
pub struct BagBuilder<T> {
    counts: BTreeMap<T, usize>,
}

impl<T: Ord + Clone> BagBuilder<T> {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, element: T) -> &mut Self {
        self.add_count(1, element)
    }

    pub fn add_count(&mut self, count: usize, element: T) -> &mut Self {
        if count > 0 {
            *self.counts.entry(element).or_insert(0) += count;
        }
        self
    }

    pub fn add_all(&mut self, bag: &Bag<T>) -> &mut Self {
        for (element, count) in &bag.counts {
            self.add_count(*count, element.clone());
        }
        self
    }

    /// Snapshots the elements added so far. The builder can keep being used afterwards.
    pub fn build(&self) -> Bag<T> {
        Bag {
            counts: self.counts.clone(),
        }
    }
}

impl<T: Ord + Clone> Default for BagBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> From<&Bag<T>> for BagBuilder<T> {
    fn from(bag: &Bag<T>) -> Self {
        Self {
            counts: bag.counts.clone(),
        }
    }
}
