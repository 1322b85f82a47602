//! Query composition over a snapshot of one relation.
//!
//! A `Query` holds the rows of one relation in primary-key order (for identity
//! relations that is insertion order) plus a chain of filter predicates.
//! Predicates run lazily every time the query is iterated, so a query can be
//! iterated again after it has been consumed.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::ops::Add;

use serde::Serialize;

type Predicate<E> = Box<dyn Fn(&E) -> bool>;

pub struct Query<E> {
    rows: Vec<E>,
    filters: Vec<Predicate<E>>,
}

/// Records sharing one grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<K, T> {
    pub key: K,
    pub items: Vec<T>,
}

impl<K, T> Group<K, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<E> Query<E> {
    pub fn from_rows(rows: Vec<E>) -> Self {
        Self {
            rows,
            filters: Vec::new(),
        }
    }

    /// Add a predicate. All predicates must hold for a row to be yielded.
    pub fn filter(mut self, predicate: impl Fn(&E) -> bool + 'static) -> Self {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Lazily yield matching rows in key order.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.rows
            .iter()
            .filter(move |row| self.filters.iter().all(|keep| keep(*row)))
    }

    pub fn first(&self) -> Option<&E> {
        self.iter().next()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn to_vec(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Inner equi-join with another query.
    ///
    /// Output follows left-side order; several right-side matches for one
    /// left row appear in right-side order.
    pub fn join<R, K, O>(
        &self,
        right: &Query<R>,
        left_key: impl Fn(&E) -> K,
        right_key: impl Fn(&R) -> K,
        project: impl Fn(&E, &R) -> O,
    ) -> Vec<O>
    where
        K: Eq + Hash,
    {
        let mut index: HashMap<K, Vec<&R>> = HashMap::new();
        for row in right.iter() {
            index.entry(right_key(row)).or_default().push(row);
        }

        self.iter()
            .flat_map(|left| {
                index
                    .get(&left_key(left))
                    .into_iter()
                    .flatten()
                    .copied()
                    .map(|right| project(left, right))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Partition matching rows by key, in ascending key order.
    pub fn group_by<K: Ord>(&self, key: impl Fn(&E) -> K) -> Vec<Group<K, &E>> {
        let mut groups: BTreeMap<K, Vec<&E>> = BTreeMap::new();
        for row in self.iter() {
            groups.entry(key(row)).or_default().push(row);
        }
        groups
            .into_iter()
            .map(|(key, items)| Group { key, items })
            .collect()
    }

    /// Fold each group into an accumulator, in ascending key order.
    pub fn aggregate<K: Ord, A>(
        &self,
        key: impl Fn(&E) -> K,
        init: impl Fn() -> A,
        fold: impl Fn(A, &E) -> A,
    ) -> Vec<(K, A)> {
        let mut acc: BTreeMap<K, A> = BTreeMap::new();
        for row in self.iter() {
            let k = key(row);
            let current = acc.remove(&k).unwrap_or_else(&init);
            acc.insert(k, fold(current, row));
        }
        acc.into_iter().collect()
    }

    pub fn group_count<K: Ord>(&self, key: impl Fn(&E) -> K) -> Vec<(K, usize)> {
        self.aggregate(key, || 0, |n, _| n + 1)
    }

    pub fn group_sum<K: Ord, V>(&self, key: impl Fn(&E) -> K, value: impl Fn(&E) -> V) -> Vec<(K, V)>
    where
        V: Add<Output = V> + Default,
    {
        self.aggregate(key, V::default, |sum, row| sum + value(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        group: i64,
        amount: Decimal,
    }

    #[fixture]
    fn rows() -> Query<Row> {
        Query::from_rows(vec![
            Row { id: 1, group: 2, amount: Decimal::from(3000) },
            Row { id: 2, group: 1, amount: Decimal::from(6000) },
            Row { id: 3, group: 2, amount: Decimal::from(9000) },
        ])
    }

    #[rstest]
    fn test_filter_keeps_order(rows: Query<Row>) {
        let query = rows.filter(|r| r.amount > Decimal::from(5000));
        let ids: Vec<_> = query.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[rstest]
    fn test_iteration_is_restartable(rows: Query<Row>) {
        let query = rows.filter(|r| r.group == 2);
        assert_eq!(query.iter().count(), 2);
        assert_eq!(query.iter().count(), 2);
        assert_eq!(query.first().map(|r| r.id), Some(1));
    }

    #[rstest]
    fn test_filters_compose(rows: Query<Row>) {
        let query = rows
            .filter(|r| r.group == 2)
            .filter(|r| r.amount > Decimal::from(5000));
        assert_eq!(query.to_vec().len(), 1);
        assert_eq!(query.count(), 1);
    }

    #[rstest]
    fn test_join_projects_both_sides(rows: Query<Row>) {
        let names = Query::from_rows(vec![(1_i64, "one"), (2_i64, "two")]);
        let joined = rows.join(&names, |r| r.group, |n| n.0, |r, n| (r.id, n.1));
        assert_eq!(joined, vec![(1, "two"), (2, "one"), (3, "two")]);
    }

    #[rstest]
    fn test_join_drops_unmatched(rows: Query<Row>) {
        let names = Query::from_rows(vec![(1_i64, "one")]);
        let joined = rows.join(&names, |r| r.group, |n| n.0, |r, _| r.id);
        assert_eq!(joined, vec![2]);
    }

    #[rstest]
    fn test_group_count_ascending_keys(rows: Query<Row>) {
        assert_eq!(rows.group_count(|r| r.group), vec![(1, 1), (2, 2)]);
    }

    #[rstest]
    fn test_group_sum(rows: Query<Row>) {
        let sums = rows.group_sum(|r| r.group, |r| r.amount);
        assert_eq!(sums, vec![(1, Decimal::from(6000)), (2, Decimal::from(12000))]);
    }

    #[rstest]
    fn test_group_by_items(rows: Query<Row>) {
        let groups = rows.group_by(|r| r.group);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].key, 2);
        assert_eq!(groups[1].items.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[rstest]
    fn test_empty_query() {
        let query: Query<Row> = Query::from_rows(Vec::new());
        assert!(query.first().is_none());
        assert!(query.group_count(|r| r.group).is_empty());
    }
}
