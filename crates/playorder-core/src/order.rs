//! Target order computation.
//!
//! Items are partitioned by exact `group_key`, groups are ordered by
//! collated key, items inside a group by collated title, and the result is
//! flattened. Both sorts are stable, so ties keep their input order and
//! running the builder on its own output changes nothing.

use indexmap::IndexMap;
use playorder_types::Item;

use crate::collate::Collation;

/// Compute the canonical order for `items`. Pure; same cardinality out as in.
/// Positions in the result are renumbered to the target sequence.
pub fn build_target_order(items: &[Item], collation: &Collation) -> Vec<Item> {
    let mut groups: IndexMap<&str, Vec<&Item>> = IndexMap::new();
    for item in items {
        groups.entry(item.group_key.as_str()).or_default().push(item);
    }

    groups.sort_by(|a, _, b, _| collation.compare(a, b));

    let mut ordered = Vec::with_capacity(items.len());
    for (_, mut members) in groups {
        members.sort_by(|a, b| collation.compare(&a.title, &b.title));
        ordered.extend(members.into_iter().cloned());
    }

    for (position, item) in ordered.iter_mut().enumerate() {
        item.position = position;
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_LOCALE;
    use crate::keys::KeyNormalizer;
    use playorder_types::{Identity, SourceItem};

    fn collation() -> Collation {
        Collation::for_locale(DEFAULT_LOCALE).unwrap()
    }

    fn items(rows: &[(&str, &str)]) -> Vec<Item> {
        let normalizer = KeyNormalizer::default();
        rows.iter()
            .enumerate()
            .map(|(i, (title, byline))| {
                let id = Identity::new(format!("id-{i}")).unwrap();
                normalizer.to_item(i, &SourceItem::new(*title, *byline, None), id)
            })
            .collect()
    }

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_groups_then_titles() {
        let input = items(&[("Zeta", "B"), ("Alpha", "A"), ("Beta", "A")]);
        let target = build_target_order(&input, &collation());
        assert_eq!(titles(&target), ["Alpha", "Beta", "Zeta"]);
        assert_eq!(target[0].primary, "A");
        assert_eq!(target[2].primary, "B");
    }

    #[test]
    fn test_positions_renumbered() {
        let input = items(&[("Zeta", "B"), ("Alpha", "A")]);
        let target = build_target_order(&input, &collation());
        assert_eq!(target[0].position, 0);
        assert_eq!(target[1].position, 1);
        assert_eq!(target[0].identity.as_str(), "id-1");
    }

    #[test]
    fn test_diacritics_do_not_change_order() {
        let forward = items(&[("Ärger", "A"), ("Apple", "A")]);
        let backward = items(&[("Apple", "A"), ("Ärger", "A")]);
        let c = collation();
        assert_eq!(titles(&build_target_order(&forward, &c)), ["Apple", "Ärger"]);
        assert_eq!(titles(&build_target_order(&backward, &c)), ["Apple", "Ärger"]);
    }

    #[test]
    fn test_group_order_is_case_insensitive() {
        let input = items(&[("x", "beatles • One"), ("y", "Abba • Gold"), ("z", "Cher • Believe")]);
        let target = build_target_order(&input, &collation());
        assert_eq!(titles(&target), ["y", "x", "z"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let input = items(&[("Same", "A"), ("same", "A"), ("SAME", "A")]);
        let target = build_target_order(&input, &collation());
        let ids: Vec<&str> = target.iter().map(|i| i.identity.as_str()).collect();
        assert_eq!(ids, ["id-0", "id-1", "id-2"]);
    }

    #[test]
    fn test_idempotent() {
        let input = items(&[
            ("Song 3", "Cher • Believe"),
            ("Intro", "Abba • Gold"),
            ("Song 1", "Cher • Believe"),
            ("Waterloo", "abba • Gold"),
            ("Ölfeld", "Björk • Post"),
            ("Army of Me", "Bjork • Post"),
        ]);
        let c = collation();
        let once = build_target_order(&input, &c);
        let twice = build_target_order(&once, &c);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_target_order(&[], &collation()).is_empty());
    }
}
