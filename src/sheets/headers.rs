// src/sheets/headers.rs

use indexmap::IndexSet;

use super::directives::is_reserved;

/// Compute the header row a sheet should carry after accepting a record.
///
/// Existing columns keep their positions, repeated and blank ones included,
/// and unseen keys are appended in encounter order. A non-empty `order` then
/// pulls its members (those present, once each) to the front; everything else
/// keeps its relative order. Excluded and reserved names are dropped last.
pub fn reconcile<'a, I>(
    existing: &[String],
    new_keys: I,
    order: &[String],
    exclude: &[String],
) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut headers: Vec<String> = existing.to_vec();
    for key in new_keys {
        if !headers.iter().any(|h| h == key) {
            headers.push(key.to_string());
        }
    }

    if !order.is_empty() {
        headers = apply_order(headers, order);
    }

    headers
        .into_iter()
        .filter(|h| !exclude.iter().any(|e| e == h))
        .filter(|h| !is_reserved(h))
        .collect()
}

fn apply_order(headers: Vec<String>, order: &[String]) -> Vec<String> {
    let leading: IndexSet<&str> = order
        .iter()
        .map(String::as_str)
        .filter(|name| headers.iter().any(|h| h == name))
        .collect();
    let mut arranged: Vec<String> = leading.iter().map(|name| name.to_string()).collect();
    arranged.extend(headers.into_iter().filter(|h| !leading.contains(h.as_str())));
    arranged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_keys_are_appended() {
        let headers = reconcile(&strings(&["A", "B"]), ["B", "C", "A", "D"], &[], &[]);
        assert_eq!(headers, strings(&["A", "B", "C", "D"]));
    }

    #[test]
    fn test_fresh_sheet_takes_key_order() {
        let headers = reconcile(&[], ["name", "email", "date"], &[], &[]);
        assert_eq!(headers, strings(&["name", "email", "date"]));
    }

    #[test]
    fn test_order_directive() {
        let headers = reconcile(&strings(&["A", "B", "C"]), [], &strings(&["C", "A"]), &[]);
        assert_eq!(headers, strings(&["C", "A", "B"]));
    }

    #[test]
    fn test_order_ignores_unknown_and_duplicate_names() {
        let headers = reconcile(
            &strings(&["A", "B", "C"]),
            [],
            &strings(&["Z", "B", "B", "A"]),
            &[],
        );
        assert_eq!(headers, strings(&["B", "A", "C"]));
    }

    #[test]
    fn test_exclude_directive() {
        let headers = reconcile(&strings(&["A", "B", "C"]), [], &[], &strings(&["B"]));
        assert_eq!(headers, strings(&["A", "C"]));
    }

    #[test]
    fn test_exclude_applies_after_order() {
        let headers = reconcile(
            &strings(&["A", "B", "C"]),
            ["D"],
            &strings(&["D", "B"]),
            &strings(&["B"]),
        );
        assert_eq!(headers, strings(&["D", "A", "C"]));
    }

    #[test]
    fn test_reserved_fields_never_survive() {
        let headers = reconcile(
            &strings(&["e_gs_order", "A"]),
            ["e_gs_SheetName", "e_gs_exclude", "B", "form_name"],
            &strings(&["e_gs_order"]),
            &[],
        );
        assert_eq!(headers, strings(&["A", "B", "form_name"]));
    }

    #[test]
    fn test_blank_and_repeated_columns_keep_their_positions() {
        let headers = reconcile(&strings(&["A", "", "", "D"]), ["E", "A"], &[], &[]);
        assert_eq!(headers, strings(&["A", "", "", "D", "E"]));

        let headers = reconcile(&strings(&["A", "B", "A"]), ["C"], &[], &[]);
        assert_eq!(headers, strings(&["A", "B", "A", "C"]));
    }

    #[test]
    fn test_order_collapses_repeated_columns_it_names() {
        let headers = reconcile(&strings(&["A", "B", "A", ""]), [], &strings(&["A"]), &[]);
        assert_eq!(headers, strings(&["A", "B", ""]));
    }

    #[test]
    fn test_blank_exclude_entry_drops_blank_columns() {
        let headers = reconcile(&strings(&["A", "", "C"]), [""], &[], &strings(&["A", ""]));
        assert_eq!(headers, strings(&["C"]));
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-F]".prop_map(String::from),
            Just("e_gs_order".to_string()),
            Just("e_gs_exclude".to_string()),
            Just("e_gs_SheetName".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn reconcile_has_no_duplicates_or_reserved_names(
            existing in prop::collection::vec(name_strategy(), 0..8),
            keys in prop::collection::vec(name_strategy(), 0..8),
            order in prop::collection::vec(name_strategy(), 0..4),
            exclude in prop::collection::vec(name_strategy(), 0..3),
        ) {
            // Repeats already on the sheet are kept as they are; start from a clean row.
            let existing: Vec<String> =
                existing.into_iter().collect::<IndexSet<_>>().into_iter().collect();
            let headers = reconcile(&existing, keys.iter().map(String::as_str), &order, &exclude);
            let unique: IndexSet<&String> = headers.iter().collect();
            prop_assert_eq!(unique.len(), headers.len());
            prop_assert!(headers.iter().all(|h| !is_reserved(h)));
            prop_assert!(headers.iter().all(|h| !exclude.contains(h)));
        }

        #[test]
        fn headers_only_grow_by_appending_without_order(
            submissions in prop::collection::vec(
                prop::collection::vec("[a-h]", 0..6),
                1..8,
            ),
        ) {
            let mut current: Vec<String> = Vec::new();
            for keys in &submissions {
                let next = reconcile(&current, keys.iter().map(String::as_str), &[], &[]);
                prop_assert!(next.len() >= current.len());
                prop_assert_eq!(&next[..current.len()], &current[..]);
                current = next;
            }
        }
    }
}
