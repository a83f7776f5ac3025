use crate::fields::{Field, SortKey, sort_key};
use crate::types::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Marker shown next to the active column header.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Ascending => "\u{25b2}",
            Self::Descending => "\u{25bc}",
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: Field,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }
}

/// Sort state after a header is selected: the active ascending column flips
/// to descending, anything else starts ascending.
pub fn toggle(current: Option<&SortState>, field: &Field) -> SortState {
    match current {
        Some(s) if s.field == *field && s.direction == SortDirection::Ascending => SortState {
            field: field.clone(),
            direction: SortDirection::Descending,
        },
        _ => SortState::ascending(field.clone()),
    }
}

/// Stable sort of `indices` (into `issues`) by the field's sort key.
///
/// Keys are computed once per issue. Equal keys keep their input order in
/// both directions.
pub fn sort_indices(issues: &[Issue], indices: &mut Vec<usize>, sort: &SortState) {
    let mut keyed: Vec<(SortKey, usize)> = indices
        .iter()
        .map(|&i| (sort_key(&issues[i], &sort.field), i))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    *indices = keyed.into_iter().map(|(_, i)| i).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(key: &str, status: &str) -> Issue {
        serde_json::from_value(json!({ "key": key, "fields": { "status": { "name": status } } }))
            .unwrap()
    }

    fn keys(issues: &[Issue], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| issues[i].key.clone()).collect()
    }

    #[test]
    fn toggle_flips_same_field() {
        let first = toggle(None, &Field::Status);
        assert_eq!(first.direction, SortDirection::Ascending);
        let second = toggle(Some(&first), &Field::Status);
        assert_eq!(second.direction, SortDirection::Descending);
        let third = toggle(Some(&second), &Field::Status);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    #[test]
    fn toggle_resets_on_new_field() {
        let desc = SortState {
            field: Field::Status,
            direction: SortDirection::Descending,
        };
        assert_eq!(toggle(Some(&desc), &Field::Key), SortState::ascending(Field::Key));
    }

    #[test]
    fn ascending_then_descending() {
        let issues = vec![issue("A-1", "To Do"), issue("A-2", "Done")];
        let mut idx = vec![0, 1];
        sort_indices(&issues, &mut idx, &SortState::ascending(Field::Status));
        assert_eq!(keys(&issues, &idx), vec!["A-2", "A-1"]);

        let desc = SortState {
            field: Field::Status,
            direction: SortDirection::Descending,
        };
        sort_indices(&issues, &mut idx, &desc);
        assert_eq!(keys(&issues, &idx), vec!["A-1", "A-2"]);
    }

    #[test]
    fn equal_keys_keep_input_order_both_ways() {
        let issues = vec![
            issue("A-1", "Open"),
            issue("A-2", "Done"),
            issue("A-3", "Open"),
            issue("A-4", "Done"),
        ];
        let mut asc = vec![0, 1, 2, 3];
        sort_indices(&issues, &mut asc, &SortState::ascending(Field::Status));
        assert_eq!(keys(&issues, &asc), vec!["A-2", "A-4", "A-1", "A-3"]);

        let mut desc = vec![0, 1, 2, 3];
        sort_indices(
            &issues,
            &mut desc,
            &SortState {
                field: Field::Status,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(keys(&issues, &desc), vec!["A-1", "A-3", "A-2", "A-4"]);
    }

    #[test]
    fn sorts_only_the_given_subset() {
        let issues = vec![issue("A-1", "b"), issue("A-2", "a"), issue("A-3", "c")];
        let mut idx = vec![2, 0];
        sort_indices(&issues, &mut idx, &SortState::ascending(Field::Status));
        assert_eq!(idx, vec![0, 2]);
    }
}
