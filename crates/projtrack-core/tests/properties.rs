use chrono::{TimeZone, Utc};
use projtrack_core::collection::Collection;
use projtrack_core::form::{Field, ProjectDraft, validate};
use projtrack_core::model::project::{Project, Status};
use projtrack_core::storage::{MemoryStore, Repository};
use projtrack_core::view::{search, sort_by_recency, truncate};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

fn arb_project(id: String) -> impl Strategy<Value = Project> {
    (
        "[A-Za-z ]{0,12}",
        "[A-Za-z ]{0,12}",
        arb_status(),
        0i64..2_000_000_000,
        "[a-z ]{0,20}",
        proptest::option::of("[a-z ]{0,10}"),
    )
        .prop_map(move |(name, client_name, status, secs, text, next_action)| Project {
            id: id.clone(),
            name,
            client_name,
            status,
            last_updated: Utc.timestamp_opt(secs, 0).single().unwrap_or_default(),
            description: text.clone(),
            phase: text.clone(),
            notes: text,
            next_action,
        })
}

fn arb_collection() -> impl Strategy<Value = Collection> {
    (0usize..12)
        .prop_flat_map(|n| {
            (0..n)
                .map(|i| arb_project(format!("p_{i}")))
                .collect::<Vec<_>>()
        })
        .prop_map(Collection::new)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn upsert_unknown_id_grows_by_one_at_front(c in arb_collection(), p in arb_project("p_fresh".to_string())) {
        let next = c.upsert(p.clone());
        prop_assert_eq!(next.len(), c.len() + 1);
        prop_assert_eq!(&next.as_slice()[0], &p);
    }

    #[test]
    fn upsert_known_id_keeps_size_and_position(
        c in arb_collection().prop_filter("non-empty", |c| !c.is_empty()),
        pick in any::<prop::sample::Index>(),
        name in "[A-Z]{3,8}",
    ) {
        let idx = pick.index(c.len());
        let mut replacement = c.as_slice()[idx].clone();
        replacement.name = name;
        let next = c.upsert(replacement.clone());

        prop_assert_eq!(next.len(), c.len());
        prop_assert_eq!(next.position(&replacement.id), Some(idx));
        prop_assert_eq!(&next.as_slice()[idx], &replacement);
        for (i, (a, b)) in c.iter().zip(next.iter()).enumerate() {
            if i != idx {
                prop_assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn search_results_are_matching_subset(c in arb_collection(), q in "[A-Za-z]{1,3}") {
        let out = search(&c, &q);
        let needle = q.to_lowercase();
        for p in &out {
            prop_assert!(c.get(&p.id) == Some(p));
            prop_assert!(
                p.name.to_lowercase().contains(&needle)
                    || p.client_name.to_lowercase().contains(&needle)
                    || p.status.as_str().to_lowercase().contains(&needle)
            );
        }
    }

    #[test]
    fn blank_search_is_identity(c in arb_collection(), q in "[ \t]{0,4}") {
        prop_assert_eq!(search(&c, &q), c);
    }

    #[test]
    fn sort_by_recency_is_non_increasing(c in arb_collection()) {
        let sorted = sort_by_recency(&c);
        prop_assert_eq!(sorted.len(), c.len());
        for pair in sorted.as_slice().windows(2) {
            prop_assert!(pair[0].last_updated >= pair[1].last_updated);
        }
    }

    #[test]
    fn truncate_respects_max(text in ".{0,40}", max in 0usize..30) {
        let out = truncate(&text, max);
        prop_assert!(out.chars().count() <= max);
        if text.chars().count() <= max {
            prop_assert_eq!(out, text);
        }
    }

    #[test]
    fn blanking_one_required_field_reports_only_it(pick in 0usize..5, blank in "[ \t]{0,3}") {
        let field = Field::REQUIRED[pick];
        let mut draft = ProjectDraft {
            name: "n".to_string(),
            client_name: "c".to_string(),
            status: Status::Audit,
            description: "d".to_string(),
            phase: "p".to_string(),
            notes: "x".to_string(),
            next_action: String::new(),
        };
        prop_assert!(validate(&draft).is_empty());
        match field {
            Field::Name => draft.name = blank,
            Field::ClientName => draft.client_name = blank,
            Field::Description => draft.description = blank,
            Field::Phase => draft.phase = blank,
            Field::Notes => draft.notes = blank,
        }
        let errors = validate(&draft);
        prop_assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![field]);
    }

    #[test]
    fn save_then_load_roundtrips(c in arb_collection()) {
        let repo = Repository::new(MemoryStore::new());
        repo.save(&c).expect("save");
        let loaded = repo.load(Collection::default());
        prop_assert_eq!(loaded.as_slice(), c.as_slice());
    }
}
