//! Property tests for the normalization and ordering rules.

mod common;

use common::mock_parliament;
use proptest::prelude::*;
use serde_json::json;
use ukparliament::{DivisionQuery, PartyRegistry};

proptest! {
    /// Any catalogue name survives case mangling and whitespace padding.
    #[test]
    fn party_lookup_tolerates_case_and_whitespace(
        index in 0usize..11,
        upper in any::<bool>(),
        pad_left in 0usize..3,
        pad_right in 0usize..3,
    ) {
        let registry = PartyRegistry::new();
        let party = registry.all()[index];

        let mut name = party.name().to_string();
        if upper {
            name = name.to_uppercase();
        }
        let query = format!("{}{name}{}", " ".repeat(pad_left), " ".repeat(pad_right));

        prop_assert_eq!(registry.lookup(&query), Some(party));
    }

    /// Whatever order upstream returns, listings come back date-descending
    /// then uin-descending.
    #[test]
    fn recent_divisions_are_always_recency_sorted(
        entries in proptest::collection::vec(
            ((2015i32..2023, 1u32..13, 1u32..29), "[0-9]{1,4}"),
            0..20,
        ),
    ) {
        let (parliament, lda, _members) = mock_parliament();
        let commons = parliament.commons();

        let items: Vec<serde_json::Value> = entries
            .iter()
            .enumerate()
            .map(|(index, ((year, month, day), uin))| {
                json!({
                    "_about": format!("http://data.parliament.uk/resources/{}", index + 1),
                    "title": format!("Division {index}"),
                    "uin": uin,
                    "date": [{
                        "_value": format!("{year:04}-{month:02}-{day:02}"),
                        "_datatype": "dateTime",
                    }],
                })
            })
            .collect();
        lda.queue_response(json!({ "items": items }));

        let divisions = commons
            .recent_divisions(&DivisionQuery::default())
            .expect("listing");
        prop_assert_eq!(divisions.len(), entries.len());

        for pair in divisions.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            prop_assert!(
                earlier.date() > later.date()
                    || (earlier.date() == later.date() && earlier.uin() >= later.uin()),
                "out of order: ({}, {}) before ({}, {})",
                earlier.date(),
                earlier.uin(),
                later.date(),
                later.uin(),
            );
        }
    }
}
