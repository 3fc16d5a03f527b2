//! Division behaviour: eager stubs, the one-shot detail fetch, house-specific
//! tally decoding, vote-bucket classification, and ordering.

mod common;

use common::{
    commons_detail, commons_vote, division_listing, lords_detail, lords_vote, mock_parliament,
};
use ukparliament::{DivisionQuery, Error};

#[test]
fn listing_builds_eager_stubs_with_a_single_request() {
    let (parliament, lda, _members) = mock_parliament();
    let commons = parliament.commons();

    lda.queue_response(division_listing(&[(
        "Finance Bill: Third Reading",
        "CD:2021-01-02:100",
        "2021-01-02",
        709_842,
    )]));

    let divisions = commons
        .recent_divisions(&DivisionQuery::default())
        .expect("listing");
    assert_eq!(lda.call_count(), 1);

    let division = &divisions[0];
    assert_eq!(division.title(), "Finance Bill: Third Reading");
    assert_eq!(division.uin(), "CD:2021-01-02:100");
    assert_eq!(division.date().to_string(), "2021-01-02");
    assert_eq!(division.resource_id().expect("id"), 709_842);
    assert_eq!(
        division.to_string(),
        "Commons division: \"Finance Bill: Third Reading\" on 2021-01-02"
    );

    // Eager fields never cost a second request.
    assert_eq!(lda.call_count(), 1);
}

#[test]
fn commons_detail_is_fetched_once_and_decoded() {
    let (parliament, lda, _members) = mock_parliament();
    let commons = parliament.commons();

    lda.queue_response(division_listing(&[(
        "Finance Bill",
        "CD:100",
        "2021-01-02",
        709_842,
    )]));
    lda.queue_response(commons_detail(
        310,
        300,
        vec![
            commons_vote("AyeVote", 172, "Ms Diane Abbott", "Labour"),
            commons_vote("NoVote", 1503, "Mr John Biffen", "Conservative"),
        ],
    ));

    let divisions = commons
        .recent_divisions(&DivisionQuery::default())
        .expect("listing");
    let division = &divisions[0];

    assert!(division.passed().expect("passed"));
    assert_eq!(lda.call_count(), 2);
    assert_eq!(
        lda.calls()[1].path,
        "commonsdivisions/id/709842.json",
        "detail fetch targets the division's own id"
    );

    // Every deferred field is now served from the cached payload.
    assert_eq!(division.ayes().expect("ayes"), 310);
    assert_eq!(division.noes().expect("noes"), 300);
    assert_eq!(division.margin().expect("margin"), 10);
    assert_eq!(division.abstain().expect("abstain"), 1);
    assert_eq!(division.did_not_vote().expect("dnv"), 5);

    let ayes = division.aye_votes().expect("aye votes");
    assert_eq!(ayes.len(), 1);
    assert_eq!(ayes[0].display_name().expect("name"), "Ms Diane Abbott");
    assert_eq!(ayes[0].party().map(|p| p.abbreviation()), Some("LAB"));

    let noes = division.no_votes().expect("no votes");
    assert_eq!(noes.len(), 1);
    assert_eq!(noes[0].id(), 1503);

    assert_eq!(lda.call_count(), 2, "no further requests after the fetch");
}

#[test]
fn lords_detail_uses_the_content_schema() {
    let (parliament, lda, _members) = mock_parliament();
    let lords = parliament.lords();

    lda.queue_response(division_listing(&[(
        "Trade Bill",
        "LD:55",
        "2021-03-04",
        812_001,
    )]));
    lda.queue_response(lords_detail(
        200,
        220,
        vec![
            lords_vote("ContentVote", 3898, "Lord Naseby", "Conservative"),
            lords_vote("NotContentVote", 4201, "Baroness Jones of Moulsecoomb", "Green Party"),
        ],
    ));

    let divisions = lords
        .recent_divisions(&DivisionQuery::default())
        .expect("listing");
    let division = &divisions[0];

    assert!(!division.passed().expect("passed"));
    assert_eq!(lda.calls()[1].path, "lordsdivisions/id/812001.json");
    assert_eq!(division.contents().expect("contents"), 200);
    assert_eq!(division.not_contents().expect("not contents"), 220);

    let contents = division.content_votes().expect("content votes");
    assert_eq!(contents[0].display_name().expect("name"), "Lord Naseby");

    let not_contents = division.not_content_votes().expect("not content votes");
    assert_eq!(
        not_contents[0].party().map(|p| p.abbreviation()),
        Some("GRN")
    );
}

#[test]
fn the_other_houses_tallies_are_missing_attributes() {
    let (parliament, lda, _members) = mock_parliament();
    let lords = parliament.lords();

    lda.queue_response(division_listing(&[(
        "Trade Bill",
        "LD:55",
        "2021-03-04",
        812_001,
    )]));
    lda.queue_response(lords_detail(200, 220, vec![]));

    let divisions = lords
        .recent_divisions(&DivisionQuery::default())
        .expect("listing");
    let division = &divisions[0];

    assert!(matches!(
        division.ayes(),
        Err(Error::MissingAttribute {
            attribute: "ayes",
            ..
        })
    ));
    // The miss is answered from the fetched payload, not another request.
    assert_eq!(lda.call_count(), 2);
}

#[test]
fn unrecognised_vote_tags_are_dropped_silently() {
    let (parliament, lda, _members) = mock_parliament();
    let commons = parliament.commons();

    lda.queue_response(division_listing(&[(
        "Finance Bill",
        "CD:100",
        "2021-01-02",
        709_842,
    )]));
    lda.queue_response(commons_detail(
        1,
        0,
        vec![
            commons_vote("AyeVote", 172, "Ms Diane Abbott", "Labour"),
            commons_vote("ProxyVote", 9999, "A Future Member", "Labour"),
        ],
    ));

    let divisions = commons
        .recent_divisions(&DivisionQuery::default())
        .expect("listing");
    let division = &divisions[0];

    let ayes = division.aye_votes().expect("aye votes");
    let noes = division.no_votes().expect("no votes");
    assert_eq!(ayes.len(), 1);
    assert!(noes.is_empty());
    assert!(ayes.iter().all(|member| member.id() != 9999));
}

#[test]
fn a_failed_detail_fetch_propagates_and_is_retryable() {
    let (parliament, lda, _members) = mock_parliament();
    let commons = parliament.commons();

    lda.queue_response(division_listing(&[(
        "Finance Bill",
        "CD:100",
        "2021-01-02",
        709_842,
    )]));
    lda.queue_result(Err(Error::Status {
        status: 502,
        url: "commonsdivisions/id/709842.json".into(),
    }));
    lda.queue_response(commons_detail(310, 300, vec![]));

    let divisions = commons
        .recent_divisions(&DivisionQuery::default())
        .expect("listing");
    let division = &divisions[0];

    assert!(matches!(
        division.passed(),
        Err(Error::Status { status: 502, .. })
    ));

    // The failure left the division unfetched; the next access retries.
    assert!(division.passed().expect("retried fetch"));
    assert_eq!(lda.call_count(), 3);
}

#[test]
fn divisions_sort_by_date_then_uin_descending() {
    let (parliament, lda, _members) = mock_parliament();
    let commons = parliament.commons();

    lda.queue_response(division_listing(&[
        ("A", "5", "2021-01-02", 1),
        ("B", "9", "2021-01-01", 2),
        ("C", "1", "2021-01-02", 3),
    ]));

    let divisions = commons
        .recent_divisions(&DivisionQuery::default())
        .expect("listing");

    let order: Vec<(String, &str)> = divisions
        .iter()
        .map(|division| (division.date().to_string(), division.uin()))
        .collect();

    assert_eq!(
        order,
        vec![
            ("2021-01-02".to_string(), "5"),
            ("2021-01-02".to_string(), "1"),
            ("2021-01-01".to_string(), "9"),
        ]
    );
}
