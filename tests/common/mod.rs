//! Shared wiring for integration tests: a parliament session over the mock
//! transports, with handles kept so tests can queue responses and inspect
//! traffic.

#![allow(dead_code)]

use std::rc::Rc;

use serde_json::{json, Value};
use ukparliament::lda::{mock::MockLinkedDataClient, LinkedDataClient};
use ukparliament::members::{mock::MockMembersQueryClient, MembersQueryClient};
use ukparliament::Parliament;

pub fn mock_parliament() -> (
    Parliament,
    Rc<MockLinkedDataClient>,
    Rc<MockMembersQueryClient>,
) {
    let lda = Rc::new(MockLinkedDataClient::new());
    let members = Rc::new(MockMembersQueryClient::new());
    let parliament = Parliament::with_clients(
        Rc::clone(&lda) as Rc<dyn LinkedDataClient>,
        Rc::clone(&members) as Rc<dyn MembersQueryClient>,
    );
    (parliament, lda, members)
}

/// A `…divisions.json` result envelope.
pub fn division_listing(items: &[(&str, &str, &str, u32)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(title, uin, date, resource_id)| {
            json!({
                "_about": format!("http://data.parliament.uk/resources/{resource_id}"),
                "title": title,
                "uin": uin,
                "date": [{"_value": date, "_datatype": "dateTime"}],
            })
        })
        .collect();
    json!({ "items": items })
}

/// A Commons vote record for a division detail document.
pub fn commons_vote(tag: &str, member_id: u32, printed: &str, party: &str) -> Value {
    json!({
        "type": format!("http://data.parliament.uk/schema/parl#{tag}"),
        "member": [{"_about": format!("http://data.parliament.uk/members/{member_id}")}],
        "memberPrinted": {"_value": printed},
        "memberParty": party,
    })
}

/// A Lords vote record for a division detail document.
pub fn lords_vote(tag: &str, member_id: u32, title: &str, party: &str) -> Value {
    json!({
        "type": format!("http://data.parliament.uk/schema/parl#{tag}"),
        "member": format!(
            "http://data.parliament.uk/resources/members/api/lords/id/{member_id}"
        ),
        "lordTitle": {"_value": title},
        "memberParty": party,
    })
}

/// A Commons division detail result envelope with the given headline tallies
/// and vote records.
pub fn commons_detail(ayes: u32, noes: u32, votes: Vec<Value>) -> Value {
    json!({
        "primaryTopic": {
            "AbstainCount": [{"_value": "1"}],
            "AyesCount": [{"_value": ayes.to_string()}],
            "Didnotvotecount": [{"_value": "5"}],
            "Errorvotecount": [{"_value": "0"}],
            "Margin": [{"_value": ayes.abs_diff(noes).to_string()}],
            "Noesvotecount": [{"_value": noes.to_string()}],
            "Noneligiblecount": [{"_value": "2"}],
            "Suspendedorexpelledvotescount": [{"_value": "0"}],
            "vote": votes,
        }
    })
}

/// A Lords division detail result envelope.
pub fn lords_detail(contents: u32, not_contents: u32, votes: Vec<Value>) -> Value {
    json!({
        "primaryTopic": {
            "officialContentsCount": contents,
            "officialNotContentsCount": not_contents,
            "vote": votes,
        }
    })
}
