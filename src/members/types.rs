//! Data types for members-query API responses.

use chrono::NaiveDate;
use serde::Deserialize;

/// The `<Members>` document returned by every members-query request.
#[derive(Debug, Clone, Deserialize)]
pub struct MembersDocument {
    #[serde(rename = "Member", default)]
    pub members: Vec<MemberRecord>,
}

/// One `<Member>` element.
///
/// The service serializes absent values either by omitting the element or by
/// shipping it empty, so every text field is optional and empty strings are
/// treated as absent when merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberRecord {
    /// Numeric member identifier, unique within a house.
    #[serde(rename = "@Member_Id")]
    pub member_id: u32,

    /// Display name, e.g. "Ms Diane Abbott".
    #[serde(rename = "DisplayAs")]
    pub display_as: Option<String>,

    /// Full styled name, e.g. "Rt Hon Diane Abbott MP".
    #[serde(rename = "FullTitle")]
    pub full_title: Option<String>,

    /// Party name as the service spells it.
    #[serde(rename = "Party")]
    pub party: Option<String>,

    #[serde(rename = "Gender")]
    pub gender: Option<String>,

    #[serde(rename = "DateOfBirth")]
    pub date_of_birth: Option<String>,

    /// Date the member first sat in the house.
    #[serde(rename = "HouseStartDate")]
    pub house_start_date: Option<String>,

    /// Date the member left the house, if they have.
    #[serde(rename = "HouseEndDate")]
    pub house_end_date: Option<String>,

    /// Constituency for MPs; member type (e.g. "Life peer") for Lords.
    #[serde(rename = "MemberFrom")]
    pub member_from: Option<String>,
}

/// Parse the service's date serialization (`2021-01-02T00:00:00` or a bare
/// date) down to the calendar date.
pub(crate) fn parse_member_date(text: &str) -> Option<NaiveDate> {
    let date_part = text.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_roster_document() {
        let xml = r#"
            <Members>
                <Member Member_Id="172">
                    <DisplayAs>Ms Diane Abbott</DisplayAs>
                    <FullTitle>Rt Hon Diane Abbott MP</FullTitle>
                    <Party>Labour</Party>
                    <Gender>F</Gender>
                    <DateOfBirth>1953-09-27T00:00:00</DateOfBirth>
                    <HouseStartDate>1987-06-11T00:00:00</HouseStartDate>
                    <HouseEndDate/>
                    <MemberFrom>Hackney North and Stoke Newington</MemberFrom>
                </Member>
                <Member Member_Id="1503">
                    <DisplayAs>Mr John Biffen</DisplayAs>
                </Member>
            </Members>
        "#;

        let document: MembersDocument = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(document.members.len(), 2);

        let abbott = &document.members[0];
        assert_eq!(abbott.member_id, 172);
        assert_eq!(abbott.display_as.as_deref(), Some("Ms Diane Abbott"));
        assert_eq!(abbott.party.as_deref(), Some("Labour"));
        assert_eq!(
            abbott.member_from.as_deref(),
            Some("Hackney North and Stoke Newington")
        );

        assert_eq!(document.members[1].member_id, 1503);
        assert!(document.members[1].party.is_none());
    }

    #[test]
    fn decodes_an_empty_document() {
        let document: MembersDocument = quick_xml::de::from_str("<Members/>").unwrap();
        assert!(document.members.is_empty());
    }

    #[test]
    fn member_date_parsing() {
        let cases = [
            ("1953-09-27T00:00:00", Some((1953, 9, 27))),
            ("2021-01-02", Some((2021, 1, 2))),
            (" 2021-01-02 ", Some((2021, 1, 2))),
            ("27/09/1953", None),
            ("", None),
        ];
        for (input, expected) in cases {
            let expected = expected.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
            assert_eq!(parse_member_date(input), expected, "input {input:?}");
        }
    }
}
