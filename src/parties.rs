//! Static catalogue of parliamentary parties.
//!
//! The catalogue is fixed at compile time. Lookup is tolerant of the naming
//! noise the upstream APIs produce ("Conservative" vs "Conservative Party",
//! stray whitespace, case differences), and unknown names resolve to `None`
//! rather than an error so that pseudo-affiliations such as "Crossbench" or
//! "Bishops" do not break vote-list retrieval.

use std::fmt;

/// An immutable party record: canonical name, alternate names seen upstream,
/// and the conventional abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Party {
    name: &'static str,
    alternate_names: &'static [&'static str],
    abbreviation: &'static str,
}

impl Party {
    /// Canonical name, e.g. `"Conservative Party"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Alternate names this party appears under in upstream data.
    #[must_use]
    pub const fn alternate_names(&self) -> &'static [&'static str] {
        self.alternate_names
    }

    /// Conventional abbreviation, e.g. `"CON"`.
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        self.abbreviation
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// The Co-operative Party is folded into Labour as they vote together.
const PARTIES: [Party; 11] = [
    Party {
        name: "Conservative Party",
        alternate_names: &["Conservative and Unionist Party"],
        abbreviation: "CON",
    },
    Party {
        name: "Democratic Unionist Party",
        alternate_names: &[],
        abbreviation: "DUP",
    },
    Party {
        name: "Green Party",
        alternate_names: &[],
        abbreviation: "GRN",
    },
    Party {
        name: "Labour Party",
        alternate_names: &["Labour (Co-op)"],
        abbreviation: "LAB",
    },
    Party {
        name: "Liberal Democrats",
        alternate_names: &[],
        abbreviation: "LIB",
    },
    Party {
        name: "Plaid Cymru",
        alternate_names: &[],
        abbreviation: "PC",
    },
    Party {
        name: "Scottish National Party",
        alternate_names: &[],
        abbreviation: "SNP",
    },
    Party {
        name: "Sinn Féin",
        alternate_names: &[],
        abbreviation: "SF",
    },
    Party {
        name: "Social Democratic and Labour Party",
        alternate_names: &[],
        abbreviation: "SDLP",
    },
    Party {
        name: "Ulster Unionist Party",
        alternate_names: &[],
        abbreviation: "UUP",
    },
    Party {
        name: "Independent",
        alternate_names: &[],
        abbreviation: "IND",
    },
];

/// Lookup over the static party catalogue.
#[derive(Debug, Clone, Copy)]
pub struct PartyRegistry {
    catalogue: &'static [Party],
}

impl PartyRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            catalogue: &PARTIES,
        }
    }

    /// Find the party a (possibly noisy) upstream name refers to.
    ///
    /// Both the query and each candidate name are normalized before
    /// comparison; the first match in declaration order wins. Unknown names
    /// return `None`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Party> {
        let wanted = normalise_party_name(name);
        self.catalogue.iter().copied().find(|party| {
            normalise_party_name(party.name) == wanted
                || party
                    .alternate_names
                    .iter()
                    .any(|alt| normalise_party_name(alt) == wanted)
        })
    }

    /// All known parties, in declaration order.
    #[must_use]
    pub const fn all(&self) -> &'static [Party] {
        self.catalogue
    }
}

impl Default for PartyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim, lowercase, and drop a trailing "party" token.
fn normalise_party_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    lowered
        .strip_suffix(" party")
        .map_or(lowered.as_str(), str::trim_end)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_whitespace_and_suffix_insensitive() {
        let registry = PartyRegistry::new();
        for query in ["conservative party", "Conservative", " CONSERVATIVE PARTY "] {
            let party = registry.lookup(query);
            assert_eq!(
                party.map(|p| p.abbreviation()),
                Some("CON"),
                "query {query:?}"
            );
        }
    }

    #[test]
    fn lookup_matches_alternate_names() {
        let registry = PartyRegistry::new();
        let labour = registry.lookup("Labour (Co-op)");
        assert_eq!(labour.map(|p| p.name()), Some("Labour Party"));

        let tories = registry.lookup("Conservative and Unionist Party");
        assert_eq!(tories.map(|p| p.abbreviation()), Some("CON"));
    }

    #[test]
    fn unknown_name_is_absent_not_an_error() {
        let registry = PartyRegistry::new();
        assert!(registry.lookup("Crossbench").is_none());
        assert!(registry.lookup("Bishops").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn all_preserves_declaration_order() {
        let registry = PartyRegistry::new();
        let all = registry.all();
        assert_eq!(all.len(), 11);
        assert_eq!(all[0].abbreviation(), "CON");
        assert_eq!(all[10].abbreviation(), "IND");
    }

    #[test]
    fn normalisation_cases() {
        let cases = [
            ("Labour Party", "labour"),
            ("  labour  ", "labour"),
            ("Plaid Cymru", "plaid cymru"),
            ("GREEN PARTY", "green"),
            ("Sinn Féin", "sinn féin"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalise_party_name(input), expected, "input {input:?}");
        }
    }
}
