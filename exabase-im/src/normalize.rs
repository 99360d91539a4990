//! Row normalization
//!
//! Derives the canonical scientific name and the composite locality /
//! state-province strings from raw CSV fields. The canonical name is the
//! join key into the `taxonomy` table, so every import flow must build
//! it the same way.

/// Sentinel the source exports use for "no value"
const ABSENT: &str = "NA";

/// Build the canonical scientific name from its parts.
///
/// "genus species subspecies", dropping subspecies when empty or "NA",
/// and dropping species the same way. Always returns at least the genus.
pub fn canonical_name(genus: &str, species: &str, subspecies: &str) -> String {
    let species_absent = species.is_empty() || species == ABSENT;
    let subspecies_absent = subspecies.is_empty() || subspecies == ABSENT;

    if !subspecies_absent && !species_absent {
        format!("{} {} {}", genus, species, subspecies)
    } else if species_absent {
        genus.to_string()
    } else {
        format!("{} {}", genus, species)
    }
}

/// Join two free-text locality fields with a single space.
///
/// Empty string and a lone-space string both count as absent; the result
/// is whichever side is present, or both joined.
pub fn compose_locality(first: &str, second: &str) -> String {
    compose_pair(first, second)
}

/// Join state and province into the composite stateProvince field.
pub fn compose_state_province(state: &str, province: &str) -> String {
    compose_pair(state, province)
}

fn compose_pair(first: &str, second: &str) -> String {
    let first_absent = first.is_empty() || first == " ";
    let second_absent = second.is_empty() || second == " ";

    if second_absent {
        first.to_string()
    } else if first_absent {
        second.to_string()
    } else {
        format!("{} {}", first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_trinomial() {
        assert_eq!(
            canonical_name("Vulpes", "vulpes", "crucigera"),
            "Vulpes vulpes crucigera"
        );
    }

    #[test]
    fn binomial_when_subspecies_absent() {
        assert_eq!(canonical_name("Vulpes", "vulpes", ""), "Vulpes vulpes");
        assert_eq!(canonical_name("Vulpes", "vulpes", "NA"), "Vulpes vulpes");
    }

    #[test]
    fn genus_only_when_species_absent() {
        assert_eq!(canonical_name("Vulpes", "", ""), "Vulpes");
        assert_eq!(canonical_name("Vulpes", "NA", ""), "Vulpes");
        // Subspecies without a species epithet is still genus only
        assert_eq!(canonical_name("Vulpes", "NA", "crucigera"), "Vulpes");
    }

    #[test]
    fn compose_treats_space_as_absent() {
        assert_eq!(compose_locality("A", ""), "A");
        assert_eq!(compose_locality("A", " "), "A");
        assert_eq!(compose_locality("", "B"), "B");
        assert_eq!(compose_locality(" ", "B"), "B");
        assert_eq!(compose_locality("A", "B"), "A B");
    }

    #[test]
    fn compose_state_province_matches_locality_rules() {
        assert_eq!(compose_state_province("Piemonte", ""), "Piemonte");
        assert_eq!(compose_state_province("Piemonte", "Cuneo"), "Piemonte Cuneo");
        assert_eq!(compose_state_province(" ", "Cuneo"), "Cuneo");
    }
}
