//! Placement rules for a single individual.
//!
//! Two independent gates: [`can_place`] decides feasibility (habitat and
//! space), [`is_comfortable`] decides welfare of everyone sharing the
//! enclosure. Both read the enclosure as it is *before* the individual joins.
//! The monkey company rule lives in both gates on purpose; they must stay
//! separate checks.

use crate::domain::{Biome, Enclosure, Species, SpeciesRecord};

/// Space charged on top of the animal's size when it joins an occupied enclosure.
pub const MIXED_OCCUPANCY_OVERHEAD: u32 = 1;

/// Space the individual needs in this enclosure right now, or `None` when
/// the amount does not fit in a `u32` (and so can never fit).
pub fn required_space(individual: &SpeciesRecord, enclosure: &Enclosure) -> Option<u32> {
    if enclosure.is_empty() {
        Some(individual.size)
    } else {
        individual.size.checked_add(MIXED_OCCUPANCY_OVERHEAD)
    }
}

/// Feasibility check. Rules short-circuit in order: biome, space,
/// hippopotamus habitat, monkey company.
pub fn can_place(individual: &SpeciesRecord, enclosure: &Enclosure) -> bool {
    if !individual.lives_in(enclosure.biome) {
        return false;
    }

    match required_space(individual, enclosure) {
        Some(needed) if needed <= enclosure.free_space() => {}
        _ => return false,
    }

    match individual.species {
        Species::Hipopotamo => enclosure.biome == Biome::SavanaERio,
        Species::Macaco => !enclosure.is_empty(),
        _ => true,
    }
}

/// Welfare check for the existing occupants plus the newcomer.
pub fn is_comfortable(individual: &SpeciesRecord, enclosure: &Enclosure) -> bool {
    let species = individual.species;

    if species.is_carnivore()
        && enclosure
            .occupants
            .keys()
            .any(|other| *other != species && other.is_carnivore())
    {
        return false;
    }

    if species == Species::Macaco && enclosure.is_empty() {
        return false;
    }

    if species == Species::Hipopotamo && enclosure.biome != Biome::SavanaERio {
        return false;
    }

    true
}
