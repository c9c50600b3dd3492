//! Group allocation as an all-or-nothing transaction.
//!
//! Each individual is checked against a trial copy of the enclosure and then
//! admitted to that copy, so later members of the group see the space and
//! company taken by earlier ones. The caller's enclosure only changes once the
//! whole group has been admitted.

use tracing::trace;

use crate::domain::rules::{can_place, is_comfortable};
use crate::domain::{AllocationGroup, Enclosure};

/// Try to place the whole group. Returns the post-placement state, or `None`
/// if any member is rejected. The input enclosure is never modified.
pub fn try_allocate(group: &AllocationGroup, enclosure: &Enclosure) -> Option<Enclosure> {
    if group.min_space() > u64::from(enclosure.free_space()) {
        trace!(
            enclosure = enclosure.id,
            needed = group.min_space(),
            free = enclosure.free_space(),
            "rejected: group larger than free space"
        );
        return None;
    }

    let mut trial = enclosure.clone();

    for (index, individual) in group.members().enumerate() {
        if !can_place(individual, &trial) {
            trace!(
                enclosure = enclosure.id,
                index,
                species = %individual.species,
                "rejected: not placeable"
            );
            return None;
        }
        if !is_comfortable(individual, &trial) {
            trace!(
                enclosure = enclosure.id,
                index,
                species = %individual.species,
                "rejected: not comfortable"
            );
            return None;
        }
        if !trial.admit(individual) {
            return None;
        }
    }

    debug_assert!(trial.occupied <= trial.total);
    Some(trial)
}

impl Enclosure {
    /// Place the group in this enclosure. On failure nothing changes.
    pub fn place_group(&mut self, group: &AllocationGroup) -> bool {
        match try_allocate(group, self) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Biome, Species, SpeciesRecord};
    use rstest::rstest;

    fn crocodile() -> SpeciesRecord {
        SpeciesRecord::new(3, Species::Crocodilo, 3, &[Biome::Rio])
    }

    fn monkey() -> SpeciesRecord {
        SpeciesRecord::new(4, Species::Macaco, 1, &[Biome::Savana, Biome::Floresta])
    }

    #[test]
    fn given_fitting_group_when_allocating_then_commits_counts_and_space() {
        let savana = Enclosure::empty(1, Biome::Savana, 10).with_occupants(Species::Macaco, 3, 1);
        let group = AllocationGroup::new(&monkey(), 2);

        let placed = try_allocate(&group, &savana).expect("group fits");

        assert_eq!(placed.occupants.get(&Species::Macaco), Some(&5));
        assert_eq!(placed.occupied, 5);
        assert_eq!(placed.free_space(), 5);
        // input untouched
        assert_eq!(savana.occupied, 3);
    }

    #[test]
    fn given_group_when_allocating_then_space_is_checked_cumulatively() {
        // 8 units: first croc needs 3, second 3+1, third 3+1 -> 11 > 8
        let river = Enclosure::empty(4, Biome::Rio, 8);

        assert!(try_allocate(&AllocationGroup::new(&crocodile(), 2), &river).is_some());
        assert!(try_allocate(&AllocationGroup::new(&crocodile(), 3), &river).is_none());
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    fn given_empty_enclosure_when_allocating_monkeys_then_rejects(#[case] quantity: u32) {
        let forest = Enclosure::empty(2, Biome::Floresta, 5);
        assert!(try_allocate(&AllocationGroup::new(&monkey(), quantity), &forest).is_none());
    }

    #[test]
    fn given_failing_group_when_placing_in_place_then_enclosure_is_unchanged() {
        let mut river = Enclosure::empty(4, Biome::Rio, 8);
        let before = river.clone();

        let placed = river.place_group(&AllocationGroup::new(&crocodile(), 3));

        assert!(!placed);
        assert_eq!(river, before);
    }

    #[test]
    fn given_fitting_group_when_placing_in_place_then_state_is_replaced() {
        let mut river = Enclosure::empty(4, Biome::Rio, 8);

        assert!(river.place_group(&AllocationGroup::new(&crocodile(), 2)));
        assert_eq!(river.occupied, 6);
        assert_eq!(river.occupants.get(&Species::Crocodilo), Some(&2));
    }

    #[test]
    fn given_group_beyond_free_space_when_allocating_then_rejects_up_front() {
        let savana = Enclosure::empty(1, Biome::Savana, 10).with_occupants(Species::Macaco, 3, 1);
        let group = AllocationGroup::new(&monkey(), u32::MAX);

        assert!(group.min_space() > u64::from(savana.free_space()));
        assert!(try_allocate(&group, &savana).is_none());
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(10)]
    fn given_any_group_when_allocated_then_never_exceeds_capacity(#[case] quantity: u32) {
        let savana = Enclosure::empty(1, Biome::Savana, 10).with_occupants(Species::Macaco, 3, 1);
        if let Some(placed) = try_allocate(&AllocationGroup::new(&monkey(), quantity), &savana) {
            assert!(placed.occupied <= placed.total);
        }
    }
}
