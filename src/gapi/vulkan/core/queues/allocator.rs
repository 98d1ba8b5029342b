use super::{QueueFamily, QueueRole, SelectedQueues};
use log::trace;

/// Gives `role` its own queue inside its family when the family has one to
/// spare.
///
/// The candidate index is the number of earlier roles on the same family, then
/// clamped to the last queue of the family: on hardware with fewer queues than
/// roles, several roles alias one queue. A role whose assignment was inherited
/// takes the queue index of the role it inherited from.
pub fn resolve_queue_index(
    role: QueueRole,
    selected: SelectedQueues,
    families: &[QueueFamily],
) -> SelectedQueues {
    let mut resolved = selected;
    let Some(family_index) = selected[role].family_index else {
        return resolved;
    };

    if let Some(source) = selected[role].inherited_from {
        resolved[role].queue_index = selected[source].queue_index;
        return resolved;
    }

    let candidate = selected
        .sharing_family_with(role)
        .filter(|other| role.predecessors().contains(other))
        .count() as u32;
    let available = families
        .iter()
        .find(|f| f.family_index == family_index)
        .map_or(1, |f| f.queue_count.max(1));

    resolved[role].queue_index = candidate.min(available - 1);
    trace!(
        "Role {} gets queue {} of family {} ({} available)",
        role, resolved[role].queue_index, family_index, available
    );
    resolved
}

/// Runs [`resolve_queue_index`] for every role after Graphics, in role order.
/// Graphics keeps queue index 0.
pub fn allocate_queue_indices(selected: SelectedQueues, families: &[QueueFamily]) -> SelectedQueues {
    QueueRole::ALL[1..]
        .iter()
        .fold(selected, |acc, role| resolve_queue_index(*role, acc, families))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gapi::vulkan::core::queues::{classify, QueueCapabilities, QueueCapability};
    use crate::gapi::vulkan::core::queues::QueueCapability::{Compute, Graphics, Transfer};

    fn family(index: u32, count: u32, caps: &[QueueCapability]) -> QueueFamily {
        QueueFamily::new(index, count, caps.iter().copied().collect::<QueueCapabilities>())
    }

    fn allocate(families: &[QueueFamily]) -> SelectedQueues {
        allocate_queue_indices(classify(0, families).unwrap(), families)
    }

    #[test]
    fn graphics_always_gets_index_zero() {
        let families = [family(0, 16, &[Graphics, Compute, Transfer])];
        let selected = allocate(&families);
        assert_eq!(selected[QueueRole::Graphics].queue_index, 0);
    }

    #[test]
    fn shared_family_hands_out_distinct_queues() {
        let families = [family(0, 16, &[Graphics, Compute, Transfer])];
        let selected = allocate(&families);
        assert_eq!(selected[QueueRole::Compute].queue_index, 1);
        assert_eq!(selected[QueueRole::Transfer].queue_index, 2);
    }

    #[test]
    fn indices_are_clamped_to_the_family_size() {
        let families = [family(0, 2, &[Graphics, Compute, Transfer])];
        let selected = allocate(&families);
        assert_eq!(selected[QueueRole::Compute].queue_index, 1);
        assert_eq!(selected[QueueRole::Transfer].queue_index, 1);
    }

    #[test]
    fn single_queue_family_aliases_everything() {
        let families = [family(0, 1, &[Graphics, Compute, Transfer])];
        let selected = allocate(&families);
        assert!(selected.iter().all(|(_, s)| s.queue_index == 0));
    }

    #[test]
    fn separate_families_start_at_zero() {
        let families = [
            family(0, 1, &[Graphics, Compute, Transfer]),
            family(1, 4, &[Compute]),
        ];
        let selected = allocate(&families);
        assert_eq!(selected[QueueRole::Compute].family_index, Some(1));
        assert_eq!(selected[QueueRole::Compute].queue_index, 0);
        assert_eq!(selected[QueueRole::Transfer].family_index, Some(0));
        assert_eq!(selected[QueueRole::Transfer].queue_index, 0);
    }

    #[test]
    fn inherited_transfer_matches_graphics_exactly() {
        let families = [family(0, 8, &[Graphics, Compute])];
        let selected = allocate(&families);
        assert_eq!(selected[QueueRole::Compute].queue_index, 1);
        assert_eq!(
            selected[QueueRole::Transfer].family_index,
            selected[QueueRole::Graphics].family_index
        );
        assert_eq!(
            selected[QueueRole::Transfer].queue_index,
            selected[QueueRole::Graphics].queue_index
        );
    }

    #[test]
    fn unassigned_role_is_left_alone() {
        let selected = SelectedQueues::default();
        let resolved = resolve_queue_index(QueueRole::Compute, selected, &[]);
        assert_eq!(resolved, selected);
    }
}
