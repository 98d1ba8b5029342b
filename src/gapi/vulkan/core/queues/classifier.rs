use super::{QueueCapability, QueueFamily, QueueRole, SelectedQueue, SelectedQueues};
use crate::gapi::vulkan::errors::DeviceError;
use crate::warn_warning;
use log::{debug, trace};

/// Picks one queue family per [`QueueRole`].
///
/// Families are scanned once, in index order:
/// - Graphics takes the first graphics-capable family.
/// - Compute takes a compute-capable family, and moves on to a later one while
///   its current family also does graphics with a single queue, so compute
///   does not end up fighting graphics for that queue.
/// - Transfer takes a transfer-capable family, and moves on to a later one
///   while its current family can do anything besides transfer, which favours
///   dedicated (DMA) transfer families.
///
/// Graphics and compute families are implicitly able to transfer even when the
/// driver does not advertise the bit, so a Transfer role left without a family
/// inherits the Graphics assignment (or the Compute one on a device without
/// graphics). Compute left without a family inherits Graphics the same way.
///
/// A device without any graphics family still yields a configuration: the
/// Graphics role stays unassigned and later stages skip it.
///
/// # Errors
/// - [`DeviceError::NoQueuesReported`] if `families` is empty.
pub fn classify(device_index: u32, families: &[QueueFamily]) -> Result<SelectedQueues, DeviceError> {
    if families.is_empty() {
        return Err(DeviceError::NoQueuesReported { device_index });
    }

    let mut selected = SelectedQueues::default();
    for family in families {
        trace!(
            "Queue family {}: {} queue(s), {:?}",
            family.family_index, family.queue_count, family.capabilities
        );

        if family.supports(QueueCapability::Graphics) && !selected[QueueRole::Graphics].is_assigned() {
            selected[QueueRole::Graphics] = SelectedQueue::on_family(family.family_index);
        }

        if family.supports(QueueCapability::Compute)
            && should_replace(&selected[QueueRole::Compute], families, |current| {
                current.supports(QueueCapability::Graphics) && current.queue_count == 1
            })
        {
            selected[QueueRole::Compute] = SelectedQueue::on_family(family.family_index);
        }

        if family.supports(QueueCapability::Transfer)
            && should_replace(&selected[QueueRole::Transfer], families, |current| {
                current.capabilities.has_other_than(QueueCapability::Transfer)
            })
        {
            selected[QueueRole::Transfer] = SelectedQueue::on_family(family.family_index);
        }
    }

    let graphics = selected[QueueRole::Graphics];
    if !graphics.is_assigned() {
        warn_warning!("Device {} has no graphics-capable queue family", device_index);
    }

    if !selected[QueueRole::Compute].is_assigned() && graphics.is_assigned() {
        warn_warning!("No compute-capable queue family, compute will share the graphics queue");
        selected[QueueRole::Compute] = SelectedQueue::inherit(QueueRole::Graphics, graphics);
    }

    if !selected[QueueRole::Transfer].is_assigned() {
        if graphics.is_assigned() {
            debug!("No family advertises transfer, transfer will share the graphics queue");
            selected[QueueRole::Transfer] = SelectedQueue::inherit(QueueRole::Graphics, graphics);
        } else if selected[QueueRole::Compute].is_assigned() {
            debug!("No family advertises transfer, transfer will share the compute queue");
            let compute = selected[QueueRole::Compute];
            selected[QueueRole::Transfer] = SelectedQueue::inherit(QueueRole::Compute, compute);
        }
    }

    for (role, queue) in selected.iter() {
        debug!("Role {} assigned to queue family {:?}", role, queue.family_index);
    }
    Ok(selected)
}

/// A role with no family always takes the candidate; otherwise it only does so
/// when `worse` says its current family is a poor fit.
fn should_replace(
    current: &SelectedQueue,
    families: &[QueueFamily],
    worse: impl Fn(&QueueFamily) -> bool,
) -> bool {
    match current.family_index {
        None => true,
        Some(index) => families
            .iter()
            .find(|f| f.family_index == index)
            .is_some_and(worse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gapi::vulkan::core::queues::QueueCapabilities;
    use crate::gapi::vulkan::core::queues::QueueCapability::{Compute, Graphics, SparseBinding, Transfer};

    fn family(index: u32, count: u32, caps: &[QueueCapability]) -> QueueFamily {
        QueueFamily::new(index, count, caps.iter().copied().collect::<QueueCapabilities>())
    }

    fn family_of(selected: &SelectedQueues, role: QueueRole) -> Option<u32> {
        selected[role].family_index
    }

    #[test]
    fn zero_families_is_an_error() {
        let err = classify(3, &[]).unwrap_err();
        assert!(matches!(err, DeviceError::NoQueuesReported { device_index: 3 }));
    }

    #[test]
    fn no_graphics_family_leaves_graphics_unassigned() {
        let families = [family(0, 4, &[Compute, Transfer])];
        let selected = classify(0, &families).unwrap();
        assert!(!selected[QueueRole::Graphics].is_assigned());
        assert_eq!(family_of(&selected, QueueRole::Compute), Some(0));
        assert_eq!(family_of(&selected, QueueRole::Transfer), Some(0));
        assert!(selected[QueueRole::Transfer].inherited_from.is_none());
    }

    #[test]
    fn transfer_falls_back_to_compute_without_graphics() {
        let families = [family(0, 2, &[Compute])];
        let selected = classify(0, &families).unwrap();
        assert!(!selected[QueueRole::Graphics].is_assigned());
        assert_eq!(family_of(&selected, QueueRole::Transfer), Some(0));
        assert_eq!(selected[QueueRole::Transfer].inherited_from, Some(QueueRole::Compute));
    }

    #[test]
    fn transfer_only_device_assigns_transfer_alone() {
        let families = [family(0, 1, &[Transfer])];
        let selected = classify(0, &families).unwrap();
        assert!(!selected[QueueRole::Graphics].is_assigned());
        assert!(!selected[QueueRole::Compute].is_assigned());
        assert_eq!(family_of(&selected, QueueRole::Transfer), Some(0));
    }

    #[test]
    fn graphics_takes_the_first_graphics_family() {
        let families = [
            family(0, 1, &[Transfer]),
            family(1, 4, &[Graphics, Compute, Transfer]),
            family(2, 4, &[Graphics, Compute]),
        ];
        let selected = classify(0, &families).unwrap();
        assert_eq!(family_of(&selected, QueueRole::Graphics), Some(1));
    }

    #[test]
    fn compute_leaves_a_single_queue_graphics_family() {
        let families = [
            family(0, 1, &[Graphics, Compute, Transfer]),
            family(1, 4, &[Compute]),
        ];
        let selected = classify(0, &families).unwrap();
        assert_eq!(family_of(&selected, QueueRole::Graphics), Some(0));
        assert_eq!(family_of(&selected, QueueRole::Compute), Some(1));
    }

    #[test]
    fn compute_keeps_a_graphics_family_with_spare_queues() {
        let families = [
            family(0, 2, &[Graphics, Compute, Transfer]),
            family(1, 4, &[Compute]),
        ];
        let selected = classify(0, &families).unwrap();
        assert_eq!(family_of(&selected, QueueRole::Compute), Some(0));
        assert_eq!(family_of(&selected, QueueRole::Transfer), Some(0));
    }

    #[test]
    fn compute_stays_when_nothing_better_exists() {
        let families = [family(0, 1, &[Graphics, Compute, Transfer])];
        let selected = classify(0, &families).unwrap();
        assert_eq!(family_of(&selected, QueueRole::Compute), Some(0));
    }

    #[test]
    fn transfer_prefers_a_dedicated_family() {
        let families = [
            family(0, 16, &[Graphics, Compute, Transfer, SparseBinding]),
            family(1, 2, &[Transfer]),
            family(2, 8, &[Compute, Transfer]),
        ];
        let selected = classify(0, &families).unwrap();
        assert_eq!(family_of(&selected, QueueRole::Transfer), Some(1));
        assert!(selected[QueueRole::Transfer].inherited_from.is_none());
    }

    #[test]
    fn transfer_moves_past_shared_families() {
        let families = [
            family(0, 16, &[Graphics, Compute, Transfer]),
            family(1, 2, &[Transfer, SparseBinding]),
            family(2, 8, &[Compute, Transfer]),
        ];
        let selected = classify(0, &families).unwrap();
        // Nothing is transfer-only, so the last transfer family wins.
        assert_eq!(family_of(&selected, QueueRole::Transfer), Some(2));
    }

    #[test]
    fn transfer_falls_back_to_graphics() {
        let families = [family(0, 4, &[Graphics, Compute]), family(1, 2, &[Compute])];
        let selected = classify(0, &families).unwrap();
        assert_eq!(
            family_of(&selected, QueueRole::Transfer),
            family_of(&selected, QueueRole::Graphics)
        );
        assert_eq!(selected[QueueRole::Transfer].inherited_from, Some(QueueRole::Graphics));
    }

    #[test]
    fn compute_falls_back_to_graphics() {
        let families = [family(0, 1, &[Graphics])];
        let selected = classify(0, &families).unwrap();
        assert_eq!(family_of(&selected, QueueRole::Compute), Some(0));
        assert_eq!(selected[QueueRole::Compute].inherited_from, Some(QueueRole::Graphics));
    }

    #[test]
    fn every_role_is_assigned_on_success() {
        let families = [family(0, 1, &[Graphics, Compute])];
        let selected = classify(0, &families).unwrap();
        assert!(selected.iter().all(|(_, s)| s.is_assigned()));
    }
}
