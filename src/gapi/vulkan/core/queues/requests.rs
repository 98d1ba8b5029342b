use super::{QueueRole, SelectedQueues};
use vulkanalia::vk;
use vulkanalia::vk::HasBuilder;

/// Default priority given to every created queue.
pub const DEFAULT_QUEUE_PRIORITY: f32 = 1.0;

/// How many queues to create from one family.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueCreationRequest {
    pub family_index: u32,
    pub queue_count: u32,
    /// One entry per queue; Vulkan requires them even for a single queue.
    pub priorities: Vec<f32>,
}

impl QueueCreationRequest {
    fn new(family_index: u32, queue_count: u32) -> Self {
        Self {
            family_index,
            queue_count,
            priorities: vec![DEFAULT_QUEUE_PRIORITY; queue_count as usize],
        }
    }

    /// The borrowed builder keeps `priorities` alive for the create call.
    pub fn as_vk(&self) -> vk::DeviceQueueCreateInfoBuilder<'_> {
        vk::DeviceQueueCreateInfo::builder()
            .queue_family_index(self.family_index)
            .queue_priorities(&self.priorities)
    }
}

/// Folds the per-role selection into one request per distinct family.
///
/// Requests come out in the order their family first appears when walking the
/// roles, and each asks for enough queues to cover the highest queue index any
/// role uses in that family. Unassigned roles are skipped.
pub fn build_queue_requests(selected: &SelectedQueues) -> Vec<QueueCreationRequest> {
    let mut requests: Vec<QueueCreationRequest> = Vec::with_capacity(QueueRole::ALL.len());
    for (_, queue) in selected.iter() {
        let Some(family_index) = queue.family_index else {
            continue;
        };
        if requests.iter().any(|r| r.family_index == family_index) {
            continue;
        }
        let highest = selected
            .iter()
            .filter(|(_, other)| other.family_index == Some(family_index))
            .map(|(_, other)| other.queue_index)
            .max()
            .unwrap_or(0);
        requests.push(QueueCreationRequest::new(family_index, highest + 1));
    }
    requests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gapi::vulkan::core::queues::{
        allocate_queue_indices, classify, QueueCapabilities, QueueCapability, QueueFamily,
        SelectedQueue,
    };
    use crate::gapi::vulkan::core::queues::QueueCapability::{Compute, Graphics, Transfer};

    fn family(index: u32, count: u32, caps: &[QueueCapability]) -> QueueFamily {
        QueueFamily::new(index, count, caps.iter().copied().collect::<QueueCapabilities>())
    }

    fn requests_for(families: &[QueueFamily]) -> Vec<QueueCreationRequest> {
        let selected = allocate_queue_indices(classify(0, families).unwrap(), families);
        build_queue_requests(&selected)
    }

    fn pairs(requests: &[QueueCreationRequest]) -> Vec<(u32, u32)> {
        requests.iter().map(|r| (r.family_index, r.queue_count)).collect()
    }

    #[test]
    fn one_family_one_request() {
        let requests = requests_for(&[family(0, 16, &[Graphics, Compute, Transfer])]);
        assert_eq!(pairs(&requests), vec![(0, 3)]);
        assert_eq!(requests[0].priorities, vec![DEFAULT_QUEUE_PRIORITY; 3]);
    }

    #[test]
    fn clamped_family_asks_for_what_it_has() {
        let requests = requests_for(&[family(0, 2, &[Graphics, Compute, Transfer])]);
        assert_eq!(pairs(&requests), vec![(0, 2)]);
    }

    #[test]
    fn dedicated_families_get_their_own_request() {
        let requests = requests_for(&[
            family(0, 16, &[Graphics, Compute, Transfer]),
            family(1, 2, &[Transfer]),
            family(2, 8, &[Compute, Transfer]),
        ]);
        // Compute stays on family 0 next to graphics, transfer gets the DMA family.
        assert_eq!(pairs(&requests), vec![(0, 2), (1, 1)]);
    }

    #[test]
    fn cramped_graphics_family_scenario() {
        let requests = requests_for(&[
            family(0, 1, &[Graphics, Compute, Transfer]),
            family(1, 4, &[Compute]),
        ]);
        assert_eq!(pairs(&requests), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn inherited_transfer_adds_no_queue() {
        let requests = requests_for(&[family(0, 4, &[Graphics]), family(1, 4, &[Compute])]);
        assert_eq!(pairs(&requests), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn order_follows_roles() {
        let mut selected = SelectedQueues::default();
        selected[QueueRole::Graphics] = SelectedQueue::on_family(3);
        selected[QueueRole::Compute] = SelectedQueue::on_family(1);
        selected[QueueRole::Transfer] = SelectedQueue::on_family(3);
        selected[QueueRole::Transfer].queue_index = 1;
        assert_eq!(pairs(&build_queue_requests(&selected)), vec![(3, 2), (1, 1)]);
    }

    #[test]
    fn no_duplicate_families() {
        let requests = requests_for(&[
            family(0, 1, &[Graphics, Compute, Transfer]),
            family(1, 1, &[Compute, Transfer]),
            family(2, 1, &[Transfer]),
        ]);
        let mut families: Vec<_> = requests.iter().map(|r| r.family_index).collect();
        families.sort();
        families.dedup();
        assert_eq!(families.len(), requests.len());
    }

    #[test]
    fn empty_selection_builds_nothing() {
        assert!(build_queue_requests(&SelectedQueues::default()).is_empty());
    }
}
