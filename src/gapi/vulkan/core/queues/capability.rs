use std::collections::HashSet;
use vulkanalia::vk;

/// Kind of work a queue family advertises.
///
/// Vendor bits this crate has no use for (video, optical flow, ...) are folded
/// into [`QueueCapability::Other`]; they only matter when asking whether a
/// family is dedicated to a single kind of work.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum QueueCapability {
    /// A queue that supports graphics operations.
    Graphics,
    /// A queue that supports compute operations.
    Compute,
    /// A queue that supports transfer operations (copying data).
    Transfer,
    /// A queue that supports sparse memory binding.
    SparseBinding,
    /// A queue that supports protected memory.
    Protected,
    /// Any capability bit not listed above.
    Other,
}

impl From<QueueCapability> for vk::QueueFlags {
    fn from(cap: QueueCapability) -> Self {
        match cap {
            QueueCapability::Graphics => vk::QueueFlags::GRAPHICS,
            QueueCapability::Compute => vk::QueueFlags::COMPUTE,
            QueueCapability::Transfer => vk::QueueFlags::TRANSFER,
            QueueCapability::SparseBinding => vk::QueueFlags::SPARSE_BINDING,
            QueueCapability::Protected => vk::QueueFlags::PROTECTED,
            QueueCapability::Other => vk::QueueFlags::empty(),
        }
    }
}

/// Set of [`QueueCapability`] tags of one queue family.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueueCapabilities(HashSet<QueueCapability>);

impl QueueCapabilities {
    pub fn from_flags(flags: vk::QueueFlags) -> Self {
        let named = [
            QueueCapability::Graphics,
            QueueCapability::Compute,
            QueueCapability::Transfer,
            QueueCapability::SparseBinding,
            QueueCapability::Protected,
        ];
        let mut known = vk::QueueFlags::empty();
        let mut tags = HashSet::new();
        for cap in named {
            let bit = vk::QueueFlags::from(cap);
            known |= bit;
            if flags.contains(bit) {
                tags.insert(cap);
            }
        }
        if !(flags - known).is_empty() {
            tags.insert(QueueCapability::Other);
        }
        Self(tags)
    }

    pub fn contains(&self, cap: QueueCapability) -> bool {
        self.0.contains(&cap)
    }

    /// Whether the family advertises anything besides `cap`.
    pub fn has_other_than(&self, cap: QueueCapability) -> bool {
        self.0.iter().any(|c| *c != cap)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<QueueCapability> for QueueCapabilities {
    fn from_iter<I: IntoIterator<Item = QueueCapability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A queue family as the classifier sees it: position, tags and how many
/// queues can be created from it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueueFamily {
    /// The queue family index in Vulkan.
    pub family_index: u32,
    /// How many queues are available in this family.
    pub queue_count: u32,
    pub capabilities: QueueCapabilities,
}

impl QueueFamily {
    pub fn new(family_index: u32, queue_count: u32, capabilities: QueueCapabilities) -> Self {
        Self {
            family_index,
            queue_count,
            capabilities,
        }
    }

    pub fn from_properties(family_index: u32, properties: &vk::QueueFamilyProperties) -> Self {
        Self::new(
            family_index,
            properties.queue_count,
            QueueCapabilities::from_flags(properties.queue_flags),
        )
    }

    /// Builds the families of a device from what the driver reports, keeping
    /// the driver's order.
    pub fn from_properties_list(properties: &[vk::QueueFamilyProperties]) -> Vec<Self> {
        properties
            .iter()
            .enumerate()
            .map(|(index, props)| Self::from_properties(index as u32, props))
            .collect()
    }

    pub fn supports(&self, cap: QueueCapability) -> bool {
        self.capabilities.contains(cap)
    }
}
