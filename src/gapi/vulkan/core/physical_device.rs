use crate::gapi::vulkan::core::queues::QueueFamily;
use crate::gapi::vulkan::errors::DeviceError;
use crate::{info_success, warn_warning};
use log::{debug, info};
use vulkanalia::vk;

/// Upper bound on the physical devices considered. Several drivers per GPU
/// can make the enumeration grow, anything past this is ignored.
pub const MAX_PHYSICAL_DEVICES: usize = 64;

/// The queries device selection needs from a Vulkan instance.
///
/// Implemented by [`Instance`](crate::gapi::vulkan::instance::Instance);
/// tests provide fake GPUs through it.
pub trait DeviceEnumerator {
    fn enumerate_physical_devices(&self) -> Result<Vec<vk::PhysicalDevice>, DeviceError>;

    fn queue_family_properties(&self, device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties>;

    fn memory_properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceMemoryProperties;
}

/// The GPU chosen for this session, with the metadata later stages read.
#[derive(Clone, Debug)]
pub struct PhysicalDevice {
    vk_physical_device: vk::PhysicalDevice,
    /// Slot the device was bound from.
    index: u32,
    /// Slot the caller asked for.
    requested_index: u32,
    queue_families: Vec<QueueFamily>,
    memory_properties: vk::PhysicalDeviceMemoryProperties,
}

impl PhysicalDevice {
    /// Enumerates the physical devices and binds the one at `requested_index`.
    ///
    /// An out of range index is not fatal: it is reported as a warning and
    /// device 0 is used instead.
    ///
    /// # Errors
    /// - [`DeviceError::NoDeviceFound`] when there is no device at all.
    /// - [`DeviceError::EnumerationFailed`] when the driver call fails.
    pub fn select(enumerator: &impl DeviceEnumerator, requested_index: u32) -> Result<Self, DeviceError> {
        let mut devices = enumerator.enumerate_physical_devices()?;
        if devices.is_empty() {
            return Err(DeviceError::NoDeviceFound);
        }
        if devices.len() > MAX_PHYSICAL_DEVICES {
            warn_warning!(
                "[Vulkan] {} devices enumerated, only the first {} are considered",
                devices.len(),
                MAX_PHYSICAL_DEVICES
            );
            devices.truncate(MAX_PHYSICAL_DEVICES);
        }
        info!("[Vulkan] Found {} devices", devices.len());

        let index = resolve_device_index(requested_index, devices.len() as u32);
        info!("[Vulkan] Selecting device {}", index);

        let vk_physical_device = devices[index as usize];
        let queue_families =
            QueueFamily::from_properties_list(&enumerator.queue_family_properties(vk_physical_device));
        let memory_properties = enumerator.memory_properties(vk_physical_device);
        debug!(
            "Device {} exposes {} queue families, {} memory types, {} memory heaps",
            index,
            queue_families.len(),
            memory_properties.memory_type_count,
            memory_properties.memory_heap_count
        );
        info_success!("Physical device {} selected!", index);

        Ok(Self {
            vk_physical_device,
            index,
            requested_index,
            queue_families,
            memory_properties,
        })
    }

    pub fn get_vk(&self) -> vk::PhysicalDevice {
        self.vk_physical_device
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Whether the requested slot did not exist and slot 0 was used instead.
    pub fn fell_back(&self) -> bool {
        self.index != self.requested_index
    }

    pub fn queue_families(&self) -> &[QueueFamily] {
        &self.queue_families
    }

    pub fn memory_properties(&self) -> &vk::PhysicalDeviceMemoryProperties {
        &self.memory_properties
    }
}

/// Maps `requested` into `0..available`, warning and picking 0 when it does
/// not fit.
fn resolve_device_index(requested: u32, available: u32) -> u32 {
    if requested < available {
        return requested;
    }
    warn_warning!(
        "[Vulkan] {}",
        DeviceError::InvalidRequestedIndex {
            requested,
            available
        }
    );
    0
}
