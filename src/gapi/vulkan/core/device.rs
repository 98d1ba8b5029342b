use crate::gapi::vulkan::core::logical_device::LogicalDevice;
use crate::gapi::vulkan::core::physical_device::PhysicalDevice;
use crate::gapi::vulkan::core::queues::{allocate_queue_indices, classify, QueueRole, SelectedQueues};
use crate::gapi::vulkan::errors::DeviceError;
use crate::gapi::vulkan::extensions::ExtensionStr;
use crate::gapi::vulkan::instance::Instance;
use crate::info_success;
use log::{debug, info};
use vulkanalia::vk;

/// Splits the queue families of `physical_device` into roles and gives each
/// role its queue index. Pure: nothing is created on the driver side.
pub fn plan_queues(physical_device: &PhysicalDevice) -> Result<SelectedQueues, DeviceError> {
    let families = physical_device.queue_families();
    let classified = classify(physical_device.index(), families)?;
    Ok(allocate_queue_indices(classified, families))
}

/// The GPU picked for this session and the logical device built on it.
pub struct Device {
    physical_device: PhysicalDevice,
    logical_device: LogicalDevice,
}

impl Device {
    /// Selects the physical device at `requested_index` (0 when out of range),
    /// splits its queues into graphics / compute / transfer and creates the
    /// logical device. `extensions` gets the swapchain extension appended.
    pub fn new(
        instance: &Instance,
        requested_index: u32,
        extensions: &mut Vec<ExtensionStr>,
    ) -> Result<Self, DeviceError> {
        let physical_device = PhysicalDevice::select(instance, requested_index)?;
        let properties = instance.get_physical_device_properties(physical_device.get_vk());
        info!(
            "[Vulkan] Device {} is `{}`",
            physical_device.index(),
            properties.device_name
        );

        let selected = plan_queues(&physical_device)?;
        for (role, queue) in selected.iter() {
            debug!(
                "{} -> family {:?}, queue {}",
                role, queue.family_index, queue.queue_index
            );
        }

        let logical_device = LogicalDevice::create(instance, &physical_device, selected, extensions)?;
        info_success!("Device {} ready!", physical_device.index());
        Ok(Self {
            physical_device,
            logical_device,
        })
    }

    pub fn physical_device(&self) -> &PhysicalDevice {
        &self.physical_device
    }

    pub fn logical_device(&self) -> &LogicalDevice {
        &self.logical_device
    }

    pub fn queue(&self, role: QueueRole) -> Option<vk::Queue> {
        self.logical_device.queue(role)
    }

    pub fn graphics_queue(&self) -> Option<vk::Queue> {
        self.queue(QueueRole::Graphics)
    }

    pub fn compute_queue(&self) -> Option<vk::Queue> {
        self.queue(QueueRole::Compute)
    }

    pub fn transfer_queue(&self) -> Option<vk::Queue> {
        self.queue(QueueRole::Transfer)
    }

    pub fn memory_properties(&self) -> &vk::PhysicalDeviceMemoryProperties {
        self.physical_device.memory_properties()
    }

    pub fn destroy(&self) {
        debug!("Destroying device {}", self.physical_device.index());
        self.logical_device.destroy();
    }
}
