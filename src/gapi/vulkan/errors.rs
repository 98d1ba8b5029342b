use thiserror::Error;
use vulkanalia::vk;

/// Everything that can go wrong while picking a GPU and building its logical
/// device.
///
/// Only [`DeviceError::InvalidRequestedIndex`] is recoverable: it is logged as
/// a warning and device 0 is used instead. Every other variant aborts device
/// initialization.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("No Vulkan devices found (0 physical devices enumerated).")]
    NoDeviceFound,

    #[error("Failed to enumerate Vulkan physical devices: {0}")]
    EnumerationFailed(#[source] vk::ErrorCode),

    #[error("Requested device index {requested} but there are only {available} devices.")]
    InvalidRequestedIndex { requested: u32, available: u32 },

    #[error("Vulkan device {device_index} is reporting 0 queue families!")]
    NoQueuesReported { device_index: u32 },

    #[error("Failed to create the Vulkan logical device: {0}")]
    NativeDeviceCreationFailure(#[source] vk::ErrorCode),
}

impl DeviceError {
    /// Name of the operation that raised the error, for error reports.
    pub fn operation(&self) -> &'static str {
        match self {
            DeviceError::NoDeviceFound
            | DeviceError::EnumerationFailed(_)
            | DeviceError::InvalidRequestedIndex { .. } => "PhysicalDevice::select",
            DeviceError::NoQueuesReported { .. } => "queues::classify",
            DeviceError::NativeDeviceCreationFailure(_) => "LogicalDevice::create",
        }
    }
}
