//! Picks a Vulkan physical device, splits its queue families into the
//! graphics / compute / transfer roles a renderer needs and creates the
//! logical device that realizes that split.

pub mod gapi;
pub mod log;
pub mod window;

pub use crate::gapi::vulkan::core::device::Device;
pub use crate::gapi::vulkan::errors::DeviceError;
