use crate::gapi::vulkan::config::VALIDATION_ENABLED;
use crate::gapi::vulkan::core::physical_device::DeviceEnumerator;
use crate::gapi::vulkan::entry::Entry;
use crate::gapi::vulkan::errors::DeviceError;
use crate::gapi::vulkan::extensions::{ExtensionStr, PORTABILITY_MACOS_VERSION, VALIDATION_LAYER};
use crate::{info_success, trace_success, warn_warning};
use anyhow::{anyhow, Context};
use log::{debug, info, trace};
use std::ffi::{c_char, CString};
use vulkanalia::vk::{HasBuilder, InstanceV1_0};
use vulkanalia::{vk, Device, Instance as VkInstance, VkResult};

/// # Vulkan Instance
/// The connection between this program and the Vulkan driver, and the source
/// of every physical device query.
///
/// Destroying the instance invalidates everything created from it, so it must
/// outlive the [`Device`](crate::gapi::vulkan::core::device::Device).
pub struct Instance {
    instance: VkInstance,
}

impl Instance {
    /// Creates the instance for `application_name` with the caller's instance
    /// `extensions` (usually the surface extensions of the window system).
    ///
    /// With the `validation` feature the Khronos validation layer is enabled
    /// when installed. On macOS the portability extensions are added.
    ///
    /// # Errors
    /// - The application name contains a NUL byte.
    /// - macOS with a loader older than 1.3.216.
    /// - `vkCreateInstance` fails.
    pub fn new(
        entry: &Entry,
        application_name: &str,
        extensions: &[&ExtensionStr],
    ) -> anyhow::Result<Self> {
        let app_name = CString::new(application_name)
            .with_context(|| format!("Invalid application name `{}`", application_name))?;
        let application_info = vk::ApplicationInfo::builder()
            .application_name(app_name.as_bytes_with_nul())
            .application_version(vk::make_version(1, 0, 0))
            .engine_name(b"Forge\0")
            .engine_version(vk::make_version(0, 1, 0))
            .api_version(vk::make_version(1, 0, 2));
        trace_success!("Application info built!: \n\t{:?}", application_info);

        let mut extension_names = extensions
            .iter()
            .map(|e| e.as_ptr())
            .collect::<Vec<*const c_char>>();

        let mut flags = vk::InstanceCreateFlags::empty();
        if cfg!(target_os = "macos") {
            let version = entry.version()?;
            if version < PORTABILITY_MACOS_VERSION {
                return Err(anyhow!(
                    "MacOS portability requires Vulkan {}",
                    PORTABILITY_MACOS_VERSION
                ));
            }
            info!("Enabling extensions for macOS portability.");
            extension_names.push(vk::KHR_GET_PHYSICAL_DEVICE_PROPERTIES2_EXTENSION.name.as_ptr());
            extension_names.push(vk::KHR_PORTABILITY_ENUMERATION_EXTENSION.name.as_ptr());
            flags |= vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR;
        }

        let mut layer_names: Vec<*const c_char> = vec![];
        if VALIDATION_ENABLED {
            if entry.get_available_layers()?.contains(&VALIDATION_LAYER) {
                debug!("Enabling layer {}", VALIDATION_LAYER);
                layer_names.push(VALIDATION_LAYER.as_ptr());
            } else {
                warn_warning!("Validation requested but {} is not installed", VALIDATION_LAYER);
            }
        }

        let info = vk::InstanceCreateInfo::builder()
            .application_info(&application_info)
            .enabled_layer_names(&layer_names)
            .enabled_extension_names(&extension_names)
            .flags(flags);
        trace!("Creating vulkan instance...");
        let instance = entry
            .create_instance(&info, None)
            .context("Failed to create the Vulkan instance")?;
        info_success!("Vulkan Instance created!");

        Ok(Self { instance })
    }

    pub fn get_physical_device_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties {
        unsafe { self.instance.get_physical_device_properties(physical_device) }
    }

    pub fn create_device(
        &self,
        physical_device: vk::PhysicalDevice,
        info: &vk::DeviceCreateInfo,
    ) -> VkResult<Device> {
        trace!("Calling create_device for physical device: {:?}", physical_device);
        unsafe { self.instance.create_device(physical_device, info, None) }
    }

    pub fn get_vk(&self) -> &VkInstance {
        &self.instance
    }

    pub fn destroy(&self) {
        debug!("Destroying instance");
        unsafe {
            self.instance.destroy_instance(None);
        }
    }
}

impl DeviceEnumerator for Instance {
    fn enumerate_physical_devices(&self) -> Result<Vec<vk::PhysicalDevice>, DeviceError> {
        trace!("Querying all physical devices...");
        unsafe { self.instance.enumerate_physical_devices() }.map_err(DeviceError::EnumerationFailed)
    }

    fn queue_family_properties(&self, device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties> {
        unsafe { self.instance.get_physical_device_queue_family_properties(device) }
    }

    fn memory_properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceMemoryProperties {
        unsafe { self.instance.get_physical_device_memory_properties(device) }
    }
}
