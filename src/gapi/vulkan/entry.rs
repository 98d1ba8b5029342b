use crate::gapi::vulkan::extensions::LayerStr;
use anyhow::{anyhow, Context};
use std::collections::HashSet;
use vulkanalia::loader::{LibloadingLoader, LIBRARY};
use vulkanalia::vk::EntryV1_0;
use vulkanalia::{vk, Version};
use vulkanalia::{Entry as VkEntry, Instance as VkInstance, VkResult};

/// # Vulkan Entry
/// The entry point that dynamically loads the Vulkan API.
///
/// # Details
/// When the `Entry` is created the ICDs (the Vulkan front-ends of the GPU
/// drivers) are not loaded yet. `Entry` finds the loader of the system
/// (`vulkan-1.dll`, `libvulkan.so.1`, ...) and fetches the global symbols
/// needed to create an instance, i.e. `vkCreateInstance`.
pub struct Entry {
    entry: VkEntry,
}

impl Entry {
    /// Loads the Vulkan loader library and dispatches its global functions.
    ///
    /// # Errors
    /// - If the loader is not found.
    /// - If the Vulkan entry fails to load.
    pub fn new() -> anyhow::Result<Self> {
        let loader = unsafe {
            LibloadingLoader::new(LIBRARY)
                .with_context(|| format!("Failed to load Vulkan library: {}", LIBRARY))?
        };
        let entry = unsafe {
            VkEntry::new(loader).map_err(|b| anyhow!("Failed to load Vulkan entry: {}", b))?
        };
        Ok(Self { entry })
    }

    /// Highest Vulkan version the loader supports. The ICDs may support a
    /// different one.
    pub fn version(&self) -> anyhow::Result<Version> {
        Ok(self.entry.version()?)
    }

    /// Layers installed on the system, queried before instance creation.
    pub fn get_available_layers(&self) -> anyhow::Result<HashSet<LayerStr>> {
        let layers = unsafe { self.entry.enumerate_instance_layer_properties() }?
            .iter()
            .map(|l| l.layer_name)
            .collect::<HashSet<_>>();
        Ok(layers)
    }

    pub fn create_instance(
        &self,
        info: &vk::InstanceCreateInfo,
        allocation_callbacks: Option<&vk::AllocationCallbacks>,
    ) -> VkResult<VkInstance> {
        unsafe { self.entry.create_instance(info, allocation_callbacks) }
    }
}
