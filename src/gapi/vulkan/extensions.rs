use vulkanalia::{vk, Version};

/// Type alias for the extension names.
/// Vulkan provides a type for Extension ([`vk::ExtensionName`]) that is defined as
/// `StringArray<MAX_EXTENSION_NAME_SIZE>`
pub type ExtensionStr = vk::ExtensionName;

/// Layer names share the extension name storage in Vulkan
/// ([`vk::LayerProperties`] stores them as `StringArray<MAX_EXTENSION_NAME_SIZE>`).
pub type LayerStr = vk::ExtensionName;

/// `VK_LAYER_KHRONOS_validation`, the Khronos all-in-one validation layer.
pub static VALIDATION_LAYER: LayerStr = vk::ExtensionName::from_bytes(b"VK_LAYER_KHRONOS_validation");

/// Required by Vulkan SDK on macOS since 1.3.216.
pub(crate) const PORTABILITY_MACOS_VERSION: Version = Version::new(1, 3, 216);

/// # Vulkan Device Extensions
///
/// Device extensions extend the logical device and must be enabled during
/// `vkCreateDevice`. Callers hand their wishes to
/// [`LogicalDevice::create`](crate::gapi::vulkan::core::logical_device::LogicalDevice::create)
/// as raw [`ExtensionStr`] names; these variants are the ones this crate knows
/// by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceExtension {
    /// Required for presenting images to a surface. Always enabled.
    KhrSwapchain,
    /// Portability subset (MoltenVK etc.)
    KhrPortabilitySubset,
}

impl DeviceExtension {
    pub fn name(&self) -> &'static ExtensionStr {
        match self {
            DeviceExtension::KhrSwapchain => &vk::KHR_SWAPCHAIN_EXTENSION.name,
            DeviceExtension::KhrPortabilitySubset => &vk::KHR_PORTABILITY_SUBSET_EXTENSION.name,
        }
    }
}

/// Appends `extension` unless the list already has it.
/// Returns whether it was added.
pub fn push_unique(extensions: &mut Vec<ExtensionStr>, extension: DeviceExtension) -> bool {
    let name = *extension.name();
    if extensions.contains(&name) {
        return false;
    }
    extensions.push(name);
    true
}
