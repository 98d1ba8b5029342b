use crate::gapi::vulkan::core::physical_device::PhysicalDevice;
use crate::gapi::vulkan::core::queues::{
    build_queue_requests, QueueCreationRequest, QueueRole, SelectedQueues, ROLE_COUNT,
};
use crate::gapi::vulkan::errors::DeviceError;
use crate::gapi::vulkan::extensions::{push_unique, DeviceExtension, ExtensionStr};
use crate::gapi::vulkan::instance::Instance;
use crate::info_success;
use log::{debug, info, trace};
use std::ffi::c_char;
use vulkanalia::vk::{DeviceV1_0, HasBuilder};
use vulkanalia::{vk, Device};

/// Queue handle retrieved for each role, `None` for a role without a family.
#[derive(Clone, Copy, Debug, Default)]
pub struct Queues([Option<vk::Queue>; ROLE_COUNT]);

impl Queues {
    pub fn get(&self, role: QueueRole) -> Option<vk::Queue> {
        self.0[role.ordinal()]
    }
}

/// Wraps the Vulkan logical device, and the queue handles it owns.
///
/// This object is responsible for:
/// - Creating the Vulkan device from the chosen physical device and queue split.
/// - Retrieving one queue handle per role.
/// - Destroying the device (and by extension, the queues) at shutdown.
pub struct LogicalDevice {
    /// The Vulkan device handle.
    device: Device,
    selected: SelectedQueues,
    queues: Queues,
}

impl LogicalDevice {
    /// Creates the logical device realizing `selected` on `physical_device`.
    ///
    /// The swapchain extension is always appended to `extensions`, the caller
    /// sees the final list afterwards. A failed `vkCreateDevice` is fatal and
    /// is not retried.
    pub fn create(
        instance: &Instance,
        physical_device: &PhysicalDevice,
        selected: SelectedQueues,
        extensions: &mut Vec<ExtensionStr>,
    ) -> Result<Self, DeviceError> {
        debug!("Creating logical device...");
        require_device_extensions(extensions, portability_subset_required(instance));

        let requests = build_queue_requests(&selected);
        log_requests(&requests);
        let queue_infos = requests
            .iter()
            .map(QueueCreationRequest::as_vk)
            .collect::<Vec<_>>();

        let ext_names = extensions
            .iter()
            .map(|e| e.as_ptr())
            .collect::<Vec<*const c_char>>();
        info!("Device extensions: {:?}", extensions);

        let features = vk::PhysicalDeviceFeatures::builder();
        let info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_infos)
            .enabled_extension_names(&ext_names)
            .enabled_features(&features);

        let device = instance
            .create_device(physical_device.get_vk(), &info)
            .map_err(DeviceError::NativeDeviceCreationFailure)?;
        info_success!("Logical device created!");

        let queues = Self::retrieve_queues(&device, &selected);
        Ok(Self {
            device,
            selected,
            queues,
        })
    }

    /// Fetches the queue at `(family, index)` for every role with a family.
    fn retrieve_queues(device: &Device, selected: &SelectedQueues) -> Queues {
        let mut queues = Queues::default();
        for (role, queue) in selected.iter() {
            let Some(family_index) = queue.family_index else {
                continue;
            };
            let handle = unsafe { device.get_device_queue(family_index, queue.queue_index) };
            trace!(
                "Role {} uses queue {} of family {}: {:?}",
                role, queue.queue_index, family_index, handle
            );
            queues.0[role.ordinal()] = Some(handle);
        }
        queues
    }

    pub fn queue(&self, role: QueueRole) -> Option<vk::Queue> {
        self.queues.get(role)
    }

    pub fn selected_queues(&self) -> &SelectedQueues {
        &self.selected
    }

    /// Returns a reference to the underlying Vulkan [`Device`].
    pub fn get_vk(&self) -> &Device {
        &self.device
    }

    /// Destroys this logical device. Automatically frees all queues it owns.
    ///
    /// The device and its queue handles must not be used afterwards.
    pub fn destroy(&self) {
        unsafe {
            self.device.destroy_device(None);
        }
    }
}

/// The portability subset must be enabled on devices enumerated through the
/// macOS portability path.
fn portability_subset_required(instance: &Instance) -> bool {
    cfg!(target_os = "macos")
        && instance
            .get_vk()
            .extensions()
            .contains(&vk::KHR_PORTABILITY_ENUMERATION_EXTENSION.name)
}

/// Adds the extensions every device needs on top of the caller's.
fn require_device_extensions(extensions: &mut Vec<ExtensionStr>, portability: bool) {
    push_unique(extensions, DeviceExtension::KhrSwapchain);
    if portability {
        push_unique(extensions, DeviceExtension::KhrPortabilitySubset);
    }
}

fn log_requests(requests: &[QueueCreationRequest]) {
    for request in requests {
        debug!(
            "Requesting {} queue(s) from family {}",
            request.queue_count, request.family_index
        );
    }
}
