use crate::gapi::vulkan::extensions::ExtensionStr;
use anyhow::Context;
use vulkanalia::window as vk_window;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

/// Invisible window whose only job is to tell which surface instance
/// extensions the window system needs. The swapchain device extension is
/// always enabled, and it depends on them.
pub struct PresentationWindow {
    winit_window: Window,
}

impl PresentationWindow {
    pub fn new(event_loop: &EventLoop<()>, title: &str) -> anyhow::Result<Self> {
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(640, 480))
            .with_visible(false)
            .build(event_loop)
            .context("Failed to create the presentation window")?;
        Ok(Self {
            winit_window: window,
        })
    }

    pub fn get_required_extensions(&self) -> &'static [&'static ExtensionStr] {
        vk_window::get_required_instance_extensions(&self.winit_window)
    }
}
