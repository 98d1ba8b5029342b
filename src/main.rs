use ::log::{debug, error, info};
use anyhow::{Context, Result};
use device_forge::gapi::vulkan::config::ForgeConfig;
use device_forge::gapi::vulkan::core::queues::QueueRole;
use device_forge::gapi::vulkan::entry::Entry;
use device_forge::gapi::vulkan::instance::Instance;
use device_forge::log::log::init_log;
use device_forge::window::window::PresentationWindow;
use device_forge::{info_success, Device, DeviceError};
use winit::event_loop::EventLoop;

fn main() -> Result<()> {
    // Nothing is logged before the logger exists, so setup errors go to stderr.
    let config = match ForgeConfig::from_env().and_then(|config| {
        init_log(config.log_level)?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to start device_forge: {:#}", err);
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        error!("Oops! Something went wrong: {}", err);

        for cause in err.chain().skip(1) {
            error!("Caused by: {}", cause);
        }
        if let Some(device_err) = err.downcast_ref::<DeviceError>() {
            error!("Raised by: {}", device_err.operation());
        }

        std::process::exit(1);
    }
    Ok(())
}

fn run(config: &ForgeConfig) -> Result<()> {
    debug!("Configuration: {:?}", config);

    let event_loop = EventLoop::new()?;
    let window = PresentationWindow::new(&event_loop, &config.application_name)?;

    let entry = Entry::new()?;
    let instance = Instance::new(
        &entry,
        &config.application_name,
        window.get_required_extensions(),
    )?;

    let mut extensions = Vec::new();
    let device = Device::new(&instance, config.device_index, &mut extensions).with_context(|| {
        format!("Failed to initialize Vulkan device {}", config.device_index)
    })?;
    info_success!("Device initialized with {} extension(s)", extensions.len());

    let selected = device.logical_device().selected_queues();
    for role in QueueRole::ALL {
        let queue = selected[role];
        info!(
            "{:>8}: family {:?}, queue {}, handle {:?}",
            role,
            queue.family_index,
            queue.queue_index,
            device.queue(role)
        );
    }

    device.destroy();
    instance.destroy();
    Ok(())
}
