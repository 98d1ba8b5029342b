pub mod device;
pub mod logical_device;
pub mod physical_device;
pub mod queues;
