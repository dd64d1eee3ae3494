use crate::{CameraError, CameraParameter};
use lumen_image::ByteImage;
use std::path::Path;
use tokio::sync::mpsc;

/// Capability flags advertised by a camera implementation.
#[derive(Debug, Clone, Default)]
pub struct CameraCapabilities {
    /// Supports synchronous single-frame grabs.
    pub can_grab_single: bool,
    /// Supports live asynchronous acquisition.
    pub can_grab_continuous: bool,
    /// Can save and load its parameter set to a file.
    pub can_save_parameters_to_file: bool,
    /// Can save its parameter set to device memory.
    pub can_save_parameters_to_device: bool,
}

/// A frame delivered during continuous acquisition, tagged with the name of
/// the camera that produced it.
#[derive(Debug)]
pub struct GrabbedFrame {
    pub camera: String,
    pub image: ByteImage,
}

/// Receiving side of a camera's frame notification channel. One message is
/// delivered per acquired frame; ordering across cameras is not guaranteed.
pub type FrameReceiver = mpsc::Receiver<GrabbedFrame>;

/// Contract for a camera device.
///
/// A camera is Closed until `open` succeeds and Closed again after `close`.
/// While open it is idle unless continuous acquisition is running. Which
/// thread produces continuous frames is backend-defined; the contract only
/// guarantees one channel message per acquired frame.
pub trait Camera: Send {
    /// Name of the camera.
    fn name(&self) -> &str;

    /// Open the camera.
    fn open(&mut self) -> Result<(), CameraError>;

    /// True if the camera is open.
    fn is_open(&self) -> bool;

    /// Close the camera, stopping continuous acquisition if running.
    fn close(&mut self) -> Result<(), CameraError>;

    /// True while continuous acquisition is running.
    fn is_grabbing_continuous(&self) -> bool;

    /// Start live acquisition, returning the frame notification channel.
    ///
    /// # Errors
    ///
    /// Fails with `Unsupported` when `can_grab_continuous` is false,
    /// `NotOpen` when closed, and `Busy` when already live.
    fn start_grab_continuous(&mut self) -> Result<FrameReceiver, CameraError>;

    /// Stop live acquisition and close the frame channel.
    fn stop_grab_continuous(&mut self) -> Result<(), CameraError>;

    /// Synchronously grab a single frame.
    ///
    /// # Errors
    ///
    /// Fails with `Unsupported` when `can_grab_single` is false and
    /// `NotOpen` when closed.
    fn grab_single(&mut self) -> Result<ByteImage, CameraError>;

    /// Load the parameter set from a file. The file format is
    /// backend-defined.
    ///
    /// # Errors
    ///
    /// Fails with `Unsupported` when `can_save_parameters_to_file` is false.
    fn load_parameters(&mut self, path: &Path) -> Result<(), CameraError>;

    /// Save the parameter set to a file.
    ///
    /// # Errors
    ///
    /// Fails with `Unsupported` when `can_save_parameters_to_file` is false.
    fn save_parameters(&self, path: &Path) -> Result<(), CameraError>;

    /// Save the parameter set to device memory.
    ///
    /// # Errors
    ///
    /// Fails with `Unsupported` when `can_save_parameters_to_device` is
    /// false.
    fn save_parameters_to_device(&mut self) -> Result<(), CameraError>;

    /// Capabilities of this camera.
    fn capabilities(&self) -> CameraCapabilities;

    /// All parameters of this camera.
    fn parameters(&self) -> &[CameraParameter];

    /// Name of the provider that owns this camera.
    fn provider_name(&self) -> &str;
}

/// Contract for a camera provider.
///
/// The provider owns its discovered cameras. `discover` replaces the cached
/// set; the exclusive borrow means handles into the previous set cannot be
/// kept across a re-scan.
pub trait CameraProvider {
    /// Name of the provider.
    fn name(&self) -> &str;

    /// Re-scan for available devices and return the refreshed set.
    fn discover(&mut self) -> Result<&mut [Box<dyn Camera>], CameraError>;

    /// Current cached view, without triggering a new scan.
    fn cameras(&self) -> &[Box<dyn Camera>];

    /// Mutable access to the current cached view.
    fn cameras_mut(&mut self) -> &mut [Box<dyn Camera>];
}
