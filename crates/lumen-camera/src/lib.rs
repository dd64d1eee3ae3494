//! Camera acquisition contracts for the lumen ecosystem.
//!
//! This crate defines the [`Camera`] and [`CameraProvider`] traits, the
//! named-parameter model built on [`CameraParameter`], and an in-memory
//! [`MockCamera`] backend for composing applications without hardware.
//! Frames are delivered as [`lumen_image::ByteImage`] values, either from a
//! synchronous single grab or through a per-camera notification channel
//! during continuous acquisition.

pub mod error;
pub mod mock;
pub mod parameter;
pub mod traits;

pub use error::CameraError;
pub use mock::{MockCamera, MockProvider};
pub use parameter::{CameraParameter, ParameterValue};
pub use traits::{Camera, CameraCapabilities, CameraProvider, FrameReceiver, GrabbedFrame};
