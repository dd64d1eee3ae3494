//! In-memory camera backend producing synthetic frames.
//!
//! Useful for wiring and testing applications against the [`Camera`] and
//! [`CameraProvider`] contracts without hardware attached.

use crate::{
    Camera, CameraCapabilities, CameraError, CameraParameter, CameraProvider, FrameReceiver,
    GrabbedFrame, ParameterValue,
};
use log::{debug, error, info};
use lumen_image::{ByteImage, ChannelDepth, ImageError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc;

/// Backing storage the parameter closures and the capture thread share.
struct MockState {
    exposure: i64,
    gain: f64,
    trigger_mode: String,
}

/// Running continuous acquisition.
struct Live {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Camera implementation backed by synthetic frames.
pub struct MockCamera {
    name: String,
    provider: String,
    width: u32,
    height: u32,
    fps: u32,
    capabilities: CameraCapabilities,
    state: Arc<Mutex<MockState>>,
    parameters: Vec<CameraParameter>,
    open: bool,
    sequence: u64,
    live: Option<Live>,
    device_store: Option<HashMap<String, ParameterValue>>,
}

impl std::fmt::Debug for MockCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCamera")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fps", &self.fps)
            .field("open", &self.open)
            .field("live", &self.live.is_some())
            .finish()
    }
}

fn lock_state(state: &Arc<Mutex<MockState>>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn build_parameters(state: &Arc<Mutex<MockState>>) -> Vec<CameraParameter> {
    let mut parameters = Vec::new();

    let get = Arc::clone(state);
    let set = Arc::clone(state);
    parameters.push(CameraParameter::writable(
        "Exposure",
        move || ParameterValue::Int(lock_state(&get).exposure),
        move |value| match value {
            ParameterValue::Int(exposure) => {
                lock_state(&set).exposure = exposure;
                Ok(())
            }
            other => Err(CameraError::Parse(format!(
                "Exposure expects an integer, got {} '{other}'",
                other.tag()
            ))),
        },
    ));

    let get = Arc::clone(state);
    let set = Arc::clone(state);
    parameters.push(CameraParameter::writable(
        "Gain",
        move || ParameterValue::Float(lock_state(&get).gain),
        move |value| match value {
            ParameterValue::Float(gain) => {
                lock_state(&set).gain = gain;
                Ok(())
            }
            other => Err(CameraError::Parse(format!(
                "Gain expects a float, got {} '{other}'",
                other.tag()
            ))),
        },
    ));

    parameters.push(CameraParameter::new("Model", || {
        ParameterValue::Str("Lumen Mock HD".to_string())
    }));

    let get = Arc::clone(state);
    let set = Arc::clone(state);
    parameters.push(
        CameraParameter::writable(
            "TriggerMode",
            move || ParameterValue::Str(lock_state(&get).trigger_mode.clone()),
            move |value| match value {
                ParameterValue::Str(mode) if mode == "Off" || mode == "On" => {
                    lock_state(&set).trigger_mode = mode;
                    Ok(())
                }
                other => Err(CameraError::Parse(format!(
                    "TriggerMode must be Off or On, got '{other}'"
                ))),
            },
        )
        .with_legal_values(vec![
            ParameterValue::Str("Off".to_string()),
            ParameterValue::Str("On".to_string()),
        ]),
    );

    parameters
}

/// Deterministic BGR gradient mixed with the frame sequence and exposure.
fn synth_frame(
    width: u32,
    height: u32,
    exposure: i64,
    sequence: u64,
) -> Result<ByteImage, ImageError> {
    let step = width as usize * 3;
    let mut data = vec![0u8; step * height as usize];
    let shade = exposure.clamp(0, 255) as u8;

    for y in 0..height as usize {
        for x in 0..width as usize {
            let i = y * step + x * 3;
            let v = (x + y + sequence as usize) as u8;
            data[i] = v;
            data[i + 1] = v.wrapping_add(shade);
            data[i + 2] = 255 - v;
        }
    }

    ByteImage::new(width, height, 3, ChannelDepth::Depth8, data, step)
}

impl MockCamera {
    pub fn new(name: impl Into<String>, provider: impl Into<String>) -> Self {
        let state = Arc::new(Mutex::new(MockState {
            exposure: 100,
            gain: 1.0,
            trigger_mode: "Off".to_string(),
        }));
        let parameters = build_parameters(&state);

        Self {
            name: name.into(),
            provider: provider.into(),
            width: 640,
            height: 480,
            fps: 30,
            capabilities: CameraCapabilities {
                can_grab_single: true,
                can_grab_continuous: true,
                can_save_parameters_to_file: true,
                can_save_parameters_to_device: true,
            },
            state,
            parameters,
            open: false,
            sequence: 0,
            live: None,
            device_store: None,
        }
    }

    /// Set the frame resolution in pixels.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the continuous acquisition frame rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Override the advertised capabilities.
    pub fn with_capabilities(mut self, capabilities: CameraCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Parameter set last saved to device memory, if any.
    pub fn device_parameters(&self) -> Option<&HashMap<String, ParameterValue>> {
        self.device_store.as_ref()
    }

    /// Background thread loop producing frames until stopped or the
    /// receiver is dropped.
    fn capture_loop(
        name: String,
        width: u32,
        height: u32,
        fps: u32,
        state: Arc<Mutex<MockState>>,
        stop: Arc<AtomicBool>,
        tx: mpsc::Sender<GrabbedFrame>,
    ) {
        let interval = Duration::from_millis(u64::from(1000 / fps.max(1)));
        let mut sequence = 0u64;

        while !stop.load(Ordering::Relaxed) {
            sequence += 1;
            let exposure = lock_state(&state).exposure;

            let image = match synth_frame(width, height, exposure, sequence) {
                Ok(image) => image,
                Err(e) => {
                    error!("frame synthesis failed: {e}");
                    break;
                }
            };

            let frame = GrabbedFrame {
                camera: name.clone(),
                image,
            };
            // Receiver dropped means nobody is listening - exit thread
            if tx.blocking_send(frame).is_err() {
                break;
            }

            thread::sleep(interval);
        }
    }

    fn stop_live(&mut self) -> Result<(), CameraError> {
        let live = self
            .live
            .take()
            .ok_or_else(|| CameraError::Stream("continuous acquisition is not running".into()))?;

        live.stop.store(true, Ordering::Relaxed);
        live.handle
            .join()
            .map_err(|_| CameraError::Stream("capture thread panicked".into()))?;

        info!("camera '{}' stopped continuous acquisition", self.name);
        Ok(())
    }
}

impl Camera for MockCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<(), CameraError> {
        if !self.open {
            self.open = true;
            info!("camera '{}' opened", self.name);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) -> Result<(), CameraError> {
        if self.live.is_some() {
            self.stop_live()?;
        }
        if self.open {
            self.open = false;
            info!("camera '{}' closed", self.name);
        }
        Ok(())
    }

    fn is_grabbing_continuous(&self) -> bool {
        self.live.is_some()
    }

    fn start_grab_continuous(&mut self) -> Result<FrameReceiver, CameraError> {
        if !self.capabilities.can_grab_continuous {
            return Err(CameraError::Unsupported("continuous acquisition".into()));
        }
        if !self.open {
            return Err(CameraError::NotOpen);
        }
        if self.live.is_some() {
            return Err(CameraError::Busy(
                "continuous acquisition is already running".into(),
            ));
        }

        let (tx, rx) = mpsc::channel(4);
        let stop = Arc::new(AtomicBool::new(false));

        let name = self.name.clone();
        let (width, height, fps) = (self.width, self.height, self.fps);
        let state = Arc::clone(&self.state);
        let thread_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            Self::capture_loop(name, width, height, fps, state, thread_stop, tx);
        });

        self.live = Some(Live { stop, handle });
        info!("camera '{}' started continuous acquisition", self.name);
        Ok(rx)
    }

    fn stop_grab_continuous(&mut self) -> Result<(), CameraError> {
        self.stop_live()
    }

    fn grab_single(&mut self) -> Result<ByteImage, CameraError> {
        if !self.capabilities.can_grab_single {
            return Err(CameraError::Unsupported("single-frame grab".into()));
        }
        if !self.open {
            return Err(CameraError::NotOpen);
        }
        if self.live.is_some() {
            return Err(CameraError::Busy(
                "continuous acquisition is running".into(),
            ));
        }

        self.sequence += 1;
        let exposure = lock_state(&self.state).exposure;
        debug!("camera '{}' grabbing frame {}", self.name, self.sequence);
        Ok(synth_frame(self.width, self.height, exposure, self.sequence)?)
    }

    fn load_parameters(&mut self, path: &Path) -> Result<(), CameraError> {
        if !self.capabilities.can_save_parameters_to_file {
            return Err(CameraError::Unsupported(
                "parameter persistence to file".into(),
            ));
        }

        let text = fs::read_to_string(path)?;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, value) = line
                .split_once('=')
                .ok_or_else(|| CameraError::Parse(format!("malformed parameter line: {line}")))?;

            let Some(parameter) = self.parameters.iter().find(|p| p.name() == name) else {
                debug!("ignoring unknown parameter '{name}'");
                continue;
            };
            if parameter.is_read_only() {
                continue;
            }

            let parsed = parameter.value().parse_like(value)?;
            parameter.set_value(parsed)?;
        }

        info!("camera '{}' loaded parameters from {path:?}", self.name);
        Ok(())
    }

    fn save_parameters(&self, path: &Path) -> Result<(), CameraError> {
        if !self.capabilities.can_save_parameters_to_file {
            return Err(CameraError::Unsupported(
                "parameter persistence to file".into(),
            ));
        }

        let mut out = String::new();
        for parameter in &self.parameters {
            out.push_str(&format!("{}={}\n", parameter.name(), parameter.value()));
        }
        fs::write(path, out)?;

        info!("camera '{}' saved parameters to {path:?}", self.name);
        Ok(())
    }

    fn save_parameters_to_device(&mut self) -> Result<(), CameraError> {
        if !self.capabilities.can_save_parameters_to_device {
            return Err(CameraError::Unsupported(
                "parameter persistence to device".into(),
            ));
        }

        let snapshot = self
            .parameters
            .iter()
            .map(|p| (p.name().to_string(), p.value()))
            .collect();
        self.device_store = Some(snapshot);

        info!("camera '{}' saved parameters to device memory", self.name);
        Ok(())
    }

    fn capabilities(&self) -> CameraCapabilities {
        self.capabilities.clone()
    }

    fn parameters(&self) -> &[CameraParameter] {
        &self.parameters
    }

    fn provider_name(&self) -> &str {
        &self.provider
    }
}

impl Drop for MockCamera {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            live.stop.store(true, Ordering::Relaxed);
            let _ = live.handle.join();
        }
    }
}

/// Provider enumerating a fixed number of mock cameras.
pub struct MockProvider {
    name: String,
    device_count: usize,
    cameras: Vec<Box<dyn Camera>>,
}

impl MockProvider {
    pub fn new(device_count: usize) -> Self {
        Self {
            name: "lumen-mock".to_string(),
            device_count,
            cameras: Vec::new(),
        }
    }
}

impl CameraProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn discover(&mut self) -> Result<&mut [Box<dyn Camera>], CameraError> {
        // Re-enumeration replaces the cached set; the exclusive borrow means
        // handles into the previous set cannot be kept across a scan.
        self.cameras = (0..self.device_count)
            .map(|i| {
                Box::new(MockCamera::new(format!("mock-{i}"), self.name.clone()))
                    as Box<dyn Camera>
            })
            .collect();

        info!(
            "provider '{}' discovered {} camera(s)",
            self.name, self.device_count
        );
        Ok(&mut self.cameras[..])
    }

    fn cameras(&self) -> &[Box<dyn Camera>] {
        &self.cameras
    }

    fn cameras_mut(&mut self) -> &mut [Box<dyn Camera>] {
        &mut self.cameras
    }
}
