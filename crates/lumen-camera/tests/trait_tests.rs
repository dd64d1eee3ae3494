use lumen_camera::{Camera, CameraCapabilities, CameraError, MockCamera, ParameterValue};

fn find<'a>(camera: &'a MockCamera, name: &str) -> &'a lumen_camera::CameraParameter {
    camera
        .parameters()
        .iter()
        .find(|p| p.name() == name)
        .unwrap_or_else(|| panic!("no parameter named {name}"))
}

#[test]
fn test_open_close_lifecycle() {
    let mut camera = MockCamera::new("cam", "test-provider");

    assert!(!camera.is_open());
    camera.open().unwrap();
    assert!(camera.is_open());
    camera.close().unwrap();
    assert!(!camera.is_open());
}

#[test]
fn test_open_and_close_are_idempotent() {
    let mut camera = MockCamera::new("cam", "test-provider");

    camera.close().unwrap();
    camera.open().unwrap();
    camera.open().unwrap();
    assert!(camera.is_open());
    camera.close().unwrap();
    camera.close().unwrap();
    assert!(!camera.is_open());
}

#[test]
fn test_grab_single_requires_open() {
    let mut camera = MockCamera::new("cam", "test-provider");

    assert!(matches!(camera.grab_single(), Err(CameraError::NotOpen)));
}

#[test]
fn test_grab_single_geometry_matches_resolution() {
    let mut camera = MockCamera::new("cam", "test-provider").with_resolution(32, 24);
    camera.open().unwrap();

    let image = camera.grab_single().unwrap();
    assert_eq!(image.width(), 32);
    assert_eq!(image.height(), 24);
    assert_eq!(image.channels(), 3);
    assert_eq!(image.step(), 32 * 3);
}

#[test]
fn test_grab_single_frames_differ_by_sequence() {
    let mut camera = MockCamera::new("cam", "test-provider").with_resolution(8, 8);
    camera.open().unwrap();

    let first = camera.grab_single().unwrap();
    let second = camera.grab_single().unwrap();
    assert_ne!(first.data(), second.data());
}

#[test]
fn test_capability_flags_gate_operations() {
    let mut camera = MockCamera::new("cam", "test-provider")
        .with_capabilities(CameraCapabilities::default());
    camera.open().unwrap();

    assert!(matches!(
        camera.grab_single(),
        Err(CameraError::Unsupported(_))
    ));
    assert!(matches!(
        camera.start_grab_continuous(),
        Err(CameraError::Unsupported(_))
    ));
    assert!(matches!(
        camera.save_parameters(std::path::Path::new("unused")),
        Err(CameraError::Unsupported(_))
    ));
    assert!(matches!(
        camera.load_parameters(std::path::Path::new("unused")),
        Err(CameraError::Unsupported(_))
    ));
    assert!(matches!(
        camera.save_parameters_to_device(),
        Err(CameraError::Unsupported(_))
    ));
}

#[test]
fn test_default_capabilities_are_all_advertised() {
    let camera = MockCamera::new("cam", "test-provider");
    let caps = camera.capabilities();

    assert!(caps.can_grab_single);
    assert!(caps.can_grab_continuous);
    assert!(caps.can_save_parameters_to_file);
    assert!(caps.can_save_parameters_to_device);
}

#[test]
fn test_start_continuous_requires_open() {
    let mut camera = MockCamera::new("cam", "test-provider");

    assert!(matches!(
        camera.start_grab_continuous(),
        Err(CameraError::NotOpen)
    ));
}

#[test]
fn test_stop_continuous_when_idle_is_an_error() {
    let mut camera = MockCamera::new("cam", "test-provider");
    camera.open().unwrap();

    assert!(matches!(
        camera.stop_grab_continuous(),
        Err(CameraError::Stream(_))
    ));
}

#[test]
fn test_exposure_parameter_drives_frame_content() {
    let mut camera = MockCamera::new("cam", "test-provider").with_resolution(8, 8);
    camera.open().unwrap();

    let baseline = camera.grab_single().unwrap();

    find(&camera, "Exposure")
        .set_value(ParameterValue::Int(200))
        .unwrap();

    let brighter = camera.grab_single().unwrap();
    assert_ne!(baseline.data(), brighter.data());
}

#[test]
fn test_model_parameter_is_read_only() {
    let camera = MockCamera::new("cam", "test-provider");
    let model = find(&camera, "Model");

    assert!(model.is_read_only());
    assert_eq!(
        model.value(),
        ParameterValue::Str("Lumen Mock HD".to_string())
    );
    assert!(matches!(
        model.set_value(ParameterValue::Str("Other".to_string())),
        Err(CameraError::ReadOnly(_))
    ));
}

#[test]
fn test_trigger_mode_rejects_values_outside_enumeration() {
    let camera = MockCamera::new("cam", "test-provider");
    let trigger = find(&camera, "TriggerMode");

    assert_eq!(trigger.legal_values().len(), 2);
    trigger
        .set_value(ParameterValue::Str("On".to_string()))
        .unwrap();
    assert!(matches!(
        trigger.set_value(ParameterValue::Str("Sometimes".to_string())),
        Err(CameraError::Parse(_))
    ));
    assert_eq!(trigger.value(), ParameterValue::Str("On".to_string()));
}

#[test]
fn test_provider_name_back_reference() {
    let camera = MockCamera::new("cam", "test-provider");
    assert_eq!(camera.provider_name(), "test-provider");
}
