use lumen_camera::{Camera, CameraError, MockCamera};
use std::time::Duration;
use tokio::time::timeout;

const RECV_DEADLINE: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_continuous_delivers_tagged_frames() {
    let mut camera = MockCamera::new("live-cam", "test-provider")
        .with_resolution(16, 16)
        .with_fps(200);
    camera.open().unwrap();

    let mut rx = camera.start_grab_continuous().unwrap();
    assert!(camera.is_grabbing_continuous());

    for _ in 0..3 {
        let frame = timeout(RECV_DEADLINE, rx.recv())
            .await
            .expect("frame within deadline")
            .expect("channel open");
        assert_eq!(frame.camera, "live-cam");
        assert_eq!(frame.image.width(), 16);
        assert_eq!(frame.image.height(), 16);
    }

    camera.stop_grab_continuous().unwrap();
    assert!(!camera.is_grabbing_continuous());
}

#[tokio::test]
async fn test_stop_closes_the_channel() {
    let mut camera = MockCamera::new("live-cam", "test-provider")
        .with_resolution(8, 8)
        .with_fps(200);
    camera.open().unwrap();

    let mut rx = camera.start_grab_continuous().unwrap();
    camera.stop_grab_continuous().unwrap();

    // Drain whatever was buffered before the stop; the channel then closes
    loop {
        match timeout(RECV_DEADLINE, rx.recv())
            .await
            .expect("recv within deadline")
        {
            Some(frame) => assert_eq!(frame.camera, "live-cam"),
            None => break,
        }
    }
}

#[tokio::test]
async fn test_start_while_live_is_busy() {
    let mut camera = MockCamera::new("live-cam", "test-provider").with_fps(200);
    camera.open().unwrap();

    let _rx = camera.start_grab_continuous().unwrap();
    assert!(matches!(
        camera.start_grab_continuous(),
        Err(CameraError::Busy(_))
    ));
    camera.stop_grab_continuous().unwrap();
}

#[tokio::test]
async fn test_grab_single_while_live_is_busy() {
    let mut camera = MockCamera::new("live-cam", "test-provider").with_fps(200);
    camera.open().unwrap();

    let _rx = camera.start_grab_continuous().unwrap();
    assert!(matches!(camera.grab_single(), Err(CameraError::Busy(_))));
    camera.stop_grab_continuous().unwrap();
}

#[tokio::test]
async fn test_dropping_receiver_ends_production() {
    let mut camera = MockCamera::new("live-cam", "test-provider").with_fps(200);
    camera.open().unwrap();

    let rx = camera.start_grab_continuous().unwrap();
    drop(rx);

    // The capture thread exits on its own; stop still joins it cleanly
    camera.stop_grab_continuous().unwrap();
    assert!(!camera.is_grabbing_continuous());
}

#[tokio::test]
async fn test_close_stops_live_acquisition() {
    let mut camera = MockCamera::new("live-cam", "test-provider").with_fps(200);
    camera.open().unwrap();

    let _rx = camera.start_grab_continuous().unwrap();
    camera.close().unwrap();

    assert!(!camera.is_open());
    assert!(!camera.is_grabbing_continuous());
}
