use lumen_base::log::debug;
use lumen_camera::{Camera, CameraProvider, MockProvider};
use lumen_image::EncodeFormat;
use std::fs::File;

const FRAME_COUNT: usize = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    lumen_base::init_stdout_logger();

    println!("Camera Dump");
    println!();

    let mut provider = MockProvider::new(2);
    let provider_name = provider.name().to_string();
    let cameras = provider.discover()?;
    println!("{} camera(s) discovered on '{provider_name}'", cameras.len());

    let camera = cameras.first_mut().ok_or("no cameras discovered")?;
    camera.open()?;
    println!("opened '{}'", camera.name());

    for parameter in camera.parameters() {
        let suffix = if parameter.is_read_only() {
            " (read-only)"
        } else {
            ""
        };
        println!("  {} = {}{suffix}", parameter.name(), parameter.value());
    }

    // Single grab, saved as PNG and as raw passthrough
    let image = camera.grab_single()?;
    println!(
        "grabbed {}x{} frame, {} channel(s)",
        image.width(),
        image.height(),
        image.channels()
    );

    let mut png = File::create("frame.png")?;
    image.save(&mut png, EncodeFormat::Png)?;
    let mut raw = File::create("frame.raw")?;
    image.save(&mut raw, EncodeFormat::Native)?;
    println!("saved frame.png and frame.raw");

    // Short continuous run
    let mut rx = camera.start_grab_continuous()?;
    let mut frames = 0;
    while frames < FRAME_COUNT {
        match rx.recv().await {
            Some(frame) => {
                frames += 1;
                debug!("frame {frames} from '{}'", frame.camera);
            }
            None => break,
        }
    }
    camera.stop_grab_continuous()?;
    println!("received {frames} continuous frames");

    camera.close()?;
    println!("done");
    Ok(())
}
