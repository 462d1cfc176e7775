// Grabs one still frame from a webcam to use as the image to mask.

use log::info;
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution},
};

use inpaint_mask::error::Error;
use inpaint_mask::types::FrameBuffer;

/// Frames thrown away before the still is taken; the first few frames from
/// most webcams are dark while exposure settles.
const WARMUP_FRAMES: usize = 10;

/// Open camera `index`, let exposure settle, and return one RGB frame.
pub fn capture_still(index: u32, width: u32, height: u32) -> Result<FrameBuffer, Error> {
    let fmt = CameraFormat::new(Resolution::new(width, height), FrameFormat::YUYV, 30);
    let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

    let mut cam = Camera::new(CameraIndex::Index(index), req)
        .map_err(|e| Error::CameraInit(format!("create camera {index}: {e}")))?;
    cam.open_stream()
        .map_err(|e| Error::CameraInit(format!("open stream: {e}")))?;

    for _ in 0..WARMUP_FRAMES {
        cam.frame()
            .map_err(|e| Error::CameraFrame(format!("warm-up frame: {e}")))?;
    }
    let frame = cam
        .frame()
        .map_err(|e| Error::CameraFrame(format!("fetch frame: {e}")))?;
    let rgb = frame
        .decode_image::<RgbFormat>()
        .map_err(|e| Error::CameraFrame(format!("decode RGB: {e}")))?;

    // Release the device; the still is all we need.
    if let Err(e) = cam.stop_stream() {
        log::warn!("stop camera stream: {e}");
    }

    // Packed by hand: nokhwa's ImageBuffer may come from a different `image` release.
    let (w, h) = rgb.dimensions();
    let pixels = rgb
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    info!("captured {w}x{h} still from camera {index}");
    Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
}
