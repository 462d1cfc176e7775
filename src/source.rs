// Getting the image to mask in, and the finished mask out.

use std::path::Path;

use log::info;

use inpaint_mask::error::Error;
use inpaint_mask::types::{FrameBuffer, MaskBitmap};

/// Decode any format `image` understands and pack it for the window.
pub fn load_image(path: &Path) -> Result<FrameBuffer, Error> {
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.display().to_string(),
        source,
    })?;
    let rgb = img.to_rgb8();
    info!("loaded {} ({}x{})", path.display(), rgb.width(), rgb.height());
    Ok(FrameBuffer::from_rgb(&rgb))
}

/// Write the mask as an 8-bit grayscale image; format follows the extension.
pub fn save_mask(mask: &MaskBitmap, path: &Path) -> Result<(), Error> {
    mask.to_gray_image().save(path).map_err(|source| Error::ImageSave {
        path: path.display().to_string(),
        source,
    })?;
    info!("wrote {}x{} mask to {}", mask.width(), mask.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inpaint_mask::MaskEngine;

    #[test]
    fn mask_round_trips_through_png() {
        let dir = std::env::temp_dir().join(format!("inpaint-mask-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mask.png");

        let mut engine = MaskEngine::new();
        engine.begin_stroke((0.0, 10.0));
        engine.extend_stroke((63.0, 10.0));
        let mask = engine.finalize(64, 48).unwrap();
        save_mask(&mask, &path).unwrap();

        let back = load_image(&path).unwrap();
        assert_eq!((back.width, back.height), (64, 48));
        assert_eq!(back.pixels[10 * 64 + 32], 0x00FF_FFFF);
        assert_eq!(back.pixels[47 * 64 + 32], 0);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }
}
