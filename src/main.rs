// What you SEE:
// • The source image (from --input or a --camera still), 1:1 in a window.
// • Hold Left Mouse and drag: a translucent white 40px stroke follows you.
// • ENTER turns the stroke into a black/white mask, shows it over the image
//   at half opacity and writes it to --output.
// • ESC drops the mask (back to drawing), C clears the stroke,
//   N grabs a new source image, Q quits.

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
mod camera;
mod config;
mod draw;
mod source;

use std::sync::Arc;

use clap::Parser;
use config::Args;
use draw::{Command, Drawer, draw_crosshair, draw_ring, draw_text_5x7};
use inpaint_mask::gamma::GammaLut;
use inpaint_mask::gesture::{DragEvent, DragTracker};
use inpaint_mask::preview::{self, PreviewCache, STROKE_PREVIEW_OPACITY, WHITE};
use inpaint_mask::worker::{self, PendingMask};
use inpaint_mask::{EditingSession, EditingState, Error, FrameBuffer, SessionError, STROKE_WIDTH};
use log::{error, info, warn};
use source::{load_image, save_mask};

const TITLE: &str = "Mask Painter";
const BACKDROP: u32 = 0x00_20_20_20;
const HUD_COLOR: u32 = 0x00_FF_FF_FF;
const CURSOR_COLOR: u32 = 0x00_FF_CC_33;

fn load_source(args: &Args) -> Result<FrameBuffer, Error> {
    if let Some(path) = &args.input {
        return load_image(path);
    }
    let Some(index) = args.camera else {
        return Err(Error::NoSource);
    };
    let (w, h) = args.resolution;
    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    {
        camera::capture_still(index, w, h)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        Err(Error::CameraInit(format!("camera {index} ({w}x{h}): no backend on this platform")))
    }
}

/// Loading -> ImageGenerated, or Loading -> Error if the source is unavailable.
fn acquire_source(args: &Args, session: &mut EditingSession) -> Result<(), SessionError> {
    session.request_image()?;
    match load_source(args) {
        Ok(frame) => session.image_ready(Arc::new(frame)),
        Err(e) => {
            error!("{e}");
            session.image_failed(e.to_string())
        }
    }
}

/// Illegal actions are user noise, not failures: they are logged by the session.
fn ignore_illegal(result: Result<(), SessionError>) {
    if let Err(e) = result {
        info!("ignored: {e}");
    }
}

fn hud_text(state: &EditingState, drawing: bool, pending: bool) -> String {
    match state {
        EditingState::Initial => "NO IMAGE | N: LOAD  Q: QUIT".to_string(),
        EditingState::Loading => "LOADING...".to_string(),
        EditingState::ImageGenerated { .. } if pending => "MASKING...  ESC: CANCEL".to_string(),
        EditingState::ImageGenerated { .. } if drawing => "DRAWING".to_string(),
        EditingState::ImageGenerated { .. } => {
            "DRAW | ENTER: MASK  C: CLEAR  N: NEW  Q: QUIT".to_string()
        }
        EditingState::ImageMasked { .. } => {
            "MASKED | ESC: REDRAW  DRAG: NEW REGION  N: NEW".to_string()
        }
        EditingState::Error { message } => format!("ERROR: {message} | N: RETRY"),
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    /* --- Source image + session ---
       Visual: nothing yet; without a first image there is no window size. */
    let mut session = EditingSession::new(args.stroke_mode());
    session.request_image()?;
    let first = Arc::new(load_source(&args)?);
    let (w, h) = (first.width, first.height);
    session.image_ready(first)?;

    let mut drawer = Drawer::new(TITLE, w, h)?;
    let mut screen = FrameBuffer::filled(w, h, BACKDROP);
    let lut = GammaLut::new();
    let mut preview_cache = PreviewCache::new();
    let mut drag = DragTracker::new();
    let mut pending: Option<PendingMask> = None;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        /* 1) Keyboard commands */
        match drawer.command() {
            Some(Command::Quit) => break,
            Some(Command::Finalize) if pending.is_none() => {
                if session.state().can_draw() && !session.engine().is_empty() {
                    if args.background {
                        let (fw, fh) = screen.dimensions_i32();
                        pending = Some(worker::spawn_finalize(session.engine().snapshot(), fw, fh)?);
                    } else {
                        let mask = session.finalize_mask()?;
                        if let Err(e) = save_mask(&mask, &args.output) {
                            error!("{e}");
                        }
                    }
                } else {
                    info!("nothing to finalize");
                }
            }
            Some(Command::Finalize) => {} // already rasterizing
            Some(Command::Cancel) => {
                if let Some(job) = pending.take() {
                    job.cancel();
                    info!("discarded in-flight mask (rev {})", job.revision());
                }
                ignore_illegal(session.cancel_masking());
            }
            Some(Command::Clear) => session.clear_path(),
            Some(Command::NewImage) => {
                if let Some(job) = pending.take() {
                    job.cancel();
                }
                ignore_illegal(acquire_source(&args, &mut session));
                if let Some(src) = session.state().source() {
                    if (src.width, src.height) != (screen.width, screen.height) {
                        // New size: reopen so pointer coordinates stay 1:1.
                        drawer = Drawer::new(TITLE, src.width, src.height)?;
                        screen = FrameBuffer::filled(src.width, src.height, BACKDROP);
                    }
                }
            }
            None => {}
        }

        /* 2) Pointer drags -> engine
           Visual: the stroke preview grows under the cursor. */
        if pending.is_none() {
            match drag.update(drawer.left_mouse_down(), drawer.pointer()) {
                Some(DragEvent::Start(p)) => {
                    if matches!(session.state(), EditingState::ImageMasked { .. }) {
                        ignore_illegal(session.select_image());
                    }
                    ignore_illegal(session.begin_stroke(p));
                }
                Some(DragEvent::Move(p)) => ignore_illegal(session.extend_stroke(p)),
                Some(DragEvent::End) | None => {}
            }
        }

        /* 3) Background mask finished? Stale results (path changed since) are dropped. */
        if let Some(job) = pending.as_mut() {
            let rev = job.revision();
            if let Some(result) = job.poll() {
                pending = None;
                match result {
                    Ok(mask) if rev == session.engine().revision() => {
                        let mask = session.accept_mask(mask)?;
                        if let Err(e) = save_mask(&mask, &args.output) {
                            error!("{e}");
                        }
                    }
                    Ok(_) => warn!("dropping mask for stale rev {rev}"),
                    Err(e) => warn!("background finalize: {e}"),
                }
            }
        }

        /* 4) Compose what you see: source, then stroke preview or mask overlay. */
        match session.state() {
            EditingState::ImageGenerated { source } => {
                screen.pixels.copy_from_slice(&source.pixels);
                let (fw, fh) = screen.dimensions_i32();
                if let Some(coverage) = preview_cache.coverage(session.engine(), fw, fh)? {
                    preview::composite_overlay(&mut screen, coverage, WHITE, STROKE_PREVIEW_OPACITY, &lut)?;
                }
            }
            EditingState::ImageMasked { source, mask } => {
                screen.pixels.copy_from_slice(&source.pixels);
                preview::composite_mask(&mut screen, mask, &lut)?;
            }
            EditingState::Initial | EditingState::Loading | EditingState::Error { .. } => {
                screen.pixels.fill(BACKDROP);
            }
        }

        /* 5) Cursor + HUD */
        if let Some(p) = drawer.pointer() {
            let (x, y) = (p.x as i32, p.y as i32);
            draw_crosshair(&mut screen, x, y, 8, CURSOR_COLOR);
            if session.state().can_draw() {
                draw_ring(&mut screen, x, y, (STROKE_WIDTH / 2.0) as i32, CURSOR_COLOR);
            }
        }
        let hud = hud_text(session.state(), drag.is_dragging(), pending.is_some());
        draw_text_5x7(&mut screen, 8, 8, &hud, HUD_COLOR);

        /* 6) Present */
        drawer.present(&screen)?;
    }

    Ok(())
}
