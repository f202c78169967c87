// File: crates/chartbuilder-core/src/window.rs
// Summary: Blocking preview window: blits a rendered RGBA frame via winit + softbuffer until closed.

use std::num::NonZeroU32;

use image::RgbaImage;
use log::debug;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use crate::error::{ChartError, Result};

fn display_err(err: impl std::fmt::Display) -> ChartError {
    ChartError::Display(err.to_string())
}

/// Open a window showing `frame` and return once it is closed.
pub fn show(title: &str, frame: &RgbaImage) -> Result<()> {
    let (fw, fh) = frame.dimensions();
    // softbuffer pixels are 0RGB.
    let pixels: Vec<u32> = frame
        .pixels()
        .map(|p| {
            let [r, g, b, _] = p.0;
            (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        })
        .collect();

    let mut event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(fw, fh))
        .with_resizable(false)
        .build(&event_loop)
        .map_err(display_err)?;
    let context = unsafe { softbuffer::Context::new(&window) }.map_err(display_err)?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.map_err(display_err)?;

    let mut failure = None;
    event_loop.run_return(|event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event: WindowEvent::CloseRequested, window_id } if window_id == window.id() => {
                *cf = ControlFlow::Exit;
            }
            Event::RedrawRequested(_) => {
                if let Err(err) = blit(&mut surface, &window, &pixels, fw as usize, fh as usize) {
                    failure = Some(err);
                    *cf = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
    debug!("preview window `{title}` closed");
    failure.map_or(Ok(()), Err)
}

/// Copy the frame into the window buffer at 1:1, clipped to the window and padded with white.
fn blit(surface: &mut softbuffer::Surface, window: &Window, pixels: &[u32], fw: usize, fh: usize) -> Result<()> {
    let size = window.inner_size();
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(display_err)?;
    let mut buffer = surface.buffer_mut().map_err(display_err)?;
    buffer.fill(0x00FF_FFFF);
    let (ww, wh) = (size.width as usize, size.height as usize);
    let cols = ww.min(fw);
    for y in 0..wh.min(fh) {
        buffer[y * ww..y * ww + cols].copy_from_slice(&pixels[y * fw..y * fw + cols]);
    }
    buffer.present().map_err(display_err)
}
