//! Canvas 2D backend

use std::collections::HashSet;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::draw_list::{DrawCommand, DrawList};
use super::resolve_image;
use crate::platform::assets::ImageSet;
use crate::sim::object::{Drawable, Rect};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: ImageSet,
    /// Drawables already reported missing
    warned: HashSet<Drawable>,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, images: ImageSet) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            ctx,
            images,
            warned: HashSet::new(),
        })
    }

    fn usable(&self, drawable: Drawable) -> Option<&HtmlImageElement> {
        self.images
            .get(&drawable)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    pub fn render(&mut self, list: &DrawList) {
        for command in list.commands() {
            match command {
                DrawCommand::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                }
                DrawCommand::Image {
                    drawable,
                    src,
                    dest,
                } => self.blit(*drawable, src.as_ref(), dest),
            }
        }
    }

    fn blit(&mut self, drawable: Drawable, src: Option<&Rect>, dest: &Rect) {
        let Some(chosen) = resolve_image(drawable, |d| self.usable(d).is_some()) else {
            if self.warned.insert(drawable) {
                log::warn!("No image for {:?}, skipping", drawable);
            }
            return;
        };
        if chosen != drawable && self.warned.insert(drawable) {
            log::warn!("No image for {:?}, using {:?}", drawable, chosen);
        }
        let Some(img) = self.usable(chosen) else {
            return;
        };

        let (dx, dy) = (dest.pos.x as f64, dest.pos.y as f64);
        let (dw, dh) = (dest.size.x as f64, dest.size.y as f64);
        let result = match src {
            Some(src) => self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img,
                    src.pos.x as f64,
                    src.pos.y as f64,
                    src.size.x as f64,
                    src.size.y as f64,
                    dx,
                    dy,
                    dw,
                    dh,
                ),
            None => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, dx, dy, dw, dh),
        };
        if let Err(e) = result {
            log::warn!("drawImage failed for {:?}: {:?}", chosen, e);
        }
    }
}
