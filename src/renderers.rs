use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use error_chain::bail;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use log::info;

use crate::cells::CompassPrimary;
use crate::errors::*;
use crate::grid::Grid;

pub const DEFAULT_CELL_SIDE_PIXELS: u32 = 10;
pub const DEFAULT_WALL_THICKNESS_PIXELS: u32 = 2;
pub const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);
pub const DEFAULT_WALL: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderOptions {
    cell_side_pixels: u32,
    wall_thickness_pixels: u32,
    background: Rgba<u8>,
    wall: Rgba<u8>,
}

impl RenderOptions {
    #[inline]
    pub fn cell_side_pixels(&self) -> u32 {
        self.cell_side_pixels
    }

    #[inline]
    pub fn wall_thickness_pixels(&self) -> u32 {
        self.wall_thickness_pixels
    }

    #[inline]
    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    #[inline]
    pub fn wall(&self) -> Rgba<u8> {
        self.wall
    }
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptionsBuilder::new().build()
    }
}

#[derive(Debug)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels: DEFAULT_CELL_SIDE_PIXELS,
                wall_thickness_pixels: DEFAULT_WALL_THICKNESS_PIXELS,
                background: DEFAULT_BACKGROUND,
                wall: DEFAULT_WALL,
            },
        }
    }
    pub fn cell_side_pixels(mut self, length: u32) -> RenderOptionsBuilder {
        self.options.cell_side_pixels = length;
        self
    }
    pub fn wall_thickness_pixels(mut self, thickness: u32) -> RenderOptionsBuilder {
        self.options.wall_thickness_pixels = thickness;
        self
    }
    pub fn background(mut self, colour: Rgba<u8>) -> RenderOptionsBuilder {
        self.options.background = colour;
        self
    }
    pub fn wall(mut self, colour: Rgba<u8>) -> RenderOptionsBuilder {
        self.options.wall = colour;
        self
    }
    pub fn build(self) -> RenderOptions {
        self.options
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }
}

/// Parse a colour written as 8 hex digits `RRGGBBAA`, optionally prefixed by `#` or `0x`.
pub fn parse_rgba_hex(text: &str) -> Result<Rgba<u8>> {
    let digits = text.trim_start_matches('#').trim_start_matches("0x");
    if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!(ErrorKind::InvalidRenderOption(format!("'{}' is not an RRGGBBAA colour", text)));
    }
    let value = u32::from_str_radix(digits, 16)
        .chain_err(|| format!("'{}' is not an RRGGBBAA colour", text))?;
    Ok(Rgba(value.to_be_bytes()))
}

/// Size in pixels of the image for a grid, or an error if it cannot be represented.
fn image_dimensions(grid: &Grid, options: &RenderOptions) -> Result<(u32, u32)> {
    let cell = options.cell_side_pixels;
    if cell == 0 {
        bail!(ErrorKind::InvalidRenderOption(String::from("cell side must be at least 1 pixel")));
    }
    let side = |cells: usize| {
        (cells as u64)
            .checked_mul(u64::from(cell))
            .filter(|px| *px <= u64::from(u32::MAX))
            .map(|px| px as u32)
    };
    // 4 bytes per RGBA pixel
    let dimensions = side(grid.width()).zip(side(grid.height())).filter(|&(w, h)| {
        (u64::from(w) * u64::from(h))
            .checked_mul(4)
            .map_or(false, |bytes| bytes <= isize::MAX as u64)
    });

    match dimensions {
        Some(dimensions) => Ok(dimensions),
        None => {
            bail!(ErrorKind::InvalidRenderOption(format!("a {}x{} grid at {} pixels per cell is \
                                                          too large for an image",
                                                         grid.width(),
                                                         grid.height(),
                                                         cell)))
        }
    }
}

/// Fill a rectangle, clipped to the image.
fn draw_rect(img: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, colour: Rgba<u8>) {
    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + w).min(i64::from(img.width()));
    let y_end = (y + h).min(i64::from(img.height()));

    for cur_y in y_start..y_end {
        for cur_x in x_start..x_end {
            img.put_pixel(cur_x as u32, cur_y as u32, colour);
        }
    }
}

/// Rasterise the grid's walls.
///
/// Every standing wall of every cell becomes a bar `wall_thickness_pixels` thick, centred on the
/// cell's boundary line and stretched by the wall thickness so that neighbouring bars meet in a
/// mitred corner.
pub fn render_grid(grid: &Grid, options: &RenderOptions) -> Result<RgbaImage> {
    let (img_w, img_h) = image_dimensions(grid, options)?;
    let mut img = RgbaImage::from_pixel(img_w, img_h, options.background);

    let cell = i64::from(options.cell_side_pixels);
    let thick = i64::from(options.wall_thickness_pixels);
    let half = thick / 2;

    for pos in grid.iter() {
        let px_x = i64::from(pos.x) * cell;
        let px_y = i64::from(pos.y) * cell;

        for dir in grid.cell_at(pos).walls.iter() {
            let (x, y, w, h) = match dir {
                CompassPrimary::North => (px_x - half, px_y - half, cell + thick, thick),
                CompassPrimary::South => (px_x - half, px_y + cell - half, cell + thick, thick),
                CompassPrimary::West => (px_x - half, px_y - half, thick, cell + thick),
                CompassPrimary::East => (px_x + cell - half, px_y - half, thick, cell + thick),
            };
            draw_rect(&mut img, x, y, w, h, options.wall);
        }
    }

    Ok(img)
}

/// Encode as an 8 bit RGBA, non interlaced PNG.
pub fn encode_png<W: Write>(img: &RgbaImage, writer: W) -> Result<()> {
    PngEncoder::new(writer).write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)?;
    Ok(())
}

/// Render the grid and save it as a PNG file.
pub fn write_png<P: AsRef<Path>>(grid: &Grid, options: &RenderOptions, path: P) -> Result<()> {
    let path = path.as_ref();
    let img = render_grid(grid, options)?;

    info!("Writing {}x{} file...", img.width(), img.height());

    let file = File::create(path).chain_err(|| format!("Can't open file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    encode_png(&img, &mut writer).chain_err(|| format!("Failed to write PNG '{}'", path.display()))?;
    writer.flush()?;
    Ok(())
}
