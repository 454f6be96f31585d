//! Procedural surface textures for the satellite.
//!
//! The gold foil and the solar cell grid are painted into an
//! [`image::RgbaImage`] on the CPU, then handed to Bevy as images. Only the
//! shape rasterisation (rectangles, thick lines, bezier strokes, discs) lives
//! here; blending and gradients come from the `image` crate.

use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::{Pixel, Rgba, RgbaImage, imageops};
use rand::Rng;

/// Side length of the generated textures in pixels.
pub const TEXTURE_SIZE: u32 = 512;

/// Errors from procedural texture generation.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TextureError {
    #[error("cannot paint a {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("canvas of {width}x{height} pixels is too large")]
    TooLarge { width: u32, height: u32 },
}

/// Opaque color from 8-bit channels.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// `color` with its alpha replaced by `alpha` in `[0, 1]`.
pub fn with_alpha(color: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let Rgba([r, g, b, _]) = color;
    Rgba([r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8])
}

/// Transparent canvas of the given size.
pub fn canvas(width: u32, height: u32) -> Result<RgbaImage, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::EmptyCanvas { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(TextureError::TooLarge { width, height })?;
    Ok(RgbaImage::new(width, height))
}

/// Canvas filled with a gradient along the main diagonal.
///
/// `stops` are `(t, color)` pairs with `t` ascending in `[0, 1]`.
pub fn diagonal_gradient(
    width: u32,
    height: u32,
    stops: &[(f32, Rgba<u8>)],
) -> Result<RgbaImage, TextureError> {
    canvas(width, height)?;

    // One pixel per diagonal, sampled at x + y
    let span = width + height - 1;
    let mut ramp = RgbaImage::new(span, 1);
    let last = (span - 1) as f32;
    if let Some(&(_, first)) = stops.first() {
        imageops::replace(&mut ramp, &RgbaImage::from_pixel(span, 1, first), 0, 0);
    }
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        let start = (t0.clamp(0.0, 1.0) * last).round() as u32;
        let end = (t1.clamp(0.0, 1.0) * last).round() as u32;
        if end <= start {
            continue;
        }
        let mut segment = RgbaImage::new(end - start + 1, 1);
        imageops::horizontal_gradient(&mut segment, &c0, &c1);
        imageops::replace(&mut ramp, &segment, start as i64, 0);
    }
    if let Some(&(t, color)) = stops.last() {
        let from = (t.clamp(0.0, 1.0) * last).round() as u32;
        for x in from..span {
            ramp.put_pixel(x, 0, color);
        }
    }

    Ok(RgbaImage::from_fn(width, height, |x, y| *ramp.get_pixel(x + y, 0)))
}

/// Source-over blend into one pixel; coordinates off the canvas are ignored.
fn blend(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if let Some(pixel) = image.get_pixel_mut_checked(x, y) {
        pixel.blend(&color);
    }
}

/// Blend a rectangle; fractional edges are floored/ceiled.
pub fn fill_rect(image: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    for py in y.floor() as i64..(y + h).ceil() as i64 {
        for px in x.floor() as i64..(x + w).ceil() as i64 {
            blend(image, px, py, color);
        }
    }
}

/// Stroke a straight line of the given width.
pub fn stroke_line(image: &mut RgbaImage, from: Vec2, to: Vec2, width: f32, color: Rgba<u8>) {
    let steps = from.distance(to).ceil().max(1.0) as usize;
    for i in 0..=steps {
        stamp(image, from.lerp(to, i as f32 / steps as f32), width * 0.5, color);
    }
}

/// Stroke a cubic bezier curve.
pub fn stroke_bezier(image: &mut RgbaImage, points: [Vec2; 4], width: f32, color: Rgba<u8>) {
    let [p0, p1, p2, p3] = points;
    let length = p0.distance(p1) + p1.distance(p2) + p2.distance(p3);
    let steps = length.ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let u = 1.0 - t;
        let p = p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t);
        stamp(image, p, width * 0.5, color);
    }
}

/// Fill a disc centered at `center`.
pub fn fill_circle(image: &mut RgbaImage, center: Vec2, radius: f32, color: Rgba<u8>) {
    stamp(image, center, radius, color);
}

/// Blend every pixel whose center lies within `radius` of `center`.
fn stamp(image: &mut RgbaImage, center: Vec2, radius: f32, color: Rgba<u8>) {
    let radius = radius.max(0.5);
    let r2 = radius * radius;
    let (x0, x1) = ((center.x - radius).floor() as i64, (center.x + radius).ceil() as i64);
    let (y0, y1) = ((center.y - radius).floor() as i64, (center.y + radius).ceil() as i64);
    for py in y0..=y1 {
        for px in x0..=x1 {
            let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - center;
            if d.length_squared() <= r2.max(0.5) {
                blend(image, px, py, color);
            }
        }
    }
}

/// Wrinkled gold foil: metallic gradient, specks of glare and dark creases.
pub fn paint_foil(size: u32, rng: &mut impl Rng) -> Result<RgbaImage, TextureError> {
    let mut foil = diagonal_gradient(
        size,
        size,
        &[
            (0.0, rgb(0xff, 0xd7, 0x00)),
            (0.5, rgb(0xf5, 0xc5, 0x00)),
            (1.0, rgb(0xe6, 0xb8, 0x00)),
        ],
    )?;
    let s = size as f32;

    for _ in 0..2000 {
        let x = rng.gen_range(0.0..s);
        let y = rng.gen_range(0.0..s);
        let speck = rng.gen_range(0.0..2.0);
        let white = with_alpha(rgb(255, 255, 255), rng.gen_range(0.0..0.2));
        fill_rect(&mut foil, x, y, speck, speck, white);
    }

    for _ in 0..60 {
        let crease = with_alpha(rgb(0, 0, 0), rng.gen_range(0.0..0.15));
        let width = rng.gen_range(0.0..1.5);
        let mut point = || Vec2::new(rng.gen_range(0.0..s), rng.gen_range(0.0..s));
        let points = [point(), point(), point(), point()];
        stroke_bezier(&mut foil, points, width, crease);
    }

    Ok(foil)
}

/// Solar cell grid: navy cells with busbars, a glare strip, frame and bolts.
pub fn paint_solar_grid(size: u32, rng: &mut impl Rng) -> Result<RgbaImage, TextureError> {
    let mut grid = diagonal_gradient(
        size,
        size,
        &[(0.0, rgb(0x05, 0x12, 0x2b)), (1.0, rgb(0x0b, 0x1d, 0x40))],
    )?;
    let s = size as f32;
    let cell = (size / 8).max(8);
    let cell_f = cell as f32;

    let busbar = with_alpha(rgb(200, 200, 255), 0.3);
    let glare = with_alpha(rgb(255, 255, 255), 0.05);

    for cx in (0..size).step_by(cell as usize) {
        for cy in (0..size).step_by(cell as usize) {
            let (x, y) = (cx as f32, cy as f32);

            let blue = (40.0 + rng.gen_range(-10.0..10.0f32)).round() as u8;
            fill_rect(&mut grid, x + 2.0, y + 2.0, cell_f - 4.0, cell_f - 4.0, rgb(10, 20, blue));

            let mut k = 10.0;
            while k < cell_f - 4.0 {
                stroke_line(
                    &mut grid,
                    Vec2::new(x + k, y + 2.0),
                    Vec2::new(x + k, y + cell_f - 2.0),
                    1.0,
                    busbar,
                );
                k += 10.0;
            }

            fill_rect(&mut grid, x + 2.0, y + 2.0, cell_f - 4.0, (cell_f - 4.0) * 0.3, glare);
        }
    }

    let frame = rgb(0x1a, 0x1a, 0x1a);
    let bolt = rgb(0x55, 0x55, 0x55);
    let lines: Vec<f32> = (0..=size).step_by(cell as usize).map(|i| i as f32).collect();

    for &i in &lines {
        stroke_line(&mut grid, Vec2::new(i, 0.0), Vec2::new(i, s), 4.0, frame);
        stroke_line(&mut grid, Vec2::new(0.0, i), Vec2::new(s, i), 4.0, frame);
    }
    for &i in &lines {
        for &j in &lines {
            fill_circle(&mut grid, Vec2::new(i, j), 3.0, bolt);
        }
    }

    Ok(grid)
}

/// Convert a painted canvas into a Bevy image with the given sampler.
pub fn to_bevy_image(painted: RgbaImage, sampler: ImageSampler) -> Image {
    let size = Extent3d {
        width: painted.width(),
        height: painted.height(),
        depth_or_array_layers: 1,
    };
    let mut image = Image::new(
        size,
        TextureDimension::D2,
        painted.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.sampler = sampler;
    image
}

/// Repeat-wrapping sampler for tiled surfaces.
pub fn repeat_sampler() -> ImageSampler {
    ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..default()
    })
}

/// Linear sampler with 4x anisotropic filtering for surfaces seen at grazing angles.
pub fn anisotropic_sampler() -> ImageSampler {
    ImageSampler::Descriptor(ImageSamplerDescriptor {
        anisotropy_clamp: 4,
        ..ImageSamplerDescriptor::linear()
    })
}

/// Use `painted` if it succeeded, otherwise log and fall back to a blank texture.
pub fn image_or_blank(
    name: &str,
    painted: Result<RgbaImage, TextureError>,
    sampler: ImageSampler,
) -> Image {
    match painted {
        Ok(painted) => to_bevy_image(painted, sampler),
        Err(err) => {
            warn!("{name} texture unavailable ({err}); using blank texture");
            Image::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn px(image: &RgbaImage, x: u32, y: u32) -> Option<[u8; 4]> {
        image.get_pixel_checked(x, y).map(|p| p.0)
    }

    #[test]
    fn test_empty_canvas_rejected() {
        assert_eq!(
            canvas(0, 16).unwrap_err(),
            TextureError::EmptyCanvas { width: 0, height: 16 }
        );
    }

    #[test]
    fn test_fill_rect_blends_over_background() {
        let mut image = canvas(4, 4).unwrap();
        fill_rect(&mut image, 0.0, 0.0, 4.0, 4.0, rgb(0, 0, 0));
        fill_rect(&mut image, 1.0, 1.0, 1.0, 1.0, with_alpha(rgb(255, 255, 255), 0.5));

        assert_eq!(px(&image, 0, 0), Some([0, 0, 0, 255]));
        let [r, g, b, a] = px(&image, 1, 1).unwrap();
        assert_eq!(a, 255);
        assert!((120..=136).contains(&r) && r == g && g == b, "blended {r} {g} {b}");
    }

    #[test]
    fn test_drawing_out_of_bounds_is_clipped() {
        let mut image = canvas(8, 8).unwrap();
        fill_circle(&mut image, Vec2::new(-20.0, -20.0), 3.0, rgb(255, 0, 0));
        stroke_line(&mut image, Vec2::new(-5.0, 4.0), Vec2::new(20.0, 4.0), 1.0, rgb(255, 0, 0));
        assert_eq!(px(&image, 0, 0), Some([0, 0, 0, 0]));
        assert_eq!(px(&image, 3, 4).map(|p| p[0]), Some(255));
        assert_eq!(px(&image, 8, 0), None);
    }

    #[test]
    fn test_gradient_runs_corner_to_corner() {
        let image = diagonal_gradient(16, 16, &[(0.0, rgb(0, 0, 0)), (1.0, rgb(200, 100, 0))])
            .unwrap();
        assert_eq!(px(&image, 0, 0), Some([0, 0, 0, 255]));
        assert_eq!(px(&image, 15, 15), Some([200, 100, 0, 255]));

        // Pixels on one anti-diagonal share a color
        assert_eq!(px(&image, 10, 5), px(&image, 5, 10));
        let [mid, ..] = px(&image, 8, 7).unwrap();
        assert!((80..=120).contains(&mid), "midpoint {mid}");
    }

    #[test]
    fn test_foil_is_opaque_gold() {
        let mut rng = StdRng::seed_from_u64(1);
        let foil = paint_foil(TEXTURE_SIZE, &mut rng).unwrap();

        let mut sum = [0u64; 4];
        for pixel in foil.pixels() {
            for (total, channel) in sum.iter_mut().zip(pixel.0) {
                *total += channel as u64;
            }
        }
        let count = (foil.width() * foil.height()) as u64;
        let [r, g, b, a] = sum.map(|total| total / count);
        assert_eq!(a, 255);
        assert!(r > 200 && g > 150 && b < 80, "not gold: {r} {g} {b}");
    }

    #[test]
    fn test_solar_grid_has_dark_frame_and_blue_cells() {
        let mut rng = StdRng::seed_from_u64(2);
        let grid = paint_solar_grid(TEXTURE_SIZE, &mut rng).unwrap();

        // Frame line along x = 64
        let [r, g, b, _] = px(&grid, 64, 30).unwrap();
        assert!(r == g && g == b && r < 0x30, "frame pixel {r} {g} {b}");

        // Cell interior below the glare strip
        let [r, g, b, _] = px(&grid, 5, 50).unwrap();
        assert!(b > r && b > g, "cell pixel {r} {g} {b}");
    }

    #[test]
    fn test_blank_fallback_on_error() {
        let image = image_or_blank("broken", canvas(0, 0), ImageSampler::Default);
        assert_eq!(image.width(), Image::default().width());
    }

    #[test]
    fn test_bevy_image_keeps_size_and_bytes() {
        let painted = RgbaImage::from_pixel(32, 16, rgb(1, 2, 3));
        let image = to_bevy_image(painted, repeat_sampler());
        assert_eq!(image.width(), 32);
        assert_eq!(image.height(), 16);
        let data = image.data.as_deref().unwrap();
        assert_eq!(&data[..4], &[1, 2, 3, 255]);
    }
}
