//! Procedural surface textures, bound at group 2 of the mesh shader.
//!
//! Two patterns are generated on the CPU and uploaded once: a checkerboard
//! and diagonal stripes. Each shape decides through its material how much of
//! them shows and how the two are blended.

use wgpu::{
    AddressMode, BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout,
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingResource, BindingType, Device,
    Extent3d, FilterMode, ImageCopyTexture, ImageDataLayout, Origin3d, Queue, SamplerBindingType,
    SamplerDescriptor, ShaderStages, Texture, TextureAspect, TextureFormat, TextureSampleType,
    TextureUsages, TextureViewDimension,
};

use crate::utils::create_texture_2d;

pub const TEXTURE_FORMAT: TextureFormat = TextureFormat::Rgba8UnormSrgb;

const BYTES_PER_PIXEL: usize = 4;

#[derive(Clone, Copy, Debug)]
pub struct TextureSettings {
    /// Width and height of both textures in pixels.
    pub size: u32,
    pub checker_cells: u32,
    pub stripes: u32,
    pub primary: [u8; 4],
    pub secondary: [u8; 4],
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            size: 64,
            checker_cells: 8,
            stripes: 6,
            primary: [235, 235, 225, 255],
            secondary: [40, 90, 160, 255],
        }
    }
}

/// RGBA8 checkerboard with `cells` squares along each side.
pub fn checker_pixels(size: u32, cells: u32, primary: [u8; 4], secondary: [u8; 4]) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);

    pattern_pixels(size, primary, secondary, |x, y| (x / cell + y / cell) % 2 == 0)
}

/// RGBA8 diagonal stripes, `stripes` pairs across the texture.
pub fn stripe_pixels(size: u32, stripes: u32, primary: [u8; 4], secondary: [u8; 4]) -> Vec<u8> {
    let width = (size / (2 * stripes.max(1))).max(1);

    pattern_pixels(size, primary, secondary, |x, y| ((x + y) / width) % 2 == 0)
}

fn pattern_pixels(
    size: u32,
    primary: [u8; 4],
    secondary: [u8; 4],
    is_primary: impl Fn(u32, u32) -> bool,
) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(size as usize * size as usize * BYTES_PER_PIXEL);
    for y in 0..size {
        for x in 0..size {
            let color = if is_primary(x, y) { primary } else { secondary };
            pixels.extend_from_slice(&color);
        }
    }
    pixels
}

/// Sampler plus the checker and stripe textures in one bind group.
pub struct SurfaceTextures {
    layout: BindGroupLayout,
    bind_group: BindGroup,
}

impl SurfaceTextures {
    pub fn new(device: &Device, queue: &Queue, settings: &TextureSettings) -> SurfaceTextures {
        let size = settings.size.max(1);

        let checker = upload_texture(
            device,
            queue,
            size,
            &checker_pixels(size, settings.checker_cells, settings.primary, settings.secondary),
        );
        let stripes = upload_texture(
            device,
            queue,
            size,
            &stripe_pixels(size, settings.stripes, settings.primary, settings.secondary),
        );
        let checker_view = checker.create_view(&Default::default());
        let stripe_view = stripes.create_view(&Default::default());

        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("surface"),
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            address_mode_w: AddressMode::Repeat,
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Nearest,
            lod_min_clamp: 0.0,
            lod_max_clamp: 1.0,
            compare: None,
            anisotropy_clamp: 1,
            border_color: None,
        });

        let layout = Self::create_bind_group_layout(device);
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("surface textures"),
            layout: &layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: BindingResource::Sampler(&sampler),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::TextureView(&checker_view),
                },
                BindGroupEntry {
                    binding: 2,
                    resource: BindingResource::TextureView(&stripe_view),
                },
            ],
        });

        SurfaceTextures { layout, bind_group }
    }

    pub fn layout(&self) -> &BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }

    fn create_bind_group_layout(device: &Device) -> BindGroupLayout {
        let texture_entry = |binding| BindGroupLayoutEntry {
            binding,
            visibility: ShaderStages::FRAGMENT,
            ty: BindingType::Texture {
                sample_type: TextureSampleType::Float { filterable: true },
                view_dimension: TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("surface textures"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
                texture_entry(1),
                texture_entry(2),
            ],
        })
    }
}

fn upload_texture(device: &Device, queue: &Queue, size: u32, pixels: &[u8]) -> Texture {
    let texture = create_texture_2d(
        device,
        TEXTURE_FORMAT,
        size,
        size,
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
    );

    queue.write_texture(
        ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: Origin3d::ZERO,
            aspect: TextureAspect::All,
        },
        pixels,
        ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(BYTES_PER_PIXEL as u32 * size),
            rows_per_image: Some(size),
        },
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
    );

    texture
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn pixel(pixels: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let start = (y * size + x) as usize * BYTES_PER_PIXEL;
        [
            pixels[start],
            pixels[start + 1],
            pixels[start + 2],
            pixels[start + 3],
        ]
    }

    #[test]
    fn checker_alternates_at_cell_edges() {
        let pixels = checker_pixels(8, 4, WHITE, BLACK);

        assert_eq!(pixels.len(), 8 * 8 * BYTES_PER_PIXEL);
        assert_eq!(pixel(&pixels, 8, 0, 0), WHITE);
        assert_eq!(pixel(&pixels, 8, 1, 1), WHITE);
        assert_eq!(pixel(&pixels, 8, 2, 0), BLACK);
        assert_eq!(pixel(&pixels, 8, 0, 2), BLACK);
        assert_eq!(pixel(&pixels, 8, 2, 2), WHITE);
    }

    #[test]
    fn stripes_run_diagonally() {
        let pixels = stripe_pixels(8, 2, WHITE, BLACK);

        assert_eq!(pixel(&pixels, 8, 0, 0), WHITE);
        assert_eq!(pixel(&pixels, 8, 1, 0), pixel(&pixels, 8, 0, 1));
        assert_eq!(pixel(&pixels, 8, 2, 0), BLACK);
        assert_eq!(pixel(&pixels, 8, 3, 1), WHITE);
    }

    #[test]
    fn zero_counts_fall_back_to_one_cell() {
        let pixels = checker_pixels(4, 0, WHITE, BLACK);

        assert!(pixels.chunks_exact(BYTES_PER_PIXEL).all(|p| p == WHITE));
    }
}
