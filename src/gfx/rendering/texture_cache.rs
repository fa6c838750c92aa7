//! Path-keyed caching of uploaded diffuse textures.
//!
//! The cache guarantees at most one live GPU handle per distinct path string.
//! Keys are compared by exact string match with no canonicalization, so
//! different spellings of the same file produce separate entries. Because the
//! key is the path and not the file content, callers must clear the cache
//! before reloading a scene whose paths may now point at different images.

use std::collections::HashMap;
use std::path::Path;

/// Generic path-keyed store with load-once semantics.
///
/// The dedup bookkeeping lives here, independent of what a cached handle is,
/// so the cache invariants can be exercised without a GPU.
#[derive(Debug)]
pub struct PathCache<T> {
    entries: HashMap<String, T>,
}

impl<T> Default for PathCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the cached value for `path`, invoking `load` only on a miss.
    ///
    /// A `load` that returns `None` caches nothing, so the next lookup tries
    /// again.
    pub fn get_or_load(&mut self, path: &str, load: impl FnOnce() -> Option<T>) -> Option<&T> {
        if !self.entries.contains_key(path) {
            let value = load()?;
            self.entries.insert(path.to_string(), value);
        }
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Drops every entry. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caches uploaded diffuse textures, keyed by their file path.
#[derive(Debug, Default)]
pub struct TextureCache {
    cache: PathCache<wgpu::BindGroup>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bind group for `path`, uploading the image on first use.
    ///
    /// Returns `None` for an empty path, and on a cache miss also for a path
    /// whose file does not currently exist or cannot be decoded. A cached
    /// entry is served by exact path match without re-checking the file.
    pub fn bind_if_available(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: &str,
    ) -> Option<wgpu::BindGroup> {
        if path.is_empty() {
            return None;
        }
        self.cache
            .get_or_load(path, || upload_from_file(device, queue, layout, path))
            .cloned()
    }

    /// Releases every cached handle and empties the cache.
    ///
    /// Idempotent, and safe to call before the renderer's one-time setup has
    /// run.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

/// Decodes an image file and uploads it as a mirrored RGBA8 texture with
/// repeat wrapping and linear filtering. Returns `None` when the file is
/// missing or does not decode.
fn upload_from_file(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    path: &str,
) -> Option<wgpu::BindGroup> {
    if !Path::new(path).is_file() {
        return None;
    }
    let image = match image::open(path) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("failed to decode texture {path}: {err}");
            return None;
        }
    };
    let rgba = image.flipv().to_rgba8();
    let (width, height) = rgba.dimensions();

    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(path),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(path),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(path),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_path_loads_once() {
        let mut cache: PathCache<u32> = PathCache::new();
        let mut loads = 0;

        let first = *cache
            .get_or_load("assets/wood.png", || {
                loads += 1;
                Some(7)
            })
            .unwrap();
        let second = *cache
            .get_or_load("assets/wood.png", || {
                loads += 1;
                Some(99)
            })
            .unwrap();

        assert_eq!(first, 7);
        assert_eq!(second, 7);
        assert_eq!(loads, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_spellings_are_distinct_entries() {
        let mut cache: PathCache<u32> = PathCache::new();
        cache.get_or_load("wood.png", || Some(1));
        cache.get_or_load("./wood.png", || Some(2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failed_load_caches_nothing() {
        let mut cache: PathCache<u32> = PathCache::new();
        assert!(cache.get_or_load("missing.png", || None).is_none());
        assert!(cache.is_empty());

        // A later successful load still goes through.
        assert_eq!(*cache.get_or_load("missing.png", || Some(3)).unwrap(), 3);
    }

    #[test]
    fn test_clear_forces_fresh_load() {
        let mut cache: PathCache<u32> = PathCache::new();
        let mut loads = 0;
        cache.get_or_load("a.png", || {
            loads += 1;
            Some(1)
        });
        cache.clear();
        cache.clear(); // idempotent
        cache.get_or_load("a.png", || {
            loads += 1;
            Some(2)
        });
        assert_eq!(loads, 2);
    }
}
