//! Image handles and sampling options
//!
//! An [`Image`] stands for pixels owned elsewhere (a decoded bitmap or a GPU
//! texture). Draw calls share it through `Arc<Image>`. Backends may hand out
//! an image before its texture has finished uploading; such an image reports
//! `is_ready() == false` until [`Image::mark_ready`] is called.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::geometry::Rect;

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a loaded image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

#[derive(Debug)]
pub struct Image {
    id: ImageId,
    width: u32,
    height: u32,
    ready: AtomicBool,
}

impl Image {
    /// An image whose pixels are available now
    pub fn new(width: u32, height: u32) -> Arc<Self> {
        Arc::new(Self::with_state(width, height, true))
    }

    /// An image whose backing texture is still pending
    pub fn pending(width: u32, height: u32) -> Arc<Self> {
        Arc::new(Self::with_state(width, height, false))
    }

    fn with_state(width: u32, height: u32, ready: bool) -> Self {
        Self {
            id: ImageId(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed)),
            width,
            height,
            ready: AtomicBool::new(ready),
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_ltrb(0.0, 0.0, self.width as f32, self.height as f32)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    Nearest,
    Linear,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MipmapMode {
    #[default]
    None,
    Nearest,
    Linear,
}

/// How an image is sampled when drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplingOptions {
    pub filter: FilterMode,
    pub mipmap: MipmapMode,
}

impl SamplingOptions {
    pub const NEAREST: SamplingOptions = SamplingOptions {
        filter: FilterMode::Nearest,
        mipmap: MipmapMode::None,
    };
    pub const LINEAR: SamplingOptions = SamplingOptions {
        filter: FilterMode::Linear,
        mipmap: MipmapMode::None,
    };

    pub const fn new(filter: FilterMode, mipmap: MipmapMode) -> Self {
        Self { filter, mipmap }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Image::new(4, 4);
        let b = Image::new(4, 4);
        assert_ne!(a.id(), b.id());
        assert_ne!(*a, *b);
        assert_eq!(a.bounds(), Rect::from_ltrb(0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn test_pending_image_becomes_ready() {
        let image = Image::pending(8, 8);
        assert!(!image.is_ready());
        image.mark_ready();
        assert!(image.is_ready());
    }
}
