//! Image Store
//!
//! CPU-side image store for dynamic loading and unloading.
//!
//! Call `load_rgba()` at any time to get a handle immediately. Decoded pixel
//! data is queued internally; the shell drains pending uploads each frame and
//! pushes them to the renderer's atlas before drawing.

/// Opaque handle to a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// An image queued for upload (decoded RGBA data, not yet in the atlas).
pub struct PendingImage {
    pub handle: ImageHandle,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// CPU-side image store.
///
/// Call `unload()` to release an image from the atlas.
pub struct ImageStore {
    pending: std::sync::Mutex<Vec<PendingImage>>,
    pending_unloads: std::sync::Mutex<Vec<ImageHandle>>,
    next_handle: u32,
}

impl ImageStore {
    /// Create an empty image store.
    pub fn new() -> Self {
        Self {
            pending: std::sync::Mutex::new(Vec::new()),
            pending_unloads: std::sync::Mutex::new(Vec::new()),
            next_handle: 0,
        }
    }

    /// Load raw RGBA pixel data. Returns a handle immediately.
    ///
    /// The actual upload happens on the next frame's prepare pass.
    pub fn load_rgba(&mut self, width: u32, height: u32, data: Vec<u8>) -> ImageHandle {
        assert_eq!(data.len(), (width * height * 4) as usize, "RGBA data size mismatch");
        let handle = ImageHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.get_mut().unwrap().push(PendingImage {
            handle,
            width,
            height,
            data,
        });
        handle
    }

    /// Generate a procedural placeholder image (gradient pattern).
    ///
    /// Used as the avatar stand-in until the network fetch completes
    /// (or permanently, when the fetch fails).
    pub fn load_placeholder_gradient(&mut self, width: u32, height: u32) -> ImageHandle {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let u = x as f32 / width as f32;
                let v = y as f32 / height as f32;
                let r = (u * 100.0 + 50.0) as u8;
                let g = (v * 80.0 + 40.0) as u8;
                let b = ((1.0 - u) * 180.0 + 75.0) as u8;
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }
        self.load_rgba(width, height, data)
    }

    /// Queue an image for unloading from the atlas.
    ///
    /// The actual removal happens on the next frame's prepare pass.
    /// After unloading, the handle becomes invalid.
    pub fn unload(&self, handle: ImageHandle) {
        self.pending_unloads.lock().unwrap().push(handle);
    }

    /// Drain all pending image uploads (called by the shell).
    ///
    /// Uses `&self` with internal locking so it can be called from contexts
    /// that only have shared access.
    pub fn drain_pending(&self) -> Vec<PendingImage> {
        std::mem::take(&mut *self.pending.lock().unwrap())
    }

    /// Drain all pending image unloads (called by the shell).
    pub fn drain_pending_unloads(&self) -> Vec<ImageHandle> {
        std::mem::take(&mut *self.pending_unloads.lock().unwrap())
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rgba_assigns_unique_handles() {
        let mut store = ImageStore::new();
        let a = store.load_rgba(2, 2, vec![0; 16]);
        let b = store.load_rgba(1, 1, vec![0; 4]);
        assert_ne!(a, b);

        let pending = store.drain_pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].handle, a);
        assert_eq!(pending[0].width, 2);

        // Drained once, gone
        assert!(store.drain_pending().is_empty());
    }

    #[test]
    fn placeholder_gradient_is_opaque_rgba() {
        let mut store = ImageStore::new();
        store.load_placeholder_gradient(4, 4);

        let pending = store.drain_pending();
        assert_eq!(pending[0].data.len(), 4 * 4 * 4);
        assert!(pending[0].data.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn unload_queues_handle() {
        let mut store = ImageStore::new();
        let handle = store.load_rgba(1, 1, vec![0; 4]);
        store.unload(handle);
        assert_eq!(store.drain_pending_unloads(), vec![handle]);
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn load_rgba_rejects_wrong_size() {
        let mut store = ImageStore::new();
        store.load_rgba(2, 2, vec![0; 3]);
    }
}
