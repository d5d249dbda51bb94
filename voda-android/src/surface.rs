// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

use std::ffi::c_void;
use std::ptr::NonNull;

/// An acquired Android native window.
///
/// Owns exactly one reference on the underlying `ANativeWindow`; the
/// reference is released when the value is dropped. The Java side must keep
/// the backing `Surface` valid for as long as the window is held.
#[derive(Debug)]
pub struct NativeWindow {
    ptr: NonNull<c_void>,
}

// Safety: the window reference is an owned, refcounted handle that the NDK
// allows to be used and released from any thread.
unsafe impl Send for NativeWindow {}

impl NativeWindow {
    /// Acquires a window reference from a Java `Surface` object.
    ///
    /// Returns `None` when the surface has no native window backing it.
    #[cfg(target_os = "android")]
    pub fn from_surface(env: &jni::JNIEnv, surface: &jni::objects::JObject) -> Option<Self> {
        let ptr = unsafe {
            ndk_sys::ANativeWindow_fromSurface(env.get_raw(), surface.as_raw())
        };
        NonNull::new(ptr.cast::<c_void>()).map(|ptr| Self { ptr })
    }

    /// Wraps an already-acquired window reference.
    ///
    /// # Safety
    ///
    /// On Android `ptr` must own one reference on a native window. On other
    /// targets any non-null pointer works as an opaque stand-in.
    pub(crate) unsafe fn from_raw(ptr: NonNull<c_void>) -> Self {
        Self { ptr }
    }

    /// The raw handle a video overlay can be pointed at.
    pub fn handle(&self) -> usize {
        self.ptr.as_ptr() as usize
    }
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        #[cfg(target_os = "android")]
        unsafe {
            ndk_sys::ANativeWindow_release(self.ptr.as_ptr().cast());
        }
    }
}

/// Outcome of a [`SurfaceBinding::bind`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// A window was attached where none was before.
    Bound,
    /// The same window was already attached; nothing changed.
    Unchanged,
    /// A different window was attached; the previous one was released.
    Replaced,
}

/// Tracks which native window the video overlay renders into.
///
/// At most one window is held at a time. Binding a new window releases the
/// previous one, and rebinding the window that is already attached changes
/// nothing, so repeated `surfaceChanged` callbacks from the Java side never
/// accumulate window references.
#[derive(Debug, Default)]
pub struct SurfaceBinding {
    window: Option<NativeWindow>,
}

impl SurfaceBinding {
    /// Attaches `window`, releasing any previously attached one.
    pub fn bind(&mut self, window: NativeWindow) -> BindOutcome {
        match &self.window {
            // `window` holds a second reference on the already attached
            // surface; dropping it here keeps the attachment at one.
            Some(current) if current.handle() == window.handle() => BindOutcome::Unchanged,
            Some(_) => {
                self.window = Some(window);
                BindOutcome::Replaced
            }
            None => {
                self.window = Some(window);
                BindOutcome::Bound
            }
        }
    }

    /// Detaches and releases the current window.
    ///
    /// Returns `false` when nothing was attached.
    pub fn unbind(&mut self) -> bool {
        self.window.take().is_some()
    }

    /// The handle of the attached window, or `None`.
    pub fn handle(&self) -> Option<usize> {
        self.window.as_ref().map(|window| window.handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(handle: usize) -> NativeWindow {
        let ptr = NonNull::new(handle as *mut c_void).unwrap();
        unsafe { NativeWindow::from_raw(ptr) }
    }

    #[test]
    fn bind_attaches_a_window() {
        let mut binding = SurfaceBinding::default();
        assert_eq!(binding.handle(), None);
        assert_eq!(binding.bind(window(0x1000)), BindOutcome::Bound);
        assert_eq!(binding.handle(), Some(0x1000));
    }

    #[test]
    fn rebinding_the_same_window_changes_nothing() {
        let mut binding = SurfaceBinding::default();
        assert_eq!(binding.bind(window(0x1000)), BindOutcome::Bound);
        assert_eq!(binding.bind(window(0x1000)), BindOutcome::Unchanged);
        assert_eq!(binding.handle(), Some(0x1000));
    }

    #[test]
    fn binding_a_new_window_replaces_the_old_one() {
        let mut binding = SurfaceBinding::default();
        assert_eq!(binding.bind(window(0x1000)), BindOutcome::Bound);
        assert_eq!(binding.bind(window(0x2000)), BindOutcome::Replaced);
        assert_eq!(binding.handle(), Some(0x2000));
    }

    #[test]
    fn unbind_without_a_window_is_a_noop() {
        let mut binding = SurfaceBinding::default();
        assert!(!binding.unbind());
        binding.bind(window(0x1000));
        assert!(binding.unbind());
        assert_eq!(binding.handle(), None);
        assert!(!binding.unbind());
    }
}
