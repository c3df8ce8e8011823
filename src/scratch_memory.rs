//! Caller-supplied scratch allocation for the dynamic-programming kernels.
//!
//! # Scope
//! The distance and alignment routines need one temporary buffer per call
//! (rolling rows or diagonals, plus decoded runes for the codepoint
//! variants). This module makes that allocation explicit:
//! - [`ScratchAllocator`]: the collaborator interface (`allocate` / `free`).
//! - [`SystemAllocator`]: forwards to the global allocator.
//! - [`FixedArena`]: a page-aligned, fixed-capacity bump arena that never
//!   touches the heap after construction.
//! - [`ScratchBuffer`]: a typed guard that owns one allocation for the
//!   duration of a call and frees it on drop.
//!
//! # Invariants
//! - Each kernel call performs at most one `allocate` and exactly one
//!   matching `free` for it, on success and on early exit alike.
//! - A refused allocation is reported as an error value, never a panic.
//! - Zero-length buffers never reach the allocator.
//!
//! # Failure modes
//! - `SizeZero` when a zero-sized layout is requested directly.
//! - `InvalidLayout` on size overflow or unsupported alignment.
//! - `OutOfMemory` when the allocator (or arena capacity) refuses.

use std::alloc::{alloc, dealloc, Layout};
use std::cell::Cell;
use std::mem::{align_of, size_of};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use thiserror::Error;

/// Errors returned by scratch allocators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScratchMemoryError {
    /// Size was zero where a non-zero allocation is required.
    #[error("scratch allocation of zero bytes")]
    SizeZero,
    /// The requested layout was invalid (overflow or bad alignment).
    #[error("invalid scratch layout")]
    InvalidLayout,
    /// The allocator refused the request.
    #[error("scratch allocator refused {requested} bytes")]
    OutOfMemory { requested: usize },
}

/// Temporary-memory capability handed to the distance kernels.
///
/// Thread-safety is the implementor's concern; the kernels take `&self` and
/// never share the allocator across threads themselves.
pub trait ScratchAllocator {
    /// Reserve a block matching `layout`.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, ScratchMemoryError>;

    /// Return a block previously produced by [`ScratchAllocator::allocate`].
    ///
    /// # Safety
    /// `ptr` must come from `self.allocate(layout)` with the same `layout`,
    /// and must not be freed twice.
    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: ScratchAllocator + ?Sized> ScratchAllocator for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, ScratchMemoryError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).free(ptr, layout)
    }
}

/// Allocator backed by the process-wide global allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl ScratchAllocator for SystemAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, ScratchMemoryError> {
        if layout.size() == 0 {
            return Err(ScratchMemoryError::SizeZero);
        }
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc(layout) };
        NonNull::new(raw).ok_or(ScratchMemoryError::OutOfMemory {
            requested: layout.size(),
        })
    }

    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        dealloc(ptr.as_ptr(), layout);
    }
}

/// Page-aligned, fixed-capacity bump arena.
///
/// Useful when the caller wants a hard memory ceiling for approximate
/// matching: once `capacity_bytes()` is consumed further requests fail with
/// `OutOfMemory` instead of growing. Freeing the most recent block rolls the
/// bump pointer back; freeing older blocks is a no-op until [`FixedArena::reset`].
///
/// Not `Sync`: the bump offset lives in a `Cell`.
pub struct FixedArena {
    ptr: NonNull<u8>,
    len: usize,
    layout: Layout,
    used: Cell<usize>,
}

impl FixedArena {
    /// Minimum page size for alignment.
    ///
    /// This constant is not queried from the OS.
    pub const PAGE_SIZE_MIN: usize = 4096;

    /// Allocate a page-aligned arena of `size` bytes.
    ///
    /// # Errors
    /// - `SizeZero` if `size == 0`.
    /// - `InvalidLayout` if the alignment/size is not representable.
    /// - `OutOfMemory` if the global allocator returns null.
    pub fn init(size: usize) -> Result<Self, ScratchMemoryError> {
        if size == 0 {
            return Err(ScratchMemoryError::SizeZero);
        }

        let layout = Layout::from_size_align(size, Self::PAGE_SIZE_MIN)
            .map_err(|_| ScratchMemoryError::InvalidLayout)?;

        // SAFETY: layout is valid and has non-zero size.
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw).ok_or(ScratchMemoryError::OutOfMemory { requested: size })?;

        Ok(Self {
            ptr,
            len: size,
            layout,
            used: Cell::new(0),
        })
    }

    /// Total capacity in bytes of the backing allocation.
    pub fn capacity_bytes(&self) -> usize {
        self.len
    }

    /// Bytes currently handed out, including alignment padding.
    pub fn used_bytes(&self) -> usize {
        self.used.get()
    }

    /// Forget every outstanding block.
    ///
    /// Taking `&mut self` guarantees no [`ScratchBuffer`] borrowed from this
    /// arena is still alive.
    pub fn reset(&mut self) {
        self.used.set(0);
    }
}

impl ScratchAllocator for FixedArena {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, ScratchMemoryError> {
        if layout.size() == 0 {
            return Err(ScratchMemoryError::SizeZero);
        }
        if layout.align() > Self::PAGE_SIZE_MIN {
            return Err(ScratchMemoryError::InvalidLayout);
        }

        // Base is page-aligned, so aligning the offset aligns the address.
        let start = self
            .used
            .get()
            .checked_next_multiple_of(layout.align())
            .ok_or(ScratchMemoryError::InvalidLayout)?;
        let end = start
            .checked_add(layout.size())
            .ok_or(ScratchMemoryError::InvalidLayout)?;
        if end > self.len {
            tracing::debug!(
                requested = layout.size(),
                used = self.used.get(),
                capacity = self.len,
                "fixed arena exhausted"
            );
            return Err(ScratchMemoryError::OutOfMemory {
                requested: layout.size(),
            });
        }

        self.used.set(end);
        // SAFETY: start < end <= len, so the offset stays inside the allocation.
        Ok(unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(start)) })
    }

    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        let start = ptr.as_ptr() as usize - self.ptr.as_ptr() as usize;
        debug_assert!(start + layout.size() <= self.len);
        if start + layout.size() == self.used.get() {
            self.used.set(start);
        }
    }
}

impl Drop for FixedArena {
    fn drop(&mut self) {
        // SAFETY: ptr/layout are exactly what `init` allocated.
        unsafe {
            dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

/// Typed scratch buffer owned by a single kernel call.
///
/// Every element is initialized on construction, so the buffer derefs to
/// `[T]` with no `MaybeUninit` handling at use sites. Dropping the guard
/// returns the block to its allocator, which keeps the one-allocate /
/// one-free pairing visible in the type system.
pub struct ScratchBuffer<'a, T: Copy, A: ScratchAllocator + ?Sized> {
    alloc: &'a A,
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

impl<'a, T: Copy, A: ScratchAllocator + ?Sized> ScratchBuffer<'a, T, A> {
    /// Reserve `len` elements from `alloc`, each set to `value`.
    ///
    /// `len == 0` returns an empty buffer without calling the allocator.
    ///
    /// # Errors
    /// - `InvalidLayout` if `len * size_of::<T>()` overflows.
    /// - `SizeZero` if `T` is zero-sized and `len > 0`.
    /// - Whatever the allocator reports.
    pub fn filled(alloc: &'a A, len: usize, value: T) -> Result<Self, ScratchMemoryError> {
        if len == 0 {
            return Ok(Self {
                alloc,
                ptr: NonNull::dangling(),
                len: 0,
                layout: Layout::new::<()>(),
            });
        }
        if size_of::<T>() == 0 {
            return Err(ScratchMemoryError::SizeZero);
        }

        let layout = Layout::array::<T>(len).map_err(|_| ScratchMemoryError::InvalidLayout)?;
        let raw = alloc.allocate(layout)?;
        debug_assert_eq!(raw.as_ptr() as usize % align_of::<T>(), 0);
        let ptr = raw.cast::<T>();

        for i in 0..len {
            // SAFETY: i < len and the block holds `len` elements of T.
            unsafe { ptr.as_ptr().add(i).write(value) };
        }

        Ok(Self {
            alloc,
            ptr,
            len,
            layout,
        })
    }

    /// Size of the underlying block in bytes.
    pub fn size_bytes(&self) -> usize {
        self.layout.size()
    }
}

impl<T: Copy, A: ScratchAllocator + ?Sized> Deref for ScratchBuffer<'_, T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: `0..len` was initialized in `filled`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy, A: ScratchAllocator + ?Sized> DerefMut for ScratchBuffer<'_, T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: `0..len` was initialized in `filled`, and we hold `&mut self`.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy, A: ScratchAllocator + ?Sized> Drop for ScratchBuffer<'_, T, A> {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        // SAFETY: the block came from `self.alloc.allocate(self.layout)`.
        unsafe { self.alloc.free(self.ptr.cast::<u8>(), self.layout) }
    }
}
