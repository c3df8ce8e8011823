//! Kernel strategy selection.
//!
//! Every backend satisfies the same contract as the crate-root functions;
//! they differ only in how fast they get there. The [`Kernels`] trait
//! carries the portable algorithms as default methods, so a backend only
//! overrides what it actually accelerates.
//!
//! ## Selection
//! 1. `BYTEMATCH_BACKEND=portable|vectorized` forces a backend.
//! 2. Otherwise [`Capabilities::detect`] decides: any vector unit selects
//!    [`BackendKind::Vectorized`].
//!
//! [`Backend::global`] runs selection once per process. The crate-root
//! free functions always use the portable kernels.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use thiserror::Error;

use crate::detect::Capabilities;
use crate::stdx::ByteSet;

/// Environment variable that forces a backend.
pub const BACKEND_ENV: &str = "BYTEMATCH_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Portable,
    Vectorized,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Vectorized => "vectorized",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown backend {0:?}, expected \"portable\" or \"vectorized\"")]
pub struct UnknownBackend(pub String);

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portable" => Ok(Self::Portable),
            "vectorized" => Ok(Self::Vectorized),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

/// Search and comparison kernels behind a backend.
pub trait Kernels: Send + Sync {
    fn find(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        crate::search::find(haystack, needle)
    }

    fn rfind(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        crate::search::rfind(haystack, needle)
    }

    fn find_byteset(&self, haystack: &[u8], set: &ByteSet) -> Option<usize> {
        crate::search::find_byteset(haystack, set)
    }

    fn rfind_byteset(&self, haystack: &[u8], set: &ByteSet) -> Option<usize> {
        crate::search::rfind_byteset(haystack, set)
    }

    fn hamming_distance(&self, a: &[u8], b: &[u8], bound: usize) -> usize {
        crate::distance::hamming_distance(a, b, bound)
    }
}

/// The crate's own algorithms, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableKernels;

impl Kernels for PortableKernels {}

/// `memchr`'s runtime-dispatched SIMD searchers for substring search.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorizedKernels;

impl Kernels for VectorizedKernels {
    fn find(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        match needle {
            [byte] => memchr::memchr(*byte, haystack),
            _ => memchr::memmem::find(haystack, needle),
        }
    }

    fn rfind(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        match needle {
            [byte] => memchr::memrchr(*byte, haystack),
            _ => memchr::memmem::rfind(haystack, needle),
        }
    }

    fn find_byteset(&self, haystack: &[u8], set: &ByteSet) -> Option<usize> {
        // memchr covers sets of up to three bytes.
        match set.count() {
            1 | 2 | 3 => {
                let mut members = set.iter();
                let a = members.next()?;
                match (members.next(), members.next()) {
                    (None, _) => memchr::memchr(a, haystack),
                    (Some(b), None) => memchr::memchr2(a, b, haystack),
                    (Some(b), Some(c)) => memchr::memchr3(a, b, c, haystack),
                }
            }
            _ => crate::search::find_byteset(haystack, set),
        }
    }

    fn rfind_byteset(&self, haystack: &[u8], set: &ByteSet) -> Option<usize> {
        match set.count() {
            1 | 2 | 3 => {
                let mut members = set.iter();
                let a = members.next()?;
                match (members.next(), members.next()) {
                    (None, _) => memchr::memrchr(a, haystack),
                    (Some(b), None) => memchr::memrchr2(a, b, haystack),
                    (Some(b), Some(c)) => memchr::memrchr3(a, b, c, haystack),
                }
            }
            _ => crate::search::rfind_byteset(haystack, set),
        }
    }
}

static PORTABLE: PortableKernels = PortableKernels;
static VECTORIZED: VectorizedKernels = VectorizedKernels;

/// A selected kernel set.
#[derive(Clone, Copy)]
pub struct Backend {
    kind: BackendKind,
    kernels: &'static dyn Kernels,
}

impl Backend {
    pub fn portable() -> Self {
        Self {
            kind: BackendKind::Portable,
            kernels: &PORTABLE,
        }
    }

    pub fn vectorized() -> Self {
        Self {
            kind: BackendKind::Vectorized,
            kernels: &VECTORIZED,
        }
    }

    pub fn of_kind(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Portable => Self::portable(),
            BackendKind::Vectorized => Self::vectorized(),
        }
    }

    /// Pick a backend from an optional override string and the CPU's
    /// capabilities. An unparsable override is logged and ignored.
    pub fn select(override_value: Option<&str>, caps: Capabilities) -> Self {
        if let Some(value) = override_value {
            match value.parse::<BackendKind>() {
                Ok(kind) => {
                    tracing::debug!(backend = %kind, "backend forced by BYTEMATCH_BACKEND");
                    return Self::of_kind(kind);
                }
                Err(err) => tracing::warn!(%err, "ignoring BYTEMATCH_BACKEND"),
            }
        }
        let kind = if caps.has_vector_unit() {
            BackendKind::Vectorized
        } else {
            BackendKind::Portable
        };
        tracing::debug!(backend = %kind, ?caps, "backend selected");
        Self::of_kind(kind)
    }

    /// Select from `BYTEMATCH_BACKEND` and the running CPU.
    pub fn detect() -> Self {
        let value = std::env::var(BACKEND_ENV).ok();
        Self::select(value.as_deref(), Capabilities::detect())
    }

    /// Process-wide backend, selected on first use.
    pub fn global() -> &'static Backend {
        static GLOBAL: OnceLock<Backend> = OnceLock::new();
        GLOBAL.get_or_init(Backend::detect)
    }

    #[inline]
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    #[inline]
    pub fn kernels(&self) -> &'static dyn Kernels {
        self.kernels
    }

    #[inline]
    pub fn find(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        self.kernels.find(haystack, needle)
    }

    #[inline]
    pub fn rfind(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        self.kernels.rfind(haystack, needle)
    }

    #[inline]
    pub fn find_byteset(&self, haystack: &[u8], set: &ByteSet) -> Option<usize> {
        self.kernels.find_byteset(haystack, set)
    }

    #[inline]
    pub fn rfind_byteset(&self, haystack: &[u8], set: &ByteSet) -> Option<usize> {
        self.kernels.rfind_byteset(haystack, set)
    }

    #[inline]
    pub fn hamming_distance(&self, a: &[u8], b: &[u8], bound: usize) -> usize {
        self.kernels.hamming_distance(a, b, bound)
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::portable()
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend").field("kind", &self.kind).finish()
    }
}
