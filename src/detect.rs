//! CPU capability detection used to pick a kernel backend.

/// Vector extensions relevant to the byte-search kernels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub sse2: bool,
    pub avx2: bool,
    pub neon: bool,
}

impl Capabilities {
    /// Query the running CPU.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self {
                sse2: std::arch::is_x86_feature_detected!("sse2"),
                avx2: std::arch::is_x86_feature_detected!("avx2"),
                neon: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                sse2: false,
                avx2: false,
                neon: true, // mandatory on aarch64
            }
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    /// Capabilities of a target with no usable vector unit.
    pub const fn none() -> Self {
        Self {
            sse2: false,
            avx2: false,
            neon: false,
        }
    }

    /// `true` if any vector extension is available.
    pub fn has_vector_unit(&self) -> bool {
        self.sse2 || self.avx2 || self.neon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_has_no_vector_unit() {
        assert!(!Capabilities::none().has_vector_unit());
        assert_eq!(Capabilities::none(), Capabilities::default());
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn x86_64_always_has_sse2() {
        assert!(Capabilities::detect().sse2);
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn aarch64_always_has_neon() {
        assert!(Capabilities::detect().neon);
    }
}
