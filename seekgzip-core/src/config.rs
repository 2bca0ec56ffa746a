//! Tunable constants and build-time configuration.

/// Deflate's fixed sliding-window size.
pub const WINSIZE: usize = 32_768;

/// Size of the scratch buffer used to read compressed input.
pub const CHUNK: usize = 16_384;

/// Target uncompressed-byte spacing between access points.
pub const SPAN: u64 = 1_048_576;

/// Sidecar index file extension, appended to the data file's full path.
pub const INDEX_EXTENSION: &str = "idx";

/// Options controlling index construction.
///
/// Mirrors the builder-style options structs used elsewhere in this
/// workspace (`CompressionOptions`, `DecompressionOptions`): a `Default`
/// impl for the common case, plus `with_*` setters for overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Target spacing between access points, in uncompressed bytes.
    pub span: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { span: SPAN }
    }
}

impl BuildConfig {
    /// Override the access-point spacing.
    #[must_use]
    pub fn with_span(mut self, span: u64) -> Self {
        self.span = span;
        self
    }
}
