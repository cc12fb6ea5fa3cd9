/// Default maximum element count of a list, set or map: 1 Mi entries.
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 1024 * 1024;

/// Default maximum encoded string size: 16 MiB.
pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// How present objects announce their length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthMode {
    /// Back-patch the exact field byte count so readers can skip unknown fields.
    #[default]
    Tracked,
    /// Always write the `-1` sentinel. Readers cannot skip trailing fields.
    Untracked,
}

/// Configuration shared by every field encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireConfig {
    /// Marker style for present objects. Default: [`LengthMode::Tracked`].
    pub length_mode: LengthMode,
    /// When false, decoding a `-1` marker fails. Default: true.
    pub accept_untracked: bool,
    /// Maximum element count of a list, set or map.
    pub max_collection_len: usize,
    /// Maximum byte length of a string.
    pub max_string_len: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            length_mode: LengthMode::Tracked,
            accept_untracked: true,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}
