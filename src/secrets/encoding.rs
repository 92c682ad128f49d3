//! Rendering resolved secret bytes as YAML string scalars.

use base64::{engine::general_purpose::STANDARD, Engine};

/// How resolved bytes are written back into the document.
///
/// One setting per run, applied to every reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Bytes interpreted as UTF-8. Invalid sequences become U+FFFD.
    #[default]
    Text,
    /// Standard base64 with padding; safe for arbitrary bytes.
    Base64,
}

impl OutputEncoding {
    pub fn from_flag(encode: bool) -> Self {
        if encode {
            OutputEncoding::Base64
        } else {
            OutputEncoding::Text
        }
    }

    /// Render `bytes`. Text mode is lossy for non-UTF-8 input;
    /// [`is_lossless`](Self::is_lossless) reports whether that happens.
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            OutputEncoding::Text => String::from_utf8_lossy(bytes).into_owned(),
            OutputEncoding::Base64 => STANDARD.encode(bytes),
        }
    }

    /// Whether [`encode`](Self::encode) preserves `bytes` exactly.
    pub fn is_lossless(self, bytes: &[u8]) -> bool {
        match self {
            OutputEncoding::Text => std::str::from_utf8(bytes).is_ok(),
            OutputEncoding::Base64 => true,
        }
    }
}
