//! Print-header settings shown at the top of work orders and reports.

use serde::{Deserialize, Serialize};

/// Largest accepted logo upload, in bytes (2 MiB).
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Company details printed in the document header.
///
/// Missing fields deserialize to empty strings so a partially written record
/// still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintHeaderSettings {
    pub company_name: String,
    /// Brazilian company registry number, free text.
    pub cnpj: String,
    pub phone: String,
    pub address: String,
    /// `data:<mime>;base64,<payload>`, or `None` for no logo.
    pub logo: Option<String>,
}

/// Partial change to [`PrintHeaderSettings`]. The logo is managed separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintHeaderPatch {
    pub company_name: Option<String>,
    pub cnpj: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl PrintHeaderPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.cnpj.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

impl PrintHeaderSettings {
    pub fn apply(&mut self, patch: PrintHeaderPatch) {
        if let Some(v) = patch.company_name {
            self.company_name = v;
        }
        if let Some(v) = patch.cnpj {
            self.cnpj = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
    }
}

/// Image formats accepted for the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    Jpeg,
    Png,
    Gif,
}

impl LogoFormat {
    /// Guess from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Sniff from the leading magic bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}
