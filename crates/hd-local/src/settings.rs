//! Print-header settings record.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hd_core::settings::{LogoFormat, MAX_LOGO_BYTES, PrintHeaderPatch, PrintHeaderSettings};

use crate::error::LocalError;
use crate::keyed::{KeyedFileStore, Loaded};

/// Fixed key for the print-header settings.
pub const SETTINGS_KEY: &str = "helpdesk_print_settings";

/// Encode an image as a `data:` URL after checking size and format.
///
/// The format is sniffed from the bytes; `hint` (usually the file extension)
/// is only used when sniffing fails.
///
/// # Errors
///
/// `LogoTooLarge` above [`MAX_LOGO_BYTES`], `UnsupportedLogoFormat` for
/// anything other than JPG, PNG, or GIF.
pub fn logo_data_url(bytes: &[u8], hint: Option<&str>) -> Result<String, LocalError> {
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(LocalError::LogoTooLarge {
            size: bytes.len(),
            limit: MAX_LOGO_BYTES,
        });
    }
    let format = LogoFormat::sniff(bytes)
        .or_else(|| hint.and_then(LogoFormat::from_extension))
        .ok_or_else(|| LocalError::UnsupportedLogoFormat(hint.unwrap_or("unknown").to_string()))?;
    Ok(format!("data:{};base64,{}", format.mime(), STANDARD.encode(bytes)))
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    files: KeyedFileStore,
}

impl SettingsStore {
    #[must_use]
    pub const fn new(files: KeyedFileStore) -> Self {
        Self { files }
    }

    /// Stored settings, or empty defaults when none are saved or the record
    /// cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns `LocalError::Io` if the file exists but cannot be read.
    pub fn load(&self) -> Result<PrintHeaderSettings, LocalError> {
        match self.files.load(SETTINGS_KEY)? {
            Loaded::Missing => Ok(PrintHeaderSettings::default()),
            Loaded::Value(settings) => Ok(settings),
            Loaded::Corrupt(error) => {
                tracing::warn!(%error, "print settings are unreadable; using defaults");
                Ok(PrintHeaderSettings::default())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `LocalError` if the file cannot be written.
    pub fn save(&self, settings: &PrintHeaderSettings) -> Result<(), LocalError> {
        self.files.save(SETTINGS_KEY, settings)
    }

    /// Merge `patch` into the stored settings and save.
    ///
    /// # Errors
    ///
    /// Returns `LocalError` if loading or saving fails.
    pub fn update(&self, patch: PrintHeaderPatch) -> Result<PrintHeaderSettings, LocalError> {
        let mut settings = self.load()?;
        settings.apply(patch);
        self.save(&settings)?;
        Ok(settings)
    }

    /// Read an image file and store it as the logo.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, plus the errors of [`logo_data_url`].
    pub fn set_logo_from_file(&self, path: &Path) -> Result<PrintHeaderSettings, LocalError> {
        let size = std::fs::metadata(path)
            .map_err(|source| LocalError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        if size > MAX_LOGO_BYTES {
            return Err(LocalError::LogoTooLarge {
                size,
                limit: MAX_LOGO_BYTES,
            });
        }

        let bytes = std::fs::read(path).map_err(|source| LocalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path.extension().and_then(|e| e.to_str());
        let url = logo_data_url(&bytes, ext)?;

        let mut settings = self.load()?;
        settings.logo = Some(url);
        self.save(&settings)?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns `LocalError` if loading or saving fails.
    pub fn clear_logo(&self) -> Result<PrintHeaderSettings, LocalError> {
        let mut settings = self.load()?;
        settings.logo = None;
        self.save(&settings)?;
        Ok(settings)
    }
}
