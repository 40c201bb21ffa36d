//! PNG export and print.
//!
//! The trigger asks a [`Rasterizer`] for a PNG of the poster root and hands
//! the bytes to a [`DownloadSink`]. Failures never reach the caller: they are
//! logged and reported as an [`ExportOutcome`].

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{AnchorDownload, DomRasterizer, WindowPrint};

use base64::Engine;
use tracing::{debug, error};

use crate::config::ExportOptions;
use crate::error::{PosterError, Result};

/// First eight bytes of every PNG file.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A freshly rasterized PNG, discarded once delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Wrap PNG bytes, checking the signature.
    pub fn from_png(bytes: Vec<u8>) -> Result<Self> {
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(PosterError::Artifact("missing PNG signature".into()));
        }
        Ok(Self { bytes })
    }

    /// Decode a `data:image/png;base64,...` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let payload = url.strip_prefix(PNG_DATA_URL_PREFIX).ok_or_else(|| {
            let head: String = url.chars().take(32).collect();
            PosterError::Artifact(format!("not a PNG data URL: {head}"))
        })?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        Self::from_png(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Pixel size from the IHDR chunk.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let ihdr = self.bytes.get(12..24)?;
        if ihdr.get(..4)? != b"IHDR" {
            return None;
        }
        let width = u32::from_be_bytes(ihdr.get(4..8)?.try_into().ok()?);
        let height = u32::from_be_bytes(ihdr.get(8..12)?.try_into().ok()?);
        Some((width, height))
    }
}

/// Append a cache-busting query parameter so the image is re-fetched.
///
/// `data:` and `blob:` URLs are returned unchanged.
pub fn cache_bust_url(url: &str, token: &str) -> String {
    if url.is_empty() || url.starts_with("data:") || url.starts_with("blob:") {
        return url.to_string();
    }
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut out = format!("{base}{separator}cacheBust={token}");
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// What an export attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Downloaded { file_name: String, bytes: usize },
    /// No poster root was available; nothing happened.
    NoTarget,
    /// Rasterization or delivery failed; the reason was logged.
    Failed(String),
}

impl ExportOutcome {
    pub fn is_downloaded(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }
}

/// Turns a rendered subtree into a PNG.
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    type Target;

    async fn rasterize(
        &self,
        target: &Self::Target,
        options: &ExportOptions,
    ) -> Result<ExportArtifact>;
}

/// Offers an artifact to the user as a local download.
pub trait DownloadSink {
    fn deliver(&self, file_name: &str, artifact: &ExportArtifact) -> Result<()>;
}

/// Opens the platform print flow.
pub trait PrintInvoker {
    fn print(&self) -> Result<()>;
}

/// Report a failure to the developer. On `wasm32` this also reaches the
/// browser console.
fn report(message: &str) {
    error!("{message}");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(message));
}

pub struct ExportTrigger<R, D, P> {
    rasterizer: R,
    sink: D,
    printer: P,
    options: ExportOptions,
}

impl<R: Rasterizer, D: DownloadSink, P: PrintInvoker> ExportTrigger<R, D, P> {
    pub fn new(rasterizer: R, sink: D, printer: P, options: ExportOptions) -> Self {
        Self {
            rasterizer,
            sink,
            printer,
            options,
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Rasterize `target` and download it. Never fails; see [`ExportOutcome`].
    pub async fn export_image(&self, target: Option<&R::Target>) -> ExportOutcome {
        let Some(target) = target else {
            debug!("export requested without a poster root");
            return ExportOutcome::NoTarget;
        };
        let file_name = self.options.file_name.as_str();
        let result = match self.rasterizer.rasterize(target, &self.options).await {
            Ok(artifact) => self
                .sink
                .deliver(file_name, &artifact)
                .map(|()| artifact.len()),
            Err(e) => Err(e),
        };
        match result {
            Ok(bytes) => {
                debug!(file_name, bytes, "poster exported");
                ExportOutcome::Downloaded {
                    file_name: file_name.to_string(),
                    bytes,
                }
            }
            Err(e) => {
                report(&format!("PNG export failed: {e}"));
                ExportOutcome::Failed(e.to_string())
            }
        }
    }

    /// Open the print dialog. Failures are logged, not returned.
    pub fn print_document(&self) {
        if let Err(e) = self.printer.print() {
            report(&format!("print failed: {e}"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes
    }

    #[test]
    fn test_data_url_round_trip() {
        let bytes = png_header(3968, 2800);
        let url = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        let artifact = ExportArtifact::from_data_url(&url).unwrap();
        assert_eq!(artifact.bytes(), bytes.as_slice());
        assert_eq!(artifact.dimensions(), Some((3968, 2800)));
    }

    #[test]
    fn test_rejects_other_mime() {
        let err = ExportArtifact::from_data_url("data:image/jpeg;base64,AAAA").unwrap_err();
        assert!(matches!(err, PosterError::Artifact(_)));
    }

    #[test]
    fn test_rejects_bad_base64() {
        let err = ExportArtifact::from_data_url("data:image/png;base64,!!!").unwrap_err();
        assert!(matches!(err, PosterError::Base64(_)));
    }

    #[test]
    fn test_rejects_non_png_bytes() {
        assert!(ExportArtifact::from_png(b"GIF89a".to_vec()).is_err());
        assert!(ExportArtifact::from_png(Vec::new()).is_err());
    }

    #[test]
    fn test_cache_bust_url() {
        assert_eq!(cache_bust_url("nhs.jpeg", "7"), "nhs.jpeg?cacheBust=7");
        assert_eq!(cache_bust_url("/menu-1.png?v=2", "7"), "/menu-1.png?v=2&cacheBust=7");
        assert_eq!(cache_bust_url("a.png#top", "7"), "a.png?cacheBust=7#top");
        assert_eq!(cache_bust_url("blob:http://x/1", "7"), "blob:http://x/1");
        assert_eq!(cache_bust_url("data:image/png;base64,AA", "7"), "data:image/png;base64,AA");
    }

    #[test]
    fn test_dimensions_need_ihdr() {
        let artifact = ExportArtifact::from_png(PNG_SIGNATURE.to_vec()).unwrap();
        assert_eq!(artifact.dimensions(), None);
    }
}
