//! Structured error types for qiposter.
//!
//! Every fallible operation in the crate returns [`Result`]. Browser failures
//! arrive as `JsValue`s and are flattened into strings at the boundary.

/// All errors that can occur while rendering, synchronizing or exporting the poster.
#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    /// A DOM API was unavailable or rejected the call.
    #[error("DOM access: {0}")]
    Dom(String),

    /// The export target is not attached to a rendered document.
    #[error("Export target is detached or has no rendered size")]
    Detached,

    /// Rasterizing the poster subtree failed.
    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    /// The rasterizer produced something other than a PNG data URL.
    #[error("Invalid export artifact: {0}")]
    Artifact(String),

    /// Base64 payload of a data URL could not be decoded.
    #[error("Base64 decoding: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Subscribing to a platform signal failed.
    #[error("Signal subscription failed: {0}")]
    Subscribe(String),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid configuration value.
    #[error("Configuration: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PosterError>;

#[cfg(target_arch = "wasm32")]
impl PosterError {
    /// Wrap a browser exception as a DOM error.
    pub(crate) fn dom(value: &wasm_bindgen::JsValue) -> Self {
        Self::Dom(js_message(value))
    }

    /// Wrap a browser exception raised during rasterization.
    pub(crate) fn rasterize(value: &wasm_bindgen::JsValue) -> Self {
        Self::Rasterize(js_message(value))
    }
}

/// Best-effort message extraction from a thrown JS value.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(target_arch = "wasm32")]
impl From<PosterError> for wasm_bindgen::JsValue {
    fn from(e: PosterError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
