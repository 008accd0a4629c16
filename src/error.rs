//! Startup failures
//!
//! The running loop has no fallible I/O; everything that can fail happens
//! before the first frame and is reported to the shell from here.

use thiserror::Error;

/// Anything that prevents a session from starting
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("browser window is not available")]
    NoWindow,

    #[error("document is not available")]
    NoDocument,

    #[error("canvas element `#{0}` not found")]
    CanvasNotFound(String),

    #[error("2d rendering context unavailable")]
    NoContext2d,

    #[error("failed to load asset `{path}`: {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("javascript error: {0}")]
    Js(String),
}

impl StartupError {
    /// Build an asset failure from anything printable (JsValue debug output included)
    pub fn asset(path: impl Into<String>, reason: impl std::fmt::Debug) -> Self {
        Self::AssetLoad {
            path: path.into(),
            reason: format!("{reason:?}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for StartupError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_message() {
        let err = StartupError::asset("ball.png", "404");
        assert_eq!(
            err.to_string(),
            "failed to load asset `ball.png`: \"404\""
        );
    }

    #[test]
    fn test_canvas_error_names_element() {
        let err = StartupError::CanvasNotFound("canvas".into());
        assert!(err.to_string().contains("#canvas"));
    }
}
