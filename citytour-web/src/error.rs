use citytour_core::TourError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser layer: missing globals, missing DOM anchors and
/// rejected JavaScript calls.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("`{0}` is not loaded")]
    LibraryMissing(&'static str),
    #[error("no browser window")]
    NoWindow,
    #[error(transparent)]
    Tour(#[from] TourError),
    #[error("javascript error: {0}")]
    Js(String),
}

impl WebError {
    #[must_use]
    pub fn missing_target(id: &str) -> Self {
        Self::Tour(TourError::MissingTarget(id.to_string()))
    }
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(crate::dom::js_error_message(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_target_names_the_anchor() {
        let err = WebError::missing_target("map-container");
        assert_eq!(err.to_string(), "missing render target `map-container`");
    }

    #[test]
    fn tour_errors_pass_through() {
        let err = WebError::from(TourError::UnknownLocation(9));
        assert_eq!(err.to_string(), "unknown location 9");
    }
}
