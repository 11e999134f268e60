// Accessibility helpers

/// Id of the polite live region announcing slide changes.
pub const STATUS_REGION_ID: &str = "tour-status";

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Returns critical accessibility CSS that should be injected early in the page load.
/// Includes focus ring styles, screen reader helper classes and the reduced-motion override.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #c8102e;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;} .reduce-motion *{animation:none!important;transition:none!important}"
}

/// Update the live region status for screen readers
///
/// Updates the text content of the status region if present.
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::element(STATUS_REGION_ID) {
        node.set_text_content(Some(msg));
    }
}

/// Whether the user asked the system for reduced motion.
#[must_use]
pub fn prefers_reduced_motion() -> bool {
    crate::dom::window()
        .and_then(|win| win.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}

/// Toggle the `reduce-motion` class on the root element, which switches off
/// entrance animations and transitions.
pub fn apply_reduced_motion(enabled: bool) {
    let Some(html) = crate::dom::document().and_then(|doc| doc.document_element()) else {
        return;
    };
    let _ = if enabled {
        html.class_list().add_1("reduce-motion")
    } else {
        html.class_list().remove_1("reduce-motion")
    };
}
