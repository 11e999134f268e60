//! Static asset URLs under the deployment base path.
//!
//! `PUBLIC_URL` is read at compile time (`/tour` when the app is served from
//! a sub directory). Without it every URL is root-anchored.

const PUBLIC_URL: Option<&str> = option_env!("PUBLIC_URL");

fn public_base() -> &'static str {
    PUBLIC_URL.unwrap_or("").trim().trim_end_matches('/')
}

fn join(base: &str, relative: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    format!("{base}/{}", relative.trim_start_matches('/'))
}

#[must_use]
pub fn asset_path(relative: &str) -> String {
    join(public_base(), relative)
}

/// URL of a tour image as named in the content files. Spaces in file names
/// are percent-encoded.
#[must_use]
pub fn image_path(file_name: &str) -> String {
    asset_path(&format!("static/images/{}", file_name.replace(' ', "%20")))
}

/// Router basename, `None` when the app lives at the root.
#[must_use]
pub fn router_base() -> Option<String> {
    basename(public_base())
}

fn basename(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    (!base.is_empty()).then(|| base.to_string())
}
