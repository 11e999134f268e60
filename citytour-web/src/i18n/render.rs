use crate::i18n::bundle::with_bundle;
use serde_json::Value;

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(root, |node, part| node.get(part))?
        .as_str()
}

/// Replace `{name}` placeholders. Unknown placeholders stay as written.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

/// Translate `key` in the current language, falling back to German and then
/// to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, &[])
}

/// [`t`] with `{name}` substitution.
#[must_use]
pub fn tr(key: &str, vars: &[(&str, &str)]) -> String {
    with_bundle(|bundle| {
        lookup(&bundle.translations, key)
            .or_else(|| lookup(&bundle.fallback, key))
            .map(|template| fill(template, vars))
    })
    .unwrap_or_else(|| key.to_string())
}
