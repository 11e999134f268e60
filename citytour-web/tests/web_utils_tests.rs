#[cfg(target_arch = "wasm32")]
use citytour_web::dom;
use citytour_web::i18n;
use citytour_web::paths;
use citytour_web::router::Route;
use citytour_core::Section;
use yew_router::Routable;

#[cfg(target_arch = "wasm32")]
#[test]
fn dom_helpers_find_the_window() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn dom_helpers_handle_missing_window() {
    assert!(citytour_web::dom::window().is_none());
    assert!(citytour_web::dom::element("map-container").is_none());
    assert!(citytour_web::dom::element_width("location-carousel").is_none());
}

#[test]
fn i18n_bundle_switches_and_formats() {
    i18n::set_lang("en");
    assert_eq!(i18n::current_lang(), "en");

    assert_eq!(
        i18n::tr(
            "story.status",
            &[("n", "2"), ("total", "6"), ("title", "Die Tür")]
        ),
        "Slide 2 of 6: Die Tür"
    );
    assert_eq!(i18n::t("missing.key"), "missing.key");

    i18n::set_lang("xx");
    assert_eq!(i18n::current_lang(), "en");
    i18n::set_lang("de");
    assert_eq!(i18n::t("detail.back_to_map"), "Zurück zur Karte");
}

#[test]
fn every_locale_has_every_key() {
    fn keys(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
        if let Some(map) = value.as_object() {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                keys(&path, child, out);
            }
        } else {
            out.push(prefix.to_string());
        }
    }
    let de: serde_json::Value =
        serde_json::from_str(include_str!("../i18n/de.json")).expect("de parses");
    let en: serde_json::Value =
        serde_json::from_str(include_str!("../i18n/en.json")).expect("en parses");
    let (mut de_keys, mut en_keys) = (Vec::new(), Vec::new());
    keys("", &de, &mut de_keys);
    keys("", &en, &mut en_keys);
    de_keys.sort();
    en_keys.sort();
    assert_eq!(de_keys, en_keys);
}

#[test]
fn image_paths_are_encoded() {
    assert_eq!(
        paths::image_path("treppe 1.jpg"),
        paths::asset_path("static/images/treppe%201.jpg")
    );
}

#[test]
fn routes_map_to_sections() {
    assert_eq!(Route::recognize("/map"), Some(Route::Map));
    assert_eq!(Route::recognize("/nowhere"), Some(Route::NotFound));
    assert_eq!(Route::Map.section(), Some(Section::Map));
    assert_eq!(
        Route::from_section(Section::LocationDetail, Some(1)).to_path(),
        "/location/1"
    );
}
