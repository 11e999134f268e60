//! Swipe input: Hammer.js on the carousel track, plain touch events on the
//! detail page and in stories.

use citytour_core::{Swipe, TouchPoint, classify_swipe};
use web_sys::TouchEvent;
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
#[allow(unsafe_code)]
mod hammer {
    use crate::error::WebError;
    use citytour_core::Swipe;
    use js_sys::Function;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlElement;
    use yew::Callback;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = Hammer)]
        pub type Manager;

        #[wasm_bindgen(catch, constructor)]
        fn new(element: &HtmlElement) -> Result<Manager, JsValue>;

        #[wasm_bindgen(method)]
        fn on(this: &Manager, events: &str, handler: &Function);

        #[wasm_bindgen(method)]
        fn destroy(this: &Manager);
    }

    /// A Hammer manager and its handler; dropping it detaches both.
    pub struct SwipeBinding {
        manager: Manager,
        _handler: Closure<dyn FnMut(JsValue)>,
    }

    impl SwipeBinding {
        pub fn attach(element: &HtmlElement, on_swipe: Callback<Swipe>) -> Result<Self, WebError> {
            let loaded = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Hammer"))
                .unwrap_or(false);
            if !loaded {
                return Err(WebError::LibraryMissing("Hammer"));
            }
            let manager = Manager::new(element)?;
            let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                let kind = js_sys::Reflect::get(&event, &JsValue::from_str("type"))
                    .ok()
                    .and_then(|value| value.as_string());
                match kind.as_deref() {
                    Some("swipeleft") => on_swipe.emit(Swipe::Left),
                    Some("swiperight") => on_swipe.emit(Swipe::Right),
                    _ => {}
                }
            });
            manager.on("swipeleft swiperight", handler.as_ref().unchecked_ref());
            Ok(Self {
                manager,
                _handler: handler,
            })
        }
    }

    impl Drop for SwipeBinding {
        fn drop(&mut self) {
            self.manager.destroy();
        }
    }
}

/// First changed touch of `event`, in client pixels.
#[must_use]
pub fn touch_point(event: &TouchEvent) -> Option<TouchPoint> {
    event.changed_touches().get(0).map(|touch| TouchPoint {
        x: f64::from(touch.client_x()),
        y: f64::from(touch.client_y()),
    })
}

/// Touch handlers to spread onto an element.
#[derive(Clone)]
pub struct TouchSwipe {
    pub ontouchstart: Callback<TouchEvent>,
    pub ontouchend: Callback<TouchEvent>,
}

/// Report horizontal swipes across the element the returned handlers are
/// attached to.
#[hook]
pub fn use_touch_swipe(on_swipe: Callback<Swipe>) -> TouchSwipe {
    let start = use_mut_ref(|| None::<TouchPoint>);
    let ontouchstart = {
        let start = start.clone();
        Callback::from(move |event: TouchEvent| {
            *start.borrow_mut() = touch_point(&event);
        })
    };
    let ontouchend = Callback::from(move |event: TouchEvent| {
        let began = start.borrow_mut().take();
        if let (Some(began), Some(ended)) = (began, touch_point(&event))
            && let Some(swipe) = classify_swipe(began, ended)
        {
            on_swipe.emit(swipe);
        }
    });
    TouchSwipe {
        ontouchstart,
        ontouchend,
    }
}

/// Bind Hammer swipe recognition to `node` for the component's lifetime.
/// A missing Hammer global is logged and leaves the buttons as the only
/// input.
#[hook]
pub fn use_hammer_swipe(node: &NodeRef, on_swipe: Callback<Swipe>) {
    let node = node.clone();
    use_effect_with((), move |()| {
        #[cfg(target_arch = "wasm32")]
        let binding = node.cast::<web_sys::HtmlElement>().and_then(|element| {
            hammer::SwipeBinding::attach(&element, on_swipe)
                .map_err(|err| log::warn!("carousel swipe disabled: {err}"))
                .ok()
        });
        #[cfg(not(target_arch = "wasm32"))]
        let _ = (node, on_swipe);

        move || {
            #[cfg(target_arch = "wasm32")]
            drop(binding);
        }
    });
}
