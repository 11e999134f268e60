#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod bootstrap;
pub mod keyboard;
#[cfg(target_arch = "wasm32")]
mod map_lifecycle;
pub mod routing;
pub mod state;
pub mod view;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let app_state = state::use_app_state();
    bootstrap::use_bootstrap(&app_state);

    let navigator = use_navigator();
    let route = use_route::<Route>();
    let handlers = view::AppHandlers::new(&app_state, navigator.clone());

    keyboard::use_keyboard(&app_state, &handlers);
    map_lifecycle::use_map_runtime(&app_state, &handlers);
    routing::use_sync_route_with_section(&app_state, navigator.clone(), route.clone());
    routing::use_sync_section_with_route(&app_state, navigator, route.clone());

    view::render_app(&app_state, &handlers, route.as_ref())
}
