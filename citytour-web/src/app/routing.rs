use crate::app::state::AppState;
use crate::router::Route;
use citytour_core::{LocationId, Section, TourSession};
use yew::prelude::*;
use yew_router::prelude::Navigator;

/// What the session has to do to catch up with the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RouteTarget {
    Show(Section),
    Open(LocationId),
    /// The URL names something that cannot be shown; rewrite it.
    Redirect(Route),
}

fn next_route_for_section(
    section: Section,
    location: Option<LocationId>,
    current_route: Option<&Route>,
) -> Option<Route> {
    if matches!(current_route, Some(Route::NotFound)) {
        return None;
    }
    let new_route = Route::from_section(section, location);
    if Some(&new_route) == current_route {
        None
    } else {
        Some(new_route)
    }
}

fn next_target_for_route(session: &TourSession, route: Option<&Route>) -> Option<RouteTarget> {
    match route? {
        Route::NotFound => None,
        Route::Location { id } => {
            if session.section() == Section::LocationDetail
                && session.current_location() == Some(*id)
            {
                return None;
            }
            let openable = session
                .content()
                .location(*id)
                .is_some_and(|location| !location.is_locked());
            if openable {
                Some(RouteTarget::Open(*id))
            } else {
                log::warn!("ignoring route to location {id}");
                Some(RouteTarget::Redirect(Route::from_section(
                    session.section(),
                    session.current_location(),
                )))
            }
        }
        route => {
            let section = route.section()?;
            (section != session.section()).then_some(RouteTarget::Show(section))
        }
    }
}

/// Push the route matching the session whenever the visible section
/// changes. The first run is skipped so a deep link is applied before it
/// could be overwritten.
#[hook]
pub fn use_sync_route_with_section(
    state: &AppState,
    navigator: Option<Navigator>,
    active_route: Option<Route>,
) {
    let mounted = use_mut_ref(|| false);
    let deps = state.read(|session| (session.section(), session.current_location()));
    use_effect_with(deps, move |(section, location)| {
        let first_run = !std::mem::replace(&mut *mounted.borrow_mut(), true);
        if !first_run
            && let (Some(nav), Some(new_route)) = (
                navigator.as_ref(),
                next_route_for_section(*section, *location, active_route.as_ref()),
            )
        {
            nav.push(&new_route);
        }
    });
}

/// Apply URL changes (deep links, back/forward) to the session.
#[hook]
pub fn use_sync_section_with_route(
    state: &AppState,
    navigator: Option<Navigator>,
    route: Option<Route>,
) {
    let state = state.clone();
    use_effect_with(route, move |route| {
        let target = state.read(|session| next_target_for_route(session, route.as_ref()));
        match target {
            Some(RouteTarget::Show(section)) => {
                crate::app::view::handlers::show_section(&state, section);
            }
            Some(RouteTarget::Open(id)) => {
                crate::app::view::handlers::open_location(&state, id);
            }
            Some(RouteTarget::Redirect(to)) => {
                if let Some(nav) = navigator.as_ref() {
                    nav.replace(&to);
                }
            }
            None => {}
        }
    });
}
