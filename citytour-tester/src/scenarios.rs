//! Scripted walkthroughs replayed against the tour core.

use anyhow::{Context, Result, bail, ensure};
use std::collections::BTreeSet;

use crate::logic::{TourDriver, TransitionEnd};
use citytour_core::{
    AdvanceOutcome, Direction, LifecycleStep, MarkerClick, PlayerState, Section, StoryBack,
    StoryExit,
};

pub type ScenarioFn = fn(&mut TourDriver) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    run: ScenarioFn,
}

impl Scenario {
    /// # Errors
    ///
    /// Returns the first expectation the walkthrough broke.
    pub fn run(&self, driver: &mut TourDriver) -> Result<()> {
        (self.run)(driver).with_context(|| format!("scenario `{}`", self.key))
    }
}

pub fn catalog() -> Vec<Scenario> {
    vec![
        Scenario {
            key: "smoke",
            name: "Smoke",
            description: "Content loads, map opens, a location opens, home tears down",
            run: smoke,
        },
        Scenario {
            key: "full-tour",
            name: "Full Tour",
            description: "Every story played to its end and every location read",
            run: full_tour,
        },
        Scenario {
            key: "rapid-input",
            name: "Rapid Input",
            description: "Navigation during a transition is dropped, not queued",
            run: rapid_input,
        },
        Scenario {
            key: "asset-retry",
            name: "Asset Failure and Retry",
            description: "A failed preload keeps the slide and the retry succeeds",
            run: asset_retry,
        },
        Scenario {
            key: "carousel-wrap",
            name: "Carousel Wrap",
            description: "Carousel wraps over enabled cards and ignores locked ones",
            run: carousel_wrap,
        },
        Scenario {
            key: "story-switch",
            name: "Story Switch Disposal",
            description: "Opening another location disposes the running story",
            run: story_switch,
        },
        Scenario {
            key: "content-lint",
            name: "Content Lint",
            description: "Bundled locations and stories are consistent",
            run: content_lint,
        },
    ]
}

pub fn get_scenario(key: &str) -> Option<Scenario> {
    catalog().into_iter().find(|scenario| scenario.key == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

/// Expand `all` into every catalog key, keeping explicit names in order.
pub fn expand_scenarios(keys: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = keys.iter().filter(|k| *k != "all").cloned().collect();
    if keys.iter().any(|k| k == "all") {
        for scenario in catalog() {
            if !expanded.iter().any(|k| k == scenario.key) {
                expanded.push(scenario.key.to_string());
            }
        }
    }
    expanded
}

fn smoke(driver: &mut TourDriver) -> Result<()> {
    driver
        .session()
        .content()
        .validate()
        .context("bundled content")?;

    let steps = driver.show_section(Section::Map);
    ensure!(
        steps.contains(&LifecycleStep::InitCarousel),
        "map section did not initialize the carousel: {steps:?}"
    );
    ensure!(
        steps
            .iter()
            .any(|step| matches!(step, LifecycleStep::InitMap { .. })),
        "map section did not initialize the map: {steps:?}"
    );

    driver.open(1)?;
    ensure!(driver.session().section() == Section::LocationDetail);

    let steps = driver.show_section(Section::Home);
    ensure!(
        steps.contains(&LifecycleStep::TeardownMap),
        "going home kept the map: {steps:?}"
    );
    ensure!(driver.session().detail_page().is_none(), "detail page survived home");
    Ok(())
}

fn full_tour(driver: &mut TourDriver) -> Result<()> {
    driver.show_section(Section::Map);
    let locations: Vec<_> = driver
        .session()
        .content()
        .locations()
        .iter()
        .filter(|location| !location.is_locked())
        .map(|location| (location.id, location.overview, location.story.is_some()))
        .collect();

    for (id, overview, has_story) in locations {
        if overview {
            driver.open(id)?;
            ensure!(
                driver.session_mut().continue_to_story().is_none(),
                "overview location {id} offered a story"
            );
            continue;
        }
        if has_story {
            driver.start_story(id)?;
            let last = driver.play_to_end()?;
            ensure!(
                driver.advance(Direction::Next) == AdvanceOutcome::AtBoundary,
                "story of location {id} moved past its last slide {last}"
            );
            driver.exit_story_to_map()?;
            ensure!(driver.session().section() == Section::Map);
        }
        let newly_visited = driver.read_to_end(id)?;
        ensure!(newly_visited, "location {id} was already visited");
        ensure!(
            !driver.read_to_end(id)?,
            "location {id} reported a second first visit"
        );
    }

    let unvisited: Vec<_> = driver
        .session()
        .content()
        .locations()
        .iter()
        .filter(|l| !l.is_locked() && !l.overview && !l.visited)
        .map(|l| l.id)
        .collect();
    ensure!(unvisited.is_empty(), "unvisited locations: {unvisited:?}");
    Ok(())
}

fn rapid_input(driver: &mut TourDriver) -> Result<()> {
    driver.start_story(2)?;
    let first = driver.advance(Direction::Next);
    ensure!(matches!(first, AdvanceOutcome::Started(_)), "first advance: {first:?}");
    for direction in [Direction::Next, Direction::Previous, Direction::Next] {
        let outcome = driver.advance(direction);
        ensure!(
            outcome == AdvanceOutcome::Busy,
            "advance {direction:?} during a transition: {outcome:?}"
        );
    }
    ensure!(driver.complete(first)? == TransitionEnd::Completed { index: 1 });
    ensure!(driver.session().stage().state() == PlayerState::ShowingSlide(1));

    // The lock is free again once the transition finished.
    let end = driver.step_story(Direction::Next)?;
    ensure!(end == TransitionEnd::Completed { index: 2 }, "{end:?}");
    Ok(())
}

fn asset_retry(driver: &mut TourDriver) -> Result<()> {
    let image = "rathaustuer-rechts.webp";
    driver.oracle_mut().block(image);
    driver.start_story(2)?;

    match driver.step_story(Direction::Next)? {
        TransitionEnd::AssetFailed { image: failed } if failed == image => {}
        other => bail!("expected the preload of {image} to fail, got {other:?}"),
    }
    ensure!(
        driver.session().stage().state() == PlayerState::ShowingSlide(0),
        "failed preload moved the story"
    );

    driver.oracle_mut().restore(image);
    let end = driver.step_story(Direction::Next)?;
    ensure!(end == TransitionEnd::Completed { index: 1 }, "retry: {end:?}");
    ensure!(
        driver.oracle().requests().len() == 2,
        "expected two preload requests, saw {:?}",
        driver.oracle().requests()
    );
    Ok(())
}

fn carousel_wrap(driver: &mut TourDriver) -> Result<()> {
    driver.show_section(Section::Map);
    let enabled: Vec<_> = driver
        .session()
        .content()
        .locations()
        .iter()
        .filter(|l| !l.is_locked())
        .map(|l| l.id)
        .collect();
    let (Some(&first), Some(&last)) = (enabled.first(), enabled.last()) else {
        bail!("no enabled locations");
    };
    let locked = driver
        .session()
        .content()
        .locations()
        .iter()
        .find(|l| l.is_locked())
        .map(|l| l.id);

    let carousel = driver.session_mut().carousel_mut();
    ensure!(carousel.current_location() == Some(first));
    carousel.previous().context("previous from the first card")?;
    ensure!(
        carousel.current_location() == Some(last),
        "previous from the first card landed on {:?}",
        carousel.current_location()
    );
    carousel.next().context("next from the last card")?;
    ensure!(carousel.current_location() == Some(first), "next did not wrap");

    if let Some(locked) = locked {
        ensure!(carousel.card_clicked(locked) == MarkerClick::Ignored);
        ensure!(!carousel.hover_start(locked), "locked card took hover");
    }

    let target = *enabled.get(1).context("need two enabled locations")?;
    ensure!(
        matches!(carousel.card_clicked(target), MarkerClick::Focus { .. }),
        "first click on card {target} did not focus it"
    );
    ensure!(carousel.card_clicked(target) == MarkerClick::OpenDetail(target));
    Ok(())
}

fn story_switch(driver: &mut TourDriver) -> Result<()> {
    let old = driver.start_story(1)?;
    let AdvanceOutcome::Started(pending) = driver.advance(Direction::Next) else {
        bail!("left door story did not advance");
    };

    driver.open(2)?;
    ensure!(!driver.session().stage().is_live(old), "old player survived");
    ensure!(
        driver.session_mut().stage_mut().settle(old, pending.ticket).is_none(),
        "disposed player accepted a late settle"
    );

    let new = driver.start_story(2)?;
    ensure!(new != old, "story handles were reused");
    ensure!(driver.session().stage().state() == PlayerState::ShowingSlide(0));

    match driver.story_back() {
        StoryBack::Exited(StoryExit::BackToDetail) => {}
        other => bail!("back on the first slide: {other:?}"),
    }
    ensure!(driver.session().current_location() == Some(2));
    Ok(())
}

fn content_lint(driver: &mut TourDriver) -> Result<()> {
    let content = driver.session().content();
    let issues = content.issues();
    ensure!(issues.is_empty(), "content issues: {}", issues.join("; "));

    let referenced: BTreeSet<_> = content
        .locations()
        .iter()
        .filter_map(|l| l.story.clone())
        .collect();
    for story in content.stories() {
        ensure!(
            referenced.contains(&story.id),
            "story `{}` is not reachable from any location",
            story.id
        );
        for (idx, slide) in story.slides.iter().enumerate() {
            ensure!(
                !slide.image.is_empty() && !slide.title.is_empty(),
                "story `{}` slide {idx} lacks an image or title",
                story.id
            );
        }
    }
    for location in content.locations().iter().filter(|l| l.is_locked()) {
        ensure!(
            location.story.is_none(),
            "locked location {} carries a story",
            location.id
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_scenario_passes_on_bundled_content() {
        for scenario in catalog() {
            let mut driver = TourDriver::bundled();
            if let Err(err) = scenario.run(&mut driver) {
                panic!("{}: {err:#}\ntrace: {:#?}", scenario.name, driver.trace());
            }
        }
    }

    #[test]
    fn keys_are_unique() {
        let keys: BTreeSet<_> = catalog().iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), catalog().len());
    }

    #[test]
    fn expand_all_appends_missing_keys_in_catalog_order() {
        let expanded = expand_scenarios(&["asset-retry".to_string(), "all".to_string()]);
        assert_eq!(expanded[0], "asset-retry");
        assert_eq!(expanded.len(), catalog().len());
        assert_eq!(expanded[1], "smoke");
    }

    #[test]
    fn expand_without_all_preserves_order() {
        let expanded = expand_scenarios(&["carousel-wrap".to_string(), "smoke".to_string()]);
        assert_eq!(expanded, vec!["carousel-wrap", "smoke"]);
    }

    #[test]
    fn full_tour_takes_simulated_time() {
        let mut driver = TourDriver::bundled();
        full_tour(&mut driver).unwrap();
        assert!(driver.clock().now_ms() > 0);
        assert!(!driver.oracle().requests().is_empty());
    }

    #[test]
    fn unknown_scenario_is_none() {
        assert!(get_scenario("weather-effects").is_none());
    }
}
