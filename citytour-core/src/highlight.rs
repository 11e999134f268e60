//! Geometry for focusing a region of the detail image.

use crate::constants::HIGHLIGHT_ZOOM;
use serde::{Deserialize, Serialize};

/// Rectangle in percent of the image box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightArea {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The full image box in percent coordinates.
    pub const UNIT_PERCENT: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

/// `clip-path: inset(...)` distances, all in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    #[must_use]
    pub fn css_clip_path(&self) -> String {
        format!(
            "inset({}% {}% {}% {}%)",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Translation that moves `target` to the centre of `container`.
///
/// Per axis: `(containerCenter - targetCenter) / (containerSize / targetSize)`.
/// A degenerate container yields no translation on that axis.
#[must_use]
pub fn centering_translation(container: Rect, target: Rect) -> Translation {
    let (ccx, ccy) = container.center();
    let (tcx, tcy) = target.center();
    let axis = |c_center: f64, t_center: f64, c_size: f64, t_size: f64| {
        if c_size.abs() < f64::EPSILON {
            0.0
        } else {
            (c_center - t_center) * t_size / c_size
        }
    };
    Translation {
        x: axis(ccx, tcx, container.width, target.width),
        y: axis(ccy, tcy, container.height, target.height),
    }
}

impl HighlightArea {
    #[must_use]
    pub fn is_within_image(&self) -> bool {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        in_range(self.top)
            && in_range(self.left)
            && self.width > 0.0
            && self.height > 0.0
            && self.left + self.width <= 100.0
            && self.top + self.height <= 100.0
    }

    /// Project onto an image box given in any unit.
    #[must_use]
    pub fn to_rect(&self, image: Rect) -> Rect {
        Rect {
            x: image.x + image.width * self.left / 100.0,
            y: image.y + image.height * self.top / 100.0,
            width: image.width * self.width / 100.0,
            height: image.height * self.height / 100.0,
        }
    }

    #[must_use]
    pub fn clip_insets(&self) -> Insets {
        Insets {
            top: self.top,
            right: 100.0 - self.left - self.width,
            bottom: 100.0 - self.top - self.height,
            left: self.left,
        }
    }
}

/// Everything the detail image needs to focus one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightFrame {
    pub area: HighlightArea,
    pub scale: f64,
    /// Percent of the image element, ready for CSS `translate`.
    pub translate: Translation,
}

impl HighlightFrame {
    #[must_use]
    pub fn new(area: HighlightArea) -> Self {
        Self {
            area,
            scale: HIGHLIGHT_ZOOM,
            translate: centering_translation(Rect::UNIT_PERCENT, area.to_rect(Rect::UNIT_PERCENT)),
        }
    }

    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "scale({}) translate({}%, {}%)",
            self.scale, self.translate.x, self.translate.y
        )
    }
}

/// Highlight for snippet `snippet`, cycling through `areas`.
#[must_use]
pub fn highlight_for(areas: &[HighlightArea], snippet: usize) -> Option<HighlightFrame> {
    if areas.is_empty() {
        return None;
    }
    Some(HighlightFrame::new(areas[snippet % areas.len()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(top: f64, left: f64, width: f64, height: f64) -> HighlightArea {
        HighlightArea {
            top,
            left,
            width,
            height,
        }
    }

    #[test]
    fn centred_region_needs_no_translation() {
        let frame = HighlightFrame::new(area(40.0, 40.0, 20.0, 20.0));
        assert_eq!(frame.translate, Translation { x: 0.0, y: 0.0 });
        assert!((frame.scale - HIGHLIGHT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn translation_follows_formula_per_axis() {
        let container = Rect {
            x: 0.0,
            y: 0.0,
            width: 400.0,
            height: 200.0,
        };
        let target = Rect {
            x: 300.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
        };
        let t = centering_translation(container, target);
        // (200 - 350) / (400 / 100) and (100 - 25) / (200 / 50)
        assert!((t.x - -37.5).abs() < 1e-9);
        assert!((t.y - 18.75).abs() < 1e-9);
    }

    #[test]
    fn degenerate_container_does_not_divide_by_zero() {
        let t = centering_translation(
            Rect {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            Rect::UNIT_PERCENT,
        );
        assert_eq!(t, Translation::default());
    }

    #[test]
    fn highlight_cycles_through_areas() {
        let areas = [area(0.0, 0.0, 10.0, 10.0), area(50.0, 50.0, 10.0, 10.0)];
        assert_eq!(highlight_for(&areas, 0).unwrap().area, areas[0]);
        assert_eq!(highlight_for(&areas, 3).unwrap().area, areas[1]);
        assert!(highlight_for(&[], 0).is_none());
    }

    #[test]
    fn clip_insets_cut_out_region() {
        let insets = area(10.0, 20.0, 30.0, 40.0).clip_insets();
        assert_eq!(insets.css_clip_path(), "inset(10% 50% 50% 20%)");
    }

    #[test]
    fn bounds_check_rejects_overflowing_area() {
        assert!(area(10.0, 10.0, 50.0, 50.0).is_within_image());
        assert!(!area(60.0, 10.0, 10.0, 50.0).is_within_image());
        assert!(!area(10.0, 10.0, 0.0, 5.0).is_within_image());
    }
}
