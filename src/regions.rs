//! Named sheet regions.
//!
//! A region names one sprite on the sheet and gives a rough box around it.
//! Boxes are either absolute pixels or fractions of the sheet size; the
//! stock UI layout uses fractions so it works on any export resolution of
//! the same sheet. Boxes don't need to be precise: each one is padded and
//! then trimmed to its visible content.
//!
//! ```toml
//! [[regions]]
//! name = "icon_heart"
//! box = [0.37, 0.05, 0.04, 0.12]     # fractions of sheet width/height
//!
//! [[regions]]
//! name = "logo"
//! unit = "px"
//! box = [1200, 40, 640, 220]         # x, y, width, height in pixels
//! ```

use crate::imaging::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// File stems the pipeline writes next to the sprites.
pub const RESERVED_NAMES: &[&str] = &["metadata", "atlas"];

/// How the numbers in a region box are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Fractions of sheet width (x, width) and height (y, height).
    #[default]
    Fraction,
    /// Absolute pixels.
    Px,
}

/// A named box on the sheet: `[x, y, width, height]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub unit: Unit,
    #[serde(rename = "box")]
    pub bounds: [f64; 4],
}

impl Region {
    pub fn fraction(name: &str, bounds: [f64; 4]) -> Self {
        Self {
            name: name.to_string(),
            unit: Unit::Fraction,
            bounds,
        }
    }

    pub fn pixels(name: &str, rect: Rect) -> Self {
        Self {
            name: name.to_string(),
            unit: Unit::Px,
            bounds: rect.to_array().map(f64::from),
        }
    }

    /// Resolve to a pixel rectangle on a `sheet_width` × `sheet_height` sheet.
    ///
    /// Fractions are multiplied out and truncated toward zero. The result may
    /// extend past the sheet; clamping happens when the region is padded.
    pub fn resolve(&self, sheet_width: u32, sheet_height: u32) -> Rect {
        let [x, y, w, h] = self.bounds;
        match self.unit {
            Unit::Px => Rect::new(x as u32, y as u32, w as u32, h as u32),
            Unit::Fraction => {
                let sw = f64::from(sheet_width);
                let sh = f64::from(sheet_height);
                Rect::new(
                    (sw * x) as u32,
                    (sh * y) as u32,
                    (sw * w) as u32,
                    (sh * h) as u32,
                )
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        let name = &self.name;
        if name.trim().is_empty() {
            return Err("region name must not be empty".into());
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(format!("region name '{name}' is not a valid file name"));
        }
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(format!("region name '{name}' is reserved"));
        }
        if self.bounds.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(format!(
                "region '{name}': box values must be finite and non-negative"
            ));
        }
        if self.bounds[2] <= 0.0 || self.bounds[3] <= 0.0 {
            return Err(format!("region '{name}': box width and height must be > 0"));
        }
        if self.unit == Unit::Fraction && self.bounds.iter().any(|v| *v > 1.0) {
            return Err(format!(
                "region '{name}': fractional box values must be within 0-1"
            ));
        }
        Ok(())
    }
}

/// Validate a region table: every region well-formed, names unique.
pub fn validate_regions(regions: &[Region]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for region in regions {
        region.validate()?;
        if !seen.insert(region.name.as_str()) {
            return Err(format!("duplicate region name '{}'", region.name));
        }
    }
    Ok(())
}

/// The stock UI sheet layout: victory/defeat panels, stars, resource icons
/// and counters, level badges, menu buttons and grass decorations.
pub fn stock_ui_regions() -> Vec<Region> {
    [
        // Victory panel (left side)
        ("panel_victory", [0.02, 0.05, 0.15, 0.90]),
        // Stars
        ("star_filled_01", [0.18, 0.05, 0.05, 0.15]),
        ("star_filled_02", [0.24, 0.05, 0.05, 0.15]),
        ("star_filled_03", [0.30, 0.05, 0.05, 0.15]),
        ("star_empty_01", [0.18, 0.25, 0.05, 0.15]),
        ("star_empty_02", [0.24, 0.25, 0.05, 0.15]),
        ("star_empty_03", [0.30, 0.25, 0.05, 0.15]),
        ("star_empty_04", [0.18, 0.45, 0.05, 0.15]),
        ("star_empty_05", [0.24, 0.45, 0.05, 0.15]),
        ("star_empty_06", [0.30, 0.45, 0.05, 0.15]),
        // Resource icons and counters
        ("icon_heart", [0.37, 0.05, 0.04, 0.12]),
        ("counter_timer", [0.42, 0.05, 0.08, 0.12]),
        ("icon_gem", [0.51, 0.05, 0.04, 0.12]),
        ("icon_coin", [0.37, 0.20, 0.04, 0.12]),
        ("counter_coins", [0.42, 0.20, 0.08, 0.12]),
        // Level badges
        ("badge_level_24", [0.37, 0.65, 0.04, 0.15]),
        ("badge_level_25", [0.42, 0.65, 0.04, 0.15]),
        ("badge_level_26", [0.47, 0.65, 0.04, 0.15]),
        // Defeat panel (center-right)
        ("panel_defeat", [0.58, 0.05, 0.15, 0.90]),
        // Menu buttons (right side)
        ("button_new_game", [0.75, 0.05, 0.12, 0.12]),
        ("button_resume", [0.75, 0.20, 0.12, 0.12]),
        ("button_settings", [0.75, 0.35, 0.12, 0.12]),
        ("button_shop", [0.75, 0.50, 0.12, 0.12]),
        ("button_exit", [0.75, 0.65, 0.12, 0.12]),
        // Grass decorations
        ("decoration_grass_left", [0.02, 0.85, 0.08, 0.12]),
        ("decoration_grass_right", [0.92, 0.85, 0.08, 0.12]),
    ]
    .into_iter()
    .map(|(name, bounds)| Region::fraction(name, bounds))
    .collect()
}
