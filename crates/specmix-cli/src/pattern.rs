//! Synthetic single-channel test patterns.
//!
//! The mixer core deliberately does no image decoding, so the CLI feeds it
//! generated patterns instead. Each pattern spans the full 0..=255 range so
//! mixes stay visually meaningful after min-max normalization.

use anyhow::{anyhow, bail, Result};
use specmix_core::Plane;
use specmix_ops::{Component, MixSlot};

/// Built-in source pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Mid-gray constant plane.
    Flat,
    /// Horizontal intensity ramp.
    Gradient,
    /// 8x8-cell checkerboard.
    Checker,
    /// Concentric rings around the image center.
    Rings,
}

impl std::str::FromStr for Pattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "gradient" => Ok(Self::Gradient),
            "checker" => Ok(Self::Checker),
            "rings" => Ok(Self::Rings),
            other => Err(anyhow!(
                "unknown pattern '{}' (expected flat, gradient, checker or rings)",
                other
            )),
        }
    }
}

impl Pattern {
    /// Renders the pattern at the given size.
    pub fn generate(self, width: u32, height: u32) -> Plane<u8> {
        match self {
            Self::Flat => Plane::filled(width, height, 128),
            Self::Gradient => Plane::from_fn(width, height, |x, _| {
                (x as f64 * 255.0 / (width.max(2) - 1) as f64).round() as u8
            }),
            Self::Checker => Plane::from_fn(width, height, |x, y| {
                let cell = width.max(height) / 8;
                let cell = cell.max(1);
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    255
                } else {
                    0
                }
            }),
            Self::Rings => {
                let cx = (width / 2) as f64;
                let cy = (height / 2) as f64;
                Plane::from_fn(width, height, |x, y| {
                    let dx = x as f64 - cx;
                    let dy = y as f64 - cy;
                    let r = (dx * dx + dy * dy).sqrt();
                    (127.5 * (1.0 + (r * 0.5).cos())).round() as u8
                })
            }
        }
    }
}

/// A parsed `--slot` specification.
#[derive(Debug, Clone, Copy)]
pub struct SlotSpec {
    /// Source pattern.
    pub pattern: Pattern,
    /// Contribution weight.
    pub weight: f64,
    /// Spectral component to extract.
    pub component: Component,
}

impl std::str::FromStr for SlotSpec {
    type Err = anyhow::Error;

    /// Parses `<pattern>:<weight>:<component>`, e.g. `gradient:1.0:phase`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            bail!("slot spec '{}' must be <pattern>:<weight>:<component>", s);
        }
        let pattern: Pattern = parts[0].parse()?;
        let weight: f64 = parts[1]
            .parse()
            .map_err(|_| anyhow!("invalid weight '{}'", parts[1]))?;
        let component: Component = parts[2].parse()?;
        Ok(Self {
            pattern,
            weight,
            component,
        })
    }
}

impl SlotSpec {
    /// Renders the pattern and binds it into a mix slot.
    pub fn render(&self, width: u32, height: u32) -> Plane<u8> {
        self.pattern.generate(width, height)
    }

    /// Builds the slot over an already rendered plane.
    pub fn bind<'a>(&self, plane: &'a Plane<u8>) -> MixSlot<'a> {
        MixSlot::new(plane, self.weight, self.component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_span_full_range() {
        for pattern in [Pattern::Gradient, Pattern::Checker] {
            let plane = pattern.generate(64, 64);
            assert_eq!(*plane.data().iter().min().unwrap(), 0);
            assert_eq!(*plane.data().iter().max().unwrap(), 255);
        }
    }

    #[test]
    fn test_slot_spec_parsing() {
        let spec: SlotSpec = "gradient:0.5:phase".parse().unwrap();
        assert_eq!(spec.pattern, Pattern::Gradient);
        assert_eq!(spec.weight, 0.5);
        assert_eq!(spec.component, Component::Phase);

        assert!("gradient:0.5".parse::<SlotSpec>().is_err());
        assert!("plasma:1.0:real".parse::<SlotSpec>().is_err());
        assert!("flat:heavy:real".parse::<SlotSpec>().is_err());
    }
}
