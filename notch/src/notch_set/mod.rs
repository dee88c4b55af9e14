//! The notch set model and its JSON exchange format.
//!
//! Text form: `[{"x":100,"y":50,"r":10}, ...]`. Both the peak detector and the
//! interactive editor read and write this form.


use glam::IVec2;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Radius assumed for entries that omit `r`.
pub const DEFAULT_RADIUS: f32 = 8.0;
/// Smallest radius a circle may have.
pub const MIN_RADIUS: f32 = 1.0;

/// Circular notch region in spectrum pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub x: i32,
    pub y: i32,
    #[serde(serialize_with = "serialize_radius")]
    pub r: f32,
}

impl Circle {
    pub const fn new(x: i32, y: i32, r: f32) -> Self {
        Self { x, y, r }
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

/// Whole radii are written as integers (`"r":8`, not `"r":8.0`).
fn serialize_radius<S: Serializer>(r: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    if r.fract() == 0.0 && r.abs() < i64::MAX as f32 {
        serializer.serialize_i64(*r as i64)
    } else {
        serializer.serialize_f32(*r)
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of circles")]
    NotAnArray,
    #[error("entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Lenient wire form of one entry; numbers may be fractional or missing.
#[derive(Debug, Deserialize)]
struct RawCircle {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default = "default_raw_radius")]
    r: f64,
}

fn default_raw_radius() -> f64 {
    DEFAULT_RADIUS as f64
}

/// Ordered collection of notch circles.
///
/// Order is insertion order. Duplicates and overlaps are allowed; masks union
/// them by maximum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotchSet {
    circles: Vec<Circle>,
}

impl NotchSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.circles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    #[inline]
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Circle> {
        self.circles.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Circle> {
        self.circles.get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Circle> {
        self.circles.iter()
    }

    pub fn push(&mut self, circle: Circle) {
        self.circles.push(circle);
    }

    pub fn remove(&mut self, index: usize) -> Circle {
        self.circles.remove(index)
    }

    pub fn clear(&mut self) {
        self.circles.clear();
    }

    /// Compact JSON text of the set.
    pub fn serialize(&self) -> String {
        // Plain numeric structs always serialize.
        serde_json::to_string(&self.circles).unwrap_or_else(|_| "[]".to_string())
    }

    /// Parses the exchange format.
    ///
    /// Blank text is the empty set. Missing `x`/`y` default to 0 and a missing
    /// `r` to [`DEFAULT_RADIUS`]; fractional coordinates truncate toward zero
    /// and radii below [`MIN_RADIUS`] are raised to it.
    pub fn parse(text: &str) -> Result<NotchSet, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(NotchSet::new());
        }

        let value: serde_json::Value = serde_json::from_str(text)?;
        let entries = match value {
            serde_json::Value::Array(entries) => entries,
            _ => return Err(ParseError::NotAnArray),
        };

        let circles = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let raw: RawCircle =
                    serde_json::from_value(entry).map_err(|e| ParseError::InvalidEntry {
                        index,
                        reason: e.to_string(),
                    })?;
                raw.into_circle(index)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NotchSet { circles })
    }

    /// Parses `text`, falling back to an empty set on malformed input.
    pub fn parse_or_empty(text: &str) -> NotchSet {
        match Self::parse(text) {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!("Discarding malformed notch set text: {}", err);
                NotchSet::new()
            }
        }
    }
}

impl RawCircle {
    fn into_circle(self, index: usize) -> Result<Circle, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidEntry {
            index,
            reason: reason.to_string(),
        };

        let coordinate_range = i32::MIN as f64..=i32::MAX as f64;
        let (x, y) = (self.x.trunc(), self.y.trunc());
        if !coordinate_range.contains(&x) || !coordinate_range.contains(&y) {
            return Err(invalid("coordinate out of range"));
        }

        // Checked after narrowing: finite f64 radii above f32::MAX become inf.
        let r = self.r as f32;
        if !r.is_finite() {
            return Err(invalid("radius out of range"));
        }

        Ok(Circle {
            x: x as i32,
            y: y as i32,
            r: r.max(MIN_RADIUS),
        })
    }
}

impl From<Vec<Circle>> for NotchSet {
    fn from(circles: Vec<Circle>) -> Self {
        Self { circles }
    }
}

impl FromIterator<Circle> for NotchSet {
    fn from_iter<I: IntoIterator<Item = Circle>>(iter: I) -> Self {
        Self {
            circles: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NotchSet {
    type Item = &'a Circle;
    type IntoIter = std::slice::Iter<'a, Circle>;

    fn into_iter(self) -> Self::IntoIter {
        self.circles.iter()
    }
}
