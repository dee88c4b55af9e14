//! Interactive notch set editing.
//!
//! The editor owns the live [`NotchSet`] of one session. Pointer positions
//! arrive in display space and go through a [`CoordinateMapper`]. Every
//! operation reports a [`Change`]; the host persists [`NotchSetEditor::serialize`]
//! after `Modified` and redraws from [`NotchSetEditor::render_frame`] after
//! anything but `Unchanged`.

#[cfg(test)]
mod tests;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::coords::CoordinateMapper;
use crate::notch_set::{Circle, NotchSet, MIN_RADIUS};
use crate::raster::SpectrumDescriptor;

/// Session parameters set by the operator; not part of the notch text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Radius of circles added by clicking.
    pub default_radius: f32,
    /// Also add the conjugate point when adding a circle.
    pub mirror_enabled: bool,
    /// Pointer tolerance in display pixels beyond a circle's radius.
    pub hit_slack: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_radius: 8.0,
            mirror_enabled: true,
            hit_slack: 6.0,
        }
    }
}

/// Outcome of an editor operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing happened.
    Unchanged,
    /// Only transient view state changed (drag started or ended).
    Redraw,
    /// The notch set changed; persist and redraw.
    Modified,
}

impl Change {
    #[inline]
    pub fn is_modified(self) -> bool {
        self == Change::Modified
    }

    #[inline]
    pub fn needs_redraw(self) -> bool {
        self != Change::Unchanged
    }
}

/// Radius drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub index: usize,
    /// Pointer position in display space when the drag began.
    pub anchor: Vec2,
    pub original_r: f32,
}

/// A single editor input, for hosts that queue events.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    Add { x: i32, y: i32, r: f32, mirror: bool },
    AddAtDisplay(Vec2),
    RemoveNearest(Vec2),
    BeginResize(Vec2),
    UpdateResize(Vec2),
    EndResize,
    Clear,
    Load(String),
}

/// Display-space circle ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedCircle {
    pub index: usize,
    pub center: Vec2,
    pub radius: f32,
    /// Circle currently being resized.
    pub active: bool,
}

/// Everything needed to draw the editor surface, in display space.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub display_size: Vec2,
    pub dc_center: Vec2,
    /// In insertion order, so later circles draw on top.
    pub circles: Vec<RenderedCircle>,
}

#[derive(Debug, Clone)]
pub struct NotchSetEditor {
    notches: NotchSet,
    desc: SpectrumDescriptor,
    mapper: CoordinateMapper,
    settings: EditorSettings,
    dragging: Option<DragState>,
}

impl NotchSetEditor {
    pub fn new(
        desc: SpectrumDescriptor,
        display_width: f32,
        display_height: f32,
        settings: EditorSettings,
    ) -> Self {
        Self {
            notches: NotchSet::new(),
            desc,
            mapper: CoordinateMapper::new(desc, display_width, display_height),
            settings,
            dragging: None,
        }
    }

    pub fn with_notches(mut self, notches: NotchSet) -> Self {
        self.notches = notches;
        self
    }

    #[inline]
    pub fn notches(&self) -> &NotchSet {
        &self.notches
    }

    pub fn into_notches(self) -> NotchSet {
        self.notches
    }

    #[inline]
    pub fn desc(&self) -> SpectrumDescriptor {
        self.desc
    }

    #[inline]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[inline]
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.settings = settings;
    }

    #[inline]
    pub fn dragging(&self) -> Option<&DragState> {
        self.dragging.as_ref()
    }

    /// Rebuilds the mapper for a resized display surface.
    pub fn set_display_size(&mut self, width: f32, height: f32) -> Change {
        let mapper = CoordinateMapper::new(self.desc, width, height);
        if mapper == self.mapper {
            return Change::Unchanged;
        }
        self.mapper = mapper;
        Change::Redraw
    }

    pub fn apply(&mut self, action: EditorAction) -> Change {
        match action {
            EditorAction::Add { x, y, r, mirror } => self.add(x, y, r, mirror),
            EditorAction::AddAtDisplay(p) => self.add_at_display(p),
            EditorAction::RemoveNearest(p) => self.remove_nearest(p),
            EditorAction::BeginResize(p) => self.begin_resize(p),
            EditorAction::UpdateResize(p) => self.update_resize(p),
            EditorAction::EndResize => self.end_resize(),
            EditorAction::Clear => self.clear(),
            EditorAction::Load(text) => self.load(&text),
        }
    }

    /// Appends `{x, y, r}`, and with `mirror` its conjugate
    /// `{W-1-x, H-1-y, r}` unless that is the same point.
    pub fn add(&mut self, x: i32, y: i32, r: f32, mirror: bool) -> Change {
        let r = r.max(MIN_RADIUS);
        self.notches.push(Circle::new(x, y, r));

        if mirror {
            let (mx, my) = self.desc.conjugate(x, y);
            if (mx, my) != (x, y) {
                self.notches.push(Circle::new(mx, my, r));
            }
        }

        Change::Modified
    }

    /// Adds a circle under the pointer using the session defaults.
    pub fn add_at_display(&mut self, pointer: Vec2) -> Change {
        let p = self.mapper.to_spectrum(pointer);
        self.add(
            p.x,
            p.y,
            self.settings.default_radius,
            self.settings.mirror_enabled,
        )
    }

    /// Index of the circle nearest to `pointer` within tolerance.
    ///
    /// Scans from the most recently added circle, so on equal distance the
    /// topmost one wins.
    pub fn hit_test(&self, pointer: Vec2) -> Option<usize> {
        let scale = self.mapper.radius_scale();
        let mut best: Option<(usize, f32)> = None;

        for (index, circle) in self.notches.iter().enumerate().rev() {
            let center = self
                .mapper
                .to_display(Vec2::new(circle.x as f32, circle.y as f32));
            let dist = center.distance(pointer);
            let tolerance = circle.r * scale + self.settings.hit_slack;

            if dist <= tolerance && best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((index, dist));
            }
        }

        best.map(|(index, _)| index)
    }

    /// Removes the circle nearest to `pointer`, if any is within tolerance.
    pub fn remove_nearest(&mut self, pointer: Vec2) -> Change {
        let Some(index) = self.hit_test(pointer) else {
            return Change::Unchanged;
        };

        self.dragging = None;
        self.notches.remove(index);
        Change::Modified
    }

    /// Starts a radius drag on the circle under `pointer`.
    ///
    /// Any drag already in progress ends first.
    pub fn begin_resize(&mut self, pointer: Vec2) -> Change {
        let ended = self.dragging.take().is_some();

        match self.hit_test(pointer) {
            Some(index) => {
                let original_r = self.notches.circles()[index].r;
                self.dragging = Some(DragState {
                    index,
                    anchor: pointer,
                    original_r,
                });
                Change::Redraw
            }
            None if ended => Change::Redraw,
            None => Change::Unchanged,
        }
    }

    /// Sets the dragged radius from the horizontal pointer offset.
    pub fn update_resize(&mut self, pointer: Vec2) -> Change {
        let Some(drag) = self.dragging else {
            return Change::Unchanged;
        };

        let delta = self.mapper.radius_to_spectrum(pointer.x - drag.anchor.x);
        let new_r = (drag.original_r + delta).round().max(MIN_RADIUS);

        match self.notches.get_mut(drag.index) {
            Some(circle) if circle.r != new_r => {
                circle.r = new_r;
                Change::Modified
            }
            _ => Change::Unchanged,
        }
    }

    pub fn end_resize(&mut self) -> Change {
        match self.dragging.take() {
            Some(_) => Change::Redraw,
            None => Change::Unchanged,
        }
    }

    pub fn clear(&mut self) -> Change {
        self.dragging = None;
        if self.notches.is_empty() {
            return Change::Unchanged;
        }
        self.notches.clear();
        Change::Modified
    }

    /// Replaces the whole set, e.g. with fresh detection results.
    pub fn replace(&mut self, notches: NotchSet) -> Change {
        self.dragging = None;
        if notches == self.notches {
            return Change::Unchanged;
        }
        self.notches = notches;
        Change::Modified
    }

    /// Replaces the set from persisted text; malformed text loads as empty.
    pub fn load(&mut self, text: &str) -> Change {
        self.replace(NotchSet::parse_or_empty(text))
    }

    pub fn serialize(&self) -> String {
        self.notches.serialize()
    }

    pub fn render_frame(&self) -> RenderFrame {
        let (cx, cy) = self.desc.dc_center();
        let active = self.dragging.map(|d| d.index);

        let circles = self
            .notches
            .iter()
            .enumerate()
            .map(|(index, circle)| RenderedCircle {
                index,
                center: self
                    .mapper
                    .to_display(Vec2::new(circle.x as f32, circle.y as f32)),
                radius: self.mapper.radius_to_display(circle.r),
                active: active == Some(index),
            })
            .collect();

        RenderFrame {
            display_size: self.mapper.display_size(),
            dc_center: self.mapper.to_display(Vec2::new(cx as f32, cy as f32)),
            circles,
        }
    }
}
