//! Pointer-driven drag, resize and rotate sessions.
//!
//! A session starts on pointer-down over an element, produces throttled
//! [`LiveTransform`]s while the pointer moves and yields a
//! [`SessionOutcome`] on pointer-up. The engine never touches the deck;
//! the caller writes the outcome back to the element.

mod handles;
mod resize;
mod rotate;
mod throttle;

pub use handles::{Handle, HandleKind, ROTATE_HANDLE_OFFSET, ResizeHandle, handle_at, handles, hit_test_handles};
pub use resize::{resize, text_scale};
pub use rotate::{angle_degrees, rotated, snap_angle};
pub use throttle::{DEFAULT_FRAME_INTERVAL, FrameThrottle, Instant};

use crate::config::EditorConfig;
use crate::elements::{Element, ElementId, Geometry, SizeLimits};
use crate::input::Modifiers;
use crate::mapper::CoordinateMapper;
use kurbo::Point;

/// The manipulation a session performs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionKind {
    Drag,
    Resize(ResizeHandle),
    Rotate {
        /// Element center in screen space at session start.
        center_screen: Point,
        /// Angle from the center to the pointer at session start, in degrees.
        start_angle: f64,
    },
}

/// Uncommitted state of the element being manipulated, for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveTransform {
    pub geometry: Geometry,
    /// Displayed font size of a text element during a resize.
    pub font_size: Option<f64>,
    /// Displayed letter spacing of a text element during a resize.
    pub letter_spacing: Option<f64>,
    /// Current text scale (1.0 outside resizes).
    pub text_scale: f64,
}

/// An in-progress interaction.
#[derive(Debug, Clone)]
pub struct Session {
    pub element_id: ElementId,
    pub kind: SessionKind,
    /// Element geometry at session start, clamped.
    pub origin: Geometry,
    pub pointer_start: Point,
    pub last_pointer: Point,
    pub last_modifiers: Modifiers,
    base_font_size: Option<f64>,
    base_letter_spacing: Option<f64>,
    live: LiveTransform,
}

impl Session {
    pub fn live(&self) -> &LiveTransform {
        &self.live
    }

    fn live_at_rest(&self) -> LiveTransform {
        LiveTransform {
            geometry: self.origin,
            font_size: self.base_font_size,
            letter_spacing: self.base_letter_spacing,
            text_scale: 1.0,
        }
    }
}

/// Committed result of a session, to be written back to the element.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub element_id: ElementId,
    pub geometry: Geometry,
    /// New font size when a text element was resized.
    pub font_size: Option<f64>,
    /// New letter spacing when a resized text element had one.
    pub letter_spacing: Option<f64>,
}

/// Turns pointer samples into element geometry.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    mapper: CoordinateMapper,
    limits: SizeLimits,
    min_font_size: f64,
    snap_increment: f64,
    throttle: FrameThrottle,
    session: Option<Session>,
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl TransformEngine {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            mapper: CoordinateMapper::default(),
            limits: config.size_limits(),
            min_font_size: config.min_font_size,
            snap_increment: config.rotation_snap_degrees,
            throttle: FrameThrottle::new(config.frame_interval()),
            session: None,
        }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.mapper.set_scale(scale);
    }

    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Live geometry of the active session.
    pub fn live(&self) -> Option<&LiveTransform> {
        self.session.as_ref().map(Session::live)
    }

    /// Start a session on `element` at screen position `pointer`.
    ///
    /// A session already in progress is ended at its last pointer position
    /// and its outcome returned, so the caller can commit it first.
    pub fn begin(
        &mut self,
        element: &Element,
        handle: HandleKind,
        pointer: Point,
    ) -> Option<SessionOutcome> {
        let previous = self.cancel();

        let origin = element.geometry.clamped(self.limits);
        let kind = match handle {
            HandleKind::Body => SessionKind::Drag,
            HandleKind::Resize(resize) => SessionKind::Resize(resize),
            HandleKind::Rotate => {
                let center_screen = self.mapper.canvas_to_screen(origin.center());
                SessionKind::Rotate {
                    center_screen,
                    start_angle: angle_degrees(center_screen, pointer),
                }
            }
        };
        let base_font_size = element.font_size();
        let base_letter_spacing = element.letter_spacing();

        log::debug!("Session {:?} started on element {}", kind, element.id);
        self.throttle.reset();
        self.session = Some(Session {
            element_id: element.id.clone(),
            kind,
            origin,
            pointer_start: pointer,
            last_pointer: pointer,
            last_modifiers: Modifiers::NONE,
            base_font_size,
            base_letter_spacing,
            live: LiveTransform {
                geometry: origin,
                font_size: base_font_size,
                letter_spacing: base_letter_spacing,
                text_scale: 1.0,
            },
        });
        previous
    }

    /// Feed a pointer sample taken at `now`.
    ///
    /// Returns the new live transform, or `None` when there is no session or
    /// the sample was throttled. The position is remembered either way.
    pub fn update(
        &mut self,
        pointer: Point,
        modifiers: Modifiers,
        now: Instant,
    ) -> Option<&LiveTransform> {
        let session = self.session.as_mut()?;
        session.last_pointer = pointer;
        session.last_modifiers = modifiers;
        if !self.throttle.should_emit(now) {
            return None;
        }

        let live = self.evaluate(self.session.as_ref()?, pointer, modifiers);
        log::trace!("Live geometry {:?}", live.geometry);
        let session = self.session.as_mut()?;
        session.live = live;
        Some(&session.live)
    }

    /// End the session with the final pointer sample.
    pub fn end(&mut self, pointer: Point, modifiers: Modifiers) -> Option<SessionOutcome> {
        let session = self.session.take()?;
        Some(self.commit(&session, pointer, modifiers))
    }

    /// End the session at the last known pointer position.
    pub fn cancel(&mut self) -> Option<SessionOutcome> {
        let session = self.session.take()?;
        Some(self.commit(&session, session.last_pointer, session.last_modifiers))
    }

    fn commit(&self, session: &Session, pointer: Point, modifiers: Modifiers) -> SessionOutcome {
        let live = self.evaluate(session, pointer, modifiers);
        let geometry = live.geometry.clamped(self.limits);

        let resized = matches!(session.kind, SessionKind::Resize(_))
            && (geometry.width != session.origin.width || geometry.height != session.origin.height);
        let (font_size, letter_spacing) = match (resized, session.base_font_size) {
            (true, Some(base)) => (
                Some((base * live.text_scale).max(self.min_font_size).round()),
                session
                    .base_letter_spacing
                    .map(|spacing| round_to_hundredths(spacing * live.text_scale)),
            ),
            _ => (None, None),
        };

        log::debug!(
            "Session {:?} committed on element {}: {:?}",
            session.kind,
            session.element_id,
            geometry
        );
        SessionOutcome {
            element_id: session.element_id.clone(),
            geometry,
            font_size,
            letter_spacing,
        }
    }

    fn evaluate(&self, session: &Session, pointer: Point, modifiers: Modifiers) -> LiveTransform {
        let origin = session.origin;
        let delta = self.mapper.delta_to_canvas(pointer - session.pointer_start);

        match session.kind {
            SessionKind::Drag => LiveTransform {
                geometry: Geometry {
                    x: (origin.x + delta.x).max(0.0),
                    y: (origin.y + delta.y).max(0.0),
                    ..origin
                },
                ..session.live_at_rest()
            },
            SessionKind::Resize(handle) => {
                let geometry = resize(origin, handle, delta, self.limits);
                let scale = text_scale(&origin, &geometry);
                LiveTransform {
                    geometry,
                    font_size: session.base_font_size.map(|size| size * scale),
                    letter_spacing: session.base_letter_spacing.map(|spacing| spacing * scale),
                    text_scale: scale,
                }
            }
            SessionKind::Rotate {
                center_screen,
                start_angle,
            } => {
                let current = angle_degrees(center_screen, pointer);
                let snap = modifiers.shift.then_some(self.snap_increment);
                LiveTransform {
                    geometry: Geometry {
                        rotation: rotated(origin.rotation, start_angle, current, snap),
                        ..origin
                    },
                    ..session.live_at_rest()
                }
            }
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
