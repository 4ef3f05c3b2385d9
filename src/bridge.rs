//! Event bridge
//!
//! Translates pointer, touch and resize signals into simulation mutations.
//! Mutations land immediately; the next frame reads them.

use glam::Vec2;

use crate::sim::Simulation;
use crate::surface::{Surface, Viewport};

/// Listener registrations a host makes on mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    MouseMove,
    TouchMove,
    Click,
    TouchStart,
    Resize,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::MouseMove,
        EventKind::TouchMove,
        EventKind::Click,
        EventKind::TouchStart,
        EventKind::Resize,
    ];

    /// DOM event type name
    pub fn dom_name(&self) -> &'static str {
        match self {
            EventKind::MouseMove => "mousemove",
            EventKind::TouchMove => "touchmove",
            EventKind::Click => "click",
            EventKind::TouchStart => "touchstart",
            EventKind::Resize => "resize",
        }
    }
}

/// Pointer coordinates carried by an event
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse(Vec2),
    /// Active touch points, in order
    Touch(Vec<Vec2>),
}

impl PointerInput {
    /// Mouse position, or the first active touch point
    pub fn position(&self) -> Option<Vec2> {
        match self {
            PointerInput::Mouse(pos) => Some(*pos),
            PointerInput::Touch(points) => points.first().copied(),
        }
    }
}

/// Host input, already in surface coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse or touch move
    Move(PointerInput),
    /// Click or touch start
    Press(PointerInput),
    /// Viewport changed size
    Resize(Viewport),
}

impl InputEvent {
    /// The listener this event is delivered through
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Move(PointerInput::Mouse(_)) => EventKind::MouseMove,
            InputEvent::Move(PointerInput::Touch(_)) => EventKind::TouchMove,
            InputEvent::Press(PointerInput::Mouse(_)) => EventKind::Click,
            InputEvent::Press(PointerInput::Touch(_)) => EventKind::TouchStart,
            InputEvent::Resize(_) => EventKind::Resize,
        }
    }
}

/// Apply one event to the simulation (and, for resizes, the surface)
pub fn handle_event<S: Surface + ?Sized>(sim: &mut Simulation, surface: &mut S, event: InputEvent) {
    match event {
        InputEvent::Move(input) => {
            if let Some(pos) = input.position() {
                sim.set_pointer(pos);
            }
        }
        InputEvent::Press(input) => {
            if let Some(pos) = input.position() {
                sim.spawn_burst(pos);
            }
        }
        InputEvent::Resize(viewport) => {
            surface.set_size(viewport);
            sim.resize(viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StarfieldConfig;
    use crate::surface::RecordingSurface;

    fn setup() -> (Simulation, RecordingSurface) {
        let vp = Viewport::new(800.0, 600.0);
        (
            Simulation::new(StarfieldConfig::default(), vp, 99),
            RecordingSurface::new(vp),
        )
    }

    #[test]
    fn test_mouse_move_overwrites_pointer() {
        let (mut sim, mut surface) = setup();
        handle_event(
            &mut sim,
            &mut surface,
            InputEvent::Move(PointerInput::Mouse(Vec2::new(12.0, 34.0))),
        );
        assert_eq!(sim.pointer(), Vec2::new(12.0, 34.0));

        handle_event(
            &mut sim,
            &mut surface,
            InputEvent::Move(PointerInput::Mouse(Vec2::new(700.0, 1.0))),
        );
        assert_eq!(sim.pointer(), Vec2::new(700.0, 1.0));
    }

    #[test]
    fn test_touch_move_uses_first_point() {
        let (mut sim, mut surface) = setup();
        let touches = vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        handle_event(&mut sim, &mut surface, InputEvent::Move(PointerInput::Touch(touches)));
        assert_eq!(sim.pointer(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_empty_touch_is_ignored() {
        let (mut sim, mut surface) = setup();
        handle_event(&mut sim, &mut surface, InputEvent::Move(PointerInput::Touch(Vec::new())));
        handle_event(&mut sim, &mut surface, InputEvent::Press(PointerInput::Touch(Vec::new())));
        assert_eq!(sim.pointer(), Vec2::new(400.0, 300.0));
        assert!(sim.bursts.is_empty());
    }

    #[test]
    fn test_click_and_tap_spawn_bursts() {
        let (mut sim, mut surface) = setup();
        handle_event(
            &mut sim,
            &mut surface,
            InputEvent::Press(PointerInput::Mouse(Vec2::new(100.0, 100.0))),
        );
        handle_event(
            &mut sim,
            &mut surface,
            InputEvent::Press(PointerInput::Touch(vec![Vec2::new(5.0, 5.0)])),
        );
        assert_eq!(sim.bursts.len(), 30);
        assert!(sim.bursts[15..].iter().all(|p| p.pos == Vec2::new(5.0, 5.0)));
        // A press does not move the parallax target
        assert_eq!(sim.pointer(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_resize_replaces_every_star() {
        let (mut sim, mut surface) = setup();
        sim.spawn_burst(Vec2::new(10.0, 10.0));
        let old_stars = sim.stars.clone();

        handle_event(&mut sim, &mut surface, InputEvent::Resize(Viewport::new(400.0, 300.0)));

        assert_eq!(surface.size(), Viewport::new(400.0, 300.0));
        assert_eq!(sim.stars.len(), 200);
        assert!(sim.stars.iter().all(|s| !old_stars.contains(s)));
        assert!(
            sim.stars
                .iter()
                .all(|s| s.pos.x >= 0.0 && s.pos.x < 400.0 && s.pos.y >= 0.0 && s.pos.y < 300.0)
        );
        assert_eq!(sim.bursts.len(), 15);
    }

    #[test]
    fn test_event_kinds() {
        assert_eq!(
            InputEvent::Move(PointerInput::Touch(vec![])).kind(),
            EventKind::TouchMove
        );
        assert_eq!(
            InputEvent::Press(PointerInput::Mouse(Vec2::ZERO)).kind(),
            EventKind::Click
        );
        assert_eq!(EventKind::TouchStart.dom_name(), "touchstart");
        assert_eq!(EventKind::ALL.len(), 5);
    }
}
