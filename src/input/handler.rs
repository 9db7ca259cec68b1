use crate::{
    core::{config::InteractionConfig, geo::LatLng, geo::Point, viewport::Viewport},
    input::events::{EventHandled, InputEvent},
    rendering::camera::CameraState,
};

/// Pointer interaction state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Holds the last pointer position seen, not the drag origin
    Dragging { last: Point },
}

/// What the camera is doing right now, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerMode {
    Idle,
    Dragging,
    AutoRotating,
}

/// Drag / wheel / auto-rotate state machine driving a [`CameraState`].
///
/// Starting a drag switches auto-rotate off. Nothing switches it back on
/// except [`set_auto_rotate`](Self::set_auto_rotate) or
/// [`toggle_auto_rotate`](Self::toggle_auto_rotate).
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: CameraState,
    initial: CameraState,
    state: InteractionState,
    auto_rotate: bool,
    viewport: Viewport,
    config: InteractionConfig,
}

impl CameraController {
    pub fn new(initial: CameraState, config: InteractionConfig) -> Self {
        let config = config.validated();
        let initial =
            CameraState::constrained(initial.lat, initial.lng, initial.fov, &config);
        Self {
            camera: initial,
            initial,
            state: InteractionState::Idle,
            auto_rotate: config.auto_rotate_on_start,
            viewport: Viewport::default(),
            config,
        }
    }

    /// Handle one input event, applied in arrival order
    pub fn handle_event(&mut self, event: &InputEvent) -> EventHandled {
        match event {
            InputEvent::PointerDown { position } => {
                self.state = InteractionState::Dragging { last: *position };
                if self.auto_rotate {
                    log::debug!("drag started, auto-rotate disabled");
                }
                self.auto_rotate = false;
                EventHandled::Handled
            }
            InputEvent::PointerMove { position } => {
                let InteractionState::Dragging { last } = self.state else {
                    return EventHandled::NotHandled;
                };
                let delta = position.subtract(&last);
                self.state = InteractionState::Dragging { last: *position };
                self.drag_by(delta);
                EventHandled::Handled
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                if self.state == InteractionState::Idle {
                    return EventHandled::NotHandled;
                }
                self.state = InteractionState::Idle;
                EventHandled::Handled
            }
            InputEvent::Wheel { delta_y } => {
                self.camera.fov = self
                    .config
                    .clamp_fov(self.camera.fov + delta_y * self.config.wheel_fov_sensitivity);
                EventHandled::Handled
            }
            InputEvent::Resize { width, height } => {
                self.viewport.set_size(*width, *height);
                EventHandled::Handled
            }
        }
    }

    fn drag_by(&mut self, delta: Point) {
        self.camera.lng =
            LatLng::wrap_lng(self.camera.lng - delta.x * self.config.drag_lng_sensitivity);
        self.camera.lat = self
            .config
            .clamp_lat(self.camera.lat + delta.y * self.config.drag_lat_sensitivity);
    }

    /// One auto-rotate timer tick. Returns whether the camera moved.
    pub fn tick(&mut self) -> bool {
        if !self.auto_rotate_active() {
            return false;
        }
        self.camera.lng = LatLng::wrap_lng(self.camera.lng + self.config.auto_rotate_step);
        true
    }

    /// Restore the externally supplied initial camera; auto-rotate is untouched
    pub fn reset(&mut self) {
        self.camera = self.initial;
    }

    /// Replace the initial camera (new props arrived) and jump to it
    pub fn set_initial(&mut self, initial: CameraState) {
        self.initial =
            CameraState::constrained(initial.lat, initial.lng, initial.fov, &self.config);
        self.camera = self.initial;
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Flip auto-rotate and return the new value
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    pub fn auto_rotate_enabled(&self) -> bool {
        self.auto_rotate
    }

    /// The timer only advances while enabled and not dragging
    pub fn auto_rotate_active(&self) -> bool {
        self.auto_rotate && !self.is_dragging()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    pub fn mode(&self) -> ControllerMode {
        if self.is_dragging() {
            ControllerMode::Dragging
        } else if self.auto_rotate {
            ControllerMode::AutoRotating
        } else {
            ControllerMode::Idle
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn aspect(&self) -> f64 {
        self.viewport.aspect()
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraState::default(), InteractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown {
            position: Point::new(x, y),
        }
    }

    fn mv(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_drag_disables_auto_rotate() {
        let mut controller = CameraController::default();
        assert_eq!(controller.mode(), ControllerMode::AutoRotating);

        controller.handle_event(&down(10.0, 10.0));
        assert_eq!(controller.mode(), ControllerMode::Dragging);
        assert!(!controller.auto_rotate_enabled());

        controller.handle_event(&InputEvent::PointerUp);
        // Releasing never re-enables spinning
        assert_eq!(controller.mode(), ControllerMode::Idle);
        assert!(!controller.tick());
    }

    #[test]
    fn test_drag_uses_running_delta() {
        let mut controller = CameraController::default();
        controller.handle_event(&down(0.0, 0.0));
        controller.handle_event(&mv(10.0, 20.0));
        controller.handle_event(&mv(20.0, 40.0));

        let camera = controller.camera();
        // Two moves of (10, 20) each, not 10 + 20 from the origin
        assert!((camera.lng - (-2.8)).abs() < 1e-9);
        assert!((camera.lat - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut controller = CameraController::default();
        assert_eq!(controller.handle_event(&mv(50.0, 50.0)), EventHandled::NotHandled);
        assert_eq!(controller.camera(), &CameraState::default());
    }

    #[test]
    fn test_drag_clamps_lat_and_wraps_lng() {
        let mut controller = CameraController::new(
            CameraState::new(80.0, 179.0, 78.0),
            InteractionConfig::default(),
        );
        controller.handle_event(&down(0.0, 0.0));
        controller.handle_event(&mv(-100.0, 500.0));
        let camera = controller.camera();
        assert_eq!(camera.lat, 89.5);
        assert!((camera.lng - (-167.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut controller = CameraController::default();
        controller.handle_event(&down(0.0, 0.0));
        controller.handle_event(&InputEvent::PointerLeave);
        assert!(!controller.is_dragging());
        let before = *controller.camera();
        controller.handle_event(&mv(100.0, 100.0));
        assert_eq!(controller.camera(), &before);
    }

    #[test]
    fn test_wheel_zoom_clamped() {
        let mut controller = CameraController::default();
        assert_eq!(
            controller.handle_event(&InputEvent::Wheel { delta_y: 100.0 }),
            EventHandled::Handled
        );
        assert!((controller.camera().fov - 81.0).abs() < 1e-9);

        controller.handle_event(&InputEvent::Wheel { delta_y: 10_000.0 });
        assert_eq!(controller.camera().fov, 108.0);
        controller.handle_event(&InputEvent::Wheel { delta_y: -10_000.0 });
        assert_eq!(controller.camera().fov, 35.0);
    }

    #[test]
    fn test_tick_advances_and_wraps() {
        let mut controller = CameraController::new(
            CameraState::new(0.0, 179.95, 78.0),
            InteractionConfig::default(),
        );
        assert!(controller.tick());
        assert!((controller.camera().lng - (-179.93)).abs() < 1e-9);
    }

    #[test]
    fn test_reset_keeps_auto_rotate_flag() {
        let initial = CameraState::new(12.0, 34.0, 60.0);
        let mut controller = CameraController::new(initial, InteractionConfig::default());
        controller.handle_event(&down(0.0, 0.0));
        controller.handle_event(&mv(30.0, 30.0));
        controller.handle_event(&InputEvent::Wheel { delta_y: 200.0 });
        controller.handle_event(&InputEvent::PointerUp);

        controller.reset();
        assert_eq!(controller.camera(), &initial);
        assert!(!controller.auto_rotate_enabled());

        assert!(controller.toggle_auto_rotate());
        controller.reset();
        assert!(controller.auto_rotate_enabled());
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut controller = CameraController::default();
        controller.handle_event(&InputEvent::Resize {
            width: 900.0,
            height: 300.0,
        });
        assert_eq!(controller.aspect(), 3.0);
        controller.handle_event(&InputEvent::Resize {
            width: 900.0,
            height: 0.0,
        });
        assert_eq!(controller.aspect(), 900.0);
    }
}
