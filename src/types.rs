//! Shared scene types: view lifecycle, frame ordering and the scene clock.

use bevy::prelude::*;

/// Fixed clock advance applied once per rendered frame.
///
/// Playback speed follows the display refresh rate; no
/// delta-time correction is applied.
pub const FRAME_STEP: f64 = 0.016;

/// Lifecycle of the view the animator and typewriter are attached to.
///
/// `Unmounted` until a primary window is found, `Mounted` while the scene
/// runs, `Disposed` after teardown. There is no way back from `Disposed`.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewLifecycle {
    #[default]
    Unmounted,
    Mounted,
    Disposed,
}

impl ViewLifecycle {
    pub fn is_mounted(self) -> bool {
        self == ViewLifecycle::Mounted
    }
}

/// Run condition: only react while the view is mounted.
pub fn view_mounted(lifecycle: Res<ViewLifecycle>) -> bool {
    lifecycle.is_mounted()
}

/// Ordering of the per-frame update.
///
/// Input first so drag deltas land in the same frame, then the clock, then
/// everything that reads the clock, and finally the camera.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Pointer, keyboard and viewport messages.
    Input,
    /// Scene clock advance.
    Clock,
    /// Planet, cloud and satellite transforms.
    Motion,
    /// Camera placement from orbit state.
    Camera,
}

/// Marker for every entity owned by the view; despawned on teardown.
#[derive(Component, Default)]
pub struct SceneEntity;

/// Animation clock in nominal seconds.
#[derive(Resource, Clone, Debug, Default)]
pub struct SceneClock {
    /// Accumulated nominal time.
    pub elapsed: f64,
    /// Number of frames stepped so far.
    pub frames: u64,
}

impl SceneClock {
    /// Advance by one fixed frame step.
    pub fn step(&mut self) {
        self.elapsed += FRAME_STEP;
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lifecycle_default_is_unmounted() {
        assert_eq!(ViewLifecycle::default(), ViewLifecycle::Unmounted);
        assert!(!ViewLifecycle::Unmounted.is_mounted());
        assert!(ViewLifecycle::Mounted.is_mounted());
        assert!(!ViewLifecycle::Disposed.is_mounted());
    }

    #[test]
    fn test_clock_steps_fixed_increment() {
        let mut clock = SceneClock::default();
        for _ in 0..100 {
            clock.step();
        }
        assert_eq!(clock.frames, 100);
        assert_relative_eq!(clock.elapsed, 1.6, epsilon = 1e-9);
    }
}
