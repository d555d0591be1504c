// systems/loading.rs
//
// Loading overlay timing. The overlay fades once the logo has had time to
// appear, after a load failure, or when the watchdog gives up waiting.

use crate::api::types::UiEvent;
use crate::components::logo::Logo;
use crate::core::time::progress;

pub const FADE_DELAY_AFTER_LOAD_MS: f64 = 3000.0;
pub const FADE_DELAY_AFTER_FAILURE_MS: f64 = 3000.0;
/// Fade regardless once this much of the session has passed without a model.
pub const WATCHDOG_MS: f64 = 10_000.0;
pub const FADE_DURATION_MS: f64 = 2000.0;

/// Why the fade started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeTrigger {
    Loaded,
    Failed,
    Watchdog,
}

#[derive(Debug, Clone, Default)]
pub struct LoadingScreen {
    loaded_at: Option<f64>,
    failed_at: Option<f64>,
    fade_start: Option<f64>,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_loaded(&mut self, now: f64) {
        self.loaded_at.get_or_insert(now);
    }

    pub fn model_failed(&mut self, now: f64) {
        self.failed_at.get_or_insert(now);
    }

    pub fn fade_started(&self) -> bool {
        self.fade_start.is_some()
    }

    /// The overlay is fully gone.
    pub fn finished(&self, now: f64) -> bool {
        self.fade_start
            .is_some_and(|start| now - start >= FADE_DURATION_MS)
    }

    /// Overlay opacity (1 while loading, 0 once faded).
    pub fn overlay_opacity(&self, now: f64) -> f32 {
        match self.fade_start {
            Some(start) => 1.0 - progress(now - start, FADE_DURATION_MS),
            None => 1.0,
        }
    }

    fn trigger(&self, now: f64) -> Option<FadeTrigger> {
        if self
            .loaded_at
            .is_some_and(|at| now - at >= FADE_DELAY_AFTER_LOAD_MS)
        {
            Some(FadeTrigger::Loaded)
        } else if self
            .failed_at
            .is_some_and(|at| now - at >= FADE_DELAY_AFTER_FAILURE_MS)
        {
            Some(FadeTrigger::Failed)
        } else if self.loaded_at.is_none() && now >= WATCHDOG_MS {
            Some(FadeTrigger::Watchdog)
        } else {
            None
        }
    }

    /// Advance one frame: start the fade when due, ramp the logo in.
    pub fn step(&mut self, now: f64, logo: &mut Logo, events: &mut Vec<UiEvent>) {
        if self.fade_start.is_none() {
            if let Some(trigger) = self.trigger(now) {
                self.fade_start = Some(now);
                events.push(UiEvent::LoadingFadeStarted);
                log::info!("loading: fade started ({trigger:?})");
            }
        }
        if let Some(start) = self.fade_start {
            logo.opacity = progress(now - start, FADE_DURATION_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(screen: &mut LoadingScreen, now: f64) -> Vec<UiEvent> {
        let mut logo = Logo::new();
        let mut events = Vec::new();
        screen.step(now, &mut logo, &mut events);
        events
    }

    #[test]
    fn fades_three_seconds_after_load() {
        let mut screen = LoadingScreen::new();
        screen.model_loaded(1000.0);
        assert!(run(&mut screen, 3999.0).is_empty());
        assert_eq!(run(&mut screen, 4000.0), vec![UiEvent::LoadingFadeStarted]);
        // Only once.
        assert!(run(&mut screen, 4100.0).is_empty());
    }

    #[test]
    fn fades_after_failure() {
        let mut screen = LoadingScreen::new();
        screen.model_failed(500.0);
        assert!(run(&mut screen, 3000.0).is_empty());
        assert_eq!(run(&mut screen, 3500.0), vec![UiEvent::LoadingFadeStarted]);
    }

    #[test]
    fn watchdog_fires_without_a_model() {
        let mut screen = LoadingScreen::new();
        assert!(run(&mut screen, 9999.0).is_empty());
        assert_eq!(run(&mut screen, 10_000.0), vec![UiEvent::LoadingFadeStarted]);
    }

    #[test]
    fn watchdog_waits_for_a_late_loaded_model() {
        let mut screen = LoadingScreen::new();
        screen.model_loaded(9000.0);
        assert!(run(&mut screen, 10_500.0).is_empty());
        assert!(!screen.fade_started());
    }

    #[test]
    fn logo_opacity_ramps_over_two_seconds() {
        let mut screen = LoadingScreen::new();
        screen.model_loaded(0.0);
        let mut logo = Logo::new();
        let mut events = Vec::new();
        screen.step(3000.0, &mut logo, &mut events);
        assert_eq!(logo.opacity, 0.0);
        screen.step(4000.0, &mut logo, &mut events);
        assert!((logo.opacity - 0.5).abs() < 1e-6);
        screen.step(6000.0, &mut logo, &mut events);
        assert_eq!(logo.opacity, 1.0);
        assert!(screen.finished(5000.0));
        assert_eq!(screen.overlay_opacity(5000.0), 0.0);
    }
}
