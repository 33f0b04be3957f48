use std::time::Duration;

use ratatui::prelude::*;
use tachyonfx::{fx, Effect, EffectTimer, Interpolation};

/// Manages visual effects for the dashboard
pub struct EffectManager {
    /// Startup fade-in
    startup_fx: Option<Effect>,
    /// Header pulse while a poll is in flight
    loading_fx: Option<Effect>,
    /// Table flash after a successful start/stop/restart
    status_fx: Option<Effect>,
}

impl Default for EffectManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectManager {
    pub fn new() -> Self {
        Self {
            startup_fx: Some(Self::create_startup_effect()),
            loading_fx: Some(Self::create_loading_effect()),
            status_fx: None,
        }
    }

    fn create_startup_effect() -> Effect {
        fx::fade_from(
            (0, 0, 0),
            (0, 0, 0),
            EffectTimer::from_ms(800, Interpolation::QuadOut),
        )
    }

    fn create_loading_effect() -> Effect {
        fx::ping_pong(fx::fade_to_fg(
            (180, 180, 220),
            EffectTimer::from_ms(600, Interpolation::SineInOut),
        ))
    }

    /// Green when the container should now be up, red after a stop
    fn create_status_flash(running: bool) -> Effect {
        let color = if running { (80, 200, 120) } else { (200, 80, 80) };
        fx::fade_from(
            color,
            (0, 0, 0),
            EffectTimer::from_ms(400, Interpolation::QuadOut),
        )
    }

    pub fn trigger_status_change(&mut self, running: bool) {
        self.status_fx = Some(Self::create_status_flash(running));
    }

    pub fn has_status_effect(&self) -> bool {
        self.status_fx.is_some()
    }

    pub fn is_starting_up(&self) -> bool {
        self.startup_fx.is_some()
    }

    /// Whole-frame effects
    pub fn process(&mut self, elapsed: Duration, buf: &mut Buffer, area: Rect) {
        if let Some(ref mut fx) = self.startup_fx {
            fx.process(elapsed.into(), buf, area);
            if fx.done() {
                self.startup_fx = None;
            }
        }
    }

    /// Pulse the header while loading; loops via ping_pong
    pub fn process_loading(
        &mut self,
        elapsed: Duration,
        buf: &mut Buffer,
        area: Rect,
        is_loading: bool,
    ) {
        if !is_loading {
            return;
        }
        if let Some(ref mut fx) = self.loading_fx {
            fx.process(elapsed.into(), buf, area);
        }
    }

    pub fn process_status(&mut self, elapsed: Duration, buf: &mut Buffer, area: Rect) {
        if let Some(ref mut fx) = self.status_fx {
            fx.process(elapsed.into(), buf, area);
            if fx.done() {
                self.status_fx = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flash_runs_out() {
        let mut effects = EffectManager::new();
        assert!(effects.is_starting_up());
        assert!(!effects.has_status_effect());

        effects.trigger_status_change(true);
        assert!(effects.has_status_effect());

        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        effects.process_status(Duration::from_millis(500), &mut buf, area);
        assert!(!effects.has_status_effect());
    }
}
