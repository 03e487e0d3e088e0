//! Fire-rate limiting, magazine capacity and reload cooldown.
//!
//! Time is always passed in so the state machine can be driven from tests
//! without sleeping.

use std::time::{Duration, Instant};

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireState {
    Ready,
    /// Inside the minimum interval after the previous shot
    Cooldown,
    Reloading,
}

#[derive(Debug, Clone)]
pub struct FireControl {
    magazine_size: u8,
    shot_interval: Duration,
    reload_time: Duration,
    /// Shots taken since the last reload
    shots_fired: u8,
    last_shot: Option<Instant>,
    reload_started: Option<Instant>,
}

impl FireControl {
    pub fn new(magazine_size: u8, shot_interval: Duration, reload_time: Duration) -> Self {
        Self {
            magazine_size,
            shot_interval,
            reload_time,
            shots_fired: 0,
            last_shot: None,
            reload_started: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.magazine_size, config.shot_interval, config.reload_time)
    }

    /// Ends the reload once its full duration has passed
    pub fn update(&mut self, now: Instant) {
        if let Some(started) = self.reload_started
            && now.saturating_duration_since(started) >= self.reload_time
        {
            self.reload_started = None;
            log::debug!("Reload complete");
        }
    }

    pub fn state(&self, now: Instant) -> FireState {
        if self.reload_started.is_some() {
            return FireState::Reloading;
        }
        match self.last_shot {
            Some(last) if now.saturating_duration_since(last) < self.shot_interval => {
                FireState::Cooldown
            }
            _ => FireState::Ready,
        }
    }

    /// Attempts a shot at `now`. Returns true when the shot is accepted,
    /// in which case the caller spawns exactly one projectile.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        self.update(now);
        if self.state(now) != FireState::Ready {
            return false;
        }

        self.last_shot = Some(now);
        self.shots_fired += 1;

        if self.shots_fired >= self.magazine_size {
            self.shots_fired = 0;
            self.reload_started = Some(now);
            log::debug!("Magazine empty, reloading");
        }
        true
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_started.is_some()
    }

    /// Rounds left in the magazine; empty for the whole reload
    pub fn ammo_remaining(&self) -> u8 {
        if self.is_reloading() {
            0
        } else {
            self.magazine_size - self.shots_fired
        }
    }

    pub fn magazine_size(&self) -> u8 {
        self.magazine_size
    }

    pub fn shots_fired(&self) -> u8 {
        self.shots_fired
    }
}
