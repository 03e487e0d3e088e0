//! Player sprite art, one text file per animation pose.
//!
//! Art files are optional. A missing or unreadable file never stops the game:
//! the pose falls back to a built-in placeholder.

use std::fs;
use std::path::Path;

use crate::entities::AnimationState;

/// Default location of sprite files, relative to the working directory
pub const DEFAULT_SPRITE_DIR: &str = "assets/sprites";

fn file_name(state: AnimationState) -> &'static str {
    match state {
        AnimationState::Idle => "idle.txt",
        AnimationState::FiringIdle => "firing.txt",
        AnimationState::MovingUp => "up.txt",
        AnimationState::MovingDown => "down.txt",
        AnimationState::FiringUp => "firing_up.txt",
        AnimationState::FiringDown => "firing_down.txt",
    }
}

/// Placeholder art used when no file is available
fn placeholder(state: AnimationState) -> Vec<String> {
    let lines: &[&str] = match state {
        AnimationState::Idle => &[" o  ", "/|\\ ", "/ \\ "],
        AnimationState::FiringIdle => &[" o  ", "/|==", "/ \\ "],
        AnimationState::MovingUp => &["\\o/ ", " |  ", "/ \\ "],
        AnimationState::MovingDown => &[" o  ", "/|\\ ", "| | "],
        AnimationState::FiringUp => &["\\o  ", " |==", "/ \\ "],
        AnimationState::FiringDown => &[" o  ", "/|==", "| | "],
    };
    lines.iter().map(|line| line.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct SpriteSheet {
    /// Indexed by [`AnimationState::frame_index`]
    frames: Vec<Vec<String>>,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            frames: AnimationState::ALL.iter().map(|s| placeholder(*s)).collect(),
        }
    }
}

impl SpriteSheet {
    /// Loads every pose from `dir`, substituting placeholders for the ones
    /// that cannot be read
    pub fn load(dir: &Path) -> Self {
        let mut frames = Vec::with_capacity(AnimationState::ALL.len());
        for idx in 0..AnimationState::ALL.len() {
            let state = AnimationState::from_frame_index(idx);
            let path = dir.join(file_name(state));
            let frame = match fs::read_to_string(&path) {
                Ok(text) if !text.trim().is_empty() => {
                    log::info!("Loaded sprite {}", path.display());
                    text.lines().map(str::to_string).collect()
                }
                Ok(_) => {
                    log::warn!("Sprite {} is empty, using placeholder", path.display());
                    placeholder(state)
                }
                Err(err) => {
                    log::warn!(
                        "Failed to load sprite {}: {}, using placeholder",
                        path.display(),
                        err
                    );
                    placeholder(state)
                }
            };
            frames.push(frame);
        }
        Self { frames }
    }

    pub fn frame(&self, state: AnimationState) -> &[String] {
        &self.frames[state.frame_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_every_pose() {
        let sheet = SpriteSheet::default();
        for state in AnimationState::ALL {
            assert_eq!(sheet.frame(state), placeholder(state).as_slice());
        }
    }

    #[test]
    fn test_missing_directory_falls_back() {
        let sheet = SpriteSheet::load(Path::new("definitely/not/a/real/dir"));
        assert_eq!(
            sheet.frame(AnimationState::FiringUp),
            placeholder(AnimationState::FiringUp).as_slice()
        );
    }

    #[test]
    fn test_bundled_sprites_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_SPRITE_DIR);
        let sheet = SpriteSheet::load(&dir);
        for state in AnimationState::ALL {
            assert_ne!(sheet.frame(state), placeholder(state).as_slice());
        }
    }

    #[test]
    fn test_loads_files_and_fills_gaps() {
        let dir = std::env::temp_dir().join(format!("last-days-sprites-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("idle.txt"), "AB\nCD\n").unwrap();
        fs::write(dir.join("up.txt"), "   \n").unwrap();

        let sheet = SpriteSheet::load(&dir);
        assert_eq!(sheet.frame(AnimationState::Idle), ["AB", "CD"]);
        assert_eq!(
            sheet.frame(AnimationState::MovingUp),
            placeholder(AnimationState::MovingUp).as_slice()
        );
        assert_eq!(
            sheet.frame(AnimationState::FiringDown),
            placeholder(AnimationState::FiringDown).as_slice()
        );

        fs::remove_dir_all(&dir).unwrap();
    }
}
