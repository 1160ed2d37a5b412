use serde::{Deserialize, Serialize};

/// Every sound the player controller can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Jump,
    BigJump,
    OneUp,
    Die,
    StageClear,
    Stomp,
    PowerUp,
    Fire,
    BreakBrick,
    GameOver,
    /// Looped for the length of the star window
    Invincibility,
}

impl Cue {
    pub const ALL: [Cue; 11] = [
        Cue::Jump,
        Cue::BigJump,
        Cue::OneUp,
        Cue::Die,
        Cue::StageClear,
        Cue::Stomp,
        Cue::PowerUp,
        Cue::Fire,
        Cue::BreakBrick,
        Cue::GameOver,
        Cue::Invincibility,
    ];

    /// Asset path relative to the game's data directory
    pub fn asset_path(self) -> &'static str {
        match self {
            Self::Jump => "audio/jump.wav",
            Self::BigJump => "audio/big_jump.wav",
            Self::OneUp => "audio/1-up.wav",
            Self::Die => "audio/die.wav",
            Self::StageClear => "audio/stage_clear.wav",
            Self::Stomp => "audio/stomp.wav",
            Self::PowerUp => "audio/powerup.wav",
            Self::Fire => "audio/fire.wav",
            Self::BreakBrick => "audio/breakbrick.wav",
            Self::GameOver => "audio/gameover.wav",
            Self::Invincibility => "audio/invincibility.ogg",
        }
    }
}
