//! Inbound remote commands.
//!
//! The remote is a generic NEC handset; each physical button sends one fixed
//! 32-bit code (raw decoder layout, address in the low byte):
//!
//! ```text
//!   [ POWER ]      0xE51A52AD  toggle on/off
//!   [ PLAY  ]      0xA75852AD  preset speed (30%)
//!   [  +    ]      0xF50A52AD  speed up
//!   [  -    ]      0xF40B52AD  speed down
//!   [ FOLDER+ ]    0xBF4052AD  go forward
//!   [ FOLDER- ]    0xBE4152AD  go reverse
//!   [  <    ]      0xBD4252AD  steer left (while held)
//!   [  >    ]      0xBC4352AD  steer right (while held)
//! ```
//!
//! Every other code is ignored.

/// Raw code some decoders report for an NEC repeat frame.
pub const REPEAT_SENTINEL: u32 = 0xFFFF_FFFF;

/// Buttons the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Toggle power.
    Power,
    /// Jump to the preset speed.
    PresetSpeed,
    /// Raise speed by one step.
    SpeedUp,
    /// Lower speed by one step.
    SpeedDown,
    /// Reverse into forward.
    GoForward,
    /// Reverse into reverse.
    GoReverse,
    /// Run the steering motor left while the button is held.
    SteerLeft,
    /// Run the steering motor right while the button is held.
    SteerRight,
}

impl RemoteCommand {
    /// Every recognised command, in remote-layout order.
    pub const ALL: [Self; 8] = [
        Self::Power,
        Self::PresetSpeed,
        Self::SpeedUp,
        Self::SpeedDown,
        Self::GoForward,
        Self::GoReverse,
        Self::SteerLeft,
        Self::SteerRight,
    ];

    /// Map a raw remote code to a command. Unknown codes yield `None`.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0xE51A_52AD => Some(Self::Power),
            0xA758_52AD => Some(Self::PresetSpeed),
            0xF50A_52AD => Some(Self::SpeedUp),
            0xF40B_52AD => Some(Self::SpeedDown),
            0xBF40_52AD => Some(Self::GoForward),
            0xBE41_52AD => Some(Self::GoReverse),
            0xBD42_52AD => Some(Self::SteerLeft),
            0xBC43_52AD => Some(Self::SteerRight),
            _ => None,
        }
    }

    /// The raw code this button transmits.
    pub const fn code(self) -> u32 {
        match self {
            Self::Power => 0xE51A_52AD,
            Self::PresetSpeed => 0xA758_52AD,
            Self::SpeedUp => 0xF50A_52AD,
            Self::SpeedDown => 0xF40B_52AD,
            Self::GoForward => 0xBF40_52AD,
            Self::GoReverse => 0xBE41_52AD,
            Self::SteerLeft => 0xBD42_52AD,
            Self::SteerRight => 0xBC43_52AD,
        }
    }

    /// Whether repeat frames (button held) are acted upon.
    ///
    /// Only steering: the repeat stream is the sole evidence that the
    /// button is still down.
    pub const fn acts_on_repeat(self) -> bool {
        matches!(self, Self::SteerLeft | Self::SteerRight)
    }
}

/// One decoded remote frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteEvent {
    pub code: u32,
    pub repeat: bool,
}

impl RemoteEvent {
    /// A fresh button press.
    pub const fn press(code: u32) -> Self {
        Self {
            code,
            repeat: false,
        }
    }

    /// A held-button repeat carrying the button's code.
    pub const fn repeat(code: u32) -> Self {
        Self { code, repeat: true }
    }

    /// Build from raw decoder output. The decoder's repeat flag and the
    /// all-ones sentinel both count as repeat evidence.
    pub const fn from_decoder(code: u32, repeat_flag: bool) -> Self {
        Self {
            code,
            repeat: repeat_flag || code == REPEAT_SENTINEL,
        }
    }

    /// True when the frame is a bare repeat with no button identity.
    pub const fn is_sentinel(&self) -> bool {
        self.code == REPEAT_SENTINEL
    }

    pub const fn command(&self) -> Option<RemoteCommand> {
        RemoteCommand::from_code(self.code)
    }
}
