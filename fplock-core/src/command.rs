//! Protocol command definitions

use std::fmt;

/// Command codes understood by the fingerprint module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Command {
    /// Ping the module
    TestConnection = 0x01,

    /// Capture the image currently on the sensor window
    GetImage = 0x20,

    /// Query whether a finger is resting on the sensor
    FingerDetect = 0x21,

    /// Transfer a template from a module buffer to the host
    UpChar = 0x42,

    /// Transfer a template from the host into a module buffer
    DownChar = 0x43,

    /// Generate a template from the captured image into a buffer
    Generate = 0x60,

    /// Merge buffers 0..2 into a single template in buffer 0
    Merge = 0x61,

    /// Compare the templates held in two buffers
    Match = 0x62,
}

impl Command {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::TestConnection => "CMD_TEST_CONNECTION",
            Self::GetImage => "CMD_GET_IMAGE",
            Self::FingerDetect => "CMD_FINGER_DETECT",
            Self::UpChar => "CMD_UP_CHAR",
            Self::DownChar => "CMD_DOWN_CHAR",
            Self::Generate => "CMD_GENERATE",
            Self::Merge => "CMD_MERGE",
            Self::Match => "CMD_MATCH",
        }
    }
}

impl From<Command> for u16 {
    fn from(cmd: Command) -> u16 {
        cmd as u16
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_codes() {
        assert_eq!(u16::from(Command::TestConnection), 0x01);
        assert_eq!(u16::from(Command::GetImage), 0x20);
        assert_eq!(u16::from(Command::FingerDetect), 0x21);
        assert_eq!(u16::from(Command::UpChar), 0x42);
        assert_eq!(u16::from(Command::DownChar), 0x43);
        assert_eq!(u16::from(Command::Generate), 0x60);
        assert_eq!(u16::from(Command::Merge), 0x61);
        assert_eq!(u16::from(Command::Match), 0x62);
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::GetImage.to_string(), "CMD_GET_IMAGE(0x20)");
        assert_eq!(Command::Match.to_string(), "CMD_MATCH(0x62)");
    }
}
