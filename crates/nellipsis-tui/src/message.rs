//! Messages processed by the viewer's update function

/// Keyboard input the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    CharCtrl(char),
    Esc,
    Enter,
    Up,
    Down,
    Left,
    Right,
}

/// All inputs to [`update`](crate::handler::update)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key(InputKey),

    /// The terminal changed size (in cells)
    TerminalResized { width: u16, height: u16 },

    /// The watched content file was modified
    ContentFileChanged,

    WatcherError { message: String },

    /// Poll timeout
    Tick,

    Quit,
}
