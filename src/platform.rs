//! Platform-specific shortcuts

use crossterm::event::KeyModifiers;

/// Modifier for the copy/submit/download shortcuts
/// - macOS: SUPER (Cmd key) is usually swallowed by the terminal, CONTROL still works
/// - Linux/Windows: CONTROL (Ctrl key)
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Copy schema shortcut display
pub const COPY_SHORTCUT: &str = "^Y";

/// Submit shortcut display
pub const SUBMIT_SHORTCUT: &str = "^S";

/// Download last submission shortcut display
pub const DOWNLOAD_SHORTCUT: &str = "^D";

/// Theme toggle shortcut display
pub const THEME_SHORTCUT: &str = "^T";

/// Pane switch shortcut display
pub const SWITCH_PANE_SHORTCUT: &str = "F2";

/// Quit shortcut display
#[cfg(target_os = "macos")]
pub const QUIT_SHORTCUT: &str = "Ctrl+C";

#[cfg(not(target_os = "macos"))]
pub const QUIT_SHORTCUT: &str = "^C";
