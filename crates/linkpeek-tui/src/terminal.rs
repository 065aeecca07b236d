//! Terminal setup and restoration

use std::sync::Once;

use linkpeek_core::prelude::*;
use ratatui::DefaultTerminal;

static PANIC_HOOK: Once = Once::new();

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Enter the alternate screen, installing the panic hook on first use
pub fn init() -> Result<DefaultTerminal> {
    PANIC_HOOK.call_once(install_panic_hook);
    ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))
}

/// Leave the alternate screen
pub fn restore() {
    ratatui::restore();
}
