//! Terminal setup and restoration for the viewer

use nellipsis_core::prelude::*;
use ratatui::DefaultTerminal;

/// Enter raw mode and the alternate screen
pub fn init() -> Result<DefaultTerminal> {
    let term = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;
    debug!("terminal initialized");
    install_panic_hook();
    Ok(term)
}

/// Leave the alternate screen; failures are logged, never raised
pub fn restore() {
    match ratatui::try_restore() {
        Ok(()) => debug!("terminal restored"),
        Err(e) => warn!("Failed to restore terminal: {}", e),
    }
}

/// Log the panic and restore the terminal before the previous hook prints it
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("viewer panicked: {}", panic_info);
        restore();
        previous(panic_info);
    }));
}
