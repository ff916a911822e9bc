//! Main viewer runner - entry point and event loop

use nellipsis_core::prelude::*;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::message::Message;
use crate::state::ViewerState;
use crate::watcher::ContentWatcher;
use crate::{event, handler, render, terminal};

/// Run the interactive viewer until the user quits
pub fn run(mut state: ViewerState) -> Result<()> {
    let mut term = terminal::init()?;

    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();

    let mut watcher = state.content_path.clone().map(ContentWatcher::new);
    if let Some(watcher) = watcher.as_mut() {
        if let Err(e) = watcher.start(msg_tx.clone()) {
            warn!("Failed to start file watcher: {}", e);
            state.error = Some(format!("Failed to start file watcher: {}", e));
        }
    }

    let result = run_loop(&mut term, &mut state, &mut msg_rx);

    if let Some(mut watcher) = watcher {
        watcher.stop();
    }

    terminal::restore();

    result
}

fn run_loop(
    term: &mut DefaultTerminal,
    state: &mut ViewerState,
    msg_rx: &mut mpsc::UnboundedReceiver<Message>,
) -> Result<()> {
    let size = term.size()?;
    handler::update(
        state,
        Message::TerminalResized {
            width: size.width,
            height: size.height,
        },
    );
    state.start();

    while !state.should_quit {
        term.draw(|frame| render::view(frame, state))?;

        while let Ok(message) = msg_rx.try_recv() {
            handler::update(state, message);
        }

        if let Some(message) = event::poll()? {
            handler::update(state, message);
        }
    }

    info!("viewer exiting");
    Ok(())
}
