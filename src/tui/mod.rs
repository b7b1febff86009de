//! Interactive listing browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::App;

use self::terminal::TerminalSession;
use crate::explorer::ListingExplorer;

/// Run the interactive TUI until the user quits
pub fn run_interactive(explorer: ListingExplorer) -> Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut app = App::new(explorer);

    let res = app.run(session.terminal_mut());

    session.leave()?;
    res
}
