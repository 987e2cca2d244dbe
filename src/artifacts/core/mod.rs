//! Shared terminal utilities
//!
//! Long output goes through the `minus` static pager when stdout is an
//! interactive terminal; redirected output and `NO_PAGER` environments get
//! plain writes instead.

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;

/// Should long output be paged rather than printed?
pub fn should_page() -> bool {
    std::env::var_os("NO_PAGER").is_none() && std::io::stdout().is_terminal()
}

/// Present a finished document, paging it on interactive terminals
pub fn page_or_print(text: &str) -> anyhow::Result<()> {
    if should_page() {
        let pager = Pager::new();
        pager.set_prompt("patch-series view (q to quit)")?;
        pager.push_str(text)?;
        minus::page_all(pager)?;
    } else {
        std::io::stdout().lock().write_all(text.as_bytes())?;
    }

    Ok(())
}
