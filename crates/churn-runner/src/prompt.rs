//! Interactive prompt line.

use std::io::{self, Write};

use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute};

#[allow(clippy::print_stdout)]
pub fn print_prompt() {
    print!("\r> ");
    io::stdout().flush().ok();
}

pub fn clear_line() {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine)
    )
    .ok();
}
