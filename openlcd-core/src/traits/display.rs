//! Character display trait for 16x2 LCDs

/// Visible columns per row
pub const COLUMNS: u8 = 16;

/// Visible rows
pub const ROWS: u8 = 2;

const BLANK_ROW: &str = "                ";

/// Trait for a character display
///
/// The display keeps its own cursor: [`print`](Self::print) writes at the
/// cursor and advances it. Nothing is buffered on our side.
pub trait CharacterDisplay {
    /// Error type for display operations
    type Error;

    /// Clear the display and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor
    ///
    /// - `col`: Column (0-15)
    /// - `row`: Row (0-1, anything above 0 selects row 1)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Write text at the cursor
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Helper trait for common layouts
pub trait DisplayExt: CharacterDisplay {
    /// Write text starting at a position
    fn print_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), Self::Error> {
        self.set_cursor(col, row)?;
        self.print(text)
    }

    /// Replace a whole row
    ///
    /// Text longer than the row is cut off; shorter text is padded with
    /// spaces so the previous contents are overwritten.
    fn print_line(&mut self, row: u8, text: &str) -> Result<(), Self::Error> {
        let (visible, used) = fit_row(text);

        self.set_cursor(0, row)?;
        self.print(visible)?;
        if used < COLUMNS as usize {
            self.print(&BLANK_ROW[used..])?;
        }
        Ok(())
    }
}

// Blanket implementation for all CharacterDisplay types
impl<T: CharacterDisplay> DisplayExt for T {}

/// The part of `text` that fits in one row and how many columns it uses
fn fit_row(text: &str) -> (&str, usize) {
    match text.char_indices().nth(COLUMNS as usize) {
        Some((end, _)) => (&text[..end], COLUMNS as usize),
        None => (text, text.chars().count()),
    }
}
