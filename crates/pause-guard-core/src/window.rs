//! Trait seam for the window-opening primitive.

/// Handle to the externally opened secure window.
///
/// Exclusively owned by the controller while open; dropping the handle
/// abandons the window without closing it.
pub trait SecureWindow: Send {
    /// Whether the user has closed the window.
    fn is_closed(&self) -> bool;

    /// Close the window.
    fn close(&mut self);
}

/// Window-opening primitive.
///
/// Returns `None` when the window could not be opened, e.g. because a pop-up
/// blocker intervened.
pub trait WindowOpener: Send + Sync {
    /// Open `url` in a new window and return its handle.
    fn open(&self, url: &str) -> Option<Box<dyn SecureWindow>>;
}
