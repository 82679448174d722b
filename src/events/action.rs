//! Action enum for decoupling input handling from state changes.
//!
//! Actions represent user intents that can be logged, replayed, or customized.

/// Actions that can be dispatched from event handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // === Application ===
    /// Quit the host
    Quit,
    /// Flip the parent-controlled disabled flag (host-level)
    ToggleDisabled,

    // === Dropdown ===
    /// Open the dropdown, or close it and commit
    ToggleOpen,
    /// Pointer went down outside the control
    OutsideClick,

    // === Selection ===
    /// Toggle the candidate at this display index
    ToggleItem(usize),
    /// Toggle the highlighted candidate
    ToggleHighlighted,
    /// Move the highlight down
    HighlightNext,
    /// Move the highlight up
    HighlightPrev,

    // === Search input ===
    /// Append a character to the search text
    SearchChar(char),
    /// Delete the last character of the search text
    SearchBackspace,
    /// Clear the search text
    SearchClear,

    /// No action
    None,
}
