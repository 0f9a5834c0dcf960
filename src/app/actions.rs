use super::state::SearchFocus;
use crate::view::Page;

/// Everything the user can ask for. Input maps to these; `App::handle_action`
/// is the only place they are acted on.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    SetPage(Page),
    SetSearchFocus(SearchFocus),
    ToggleHelp,

    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    PageUp,
    PageDown,
    /// Activate the selected card.
    Activate,
    /// Select and activate the card at this index (mouse click).
    ActivateAt(usize),

    InputChar(char),
    Backspace,
    ClearInput,
    /// Search now without waiting for the debounce window.
    SubmitSearch,
    Refresh,

    TogglePlayback,
    Next,
    Previous,
    Stop,
    SeekForward,
    SeekBack,
    VolumeUp,
    VolumeDown,

    Resize,
}
