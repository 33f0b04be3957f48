use crate::models::ContainerAction;

/// Actions that can be performed in the application.
///
/// Row-targeted actions carry the record's id (and name where it is shown)
/// captured at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,

    // Container operations
    Control(String, ContainerAction),

    // Log modal
    ViewLogs { id: String, name: String },
    CloseLogs,
    ToggleFollow,

    // Modals
    ShowHelp,
    CloseHelp,
    DismissNotice,

    // App control
    Refresh,
    Quit,

    // No action
    None,
}
