//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application tabs, mirrored by the bottom navigation bar
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum AppTab {
    #[default]
    Home,
    Saved,
    Settings,
}

impl AppTab {
    pub const ALL: [AppTab; 3] = [AppTab::Home, AppTab::Saved, AppTab::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            AppTab::Home => "Home",
            AppTab::Saved => "Saved",
            AppTab::Settings => "Settings",
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(AppTab),

    // Grid / list selection
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Status actions
    Refresh,
    OpenViewer,
    CloseViewer,
    SaveSelected,
    ShareSelected,
    ShareAll,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,

    // Settings
    ApplyTheme,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Overlays that capture keys before the active tab does
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Overlays {
    pub help: bool,
    pub confirm_delete: bool,
    pub viewer: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, active_tab: AppTab, overlays: Overlays) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Handle popups first (same for all tabs)
    if overlays.help {
        return Some(UiEvent::CloseHelp);
    }

    if overlays.confirm_delete {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Some(UiEvent::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Esc => Some(UiEvent::CancelDelete),
            _ => None,
        };
    }

    if overlays.viewer {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') => Some(UiEvent::CloseViewer),
            KeyCode::Char('s') => Some(UiEvent::SaveSelected),
            KeyCode::Char('c') => Some(UiEvent::ShareSelected),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    // Global keys
    match key.code {
        KeyCode::Char('1') => return Some(UiEvent::SwitchTab(AppTab::Home)),
        KeyCode::Char('2') => return Some(UiEvent::SwitchTab(AppTab::Saved)),
        KeyCode::Char('3') => return Some(UiEvent::SwitchTab(AppTab::Settings)),
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => return Some(UiEvent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => return Some(UiEvent::MoveDown),
        _ => {}
    }

    // Tab-specific key handling
    match active_tab {
        AppTab::Home => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::MoveRight),
            KeyCode::Enter => Some(UiEvent::OpenViewer),
            KeyCode::Char('s') => Some(UiEvent::SaveSelected),
            KeyCode::Char('c') => Some(UiEvent::ShareSelected),
            KeyCode::Char('r') => Some(UiEvent::Refresh),
            _ => None,
        },
        AppTab::Saved => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::MoveRight),
            KeyCode::Enter => Some(UiEvent::OpenViewer),
            KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::RequestDelete),
            KeyCode::Char('c') => Some(UiEvent::ShareSelected),
            KeyCode::Char('a') => Some(UiEvent::ShareAll),
            _ => None,
        },
        AppTab::Settings => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::ApplyTheme),
            KeyCode::Char('m') => Some(UiEvent::SwitchTab(AppTab::Saved)),
            _ => None,
        },
    }
}
