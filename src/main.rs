//! QuickSave TUI - Actor-based status saver
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Store Layer (Tokio) - status store with simulated media collaborators

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use quicksave_tui::app::state::Toast;
use quicksave_tui::clipboard;
use quicksave_tui::constants::{APP_NAME, APP_VERSION, BUILD_NUMBER, GRID_COLUMNS, SKELETON_CARDS};
use quicksave_tui::format::{
    format_file_size, format_megabytes, format_relative_time, format_storage_used, format_timestamp,
};
use quicksave_tui::messages::ui_events::{key_to_ui_event, AppTab};
use quicksave_tui::ui::{centered_rect, media_badge, render_empty_state, render_header, render_tabs, scroll_offset, Palette};
use quicksave_tui::{
    AppActor, MockDiscovery, PreferenceStore, Preferences, RenderState, SimulatedStorage, Status,
    StatusStore, StoreActor, StoreCommand, StoreResponse, Theme, UiEvent,
};

/// Rows taken by one card including its border
const CARD_HEIGHT: u16 = 5;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Build the status store from preferences
fn build_store(prefs: &Preferences) -> StatusStore {
    let mut discovery = match prefs.seed {
        Some(seed) => MockDiscovery::seeded(seed),
        None => MockDiscovery::new(),
    };
    let mut storage = if prefs.simulate_latency {
        SimulatedStorage::new()
    } else {
        SimulatedStorage::instant()
    };
    if !prefs.simulate_latency {
        discovery = discovery.with_delay(Duration::ZERO);
    }
    if let Some(quota) = prefs.storage_quota_bytes() {
        storage = storage.with_quota(quota);
    }
    StatusStore::new(Arc::new(discovery), Arc::new(storage))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "quicksave.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let preferences = PreferenceStore::new();
    tracing::info!(
        path = %preferences.path().display(),
        theme = preferences.preferences.theme.label(),
        "Loaded preferences"
    );
    let status_store = build_store(&preferences.preferences);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (store_cmd_tx, store_cmd_rx) = mpsc::unbounded_channel::<StoreCommand>();
    let (store_resp_tx, store_resp_rx) = mpsc::unbounded_channel::<StoreResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn store actor
    let store_actor = StoreActor::new(status_store, store_resp_tx);
    let snapshot_rx = store_actor.subscribe();
    tokio::spawn(store_actor.run(store_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(preferences, store_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, store_resp_rx, snapshot_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.active_tab, current_state.overlays()) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(mut state) = render_rx.try_recv() {
            if let Some(text) = state.clipboard.take() {
                if let Err(e) = clipboard::copy(&text) {
                    tracing::warn!(error = %e, "Clipboard copy failed");
                }
            }
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    let palette = Palette::for_theme(state.effective_theme);

    f.render_widget(Block::default().style(palette.base()), area);

    // Main layout with bottom navigation
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Bottom navigation
            Constraint::Length(1),  // Key hints
        ])
        .split(area);

    match state.active_tab {
        AppTab::Home => draw_home(f, state, &palette, main_chunks[0], main_chunks[1]),
        AppTab::Saved => draw_saved(f, state, &palette, main_chunks[0], main_chunks[1]),
        AppTab::Settings => draw_settings(f, state, &palette, main_chunks[0], main_chunks[1]),
    }

    draw_bottom_navigation(f, state, &palette, main_chunks[2]);
    draw_key_hints(f, state, &palette, main_chunks[3]);

    // Popups
    if let Some(status) = &state.viewer {
        draw_viewer_popup(f, status, state.viewer_saving, &palette, area);
    }

    if let Some(status) = &state.confirm_delete {
        draw_confirm_delete_popup(f, status, &palette, area);
    }

    if state.show_help {
        draw_help_popup(f, &palette, area);
    }

    if let Some(toast) = &state.toast {
        if !toast.is_expired(Instant::now()) {
            draw_toast(f, toast, &palette, area);
        }
    }
}

fn draw_home(f: &mut Frame, state: &RenderState, palette: &Palette, header: Rect, content: Rect) {
    let refresh = if state.store.is_loading {
        Span::styled("⟳ Loading...", Style::default().fg(palette.highlight))
    } else {
        Span::styled("[r] Refresh", palette.muted_style())
    };
    let subtitle = format!("{} statuses available", state.store.statuses.len());
    f.render_widget(render_header(APP_NAME, subtitle, Some(refresh), palette), header);

    if state.store.is_loading {
        draw_skeleton_grid(f, palette, content);
    } else if state.store.statuses.is_empty() {
        let empty = render_empty_state(
            "No Statuses Found",
            "No statuses are available at the moment. Check back later or refresh to see new statuses.",
            Some("Press 'r' to refresh"),
            palette,
        );
        f.render_widget(empty, content);
    } else {
        draw_status_grid(f, &state.store.statuses, state.home_selected, false, palette, content);
    }
}

fn draw_saved(f: &mut Frame, state: &RenderState, palette: &Palette, header: Rect, content: Rect) {
    let saved = &state.store.saved;

    if saved.is_empty() {
        let subtitle = String::from("Your downloaded statuses");
        f.render_widget(render_header("Saved Statuses", subtitle, None, palette), header);
        let empty = render_empty_state(
            "No Saved Statuses",
            "Start saving your favorite statuses and they'll appear here.",
            Some("Press '1' to browse statuses"),
            palette,
        );
        f.render_widget(empty, content);
        return;
    }

    let subtitle = format!("{} files • {} used", saved.len(), format_storage_used(saved));
    let count = Span::styled(format!("{} saved", saved.len()), palette.muted_style());
    f.render_widget(render_header("Saved Statuses", subtitle, Some(count), palette), header);
    draw_status_grid(f, saved, state.saved_selected, true, palette, content);
}

fn draw_status_grid(
    f: &mut Frame,
    statuses: &[Status],
    selected: usize,
    saved_view: bool,
    palette: &Palette,
    area: Rect,
) {
    let visible_rows = (area.height / CARD_HEIGHT) as usize;
    let first_row = scroll_offset(selected / GRID_COLUMNS, visible_rows.max(1));
    let now_ms = chrono::Utc::now().timestamp_millis();

    for (row_index, row) in statuses
        .chunks(GRID_COLUMNS)
        .enumerate()
        .skip(first_row)
        .take(visible_rows.max(1))
    {
        let y = area.y + ((row_index - first_row) as u16) * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.bottom() {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, CARD_HEIGHT);
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(row_area);

        for (col, status) in row.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + col;
            let card = status_card(status, index == selected, saved_view, now_ms, palette);
            f.render_widget(card, cells[col]);
        }
    }
}

fn status_card<'a>(
    status: &'a Status,
    is_selected: bool,
    saved_view: bool,
    now_ms: i64,
    palette: &Palette,
) -> Paragraph<'a> {
    let saved_mark = if status.is_saved {
        Span::styled("  ✓ Saved", Style::default().fg(palette.accent))
    } else {
        Span::styled("  ↓ Save", palette.muted_style())
    };

    let details = if saved_view {
        format!("{} • Saved", format_megabytes(status.size))
    } else {
        format!(
            "{} • {}",
            format_file_size(status.size),
            format_relative_time(status.timestamp, now_ms)
        )
    };

    let mut first = vec![media_badge(status.media_type, palette)];
    if !saved_view {
        first.push(saved_mark);
    }

    let lines = vec![
        Line::from(first),
        Line::from(Span::styled(
            status.file_name.as_str(),
            Style::default().fg(palette.foreground).bold(),
        )),
        Line::from(Span::styled(details, palette.muted_style())),
    ];

    Paragraph::new(lines).style(palette.base()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style(is_selected)),
    )
}

fn draw_skeleton_grid(f: &mut Frame, palette: &Palette, area: Rect) {
    let rows = SKELETON_CARDS.div_ceil(GRID_COLUMNS);
    for row in 0..rows {
        let y = area.y + (row as u16) * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.bottom() {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, CARD_HEIGHT);
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(row_area);

        for cell in cells.iter() {
            let placeholder = Paragraph::new(vec![
                Line::from("░░░░░░"),
                Line::from("░░░░░░░░░░░░░░"),
                Line::from("░░░░░░░░"),
            ])
            .style(palette.muted_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border_style(false)),
            );
            f.render_widget(placeholder, *cell);
        }
    }
}

fn draw_settings(f: &mut Frame, state: &RenderState, palette: &Palette, header: Rect, content: Rect) {
    let subtitle = String::from("Customize your experience");
    f.render_widget(render_header("Settings", subtitle, None, palette), header);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Appearance
            Constraint::Length(5),  // Storage
            Constraint::Length(4),  // Privacy & Permissions
            Constraint::Min(6),     // About
        ])
        .split(content);

    // Appearance
    let items: Vec<ListItem> = Theme::ALL
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let radio = if *theme == state.theme { "(•)" } else { "( )" };
            let style = if i == state.theme_cursor {
                Style::default().fg(palette.highlight).bold()
            } else {
                Style::default().fg(palette.foreground)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {:<8}", radio, theme.label()), style),
                Span::styled(theme.description(), palette.muted_style()),
            ]))
        })
        .collect();
    let appearance = List::new(items).style(palette.base()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style(true))
            .title(" Appearance - choose your preferred theme (Enter to apply) "),
    );
    f.render_widget(appearance, chunks[0]);

    // Storage
    let saved = &state.store.saved;
    let storage = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Saved Statuses  ", Style::default().fg(palette.foreground).bold()),
            Span::styled(format!("{} files", saved.len()), palette.muted_style()),
        ]),
        Line::from(vec![
            Span::styled(format_storage_used(saved), Style::default().fg(palette.accent).bold()),
            Span::styled(" used", palette.muted_style()),
        ]),
        Line::from(Span::styled("[m] Manage Saved Files", Style::default().fg(palette.accent))),
    ])
    .style(palette.base())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style(false))
            .title(" Storage "),
    );
    f.render_widget(storage, chunks[1]);

    // Privacy & Permissions
    let granted = Span::styled("Granted", Style::default().fg(Color::Green));
    let privacy = Paragraph::new(vec![
        Line::from(vec![Span::raw("Storage Access (required to save statuses)  "), granted.clone()]),
        Line::from(vec![Span::raw("Media Access (status media folder)  "), granted]),
    ])
    .style(palette.base())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style(false))
            .title(" Privacy & Permissions "),
    );
    f.render_widget(privacy, chunks[2]);

    // About
    let last_updated = chrono::Local::now().format("%Y-%m-%d").to_string();
    let about = Paragraph::new(vec![
        Line::from(vec![Span::styled("Version       ", palette.muted_style()), Span::raw(APP_VERSION)]),
        Line::from(vec![Span::styled("Build Number  ", palette.muted_style()), Span::raw(BUILD_NUMBER)]),
        Line::from(vec![Span::styled("Last Updated  ", palette.muted_style()), Span::raw(last_updated)]),
        Line::from(""),
        Line::from(Span::styled(
            "QuickSave helps you save and manage your favorite statuses offline.",
            palette.muted_style(),
        )),
    ])
    .style(palette.base())
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style(false))
            .title(format!(" About {} ", APP_NAME)),
    );
    f.render_widget(about, chunks[3]);
}

fn draw_bottom_navigation(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let titles = [" 1 Home ", " 2 Saved ", " 3 Settings "];
    let selected = AppTab::ALL
        .iter()
        .position(|t| *t == state.active_tab)
        .unwrap_or(0);
    f.render_widget(render_tabs(&titles, selected, palette), area);
}

fn draw_key_hints(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let hints = if state.store.is_loading && state.active_tab == AppTab::Home {
        " Loading statuses... "
    } else {
        match state.active_tab {
            AppTab::Home => " arrows:move | Enter:view | s:save | c:share | r:refresh | ?:help | q:quit ",
            AppTab::Saved => " arrows:move | Enter:view | d:delete | c:share | a:share all | ?:help | q:quit ",
            AppTab::Settings => " ↑/↓:choose theme | Enter:apply | m:saved files | ?:help | q:quit ",
        }
    };

    let bar = Paragraph::new(hints).style(palette.muted_style());
    f.render_widget(bar, area);
}

fn draw_viewer_popup(f: &mut Frame, status: &Status, saving: bool, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(70, 60, area);

    let save_label = if status.is_saved {
        Span::styled("✓ Saved", Style::default().fg(palette.accent).bold())
    } else if saving {
        Span::styled("Saving...", Style::default().fg(palette.highlight))
    } else {
        Span::styled("[s] Save", Style::default().fg(palette.accent).bold())
    };

    let media_hint = if status.is_video() {
        "▶ Video - open the media link to play"
    } else {
        "▣ Image - open the media link to view"
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{} • {}", format_file_size(status.size), format_timestamp(status.timestamp)),
            palette.muted_style(),
        )),
        Line::from(""),
        Line::from(vec![media_badge(status.media_type, palette)]),
        Line::from(Span::styled(media_hint, Style::default().fg(palette.foreground))),
        Line::from(""),
        Line::from(vec![Span::styled("Media:    ", palette.muted_style()), Span::raw(status.full_url.as_str())]),
        Line::from(vec![Span::styled("Preview:  ", palette.muted_style()), Span::raw(status.thumbnail.as_str())]),
        Line::from(""),
        Line::from(vec![
            save_label,
            Span::raw("    "),
            Span::styled("[c] Share", Style::default().fg(palette.foreground)),
            Span::raw("    "),
            Span::styled("[Esc] Close", palette.muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" {} ", status.file_name))
        .title_style(Style::default().fg(palette.foreground).bold());

    let viewer = Paragraph::new(lines)
        .style(palette.base())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(viewer, popup_area);
}

fn draw_confirm_delete_popup(f: &mut Frame, status: &Status, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(60, 30, area);

    let lines = vec![
        Line::from(""),
        Line::from(format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            status.file_name
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Delete", Style::default().fg(palette.destructive).bold()),
            Span::raw("    "),
            Span::styled("[n] Cancel", palette.muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.destructive))
        .title(" Delete Status? ");

    let dialog = Paragraph::new(lines)
        .style(palette.base())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(dialog, popup_area);
}

fn draw_toast(f: &mut Frame, toast: &Toast, palette: &Palette, area: Rect) {
    let width = area.width.min(52);
    let height = 4u16.min(area.height);
    let toast_area = Rect::new(
        area.right().saturating_sub(width),
        area.bottom().saturating_sub(height + 2),
        width,
        height,
    );

    let color = if toast.is_error { palette.destructive } else { palette.accent };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", toast.title))
        .title_style(Style::default().fg(color).bold());

    let body = Paragraph::new(toast.description.as_str())
        .style(palette.base())
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, toast_area);
    f.render_widget(body, toast_area);
}

fn draw_help_popup(f: &mut Frame, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 QUICKSAVE - Keyboard Shortcuts

 NAVIGATION
   1 / 2 / 3          Home / Saved / Settings
   Arrows or h/j/k/l  Move selection

 HOME
   Enter              Open viewer
   s                  Save status
   c                  Copy status link
   r                  Refresh statuses

 SAVED
   Enter              Open viewer
   d                  Delete saved status
   c                  Copy status link
   a                  Copy saved file list

 VIEWER
   s                  Save status
   c                  Copy status link
   Esc                Close

 SETTINGS
   Enter              Apply highlighted theme
   m                  Manage saved files

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(palette.base());

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
