use ratatui::{prelude::*, widgets::*};

use crate::models::{MediaType, Theme};

/// Colors for one resolved theme
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight: Color,
    pub destructive: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Light => Palette {
                background: Color::White,
                foreground: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Rgb(18, 140, 126),
                border: Color::Gray,
                highlight: Color::Rgb(7, 94, 84),
                destructive: Color::Red,
            },
            // System is resolved before rendering; treat it as dark here
            Theme::Dark | Theme::System => Palette {
                background: Color::Reset,
                foreground: Color::White,
                muted: Color::Gray,
                accent: Color::Rgb(37, 211, 102),
                border: Color::DarkGray,
                highlight: Color::Yellow,
                destructive: Color::LightRed,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.border)
        }
    }
}

/// Renders the bottom navigation tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize, palette: &Palette) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(palette.muted_style())
        .highlight_style(Style::default().fg(palette.accent).bold())
        .divider("|")
}

/// Badge shown on cards, e.g. `[VIDEO]`
pub fn media_badge(media_type: MediaType, palette: &Palette) -> Span<'static> {
    let color = match media_type {
        MediaType::Image => Color::Cyan,
        MediaType::Video => Color::Magenta,
    };
    let marker = match media_type {
        MediaType::Image => "▣",
        MediaType::Video => "▶",
    };
    Span::styled(
        format!("{} {}", marker, media_type.label()),
        Style::default().fg(color).bg(palette.background).bold(),
    )
}

/// Header block with a title and subtitle line
pub fn render_header<'a>(title: &'a str, subtitle: String, right: Option<Span<'a>>, palette: &Palette) -> Paragraph<'a> {
    let mut first = vec![Span::styled(title, Style::default().fg(palette.accent).bold())];
    if let Some(right) = right {
        first.push(Span::raw("  "));
        first.push(right);
    }

    Paragraph::new(vec![
        Line::from(first),
        Line::from(Span::styled(subtitle, palette.muted_style())),
    ])
    .style(palette.base())
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.border_style(false)),
    )
}

/// Centered empty-state message
pub fn render_empty_state<'a>(title: &'a str, body: &'a str, hint: Option<&'a str>, palette: &Palette) -> Paragraph<'a> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(palette.foreground).bold())),
        Line::from(""),
        Line::from(Span::styled(body, palette.muted_style())),
    ];
    if let Some(hint) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(hint, Style::default().fg(palette.accent))));
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(palette.base())
}

/// Rectangle of `percent_x` by `percent_y` centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// First grid row to draw so that `selected_row` stays visible
pub fn scroll_offset(selected_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return selected_row;
    }
    selected_row.saturating_sub(visible_rows - 1)
}
