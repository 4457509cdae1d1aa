use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};

/// Caret drawn after the typed role text
const CARET: &str = "▍";

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    // Center the banner vertically; drop the tagline on very short terminals
    let tagline_height = if area.height < 12 { 0 } else { 4 };
    let banner_height = 6 + tagline_height;
    let spare = area.height.saturating_sub(banner_height + 2) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Info line
            Constraint::Length(spare),          // Top padding
            Constraint::Length(1),              // Badge
            Constraint::Length(1),
            Constraint::Length(1),              // Name
            Constraint::Length(1),
            Constraint::Length(1),              // Typed role
            Constraint::Length(1),
            Constraint::Length(tagline_height), // Tagline
            Constraint::Min(0),
            Constraint::Length(1),              // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_badge(f, app, chunks[2]);
    draw_name(f, app, chunks[4]);
    draw_role_line(f, app, chunks[6]);
    if tagline_height > 0 {
        draw_tagline(f, app, centered_rect(70, 100, chunks[8]));
    }
    draw_footer(f, app, chunks[10]);

    if app.popup == Popup::Help {
        draw_help_popup(f, app);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(theme.accent)))
    } else if !app.is_animating() {
        Line::from(Span::styled("Stopped", Style::default().fg(theme.text_dim)))
    } else {
        Line::from("")
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_badge(f: &mut Frame, app: &App, area: Rect) {
    let hero = &app.config.hero;
    if hero.badge.is_empty() {
        return;
    }

    let badge = Paragraph::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(app.theme.accent)),
        Span::styled(hero.badge.as_str(), Style::default().fg(app.theme.accent)),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(badge, area);
}

fn draw_name(f: &mut Frame, app: &App, area: Rect) {
    let name = Paragraph::new(Line::from(vec![
        Span::styled("Hi, I'm ", Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD)),
        Span::styled(
            app.config.hero.name.as_str(),
            Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(name, area);
}

fn draw_role_line(f: &mut Frame, app: &App, area: Rect) {
    let caret_style = if app.caret_visible() {
        Style::default().fg(app.theme.caret)
    } else {
        Style::default().fg(app.theme.caret).add_modifier(Modifier::HIDDEN)
    };

    let role = Paragraph::new(Line::from(vec![
        Span::styled(app.role_text.as_str(), Style::default().fg(app.theme.text)),
        Span::styled(CARET, caret_style),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(role, area);
}

fn draw_tagline(f: &mut Frame, app: &App, area: Rect) {
    let tagline = Paragraph::new(app.config.hero.tagline.as_str())
        .style(Style::default().fg(app.theme.text_dim))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(tagline, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = [("r", "Restart"), ("h", "Help"), ("q", "Quit")];

    let hint_spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(app.theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(app.theme.text_dim)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(50, 50, f.area());

    f.render_widget(Clear, popup_area);

    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(key, Style::default().fg(theme.accent)),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "═══ Keys ═══",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        key_line("  r         ", "Restart the role animation"),
        key_line("  h/?       ", "Toggle this help"),
        key_line("  q/Esc     ", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Config ═══",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  ~/.config/heroline/config.toml",
            Style::default().fg(theme.text_dim),
        )),
        Line::from(Span::styled(
            "  heroline --frames 20   print updates as JSON",
            Style::default().fg(theme.text_dim),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" heroline Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_shows_name_and_typed_text() {
        let config = AppConfig {
            phrases: vec!["Rustacean".to_string()],
            ..Default::default()
        };
        let mut app = App::new(config).unwrap();
        app.role_text = "Rust".to_string();

        let screen = rendered(&app);
        assert!(screen.contains("Hi, I'm Sulthan Basha"));
        assert!(screen.contains("Rust"));
        assert!(screen.contains("Available for opportunities"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_view_is_flagged() {
        let mut app = App::new(AppConfig::default()).unwrap();
        app.unmount();

        assert!(rendered(&app).contains("Stopped"));
    }
}
