use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::state::{AppState, PokemonDetail, View};

const BG_BASE: Color = Color::Rgb(16, 22, 32);
const BG_HIGHLIGHT: Color = Color::Rgb(36, 84, 104);
const TEXT_MAIN: Color = Color::Rgb(230, 238, 242);
const TEXT_DIM: Color = Color::Rgb(150, 168, 180);
const ACCENT: Color = Color::Rgb(228, 176, 88);
const ERROR: Color = Color::Rgb(224, 96, 96);

pub fn render_app(frame: &mut Frame, area: Rect, state: &AppState) {
    let base = Block::default().style(Style::default().bg(BG_BASE).fg(TEXT_MAIN));
    frame.render_widget(base, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, layout[0], state);
    match state.view {
        View::Listing => render_listing(frame, layout[1], state),
        View::Detail => render_detail(frame, layout[1], state),
        View::Caught => render_caught(frame, layout[1], state),
    }
    render_footer(frame, layout[2], state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if state.search.active {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(ACCENT)),
            Span::raw(state.search.query.as_str()),
            Span::styled("_", Style::default().fg(ACCENT)),
        ])
    } else {
        let mut spans = vec![Span::styled(
            "POKÉDEX",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )];
        if state.list_loading || state.detail_loading {
            spans.push(Span::styled("  loading…", Style::default().fg(TEXT_DIM)));
        }
        Line::from(spans)
    };

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_listing(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.entries.is_empty() {
        let text = if state.list_loading {
            "Loading Pokémon…"
        } else {
            "No Pokémon on this page."
        };
        let placeholder = Paragraph::new(text)
            .style(Style::default().fg(TEXT_DIM))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Pokémon "));
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = state
        .entries
        .iter()
        .map(|entry| {
            let marker = if state.is_caught(&entry.name) { "●" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(ACCENT)),
                Span::raw(format!("#{:03} ", entry.id)),
                Span::styled(
                    format!("{:<14}", title_case(&entry.name)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(entry.types.join("/"), Style::default().fg(TEXT_DIM)),
            ]))
        })
        .collect();

    let title = format!(
        " Pokémon — page {}/{} ",
        state.pagination.current_page, state.pagination.total_pages
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(BG_HIGHLIGHT));

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(detail) = &state.selected else {
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        title_case(&detail.name),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(detail_lines(detail).into_iter().map(Line::from));
    lines.push(Line::default());
    let caught = if state.is_caught(&detail.name) {
        "Already caught."
    } else {
        "Press c to catch."
    };
    lines.push(Line::from(Span::styled(caught, Style::default().fg(TEXT_DIM))));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Detail "));
    frame.render_widget(paragraph, area);
}

fn render_caught(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.caught.is_empty() {
        let placeholder = Paragraph::new("No Pokémon caught yet.")
            .style(Style::default().fg(TEXT_DIM))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Caught "));
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = state
        .caught
        .iter()
        .map(|name| {
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(ACCENT)),
                Span::raw(title_case(name)),
            ]))
        })
        .collect();

    let title = format!(" Caught ({}) ", state.caught.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(BG_HIGHLIGHT));

    let mut list_state = ListState::default();
    list_state.select(Some(state.caught_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = match &state.message {
        Some(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        )),
        None => pagination_line(state),
    };
    let hints = Line::from(Span::styled(key_hints(state), Style::default().fg(TEXT_DIM)));

    let footer = Paragraph::new(vec![status, hints])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

fn pagination_line(state: &AppState) -> Line<'static> {
    if state.view != View::Listing {
        return Line::default();
    }
    let enabled = Style::default().fg(TEXT_MAIN);
    let disabled = Style::default().fg(TEXT_DIM);
    Line::from(vec![
        Span::styled(
            "◀ prev",
            if state.pagination.can_prev() { enabled } else { disabled },
        ),
        Span::raw(format!(
            "  page {}/{}  ",
            state.pagination.current_page, state.pagination.total_pages
        )),
        Span::styled(
            "next ▶",
            if state.pagination.can_next() { enabled } else { disabled },
        ),
    ])
}

fn key_hints(state: &AppState) -> String {
    if state.search.active {
        return "type to search  ⏎ submit  esc cancel".to_string();
    }
    match state.view {
        View::Listing => "↑/↓ select  ←/→ page  ⏎ open  c catch  C caught  / search  q quit",
        View::Detail => "c catch  b back  / search  q quit",
        View::Caught => "↑/↓ select  r release  x clear  b back  q quit",
    }
    .to_string()
}

/// Body lines for the detail view, separated out so the rendered content is
/// testable without a terminal.
pub fn detail_lines(detail: &PokemonDetail) -> Vec<String> {
    let mut lines = vec![
        format!("No. {:03}", detail.id),
        format!("Type: {}", detail.types.join(", ")),
        format!("Abilities: {}", detail.abilities.join(", ")),
    ];
    if let Some(url) = &detail.sprite_front_default {
        lines.push(format!("Sprite: {url}"));
    }
    lines.push("Stats:".to_string());
    for stat in &detail.stats {
        lines.push(format!("  {}: {}", stat.name, stat.value));
    }
    lines
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PokemonStat;

    #[test]
    fn detail_lines_show_types_and_stats() {
        let detail = PokemonDetail {
            id: 25,
            name: "pikachu".into(),
            sprite_front_default: Some("https://example.test/25.png".into()),
            types: vec!["electric".into()],
            abilities: vec!["static".into()],
            stats: vec![PokemonStat {
                name: "speed".into(),
                value: 90,
            }],
        };
        let lines = detail_lines(&detail);
        assert!(lines.contains(&"Type: electric".to_string()));
        assert!(lines.contains(&"Abilities: static".to_string()));
        assert!(lines.contains(&"  speed: 90".to_string()));
    }

    #[test]
    fn title_case_capitalizes_first_letter() {
        assert_eq!(title_case("pikachu"), "Pikachu");
        assert_eq!(title_case(""), "");
    }
}
