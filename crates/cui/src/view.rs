use crate::app::{App, Screen, MENU_ENTRIES};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use wicket_core::{Player, Rarity, RevealPhase};

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Length(8),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);
    match app.screen {
        Screen::Menu => draw_menu(frame, root[1], app),
        Screen::Packs => draw_packs(frame, root[1], app),
        Screen::Opening => draw_opening(frame, root[1], app),
        Screen::Collection => draw_collection(frame, root[1], app),
    }
    draw_events(frame, root[2], app);

    if app.show_help {
        draw_help_popup(frame);
    }
    if app.confirm_reset {
        draw_confirm_popup(frame);
    }
    if app.search_active {
        draw_search_prompt(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "Wicket Wonders | Screen: {} | Hint: {}",
        app.screen_label(),
        app.next_hint()
    );
    let summary = format!(
        "Coins {}  Cards {}  Packs opened {}  Seed {}",
        app.state.coins,
        app.state.collection.len(),
        app.state.packs_opened,
        app.rng.seed()
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(summary),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Overview");
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_menu(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem<'_>> = MENU_ENTRIES
        .iter()
        .map(|entry| ListItem::new(entry.label()))
        .collect();
    let list = List::new(items)
        .block(Block::default().title("Menu").borders(Borders::ALL))
        .highlight_style(highlight())
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    state.select(Some(app.menu_cursor.min(MENU_ENTRIES.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_packs(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let items: Vec<ListItem<'_>> = app
        .catalog
        .packs
        .iter()
        .map(|pack| {
            let style = if app.state.can_afford(pack.price) {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(format!(
                "{:<12} {:>6} coins  {} cards",
                pack.name, pack.price, pack.card_count
            ))
            .style(style)
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().title("Packs").borders(Borders::ALL))
        .highlight_style(highlight())
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if !app.catalog.packs.is_empty() {
        state.select(Some(app.pack_cursor.min(app.catalog.packs.len() - 1)));
    }
    frame.render_stateful_widget(list, halves[0], &mut state);

    let mut lines = Vec::new();
    if let Some(pack) = app.selected_pack() {
        lines.push(Line::from(format!("{} ({})", pack.name, pack.tier.label()).bold()));
        lines.push(Line::from(format!("Price: {} coins", pack.price)));
        lines.push(Line::from(""));
        for rarity in Rarity::ALL.iter().rev() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", rarity.label()), rarity_style(*rarity)),
                Span::raw(format!("{:>6.1}%", pack.rarity_odds.get(*rarity))),
            ]));
        }
        if !app.state.can_afford(pack.price) {
            lines.push(Line::from(""));
            lines.push(Line::from("Not enough coins".fg(Color::Red)));
        }
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("Odds").borders(Borders::ALL)),
        halves[1],
    );
}

fn draw_opening(frame: &mut Frame, area: Rect, app: &App) {
    let Some(opening) = app.opening.as_ref() else {
        frame.render_widget(
            Paragraph::new("no pack is opening")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };
    let title = format!("{} | {}", opening.pack().name, opening.phase().label());
    let block = Block::default().title(title).borders(Borders::ALL);
    let mut lines = Vec::new();
    match opening.phase() {
        RevealPhase::Shaking => lines.push(Line::from("~ the pack is shaking ~".italic())),
        RevealPhase::Opening => lines.push(Line::from("* tearing the wrapper *".italic())),
        RevealPhase::Revealing | RevealPhase::Complete => {
            for (slot, player) in opening.revealed().iter().enumerate() {
                lines.push(card_line(slot, player));
            }
            let hidden = opening.cards().len() - opening.revealed().len();
            for _ in 0..hidden {
                lines.push(Line::from("   [ ? ]".fg(Color::DarkGray)));
            }
        }
    }
    if let Some(summary) = opening.summary() {
        lines.push(Line::from(""));
        let mut spans = vec![Span::raw("Pack summary: ")];
        for (rarity, count) in summary.entries() {
            spans.push(Span::styled(
                format!("{} x{}  ", rarity.label(), count),
                rarity_style(rarity),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from("enter to continue"));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_collection(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let cards = app.filtered_collection();
    let items: Vec<ListItem<'_>> = if cards.is_empty() {
        let text = if app.state.collection.is_empty() {
            "no cards yet, open a pack"
        } else {
            "no cards match the filter"
        };
        vec![ListItem::new(text)]
    } else {
        cards
            .iter()
            .enumerate()
            .map(|(idx, player)| ListItem::new(card_line(idx, player)))
            .collect()
    };
    let title = format!(
        "Collection {}/{} | rarity: {} | role: {} | search: {}",
        cards.len(),
        app.state.collection.len(),
        app.filter.rarity.map(|r| r.label()).unwrap_or("all"),
        app.filter.role.map(|r| r.code()).unwrap_or("all"),
        if app.filter.query.is_empty() {
            "-"
        } else {
            app.filter.query.as_str()
        }
    );
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(highlight())
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if !cards.is_empty() {
        state.select(Some(app.collection_cursor.min(cards.len() - 1)));
    }
    frame.render_stateful_widget(list, halves[0], &mut state);

    let mut lines = Vec::new();
    if let Some(player) = cards.get(app.collection_cursor) {
        lines.push(Line::from(player.name.clone().bold()));
        lines.push(Line::from(format!(
            "{} | {}",
            player.role.display_name(),
            player.team
        )));
        lines.push(Line::from(Span::styled(
            format!("{} {}", player.rarity.label(), player.rating),
            rarity_style(player.rarity),
        )));
        for (label, value) in player.stats.entries() {
            lines.push(Line::from(format!("{label:<6}{value:>4}")));
        }
        lines.push(Line::from(""));
    }
    let stats = app.collection_stats();
    lines.push(Line::from(format!(
        "Total {}  Unique {}",
        stats.total, stats.unique
    )));
    for rarity in Rarity::ALL.iter().rev() {
        lines.push(Line::from(Span::styled(
            format!("{:<10}{:>4}", rarity.label(), stats.count(*rarity)),
            rarity_style(*rarity),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("Details").borders(Borders::ALL)),
        halves[1],
    );
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().title("Events").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("q quit | ? help | arrows/jk move | enter select"),
        Line::from("p packs | c collection | esc back"),
        Line::from("esc while opening abandons remaining reveals"),
        Line::from("collection: / search | r cycle rarity | o cycle role"),
        Line::from("x reset progress (asks first)"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_confirm_popup(frame: &mut Frame) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("Reset coins, collection and pack count?"),
        Line::from(""),
        Line::from("y = reset   any other key = cancel"),
    ];
    let block = Block::default()
        .title("Reset Progress")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_search_prompt(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("Name or team. Enter=keep  Esc=clear"),
        Line::from(""),
        Line::from(format!("> {}", app.filter.query)),
    ];
    let block = Block::default()
        .title("Search")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn card_line(slot: usize, player: &Player) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:>2}. ", slot + 1)),
        Span::styled(
            format!("{:<10}", player.rarity.label()),
            rarity_style(player.rarity),
        ),
        Span::raw(format!(
            "{:<18} {:<4} {:<14} {:>3}",
            player.name,
            player.role.code(),
            player.team,
            player.rating
        )),
    ])
}

fn rarity_style(rarity: Rarity) -> Style {
    let color = match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::Yellow,
    };
    let style = Style::default().fg(color);
    if rarity.is_common() {
        style
    } else {
        style.add_modifier(Modifier::BOLD)
    }
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
