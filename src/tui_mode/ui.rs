use super::app::App;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Paragraph, Wrap,
    },
    Frame, Terminal,
};
use rustplot::{DrawingPrimitive, Plot, PlotConfig, Viewport};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;
use super::helpers::{format_number, format_with_spaces, highlight_functions};
use crate::render_help::render_help;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;

// Braille cells hold 2x4 dots.
const DOTS_X: u16 = 2;
const DOTS_Y: u16 = 4;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            if let Event::Key(KeyEvent { code, modifiers, kind, .. }) = crossterm::event::read()? {
                if kind == KeyEventKind::Press {
                    handle_key_event(app, code, modifiers);
                }
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::Esc | KeyCode::F(1) => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
    } else {
        match code {
            KeyCode::Char('u') | KeyCode::Char('U') if modifiers.contains(KeyModifiers::CONTROL) => {
                app.clear_input();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.insert_char(c),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Delete => app.delete_char(),
            KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => {
                app.move_cursor_by_words(-1);
            }
            KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => {
                app.move_cursor_by_words(1);
            }
            KeyCode::Left => app.move_cursor(-1),
            KeyCode::Right => app.move_cursor(1),
            KeyCode::Home => {
                app.cursor_position = 0;
                app.input_scroll = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.input.chars().count();
            }
            KeyCode::Up => app.navigate_history(-1),
            KeyCode::Down => app.navigate_history(1),
            KeyCode::Enter => app.submit(),
            KeyCode::F(1) => {
                app.show_help = true;
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let terminal_size = frame.size();

    app.terminal_too_small = terminal_size.width < MIN_TERMINAL_WIDTH ||
                             terminal_size.height < MIN_TERMINAL_HEIGHT;

    if app.terminal_too_small {
        render_resize_message(frame, terminal_size);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(terminal_size);

    render_input(frame, app, layout[0]);
    render_status(frame, app, layout[1]);
    render_plot(frame, app, layout[2]);
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small! Min size: {}x{}. Current: {}x{}",
        MIN_TERMINAL_WIDTH,
        MIN_TERMINAL_HEIGHT,
        area.width,
        area.height
    );

    let text = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal window",
            Style::default().fg(Color::Yellow)
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Resize Required ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Tick and label layout in braille dots.
fn braille_layout() -> PlotConfig {
    PlotConfig {
        tick_half_length: 2.0,
        x_label_offset: (-1.0, 6.0),
        y_label_offset: (4.0, 2.0),
        ..PlotConfig::default()
    }
}

fn render_plot(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = match &app.expression {
        Some(expression) => {
            let mut spans = vec![Span::raw(" f(x) = ")];
            spans.extend(highlight_functions(&format_with_spaces(expression), Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" "));
            Line::from(spans)
        }
        None => Line::from(" Plot "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let viewport = Viewport::new(
        (inner_area.width * DOTS_X) as u32,
        (inner_area.height * DOTS_Y) as u32,
    );

    let ceiling = app.config.display_y_ceiling;
    match app.current_plot(viewport, &braille_layout()) {
        None => {
            let empty_msg = Paragraph::new("No function yet. Enter an expression in x, e.g. sin(x) * 3")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty_msg, inner_area);
        }
        Some(Err(e)) => {
            let error = Paragraph::new(Span::styled(
                format!("Error: {}", e),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(error, inner_area);
        }
        Some(Ok(plot)) => {
            render_canvas(frame, plot, viewport, inner_area);
            render_range(frame, plot, ceiling, area);
        }
    }
}

fn render_canvas(frame: &mut Frame, plot: &Plot, viewport: Viewport, area: Rect) {
    let width = viewport.width as f64;
    let height = viewport.height as f64;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            // Canvas y grows upward.
            for primitive in &plot.primitives {
                match primitive {
                    DrawingPrimitive::Line(a, b) => ctx.draw(&CanvasLine {
                        x1: a.x,
                        y1: height - a.y,
                        x2: b.x,
                        y2: height - b.y,
                        color: Color::DarkGray,
                    }),
                    DrawingPrimitive::Polyline(points) => {
                        if let [only] = points.as_slice() {
                            ctx.draw(&CanvasLine {
                                x1: only.x,
                                y1: height - only.y,
                                x2: only.x,
                                y2: height - only.y,
                                color: Color::LightMagenta,
                            });
                        }
                        for pair in points.windows(2) {
                            ctx.draw(&CanvasLine {
                                x1: pair[0].x,
                                y1: height - pair[0].y,
                                x2: pair[1].x,
                                y2: height - pair[1].y,
                                color: Color::LightMagenta,
                            });
                        }
                    }
                    DrawingPrimitive::Text(anchor, label) => {
                        ctx.print(
                            anchor.x,
                            height - anchor.y,
                            Span::styled(label.clone(), Style::default().fg(Color::Gray)),
                        );
                    }
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn render_range(frame: &mut Frame, plot: &Plot, ceiling: f64, area: Rect) {
    let mut text = format!(
        " y ∈ [{}, {}] ",
        format_number(plot.display.y_min),
        format_number(plot.display.y_max)
    );
    if plot.detected != plot.display {
        text.push_str(&format!(
            "(detected [{}, {}], ceiling {}) ",
            format_number(plot.detected.y_min),
            format_number(plot.detected.y_max),
            format_number(ceiling)
        ));
    }

    let width = (text.width() as u16).min(area.width.saturating_sub(2));
    let bottom = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(1),
        width,
        1,
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        bottom,
    );
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = &app.message {
        let line = Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let samples = match app.config.sample_count {
        Some(count) => count.to_string(),
        None => "auto".to_string(),
    };
    let settings = format!(
        "x ∈ [{}, {}]  ceiling {}  samples {} ",
        format_number(app.x_min),
        format_number(app.x_max),
        format_number(app.config.display_y_ceiling),
        samples
    );

    let keys = [
        ("Enter", "Plot"),
        ("Up/Down", "History"),
        ("F1", "Help"),
        ("Ctrl+U", "Clear Input"),
    ];

    let mut spans: Vec<Span> = vec![Span::styled(settings, Style::default().fg(Color::Cyan))];
    spans.extend(keys.iter().flat_map(|(key, desc)| {
        vec![
            Span::styled(
                *key,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", desc),
                Style::default().fg(Color::DarkGray),
            ),
        ]
    }));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" f(x) ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = (inner_area.width.saturating_sub(2)) as usize;
    let total_chars = app.input.chars().count();
    app.adjust_input_scroll(visible_width);

    let visible_input: String = app.input
        .chars()
        .skip(app.input_scroll)
        .take(visible_width)
        .collect();

    let input_line = format!("> {}", visible_input);
    let paragraph = Paragraph::new(input_line);
    frame.render_widget(paragraph, inner_area);

    let visible_cursor = app.cursor_position.saturating_sub(app.input_scroll);
    let visible_prefix = visible_input.chars().take(visible_cursor).collect::<String>();
    let cursor_x = inner_area.x + 2 + visible_prefix.width() as u16;
    let cursor_y = inner_area.y;
    frame.set_cursor(cursor_x, cursor_y);

    let scroll_indicator_style = Style::default().fg(Color::DarkGray);

    if app.input_scroll > 0 {
        let left_indicator = Paragraph::new("<").style(scroll_indicator_style);
        frame.render_widget(left_indicator, Rect::new(inner_area.x, inner_area.y, 1, 1));
    }

    if total_chars > app.input_scroll + visible_width {
        let right_indicator = Paragraph::new(">").style(scroll_indicator_style);
        frame.render_widget(
            right_indicator,
            Rect::new(inner_area.x + inner_area.width - 1, inner_area.y, 1, 1),
        );
    }
}
