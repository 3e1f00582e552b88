use crate::tui_mode::app::App;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" RustPlot Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled("RustPlot - Terminal Function Plotter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
        Line::from(""),
        heading("Expressions:"),
        Line::from("  Type a function of x and press Enter to plot it."),
        Line::from("  + : Addition        (e.g., x + 3)"),
        Line::from("  - : Subtraction     (e.g., 10 - x, -x)"),
        Line::from("  * : Multiplication  (e.g., 2 * x)"),
        Line::from("  / : Division        (e.g., 1 / x, gaps where undefined)"),
        Line::from("  ^ : Power           (e.g., x ^ 2, right associative)"),
        Line::from("  Numbers: 3, 0.5, .5, 1e-3"),
        Line::from(""),
        heading("Functions:"),
        Line::from("  sin(x) : Sine (radians)"),
        Line::from("  cos(x) : Cosine (radians)"),
        Line::from("  tan(x) : Tangent (radians)"),
        Line::from("  log(x) : Natural logarithm"),
        Line::from("  exp(x) : Exponential function"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  range <min> <max> : Set the x domain (default -10 10)"),
        Line::from("  ceiling <c>       : Clamp the y axis to [-c, c] (default 10)"),
        Line::from("  samples <n>|auto  : Samples per plot (auto = one per dot)"),
        Line::from("  clear             : Remove the plot and history"),
        Line::from("  help              : Show this help screen"),
        Line::from("  quit              : Exit"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Recall previous expressions"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  Esc/F1 : Close this screen"),
        Line::from(""),
        heading("Examples:"),
        Line::from("  sin(x) * 3"),
        Line::from("  x ^ 3 - 2 * x"),
        Line::from("  1 / x"),
        Line::from("  exp(-x ^ 2)"),
        Line::from("  log(x)"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
