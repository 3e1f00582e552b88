use crate::command::Command;
use rustplot::{plot, Plot, PlotConfig, PlotError, Viewport};

/// Everything a plot depends on; the cached plot is reused while it matches.
#[derive(Debug, Clone, PartialEq)]
struct PlotKey {
    expression: String,
    x_min: f64,
    x_max: f64,
    config: PlotConfig,
    viewport: Viewport,
}

pub struct App {
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub history: Vec<String>,
    pub cursor_history: usize,
    pub expression: Option<String>,
    pub x_min: f64,
    pub x_max: f64,
    pub config: PlotConfig,
    pub message: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub terminal_too_small: bool,
    plot_cache: Option<(PlotKey, Result<Plot, PlotError>)>,
}

impl App {
    pub fn new(x_min: f64, x_max: f64, config: PlotConfig, expression: Option<String>) -> Self {
        let history: Vec<String> = expression.iter().cloned().collect();
        App {
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            cursor_history: history.len(),
            history,
            expression,
            x_min,
            x_max,
            config,
            message: None,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            terminal_too_small: false,
            plot_cache: None,
        }
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total_chars = self.input.chars().count();
        let cursor_pos = self.cursor_position;

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        }
        else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos - visible_width + 1;
        }

        if self.input_scroll > total_chars.saturating_sub(visible_width) {
            self.input_scroll = total_chars.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let command = match Command::parse(&self.input) {
            Some(command) => command,
            None => return,
        };
        self.message = None;

        match command {
            Ok(Command::Quit) => {
                self.should_quit = true;
                return;
            }
            Ok(Command::Clear) => {
                self.history.clear();
                self.cursor_history = 0;
                self.expression = None;
            }
            Ok(Command::Help) => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            Ok(Command::Range(x_min, x_max)) => {
                self.x_min = x_min;
                self.x_max = x_max;
            }
            Ok(Command::Ceiling(ceiling)) => self.config.display_y_ceiling = ceiling,
            Ok(Command::Samples(count)) => self.config.sample_count = count,
            Ok(Command::Plot(expression)) => {
                self.history.push(expression.clone());
                self.cursor_history = self.history.len();
                self.expression = Some(expression);
            }
            Err(e) => self.message = Some(e.to_string()),
        }

        self.clear_input();
    }

    /// Lays out the current expression for a canvas of `viewport` pixels,
    /// using `layout` for ticks and labels and the user's ceiling and sample count.
    /// The result is rebuilt only when one of those inputs changes.
    pub fn current_plot(&mut self, viewport: Viewport, layout: &PlotConfig) -> Option<&Result<Plot, PlotError>> {
        let key = PlotKey {
            expression: self.expression.clone()?,
            x_min: self.x_min,
            x_max: self.x_max,
            config: PlotConfig {
                sample_count: self.config.sample_count,
                display_y_ceiling: self.config.display_y_ceiling,
                max_ticks: self.config.max_ticks,
                ..layout.clone()
            },
            viewport,
        };

        if self.plot_cache.as_ref().map_or(true, |(cached, _)| *cached != key) {
            let result = plot(&key.expression, key.x_min, key.x_max, key.viewport, &key.config);
            self.plot_cache = Some((key, result));
        }
        self.plot_cache.as_ref().map(|(_, result)| result)
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input.chars().count()),
            _ => {}
        }
    }

    pub fn move_cursor_by_words(&mut self, direction: i32) {
        let input_chars: Vec<char> = self.input.chars().collect();
        let mut pos = self.cursor_position;

        if direction < 0 {
            while pos > 0 && !is_word_char(input_chars[pos - 1]) {
                pos -= 1;
            }
            while pos > 0 && is_word_char(input_chars[pos - 1]) {
                pos -= 1;
            }
        } else {
            let len = input_chars.len();
            while pos < len && is_word_char(input_chars[pos]) {
                pos += 1;
            }
            while pos < len && !is_word_char(input_chars[pos]) {
                pos += 1;
            }
        }

        self.cursor_position = pos.min(input_chars.len());
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len() {
            self.cursor_history += 1;
        }

        match self.history.get(self.cursor_history) {
            Some(entry) => self.input = entry.clone(),
            None => self.input.clear(),
        }
        self.cursor_position = self.input.chars().count();
        self.input_scroll = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = App::char_index_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        let byte_idx = App::char_index_to_byte_index(&self.input, self.cursor_position);
        let next_char = self.input[byte_idx..].chars().next();
        if let Some(c) = next_char {
            let end = byte_idx + c.len_utf8();
            self.input.drain(byte_idx..end);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.delete_char();
        }
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }

    pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
        s.char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or_else(|| s.len())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}
