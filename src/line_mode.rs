use crate::command::Command;
use anyhow::Result;
use rustplot::{PlotConfig, Raster};
use std::io::{stdin, stdout, Write};
use unicode_width::UnicodeWidthStr;
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};

const PROMPT: &str = "f(x) = ";

// Функция для преобразования позиции символа в байтовую позицию
fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

pub fn run_line(mut x_min: f64, mut x_max: f64, mut config: PlotConfig) -> Result<()> {
    println!("Rust Console Plotter");
    println!("Enter a function of x: +, -, *, /, ^ and sin, cos, tan, log, exp");
    println!("Commands: 'range <min> <max>', 'ceiling <c>', 'samples <n>|auto', 'quit'");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history\n");

    let mut stdout = stdout().into_raw_mode()?;
    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;

    loop {
        write!(stdout, "{}{}", ClearLine, PROMPT)?;
        stdout.flush()?;

        let mut expression = String::new();
        let mut cursor_pos = 0;  // позиция курсора в символах
        let (_, initial_y) = stdout.cursor_pos()?;

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(
                stdout,
                "{}{}{}{}",
                Goto(1, initial_y),
                ClearLine,
                PROMPT,
                expression
            )?;

            let prefix: String = expression.chars().take(cursor_pos).collect();
            write!(stdout, "{}", Goto((PROMPT.len() + prefix.width() + 1) as u16, initial_y))?;
            stdout.flush()?;

            let key = match keys.next() {
                Some(key) => key?,
                None => return Ok(()),
            };
            match key {
                Key::Char('\n') => break,
                Key::Ctrl('c') | Key::Ctrl('d') => {
                    write!(stdout, "\r\n")?;
                    return Ok(());
                }
                Key::Ctrl('u') => {
                    expression.clear();
                    cursor_pos = 0;
                }
                Key::Char(c) => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos += 1;
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    if let Some(c) = expression[byte_idx..].chars().next() {
                        expression.drain(byte_idx..byte_idx + c.len_utf8());
                    }
                }
                Key::Delete if cursor_pos < expression.chars().count() => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    if let Some(c) = expression[byte_idx..].chars().next() {
                        expression.drain(byte_idx..byte_idx + c.len_utf8());
                    }
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = expression.chars().count(),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    } else {
                        history_index = history.len();
                        expression.clear();
                        cursor_pos = 0;
                    }
                }
                _ => {}
            }
        }

        let command = match Command::parse(&expression) {
            Some(command) => command,
            None => {
                write!(stdout, "\r\n")?;
                continue;
            }
        };
        history.push(expression.trim().to_string());
        history_index = history.len();

        match command {
            Ok(Command::Quit) => {
                write!(stdout, "\r\nGoodbye!\r\n")?;
                return Ok(());
            }
            Ok(Command::Clear) => {
                history.clear();
                history_index = 0;
                write!(stdout, "{}{}", termion::clear::All, Goto(1, 1))?;
            }
            Ok(Command::Help) => {
                write!(stdout, "\r\n  Functions: sin cos tan log exp; operators + - * / ^\r\n")?;
                write!(stdout, "  range <min> <max> | ceiling <c> | samples <n>|auto | clear | quit\r\n\r\n")?;
            }
            Ok(Command::Range(min, max)) => {
                x_min = min;
                x_max = max;
                write!(stdout, "\r\n  x ∈ [{}, {}]\r\n\r\n", x_min, x_max)?;
            }
            Ok(Command::Ceiling(ceiling)) => {
                config.display_y_ceiling = ceiling;
                write!(stdout, "\r\n  ceiling = {}\r\n\r\n", ceiling)?;
            }
            Ok(Command::Samples(count)) => {
                config.sample_count = count;
                write!(stdout, "\r\n  samples = {}\r\n\r\n", count.map_or("auto".to_string(), |n| n.to_string()))?;
            }
            Ok(Command::Plot(expression)) => {
                let (columns, rows) = termion::terminal_size()?;
                // Leave room for the prompt and the blank line around the plot.
                let width = columns.max(2) as usize;
                let height = rows.saturating_sub(3).max(2) as usize;

                match Raster::from_expression(&expression, x_min, x_max, width, height, &config) {
                    Ok(raster) => {
                        write!(stdout, "\r\n")?;
                        for line in raster.lines() {
                            write!(stdout, "{}\r\n", line)?;
                        }
                    }
                    Err(e) => write!(stdout, "\r\n  {} = Error: {}\r\n\r\n", expression, e)?,
                }
            }
            Err(e) => write!(stdout, "\r\n  Error: {}\r\n\r\n", e)?,
        }
    }
}
