use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use rustplot::calc_engine::{function_names, VARIABLE};

pub fn format_number(x: f64) -> String {
    if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        s.trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

pub fn format_with_spaces(expr: &str) -> String {
    let mut result = String::new();
    let mut last_char = '\0';

    for c in expr.chars() {
        match c {
            '+' | '-' | '*' | '/' if !matches!(last_char, '\0' | '(' | '^' | '*' | '/' | '+' | '-') => {
                result.push(' ');
                result.push(c);
                result.push(' ');
                last_char = c;
            }
            ',' => {
                result.push_str(", ");
                last_char = c;
            }
            _ if c.is_whitespace() => continue,
            _ => {
                result.push(c);
                last_char = c;
            }
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_math_function(word: &str) -> bool {
    function_names().any(|name| name == word)
}

pub fn highlight_functions(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let function_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    let variable_style = Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::ITALIC);

    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default()
        .fg(Color::LightGreen);

    let word_style = |word: &str| {
        if is_math_function(word) {
            function_style
        } else if word == VARIABLE {
            variable_style
        } else {
            base_style
        }
    };

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_number = false;

    for c in expr.chars() {
        if c.is_alphabetic() || c == '_' || (in_word && c.is_ascii_digit()) {
            if in_number {
                spans.push(Span::styled(current.clone(), number_style));
                current.clear();
                in_number = false;
            }

            current.push(c);
            in_word = true;
        } else if c.is_ascii_digit() || c == '.' {
            current.push(c);
            in_number = true;
        } else {
            if in_word {
                spans.push(Span::styled(current.clone(), word_style(&current)));
                current.clear();
                in_word = false;
            } else if in_number {
                spans.push(Span::styled(current.clone(), number_style));
                current.clear();
                in_number = false;
            }

            match c {
                '+' | '-' | '*' | '/' | '^' => {
                    spans.push(Span::styled(c.to_string(), operator_style));
                }
                ' ' => {
                    spans.push(Span::raw(" "));
                }
                _ => {
                    spans.push(Span::styled(c.to_string(), base_style));
                }
            }
        }
    }

    if in_word {
        let style = word_style(&current);
        spans.push(Span::styled(current, style));
    } else if in_number {
        spans.push(Span::styled(current, number_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-10.0), "-10");
        assert_eq!(format_number(729.0), "729");
        assert_eq!(format_number(1e12), "1.000000e12");
    }

    #[test]
    fn spacing() {
        assert_eq!(format_with_spaces("2*x+1"), "2 * x + 1");
        assert_eq!(format_with_spaces("-x^-2"), "-x^-2");
        assert_eq!(format_with_spaces("sin( x )/ 3"), "sin(x) / 3");
    }

    #[test]
    fn highlighting() {
        let spans = highlight_functions("sin(x)+1.5", Style::default());
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, ["sin", "(", "x", ")", "+", "1.5"]);
        assert_eq!(spans[0].style.fg, Some(Color::LightBlue));
        assert_eq!(spans[2].style.fg, Some(Color::LightCyan));
        assert_eq!(spans[5].style.fg, Some(Color::LightGreen));
        assert!(!is_math_function("foo"));
    }
}
