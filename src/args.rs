use crate::error::ActionError;

/// Split `amplify_arguments` into argv words the way a POSIX shell would, minus
/// expansion: whitespace separates words, single quotes are literal, double quotes allow
/// backslash escapes, a bare backslash escapes the next character.
pub fn split_arguments(raw: &str) -> Result<Vec<String>, ActionError> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Normal,
        SingleQuoted,
        DoubleQuoted,
    }

    let mut out = Vec::new();
    let mut current = String::new();
    // distinguishes `''` (an empty word) from no word at all
    let mut in_word = false;
    let mut mode = Mode::Normal;
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        match mode {
            Mode::Normal => match ch {
                '\'' => {
                    mode = Mode::SingleQuoted;
                    in_word = true;
                }
                '"' => {
                    mode = Mode::DoubleQuoted;
                    in_word = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        out.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
            Mode::SingleQuoted => {
                if ch == '\'' {
                    mode = Mode::Normal;
                } else {
                    current.push(ch);
                }
            }
            Mode::DoubleQuoted => match ch {
                '"' => mode = Mode::Normal,
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                c => current.push(c),
            },
        }
    }

    if mode != Mode::Normal {
        return Err(ActionError::UnterminatedQuote(raw.to_string()));
    }
    if in_word {
        out.push(current);
    }
    Ok(out)
}

/// Render an argv for logs. The value after `--providers` carries credentials and is
/// masked.
pub fn display_args(args: &[String]) -> String {
    let mut shown = Vec::with_capacity(args.len());
    let mut mask_next = false;
    for a in args {
        if mask_next {
            shown.push("<redacted>".to_string());
            mask_next = false;
            continue;
        }
        if a == "--providers" {
            mask_next = true;
        }
        if a.is_empty() || a.chars().any(char::is_whitespace) {
            shown.push(format!("'{a}'"));
        } else {
            shown.push(a.clone());
        }
    }
    shown.join(" ")
}
