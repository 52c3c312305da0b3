//! Windows batch file helpers

/// Characters `cmd.exe` treats specially, caret first so escapes are not re-escaped
const SPECIAL_CHARACTERS: [char; 10] = ['^', '%', '(', ')', '"', '<', '>', '&', '!', '|'];

/// Batch line terminator
pub const CRLF: &str = "\r\n";

/// Prefix every batch metacharacter with `^`
pub fn escape_special_characters(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if SPECIAL_CHARACTERS.contains(&c) {
            escaped.push('^');
        }
        escaped.push(c);
    }
    escaped
}

/// Join a command and its `KEY=value` arguments into one continued command
///
/// Each argument sits on its own indented line; every line but the last ends
/// with ` ^` and all lines end with CRLF.
pub fn continued_command(command: &str, arguments: &[(String, String)]) -> String {
    let mut lines = Vec::with_capacity(arguments.len() + 1);
    lines.push(command.to_string());
    lines.extend(
        arguments
            .iter()
            .map(|(key, value)| format!("  {key}={value}")),
    );

    let last = lines.len() - 1;
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line);
        if i != last {
            out.push_str(" ^");
        }
        out.push_str(CRLF);
    }
    out
}
