/// Split a raw input line into the command (or alias) token and its arguments.
///
/// Runs of whitespace separate tokens. No quoting or escaping is interpreted;
/// a blank line yields an empty command token and no arguments.
pub fn tokenize(line: &str) -> (String, Vec<String>) {
    let mut tokens = line.split_whitespace().map(str::to_owned);
    match tokens.next() {
        Some(command) => (command, tokens.collect()),
        None => (String::new(), Vec::new()),
    }
}
