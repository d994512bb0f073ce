use crate::command::EMPTY_TAG;
use crate::registry::Registry;
use std::collections::HashMap;

/// Snapshot of what tab completion can offer, taken from a [`Registry`].
///
/// The line editor owns its own copy, so the registry stays free to change while
/// the snapshot is in use; the shell hands over a fresh one before every read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionTable {
    commands: Vec<String>,
    /// Argument tags per command name and per resolvable alias.
    tags: HashMap<String, Vec<String>>,
}

impl CompletionTable {
    pub fn from_registry(registry: &Registry) -> Self {
        let mut table = CompletionTable::default();
        for command in registry.sorted() {
            table.commands.push(command.name().to_string());
            let tags: Vec<String> = command
                .arguments()
                .iter()
                .filter(|arg| arg.tag != EMPTY_TAG)
                .map(|arg| arg.tag.clone())
                .collect();
            table.tags.insert(command.name().to_string(), tags);
        }
        for (alias, _) in registry.aliases() {
            if registry.contains(alias) {
                continue;
            }
            if let Some(command) = registry.resolve(alias) {
                let tags = table.tags.get(command.name()).cloned().unwrap_or_default();
                table.tags.insert(alias.to_string(), tags);
            }
        }
        table
    }

    /// Command names starting with `prefix`, sorted.
    pub fn complete_command(&self, prefix: &str) -> Vec<String> {
        self.commands
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Argument tags of `command` (a name or alias) starting with `prefix`.
    pub fn complete_argument(&self, command: &str, prefix: &str) -> Vec<String> {
        self.tags
            .get(command)
            .map(|tags| {
                tags.iter()
                    .filter(|tag| tag.starts_with(prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Completions for the text left of the cursor.
    ///
    /// Returns the byte offset where the replaced word starts together with the
    /// candidates for it. The first word completes to command names, every later
    /// word to the resolved command's argument tags.
    pub fn complete(&self, line: &str) -> (usize, Vec<String>) {
        let word_start = line
            .rfind(char::is_whitespace)
            .map(|idx| idx + line[idx..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        let word = &line[word_start..];

        let mut words = line[..word_start].split_whitespace();
        match words.next() {
            None if word.is_empty() => (word_start, Vec::new()),
            None => (word_start, self.complete_command(word)),
            Some(command) => (word_start, self.complete_argument(command, word)),
        }
    }
}
