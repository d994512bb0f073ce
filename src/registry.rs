use crate::command::Command;
use std::collections::HashMap;
use std::rc::Rc;

/// Owner of every registered command and of the alias table.
///
/// Commands are keyed by their unique name; aliases map an alternate name to a
/// command name. The two namespaces overlap freely: lookups try the command
/// table first, then the alias table.
#[derive(Debug, Default)]
pub struct Registry {
    commands: HashMap<String, Rc<Command>>,
    aliases: HashMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `cmd`, replacing any command with the same name, and point each of
    /// its declared aliases at it.
    ///
    /// Returns the aliases that already existed and were overwritten, paired with
    /// their previous target.
    pub fn register(&mut self, cmd: Command) -> Vec<(String, String)> {
        let name = cmd.name().to_string();
        let overwritten = cmd
            .aliases()
            .iter()
            .filter_map(|alias| {
                self.create_alias(alias, &name)
                    .map(|previous| (alias.clone(), previous))
            })
            .collect();
        self.commands.insert(name, Rc::new(cmd));
        overwritten
    }

    /// Map `alias` to `target`, returning the previous target if the alias existed.
    ///
    /// The target is not checked: an alias may point at a command that is not
    /// (or no longer) registered, in which case it simply fails to resolve.
    pub fn create_alias(&mut self, alias: &str, target: &str) -> Option<String> {
        self.aliases.insert(alias.to_string(), target.to_string())
    }

    /// Find the command called `token`, or the command `token` is an alias of.
    pub fn resolve(&self, token: &str) -> Option<Rc<Command>> {
        if let Some(command) = self.commands.get(token) {
            return Some(Rc::clone(command));
        }
        self.aliases
            .get(token)
            .and_then(|target| self.commands.get(target))
            .map(Rc::clone)
    }

    /// Whether a command (not an alias) is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Remove a command. Aliases pointing at it are kept and stop resolving.
    pub fn unregister(&mut self, name: &str) -> Option<Rc<Command>> {
        self.commands.remove(name)
    }

    /// All registered commands, in no particular order.
    pub fn list(&self) -> Vec<Rc<Command>> {
        self.commands.values().cloned().collect()
    }

    /// All registered commands sorted by name.
    pub fn sorted(&self) -> Vec<Rc<Command>> {
        let mut commands = self.list();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        commands
    }

    /// Target of `alias`, whether or not that target is registered.
    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// `(alias, target)` pairs sorted by alias.
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        let mut aliases: Vec<_> = self
            .aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
            .collect();
        aliases.sort();
        aliases
    }

    /// Sorted aliases currently pointing at `name`.
    pub fn aliases_of(&self, name: &str) -> Vec<&str> {
        self.aliases()
            .into_iter()
            .filter(|(_, target)| *target == name)
            .map(|(alias, _)| alias)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
