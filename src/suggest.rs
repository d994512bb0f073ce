use crate::distance::edit_distance;
use crate::registry::Registry;

/// Largest edit distance still offered as a "did you mean" hint.
pub const SUGGESTION_THRESHOLD: usize = 2;

/// Nearest known name to an unresolved token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Canonical name of the suggested command.
    pub command: String,
    /// The alias that matched, when the closest name was an alias.
    pub alias: Option<String>,
}

/// Find the command name or alias closest to `token`.
///
/// Command names are scanned in name order, then aliases in alias order; only
/// aliases whose target is registered take part. A candidate replaces the
/// current best only when strictly closer, so ties go to the first one scanned.
/// Nothing further than [`SUGGESTION_THRESHOLD`] is returned.
pub fn suggest(registry: &Registry, token: &str) -> Option<Suggestion> {
    let mut best: Option<(usize, Suggestion)> = None;
    let mut consider = |distance: usize, suggestion: Suggestion| {
        if distance > SUGGESTION_THRESHOLD {
            return;
        }
        if best.as_ref().is_none_or(|(current, _)| distance < *current) {
            best = Some((distance, suggestion));
        }
    };

    for command in registry.sorted() {
        consider(
            edit_distance(command.name(), token),
            Suggestion {
                command: command.name().to_string(),
                alias: None,
            },
        );
    }

    for (alias, target) in registry.aliases() {
        if registry.resolve(target).is_none() {
            continue;
        }
        consider(
            edit_distance(alias, token),
            Suggestion {
                command: target.to_string(),
                alias: Some(alias.to_string()),
            },
        );
    }

    best.map(|(_, suggestion)| suggestion)
}
