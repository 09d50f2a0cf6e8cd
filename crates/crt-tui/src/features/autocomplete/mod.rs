//! Tab completion for command names and path arguments.
//!
//! Pure functions only: the input slice calls [`complete`] and splices the
//! result back into its buffer via [`AutocompleteResult::apply`].

/// Commands the game server understands, in display order.
pub const COMMANDS: &[&str] = &[
    "help", "ls", "cd", "pwd", "cat", "scan", "crack", "connect", "exit", "clear", "cls",
];

/// Commands whose argument is a path.
pub const PATH_COMMANDS: &[&str] = &["cd", "cat", "ls"];

/// Paths offered for path arguments, in tie-break order.
pub const PATH_CANDIDATES: &[&str] = &["/", "/home/", "/home/user/", "../", "./"];

/// Outcome of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteResult {
    /// Replacement for `input[replace_from..]`.
    pub completed_text: String,
    pub multiple_matches: bool,
    /// Candidates when `multiple_matches` is set, empty otherwise.
    pub matches: Vec<String>,
    /// Byte offset in the original input where `completed_text` starts.
    pub replace_from: usize,
}

impl AutocompleteResult {
    fn unchanged(input: &str, replace_from: usize) -> Self {
        Self {
            completed_text: input[replace_from..].to_string(),
            multiple_matches: false,
            matches: Vec::new(),
            replace_from,
        }
    }

    /// Returns the full line after applying this completion to `input`.
    pub fn apply(&self, input: &str) -> String {
        let keep = input.get(..self.replace_from).unwrap_or(input);
        format!("{keep}{}", self.completed_text)
    }
}

/// Completes the command word, or the path argument of a path command.
pub fn complete(input: &str) -> AutocompleteResult {
    let tokens: Vec<&str> = input.split_whitespace().collect();

    match tokens.as_slice() {
        [] => complete_command(input, ""),
        [command] => complete_command(input, command),
        [command, args @ ..] => {
            let replace_from = argument_start(input);
            if !PATH_COMMANDS.contains(&command.to_lowercase().as_str()) {
                return AutocompleteResult::unchanged(input, replace_from);
            }
            complete_path(input, replace_from, &args.join(" "))
        }
    }
}

fn complete_command(input: &str, partial: &str) -> AutocompleteResult {
    let partial = partial.to_lowercase();
    let matches: Vec<&str> = COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.to_lowercase().starts_with(&partial))
        .collect();

    match matches.as_slice() {
        [] => AutocompleteResult::unchanged(input, 0),
        [only] => AutocompleteResult {
            completed_text: format!("{only} "),
            multiple_matches: false,
            matches: Vec::new(),
            replace_from: 0,
        },
        _ => AutocompleteResult {
            completed_text: common_prefix(&matches),
            multiple_matches: true,
            matches: matches.iter().map(ToString::to_string).collect(),
            replace_from: 0,
        },
    }
}

/// Matches against the directory part of `partial` (up to the last `/`),
/// so the result may be shorter than what was typed.
fn complete_path(input: &str, replace_from: usize, partial: &str) -> AutocompleteResult {
    let dir = match partial.rfind('/') {
        Some(0) => "/",
        Some(idx) => &partial[..idx],
        None => "",
    };
    let prefix = if partial.is_empty() { "." } else { dir };

    let matches: Vec<&str> = PATH_CANDIDATES
        .iter()
        .copied()
        .filter(|path| path.starts_with(prefix) && *path != partial)
        .collect();

    match matches.as_slice() {
        [] => AutocompleteResult::unchanged(input, replace_from),
        [only] => AutocompleteResult {
            completed_text: (*only).to_string(),
            multiple_matches: false,
            matches: Vec::new(),
            replace_from,
        },
        _ => AutocompleteResult {
            completed_text: common_prefix(&matches),
            multiple_matches: true,
            matches: matches.iter().map(ToString::to_string).collect(),
            replace_from,
        },
    }
}

/// Byte offset of the second whitespace-separated token.
fn argument_start(input: &str) -> usize {
    let command_start = input.len() - input.trim_start().len();
    let after_command = input[command_start..]
        .find(char::is_whitespace)
        .map_or(input.len(), |idx| command_start + idx);
    let rest = &input[after_command..];
    after_command + (rest.len() - rest.trim_start().len())
}

/// Longest case-insensitive common prefix, keeping the first string's casing.
pub fn common_prefix(strings: &[&str]) -> String {
    let Some((first, rest)) = strings.split_first() else {
        return String::new();
    };

    let mut others: Vec<_> = rest.iter().map(|s| s.chars()).collect();
    let mut prefix = String::new();

    for ch in first.chars() {
        let all_match = others.iter_mut().all(|chars| {
            chars
                .next()
                .is_some_and(|other| other.to_lowercase().eq(ch.to_lowercase()))
        });
        if !all_match {
            break;
        }
        prefix.push(ch);
    }

    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_command_match_gets_trailing_space() {
        let result = complete("h");
        assert_eq!(result.completed_text, "help ");
        assert!(!result.multiple_matches);
        assert!(result.matches.is_empty());
        assert_eq!(result.apply("h"), "help ");
    }

    #[test]
    fn command_match_is_case_insensitive() {
        assert_eq!(complete("SC").completed_text, "scan ");
    }

    #[test]
    fn ambiguous_command_collapses_to_common_prefix() {
        let result = complete("c");
        assert_eq!(result.completed_text, "c");
        assert!(result.multiple_matches);
        assert_eq!(
            result.matches,
            vec!["cd", "cat", "crack", "connect", "clear", "cls"]
        );

        let result = complete("cl");
        assert_eq!(result.completed_text, "cl");
        assert_eq!(result.matches, vec!["clear", "cls"]);

        let result = complete("cr");
        assert_eq!(result.completed_text, "crack ");
        assert!(!result.multiple_matches);
    }

    #[test]
    fn unknown_command_is_unchanged() {
        let result = complete("xyz");
        assert_eq!(result.completed_text, "xyz");
        assert!(!result.multiple_matches);
        assert_eq!(result.apply("xyz"), "xyz");
    }

    #[test]
    fn empty_input_lists_every_command() {
        let result = complete("");
        assert_eq!(result.completed_text, "");
        assert!(result.multiple_matches);
        assert_eq!(result.matches.len(), COMMANDS.len());
    }

    #[test]
    fn single_match_completion_is_idempotent() {
        for input in ["h", "sc", "pw", "ex", "cls"] {
            let first = complete(input);
            assert!(!first.multiple_matches, "{input}");
            let again = complete(&first.apply(input));
            assert_eq!(again, first, "{input}");
        }
    }

    #[test]
    fn non_path_command_arguments_are_left_alone() {
        let input = "scan  10.0.0.1 ";
        let result = complete(input);
        assert_eq!(result.replace_from, 6);
        assert_eq!(result.completed_text, "10.0.0.1 ");
        assert!(!result.multiple_matches);
        assert_eq!(result.apply(input), input);
    }

    #[test]
    fn path_argument_without_slash_offers_every_path() {
        let result = complete("cd .");
        assert!(result.multiple_matches);
        assert_eq!(result.matches, PATH_CANDIDATES.to_vec());
        assert_eq!(result.completed_text, "");
        assert_eq!(result.apply("cd ."), "cd ");
    }

    #[test]
    fn root_slash_extends_to_home() {
        let result = complete("cd /");
        assert_eq!(result.replace_from, 3);
        assert!(result.multiple_matches);
        assert_eq!(result.matches, vec!["/home/", "/home/user/"]);
        assert_eq!(result.apply("cd /"), "cd /home/");
    }

    #[test]
    fn path_completion_resolves_from_the_directory_part() {
        let input = "cat /home/u";
        let result = complete(input);
        assert!(result.multiple_matches);
        assert_eq!(result.matches, vec!["/home/", "/home/user/"]);
        assert_eq!(result.completed_text, "/home/");
        assert_eq!(result.apply(input), "cat /home/");

        let input = "ls /home/user/docs";
        let result = complete(input);
        assert!(!result.multiple_matches);
        assert!(result.matches.is_empty());
        assert_eq!(result.completed_text, "/home/user/");
        assert_eq!(result.apply(input), "ls /home/user/");
    }

    #[test]
    fn exact_path_is_not_offered_again() {
        let result = complete("cd ../");
        assert!(!result.multiple_matches);
        assert_eq!(result.apply("cd ../"), "cd ../");
    }

    #[test]
    fn path_command_is_case_insensitive() {
        let result = complete("CD /");
        assert_eq!(result.apply("CD /"), "CD /home/");
    }

    #[test]
    fn common_prefix_preserves_first_casing() {
        assert_eq!(common_prefix(&["HELLO", "help", "Helm"]), "HEL");
        assert_eq!(common_prefix(&["abc"]), "abc");
        assert_eq!(common_prefix(&["abc", "xyz"]), "");
        assert_eq!(common_prefix(&["ab", "abc"]), "ab");
        assert_eq!(common_prefix(&[]), "");
    }

    #[test]
    fn argument_start_skips_leading_and_inner_whitespace() {
        assert_eq!(argument_start("cd /"), 3);
        assert_eq!(argument_start("  cat\t  x"), 8);
    }
}
