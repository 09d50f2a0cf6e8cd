//! Input feature reducer.
//!
//! Maps key and paste events onto editor transitions. Editor effects are
//! turned into runtime effects and transcript mutations here.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers as CrosstermKeyModifiers};
use crt_protocol::SystemLevel;

use super::{CursorMove, DeleteDirection, EditorEffect, EditorState};
use crate::effects::UiEffect;
use crate::transcript::{TranscriptEntry, TranscriptMutation};

/// Notice shown when a command is submitted without a live session.
pub const OFFLINE_NOTICE: &str = "Not connected: command was not sent";

/// Result type for key handlers.
type KeyResult = (Vec<UiEffect>, Vec<TranscriptMutation>);

/// Context for handling main key input.
pub struct InputContext<'a> {
    /// Prompt shown before the line, echoed with submitted commands.
    pub prompt: &'a str,
    pub online: bool,
}

/// Handles a bracketed paste.
pub fn handle_paste(input: &mut EditorState, text: &str) {
    input.on_paste(text);
}

/// Handles a key press on the prompt line.
pub fn handle_main_key(input: &mut EditorState, ctx: &InputContext<'_>, key: KeyEvent) -> KeyResult {
    if key.kind == KeyEventKind::Release {
        return (vec![], vec![]);
    }

    let mods = Modifiers::from(&key);

    // Try each handler category in order; first match wins
    handle_line_editing(input, ctx, key.code, &mods)
        .or_else(|| handle_word_editing(input, key.code, &mods))
        .or_else(|| handle_navigation(input, key.code, &mods))
        .or_else(|| handle_control_keys(input, key.code, &mods))
        .or_else(|| handle_submission(input, ctx, key.code, &mods))
        .unwrap_or_else(|| handle_default_input(input, key.code, &mods))
}

/// Turns an editor effect into runtime effects and transcript mutations.
pub fn apply_editor_effect(effect: EditorEffect, ctx: &InputContext<'_>) -> KeyResult {
    match effect {
        EditorEffect::ClearScreen => (vec![], vec![TranscriptMutation::Clear]),
        EditorEffect::SubmitCommand(command) => {
            let mut mutations = vec![
                TranscriptMutation::ScrollToBottom,
                TranscriptMutation::Append(TranscriptEntry::input_echo(ctx.prompt, &command)),
            ];
            if ctx.online {
                (vec![UiEffect::SendCommand { command }], mutations)
            } else {
                mutations.push(TranscriptMutation::Append(TranscriptEntry::system(
                    OFFLINE_NOTICE,
                    SystemLevel::Warning,
                )));
                (vec![], mutations)
            }
        }
    }
}

/// Parsed key modifiers for cleaner pattern matching.
struct Modifiers {
    ctrl: bool,
    shift: bool,
    alt: bool,
}

impl Modifiers {
    fn from(key: &KeyEvent) -> Self {
        Self {
            ctrl: key.modifiers.contains(CrosstermKeyModifiers::CONTROL),
            shift: key.modifiers.contains(CrosstermKeyModifiers::SHIFT),
            alt: key.modifiers.contains(CrosstermKeyModifiers::ALT),
        }
    }

    fn none(&self) -> bool {
        !self.ctrl && !self.shift && !self.alt
    }

    fn only_ctrl(&self) -> bool {
        self.ctrl && !self.shift && !self.alt
    }

    fn only_alt(&self) -> bool {
        self.alt && !self.ctrl && !self.shift
    }

    fn only_shift(&self) -> bool {
        self.shift && !self.ctrl && !self.alt
    }
}

// =============================================================================
// Line editing: Ctrl+A, Ctrl+E, Ctrl+U, Ctrl+K, Ctrl+L
// =============================================================================

fn handle_line_editing(
    input: &mut EditorState,
    ctx: &InputContext<'_>,
    code: KeyCode,
    mods: &Modifiers,
) -> Option<KeyResult> {
    match code {
        KeyCode::Char('a') if mods.only_ctrl() => {
            input.on_home();
            Some((vec![], vec![]))
        }
        KeyCode::Char('e') if mods.only_ctrl() => {
            input.on_end();
            Some((vec![], vec![]))
        }
        KeyCode::Char('u') if mods.only_ctrl() => {
            input.on_kill_to_head();
            Some((vec![], vec![]))
        }
        KeyCode::Char('k') if mods.only_ctrl() => {
            input.on_kill_to_end();
            Some((vec![], vec![]))
        }
        // Ctrl+L: clear the terminal, keep the half-typed line
        KeyCode::Char('l') if mods.only_ctrl() => {
            Some(apply_editor_effect(input.on_clear_shortcut(), ctx))
        }
        _ => None,
    }
}

// =============================================================================
// Word editing: Ctrl+W, Alt+Backspace, Alt+f/b (word movement)
// =============================================================================

fn handle_word_editing(
    input: &mut EditorState,
    code: KeyCode,
    mods: &Modifiers,
) -> Option<KeyResult> {
    match code {
        KeyCode::Char('w') if mods.only_ctrl() => {
            input.on_delete_word();
            Some((vec![], vec![]))
        }
        // macOS sends this for Option+Delete
        KeyCode::Backspace if mods.only_alt() => {
            input.on_delete_word();
            Some((vec![], vec![]))
        }
        KeyCode::Char('b') | KeyCode::Left if mods.only_alt() => {
            input.on_word_left();
            Some((vec![], vec![]))
        }
        KeyCode::Char('f') | KeyCode::Right if mods.only_alt() => {
            input.on_word_right();
            Some((vec![], vec![]))
        }
        _ => None,
    }
}

// =============================================================================
// Navigation: arrows, PageUp/Down, Home/End, history
// =============================================================================

fn handle_navigation(input: &mut EditorState, code: KeyCode, mods: &Modifiers) -> Option<KeyResult> {
    match code {
        KeyCode::PageUp => Some((vec![], vec![TranscriptMutation::PageUp])),
        KeyCode::PageDown => Some((vec![], vec![TranscriptMutation::PageDown])),
        KeyCode::Home if mods.ctrl => Some((vec![], vec![TranscriptMutation::ScrollToTop])),
        KeyCode::End if mods.ctrl => Some((vec![], vec![TranscriptMutation::ScrollToBottom])),
        KeyCode::Up if mods.none() => {
            input.on_history_prev();
            Some((vec![], vec![]))
        }
        KeyCode::Down if mods.none() => {
            input.on_history_next();
            Some((vec![], vec![]))
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End if mods.only_shift() => {
            input.on_select(match code {
                KeyCode::Left => CursorMove::Back,
                KeyCode::Right => CursorMove::Forward,
                KeyCode::Home => CursorMove::Head,
                _ => CursorMove::End,
            });
            Some((vec![], vec![]))
        }
        KeyCode::Left if mods.none() => {
            input.on_cursor_left();
            Some((vec![], vec![]))
        }
        KeyCode::Right if mods.none() => {
            input.on_cursor_right();
            Some((vec![], vec![]))
        }
        KeyCode::Home if mods.none() => {
            input.on_home();
            Some((vec![], vec![]))
        }
        KeyCode::End if mods.none() => {
            input.on_end();
            Some((vec![], vec![]))
        }
        _ => None,
    }
}

// =============================================================================
// Control keys: Ctrl+C, Ctrl+D, Escape
// =============================================================================

fn handle_control_keys(
    input: &mut EditorState,
    code: KeyCode,
    mods: &Modifiers,
) -> Option<KeyResult> {
    match code {
        // Ctrl+C: clear the line, or quit when it is already empty
        KeyCode::Char('c') if mods.ctrl => {
            if input.text().is_empty() {
                Some((vec![UiEffect::Quit], vec![]))
            } else {
                input.clear();
                Some((vec![], vec![]))
            }
        }
        KeyCode::Char('d') if mods.only_ctrl() => {
            if input.text().is_empty() {
                Some((vec![UiEffect::Quit], vec![]))
            } else {
                input.on_delete(DeleteDirection::Forward);
                Some((vec![], vec![]))
            }
        }
        KeyCode::Esc => {
            input.clear_suggestions();
            Some((vec![], vec![]))
        }
        _ => None,
    }
}

// =============================================================================
// Submission: Enter, Tab
// =============================================================================

fn handle_submission(
    input: &mut EditorState,
    ctx: &InputContext<'_>,
    code: KeyCode,
    mods: &Modifiers,
) -> Option<KeyResult> {
    match code {
        KeyCode::Enter if !mods.alt => Some(
            input
                .on_submit()
                .map_or_else(|| (vec![], vec![]), |effect| apply_editor_effect(effect, ctx)),
        ),
        KeyCode::Tab if mods.none() => {
            input.on_tab_complete();
            Some((vec![], vec![]))
        }
        _ => None,
    }
}

// =============================================================================
// Default input handling: character insertion, Backspace, Delete
// =============================================================================

fn handle_default_input(input: &mut EditorState, code: KeyCode, mods: &Modifiers) -> KeyResult {
    match code {
        KeyCode::Backspace => input.on_delete(DeleteDirection::Backward),
        KeyCode::Delete => input.on_delete(DeleteDirection::Forward),
        KeyCode::Char(c) if !mods.ctrl && !mods.alt => {
            let mut buf = [0u8; 4];
            input.on_character_input(c.encode_utf8(&mut buf));
        }
        _ => {}
    }
    (vec![], vec![])
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    const ONLINE: InputContext<'static> = InputContext {
        prompt: "$ ",
        online: true,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, CrosstermKeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), CrosstermKeyModifiers::CONTROL)
    }

    fn type_text(input: &mut EditorState, text: &str) {
        for c in text.chars() {
            handle_main_key(input, &ONLINE, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_sends_command_and_echoes_it() {
        let mut input = EditorState::default();
        type_text(&mut input, "ls -la");

        let (effects, mutations) = handle_main_key(&mut input, &ONLINE, key(KeyCode::Enter));

        assert_eq!(
            effects,
            vec![UiEffect::SendCommand {
                command: "ls -la".to_string()
            }]
        );
        assert_eq!(
            mutations,
            vec![
                TranscriptMutation::ScrollToBottom,
                TranscriptMutation::Append(TranscriptEntry::input_echo("$ ", "ls -la")),
            ]
        );
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_enter_while_offline_warns_instead_of_sending() {
        let mut input = EditorState::default();
        type_text(&mut input, "pwd");
        let ctx = InputContext {
            prompt: "$ ",
            online: false,
        };

        let (effects, mutations) = handle_main_key(&mut input, &ctx, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(
            mutations.last(),
            Some(&TranscriptMutation::Append(TranscriptEntry::system(
                OFFLINE_NOTICE,
                SystemLevel::Warning
            )))
        );
        assert_eq!(input.history(), ["pwd"]);
    }

    #[test]
    fn test_enter_on_blank_line_does_nothing() {
        let mut input = EditorState::default();
        let (effects, mutations) = handle_main_key(&mut input, &ONLINE, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(mutations.is_empty());
    }

    #[test]
    fn test_clear_command_and_ctrl_l_clear_transcript() {
        let mut input = EditorState::default();
        type_text(&mut input, "cls");
        let (effects, mutations) = handle_main_key(&mut input, &ONLINE, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(mutations, vec![TranscriptMutation::Clear]);

        type_text(&mut input, "half");
        let (_, mutations) = handle_main_key(&mut input, &ONLINE, ctrl('l'));
        assert_eq!(mutations, vec![TranscriptMutation::Clear]);
        assert_eq!(input.text(), "half");
    }

    #[test]
    fn test_ctrl_c_clears_then_quits() {
        let mut input = EditorState::default();
        type_text(&mut input, "crack");

        let (effects, _) = handle_main_key(&mut input, &ONLINE, ctrl('c'));
        assert!(effects.is_empty());
        assert_eq!(input.text(), "");

        let (effects, _) = handle_main_key(&mut input, &ONLINE, ctrl('c'));
        assert_eq!(effects, vec![UiEffect::Quit]);
    }

    #[test]
    fn test_ctrl_d_quits_only_on_empty_line() {
        let mut input = EditorState::default();
        type_text(&mut input, "ab");
        handle_main_key(&mut input, &ONLINE, key(KeyCode::Home));

        let (effects, _) = handle_main_key(&mut input, &ONLINE, ctrl('d'));
        assert!(effects.is_empty());
        assert_eq!(input.text(), "b");

        input.clear();
        let (effects, _) = handle_main_key(&mut input, &ONLINE, ctrl('d'));
        assert_eq!(effects, vec![UiEffect::Quit]);
    }

    #[test]
    fn test_tab_then_type_then_enter() {
        let mut input = EditorState::default();
        type_text(&mut input, "sc");
        handle_main_key(&mut input, &ONLINE, key(KeyCode::Tab));
        type_text(&mut input, "10.0.0.1");

        let (effects, _) = handle_main_key(&mut input, &ONLINE, key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::SendCommand {
                command: "scan 10.0.0.1".to_string()
            }]
        );
    }

    #[test]
    fn test_arrows_walk_history() {
        let mut input = EditorState::default();
        type_text(&mut input, "help");
        handle_main_key(&mut input, &ONLINE, key(KeyCode::Enter));

        handle_main_key(&mut input, &ONLINE, key(KeyCode::Up));
        assert_eq!(input.text(), "help");
        handle_main_key(&mut input, &ONLINE, key(KeyCode::Down));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_shift_arrows_select_and_typing_replaces() {
        let mut input = EditorState::default();
        type_text(&mut input, "cat a");
        let shift_left = KeyEvent::new(KeyCode::Left, CrosstermKeyModifiers::SHIFT);
        handle_main_key(&mut input, &ONLINE, shift_left);
        assert_eq!(input.buffer().selection(), Some((4, 5)));

        type_text(&mut input, "b");
        assert_eq!(input.text(), "cat b");
    }

    #[test]
    fn test_uppercase_letters_arrive_with_shift() {
        let mut input = EditorState::default();
        let upper = KeyEvent::new(KeyCode::Char('L'), CrosstermKeyModifiers::SHIFT);
        handle_main_key(&mut input, &ONLINE, upper);
        assert_eq!(input.text(), "L");
    }

    #[test]
    fn test_page_keys_scroll_transcript() {
        let mut input = EditorState::default();
        let (_, mutations) = handle_main_key(&mut input, &ONLINE, key(KeyCode::PageUp));
        assert_eq!(mutations, vec![TranscriptMutation::PageUp]);

        let ctrl_end = KeyEvent::new(KeyCode::End, CrosstermKeyModifiers::CONTROL);
        let (_, mutations) = handle_main_key(&mut input, &ONLINE, ctrl_end);
        assert_eq!(mutations, vec![TranscriptMutation::ScrollToBottom]);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut input = EditorState::default();
        let release = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: CrosstermKeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_main_key(&mut input, &ONLINE, release);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_word_keys() {
        let mut input = EditorState::default();
        type_text(&mut input, "cd /home/user");
        handle_main_key(&mut input, &ONLINE, ctrl('w'));
        assert_eq!(input.text(), "cd /home/");

        let alt_b = KeyEvent::new(KeyCode::Char('b'), CrosstermKeyModifiers::ALT);
        handle_main_key(&mut input, &ONLINE, alt_b);
        assert_eq!(input.cursor(), 8);
    }

    #[test]
    fn test_esc_dismisses_suggestions() {
        let mut input = EditorState::default();
        type_text(&mut input, "cl");
        handle_main_key(&mut input, &ONLINE, key(KeyCode::Tab));
        assert_eq!(input.suggestions(), ["clear", "cls"]);

        handle_main_key(&mut input, &ONLINE, key(KeyCode::Esc));
        assert!(input.suggestions().is_empty());
        assert_eq!(input.text(), "cl");
    }

    #[test]
    fn test_paste_inserts_single_line() {
        let mut input = EditorState::default();
        handle_paste(&mut input, "scan\n10.0.0.1");
        assert_eq!(input.text(), "scan 10.0.0.1");
    }
}
