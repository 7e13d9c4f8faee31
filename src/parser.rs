/// The command-line lexer and parser: turns the raw program string into a
/// `Program`. Mirrors the two-pass structure of the original tool: a
/// whole-string escape rewrite, then a single-pass state-machine lexer that
/// extracts commands and their `/`-delimited arguments.
use crate::command::{CmdKind, Command, Program};
use crate::error::{Result, SrekError};

/// Rewrites `\n` and `\t` escapes to literal LF/HT anywhere in the raw
/// program string, before the lexer ever sees it. This happens unconditionally,
/// even inside what will turn out to be a comment or an argument body.
fn rewrite_escapes(src: &str) -> Vec<char> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() {
            match chars[i + 1] {
                'n' => {
                    out.push('\n');
                    i += 2;
                    continue;
                }
                't' => {
                    out.push('\t');
                    i += 2;
                    continue;
                }
                _ => {}
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Collapses one level of backslash-escaping in an already-extracted
/// argument body: `\c` becomes `c` for any `c`, so `\/` becomes `/` and
/// `\\` becomes `\`.
fn remove_backslashes(s: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;
    for &c in s {
        if c == '\\' && !escaped {
            escaped = true;
            continue;
        }
        out.push(c);
        escaped = false;
    }
    out
}

enum LexState {
    Idle,
    InComment,
    InArgList,
}

/// Parses `cmdline` into a `Program`. `quiet` mirrors `-n`: when unset, an
/// implicit trailing `p` is appended unless the program already ends in one.
pub fn parse(cmdline: &str, quiet: bool) -> Result<Program> {
    let chars = rewrite_escapes(cmdline);
    let mut program: Program = Vec::new();

    let mut state = LexState::Idle;
    let mut escaped = false;
    let mut argind: usize = 0;
    let mut arg_begin: usize = 0;
    let mut current: Option<usize> = None; // index into `program` of the command collecting args

    for pos in 0..chars.len() {
        let c = chars[pos];
        match state {
            LexState::InComment => {
                if c == '\n' {
                    state = LexState::Idle;
                }
            }
            LexState::InArgList => {
                if c == '/' && !escaped {
                    let body = &chars[arg_begin..pos];
                    let cmd = current
                        .and_then(|i| program.get_mut(i))
                        .expect("InArgList implies an open command");
                    cmd.args[argind] = if body.is_empty() {
                        None
                    } else {
                        Some(remove_backslashes(body))
                    };
                    arg_begin = pos + 1;
                    argind += 1;
                    if argind == cmd.kind.argcnt() {
                        current = None;
                        state = LexState::Idle;
                    }
                }
            }
            _ => {
                if c == '/' && !escaped {
                    match current {
                        Some(i) if argind < program[i].kind.argcnt() => {
                            state = LexState::InArgList;
                            arg_begin = pos + 1;
                        }
                        _ => {
                            return Err(SrekError::InvalidCommandLine(format!(
                                "unexpected '/' at byte {}",
                                pos
                            )));
                        }
                    }
                } else if c.is_whitespace() {
                    // command separator, no-op
                } else if c == '#' {
                    state = LexState::InComment;
                } else if let Some(kind) = CmdKind::from_letter(c) {
                    let argcnt = kind.argcnt();
                    program.push(Command::new(kind, vec![None; argcnt]));
                    argind = 0;
                    current = if argcnt > 0 {
                        Some(program.len() - 1)
                    } else {
                        None
                    };
                } else {
                    return Err(SrekError::InvalidCommandLine(format!(
                        "unexpected '{}' at byte {}",
                        c, pos
                    )));
                }
            }
        }
        escaped = c == '\\';
    }

    if current.is_some() {
        return Err(SrekError::InvalidCommandLine(
            "last command is unterminated".to_string(),
        ));
    }

    if !quiet && program.last().map(|c| c.kind) != Some(CmdKind::Print) {
        program.push(Command::new(CmdKind::Print, Vec::new()));
    }

    Ok(program)
}

/// Commands whose first argument names something that cannot be empty: a
/// filename or a shell command line.
fn requires_nonempty_first_arg(kind: CmdKind) -> bool {
    matches!(
        kind,
        CmdKind::Read
            | CmdKind::ReadApp
            | CmdKind::Write
            | CmdKind::WriteApp
            | CmdKind::ExtCmd
            | CmdKind::ExtCmdI
            | CmdKind::ExtCmdO
            | CmdKind::ExtCmdIo
            | CmdKind::ExtCmdT
            | CmdKind::ExtCmdTn
    )
}

/// Rejects a parsed program that asks one of those commands to run with an
/// empty (`//`) first argument. Checked once up front rather than lazily
/// per file, since the program itself never changes across files.
pub fn validate(program: &Program) -> Result<()> {
    for cmd in program {
        if requires_nonempty_first_arg(cmd.kind) && cmd.arg(0).is_none() {
            return Err(SrekError::EmptyArgument(cmd.kind.letter()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_print_appended() {
        let prog = parse("d", false).unwrap();
        assert_eq!(prog.len(), 2);
        assert_eq!(prog[1].kind, CmdKind::Print);
    }

    #[test]
    fn quiet_suppresses_implicit_print() {
        let prog = parse("d", true).unwrap();
        assert_eq!(prog.len(), 1);
    }

    #[test]
    fn no_duplicate_print_when_already_trailing() {
        let prog = parse("dp", false).unwrap();
        assert_eq!(prog.len(), 2);
    }

    #[test]
    fn args_split_on_delimiter() {
        let prog = parse("s/foo/bar/", true).unwrap();
        assert_eq!(prog.len(), 1);
        assert_eq!(prog[0].arg(0), Some("foo"));
        assert_eq!(prog[0].arg(1), Some("bar"));
    }

    #[test]
    fn escaped_delimiter_is_literal() {
        let prog = parse(r"s/a\/b/c/", true).unwrap();
        assert_eq!(prog[0].arg(0), Some("a/b"));
    }

    #[test]
    fn newline_and_tab_escapes_rewritten() {
        let prog = parse(r"s/a/b\nc\td/", true).unwrap();
        assert_eq!(prog[0].arg(1), Some("b\nc\td"));
    }

    #[test]
    fn comment_is_ignored() {
        let prog = parse("d # trailing comment\np", true).unwrap();
        assert_eq!(prog.len(), 2);
        assert_eq!(prog[0].kind, CmdKind::Delete);
        assert_eq!(prog[1].kind, CmdKind::Print);
    }

    #[test]
    fn unterminated_command_errors() {
        assert!(parse("s/foo/bar", true).is_err());
    }

    #[test]
    fn unexpected_slash_errors() {
        assert!(parse("/foo/", true).is_err());
    }

    #[test]
    fn empty_arg_validation() {
        let prog = parse("w///", true).unwrap();
        assert!(validate(&prog).is_err());
    }
}
