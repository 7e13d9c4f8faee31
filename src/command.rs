/// The command model: a tagged-variant kind, its argument count, and the
/// letter the parser recognizes for it.
use crate::regex_adapter::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdKind {
    Print,
    Delete,
    Change,
    Sub,
    Guard,
    VGuard,
    Xtract,
    Ytract,
    Insert,
    Append,
    Surround,
    Flip,
    Undo,
    Read,
    ReadApp,
    Write,
    WriteApp,
    ExtCmd,
    ExtCmdI,
    ExtCmdO,
    ExtCmdIo,
    ExtCmdT,
    ExtCmdTn,
    Lines,
}

impl CmdKind {
    /// The command letter recognized by the parser.
    pub fn letter(self) -> char {
        match self {
            CmdKind::Print => 'p',
            CmdKind::Delete => 'd',
            CmdKind::Change => 'c',
            CmdKind::Sub => 's',
            CmdKind::Guard => 'g',
            CmdKind::VGuard => 'v',
            CmdKind::Xtract => 'x',
            CmdKind::Ytract => 'y',
            CmdKind::Insert => 'i',
            CmdKind::Append => 'a',
            CmdKind::Surround => 'S',
            CmdKind::Flip => '~',
            CmdKind::Undo => 'u',
            CmdKind::Read => 'r',
            CmdKind::ReadApp => 'R',
            CmdKind::Write => 'w',
            CmdKind::WriteApp => 'W',
            CmdKind::ExtCmd => '!',
            CmdKind::ExtCmdI => '<',
            CmdKind::ExtCmdO => '>',
            CmdKind::ExtCmdIo => '|',
            CmdKind::ExtCmdT => 't',
            CmdKind::ExtCmdTn => 'T',
            CmdKind::Lines => 'L',
        }
    }

    /// Number of `/`-delimited arguments this command's letter takes.
    pub fn argcnt(self) -> usize {
        match self {
            CmdKind::Print
            | CmdKind::Delete
            | CmdKind::Flip
            | CmdKind::Undo
            | CmdKind::Lines => 0,
            CmdKind::Change
            | CmdKind::Guard
            | CmdKind::VGuard
            | CmdKind::Xtract
            | CmdKind::Ytract
            | CmdKind::Insert
            | CmdKind::Append
            | CmdKind::Read
            | CmdKind::ReadApp
            | CmdKind::ExtCmd
            | CmdKind::ExtCmdI
            | CmdKind::ExtCmdO
            | CmdKind::ExtCmdIo
            | CmdKind::ExtCmdT
            | CmdKind::ExtCmdTn => 1,
            CmdKind::Sub | CmdKind::Surround | CmdKind::Write | CmdKind::WriteApp => 2,
        }
    }

    /// Maps a command letter back to its kind, or `None` if unrecognized.
    pub fn from_letter(ch: char) -> Option<Self> {
        ALL.iter().copied().find(|k| k.letter() == ch)
    }

    /// Whether a compiled regex is meaningful for this command's first
    /// argument (pattern-bearing commands).
    pub fn takes_regex(self) -> bool {
        matches!(
            self,
            CmdKind::Sub
                | CmdKind::Guard
                | CmdKind::VGuard
                | CmdKind::Xtract
                | CmdKind::Ytract
        )
    }
}

pub const ALL: &[CmdKind] = &[
    CmdKind::Print,
    CmdKind::Delete,
    CmdKind::Change,
    CmdKind::Sub,
    CmdKind::Guard,
    CmdKind::VGuard,
    CmdKind::Xtract,
    CmdKind::Ytract,
    CmdKind::Insert,
    CmdKind::Append,
    CmdKind::Surround,
    CmdKind::Flip,
    CmdKind::Undo,
    CmdKind::Read,
    CmdKind::ReadApp,
    CmdKind::Write,
    CmdKind::WriteApp,
    CmdKind::ExtCmd,
    CmdKind::ExtCmdI,
    CmdKind::ExtCmdO,
    CmdKind::ExtCmdIo,
    CmdKind::ExtCmdT,
    CmdKind::ExtCmdTn,
    CmdKind::Lines,
];

/// A single parsed command: its kind, zero to two arguments (`None` for an
/// empty `//` body), and the compiled regex for pattern-bearing kinds.
#[derive(Debug)]
pub struct Command {
    pub kind: CmdKind,
    pub args: Vec<Option<String>>,
    pub regex: Option<Regex>,
}

impl Command {
    pub fn new(kind: CmdKind, args: Vec<Option<String>>) -> Self {
        Command {
            kind,
            args,
            regex: None,
        }
    }

    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).and_then(|a| a.as_deref())
    }
}

/// An ordered sequence of commands, parsed once and shared across every
/// file processed in a run.
pub type Program = Vec<Command>;
