/// Entry point: parses CLI flags and the command program once, then runs an
/// independent pass of that program over every input file (or stdin),
/// accumulating the worst exit code instead of aborting on the first
/// per-file I/O failure.
mod buffer;
mod cli;
mod command;
mod engine;
mod error;
mod external;
mod interval;
mod io;
mod parser;
mod regex_adapter;

use buffer::Buffer;
use clap::Parser as _;
use cli::Cli;
use command::{CmdKind, Program};
use error::{Result, SrekError};
use interval::IntervalList;
use regex_adapter::RegexFlags;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("srek: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let flags = RegexFlags {
        ignorecase: cli.ignorecase,
        extended: !cli.basic(),
        regnewline: cli.reg_newline,
    };

    let raw_program = match &cli.script_file {
        Some(path) => String::from_utf8(io::read_document(Path::new(path))?)
            .map_err(|_| SrekError::InvalidCommandLine("script file is not valid UTF-8".into()))?,
        None => cli
            .command_line()
            .map(str::to_string)
            .ok_or(SrekError::NoCommandLine)?,
    };

    let mut program = parser::parse(&raw_program, cli.quiet)?;
    parser::validate(&program)?;
    compile_regexes(&mut program, flags)?;
    let lines_regex = regex_adapter::compile("[^\n]*\n", RegexFlags::default())?;

    let mut worst_exit = 0i32;
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());

    if cli.files().is_empty() {
        if let Err(e) = run_one(&program, Path::new("-"), &lines_regex, &mut out) {
            eprintln!("srek: {}", e);
            worst_exit = worst_exit.max(e.exit_code());
        }
    } else {
        for file in cli.files() {
            if let Err(e) = run_one(&program, Path::new(file), &lines_regex, &mut out) {
                eprintln!("srek: {}", e);
                worst_exit = worst_exit.max(e.exit_code());
            }
        }
    }

    out.flush().ok();
    Ok(worst_exit)
}

/// Compiles the pattern of every regex-bearing command once, up front. An
/// empty `//` pattern is left uncompiled (`cmd.regex` stays `None`), which
/// the selection engine treats as "matches nothing" rather than an error.
fn compile_regexes(program: &mut Program, flags: RegexFlags) -> Result<()> {
    for cmd in program.iter_mut() {
        if cmd.kind.takes_regex() {
            if let Some(pattern) = cmd.arg(0) {
                cmd.regex = Some(regex_adapter::compile(pattern, flags)?);
            }
        }
    }
    Ok(())
}

/// Runs the whole program once against a single file's contents.
fn run_one(
    program: &Program,
    path: &Path,
    lines_regex: &regex_adapter::Regex,
    out: &mut impl Write,
) -> Result<()> {
    let bytes = io::read_document(path)?;
    let mut buffer = Buffer::new(bytes);
    let mut sels: IntervalList = buffer.select_all();

    for cmd in program {
        execute(cmd, &mut buffer, &mut sels, lines_regex, out)?;
    }
    Ok(())
}

/// Dispatches a single parsed command to the selection engine, the file
/// I/O module, or the external-command bridge.
fn execute(
    cmd: &command::Command,
    buffer: &mut Buffer,
    sels: &mut IntervalList,
    lines_regex: &regex_adapter::Regex,
    out: &mut impl Write,
) -> Result<()> {
    match cmd.kind {
        CmdKind::Print => engine::print(buffer, sels, out).map_err(|source| SrekError::WriteFailed {
            path: std::path::PathBuf::from("-"),
            source,
        }),
        CmdKind::Delete => {
            engine::delete(buffer, sels);
            Ok(())
        }
        CmdKind::Change => {
            engine::change(buffer, sels, arg_bytes(cmd, 0));
            Ok(())
        }
        CmdKind::Sub => {
            engine::sub(buffer, sels, cmd.regex.as_ref(), cmd.arg(0), arg_bytes(cmd, 1));
            Ok(())
        }
        CmdKind::Guard => {
            engine::guard(buffer, sels, cmd.regex.as_ref(), false);
            Ok(())
        }
        CmdKind::VGuard => {
            engine::guard(buffer, sels, cmd.regex.as_ref(), true);
            Ok(())
        }
        CmdKind::Xtract => {
            engine::xtract(buffer, sels, cmd.regex.as_ref(), false);
            Ok(())
        }
        CmdKind::Ytract => {
            engine::xtract(buffer, sels, cmd.regex.as_ref(), true);
            Ok(())
        }
        CmdKind::Insert => {
            engine::sub(buffer, sels, None, Some("^"), arg_bytes(cmd, 0));
            Ok(())
        }
        CmdKind::Append => {
            engine::sub(buffer, sels, None, Some("$"), arg_bytes(cmd, 0));
            Ok(())
        }
        CmdKind::Surround => {
            engine::sub(buffer, sels, None, Some("^"), arg_bytes(cmd, 0));
            engine::sub(buffer, sels, None, Some("$"), arg_bytes(cmd, 1));
            Ok(())
        }
        CmdKind::Flip => {
            engine::flip(buffer, sels);
            Ok(())
        }
        CmdKind::Undo => {
            engine::undo(buffer, sels);
            Ok(())
        }
        CmdKind::Read => io::read(buffer, sels, require_arg(cmd, 0)?),
        CmdKind::ReadApp => io::read_append(buffer, sels, require_arg(cmd, 0)?),
        CmdKind::Write => io::write(buffer, sels, require_arg(cmd, 0)?, cmd.arg(1), false),
        CmdKind::WriteApp => io::write(buffer, sels, require_arg(cmd, 0)?, cmd.arg(1), true),
        CmdKind::ExtCmd => external::run(require_arg(cmd, 0)?, sels.len()),
        CmdKind::ExtCmdI => external::capture_input(buffer, sels, require_arg(cmd, 0)?),
        CmdKind::ExtCmdO => external::send_output(buffer, sels, require_arg(cmd, 0)?),
        CmdKind::ExtCmdIo => external::filter(buffer, sels, require_arg(cmd, 0)?),
        CmdKind::ExtCmdT => external::test(buffer, sels, require_arg(cmd, 0)?, false),
        CmdKind::ExtCmdTn => external::test(buffer, sels, require_arg(cmd, 0)?, true),
        CmdKind::Lines => {
            engine::lines(buffer, sels, lines_regex);
            Ok(())
        }
    }
}

fn arg_bytes<'a>(cmd: &'a command::Command, i: usize) -> &'a [u8] {
    cmd.arg(i).unwrap_or("").as_bytes()
}

fn require_arg<'a>(cmd: &'a command::Command, i: usize) -> Result<&'a str> {
    cmd.arg(i)
        .ok_or_else(|| SrekError::EmptyArgument(cmd.kind.letter()))
}
