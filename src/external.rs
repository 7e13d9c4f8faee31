/// The external-command bridge: the six `!`, `<`, `>`, `|`, `t`, `T`
/// commands, all realized over `std::process::Command` with `/bin/sh -c`
/// rather than a raw `fork`/`exec`/`pipe` dance. Each child is given
/// `PR_SET_PDEATHSIG` on Linux so an orphaned shell doesn't outlive a
/// killed `srek`.
use crate::buffer::Buffer;
use crate::engine;
use crate::error::{Result, SrekError};
use crate::interval::IntervalList;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;

#[cfg(target_os = "linux")]
fn with_pdeathsig(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    unsafe {
        cmd.pre_exec(|| {
            nix::sys::prctl::set_pdeathsig(Some(nix::sys::signal::Signal::SIGTERM))
                .map_err(std::io::Error::from)
        });
    }
}

#[cfg(not(target_os = "linux"))]
fn with_pdeathsig(_cmd: &mut Command) {}

fn shell(command: &str) -> Command {
    let mut cmd = Command::new("/bin/sh");
    cmd.arg("-c").arg(command);
    with_pdeathsig(&mut cmd);
    cmd
}

/// `!cmdline`: run the shell command once per selection, with its own
/// stdin/stdout/stderr inherited from `srek`'s. The buffer is never touched.
pub fn run(command: &str, sel_count: usize) -> Result<()> {
    for _ in 0..sel_count {
        shell(command)
            .status()
            .map_err(|e| SrekError::SpawnFailed {
                command: command.to_string(),
                source: e,
            })?;
    }
    Ok(())
}

/// `<cmdline`: run the shell command once, capture its stdout, and use it
/// to replace every selection (the same whole-buffer reset as `c`).
pub fn capture_input(buffer: &mut Buffer, sels: &mut IntervalList, command: &str) -> Result<()> {
    let output = shell(command)
        .output()
        .map_err(|e| SrekError::SpawnFailed {
            command: command.to_string(),
            source: e,
        })?;
    engine::change(buffer, sels, &output.stdout);
    Ok(())
}

/// `>cmdline`: for each selection, pipe its bytes to a fresh shell command's
/// stdin; the command's own stdout/stderr are inherited, so its output goes
/// straight to the terminal. The buffer is never touched.
pub fn send_output(buffer: &Buffer, sels: &IntervalList, command: &str) -> Result<()> {
    let bytes = buffer.as_bytes();
    for sel in sels {
        let mut child = shell(command)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| SrekError::SpawnFailed {
                command: command.to_string(),
                source: e,
            })?;
        let mut stdin = child.stdin.take().expect("stdin piped above");
        let chunk = sel.as_slice(bytes).to_vec();
        let writer = thread::spawn(move || stdin.write_all(&chunk));
        writer
            .join()
            .expect("writer thread panicked")
            .map_err(SrekError::ChildWriteFailed)?;
        child.wait().map_err(|e| SrekError::SpawnFailed {
            command: command.to_string(),
            source: e,
        })?;
    }
    Ok(())
}

/// `|cmdline`: for each selection, pipe its bytes in and replace the
/// selection with whatever the command writes to stdout. A writer thread
/// feeds stdin while the main thread drains stdout, so a command that
/// doesn't read all its input before writing output can't deadlock the pipe.
pub fn filter(buffer: &mut Buffer, sels: &mut IntervalList, command: &str) -> Result<()> {
    let bytes = buffer.as_bytes().to_vec();
    let mut outputs: Vec<Vec<u8>> = Vec::with_capacity(sels.len());

    for sel in sels.iter() {
        let mut child = shell(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| SrekError::SpawnFailed {
                command: command.to_string(),
                source: e,
            })?;
        let mut stdin = child.stdin.take().expect("stdin piped above");
        let mut stdout = child.stdout.take().expect("stdout piped above");
        let chunk = sel.as_slice(&bytes).to_vec();

        let writer = thread::spawn(move || {
            let r = stdin.write_all(&chunk);
            drop(stdin);
            r
        });
        let mut out = Vec::new();
        stdout
            .read_to_end(&mut out)
            .map_err(SrekError::ChildReadFailed)?;
        writer
            .join()
            .expect("writer thread panicked")
            .map_err(SrekError::ChildWriteFailed)?;
        child.wait().map_err(|e| SrekError::SpawnFailed {
            command: command.to_string(),
            source: e,
        })?;
        outputs.push(out);
    }

    let mut outputs = outputs.into_iter();
    engine::change_each(buffer, sels, |_, _| outputs.next().unwrap_or_default());
    Ok(())
}

/// `t`/`T`: pipe each selection to the shell command and keep it only if
/// the command exits 0 (`t`) or nonzero (`T`).
pub fn test(buffer: &Buffer, sels: &mut IntervalList, command: &str, negated: bool) -> Result<()> {
    let bytes = buffer.as_bytes();
    let mut kept = IntervalList::with_capacity(sels.len());

    for sel in sels.iter() {
        let mut child = shell(command)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| SrekError::SpawnFailed {
                command: command.to_string(),
                source: e,
            })?;
        let mut stdin = child.stdin.take().expect("stdin piped above");
        let chunk = sel.as_slice(bytes).to_vec();
        let writer = thread::spawn(move || stdin.write_all(&chunk));
        writer
            .join()
            .expect("writer thread panicked")
            .map_err(SrekError::ChildWriteFailed)?;
        let status = child.wait().map_err(|e| SrekError::SpawnFailed {
            command: command.to_string(),
            source: e,
        })?;
        if status.success() != negated {
            kept.push(*sel);
        }
    }

    *sels = kept;
    Ok(())
}
