use assert_cmd::Command;
use proptest::prelude::*;

fn srek() -> Command {
    Command::cargo_bin("srek").unwrap()
}

fn run(program: &str, stdin: &str) -> String {
    let output = srek()
        .arg(program)
        .write_stdin(stdin.to_string())
        .output()
        .unwrap();
    assert!(output.status.success(), "srek exited with {:?}", output.status);
    String::from_utf8(output.stdout).unwrap()
}

// Printable-ASCII-without-NUL text keeps the command line and stdin
// round-trip free of encoding surprises that are orthogonal to these
// invariants.
fn doc() -> impl Strategy<Value = String> {
    "[ -~\n]{0,64}"
}

proptest! {
    // `p` alone never changes what gets printed back out.
    #[test]
    fn print_is_identity(s in doc()) {
        prop_assert_eq!(run("-n p", &s), s);
    }

    // Flipping the selection list twice is a no-op.
    #[test]
    fn double_flip_is_noop(s in doc()) {
        prop_assert_eq!(run("-n ~ ~ p", &s), run("-n p", &s));
    }

    // `u` always resets to the whole buffer, regardless of prior state.
    #[test]
    fn undo_resets_to_whole_buffer(s in doc()) {
        prop_assert_eq!(run("-n L u p", &s), run("-n p", &s));
    }

    // `i`/`a`/`S` are shorthand for anchored substitutions.
    #[test]
    fn insert_matches_anchored_sub(s in doc(), pre in "[a-zA-Z]{0,6}") {
        prop_assert_eq!(
            run(&format!("-n i/{pre}/ p"), &s),
            run(&format!("-n s/^/{pre}/ p"), &s)
        );
    }

    #[test]
    fn append_matches_anchored_sub(s in doc(), suf in "[a-zA-Z]{0,6}") {
        prop_assert_eq!(
            run(&format!("-n a/{suf}/ p"), &s),
            run(&format!("-n s/$/{suf}/ p"), &s)
        );
    }

    // `L` selections concatenate to the longest prefix of complete lines.
    #[test]
    fn lines_extract_complete_line_prefix(s in doc()) {
        let expected = match s.rfind('\n') {
            Some(idx) => s[..=idx].to_string(),
            None => String::new(),
        };
        prop_assert_eq!(run("-n L p", &s), expected);
    }

    // Net buffer length change equals count_of_matches * len(rep) minus
    // sum_of_match_lengths, exercised concretely by substituting every 'a'
    // with a fixed two-byte string.
    #[test]
    fn substitution_length_matches_formula(s in "[ac]{0,64}") {
        let count = s.matches('a').count();
        let out = run("-n s/a/bb/ p", &s);
        prop_assert_eq!(out.len(), s.len() + count);
    }
}
