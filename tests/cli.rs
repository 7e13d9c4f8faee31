use assert_cmd::Command;
use predicates::prelude::*;

fn srek() -> Command {
    Command::cargo_bin("srek").unwrap()
}

#[test]
fn extract_then_change() {
    srek()
        .arg("x/foo/ c/FOO/")
        .write_stdin("foo bar foo\n")
        .assert()
        .success()
        .stdout("FOO bar FOO\n");
}

#[test]
fn lines_then_vguard() {
    srek()
        .arg("L v/b/")
        .write_stdin("a\nb\nc\n")
        .assert()
        .success()
        .stdout("a\nc\n");
}

#[test]
fn quiet_lines_guard_print() {
    srek()
        .args(["-n", "L g/2/ p"])
        .write_stdin("line1\nline2\nline3\n")
        .assert()
        .success()
        .stdout("line2\n");
}

#[test]
fn insert_and_append() {
    srek()
        .arg("i/<<</ a/>>>/")
        .write_stdin("abc")
        .assert()
        .success()
        .stdout("<<<abc>>>");
}

#[test]
fn flip_then_change_on_empty_selection_is_a_no_op() {
    // Open question resolved in DESIGN.md: `c` on an empty selection list
    // still resets selections to the whole buffer, leaving it unmodified.
    srek()
        .arg("~ c/X/")
        .write_stdin("hello")
        .assert()
        .success()
        .stdout("hello");
}

#[test]
fn external_filter_uppercases_words() {
    // The parser collapses one level of backslash per argument body, so a
    // pattern that needs a literal backslash in the compiled regex (`\w`)
    // has to be written doubled (`\\w`) in the command-line string.
    srek()
        .arg(r"x/\\w+/ |/tr a-z A-Z/")
        .write_stdin("a b c")
        .assert()
        .success()
        .stdout("A B C");
}

#[test]
fn empty_program_still_prints_whole_input() {
    srek()
        .arg("")
        .write_stdin("unchanged\n")
        .assert()
        .success()
        .stdout("unchanged\n");
}

#[test]
fn missing_command_line_exits_with_code_one() {
    srek().assert().failure().code(1);
}

#[test]
fn invalid_command_line_exits_with_code_two() {
    srek()
        .arg("/unexpected/")
        .write_stdin("x")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_regex_exits_with_code_five() {
    srek()
        .arg("s/[/x/")
        .write_stdin("x")
        .assert()
        .failure()
        .code(5);
}

#[test]
fn empty_filename_exits_with_code_eight() {
    srek()
        .arg("w///")
        .write_stdin("x")
        .assert()
        .failure()
        .code(8);
}

#[test]
fn write_command_creates_file_with_separator() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    // '/' is the argument delimiter, so embedded path separators must be
    // escaped when building the command-line string.
    let escaped_path = path.display().to_string().replace('/', "\\/");

    srek()
        .arg(format!("x/\\w+/ w/{escaped_path}/,/"))
        .write_stdin("a b c")
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "a,b,c");
}

#[test]
fn guard_and_vguard_are_complementary() {
    srek()
        .args(["-n", "L g/b/ p"])
        .write_stdin("a\nb\nc\n")
        .assert()
        .success()
        .stdout("b\n");

    srek()
        .args(["-n", "L v/b/ p"])
        .write_stdin("a\nb\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("a\n").and(predicate::str::contains("c\n")));
}

#[test]
fn reads_from_named_file_when_given() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, "hi\n").unwrap();

    srek()
        .arg("p")
        .arg(&path)
        .assert()
        .success()
        .stdout("hi\n");
}
