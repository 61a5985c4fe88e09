mod common;
use common::assert_stdout;

#[test]
fn line_comment_at_end_of_file_is_ignored() {
    assert_stdout("print \"ok\"; // trailing comment with no newline", &["ok"]);
}

#[test]
fn block_comment_can_span_multiple_lines() {
    assert_stdout(
        "/* this\n   spans\n   lines */\nprint \"ok\";",
        &["ok"],
    );
}

#[test]
fn nested_block_comments_are_balanced() {
    assert_stdout("/* outer /* inner */ still outer */ print \"ok\";", &["ok"]);
}

#[test]
fn unicode_inside_a_comment_does_not_break_scanning() {
    assert_stdout("// \u{2603} snowman\nprint \"ok\";", &["ok"]);
}
