mod common;
use common::assert_stdout;

#[test]
fn printing_a_class_shows_its_name_not_an_instance() {
    assert_stdout("class B {} print B;", &["<class B>"]);
}

#[test]
fn printing_a_top_level_function_shows_its_name() {
    assert_stdout("fun f() {} print f;", &["<fn f>"]);
}
