mod common;
use common::{assert_fails_with, assert_stdout};

#[test]
fn fields_can_be_set_and_read_back() {
    assert_stdout(
        r#"
        class Foo {}
        var foo = Foo();
        foo.bar = "bar value";
        foo.baz = "baz value";
        print foo.bar;
        print foo.baz;
        "#,
        &["bar value", "baz value"],
    );
}

#[test]
fn a_field_can_hold_a_function_and_be_called() {
    assert_stdout(
        r#"
        class Foo {}
        fun bar(a, b) {
            print "bar";
            print a;
            print b;
        }
        var foo = Foo();
        foo.bar = bar;
        foo.bar(1, 2);
        "#,
        &["bar", "1", "2"],
    );
}

#[test]
fn a_method_call_still_binds_this_after_a_field_shares_its_name_elsewhere() {
    assert_stdout(
        r#"
        class Foo {
            bar(arg) {
                print "got method";
                print arg;
            }
        }
        Foo().bar("arg");
        "#,
        &["got method", "arg"],
    );
}

#[test]
fn getting_a_property_off_a_non_instance_is_a_runtime_error() {
    assert_fails_with("true.foo;", 70, "Only instances have properties.");
}

#[test]
fn getting_an_undeclared_static_off_a_class_is_a_runtime_error() {
    assert_fails_with("class Foo {} Foo.bar;", 70, "Undefined property 'bar'.");
}

#[test]
fn setting_a_field_on_a_non_instance_is_a_runtime_error() {
    assert_fails_with("true.foo = 1;", 70, "Only instances have fields.");
}

#[test]
fn reading_an_undefined_property_is_a_runtime_error() {
    assert_fails_with(
        r#"
        class Foo {}
        var foo = Foo();
        print foo.bar;
        "#,
        70,
        "Undefined property 'bar'.",
    );
}
