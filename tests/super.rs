mod common;
use common::{assert_fails_with, assert_stdout};

#[test]
fn super_dispatches_a_bound_method_on_the_superclass() {
    assert_stdout(
        r#"
        class Base {
            method(arg) { return "Base.method(" + arg + ")"; }
        }
        class Derived < Base {
            test() {
                var m = super.method;
                return m("arg");
            }
        }
        print Derived().test();
        "#,
        &["Base.method(arg)"],
    );
}

#[test]
fn super_can_call_a_different_method_than_the_overriding_one() {
    assert_stdout(
        r#"
        class Base {
            foo() { print "Base.foo()"; }
        }
        class Derived < Base {
            bar() {
                print "Derived.bar()";
                super.foo();
            }
        }
        Derived().bar();
        "#,
        &["Derived.bar()", "Base.foo()"],
    );
}

#[test]
fn super_reaches_the_method_it_overrides() {
    assert_stdout(
        r#"
        class Base {
            foo() { print "Base.foo()"; }
        }
        class Derived < Base {
            foo() {
                print "Derived.foo()";
                super.foo();
            }
        }
        Derived().foo();
        "#,
        &["Derived.foo()", "Base.foo()"],
    );
}

#[test]
fn super_call_in_init_falls_through_to_the_base_constructor() {
    assert_stdout(
        r#"
        class Base {
            init(a, b) { print "Base.init(" + a + ", " + b + ")"; }
        }
        class Derived < Base {
            init() {
                print "Derived.init()";
                super.init("a", "b");
            }
        }
        Derived();
        "#,
        &["Derived.init()", "Base.init(a, b)"],
    );
}

#[test]
fn calling_a_super_method_with_too_many_arguments_is_a_runtime_error() {
    assert_fails_with(
        r#"
        class Base { foo(a, b) { return a + b; } }
        class Derived < Base {
            bar() { super.foo(1, 2, 3, 4); }
        }
        Derived().bar();
        "#,
        70,
        "Expected 2 arguments but got 4.",
    );
}

#[test]
fn calling_a_super_method_with_too_few_arguments_is_a_runtime_error() {
    assert_fails_with(
        r#"
        class Base { foo(a, b) { return a + b; } }
        class Derived < Base {
            bar() { super.foo(1); }
        }
        Derived().bar();
        "#,
        70,
        "Expected 2 arguments but got 1.",
    );
}

#[test]
fn super_through_a_grandparent_reaches_the_right_class() {
    assert_stdout(
        r#"
        class A {
            foo() { print "A.foo()"; }
        }
        class B < A {}
        class C < B {
            foo() {
                print "C.foo()";
                super.foo();
            }
        }
        C().foo();
        "#,
        &["C.foo()", "A.foo()"],
    );
}

#[test]
fn super_in_a_class_with_no_superclass_is_a_resolve_error() {
    assert_fails_with(
        r#"
        class Foo {
            bar() { super.bar(); }
        }
        "#,
        65,
        "Can't use 'super' in a class with no superclass.",
    );
}

#[test]
fn calling_an_undeclared_superclass_method_is_a_runtime_error() {
    assert_fails_with(
        r#"
        class Base {}
        class Derived < Base {
            bar() { super.doesNotExist(); }
        }
        Derived().bar();
        "#,
        70,
        "Undefined property 'doesNotExist'.",
    );
}

#[test]
fn super_without_a_dot_is_a_parse_error() {
    assert_fails_with(
        r#"
        class Base {}
        class Derived < Base {
            bar() { super; }
        }
        "#,
        65,
        "Expect '.' after 'super'.",
    );
}

#[test]
fn super_without_a_method_name_is_a_parse_error() {
    assert_fails_with(
        r#"
        class Base {}
        class Derived < Base {
            bar() { super.; }
        }
        "#,
        65,
        "Expect superclass method name.",
    );
}

#[test]
fn super_at_top_level_is_a_resolve_error() {
    assert_fails_with("print super.foo;", 65, "Can't use 'super' outside of a class.");
}
