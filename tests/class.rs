mod common;
use common::assert_stdout;

#[test]
fn printing_an_empty_class_shows_its_name() {
    assert_stdout("class Foo {} print Foo;", &["<class Foo>"]);
}

#[test]
fn a_subclass_inherits_a_method_through_several_levels() {
    assert_stdout(
        r#"
        class A { foo() { print "in foo"; } }
        class B < A { bar() { print "in bar"; } }
        class C < B { baz() { print "in baz"; } }
        var c = C();
        c.foo();
        c.bar();
        c.baz();
        "#,
        &["in foo", "in bar", "in baz"],
    );
}

#[test]
fn a_method_can_reference_the_class_it_belongs_to_by_name() {
    assert_stdout(
        r#"
        class Foo {
            identify() { return Foo; }
        }
        print Foo().identify();
        "#,
        &["<class Foo>"],
    );
}

#[test]
fn a_static_field_is_shared_across_every_instance() {
    assert_stdout(
        r#"
        class Counter {
            static var count = 0;
            init() {
                Counter.count = Counter.count + 1;
            }
        }
        Counter();
        Counter();
        Counter();
        print Counter.count;
        "#,
        &["3"],
    );
}

#[test]
fn a_method_on_a_plain_class_can_read_a_variable_from_an_enclosing_scope() {
    assert_stdout(
        r#"
        var x = 1;
        class A { m() { print x; } }
        A().m();
        "#,
        &["1"],
    );
}

#[test]
fn a_static_method_can_be_called_directly_on_the_class() {
    assert_stdout(
        r#"
        class Math {
            static fun square(n) { return n * n; }
        }
        print Math.square(4);
        "#,
        &["16"],
    );
}
