mod common;

crate::lox_test!(method_with_several_parameters, r#"
    class Math {
        add(a, b, c) { return a + b + c; }
    }
    print Math().add(1, 2, 3);
"#, stdout = "6\n");

crate::lox_test!(method_with_an_empty_body_returns_nil, r#"
    class Foo {
        bar() {}
    }
    print Foo().bar();
"#, stdout = "nil\n");

crate::lox_test!(calling_a_method_with_too_many_arguments_is_a_runtime_error, r#"
    class Foo {
        need(a, b) { return a + b; }
    }
    Foo().need(1, 2, 3, 4);
"#, stderr = "[line 5] RuntimeError: expected 2 arguments but got 4\n");

crate::lox_test!(calling_a_method_with_too_few_arguments_is_a_runtime_error, r#"
    class Foo {
        need(a, b) { return a + b; }
    }
    Foo().need(1);
"#, stderr = "[line 5] RuntimeError: expected 2 arguments but got 1\n");

crate::lox_test!(calling_a_method_that_does_not_exist_is_a_runtime_error, r#"
    class Foo {}
    Foo().unknown();
"#, stderr = "[line 3] RuntimeError: undefined property 'unknown'\n");

crate::lox_test!(printing_a_bound_method, r#"
    class Foo {
        method() {}
    }
    print Foo().method;
"#, stdout = "<fn method>\n");

crate::lox_test!(referring_to_a_method_name_as_a_bare_variable_is_a_runtime_error, r#"
    class Foo {
        method() {}
    }
    print method;
"#, stderr = "[line 5] RuntimeError: undefined variable 'method'\n");

#[test]
fn more_than_255_parameters_is_a_static_error() {
    let params = (0..256).map(|i| format!("p{i}")).collect::<Vec<_>>().join(", ");
    let source = format!("class Foo {{ method({params}) {{}} }}");
    let (outcome, _, stderr) = common::run(&source);
    assert!(outcome.had_static_error || outcome.had_syntax_error, "expected a static error, got: {stderr}");
    assert!(stderr.contains("can't have more than 255 parameters"), "stderr was: {stderr}");
}

#[test]
fn more_than_255_arguments_is_a_static_error() {
    let args = (0..256).map(|i| i.to_string()).collect::<Vec<_>>().join(", ");
    let source = format!("class Foo {{ method() {{}} }} Foo().method({args});");
    let (outcome, _, stderr) = common::run(&source);
    assert!(outcome.had_static_error || outcome.had_syntax_error, "expected a static error, got: {stderr}");
    assert!(stderr.contains("can't have more than 255 arguments"), "stderr was: {stderr}");
}
