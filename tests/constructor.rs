mod common;

crate::lox_test!(arguments_are_passed_to_init, r#"
    class Foo {
        init(a, b) {
            print "init";
            this.a = a;
            this.b = b;
        }
    }
    var foo = Foo(1, 2);
    print foo.a;
    print foo.b;
"#, stdout = "init\n1\n2\n");

crate::lox_test!(calling_init_explicitly_runs_it_again_and_returns_this, r#"
    class Foo {
        init() {
            print "init";
        }
    }
    var foo = Foo();
    print foo.init();
"#, stdout = "init\ninit\nFoo instance\n");

crate::lox_test!(default_constructor_returns_an_instance, r#"
    class Foo {}
    print Foo();
"#, stdout = "Foo instance\n");

crate::lox_test!(default_constructor_takes_no_arguments, "class Foo {} Foo(1, 2, 3);",
    stderr = "[line 1] RuntimeError: expected 0 arguments but got 3\n");

crate::lox_test!(init_can_return_early_with_a_bare_return, r#"
    class Foo {
        init() {
            print "init";
            return;
            print "unreachable";
        }
    }
    print Foo();
"#, stdout = "init\nFoo instance\n");

crate::lox_test!(calling_a_two_argument_init_with_too_many_arguments_is_a_runtime_error, r#"
    class Foo {
        init(a, b) {}
    }
    Foo(1, 2, 3, 4);
"#, stderr = "[line 4] RuntimeError: expected 2 arguments but got 4\n");

crate::lox_test!(init_defined_on_a_non_class_is_just_a_regular_method, r#"
    class Foo {
        notInit() {
            print "not initializer";
        }
    }
    Foo().notInit();
"#, stdout = "not initializer\n");

crate::lox_test!(calling_init_with_too_few_arguments_is_a_runtime_error, r#"
    class Foo {
        init(a, b) {}
    }
    Foo(1);
"#, stderr = "[line 4] RuntimeError: expected 2 arguments but got 1\n");

crate::lox_test!(a_bare_return_inside_a_non_initializer_method_does_not_return_this, r#"
    class Foo {
        bar() {
            fun helper() {
                return "bar";
            }
            print helper();
            return;
        }
    }
    Foo().bar();
"#, stdout = "bar\n");

crate::lox_test!(returning_a_value_from_an_initializer_is_a_static_error, r#"
    class Foo {
        init() {
            return "nope";
        }
    }
"#, stderr = "[line 4] error at \"return\": can't return a value from an initializer\n");
