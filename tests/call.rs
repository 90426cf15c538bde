mod common;

crate::lox_test!(bool_is_not_callable, "true();",
    stderr = "[line 1] RuntimeError: can only call functions and classes\n");

crate::lox_test!(nil_is_not_callable, "nil();",
    stderr = "[line 1] RuntimeError: can only call functions and classes\n");

crate::lox_test!(number_is_not_callable, "123();",
    stderr = "[line 1] RuntimeError: can only call functions and classes\n");

crate::lox_test!(string_is_not_callable, "\"str\"();",
    stderr = "[line 1] RuntimeError: can only call functions and classes\n");

crate::lox_test!(instance_is_not_callable, r#"
    class Foo {}
    var foo = Foo();
    foo();
"#, stderr = "[line 4] RuntimeError: can only call functions and classes\n");
