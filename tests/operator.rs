mod common;

crate::lox_test!(add_numbers, "print 123 + 456;", stdout = "579\n");

crate::lox_test!(add_strings, r#"print "str" + "ing";"#, stdout = "string\n");

crate::lox_test!(adding_a_number_and_a_string_is_a_runtime_error, r#"print 1 + "a";"#,
    stderr = "[line 1] RuntimeError: operands must be two numbers or two strings\n");

crate::lox_test!(adding_a_bool_and_nil_is_a_runtime_error, "print true + nil;",
    stderr = "[line 1] RuntimeError: operands must be two numbers or two strings\n");

crate::lox_test!(subtract, "print 4 - 3;", stdout = "1\n");

crate::lox_test!(subtracting_a_string_is_a_runtime_error, r#"print 1 - "a";"#,
    stderr = "[line 1] RuntimeError: operands must be numbers\n");

crate::lox_test!(multiply, "print 5 * 3;", stdout = "15\n");

crate::lox_test!(multiplying_booleans_is_a_runtime_error, "print true * false;",
    stderr = "[line 1] RuntimeError: operands must be numbers\n");

crate::lox_test!(divide, "print 8 / 2;", stdout = "4\n");

crate::lox_test!(dividing_nil_is_a_runtime_error, "print nil / 1;",
    stderr = "[line 1] RuntimeError: operands must be numbers\n");

crate::lox_test!(comparison_operators, r#"
    print 1 < 2;
    print 2 < 2;
    print 2 <= 2;
    print 3 > 2;
    print 2 > 2;
    print 2 >= 2;
"#, stdout = "true\nfalse\ntrue\ntrue\nfalse\ntrue\n");

crate::lox_test!(comparing_a_string_to_a_number_is_a_runtime_error, r#"print 1 < "1";"#,
    stderr = "[line 1] RuntimeError: operands must be numbers\n");

crate::lox_test!(negate, "print -3; print -(-3);", stdout = "-3\n3\n");

crate::lox_test!(negating_a_string_is_a_runtime_error, r#"print -"str";"#,
    stderr = "[line 1] RuntimeError: operand must be a number\n");

crate::lox_test!(negating_nil_is_a_runtime_error, "print -nil;",
    stderr = "[line 1] RuntimeError: operand must be a number\n");

crate::lox_test!(not_is_defined_for_every_type_and_never_errors, r#"
    print !true;
    print !false;
    print !nil;
    print !0;
    print !"";
"#, stdout = "false\ntrue\ntrue\nfalse\nfalse\n");

crate::lox_test!(equals_across_types_is_always_false_never_an_error, r#"
    print 1 == "1";
    print nil == false;
    print 0 == false;
"#, stdout = "false\nfalse\nfalse\n");

crate::lox_test!(equals_same_type, r#"
    print 1 == 1;
    print 1 == 2;
    print "a" == "a";
    print "a" == "b";
    print nil == nil;
"#, stdout = "true\nfalse\ntrue\nfalse\ntrue\n");

crate::lox_test!(not_equals_is_the_negation_of_equals, r#"
    print 1 != 1;
    print 1 != 2;
"#, stdout = "false\ntrue\n");

crate::lox_test!(classes_and_instances_compare_by_identity, r#"
    class Foo {}
    var a = Foo();
    var b = Foo();
    print a == a;
    print a == b;
    print Foo == Foo;
"#, stdout = "true\nfalse\ntrue\n");

crate::lox_test!(functions_compare_by_identity, r#"
    fun f() {}
    fun g() {}
    print f == f;
    print f == g;
"#, stdout = "true\nfalse\n");
