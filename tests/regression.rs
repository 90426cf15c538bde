mod common;

crate::lox_test!(a_subclass_prints_its_own_name_not_its_superclasss, r#"
    class A {}
    class B < A {}
    print B;
"#, stdout = "B\n");

crate::lox_test!(a_function_value_assigned_to_a_variable_still_prints_its_declared_name, r#"
    fun f() {}
    var g = f;
    print g;
"#, stdout = "<fn f>\n");
