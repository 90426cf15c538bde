mod common;

crate::lox_test!(closures_capture_the_variable_not_the_value, r#"
    var f;
    var g;
    {
        var local = "local";
        fun f_() {
            print local;
            local = "after f";
            print local;
        }
        f = f_;

        fun g_() {
            print local;
            local = "after g";
            print local;
        }
        g = g_;
    }
    f();
    g();
"#, stdout = "local\nafter f\nafter f\nafter g\n");

crate::lox_test!(closures_see_later_assignments_to_a_shadowing_local, r#"
    var a = "global";
    {
        fun show() { print a; }
        show();
        var a = "local";
        show();
    }
"#, stdout = "global\nglobal\n");

crate::lox_test!(closures_capture_function_parameters, r#"
    var f;
    fun foo(param) {
        fun captured() {
            print param;
        }
        f = captured;
    }
    foo("param");
    f();
"#, stdout = "param\n");

crate::lox_test!(nested_closures_each_capture_their_own_scope, r#"
    fun f() {
        var a = "a";
        fun g() {
            var b = "b";
            fun h() {
                var c = "c";
                fun i() {
                    print a;
                    print b;
                    print c;
                }
                i();
            }
            h();
        }
        g();
    }
    f();
"#, stdout = "a\nb\nc\n");

crate::lox_test!(two_closures_sharing_the_same_captured_variable_both_see_mutations, r#"
    var get;
    var set;
    fun make() {
        var a = "a";
        fun getter() { print a; }
        fun setter(value) { a = value; }
        get = getter;
        set = setter;
    }
    make();
    get();
    set("b");
    get();
"#, stdout = "a\nb\n");
