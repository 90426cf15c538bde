mod common;

crate::lox_test!(this_in_a_method_refers_to_the_receiver, r#"
    class Foo {
        getName() { return this.name; }
    }
    var foo = Foo();
    foo.name = "baz";
    print foo.getName();
"#, stdout = "baz\n");

crate::lox_test!(a_closure_inside_a_method_captures_this, r#"
    class Foo {
        name() { return "Foo"; }
        getClosure() {
            fun closure() {
                return this.name();
            }
            return closure;
        }
    }
    var closure = Foo().getClosure();
    print closure();
"#, stdout = "Foo\n");

crate::lox_test!(nested_classes_each_bind_this_to_their_own_instance, r#"
    class Outer {
        method() {
            fun inFunction() {
                print this;
            }
            inFunction();

            class Inner {
                method() {
                    print this;
                }
            }
            Inner().method();

            print this;
        }
    }
    Outer().method();
"#, stdout = "Outer instance\nInner instance\nOuter instance\n");

crate::lox_test!(using_this_at_the_top_level_is_a_static_error, "print this;",
    stderr = "[line 1] error at \"this\": can't use 'this' outside of a class\n");

crate::lox_test!(using_this_inside_a_plain_function_is_a_static_error, r#"
    fun notAMethod() {
        print this;
    }
"#, stderr = "[line 3] error at \"this\": can't use 'this' outside of a class\n");
