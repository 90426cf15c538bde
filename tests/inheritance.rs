mod common;

crate::lox_test!(a_subclass_constructor_can_call_super_init, r#"
    class Base {
        init(value) {
            this.value = value;
        }
    }
    class Derived < Base {}
    print Derived("value").value;
"#, stdout = "value\n");

crate::lox_test!(inheriting_from_a_function_is_a_runtime_error, r#"
    fun Subclass() {}
    class Foo < Subclass {}
"#, stderr = "[line 2] RuntimeError: superclass must be a class\n");

crate::lox_test!(inheriting_from_nil_is_a_runtime_error, r#"
    var Foo = nil;
    class Sub < Foo {}
"#, stderr = "[line 2] RuntimeError: superclass must be a class\n");

crate::lox_test!(inheriting_from_a_number_is_a_runtime_error, r#"
    var Foo = 123;
    class Sub < Foo {}
"#, stderr = "[line 2] RuntimeError: superclass must be a class\n");

crate::lox_test!(a_subclass_inherits_methods_it_does_not_override, r#"
    class Base {
        foo() { print "foo"; }
        bar() { print "bar"; }
    }
    class Derived < Base {
        bar() {
            super.bar();
            print "bar";
        }
    }
    Derived().foo();
    Derived().bar();
"#, stdout = "foo\nbar\nbar\n");

crate::lox_test!(a_superclass_name_must_be_a_bare_identifier, "class Foo {} class Bar < (Foo) {}",
    stderr = "[line 1] Error at \"(\": \"expect superclass name\"\n");

crate::lox_test!(fields_set_in_the_base_class_constructor_are_visible_in_the_subclass, r#"
    class Base {
        init() {
            this.foo = "foo 1";
            this.bar = "bar 1";
        }
    }
    class Derived < Base {
        init() {
            super.init();
            this.bar = "bar 2";
        }
    }
    var derived = Derived();
    print derived.foo;
    print derived.bar;
"#, stdout = "foo 1\nbar 2\n");
