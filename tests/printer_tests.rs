mod common;

use common::*;
use jayc::ast::AstPrinter;

/// Print, re-parse, and print again: the second rendering must equal the
/// first. This pins the printer to emit source the parser reads back with
/// the same structure.
fn assert_round_trip(source: &str) {
    let unit = parse_ok(source);
    let printed = AstPrinter::new().print(&unit);
    let reparsed_unit = parse_ok(&printed);
    let reprinted = AstPrinter::new().print(&reparsed_unit);
    assert_eq!(printed, reprinted, "print/parse/print drifted for:\n{}", source);
}

#[test]
fn round_trip_simple_class() {
    assert_round_trip("class C { int f(int x) { return x + 1; } }");
}

#[test]
fn round_trip_full_unit() {
    assert_round_trip(
        r#"
package com.example;

import java.util.List;

public class Counter extends base.Counting {
    private int value;
    private static char mark = 'c';

    public Counter(int value) {
        this.value = value;
    }

    public int next() {
        value = value + 1;
        return value;
    }

    public void reset() {
        value = 0;
    }
}
"#,
    );
}

#[test]
fn round_trip_control_flow() {
    assert_round_trip(
        r#"
class Flow {
    int f(int x, boolean b) {
        if (b) {
            x = x + 1;
        } else {
            x = x - 1;
        }
        while (x > 0) {
            x--;
        }
        if (b && x == 0)
            return x;
        return -x;
    }
}
"#,
    );
}

#[test]
fn round_trip_expressions() {
    assert_round_trip(
        r#"
class Exprs {
    void m(int[] a, Exprs e) {
        int x = (a[0] + 1) * 2 - 3 % 4;
        int y = (int) -x;
        boolean b = x <= 10 == true && e instanceof Exprs;
        char c = 'q';
        x = a[x - 1];
        ++x;
        x--;
        e.m(a, e);
        this.m(a, new Exprs());
    }
}
"#,
    );
}

#[test]
fn round_trip_arrays_and_initializers() {
    assert_round_trip(
        r#"
class Arrays {
    int[] ints = {1, 2, 3};
    int[][] grid = {{1}, {2, 3}};

    void m() {
        int[] a = new int[3];
        int[][] b = new int[2][];
        int[] c = new int[]{4, 5};
        a[0] = b[0][0];
    }
}
"#,
    );
}

#[test]
fn round_trip_super_and_this() {
    assert_round_trip(
        r#"
class Child extends Parent {
    int f;

    Child() {
        super();
        this.f = super.f + 1;
    }

    Child(int f) {
        this(0);
        super.init(f);
    }
}
"#,
    );
}

#[test]
fn printed_source_reads_naturally() {
    let unit = parse_ok("class C { int f(int x) { return x + 1; } }");
    let printed = AstPrinter::new().print(&unit);
    assert!(printed.contains("class C extends java.lang.Object {"));
    assert!(printed.contains("int f(int x) {"));
    assert!(printed.contains("return x + 1;"));
}
