use crate::{Bindings, DeleteQuery, SelectQuery, Statement, UpdateQuery, select};
use pretty_assertions::assert_eq;
use std::thread;

#[test]
fn generative_query_keeps_every_step() {
    let s1 = select("tbl1.column1 AS col1")
        .from("table1 AS tbl1")
        .where_("tbl1.col2 = 'testval'")
        .where_("tbl1.col3 = 'otherval'");
    let s2 = s1.where_("tbl1.col4 = 'otherother'");
    let s3 = s2
        .join_using("table2 AS tbl2", "somecol")
        .bind([("val", "whatevs")]);
    let s4 = s3.join_on("table3 AS tbl3", "tbl3.colx = tbl2.coly");
    let s5 = s4
        .select("tbl3.whatever AS whatever")
        .bind([("test", "test2"), ("val", "nope")]);

    assert_eq!(
        s5.query().unwrap(),
        [
            "SELECT tbl1.column1 AS col1,",
            "       tbl3.whatever AS whatever",
            "  FROM table1 AS tbl1",
            "  JOIN table2 AS tbl2",
            "       USING somecol",
            "  JOIN table3 AS tbl3",
            "       ON tbl3.colx = tbl2.coly",
            " WHERE tbl1.col2 = 'testval' AND",
            "       tbl1.col3 = 'otherval' AND",
            "       tbl1.col4 = 'otherother';",
        ]
        .join("\n")
    );
    assert_eq!(
        s5.binds(),
        [("test", "test2"), ("val", "nope")].into_iter().collect()
    );

    assert_eq!(
        s4.query().unwrap(),
        [
            "SELECT tbl1.column1 AS col1",
            "  FROM table1 AS tbl1",
            "  JOIN table2 AS tbl2",
            "       USING somecol",
            "  JOIN table3 AS tbl3",
            "       ON tbl3.colx = tbl2.coly",
            " WHERE tbl1.col2 = 'testval' AND",
            "       tbl1.col3 = 'otherval' AND",
            "       tbl1.col4 = 'otherother';",
        ]
        .join("\n")
    );
    assert_eq!(s4.binds(), [("val", "whatevs")].into_iter().collect());

    assert_eq!(
        s3.query().unwrap(),
        [
            "SELECT tbl1.column1 AS col1",
            "  FROM table1 AS tbl1",
            "  JOIN table2 AS tbl2",
            "       USING somecol",
            " WHERE tbl1.col2 = 'testval' AND",
            "       tbl1.col3 = 'otherval' AND",
            "       tbl1.col4 = 'otherother';",
        ]
        .join("\n")
    );
    assert_eq!(s3.binds(), [("val", "whatevs")].into_iter().collect());

    assert_eq!(
        s2.query().unwrap(),
        [
            "SELECT tbl1.column1 AS col1",
            "  FROM table1 AS tbl1",
            " WHERE tbl1.col2 = 'testval' AND",
            "       tbl1.col3 = 'otherval' AND",
            "       tbl1.col4 = 'otherother';",
        ]
        .join("\n")
    );
    assert!(s2.binds().is_empty());

    assert_eq!(
        s1.query().unwrap(),
        [
            "SELECT tbl1.column1 AS col1",
            "  FROM table1 AS tbl1",
            " WHERE tbl1.col2 = 'testval' AND",
            "       tbl1.col3 = 'otherval';",
        ]
        .join("\n")
    );
    assert_eq!(s1.binds(), Bindings::new());
}

#[test]
fn sibling_branches_do_not_interfere() {
    let base = select("a").from("t").where_eq([("x", 1_i64)]);
    let left = base.where_eq([("y", 2_i64)]);
    let right = base.where_eq([("z", 3_i64)]).limit(1);

    assert_eq!(
        left.query().unwrap(),
        "SELECT a\n  FROM t\n WHERE x = %(x_bind_0)s AND\n       y = %(y_bind_1)s;"
    );
    assert_eq!(
        right.query().unwrap(),
        "SELECT a\n  FROM t\n WHERE x = %(x_bind_0)s AND\n       z = %(z_bind_1)s\n LIMIT 1;"
    );
    assert_eq!(
        left.binds(),
        [("x_bind_0", 1_i64), ("y_bind_1", 2_i64)]
            .into_iter()
            .collect()
    );
    assert_eq!(
        right.binds(),
        [("x_bind_0", 1_i64), ("z_bind_1", 3_i64)]
            .into_iter()
            .collect()
    );
    assert_eq!(
        base.query().unwrap(),
        "SELECT a\n  FROM t\n WHERE x = %(x_bind_0)s;"
    );
}

#[test]
fn rendering_is_deterministic() {
    let q = select(["a", "b"])
        .from("t")
        .where_eq([("a", 1_i64), ("b", 2_i64)])
        .bind([("extra", "v")])
        .order_by("a");
    let first = (q.query().unwrap(), q.binds());
    for _ in 0..3 {
        assert_eq!((q.query().unwrap(), q.binds()), first);
    }
    let cloned = q.clone();
    assert_eq!(cloned.query().unwrap(), first.0);
}

#[test]
fn later_bind_overrides_keep_first_position() {
    let q = select("a")
        .from("t")
        .bind([("val", "whatevs"), ("other", "x")])
        .bind([("val", "nope")]);
    let binds = q.binds();
    assert_eq!(binds.names().collect::<Vec<_>>(), vec!["val", "other"]);
    assert_eq!(binds.get("val"), Some(&crate::SqlValue::from("nope")));
}

#[test]
fn branches_render_across_threads() {
    let base = select("a").from("t").where_eq([("x", 1_i64)]);
    let results: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4_i64)
            .map(|i| {
                let base = &base;
                scope.spawn(move || base.limit(i).query().unwrap())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect()
    });
    for (i, sql) in results.iter().enumerate() {
        assert_eq!(
            *sql,
            format!("SELECT a\n  FROM t\n WHERE x = %(x_bind_0)s\n LIMIT {i};")
        );
    }
    assert_eq!(
        base.query().unwrap(),
        "SELECT a\n  FROM t\n WHERE x = %(x_bind_0)s;"
    );
}

#[test]
fn statements_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SelectQuery>();
    assert_send_sync::<UpdateQuery>();
    assert_send_sync::<DeleteQuery>();
    assert_send_sync::<Box<dyn Statement>>();
}

#[test]
fn long_chains_render() {
    let mut q = select("a").from("t");
    for i in 0..2_000 {
        q = q.where_(format!("c{i} = {i}"));
    }
    let sql = q.query().unwrap();
    assert!(sql.ends_with("c1999 = 1999;"));
}
