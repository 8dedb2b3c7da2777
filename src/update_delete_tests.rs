use crate::{Flavor, SqlValue, delete, select, set_eq, update, where_eq};
use pretty_assertions::assert_eq;

#[test]
fn simple_update() {
    let u = update("table1").set("col1 = 'test'").set("col2 = 'test2'");
    assert_eq!(
        u.query().unwrap(),
        ["UPDATE table1", "   SET col1 = 'test',", "       col2 = 'test2';"].join("\n")
    );
    assert!(u.binds().is_empty());
}

#[test]
fn update_one_row() {
    let u = update("table1")
        .set(["col1 = 'test'", "col2 = 'test2'"])
        .where_eq([("id", 5_i64)]);
    assert_eq!(
        u.query().unwrap(),
        [
            "UPDATE table1",
            "   SET col1 = 'test',",
            "       col2 = 'test2'",
            " WHERE id = %(id_bind_0)s;",
        ]
        .join("\n")
    );
    assert_eq!(u.binds(), [("id_bind_0", 5_i64)].into_iter().collect());
}

#[test]
fn named_arg_update() {
    let u = set_eq!(update("table1"), col1 = "test").set("col2 = 'test2'");
    let u = where_eq!(u, id = 5_i64);
    assert_eq!(
        u.query().unwrap(),
        [
            "UPDATE table1",
            "   SET col1 = %(col1_bind)s,",
            "       col2 = 'test2'",
            " WHERE id = %(id_bind_1)s;",
        ]
        .join("\n")
    );
    assert_eq!(
        u.binds(),
        [
            ("col1_bind", SqlValue::from("test")),
            ("id_bind_1", SqlValue::from(5_i64)),
        ]
        .into_iter()
        .collect()
    );
}

#[test]
fn repeated_set_column_gets_numbered_name() {
    let u = update("t")
        .set_eq([("a", 1_i64)])
        .set_eq([("b", 2_i64), ("a", 3_i64)]);
    assert_eq!(
        u.query().unwrap(),
        [
            "UPDATE t",
            "   SET a = %(a_bind)s,",
            "       b = %(b_bind)s,",
            "       a = %(a_bind_2)s;",
        ]
        .join("\n")
    );
    assert_eq!(
        u.binds(),
        [("a_bind", 1_i64), ("b_bind", 2_i64), ("a_bind_2", 3_i64)]
            .into_iter()
            .collect()
    );
}

#[test]
fn update_returning() {
    let u = update("table1")
        .set_eq([("col1", "test")])
        .returning(["test", "test1"]);
    assert_eq!(
        u.query().unwrap(),
        [
            "UPDATE table1",
            "   SET col1 = %(col1_bind)s",
            "RETURNING test, test1;",
        ]
        .join("\n")
    );
}

#[test]
fn update_from_where_extra_returning_order() {
    let u = update("t")
        .returning("t.a")
        .extra("-- audit")
        .where_("t.id = o.id")
        .from("other AS o")
        .set("a = o.a");
    assert_eq!(
        u.query().unwrap(),
        [
            "UPDATE t",
            "   SET a = o.a",
            "  FROM other AS o",
            " WHERE t.id = o.id",
            "-- audit",
            "RETURNING t.a;",
        ]
        .join("\n")
    );
}

#[test]
fn set_on_branch_leaves_parent_untouched() {
    let base = update("t").set("a = 1");
    let branch = base.set("b = 2").returning("a");
    assert_eq!(base.query().unwrap(), "UPDATE t\n   SET a = 1;");
    assert_eq!(
        branch.query().unwrap(),
        "UPDATE t\n   SET a = 1,\n       b = 2\nRETURNING a;"
    );
}

#[test]
fn update_with_sqlite_flavor() {
    let u = Flavor::SQLite
        .update("t")
        .set_eq([("name", "x")])
        .where_eq([("id", 1_i64)]);
    assert_eq!(
        u.query().unwrap(),
        "UPDATE t\n   SET name = :name_bind\n WHERE id = :id_bind_1;"
    );
}

#[test]
fn update_where_exists_merges_binds() {
    let sub = select("1")
        .from("orders AS o")
        .where_("o.user_id = u.id")
        .where_eq([("status", "open")]);
    let u = update("users AS u")
        .set_eq([("flagged", true)])
        .where_(sub.exists());
    assert_eq!(
        u.query().unwrap(),
        [
            "UPDATE users AS u",
            "   SET flagged = %(flagged_bind)s",
            " WHERE EXISTS (",
            "  SELECT 1",
            "    FROM orders AS o",
            "   WHERE o.user_id = u.id AND",
            "         status = %(status_bind_0)s);",
        ]
        .join("\n")
    );
    assert_eq!(
        u.binds(),
        [
            ("status_bind_0", SqlValue::from("open")),
            ("flagged_bind", SqlValue::Bool(true)),
        ]
        .into_iter()
        .collect()
    );
}

#[test]
fn simple_delete() {
    let d = delete("table1");
    assert_eq!(d.query().unwrap(), "DELETE FROM table1;");
    assert!(d.binds().is_empty());
}

#[test]
fn delete_where() {
    let d = delete("table2").where_("x > 5");
    assert_eq!(d.query().unwrap(), "DELETE FROM table2\n WHERE x > 5;");
    assert!(d.binds().is_empty());
}

#[test]
fn delete_where_autobind() {
    let d = delete("table3").where_eq([("x", 25_i64)]);
    assert_eq!(
        d.query().unwrap(),
        "DELETE FROM table3\n WHERE x = %(x_bind_0)s;"
    );
    assert_eq!(d.binds(), [("x_bind_0", 25_i64)].into_iter().collect());
}

#[test]
fn delete_returning() {
    let d = delete("table3")
        .where_eq([("x", 25_i64)])
        .returning(["this", "that"]);
    assert_eq!(
        d.query().unwrap(),
        [
            "DELETE FROM table3",
            " WHERE x = %(x_bind_0)s",
            "RETURNING this, that;",
        ]
        .join("\n")
    );
    assert_eq!(d.binds(), [("x_bind_0", 25_i64)].into_iter().collect());
}

#[test]
fn delete_using_join() {
    let d = delete("t")
        .from("u")
        .join_on("v", "v.id = u.id")
        .where_("t.id = u.id");
    assert_eq!(
        d.query().unwrap(),
        [
            "DELETE FROM t",
            "  FROM u",
            "  JOIN v",
            "       ON v.id = u.id",
            " WHERE t.id = u.id;",
        ]
        .join("\n")
    );
}
