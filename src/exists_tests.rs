use crate::{Predicate, SqlValue, Statement, exists, not_exists, select};
use pretty_assertions::assert_eq;

#[test]
fn exists_wraps_select_body() {
    let e = select("1").from("orders").where_("orders.user_id = users.id").exists();
    assert!(!e.is_negated());
    assert_eq!(
        e.render().unwrap(),
        [
            "EXISTS (",
            "  SELECT 1",
            "    FROM orders",
            "   WHERE orders.user_id = users.id)",
        ]
        .join("\n")
    );
}

#[test]
fn not_exists_prefixes_not() {
    let e = not_exists(select("1").from("bans"));
    assert!(e.is_negated());
    assert_eq!(
        e.render().unwrap(),
        "NOT EXISTS (\n  SELECT 1\n    FROM bans)"
    );
}

#[test]
fn exists_as_where_argument() {
    let sub = select("1")
        .from("orders AS o")
        .where_("o.user_id = u.id")
        .where_eq([("o.status", "open")]);
    let q = select("u.id")
        .from("users AS u")
        .where_eq([("u.active", true)])
        .where_(exists(sub));
    assert_eq!(
        q.query().unwrap(),
        [
            "SELECT u.id",
            "  FROM users AS u",
            " WHERE u.active = %(u.active_bind_0)s AND",
            "       EXISTS (",
            "  SELECT 1",
            "    FROM orders AS o",
            "   WHERE o.user_id = u.id AND",
            "         o.status = %(o.status_bind_0)s);",
        ]
        .join("\n")
    );
    assert_eq!(
        q.binds(),
        [
            ("u.active_bind_0", SqlValue::Bool(true)),
            ("o.status_bind_0", SqlValue::from("open")),
        ]
        .into_iter()
        .collect()
    );
}

#[test]
fn nested_names_are_not_renamed() {
    let sub = select("1").from("b").where_eq([("id", 2_i64)]);
    let q = select("a")
        .from("t")
        .where_eq([("id", 1_i64)])
        .where_(sub.not_exists());
    // 内外层同名参数不会被改名，链上靠后的子查询参数覆盖外层
    assert_eq!(q.binds().len(), 1);
    assert_eq!(q.binds().get("id_bind_0"), Some(&SqlValue::I64(2)));
}

#[test]
fn predicate_list_mixes_sql_and_statements() {
    let q = select("a").from("t").where_(vec![
        Predicate::from("x = 1"),
        Predicate::statement(select("1").from("u").exists()),
    ]);
    assert_eq!(
        q.query().unwrap(),
        "SELECT a\n  FROM t\n WHERE x = 1 AND\n       EXISTS (\n  SELECT 1\n    FROM u);"
    );
}

#[test]
fn inner_errors_propagate() {
    let q = select("a")
        .from("t")
        .where_(select(Vec::<String>::new()).from("u").exists());
    assert_eq!(q.query(), Err(crate::MalformedQuery::NoColumns));
}
