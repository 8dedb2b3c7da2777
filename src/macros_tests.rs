#[cfg(test)]
mod tests {
    use crate::{SqlValue, delete, select, update};
    use pretty_assertions::assert_eq;

    #[test]
    fn select_macros_variadic_build_sql() {
        let q = select("id");
        let q = crate::select_cols!(q, "name", String::from("email"));
        let q = crate::from_tables!(q, "users");
        let q = crate::where_exprs!(q, "active", "age > 18");
        let q = crate::group_by_cols!(q, "id", "name");
        let q = crate::order_by_cols!(q, "name");

        assert_eq!(
            q.query().unwrap(),
            [
                "SELECT id,",
                "       name,",
                "       email",
                "  FROM users",
                " WHERE active AND",
                "       age > 18",
                "GROUP BY id,",
                "         name",
                "ORDER BY name;",
            ]
            .join("\n")
        );
        assert!(q.binds().is_empty());
    }

    #[test]
    fn pair_macros_keep_written_order() {
        let q = crate::where_eq!(select("a").from("t"), zeta = 1_i64, alpha = "x");
        let q = crate::bind!(q, extra = 2.5_f64);
        assert_eq!(
            q.binds().names().collect::<Vec<_>>(),
            vec!["zeta_bind_0", "alpha_bind_1", "extra"]
        );
        assert_eq!(q.binds().get("extra"), Some(&SqlValue::F64(2.5)));
    }

    #[test]
    fn set_and_returning_macros() {
        let u = crate::set_eq!(update("t"), a = 1_i64, b = crate::raw("now()"));
        let u = crate::returning_cols!(u, "a", "b");
        assert_eq!(
            u.query().unwrap(),
            "UPDATE t\n   SET a = %(a_bind)s,\n       b = now()\nRETURNING a, b;"
        );

        let d = crate::returning_cols!(delete("t"), "id");
        assert_eq!(d.query().unwrap(), "DELETE FROM t\nRETURNING id;");
    }

    #[test]
    fn row_macro_builds_sorted_row() {
        let r = crate::row!(b = 2_i64, a = "x");
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
