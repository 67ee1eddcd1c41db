//! Builds parameterized CREATE TABLE, INSERT and SELECT statements from table definitions.

use crate::sql::{SqlParam, TableDef};

/// Quote identifier for PostgreSQL (safe: only from table definitions).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Select expression for one column: `"col"`, or `"col"::cast AS "col"` when the column declares a read cast.
fn column_expr(table: &TableDef, name: &str) -> String {
    let q = quoted(name);
    match table.column(name).and_then(|c| c.read_cast) {
        Some(cast) => format!("{}::{} AS {}", q, cast, q),
        None => q,
    }
}

fn select_list<'a>(table: &TableDef, columns: impl IntoIterator<Item = &'a str>) -> String {
    columns
        .into_iter()
        .map(|c| column_expr(table, c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn all_columns(table: &TableDef) -> String {
    select_list(table, table.column_names())
}

/// CREATE TABLE IF NOT EXISTS with NOT NULL and primary key from the definition.
pub fn create_table(table: &TableDef) -> String {
    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| {
            let mut def = format!("{} {}", quoted(c.name), c.sql_type);
            if !c.nullable {
                def.push_str(" NOT NULL");
            }
            def
        })
        .collect();
    if !table.primary_key.is_empty() {
        let pk: Vec<String> = table.primary_key.iter().map(|c| quoted(c)).collect();
        defs.push(format!("PRIMARY KEY ({})", pk.join(", ")));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(table.name),
        defs.join(", ")
    )
}

/// SELECT every column, no filter, store order.
pub fn select_all(table: &TableDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", all_columns(table), quoted(table.name));
    q
}

/// SELECT `columns` (all when empty) WHERE `column` = $1, optional LIMIT.
pub fn select_where_eq(
    table: &TableDef,
    columns: &[&str],
    column: &str,
    value: SqlParam,
    limit: Option<u32>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols = if columns.is_empty() {
        all_columns(table)
    } else {
        select_list(table, columns.iter().copied())
    };
    let n = q.push_param(value);
    let limit_clause = limit.map(|l| format!(" LIMIT {}", l)).unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}{}",
        cols,
        quoted(table.name),
        quoted(column),
        n,
        limit_clause
    );
    q
}

/// SELECT `columns` ORDER BY `order_by` ascending; DISTINCT when asked.
pub fn select_ordered(table: &TableDef, columns: &[&str], order_by: &str, distinct: bool) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {}{} FROM {} ORDER BY {}",
        if distinct { "DISTINCT " } else { "" },
        select_list(table, columns.iter().copied()),
        quoted(table.name),
        quoted(order_by)
    );
    q
}

/// Top `limit` groups by MAX(value) descending, restricted to rows where `filter_column` = $1.
/// Result columns: `group_column`, `max_value` (float8). Groups without any value rank last.
pub fn top_groups_by_max(
    table: &TableDef,
    group_column: &str,
    value_column: &str,
    filter_column: &str,
    filter_value: SqlParam,
    limit: u32,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(filter_value);
    let group = quoted(group_column);
    q.sql = format!(
        "SELECT {}, MAX({})::float8 AS max_value FROM {} WHERE {} = ${} GROUP BY {} ORDER BY max_value DESC NULLS LAST LIMIT {}",
        group,
        quoted(value_column),
        quoted(table.name),
        quoted(filter_column),
        n,
        group,
        limit
    );
    q
}

/// INSERT one row from (column, value) pairs; RETURNING every column.
pub fn insert_returning(table: &TableDef, values: Vec<(&str, SqlParam)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (name, value) in values {
        let n = q.push_param(value);
        cols.push(quoted(name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", "),
        all_columns(table)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{AIR_SUPER, COMPANIES, PLASTIC_PROJECTIONS, WATER_SUPER};

    #[test]
    fn create_table_declares_composite_key() {
        let ddl = create_table(&AIR_SUPER);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS \"air_super\" ("));
        assert!(ddl.contains("\"year\" INTEGER NOT NULL"));
        assert!(ddl.ends_with("PRIMARY KEY (\"country_code\", \"year\"))"));
    }

    #[test]
    fn create_table_without_key() {
        let ddl = create_table(&WATER_SUPER);
        assert!(!ddl.contains("PRIMARY KEY"));
        assert!(ddl.contains("\"main_sources\" VARCHAR(255),"));
    }

    #[test]
    fn user_values_never_reach_sql_text() {
        let hostile = "TL'; DROP TABLE air_super; --";
        let q = select_where_eq(&AIR_SUPER, &[], "country_code", hostile.into(), None);
        assert!(!q.sql.contains("DROP"));
        assert!(q.sql.ends_with("WHERE \"country_code\" = $1"));
        assert_eq!(q.params, vec![SqlParam::Text(hostile.to_string())]);
    }

    #[test]
    fn select_applies_read_casts() {
        let q = select_all(&AIR_SUPER);
        assert!(q.sql.contains("\"total\"::float8 AS \"total\""));
        assert!(q.sql.contains("\"country\", \"country_code\", \"year\"::int4 AS \"year\""));
        assert!(q.sql.contains("\"number_code\"::int4 AS \"number_code\""));
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_with_limit_and_projection() {
        let q = select_where_eq(
            &WATER_SUPER,
            &["country", "coastal_waste_risk"],
            "country_code",
            "US".into(),
            Some(1),
        );
        assert_eq!(
            q.sql,
            "SELECT \"country\", \"coastal_waste_risk\"::text AS \"coastal_waste_risk\" FROM \"water_super\" WHERE \"country_code\" = $1 LIMIT 1"
        );
    }

    #[test]
    fn distinct_ordered_select() {
        let q = select_ordered(&WATER_SUPER, &["country", "country_code"], "country", true);
        assert_eq!(
            q.sql,
            "SELECT DISTINCT \"country\", \"country_code\" FROM \"water_super\" ORDER BY \"country\""
        );
        let q = select_ordered(&PLASTIC_PROJECTIONS, &["year", "coverage"], "year", false);
        assert!(q
            .sql
            .starts_with("SELECT \"year\"::int4 AS \"year\", \"coverage\"::float8 AS \"coverage\""));
        assert!(q.sql.ends_with("ORDER BY \"year\""));
    }

    #[test]
    fn top_groups_binds_filter() {
        let q = top_groups_by_max(
            &COMPANIES,
            "parent_entity",
            "total_emissions",
            "parent_type",
            "Investor-owned Company".into(),
            5,
        );
        assert!(q.sql.contains("WHERE \"parent_type\" = $1"));
        assert!(q.sql.contains("GROUP BY \"parent_entity\" ORDER BY max_value DESC NULLS LAST LIMIT 5"));
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn insert_numbers_placeholders_in_order() {
        let q = insert_returning(
            &AIR_SUPER,
            vec![
                ("country", "Testland".into()),
                ("year", SqlParam::Int(2020)),
                ("total", SqlParam::Float(1.0)),
            ],
        );
        assert!(q
            .sql
            .starts_with("INSERT INTO \"air_super\" (\"country\", \"year\", \"total\") VALUES ($1, $2, $3) RETURNING "));
        assert_eq!(q.params[1], SqlParam::Int(2020));
    }
}
