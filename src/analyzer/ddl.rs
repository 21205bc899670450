use once_cell::sync::Lazy;
use regex::Regex;

/// Unquoted Oracle identifier: letter first, then letters, digits, `_`,
/// `$`, `#`. Anything else must be double-quoted in emitted DDL.
static PLAIN_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_$#]*$").expect("identifier pattern"));

const MAX_IDENTIFIER_LEN: usize = 30;

pub fn format_identifier(name: &str) -> String {
    if PLAIN_IDENTIFIER.is_match(name) {
        return name.to_string();
    }
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn format_qualified(owner: Option<&str>, name: &str) -> String {
    match owner {
        Some(owner) => format!("{}.{}", format_identifier(owner), format_identifier(name)),
        None => format_identifier(name),
    }
}

/// Synthesizes an index name from the table and column list, clipped to the
/// catalog's identifier length limit.
pub fn index_name(table: &str, columns: &[String]) -> String {
    let mut name = format!("IDX_{}", table.to_ascii_uppercase());
    for column in columns {
        name.push('_');
        name.push_str(&column.to_ascii_uppercase());
    }
    name.truncate(MAX_IDENTIFIER_LEN);
    name
}

pub fn create_index(owner: Option<&str>, table: &str, columns: &[String]) -> String {
    let column_list = columns
        .iter()
        .map(|column| format_identifier(column))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE INDEX {} ON {} ({})",
        format_identifier(&index_name(table, columns)),
        format_qualified(owner, table),
        column_list
    )
}

pub fn drop_index(owner: Option<&str>, index_name: &str) -> String {
    format!("DROP INDEX {}", format_qualified(owner, index_name))
}

#[cfg(test)]
mod tests {
    use crate::analyzer::ddl::{create_index, drop_index, format_identifier, index_name};

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    pub fn test_plain_identifier_untouched() {
        assert_eq!(format_identifier("emp"), "emp");
        assert_eq!(format_identifier("V$SQL"), "V$SQL");
    }

    #[test]
    pub fn test_odd_identifier_quoted() {
        assert_eq!(format_identifier("odd name"), "\"odd name\"");
        assert_eq!(format_identifier("1st"), "\"1st\"");
    }

    #[test]
    pub fn test_index_name_clipped() {
        let name = index_name("employees", &columns(&["department_id", "hire_date", "last_name"]));

        assert!(name.len() <= 30);
        assert!(name.starts_with("IDX_EMPLOYEES_"));
    }

    #[test]
    pub fn test_create_index_text() {
        let ddl = create_index(None, "emp", &columns(&["dept_id", "hire_date"]));

        assert_eq!(ddl, "CREATE INDEX IDX_EMP_DEPT_ID_HIRE_DATE ON emp (dept_id, hire_date)");
    }

    #[test]
    pub fn test_create_index_with_owner() {
        let ddl = create_index(Some("hr"), "emp", &columns(&["dept_id"]));

        assert_eq!(ddl, "CREATE INDEX IDX_EMP_DEPT_ID ON hr.emp (dept_id)");
    }

    #[test]
    pub fn test_drop_index_text() {
        assert_eq!(drop_index(None, "IDX_A"), "DROP INDEX IDX_A");
        assert_eq!(drop_index(Some("hr"), "IDX_A"), "DROP INDEX hr.IDX_A");
    }
}
