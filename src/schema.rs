use serde::{Deserialize, Serialize};

/// Schema definition applied when a manager is opened from a config.
///
/// Every statement is rendered with `IF NOT EXISTS`, so applying the same
/// schema to an already initialized database is a no-op.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// Renders one statement per table and per index, in declaration order.
    pub fn to_sql(&self) -> Vec<String> {
        let mut statements = Vec::new();
        for table in &self.tables {
            statements.push(table.create_sql());
            for index in &table.indexes {
                statements.push(index.create_sql(&table.name));
            }
        }
        statements
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    /// Table level primary key. Leave empty when a column carries
    /// [`ColumnConstraint::PrimaryKey`] itself.
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnDefinition::sql).collect();
        if !self.primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, parts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub constraints: Vec<ColumnConstraint>,
    #[serde(default)]
    pub default_value: Option<DefaultValue>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
            default_value: None,
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_default(mut self, default_value: DefaultValue) -> Self {
        self.default_value = Some(default_value);
        self
    }

    fn sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.sql());
        }
        if let Some(default_value) = &self.default_value {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default_value.sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Text,
    Real,
    Blob,
}

impl DataType {
    fn sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Real => "REAL",
            DataType::Blob => "BLOB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
    NotNull,
    Unique,
}

impl ColumnConstraint {
    fn sql(self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::AutoIncrement => "AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
            ColumnConstraint::Unique => "UNIQUE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    Integer(i64),
    Text(String),
    Real(f64),
    Null,
    CurrentTimestamp,
}

impl DefaultValue {
    fn sql(&self) -> String {
        match self {
            DefaultValue::Integer(v) => v.to_string(),
            DefaultValue::Text(v) => format!("'{}'", v.replace('\'', "''")),
            DefaultValue::Real(v) => v.to_string(),
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::CurrentTimestamp => "CURRENT_TIMESTAMP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

impl IndexDefinition {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    fn create_sql(&self, table: &str) -> String {
        let unique = if self.unique { "UNIQUE " } else { "" };
        format!(
            "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
            unique,
            self.name,
            table,
            self.columns.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_table() -> TableDefinition {
        TableDefinition::new("users")
            .with_column(
                ColumnDefinition::new("id", DataType::Integer)
                    .with_constraint(ColumnConstraint::PrimaryKey)
                    .with_constraint(ColumnConstraint::AutoIncrement),
            )
            .with_column(
                ColumnDefinition::new("name", DataType::Text)
                    .with_constraint(ColumnConstraint::NotNull),
            )
            .with_column(
                ColumnDefinition::new("email", DataType::Text)
                    .with_constraint(ColumnConstraint::Unique),
            )
            .with_column(
                ColumnDefinition::new("age", DataType::Integer).with_default(DefaultValue::Null),
            )
            .with_index(IndexDefinition::new("idx_users_email", &["email"]))
    }

    #[test]
    fn renders_tables_then_their_indexes() {
        let sql = Schema::new().add_table(users_table()).to_sql();
        assert_eq!(
            sql,
            vec![
                "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY AUTOINCREMENT, \
                 name TEXT NOT NULL, email TEXT UNIQUE, age INTEGER DEFAULT NULL)"
                    .to_string(),
                "CREATE INDEX IF NOT EXISTS idx_users_email ON users (email)".to_string(),
            ]
        );
    }

    #[test]
    fn renders_table_level_primary_key_and_unique_index() {
        let table = TableDefinition::new("memberships")
            .with_column(ColumnDefinition::new("user_id", DataType::Integer))
            .with_column(ColumnDefinition::new("group_id", DataType::Integer))
            .with_column(
                ColumnDefinition::new("role", DataType::Text)
                    .with_default(DefaultValue::Text("member's".to_string())),
            )
            .with_primary_key(&["user_id", "group_id"])
            .with_index(IndexDefinition::new("idx_role", &["role"]).unique());
        let sql = Schema::new().add_table(table).to_sql();
        assert_eq!(
            sql[0],
            "CREATE TABLE IF NOT EXISTS memberships (user_id INTEGER, group_id INTEGER, \
             role TEXT DEFAULT 'member''s', PRIMARY KEY (user_id, group_id))"
        );
        assert_eq!(sql[1], "CREATE UNIQUE INDEX IF NOT EXISTS idx_role ON memberships (role)");
    }
}
