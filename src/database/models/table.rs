use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::database::manager::DatabaseError;

/// Tables whose row count may be reported. Anything else is rejected
/// before a query string is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Customers,
    Products,
    Interactions,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Customers, Table::Products, Table::Interactions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Customers => "customers",
            Table::Products => "products",
            Table::Interactions => "interactions",
        }
    }
}

impl FromStr for Table {
    type Err = DatabaseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|table| table.as_str() == name)
            .ok_or_else(|| DatabaseError::UnknownTable(name.to_string()))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
