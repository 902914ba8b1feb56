//! Translates a [`TicketFilter`] into a parameterized SQL fragment.
//!
//! The fragment holds zero or more equality predicates joined with `AND`,
//! followed by `LIMIT`/`OFFSET`. Placeholders are PostgreSQL positional
//! markers, so `$k` always binds the k-th entry of [`FilterClause::params`].

use crate::ticket::TicketFilter;

/// A value bound to one placeholder of a [`FilterClause`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterParam {
    Text(String),
    Integer(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    sql: String,
    params: Vec<FilterParam>,
}

impl FilterClause {
    pub fn from_filter(filter: &TicketFilter) -> Self {
        let mut builder = ClauseBuilder::default();

        if let Some(name) = &filter.passenger_name {
            builder.push_eq("passenger_name", FilterParam::Text(name.clone()));
        }
        if let Some(seat) = &filter.seat_no {
            builder.push_eq("seat_no", FilterParam::Text(seat.clone()));
        }

        builder.finish(filter.limit, filter.offset)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[FilterParam] {
        &self.params
    }

    pub fn into_params(self) -> Vec<FilterParam> {
        self.params
    }

    /// Appends the fragment to a base `SELECT` statement.
    pub fn apply(&self, base_sql: &str) -> String {
        format!("{}{}", base_sql, self.sql)
    }
}

#[derive(Default)]
struct ClauseBuilder {
    predicates: Vec<String>,
    params: Vec<FilterParam>,
}

impl ClauseBuilder {
    // Predicate and parameter are pushed together; marker numbering depends on it.
    fn push_eq(&mut self, column: &str, value: FilterParam) {
        self.params.push(value);
        self.predicates.push(format!("{} = ${}", column, self.params.len()));
    }

    fn finish(mut self, limit: u32, offset: u32) -> FilterClause {
        self.params.push(FilterParam::Integer(i64::from(limit)));
        let limit_marker = self.params.len();
        self.params.push(FilterParam::Integer(i64::from(offset)));
        let offset_marker = self.params.len();

        let prefix = if self.predicates.is_empty() { " " } else { " WHERE " };
        let sql = format!(
            "{}{} LIMIT ${} OFFSET ${} ",
            prefix,
            self.predicates.join(" AND "),
            limit_marker,
            offset_marker
        );

        FilterClause {
            sql,
            params: self.params,
        }
    }
}
