use async_graphql::*;

/// Structured error builder for resolver-level failures
pub struct StructuredError;

impl StructuredError {
    /// Create a "database error"
    pub fn database(operation: &str, cause: impl std::fmt::Display) -> Error {
        Error::new(format!("Database error during {}: {}", operation, cause)).extend_with(|_, e| {
            e.set("code", "DATABASE_ERROR");
            e.set("operation", operation);
        })
    }

    /// Create a "bad request" error
    pub fn bad_request(message: impl Into<String>) -> Error {
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "BAD_REQUEST");
        })
    }
}

/// Database ids travel as GraphQL `ID` strings
pub fn parse_id(resource: &str, id: &ID) -> Result<i32> {
    id.parse::<i32>().map_err(|_| {
        StructuredError::bad_request(format!("Invalid {} id '{}'", resource, id.as_str()))
    })
}
