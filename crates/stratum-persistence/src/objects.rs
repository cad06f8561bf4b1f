//! Managed database objects
//!
//! Functions, triggers, and views are not covered by the entity-derived
//! schema, so they are managed here as rendered SQL statements. Each
//! object knows how to create and drop itself on a connection; the set of
//! shipped objects is applied by [`create_objects`] / [`drop_objects`].

use sea_orm::{ConnectionTrait, DbErr};

use stratum_common::StratumError;

/// When a trigger fires relative to the statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerWhen {
    Before,
    After,
    InsteadOf,
}

impl TriggerWhen {
    fn as_sql(self) -> &'static str {
        match self {
            TriggerWhen::Before => "BEFORE",
            TriggerWhen::After => "AFTER",
            TriggerWhen::InsteadOf => "INSTEAD OF",
        }
    }
}

/// Row events a trigger reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
    Truncate,
}

impl TriggerEvent {
    fn as_sql(self) -> &'static str {
        match self {
            TriggerEvent::Insert => "INSERT",
            TriggerEvent::Update => "UPDATE",
            TriggerEvent::Delete => "DELETE",
            TriggerEvent::Truncate => "TRUNCATE",
        }
    }
}

/// Return type of a managed function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionReturns {
    Void,
    Trigger,
}

impl FunctionReturns {
    fn as_sql(self) -> &'static str {
        match self {
            FunctionReturns::Void => "VOID",
            FunctionReturns::Trigger => "TRIGGER",
        }
    }
}

/// A trigger attached to a managed function.
#[derive(Clone, Debug)]
pub struct DatabaseTrigger {
    name: String,
    table: String,
    when: TriggerWhen,
    events: Vec<TriggerEvent>,
    when_clause: Option<String>,
}

impl DatabaseTrigger {
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        when: TriggerWhen,
        events: Vec<TriggerEvent>,
        when_clause: Option<String>,
    ) -> Result<Self, StratumError> {
        if events.is_empty() {
            return Err(StratumError::InvalidData(
                "trigger must react to at least one event".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            table: table.into(),
            when,
            events,
            when_clause,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the CREATE statement calling `function_name`.
    pub fn create_sql(&self, function_name: &str) -> String {
        let events = self
            .events
            .iter()
            .map(|e| e.as_sql())
            .collect::<Vec<_>>()
            .join(" OR ");
        let when_clause = self
            .when_clause
            .as_deref()
            .map(|clause| format!("WHEN ({clause}) "))
            .unwrap_or_default();
        format!(
            "CREATE OR REPLACE TRIGGER {} {} {} ON {} FOR EACH ROW {}EXECUTE FUNCTION {}();",
            self.name,
            self.when.as_sql(),
            events,
            self.table,
            when_clause,
            function_name
        )
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TRIGGER IF EXISTS {} ON {};", self.name, self.table)
    }
}

/// A PL/pgSQL function together with the triggers that call it.
#[derive(Clone, Debug)]
pub struct DatabaseFunction {
    name: String,
    returns: FunctionReturns,
    body: String,
    triggers: Vec<DatabaseTrigger>,
}

impl DatabaseFunction {
    pub fn new(
        name: impl Into<String>,
        returns: FunctionReturns,
        body: impl Into<String>,
        triggers: Vec<DatabaseTrigger>,
    ) -> Result<Self, StratumError> {
        let mut names: Vec<&str> = triggers.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != triggers.len() {
            return Err(StratumError::InvalidData(
                "trigger names must be unique".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            returns,
            body: body.into(),
            triggers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Statements creating the function, then its triggers.
    pub fn create_sql(&self) -> Vec<String> {
        let mut statements = vec![format!(
            "CREATE OR REPLACE FUNCTION {}()\nRETURNS {} AS $$\n{}\n$$ LANGUAGE PLPGSQL;",
            self.name,
            self.returns.as_sql(),
            self.body.trim()
        )];
        statements.extend(self.triggers.iter().map(|t| t.create_sql(&self.name)));
        statements
    }

    /// Statements dropping the triggers, then the function.
    pub fn drop_sql(&self) -> Vec<String> {
        let mut statements: Vec<String> = self.triggers.iter().map(|t| t.drop_sql()).collect();
        statements.push(format!("DROP FUNCTION IF EXISTS {};", self.name));
        statements
    }

    pub async fn create<C: ConnectionTrait>(&self, conn: &C) -> Result<(), DbErr> {
        for statement in self.create_sql() {
            conn.execute_unprepared(&statement).await?;
        }
        Ok(())
    }

    pub async fn drop<C: ConnectionTrait>(&self, conn: &C) -> Result<(), DbErr> {
        for statement in self.drop_sql() {
            conn.execute_unprepared(&statement).await?;
        }
        Ok(())
    }
}

/// A managed database view.
#[derive(Clone, Debug)]
pub struct DatabaseView {
    name: String,
    query: String,
}

impl DatabaseView {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }

    pub fn create_sql(&self) -> String {
        format!("CREATE OR REPLACE VIEW {} AS {};", self.name, self.query)
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP VIEW IF EXISTS {};", self.name)
    }

    pub async fn create<C: ConnectionTrait>(&self, conn: &C) -> Result<(), DbErr> {
        conn.execute_unprepared(&self.create_sql()).await?;
        Ok(())
    }

    pub async fn drop<C: ConnectionTrait>(&self, conn: &C) -> Result<(), DbErr> {
        conn.execute_unprepared(&self.drop_sql()).await?;
        Ok(())
    }
}

/// Trigger and function keeping login tokens singular per account.
///
/// After a user-type token is inserted, every other user-type token of the
/// same account is deleted, so at most one login token survives. API
/// tokens are untouched. `token_type = 10` is [`TokenType::User`]'s
/// discriminant.
///
/// [`TokenType::User`]: crate::entity::access_token::TokenType
pub fn cleanup_obsolete_access_token() -> DatabaseFunction {
    let trigger = DatabaseTrigger::new(
        "on_01_access_token_insert",
        "access_token",
        TriggerWhen::After,
        vec![TriggerEvent::Insert],
        Some("NEW.token_type = 10".to_string()),
    )
    .expect("static trigger definition");
    DatabaseFunction::new(
        "cleanup_obsolete_access_token",
        FunctionReturns::Trigger,
        r#"DECLARE
BEGIN
    DELETE FROM access_token WHERE account_id = NEW.account_id AND token_type = 10 AND id <> NEW.id;
    RETURN NEW;
END;"#,
        vec![trigger],
    )
    .expect("static function definition")
}

fn functions() -> Vec<DatabaseFunction> {
    vec![cleanup_obsolete_access_token()]
}

fn views() -> Vec<DatabaseView> {
    vec![]
}

/// Create all managed functions, triggers, and views.
pub async fn create_objects<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    for function in functions() {
        function.create(conn).await?;
    }
    for view in views() {
        view.create(conn).await?;
    }
    Ok(())
}

/// Drop all managed views, triggers, and functions.
pub async fn drop_objects<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    for view in views() {
        view.drop(conn).await?;
    }
    for function in functions() {
        function.drop(conn).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_requires_events() {
        let result = DatabaseTrigger::new(
            "t",
            "account",
            TriggerWhen::After,
            vec![],
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_trigger_create_sql() {
        let trigger = DatabaseTrigger::new(
            "on_account_change",
            "account",
            TriggerWhen::After,
            vec![TriggerEvent::Insert, TriggerEvent::Update],
            None,
        )
        .unwrap();
        assert_eq!(
            trigger.create_sql("audit_account"),
            "CREATE OR REPLACE TRIGGER on_account_change AFTER INSERT OR UPDATE ON account \
             FOR EACH ROW EXECUTE FUNCTION audit_account();"
        );
        assert_eq!(
            trigger.drop_sql(),
            "DROP TRIGGER IF EXISTS on_account_change ON account;"
        );
    }

    #[test]
    fn test_trigger_when_clause() {
        let trigger = DatabaseTrigger::new(
            "t",
            "access_token",
            TriggerWhen::After,
            vec![TriggerEvent::Insert],
            Some("NEW.token_type = 10".to_string()),
        )
        .unwrap();
        assert!(
            trigger
                .create_sql("f")
                .contains("FOR EACH ROW WHEN (NEW.token_type = 10) EXECUTE FUNCTION f();")
        );
    }

    #[test]
    fn test_function_rejects_duplicate_trigger_names() {
        let make = || {
            DatabaseTrigger::new(
                "same",
                "account",
                TriggerWhen::After,
                vec![TriggerEvent::Insert],
                None,
            )
            .unwrap()
        };
        let result = DatabaseFunction::new(
            "f",
            FunctionReturns::Trigger,
            "BEGIN RETURN NEW; END;",
            vec![make(), make()],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_function_statement_order() {
        let function = cleanup_obsolete_access_token();
        let create = function.create_sql();
        assert_eq!(create.len(), 2);
        assert!(create[0].starts_with("CREATE OR REPLACE FUNCTION cleanup_obsolete_access_token()"));
        assert!(create[0].contains("RETURNS TRIGGER"));
        assert!(create[0].contains("LANGUAGE PLPGSQL"));
        assert!(create[1].contains("AFTER INSERT ON access_token"));

        let drop = function.drop_sql();
        assert_eq!(drop.len(), 2);
        assert!(drop[0].starts_with("DROP TRIGGER"));
        assert!(drop[1].starts_with("DROP FUNCTION"));
    }

    #[test]
    fn test_view_sql() {
        let view = DatabaseView::new("active_account", "SELECT * FROM account WHERE NOT locked");
        assert_eq!(
            view.create_sql(),
            "CREATE OR REPLACE VIEW active_account AS SELECT * FROM account WHERE NOT locked;"
        );
        assert_eq!(view.drop_sql(), "DROP VIEW IF EXISTS active_account;");
    }
}
