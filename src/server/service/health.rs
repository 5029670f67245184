use sea_orm::DatabaseConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub database: bool,
}

impl Health {
    pub fn status(&self) -> &'static str {
        if self.database {
            "ok"
        } else {
            "degraded"
        }
    }
}

pub struct HealthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HealthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pings the database. A failed ping degrades the status instead of erroring.
    pub async fn check(&self) -> Health {
        let database = match self.db.ping().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Database health check failed: {}", err);
                false
            }
        };

        Health { database }
    }
}
