use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use super::HealthProbe;
use crate::db::AsyncDbPool;
use crate::error::AppResult;

/// Checks that a pooled connection can run a trivial query.
#[derive(Clone)]
pub struct PgHealthProbe {
    pool: AsyncDbPool,
}

impl PgHealthProbe {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::sql_query("SELECT 1").execute(&mut conn).await?;
        Ok(())
    }
}
