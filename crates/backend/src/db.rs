use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection,
};

pub type DbPool = Pool<AsyncPgConnection>;

pub fn establish_connection_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = Pool::builder(config).build()?;

    Ok(pool)
}

// Counter database operations
pub mod counters {
    use counter_types::Counter;
    use diesel::prelude::*;
    use diesel::upsert::excluded;
    use diesel_async::{AsyncPgConnection, RunQueryDsl};

    use crate::schema::counters;

    pub async fn get_by_email(
        conn: &mut AsyncPgConnection,
        email: &str,
    ) -> QueryResult<Option<Counter>> {
        counters::table
            .filter(counters::email.eq(email))
            .first::<Counter>(conn)
            .await
            .optional()
    }

    /// Insert the counter, or overwrite both fields of the existing row.
    pub async fn upsert(conn: &mut AsyncPgConnection, counter: &Counter) -> QueryResult<Counter> {
        diesel::insert_into(counters::table)
            .values((
                counters::email.eq(counter.email.as_str()),
                counters::count.eq(counter.count),
                counters::mycount.eq(counter.mycount),
            ))
            .on_conflict(counters::email)
            .do_update()
            .set((
                counters::count.eq(excluded(counters::count)),
                counters::mycount.eq(excluded(counters::mycount)),
            ))
            .get_result::<Counter>(conn)
            .await
    }
}
