//! Repository implementation for jobs (service orders) and their balances.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::customer::Customer;
use crate::domain::job::{Job, JobBalance, NewJob, UpdateJob};
use crate::domain::transaction::{NewFinancialTransaction, TransactionType};
use crate::models::customer::Customer as DbCustomer;
use crate::models::job::{Job as DbJob, NewJob as DbNewJob, UpdateJob as DbUpdateJob};
use crate::models::transaction::NewFinancialTransaction as DbNewTransaction;
use crate::repository::{
    DieselRepository, JobListQuery, JobReader, JobWriter, errors::RepositoryResult,
};

fn job_filter(
    query: &JobListQuery,
) -> crate::schema::jobs::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    use crate::schema::jobs;

    let mut items = jobs::table.into_boxed();
    if let Some(customer_id) = query.customer_id {
        items = items.filter(jobs::customer_id.eq(customer_id));
    }
    if let Some(vehicle_id) = query.vehicle_id {
        items = items.filter(jobs::vehicle_id.eq(vehicle_id));
    }
    if let Some(technician_id) = query.technician_id {
        items = items.filter(jobs::technician_id.eq(technician_id));
    }
    if let Some(status) = &query.status {
        items = items.filter(jobs::status.eq(status.to_string()));
    }
    if let Some(range) = query.range {
        items = items
            .filter(jobs::job_date.ge(range.start))
            .filter(jobs::job_date.le(range.end));
    }
    items
}

/// Sums payments per job for the given job ids.
fn payments_by_job(
    conn: &mut crate::db::DbConnection,
    job_ids: &[i32],
) -> RepositoryResult<HashMap<i32, (f64, f64)>> {
    use crate::schema::financial_transactions;

    let rows: Vec<(Option<i32>, String, f64)> = financial_transactions::table
        .filter(financial_transactions::job_id.eq_any(job_ids.to_vec()))
        .select((
            financial_transactions::job_id,
            financial_transactions::transaction_type,
            financial_transactions::amount,
        ))
        .load(conn)?;

    let mut totals: HashMap<i32, (f64, f64)> = HashMap::new();
    for (job_id, transaction_type, amount) in rows {
        let Some(job_id) = job_id else { continue };
        let entry = totals.entry(job_id).or_default();
        match TransactionType::try_from(transaction_type.as_str()) {
            Ok(TransactionType::Payment) => entry.0 += amount,
            Ok(TransactionType::Refund) => entry.1 += amount,
            _ => {}
        }
    }

    Ok(totals)
}

impl JobReader for DieselRepository {
    fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<Job>> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let job = jobs::table.find(id).first::<DbJob>(&mut conn).optional()?;

        Ok(job.map(Into::into))
    }

    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;

        let total: i64 = job_filter(&query).count().get_result(&mut conn)?;

        let mut items = job_filter(&query).order((jobs::job_date.desc(), jobs::id.desc()));
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items = items.limit(per_page).offset((page - 1) * per_page);
        }

        let jobs = items
            .load::<DbJob>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, jobs))
    }

    fn list_jobs_with_customers(
        &self,
        query: JobListQuery,
    ) -> RepositoryResult<Vec<(Job, Customer)>> {
        use crate::schema::{customers, jobs};

        let mut conn = self.conn()?;

        let mut items = jobs::table
            .inner_join(customers::table)
            .select((DbJob::as_select(), DbCustomer::as_select()))
            .into_boxed();
        if let Some(customer_id) = query.customer_id {
            items = items.filter(jobs::customer_id.eq(customer_id));
        }
        if let Some(status) = &query.status {
            items = items.filter(jobs::status.eq(status.to_string()));
        }
        if let Some(range) = query.range {
            items = items
                .filter(jobs::job_date.ge(range.start))
                .filter(jobs::job_date.le(range.end));
        }

        let rows = items
            .order(jobs::job_date.asc())
            .load::<(DbJob, DbCustomer)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(job, customer)| (job.into(), customer.into()))
            .collect())
    }

    fn get_job_balance(&self, id: i32) -> RepositoryResult<Option<JobBalance>> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let Some(db_job) = jobs::table.find(id).first::<DbJob>(&mut conn).optional()? else {
            return Ok(None);
        };

        let totals = payments_by_job(&mut conn, &[db_job.id])?;
        let (paid, refunded) = totals.get(&db_job.id).copied().unwrap_or((0.0, 0.0));

        Ok(Some(JobBalance::new(db_job.into(), paid, refunded)))
    }

    fn list_job_balances(&self, query: JobListQuery) -> RepositoryResult<Vec<JobBalance>> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let db_jobs = job_filter(&query)
            .order((jobs::job_date.desc(), jobs::id.desc()))
            .load::<DbJob>(&mut conn)?;

        let ids: Vec<i32> = db_jobs.iter().map(|j| j.id).collect();
        let totals = payments_by_job(&mut conn, &ids)?;

        Ok(db_jobs
            .into_iter()
            .map(|db_job| {
                let (paid, refunded) = totals.get(&db_job.id).copied().unwrap_or((0.0, 0.0));
                JobBalance::new(db_job.into(), paid, refunded)
            })
            .collect())
    }
}

impl JobWriter for DieselRepository {
    fn create_job(
        &self,
        new_job: &NewJob,
        initial_transactions: &[NewFinancialTransaction],
    ) -> RepositoryResult<Job> {
        use crate::schema::{financial_transactions, jobs};

        let mut conn = self.conn()?;

        let created = conn.transaction::<DbJob, diesel::result::Error, _>(|conn| {
            let insertable: DbNewJob = new_job.into();
            let db_job = diesel::insert_into(jobs::table)
                .values(&insertable)
                .get_result::<DbJob>(conn)?;

            for transaction in initial_transactions {
                let mut row: DbNewTransaction = transaction.into();
                row.job_id = Some(db_job.id);
                row.customer_id = db_job.customer_id;
                diesel::insert_into(financial_transactions::table)
                    .values(&row)
                    .execute(conn)?;
            }

            Ok(db_job)
        })?;

        Ok(created.into())
    }

    fn update_job(&self, job_id: i32, updates: &UpdateJob) -> RepositoryResult<Job> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateJob = updates.into();

        let updated = diesel::update(jobs::table.find(job_id))
            .set((&db_updates, jobs::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbJob>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_job(&self, job_id: i32) -> RepositoryResult<()> {
        use crate::schema::{financial_transactions, jobs};

        let mut conn = self.conn()?;

        // Transactions survive with a cleared link, mirroring ON DELETE SET NULL.
        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            diesel::update(
                financial_transactions::table.filter(financial_transactions::job_id.eq(job_id)),
            )
            .set(financial_transactions::job_id.eq(None::<i32>))
            .execute(conn)?;
            diesel::delete(jobs::table.find(job_id)).execute(conn)?;
            Ok(())
        })?;

        Ok(())
    }
}
