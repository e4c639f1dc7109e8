//! Repository implementation for customer records.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::customer::{Customer, CustomerBalance, NewCustomer, UpdateCustomer};
use crate::domain::report::ReportRange;
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository,
    errors::RepositoryResult,
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .find(id)
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let build = || {
            let mut items = customers::table.into_boxed();
            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                items = items.filter(
                    customers::full_name
                        .like(pattern.clone())
                        .or(customers::email.like(pattern.clone()))
                        .or(customers::phone.like(pattern.clone()))
                        .or(customers::address.like(pattern)),
                );
            }
            items
        };

        let total: i64 = build().count().get_result(&mut conn)?;

        let mut items = build().order(customers::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items = items.limit(per_page).offset((page - 1) * per_page);
        }

        let customers = items
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, customers))
    }

    fn count_customers(&self, created_in: Option<ReportRange>) -> RepositoryResult<usize> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let mut query = customers::table.into_boxed();
        if let Some(range) = created_in {
            let start = range.start.and_hms_opt(0, 0, 0).unwrap_or_default();
            let end = range.end.and_hms_opt(23, 59, 59).unwrap_or_default();
            query = query
                .filter(customers::created_at.ge(start))
                .filter(customers::created_at.le(end));
        }
        let total: i64 = query.count().get_result(&mut conn)?;
        Ok(total as usize)
    }

    fn list_customers_with_debt(&self) -> RepositoryResult<Vec<CustomerBalance>> {
        use crate::models::job::Job as DbJob;
        use crate::schema::{customers, financial_transactions, jobs};

        let mut conn = self.conn()?;

        let open_jobs = jobs::table
            .filter(jobs::status.ne(crate::domain::job::JobStatus::Cancelled.to_string()))
            .load::<DbJob>(&mut conn)?;

        let payments: Vec<(Option<i32>, f64)> = financial_transactions::table
            .filter(financial_transactions::transaction_type.eq("PAYMENT"))
            .filter(financial_transactions::job_id.is_not_null())
            .select((
                financial_transactions::job_id,
                financial_transactions::amount,
            ))
            .load(&mut conn)?;

        let mut paid_by_job: HashMap<i32, f64> = HashMap::new();
        for (job_id, amount) in payments {
            if let Some(job_id) = job_id {
                *paid_by_job.entry(job_id).or_default() += amount;
            }
        }

        let mut outstanding_by_customer: HashMap<i32, f64> = HashMap::new();
        for job in &open_jobs {
            let paid = paid_by_job.get(&job.id).copied().unwrap_or(0.0);
            let remaining = (job.total_cost - paid).max(0.0);
            if remaining > 0.0 {
                *outstanding_by_customer.entry(job.customer_id).or_default() += remaining;
            }
        }

        if outstanding_by_customer.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i32> = outstanding_by_customer.keys().copied().collect();
        let debtors = customers::table
            .filter(customers::id.eq_any(ids))
            .load::<DbCustomer>(&mut conn)?;

        let mut balances: Vec<CustomerBalance> = debtors
            .into_iter()
            .map(|db_customer| {
                let outstanding = outstanding_by_customer
                    .get(&db_customer.id)
                    .copied()
                    .unwrap_or(0.0);
                CustomerBalance {
                    customer: db_customer.into(),
                    outstanding,
                }
            })
            .collect();

        balances.sort_by(|a, b| {
            b.outstanding
                .partial_cmp(&a.outstanding)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(balances)
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewCustomer> = new_customers.iter().map(Into::into).collect();
        let affected = diesel::insert_into(customers::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_customer(
        &self,
        customer_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateCustomer = updates.into();

        let updated = diesel::update(customers::table.find(customer_id))
            .set((&db_updates, customers::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        diesel::delete(customers::table.find(customer_id)).execute(&mut conn)?;
        Ok(())
    }
}
