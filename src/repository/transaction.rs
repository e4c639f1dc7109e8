//! Repository implementation for financial transactions.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::transaction::{
    FinancialTransaction, NewFinancialTransaction, UpdateFinancialTransaction,
};
use crate::models::transaction::{
    FinancialTransaction as DbTransaction, NewFinancialTransaction as DbNewTransaction,
    UpdateFinancialTransaction as DbUpdateTransaction,
};
use crate::repository::{
    DieselRepository, TransactionListQuery, TransactionReader, TransactionWriter,
    errors::{RepositoryError, RepositoryResult},
};

impl TransactionReader for DieselRepository {
    fn get_transaction_by_id(&self, id: i32) -> RepositoryResult<Option<FinancialTransaction>> {
        use crate::schema::financial_transactions;

        let mut conn = self.conn()?;
        let transaction = financial_transactions::table
            .find(id)
            .first::<DbTransaction>(&mut conn)
            .optional()?;

        transaction
            .map(|t| FinancialTransaction::try_from(t).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<Vec<FinancialTransaction>> {
        use crate::schema::financial_transactions;

        let mut conn = self.conn()?;

        let mut items = financial_transactions::table.into_boxed();
        if let Some(customer_id) = query.customer_id {
            items = items.filter(financial_transactions::customer_id.eq(customer_id));
        }
        if let Some(vehicle_id) = query.vehicle_id {
            items = items.filter(financial_transactions::vehicle_id.eq(vehicle_id));
        }
        if let Some(job_id) = query.job_id {
            items = items.filter(financial_transactions::job_id.eq(job_id));
        }
        if let Some(transaction_type) = &query.transaction_type {
            items = items
                .filter(financial_transactions::transaction_type.eq(transaction_type.to_string()));
        }
        if let Some(range) = query.range {
            items = items
                .filter(financial_transactions::transaction_date.ge(range.start))
                .filter(financial_transactions::transaction_date.le(range.end));
        }

        let rows = items
            .order((
                financial_transactions::transaction_date.desc(),
                financial_transactions::id.desc(),
            ))
            .load::<DbTransaction>(&mut conn)?;

        rows.into_iter()
            .map(|t| FinancialTransaction::try_from(t).map_err(RepositoryError::from))
            .collect()
    }
}

impl TransactionWriter for DieselRepository {
    fn create_transaction(
        &self,
        new_transaction: &NewFinancialTransaction,
    ) -> RepositoryResult<FinancialTransaction> {
        use crate::schema::financial_transactions;

        let mut conn = self.conn()?;
        let insertable: DbNewTransaction = new_transaction.into();
        let created = diesel::insert_into(financial_transactions::table)
            .values(&insertable)
            .get_result::<DbTransaction>(&mut conn)?;

        FinancialTransaction::try_from(created).map_err(RepositoryError::from)
    }

    fn update_transaction(
        &self,
        transaction_id: i32,
        updates: &UpdateFinancialTransaction,
    ) -> RepositoryResult<FinancialTransaction> {
        use crate::schema::financial_transactions;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateTransaction = updates.into();

        let updated = diesel::update(financial_transactions::table.find(transaction_id))
            .set((
                &db_updates,
                financial_transactions::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbTransaction>(&mut conn)?;

        FinancialTransaction::try_from(updated).map_err(RepositoryError::from)
    }

    fn delete_transaction(&self, transaction_id: i32) -> RepositoryResult<()> {
        use crate::schema::financial_transactions;

        let mut conn = self.conn()?;
        diesel::delete(financial_transactions::table.find(transaction_id)).execute(&mut conn)?;
        Ok(())
    }
}
