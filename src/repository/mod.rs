use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::company::{CompanyProfile, NewCompanyProfile};
use crate::domain::customer::{Customer, CustomerBalance, NewCustomer, UpdateCustomer};
use crate::domain::error_log::{ErrorLogEntry, NewErrorLogEntry};
use crate::domain::job::{Job, JobBalance, JobStatus, NewJob, UpdateJob};
use crate::domain::report::ReportRange;
use crate::domain::technician::{NewTechnician, Technician, UpdateTechnician};
use crate::domain::transaction::{
    FinancialTransaction, NewFinancialTransaction, TransactionType, UpdateFinancialTransaction,
};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod appointment;
pub mod company;
pub mod customer;
pub mod error_log;
pub mod errors;
pub mod job;
pub mod technician;
pub mod transaction;
pub mod vehicle;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> Result<DbConnection, RepositoryError> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct VehicleListQuery {
    pub customer_id: Option<i32>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl VehicleListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentListQuery {
    pub customer_id: Option<i32>,
    pub status: Option<AppointmentStatus>,
    /// Inclusive datetime window.
    pub between: Option<(NaiveDateTime, NaiveDateTime)>,
    pub pagination: Option<Pagination>,
}

impl AppointmentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.between = Some((start, end));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobListQuery {
    pub customer_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub status: Option<JobStatus>,
    /// Inclusive job-date window.
    pub range: Option<ReportRange>,
    pub pagination: Option<Pagination>,
}

impl JobListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn vehicle(mut self, vehicle_id: i32) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn technician(mut self, technician_id: i32) -> Self {
        self.technician_id = Some(technician_id);
        self
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn range(mut self, range: ReportRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionListQuery {
    pub customer_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub job_id: Option<i32>,
    pub transaction_type: Option<TransactionType>,
    /// Inclusive transaction-date window.
    pub range: Option<ReportRange>,
}

impl TransactionListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn vehicle(mut self, vehicle_id: i32) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn job(mut self, job_id: i32) -> Self {
        self.job_id = Some(job_id);
        self
    }

    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn range(mut self, range: ReportRange) -> Self {
        self.range = Some(range);
        self
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    /// Total customers, optionally restricted to a creation window.
    fn count_customers(&self, created_in: Option<ReportRange>) -> RepositoryResult<usize>;
    /// Customers with unpaid job remainders, largest debt first.
    fn list_customers_with_debt(&self) -> RepositoryResult<Vec<CustomerBalance>>;
}

pub trait CustomerWriter {
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
    fn update_customer(&self, customer_id: i32, updates: &UpdateCustomer)
    -> RepositoryResult<Customer>;
    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()>;
}

pub trait VehicleReader {
    fn get_vehicle_by_id(&self, id: i32) -> RepositoryResult<Option<Vehicle>>;
    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)>;
}

pub trait VehicleWriter {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle>;
    fn update_vehicle(&self, vehicle_id: i32, updates: &UpdateVehicle)
    -> RepositoryResult<Vehicle>;
    fn delete_vehicle(&self, vehicle_id: i32) -> RepositoryResult<()>;
}

pub trait AppointmentReader {
    fn get_appointment_by_id(&self, id: i32) -> RepositoryResult<Option<Appointment>>;
    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<(usize, Vec<Appointment>)>;
}

pub trait AppointmentWriter {
    fn create_appointment(&self, new_appointment: &NewAppointment)
    -> RepositoryResult<Appointment>;
    fn update_appointment(
        &self,
        appointment_id: i32,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment>;
    fn delete_appointment(&self, appointment_id: i32) -> RepositoryResult<()>;
}

pub trait JobReader {
    fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<Job>>;
    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)>;
    /// Jobs joined with their owning customer, for report grouping.
    fn list_jobs_with_customers(
        &self,
        query: JobListQuery,
    ) -> RepositoryResult<Vec<(Job, Customer)>>;
    /// A job plus payment totals derived from its transactions.
    fn get_job_balance(&self, id: i32) -> RepositoryResult<Option<JobBalance>>;
    fn list_job_balances(&self, query: JobListQuery) -> RepositoryResult<Vec<JobBalance>>;
}

pub trait JobWriter {
    /// Creates a job and, atomically, any initial transactions tied to it.
    fn create_job(
        &self,
        new_job: &NewJob,
        initial_transactions: &[NewFinancialTransaction],
    ) -> RepositoryResult<Job>;
    fn update_job(&self, job_id: i32, updates: &UpdateJob) -> RepositoryResult<Job>;
    fn delete_job(&self, job_id: i32) -> RepositoryResult<()>;
}

pub trait TransactionReader {
    fn get_transaction_by_id(&self, id: i32) -> RepositoryResult<Option<FinancialTransaction>>;
    /// Matching transactions, newest first.
    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<Vec<FinancialTransaction>>;
}

pub trait TransactionWriter {
    fn create_transaction(
        &self,
        new_transaction: &NewFinancialTransaction,
    ) -> RepositoryResult<FinancialTransaction>;
    fn update_transaction(
        &self,
        transaction_id: i32,
        updates: &UpdateFinancialTransaction,
    ) -> RepositoryResult<FinancialTransaction>;
    fn delete_transaction(&self, transaction_id: i32) -> RepositoryResult<()>;
}

pub trait TechnicianReader {
    fn get_technician_by_id(&self, id: i32) -> RepositoryResult<Option<Technician>>;
    fn list_technicians(&self, active_only: bool) -> RepositoryResult<Vec<Technician>>;
}

pub trait TechnicianWriter {
    fn create_technician(&self, new_technician: &NewTechnician) -> RepositoryResult<Technician>;
    fn update_technician(
        &self,
        technician_id: i32,
        updates: &UpdateTechnician,
    ) -> RepositoryResult<Technician>;
    fn delete_technician(&self, technician_id: i32) -> RepositoryResult<()>;
}

pub trait CompanyReader {
    /// The single company profile, if one has been created yet.
    fn get_company_profile(&self) -> RepositoryResult<Option<CompanyProfile>>;
}

pub trait CompanyWriter {
    fn upsert_company_profile(
        &self,
        profile: &NewCompanyProfile,
    ) -> RepositoryResult<CompanyProfile>;
    fn update_company_logo(&self, logo_url: Option<&str>) -> RepositoryResult<CompanyProfile>;
}

pub trait ErrorLogReader {
    fn list_error_logs(&self, limit: i64) -> RepositoryResult<Vec<ErrorLogEntry>>;
}

pub trait ErrorLogWriter {
    fn create_error_log(&self, entry: &NewErrorLogEntry) -> RepositoryResult<()>;
}
