use chrono::NaiveDate;

use servicetracker::domain::appointment::{
    AppointmentStatus, NewAppointment, ServiceType, UpdateAppointment,
};
use servicetracker::domain::customer::{NewCustomer, UpdateCustomer};
use servicetracker::domain::job::{JobStatus, NewJob};
use servicetracker::domain::technician::NewTechnician;
use servicetracker::domain::transaction::{NewFinancialTransaction, TransactionType};
use servicetracker::domain::vehicle::NewVehicle;
use servicetracker::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, CustomerListQuery, CustomerReader,
    CustomerWriter, JobListQuery, JobReader, JobWriter, TechnicianReader, TechnicianWriter,
    TransactionListQuery, TransactionReader, TransactionWriter, VehicleListQuery, VehicleReader,
    VehicleWriter,
};

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_customer_repository_crud() {
    let test_db = common::TestDb::new("test_customer_repository_crud.db");
    let repo = test_db.repo();

    let c1 = NewCustomer::new(
        "Alice Arslan".to_string(),
        Some("Alice@Example.com".to_string()),
        "+905551112233".to_string(),
        Some("Ankara".to_string()),
    );
    let c2 = NewCustomer::new(
        "Bob Bulut".to_string(),
        None,
        "+905554445566".to_string(),
        None,
    );

    assert_eq!(repo.create_customers(&[c1, c2]).unwrap(), 2);

    let (total, mut items) = repo.list_customers(CustomerListQuery::new()).unwrap();
    assert_eq!(total, 2);
    items.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    let alice = items[0].clone();
    let bob = items[1].clone();
    assert_eq!(alice.email.as_deref(), Some("alice@example.com"));

    let (search_total, search_items) = repo
        .list_customers(CustomerListQuery::new().search("Bob"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].full_name, "Bob Bulut");

    let updates = UpdateCustomer::new(
        "Bobby Bulut".to_string(),
        None,
        bob.phone.clone(),
        None,
    );
    let updated = repo.update_customer(bob.id, &updates).unwrap();
    assert_eq!(updated.full_name, "Bobby Bulut");

    repo.delete_customer(alice.id).unwrap();
    assert!(repo.get_customer_by_id(alice.id).unwrap().is_none());

    assert_eq!(repo.count_customers(None).unwrap(), 1);
}

#[test]
fn test_vehicle_repository_crud() {
    let test_db = common::TestDb::new("test_vehicle_repository_crud.db");
    let repo = test_db.repo();

    repo.create_customers(&[NewCustomer::new(
        "Owner".to_string(),
        None,
        "+905551112233".to_string(),
        None,
    )])
    .unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new()).unwrap();
    let owner = &customers[0];

    let vehicle = repo
        .create_vehicle(&NewVehicle::new(
            owner.id,
            "Renault".to_string(),
            "Clio".to_string(),
            2019,
            "34 abc 123".to_string(),
            None,
            None,
        ))
        .unwrap();
    assert_eq!(vehicle.plate, "34 ABC 123");

    let (total, vehicles) = repo
        .list_vehicles(VehicleListQuery::new().customer(owner.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(vehicles[0].id, vehicle.id);

    let (search_total, _) = repo
        .list_vehicles(VehicleListQuery::new().search("Clio"))
        .unwrap();
    assert_eq!(search_total, 1);

    repo.delete_vehicle(vehicle.id).unwrap();
    assert!(repo.get_vehicle_by_id(vehicle.id).unwrap().is_none());
}

#[test]
fn test_job_with_initial_transactions_and_balance() {
    let test_db = common::TestDb::new("test_job_with_initial_transactions.db");
    let repo = test_db.repo();

    repo.create_customers(&[NewCustomer::new(
        "Customer".to_string(),
        None,
        "+905551112233".to_string(),
        None,
    )])
    .unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new()).unwrap();
    let customer = &customers[0];

    let new_job = NewJob {
        customer_id: customer.id,
        vehicle_id: None,
        technician_id: None,
        job_description: "Brake overhaul".to_string(),
        job_date: date(2025, 3, 10),
        total_cost: 1000.0,
        status: JobStatus::Open,
        notes: None,
    };
    let initial = vec![
        NewFinancialTransaction::new(
            customer.id,
            TransactionType::ServiceFee,
            1000.0,
            date(2025, 3, 10),
        ),
        NewFinancialTransaction::new(
            customer.id,
            TransactionType::Payment,
            400.0,
            date(2025, 3, 10),
        ),
    ];

    let job = repo.create_job(&new_job, &initial).unwrap();

    let balance = repo.get_job_balance(job.id).unwrap().unwrap();
    assert_eq!(balance.total_paid, 400.0);
    assert_eq!(balance.total_refunded, 0.0);
    assert_eq!(balance.remaining, 600.0);

    // Overpayment clamps the remaining balance at zero.
    repo.create_transaction(
        &NewFinancialTransaction::new(
            customer.id,
            TransactionType::Payment,
            700.0,
            date(2025, 3, 12),
        )
        .job(job.id),
    )
    .unwrap();
    let balance = repo.get_job_balance(job.id).unwrap().unwrap();
    assert_eq!(balance.remaining, 0.0);

    // Deleting the job keeps its transactions with a cleared link.
    repo.delete_job(job.id).unwrap();
    assert!(repo.get_job_by_id(job.id).unwrap().is_none());
    let transactions = repo
        .list_transactions(TransactionListQuery::new().customer(customer.id))
        .unwrap();
    assert_eq!(transactions.len(), 3);
    assert!(transactions.iter().all(|t| t.job_id.is_none()));
}

#[test]
fn test_customers_with_debt_ordering() {
    let test_db = common::TestDb::new("test_customers_with_debt.db");
    let repo = test_db.repo();

    repo.create_customers(&[
        NewCustomer::new("Small Debt".to_string(), None, "+905551110001".to_string(), None),
        NewCustomer::new("Big Debt".to_string(), None, "+905551110002".to_string(), None),
        NewCustomer::new("No Debt".to_string(), None, "+905551110003".to_string(), None),
    ])
    .unwrap();
    let (_, mut customers) = repo.list_customers(CustomerListQuery::new()).unwrap();
    customers.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    let (big, no, small) = (&customers[0], &customers[1], &customers[2]);
    assert_eq!(big.full_name, "Big Debt");

    for (customer, cost, paid) in [(small, 200.0, 50.0), (big, 900.0, 100.0), (no, 300.0, 300.0)] {
        let job = repo
            .create_job(
                &NewJob {
                    customer_id: customer.id,
                    vehicle_id: None,
                    technician_id: None,
                    job_description: "Service".to_string(),
                    job_date: date(2025, 5, 1),
                    total_cost: cost,
                    status: JobStatus::Open,
                    notes: None,
                },
                &[],
            )
            .unwrap();
        repo.create_transaction(
            &NewFinancialTransaction::new(customer.id, TransactionType::Payment, paid, date(2025, 5, 2))
                .job(job.id),
        )
        .unwrap();
    }

    let debtors = repo.list_customers_with_debt().unwrap();
    assert_eq!(debtors.len(), 2);
    assert_eq!(debtors[0].customer.full_name, "Big Debt");
    assert_eq!(debtors[0].outstanding, 800.0);
    assert_eq!(debtors[1].outstanding, 150.0);
}

#[test]
fn test_transaction_filters() {
    let test_db = common::TestDb::new("test_transaction_filters.db");
    let repo = test_db.repo();

    repo.create_customers(&[NewCustomer::new(
        "Customer".to_string(),
        None,
        "+905551112233".to_string(),
        None,
    )])
    .unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new()).unwrap();
    let customer = &customers[0];

    for (kind, amount, day) in [
        (TransactionType::Payment, 100.0, 1),
        (TransactionType::Payment, 150.0, 15),
        (TransactionType::Refund, 30.0, 20),
    ] {
        repo.create_transaction(&NewFinancialTransaction::new(
            customer.id,
            kind,
            amount,
            date(2025, 6, day),
        ))
        .unwrap();
    }

    let payments = repo
        .list_transactions(
            TransactionListQuery::new().transaction_type(TransactionType::Payment),
        )
        .unwrap();
    assert_eq!(payments.len(), 2);
    // Newest first.
    assert_eq!(payments[0].amount, 150.0);

    let fetched = repo.get_transaction_by_id(payments[0].id).unwrap().unwrap();
    assert_eq!(fetched.amount, 150.0);
    assert_eq!(fetched.transaction_type, TransactionType::Payment);

    let june_first_half = repo
        .list_transactions(TransactionListQuery::new().range(
            servicetracker::domain::report::ReportRange::new(date(2025, 6, 1), date(2025, 6, 14)),
        ))
        .unwrap();
    assert_eq!(june_first_half.len(), 1);
    assert_eq!(june_first_half[0].amount, 100.0);
}

#[test]
fn test_appointment_repository_crud() {
    let test_db = common::TestDb::new("test_appointment_repository_crud.db");
    let repo = test_db.repo();

    repo.create_customers(&[NewCustomer::new(
        "Customer".to_string(),
        None,
        "+905551112233".to_string(),
        None,
    )])
    .unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new()).unwrap();
    let customer = &customers[0];
    let vehicle = repo
        .create_vehicle(&NewVehicle::new(
            customer.id,
            "Ford".to_string(),
            "Focus".to_string(),
            2021,
            "06 XYZ 42".to_string(),
            None,
            None,
        ))
        .unwrap();

    let monday_morning = date(2025, 8, 4).and_hms_opt(9, 30, 0).unwrap();
    let created = repo
        .create_appointment(&NewAppointment {
            customer_id: customer.id,
            vehicle_id: vehicle.id,
            appointment_date: monday_morning,
            status: AppointmentStatus::Pending,
            service_type: ServiceType::Inspection,
            notes: None,
        })
        .unwrap();
    assert_eq!(created.status, AppointmentStatus::Pending);

    let fetched = repo.get_appointment_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched.service_type, ServiceType::Inspection);

    // Same day window finds it, the next day does not.
    let (total, _) = repo
        .list_appointments(AppointmentListQuery::new().between(
            date(2025, 8, 4).and_hms_opt(0, 0, 0).unwrap(),
            date(2025, 8, 4).and_hms_opt(23, 59, 59).unwrap(),
        ))
        .unwrap();
    assert_eq!(total, 1);
    let (none_total, _) = repo
        .list_appointments(AppointmentListQuery::new().between(
            date(2025, 8, 5).and_hms_opt(0, 0, 0).unwrap(),
            date(2025, 8, 5).and_hms_opt(23, 59, 59).unwrap(),
        ))
        .unwrap();
    assert_eq!(none_total, 0);

    let updated = repo
        .update_appointment(
            created.id,
            &UpdateAppointment {
                appointment_date: monday_morning,
                status: AppointmentStatus::Completed,
                service_type: ServiceType::Inspection,
                notes: Some("done".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.status, AppointmentStatus::Completed);

    let (completed_total, _) = repo
        .list_appointments(AppointmentListQuery::new().status(AppointmentStatus::Completed))
        .unwrap();
    assert_eq!(completed_total, 1);

    repo.delete_appointment(created.id).unwrap();
    assert!(repo.get_appointment_by_id(created.id).unwrap().is_none());
}

#[test]
fn test_technician_repository_crud() {
    let test_db = common::TestDb::new("test_technician_repository_crud.db");
    let repo = test_db.repo();

    let technician = repo
        .create_technician(&NewTechnician::new(
            "Usta Mehmet".to_string(),
            None,
            None,
            Some("Engine".to_string()),
        ))
        .unwrap();
    assert!(technician.is_active);

    let mut updates = servicetracker::domain::technician::UpdateTechnician {
        name: technician.name.clone(),
        email: None,
        phone: None,
        specialty: technician.specialty.clone(),
        is_active: false,
    };
    let updated = repo.update_technician(technician.id, &updates).unwrap();
    assert!(!updated.is_active);

    assert!(repo.list_technicians(true).unwrap().is_empty());
    assert_eq!(repo.list_technicians(false).unwrap().len(), 1);

    updates.is_active = true;
    repo.update_technician(technician.id, &updates).unwrap();
    assert_eq!(repo.list_technicians(true).unwrap().len(), 1);

    repo.delete_technician(technician.id).unwrap();
    assert!(repo.get_technician_by_id(technician.id).unwrap().is_none());
}

#[test]
fn test_job_list_filters() {
    let test_db = common::TestDb::new("test_job_list_filters.db");
    let repo = test_db.repo();

    repo.create_customers(&[NewCustomer::new(
        "Customer".to_string(),
        None,
        "+905551112233".to_string(),
        None,
    )])
    .unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new()).unwrap();
    let customer = &customers[0];

    for (day, status) in [
        (1, JobStatus::Open),
        (10, JobStatus::Paid),
        (20, JobStatus::Cancelled),
    ] {
        repo.create_job(
            &NewJob {
                customer_id: customer.id,
                vehicle_id: None,
                technician_id: None,
                job_description: format!("Job {day}"),
                job_date: date(2025, 7, day),
                total_cost: 100.0,
                status,
                notes: None,
            },
            &[],
        )
        .unwrap();
    }

    let (total, _) = repo.list_jobs(JobListQuery::new()).unwrap();
    assert_eq!(total, 3);

    let (paid_total, paid) = repo
        .list_jobs(JobListQuery::new().status(JobStatus::Paid))
        .unwrap();
    assert_eq!(paid_total, 1);
    assert_eq!(paid[0].job_date, date(2025, 7, 10));

    let (range_total, _) = repo
        .list_jobs(JobListQuery::new().range(
            servicetracker::domain::report::ReportRange::new(date(2025, 7, 5), date(2025, 7, 15)),
        ))
        .unwrap();
    assert_eq!(range_total, 1);

    let with_customers = repo
        .list_jobs_with_customers(JobListQuery::new())
        .unwrap();
    assert_eq!(with_customers.len(), 3);
    assert_eq!(with_customers[0].1.full_name, "Customer");
}
