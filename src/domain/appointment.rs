use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
    Other(String),
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "Pending"),
            AppointmentStatus::Confirmed => write!(f, "Confirmed"),
            AppointmentStatus::InProgress => write!(f, "InProgress"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Delivered => write!(f, "Delivered"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
            AppointmentStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => AppointmentStatus::Pending,
            "Confirmed" => AppointmentStatus::Confirmed,
            "InProgress" => AppointmentStatus::InProgress,
            "Completed" => AppointmentStatus::Completed,
            "Delivered" => AppointmentStatus::Delivered,
            "Cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ServiceType {
    Periodic,
    Repair,
    Inspection,
    Other(String),
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceType::Periodic => write!(f, "Periodic"),
            ServiceType::Repair => write!(f, "Repair"),
            ServiceType::Inspection => write!(f, "Inspection"),
            ServiceType::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ServiceType {
    fn from(s: &str) -> Self {
        match s {
            "Periodic" => ServiceType::Periodic,
            "Repair" => ServiceType::Repair,
            "Inspection" => ServiceType::Inspection,
            _ => ServiceType::Other(s.to_string()),
        }
    }
}

impl From<String> for ServiceType {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub appointment_date: NaiveDateTime,
    pub status: AppointmentStatus,
    pub service_type: ServiceType,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAppointment {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub appointment_date: NaiveDateTime,
    pub status: AppointmentStatus,
    pub service_type: ServiceType,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateAppointment {
    pub appointment_date: NaiveDateTime,
    pub status: AppointmentStatus,
    pub service_type: ServiceType,
    pub notes: Option<String>,
}
