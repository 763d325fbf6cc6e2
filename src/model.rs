//! Patient record model
//!
//! `PATIENT_COLUMNS` is the single source of column order. Queries select
//! these columns explicitly and row mapping reads them back by name, so the
//! SQL and the field mapping cannot drift apart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A selected column: name plus the SQL type it is cast to on read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
}

const fn column(name: &'static str, sql_type: &'static str) -> Column {
    Column { name, sql_type }
}

/// Fixed column order of the `patients` table
pub const PATIENT_COLUMNS: [Column; 16] = [
    column("id", "int8"),
    column("name", "text"),
    column("age", "int8"),
    column("gender", "text"),
    column("blood_type", "text"),
    column("medical_condition", "text"),
    column("date_of_admission", "date"),
    column("doctor", "text"),
    column("hospital", "text"),
    column("insurance_provider", "text"),
    column("billing_amount", "float8"),
    column("room_number", "int8"),
    column("admission_type", "text"),
    column("discharge_date", "date"),
    column("medication", "text"),
    column("test_results", "text"),
];

/// Column names in table order
pub fn column_names() -> [&'static str; 16] {
    PATIENT_COLUMNS.map(|c| c.name)
}

/// Render the explicit select list, e.g. `id::int8 AS id, name::text AS name, ...`
pub fn select_list() -> String {
    PATIENT_COLUMNS
        .iter()
        .map(|c| format!("{name}::{ty} AS {name}", name = c.name, ty = c.sql_type))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One row of the `patients` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub blood_type: String,
    /// NULL in the table comes through as `None`
    pub medical_condition: Option<String>,
    pub date_of_admission: NaiveDate,
    pub doctor: String,
    pub hospital: String,
    pub insurance_provider: String,
    pub billing_amount: f64,
    pub room_number: i64,
    pub admission_type: String,
    pub discharge_date: NaiveDate,
    pub medication: String,
    pub test_results: String,
}

impl PatientRecord {
    /// Display values in `PATIENT_COLUMNS` order; a missing condition is empty
    pub fn cells(&self) -> [String; 16] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.age.to_string(),
            self.gender.clone(),
            self.blood_type.clone(),
            self.medical_condition.clone().unwrap_or_default(),
            self.date_of_admission.format("%Y-%m-%d").to_string(),
            self.doctor.clone(),
            self.hospital.clone(),
            self.insurance_provider.clone(),
            format!("{:.2}", self.billing_amount),
            self.room_number.to_string(),
            self.admission_type.clone(),
            self.discharge_date.format("%Y-%m-%d").to_string(),
            self.medication.clone(),
            self.test_results.clone(),
        ]
    }
}

/// Frequency of one medical condition across the whole table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionFrequency {
    /// `None` groups the rows whose condition is NULL
    pub medical_condition: Option<String>,
    pub count: u64,
    pub probability: f64,
}

#[cfg(test)]
pub(crate) fn sample_record(id: i64, condition: &str) -> PatientRecord {
    let admitted = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    PatientRecord {
        id,
        name: format!("Patient {}", id),
        age: 40,
        gender: "Female".to_string(),
        blood_type: "O+".to_string(),
        medical_condition: Some(condition.to_string()),
        date_of_admission: admitted,
        doctor: "Dr. Grey".to_string(),
        hospital: "General".to_string(),
        insurance_provider: "Aetna".to_string(),
        billing_amount: 1234.5,
        room_number: 101,
        admission_type: "Urgent".to_string(),
        discharge_date: admitted + chrono::Days::new(5),
        medication: "Aspirin".to_string(),
        test_results: "Normal".to_string(),
    }
}
