//! # Seed Fixtures
//!
//! The sample collections a fresh session starts with.
//!
//! Each function returns a new `Vec`, so callers can mutate their copy
//! freely. Dates are written the way the dashboard shows them and parsed
//! on load; `test_fixture_dates_parse` guards the literals.

use chrono::{NaiveDate, NaiveDateTime};

use crate::status::{
    AdmissionStatus, AmbulanceStatus, BedStatus, CasePriority, DischargeStatus, EmergencyStatus,
    PatientStatus, RecordStatus, RequestPriority, StaffStatus, SurgeryPriority, SurgeryStatus,
};
use crate::types::{
    Admission, Ambulance, Bed, BloodUnit, Discharge, EmergencyCase, EmergencyRequest, Equipment,
    MedicalRecord, Medication, OxygenStock, Patient, RequestPatient, StaffMember, Surgery,
};
use crate::validation::{DATE_FORMAT, MINUTE_FORMAT};

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, DATE_FORMAT).unwrap_or_default()
}

fn stamp(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, MINUTE_FORMAT).unwrap_or_default()
}

fn s(text: &str) -> String {
    text.to_string()
}

// =============================================================================
// Resources
// =============================================================================

pub fn beds() -> Vec<Bed> {
    let bed = |id: &str, name: &str, ward: &str, status, ventilator, patient: Option<&str>| Bed {
        id: s(id),
        name: s(name),
        ward: s(ward),
        status,
        ventilator,
        patient: patient.map(s),
    };

    vec![
        bed("1", "ICU-01", "ICU", BedStatus::Occupied, true, Some("John Doe")),
        bed("2", "ICU-02", "ICU", BedStatus::Available, true, None),
        bed("3", "ICU-03", "ICU", BedStatus::Cleaning, false, None),
        bed("4", "ICU-04", "ICU", BedStatus::Available, true, None),
        bed("5", "ICU-05", "ICU", BedStatus::Occupied, false, Some("Jane Smith")),
        bed("6", "CCU-01", "CCU", BedStatus::Available, true, None),
        bed("7", "CCU-02", "CCU", BedStatus::Blocked, false, None),
        bed("8", "CCU-03", "CCU", BedStatus::Occupied, true, Some("Mike Johnson")),
    ]
}

pub fn blood_units() -> Vec<BloodUnit> {
    [
        ("A+", 45, 20),
        ("A-", 12, 15),
        ("B+", 38, 20),
        ("B-", 8, 15),
        ("AB+", 22, 15),
        ("AB-", 5, 10),
        ("O+", 67, 25),
        ("O-", 18, 20),
    ]
    .into_iter()
    .map(|(blood_type, units, threshold)| BloodUnit {
        blood_type: s(blood_type),
        units,
        threshold,
        component: s("Whole Blood"),
    })
    .collect()
}

pub fn oxygen_stock() -> Vec<OxygenStock> {
    [
        ("1", "Oxygen Cylinder", "D", 24, 8, 3, 15),
        ("2", "Oxygen Cylinder", "E", 18, 12, 2, 12),
        ("3", "Oxygen Cylinder", "M", 8, 4, 1, 8),
        ("4", "Liquid Oxygen Tank", "Large", 5, 2, 0, 3),
    ]
    .into_iter()
    .map(
        |(id, supply_type, size, available, in_use, refilling, threshold)| OxygenStock {
            id: s(id),
            supply_type: s(supply_type),
            size: s(size),
            available,
            in_use,
            refilling,
            threshold,
        },
    )
    .collect()
}

pub fn equipment() -> Vec<Equipment> {
    [
        ("1", "Ventilators", 8, 7, 0, 15),
        ("2", "Monitors", 12, 18, 2, 32),
        ("3", "Infusion Pumps", 15, 20, 1, 36),
        ("4", "Defibrillators", 6, 2, 0, 8),
    ]
    .into_iter()
    .map(|(id, name, available, in_use, maintenance, total)| Equipment {
        id: s(id),
        name: s(name),
        available,
        in_use,
        maintenance,
        total,
    })
    .collect()
}

#[rustfmt::skip]
pub fn ambulances() -> Vec<Ambulance> {
    use AmbulanceStatus::*;

    [
        ("1", "AMB-001", "John Martinez", OnDuty, "Base Station", "1 min ago", None),
        ("2", "AMB-002", "Sarah Johnson", EnRoute, "En route to emergency", "30 sec ago", Some("2.3 miles")),
        ("3", "AMB-003", "Mike Chen", Dispatched, "Heading to pickup", "45 sec ago", Some("4.1 miles")),
        ("4", "AMB-004", "Emily Davis", OnDuty, "Base Station", "2 mins ago", None),
        ("5", "AMB-005", "Robert Wilson", Off, "Maintenance", "1 hour ago", None),
        ("6", "AMB-006", "Lisa Anderson", OnDuty, "Base Station", "3 mins ago", None),
    ]
    .into_iter()
    .map(
        |(id, vehicle_id, driver, status, location, last_ping, distance)| Ambulance {
            id: s(id),
            vehicle_id: s(vehicle_id),
            driver: s(driver),
            status,
            location: s(location),
            last_ping: s(last_ping),
            distance: distance.map(s),
        },
    )
    .collect()
}

pub fn surgeries() -> Vec<Surgery> {
    vec![
        Surgery {
            id: s("S001"),
            patient_name: s("John Smith"),
            procedure: s("Appendectomy"),
            surgeon: s("Dr. Johnson"),
            scheduled_time: stamp("2024-01-15 09:00"),
            duration: s("2 hours"),
            status: SurgeryStatus::Scheduled,
            room: s("OR-1"),
            priority: SurgeryPriority::High,
        },
        Surgery {
            id: s("S002"),
            patient_name: s("Sarah Wilson"),
            procedure: s("Knee Replacement"),
            surgeon: s("Dr. Brown"),
            scheduled_time: stamp("2024-01-15 11:00"),
            duration: s("4 hours"),
            status: SurgeryStatus::Scheduled,
            room: s("OR-2"),
            priority: SurgeryPriority::Medium,
        },
        Surgery {
            id: s("S003"),
            patient_name: s("Mike Davis"),
            procedure: s("Gallbladder Removal"),
            surgeon: s("Dr. Lee"),
            scheduled_time: stamp("2024-01-15 14:00"),
            duration: s("3 hours"),
            status: SurgeryStatus::InProgress,
            room: s("OR-3"),
            priority: SurgeryPriority::Urgent,
        },
    ]
}

#[rustfmt::skip]
pub fn requests() -> Vec<EmergencyRequest> {
    use RequestPriority::*;

    let rows: [(&str, RequestPriority, &str, u32, &str, &str, &str, u32, &[&str]); 8] = [
        ("REQ-001", Critical, "Sarah Johnson", 45, "A+", "2.3", "2 mins ago", 120, &["ICU Bed", "Blood Transfusion"]),
        ("REQ-002", High, "Mike Chen", 62, "O-", "3.8", "5 mins ago", 115, &["Oxygen Support"]),
        ("REQ-003", Medium, "Emily Davis", 28, "B+", "5.2", "8 mins ago", 112, &["ICU Bed"]),
        ("REQ-004", Critical, "Robert Wilson", 67, "AB-", "1.8", "1 min ago", 119, &["ICU Bed", "Ventilator", "Blood Transfusion"]),
        ("REQ-005", High, "Lisa Martinez", 34, "O+", "4.1", "6 mins ago", 114, &["Oxygen Support", "ICU Bed"]),
        ("REQ-006", Medium, "David Thompson", 52, "B-", "6.7", "10 mins ago", 110, &["ICU Bed"]),
        ("REQ-007", Critical, "Anna Rodriguez", 29, "A-", "2.9", "3 mins ago", 117, &["Blood Transfusion", "ICU Bed"]),
        ("REQ-008", High, "James Brown", 71, "O-", "3.5", "7 mins ago", 113, &["Ventilator", "Oxygen Support"]),
    ];

    rows.into_iter()
        .map(
            |(id, priority, name, age, blood_type, distance, request_time, sla_minutes, resources)| {
                EmergencyRequest {
                    id: s(id),
                    priority,
                    patient: RequestPatient {
                        name: s(name),
                        age,
                        blood_type: s(blood_type),
                    },
                    location: format!("{distance} miles away"),
                    distance: s(distance),
                    request_time: s(request_time),
                    sla_minutes,
                    resources: resources.iter().map(|r| s(r)).collect(),
                }
            },
        )
        .collect()
}

// =============================================================================
// Record Screens
// =============================================================================

#[rustfmt::skip]
pub fn patients() -> Vec<Patient> {
    use PatientStatus as St;

    [
        ("P001", "John Smith", 45, "Male", "2024-01-15", St::Active, "ICU-101", "Myocardial Infarction", CasePriority::High, "+1-555-0123", "john.smith@email.com"),
        ("P002", "Sarah Johnson", 32, "Female", "2024-01-14", St::Recovering, "Ward-205", "Pneumonia", CasePriority::Medium, "+1-555-0124", "sarah.j@email.com"),
        ("P003", "Michael Brown", 67, "Male", "2024-01-13", St::Critical, "ICU-102", "Stroke", CasePriority::Critical, "+1-555-0125", "m.brown@email.com"),
        ("P004", "Emily Davis", 28, "Female", "2024-01-12", St::Discharged, "N/A", "Appendicitis", CasePriority::Low, "+1-555-0126", "emily.d@email.com"),
    ]
    .into_iter()
    .map(
        |(id, name, age, gender, admitted, status, room, diagnosis, priority, phone, email)| Patient {
            id: s(id),
            name: s(name),
            age,
            gender: s(gender),
            admission_date: day(admitted),
            status,
            room: s(room),
            diagnosis: s(diagnosis),
            priority,
            phone: s(phone),
            email: s(email),
        },
    )
    .collect()
}

#[rustfmt::skip]
pub fn staff() -> Vec<StaffMember> {
    const DAY_SHIFT: &str = "Day Shift (7 AM - 7 PM)";
    const NIGHT_SHIFT: &str = "Night Shift (7 PM - 7 AM)";

    [
        ("S001", "Dr. Sarah Miller", "Chief of Cardiology", "Cardiology", StaffStatus::OnDuty, DAY_SHIFT, "+1-555-1001", "sarah.miller@hospital.com", "15 years", "Interventional Cardiology", "Cardiology Ward", "2024-01-15 14:30"),
        ("S002", "Dr. Michael Brown", "Emergency Physician", "Emergency Medicine", StaffStatus::OnCall, NIGHT_SHIFT, "+1-555-1002", "michael.brown@hospital.com", "12 years", "Trauma Surgery", "Emergency Department", "2024-01-15 13:45"),
        ("S003", "Nurse Emily Davis", "Senior ICU Nurse", "Intensive Care", StaffStatus::OnDuty, DAY_SHIFT, "+1-555-1003", "emily.davis@hospital.com", "8 years", "Critical Care Nursing", "ICU Ward", "2024-01-15 14:15"),
        ("S004", "Dr. James Wilson", "Orthopedic Surgeon", "Orthopedics", StaffStatus::OffDuty, DAY_SHIFT, "+1-555-1004", "james.wilson@hospital.com", "20 years", "Joint Replacement Surgery", "Surgery Department", "2024-01-15 12:00"),
    ]
    .into_iter()
    .map(
        |(id, name, role, department, status, shift, phone, email, experience, specialization, location, last_active)| {
            StaffMember {
                id: s(id),
                name: s(name),
                role: s(role),
                department: s(department),
                status,
                shift: s(shift),
                phone: s(phone),
                email: s(email),
                experience: s(experience),
                specialization: s(specialization),
                location: s(location),
                last_active: stamp(last_active),
            }
        },
    )
    .collect()
}

#[rustfmt::skip]
pub fn admissions() -> Vec<Admission> {
    use AdmissionStatus::*;

    [
        ("A001", "Robert Wilson", 58, "Male", "2024-01-15 14:30", Pending, CasePriority::High, "Chest Pain", "Cardiology", "Dr. Sarah Miller", "+1-555-0201", "Patient experiencing severe chest pain, requires immediate attention"),
        ("A002", "Lisa Anderson", 34, "Female", "2024-01-15 13:45", Approved, CasePriority::Medium, "Fractured Arm", "Orthopedics", "Dr. James Wilson", "+1-555-0202", "Fall from height, X-ray shows fracture in right arm"),
        ("A003", "David Thompson", 72, "Male", "2024-01-15 12:15", Rejected, CasePriority::Low, "Routine Checkup", "General Medicine", "Dr. Emily Brown", "+1-555-0203", "Patient requested admission for routine checkup, not medically necessary"),
        ("A004", "Maria Garcia", 29, "Female", "2024-01-15 11:20", Pending, CasePriority::Critical, "Severe Allergic Reaction", "Emergency", "Dr. Michael Davis", "+1-555-0204", "Anaphylactic shock, requires immediate ICU admission"),
    ]
    .into_iter()
    .map(
        |(id, patient_name, age, gender, time, status, priority, diagnosis, department, doctor, contact, notes)| {
            Admission {
                id: s(id),
                patient_name: s(patient_name),
                age,
                gender: s(gender),
                admission_time: stamp(time),
                status,
                priority,
                diagnosis: s(diagnosis),
                department: s(department),
                assigned_doctor: s(doctor),
                contact: s(contact),
                notes: s(notes),
            }
        },
    )
    .collect()
}

#[rustfmt::skip]
pub fn discharges() -> Vec<Discharge> {
    use DischargeStatus::*;

    [
        ("D001", "Emily Davis", 28, "Female", "2024-01-10", Ready, "Appendicitis", "Laparoscopic Appendectomy", "Ward-205", "Dr. Sarah Miller", "+1-555-0301", "emily.d@email.com", "Patient recovered well from surgery, no complications. Follow-up in 2 weeks."),
        ("D002", "James Wilson", 45, "Male", "2024-01-08", Processing, "Pneumonia", "Antibiotic Therapy", "Ward-301", "Dr. Michael Brown", "+1-555-0302", "james.w@email.com", "Pneumonia resolved with antibiotic treatment. Patient stable for discharge."),
        ("D003", "Lisa Anderson", 52, "Female", "2024-01-12", Completed, "Gallbladder Surgery", "Laparoscopic Cholecystectomy", "Ward-102", "Dr. Emily Davis", "+1-555-0303", "lisa.a@email.com", "Surgery successful, patient ready for discharge. Prescription provided."),
        ("D004", "Robert Thompson", 67, "Male", "2024-01-05", Ready, "Hip Fracture", "Hip Replacement Surgery", "Ward-401", "Dr. James Wilson", "+1-555-0304", "robert.t@email.com", "Hip replacement successful, patient mobile with assistance. Physical therapy scheduled."),
    ]
    .into_iter()
    .map(
        |(id, patient_name, age, gender, admitted, status, diagnosis, treatment, room, doctor, contact, email, notes)| {
            Discharge {
                id: s(id),
                patient_name: s(patient_name),
                age,
                gender: s(gender),
                admission_date: day(admitted),
                discharge_date: day("2024-01-15"),
                status,
                diagnosis: s(diagnosis),
                treatment: s(treatment),
                room: s(room),
                doctor: s(doctor),
                contact: s(contact),
                email: s(email),
                discharge_notes: s(notes),
            }
        },
    )
    .collect()
}

#[rustfmt::skip]
pub fn medical_records() -> Vec<MedicalRecord> {
    [
        ("MR001", "John Smith", "P001", "Medical History", "2024-01-15", "2024-01-15 14:30", RecordStatus::Active, "Cardiology", "Dr. Sarah Miller", "Complete medical history including previous heart conditions", 3),
        ("MR002", "Sarah Johnson", "P002", "Lab Results", "2024-01-14", "2024-01-14 16:45", RecordStatus::Active, "Laboratory", "Dr. Michael Brown", "Blood work and urine analysis results", 5),
        ("MR003", "Michael Brown", "P003", "Imaging Report", "2024-01-13", "2024-01-13 10:20", RecordStatus::Active, "Radiology", "Dr. Emily Davis", "CT scan and MRI results for stroke assessment", 2),
        ("MR004", "Emily Davis", "P004", "Surgery Report", "2024-01-12", "2024-01-12 18:15", RecordStatus::Archived, "Surgery", "Dr. James Wilson", "Appendectomy procedure documentation and post-op notes", 4),
    ]
    .into_iter()
    .map(
        |(id, patient_name, patient_id, record_type, created, updated, status, department, doctor, description, attachments)| {
            MedicalRecord {
                id: s(id),
                patient_name: s(patient_name),
                patient_id: s(patient_id),
                record_type: s(record_type),
                date_created: day(created),
                last_updated: stamp(updated),
                status,
                department: s(department),
                doctor: s(doctor),
                description: s(description),
                attachments,
                notes: String::new(),
            }
        },
    )
    .collect()
}

#[rustfmt::skip]
pub fn medications() -> Vec<Medication> {
    [
        ("MED001", "Morphine Sulfate", "Morphine", "Opioid Analgesic", 45, 20, 100, "vials", "2024-06-15", "MedSupply Corp", "2024-01-10", 12550),
        ("MED002", "Insulin Glargine", "Lantus", "Antidiabetic", 8, 15, 50, "vials", "2024-08-20", "PharmaDirect", "2024-01-05", 8999),
        ("MED003", "Ceftriaxone", "Rocephin", "Antibiotic", 0, 10, 30, "vials", "2024-05-10", "MedSupply Corp", "2024-01-01", 4575),
        ("MED004", "Lisinopril", "Prinivil", "ACE Inhibitor", 120, 25, 150, "tablets", "2025-02-28", "Generic Pharma", "2024-01-12", 1230),
    ]
    .into_iter()
    .map(
        |(id, name, generic_name, category, stock, min_stock, max_stock, unit, expiry, supplier, restocked, price_cents)| {
            Medication {
                id: s(id),
                name: s(name),
                generic_name: s(generic_name),
                category: s(category),
                stock,
                min_stock,
                max_stock,
                unit: s(unit),
                expiry_date: day(expiry),
                supplier: s(supplier),
                last_restocked: day(restocked),
                price_cents,
            }
        },
    )
    .collect()
}

#[rustfmt::skip]
pub fn emergency_cases() -> Vec<EmergencyCase> {
    use EmergencyStatus::*;

    [
        ("E001", "Robert Wilson", 58, "Male", "2024-01-15 14:30", CasePriority::Critical, "Chest Pain", "BP: 180/110, HR: 120, Temp: 98.6°F", "Dr. Sarah Miller", Active, "ER Room 1", "+1-555-0401", "Severe chest pain, possible MI. Immediate attention required."),
        ("E002", "Lisa Anderson", 34, "Female", "2024-01-15 13:45", CasePriority::High, "Severe Allergic Reaction", "BP: 90/60, HR: 140, Temp: 99.2°F", "Dr. Michael Brown", Stabilizing, "ER Room 2", "+1-555-0402", "Anaphylactic shock from food allergy. Epinephrine administered."),
        ("E003", "David Thompson", 72, "Male", "2024-01-15 12:15", CasePriority::High, "Stroke Symptoms", "BP: 160/95, HR: 85, Temp: 98.8°F", "Dr. Emily Davis", UnderObservation, "ER Room 3", "+1-555-0403", "Sudden onset of weakness and speech difficulty. CT scan ordered."),
        ("E004", "Maria Garcia", 29, "Female", "2024-01-15 11:20", CasePriority::Medium, "Severe Abdominal Pain", "BP: 110/70, HR: 95, Temp: 100.4°F", "Dr. James Wilson", WaitingForTests, "ER Room 4", "+1-555-0404", "Acute appendicitis suspected. Blood work and imaging in progress."),
    ]
    .into_iter()
    .map(
        |(id, patient_name, age, gender, arrival, priority, condition, vitals, doctor, status, location, contact, notes)| {
            EmergencyCase {
                id: s(id),
                patient_name: s(patient_name),
                age,
                gender: s(gender),
                arrival_time: stamp(arrival),
                priority,
                condition: s(condition),
                vital_signs: s(vitals),
                assigned_doctor: s(doctor),
                status,
                location: s(location),
                contact: s(contact),
                notes: s(notes),
            }
        },
    )
    .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::filter::Record;

    fn assert_unique_ids<R: Record>(records: &[R]) {
        let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), records.len(), "duplicate id in {} fixtures", R::KIND);
    }

    #[test]
    fn test_fixture_ids_unique() {
        assert_unique_ids(&beds());
        assert_unique_ids(&blood_units());
        assert_unique_ids(&oxygen_stock());
        assert_unique_ids(&equipment());
        assert_unique_ids(&ambulances());
        assert_unique_ids(&surgeries());
        assert_unique_ids(&requests());
        assert_unique_ids(&patients());
        assert_unique_ids(&staff());
        assert_unique_ids(&admissions());
        assert_unique_ids(&discharges());
        assert_unique_ids(&medical_records());
        assert_unique_ids(&medications());
        assert_unique_ids(&emergency_cases());
    }

    #[test]
    fn test_fixture_dates_parse() {
        let epoch = NaiveDateTime::default();
        assert!(surgeries().iter().all(|r| r.scheduled_time != epoch));
        assert!(staff().iter().all(|r| r.last_active != epoch));
        assert!(admissions().iter().all(|r| r.admission_time != epoch));
        assert!(emergency_cases().iter().all(|r| r.arrival_time != epoch));
        assert!(medical_records().iter().all(|r| r.last_updated != epoch));

        let epoch_day = NaiveDate::default();
        assert!(patients().iter().all(|r| r.admission_date != epoch_day));
        assert!(discharges().iter().all(|r| r.admission_date != epoch_day));
        assert!(medical_records().iter().all(|r| r.date_created != epoch_day));
        assert!(medications()
            .iter()
            .all(|r| r.expiry_date != epoch_day && r.last_restocked != epoch_day));
    }

    #[test]
    fn test_equipment_within_capacity() {
        for item in equipment() {
            assert!(item.available + item.in_use + item.maintenance <= item.total);
        }
    }

    #[test]
    fn test_sizes() {
        assert_eq!(beds().len(), 8);
        assert_eq!(blood_units().len(), 8);
        assert_eq!(ambulances().len(), 6);
        assert_eq!(requests().len(), 8);
    }
}
