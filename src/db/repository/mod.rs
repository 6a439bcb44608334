//! Repository layer: entity-scoped database operations.
//!
//! Free functions over a plain `Connection`; absent rows come back as
//! `Ok(None)` / `Ok(false)`, never as errors.

mod appointment;
mod patient;

// Re-export all public items from sub-modules
pub use appointment::*;
pub use patient::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rusqlite::Connection;
    use uuid::Uuid;

    use crate::db::sqlite::open_memory_database;
    use crate::models::enums::AppointmentStatus;
    use crate::models::{Appointment, AppointmentFilter, Patient, PatientFields};

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn make_patient(conn: &Connection, last_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        insert_patient(
            conn,
            &Patient {
                id,
                first_name: "Ada".into(),
                last_name: last_name.into(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
                contact_number: "+44 20 7946 0958".into(),
                appointments: vec![],
            },
        )
        .unwrap();
        id
    }

    fn make_appointment(conn: &Connection, patient_id: Uuid, when: &str) -> Uuid {
        let id = Uuid::new_v4();
        insert_appointment(
            conn,
            &Appointment {
                id,
                appointment_date_time: NaiveDateTime::parse_from_str(when, "%Y-%m-%d %H:%M:%S")
                    .unwrap(),
                reason_for_visit: "Annual checkup".into(),
                status: AppointmentStatus::Scheduled,
                patient_id,
            },
        )
        .unwrap();
        id
    }

    #[test]
    fn patient_insert_and_retrieve() {
        let conn = test_db();
        let id = make_patient(&conn, "Lovelace");

        let patient = get_patient(&conn, &id).unwrap().unwrap();
        assert_eq!(patient.id, id);
        assert_eq!(patient.first_name, "Ada");
        assert_eq!(patient.last_name, "Lovelace");
        assert_eq!(
            patient.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 12, 10).unwrap()
        );
        assert_eq!(patient.contact_number, "+44 20 7946 0958");
        assert!(patient.appointments.is_empty());
    }

    #[test]
    fn get_patient_absent_returns_none() {
        let conn = test_db();
        assert!(get_patient(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn patient_update_replaces_scalar_fields() {
        let conn = test_db();
        let id = make_patient(&conn, "Lovelace");

        let changed = update_patient(
            &conn,
            &id,
            &PatientFields {
                first_name: "Augusta".into(),
                last_name: "King".into(),
                date_of_birth: NaiveDate::from_ymd_opt(1985, 6, 1).unwrap(),
                contact_number: "+44 20 0000 0000".into(),
            },
        )
        .unwrap();
        assert!(changed);

        let patient = get_patient(&conn, &id).unwrap().unwrap();
        assert_eq!(patient.id, id);
        assert_eq!(patient.first_name, "Augusta");
        assert_eq!(patient.last_name, "King");
    }

    #[test]
    fn patient_update_absent_returns_false() {
        let conn = test_db();
        let changed = update_patient(
            &conn,
            &Uuid::new_v4(),
            &PatientFields {
                first_name: "No".into(),
                last_name: "One".into(),
                date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                contact_number: "000".into(),
            },
        )
        .unwrap();
        assert!(!changed);
    }

    #[test]
    fn list_patients_carries_derived_index() {
        let conn = test_db();
        let zuse = make_patient(&conn, "Zuse");
        let aiken = make_patient(&conn, "Aiken");
        make_appointment(&conn, zuse, "2026-03-01 10:30:00");
        make_appointment(&conn, zuse, "2026-04-01 09:00:00");

        let patients = list_patients(&conn).unwrap();
        assert_eq!(patients.len(), 2);
        // Ordered by last name
        assert_eq!(patients[0].id, aiken);
        assert!(patients[0].appointments.is_empty());
        assert_eq!(patients[1].id, zuse);
        assert_eq!(patients[1].appointments.len(), 2);
    }

    #[test]
    fn derived_index_ordered_by_visit_time() {
        let conn = test_db();
        let patient = make_patient(&conn, "Lovelace");
        let later = make_appointment(&conn, patient, "2026-06-15 14:00:00");
        let earlier = make_appointment(&conn, patient, "2026-02-01 08:30:00");

        let ids = appointment_ids_for_patient(&conn, &patient).unwrap();
        assert_eq!(ids, vec![earlier, later]);

        let fetched = get_patient(&conn, &patient).unwrap().unwrap();
        assert_eq!(fetched.appointments, vec![earlier, later]);
    }

    #[test]
    fn appointment_insert_and_retrieve() {
        let conn = test_db();
        let patient = make_patient(&conn, "Lovelace");
        let id = make_appointment(&conn, patient, "2026-03-01 10:30:00");

        let appt = get_appointment(&conn, &id).unwrap().unwrap();
        assert_eq!(appt.id, id);
        assert_eq!(appt.patient_id, patient);
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.reason_for_visit, "Annual checkup");
        assert_eq!(
            appt.appointment_date_time,
            NaiveDateTime::parse_from_str("2026-03-01 10:30:00", "%Y-%m-%d %H:%M:%S").unwrap()
        );
    }

    #[test]
    fn appointment_round_trip_keeps_fractional_seconds() {
        let conn = test_db();
        let patient = make_patient(&conn, "Lovelace");

        let precise = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_milli_opt(10, 30, 0, 250)
            .unwrap();
        let id = Uuid::new_v4();
        insert_appointment(
            &conn,
            &Appointment {
                id,
                appointment_date_time: precise,
                reason_for_visit: "Annual checkup".into(),
                status: AppointmentStatus::Scheduled,
                patient_id: patient,
            },
        )
        .unwrap();

        let appt = get_appointment(&conn, &id).unwrap().unwrap();
        assert_eq!(appt.appointment_date_time, precise);

        // Sub-second values sort chronologically among whole-second ones
        let whole = make_appointment(&conn, patient, "2026-03-01 10:30:00");
        let later = make_appointment(&conn, patient, "2026-03-01 10:30:01");
        let all = list_appointments(&conn, &AppointmentFilter::default()).unwrap();
        let order: Vec<Uuid> = all.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![whole, id, later]);
    }

    #[test]
    fn appointment_requires_existing_patient() {
        let conn = test_db();
        let result = insert_appointment(
            &conn,
            &Appointment {
                id: Uuid::new_v4(),
                appointment_date_time: NaiveDateTime::parse_from_str(
                    "2026-03-01 10:30:00",
                    "%Y-%m-%d %H:%M:%S",
                )
                .unwrap(),
                reason_for_visit: "Orphan".into(),
                status: AppointmentStatus::Scheduled,
                patient_id: Uuid::new_v4(), // Non-existent patient
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn cascade_delete_removes_all_appointments() {
        let mut conn = test_db();
        let keep = make_patient(&conn, "Aiken");
        let gone = make_patient(&conn, "Zuse");
        let kept_appt = make_appointment(&conn, keep, "2026-01-10 09:00:00");
        let a1 = make_appointment(&conn, gone, "2026-02-01 09:00:00");
        let a2 = make_appointment(&conn, gone, "2026-02-02 09:00:00");
        let a3 = make_appointment(&conn, gone, "2026-02-03 09:00:00");

        let removed = delete_patient_cascade(&mut conn, &gone).unwrap();
        assert_eq!(removed, Some(3));

        assert!(get_patient(&conn, &gone).unwrap().is_none());
        for id in [a1, a2, a3] {
            assert!(get_appointment(&conn, &id).unwrap().is_none());
        }

        // Unrelated records untouched
        assert!(get_patient(&conn, &keep).unwrap().is_some());
        assert!(get_appointment(&conn, &kept_appt).unwrap().is_some());
        assert_eq!(count_appointments(&conn).unwrap(), 1);
    }

    #[test]
    fn cascade_delete_absent_patient_returns_none() {
        let mut conn = test_db();
        let removed = delete_patient_cascade(&mut conn, &Uuid::new_v4()).unwrap();
        assert_eq!(removed, None);
    }

    #[test]
    fn delete_appointment_twice_reports_absent() {
        let conn = test_db();
        let patient = make_patient(&conn, "Lovelace");
        let id = make_appointment(&conn, patient, "2026-03-01 10:30:00");

        assert!(delete_appointment(&conn, &id).unwrap());
        assert!(!delete_appointment(&conn, &id).unwrap());
    }

    #[test]
    fn list_appointments_filters_by_status_and_patient() {
        let conn = test_db();
        let p1 = make_patient(&conn, "Aiken");
        let p2 = make_patient(&conn, "Zuse");
        let scheduled = make_appointment(&conn, p1, "2026-03-01 10:30:00");
        let completed = Uuid::new_v4();
        insert_appointment(
            &conn,
            &Appointment {
                id: completed,
                appointment_date_time: NaiveDateTime::parse_from_str(
                    "2026-01-05 11:00:00",
                    "%Y-%m-%d %H:%M:%S",
                )
                .unwrap(),
                reason_for_visit: "Follow-up".into(),
                status: AppointmentStatus::Completed,
                patient_id: p2,
            },
        )
        .unwrap();

        let all = list_appointments(&conn, &AppointmentFilter::default()).unwrap();
        assert_eq!(all.len(), 2);
        // Chronological order
        assert_eq!(all[0].id, completed);
        assert_eq!(all[1].id, scheduled);

        let only_scheduled = list_appointments(
            &conn,
            &AppointmentFilter {
                status: Some(AppointmentStatus::Scheduled),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(only_scheduled.len(), 1);
        assert_eq!(only_scheduled[0].id, scheduled);

        let for_p2 = list_appointments(
            &conn,
            &AppointmentFilter {
                patient_id: Some(p2),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(for_p2.len(), 1);
        assert_eq!(for_p2[0].id, completed);

        let none = list_appointments(
            &conn,
            &AppointmentFilter {
                status: Some(AppointmentStatus::Cancelled),
                patient_id: Some(p1),
            },
        )
        .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn update_appointment_reassigns_to_existing_patient() {
        let conn = test_db();
        let from = make_patient(&conn, "Aiken");
        let to = make_patient(&conn, "Zuse");
        let id = make_appointment(&conn, from, "2026-03-01 10:30:00");

        let appt = get_appointment(&conn, &id).unwrap().unwrap();
        let changed = update_appointment(
            &conn,
            &id,
            &crate::models::AppointmentFields {
                appointment_date_time: appt.appointment_date_time,
                reason_for_visit: "Transferred".into(),
                status: AppointmentStatus::Scheduled,
                patient_id: to,
            },
        )
        .unwrap();
        assert!(changed);

        let after = get_appointment(&conn, &id).unwrap().unwrap();
        assert_eq!(after.patient_id, to);
        assert_eq!(after.reason_for_visit, "Transferred");
        assert_eq!(appointment_ids_for_patient(&conn, &from).unwrap().len(), 0);
        assert_eq!(appointment_ids_for_patient(&conn, &to).unwrap(), vec![id]);
    }

    #[test]
    fn update_appointment_to_missing_patient_errors() {
        let conn = test_db();
        let patient = make_patient(&conn, "Lovelace");
        let id = make_appointment(&conn, patient, "2026-03-01 10:30:00");

        let result = update_appointment(
            &conn,
            &id,
            &crate::models::AppointmentFields {
                appointment_date_time: NaiveDateTime::parse_from_str(
                    "2026-03-01 10:30:00",
                    "%Y-%m-%d %H:%M:%S",
                )
                .unwrap(),
                reason_for_visit: "Orphaning attempt".into(),
                status: AppointmentStatus::Scheduled,
                patient_id: Uuid::new_v4(),
            },
        );
        assert!(result.is_err());

        // The row is unchanged
        let after = get_appointment(&conn, &id).unwrap().unwrap();
        assert_eq!(after.patient_id, patient);
    }

    #[test]
    fn appointments_for_patient_returns_full_records() {
        let conn = test_db();
        let patient = make_patient(&conn, "Lovelace");
        make_appointment(&conn, patient, "2026-05-01 10:00:00");
        make_appointment(&conn, patient, "2026-04-01 10:00:00");

        let records = appointments_for_patient(&conn, &patient).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].appointment_date_time < records[1].appointment_date_time);
        assert!(records.iter().all(|a| a.patient_id == patient));
    }
}
