use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(AppointmentStatus {
    Scheduled => "SCHEDULED",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
});

impl AppointmentStatus {
    /// Canonical value list, used by validation messages.
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn appointment_status_round_trip() {
        for (variant, s) in [
            (AppointmentStatus::Scheduled, "SCHEDULED"),
            (AppointmentStatus::Completed, "COMPLETED"),
            (AppointmentStatus::Cancelled, "CANCELLED"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AppointmentStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn appointment_status_serializes_to_canonical_string() {
        let json = serde_json::to_string(&AppointmentStatus::Scheduled).unwrap();
        assert_eq!(json, "\"SCHEDULED\"");
        let back: AppointmentStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(back, AppointmentStatus::Cancelled);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(AppointmentStatus::from_str("scheduled").is_err());
        assert!(AppointmentStatus::from_str("DONE").is_err());
        assert!(AppointmentStatus::from_str("").is_err());
    }
}
