use serde::{Deserialize, Serialize};

/// Macro to generate an integer-code enum with a total `from_code` mapping.
///
/// The backend speaks in small integer codes; the console maps them to
/// labels. Codes outside the table fold into `Unknown(i32)` so a new
/// backend code can never break a listing.
macro_rules! code_enum {
    ($name:ident, $unknown_label:literal { $($variant:ident = $code:literal => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "i32", into = "i32")]
        pub enum $name {
            $($variant,)+
            /// Code outside the known table — preserved for display and logs.
            Unknown(i32),
        }

        impl $name {
            pub fn from_code(code: i32) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            pub fn code(&self) -> i32 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => *code,
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Unknown(_) => $unknown_label,
                }
            }
        }

        impl From<i32> for $name {
            fn from(code: i32) -> Self {
                Self::from_code(code)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.code()
            }
        }
    };
}

code_enum!(StatusCode, "Unknown status" {
    Active = 100 => "Active",
    Inactive = 101 => "Inactive",
    Pending = 102 => "Pending",
    Completed = 103 => "Completed",
    Cancelled = 104 => "Cancelled",
    Approved = 105 => "Approved",
    Rejected = 106 => "Rejected",
});

code_enum!(Role, "Operator" {
    Admin = 100 => "Administrator",
    Scheduler = 101 => "Scheduler",
    BillingClerk = 102 => "Billing clerk",
});

impl Default for StatusCode {
    fn default() -> Self {
        Self::Active
    }
}

impl Role {
    /// Only administrators may manage system accounts.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_round_trip() {
        for (variant, code, label) in [
            (StatusCode::Active, 100, "Active"),
            (StatusCode::Inactive, 101, "Inactive"),
            (StatusCode::Pending, 102, "Pending"),
            (StatusCode::Completed, 103, "Completed"),
            (StatusCode::Cancelled, 104, "Cancelled"),
            (StatusCode::Approved, 105, "Approved"),
            (StatusCode::Rejected, 106, "Rejected"),
        ] {
            assert_eq!(StatusCode::from_code(code), variant);
            assert_eq!(variant.code(), code);
            assert_eq!(variant.label(), label);
        }
    }

    #[test]
    fn unknown_status_code_maps_to_deterministic_label() {
        for code in [0, 99, 107, 200, -1] {
            let status = StatusCode::from_code(code);
            assert_eq!(status, StatusCode::Unknown(code));
            assert_eq!(status.label(), "Unknown status");
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn status_code_deserializes_from_wire_integer() {
        let status: StatusCode = serde_json::from_str("102").unwrap();
        assert_eq!(status, StatusCode::Pending);

        let unknown: StatusCode = serde_json::from_str("999").unwrap();
        assert_eq!(unknown, StatusCode::Unknown(999));
    }

    #[test]
    fn status_code_serializes_to_wire_integer() {
        assert_eq!(serde_json::to_string(&StatusCode::Completed).unwrap(), "103");
        assert_eq!(serde_json::to_string(&StatusCode::Unknown(42)).unwrap(), "42");
    }

    #[test]
    fn role_admin_check() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Scheduler.is_admin());
        assert!(!Role::Unknown(105).is_admin());
    }

    #[test]
    fn unknown_role_labels_as_operator() {
        assert_eq!(Role::from_code(205).label(), "Operator");
    }
}
