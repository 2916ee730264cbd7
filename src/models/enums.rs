//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// Operational status of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum RoomStatus {
    Available = 1,
    Occupied = 2,
    Reserved = 3,
    OutOfOrder = 4,
    UnderMaintenance = 5,
}

impl TryFrom<i16> for RoomStatus {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(RoomStatus::Available),
            2 => Ok(RoomStatus::Occupied),
            3 => Ok(RoomStatus::Reserved),
            4 => Ok(RoomStatus::OutOfOrder),
            5 => Ok(RoomStatus::UnderMaintenance),
            _ => Err(format!("Invalid room status: {}", v)),
        }
    }
}

impl From<RoomStatus> for i16 {
    fn from(s: RoomStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RoomStatus::Available => "Available",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Reserved => "Reserved",
            RoomStatus::OutOfOrder => "Out of Order",
            RoomStatus::UnderMaintenance => "Under Maintenance",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum ReservationStatus {
    Pending = 1,
    Confirmed = 2,
    CheckedIn = 3,
    CheckedOut = 4,
    Cancelled = 5,
}

impl TryFrom<i16> for ReservationStatus {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(ReservationStatus::Pending),
            2 => Ok(ReservationStatus::Confirmed),
            3 => Ok(ReservationStatus::CheckedIn),
            4 => Ok(ReservationStatus::CheckedOut),
            5 => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Invalid reservation status: {}", v)),
        }
    }
}

impl From<ReservationStatus> for i16 {
    fn from(s: ReservationStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::CheckedIn => "Checked In",
            ReservationStatus::CheckedOut => "Checked Out",
            ReservationStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// BookingType
// ---------------------------------------------------------------------------

/// Whether a reservation targets one physical room or a room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    SpecificRoom,
    RoomType,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::SpecificRoom => "specific_room",
            BookingType::RoomType => "room_type",
        }
    }
}

impl std::fmt::Display for BookingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "specific_room" => Ok(BookingType::SpecificRoom),
            "room_type" => Ok(BookingType::RoomType),
            _ => Err(format!("Invalid booking type: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// MaintenanceStatus
// ---------------------------------------------------------------------------

/// Status of a maintenance log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum MaintenanceStatus {
    Pending = 1,
    InProgress = 2,
    Completed = 3,
}

impl MaintenanceStatus {
    /// Room status forced by this maintenance status
    pub fn room_status_projection(&self) -> RoomStatus {
        match self {
            MaintenanceStatus::Pending => RoomStatus::UnderMaintenance,
            MaintenanceStatus::InProgress => RoomStatus::OutOfOrder,
            MaintenanceStatus::Completed => RoomStatus::Available,
        }
    }

    pub fn all() -> [MaintenanceStatus; 3] {
        [
            MaintenanceStatus::Pending,
            MaintenanceStatus::InProgress,
            MaintenanceStatus::Completed,
        ]
    }
}

impl TryFrom<i16> for MaintenanceStatus {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(MaintenanceStatus::Pending),
            2 => Ok(MaintenanceStatus::InProgress),
            3 => Ok(MaintenanceStatus::Completed),
            _ => Err(format!("Invalid maintenance status: {}", v)),
        }
    }
}

impl From<MaintenanceStatus> for i16 {
    fn from(s: MaintenanceStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MaintenanceStatus::Pending => "Pending",
            MaintenanceStatus::InProgress => "In Progress",
            MaintenanceStatus::Completed => "Completed",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Verification status of an advance payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum PaymentStatus {
    Pending = 1,
    Verified = 2,
    Rejected = 3,
}

impl TryFrom<i16> for PaymentStatus {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(PaymentStatus::Pending),
            2 => Ok(PaymentStatus::Verified),
            3 => Ok(PaymentStatus::Rejected),
            _ => Err(format!("Invalid payment status: {}", v)),
        }
    }
}

impl From<PaymentStatus> for i16 {
    fn from(s: PaymentStatus) -> Self {
        s as i16
    }
}

// ---------------------------------------------------------------------------
// OtpPurpose
// ---------------------------------------------------------------------------

/// The context a one-time code was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Login,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Login => "login",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }
}

impl std::fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(OtpPurpose::Login),
            "password_reset" => Ok(OtpPurpose::PasswordReset),
            _ => Err(format!("Invalid OTP purpose: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// EmployeeRole
// ---------------------------------------------------------------------------

/// Employee role, scoping dashboard access and permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Admin,
    FrontDesk,
    Handyman,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Admin => "admin",
            EmployeeRole::FrontDesk => "front_desk",
            EmployeeRole::Handyman => "handyman",
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(EmployeeRole::Admin),
            "front_desk" => Ok(EmployeeRole::FrontDesk),
            "handyman" => Ok(EmployeeRole::Handyman),
            _ => Err(format!("Invalid employee role: {}", s)),
        }
    }
}

impl From<String> for EmployeeRole {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(EmployeeRole::FrontDesk)
    }
}

impl From<EmployeeRole> for String {
    fn from(r: EmployeeRole) -> Self {
        r.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_status_projects_to_room_status() {
        assert_eq!(
            MaintenanceStatus::Pending.room_status_projection(),
            RoomStatus::UnderMaintenance
        );
        assert_eq!(
            MaintenanceStatus::InProgress.room_status_projection(),
            RoomStatus::OutOfOrder
        );
        assert_eq!(
            MaintenanceStatus::Completed.room_status_projection(),
            RoomStatus::Available
        );
    }

    #[test]
    fn room_status_round_trips() {
        for v in 1..=5i16 {
            let status = RoomStatus::try_from(v).unwrap();
            assert_eq!(i16::from(status), v);
        }
        assert!(RoomStatus::try_from(0).is_err());
        assert!(RoomStatus::try_from(6).is_err());
    }

    #[test]
    fn booking_type_parses() {
        assert_eq!(
            "specific_room".parse::<BookingType>().unwrap(),
            BookingType::SpecificRoom
        );
        assert_eq!(
            "room_type".parse::<BookingType>().unwrap(),
            BookingType::RoomType
        );
        assert!("suite".parse::<BookingType>().is_err());
    }
}
