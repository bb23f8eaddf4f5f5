//! Status and role enums shared by the storefront and admin APIs.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders move forward one step at a time:
/// `PENDING -> CONFIRMED -> PROCESSING -> SHIPPED -> DELIVERED`.
/// `CANCELLED` is reachable from any non-terminal state. `DELIVERED` and
/// `CANCELLED` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether this status permits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// The next status on the forward (fulfillment) path, if any.
    #[must_use]
    pub const fn next_forward(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Processing),
            Self::Processing => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Whether a transition from `self` to `next` is legal.
    ///
    /// Forward transitions advance exactly one step; cancellation is allowed
    /// from any non-terminal state; nothing leaves a terminal state.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == Self::Cancelled {
            return true;
        }
        self.next_forward() == Some(next)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "PROCESSING" => Ok(Self::Processing),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Customer role with different permission levels.
///
/// A single customer table holds shoppers and staff; the role decides which
/// surface they may use. Capability checks live here so endpoints don't each
/// reimplement the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerRole {
    /// Regular shopper.
    #[default]
    Customer,
    /// Full access to store management features.
    Admin,
    /// Full access including customer role management.
    SuperAdmin,
}

impl CustomerRole {
    /// Whether this role may use the admin back-office.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Whether this role may manage other customers' roles.
    #[must_use]
    pub const fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl std::fmt::Display for CustomerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
            Self::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

impl std::str::FromStr for CustomerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(format!("invalid customer role: {s}")),
        }
    }
}

/// How an order is paid.
///
/// Cash on delivery is the only method the store processes. Other values are
/// accepted from clients and stored as [`PaymentMethod::Other`] without any
/// special handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CashOnDelivery => write!(f, "CASH_ON_DELIVERY"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH_ON_DELIVERY" => Ok(Self::CashOnDelivery),
            _ => Ok(Self::Other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_forward_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_no_skipping_states() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Confirmed));
    }

    #[test]
    fn test_cancellation_from_non_terminal() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
        ] {
            assert!(status.can_transition_to(OrderStatus::Cancelled));
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for next in [
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(
                OrderStatus::from_str(&status.to_string()).expect("roundtrip"),
                status
            );
        }
        assert!(OrderStatus::from_str("REFUNDED").is_err());
    }

    #[test]
    fn test_role_predicates() {
        assert!(!CustomerRole::Customer.is_staff());
        assert!(CustomerRole::Admin.is_staff());
        assert!(CustomerRole::SuperAdmin.is_staff());
        assert!(!CustomerRole::Admin.is_super_admin());
        assert!(CustomerRole::SuperAdmin.is_super_admin());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!(
            PaymentMethod::from_str("CASH_ON_DELIVERY").expect("infallible"),
            PaymentMethod::CashOnDelivery
        );
        // Unknown methods are accepted but not processed differently.
        assert_eq!(
            PaymentMethod::from_str("CREDIT_CARD").expect("infallible"),
            PaymentMethod::Other
        );
    }

    #[test]
    fn test_payment_method_deserialize_other() {
        let m: PaymentMethod = serde_json::from_str("\"BANK_TRANSFER\"").expect("deserialize");
        assert_eq!(m, PaymentMethod::Other);
    }
}
