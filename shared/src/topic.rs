//! Push topic names
//!
//! One topic per view: the kitchen board follows every order of a
//! restaurant, a customer follows only the order of their table session.

/// Topic carrying order snapshots for a whole restaurant (kitchen board)
pub fn restaurant_orders(restaurant_id: i64) -> String {
    format!("/topic/orders/{restaurant_id}")
}

/// Topic carrying the current order snapshot of one table session
pub fn session_order(session_id: &str) -> String {
    format!("/topic/sessions/{session_id}")
}
