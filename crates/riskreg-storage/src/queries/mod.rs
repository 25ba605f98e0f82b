//! SQL for each table. Every function takes a `&Connection` so callers can
//! pass either a plain connection or an open transaction.

pub mod cascade_ops;
pub mod change_log_ops;
pub mod change_request_ops;
pub mod risk_ops;
pub mod row;
pub mod treatment_ops;
