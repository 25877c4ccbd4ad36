//! Cross-component integration suites.

pub mod delivery_flows;
pub mod end_to_end;
