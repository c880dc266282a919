//! Integration tests for the layout engine

pub mod layout_flow;
pub mod list_lifecycle;
pub mod picker_flow;
