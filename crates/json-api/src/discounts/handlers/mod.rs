//! Discounts Handlers

pub(crate) mod apply;
