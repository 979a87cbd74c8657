#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{assert_validation_error, create_transaction, get_test_server};
