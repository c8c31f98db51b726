//! Property-based tests for request validation.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;

use proptest::prelude::*;

use dbup_cli::domain::error::ValidationError;
use dbup_cli::domain::request::{ProvisionParams, build};

fn params_with(identifier: &str, secret: &str, storage_gb: u32) -> ProvisionParams {
    ProvisionParams {
        identifier: identifier.to_string(),
        database: "app".to_string(),
        username: "postgres".to_string(),
        secret: secret.to_string(),
        instance_class: "db.t3.micro".to_string(),
        storage_gb,
        tags: BTreeMap::new(),
    }
}

proptest! {
    #[test]
    fn secrets_shorter_than_eight_are_always_rejected(secret in "[ -~]{0,7}") {
        let result = build(params_with("app-db", &secret, 20));
        prop_assert_eq!(
            result.expect_err("short secret must fail"),
            ValidationError::SecretTooShort { min: 8 }
        );
    }

    #[test]
    fn secrets_of_eight_or_more_pass_length_validation(secret in "[ -~]{8,64}") {
        prop_assert!(build(params_with("app-db", &secret, 20)).is_ok());
    }

    #[test]
    fn well_formed_identifiers_are_accepted(id in "[a-z][a-z0-9-]{0,62}") {
        prop_assert!(build(params_with(&id, "hunter2222", 20)).is_ok());
    }

    #[test]
    fn identifiers_with_invalid_characters_are_rejected(id in "[a-z]{1,8}[A-Z_./:]{1,4}") {
        let result = build(params_with(&id, "hunter2222", 20));
        prop_assert!(matches!(result, Err(ValidationError::IdentifierInvalid(_))));
    }

    #[test]
    fn any_positive_storage_size_is_accepted(storage in 1u32..=65_536) {
        prop_assert!(build(params_with("app-db", "hunter2222", storage)).is_ok());
    }
}

#[test]
fn zero_storage_is_rejected() {
    assert_eq!(
        build(params_with("app-db", "hunter2222", 0)).expect_err("zero storage"),
        ValidationError::StorageZero
    );
}
