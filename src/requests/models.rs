// src/requests/models.rs
//
// Field names are accepted in either casing (`num` or `Num`); failures are
// reported under the PascalCase property names.

use serde::{Deserialize, Serialize};

use super::validators::{AddRequestValidator, TestRequestValidator};
use crate::validation::{ServiceLifetime, Validatable, ValidatorBase};

// ============================================================================
// Request Models
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TestRequest {
    #[serde(alias = "Num")]
    pub num: i32,
    #[serde(alias = "Length")]
    pub length: String,
}

impl ValidatorBase for TestRequest {}

impl Validatable for TestRequest {
    type Validator = TestRequestValidator;

    const LIFETIME: ServiceLifetime = ServiceLifetime::Singleton;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    #[serde(alias = "Num")]
    pub num: i32,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Age")]
    pub age: i32,
}

impl ValidatorBase for AddRequest {}

impl Validatable for AddRequest {
    type Validator = AddRequestValidator;
}

// No validator is bound to this one
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TestNoRequest {
    #[serde(alias = "Num")]
    pub num: i32,
}

impl ValidatorBase for TestNoRequest {}
