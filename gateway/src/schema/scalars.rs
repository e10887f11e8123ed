use std::{fmt, str::FromStr};

use alloy::primitives::U256;
use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};

/// Unsigned 256-bit integer, serialized as a decimal string. Accepts string
/// or integer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BigInt(pub U256);

impl BigInt {
    pub const ZERO: BigInt = BigInt(U256::ZERO);
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        BigInt(U256::from(value))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[Scalar(name = "BigInt")]
impl ScalarType for BigInt {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => U256::from_str(s.trim())
                .map(BigInt)
                .map_err(|_| InputValueError::custom("Invalid BigInt value")),
            Value::Number(n) => n
                .as_u64()
                .map(BigInt::from)
                .ok_or_else(|| InputValueError::custom("Invalid BigInt value")),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn is_valid(value: &Value) -> bool {
        matches!(value, Value::String(_) | Value::Number(_))
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}
