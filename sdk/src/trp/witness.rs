use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::Error;
use crate::core::BytesEnvelope;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VKeyWitness {
    pub key: BytesEnvelope,
    pub signature: BytesEnvelope,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SubmitWitness {
    #[serde(rename = "vkey")]
    VKey(VKeyWitness),
}

impl SubmitWitness {
    pub fn vkey(key: BytesEnvelope, signature: BytesEnvelope) -> Self {
        SubmitWitness::VKey(VKeyWitness { key, signature })
    }
}

const SHAPE_MISMATCH: &str = "witness is neither a string nor a witness object";

/// A witness as accepted by `trp.submit`: either a structured witness or a raw hex string.
///
/// Decoding tries the string shape first, so a JSON string always yields `Hex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WitnessInput {
    Object(SubmitWitness),
    Hex(String),
}

impl WitnessInput {
    pub fn from_value(value: Value) -> Result<Self, Error> {
        Self::decode(value).map_err(Error::InvalidWitness)
    }

    fn decode(value: Value) -> Result<Self, String> {
        if let Value::String(hex) = value {
            return Ok(WitnessInput::Hex(hex));
        }

        serde_json::from_value::<SubmitWitness>(value)
            .map(WitnessInput::Object)
            .map_err(|e| format!("{SHAPE_MISMATCH}: {e}"))
    }

    pub fn as_object(&self) -> Option<&SubmitWitness> {
        match self {
            WitnessInput::Object(x) => Some(x),
            WitnessInput::Hex(_) => None,
        }
    }

    pub fn as_hex(&self) -> Option<&str> {
        match self {
            WitnessInput::Hex(x) => Some(x),
            WitnessInput::Object(_) => None,
        }
    }
}

impl From<SubmitWitness> for WitnessInput {
    fn from(value: SubmitWitness) -> Self {
        WitnessInput::Object(value)
    }
}

impl From<VKeyWitness> for WitnessInput {
    fn from(value: VKeyWitness) -> Self {
        WitnessInput::Object(SubmitWitness::VKey(value))
    }
}

impl From<String> for WitnessInput {
    fn from(value: String) -> Self {
        WitnessInput::Hex(value)
    }
}

impl From<&str> for WitnessInput {
    fn from(value: &str) -> Self {
        WitnessInput::Hex(value.to_string())
    }
}

impl Serialize for WitnessInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WitnessInput::Object(witness) => witness.serialize(serializer),
            WitnessInput::Hex(hex) => serializer.serialize_str(hex),
        }
    }
}

impl<'de> Deserialize<'de> for WitnessInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        WitnessInput::decode(value).map_err(de::Error::custom)
    }
}
