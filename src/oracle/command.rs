//! Wire codec for the oracle's ASCII command grammar.
//!
//! One command per UDP datagram, comma/colon-delimited, no escaping and no
//! length prefix; the datagram boundary is the message boundary. Numeric
//! fields are formatted with six decimal places to match what the oracle's
//! parser expects.
//!
//! Request forms:
//! - `LOC_UPDATE:<objId>,<x>,<y>,<z>,<angleDeg>`
//! - `CALC_REQUEST_PATHGAIN:<objA>,<objB>`
//! - `CALC_REQUEST_DELAY:<objA>,<objB>`
//! - `CALC_REQUEST_LOS:<objA>,<objB>`
//! - `SHUTDOWN_SIONNA`
//!
//! Reply forms:
//! - `LOC_CONFIRM:<objId>`
//! - `CALC_DONE_PATHGAIN:<dB>`
//! - `CALC_DONE_DELAY:<seconds>`
//! - `CALC_DONE_LOS:<bool>`

use crate::geometry::Vec3;

/// Commands that can be sent to the oracle's UDP endpoint.
///
/// Object identifiers are opaque tokens scoped to the oracle's scene
/// (e.g. `obj0`); they must not contain `,` or `:`.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleCommand {
    /// Move a scene object to a new position with a heading angle.
    LocUpdate {
        object_id: String,
        position: Vec3,
        angle_deg: f64,
    },

    /// Request the attenuation in dB between two previously located objects.
    CalcPathGain { object_a: String, object_b: String },

    /// Request the shortest propagation delay between two located objects.
    CalcDelay { object_a: String, object_b: String },

    /// Request line-of-sight status between two located objects.
    CalcLos { object_a: String, object_b: String },

    /// Ask the oracle process to exit. Fire-and-forget; no reply format is
    /// checked.
    Shutdown,
}

impl OracleCommand {
    /// Serialize the command to its single-line wire form.
    pub fn encode(&self) -> String {
        match self {
            OracleCommand::LocUpdate {
                object_id,
                position,
                angle_deg,
            } => format!(
                "LOC_UPDATE:{},{:.6},{:.6},{:.6},{:.6}",
                object_id, position.x, position.y, position.z, angle_deg
            ),

            OracleCommand::CalcPathGain { object_a, object_b } => {
                format!("CALC_REQUEST_PATHGAIN:{},{}", object_a, object_b)
            }

            OracleCommand::CalcDelay { object_a, object_b } => {
                format!("CALC_REQUEST_DELAY:{},{}", object_a, object_b)
            }

            OracleCommand::CalcLos { object_a, object_b } => {
                format!("CALC_REQUEST_LOS:{},{}", object_a, object_b)
            }

            OracleCommand::Shutdown => "SHUTDOWN_SIONNA".to_string(),
        }
    }
}

/// Error type for reply decoding failures.
///
/// Decode failures are reported to the caller and substituted with a
/// sentinel at the client boundary; they are never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The reply did not start with the expected `CALC_DONE_...`/`LOC_CONFIRM` prefix.
    MissingPrefix { expected: &'static str, reply: String },
    /// The payload after the prefix did not parse as the expected value.
    BadValue { expected: &'static str, payload: String },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::MissingPrefix { expected, reply } => {
                write!(f, "reply is missing prefix {}: {:?}", expected, reply)
            }
            DecodeError::BadValue { expected, payload } => {
                write!(f, "reply payload is not a valid {}: {:?}", expected, payload)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

const LOC_CONFIRM_PREFIX: &str = "LOC_CONFIRM:";
const PATH_GAIN_DONE_PREFIX: &str = "CALC_DONE_PATHGAIN:";
const DELAY_DONE_PREFIX: &str = "CALC_DONE_DELAY:";
const LOS_DONE_PREFIX: &str = "CALC_DONE_LOS:";

fn strip_prefix<'a>(reply: &'a str, prefix: &'static str) -> Result<&'a str, DecodeError> {
    reply.strip_prefix(prefix).ok_or_else(|| DecodeError::MissingPrefix {
        expected: prefix,
        reply: reply.to_string(),
    })
}

fn parse_float(payload: &str) -> Result<f64, DecodeError> {
    payload.trim().parse::<f64>().map_err(|_| DecodeError::BadValue {
        expected: "float",
        payload: payload.to_string(),
    })
}

/// Decode a `LOC_CONFIRM:<objId>` acknowledgment, returning the confirmed
/// object id.
pub fn decode_loc_confirm(reply: &str) -> Result<&str, DecodeError> {
    let payload = strip_prefix(reply, LOC_CONFIRM_PREFIX)?;
    Ok(payload.trim())
}

/// Decode a `CALC_DONE_PATHGAIN:<value>` reply into a path loss in dB.
pub fn decode_path_gain(reply: &str) -> Result<f64, DecodeError> {
    parse_float(strip_prefix(reply, PATH_GAIN_DONE_PREFIX)?)
}

/// Decode a `CALC_DONE_DELAY:<value>` reply into a delay in seconds.
pub fn decode_delay(reply: &str) -> Result<f64, DecodeError> {
    parse_float(strip_prefix(reply, DELAY_DONE_PREFIX)?)
}

/// Decode a `CALC_DONE_LOS:<value>` reply into a line-of-sight flag.
///
/// The oracle prints its internal truth value directly, so the payload may
/// arrive as `True`/`False`, as `0`/`1` (calibration origin), or wrapped in
/// list brackets (`[True]`). All spellings are accepted case-insensitively.
pub fn decode_los(reply: &str) -> Result<bool, DecodeError> {
    let payload = strip_prefix(reply, LOS_DONE_PREFIX)?;
    let normalized = payload.trim().trim_matches(['[', ']']).trim().to_ascii_lowercase();
    match normalized.as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(DecodeError::BadValue {
            expected: "bool",
            payload: payload.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loc_update_uses_six_decimal_fixed_point() {
        let cmd = OracleCommand::LocUpdate {
            object_id: "obj3".to_string(),
            position: Vec3::new(200.0, 10.0, 1.5),
            angle_deg: 30.0,
        };
        assert_eq!(cmd.encode(), "LOC_UPDATE:obj3,200.000000,10.000000,1.500000,30.000000");
    }

    #[test]
    fn request_and_shutdown_forms() {
        let cmd = OracleCommand::CalcPathGain {
            object_a: "obj0".to_string(),
            object_b: "obj1".to_string(),
        };
        assert_eq!(cmd.encode(), "CALC_REQUEST_PATHGAIN:obj0,obj1");

        let cmd = OracleCommand::CalcDelay {
            object_a: "obj0".to_string(),
            object_b: "obj1".to_string(),
        };
        assert_eq!(cmd.encode(), "CALC_REQUEST_DELAY:obj0,obj1");

        let cmd = OracleCommand::CalcLos {
            object_a: "obj0".to_string(),
            object_b: "obj1".to_string(),
        };
        assert_eq!(cmd.encode(), "CALC_REQUEST_LOS:obj0,obj1");

        assert_eq!(OracleCommand::Shutdown.encode(), "SHUTDOWN_SIONNA");
    }

    #[test]
    fn path_gain_roundtrips_through_wire_format() {
        let reply = format!("CALC_DONE_PATHGAIN:{:.6}", 83.2764);
        let value = decode_path_gain(&reply).unwrap();
        assert!((value - 83.2764).abs() < 1e-4);
    }

    #[test]
    fn path_gain_decode_rejects_garbage() {
        let err = decode_path_gain("CALC_DONE_PATHGAIN:garbage").unwrap_err();
        assert!(matches!(err, DecodeError::BadValue { .. }));

        let err = decode_path_gain("SOMETHING_ELSE:12.0").unwrap_err();
        assert!(matches!(err, DecodeError::MissingPrefix { .. }));
    }

    #[test]
    fn loc_confirm_yields_object_id() {
        assert_eq!(decode_loc_confirm("LOC_CONFIRM:obj3").unwrap(), "obj3");
        assert!(decode_loc_confirm("NACK").is_err());
    }

    #[test]
    fn los_accepts_oracle_truth_spellings() {
        assert!(decode_los("CALC_DONE_LOS:True").unwrap());
        assert!(decode_los("CALC_DONE_LOS:[True]").unwrap());
        assert!(!decode_los("CALC_DONE_LOS:False").unwrap());
        assert!(!decode_los("CALC_DONE_LOS:0").unwrap());
        assert!(decode_los("CALC_DONE_LOS:maybe").is_err());
    }

    #[test]
    fn delay_decodes_seconds() {
        let value = decode_delay("CALC_DONE_DELAY:0.000196").unwrap();
        assert!((value - 0.000196).abs() < 1e-9);
    }
}
